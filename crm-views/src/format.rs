//! pt-BR display formatting

use chrono::NaiveDate;

/// Render an amount as Brazilian reais, e.g. `R$ 1.250,00`
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };

    format!("{}R$ {},{:02}", sign, whole, cents % 100)
}

/// Render a date as `dd/mm/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 3 == lead {
            out.push('.');
        }
        out.push(c);
    }
    out
}
