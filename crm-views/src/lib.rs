//! CRM Views - read models behind the dashboard pages
//!
//! Every data set here is a static fixture; filters and summaries are pure
//! functions over it.

pub mod dashboard;
pub mod finance;
pub mod format;
pub mod inventory;
pub mod settings;

pub use dashboard::{dashboard, DashboardData};
pub use finance::{FinanceView, LedgerSummary, Transaction, TransactionFilter};
pub use format::{format_currency, format_date};
pub use inventory::{InventorySummary, InventoryView, Movement, Product, ProductFilter};
pub use settings::{NotificationPreferences, ProfileUpdate};

use chrono::NaiveDate;

/// Parse an ISO fixture date
pub(crate) fn ymd(value: &str) -> NaiveDate {
    value.parse().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ymd_falls_back_on_typos() {
        assert_eq!(
            ymd("2023-05-07"),
            NaiveDate::from_ymd_opt(2023, 5, 7).unwrap()
        );
        assert_eq!(ymd("2023-02-30"), NaiveDate::default());
    }

    #[test]
    fn test_every_fixture_date_parses() {
        let mut dates = Vec::new();
        for transaction in finance::transactions() {
            dates.push((transaction.id.clone(), transaction.date));
            dates.push((transaction.id, transaction.due_date));
        }
        for product in inventory::products() {
            dates.push((product.id, product.last_updated));
        }
        for movement in inventory::movements() {
            dates.push((movement.id, movement.date));
        }
        for task in dashboard().upcoming_tasks {
            dates.push((task.id.to_string(), task.date));
        }

        assert!(!dates.is_empty());
        for (id, date) in dates {
            assert_ne!(date, NaiveDate::default(), "fixture {}", id);
            assert_eq!(date.format("%Y").to_string(), "2023", "fixture {}", id);
        }
    }
}
