//! Finance ledger
//!
//! Receivables and payables with tab, search, status and month filters.

use crate::ymd;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Receivable,
    Payable,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Paid,
    Pending,
}

impl TransactionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionStatus::Paid => "Pago",
            TransactionStatus::Pending => "Pendente",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub client: String,
    pub kind: TransactionKind,
    pub amount: f64,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: TransactionStatus,
}

impl Transaction {
    /// Amount as it affects cash: payables count negative
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Receivable => self.amount,
            TransactionKind::Payable => -self.amount,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LedgerTab {
    #[default]
    All,
    Receivables,
    Payables,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Paid,
    Pending,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateFilter {
    #[default]
    All,
    ThisMonth,
}

/// Ledger filter, usually taken from a query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionFilter {
    pub tab: LedgerTab,
    pub search: String,
    pub status: StatusFilter,
    pub date: DateFilter,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction, today: NaiveDate) -> bool {
        let tab = match self.tab {
            LedgerTab::All => true,
            LedgerTab::Receivables => transaction.kind == TransactionKind::Receivable,
            LedgerTab::Payables => transaction.kind == TransactionKind::Payable,
        };

        let needle = self.search.to_lowercase();
        let search = needle.is_empty()
            || transaction.description.to_lowercase().contains(&needle)
            || transaction.client.to_lowercase().contains(&needle);

        let status = match self.status {
            StatusFilter::All => true,
            StatusFilter::Paid => transaction.status == TransactionStatus::Paid,
            StatusFilter::Pending => transaction.status == TransactionStatus::Pending,
        };

        let date = match self.date {
            DateFilter::All => true,
            DateFilter::ThisMonth => {
                transaction.date.month() == today.month() && transaction.date.year() == today.year()
            }
        };

        tab && search && status && date
    }
}

/// Totals over the whole ledger
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct LedgerSummary {
    pub total_receivables: f64,
    pub total_payables: f64,
    pub pending_receivables: f64,
    pub pending_payables: f64,
}

/// Filtered rows plus whole-ledger totals
#[derive(Debug, Clone, Serialize)]
pub struct FinanceView {
    pub transactions: Vec<Transaction>,
    pub summary: LedgerSummary,
}

/// The ledger, newest first
pub fn transactions() -> Vec<Transaction> {
    use TransactionKind::{Payable, Receivable};
    use TransactionStatus::{Paid, Pending};

    #[rustfmt::skip]
    let rows = [
        ("1", "Venda #12345", "Empresa ABC", Receivable, 1250.00, "2023-05-20", "2023-06-20", Paid),
        ("2", "Compra de estoque", "Fornecedor XYZ", Payable, 450.00, "2023-05-19", "2023-06-19", Paid),
        ("3", "Fatura #32455", "Cliente 123", Receivable, 875.50, "2023-05-18", "2023-06-18", Pending),
        ("4", "Manutenção", "Serviço Técnico", Payable, 180.00, "2023-05-17", "2023-06-17", Paid),
        ("5", "Venda #12346", "Cliente ABC", Receivable, 2340.00, "2023-05-16", "2023-06-16", Pending),
        ("6", "Aluguel", "Imobiliária", Payable, 1500.00, "2023-05-15", "2023-06-15", Pending),
        ("7", "Venda #12347", "Cliente DEF", Receivable, 890.00, "2023-05-14", "2023-06-14", Paid),
        ("8", "Internet e Telefone", "Operadora", Payable, 220.00, "2023-05-13", "2023-06-13", Pending),
    ];

    rows.into_iter()
        .map(
            |(id, description, client, kind, amount, date, due_date, status)| Transaction {
                id: id.to_string(),
                description: description.to_string(),
                client: client.to_string(),
                kind,
                amount,
                date: ymd(date),
                due_date: ymd(due_date),
                status,
            },
        )
        .collect()
}

pub fn filter_transactions(
    transactions: &[Transaction],
    filter: &TransactionFilter,
    today: NaiveDate,
) -> Vec<Transaction> {
    let rows: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| filter.matches(transaction, today))
        .cloned()
        .collect();

    debug!(
        matched = rows.len(),
        total = transactions.len(),
        "Filtered ledger"
    );
    rows
}

pub fn summarize(transactions: &[Transaction]) -> LedgerSummary {
    transactions
        .iter()
        .fold(LedgerSummary::default(), |mut summary, transaction| {
            let pending = transaction.status == TransactionStatus::Pending;
            match transaction.kind {
                TransactionKind::Receivable => {
                    summary.total_receivables += transaction.amount;
                    if pending {
                        summary.pending_receivables += transaction.amount;
                    }
                }
                TransactionKind::Payable => {
                    summary.total_payables += transaction.amount;
                    if pending {
                        summary.pending_payables += transaction.amount;
                    }
                }
            }
            summary
        })
}

pub fn finance_view(filter: &TransactionFilter, today: NaiveDate) -> FinanceView {
    let ledger = transactions();
    FinanceView {
        transactions: filter_transactions(&ledger, filter, today),
        summary: summarize(&ledger),
    }
}
