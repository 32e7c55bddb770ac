//! Dashboard overview

use crate::finance;
use crate::ymd;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Kpi {
    pub title: &'static str,
    pub value: String,
    pub change: String,
    pub trend: Trend,
}

/// Named value of a chart series
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Point {
    pub name: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecentTransaction {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub status: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Priority {
    Alta,
    #[serde(rename = "Média")]
    Media,
    Baixa,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Task {
    pub id: u32,
    pub title: &'static str,
    pub date: NaiveDate,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub kpis: Vec<Kpi>,
    pub revenue: Vec<Point>,
    pub client_activity: Vec<Point>,
    pub inventory_by_category: Vec<Point>,
    pub upcoming_tasks: Vec<Task>,
    pub latest_transactions: Vec<RecentTransaction>,
}

fn series(points: &[(&'static str, f64)]) -> Vec<Point> {
    points
        .iter()
        .map(|&(name, value)| Point { name, value })
        .collect()
}

fn latest_transactions(count: usize) -> Vec<RecentTransaction> {
    finance::transactions()
        .into_iter()
        .take(count)
        .map(|transaction| RecentTransaction {
            amount: transaction.signed_amount(),
            status: transaction.status.label(),
            id: transaction.id,
            description: transaction.description,
            date: transaction.date,
        })
        .collect()
}

fn upcoming_tasks() -> Vec<Task> {
    #[rustfmt::skip]
    let rows = [
        (1, "Reunião com fornecedor", "2023-05-22", Priority::Alta),
        (2, "Conferência de estoque", "2023-05-23", Priority::Media),
        (3, "Revisão de relatórios financeiros", "2023-05-24", Priority::Alta),
        (4, "Atualização do sistema", "2023-05-25", Priority::Baixa),
    ];

    rows.into_iter()
        .map(|(id, title, date, priority)| Task {
            id,
            title,
            date: ymd(date),
            priority,
        })
        .collect()
}

pub fn dashboard() -> DashboardData {
    let inventory_by_category = series(&[
        ("Eletrônicos", 120.0),
        ("Escritório", 85.0),
        ("Móveis", 45.0),
        ("Periféricos", 70.0),
    ]);
    let items_in_stock: f64 = inventory_by_category.iter().map(|p| p.value).sum();

    let kpis = vec![
        Kpi {
            title: "Total de Clientes",
            value: "152".to_string(),
            change: "+12% este mês".to_string(),
            trend: Trend::Up,
        },
        Kpi {
            title: "Faturamento Mensal",
            value: "R$ 45.873".to_string(),
            change: "+8,5% este mês".to_string(),
            trend: Trend::Up,
        },
        Kpi {
            title: "Itens em Estoque",
            value: items_in_stock.to_string(),
            change: "-5% este mês".to_string(),
            trend: Trend::Down,
        },
        Kpi {
            title: "Tarefas para Hoje",
            value: "12".to_string(),
            change: "5 completadas".to_string(),
            trend: Trend::Flat,
        },
    ];

    DashboardData {
        kpis,
        revenue: series(&[
            ("Jan", 12000.0),
            ("Fev", 19000.0),
            ("Mar", 15000.0),
            ("Abr", 18000.0),
            ("Mai", 24000.0),
            ("Jun", 22000.0),
        ]),
        client_activity: series(&[("Ativos", 65.0), ("Inativos", 35.0)]),
        inventory_by_category,
        upcoming_tasks: upcoming_tasks(),
        latest_transactions: latest_transactions(4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kpis() {
        let data = dashboard();
        let values: Vec<&str> = data.kpis.iter().map(|k| k.value.as_str()).collect();

        assert_eq!(values, vec!["152", "R$ 45.873", "320", "12"]);
        assert_eq!(data.kpis[2].trend, Trend::Down);
    }

    #[test]
    fn test_latest_transactions_sign_payables() {
        let latest = dashboard().latest_transactions;
        let amounts: Vec<f64> = latest.iter().map(|t| t.amount).collect();
        let statuses: Vec<&str> = latest.iter().map(|t| t.status).collect();

        assert_eq!(amounts, vec![1250.0, -450.0, 875.5, -180.0]);
        assert_eq!(statuses, vec!["Pago", "Pago", "Pendente", "Pago"]);
    }

    #[test]
    fn test_series() {
        let data = dashboard();

        assert_eq!(data.revenue.len(), 6);
        assert_eq!(data.revenue[4].name, "Mai");
        assert_eq!(data.revenue[4].value, 24000.0);
        let activity = &data.client_activity;
        assert_eq!(activity[0].value + activity[1].value, 100.0);
    }

    #[test]
    fn test_task_priority_serializes_as_label() {
        let tasks = dashboard().upcoming_tasks;
        let json = serde_json::to_value(&tasks[1]).unwrap();

        assert_eq!(json["priority"], "Média");
        assert_eq!(json["date"], "2023-05-23");
    }
}
