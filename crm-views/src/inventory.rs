//! Inventory
//!
//! Product catalogue, stock movements and low-stock reporting.

use crate::ymd;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub code: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub min_quantity: u32,
    pub price: f64,
    pub last_updated: NaiveDate,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Entry,
    Exit,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Movement {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub kind: MovementKind,
    pub quantity: u32,
    pub date: NaiveDate,
    pub user: String,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StockFilter {
    #[default]
    All,
    Low,
}

/// Catalogue filter; an empty or `all` category matches every product
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFilter {
    pub search: String,
    pub category: Option<String>,
    pub stock: StockFilter,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.search.to_lowercase();
        let search = needle.is_empty()
            || product.name.to_lowercase().contains(&needle)
            || product.code.to_lowercase().contains(&needle);

        let category = match self.category.as_deref() {
            None | Some("") | Some("all") => true,
            Some(category) => product.category == category,
        };

        let stock = match self.stock {
            StockFilter::All => true,
            StockFilter::Low => product.is_low_stock(),
        };

        search && category && stock
    }

    /// Movement search only looks at the product name
    pub fn matches_movement(&self, movement: &Movement) -> bool {
        let needle = self.search.to_lowercase();
        needle.is_empty() || movement.product_name.to_lowercase().contains(&needle)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryCount {
    pub name: &'static str,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct InventorySummary {
    pub total_products: usize,
    pub total_items: u32,
    pub total_categories: usize,
    pub low_stock: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct InventoryView {
    pub products: Vec<Product>,
    pub movements: Vec<Movement>,
    pub low_stock_products: Vec<Product>,
    pub categories: Vec<CategoryCount>,
    pub summary: InventorySummary,
}

pub fn products() -> Vec<Product> {
    #[rustfmt::skip]
    let rows = [
        ("1", "PROD001", "Laptop Dell XPS 13", "Eletrônicos", 15, 5, 5999.90, "2023-05-15"),
        ("2", "PROD002", "Monitor LG 27\"", "Eletrônicos", 28, 10, 1499.90, "2023-05-14"),
        ("3", "PROD003", "Mesa de Escritório", "Móveis", 8, 3, 799.90, "2023-05-13"),
        ("4", "PROD004", "Cadeira Ergonômica", "Móveis", 12, 5, 649.90, "2023-05-12"),
        ("5", "PROD005", "Teclado Mecânico", "Periféricos", 30, 15, 349.90, "2023-05-11"),
        ("6", "PROD006", "Mouse Gamer", "Periféricos", 22, 10, 199.90, "2023-05-10"),
        ("7", "PROD007", "Headset", "Periféricos", 18, 8, 299.90, "2023-05-09"),
        ("8", "PROD008", "Impressora Laser", "Escritório", 7, 3, 1299.90, "2023-05-08"),
        ("9", "PROD009", "Tablet Samsung", "Eletrônicos", 4, 5, 1899.90, "2023-05-07"),
        ("10", "PROD010", "Grampeador", "Escritório", 35, 15, 29.90, "2023-05-06"),
    ];

    rows.into_iter()
        .map(
            |(id, code, name, category, quantity, min_quantity, price, last_updated)| Product {
                id: id.to_string(),
                code: code.to_string(),
                name: name.to_string(),
                category: category.to_string(),
                quantity,
                min_quantity,
                price,
                last_updated: ymd(last_updated),
            },
        )
        .collect()
}

pub fn movements() -> Vec<Movement> {
    use MovementKind::{Entry, Exit};

    #[rustfmt::skip]
    let rows = [
        ("1", "1", "Laptop Dell XPS 13", Entry, 5, "2023-05-15", "João Silva", "Recebimento de fornecedor"),
        ("2", "2", "Monitor LG 27\"", Entry, 10, "2023-05-14", "João Silva", "Recebimento de fornecedor"),
        ("3", "1", "Laptop Dell XPS 13", Exit, 2, "2023-05-13", "Maria Souza", "Venda para cliente"),
        ("4", "3", "Mesa de Escritório", Entry, 3, "2023-05-12", "João Silva", "Recebimento de fornecedor"),
        ("5", "5", "Teclado Mecânico", Exit, 5, "2023-05-11", "Maria Souza", "Venda para cliente"),
        ("6", "9", "Tablet Samsung", Exit, 1, "2023-05-10", "Pedro Santos", "Venda para cliente"),
    ];

    rows.into_iter()
        .map(
            |(id, product_id, product_name, kind, quantity, date, user, notes)| Movement {
                id: id.to_string(),
                product_id: product_id.to_string(),
                product_name: product_name.to_string(),
                kind,
                quantity,
                date: ymd(date),
                user: user.to_string(),
                notes: notes.to_string(),
            },
        )
        .collect()
}

/// Units per category for the stock chart
pub fn categories() -> Vec<CategoryCount> {
    [
        ("Eletrônicos", 47),
        ("Móveis", 20),
        ("Periféricos", 70),
        ("Escritório", 42),
    ]
    .into_iter()
    .map(|(name, value)| CategoryCount { name, value })
    .collect()
}

pub fn summarize(products: &[Product]) -> InventorySummary {
    let categories: BTreeSet<&str> = products.iter().map(|p| p.category.as_str()).collect();

    InventorySummary {
        total_products: products.len(),
        total_items: products.iter().map(|p| p.quantity).sum(),
        total_categories: categories.len(),
        low_stock: products.iter().filter(|p| p.is_low_stock()).count(),
    }
}

pub fn inventory_view(filter: &ProductFilter) -> InventoryView {
    let catalogue = products();

    InventoryView {
        products: catalogue
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect(),
        movements: movements()
            .into_iter()
            .filter(|m| filter.matches_movement(m))
            .collect(),
        low_stock_products: catalogue
            .iter()
            .filter(|p| p.is_low_stock())
            .cloned()
            .collect(),
        categories: categories(),
        summary: summarize(&catalogue),
    }
}
