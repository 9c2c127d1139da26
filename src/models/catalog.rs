// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- 1. Produtos ---
// Forma dos dados entregue pelo serviço de catálogo; o núcleo só lê.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    /// Preço de compra usado para preencher o `rate` da linha quando o
    /// produto é selecionado. Ausente vira zero.
    pub purchase_price: Option<Decimal>,
    pub created_at: Option<DateTime<Utc>>,
}

// --- 2. Depósitos ---
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: Uuid,
    pub name: String,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}
