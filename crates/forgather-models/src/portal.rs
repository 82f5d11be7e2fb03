use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::group::Group;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub group_id: Uuid,
    pub amount: f64,
    pub currency: String,
    pub status: InvoiceStatus,
    pub issued_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RfqStatus {
    Open,
    Quoted,
    Awarded,
    Closed,
}

/// Supplier-facing request for quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rfq {
    pub id: Uuid,
    pub group_id: Uuid,
    pub title: String,
    pub quantity: u32,
    pub status: RfqStatus,
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    pub rfq_id: Uuid,
    pub supplier_id: Uuid,
    pub unit_price: f64,
    pub currency: String,
    pub submitted_at: DateTime<Utc>,
}

/// Snapshot backing the client portal view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDashboard {
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    pub points_balance: i64,
    pub points_held: i64,
}

/// Snapshot backing the supplier portal view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierDashboard {
    #[serde(default)]
    pub open_rfqs: Vec<Rfq>,
    #[serde(default)]
    pub submitted_quotes: Vec<Quote>,
}
