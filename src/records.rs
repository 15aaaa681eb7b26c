//! Per-domain record schemas matching the fixed on-disk column sets.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Validation failures for typed record input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("could not parse amount '{0}' as a number")]
    InvalidAmount(String),
    #[error("could not parse date '{0}' (expected day-first d/m/Y, e.g. 5/1/2025)")]
    InvalidDate(String),
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// A record type stored in one of the domain CSV files.
///
/// The header list is fixed per domain and every load assumes exactly these
/// columns; [`crate::store::Store`] uses it to create empty files and to
/// refuse files with a different shape.
pub trait DomainRecord: Serialize + DeserializeOwned + Clone {
    /// Human-readable domain name for log and error messages.
    const DOMAIN: &'static str;
    /// Default file name under the data directory.
    const FILE_NAME: &'static str;
    /// Exact on-disk header row.
    const HEADERS: &'static [&'static str];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueRecord {
    #[serde(rename = "DATE")]
    pub date: String,
    #[serde(rename = "Customer")]
    pub customer: String,
    #[serde(rename = "Amount")]
    pub amount: String,
}

impl DomainRecord for RevenueRecord {
    const DOMAIN: &'static str = "revenue";
    const FILE_NAME: &'static str = "revenue.csv";
    const HEADERS: &'static [&'static str] = &["DATE", "Customer", "Amount"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyRecord {
    #[serde(rename = "Job Order")]
    pub job_order: String,
    /// Purchase requisition date, day-first text.
    #[serde(rename = "PR")]
    pub requisition_date: String,
    /// Purchase order date, day-first text.
    #[serde(rename = "PO")]
    pub order_date: String,
}

impl DomainRecord for SupplyRecord {
    const DOMAIN: &'static str = "supply chain";
    const FILE_NAME: &'static str = "supply_chain.csv";
    const HEADERS: &'static [&'static str] = &["Job Order", "PR", "PO"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Job Order")]
    pub job_order: String,
    #[serde(rename = "Customer")]
    pub customer: String,
    #[serde(rename = "Amount")]
    pub amount: String,
}

impl DomainRecord for SalesRecord {
    const DOMAIN: &'static str = "sales";
    const FILE_NAME: &'static str = "sales.csv";
    const HEADERS: &'static [&'static str] = &["Job Order", "Customer", "Amount"];
}

pub fn require_non_empty(field: &'static str, value: &str) -> Result<(), RecordError> {
    if value.trim().is_empty() {
        Err(RecordError::EmptyField(field))
    } else {
        Ok(())
    }
}
