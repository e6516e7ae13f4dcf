use chrono::NaiveDate;
use serde::Deserialize;

// -------------------------
// Request DTOs
// -------------------------
//
// Responses serialize the domain types directly; only requests need their
// own shapes here.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterialRequest {
    pub name: String,
    pub category: String,
    pub total_quantity: u32,
    /// Defaults to today when omitted.
    pub entry_date: Option<NaiveDate>,
    /// Resubmitting with the same key within the dedup window replays the
    /// original material instead of creating a duplicate.
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchMaterialRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub total_quantity: Option<u32>,
    pub entry_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueStockRequest {
    pub quantity: u32,
    pub recipient: String,
    /// Defaults to today when omitted.
    pub issue_date: Option<NaiveDate>,
    pub destination: Option<String>,
    pub receipt_number: Option<String>,
}
