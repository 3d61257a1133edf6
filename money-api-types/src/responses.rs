use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip_code: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
