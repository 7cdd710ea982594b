use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct House {
    pub id: Uuid,
    pub description: String,
    pub address: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Column values written by `UPDATE houses`
#[derive(Debug, Clone)]
pub struct HouseChanges {
    pub description: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HouseCreateInput {
    pub description: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HouseUpdateInput {
    pub id: Uuid,
    pub description: String,
    pub address: String,
}

impl House {
    pub fn new(owner_id: Uuid, input: HouseCreateInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: input.description,
            address: input.address,
            owner_id,
            created_at: Utc::now(),
        }
    }
}

impl From<HouseUpdateInput> for HouseChanges {
    fn from(input: HouseUpdateInput) -> Self {
        Self {
            description: input.description,
            address: input.address,
        }
    }
}
