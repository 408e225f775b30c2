use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub id: String,
    pub name: String,
    pub building: Option<String>,
    pub floor: Option<i32>,
    pub capacity: i32,
    pub facilities: Json<Vec<String>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Classroom {
    pub fn new(
        name: String,
        building: Option<String>,
        floor: Option<i32>,
        capacity: i32,
        facilities: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            building,
            floor,
            capacity,
            facilities: Json(facilities),
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
