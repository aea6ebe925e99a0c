use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Station;
use crate::AppError;

/// Запрос на перемещение заказа на участок
#[derive(Debug, Clone, Deserialize)]
pub struct MoveRequest {
    pub order_number: String,
    pub manager: Option<String>,
    pub moved_to: String,
    pub moved_by: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLogisticsEntry {
    pub order_number: String,
    pub manager: Option<String>,
    pub moved_to: Station,
    pub moved_by: String,
}

impl TryFrom<MoveRequest> for NewLogisticsEntry {
    type Error = AppError;

    fn try_from(value: MoveRequest) -> Result<Self, Self::Error> {
        let order_number = value.order_number.trim().to_string();
        if order_number.is_empty() {
            return Err(AppError::Validation("Не указан номер заявки".to_string()));
        }
        let moved_to = Station::from_move_target(&value.moved_to).ok_or_else(|| {
            AppError::Validation(format!("Неизвестный участок: '{}'", value.moved_to))
        })?;
        let moved_by = value.moved_by.trim().to_string();
        if moved_by.is_empty() {
            return Err(AppError::Validation("Не указано, кто переместил заказ".to_string()));
        }
        Ok(Self {
            order_number,
            manager: value
                .manager
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty()),
            moved_to,
            moved_by,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, FromRow)]
pub struct LogisticsEntry {
    pub id: uuid::Uuid,
    pub order_number: String,
    pub manager: Option<String>,
    pub moved_to: String,
    pub moved_by: String,
    pub created_at: DateTime<Utc>,
}

impl LogisticsEntry {
    pub fn from_new(value: NewLogisticsEntry) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            order_number: value.order_number,
            manager: value.manager,
            moved_to: value.moved_to.label().to_string(),
            moved_by: value.moved_by,
            created_at: Utc::now(),
        }
    }
}
