use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::AppError;

/// Сообщение о проблеме с заказом
#[derive(Debug, Clone, Deserialize)]
pub struct ReportRequest {
    pub order_number: String,
    pub manager: Option<String>,
    pub description: String,
    pub reported_by: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolveRequest {
    pub resolved_by: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProblem {
    pub order_number: String,
    pub manager: Option<String>,
    pub description: String,
    pub reported_by: String,
}

impl TryFrom<ReportRequest> for NewProblem {
    type Error = AppError;

    fn try_from(value: ReportRequest) -> Result<Self, Self::Error> {
        let order_number = value.order_number.trim().to_string();
        let description = value.description.trim().to_string();
        let reported_by = value.reported_by.trim().to_string();
        if order_number.is_empty() {
            return Err(AppError::Validation("Не указан номер заявки".to_string()));
        }
        if description.is_empty() {
            return Err(AppError::Validation("Пустое описание проблемы".to_string()));
        }
        if reported_by.is_empty() {
            return Err(AppError::Validation("Не указан автор сообщения".to_string()));
        }
        Ok(Self {
            order_number,
            manager: value
                .manager
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty()),
            description,
            reported_by,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, FromRow)]
pub struct ProblemEntry {
    pub id: uuid::Uuid,
    pub order_number: String,
    pub manager: Option<String>,
    pub description: String,
    pub reported_by: String,
    pub created_at: DateTime<Utc>,
    pub resolved: Option<bool>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by: Option<String>,
}

impl ProblemEntry {
    pub fn from_new(value: NewProblem) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            order_number: value.order_number,
            manager: value.manager,
            description: value.description,
            reported_by: value.reported_by,
            created_at: Utc::now(),
            resolved: None,
            resolved_at: None,
            resolved_by: None,
        }
    }
    pub fn is_resolved(&self) -> bool {
        self.resolved.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_request_trims_description() {
        let request = ReportRequest {
            order_number: "55".to_string(),
            manager: None,
            description: "  не хватает листа 3 мм \n".to_string(),
            reported_by: "Анна Смирнова".to_string(),
        };
        let problem = NewProblem::try_from(request);
        assert!(problem.is_ok_and(|p| p.description == "не хватает листа 3 мм"));
    }

    #[test]
    fn test_blank_description_is_rejected() {
        let request = ReportRequest {
            order_number: "55".to_string(),
            manager: None,
            description: "   ".to_string(),
            reported_by: "Анна Смирнова".to_string(),
        };
        assert!(matches!(
            NewProblem::try_from(request),
            Err(AppError::Validation(_))
        ));
    }
}
