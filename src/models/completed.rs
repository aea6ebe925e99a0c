use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Запись архива готовых заказов перед сохранением. Все времена в часах.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct NewCompletedOrder {
    #[builder(setter(into))]
    pub order_number: String,
    #[builder(setter(custom), default)]
    pub manager: Option<String>,
    #[builder(default)]
    pub laser_time: f64,
    #[builder(default)]
    pub cleaning_time: f64,
    #[builder(default)]
    pub bending_time: f64,
    #[builder(default)]
    pub welding_time: f64,
    #[builder(default)]
    pub painting_time: f64,
    #[builder(default)]
    pub warehouse75_time: f64,
    #[builder(default)]
    pub warehouse_time: f64,
    #[builder(default)]
    pub total_time: f64,
    #[builder(default = "Utc::now()")]
    pub completed_at: DateTime<Utc>,
}

impl NewCompletedOrder {
    pub fn builder() -> NewCompletedOrderBuilder {
        NewCompletedOrderBuilder::default()
    }
}

impl NewCompletedOrderBuilder {
    /// Пустой менеджер сохраняется как NULL
    pub fn manager(&mut self, manager: impl AsRef<str>) -> &mut Self {
        let manager = manager.as_ref().trim();
        self.manager = Some((!manager.is_empty()).then(|| manager.to_string()));
        self
    }
    fn validate(&self) -> Result<(), String> {
        if self
            .order_number
            .as_ref()
            .is_some_and(|n| n.trim().is_empty())
        {
            return Err(String::from("Пустой номер заявки"));
        }
        let times = [
            self.laser_time,
            self.cleaning_time,
            self.bending_time,
            self.welding_time,
            self.painting_time,
            self.warehouse75_time,
            self.warehouse_time,
            self.total_time,
        ];
        if times.into_iter().flatten().any(|t| !t.is_finite()) {
            return Err(String::from("Время этапа должно быть конечным числом"));
        }
        Ok(())
    }
}

/// Сохраненный готовый заказ
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, FromRow)]
pub struct CompletedOrder {
    pub id: uuid::Uuid,
    pub order_number: String,
    pub manager: Option<String>,
    pub laser_time: f64,
    pub cleaning_time: f64,
    pub bending_time: f64,
    pub welding_time: f64,
    pub painting_time: f64,
    pub warehouse75_time: f64,
    pub warehouse_time: f64,
    pub total_time: f64,
    pub completed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl CompletedOrder {
    pub fn from_new(value: NewCompletedOrder) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            order_number: value.order_number,
            manager: value.manager,
            laser_time: value.laser_time,
            cleaning_time: value.cleaning_time,
            bending_time: value.bending_time,
            welding_time: value.welding_time,
            painting_time: value.painting_time,
            warehouse75_time: value.warehouse75_time,
            warehouse_time: value.warehouse_time,
            total_time: value.total_time,
            completed_at: value.completed_at,
            created_at: Utc::now(),
        }
    }
}

/// Итог синхронизации готовых заказов
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SyncReport {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<usize>,
    pub saved: usize,
}

impl SyncReport {
    pub fn no_data() -> Self {
        Self {
            message: String::from("No data in sheet"),
            found: None,
            saved: 0,
        }
    }
    pub fn nothing_completed() -> Self {
        Self {
            message: String::from("No completed orders found"),
            found: None,
            saved: 0,
        }
    }
    pub fn done(found: usize, saved: usize) -> Self {
        Self {
            message: String::from("Sync completed successfully"),
            found: Some(found),
            saved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_completed_order_builder_success() -> Result<()> {
        let order = NewCompletedOrder::builder()
            .order_number("1024")
            .manager("  Иванов ")
            .laser_time(1.5)
            .total_time(1.5)
            .build()?;
        assert_eq!(order.order_number, "1024");
        assert_eq!(order.manager.as_deref(), Some("Иванов"));
        assert_eq!(order.cleaning_time, 0.0);
        Ok(())
    }

    #[test]
    fn test_completed_order_builder_failed() -> Result<()> {
        let without_number = NewCompletedOrder::builder().laser_time(1.0).build();
        assert!(without_number.is_err());
        let blank_number = NewCompletedOrder::builder().order_number("   ").build();
        assert!(blank_number.is_err());
        let infinite_time = NewCompletedOrder::builder()
            .order_number("1")
            .welding_time(f64::INFINITY)
            .build();
        assert!(infinite_time.is_err());
        Ok(())
    }

    #[test]
    fn test_blank_manager_is_null() -> Result<()> {
        let order = NewCompletedOrder::builder()
            .order_number("7")
            .manager("")
            .build()?;
        assert_eq!(order.manager, None);
        let json = serde_json::to_value(&order)?;
        assert!(json["manager"].is_null());
        Ok(())
    }

    #[test]
    fn test_sync_report_shapes() -> Result<()> {
        let json = serde_json::to_value(SyncReport::no_data())?;
        assert_eq!(json, serde_json::json!({"message": "No data in sheet", "saved": 0}));
        let json = serde_json::to_value(SyncReport::done(3, 2))?;
        assert_eq!(
            json,
            serde_json::json!({"message": "Sync completed successfully", "found": 3, "saved": 2})
        );
        Ok(())
    }
}
