use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Заказ в том виде, в котором он лежит в производственной таблице
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub manager: String,
    pub order_number: String,
    pub operation_type: String,
    pub shipment_date: String,
    /// в минутах, остальные этапы в часах
    pub cutting_time: f64,
    pub cutting_status: String,
    pub cleaning_time: f64,
    pub cleaning_status: String,
    pub bending_time: f64,
    pub bending_status: String,
    pub welding_time: f64,
    pub welding_status: String,
    pub painting_time: f64,
    pub painting_status: String,
    pub warehouse75_time: f64,
    pub warehouse75_status: String,
    pub warehouse_time: f64,
    pub warehouse_status: String,
    pub overall_status: String,
}

impl Order {
    pub fn is_completed(&self) -> bool {
        crate::utils::is_ready(&self.overall_status)
    }
}

/// Производственный участок
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Station {
    Cutting,
    Cleaning,
    Bending,
    Welding,
    Painting,
    Warehouse75,
    Warehouse,
}

impl Station {
    pub const ALL: [Station; 7] = [
        Station::Cutting,
        Station::Cleaning,
        Station::Bending,
        Station::Welding,
        Station::Painting,
        Station::Warehouse75,
        Station::Warehouse,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Station::Cutting => "Лазерная резка",
            Station::Cleaning => "Зачистка/травление",
            Station::Bending => "Гибка",
            Station::Welding => "Сварка",
            Station::Painting => "Покраска",
            Station::Warehouse75 => "Склад №75",
            Station::Warehouse => "Склад",
        }
    }

    /// Время резки в таблице записано в минутах
    pub fn in_minutes(&self) -> bool {
        matches!(self, Station::Cutting)
    }

    pub fn time(&self, order: &Order) -> f64 {
        match self {
            Station::Cutting => order.cutting_time,
            Station::Cleaning => order.cleaning_time,
            Station::Bending => order.bending_time,
            Station::Welding => order.welding_time,
            Station::Painting => order.painting_time,
            Station::Warehouse75 => order.warehouse75_time,
            Station::Warehouse => order.warehouse_time,
        }
    }

    pub fn status<'a>(&self, order: &'a Order) -> &'a str {
        match self {
            Station::Cutting => &order.cutting_status,
            Station::Cleaning => &order.cleaning_status,
            Station::Bending => &order.bending_status,
            Station::Welding => &order.welding_status,
            Station::Painting => &order.painting_status,
            Station::Warehouse75 => &order.warehouse75_status,
            Station::Warehouse => &order.warehouse_status,
        }
    }

    /// Участки, на которые заказ можно переместить. Резка всегда первая,
    /// на нее не перемещают.
    pub fn move_targets() -> impl Iterator<Item = Station> {
        Self::ALL.into_iter().filter(|s| *s != Station::Cutting)
    }

    pub fn from_move_target(label: &str) -> Option<Station> {
        let label = label.trim();
        Self::move_targets().find(|s| s.label() == label)
    }
}

impl Display for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
