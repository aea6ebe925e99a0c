use chrono::{DateTime, Utc};
use tracing::{error, warn};

use crate::models::{NewCompletedOrder, Order};
use crate::utils::{normalize_status, parse_number, READY};

/// Строки-заголовки и служебные строки, которые не являются заказами
pub const SYSTEM_ROWS: [&str; 4] = [
    "Номер заявки",
    "Администрация",
    "Собственные нужды",
    "Простой",
];
/// Последняя колонка, которую читает разбор по позициям, это R (17)
pub const MIN_COLUMNS: usize = 18;

const OVERALL_STATUS: [&str; 2] = ["Общая готовность", "Overall Status"];
const ORDER_NUMBER: [&str; 2] = ["Номер заявки", "Order Number"];
const MANAGER: [&str; 2] = ["Менеджер", "Manager"];
const CUTTING: [&str; 2] = ["Резка", "Cutting"];
const CLEANING: [&str; 2] = ["Зачистка/травление", "Cleaning"];
const BENDING: [&str; 2] = ["Гибка", "Bending"];
const WELDING: [&str; 2] = ["Сварка", "Welding"];
const PAINTING: [&str; 2] = ["Покраска", "Painting"];
const WAREHOUSE_75: [&str; 2] = ["Склад №75", "Warehouse 75"];
const WAREHOUSE: [&str; 2] = ["Склад", "Warehouse"];

/// Результат разбора листа по позициям колонок
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSheet {
    /// все заказы, включая готовые
    pub orders: Vec<Order>,
    /// записи для архива готовых заказов
    pub completed: Vec<NewCompletedOrder>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompletedScan {
    /// в листе нет ничего, кроме заголовка
    Empty,
    Found(Vec<NewCompletedOrder>),
}

/// Разбивает CSV на строки и колонки. Значения в кавычках могут содержать
/// запятые, пробелы по краям колонок отбрасываются, пустые строки
/// пропускаются.
pub fn read_rows(csv_text: &str) -> Vec<Vec<String>> {
    let text = csv_text.trim_start_matches('\u{FEFF}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warn!("Пропускаю битую строку CSV: {e}");
                continue;
            }
        };
        if record.len() <= 1 && record.iter().all(|f| f.is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    rows
}

/// Разбор листа по фиксированным позициям колонок. Первая строка
/// считается заголовком.
pub fn parse_orders(csv_text: &str) -> ParsedSheet {
    let rows = read_rows(csv_text);
    let mut result = ParsedSheet::default();
    for row in rows.iter().skip(1) {
        if row.len() < MIN_COLUMNS {
            continue;
        }
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or_default();
        let order_number = cell(3);
        if order_number.is_empty() || SYSTEM_ROWS.contains(&order_number) {
            continue;
        }
        let overall_status = cell(17);
        let manager = cell(2);
        let cutting_minutes = parse_number(cell(6));
        let cleaning_time = parse_number(cell(8));
        let bending_time = parse_number(cell(10));
        let welding_time = parse_number(cell(12));
        let painting_time = parse_number(cell(14));
        let order = Order {
            manager: manager.to_string(),
            order_number: order_number.to_string(),
            operation_type: cell(4).to_string(),
            shipment_date: cell(5).to_string(),
            cutting_time: cutting_minutes,
            cutting_status: cell(7).to_string(),
            cleaning_time,
            cleaning_status: cell(9).to_string(),
            bending_time,
            bending_status: cell(11).to_string(),
            welding_time,
            welding_status: cell(13).to_string(),
            painting_time,
            painting_status: cell(15).to_string(),
            warehouse75_time: parse_number(cell(16)),
            warehouse75_status: String::new(),
            warehouse_time: 0.0,
            warehouse_status: String::new(),
            overall_status: overall_status.to_string(),
        };
        if overall_status.to_lowercase().contains(READY) {
            let laser_time = cutting_minutes / 60.0;
            let total_time = laser_time + cleaning_time + bending_time + welding_time + painting_time;
            let record = NewCompletedOrder::builder()
                .order_number(order_number)
                .manager(manager)
                .laser_time(laser_time)
                .cleaning_time(cleaning_time)
                .bending_time(bending_time)
                .welding_time(welding_time)
                .painting_time(painting_time)
                .warehouse75_time(order.warehouse75_time)
                .warehouse_time(order.warehouse_time)
                .total_time(total_time)
                .build();
            match record {
                Ok(r) => result.completed.push(r),
                Err(e) => error!("Заказ {order_number} не попал в архив: {e}"),
            }
        }
        result.orders.push(order);
    }
    result
}

/// Разбор листа по названиям колонок: ищет готовые заказы.
pub fn parse_completed(csv_text: &str, completed_at: DateTime<Utc>) -> CompletedScan {
    let rows = read_rows(csv_text);
    let Some((headers, rows)) = rows.split_first() else {
        return CompletedScan::Empty;
    };
    if rows.is_empty() {
        return CompletedScan::Empty;
    }
    let columns = Columns { headers };
    let mut completed = Vec::new();
    for row in rows {
        let status = normalize_status(columns.value(row, &OVERALL_STATUS));
        if status != READY && status != "ready" {
            continue;
        }
        let order_number = columns.value(row, &ORDER_NUMBER);
        if order_number.is_empty() {
            continue;
        }
        let time = |names: &[&str]| parse_number(columns.value(row, names));
        let laser_time = time(&CUTTING) / 60.0;
        let cleaning_time = time(&CLEANING);
        let bending_time = time(&BENDING);
        let welding_time = time(&WELDING);
        let painting_time = time(&PAINTING);
        let warehouse75_time = time(&WAREHOUSE_75);
        let warehouse_time = time(&WAREHOUSE);
        let total_time = laser_time
            + cleaning_time
            + bending_time
            + welding_time
            + painting_time
            + warehouse75_time
            + warehouse_time;
        let record = NewCompletedOrder::builder()
            .order_number(order_number)
            .manager(columns.value(row, &MANAGER))
            .laser_time(laser_time)
            .cleaning_time(cleaning_time)
            .bending_time(bending_time)
            .welding_time(welding_time)
            .painting_time(painting_time)
            .warehouse75_time(warehouse75_time)
            .warehouse_time(warehouse_time)
            .total_time(total_time)
            .completed_at(completed_at)
            .build();
        match record {
            Ok(r) => completed.push(r),
            Err(e) => error!("Заказ {order_number} пропущен: {e}"),
        }
    }
    CompletedScan::Found(completed)
}

struct Columns<'a> {
    headers: &'a [String],
}

impl Columns<'_> {
    /// Значение по первому названию из списка, у которого ячейка не пустая.
    /// Если колонок с одним названием несколько, берется последняя.
    fn value<'r>(&self, row: &'r [String], names: &[&str]) -> &'r str {
        names
            .iter()
            .filter_map(|name| self.headers.iter().rposition(|h| h == name))
            .filter_map(|i| row.get(i))
            .map(String::as_str)
            .find(|v| !v.is_empty())
            .unwrap_or_default()
    }
}
