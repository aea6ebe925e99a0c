use std::collections::BTreeMap;

use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CompletedOrder, LogisticsEntry, Order, ProblemEntry, Station};
use crate::utils::{contains_ignore_case, is_ready, round_to};
use crate::{AppError, Result};

/// Какие заказы показывать в общем списке
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

pub fn filter_orders(orders: Vec<Order>, status: StatusFilter, search: Option<&str>) -> Vec<Order> {
    let search = search.map(str::trim).filter(|s| !s.is_empty());
    orders
        .into_iter()
        .filter(|o| match status {
            StatusFilter::All => true,
            StatusFilter::Active => !o.is_completed(),
            StatusFilter::Completed => o.is_completed(),
        })
        .filter(|o| {
            search.is_none_or(|s| {
                contains_ignore_case(&o.order_number, s) || contains_ignore_case(&o.manager, s)
            })
        })
        .collect()
}

pub fn search_logistics(entries: Vec<LogisticsEntry>, search: Option<&str>) -> Vec<LogisticsEntry> {
    match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => entries
            .into_iter()
            .filter(|e| contains_ignore_case(&e.order_number, s))
            .collect(),
        None => entries,
    }
}

pub fn search_problems(entries: Vec<ProblemEntry>, search: Option<&str>) -> Vec<ProblemEntry> {
    match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => entries
            .into_iter()
            .filter(|e| {
                contains_ignore_case(&e.order_number, s) || contains_ignore_case(&e.description, s)
            })
            .collect(),
        None => entries,
    }
}

/// Поиск по архиву: дополнительно по тому, кто решил проблему
pub fn search_problem_archive(entries: Vec<ProblemEntry>, search: Option<&str>) -> Vec<ProblemEntry> {
    match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => entries
            .into_iter()
            .filter(|e| {
                contains_ignore_case(&e.order_number, s)
                    || contains_ignore_case(&e.description, s)
                    || e.resolved_by
                        .as_deref()
                        .is_some_and(|r| contains_ignore_case(r, s))
            })
            .collect(),
        None => entries,
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoadLevel {
    Low,
    Medium,
    High,
}

impl LoadLevel {
    fn from_days(days: f64) -> Self {
        if days < 3.0 {
            LoadLevel::Low
        } else if days <= 7.0 {
            LoadLevel::Medium
        } else {
            LoadLevel::High
        }
    }
}

/// Загрузка участка по незавершенным заказам
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct StationLoad {
    pub station: Station,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<i64>,
    pub hours: f64,
    pub days: f64,
    pub level: LoadLevel,
    pub display_text: String,
}

pub fn workload(orders: &[Order]) -> Vec<StationLoad> {
    let active = orders.iter().filter(|o| !o.is_completed()).collect::<Vec<_>>();
    Station::ALL
        .into_iter()
        .map(|station| {
            let hours: f64 = active
                .iter()
                .filter(|o| station.time(o) > 0.0 && !is_ready(station.status(o)))
                .map(|o| {
                    let time = station.time(o);
                    if station.in_minutes() {
                        time / 60.0
                    } else {
                        time
                    }
                })
                .fold(0.0, |acc, t| acc + t);
            let days = hours / 24.0;
            StationLoad {
                station,
                label: station.label(),
                minutes: station.in_minutes().then(|| (hours * 60.0).round() as i64),
                hours: round_to(hours, 2),
                days: round_to(days, 1),
                level: LoadLevel::from_days(days),
                display_text: display_load(hours, days, station.in_minutes()),
            }
        })
        .collect()
}

fn display_load(hours: f64, days: f64, in_minutes: bool) -> String {
    let text = if days < 1.0 {
        format!("{:.1} ч", round_to(hours, 1))
    } else {
        let full_days = days.floor() as i64;
        let remaining_hours = ((days - days.floor()) * 24.0).round() as i64;
        let whole_hours = hours.round() as i64;
        if remaining_hours > 0 {
            format!("{whole_hours} ч ({full_days} дн {remaining_hours} ч)")
        } else {
            format!("{whole_hours} ч ({full_days} дн)")
        }
    };
    if in_minutes {
        let minutes = (hours * 60.0).round() as i64;
        format!("{minutes} мин / {text}")
    } else {
        text
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct PeriodQuery {
    pub period: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Период отбора готовых заказов
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Period {
    All,
    Today,
    /// последние 7 суток
    Week,
    /// последние 30 суток
    Month,
    Date(NaiveDate),
}

impl Period {
    pub fn from_query(query: &PeriodQuery) -> Result<Self> {
        let period = query.period.as_deref().map(|p| p.trim().to_lowercase());
        match (period.as_deref(), query.date) {
            (None | Some(""), None) | (Some("all"), _) => Ok(Period::All),
            (None | Some("") | Some("date"), Some(date)) => Ok(Period::Date(date)),
            (Some("date"), None) => Err(AppError::Validation(
                "Для периода 'date' нужен параметр date (ГГГГ-ММ-ДД)".to_string(),
            )),
            (Some("today"), _) => Ok(Period::Today),
            (Some("week"), _) => Ok(Period::Week),
            (Some("month"), _) => Ok(Period::Month),
            (Some(other), _) => Err(AppError::Validation(format!(
                "Неизвестный период: '{other}'"
            ))),
        }
    }

    pub fn contains(&self, at: DateTime<Utc>, now: DateTime<Utc>, tz: FixedOffset) -> bool {
        let local_day = |t: DateTime<Utc>| t.with_timezone(&tz).date_naive();
        match self {
            Period::All => true,
            Period::Today => local_day(at) == local_day(now),
            Period::Week => now.checked_sub_days(Days::new(7)).is_none_or(|from| at >= from),
            Period::Month => now.checked_sub_days(Days::new(30)).is_none_or(|from| at >= from),
            Period::Date(date) => local_day(at) == *date,
        }
    }
}

pub fn filter_completed(
    orders: Vec<CompletedOrder>,
    period: Period,
    now: DateTime<Utc>,
    tz: FixedOffset,
) -> Vec<CompletedOrder> {
    orders
        .into_iter()
        .filter(|o| period.contains(o.completed_at, now, tz))
        .collect()
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DayCount {
    /// ДД.ММ
    pub date: String,
    pub count: usize,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct StageTime {
    pub stage: &'static str,
    pub hours: f64,
}

/// Сводка по готовым заказам за период
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CompletedReport {
    pub count: usize,
    pub total_hours: f64,
    pub average_hours: f64,
    pub orders_by_day: Vec<DayCount>,
    pub time_distribution: Vec<StageTime>,
}

pub fn completed_report(orders: &[CompletedOrder], tz: FixedOffset) -> CompletedReport {
    let count = orders.len();
    let total = orders.iter().fold(0.0, |acc, o| acc + o.total_time);
    let average = if count > 0 { total / count as f64 } else { 0.0 };

    let mut by_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for order in orders {
        *by_day
            .entry(order.completed_at.with_timezone(&tz).date_naive())
            .or_default() += 1;
    }
    let orders_by_day = by_day
        .into_iter()
        .map(|(date, count)| DayCount {
            date: date.format("%d.%m").to_string(),
            count,
        })
        .collect();

    let stages: [(&'static str, fn(&CompletedOrder) -> f64); 5] = [
        ("Резка", |o| o.laser_time),
        ("Зачистка", |o| o.cleaning_time),
        ("Гибка", |o| o.bending_time),
        ("Сварка", |o| o.welding_time),
        ("Покраска", |o| o.painting_time),
    ];
    let time_distribution = stages
        .into_iter()
        .map(|(stage, time)| StageTime {
            stage,
            hours: orders.iter().fold(0.0, |acc, o| acc + time(o)),
        })
        .filter(|s| s.hours > 0.0)
        .map(|s| StageTime {
            hours: round_to(s.hours, 2),
            ..s
        })
        .collect();

    CompletedReport {
        count,
        total_hours: round_to(total, 2),
        average_hours: round_to(average, 2),
        orders_by_day,
        time_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewCompletedOrder;
    use anyhow::Result;
    use chrono::TimeZone;

    fn order(number: &str, manager: &str, status: &str) -> Order {
        Order {
            order_number: number.to_string(),
            manager: manager.to_string(),
            overall_status: status.to_string(),
            ..Default::default()
        }
    }

    fn completed(number: &str, at: DateTime<Utc>, laser: f64, welding: f64) -> Result<CompletedOrder> {
        let new = NewCompletedOrder::builder()
            .order_number(number)
            .laser_time(laser)
            .welding_time(welding)
            .total_time(laser + welding)
            .completed_at(at)
            .build()?;
        Ok(CompletedOrder::from_new(new))
    }

    fn moscow() -> FixedOffset {
        FixedOffset::east_opt(3 * 3600).unwrap()
    }

    #[test]
    fn test_filter_orders_by_status_and_search() {
        let orders = vec![
            order("1024", "Иванов", "в работе"),
            order("1025", "Петров", " Готово "),
            order("2048", "Иванова", ""),
        ];
        let active = filter_orders(orders.clone(), StatusFilter::Active, None);
        assert_eq!(active.len(), 2);
        let done = filter_orders(orders.clone(), StatusFilter::Completed, None);
        assert_eq!(done[0].order_number, "1025");
        let found = filter_orders(orders.clone(), StatusFilter::All, Some("иванов"));
        assert_eq!(found.len(), 2);
        let found = filter_orders(orders.clone(), StatusFilter::Active, Some("102"));
        assert_eq!(found.len(), 1);
        assert_eq!(filter_orders(orders, StatusFilter::All, Some("  ")).len(), 3);
    }

    #[test]
    fn test_workload_sums_unfinished_stations_of_active_orders() {
        let mut first = order("1", "", "в работе");
        first.cutting_time = 90.0;
        first.welding_time = 30.0;
        first.welding_status = "готово".to_string();
        first.bending_time = 50.0;
        let mut second = order("2", "", "");
        second.cutting_time = 30.0;
        second.bending_time = 100.0;
        let mut finished = order("3", "", "Готово");
        finished.cutting_time = 600.0;

        let load = workload(&[first, second, finished]);
        assert_eq!(load.len(), 7);

        let cutting = &load[0];
        assert_eq!(cutting.station, Station::Cutting);
        assert_eq!(cutting.hours, 2.0);
        assert_eq!(cutting.minutes, Some(120));
        assert_eq!(cutting.display_text, "120 мин / 2.0 ч");
        assert_eq!(cutting.level, LoadLevel::Low);

        let bending = load.iter().find(|l| l.station == Station::Bending);
        assert!(bending.is_some_and(|b| b.hours == 150.0
            && b.days == 6.3
            && b.level == LoadLevel::Medium
            && b.display_text == "150 ч (6 дн 6 ч)"
            && b.minutes.is_none()));

        let welding = load.iter().find(|l| l.station == Station::Welding);
        assert!(welding.is_some_and(|w| w.hours == 0.0 && w.display_text == "0.0 ч"));
    }

    #[test]
    fn test_idle_stations_report_positive_zero() -> Result<()> {
        let load = workload(&[order("1", "", "")]);
        for station in &load {
            assert!(station.hours.is_sign_positive(), "{}", station.label);
            assert!(station.days.is_sign_positive(), "{}", station.label);
            assert_eq!(station.level, LoadLevel::Low);
        }
        assert_eq!(load[0].display_text, "0 мин / 0.0 ч");
        assert_eq!(load[3].display_text, "0.0 ч");
        let json = serde_json::to_value(&load[3])?;
        assert_eq!(json["hours"].to_string(), "0.0");

        let empty = completed_report(&[], moscow());
        assert!(empty.total_hours.is_sign_positive());
        let json = serde_json::to_value(&empty)?;
        assert_eq!(json["total_hours"].to_string(), "0.0");
        Ok(())
    }

    #[test]
    fn test_display_load() {
        assert_eq!(display_load(48.0, 2.0, false), "48 ч (2 дн)");
        assert_eq!(display_load(200.0, 200.0 / 24.0, false), "200 ч (8 дн 8 ч)");
        assert_eq!(display_load(0.25, 0.25 / 24.0, true), "15 мин / 0.3 ч");
        assert_eq!(LoadLevel::from_days(8.3), LoadLevel::High);
    }

    #[test]
    fn test_period_from_query() -> Result<()> {
        let query = |period: Option<&str>, date: Option<&str>| -> Result<PeriodQuery> {
            Ok(PeriodQuery {
                period: period.map(str::to_string),
                date: date.map(|d| d.parse()).transpose()?,
            })
        };
        assert_eq!(Period::from_query(&query(None, None)?)?, Period::All);
        assert_eq!(Period::from_query(&query(Some("Week"), None)?)?, Period::Week);
        assert_eq!(
            Period::from_query(&query(None, Some("2025-03-08"))?)?,
            Period::Date(NaiveDate::from_ymd_opt(2025, 3, 8).unwrap())
        );
        assert!(Period::from_query(&query(Some("date"), None)?).is_err());
        assert!(Period::from_query(&query(Some("year"), None)?).is_err());
        Ok(())
    }

    #[test]
    fn test_filter_completed_by_period() -> Result<()> {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let orders = vec![
            // 10 марта 01:00 по Москве
            completed("today", Utc.with_ymd_and_hms(2025, 3, 9, 22, 0, 0).unwrap(), 1.0, 0.0)?,
            completed("week", Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap(), 1.0, 0.0)?,
            completed("month", Utc.with_ymd_and_hms(2025, 2, 15, 12, 0, 0).unwrap(), 1.0, 0.0)?,
            completed("old", Utc.with_ymd_and_hms(2024, 12, 1, 12, 0, 0).unwrap(), 1.0, 0.0)?,
        ];
        let numbers = |period: Period| {
            filter_completed(orders.clone(), period, now, moscow())
                .into_iter()
                .map(|o| o.order_number)
                .collect::<Vec<_>>()
        };
        assert_eq!(numbers(Period::Today), vec!["today"]);
        assert_eq!(numbers(Period::Week), vec!["today", "week"]);
        assert_eq!(numbers(Period::Month), vec!["today", "week", "month"]);
        assert_eq!(numbers(Period::All).len(), 4);
        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(numbers(Period::Date(date)), vec!["week"]);
        Ok(())
    }

    #[test]
    fn test_completed_report() -> Result<()> {
        let day = |d: u32, h: u32| Utc.with_ymd_and_hms(2025, 3, d, h, 0, 0).unwrap();
        let orders = vec![
            completed("1", day(2, 10), 1.5, 2.0)?,
            completed("2", day(1, 10), 0.5, 0.0)?,
            completed("3", day(2, 23), 1.0, 1.0)?,
        ];
        let report = completed_report(&orders, moscow());
        assert_eq!(report.count, 3);
        assert_eq!(report.total_hours, 6.0);
        assert_eq!(report.average_hours, 2.0);
        assert_eq!(
            report.orders_by_day,
            vec![
                DayCount { date: "01.03".to_string(), count: 1 },
                DayCount { date: "02.03".to_string(), count: 1 },
                DayCount { date: "03.03".to_string(), count: 1 },
            ]
        );
        assert_eq!(
            report.time_distribution,
            vec![
                StageTime { stage: "Резка", hours: 3.0 },
                StageTime { stage: "Сварка", hours: 3.0 },
            ]
        );
        let empty = completed_report(&[], moscow());
        assert_eq!(empty.count, 0);
        assert_eq!(empty.average_hours, 0.0);
        assert!(empty.time_distribution.is_empty());
        Ok(())
    }

    #[test]
    fn test_search_problems_and_logistics() {
        let problem = ProblemEntry {
            id: uuid::Uuid::new_v4(),
            order_number: "1024".to_string(),
            manager: None,
            description: "Брак сварки".to_string(),
            reported_by: "Анна".to_string(),
            created_at: Utc::now(),
            resolved: None,
            resolved_at: None,
            resolved_by: None,
        };
        assert_eq!(search_problems(vec![problem.clone()], Some("брак")).len(), 1);
        assert_eq!(search_problems(vec![problem.clone()], Some("анна")).len(), 0);
        assert_eq!(search_problems(vec![problem.clone()], None).len(), 1);

        let resolved = ProblemEntry {
            resolved: Some(true),
            resolved_at: Some(Utc::now()),
            resolved_by: Some("Олег Смирнов".to_string()),
            ..problem
        };
        assert_eq!(search_problem_archive(vec![resolved.clone()], Some("смирнов")).len(), 1);
        assert_eq!(search_problem_archive(vec![resolved.clone()], Some("брак")).len(), 1);
        assert_eq!(search_problem_archive(vec![resolved.clone()], Some("анна")).len(), 0);
        assert_eq!(search_problems(vec![resolved], Some("смирнов")).len(), 0);

        let entry = LogisticsEntry {
            id: uuid::Uuid::new_v4(),
            order_number: "A-77".to_string(),
            manager: None,
            moved_to: "Склад".to_string(),
            moved_by: "Олег".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(search_logistics(vec![entry.clone()], Some("a-7")).len(), 1);
        assert_eq!(search_logistics(vec![entry], Some("склад")).len(), 0);
    }
}
