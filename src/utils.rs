/// Статус, которым в таблице отмечают готовые заказы и этапы
pub const READY: &str = "готово";

pub async fn pause_minutes(minutes: u64) {
    tokio::time::sleep(pause_duration(minutes)).await;
}

fn pause_duration(minutes: u64) -> tokio::time::Duration {
    tokio::time::Duration::from_secs(minutes.saturating_mul(60))
}

/// Читает число из ячейки таблицы.
///
/// Берется самый длинный числовой префикс, пробелы внутри числа
/// игнорируются, десятичная запятая допускается. Все, что не удалось
/// разобрать, считается нулем.
pub fn parse_number(input: impl AsRef<str>) -> f64 {
    let cleaned = input
        .as_ref()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("")
        .replace(',', ".");
    cleaned
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|end| cleaned[..end].parse::<f64>().ok().filter(|v| v.is_finite()))
        .unwrap_or_default()
}

pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

/// Нормализованный статус: без пробелов по краям и в нижнем регистре
pub fn normalize_status(status: &str) -> String {
    status.trim().to_lowercase()
}

pub fn is_ready(status: &str) -> bool {
    normalize_status(status) == READY
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
