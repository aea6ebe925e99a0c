use chrono::{FixedOffset, Offset, Utc};

use crate::sheet_service::{SheetSource, DEFAULT_SHEET_GID, DEFAULT_SPREADSHEET_ID};

/// Часовой пояс цеха по умолчанию (Москва)
const DEFAULT_UTC_OFFSET_HOURS: i32 = 3;
const DEFAULT_SYNC_INTERVAL_MINUTES: u64 = 60;

/// Настройки сервиса, читаются из Secrets.toml
#[derive(Debug, Clone)]
pub struct Config {
    pub sheet: SheetSource,
    /// 0 отключает фоновую синхронизацию
    pub sync_interval_minutes: u64,
    pub utc_offset_hours: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet: SheetSource::new(DEFAULT_SPREADSHEET_ID, DEFAULT_SHEET_GID),
            sync_interval_minutes: DEFAULT_SYNC_INTERVAL_MINUTES,
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }
}

impl Config {
    pub fn from_secrets(secrets: &shuttle_runtime::SecretStore) -> Self {
        Self::from_lookup(|key| secrets.get(key))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let spreadsheet_id = value("SPREADSHEET_ID").unwrap_or(defaults.sheet.spreadsheet_id);
        let sheet_gid = value("SHEET_GID").unwrap_or(defaults.sheet.sheet_gid);
        let sync_interval_minutes = match value("SYNC_INTERVAL_MINUTES").map(|v| v.parse::<u64>()) {
            Some(Ok(minutes)) => minutes,
            Some(Err(e)) => {
                tracing::error!("SYNC_INTERVAL_MINUTES не число ({e}), беру значение по умолчанию");
                defaults.sync_interval_minutes
            }
            None => defaults.sync_interval_minutes,
        };
        let utc_offset_hours = value("UTC_OFFSET_HOURS")
            .and_then(|v| v.parse::<i32>().ok())
            .filter(|h| (-23..=23).contains(h))
            .unwrap_or(defaults.utc_offset_hours);
        Self {
            sheet: SheetSource::new(spreadsheet_id, sheet_gid),
            sync_interval_minutes,
            utc_offset_hours,
        }
    }

    pub fn timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours * 3600).unwrap_or(Utc.fix())
    }
}
