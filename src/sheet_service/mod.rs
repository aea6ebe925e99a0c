pub mod parser;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppError, Result};

pub const DEFAULT_SPREADSHEET_ID: &str = "1fOF3IU94lgNTdgaTiKPj-gcoz_cBq9pVZoaj1tGcF9U";
pub const DEFAULT_SHEET_GID: &str = "1485484311";

/// Лист Google таблицы, из которого берутся заказы
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSource {
    pub spreadsheet_id: String,
    pub sheet_gid: String,
}

/// Необязательное переопределение листа в теле или строке запроса
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRequest {
    pub spreadsheet_id: Option<String>,
    pub sheet_gid: Option<String>,
}

impl SheetSource {
    pub fn new(spreadsheet_id: impl Into<String>, sheet_gid: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            sheet_gid: sheet_gid.into(),
        }
    }

    pub fn csv_url(&self) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/export?format=csv&gid={}",
            self.spreadsheet_id, self.sheet_gid
        )
    }

    /// Пустые значения в запросе не переопределяют настройки
    pub fn with_overrides(&self, request: &SheetRequest) -> Self {
        let pick = |value: &Option<String>, fallback: &str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };
        Self {
            spreadsheet_id: pick(&request.spreadsheet_id, &self.spreadsheet_id),
            sheet_gid: pick(&request.sheet_gid, &self.sheet_gid),
        }
    }

    /// Собирает источник из ссылки на таблицу и GID листа
    pub fn from_link(url: &str, gid: &str) -> Result<Self> {
        let url = url.trim();
        let gid = gid.trim();
        if url.is_empty() {
            return Err(AppError::Validation("Пожалуйста, введите URL таблицы".to_string()));
        }
        if !url.contains("docs.google.com/spreadsheets") {
            return Err(AppError::Validation("Неверный формат URL Google Sheets".to_string()));
        }
        if gid.is_empty() {
            return Err(AppError::Validation("Пожалуйста, введите GID листа".to_string()));
        }
        if !gid.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::Validation("GID должен быть числом".to_string()));
        }
        let re = Regex::new(r"/d/([a-zA-Z0-9\-_]+)")?;
        let spreadsheet_id = re
            .captures(url)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                AppError::Validation("Не удалось найти идентификатор таблицы в URL".to_string())
            })?;
        Ok(Self::new(spreadsheet_id, gid))
    }
}

/// Источник CSV выгрузки листа
#[async_trait::async_trait]
pub trait SheetFetcher: Send + Sync {
    async fn fetch_csv(&self, source: &SheetSource) -> Result<String>;
}

pub struct HttpSheetFetcher {
    client: reqwest::Client,
}

impl HttpSheetFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().gzip(true).build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl SheetFetcher for HttpSheetFetcher {
    async fn fetch_csv(&self, source: &SheetSource) -> Result<String> {
        let url = source.csv_url();
        info!("Запрашиваю таблицу {url}");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::SheetError(format!(
                "Failed to fetch Google Sheet: {status}"
            )));
        }
        let body = response.text().await?;
        info!("Получено {len} байт CSV", len = body.len());
        Ok(body)
    }
}
