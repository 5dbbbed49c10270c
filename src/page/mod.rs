// src/page/mod.rs

use serde::Serialize;
use std::sync::Arc;
use tokio::task::{self, JoinHandle};
use tracing::{error, info, instrument, warn};

use crate::config::SheetConfig;
use crate::fetch::SheetsClient;
use crate::process::raw_table::RawTable;
use crate::table::{assemble, Table};

pub const TITLE_MISSING: &str = "(無說明文字)";
pub const TITLE_FAILED: &str = "(讀取失敗)";
pub const SUBTITLE_FAILED: &str = "(副標題讀取失敗)";
pub const NO_DATA: &str = "沒有資料";
pub const DATA_FAILED: &str = "讀取資料失敗";

/// The data region of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableSection {
    Table(Table),
    /// Literal message shown in place of the table.
    Message { text: String },
}

impl TableSection {
    pub fn message(s: &str) -> Self {
        TableSection::Message {
            text: s.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub title: String,
    pub subtitle: String,
    pub body: TableSection,
    pub build: String,
}

/// Fetch title, subtitle and table concurrently and assemble the page.
/// Every failure is logged and replaced by its fallback text.
#[instrument(level = "info", skip_all, fields(sheet = %config.sheet_name))]
pub async fn load_page(client: SheetsClient, config: &SheetConfig) -> Page {
    let client = Arc::new(client);

    let title = spawn_cell(
        client.clone(),
        config.title_range.clone(),
        TITLE_MISSING,
        TITLE_FAILED,
    );
    let subtitle = spawn_cell(
        client.clone(),
        config.subtitle_range.clone(),
        SUBTITLE_FAILED,
        SUBTITLE_FAILED,
    );
    let body = spawn_table(client, config.sheet_name.clone());

    let (title, subtitle, body) = tokio::join!(title, subtitle, body);

    let page = Page {
        title: title.unwrap_or_else(|e| {
            error!(error = %e, "title task aborted");
            TITLE_FAILED.to_string()
        }),
        subtitle: subtitle.unwrap_or_else(|e| {
            error!(error = %e, "subtitle task aborted");
            SUBTITLE_FAILED.to_string()
        }),
        body: body.unwrap_or_else(|e| {
            error!(error = %e, "table task aborted");
            TableSection::message(DATA_FAILED)
        }),
        build: crate::version::BUILD.to_string(),
    };
    let rows = match &page.body {
        TableSection::Table(t) => t.rows.len(),
        TableSection::Message { .. } => 0,
    };
    info!(rows, "page assembled");
    page
}

/// Read one cell. `missing` covers an empty range, `failed` a fetch error.
fn spawn_cell(
    client: Arc<SheetsClient>,
    range: String,
    missing: &'static str,
    failed: &'static str,
) -> JoinHandle<String> {
    task::spawn(async move {
        match client.fetch_cell(&range).await {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) => {
                warn!(%range, "cell empty");
                missing.to_string()
            }
            Err(e) => {
                error!(%range, error = %e, "failed to read cell");
                failed.to_string()
            }
        }
    })
}

fn spawn_table(client: Arc<SheetsClient>, sheet_name: String) -> JoinHandle<TableSection> {
    task::spawn(async move {
        match client.fetch_values(&sheet_name).await {
            Ok(values) => table_section(values),
            Err(e) => {
                error!(sheet = %sheet_name, error = %e, "failed to read sheet data");
                TableSection::message(DATA_FAILED)
            }
        }
    })
}

/// Normalize a fetched grid into the table section, `沒有資料` when there is
/// no header or no data row.
pub fn table_section(values: Vec<Vec<String>>) -> TableSection {
    match RawTable::from_values(values) {
        Some(raw) => {
            info!(columns = raw.headers.len(), rows = raw.rows.len(), "sheet loaded");
            TableSection::Table(assemble(&raw.records()))
        }
        None => {
            warn!("sheet has no header or no rows");
            TableSection::message(NO_DATA)
        }
    }
}
