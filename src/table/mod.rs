// src/table/mod.rs
//! Fixed-order display table built from normalized sheet records.

use serde::Serialize;

use crate::media::{self, MediaKind, UNSUPPORTED_PLACEHOLDER};
use crate::process::date_parser::format_month;
use crate::process::number::{format_integer, format_percentage, round_number};
use crate::process::raw_table::Record;

/// A rendered cell, independent of the output backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    Text { text: String },
    Image { src: String },
    Video { id: String, embed_url: String },
    Placeholder { text: String },
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text { text: s.into() }
    }

    /// Plain-text reading of the cell, used by text backends.
    pub fn display(&self) -> &str {
        match self {
            Cell::Text { text } | Cell::Placeholder { text } => text,
            Cell::Image { src } => src,
            Cell::Video { embed_url, .. } => embed_url,
        }
    }
}

impl From<MediaKind> for Cell {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Image { src } => Cell::Image { src },
            MediaKind::Video { id, embed_url } => Cell::Video { id, embed_url },
            MediaKind::Unsupported => Cell::Placeholder {
                text: UNSUPPORTED_PLACEHOLDER.to_string(),
            },
        }
    }
}

/// Value formatters a column can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    Month,
    Media,
    Integer,
    Rounded,
    Percentage,
}

impl Formatter {
    /// Absent values are formatted as empty input.
    pub fn apply(self, raw: Option<&str>) -> Cell {
        let raw = raw.unwrap_or("");
        match self {
            Formatter::Month => Cell::text(format_month(raw)),
            Formatter::Media => media::classify(raw).into(),
            Formatter::Integer => Cell::text(format_integer(raw)),
            Formatter::Rounded => Cell::text(round_number(raw)),
            Formatter::Percentage => Cell::text(format_percentage(raw)),
        }
    }
}

/// How a column finds and shapes its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Record key equals the column label.
    Direct,
    /// Record key differs from the label.
    Aliased(&'static str),
    /// First non-empty of `sources`, run through `format`.
    Formatted {
        sources: &'static [&'static str],
        format: Formatter,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayColumn {
    Month,
    Creative,
    Network,
    Hook,
    Style,
    Seconds,
    Cost,
    Cpi,
    InstallRate,
    Cpm,
}

impl DisplayColumn {
    pub const ALL: [DisplayColumn; 10] = [
        DisplayColumn::Month,
        DisplayColumn::Creative,
        DisplayColumn::Network,
        DisplayColumn::Hook,
        DisplayColumn::Style,
        DisplayColumn::Seconds,
        DisplayColumn::Cost,
        DisplayColumn::Cpi,
        DisplayColumn::InstallRate,
        DisplayColumn::Cpm,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DisplayColumn::Month => "年月",
            DisplayColumn::Creative => "素材",
            DisplayColumn::Network => "聯播網",
            DisplayColumn::Hook => "鉤子",
            DisplayColumn::Style => "風格",
            DisplayColumn::Seconds => "秒數",
            DisplayColumn::Cost => "費用",
            DisplayColumn::Cpi => "CPI",
            DisplayColumn::InstallRate => "IR%",
            DisplayColumn::Cpm => "CPM",
        }
    }

    pub fn binding(self) -> Binding {
        use Binding::*;
        match self {
            DisplayColumn::Month => Formatted {
                sources: &["月", "年月"],
                format: Formatter::Month,
            },
            DisplayColumn::Creative => Formatted {
                sources: &["斷字網址"],
                format: Formatter::Media,
            },
            DisplayColumn::Network => Aliased("聯播網 (及搜尋夥伴)"),
            DisplayColumn::Hook | DisplayColumn::Style | DisplayColumn::Seconds => Direct,
            DisplayColumn::Cost => Formatted {
                sources: &["費用"],
                format: Formatter::Integer,
            },
            DisplayColumn::Cpi => Formatted {
                sources: &["CPI"],
                format: Formatter::Rounded,
            },
            DisplayColumn::InstallRate => Formatted {
                sources: &["IR%"],
                format: Formatter::Percentage,
            },
            DisplayColumn::Cpm => Formatted {
                sources: &["CPM"],
                format: Formatter::Rounded,
            },
        }
    }

    /// The cell this column shows for `record`.
    pub fn cell(self, record: &Record) -> Cell {
        match self.binding() {
            Binding::Direct => Cell::text(record.get(self.label()).unwrap_or("")),
            Binding::Aliased(key) => Cell::text(record.get(key).unwrap_or("")),
            Binding::Formatted { sources, format } => {
                format.apply(record.first_non_empty(sources))
            }
        }
    }
}

/// Backend-neutral table: labels plus rows of cells, one per label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Lay out `records` under the fixed display columns.
pub fn assemble(records: &[Record]) -> Table {
    let headers = DisplayColumn::ALL
        .iter()
        .map(|c| c.label().to_string())
        .collect();
    let rows = records
        .iter()
        .map(|rec| DisplayColumn::ALL.iter().map(|c| c.cell(rec)).collect())
        .collect();
    Table { headers, rows }
}
