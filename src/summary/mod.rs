// src/summary/mod.rs
//! Monthly ad KPIs per network, recomputed from summed raw counters.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::ops::AddAssign;
use tracing::{debug, info};

use crate::process::date_parser::month_start;
use crate::process::number::{group_thousands, parse_number, percent_string};
use crate::process::raw_table::Record;
use crate::table::{Cell, Table};

pub const MONTH_KEYS: &[&str] = &["月", "年月"];
pub const NETWORK_KEY: &str = "聯播網 (及搜尋夥伴)";
pub const IMPRESSIONS_KEY: &str = "曝光";
pub const CLICKS_KEY: &str = "點擊";
pub const INSTALLS_KEY: &str = "安裝";
pub const COST_KEY: &str = "費用";
pub const TOTAL_LABEL: &str = "總計";
pub const MONTH_LABEL: &str = "月份";

/// Raw counters summed over a group of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Counters {
    pub impressions: f64,
    pub clicks: f64,
    pub installs: f64,
    pub cost: f64,
}

impl Counters {
    pub fn from_record(record: &Record) -> Self {
        let read = |key: &str| parse_number(record.get(key).unwrap_or(""));
        Self {
            impressions: read(IMPRESSIONS_KEY),
            clicks: read(CLICKS_KEY),
            installs: read(INSTALLS_KEY),
            cost: read(COST_KEY),
        }
    }

    /// Cost per install.
    pub fn cpi(&self) -> f64 {
        if self.installs > 0.0 {
            self.cost / self.installs
        } else {
            0.0
        }
    }

    /// Installs per impression, in percent.
    pub fn install_rate(&self) -> f64 {
        self.per_impression(self.installs) * 100.0
    }

    /// Cost per thousand impressions.
    pub fn cpm(&self) -> f64 {
        self.per_impression(self.cost) * 1000.0
    }

    /// Clicks per impression, in percent.
    pub fn ctr(&self) -> f64 {
        self.per_impression(self.clicks) * 100.0
    }

    fn per_impression(&self, n: f64) -> f64 {
        if self.impressions > 0.0 {
            n / self.impressions
        } else {
            0.0
        }
    }
}

impl AddAssign for Counters {
    fn add_assign(&mut self, rhs: Self) {
        self.impressions += rhs.impressions;
        self.clicks += rhs.clicks;
        self.installs += rhs.installs;
        self.cost += rhs.cost;
    }
}

impl std::iter::Sum for Counters {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let mut total = Counters::default();
        for c in iter {
            total += c;
        }
        total
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Impressions,
    Cost,
    Cpi,
    InstallRate,
    Cpm,
    Ctr,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Impressions,
        Metric::Cost,
        Metric::Cpi,
        Metric::InstallRate,
        Metric::Cpm,
        Metric::Ctr,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Impressions => "曝光",
            Metric::Cost => "費用",
            Metric::Cpi => "CPI",
            Metric::InstallRate => "IR",
            Metric::Cpm => "CPM",
            Metric::Ctr => "CTR",
        }
    }

    pub fn value(self, c: &Counters) -> f64 {
        match self {
            Metric::Impressions => c.impressions,
            Metric::Cost => c.cost,
            Metric::Cpi => c.cpi(),
            Metric::InstallRate => c.install_rate(),
            Metric::Cpm => c.cpm(),
            Metric::Ctr => c.ctr(),
        }
    }

    /// Counts truncate with thousands grouping, ratios take three decimals.
    /// Zero renders as an empty cell.
    pub fn format(self, v: f64) -> String {
        if v == 0.0 {
            return String::new();
        }
        match self {
            Metric::InstallRate | Metric::Ctr => percent_string(v),
            _ => group_thousands(v.trunc() as i64),
        }
    }
}

/// Counters grouped by (month, network).
#[derive(Debug, Clone, Default)]
pub struct Summary {
    months: Vec<NaiveDate>,
    networks: Vec<String>,
    cells: HashMap<(NaiveDate, String), Counters>,
}

impl Summary {
    /// Rows without a recognizable month or with no network are skipped.
    pub fn from_records(records: &[Record]) -> Self {
        let mut summary = Summary::default();
        let mut skipped = 0usize;

        for record in records {
            let month = record.first_non_empty(MONTH_KEYS).and_then(month_start);
            let network = record
                .get(NETWORK_KEY)
                .map(str::trim)
                .filter(|n| !n.is_empty());
            let (Some(month), Some(network)) = (month, network) else {
                skipped += 1;
                continue;
            };

            if !summary.months.contains(&month) {
                summary.months.push(month);
            }
            if !summary.networks.iter().any(|n| n == network) {
                summary.networks.push(network.to_string());
            }
            *summary
                .cells
                .entry((month, network.to_string()))
                .or_default() += Counters::from_record(record);
        }

        summary.months.sort();
        if skipped > 0 {
            debug!(skipped, "rows without month or network");
        }
        info!(
            months = summary.months.len(),
            networks = summary.networks.len(),
            "summary built"
        );
        summary
    }

    pub fn months(&self) -> &[NaiveDate] {
        &self.months
    }

    /// Networks in first-seen order.
    pub fn networks(&self) -> &[String] {
        &self.networks
    }

    pub fn cell(&self, month: NaiveDate, network: &str) -> Counters {
        self.cells
            .get(&(month, network.to_string()))
            .copied()
            .unwrap_or_default()
    }

    pub fn month_total(&self, month: NaiveDate) -> Counters {
        self.networks.iter().map(|n| self.cell(month, n)).sum()
    }

    pub fn network_total(&self, network: &str) -> Counters {
        self.months.iter().map(|m| self.cell(*m, network)).sum()
    }

    pub fn grand_total(&self) -> Counters {
        self.cells.values().copied().sum()
    }

    /// One metric laid out as months × networks, with totals.
    pub fn table(&self, metric: Metric) -> Table {
        let mut headers = vec![MONTH_LABEL.to_string()];
        headers.extend(self.networks.iter().cloned());
        headers.push(TOTAL_LABEL.to_string());

        let row = |label: String, per_network: Vec<Counters>, total: Counters| {
            let mut cells = vec![Cell::text(label)];
            cells.extend(
                per_network
                    .iter()
                    .map(|c| Cell::text(metric.format(metric.value(c)))),
            );
            cells.push(Cell::text(metric.format(metric.value(&total))));
            cells
        };

        let mut rows: Vec<Vec<Cell>> = self
            .months
            .iter()
            .map(|&m| {
                row(
                    m.format("%Y年%m月").to_string(),
                    self.networks.iter().map(|n| self.cell(m, n)).collect(),
                    self.month_total(m),
                )
            })
            .collect();
        rows.push(row(
            TOTAL_LABEL.to_string(),
            self.networks.iter().map(|n| self.network_total(n)).collect(),
            self.grand_total(),
        ));

        Table { headers, rows }
    }

    pub fn report(&self, title: &str) -> Report {
        Report {
            title: title.to_string(),
            sections: Metric::ALL
                .iter()
                .map(|&m| ReportSection {
                    name: m.label().to_string(),
                    table: self.table(m),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub name: String,
    pub table: Table,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub title: String,
    pub sections: Vec<ReportSection>,
}
