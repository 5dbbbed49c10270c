use serde::Serialize;
use std::collections::BTreeMap;

/// A sheet as returned by the values endpoint: the first row split off as
/// headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Column names from the sheet's first row.
    pub headers: Vec<String>,
    /// Every following row, positionally aligned to `headers`. The API drops
    /// trailing empty cells, so rows may be shorter than the header.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Split a `values` grid into header and data rows. `None` if there is no
    /// header row or no data row. A header row with no cells counts as none.
    pub fn from_values(mut values: Vec<Vec<String>>) -> Option<Self> {
        if values.len() < 2 || values[0].is_empty() {
            return None;
        }
        let rows = values.split_off(1);
        let headers = values.pop()?;
        Some(Self { headers, rows })
    }

    pub fn records(&self) -> Vec<Record> {
        normalize(&self.headers, &self.rows)
    }
}

/// One sheet row keyed by header name. Every header is a key; a value is
/// `None` when the row stopped short of that column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    values: BTreeMap<String, Option<String>>,
}

impl Record {
    /// Cell value for `key`; `None` for an unknown key or an absent cell.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_deref())
    }

    /// First of `keys` holding a non-empty value.
    pub fn first_non_empty(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|k| self.get(k))
            .find(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, Option<V>)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        }
    }
}

/// Zip each row with the header. Short rows leave trailing keys absent,
/// extra cells past the header are dropped. A repeated header name keeps
/// the rightmost cell.
pub fn normalize(headers: &[String], rows: &[Vec<String>]) -> Vec<Record> {
    rows.iter()
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.clone(), row.get(i).cloned()))
                .collect::<Record>()
        })
        .collect()
}
