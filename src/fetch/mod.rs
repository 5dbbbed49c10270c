// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::config::SheetConfig;
use crate::error::SheetError;

/// Body of `GET /v4/spreadsheets/{id}/values/{range}`.
///
/// The API omits `values` entirely for an empty range and drops trailing
/// empty cells from each row.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

impl ValueRange {
    /// The grid as strings. Numbers and booleans are stringified, `null`
    /// becomes an empty cell.
    pub fn into_strings(self) -> Vec<Vec<String>> {
        self.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
    }

    /// `values[0][0]`, if present.
    pub fn first_cell(&self) -> Option<String> {
        self.values
            .first()
            .and_then(|row| row.first())
            .map(|v| cell_to_string(v.clone()))
    }
}

fn cell_to_string(v: Value) -> String {
    match v {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

/// Read-only client for one spreadsheet.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    client: Client,
    base: Url,
    sheet_id: String,
    api_key: String,
}

impl SheetsClient {
    pub fn new(client: Client, config: &SheetConfig) -> Result<Self> {
        let base = Url::parse(&config.api_base)
            .with_context(|| format!("parsing API base {}", config.api_base))?;
        if base.cannot_be_a_base() {
            return Err(SheetError::InvalidUrl {
                base: config.api_base.clone(),
                message: "not a hierarchical URL".to_string(),
            }
            .into());
        }
        Ok(Self {
            client,
            base,
            sheet_id: config.sheet_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// `{base}/spreadsheets/{id}/values/{range}?key={key}`, with the sheet id
    /// and range percent-encoded as path segments.
    pub fn values_url(&self, range: &str) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| SheetError::InvalidUrl {
                base: self.base.to_string(),
                message: "cannot append path segments".to_string(),
            })?
            .pop_if_empty()
            .extend(["spreadsheets", self.sheet_id.as_str(), "values", range]);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    /// Fetch a range and decode the body. Non-success statuses are errors.
    #[instrument(level = "debug", skip(self), fields(sheet = %self.sheet_id))]
    pub async fn fetch_range(&self, range: &str) -> Result<ValueRange> {
        let url = self.values_url(range)?;
        debug!(url = %redact_key(&url), "requesting range");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| SheetError::Http {
                range: range.to_string(),
                source: source.without_url(),
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|source| SheetError::Http {
            range: range.to_string(),
            source: source.without_url(),
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("").to_string());
            return Err(SheetError::Status {
                range: range.to_string(),
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let parsed: ValueRange =
            serde_json::from_str(&body).map_err(|source| SheetError::Decode {
                range: range.to_string(),
                source,
            })?;
        debug!(rows = parsed.values.len(), "decoded range");
        Ok(parsed)
    }

    /// All rows of a range as strings.
    pub async fn fetch_values(&self, range: &str) -> Result<Vec<Vec<String>>> {
        Ok(self.fetch_range(range).await?.into_strings())
    }

    /// The top-left cell of a range, `None` when the range is empty.
    pub async fn fetch_cell(&self, range: &str) -> Result<Option<String>> {
        Ok(self.fetch_range(range).await?.first_cell())
    }
}

/// The URL with the API key replaced, safe to log.
pub fn redact_key(url: &Url) -> Url {
    let mut out = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "REDACTED".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();
    out.query_pairs_mut().clear().extend_pairs(pairs);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> SheetsClient {
        let config = SheetConfig {
            api_key: "secret-key".to_string(),
            sheet_id: "abc123".to_string(),
            api_base: base.to_string(),
            ..SheetConfig::default()
        };
        SheetsClient::new(Client::new(), &config).expect("valid base")
    }

    #[test]
    fn values_url_encodes_range() {
        let c = client("https://sheets.googleapis.com/v4/");
        let url = c.values_url("工作表1").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/%E5%B7%A5%E4%BD%9C%E8%A1%A81?key=secret-key"
        );
    }

    #[test]
    fn values_url_without_trailing_slash() {
        let c = client("http://127.0.0.1:9999/v4");
        let url = c.values_url("B1").unwrap();
        assert_eq!(url.path(), "/v4/spreadsheets/abc123/values/B1");
    }

    #[test]
    fn rejects_non_hierarchical_base() {
        let config = SheetConfig {
            api_base: "mailto:someone@example.com".to_string(),
            ..SheetConfig::default()
        };
        let err = SheetsClient::new(Client::new(), &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SheetError>(),
            Some(SheetError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn redact_key_hides_credential() {
        let c = client("https://sheets.googleapis.com/v4/");
        let url = c.values_url("B1").unwrap();
        let shown = redact_key(&url).to_string();
        assert!(!shown.contains("secret-key"));
        assert!(shown.ends_with("key=REDACTED"));
    }

    #[test]
    fn decodes_mixed_cells() {
        let body = r#"{
            "range": "'工作表1'!A1:C3",
            "majorDimension": "ROWS",
            "values": [["名稱", "費用"], ["a", 1234, true], ["b", null]]
        }"#;
        let vr: ValueRange = serde_json::from_str(body).unwrap();
        assert_eq!(
            vr.into_strings(),
            vec![
                vec!["名稱".to_string(), "費用".to_string()],
                vec!["a".to_string(), "1234".to_string(), "true".to_string()],
                vec!["b".to_string(), String::new()],
            ]
        );
    }

    #[tokio::test]
    async fn transport_errors_do_not_carry_the_key() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = SheetConfig {
            api_key: "secret-key".to_string(),
            sheet_id: "abc".to_string(),
            api_base: format!("http://{}/v4/", addr),
            ..SheetConfig::default()
        };
        let http = Client::builder().no_proxy().build().unwrap();
        let c = SheetsClient::new(http, &config).unwrap();

        let err = c.fetch_cell("B1").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SheetError>(),
            Some(SheetError::Http { .. })
        ));
        for shown in [format!("{}", err), format!("{:#}", err), format!("{:?}", err)] {
            assert!(!shown.contains("secret-key"), "{shown}");
        }
    }

    #[test]
    fn missing_values_is_empty() {
        let vr: ValueRange = serde_json::from_str(r#"{"range": "N2"}"#).unwrap();
        assert!(vr.values.is_empty());
        assert_eq!(vr.first_cell(), None);
    }

    #[test]
    fn first_cell_reads_top_left() {
        let vr: ValueRange = serde_json::from_str(r#"{"values": [["標題", "x"]]}"#).unwrap();
        assert_eq!(vr.first_cell().as_deref(), Some("標題"));
    }
}
