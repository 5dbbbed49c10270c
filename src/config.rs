// src/config.rs

use clap::Args;

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4/";
pub const DEFAULT_SHEET_NAME: &str = "工作表1";
pub const DEFAULT_TITLE_RANGE: &str = "B1";
pub const DEFAULT_SUBTITLE_RANGE: &str = "N2";

/// Where the spreadsheet lives and which ranges feed the page.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SheetConfig {
    /// Google API key with read access to the sheet
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Spreadsheet id, the long token in the sheet's URL
    #[arg(long, env = "SHEET_ID")]
    pub sheet_id: String,

    /// Tab holding the data table
    #[arg(long, env = "SHEET_NAME", default_value = DEFAULT_SHEET_NAME)]
    pub sheet_name: String,

    /// Cell holding the page title
    #[arg(long, default_value = DEFAULT_TITLE_RANGE)]
    pub title_range: String,

    /// Cell holding the page subtitle
    #[arg(long, default_value = DEFAULT_SUBTITLE_RANGE)]
    pub subtitle_range: String,

    /// Sheets API root
    #[arg(long, env = "SHEETS_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            sheet_id: String::new(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            title_range: DEFAULT_TITLE_RANGE.to_string(),
            subtitle_range: DEFAULT_SUBTITLE_RANGE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}
