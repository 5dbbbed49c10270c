//! sheetboard: render an ad-performance Google Sheet as a page.
//!
//! Rows are fetched from the Sheets values endpoint, normalized into
//! header-keyed records, formatted column by column and handed to a
//! renderer (HTML, plain text or JSON).

pub mod config;
pub mod error;
pub mod fetch;
pub mod media;
pub mod page;
pub mod process;
pub mod render;
pub mod summary;
pub mod table;
pub mod version;

pub use config::SheetConfig;
pub use error::SheetError;
pub use fetch::SheetsClient;
pub use page::{load_page, Page, TableSection};
pub use table::{assemble, Cell, DisplayColumn, Table};
