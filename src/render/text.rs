use prettytable::{format, Cell as PtCell, Row, Table as PtTable};

use crate::page::{Page, TableSection};
use crate::summary::Report;
use crate::table::{Cell, Table};

fn is_numeric_column(label: &str) -> bool {
    matches!(
        label,
        "費用" | "CPI" | "IR%" | "CPM" | "曝光" | "IR" | "CTR" | "秒數"
    )
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Text { text } | Cell::Placeholder { text } => text.clone(),
        Cell::Image { src } => format!("[圖片] {}", src),
        Cell::Video { embed_url, .. } => format!("[影片] {}", embed_url),
    }
}

/// Box-drawn table; numeric columns are right aligned.
pub fn table(table: &Table) -> String {
    let mut out = PtTable::new();
    out.set_format(*format::consts::FORMAT_BOX_CHARS);
    out.set_titles(Row::new(
        table
            .headers
            .iter()
            .map(|h| PtCell::new(h).style_spec("b"))
            .collect(),
    ));
    for row in &table.rows {
        out.add_row(Row::new(
            row.iter()
                .zip(&table.headers)
                .map(|(c, h)| {
                    let cell = PtCell::new(&cell_text(c));
                    if is_numeric_column(h) {
                        cell.style_spec("r")
                    } else {
                        cell
                    }
                })
                .collect(),
        ));
    }
    out.to_string()
}

pub fn page(page: &Page) -> String {
    let data = match &page.body {
        TableSection::Table(t) => table(t),
        TableSection::Message { text } => format!("{}\n", text),
    };
    format!(
        "{}\n{}\n\n{}\n{}\n",
        page.title, page.subtitle, data, page.build
    )
}

pub fn report(report: &Report) -> String {
    let mut out = format!("{}\n", report.title);
    for section in &report.sections {
        out.push_str(&format!("\n--- {} ---\n", section.name));
        out.push_str(&table(&section.table));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headers_and_cells() {
        let t = Table {
            headers: vec!["年月".to_string(), "素材".to_string(), "費用".to_string()],
            rows: vec![vec![
                Cell::text("2024年03月"),
                Cell::Video {
                    id: "dQw4w9WgXcQ".to_string(),
                    embed_url: "https://www.youtube.com/embed/dQw4w9WgXcQ".to_string(),
                },
                Cell::text("1,234"),
            ]],
        };
        let s = table(&t);
        assert!(s.contains("年月"));
        assert!(s.contains("2024年03月"));
        assert!(s.contains("[影片] https://www.youtube.com/embed/dQw4w9WgXcQ"));
        assert!(s.contains("1,234"));
    }

    #[test]
    fn message_page_has_no_table() {
        let p = Page {
            title: "(讀取失敗)".to_string(),
            subtitle: "(副標題讀取失敗)".to_string(),
            body: TableSection::message("讀取資料失敗"),
            build: "vdeadbee - 2024/1/1 00:00:00".to_string(),
        };
        let s = page(&p);
        assert!(s.starts_with("(讀取失敗)\n(副標題讀取失敗)\n"));
        assert!(s.contains("讀取資料失敗"));
        assert!(s.trim_end().ends_with("vdeadbee - 2024/1/1 00:00:00"));
    }
}
