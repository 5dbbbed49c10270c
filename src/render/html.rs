// src/render/html.rs

use std::fmt::Write;

use crate::page::{Page, TableSection};
use crate::summary::Report;
use crate::table::{Cell, DisplayColumn, Table};

const BORDER: &str = "1px solid #ccc";
const TABLE_STYLE: &str =
    "border-collapse: collapse; width: 100%; max-width: 1200px; margin: 0 auto; background: #fff;";
const IMAGE_STYLE: &str = "max-width:200px; max-height:112px; object-fit: contain;";
const PLAYER_STYLE: &str = "width:200px; height:112px;";
const VERSION_STYLE: &str = "position: fixed; bottom: 10px; right: 10px; font-size: 12px; \
    color: #666; background: rgba(255,255,255,0.8); padding: 4px 8px; border-radius: 6px; \
    box-shadow: 0 0 4px rgba(0,0,0,0.1); z-index: 999;";

/// Escape text for element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn th_style() -> String {
    format!("border: {}; padding: 8px; font-weight: bold; text-align: left;", BORDER)
}

fn td_style() -> String {
    format!("border: {}; padding: 8px; vertical-align: top;", BORDER)
}

pub fn cell(cell: &Cell) -> String {
    match cell {
        Cell::Text { text } | Cell::Placeholder { text } => escape(text),
        Cell::Image { src } => format!(r#"<img src="{}" style="{}" />"#, escape(src), IMAGE_STYLE),
        Cell::Video { embed_url, .. } => format!(
            r#"<iframe src="{}" frameborder="0" allowfullscreen style="{}"></iframe>"#,
            escape(embed_url),
            PLAYER_STYLE
        ),
    }
}

pub fn table(table: &Table) -> String {
    let th = th_style();
    let td = td_style();
    let mut out = String::new();
    let _ = write!(out, r#"<table style="{}"><thead><tr>"#, TABLE_STYLE);
    for h in &table.headers {
        let _ = write!(out, r#"<th style="{}">{}</th>"#, th, escape(h));
    }
    out.push_str("</tr></thead><tbody>");
    let media_col = table
        .headers
        .iter()
        .position(|h| h == DisplayColumn::Creative.label());
    for row in &table.rows {
        out.push_str("<tr>");
        for (i, c) in row.iter().enumerate() {
            let class = if Some(i) == media_col {
                r#" class="video-cell""#
            } else {
                ""
            };
            let _ = write!(out, r#"<td{} style="{}">{}</td>"#, class, td, cell(c));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

fn document(title: &str, body: &str, build: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"zh-Hant\">\n<head>\n<meta charset=\"utf-8\" />\n\
         <title>{title}</title>\n</head>\n<body>\n{body}\n\
         <div id=\"appVersion\" style=\"{style}\">{build}</div>\n</body>\n</html>\n",
        title = escape(title),
        body = body,
        style = VERSION_STYLE,
        build = escape(build),
    )
}

pub fn page(page: &Page) -> String {
    let data = match &page.body {
        TableSection::Table(t) => table(t),
        TableSection::Message { text } => escape(text),
    };
    let body = format!(
        "<h1 id=\"titleDescription\">{}</h1>\n<p id=\"subDescription\">{}</p>\n\
         <div id=\"dataContainer\">{}</div>",
        escape(&page.title),
        escape(&page.subtitle),
        data
    );
    document(&page.title, &body, &page.build)
}

pub fn report(report: &Report) -> String {
    let mut body = format!("<h1>{}</h1>", escape(&report.title));
    for section in &report.sections {
        let _ = write!(
            body,
            "\n<h2>{}</h2>\n{}",
            escape(&section.name),
            table(&section.table)
        );
    }
    document(&report.title, &body, crate::version::BUILD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape("素材"), "素材");
    }

    #[test]
    fn image_and_video_markup() {
        let img = cell(&Cell::Image {
            src: "https://x.com/a.png?a=1&b=2".to_string(),
        });
        assert!(img.starts_with(r#"<img src="https://x.com/a.png?a=1&amp;b=2""#));

        let video = cell(&Cell::Video {
            id: "dQw4w9WgXcQ".to_string(),
            embed_url: "https://www.youtube.com/embed/dQw4w9WgXcQ".to_string(),
        });
        assert!(video.contains(r#"<iframe src="https://www.youtube.com/embed/dQw4w9WgXcQ""#));
        assert!(video.contains("allowfullscreen"));
    }

    #[test]
    fn injected_text_is_inert() {
        let t = Table {
            headers: vec!["鉤子".to_string()],
            rows: vec![vec![Cell::text("<script>alert(1)</script>")]],
        };
        let html = table(&t);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn page_carries_sections_and_version() {
        let p = Page {
            title: "報表".to_string(),
            subtitle: "副標".to_string(),
            body: TableSection::message("沒有資料"),
            build: "vabc1234 - 2024/3/1 12:00:00".to_string(),
        };
        let html = page(&p);
        assert!(html.contains(r#"<h1 id="titleDescription">報表</h1>"#));
        assert!(html.contains(r#"<p id="subDescription">副標</p>"#));
        assert!(html.contains(r#"<div id="dataContainer">沒有資料</div>"#));
        assert!(html.contains("vabc1234 - 2024/3/1 12:00:00</div>"));
    }

    #[test]
    fn every_creative_cell_is_marked() {
        let t = Table {
            headers: vec!["年月".to_string(), "素材".to_string()],
            rows: vec![
                vec![
                    Cell::text("2024年03月"),
                    Cell::Image {
                        src: "https://x.com/a.png".to_string(),
                    },
                ],
                vec![
                    Cell::text("2024年04月"),
                    Cell::Placeholder {
                        text: "(不支援的素材連結)".to_string(),
                    },
                ],
            ],
        };
        let html = table(&t);
        assert_eq!(html.matches(r#"class="video-cell""#).count(), 2);
        assert!(html.contains(r#"<td class="video-cell" style="border: 1px solid #ccc; padding: 8px; vertical-align: top;">(不支援的素材連結)</td>"#));
        assert!(html.contains(r#"<td style="border: 1px solid #ccc; padding: 8px; vertical-align: top;">2024年03月</td>"#));
    }
}
