// src/render/mod.rs

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::page::Page;
use crate::summary::Report;

pub mod html;
pub mod text;

/// An output backend for pages and summary reports.
pub trait Renderer {
    fn page(&self, page: &Page) -> Result<String>;
    fn report(&self, report: &Report) -> Result<String>;
}

pub struct HtmlRenderer;
pub struct TextRenderer;
pub struct JsonRenderer;

impl Renderer for HtmlRenderer {
    fn page(&self, page: &Page) -> Result<String> {
        Ok(html::page(page))
    }

    fn report(&self, report: &Report) -> Result<String> {
        Ok(html::report(report))
    }
}

impl Renderer for TextRenderer {
    fn page(&self, page: &Page) -> Result<String> {
        Ok(text::page(page))
    }

    fn report(&self, report: &Report) -> Result<String> {
        Ok(text::report(report))
    }
}

impl Renderer for JsonRenderer {
    fn page(&self, page: &Page) -> Result<String> {
        serde_json::to_string_pretty(page).context("serializing page")
    }

    fn report(&self, report: &Report) -> Result<String> {
        serde_json::to_string_pretty(report).context("serializing report")
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Html,
    Text,
    Json,
}

impl OutputFormat {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            OutputFormat::Html => Box::new(HtmlRenderer),
            OutputFormat::Text => Box::new(TextRenderer),
            OutputFormat::Json => Box::new(JsonRenderer),
        }
    }
}
