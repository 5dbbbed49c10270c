use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reqwest::Client;
use sheetboard::{
    config::SheetConfig,
    fetch::SheetsClient,
    page::load_page,
    process::RawTable,
    render::OutputFormat,
    summary::Summary,
    version,
};
use std::path::PathBuf;
use tokio::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(author, version = version::BUILD, about = "Render an ad-performance Google Sheet")]
struct Cli {
    #[command(flatten)]
    sheet: SheetConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Title, subtitle and the formatted creative table
    Page {
        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Monthly KPIs per network (impressions, cost, CPI, IR, CPM, CTR)
    Summary {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, default_value = "廣告數據分析")]
        title: String,
    },
}

async fn emit(rendered: String, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(&path, rendered)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!(build = version::BUILD, sheet = %cli.sheet.sheet_id, "startup");

    let client = SheetsClient::new(Client::new(), &cli.sheet)?;
    let start = Instant::now();

    match cli.command {
        Command::Page { format, output } => {
            let page = load_page(client, &cli.sheet).await;
            info!(elapsed = ?start.elapsed(), "page loaded");
            emit(format.renderer().page(&page)?, output).await?;
        }
        Command::Summary {
            format,
            output,
            title,
        } => {
            let values = client
                .fetch_values(&cli.sheet.sheet_name)
                .await
                .with_context(|| format!("reading sheet {}", cli.sheet.sheet_name))?;
            let records = match RawTable::from_values(values) {
                Some(raw) => raw.records(),
                None => {
                    warn!("sheet has no header or no rows");
                    Vec::new()
                }
            };
            let report = Summary::from_records(&records).report(&title);
            info!(elapsed = ?start.elapsed(), rows = records.len(), "summary computed");
            emit(format.renderer().report(&report)?, output).await?;
        }
    }

    Ok(())
}
