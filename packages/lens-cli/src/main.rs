//! Find legal documents linked from a page and summarize their risks.
//!
//! ```text
//! lens scan https://example.com
//! lens analyze https://example.com --all
//! lens summarize https://example.com/terms --json
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use legal_lens::{
    anchors_from_markup, Analysis, Analyzer, CandidateLink, DocumentFetcher, DocumentType,
    HttpFetcher, MemoryCache, Priority, RemoteConfig, RemoteSummarizer, Severity,
};
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[derive(Parser)]
#[command(name = "lens")]
#[command(about = "Find and summarize the legal documents behind a web page")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Model used for remote summaries
    #[arg(long, global = true)]
    model: Option<String>,

    /// Never call the remote model
    #[arg(long, global = true)]
    offline: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the legal links on a page
    Scan { page_url: String },

    /// Scan a page, then summarize the linked documents
    Analyze {
        page_url: String,

        /// Summarize every link found
        #[arg(long, conflicts_with = "index")]
        all: bool,

        /// Summarize only the Nth link (1-based, as listed by `scan`)
        #[arg(long)]
        index: Option<usize>,
    },

    /// Summarize one document URL
    Summarize { document_url: String },
}

#[derive(Serialize)]
struct Report<'a> {
    link: &'a CandidateLink,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<&'a Analysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so `--json` output stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let analyzer = build_analyzer(&cli)?;

    match &cli.command {
        Commands::Scan { page_url } => {
            let links = scan_page(&analyzer, page_url).await?;
            print_links(&links, cli.json)?;
        }
        Commands::Analyze {
            page_url,
            all,
            index,
        } => {
            let links = scan_page(&analyzer, page_url).await?;
            let selected = select_links(&links, *all, *index)?;
            let results = analyzer.analyze_all(&selected).await;

            let reports: Vec<Report> = selected
                .iter()
                .zip(&results)
                .map(|(link, result)| Report {
                    link,
                    analysis: result.as_ref().ok(),
                    error: result.as_ref().err().map(|e| e.to_string()),
                })
                .collect();
            print_reports(&reports, cli.json)?;
        }
        Commands::Summarize { document_url } => {
            let analysis = analyzer
                .analyze(document_url)
                .await
                .with_context(|| format!("Failed to analyze {}", document_url))?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_analysis(&analysis);
            }
        }
    }

    Ok(())
}

fn build_analyzer(cli: &Cli) -> Result<Analyzer<HttpFetcher, MemoryCache>> {
    let fetcher = HttpFetcher::new().context("Failed to create HTTP client")?;
    let analyzer = Analyzer::new(fetcher, MemoryCache::new());

    if cli.offline {
        tracing::info!("Offline mode, using rule-based summaries only");
        return Ok(analyzer);
    }

    let mut config = RemoteConfig::from_env();
    if let Some(model) = &cli.model {
        config = config.with_model(model.clone());
    }
    if !config.has_credential() {
        tracing::info!("OPENAI_API_KEY not set, documents will be summarized by the rule engine");
    }
    tracing::debug!(config = ?config, "Remote summarizer configuration");

    Ok(analyzer.with_remote(Arc::new(RemoteSummarizer::from_config(&config))))
}

async fn scan_page(
    analyzer: &Analyzer<HttpFetcher, MemoryCache>,
    page_url: &str,
) -> Result<Vec<CandidateLink>> {
    let page = Url::parse(page_url).with_context(|| format!("Invalid page URL: {}", page_url))?;
    let markup = analyzer
        .fetcher()
        .fetch(page.as_str())
        .await
        .with_context(|| format!("Failed to fetch {}", page_url))?;

    let anchors = anchors_from_markup(&markup, &page);
    let links = analyzer.scan(&anchors);

    tracing::info!(
        page = %page,
        anchors = anchors.len(),
        legal_links = links.len(),
        "Scanned page"
    );

    Ok(links)
}

fn select_links(
    links: &[CandidateLink],
    all: bool,
    index: Option<usize>,
) -> Result<Vec<CandidateLink>> {
    if links.is_empty() {
        bail!("No legal documents found on this page");
    }

    match index {
        Some(n) if n == 0 || n > links.len() => {
            bail!("--index must be between 1 and {}", links.len())
        }
        Some(n) => Ok(vec![links[n - 1].clone()]),
        None if all => Ok(links.to_vec()),
        None => Ok(vec![links[0].clone()]),
    }
}

fn print_links(links: &[CandidateLink], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(links)?);
        return Ok(());
    }

    if links.is_empty() {
        println!("{}", "No legal documents found on this page".yellow());
        return Ok(());
    }

    println!("{}", format!("Found {} legal document(s):", links.len()).bold());
    for (i, link) in links.iter().enumerate() {
        println!(
            "  {}. {} {}",
            i + 1,
            link.display_text.bright_white(),
            type_label(link.document_type)
        );
        println!("     {}", link.url.dimmed());
    }
    Ok(())
}

fn type_label(document_type: DocumentType) -> ColoredString {
    let label = format!("[{}]", document_type);
    match document_type.priority() {
        Priority::High => label.red().bold(),
        Priority::Medium => label.yellow(),
        Priority::Low => label.dimmed(),
    }
}

fn print_reports(reports: &[Report], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reports)?);
        return Ok(());
    }

    for report in reports {
        println!();
        println!(
            "{} {}",
            report.link.display_text.bold(),
            type_label(report.link.document_type)
        );
        match (report.analysis, &report.error) {
            (Some(analysis), _) => print_analysis(analysis),
            (None, Some(error)) => println!("  {} {}", "Failed to analyze this document:".red(), error),
            (None, None) => {}
        }
    }
    Ok(())
}

fn print_analysis(analysis: &Analysis) {
    let summary = &analysis.summary;

    println!("  {}", format!("{} ({})", analysis.url, analysis.origin).dimmed());

    println!("  {}", "Key points".bold());
    if summary.key_points.is_empty() {
        println!("    {}", "No key points identified".dimmed());
    }
    for point in &summary.key_points {
        println!("    - {}", point);
    }

    println!("  {}", "Risks".bold());
    if summary.risks.is_empty() {
        println!("    {}", "No specific risks identified".dimmed());
    }
    for risk in &summary.risks {
        let label = format!("[{}]", risk.severity.to_string().to_uppercase());
        let label = match risk.severity {
            Severity::High => label.red().bold(),
            Severity::Medium => label.yellow(),
            Severity::Low => label.green(),
        };
        println!("    {} {}", label, risk.description);
    }

    println!("  {}", "Recommendations".bold());
    for rec in &summary.recommendations {
        println!("    - {}", rec);
    }
}
