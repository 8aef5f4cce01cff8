//! Triage CLI - route free-text tasks to specialist handlers
//!
//! Main entry point for the triage command-line tool.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;
use triage::{Manifest, RouteOutcome, Severity};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Triage - route free-text tasks to specialist handlers", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route a prompt to the most relevant handler(s)
    Route {
        /// The task description, as trailing free-text words
        #[arg(required = true)]
        prompt: Vec<String>,

        /// Manifest path (defaults to the configured location)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Number of distinct handlers to return
        #[arg(long)]
        top: Option<usize>,

        /// Minimum score an entry must reach (inclusive)
        #[arg(long)]
        min_score: Option<f64>,

        /// Output format: text (default), json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Generate the manifest from the capability catalog
    Generate {
        /// Target directory to write under
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Also scaffold metadata files into existing entry-point directories
        #[arg(long)]
        scaffold: bool,
    },

    /// Audit the manifest against the on-disk layout
    Validate {
        /// Root directory the layout is resolved against
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Manifest path (defaults to the configured location under --dir)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Output format: text (default), json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List the manifest entries
    List {
        /// Manifest path (defaults to the configured location)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

/// Routed match row for table output
#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Handler")]
    handler: String,
    #[tabled(rename = "Capability")]
    capability: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Entry Point")]
    entry_point: String,
}

/// Validation finding row for table output
#[derive(Tabled)]
struct FindingRow {
    #[tabled(rename = "Entry")]
    entry: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Message")]
    message: String,
}

/// Manifest entry row for table output
#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Handler")]
    handler: String,
    #[tabled(rename = "Priority")]
    priority: i64,
    #[tabled(rename = "Phrases")]
    phrases: usize,
    #[tabled(rename = "Pattern")]
    pattern: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = triage::load_config().await?;

    // Initialize tracing; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Route {
            prompt,
            manifest,
            top,
            min_score,
            format,
        } => {
            let prompt = prompt.join(" ");
            let manifest_path =
                manifest.unwrap_or_else(|| PathBuf::from(&config.manifest.path));
            let manifest = Manifest::load(&manifest_path).await?;

            // CLI flags override config overrides defaults
            let mut options = config.routing.select_options();
            if let Some(top) = top {
                options.top_n = top;
            }
            if let Some(min_score) = min_score {
                options.min_score = min_score;
            }

            let outcome = triage::select(&prompt, &manifest, &options);

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                return Ok(());
            }

            match outcome {
                RouteOutcome::Matched { matches } => {
                    println!(
                        "{}",
                        format!("✓ Routed to {} handler(s)", matches.len())
                            .green()
                            .bold()
                    );
                    let rows: Vec<MatchRow> = matches
                        .iter()
                        .enumerate()
                        .map(|(i, m)| MatchRow {
                            rank: i + 1,
                            handler: m.entry.handler.clone(),
                            capability: m.entry.name.clone(),
                            score: format!("{:.2}", m.score),
                            entry_point: m.entry.entry_point.clone(),
                        })
                        .collect();
                    println!("{}", Table::new(rows));
                }
                RouteOutcome::NeedsClarification { message } => {
                    println!("{}", message.yellow());
                }
            }
            Ok(())
        }
        Commands::Generate { dir, scaffold } => {
            let report =
                triage::write_manifest(&dir, &config.layout, &config.manifest.path).await?;
            println!(
                "{} {} ({} entries)",
                "✓ Generated".green().bold(),
                report.manifest_path.display(),
                report.entries
            );

            if scaffold {
                let manifest = Manifest::load(&report.manifest_path).await?;
                let scaffold_report = triage::scaffold_metadata(&dir, &manifest).await?;
                for path in &scaffold_report.generated {
                    println!("  {} {}", "generated".green(), path.display());
                }
                for name in &scaffold_report.skipped {
                    println!("  {} {} (already exists)", "skipped".yellow(), name);
                }
                for name in &scaffold_report.missing {
                    println!("  {} {} (entry point absent)", "missing".yellow(), name);
                }
            }
            Ok(())
        }
        Commands::Validate {
            dir,
            manifest,
            format,
        } => {
            let manifest_path =
                manifest.unwrap_or_else(|| dir.join(&config.manifest.path));
            let manifest = Manifest::load(&manifest_path).await?;

            let report = triage::validate_manifest(&dir, &manifest, &config.layout).await;

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                if !report.findings.is_empty() {
                    let rows: Vec<FindingRow> = report
                        .findings
                        .iter()
                        .map(|f| FindingRow {
                            entry: f.entry.clone(),
                            severity: match f.severity {
                                Severity::Error => format!("✗ {}", f.severity).red().to_string(),
                                Severity::Warning => {
                                    format!("⚠ {}", f.severity).yellow().to_string()
                                }
                            },
                            message: f.message.clone(),
                        })
                        .collect();
                    println!("{}", Table::new(rows));
                }

                if report.passed() {
                    println!(
                        "{} ({} entries, {} warnings)",
                        "✓ Validation passed".green().bold(),
                        report.checked,
                        report.warnings()
                    );
                } else {
                    println!(
                        "{} ({} errors, {} warnings)",
                        "✗ Validation failed".red().bold(),
                        report.errors(),
                        report.warnings()
                    );
                }
            }

            if !report.passed() {
                anyhow::bail!("validation failed with {} error(s)", report.errors());
            }
            Ok(())
        }
        Commands::List { manifest } => {
            let manifest_path =
                manifest.unwrap_or_else(|| PathBuf::from(&config.manifest.path));
            let manifest = Manifest::load(&manifest_path).await?;

            if manifest.is_empty() {
                println!("{}", "No entries in manifest".yellow());
                return Ok(());
            }

            let rows: Vec<EntryRow> = manifest
                .entries
                .iter()
                .map(|e| EntryRow {
                    name: e.name.clone(),
                    handler: e.handler.clone(),
                    priority: e.priority,
                    phrases: e.activation.phrases.len(),
                    pattern: if e.activation.pattern.is_some() {
                        "yes".to_string()
                    } else {
                        "no".to_string()
                    },
                })
                .collect();
            println!("{}", Table::new(rows));
            println!(
                "{} entries, {} distinct handlers",
                manifest.len(),
                manifest.handlers().len()
            );
            Ok(())
        }
    }
}
