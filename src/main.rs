use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;

use catalog_ingest::logging;
use catalog_ingest::{Config, IngestReport, Pipeline};

#[derive(Parser)]
#[command(name = "catalog_ingest")]
#[command(about = "Course catalog ingestion pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full ingestion pipeline over a catalog text file
    Ingest {
        /// Path to the plain-text catalog document
        #[arg(long)]
        input: PathBuf,
        /// Path to the knowledge-base TOML file
        #[arg(long, default_value = "config/catalog.toml")]
        config: PathBuf,
        /// Directory for the catalog table and run report
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
        /// Fail the run when a cross-listed title group has no keeper code
        #[arg(long)]
        strict_keepers: bool,
    },
    /// Load the knowledge base and print the size of each curated table
    CheckConfig {
        /// Path to the knowledge-base TOML file
        #[arg(long, default_value = "config/catalog.toml")]
        config: PathBuf,
    },
}

fn run_ingest(
    input: &Path,
    config_path: &Path,
    output_dir: &Path,
    strict_keepers: bool,
) -> anyhow::Result<IngestReport> {
    let mut config = Config::load(config_path).context("failed to load knowledge base")?;
    if strict_keepers {
        config.deduplication.strict_keepers = true;
    }

    let pipeline = Pipeline::new(config);
    let report = pipeline
        .run(input, output_dir)
        .context("catalog ingest failed")?;
    Ok(report)
}

fn check_config(config_path: &Path) -> anyhow::Result<()> {
    let config = Config::load(config_path).context("failed to load knowledge base")?;

    println!("🔎 Knowledge base loaded:");
    println!("   Department tokens: {}", config.vocabulary.departments.len());
    println!("   Title overrides: {}", config.corrections.titles.len());
    println!(
        "   Department rewrites: {}",
        config.corrections.departments.len()
    );
    println!("   Blacklisted codes: {}", config.deduplication.blacklist.len());
    println!("   Keeper codes: {}", config.deduplication.keepers.len());
    println!("   Manual additions: {}", config.additions.len());
    Ok(())
}

fn main() -> ExitCode {
    logging::init_logging();

    let cli = Cli::parse();
    match cli.command {
        Commands::Ingest {
            input,
            config,
            output_dir,
            strict_keepers,
        } => {
            println!("📚 Running catalog ingestion pipeline...");
            match run_ingest(&input, &config, &output_dir, strict_keepers) {
                Ok(report) => {
                    println!("\n📊 Ingest results:");
                    println!("   Raw matches: {}", report.raw_matches);
                    println!("   Derived records: {}", report.derived);
                    println!("   Titles corrected: {}", report.corrected_titles);
                    println!("   Departments rewritten: {}", report.rewritten_departments);
                    println!("   After deduplication: {}", report.after_dedup);
                    println!("   Final rows: {}", report.final_rows);
                    println!("   Output file: {}", report.output_file);
                    println!("✅ Catalog ingest completed successfully");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!("Catalog ingest failed: {:#}", e);
                    println!("❌ Catalog ingest failed: {:#}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Commands::CheckConfig { config } => match check_config(&config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("Config check failed: {:#}", e);
                println!("❌ Config check failed: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}
