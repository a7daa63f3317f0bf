mod crawl;
mod rank;
mod score;

use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::rank::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "brandfit")]
#[command(about = "Crawl, score, and rank influencers by brand fit")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl encyclopedia and news text for every influencer in a CSV
    Crawl {
        /// CSV with an `influencer` column
        #[arg(long)]
        input: PathBuf,
        /// Corpus CSV to write
        #[arg(long)]
        output: PathBuf,
    },
    /// Evaluate every influencer in a corpus against the configured brands
    Score {
        /// Corpus CSV produced by `crawl`
        #[arg(long)]
        corpus: PathBuf,
        /// Brand-fit results CSV to write
        #[arg(long)]
        output: PathBuf,
        /// Only evaluate this brand
        #[arg(long)]
        brand: Option<String>,
    },
    /// Rank influencers for one brand
    Rank {
        #[arg(long)]
        brand: String,
        /// Share of the total taken by the appearance score (0.0 to 1.0)
        #[arg(long, default_value_t = 0.5)]
        weight: f64,
        /// Include the reason columns
        #[arg(long)]
        show_reasons: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List configured brands
    Brands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = brandfit_core::load_app_config().context("failed to load configuration")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let brands = brandfit_core::load_brands(&config.brands_path).with_context(|| {
        format!(
            "failed to load brands from {}",
            config.brands_path.display()
        )
    })?;

    match command {
        Commands::Crawl { input, output } => crawl::run_crawl(&config, &input, &output).await,
        Commands::Score {
            corpus,
            output,
            brand,
        } => score::run_score(&config, &brands, &corpus, &output, brand.as_deref()).await,
        Commands::Rank {
            brand,
            weight,
            show_reasons,
            format,
            output,
        } => {
            let options = rank::RankOptions {
                brand,
                weight,
                show_reasons,
                format,
            };
            rank::run_rank(&config, &brands, &options, output.as_deref())
        }
        Commands::Brands => {
            for brand in &brands.brands {
                println!("{}\t{}", brand.name, brand.title());
            }
            Ok(())
        }
    }
}
