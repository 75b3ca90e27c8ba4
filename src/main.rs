use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use shoprec::{build_artifacts, build_preprocessor, load_recommender, AppConfig, Recommender};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "shoprec",
    about = "Query the fashion catalog recommender from the command line"
)]
struct Cli {
    /// YAML config describing artifacts, tables and preprocessing
    #[arg(long, env = "SHOPREC_CONFIG", default_value = "shoprec.yaml")]
    config: PathBuf,

    /// Log filter (tracing EnvFilter syntax); logs go to stderr
    #[arg(long, env = "SHOPREC_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the preprocessing pipeline over a raw description
    Preprocess { text: String },

    /// Content-based recommendations for a description or a product id
    Similar {
        query: String,
        #[arg(long)]
        count: Option<usize>,
        #[arg(long)]
        threshold: Option<f32>,
    },

    /// Precomputed recommendations for a user
    User {
        id: u64,
        #[arg(long)]
        count: Option<usize>,
        #[arg(long)]
        threshold: Option<f32>,
    },

    /// Users most likely to rate an item highly
    Item {
        id: u64,
        #[arg(long)]
        count: Option<usize>,
        #[arg(long)]
        threshold: Option<f32>,
    },

    /// A user's rating history, highest first
    History {
        id: u64,
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Users with the most ratings
    TopRaters {
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Build the similarity artifacts from the catalog's processed descriptions
    BuildArtifacts,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = AppConfig::from_file(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;

    match cli.command {
        Command::Preprocess { text } => {
            let preprocessor = build_preprocessor(&config)?;
            print_json(&preprocessor.preprocess(&text))
        }
        Command::BuildArtifacts => {
            let artifacts = build_artifacts(&config)?;
            println!(
                "Built artifacts for {} documents ({} terms) at {}",
                artifacts.num_documents(),
                artifacts.dictionary().len(),
                config.artifacts.index.display()
            );
            Ok(())
        }
        command => {
            let recommender = load_recommender(&config)?;
            run_lookup(&recommender, command)
        }
    }
}

fn run_lookup(recommender: &Recommender, command: Command) -> Result<()> {
    let defaults = recommender.config();
    match command {
        Command::Similar {
            query,
            count,
            threshold,
        } => print_json(&recommender.recommend_products(
            &query,
            count.unwrap_or(defaults.content_results),
            threshold.unwrap_or(defaults.similarity_threshold),
        )?),
        Command::User {
            id,
            count,
            threshold,
        } => print_json(&recommender.user_recommendations(
            id.into(),
            count.unwrap_or(defaults.collaborative_results),
            threshold.unwrap_or(defaults.rating_threshold),
        )?),
        Command::Item {
            id,
            count,
            threshold,
        } => print_json(&recommender.item_audience(
            id.into(),
            count.unwrap_or(defaults.collaborative_results),
            threshold.unwrap_or(defaults.rating_threshold),
        )?),
        Command::History { id, limit } => print_json(
            &recommender.user_rating_history(id.into(), limit.unwrap_or(defaults.history_limit))?,
        ),
        Command::TopRaters { limit } => {
            print_json(&recommender.top_raters(limit.unwrap_or(defaults.top_raters_limit)))
        }
        Command::Preprocess { .. } | Command::BuildArtifacts => {
            anyhow::bail!("command does not need the recommender")
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
