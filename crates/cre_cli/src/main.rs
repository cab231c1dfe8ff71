//! Analyzer CLI
//!
//! Runs the valuation and analytics core against local JSON files: feature
//! maps for prediction, listing corpus snapshots for analytics.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cre_core::market::{BoundingBox, ListingFilter};
use cre_core::{AnalyzerConfig, ValuationEngine};

#[derive(Parser)]
#[command(name = "cre")]
#[command(about = "Real-estate valuation and market analytics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict a fair price from a JSON feature map
    Predict {
        /// Input JSON file with property features
        #[arg(long)]
        features: PathBuf,
    },

    /// Value and classify a batch of listings
    Batch {
        /// Input JSON file: {"items": [{id, features, observed_price}, ...]}
        #[arg(long)]
        input: PathBuf,
    },

    /// Market overview statistics
    Overview {
        /// Listings corpus JSON file
        #[arg(long)]
        listings: PathBuf,
    },

    /// Daily price trends
    Trend {
        #[arg(long)]
        listings: PathBuf,

        /// Case-insensitive city substring filter
        #[arg(long)]
        city: Option<String>,

        /// Exact property type filter (e.g. "apartment")
        #[arg(long)]
        property_type: Option<String>,

        /// Trailing window in days (7..=365)
        #[arg(long)]
        days: Option<i64>,
    },

    /// Normalized price-per-m² heatmap
    Heatmap {
        #[arg(long)]
        listings: PathBuf,

        #[arg(long)]
        city: Option<String>,

        /// Grid cell size in degrees
        #[arg(long)]
        grid_size: Option<f64>,
    },

    /// Listings similar to a reference listing
    Similar {
        #[arg(long)]
        listings: PathBuf,

        /// Reference listing id
        #[arg(long)]
        id: i64,

        #[arg(long, default_value = "5.0")]
        radius_km: f64,

        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Listings within a bounding box
    Bbox {
        #[arg(long)]
        listings: PathBuf,

        #[arg(long)]
        south: f64,
        #[arg(long)]
        west: f64,
        #[arg(long)]
        north: f64,
        #[arg(long)]
        east: f64,

        #[arg(long)]
        property_type: Option<String>,

        #[arg(long, default_value = "500")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = AnalyzerConfig::from_env()?;

    let output = match cli.command {
        Commands::Predict { features } => {
            let engine = ValuationEngine::new(&config);
            cre_cli::run_predict(&engine, &features)?
        }
        Commands::Batch { input } => {
            let engine = ValuationEngine::new(&config);
            cre_cli::run_batch(&engine, &config, &input)?
        }
        Commands::Overview { listings } => {
            let listings = cre_cli::load_listings(&listings)?;
            cre_cli::run_overview(&listings)?
        }
        Commands::Trend { listings, city, property_type, days } => {
            let listings = cre_cli::load_listings(&listings)?;
            cre_cli::run_trend(
                &listings,
                city.as_deref(),
                property_type.as_deref(),
                days.unwrap_or(config.trend_window_days),
            )?
        }
        Commands::Heatmap { listings, city, grid_size } => {
            let listings = cre_cli::load_listings(&listings)?;
            cre_cli::run_heatmap(
                &listings,
                city.as_deref(),
                grid_size.unwrap_or(config.heatmap_grid_size),
            )?
        }
        Commands::Similar { listings, id, radius_km, limit } => {
            let listings = cre_cli::load_listings(&listings)?;
            cre_cli::run_similar(&listings, id, radius_km, limit)?
        }
        Commands::Bbox {
            listings,
            south,
            west,
            north,
            east,
            property_type,
            limit,
        } => {
            let listings = cre_cli::load_listings(&listings)?;
            let bounds = BoundingBox { south, west, north, east };
            let filter = ListingFilter { property_type, ..Default::default() };
            cre_cli::run_bbox(&listings, bounds, &filter, limit)?
        }
    };

    println!("{}", output);
    Ok(())
}
