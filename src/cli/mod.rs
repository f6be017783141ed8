//! Command-line interface for lesk-match.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **match**: Find the best structure counterpart of every pattern point
//! - **signatures**: Show the property and distance signatures derived from one input
//!
//! ## Usage
//!
//! ```text
//! # Match a pattern against a structure
//! lesk-match match pattern.txt structure.txt
//!
//! # Complementary charges, 2 Angstrom bins, 75% bitset accuracy
//! lesk-match match -i -d 2.0 -a 75 pattern.txt structure.txt
//!
//! # JSON output for scripting
//! lesk-match --format json match pattern.txt structure.txt
//!
//! # Inspect the signatures of a precomputed distance table
//! lesk-match signatures distances.tsv
//! ```

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::core::record::{DistanceBinner, Side};
use crate::parsing;

pub mod matching;
pub mod signatures;

#[derive(Parser)]
#[command(name = "lesk-match")]
#[command(version)]
#[command(about = "Match a pattern of surface features against a structure using Lesk's method")]
#[command(
    long_about = "lesk-match finds potential correspondences between a small pattern of chemically characterized points and a larger structure.\n\nPoints whose pairwise distance signature cannot appear in the pattern are eliminated iteratively; each remaining pattern point is then reported with its best-scoring structure point."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match a pattern file against a structure file
    Match(matching::MatchArgs),

    /// Show the signatures derived from one input file
    Signatures(signatures::SignaturesArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// `label resid x y z [properties]` per line
    Point,
    /// `labelA residA labelB residB distance [propsA propsB]` per line
    Table,
}

/// Read one side from `path`, detecting the format from its extension unless given
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn parse_input(
    path: &Path,
    format: Option<InputFormat>,
    binner: &DistanceBinner,
) -> anyhow::Result<Side> {
    let side = match format.unwrap_or_else(|| detect_format(path)) {
        InputFormat::Point => parsing::points::parse_points_file(path, binner)?,
        InputFormat::Table => parsing::table::parse_table_file(path, binner)?,
    };
    Ok(side)
}

/// Detect input format from file extension, looking through a `.gz` suffix
fn detect_format(path: &Path) -> InputFormat {
    let path_str = path.to_string_lossy().to_lowercase();
    let path_str = path_str.strip_suffix(".gz").unwrap_or(&path_str);

    if path_str.ends_with(".tsv") || path_str.ends_with(".dist") {
        InputFormat::Table
    } else {
        InputFormat::Point
    }
}
