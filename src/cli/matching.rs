use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::{parse_input, InputFormat, OutputFormat};
use crate::core::record::DEFAULT_BIN_WIDTH;
use crate::matching::engine::{MatchConfig, MatchEngine, MatchOutcome, DEFAULT_MAX_ITERATIONS};
use crate::matching::report::TieBreak;
use crate::matching::scoring::DEFAULT_ACCURACY;

#[derive(Args)]
pub struct MatchArgs {
    /// Pattern file (points or distance table)
    #[arg(required = true)]
    pub pattern: PathBuf,

    /// Structure file (points or distance table)
    #[arg(required = true)]
    pub structure: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Distance bin size
    #[arg(short = 'd', long, default_value_t = DEFAULT_BIN_WIDTH)]
    pub bin_width: f64,

    /// Percentage distance bitset accuracy required for a match
    #[arg(short, long, default_value_t = DEFAULT_ACCURACY, allow_negative_numbers = true)]
    pub accuracy: f64,

    /// Swap positive and negative charges in the pattern
    #[arg(short, long)]
    pub invert: bool,

    /// Maximum number of elimination rounds
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,

    /// Keep the last rather than the first of equally scored structure points
    #[arg(long)]
    pub prefer_last: bool,

    /// Input format (auto-detected by default)
    #[arg(long)]
    pub input_format: Option<InputFormat>,
}

impl MatchArgs {
    fn config(&self) -> MatchConfig {
        MatchConfig {
            bin_width: self.bin_width,
            accuracy_threshold: self.accuracy,
            invert_pattern_properties: self.invert,
            max_iterations: self.max_iterations,
            tie_break: if self.prefer_last {
                TieBreak::LastEncountered
            } else {
                TieBreak::FirstEncountered
            },
        }
    }
}

/// Execute match subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be parsed, the output cannot be
/// written, or the elimination does not converge.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: MatchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.config();
    let binner = config.binner();

    let pattern = parse_input(&args.pattern, args.input_format, &binner)
        .with_context(|| format!("Failed to read pattern {}", args.pattern.display()))?;
    let structure = parse_input(&args.structure, args.input_format, &binner)
        .with_context(|| format!("Failed to read structure {}", args.structure.display()))?;

    if verbose {
        eprintln!(
            "{} records read from pattern; {} records read from structure",
            pattern.record_count(),
            structure.record_count()
        );
    }

    let mut engine = MatchEngine::with_config(pattern, structure, config);
    let outcome = engine.run()?;

    if verbose {
        eprintln!(
            "Converged after {} iterations: {} pattern points, {} structure points, {} killed",
            outcome.iterations,
            outcome.pattern_points,
            outcome.structure_points,
            outcome.killed.len()
        );
    }

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Unable to write output file {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match format {
        OutputFormat::Text => write_text_results(&mut out, &outcome)?,
        OutputFormat::Json => write_json_results(&mut out, &outcome, engine.config())?,
        OutputFormat::Tsv => write_tsv_results(&mut out, &outcome)?,
    }
    out.flush()?;

    Ok(())
}

fn write_text_results(out: &mut dyn Write, outcome: &MatchOutcome) -> io::Result<()> {
    for m in &outcome.matches {
        writeln!(
            out,
            "Pattern: {} {:<5} matches Structure: {} {:<5}",
            m.pattern_label,
            m.pattern_resid.as_str(),
            m.structure_label,
            m.structure_resid.as_str()
        )?;
    }
    Ok(())
}

fn write_json_results(
    out: &mut dyn Write,
    outcome: &MatchOutcome,
    config: &MatchConfig,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "config": config,
        "iterations": outcome.iterations,
        "pattern_points": outcome.pattern_points,
        "structure_points": outcome.structure_points,
        "killed": outcome.killed,
        "surviving": outcome.surviving,
        "matches": outcome.matches,
    });

    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn write_tsv_results(out: &mut dyn Write, outcome: &MatchOutcome) -> io::Result<()> {
    writeln!(
        out,
        "pattern_label\tpattern_resid\tstructure_label\tstructure_resid\tscore"
    )?;
    for m in &outcome.matches {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{:.2}",
            m.pattern_label, m.pattern_resid, m.structure_label, m.structure_resid, m.score
        )?;
    }
    Ok(())
}
