use std::path::PathBuf;

use clap::Args;

use crate::cli::{parse_input, InputFormat, OutputFormat};
use crate::core::record::{DistanceBinner, DEFAULT_BIN_WIDTH};
use crate::matching::signature::{PointSignature, SignatureSet};

#[derive(Args)]
pub struct SignaturesArgs {
    /// Input file (points or distance table)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Distance bin size
    #[arg(short = 'd', long, default_value_t = DEFAULT_BIN_WIDTH)]
    pub bin_width: f64,

    /// Swap positive and negative charges
    #[arg(short, long)]
    pub invert: bool,

    /// Input format (auto-detected by default)
    #[arg(long)]
    pub input_format: Option<InputFormat>,
}

/// Execute signatures subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be parsed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SignaturesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let binner = DistanceBinner::new(args.bin_width);
    let side = parse_input(&args.input, args.input_format, &binner)?;
    let signatures = SignatureSet::build(&side, args.invert);

    if verbose {
        eprintln!(
            "{} records, {} points (bin width {})",
            side.record_count(),
            signatures.len(),
            binner.width()
        );
    }

    match format {
        OutputFormat::Text => {
            for s in &signatures {
                println!(
                    "{} {:<5} Property: {}; Distance: {}",
                    s.label,
                    s.resid.as_str(),
                    s.properties,
                    s.distance_bits
                );
            }
        }
        OutputFormat::Json => {
            let points: Vec<_> = signatures.iter().collect();
            println!("{}", serde_json::to_string_pretty(&points)?);
        }
        OutputFormat::Tsv => {
            println!("label\tresid\tproperties\tdistance_bits\tproperty_names\tbins");
            for s in &signatures {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    s.label,
                    s.resid,
                    s.properties,
                    s.distance_bits,
                    property_names(s),
                    bin_list(s)
                );
            }
        }
    }

    Ok(())
}

/// Comma-separated property names, or `-` when none are set
fn property_names(signature: &PointSignature) -> String {
    let names: Vec<String> = signature.properties.iter().map(|p| p.to_string()).collect();
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(",")
    }
}

/// Comma-separated set bins, or `-` when the bitset is empty
fn bin_list(signature: &PointSignature) -> String {
    let bins: Vec<String> = signature.distance_bits.bins().map(|b| b.to_string()).collect();
    if bins.is_empty() {
        "-".to_string()
    } else {
        bins.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PropertySet, Resid};
    use crate::matching::signature::DistanceBits;

    #[test]
    fn test_tsv_columns() {
        let signature = PointSignature {
            resid: Resid::new("A12"),
            label: "LYS".to_string(),
            properties: PropertySet::classify("LYS"),
            distance_bits: DistanceBits::from_bins(&[3, 7]),
        };
        assert_eq!(property_names(&signature), "positive,hydrophilic");
        assert_eq!(bin_list(&signature), "3,7");

        let empty = PointSignature {
            properties: PropertySet::empty(),
            distance_bits: DistanceBits::empty(),
            ..signature
        };
        assert_eq!(property_names(&empty), "-");
        assert_eq!(bin_list(&empty), "-");
    }
}
