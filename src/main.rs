use clap::Parser;
use tracing_subscriber::EnvFilter;

use lesk_match::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("lesk_match=debug,info")
    } else {
        EnvFilter::new("lesk_match=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Match(args) => {
            cli::matching::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Signatures(args) => {
            cli::signatures::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
