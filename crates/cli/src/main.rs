//! `stencil` command-line tool.
//!
//! Loads a TOML element catalog, resolves descriptors through
//! [`stencil_metadata::MetadataResolver`] and prints them as JSON on stdout.
//! Logs go to stderr.

mod cli;
mod run;

use clap::Parser;

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let mut stdout = std::io::stdout().lock();
	run::run(cli.command, &mut stdout)
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("STENCIL_LOG").unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("stencil_metadata=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();
}
