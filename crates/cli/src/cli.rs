use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(about = "Resolve declarative element metadata from a catalog")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Resolve every element declared by a root element
	Resolve {
		/// Catalog file (TOML)
		catalog: PathBuf,
		/// Name of the root element
		root: String,
		/// Extra element to resolve alongside the tree (repeatable)
		#[arg(long = "ambient", value_name = "NAME")]
		ambient: Vec<String>,
		/// Resolver config file (TOML)
		#[arg(long, value_name = "FILE")]
		config: Option<PathBuf>,
	},
	/// Resolve a single element
	Describe {
		/// Catalog file (TOML)
		catalog: PathBuf,
		/// Name of the element
		name: String,
		/// Resolver config file (TOML)
		#[arg(long, value_name = "FILE")]
		config: Option<PathBuf>,
	},
}
