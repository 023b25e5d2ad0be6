//! Subcommand execution.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use stencil_metadata::{CanonicalDescriptor, Catalog, DeclarationEntry, Identity, MetadataResolver, ResolverConfig, Services};
use tracing::info;

use crate::cli::Command;

/// Executes `command`, writing JSON to `out`.
pub fn run(command: Command, out: &mut impl Write) -> Result<()> {
	match command {
		Command::Resolve {
			catalog,
			root,
			ambient,
			config,
		} => {
			let (catalog, resolver) = open(&catalog, config.as_deref())?;
			let root = lookup(&catalog, &root)?;
			let extras = ambient
				.iter()
				.map(|name| lookup(&catalog, name).map(DeclarationEntry::from))
				.collect::<Result<Vec<_>>>()?;

			let mut descs = resolver.resolve_tree(&root, Some(extras.as_slice()))?;
			descs.sort_by(|a, b| a.type_.name.cmp(&b.type_.name));
			info!(root = %root, count = descs.len(), "resolved declaration tree");

			let view: Vec<&CanonicalDescriptor> = descs.iter().map(Arc::as_ref).collect();
			write_json(out, &view)
		}
		Command::Describe { catalog, name, config } => {
			let (catalog, resolver) = open(&catalog, config.as_deref())?;
			let identity = lookup(&catalog, &name)?;
			let desc = resolver.resolve(&identity)?;
			write_json(out, desc.as_ref())
		}
	}
}

fn open(catalog: &Path, config: Option<&Path>) -> Result<(Arc<Catalog>, MetadataResolver)> {
	let config = match config {
		Some(path) => ResolverConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
		None => ResolverConfig::default(),
	};
	let catalog = Arc::new(Catalog::load(catalog).with_context(|| format!("loading catalog {}", catalog.display()))?);
	info!(elements = catalog.len(), "catalog loaded");

	let resolver = MetadataResolver::with_config(Services::from_shared(Arc::clone(&catalog)), config)?;
	Ok((catalog, resolver))
}

fn lookup(catalog: &Catalog, name: &str) -> Result<Identity> {
	catalog
		.identity(name)
		.cloned()
		.ok_or_else(|| anyhow!("no element named '{name}' in catalog"))
}

fn write_json(out: &mut impl Write, value: &impl serde::Serialize) -> Result<()> {
	serde_json::to_writer_pretty(&mut *out, value)?;
	writeln!(out)?;
	Ok(())
}

#[cfg(test)]
mod tests;
