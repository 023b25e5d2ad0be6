//! Resolver configuration.
//!
//! Read from the optional `[resolver]` table of a TOML file:
//!
//! ```toml
//! [resolver]
//! module_suffix = ".js"
//! max_forward_depth = 32
//! max_nesting_depth = 64
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::tree::TreeLimits;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The file could not be read.
	#[error("failed to read {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},
	/// The file is not valid TOML or has unknown keys.
	#[error("invalid config: {0}")]
	Parse(#[from] toml::de::Error),
	/// A value is out of range.
	#[error("invalid config value for `{field}`: {reason}")]
	Invalid { field: &'static str, reason: &'static str },
}

/// Tunables for [`crate::MetadataResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
	/// Appended to `package:<module_id>` locators.
	pub module_suffix: String,
	/// Forward-reference chain limit.
	pub max_forward_depth: usize,
	/// Declaration-tree nesting limit.
	pub max_nesting_depth: usize,
}

impl Default for ResolverConfig {
	fn default() -> Self {
		let limits = TreeLimits::default();
		Self {
			module_suffix: String::new(),
			max_forward_depth: limits.max_forward_depth,
			max_nesting_depth: limits.max_nesting_depth,
		}
	}
}

impl ResolverConfig {
	/// Parses a config document; a missing `[resolver]` table yields defaults.
	pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
		let file: ConfigFile = toml::from_str(content)?;
		file.resolver.validate()?;
		Ok(file.resolver)
	}

	/// Reads and parses a config file.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.display().to_string(),
			source,
		})?;
		Self::from_toml_str(&content)
	}

	/// Checks value ranges.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.max_forward_depth == 0 {
			return Err(ConfigError::Invalid {
				field: "max_forward_depth",
				reason: "must be at least 1",
			});
		}
		if self.max_nesting_depth == 0 {
			return Err(ConfigError::Invalid {
				field: "max_nesting_depth",
				reason: "must be at least 1",
			});
		}
		Ok(())
	}

	/// Returns the tree-walk limits.
	pub fn tree_limits(&self) -> TreeLimits {
		TreeLimits {
			max_forward_depth: self.max_forward_depth,
			max_nesting_depth: self.max_nesting_depth,
		}
	}

	/// Formats the locator for an explicit module identifier.
	pub fn package_locator(&self, module_id: &str) -> String {
		format!("package:{module_id}{}", self.module_suffix)
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
	resolver: ResolverConfig,
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn empty_document_gives_defaults() {
		assert_eq!(ResolverConfig::from_toml_str("").unwrap(), ResolverConfig::default());
	}

	#[test]
	fn partial_table_keeps_other_defaults() {
		let config = ResolverConfig::from_toml_str("[resolver]\nmodule_suffix = \".dart\"\n").unwrap();
		assert_eq!(config.module_suffix, ".dart");
		assert_eq!(config.max_forward_depth, 32);
		assert_eq!(config.package_locator("pkg/app"), "package:pkg/app.dart");
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let err = ResolverConfig::from_toml_str("[resolver]\ncache_size = 10\n").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)), "{err}");
	}

	#[test]
	fn zero_limits_are_rejected() {
		let err = ResolverConfig::from_toml_str("[resolver]\nmax_nesting_depth = 0\n").unwrap_err();
		assert!(matches!(err, ConfigError::Invalid { field: "max_nesting_depth", .. }));
	}

	#[test]
	fn loads_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[resolver]\nmax_forward_depth = 4").unwrap();

		let config = ResolverConfig::load(file.path()).unwrap();
		assert_eq!(config.tree_limits().max_forward_depth, 4);
		assert_eq!(config.tree_limits().max_nesting_depth, 64);
	}

	#[test]
	fn missing_file_reports_path() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("absent.toml");
		let err = ResolverConfig::load(&path).unwrap_err();
		assert!(err.to_string().contains("absent.toml"));
	}
}
