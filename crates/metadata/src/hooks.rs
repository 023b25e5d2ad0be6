use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle callbacks an element may implement.
///
/// [`LifecycleHook::ALL`] is the probe order; descriptors list hooks in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LifecycleHook {
	OnInit,
	OnDestroy,
	DoCheck,
	OnChanges,
	AfterContentInit,
	AfterContentChecked,
	AfterViewInit,
	AfterViewChecked,
}

impl LifecycleHook {
	/// Every hook, in declaration order.
	pub const ALL: [LifecycleHook; 8] = [
		Self::OnInit,
		Self::OnDestroy,
		Self::DoCheck,
		Self::OnChanges,
		Self::AfterContentInit,
		Self::AfterContentChecked,
		Self::AfterViewInit,
		Self::AfterViewChecked,
	];

	/// Returns the hook's name as written in catalogs.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::OnInit => "OnInit",
			Self::OnDestroy => "OnDestroy",
			Self::DoCheck => "DoCheck",
			Self::OnChanges => "OnChanges",
			Self::AfterContentInit => "AfterContentInit",
			Self::AfterContentChecked => "AfterContentChecked",
			Self::AfterViewInit => "AfterViewInit",
			Self::AfterViewChecked => "AfterViewChecked",
		}
	}
}

impl fmt::Display for LifecycleHook {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
