//! The plugin contract.

use std::path::Path;

use chassis_core::{ConstructionError, SettingsError, SettingsMap};

/// The two operations every plugin type provides.
///
/// The contract is structural: any type implementing `Plugin` plus a
/// capability trait ([`LogPlugin`](chassis_core::LogPlugin),
/// [`CachePlugin`](chassis_core::CachePlugin)) can be registered; there is
/// no base type to inherit from.
///
/// Settings flow through a two-stage pipeline: the untyped
/// [`SettingsMap`] section from the merged configuration is derived into the
/// plugin's own [`Settings`](Plugin::Settings) type exactly once, at
/// resolution time, and only the typed value reaches
/// [`construct`](Plugin::construct).
pub trait Plugin: Sized + Send + Sync + 'static {
    /// The plugin's validated settings type.
    type Settings: Send + 'static;

    /// Derives typed settings from the raw settings section.
    ///
    /// Pure; performs no I/O. Relative paths in `raw` resolve against
    /// `cwd`, which is absolute by the configuration invariant. Fails with
    /// [`SettingsError`] on missing or empty required fields and violated
    /// constraints.
    fn derive_settings(cwd: &Path, raw: &SettingsMap) -> Result<Self::Settings, SettingsError>;

    /// Constructs a live instance from validated settings.
    ///
    /// This is where side effects happen (creating directories, opening
    /// files). Fails with [`ConstructionError`] on I/O failure.
    fn construct(settings: Self::Settings) -> Result<Self, ConstructionError>;
}
