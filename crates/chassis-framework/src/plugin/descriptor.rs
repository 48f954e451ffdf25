//! Plugin descriptor: the registry entry for one plugin type.

use std::any::Any;
use std::path::Path;

use chassis_core::{ConstructionError, SettingsError, SettingsMap};

use super::contract::Plugin;

/// The opaque handle a resolved plugin travels in.
///
/// The generic [`Factory`](super::Factory) returns instances behind `Any`;
/// typed sub-factories downcast to the capability box they registered
/// (`Box<dyn LogPlugin>`, `Box<dyn CachePlugin>`). Ownership passes to the
/// service container, which keeps the instance for the life of the process.
pub type PluginInstance = Box<dyn Any + Send + Sync>;

/// Internal two-stage failure, attributed by the factory at resolve time.
pub(crate) enum ResolveError {
    Settings(SettingsError),
    Construction(ConstructionError),
}

type ResolveFn = Box<dyn Fn(&Path, &SettingsMap) -> Result<PluginInstance, ResolveError> + Send + Sync>;

/// Registry entry pairing a plugin type's settings derivation and
/// construction behind one type-erased resolver.
///
/// Descriptors are immutable once registered. Build one with
/// [`PluginDescriptor::new`], choosing how the constructed instance is
/// wrapped into the opaque [`PluginInstance`]; the typed sub-factories wrap
/// as capability boxes so they can downcast on the way out.
pub struct PluginDescriptor {
    resolve: ResolveFn,
}

impl PluginDescriptor {
    /// Creates a descriptor for `P`, wrapping constructed instances with
    /// `wrap`.
    pub fn new<P: Plugin>(wrap: fn(P) -> PluginInstance) -> Self {
        Self {
            resolve: Box::new(move |cwd, raw| {
                let settings = P::derive_settings(cwd, raw).map_err(ResolveError::Settings)?;
                let plugin = P::construct(settings).map_err(ResolveError::Construction)?;
                Ok(wrap(plugin))
            }),
        }
    }

    /// Creates a descriptor whose instances stay boxed as the concrete type.
    ///
    /// Useful for plugins resolved through the generic [`Factory`] directly;
    /// capability factories will reject such instances as not theirs.
    ///
    /// [`Factory`]: super::Factory
    pub fn opaque<P: Plugin>() -> Self {
        Self::new::<P>(|plugin| Box::new(plugin))
    }

    /// Runs both contract stages for this descriptor.
    pub(crate) fn resolve(
        &self,
        cwd: &Path,
        raw: &SettingsMap,
    ) -> Result<PluginInstance, ResolveError> {
        (self.resolve)(cwd, raw)
    }
}

impl std::fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDescriptor").finish_non_exhaustive()
    }
}
