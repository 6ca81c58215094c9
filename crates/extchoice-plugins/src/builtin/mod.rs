//! Built-in provider catalog.
//!
//! UIs and CLIs can query the shipped provider kinds without building any
//! provider instance.

#![cfg(feature = "builtin")]

use crate::registry::ProviderRegistry;
use crate::spec::ProviderSpec;

pub mod global;
pub mod textarea;

/// Built-in provider ids shipped with this crate. Append-only.
pub const BUILTIN_PROVIDER_IDS: [&str; 2] = [global::ID, textarea::ID];

/// Specs for all built-in providers, in id order.
pub fn builtin_specs() -> Vec<ProviderSpec> {
    vec![global::spec(), textarea::spec()]
}

/// Register all built-in providers into `registry`.
pub fn register_all(registry: &mut ProviderRegistry) {
    global::register(registry);
    textarea::register(registry);
}
