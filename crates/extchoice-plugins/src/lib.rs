//! Choice list providers for extchoice.
//!
//! A job parameter draws its choices from a `ChoiceListProvider`. Provider
//! kinds are catalogued in a `ProviderRegistry`; a job stores a
//! `ProviderBinding` (provider id plus settings) and the registry turns it
//! into a provider on demand.

pub mod provider;
pub mod registry;
pub mod spec;

#[cfg(feature = "builtin")]
pub mod builtin;

pub use crate::provider::{
    ChoiceListProvider, ProviderBinding, ProviderContext, ProviderError, ProviderFactory,
};
pub use crate::registry::ProviderRegistry;
pub use crate::spec::{ProviderId, ProviderSpec};
