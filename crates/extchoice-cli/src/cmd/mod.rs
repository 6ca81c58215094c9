use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use extchoice_core::config::{validate_config, DuplicatePolicy, NamePolicy, RegistryConfig};
use extchoice_core::registry::ChoiceRegistry;
use extchoice_store::{open_store, StoreBackend, StoreConfig};

use crate::args::{Cli, Command};

mod check_name;
mod choices;
mod configure;
mod list;
mod providers;
mod resolve;
mod show;

pub fn dispatch(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::List => list::run(&cli),
        Command::Show { name } => show::run(&cli, name),
        Command::Choices { name } => choices::run(&cli, name),
        Command::Configure { file } => configure::run(&cli, file),
        Command::Resolve { binding } => resolve::run(&cli, binding),
        Command::Providers => providers::run(),
        Command::CheckName { name } => check_name::run(&cli, name),
    }
}

pub(crate) fn registry_config(cli: &Cli) -> Result<RegistryConfig> {
    let cfg = RegistryConfig {
        name_policy: NamePolicy::parse(&cli.name_policy)?,
        duplicate_policy: DuplicatePolicy::parse(&cli.duplicates)?,
        max_name_len: cli.max_name_len,
    };
    validate_config(&cfg)?;
    Ok(cfg)
}

pub(crate) fn store_config(cli: &Cli) -> Result<StoreConfig> {
    let cfg = StoreConfig {
        root: PathBuf::from(&cli.store_root),
        backend: StoreBackend::parse(&cli.backend)?,
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Open the store named on the command line and restore the registry from it.
pub(crate) fn open_registry(cli: &Cli) -> Result<Arc<ChoiceRegistry>> {
    let store = open_store(&store_config(cli)?)?;
    tracing::debug!(store = %store.describe(), "opening choice registry");
    let registry = ChoiceRegistry::open(store, registry_config(cli)?)?;
    Ok(Arc::new(registry))
}
