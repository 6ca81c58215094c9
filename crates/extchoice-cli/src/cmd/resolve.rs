use std::io;

use anyhow::{Context, Result};
use serde::Serialize;
use termcolor::WriteColor;

use extchoice_plugins::builtin;
use extchoice_plugins::{ProviderBinding, ProviderContext, ProviderRegistry};

use crate::args::Cli;
use crate::io::input;
use crate::output::{self, Render};

#[derive(Debug, Serialize)]
pub struct ResolveOut {
    pub provider: String,
    pub display_name: String,
    pub choices: Vec<String>,
}

impl Render for ResolveOut {
    fn render(&self, out: &mut dyn WriteColor) -> io::Result<()> {
        output::write_lines(out, &self.choices)
    }
}

pub fn run(cli: &Cli, binding_arg: &str) -> Result<()> {
    let raw = input::read_json(binding_arg)?;
    let binding: ProviderBinding =
        serde_json::from_value(raw).context("binding must be {\"provider\": ..., \"config\": ...}")?;

    let mut reg = ProviderRegistry::new();
    builtin::register_all(&mut reg);

    let ctx = ProviderContext::new(super::open_registry(cli)?);
    let provider = reg.build(&binding, &ctx)?;

    output::print(&ResolveOut {
        display_name: reg
            .display_name(&binding.provider)
            .unwrap_or_default()
            .to_string(),
        provider: binding.provider,
        choices: provider.choice_list(),
    })
}
