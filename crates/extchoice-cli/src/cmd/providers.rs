use std::io;

use anyhow::Result;
use serde::Serialize;
use termcolor::{Color, WriteColor};

use extchoice_plugins::builtin;
use extchoice_plugins::{ProviderRegistry, ProviderSpec};

use crate::output::{self, Render};

#[derive(Debug, Serialize)]
pub struct ProvidersOut {
    pub providers: Vec<ProviderSpec>,
}

impl Render for ProvidersOut {
    fn render(&self, out: &mut dyn WriteColor) -> io::Result<()> {
        for p in &self.providers {
            output::write_colored(out, Color::Green, p.id.as_str())?;
            writeln!(out, "  {}", p.display_name)?;
            if !p.description.is_empty() {
                writeln!(out, "    {}", p.description)?;
            }
        }
        Ok(())
    }
}

pub fn run() -> Result<()> {
    let mut reg = ProviderRegistry::new();
    builtin::register_all(&mut reg);
    output::print(&ProvidersOut {
        providers: reg.list(),
    })
}
