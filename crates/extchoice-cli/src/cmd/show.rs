use std::io;

use anyhow::Result;
use serde::Serialize;
use termcolor::{Color, WriteColor};

use extchoice_core::model::ChoiceSetEntry;
use extchoice_core::ChoiceError;

use crate::args::Cli;
use crate::output::{self, Render};

#[derive(Debug, Serialize)]
pub struct ShowOut {
    pub entry: ChoiceSetEntry,
}

impl Render for ShowOut {
    fn render(&self, out: &mut dyn WriteColor) -> io::Result<()> {
        output::write_colored(out, Color::Cyan, &self.entry.name)?;
        writeln!(out, " ({} choices)", self.entry.choices.len())?;
        for c in &self.entry.choices {
            writeln!(out, "  {c}")?;
        }
        Ok(())
    }
}

pub fn run(cli: &Cli, name: &str) -> Result<()> {
    let registry = super::open_registry(cli)?;
    let entry = registry
        .find_entry(name)
        .ok_or_else(|| ChoiceError::not_found(format!("choice set {name}")))?;
    output::print(&ShowOut { entry })
}
