use std::io;

use anyhow::Result;
use serde::Serialize;
use termcolor::{Color, WriteColor};

use extchoice_core::registry::{Persistence, ReplaceReport};
use extchoice_core::ChoiceError;

use crate::args::Cli;
use crate::io::{input, submission};
use crate::output::{self, Render};

#[derive(Debug, Serialize)]
pub struct ConfigureOut {
    pub submitted: usize,
    pub names: Vec<String>,
    pub report: ReplaceReport,
}

impl Render for ConfigureOut {
    fn render(&self, out: &mut dyn WriteColor) -> io::Result<()> {
        writeln!(
            out,
            "kept {} of {} submitted choice sets",
            self.report.kept, self.submitted
        )?;
        for d in &self.report.dropped {
            output::write_colored(out, Color::Yellow, "dropped")?;
            writeln!(out, " #{} {:?}: {}", d.index, d.name, d.reason)?;
        }
        for name in &self.report.duplicates {
            output::write_colored(out, Color::Yellow, "duplicate")?;
            writeln!(out, " {name:?}: lookups use the first entry")?;
        }
        match &self.report.persistence {
            Persistence::Saved => writeln!(out, "saved"),
            Persistence::Detached => writeln!(out, "not persisted"),
            Persistence::Failed { message } => {
                output::write_colored(out, Color::Red, "save failed")?;
                writeln!(out, ": {message}")
            }
        }
    }
}

pub fn run(cli: &Cli, file: &str) -> Result<()> {
    let candidates = submission::parse_submission(input::read_json(file)?)?;
    let submitted = candidates.len();

    let registry = super::open_registry(cli)?;
    let report = registry.replace_all(candidates);

    let save_error = match &report.persistence {
        Persistence::Failed { message } => Some(message.clone()),
        _ => None,
    };
    output::print(&ConfigureOut {
        submitted,
        names: registry.list_names(),
        report,
    })?;

    match save_error {
        Some(message) => {
            output::eprintln_line("warning: the new choice sets are not persisted");
            Err(ChoiceError::store(message).into())
        }
        None => Ok(()),
    }
}
