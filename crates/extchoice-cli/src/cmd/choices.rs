use std::io;

use anyhow::Result;
use serde::Serialize;
use termcolor::WriteColor;

use crate::args::Cli;
use crate::output::{self, Render};

#[derive(Debug, Serialize)]
pub struct ChoicesOut {
    pub name: String,
    pub choices: Vec<String>,
}

impl Render for ChoicesOut {
    fn render(&self, out: &mut dyn WriteColor) -> io::Result<()> {
        output::write_lines(out, &self.choices)
    }
}

pub fn run(cli: &Cli, name: &str) -> Result<()> {
    let registry = super::open_registry(cli)?;
    output::print(&ChoicesOut {
        name: name.to_string(),
        choices: registry.get_choices(name),
    })
}
