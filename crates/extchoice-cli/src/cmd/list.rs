use std::io;

use anyhow::Result;
use serde::Serialize;
use termcolor::WriteColor;

use crate::args::Cli;
use crate::output::{self, Render};

#[derive(Debug, Serialize)]
pub struct ListOut {
    pub names: Vec<String>,
}

impl Render for ListOut {
    fn render(&self, out: &mut dyn WriteColor) -> io::Result<()> {
        output::write_lines(out, &self.names)
    }
}

pub fn run(cli: &Cli) -> Result<()> {
    let registry = super::open_registry(cli)?;
    output::print(&ListOut {
        names: registry.list_names(),
    })
}
