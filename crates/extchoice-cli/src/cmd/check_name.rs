use std::io;

use anyhow::Result;
use serde::Serialize;
use termcolor::{Color, WriteColor};

use extchoice_core::model::{check_name, NameCheck};

use crate::args::Cli;
use crate::output::{self, Render};

#[derive(Debug, Serialize)]
pub struct CheckNameOut {
    pub name: String,
    pub policy: &'static str,
    pub result: NameCheck,
}

impl Render for CheckNameOut {
    fn render(&self, out: &mut dyn WriteColor) -> io::Result<()> {
        match &self.result {
            NameCheck::Ok => {
                output::write_colored(out, Color::Green, "ok")?;
                writeln!(out)
            }
            NameCheck::Error(msg) => {
                output::write_colored(out, Color::Red, "error")?;
                writeln!(out, ": {msg}")
            }
        }
    }
}

pub fn run(cli: &Cli, name: &str) -> Result<()> {
    let policy = super::registry_config(cli)?.name_policy;
    let out = CheckNameOut {
        name: name.to_string(),
        policy: policy.as_str(),
        result: check_name(name, policy),
    };
    output::print(&out)?;
    if !out.result.is_ok() {
        anyhow::bail!("name rejected: {name:?}");
    }
    Ok(())
}
