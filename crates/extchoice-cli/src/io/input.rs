use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

/// Read a JSON document from a file, or from stdin when `input` is `-`.
pub fn read_json(input: &str) -> Result<serde_json::Value> {
    let raw = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        buf
    } else {
        read_file(input)?
    };
    serde_json::from_str(&raw).map_err(|e| anyhow!("invalid json in {input}: {e}"))
}

fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
