use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use serde_json::json;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use extchoice_core::ChoiceError;
use extchoice_plugins::ProviderError;

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

/// Plain-text rendering for command results.
pub trait Render {
    fn render(&self, out: &mut dyn WriteColor) -> io::Result<()>;
}

/// Print `value` as JSON in `--json` mode, otherwise as text.
pub fn print<T: Serialize + Render>(value: &T) -> anyhow::Result<()> {
    if is_json() {
        let s = serde_json::to_string_pretty(value)?;
        println!("{s}");
        return Ok(());
    }
    let mut out = stdout();
    value.render(&mut out)?;
    out.flush()?;
    Ok(())
}

pub fn eprintln_line(msg: &str) {
    let _ = writeln!(io::stderr(), "{msg}");
}

/// Short code for a failed command: the typed error's own code, else `error`.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<ChoiceError>() {
        return e.code();
    }
    if let Some(e) = err.downcast_ref::<ProviderError>() {
        return e.code();
    }
    "error"
}

/// Report a failed command on stderr; `{"error": {code, message}}` in `--json` mode.
pub fn print_error(err: &anyhow::Error) {
    if is_json() {
        let v = json!({ "error": { "code": error_code(err), "message": format!("{err:#}") } });
        eprintln_line(&v.to_string());
    } else {
        eprintln_line(&format!("error: {err:#}"));
    }
}

pub fn stdout() -> StandardStream {
    StandardStream::stdout(ColorChoice::Auto)
}

/// Write `text` in bold `color`, then reset.
pub fn write_colored(out: &mut dyn WriteColor, color: Color, text: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{text}")?;
    out.reset()
}

/// One value per line.
pub fn write_lines(out: &mut dyn WriteColor, lines: &[String]) -> io::Result<()> {
    for l in lines {
        writeln!(out, "{l}")?;
    }
    Ok(())
}
