use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "extchoice", version, about = "Manage global choice sets for job parameters")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Store root directory.
    #[arg(long, global = true, env = "EXTCHOICE_STORE", default_value = ".extchoice")]
    pub store_root: String,

    /// Store backend: fs|sqlite|memory
    #[arg(long, global = true, default_value = "fs")]
    pub backend: String,

    /// Entry name policy: identifier|non-empty
    #[arg(long, global = true, default_value = "identifier")]
    pub name_policy: String,

    /// Duplicate name policy: keep|drop-later
    #[arg(long, global = true, default_value = "keep")]
    pub duplicates: String,

    /// Longest accepted choice set name, in characters.
    #[arg(long, global = true, default_value_t = 256)]
    pub max_name_len: usize,

    /// More log output on stderr (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the names of all choice sets.
    List,

    /// Show one choice set.
    Show { name: String },

    /// Print the choices of a set (empty if the set does not exist).
    Choices { name: String },

    /// Replace all choice sets from a submission file (JSON).
    Configure {
        /// File with an array of entries or `{ "entries": [...] }`; `-` reads stdin.
        file: String,
    },

    /// Build the provider a job binding points at and print its choices.
    Resolve {
        /// Binding JSON file: `{ "provider": "...", "config": { ... } }`.
        binding: String,
    },

    /// List available provider kinds.
    Providers,

    /// Check whether a name would be accepted for a choice set.
    CheckName { name: String },
}
