//! Command-line surface

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, PartialEq, Eq)]
#[command(name = "esc", version, about = "Open files in emacs by name, line and alias")]
#[command(args_conflicts_with_subcommands = true)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Open files that do not exist yet
    #[arg(short = 'n', long = "new")]
    pub new_files: bool,

    /// Send the files to a running emacs daemon
    #[arg(short, long, conflicts_with = "direct")]
    pub daemon: bool,

    /// Start a foreground emacs even when daemon mode is the default
    #[arg(long)]
    pub direct: bool,

    /// Start emacs with --debug-init
    #[arg(long)]
    pub debug_init: bool,

    /// Print the command instead of running it
    #[arg(long)]
    pub print: bool,

    /// Files, each optionally followed by a line number, or aliases
    #[arg(value_name = "FILE|LINE|ALIAS")]
    pub tokens: Vec<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Save an alias for one or more files
    #[command(visible_alias = "a")]
    Add {
        alias: String,

        #[arg(required = true)]
        files: Vec<String>,

        /// Allow files that do not exist yet
        #[arg(short = 'n', long = "new")]
        new_files: bool,
    },

    /// Delete aliases
    #[command(visible_alias = "d")]
    Delete {
        #[arg(required = true)]
        aliases: Vec<String>,
    },

    /// List all aliases
    #[command(visible_alias = "l")]
    List,

    /// Show the files behind an alias
    #[command(visible_alias = "g")]
    Get { alias: String },

    /// Find aliases whose files match a regular expression
    #[command(visible_alias = "s")]
    Search {
        #[arg(value_name = "REGEXP")]
        pattern: String,
    },

    /// List previous invocations, or rerun one by index (0 is the most recent)
    #[command(visible_alias = "h")]
    History {
        index: Option<usize>,

        /// Show when each invocation was recorded
        #[arg(short, long)]
        verbose: bool,

        /// Print the command instead of running it
        #[arg(long)]
        print: bool,
    },
}
