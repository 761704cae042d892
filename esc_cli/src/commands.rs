//! Dispatch of parsed command lines onto the orchestrator

use crate::cli::{Cli, Command};
use esc_core::orchestrator::ShortcutResult;
use esc_core::{FileSystem, Invocation, OpenOptions, Orchestrator, RenderMode};

/// What the binary should do once an operation succeeded
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Lines for stdout
    pub lines: Vec<String>,
    /// Non-fatal problems for stderr
    pub warnings: Vec<String>,
    /// Invocation to run in the foreground
    pub launch: Option<Invocation>,
}

impl Outcome {
    fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    // Directory changes only make sense to the calling shell, so they are printed.
    fn deliver(invocation: Invocation, print: bool) -> Self {
        if print || invocation.is_change_directory() {
            Self::lines(vec![invocation.to_shell_string()])
        } else {
            Self {
                launch: Some(invocation),
                ..Self::default()
            }
        }
    }
}

pub fn dispatch<F: FileSystem>(
    cli: Cli,
    orchestrator: &mut Orchestrator<F>,
    daemon_by_default: bool,
) -> ShortcutResult<Outcome> {
    let Some(command) = cli.command else {
        let options = OpenOptions {
            allow_new_files: cli.new_files,
            mode: render_mode(cli.daemon, cli.direct, daemon_by_default),
            debug_init: cli.debug_init,
        };
        let invocation = orchestrator.open(&cli.tokens, &options)?;
        return Ok(Outcome::deliver(invocation, cli.print));
    };

    match command {
        Command::Add {
            alias,
            files,
            new_files,
        } => {
            orchestrator.add_alias(&alias, &files, new_files)?;
            Ok(Outcome::default())
        }
        Command::Delete { aliases } => {
            let report = orchestrator.delete_aliases(&aliases)?;
            Ok(Outcome {
                warnings: report.warnings(),
                ..Outcome::default()
            })
        }
        Command::List => Ok(Outcome::lines(orchestrator.list_aliases())),
        Command::Get { alias } => Ok(Outcome::lines(vec![orchestrator.get_alias(&alias)?])),
        Command::Search { pattern } => Ok(Outcome::lines(orchestrator.search_aliases(&pattern)?)),
        Command::History {
            index: None,
            verbose,
            ..
        } => Ok(Outcome::lines(orchestrator.history_lines(verbose))),
        Command::History {
            index: Some(index),
            print,
            ..
        } => {
            let invocation = orchestrator.replay(index)?;
            Ok(Outcome::deliver(invocation, print))
        }
    }
}

fn render_mode(daemon: bool, direct: bool, daemon_by_default: bool) -> RenderMode {
    if daemon || (daemon_by_default && !direct) {
        RenderMode::Daemon
    } else {
        RenderMode::Direct
    }
}
