pub mod cli;
pub mod commands;
pub mod kubectl;
pub mod logging;

use std::io::Write;

use rustkube::resolve_config_path;

use crate::cli::{Cli, Verb};
use crate::commands::App;
use crate::kubectl::Kubectl;

/// Runs one parsed command line against `kubectl`, printing to `out`.
pub fn run(cli: Cli, kubectl: &dyn Kubectl, out: &mut dyn Write) -> anyhow::Result<()> {
    match cli.verb {
        Verb::Config(args) => {
            let locate_config = || resolve_config_path(args.path.as_deref());
            let mut app = App { locate_config: &locate_config, kubectl, out };
            app.dispatch(&args.operation)
        },
    }
}

#[cfg(test)]
mod tests;
