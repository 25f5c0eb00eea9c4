use std::io;

use anyhow::Result;
use clap::Parser;
use kubecli::{
    cli::{normalize_args, Cli},
    kubectl::SystemKubectl,
    logging,
};

fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    logging::setup_for_cli(&cli.verbosity);

    let kubectl = SystemKubectl::default();
    let mut stdout = io::stdout().lock();

    kubecli::run(cli, &kubectl, &mut stdout)
}
