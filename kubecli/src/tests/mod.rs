mod kubectl_test;

use std::cell::RefCell;

use assert_fs::prelude::*;
use assert_fs::NamedTempFile;
use clap::Parser;
use rstest::*;

use super::*;
use crate::cli::normalize_args;
use crate::commands::OUTPUT_PREFIX;
use crate::kubectl::KubectlError;

/// Records every argv it is handed. Call number `fail_on` (1-based) fails the
/// way a non-zero kubectl exit would.
#[derive(Default)]
struct RecordingKubectl {
    calls: RefCell<Vec<Vec<String>>>,
    fail_on: Option<usize>,
}

impl RecordingKubectl {
    fn failing_on(call: usize) -> Self {
        Self { fail_on: Some(call), ..Default::default() }
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }
}

impl Kubectl for RecordingKubectl {
    fn run(&self, args: &[String]) -> Result<String, KubectlError> {
        let mut calls = self.calls.borrow_mut();
        calls.push(args.to_vec());
        if self.fail_on == Some(calls.len()) {
            return Err(KubectlError::Failed {
                program: "kubectl".into(),
                args: args.to_vec(),
                status: "exit status: 1".into(),
                output: "error: boom".into(),
            });
        }
        Ok(String::new())
    }
}

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

fn kube_config_file(contents: &str) -> NamedTempFile {
    let file = NamedTempFile::new("config").unwrap();
    file.write_str(contents).unwrap();
    file
}

/// Parses `args` the way `main` does (program name included) and runs them
/// against `kubectl`, returning the output lines with their prefix removed.
fn run_cli(args: &[&str], kubectl: &RecordingKubectl) -> anyhow::Result<Vec<String>> {
    let cli = Cli::try_parse_from(normalize_args(args.iter().copied()))?;
    let mut out = Vec::new();
    run(cli, kubectl, &mut out)?;

    let out = String::from_utf8(out)?;
    Ok(out
        .lines()
        .map(|line| line.strip_prefix(OUTPUT_PREFIX).unwrap_or(line).to_owned())
        .collect())
}
