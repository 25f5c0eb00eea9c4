use std::{ffi::OsString, path::PathBuf};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "kubecli",
    about = "inspect and prune a kubeconfig, delegating edits to kubectl",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub verb: Verb,

    #[arg(short, long, default_value = "warn", global = true)]
    pub verbosity: String,
}

#[derive(Subcommand, Debug)]
pub enum Verb {
    #[command(about = "work with the entries of a kubeconfig file")]
    Config(ConfigArgs),
}

#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    #[arg(
        long,
        value_name = "FILE",
        long_help = "path of kube config file, defaults to $kube-config-path and then $HOME/.kube/config"
    )]
    pub path: Option<PathBuf>,

    #[command(subcommand)]
    pub operation: Operation,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    #[command(about = "Display the current-context")]
    CurrentContext,

    #[command(about = "Display clusters defined in the kubeconfig")]
    GetClusters,

    #[command(about = "Display contexts defined in the kubeconfig")]
    GetContexts,

    #[command(about = "Display users defined in the kubeconfig")]
    GetUsers,

    #[command(about = "Set the current-context in the kubeconfig")]
    UseContext {
        #[arg(value_name = "NAME")]
        name: String,
    },

    #[command(about = "Set the namespace of the current-context")]
    Namespace {
        #[arg(value_name = "NAMESPACE")]
        namespace: String,
    },

    #[command(about = "Delete every cluster whose name matches one of the PATTERNs")]
    DeleteCluster {
        #[arg(
            value_name = "PATTERN",
            required = true,
            num_args = 1..,
            allow_hyphen_values = true
        )]
        patterns: Vec<String>,
    },

    #[command(about = "Delete every context whose name matches one of the PATTERNs")]
    DeleteContext {
        #[arg(
            value_name = "PATTERN",
            required = true,
            num_args = 1..,
            allow_hyphen_values = true
        )]
        patterns: Vec<String>,
    },

    #[command(about = "Delete every user whose name matches one of the PATTERNs")]
    DeleteUser {
        #[arg(
            value_name = "PATTERN",
            required = true,
            num_args = 1..,
            allow_hyphen_values = true
        )]
        patterns: Vec<String>,
    },
}

/// Operations whose operands are regexes; any of them may look like a flag.
const PATTERN_OPERATIONS: [&str; 3] = ["delete-cluster", "delete-context", "delete-user"];

/// Rewrites the single-dash long options `-path` and `-help` into the
/// `--path` and `--help` clap understands. Only the options ahead of the
/// operation are touched; operands are passed through as typed, and a `--`
/// is placed after a delete operation so a pattern like `-v` stays a pattern.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut normalized: Vec<OsString> = args.next().into_iter().collect();
    let mut positionals = 0;
    let mut takes_value = false;

    for arg in args.by_ref() {
        if takes_value {
            takes_value = false;
            normalized.push(arg);
            continue;
        }

        let replacement = match arg.to_str() {
            Some("-path") => {
                takes_value = true;
                Some(OsString::from("--path"))
            },
            Some(s) if s.starts_with("-path=") => Some(OsString::from(format!("-{s}"))),
            Some("-help") => Some(OsString::from("--help")),
            Some("--path" | "-v" | "--verbosity") => {
                takes_value = true;
                None
            },
            Some("--") => {
                positionals = 2;
                None
            },
            Some(s) if s.starts_with('-') => None,
            _ => {
                positionals += 1;
                None
            },
        };
        let arg = replacement.unwrap_or(arg);
        normalized.push(arg);

        // the verb, then the operation; everything after belongs to the operation.
        // `--` ends option parsing outright.
        if positionals == 2 {
            break;
        }
    }

    let ends_at_pattern_operation = normalized
        .last()
        .and_then(|arg| arg.to_str())
        .is_some_and(|arg| PATTERN_OPERATIONS.contains(&arg));
    let mut args = args.peekable();
    if ends_at_pattern_operation && args.peek().is_some_and(|arg| arg != "--") {
        normalized.push(OsString::from("--"));
    }

    normalized.extend(args);
    normalized
}
