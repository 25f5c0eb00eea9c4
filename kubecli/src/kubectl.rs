use std::{
    fmt, io,
    process::{Command, Stdio},
};

use thiserror::Error;
use tracing::debug;

pub const KUBECTL: &str = "kubectl";

#[derive(Debug, Error)]
pub enum KubectlError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} {} failed ({status}): {output}", .args.join(" "))]
    Failed {
        program: String,
        args: Vec<String>,
        status: String,
        output: String,
    },

    #[error("refusing to pass {0:?} to kubectl: it would be read as a flag")]
    FlagLike(String),

    #[error("the kube config has no current-context to modify")]
    NoCurrentContext,
}

/// Something that can run `kubectl` with a list of arguments and hand back
/// its combined output.
pub trait Kubectl {
    fn run(&self, args: &[String]) -> Result<String, KubectlError>;
}

/// Runs the real binary found on `PATH`, inheriting the process environment.
#[derive(Debug, Clone)]
pub struct SystemKubectl {
    program: String,
}

impl SystemKubectl {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl Default for SystemKubectl {
    fn default() -> Self {
        Self::new(KUBECTL)
    }
}

impl Kubectl for SystemKubectl {
    fn run(&self, args: &[String]) -> Result<String, KubectlError> {
        debug!(program = %self.program, ?args, "running");

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| KubectlError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // stdout then stderr; the two streams are not interleaved.
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(KubectlError::Failed {
                program: self.program.clone(),
                args: args.to_vec(),
                status: output.status.to_string(),
                output: combined.trim_end().to_owned(),
            });
        }

        Ok(combined)
    }
}

/// Top-level kubeconfig sections that `kubectl config unset` can remove
/// entries from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Clusters,
    Contexts,
    Users,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Clusters => "clusters",
            Section::Contexts => "contexts",
            Section::Users => "users",
        }
    }

    /// Property path naming one entry, e.g. `contexts.dev`.
    pub fn key(self, name: &str) -> String {
        format!("{self}.{name}")
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn positional(arg: &str) -> Result<String, KubectlError> {
    if arg.starts_with('-') {
        return Err(KubectlError::FlagLike(arg.to_owned()));
    }
    Ok(arg.to_owned())
}

pub fn unset_args(section: Section, name: &str) -> Vec<String> {
    vec!["config".into(), "unset".into(), section.key(name)]
}

pub fn use_context_args(name: &str) -> Result<Vec<String>, KubectlError> {
    Ok(vec!["config".into(), "use-context".into(), positional(name)?])
}

pub fn set_namespace_args(context: &str, namespace: &str) -> Result<Vec<String>, KubectlError> {
    if context.is_empty() {
        return Err(KubectlError::NoCurrentContext);
    }
    Ok(vec![
        "config".into(),
        "set-context".into(),
        positional(context)?,
        format!("--namespace={namespace}"),
    ])
}
