use std::{fmt::Display, io::Write, path::PathBuf};

use anyhow::Context as _;
use regex::Regex;
use rustkube::{ConfigPathError, KubeConfig};
use tracing::{debug, info};

use crate::cli::Operation;
use crate::kubectl::{self, Kubectl, Section};

/// Tag in front of every line written to the output sink.
pub const OUTPUT_PREFIX: &str = "kubecli: ";

/// Everything a single invocation needs: how to find the kubeconfig, how to
/// reach kubectl, and where to print. The path is only looked up by
/// operations that read the file.
pub struct App<'a> {
    pub locate_config: &'a dyn Fn() -> Result<PathBuf, ConfigPathError>,
    pub kubectl: &'a dyn Kubectl,
    pub out: &'a mut dyn Write,
}

impl App<'_> {
    pub fn dispatch(&mut self, operation: &Operation) -> anyhow::Result<()> {
        match operation {
            Operation::CurrentContext => self.current_context(),
            Operation::GetClusters => self.get_clusters(),
            Operation::GetContexts => self.get_contexts(),
            Operation::GetUsers => self.get_users(),
            Operation::UseContext { name } => self.use_context(name),
            Operation::Namespace { namespace } => self.namespace(namespace),
            Operation::DeleteCluster { patterns } => self.delete(Section::Clusters, patterns),
            Operation::DeleteContext { patterns } => self.delete(Section::Contexts, patterns),
            Operation::DeleteUser { patterns } => self.delete(Section::Users, patterns),
        }
    }

    fn load(&self) -> anyhow::Result<KubeConfig> {
        let path = (self.locate_config)()?;
        debug!(path = %path.display(), "loading kube config");
        KubeConfig::read_from(path)
    }

    fn emit(&mut self, line: impl Display) -> anyhow::Result<()> {
        writeln!(self.out, "{OUTPUT_PREFIX}{line}").context("Writing output")
    }

    fn run_kubectl(&self, args: Vec<String>) -> anyhow::Result<String> {
        Ok(self.kubectl.run(&args)?)
    }

    // region: Queries
    pub fn current_context(&mut self) -> anyhow::Result<()> {
        let kc = self.load()?;
        let namespace = kc.namespace_of(&kc.current_context);
        self.emit(format_args!("NAME: {} NAMESPACE: {namespace}", kc.current_context))
    }

    pub fn get_clusters(&mut self) -> anyhow::Result<()> {
        let kc = self.load()?;
        for name in kc.cluster_names() {
            self.emit(name)?;
        }
        Ok(())
    }

    pub fn get_contexts(&mut self) -> anyhow::Result<()> {
        let kc = self.load()?;
        for name in kc.context_names() {
            let namespace = kc.namespace_of(name);
            self.emit(format_args!("NAME: {name} NAMESPACE: {namespace}"))?;
        }
        Ok(())
    }

    pub fn get_users(&mut self) -> anyhow::Result<()> {
        let kc = self.load()?;
        for name in kc.user_names() {
            self.emit(name)?;
        }
        Ok(())
    }
    // endregion

    // region: Mutations
    /// Switches contexts without reading the kubeconfig; kubectl decides
    /// whether the name exists.
    pub fn use_context(&mut self, name: &str) -> anyhow::Result<()> {
        self.run_kubectl(kubectl::use_context_args(name)?)?;
        info!(context = name, "switched context");
        Ok(())
    }

    pub fn namespace(&mut self, namespace: &str) -> anyhow::Result<()> {
        let kc = self.load()?;
        self.run_kubectl(kubectl::set_namespace_args(&kc.current_context, namespace)?)?;
        info!(context = %kc.current_context, namespace, "set namespace");
        Ok(())
    }

    /// Unsets every entry of `section` whose name contains a match for one of
    /// `patterns`. Patterns are applied in order, each against every entry in
    /// document order, so an entry matched twice is unset twice. The first
    /// failure stops the run.
    pub fn delete(&mut self, section: Section, patterns: &[String]) -> anyhow::Result<()> {
        let kc = self.load()?;
        let names: Vec<&str> = match section {
            Section::Clusters => kc.cluster_names().collect(),
            Section::Contexts => kc.context_names().collect(),
            Section::Users => kc.user_names().collect(),
        };

        for pattern in patterns {
            let re = Regex::new(pattern)
                .with_context(|| format!("Compiling pattern {pattern:?}"))?;

            for &name in names.iter().filter(|name| re.is_match(name)) {
                debug!(%section, name, pattern = %pattern, "matched");
                self.run_kubectl(kubectl::unset_args(section, name))?;
                info!(key = %section.key(name), "unset");
                self.emit(format_args!("deleted {}", section.key(name)))?;
            }
        }
        Ok(())
    }
    // endregion
}
