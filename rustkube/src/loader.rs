use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

/// Environment variable that overrides the default kubeconfig location.
pub const KUBE_CONFIG_PATH_ENV: &str = "kube-config-path";

#[derive(Debug, Error)]
pub enum ConfigPathError {
    #[error("could not determine the home directory: user lookup failed and HOME is unset")]
    NoHomeDir,
}

fn non_empty(value: OsString) -> Option<OsString> {
    (!value.is_empty()).then_some(value)
}

/// `<home>/.kube`, where `<home>` comes from the platform user lookup and
/// then from `HOME`.
fn kube_dir(
    env: impl Fn(&str) -> Option<OsString>,
    home_dir: impl FnOnce() -> Option<PathBuf>,
) -> Result<PathBuf, ConfigPathError> {
    let home = home_dir()
        .or_else(|| env("HOME").and_then(non_empty).map(PathBuf::from))
        .ok_or(ConfigPathError::NoHomeDir)?;
    Ok(home.join(".kube"))
}

/// Picks the kubeconfig to operate on: the explicit path if one was given,
/// then `$kube-config-path`, then `<home>/.kube/config`.
pub fn resolve_config_path(flag: Option<&Path>) -> Result<PathBuf, ConfigPathError> {
    resolve_config_path_with(flag, |key| env::var_os(key), dirs::home_dir)
}

pub fn resolve_config_path_with(
    flag: Option<&Path>,
    env: impl Fn(&str) -> Option<OsString>,
    home_dir: impl FnOnce() -> Option<PathBuf>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(path) = flag {
        debug!(path = %path.display(), "kube config path from command line");
        return Ok(path.to_path_buf());
    }

    if let Some(path) = env(KUBE_CONFIG_PATH_ENV).and_then(non_empty) {
        let path = PathBuf::from(path);
        debug!(path = %path.display(), "kube config path from {KUBE_CONFIG_PATH_ENV}");
        return Ok(path);
    }

    let path = kube_dir(env, home_dir)?.join("config");
    debug!(path = %path.display(), "default kube config path");
    Ok(path)
}
