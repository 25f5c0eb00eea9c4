use std::{collections::BTreeMap, fs, path::Path};

use anyhow::Context as _;
use serde::*;
use serde_yaml::Value as YamlValue;

/// Namespace reported for a context that does not name one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Treats an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Renders a scalar the way it was written. Sequences and mappings have no
/// string form and yield `None`.
fn scalar_string(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Tagged(tagged) => scalar_string(&tagged.value),
        YamlValue::Null | YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
    }
}

// region: Context
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Context {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub context: BTreeMap<String, YamlValue>,
}

impl Context {
    /// The `namespace` entry of the inner mapping, if it is set to a scalar.
    pub fn namespace(&self) -> Option<String> {
        self.context.get("namespace").and_then(scalar_string)
    }
}
// endregion

// region: Cluster
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Cluster {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cluster: BTreeMap<String, YamlValue>,
}
// endregion

// region: User
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}
// endregion

// region: Common
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct KubeConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_context: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clusters: Vec<Cluster>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<User>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contexts: Vec<Context>,
}

impl KubeConfig {
    /// Decodes a kubeconfig document. Keys this model doesn't know about are
    /// skipped, and an empty document decodes to an empty config.
    pub fn parse(data: &[u8]) -> anyhow::Result<KubeConfig> {
        let kc: Option<KubeConfig> =
            serde_yaml::from_slice(data).context("Parsing kube config")?;
        Ok(kc.unwrap_or_default())
    }

    pub fn read_from(path: impl AsRef<Path>) -> anyhow::Result<KubeConfig> {
        let path = path.as_ref();
        let data = fs::read(path)
            .with_context(|| format!("Reading kube config {}", path.display()))?;
        KubeConfig::parse(&data)
    }

    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|ctx| ctx.name == name)
    }

    /// Namespace of the named context, falling back to [`DEFAULT_NAMESPACE`]
    /// when the context has none or doesn't exist.
    pub fn namespace_of(&self, name: &str) -> String {
        self.context(name)
            .and_then(Context::namespace)
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_owned())
    }

    pub fn cluster_names(&self) -> impl Iterator<Item = &str> {
        self.clusters.iter().map(|cls| cls.name.as_str())
    }

    pub fn context_names(&self) -> impl Iterator<Item = &str> {
        self.contexts.iter().map(|ctx| ctx.name.as_str())
    }

    pub fn user_names(&self) -> impl Iterator<Item = &str> {
        self.users.iter().map(|usr| usr.name.as_str())
    }
}
// endregion
