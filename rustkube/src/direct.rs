use anyhow::Context as _;
use serde::*;
use serde_yaml::Value as YamlValue;

// region: Context
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ContextSpec {
    pub user: Option<String>,
    pub namespace: Option<String>,
    pub cluster: Option<String>,
    pub extensions: Option<YamlValue>,
}
#[derive(Deserialize, Debug)]
pub struct Context {
    pub name: String,
    #[serde(default)]
    pub context: ContextSpec,
}
// endregion

// region: Common
/// The view of a kubeconfig as printed by `<client> config view -o yaml`.
///
/// Unlike a kubeconfig file on disk, the client output may be merged from
/// several files and may omit any section, so every field is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct KubeConfig {
    #[serde(default)]
    pub contexts: Vec<Context>,
    pub current_context: Option<String>,
}

impl KubeConfig {
    pub fn from_yaml(data: &str) -> anyhow::Result<KubeConfig> {
        // `config view` prints nothing at all when no kubeconfig exists
        if data.trim().is_empty() {
            return Ok(KubeConfig::default());
        }
        serde_yaml::from_str(data).context("Parsing kube config")
    }

    pub fn context(&self, name: &str) -> Option<&ContextSpec> {
        self.contexts
            .iter()
            .find(|ctx| ctx.name == name)
            .map(|ctx| &ctx.context)
    }

    /// Namespace bound to the named context, if the context exists and sets one.
    pub fn namespace_of(&self, name: &str) -> Option<&str> {
        self.context(name)?
            .namespace
            .as_deref()
            .filter(|ns| !ns.is_empty())
    }
}
// endregion

// region: Namespace
#[derive(Deserialize, Debug)]
pub struct ObjectMeta {
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct Namespace {
    pub metadata: ObjectMeta,
}

/// Output of `<client> get namespaces -o yaml`.
#[derive(Deserialize, Debug, Default)]
pub struct NamespaceList {
    #[serde(default)]
    pub items: Vec<Namespace>,
}

impl NamespaceList {
    pub fn from_yaml(data: &str) -> anyhow::Result<NamespaceList> {
        if data.trim().is_empty() {
            return Ok(NamespaceList::default());
        }
        serde_yaml::from_str(data).context("Parsing namespace list")
    }

    pub fn names(self) -> impl Iterator<Item = String> {
        self.items.into_iter().map(|ns| ns.metadata.name)
    }
}
// endregion
