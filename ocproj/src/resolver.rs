use anyhow::Context as _;
use rustkube::direct::{KubeConfig, NamespaceList};
use rustkube::{Client, ClientError};

/// Namespace used by the client when a context does not set one.
pub const DEFAULT_PROJECT: &str = "default";

pub struct Resolver<'a> {
    client: &'a dyn Client,
}

impl<'a> Resolver<'a> {
    pub fn new(client: &'a dyn Client) -> Self {
        Self { client }
    }

    pub fn current_context(&self) -> Result<String, ClientError> {
        self.client.query(&["config", "current-context"])
    }

    pub fn current_project(&self, context: &str) -> anyhow::Result<String> {
        let args = ["config", "view", "-o", "yaml"];
        let view = self
            .client
            .run(&args)?
            .into_stdout_or_empty(&self.client.describe(&args))?;
        let config = KubeConfig::from_yaml(&view)
            .with_context(|| format!("Reading namespace of context {context}"))?;
        Ok(config
            .namespace_of(context)
            .unwrap_or(DEFAULT_PROJECT)
            .to_string())
    }

    // empty when the cluster cannot be reached
    pub fn list_projects(&self) -> Vec<String> {
        let args = ["get", "namespaces", "-o", "yaml"];
        let listing = match self.client.run(&args) {
            Ok(outcome) => outcome.into_stdout_or_empty(&self.client.describe(&args)),
            Err(err) => Err(err),
        };
        let listing = match listing {
            Ok(listing) => listing,
            Err(err) => {
                tracing::warn!("{err}");
                return Vec::new();
            }
        };
        match NamespaceList::from_yaml(&listing) {
            Ok(list) => list.names().collect(),
            Err(err) => {
                tracing::warn!("{err:#}");
                Vec::new()
            }
        }
    }

    pub fn switch_project(&self, context: &str, project: &str) -> Result<(), ClientError> {
        let namespace = format!("--namespace={project}");
        let args = ["config", "set-context", context, namespace.as_str()];
        let outcome = self.client.run(&args)?;
        outcome.into_stdout_or_empty(&self.client.describe(&args))?;
        Ok(())
    }
}
