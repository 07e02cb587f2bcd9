use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use rustkube::{Client, ClientError, Outcome};

pub struct FakeClient {
    context: String,
    namespaces: Vec<String>,
    bound: RefCell<BTreeMap<String, String>>,
    switches: RefCell<Vec<(String, String)>>,
    unreachable: Cell<bool>,
    reject_switch: Cell<bool>,
}

impl FakeClient {
    pub fn new(context: &str, namespaces: &[&str]) -> Self {
        Self {
            context: context.to_string(),
            namespaces: namespaces.iter().map(|ns| ns.to_string()).collect(),
            bound: RefCell::default(),
            switches: RefCell::default(),
            unreachable: Cell::new(false),
            reject_switch: Cell::new(false),
        }
    }

    pub fn set_namespace(&self, context: &str, namespace: &str) {
        self.bound
            .borrow_mut()
            .insert(context.to_string(), namespace.to_string());
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.set(unreachable);
    }

    pub fn set_reject_switch(&self, reject: bool) {
        self.reject_switch.set(reject);
    }

    pub fn switches(&self) -> Vec<(String, String)> {
        self.switches.borrow().clone()
    }

    fn config_view(&self) -> String {
        let mut out = String::from("apiVersion: v1\nkind: Config\ncontexts:\n");
        for (context, namespace) in self.bound.borrow().iter() {
            out.push_str(&format!(
                "- name: \"{context}\"\n  context:\n    cluster: c\n    user: u\n    namespace: \"{namespace}\"\n"
            ));
        }
        if self.bound.borrow().is_empty() {
            out = String::from("apiVersion: v1\nkind: Config\ncontexts: []\n");
        }
        if !self.context.is_empty() {
            out.push_str(&format!("current-context: \"{}\"\n", self.context));
        }
        out
    }

    fn namespace_list(&self) -> String {
        let mut out = String::from("apiVersion: v1\nkind: List\nitems:\n");
        for ns in &self.namespaces {
            out.push_str(&format!(
                "- apiVersion: v1\n  kind: Namespace\n  metadata:\n    name: \"{ns}\"\n"
            ));
        }
        if self.namespaces.is_empty() {
            out = String::from("apiVersion: v1\nkind: List\nitems: []\n");
        }
        out
    }
}

fn failed(stderr: &str) -> Outcome {
    Outcome::Failed {
        code: Some(1),
        stderr: stderr.to_string(),
    }
}

impl Client for FakeClient {
    fn name(&self) -> String {
        "oc".to_string()
    }

    fn run(&self, args: &[&str]) -> Result<Outcome, ClientError> {
        let outcome = match args {
            ["config", "current-context"] if self.context.is_empty() => Outcome::Empty,
            ["config", "current-context"] => Outcome::Success(self.context.clone()),
            ["config", "view", "-o", "yaml"] => Outcome::Success(self.config_view()),
            ["get", "namespaces", "-o", "yaml"] if self.unreachable.get() => {
                failed("Unable to connect to the server")
            }
            ["get", "namespaces", "-o", "yaml"] => Outcome::Success(self.namespace_list()),
            ["config", "set-context", _, _] if self.reject_switch.get() => {
                failed("error: cannot modify config")
            }
            ["config", "set-context", context, namespace] => {
                let namespace = namespace.trim_start_matches("--namespace=");
                self.switches
                    .borrow_mut()
                    .push((context.to_string(), namespace.to_string()));
                self.set_namespace(context, namespace);
                Outcome::Success(format!("Context \"{context}\" modified."))
            }
            other => failed(&format!("unexpected arguments {other:?}")),
        };
        Ok(outcome)
    }
}
