pub mod client;
pub mod direct;
pub mod error;

use std::path::PathBuf;

pub use client::{Client, CommandClient, Outcome};
pub use error::ClientError;

/// `~/.kube`, or `None` when the home directory cannot be determined.
pub fn kube_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".kube"))
}
