//! Last-used project per context, one small file per context.
//!
//! No locking: two invocations racing on the same context may interleave.

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use tempfile::NamedTempFile;

pub struct ProjectStore {
    dir: PathBuf,
}

impl ProjectStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path separators in the context name become `-`.
    pub fn project_file_path(&self, context: &str) -> PathBuf {
        self.dir.join(escape_context(context))
    }

    /// Empty when nothing is recorded. A trailing newline is not part of the name.
    pub fn read_project(&self, context: &str) -> anyhow::Result<String> {
        let path = self.project_file_path(context);
        match fs::read_to_string(&path) {
            Ok(project) => Ok(project.trim_end_matches(['\n', '\r']).to_string()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(err) => {
                Err(err).with_context(|| format!("Reading project record {}", path.display()))
            }
        }
    }

    /// Record `project` for `context`. Returns `false` when the stored value was
    /// already `project` and nothing was written.
    pub fn save_project(&self, context: &str, project: &str) -> anyhow::Result<bool> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Creating project store {}", self.dir.display()))?;

        if self.read_project(context)? == project {
            tracing::debug!(context, project, "project record unchanged");
            return Ok(false);
        }

        let path = self.project_file_path(context);
        let mut tmp = NamedTempFile::new_in(&self.dir).context("Creating project record")?;
        tmp.write_all(project.as_bytes())
            .context("Writing project record")?;
        tmp.persist(&path)
            .with_context(|| format!("Saving project record {}", path.display()))?;
        tracing::debug!(context, project, path = %path.display(), "saved project record");

        Ok(true)
    }
}

fn escape_context(context: &str) -> String {
    let escaped = context.replace(['/', '\\'], "-");
    match escaped.as_str() {
        // would name the store itself or its parent
        "" | "." | ".." => format!("-{escaped}"),
        _ => escaped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, ProjectStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ProjectStore::new(dir.path().join("ocproj"));
        (dir, store)
    }

    #[test]
    fn path_never_nests() {
        let (_dir, store) = store();
        for context in [
            "dev",
            "default/api-crc-testing:6443/kubeadmin",
            "a\\b/c",
            "/leading",
            "trailing/",
        ] {
            let path = store.project_file_path(context);
            assert_eq!(path.parent(), Some(store.dir()), "{context}");
            let name = path.file_name().unwrap().to_str().unwrap();
            assert!(!name.contains('/') && !name.contains('\\'), "{context}");
        }
        assert!(store
            .project_file_path("default/api:6443/admin")
            .ends_with("default-api:6443-admin"));
    }

    #[test]
    fn dot_contexts_stay_inside_store() {
        let (_dir, store) = store();
        for context in [".", ".."] {
            let path = store.project_file_path(context);
            assert_eq!(path.parent(), Some(store.dir()), "{context}");
            assert!(store.save_project(context, "web").unwrap());
            assert_eq!(store.read_project(context).unwrap(), "web");
        }
        assert!(store.project_file_path("..").ends_with("-.."));
        assert_ne!(
            store.project_file_path("."),
            store.project_file_path("..")
        );
    }

    #[test]
    fn record_with_trailing_newline() {
        let (_dir, store) = store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.project_file_path("dev"), "staging\n").unwrap();
        assert_eq!(store.read_project("dev").unwrap(), "staging");

        fs::write(store.project_file_path("dev"), "staging\r\n").unwrap();
        assert_eq!(store.read_project("dev").unwrap(), "staging");
        assert!(!store.save_project("dev", "staging").unwrap());
    }

    #[test]
    fn missing_record_reads_empty() {
        let (_dir, store) = store();
        assert_eq!(store.read_project("dev").unwrap(), "");
    }

    #[test]
    fn save_then_read() {
        let (_dir, store) = store();
        assert!(store.save_project("a/b", "staging").unwrap());
        assert_eq!(store.read_project("a/b").unwrap(), "staging");

        let raw = fs::read_to_string(store.project_file_path("a/b")).unwrap();
        assert_eq!(raw, "staging");
    }

    #[test]
    fn same_value_is_written_once() {
        let (_dir, store) = store();
        assert!(store.save_project("dev", "default").unwrap());
        assert!(!store.save_project("dev", "default").unwrap());
        assert!(store.save_project("dev", "staging").unwrap());
        assert_eq!(store.read_project("dev").unwrap(), "staging");
    }

    #[test]
    fn contexts_do_not_share_records() {
        let (_dir, store) = store();
        store.save_project("dev", "one").unwrap();
        store.save_project("prod", "two").unwrap();
        assert_eq!(store.read_project("dev").unwrap(), "one");
        assert_eq!(store.read_project("prod").unwrap(), "two");
        assert_eq!(fs::read_dir(store.dir()).unwrap().count(), 2);
    }
}
