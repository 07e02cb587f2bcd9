//! Blocking invocation of an external kube-style client (`oc`, `kubectl`).
//!
//! Every call spawns the binary, waits for it and folds the exit status and
//! captured output into an [`Outcome`]. There is no timeout.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{self, Command};

use crate::error::ClientError;

/// What a finished client invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Zero exit status and something on stdout (trailing whitespace removed).
    Success(String),
    Empty,
    /// Non-zero exit status, or killed by a signal (`code` is `None`).
    Failed { code: Option<i32>, stderr: String },
}

impl Outcome {
    pub fn classify(success: bool, code: Option<i32>, stdout: &[u8], stderr: &[u8]) -> Outcome {
        if !success {
            return Outcome::Failed {
                code,
                stderr: String::from_utf8_lossy(stderr).trim().to_string(),
            };
        }
        let stdout = String::from_utf8_lossy(stdout);
        let stdout = stdout.trim_end();
        if stdout.is_empty() {
            Outcome::Empty
        } else {
            Outcome::Success(stdout.to_string())
        }
    }

    pub fn from_output(output: &process::Output) -> Outcome {
        Outcome::classify(
            output.status.success(),
            output.status.code(),
            &output.stdout,
            &output.stderr,
        )
    }

    /// Stdout of a successful call, treating an empty answer as an error.
    pub fn into_stdout(self, command: &str) -> Result<String, ClientError> {
        match self {
            Outcome::Success(out) => Ok(out),
            Outcome::Empty => Err(ClientError::EmptyOutput {
                command: command.to_string(),
            }),
            failed @ Outcome::Failed { .. } => Err(failed.into_error(command)),
        }
    }

    /// Like [`Outcome::into_stdout`], but an empty answer is a valid empty string.
    pub fn into_stdout_or_empty(self, command: &str) -> Result<String, ClientError> {
        match self {
            Outcome::Success(out) => Ok(out),
            Outcome::Empty => Ok(String::new()),
            failed @ Outcome::Failed { .. } => Err(failed.into_error(command)),
        }
    }

    fn into_error(self, command: &str) -> ClientError {
        let detail = match self {
            Outcome::Failed { code, stderr } => {
                let status = match code {
                    Some(code) => format!("exit status {code}"),
                    None => "terminated by signal".to_string(),
                };
                if stderr.is_empty() {
                    status
                } else {
                    format!("{status}: {stderr}")
                }
            }
            _ => "unexpected output".to_string(),
        };
        ClientError::Failed {
            command: command.to_string(),
            detail,
        }
    }
}

pub trait Client {
    fn name(&self) -> String;

    fn run(&self, args: &[&str]) -> Result<Outcome, ClientError>;

    /// `run`, then collapse the outcome into stdout or a [`ClientError`].
    fn query(&self, args: &[&str]) -> Result<String, ClientError> {
        self.run(args)?.into_stdout(&self.describe(args))
    }

    fn describe(&self, args: &[&str]) -> String {
        let mut command = self.name();
        for arg in args {
            command.push(' ');
            command.push_str(arg);
        }
        command
    }
}

#[derive(Debug, Clone)]
pub struct CommandClient {
    program: PathBuf,
}

impl CommandClient {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Find the client binary.
    ///
    /// An explicit `program` is used as is when it contains a path separator and
    /// looked up on `path` otherwise. Without one, the first of `names` found on
    /// `path` wins.
    pub fn locate(
        program: Option<&str>,
        names: &[&str],
        path: Option<&OsStr>,
    ) -> Result<CommandClient, ClientError> {
        match program {
            Some(program) if program.contains(std::path::is_separator) => {
                Ok(CommandClient::new(program))
            }
            Some(program) => find_in_path(&[program], path)
                .map(CommandClient::new)
                .ok_or_else(|| ClientError::NotFound(program.to_string())),
            None => find_in_path(names, path)
                .map(CommandClient::new)
                .ok_or_else(|| ClientError::NotFound(names.join(" or "))),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Client for CommandClient {
    fn name(&self) -> String {
        self.program
            .file_name()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    fn run(&self, args: &[&str]) -> Result<Outcome, ClientError> {
        tracing::debug!(program = %self.program.display(), ?args, "running client");
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| ClientError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;
        let outcome = Outcome::from_output(&output);
        if let Outcome::Failed { code, .. } = &outcome {
            tracing::debug!(?code, ?args, "client failed");
        }
        Ok(outcome)
    }
}

/// First executable named any of `names` in the directories of `path`
/// (a `PATH`-style list). Falls back to the process `PATH` when `path` is `None`.
pub fn find_in_path(names: &[&str], path: Option<&OsStr>) -> Option<PathBuf> {
    let path = match path {
        Some(path) => path.to_os_string(),
        None => env::var_os("PATH")?,
    };
    for name in names {
        for dir in env::split_paths(&path) {
            let candidate = dir.join(name);
            if is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
