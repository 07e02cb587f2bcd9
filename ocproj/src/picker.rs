use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Context as _;
use rustkube::client::find_in_path;

use crate::config::{Settings, FORCE_COLOR_VAR};

pub trait Picker {
    /// `None` when the user backed out.
    fn pick(&self) -> anyhow::Result<Option<String>>;
}

/// `fzf`, fed by re-running this program as its default command so the
/// candidates are our own (colored) listing.
pub struct Fzf {
    program: PathBuf,
    source: String,
}

impl Fzf {
    /// `fzf` when the picker may be used: not opted out, stdout is a terminal
    /// and the binary is on `PATH`.
    pub fn locate(settings: &Settings) -> Option<Fzf> {
        if settings.ignore_fzf || !settings.stdout_is_term {
            return None;
        }
        let program = find_in_path(&["fzf"], settings.path.as_deref())?;
        let exe = env::current_exe().context("Locating the ocproj executable");
        Fzf::with_source(program, exe.and_then(|exe| shell_command(&exe)))
    }

    fn with_source(program: PathBuf, source: anyhow::Result<String>) -> Option<Fzf> {
        match source {
            Ok(source) => Some(Fzf { program, source }),
            Err(err) => {
                tracing::warn!("not using fzf: {err:#}");
                None
            }
        }
    }
}

impl Picker for Fzf {
    fn pick(&self) -> anyhow::Result<Option<String>> {
        tracing::debug!(program = %self.program.display(), source = %self.source, "starting picker");
        let output = Command::new(&self.program)
            .args(["--ansi", "--no-preview"])
            .env("FZF_DEFAULT_COMMAND", &self.source)
            .env(FORCE_COLOR_VAR, "1")
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit())
            .output()
            .with_context(|| format!("Running {}", self.program.display()))?;

        // fzf exits non-zero on abort; an empty selection says the same
        let choice = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if choice.is_empty() {
            Ok(None)
        } else {
            Ok(Some(choice))
        }
    }
}

fn shell_command(exe: &Path) -> anyhow::Result<String> {
    let exe = exe
        .to_str()
        .with_context(|| format!("Executable path {} is not valid UTF-8", exe.display()))?;
    Ok(shell_words::quote(exe).into_owned())
}
