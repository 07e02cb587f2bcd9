//! Process settings, read once from the environment at start-up.
//!
//! # Environment Variables
//!
//! - `XDG_CACHE_HOME` - base of the project store (`<base>/ocproj`), default `~/.kube`
//! - `OC` - cluster client binary, default `oc` or `oc.exe` from `PATH`
//! - `_OCPROJ_FORCE_COLOR` - always highlight the current project
//! - `NO_COLOR` - never highlight unless forced
//! - `OCPROJ_IGNORE_FZF` - never use the interactive picker
//! - `OCPROJ_CURRENT_FGCOLOR` / `OCPROJ_CURRENT_BGCOLOR` - highlight escape sequences

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Context as _;

pub const FORCE_COLOR_VAR: &str = "_OCPROJ_FORCE_COLOR";
pub const IGNORE_FZF_VAR: &str = "OCPROJ_IGNORE_FZF";
pub const FGCOLOR_VAR: &str = "OCPROJ_CURRENT_FGCOLOR";
pub const BGCOLOR_VAR: &str = "OCPROJ_CURRENT_BGCOLOR";
pub const CLIENT_VAR: &str = "OC";
pub const LOG_VAR: &str = "OCPROJ_LOG";

/// Binaries tried, in order, when `OC` is not set.
pub const CLIENT_NAMES: &[&str] = &["oc", "oc.exe"];

const STORE_DIR: &str = "ocproj";
// tput setaf 0 / tput setab 7
const DEFAULT_FG: &str = "\x1b[30m";
const DEFAULT_BG: &str = "\x1b[47m";
pub const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub fg: String,
    pub bg: String,
}

impl Default for Highlight {
    fn default() -> Self {
        Self {
            fg: DEFAULT_FG.to_string(),
            bg: DEFAULT_BG.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub store_dir: PathBuf,
    pub client: Option<String>,
    pub force_color: bool,
    pub no_color: bool,
    pub ignore_fzf: bool,
    pub highlight: Highlight,
    pub stdout_is_term: bool,
    /// `PATH` used to discover the client and `fzf`.
    pub path: Option<OsString>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Settings> {
        Settings::from_lookup(
            |key| std::env::var(key).ok(),
            rustkube::kube_dir(),
            console::Term::stdout().is_term(),
        )
    }

    /// Build settings from `lookup`, with `kube_dir` as the fallback cache base.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        kube_dir: Option<PathBuf>,
        stdout_is_term: bool,
    ) -> anyhow::Result<Settings> {
        let set = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let cache_base = match set("XDG_CACHE_HOME") {
            Some(dir) => PathBuf::from(dir),
            None => kube_dir.context("Could not determine the home directory")?,
        };

        let mut highlight = Highlight::default();
        if let Some(fg) = set(FGCOLOR_VAR) {
            highlight.fg = fg;
        }
        if let Some(bg) = set(BGCOLOR_VAR) {
            highlight.bg = bg;
        }

        Ok(Settings {
            store_dir: cache_base.join(STORE_DIR),
            client: set(CLIENT_VAR),
            force_color: set(FORCE_COLOR_VAR).is_some(),
            no_color: set("NO_COLOR").is_some(),
            ignore_fzf: set(IGNORE_FZF_VAR).is_some(),
            highlight,
            stdout_is_term,
            path: lookup("PATH").map(OsString::from),
        })
    }

    pub fn color_enabled(&self) -> bool {
        self.force_color || (self.stdout_is_term && !self.no_color)
    }
}
