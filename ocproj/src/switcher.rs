use std::io::Write;

use anyhow::Context as _;
use console::style;
use rustkube::Client;

use crate::args::{self, Command};
use crate::config::Settings;
use crate::error::SwitchError;
use crate::picker::Picker;
use crate::present;
use crate::resolver::Resolver;
use crate::store::ProjectStore;

pub struct Switcher<'a> {
    settings: &'a Settings,
    resolver: Resolver<'a>,
    store: ProjectStore,
    prog: &'a str,
}

impl<'a> Switcher<'a> {
    pub fn new(settings: &'a Settings, client: &'a dyn Client, prog: &'a str) -> Self {
        Self {
            settings,
            resolver: Resolver::new(client),
            store: ProjectStore::new(&settings.store_dir),
            prog,
        }
    }

    /// Results go to `out`, status messages to `err`.
    pub fn run(
        &self,
        command: Command,
        picker: Option<&dyn Picker>,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> anyhow::Result<()> {
        match command {
            Command::Default => match picker {
                Some(picker) => self.pick_project(picker, err),
                None => self.list_projects(out),
            },
            Command::Help => {
                write!(out, "{}", args::usage(self.prog))?;
                Ok(())
            }
            Command::Swap => self.swap_project(err),
            Command::Current => self.show_current(out),
            Command::Set(name) => self.set_project(&name, err),
            Command::Unrecognized(flag) => Err(SwitchError::UnrecognizedFlag(flag).into()),
            Command::TooMany => Err(SwitchError::TooManyArguments.into()),
        }
    }

    /// Switch the current context to `name` and remember the project we left.
    pub fn set_project(&self, name: &str, err: &mut dyn Write) -> anyhow::Result<()> {
        let context = self.resolver.current_context()?;
        let previous = self.resolver.current_project(&context)?;

        if !self.resolver.list_projects().iter().any(|p| p == name) {
            return Err(SwitchError::UnknownProject(name.to_string()).into());
        }

        self.resolver.switch_project(&context, name)?;
        writeln!(
            err,
            "Active project is \"{}\".",
            style(name).green().bold().for_stderr()
        )?;

        if previous != name {
            self.store
                .save_project(&context, &previous)
                .with_context(|| format!("Remembering project {previous} for context {context}"))?;
        }
        Ok(())
    }

    pub fn swap_project(&self, err: &mut dyn Write) -> anyhow::Result<()> {
        let context = self.resolver.current_context()?;
        let previous = self.store.read_project(&context)?;
        if previous.is_empty() {
            return Err(SwitchError::NoPreviousProject.into());
        }
        self.set_project(&previous, err)
    }

    pub fn show_current(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        let context = self.resolver.current_context()?;
        let project = self.resolver.current_project(&context)?;
        writeln!(out, "{project}")?;
        Ok(())
    }

    pub fn list_projects(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        let context = self.resolver.current_context()?;
        let current = self.resolver.current_project(&context)?;
        let highlight = if self.settings.color_enabled() {
            Some(&self.settings.highlight)
        } else {
            None
        };
        present::write_listing(out, &self.resolver.list_projects(), &current, highlight)?;
        Ok(())
    }

    pub fn pick_project(&self, picker: &dyn Picker, err: &mut dyn Write) -> anyhow::Result<()> {
        if self.resolver.list_projects().is_empty() {
            return Err(SwitchError::PickerUnavailable.into());
        }
        match picker.pick()? {
            Some(choice) => self.set_project(&choice, err),
            None => Err(SwitchError::PickerAborted.into()),
        }
    }
}
