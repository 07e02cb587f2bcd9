use std::io::{self, Write as _};
use std::path::Path;

use console::style;
use rustkube::CommandClient;

mod args;
mod config;
mod error;
mod logging;
mod picker;
mod present;
mod resolver;
mod store;
mod switcher;
#[cfg(test)]
mod testing;

use args::{Cli, Command};
use config::{Settings, CLIENT_NAMES};
use error::SwitchError;
use picker::{Fzf, Picker};
use switcher::Switcher;

fn main() {
    logging::setup_tracing();
    let cli = Cli::try_from_args(std::env::args_os()).unwrap_or_else(|err| err.exit());
    let prog = program_name();

    if let Err(err) = run(&cli, &prog) {
        report(&err, &prog);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, prog: &str) -> anyhow::Result<()> {
    let settings = Settings::from_env()?;
    let client = CommandClient::locate(
        settings.client.as_deref(),
        CLIENT_NAMES,
        settings.path.as_deref(),
    )?;
    tracing::debug!(client = %client.program().display(), store = %settings.store_dir.display());

    let command = args::parse(&cli.args);
    let fzf = match command {
        Command::Default => Fzf::locate(&settings),
        _ => None,
    };

    let switcher = Switcher::new(&settings, &client, prog);
    let stdout = io::stdout();
    let stderr = io::stderr();
    switcher.run(
        command,
        fzf.as_ref().map(|fzf| fzf as &dyn Picker),
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
}

fn report(err: &anyhow::Error, prog: &str) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{} {err:#}", style("error:").red().bold().for_stderr());
    if err
        .downcast_ref::<SwitchError>()
        .is_some_and(SwitchError::wants_usage)
    {
        let _ = write!(stderr, "{}", args::usage(prog));
    }
}

fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ocproj".to_string())
}
