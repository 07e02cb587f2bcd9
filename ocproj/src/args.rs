use std::ffi::OsString;

use clap::Parser;

/// Switch between projects of the current context, or list them.
#[derive(Parser, Debug)]
#[command(
    name = "ocproj",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Collect the arguments after `argv[0]` verbatim, `--` included.
    pub fn try_from_args<I, T>(argv: I) -> Result<Cli, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let prog = argv.next().unwrap_or_else(|| OsString::from("ocproj"));
        // clap eats the first `--`; give it one so a `--` typed by the user reaches `parse`
        let escaped = [prog, OsString::from("--")].into_iter().chain(argv);
        Cli::try_parse_from(escaped)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// interactive pick when possible, plain listing otherwise
    Default,
    Help,
    Swap,
    Current,
    Set(String),
    Unrecognized(String),
    TooMany,
}

pub fn parse(args: &[String]) -> Command {
    match args {
        [] => Command::Default,
        [arg] => match arg.as_str() {
            "-h" | "--help" => Command::Help,
            "-" => Command::Swap,
            "-c" | "--current" => Command::Current,
            flag if flag.starts_with('-') => Command::Unrecognized(flag.to_string()),
            name => Command::Set(name.to_string()),
        },
        _ => Command::TooMany,
    }
}

pub fn usage(prog: &str) -> String {
    format!(
        "USAGE:
  {prog}                    : list the projects in the current context
  {prog} <NAME>             : change the active project of current context
  {prog} -                  : switch to the previous project in this context
  {prog} -c, --current      : show the current project
  {prog} -h,--help          : show this message
"
    )
}
