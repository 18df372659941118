use std::ffi::OsString;

use clap::Parser;

use crate::message::compose_request;

/// Status client CLI arguments
///
/// Every argument is forwarded to the daemon, which owns the command
/// language, so the client declares no flags of its own. `--help` and
/// `--version` are forwarded too.
#[derive(Debug, Parser)]
#[command(
    name = "status-client",
    about = "Send a command to the status daemon and print its reply",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Command sent to the daemon (defaults to `help`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub command: Vec<String>,
}

impl Cli {
    /// Parse from the process arguments, keeping every token verbatim.
    pub fn parse_verbatim() -> Self {
        Self::try_parse_verbatim(std::env::args_os()).unwrap_or_else(|err| err.exit())
    }

    /// Parse `args` (program name first) without letting clap consume
    /// anything, a leading `--` included.
    ///
    /// An escape is injected right after the program name, so every
    /// user-supplied token lands in `command` as a value.
    pub fn try_parse_verbatim<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::into);
        let program = args.next().unwrap_or_else(|| OsString::from("status-client"));

        Self::try_parse_from(
            std::iter::once(program)
                .chain(std::iter::once(OsString::from("--")))
                .chain(args),
        )
    }

    /// The request line this invocation sends.
    pub fn command_line(&self) -> String {
        compose_request(&self.command)
    }
}
