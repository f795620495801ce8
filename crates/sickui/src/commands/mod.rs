//! Command handlers, one module per subcommand.

pub mod add;
pub mod check;
pub mod diff;
pub mod init;
pub mod list;
pub mod util;

use clap::CommandFactory;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Add(args) => add::handle(args, global).await,
        Command::List => list::handle(global).await,
        Command::Diff(args) => diff::handle(args, global).await,
        Command::Init(args) => init::handle(args, global).await,
        Command::Check(args) => check::handle(&args, global),
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "sickui", &mut std::io::stdout());
            Ok(())
        }
    }
}
