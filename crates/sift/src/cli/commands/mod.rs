//! Command implementations and dispatch.

pub mod analyze;
pub mod check;
pub mod config;
pub mod decode;
pub mod init;
pub mod suggest;
pub mod terms;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Analyze(cmd) => analyze::run(ctx, &cmd),
        Commands::Suggest(cmd) => suggest::run(ctx, &cmd),
        Commands::Terms(cmd) => terms::run(ctx, &cmd),
        Commands::Decode(cmd) => decode::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Check => check::run(ctx),
        Commands::Init(cmd) => init::run(ctx, &cmd),
    }
}
