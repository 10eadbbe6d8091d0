//! Command-line tooling for the aget binary.

pub mod cli;

pub use cli::{
    run, Cli, CliContext, CommandOutput, Commands, IdentityCommands, OutputFormat, ReviewCommands,
};
