//! CLI module for numlog - command-line interface and subcommands.
//!
//! Each subcommand maps onto one or more state store operations.

pub mod commands;

pub use commands::Cli;
