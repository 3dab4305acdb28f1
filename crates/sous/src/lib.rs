//! The `sous` command-line interface: configuration and subcommands.

pub mod commands;
pub mod config;
