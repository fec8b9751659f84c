//! Command-line interface orchestration for sigforest.
//!
//! `connect` loads a census of necklace keys and joins its components with
//! random walks; `components` only loads and reports the census.

mod commands;

pub use commands::{
    CensusArgs, Cli, CliError, Command, ComponentSummary, ConnectCommand, ExecutionSummary,
    render_summary, run_cli,
};

#[cfg(test)]
mod tests;
