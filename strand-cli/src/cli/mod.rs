//! Command-line interface orchestration for strand.
//!
//! `circuits` reports the largest components after a bounded number of
//! connections; `span` reports the edge that first joins every point. Both
//! read `x,y,z` records from a text file.

mod commands;

pub use commands::{
    CircuitsCommand, Cli, CliError, Command, ExecutionSummary, InputArgs, SpanCommand,
    StrategyArg, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
