//! CLI subcommand implementations for the verwatch binary.

pub mod doctor;
pub mod run_cmd;
