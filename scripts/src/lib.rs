//! Scripts for deploying the DSRE token, study resource registry, and marketplace contracts.

#![deny(missing_docs)]

pub mod chain;
pub mod cli;
pub mod constants;
pub mod errors;
pub mod orchestrator;
pub mod types;
pub mod utils;
