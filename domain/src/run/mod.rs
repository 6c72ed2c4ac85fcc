//! Generation-script runs.

pub mod outcome;
