//! Child-process execution of the generation script.

mod runner;

pub use runner::{DEFAULT_INTERPRETER, ProcessScriptRunner};
