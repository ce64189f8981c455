//! Command implementations for the pagecheck CLI.
//!
//! - [`run`] - Run verification scenarios
//! - [`list`] - List available scenarios
//!
//! Each command provides an `execute` function that takes the parsed
//! command arguments and returns a Result.

pub mod list;
pub mod run;

pub use list::execute as list_execute;
pub use run::execute as run_execute;
