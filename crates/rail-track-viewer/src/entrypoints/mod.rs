// Shared modules
pub(crate) mod cli;
pub(crate) mod logging;
mod metadata;
pub mod run;
