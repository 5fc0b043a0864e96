#[allow(clippy::module_inception)]
mod cli;
mod command;
mod demo;
mod shell;

pub use cli::Cli;
pub use demo::run_demo;
pub use shell::Shell;
