mod chart;
mod prompt;
mod shell;
mod table;

pub use prompt::Prompter;
pub use shell::Shell;
