mod args;
mod command;

pub use args::{parse, Cli};
pub use command::Command;
