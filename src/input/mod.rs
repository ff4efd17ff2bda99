pub mod command;

pub use command::{parse, Command, ParseError};
