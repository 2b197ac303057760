mod completer;
pub mod parser;
pub mod reader;

pub use completer::ShellCompleter;
pub use parser::{tokenize, CommandParser, ParseError};
pub use reader::{EditorReader, LineReader, StreamReader};
