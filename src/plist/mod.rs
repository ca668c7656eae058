pub mod parser;
pub mod value;
pub mod writer;

pub use parser::{ParseError, parse};
pub use value::{Atom, Dict, Entry, Value};
pub use writer::render;
