// Pattern front end: text -> syntax tree
//
// 1. Recursive descent, one function per precedence level
// 2. Every error carries the byte offset of the offending character
// 3. Nesting is bounded so later recursive passes cannot overflow the stack

mod ast;
mod class;
mod parser;

pub use ast::Ast;
pub use class::{CharSet, char_eq, simple_lower};
pub use parser::parse_pattern;
