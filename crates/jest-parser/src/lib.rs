//! # Testlens Parser
//!
//! Tree-sitter based adapter that turns a Jest test file into the ordered
//! declaration forest consumed by the locator and lens enumerator.
//!
//! Recognizes the Jest globals (`describe`, `test`, `it`, `expect`) including
//! their member forms (`test.only`, `describe.each(...)("...")`), takes the
//! first string or template argument as the display name, and nests
//! declarations found inside callback bodies under their enclosing block.
//!
//! ## Example
//!
//! ```rust
//! use testlens_parser::{Language, TestFileParser};
//! use testlens_tree::locate;
//!
//! let source = r#"
//! describe('math', () => {
//!   test('adds', () => {
//!     expect(1 + 1).toBe(2);
//!   });
//! });
//! "#;
//!
//! let mut parser = TestFileParser::new(Language::JavaScript).unwrap();
//! let forest = parser.parse(source).unwrap();
//! assert_eq!(locate(3, &forest).as_deref(), Some("math adds"));
//! ```

mod error;
mod language;
mod parser;

pub use error::{ParserError, Result};
pub use language::Language;
pub use parser::TestFileParser;
