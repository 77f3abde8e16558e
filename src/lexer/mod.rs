//! Lexical analysis.
//!
//! This module turns a stream of characters into tokens:
//!
//! - `cursor` - position-tracking character reader with one character of lookahead
//! - `lexer` - token dispatch, string scanning and error recovery
//! - `number` - the floating point literal grammar
//! - `tokens` - token kinds, payloads and the token type itself

pub mod cursor;
pub mod lexer;
pub mod number;
pub mod tokens;
