//! Error types for the lexer.
//!
//! Only failures of the input source live here: a reader that errors out or
//! a byte stream that is not UTF-8. Malformed source text is not an error in
//! this sense; the lexer reports it as a `LexError` token and keeps going.

pub mod errors;
