//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_SPAN!` - Creates a Span on a single line
//!
//! These macros keep the token construction sites in the lexer short.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's optional payload
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Plus, None, span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a Span from a line and a start/end column pair.
///
/// ```ignore
/// let span = MK_SPAN!(lexer.line(), start, lexer.column());
/// ```
#[macro_export]
macro_rules! MK_SPAN {
    ($line:expr, $start:expr, $end:expr) => {
        Span {
            line: $line,
            start: $start,
            end: $end,
        }
    };
}
