use std::fmt::Display;

use crate::Span;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Plus,     // +
    Minus,    // -
    Multiply, // *
    Divide,   // /

    Assignment, // =
    Equal,      // ==

    Identifier,
    LiteralDouble,
    LiteralString,

    LexError,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Assignment => "ASSIGNMENT",
            TokenKind::Equal => "EQUAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::LiteralDouble => "LITERAL_DOUBLE",
            TokenKind::LiteralString => "LITERAL_STRING",
            TokenKind::LexError => "LEX_ERROR",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Payload carried by identifiers, literals and error tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Str(String),
    Double(f64),
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenValue::Str(value) => write!(f, "{}", value),
            TokenValue::Double(value) => write!(f, "{:?}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<TokenValue>,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "Type {} value: {}", self.kind, value),
            None => write!(f, "Type {} value: null", self.kind),
        }
    }
}

impl Token {
    pub fn line(&self) -> u32 {
        self.span.line
    }

    pub fn start_column(&self) -> u32 {
        self.span.start
    }

    pub fn end_column(&self) -> u32 {
        self.span.end
    }

    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::LexError
    }

    /// Text payload of identifiers, strings and error tokens.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Some(TokenValue::Str(value)) => Some(value),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self.value {
            Some(TokenValue::Double(value)) => Some(value),
            _ => None,
        }
    }
}
