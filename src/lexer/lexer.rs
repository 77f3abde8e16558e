use std::io::Read;

use tracing::{debug, trace};

use crate::{errors::errors::Error, Span, MK_SPAN, MK_TOKEN};

use super::{
    cursor::Cursor,
    number::parse_double,
    tokens::{Token, TokenKind, TokenValue},
};

/// Pull-based lexer producing one token per call.
///
/// Malformed input comes back as `LexError` tokens and lexing carries on
/// after the next space, newline, semicolon or end of input. Only a failing
/// reader produces an `Err`.
pub struct Lexer<R: Read> {
    cursor: Cursor<R>,
    failed: bool,
}

impl<'a> Lexer<&'a [u8]> {
    pub fn from_source(source: &'a str) -> Self {
        Lexer::new(source.as_bytes())
    }
}

impl<R: Read> Lexer<R> {
    pub fn new(reader: R) -> Lexer<R> {
        Lexer {
            cursor: Cursor::new(reader),
            failed: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.cursor.into_inner()
    }

    /// Returns the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, Error> {
        self.cursor.skip_whitespace()?;

        let token = match self.cursor.peek()? {
            None => return Ok(None),

            Some('+') => self.sign_or_operator('+', TokenKind::Plus)?,
            Some('-') => self.sign_or_operator('-', TokenKind::Minus)?,
            Some('*') => self.operator(TokenKind::Multiply)?,
            Some('/') => self.operator(TokenKind::Divide)?,
            Some('=') => self.equals()?,

            Some(quote @ ('"' | '\'')) => self.string(quote)?,

            Some(c) => self.variable(c)?,
        };

        trace!(
            kind = %token.kind,
            line = token.span.line,
            start = token.span.start,
            end = token.span.end,
            "lexed token"
        );

        Ok(Some(token))
    }

    fn operator(&mut self, kind: TokenKind) -> Result<Token, Error> {
        let line = self.cursor.line();
        self.cursor.advance()?;
        let column = self.cursor.column();

        Ok(MK_TOKEN!(kind, None, MK_SPAN!(line, column, column)))
    }

    fn sign_or_operator(&mut self, sign: char, kind: TokenKind) -> Result<Token, Error> {
        let line = self.cursor.line();
        let start = self.cursor.column();
        self.cursor.advance()?;

        match self.cursor.peek()? {
            Some(c) if c.is_ascii_digit() || c == '.' => {
                let mut run = String::from(sign);
                run.push_str(&self.cursor.read_token()?);
                self.classify(run, line, start)
            }
            _ => {
                let column = self.cursor.column();
                Ok(MK_TOKEN!(kind, None, MK_SPAN!(line, column, column)))
            }
        }
    }

    fn equals(&mut self) -> Result<Token, Error> {
        let line = self.cursor.line();
        self.cursor.advance()?;
        let start = self.cursor.column();

        if let Some('=') = self.cursor.peek()? {
            self.cursor.advance()?;
            let end = self.cursor.column();
            return Ok(MK_TOKEN!(TokenKind::Equal, None, MK_SPAN!(line, start, end)));
        }

        Ok(MK_TOKEN!(TokenKind::Assignment, None, MK_SPAN!(line, start, start)))
    }

    fn string(&mut self, quote: char) -> Result<Token, Error> {
        let line = self.cursor.line();
        self.cursor.advance()?;
        let start = self.cursor.column();

        let mut buffer = String::new();
        let mut escaped = false;

        loop {
            match self.cursor.peek()? {
                None | Some('\n') => {
                    if escaped {
                        buffer.push('\\');
                    }
                    let message = format!("Unclosed string: {}{}", quote, buffer);
                    return self.recover(message, line, start);
                }
                Some(c) if c == quote && !escaped => {
                    self.cursor.advance()?;
                    let end = self.cursor.column();
                    return Ok(MK_TOKEN!(
                        TokenKind::LiteralString,
                        Some(TokenValue::Str(buffer)),
                        MK_SPAN!(line, start, end)
                    ));
                }
                Some(c) => {
                    self.cursor.advance()?;
                    if escaped {
                        push_escaped(&mut buffer, c);
                        escaped = false;
                    } else if c == '\\' {
                        escaped = true;
                    } else {
                        buffer.push(c);
                    }
                }
            }
        }
    }

    fn variable(&mut self, first: char) -> Result<Token, Error> {
        let line = self.cursor.line();
        let start = self.cursor.column();
        let run = self.cursor.read_token()?;

        // NaN and Infinity start with a letter but are numbers.
        if first.is_alphabetic() && parse_double(&run).is_none() {
            let end = self.cursor.column();
            return Ok(MK_TOKEN!(
                TokenKind::Identifier,
                Some(TokenValue::Str(run)),
                MK_SPAN!(line, start, end)
            ));
        }

        self.classify(run, line, start)
    }

    fn classify(&mut self, run: String, line: u32, start: u32) -> Result<Token, Error> {
        match parse_double(&run) {
            Some(value) => {
                let end = self.cursor.column();
                Ok(MK_TOKEN!(
                    TokenKind::LiteralDouble,
                    Some(TokenValue::Double(value)),
                    MK_SPAN!(line, start, end)
                ))
            }
            None => self.recover(format!("Unknown token: {}", run), line, start),
        }
    }

    /// Swallows the rest of a bad lexeme up to the next space, newline,
    /// semicolon or end of input and reports it as a `LexError` token.
    fn recover(&mut self, mut message: String, line: u32, start: u32) -> Result<Token, Error> {
        while let Some(c) = self.cursor.peek()? {
            if matches!(c, ' ' | '\n' | ';') {
                break;
            }

            self.cursor.advance()?;
            message.push(c);
        }

        message.push_str(&format!("<< at line {} column {}", line, start));
        let end = self.cursor.column();

        debug!(line, start, end, diagnostic = %message, "recovered from malformed lexeme");

        Ok(MK_TOKEN!(
            TokenKind::LexError,
            Some(TokenValue::Str(message)),
            MK_SPAN!(line, start, end)
        ))
    }
}

impl<R: Read> Iterator for Lexer<R> {
    type Item = Result<Token, Error>;

    /// Stops for good after the first input failure.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

fn push_escaped(buffer: &mut String, c: char) {
    let decoded = match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        '\\' | '"' | '\'' => c,
        _ => {
            buffer.push('\\');
            c
        }
    };

    buffer.push(decoded);
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    Lexer::from_source(source).collect()
}
