use std::io::{self, BufRead, BufReader, Read};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

#[derive(Debug, Clone, Copy)]
enum Lookahead {
    Unfetched,
    Char(char),
    End,
}

/// Character reader with one character of lookahead.
///
/// Decodes UTF-8 from the wrapped reader one character at a time and keeps
/// track of the 1-based line and 0-based column of the next character.
/// Columns count characters, not bytes.
pub struct Cursor<R: Read> {
    reader: BufReader<R>,
    lookahead: Lookahead,
    line: u32,
    column: u32,
}

impl<R: Read> Cursor<R> {
    pub fn new(reader: R) -> Cursor<R> {
        Cursor {
            reader: BufReader::new(reader),
            lookahead: Lookahead::Unfetched,
            line: 1,
            column: 0,
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Hands back the wrapped reader. Input that was buffered but not yet
    /// consumed is lost.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    /// Returns the next character without consuming it, `None` at end of input.
    pub fn peek(&mut self) -> Result<Option<char>, Error> {
        if let Lookahead::Unfetched = self.lookahead {
            self.lookahead = match self.fetch()? {
                Some(c) => Lookahead::Char(c),
                None => Lookahead::End,
            };
        }

        Ok(match self.lookahead {
            Lookahead::Char(c) => Some(c),
            _ => None,
        })
    }

    /// Consumes the next character and moves the position past it.
    pub fn advance(&mut self) -> Result<Option<char>, Error> {
        let current = self.peek()?;

        match current {
            Some('\n') => {
                self.line += 1;
                self.column = 0;
                self.lookahead = Lookahead::Unfetched;
            }
            Some(_) => {
                self.column += 1;
                self.lookahead = Lookahead::Unfetched;
            }
            // End of input stays buffered so repeated calls keep returning it.
            None => {}
        }

        Ok(current)
    }

    pub fn skip_whitespace(&mut self) -> Result<(), Error> {
        while let Some(' ' | '\n') = self.peek()? {
            self.advance()?;
        }

        Ok(())
    }

    /// Consumes the maximal run of characters up to the next space, newline
    /// or end of input. The run may be empty.
    pub fn read_token(&mut self) -> Result<String, Error> {
        let mut run = String::new();

        while let Some(c) = self.peek()? {
            if c == ' ' || c == '\n' {
                break;
            }

            self.advance()?;
            run.push(c);
        }

        Ok(run)
    }

    fn fetch(&mut self) -> Result<Option<char>, Error> {
        let first = match self.read_byte()? {
            Some(byte) => byte,
            None => return Ok(None),
        };

        let width = match first {
            0x00..=0x7F => return Ok(Some(first as char)),
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Err(self.invalid_utf8(&[first])),
        };

        let mut buffer = [first, 0, 0, 0];
        for i in 1..width {
            match self.read_byte()? {
                Some(byte) => buffer[i] = byte,
                None => return Err(self.invalid_utf8(&buffer[..i])),
            }
        }

        match std::str::from_utf8(&buffer[..width]) {
            Ok(decoded) => Ok(decoded.chars().next()),
            Err(_) => Err(self.invalid_utf8(&buffer[..width])),
        }
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Error> {
        let position = self.position();

        loop {
            let byte = match self.reader.fill_buf() {
                Ok(buffer) => buffer.first().copied(),
                Err(source) if source.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(Error::new(ErrorImpl::Io { source }, position)),
            };

            if byte.is_some() {
                self.reader.consume(1);
            }

            return Ok(byte);
        }
    }

    fn invalid_utf8(&self, bytes: &[u8]) -> Error {
        Error::new(
            ErrorImpl::InvalidUtf8 {
                bytes: bytes.to_vec(),
            },
            self.position(),
        )
    }
}
