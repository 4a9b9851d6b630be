//! Tokenizer for a single CSON line.
//!
//! The lexer works over the in-memory bytes of exactly one logical line, so
//! there is no lookahead to carry (or leak) across a line boundary. Every token
//! records its 1-based byte column for error reporting.

use crate::error::{CsonError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Unquoted run of identifier characters (`true`, `false`, or anything else).
    Ident(String),
    /// Numeric literal as written. `is_float` is set when the literal has a
    /// fractional part or an exponent.
    Number { text: String, is_float: bool },
    /// Quoted literal with escapes already resolved.
    Str(String),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Eol,
}

impl TokenKind {
    /// Human-readable form used in syntax error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::Number { text, .. } => format!("number `{text}`"),
            TokenKind::Str(s) => format!("string {s:?}"),
            TokenKind::LBrace => "'{'".to_string(),
            TokenKind::RBrace => "'}'".to_string(),
            TokenKind::LBracket => "'['".to_string(),
            TokenKind::RBracket => "']'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Eol => "end of line".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub column: usize,
}

pub struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    /// `line` is the 1-based line number stamped on any error.
    pub fn new(src: &'a [u8], line: usize) -> Self {
        Self { src, pos: 0, line }
    }

    /// Build a syntax error located on this lexer's line.
    pub fn error(&self, column: usize, message: impl Into<String>) -> CsonError {
        CsonError::Syntax {
            line: self.line,
            column,
            message: message.into(),
        }
    }

    /// Produce the next token. Once the line is consumed this keeps returning `Eol`.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        let column = self.pos + 1;

        let Some(&b) = self.src.get(self.pos) else {
            return Ok(Token {
                kind: TokenKind::Eol,
                column,
            });
        };

        let kind = match b {
            b'{' => self.punct(TokenKind::LBrace),
            b'}' => self.punct(TokenKind::RBrace),
            b'[' => self.punct(TokenKind::LBracket),
            b']' => self.punct(TokenKind::RBracket),
            b',' => self.punct(TokenKind::Comma),
            b'"' | b'\'' => self.lex_string(b)?,
            b'-' | b'0'..=b'9' => self.lex_number()?,
            b if is_ident_start(b) => self.lex_ident(),
            other => {
                let shown = if other.is_ascii_graphic() {
                    format!("'{}'", other as char)
                } else {
                    format!("byte 0x{other:02X}")
                };
                return Err(self.error(column, format!("unexpected character {shown}")));
            }
        };

        Ok(Token { kind, column })
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | 0x0b | 0x0c)) {
            self.pos += 1;
        }
    }

    fn punct(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    fn lex_ident(&mut self) -> TokenKind {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.pos += 1;
        }
        TokenKind::Ident(String::from_utf8_lossy(&self.src[start..self.pos]).into_owned())
    }

    /// `["-"] digit+ ["." digit+] [("e"|"E") ["+"|"-"] digit+]`
    fn lex_number(&mut self) -> Result<TokenKind> {
        let start = self.pos;
        let mut is_float = false;

        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        self.expect_digits(start, "expected digit after '-'")?;

        if self.peek() == Some(b'.') {
            self.pos += 1;
            self.expect_digits(start, "expected digit after decimal point")?;
            is_float = true;
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            self.expect_digits(start, "expected digit in exponent")?;
            is_float = true;
        }

        // `12ab`, `1.2.3` and friends must not split into two tokens.
        if self.peek().is_some_and(|b| is_ident_continue(b) || b == b'.') {
            while self.peek().is_some_and(|b| is_ident_continue(b) || b == b'.') {
                self.pos += 1;
            }
            return Err(self.malformed_number(start, "unexpected character in number"));
        }

        let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        Ok(TokenKind::Number { text, is_float })
    }

    fn expect_digits(&mut self, start: usize, why: &str) -> Result<()> {
        let digits_start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == digits_start {
            return Err(self.malformed_number(start, why));
        }
        Ok(())
    }

    fn malformed_number(&self, start: usize, why: &str) -> CsonError {
        let end = self.pos.min(self.src.len());
        let text = String::from_utf8_lossy(&self.src[start..end]);
        self.error(
            start + 1,
            format!("malformed numeric literal `{text}`: {why}"),
        )
    }

    fn lex_string(&mut self, quote: u8) -> Result<TokenKind> {
        let start = self.pos;
        self.pos += 1;
        let mut out = Vec::new();

        loop {
            let Some(b) = self.peek() else {
                return Err(self.error(start + 1, "unterminated string literal"));
            };
            self.pos += 1;
            match b {
                b if b == quote => break,
                b'\\' => self.lex_escape(&mut out)?,
                other => out.push(other),
            }
        }

        String::from_utf8(out)
            .map(TokenKind::Str)
            .map_err(|_| self.error(start + 1, "string literal is not valid UTF-8"))
    }

    /// Called with `pos` just past the backslash.
    fn lex_escape(&mut self, out: &mut Vec<u8>) -> Result<()> {
        let column = self.pos;
        let Some(b) = self.peek() else {
            return Err(self.error(column, "unterminated string literal"));
        };
        self.pos += 1;

        let resolved = match b {
            b'\\' => '\\',
            b'"' => '"',
            b'\'' => '\'',
            b'/' => '/',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'0' => '\0',
            b'u' => self.lex_unicode_escape(column)?,
            other => {
                return Err(self.error(
                    column,
                    format!("unknown escape sequence '\\{}'", other.escape_ascii()),
                ))
            }
        };

        let mut buf = [0u8; 4];
        out.extend_from_slice(resolved.encode_utf8(&mut buf).as_bytes());
        Ok(())
    }

    /// `\uXXXX`, or a `\uD8xx\uDCxx` surrogate pair combined into one char.
    fn lex_unicode_escape(&mut self, column: usize) -> Result<char> {
        let high = self.read_hex4(column)?;
        let code = if (0xD800..=0xDBFF).contains(&high) {
            let unpaired = || format!("unpaired surrogate '\\u{high:04X}'");
            if self.src.get(self.pos..self.pos + 2) != Some(&b"\\u"[..]) {
                return Err(self.error(column, unpaired()));
            }
            self.pos += 2;
            let low = self.read_hex4(column)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(self.error(column, unpaired()));
            }
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        } else {
            high
        };
        char::from_u32(code)
            .ok_or_else(|| self.error(column, format!("invalid unicode escape '\\u{code:04X}'")))
    }

    fn read_hex4(&mut self, column: usize) -> Result<u32> {
        let code = self
            .src
            .get(self.pos..self.pos + 4)
            .filter(|h| h.iter().all(u8::is_ascii_hexdigit))
            .and_then(|h| std::str::from_utf8(h).ok())
            .and_then(|h| u32::from_str_radix(h, 16).ok())
            .ok_or_else(|| self.error(column, "expected four hex digits after '\\u'"))?;
        self.pos += 4;
        Ok(code)
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
