//! Parser building one [`Node`] tree per CSON line.
//!
//! Every line is an implicit object: a comma-separated list with no
//! surrounding braces. Nested `{...}` and `[...]` lists go through the same
//! [`Parser::parse_list`] routine with their delimiters made mandatory; open
//! lists live on a heap-allocated frame stack instead of the call stack.
//!
//! A parser is built fresh for each line and consumed by
//! [`Parser::parse_line`], so no parser state survives into the next line.

use crate::error::{CsonError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::types::Node;

/// Which list production is being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Object,
    Array,
}

impl Container {
    fn open(self) -> TokenKind {
        match self {
            Container::Object => TokenKind::LBrace,
            Container::Array => TokenKind::LBracket,
        }
    }

    fn close(self) -> TokenKind {
        match self {
            Container::Object => TokenKind::RBrace,
            Container::Array => TokenKind::RBracket,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Container::Object => "object",
            Container::Array => "array",
        }
    }

    fn wrap(self, items: Vec<Node>) -> Node {
        match self {
            Container::Object => Node::Object(items),
            Container::Array => Node::Array(items),
        }
    }
}

/// A list that has been opened but not yet closed.
struct Frame {
    container: Container,
    items: Vec<Node>,
    open_column: usize,
    delimited: bool,
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Prime a parser over one line's bytes. `line` is 1-based.
    pub fn new(src: &'a [u8], line: usize) -> Result<Self> {
        let mut lexer = Lexer::new(src, line);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the whole line as the implicit top-level object.
    ///
    /// Anything left on the line after the top-level list is an error.
    pub fn parse_line(mut self) -> Result<Node> {
        let root = self.parse_list(Container::Object, false)?;
        if self.current.kind != TokenKind::Eol {
            return Err(self.error_here(format!(
                "unexpected trailing content: {}",
                self.current.kind.describe()
            )));
        }
        Ok(root)
    }

    /// Parse a comma-separated list of values into `container`.
    ///
    /// With `delimiter_required` the list must open with the container's
    /// opening bracket and close with the matching one. Without it the list
    /// ends at the first token that is not a `,` (normally end of line) and
    /// the caller decides whether that token is acceptable.
    ///
    /// Nested lists are tracked on an explicit stack of open frames rather
    /// than the call stack, so nesting depth is bounded only by memory.
    pub fn parse_list(&mut self, container: Container, delimiter_required: bool) -> Result<Node> {
        let mut frame = self.open_list(container, delimiter_required)?;
        let mut parents: Vec<Frame> = Vec::new();
        let mut after_value = false;

        loop {
            let at_end = if after_value {
                if self.current.kind == TokenKind::Comma {
                    self.advance()?;
                    if self.current.kind == frame.container.close()
                        || self.current.kind == TokenKind::Eol
                    {
                        return Err(self.error_here(format!(
                            "trailing comma before {}",
                            self.current.kind.describe()
                        )));
                    }
                    false
                } else {
                    true
                }
            } else if frame.delimited {
                self.current.kind == frame.container.close()
            } else {
                self.current.kind == TokenKind::Eol
            };

            if at_end {
                let node = self.close_list(frame)?;
                match parents.pop() {
                    Some(mut parent) => {
                        parent.items.push(node);
                        frame = parent;
                        after_value = true;
                        continue;
                    }
                    None => return Ok(node),
                }
            }

            let nested = match self.current.kind {
                TokenKind::LBrace => Some(Container::Object),
                TokenKind::LBracket => Some(Container::Array),
                _ => None,
            };
            match nested {
                Some(nested) => {
                    let child = self.open_list(nested, true)?;
                    parents.push(std::mem::replace(&mut frame, child));
                    after_value = false;
                }
                None => {
                    let value = self.parse_scalar()?;
                    frame.items.push(value);
                    after_value = true;
                }
            }
        }
    }

    /// Consume the opening delimiter (when required) and start a new frame.
    fn open_list(&mut self, container: Container, delimited: bool) -> Result<Frame> {
        let open_column = self.current.column;
        if delimited {
            let open = container.open();
            if self.current.kind != open {
                return Err(self.error_here(format!(
                    "expected {} to open {}, found {}",
                    open.describe(),
                    container.name(),
                    self.current.kind.describe()
                )));
            }
            self.advance()?;
        }
        Ok(Frame {
            container,
            items: Vec::new(),
            open_column,
            delimited,
        })
    }

    /// Consume the closing delimiter (when required) and wrap the frame's items.
    fn close_list(&mut self, frame: Frame) -> Result<Node> {
        let container = frame.container;
        if frame.delimited {
            let close = container.close();
            if self.current.kind == close {
                self.advance()?;
            } else if self.current.kind == TokenKind::Eol {
                return Err(self.error_at(
                    frame.open_column,
                    format!(
                        "unclosed {} opened here: expected ',' or {}, found end of line",
                        container.name(),
                        close.describe()
                    ),
                ));
            } else {
                return Err(self.error_here(format!(
                    "expected ',' or {} in {}, found {}",
                    close.describe(),
                    container.name(),
                    self.current.kind.describe()
                )));
            }
        }
        Ok(container.wrap(frame.items))
    }

    fn parse_scalar(&mut self) -> Result<Node> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Str(s) => Ok(Node::String(s)),
            TokenKind::Number { text, is_float } => {
                self.classify_number(&text, is_float, token.column)
            }
            TokenKind::Ident(word) => match word.as_str() {
                "true" => Ok(Node::Bool(true)),
                "false" => Ok(Node::Bool(false)),
                _ => Err(self.error_at(
                    token.column,
                    format!("unrecognized bareword `{word}`; quote it to make a string"),
                )),
            },
            other => Err(self.error_at(
                token.column,
                format!("expected a value, found {}", other.describe()),
            )),
        }
    }

    fn classify_number(&self, text: &str, is_float: bool, column: usize) -> Result<Node> {
        if is_float {
            text.parse::<f64>().map(Node::Float).map_err(|e| {
                self.error_at(column, format!("malformed numeric literal `{text}`: {e}"))
            })
        } else {
            text.parse::<i64>().map(Node::Integer).map_err(|e| {
                self.error_at(column, format!("malformed numeric literal `{text}`: {e}"))
            })
        }
    }

    /// Move to the next token, returning the one just consumed.
    fn advance(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn error_here(&self, message: String) -> CsonError {
        self.error_at(self.current.column, message)
    }

    fn error_at(&self, column: usize, message: String) -> CsonError {
        self.lexer.error(column, message)
    }
}

/// Parse one line's bytes into its root object.
pub fn parse_line(src: &[u8], line: usize) -> Result<Node> {
    Parser::new(src, line)?.parse_line()
}
