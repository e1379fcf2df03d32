//! Recursive-descent parser for the textual tree format.
//!
//! ```text
//! Individual := "(root" Control+ ")"
//! Control    := Constant | "S" digits | "(" OpSymbol Control+ ")"
//! ```

use crate::error::{GpError, Result};
use crate::types::{Constant, Node, Operator};

const MAX_NESTING: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    Atom(&'a str),
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        if c == '(' || c == ')' || c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(Token::Atom(&text[s..i]));
            }
            match c {
                '(' => tokens.push(Token::Open),
                ')' => tokens.push(Token::Close),
                _ => {}
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(Token::Atom(&text[s..]));
    }
    tokens
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    position: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            tokens: tokenize(text),
            position: 0,
        }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.position).copied()
    }

    fn next(&mut self) -> Result<Token<'a>> {
        let token = self
            .peek()
            .ok_or_else(|| GpError::parse(self.position, "unexpected end of input"))?;
        self.position += 1;
        Ok(token)
    }

    fn expect_end(&self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(GpError::parse(self.position, "unexpected trailing input")),
        }
    }

    fn individual(&mut self) -> Result<Vec<Node>> {
        if self.next()? != Token::Open {
            return Err(GpError::parse(0, "expected '(root'"));
        }
        if self.next()? != Token::Atom("root") {
            return Err(GpError::parse(1, "expected 'root'"));
        }
        let mut controls = Vec::new();
        loop {
            match self.peek() {
                Some(Token::Close) => {
                    self.position += 1;
                    break;
                }
                Some(_) => controls.push(self.control(0)?),
                None => return Err(GpError::parse(self.position, "unterminated '(root'")),
            }
        }
        if controls.is_empty() {
            return Err(GpError::parse(self.position - 1, "'(root' needs at least one control"));
        }
        Ok(controls)
    }

    fn control(&mut self, nesting: usize) -> Result<Node> {
        if nesting > MAX_NESTING {
            return Err(GpError::parse(self.position, "expression nested too deeply"));
        }
        let at = self.position;
        match self.next()? {
            Token::Atom(atom) => terminal(atom, at),
            Token::Close => Err(GpError::parse(at, "unexpected ')'")),
            Token::Open => {
                let symbol_at = self.position;
                let op = match self.next()? {
                    Token::Atom(symbol) => Operator::from_symbol(symbol).ok_or_else(|| {
                        GpError::parse(symbol_at, format!("unknown operator '{}'", symbol))
                    })?,
                    _ => return Err(GpError::parse(symbol_at, "expected operator symbol")),
                };
                let mut args = Vec::with_capacity(op.arity());
                loop {
                    match self.peek() {
                        Some(Token::Close) => {
                            self.position += 1;
                            break;
                        }
                        Some(_) => args.push(self.control(nesting + 1)?),
                        None => {
                            return Err(GpError::parse(
                                self.position,
                                format!("unterminated '({}'", op),
                            ))
                        }
                    }
                }
                if args.len() != op.arity() {
                    return Err(GpError::parse(
                        symbol_at,
                        format!("'{}' takes {} arguments, got {}", op, op.arity(), args.len()),
                    ));
                }
                Ok(Node::Call { op, args })
            }
        }
    }
}

fn terminal(atom: &str, at: usize) -> Result<Node> {
    if let Some(digits) = atom.strip_prefix('S') {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GpError::parse(at, format!("malformed sensor '{}'", atom)));
        }
        let index = digits
            .parse::<usize>()
            .map_err(|_| GpError::parse(at, format!("sensor index out of range '{}'", atom)))?;
        return Ok(Node::Sensor(index));
    }
    match atom.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Node::Const(Constant::from_literal(value, atom))),
        _ => Err(GpError::parse(at, format!("invalid constant '{}'", atom))),
    }
}

/// Parses `(root c1 c2 ...)` into its controls.
pub fn parse_individual(text: &str) -> Result<Vec<Node>> {
    let mut parser = Parser::new(text);
    let controls = parser.individual()?;
    parser.expect_end()?;
    Ok(controls)
}

/// Parses a single control expression.
pub fn parse_control(text: &str) -> Result<Node> {
    let mut parser = Parser::new(text);
    let node = parser.control(0)?;
    parser.expect_end()?;
    Ok(node)
}
