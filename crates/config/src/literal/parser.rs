//! Recursive-descent parser turning tokens into a [`Value`].
//!
//! Grammar (informal):
//!
//! ```text
//! top   := expr (',' expr)* ','?
//! expr  := ('+' | '-') expr | atom
//! atom  := STRING+ | BYTES+ | INT | FLOAT | True | False | None
//!        | '(' ')' | '(' expr ')' | '(' expr ',' [expr (',' expr)* ','?] ')'
//!        | '[' [expr (',' expr)* ','?] ']'
//!        | '{' '}' | '{' expr ':' expr (',' expr ':' expr)* ','? '}'
//!        | '{' expr (',' expr)* ','? '}'
//! ```

use super::error::{LiteralError, LiteralErrorKind};
use super::lexer::{Spanned, Token, tokenize};
use super::value::Value;

/// Maximum container nesting accepted before giving up.
pub const MAX_DEPTH: usize = 64;

pub(crate) fn parse(input: &str) -> Result<Value, LiteralError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: input.len(),
    };
    parser.top()
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |s| s.offset)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|s| s.token.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn unexpected(&self) -> LiteralError {
        let kind = match self.peek() {
            Some(token) => LiteralErrorKind::UnexpectedToken(token.describe()),
            None => LiteralErrorKind::UnexpectedEnd,
        };
        LiteralError {
            offset: self.offset(),
            kind,
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), LiteralError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn top(&mut self) -> Result<Value, LiteralError> {
        if self.at_end() {
            return Err(LiteralError {
                offset: 0,
                kind: LiteralErrorKind::Empty,
            });
        }

        let first = self.expr(0)?;
        let value = if self.eat(&Token::Comma) {
            // Bare `a, b` is a tuple, as is a lone trailing comma.
            let mut items = vec![first];
            while !self.at_end() {
                items.push(self.expr(0)?);
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
            Value::Tuple(items)
        } else {
            first
        };

        if !self.at_end() {
            return Err(self.unexpected());
        }
        Ok(value)
    }

    fn expr(&mut self, depth: usize) -> Result<Value, LiteralError> {
        if depth > MAX_DEPTH {
            return Err(LiteralError {
                offset: self.offset(),
                kind: LiteralErrorKind::TooDeep(MAX_DEPTH),
            });
        }

        let start = self.offset();
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                match self.expr(depth + 1)? {
                    v @ (Value::Int(_) | Value::Float(_)) => Ok(v),
                    _ => Err(LiteralError {
                        offset: start,
                        kind: LiteralErrorKind::BadUnaryOperand('+'),
                    }),
                }
            }
            Some(Token::Minus) => {
                self.pos += 1;
                // Negate the raw magnitude so i64::MIN is reachable.
                if let Some(Token::Int(magnitude)) = self.peek() {
                    let magnitude = *magnitude;
                    let offset = self.offset();
                    self.pos += 1;
                    let value = i128::try_from(magnitude)
                        .ok()
                        .and_then(|m| i64::try_from(-m).ok())
                        .ok_or(LiteralError {
                            offset,
                            kind: LiteralErrorKind::IntegerOverflow,
                        })?;
                    return Ok(Value::Int(value));
                }
                match self.expr(depth + 1)? {
                    Value::Int(i) => i.checked_neg().map(Value::Int).ok_or(LiteralError {
                        offset: start,
                        kind: LiteralErrorKind::IntegerOverflow,
                    }),
                    Value::Float(x) => Ok(Value::Float(-x)),
                    _ => Err(LiteralError {
                        offset: start,
                        kind: LiteralErrorKind::BadUnaryOperand('-'),
                    }),
                }
            }
            _ => self.atom(depth),
        }
    }

    fn atom(&mut self, depth: usize) -> Result<Value, LiteralError> {
        let start = self.offset();
        let Some(token) = self.next() else {
            return Err(self.unexpected());
        };

        match token {
            Token::Str(first) => {
                let mut s = first;
                loop {
                    match self.peek() {
                        Some(Token::Str(next)) => {
                            s.push_str(next);
                            self.pos += 1;
                        }
                        Some(Token::Bytes(_)) => return Err(self.mixed()),
                        _ => break,
                    }
                }
                Ok(Value::Str(s))
            }
            Token::Bytes(first) => {
                let mut b = first;
                loop {
                    match self.peek() {
                        Some(Token::Bytes(next)) => {
                            b.extend_from_slice(next);
                            self.pos += 1;
                        }
                        Some(Token::Str(_)) => return Err(self.mixed()),
                        _ => break,
                    }
                }
                Ok(Value::Bytes(b))
            }
            Token::Int(magnitude) => i64::try_from(magnitude)
                .map(Value::Int)
                .map_err(|_| LiteralError {
                    offset: start,
                    kind: LiteralErrorKind::IntegerOverflow,
                }),
            Token::Float(x) => Ok(Value::Float(x)),
            Token::Name(name) => match name.as_str() {
                "True" => Ok(Value::Bool(true)),
                "False" => Ok(Value::Bool(false)),
                "None" => Ok(Value::None),
                _ => Err(LiteralError {
                    offset: start,
                    kind: LiteralErrorKind::NameNotAllowed(name),
                }),
            },
            Token::LParen => {
                if self.eat(&Token::RParen) {
                    return Ok(Value::Tuple(Vec::new()));
                }
                let first = self.expr(depth + 1)?;
                if self.eat(&Token::RParen) {
                    return Ok(first);
                }
                self.expect(&Token::Comma)?;
                let items = self.items_until(&Token::RParen, depth, vec![first])?;
                Ok(Value::Tuple(items))
            }
            Token::LBracket => {
                let items = self.items_until(&Token::RBracket, depth, Vec::new())?;
                Ok(Value::List(items))
            }
            Token::LBrace => self.brace(depth),
            _ => {
                self.pos -= 1;
                Err(self.unexpected())
            }
        }
    }

    fn mixed(&self) -> LiteralError {
        LiteralError {
            offset: self.offset(),
            kind: LiteralErrorKind::MixedStringKinds,
        }
    }

    /// Parses comma separated items up to and including `close`.
    fn items_until(
        &mut self,
        close: &Token,
        depth: usize,
        mut items: Vec<Value>,
    ) -> Result<Vec<Value>, LiteralError> {
        loop {
            if self.eat(close) {
                return Ok(items);
            }
            items.push(self.expr(depth + 1)?);
            if !self.eat(&Token::Comma) {
                self.expect(close)?;
                return Ok(items);
            }
        }
    }

    fn hashable(&self, value: &Value, offset: usize) -> Result<(), LiteralError> {
        if value.is_hashable() {
            Ok(())
        } else {
            Err(LiteralError {
                offset,
                kind: LiteralErrorKind::Unhashable(value.type_name()),
            })
        }
    }

    fn brace(&mut self, depth: usize) -> Result<Value, LiteralError> {
        if self.eat(&Token::RBrace) {
            return Ok(Value::Dict(Vec::new()));
        }

        let key_offset = self.offset();
        let first = self.expr(depth + 1)?;
        self.hashable(&first, key_offset)?;

        if self.eat(&Token::Colon) {
            let mut entries: Vec<(Value, Value)> = Vec::new();
            let mut key = first;
            loop {
                let value = self.expr(depth + 1)?;
                match entries.iter_mut().find(|(k, _)| k.same_key(&key)) {
                    Some(entry) => entry.1 = value,
                    None => entries.push((key, value)),
                }
                if self.eat(&Token::RBrace) {
                    break;
                }
                self.expect(&Token::Comma)?;
                if self.eat(&Token::RBrace) {
                    break;
                }
                let key_offset = self.offset();
                key = self.expr(depth + 1)?;
                self.hashable(&key, key_offset)?;
                self.expect(&Token::Colon)?;
            }
            return Ok(Value::Dict(entries));
        }

        let mut members = vec![first];
        loop {
            if self.eat(&Token::RBrace) {
                break;
            }
            self.expect(&Token::Comma)?;
            if self.eat(&Token::RBrace) {
                break;
            }
            let offset = self.offset();
            let member = self.expr(depth + 1)?;
            self.hashable(&member, offset)?;
            if !members.iter().any(|m| m.same_key(&member)) {
                members.push(member);
            }
        }
        Ok(Value::Set(members))
    }
}
