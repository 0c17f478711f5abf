//! Tokenizer for literal expressions.
//!
//! Produces the complete token list up front. Names are lexed as tokens so the
//! parser can reject them with a precise message; nothing here resolves them.

use super::error::{LiteralError, LiteralErrorKind};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Str(String),
    Bytes(Vec<u8>),
    /// Unsigned magnitude; sign is applied by the parser.
    Int(u128),
    Float(f64),
    Name(String),
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Plus,
    Minus,
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Str(_) => "string".to_string(),
            Token::Bytes(_) => "bytes".to_string(),
            Token::Int(i) => i.to_string(),
            Token::Float(x) => x.to_string(),
            Token::Name(n) => n.clone(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::LBracket => "'['".to_string(),
            Token::RBracket => "']'".to_string(),
            Token::LBrace => "'{'".to_string(),
            Token::RBrace => "'}'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Colon => "':'".to_string(),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub offset: usize,
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Spanned>, LiteralError> {
    let mut lexer = Lexer {
        src: input,
        pos: 0,
        tokens: Vec::new(),
    };
    lexer.run()?;
    Ok(lexer.tokens)
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    tokens: Vec<Spanned>,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl Lexer<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn err(&self, offset: usize, kind: LiteralErrorKind) -> LiteralError {
        LiteralError { offset, kind }
    }

    fn push(&mut self, token: Token, offset: usize) {
        self.tokens.push(Spanned { token, offset });
    }

    fn run(&mut self) -> Result<(), LiteralError> {
        while let Some(c) = self.peek() {
            let start = self.pos;
            match c {
                ' ' | '\t' | '\r' | '\n' | '\x0c' => {
                    self.bump();
                }
                '#' => {
                    // Comment runs to end of line.
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                '(' | ')' | '[' | ']' | '{' | '}' | ',' | ':' | '+' | '-' => {
                    self.bump();
                    let token = match c {
                        '(' => Token::LParen,
                        ')' => Token::RParen,
                        '[' => Token::LBracket,
                        ']' => Token::RBracket,
                        '{' => Token::LBrace,
                        '}' => Token::RBrace,
                        ',' => Token::Comma,
                        ':' => Token::Colon,
                        '+' => Token::Plus,
                        _ => Token::Minus,
                    };
                    self.push(token, start);
                }
                '\'' | '"' => self.string(start, false, false)?,
                c if c.is_ascii_digit() => self.number(start)?,
                '.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => self.number(start)?,
                c if is_word_char(c) => self.word(start)?,
                other => return Err(self.err(start, LiteralErrorKind::UnexpectedChar(other))),
            }
        }
        Ok(())
    }

    fn word(&mut self, start: usize) -> Result<(), LiteralError> {
        let src = self.src;
        while self.peek().is_some_and(is_word_char) {
            self.bump();
        }
        let word = &src[start..self.pos];
        if matches!(self.peek(), Some('\'' | '"')) {
            let prefix = word.to_ascii_lowercase();
            return match prefix.as_str() {
                "r" => self.string(start, true, false),
                "u" => self.string(start, false, false),
                "b" => self.string(start, false, true),
                "br" | "rb" => self.string(start, true, true),
                _ => Err(self.err(start, LiteralErrorKind::UnsupportedPrefix(word.to_string()))),
            };
        }
        self.push(Token::Name(word.to_string()), start);
        Ok(())
    }

    fn number(&mut self, start: usize) -> Result<(), LiteralError> {
        let src = self.src;
        let rest = &src[start..];
        let radix = match rest.get(..2).map(str::to_ascii_lowercase).as_deref() {
            Some("0x") => Some(16),
            Some("0o") => Some(8),
            Some("0b") => Some(2),
            _ => None,
        };

        if let Some(radix) = radix {
            self.pos += 2;
            while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
                self.bump();
            }
            let text = &src[start..self.pos];
            let digits = strip_underscores(&text[2..], true)
                .ok_or_else(|| self.invalid_number(start, text))?;
            let value = u128::from_str_radix(&digits, radix).map_err(|e| {
                if matches!(e.kind(), std::num::IntErrorKind::PosOverflow) {
                    self.err(start, LiteralErrorKind::IntegerOverflow)
                } else {
                    self.invalid_number(start, text)
                }
            })?;
            self.push(Token::Int(value), start);
            return Ok(());
        }

        let mut is_float = false;
        self.digits();
        if self.peek() == Some('.') {
            is_float = true;
            self.bump();
            self.digits();
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            self.digits();
        }
        // A number glued to a word (`1abc`, `3j`) is not a literal we accept.
        if self.peek().is_some_and(is_word_char) {
            while self.peek().is_some_and(is_word_char) {
                self.bump();
            }
            let text = &src[start..self.pos];
            return Err(self.invalid_number(start, text));
        }

        let text = &src[start..self.pos];
        let cleaned =
            strip_underscores(text, false).ok_or_else(|| self.invalid_number(start, text))?;
        if is_float {
            let value: f64 = cleaned
                .parse()
                .map_err(|_| self.invalid_number(start, text))?;
            self.push(Token::Float(value), start);
        } else {
            // Decimal integers may not carry leading zeros, except zero itself.
            if cleaned.len() > 1 && cleaned.starts_with('0') && cleaned.bytes().any(|b| b != b'0')
            {
                return Err(self.invalid_number(start, text));
            }
            let value: u128 = cleaned
                .parse()
                .map_err(|_| self.err(start, LiteralErrorKind::IntegerOverflow))?;
            self.push(Token::Int(value), start);
        }
        Ok(())
    }

    fn digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.bump();
        }
    }

    fn invalid_number(&self, start: usize, text: &str) -> LiteralError {
        self.err(start, LiteralErrorKind::InvalidNumber(text.to_string()))
    }

    fn string(&mut self, start: usize, raw: bool, bytes: bool) -> Result<(), LiteralError> {
        let Some(quote) = self.bump() else {
            return Err(self.err(start, LiteralErrorKind::UnexpectedEnd));
        };
        let triple = self.peek() == Some(quote) && self.peek_at(1) == Some(quote);
        if triple {
            self.bump();
            self.bump();
        }

        let mut out = StringBuf::new(bytes);
        loop {
            let at = self.pos;
            let c = self
                .bump()
                .ok_or_else(|| self.err(start, LiteralErrorKind::UnterminatedString))?;
            match c {
                c if c == quote => {
                    if !triple {
                        break;
                    }
                    if self.peek() == Some(quote) && self.peek_at(1) == Some(quote) {
                        self.bump();
                        self.bump();
                        break;
                    }
                    out.push_char(c, at)?;
                }
                '\n' if !triple => {
                    return Err(self.err(start, LiteralErrorKind::UnterminatedString));
                }
                '\\' if raw => {
                    // Raw strings keep the backslash but it still shields the next char.
                    out.push_char('\\', at)?;
                    let next = self
                        .bump()
                        .ok_or_else(|| self.err(start, LiteralErrorKind::UnterminatedString))?;
                    out.push_char(next, at)?;
                }
                '\\' => self.escape(&mut out, at)?,
                c => out.push_char(c, at)?,
            }
        }

        let token = match out {
            StringBuf::Str(s) => Token::Str(s),
            StringBuf::Bytes(b) => Token::Bytes(b),
        };
        self.push(token, start);
        Ok(())
    }

    fn escape(&mut self, out: &mut StringBuf, at: usize) -> Result<(), LiteralError> {
        let c = self
            .bump()
            .ok_or_else(|| self.err(at, LiteralErrorKind::UnterminatedString))?;
        match c {
            '\n' => {}
            '\\' => out.push_char('\\', at)?,
            '\'' => out.push_char('\'', at)?,
            '"' => out.push_char('"', at)?,
            'a' => out.push_char('\x07', at)?,
            'b' => out.push_char('\x08', at)?,
            'f' => out.push_char('\x0c', at)?,
            'n' => out.push_char('\n', at)?,
            'r' => out.push_char('\r', at)?,
            't' => out.push_char('\t', at)?,
            'v' => out.push_char('\x0b', at)?,
            '0'..='7' => {
                let mut value = c.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|c| c.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            self.bump();
                        }
                        None => break,
                    }
                }
                out.push_code(value, at, self)?;
            }
            'x' => {
                let value = self.hex_digits(2, at)?;
                out.push_code(value, at, self)?;
            }
            'u' | 'U' if !out.is_bytes() => {
                let width = if c == 'u' { 4 } else { 8 };
                let value = self.hex_digits(width, at)?;
                out.push_code(value, at, self)?;
            }
            'N' if !out.is_bytes() => {
                return Err(self.err(at, LiteralErrorKind::InvalidEscape("\\N{...}".to_string())));
            }
            other => {
                // Unknown escapes are kept verbatim.
                out.push_char('\\', at)?;
                out.push_char(other, at)?;
            }
        }
        Ok(())
    }

    fn hex_digits(&mut self, width: usize, at: usize) -> Result<u32, LiteralError> {
        let mut value = 0u32;
        for _ in 0..width {
            let digit = self.peek().and_then(|c| c.to_digit(16)).ok_or_else(|| {
                self.err(at, LiteralErrorKind::InvalidEscape(format!("expected {width} hex digits")))
            })?;
            self.bump();
            value = value
                .checked_mul(16)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(|| self.err(at, LiteralErrorKind::InvalidEscape("overflow".into())))?;
        }
        Ok(value)
    }
}

/// `_` may only sit between two digits, or directly after a radix prefix
/// when `after_prefix` is set (`0x_1F`).
fn strip_underscores(text: &str, after_prefix: bool) -> Option<String> {
    // Letters are digits in radix literals; invalid ones fail at conversion.
    let is_digit = |b: u8| {
        if after_prefix {
            b.is_ascii_alphanumeric()
        } else {
            b.is_ascii_digit()
        }
    };
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'_' {
            let before_ok = match i.checked_sub(1) {
                Some(j) => is_digit(bytes[j]),
                None => after_prefix,
            };
            let after_ok = bytes.get(i + 1).copied().is_some_and(is_digit);
            if !before_ok || !after_ok {
                return None;
            }
        }
    }
    Some(text.replace('_', ""))
}

enum StringBuf {
    Str(String),
    Bytes(Vec<u8>),
}

impl StringBuf {
    fn new(bytes: bool) -> Self {
        if bytes {
            StringBuf::Bytes(Vec::new())
        } else {
            StringBuf::Str(String::new())
        }
    }

    fn is_bytes(&self) -> bool {
        matches!(self, StringBuf::Bytes(_))
    }

    fn push_char(&mut self, c: char, at: usize) -> Result<(), LiteralError> {
        match self {
            StringBuf::Str(s) => s.push(c),
            StringBuf::Bytes(b) if c.is_ascii() => b.push(c as u8),
            StringBuf::Bytes(_) => {
                return Err(LiteralError {
                    offset: at,
                    kind: LiteralErrorKind::NonAsciiBytes,
                });
            }
        }
        Ok(())
    }

    fn push_code(&mut self, code: u32, at: usize, lexer: &Lexer<'_>) -> Result<(), LiteralError> {
        match self {
            StringBuf::Str(s) => {
                let c = char::from_u32(code).ok_or_else(|| {
                    lexer.err(at, LiteralErrorKind::InvalidEscape(format!("\\U{code:08x}")))
                })?;
                s.push(c);
            }
            StringBuf::Bytes(b) => {
                let byte = u8::try_from(code).map_err(|_| {
                    lexer.err(at, LiteralErrorKind::InvalidEscape(format!("\\{code:o}")))
                })?;
                b.push(byte);
            }
        }
        Ok(())
    }
}
