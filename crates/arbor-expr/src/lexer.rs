//! Expression tokenizer

use crate::error::{ExprError, Result};

/// Token produced from the expression source
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token<'a> {
    /// Identifier or keyword, possibly dotted (`customer.tier`)
    Ident(&'a str),
    /// Numeric literal
    Number(&'a str),
    /// String literal with quotes removed and escapes resolved
    Str(String),
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Not,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Eof,
}

impl Token<'_> {
    /// Text shown in error messages
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Ident(s) | Token::Number(s) => (*s).to_string(),
            Token::Str(s) => format!("'{}'", s),
            Token::Eq => "==".to_string(),
            Token::Ne => "!=".to_string(),
            Token::Lt => "<".to_string(),
            Token::Le => "<=".to_string(),
            Token::Gt => ">".to_string(),
            Token::Ge => ">=".to_string(),
            Token::And => "&&".to_string(),
            Token::Or => "||".to_string(),
            Token::Not => "!".to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Percent => "%".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::LBracket => "[".to_string(),
            Token::RBracket => "]".to_string(),
            Token::Comma => ",".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

/// Token paired with its byte offset
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned<'a> {
    pub(crate) token: Token<'a>,
    pub(crate) position: usize,
}

/// Split `input` into tokens, ending with `Token::Eof`
pub(crate) fn tokenize(input: &str) -> Result<Vec<Spanned<'_>>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let start = offset;
        let next = bytes.get(offset + 1).copied();

        let token = match bytes[offset] {
            b' ' | b'\t' | b'\n' | b'\r' => {
                offset += 1;
                continue;
            }
            b'(' => single(&mut offset, Token::LParen),
            b')' => single(&mut offset, Token::RParen),
            b'[' => single(&mut offset, Token::LBracket),
            b']' => single(&mut offset, Token::RBracket),
            b',' => single(&mut offset, Token::Comma),
            b'+' => single(&mut offset, Token::Plus),
            b'-' => single(&mut offset, Token::Minus),
            b'*' => single(&mut offset, Token::Star),
            b'/' => single(&mut offset, Token::Slash),
            b'%' => single(&mut offset, Token::Percent),
            b'=' if next == Some(b'=') => double(&mut offset, Token::Eq),
            b'!' if next == Some(b'=') => double(&mut offset, Token::Ne),
            b'!' => single(&mut offset, Token::Not),
            b'<' if next == Some(b'=') => double(&mut offset, Token::Le),
            b'<' => single(&mut offset, Token::Lt),
            b'>' if next == Some(b'=') => double(&mut offset, Token::Ge),
            b'>' => single(&mut offset, Token::Gt),
            b'&' if next == Some(b'&') => double(&mut offset, Token::And),
            b'|' if next == Some(b'|') => double(&mut offset, Token::Or),
            b'\'' | b'"' => {
                let (value, end) = string_literal(input, start)?;
                offset = end;
                Token::Str(value)
            }
            b'0'..=b'9' => {
                offset = scan(bytes, offset, |b| b.is_ascii_digit() || b == b'.');
                Token::Number(&input[start..offset])
            }
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                offset = scan(bytes, offset, |b| {
                    b.is_ascii_alphanumeric() || b == b'_' || b == b'.'
                });
                Token::Ident(&input[start..offset])
            }
            _ => {
                let found = input[start..].chars().next().map(String::from).unwrap_or_default();
                return Err(ExprError::UnexpectedToken {
                    expected: "operand or operator",
                    found,
                    position: start,
                });
            }
        };

        tokens.push(Spanned {
            token,
            position: start,
        });
    }

    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }

    tokens.push(Spanned {
        token: Token::Eof,
        position: input.len(),
    });
    Ok(tokens)
}

fn single<'a>(offset: &mut usize, token: Token<'a>) -> Token<'a> {
    *offset += 1;
    token
}

fn double<'a>(offset: &mut usize, token: Token<'a>) -> Token<'a> {
    *offset += 2;
    token
}

fn scan(bytes: &[u8], mut offset: usize, accept: impl Fn(u8) -> bool) -> usize {
    while offset < bytes.len() && accept(bytes[offset]) {
        offset += 1;
    }
    offset
}

/// Read a quoted literal starting at `start`; returns the value and the offset past the closing quote
fn string_literal(input: &str, start: usize) -> Result<(String, usize)> {
    let mut chars = input[start..].char_indices();
    let quote = match chars.next() {
        Some((_, c)) => c,
        None => return Err(ExprError::UnterminatedString { position: start }),
    };

    let mut value = String::new();
    let mut escaped = false;
    for (i, c) in chars {
        if escaped {
            value.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return Ok((value, start + i + c.len_utf8()));
        } else {
            value.push(c);
        }
    }

    Err(ExprError::UnterminatedString { position: start })
}
