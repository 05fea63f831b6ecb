//! Expression parser
//!
//! Recursive descent over the token stream, lowest precedence first:
//!
//! ```text
//! or          := and ( "||" and )*
//! and         := comparison ( "&&" comparison )*
//! comparison  := additive ( cmp_op additive )?
//! cmp_op      := "==" | "!=" | "<" | "<=" | ">" | ">=" | IN | NOT IN
//!              | contains | starts_with | ends_with
//! additive    := multiplicative ( ("+" | "-") multiplicative )*
//! multiplicative := unary ( ("*" | "/" | "%") unary )*
//! unary       := ("!" | "-") unary | primary
//! primary     := number | string | true | false | null | fact
//!              | "(" or ("," or)* ")" | "[" ( or ("," or)* )? "]"
//! ```
//!
//! Keyword operators match case-insensitively. A parenthesised group with
//! more than one element is a list, so `tier IN ('gold', 'silver')` works.

use crate::ast::{Expr, Operator, UnaryOperator};
use crate::error::{ExprError, Result};
use crate::lexer::{tokenize, Spanned, Token};
use arbor_core::Value;

/// Maximum accepted expression source size in bytes
pub const MAX_EXPRESSION_BYTES: usize = 64 * 1024;

/// Maximum depth of the parsed tree, counting groups, unary operators
/// and chained binary operators
pub const MAX_EXPRESSION_NESTING: usize = 128;

/// Parse expression source into an AST
pub fn parse(input: &str) -> Result<Expr> {
    if input.len() > MAX_EXPRESSION_BYTES {
        return Err(ExprError::TooLarge {
            max: MAX_EXPRESSION_BYTES,
            actual: input.len(),
        });
    }

    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        index: 0,
        nesting: 0,
    };

    let expr = parser.parse_or()?;
    let end = parser.current();
    if end.token != Token::Eof {
        return Err(ExprError::UnexpectedToken {
            expected: "end of input",
            found: end.token.describe(),
            position: end.position,
        });
    }
    Ok(expr)
}

struct Parser<'a> {
    tokens: Vec<Spanned<'a>>,
    index: usize,
    nesting: usize,
}

impl<'a> Parser<'a> {
    fn parse_or(&mut self) -> Result<Expr> {
        let saved = self.nesting;
        let mut left = self.parse_and()?;

        while self.current().token == Token::Or {
            let position = self.current().position;
            self.advance();
            self.deepen(position)?;
            let right = self.parse_and()?;
            left = Expr::binary(left, Operator::Or, right);
        }

        self.nesting = saved;
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let saved = self.nesting;
        let mut left = self.parse_comparison()?;

        while self.current().token == Token::And {
            let position = self.current().position;
            self.advance();
            self.deepen(position)?;
            let right = self.parse_comparison()?;
            left = Expr::binary(left, Operator::And, right);
        }

        self.nesting = saved;
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr> {
        let left = self.parse_additive()?;

        let op = match self.comparison_operator() {
            Some(op) => op,
            None => return Ok(left),
        };

        let right = self.parse_additive()?;
        Ok(Expr::binary(left, op, right))
    }

    /// Consume a comparison operator if one is next
    fn comparison_operator(&mut self) -> Option<Operator> {
        let token = self.current().token.clone();
        let op = match token {
            Token::Eq => Operator::Eq,
            Token::Ne => Operator::Ne,
            Token::Lt => Operator::Lt,
            Token::Le => Operator::Le,
            Token::Gt => Operator::Gt,
            Token::Ge => Operator::Ge,
            Token::Ident(word) if word.eq_ignore_ascii_case("in") => Operator::In,
            Token::Ident(word) if word.eq_ignore_ascii_case("contains") => Operator::Contains,
            Token::Ident(word) if word.eq_ignore_ascii_case("starts_with") => Operator::StartsWith,
            Token::Ident(word) if word.eq_ignore_ascii_case("ends_with") => Operator::EndsWith,
            Token::Ident(word) if word.eq_ignore_ascii_case("not") => {
                let followed_by_in = matches!(
                    self.peek().token,
                    Token::Ident(next) if next.eq_ignore_ascii_case("in")
                );
                if !followed_by_in {
                    return None;
                }
                self.advance();
                Operator::NotIn
            }
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let saved = self.nesting;
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current().token {
                Token::Plus => Operator::Add,
                Token::Minus => Operator::Sub,
                _ => break,
            };
            let position = self.current().position;
            self.advance();
            self.deepen(position)?;
            let right = self.parse_multiplicative()?;
            left = Expr::binary(left, op, right);
        }

        self.nesting = saved;
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let saved = self.nesting;
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current().token {
                Token::Star => Operator::Mul,
                Token::Slash => Operator::Div,
                Token::Percent => Operator::Mod,
                _ => break,
            };
            let position = self.current().position;
            self.advance();
            self.deepen(position)?;
            let right = self.parse_unary()?;
            left = Expr::binary(left, op, right);
        }

        self.nesting = saved;
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let op = match self.current().token {
            Token::Not => UnaryOperator::Not,
            Token::Minus => UnaryOperator::Negate,
            _ => return self.parse_primary(),
        };
        let position = self.current().position;
        self.advance();

        // Negative literals are parsed with their sign so i64::MIN fits
        if op == UnaryOperator::Negate {
            if let Token::Number(raw) = self.current().token.clone() {
                self.advance();
                return parse_number(&format!("-{}", raw), position).map(Expr::Literal);
            }
        }

        let operand = self.with_nesting(position, |parser| parser.parse_unary())?;

        Ok(match (op, operand) {
            (UnaryOperator::Negate, Expr::Literal(Value::Int(i))) if i != i64::MIN => {
                Expr::Literal(Value::Int(-i))
            }
            (UnaryOperator::Negate, Expr::Literal(Value::Float(f))) => {
                Expr::Literal(Value::Float(-f))
            }
            (op, operand) => Expr::unary(op, operand),
        })
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let Spanned { token, position } = self.current().clone();

        match token {
            Token::Number(raw) => {
                self.advance();
                parse_number(raw, position).map(Expr::Literal)
            }
            Token::Str(value) => {
                self.advance();
                Ok(Expr::Literal(Value::String(value)))
            }
            Token::Ident(word) => {
                self.advance();
                match word {
                    "true" | "TRUE" => Ok(Expr::literal(true)),
                    "false" | "FALSE" => Ok(Expr::literal(false)),
                    "null" | "NULL" => Ok(Expr::Literal(Value::Null)),
                    _ if word.split('.').any(str::is_empty) => Err(ExprError::UnexpectedToken {
                        expected: "fact name",
                        found: word.to_string(),
                        position,
                    }),
                    _ => Ok(Expr::fact(word)),
                }
            }
            Token::LParen => {
                self.advance();
                self.with_nesting(position, |parser| {
                    let mut items = vec![parser.parse_or()?];
                    while parser.current().token == Token::Comma {
                        parser.advance();
                        items.push(parser.parse_or()?);
                    }
                    parser.expect(Token::RParen, "`)`")?;
                    Ok(if items.len() == 1 {
                        items.remove(0)
                    } else {
                        Expr::List(items)
                    })
                })
            }
            Token::LBracket => {
                self.advance();
                self.with_nesting(position, |parser| {
                    let mut items = Vec::new();
                    if parser.current().token != Token::RBracket {
                        items.push(parser.parse_or()?);
                        while parser.current().token == Token::Comma {
                            parser.advance();
                            items.push(parser.parse_or()?);
                        }
                    }
                    parser.expect(Token::RBracket, "`]`")?;
                    Ok(Expr::List(items))
                })
            }
            other => Err(ExprError::UnexpectedToken {
                expected: "operand",
                found: other.describe(),
                position,
            }),
        }
    }

    fn current(&self) -> &Spanned<'a> {
        // tokenize always ends the stream with Eof and the parser never moves past it
        &self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Spanned<'a> {
        &self.tokens[(self.index + 1).min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) {
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
    }

    fn expect(&mut self, expected: Token<'_>, label: &'static str) -> Result<()> {
        let current = self.current();
        if current.token == expected {
            self.advance();
            Ok(())
        } else {
            Err(ExprError::UnexpectedToken {
                expected: label,
                found: current.token.describe(),
                position: current.position,
            })
        }
    }

    fn deepen(&mut self, position: usize) -> Result<()> {
        let next = self.nesting + 1;
        if next > MAX_EXPRESSION_NESTING {
            return Err(ExprError::TooDeep {
                max: MAX_EXPRESSION_NESTING,
                position,
            });
        }
        self.nesting = next;
        Ok(())
    }

    /// Runs a parser step one level deeper
    fn with_nesting<T>(
        &mut self,
        position: usize,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let saved = self.nesting;
        self.deepen(position)?;
        let result = f(self);
        self.nesting = saved;
        result
    }
}

fn parse_number(raw: &str, position: usize) -> Result<Value> {
    let invalid = || ExprError::InvalidNumber {
        raw: raw.to_string(),
        position,
    };

    if raw.contains('.') {
        raw.parse::<f64>().map(Value::Float).map_err(|_| invalid())
    } else {
        raw.parse::<i64>().map(Value::Int).map_err(|_| invalid())
    }
}
