use crate::{
    vocabulary::{Binding, Vocabulary},
    BinaryOperation, Expression,
};
use dashu::{
    integer::{IBig, UBig},
    rational::RBig,
};
use smol_str::SmolStr;
use std::{
    fmt::{self, Display, Formatter},
    iter::Peekable,
    ops::Range,
};

/// How deeply parentheses, negations and exponents may be nested.
const MAX_DEPTH: usize = 256;
/// The most tokens a single expression may contain.
const MAX_TOKENS: usize = 1024;

/// Parse an [`Expression`] tree from some text, only accepting the names
/// listed in a [`Vocabulary`].
pub fn parse(s: &str, vocab: &Vocabulary) -> Result<Expression, ParseError> {
    check_references(s, vocab)?;
    Parser::new(s, vocab).parse()
}

/// Scan every identifier in the text and reject the first one which isn't
/// on the allow-list, or the text as a whole if it is too long.
///
/// This runs before the grammar is applied, so something like `import os`
/// is reported as a disallowed reference rather than a syntax error.
fn check_references(s: &str, vocab: &Vocabulary) -> Result<(), ParseError> {
    for (count, token) in Tokens::new(s).enumerate() {
        if count >= MAX_TOKENS {
            return Err(ParseError::TooLong { limit: MAX_TOKENS });
        }

        let token = match token {
            Ok(token) => token,
            Err(_) => continue,
        };

        if token.kind == TokenKind::Identifier
            && vocab.resolve(token.text).is_none()
        {
            return Err(ParseError::DisallowedReference {
                name: token.text.into(),
                span: token.span,
            });
        }
    }

    Ok(())
}

/// A simple recursive descent parser (`LL(1)`) for converting a string into an
/// expression tree.
///
/// The grammar:
///
/// ```text
/// expression     := term (("+" | "-") term)*
///
/// term           := unary (("*" | "/") unary)*
///
/// unary          := "-" unary
///                 | "+" unary
///                 | power
///
/// power          := primary ("^" unary)?
///
/// primary        := NUMBER
///                 | IDENTIFIER "(" expression ")"
///                 | IDENTIFIER
///                 | "(" expression ")"
/// ```
///
/// `**` is lexed as `^`. Every level of nesting passes through `unary`,
/// which is where [`MAX_DEPTH`] is enforced.
#[derive(Debug, Clone)]
pub(crate) struct Parser<'a> {
    tokens: Peekable<Tokens<'a>>,
    vocab: &'a Vocabulary,
    src: &'a str,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(src: &'a str, vocab: &'a Vocabulary) -> Self {
        Parser {
            tokens: Tokens::new(src).peekable(),
            vocab,
            src,
            depth: 0,
        }
    }

    pub(crate) fn parse(mut self) -> Result<Expression, ParseError> {
        if self.src.trim().is_empty() {
            return Err(ParseError::Empty);
        }

        let expr = self.expression()?;

        match self.tokens.next() {
            None => Ok(expr),
            Some(Ok(token)) => Err(ParseError::UnexpectedToken {
                found: token.kind,
                span: token.span,
                expected: &[],
            }),
            Some(Err(e)) => Err(e),
        }
    }

    fn peek(&mut self) -> Option<TokenKind> {
        self.tokens
            .peek()
            .and_then(|result| result.as_ref().ok())
            .map(|tok| tok.kind)
    }

    fn advance(&mut self) -> Result<Token<'a>, ParseError> {
        match self.tokens.next() {
            Some(result) => result,
            None => Err(ParseError::UnexpectedEndOfInput),
        }
    }

    fn expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.term()?;

        while let Some(op) =
            self.binary_op(&[TokenKind::Plus, TokenKind::Minus])?
        {
            let right = self.term()?;
            left = Expression::Binary {
                left: Box::new(left),
                right: Box::new(right),
                op,
            };
        }

        Ok(left)
    }

    fn term(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.unary()?;

        while let Some(op) =
            self.binary_op(&[TokenKind::Times, TokenKind::Divide])?
        {
            let right = self.unary()?;
            left = Expression::Binary {
                left: Box::new(left),
                right: Box::new(right),
                op,
            };
        }

        Ok(left)
    }

    /// If the next token is one of the `expected` operators, skip past it.
    fn binary_op(
        &mut self,
        expected: &[TokenKind],
    ) -> Result<Option<BinaryOperation>, ParseError> {
        match self.peek() {
            Some(kind) if expected.contains(&kind) => {
                let _ = self.advance()?;
                Ok(Some(kind.as_binary_op()))
            },
            _ => Ok(None),
        }
    }

    fn unary(&mut self) -> Result<Expression, ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::TooDeeplyNested { limit: MAX_DEPTH });
        }

        let expr = match self.peek() {
            Some(TokenKind::Minus) => {
                let _ = self.advance()?;
                let operand = self.unary()?;
                Expression::Negate(Box::new(operand))
            },
            Some(TokenKind::Plus) => {
                let _ = self.advance()?;
                self.unary()?
            },
            _ => self.power()?,
        };

        self.depth -= 1;
        Ok(expr)
    }

    fn power(&mut self) -> Result<Expression, ParseError> {
        let base = self.primary()?;

        match self.binary_op(&[TokenKind::Caret])? {
            // the exponent may itself be negated, e.g. "x^-1"
            Some(op) => Ok(Expression::Binary {
                left: Box::new(base),
                right: Box::new(self.unary()?),
                op,
            }),
            None => Ok(base),
        }
    }

    fn primary(&mut self) -> Result<Expression, ParseError> {
        let expected = &[
            TokenKind::Number,
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::Minus,
        ];

        match self.peek() {
            Some(TokenKind::Number) => {
                return self.number();
            },
            Some(TokenKind::Identifier) => {
                return self.variable_or_application()
            },
            Some(TokenKind::OpenParen) => {
                let _ = self.advance()?;
                let expr = self.expression()?;
                self.close_paren()?;
                return Ok(expr);
            },
            _ => {},
        }

        // we couldn't parse the primary, return a nice error
        match self.tokens.next() {
            Some(Ok(Token { span, kind, .. })) => {
                Err(ParseError::UnexpectedToken {
                    found: kind,
                    expected,
                    span,
                })
            },
            Some(Err(e)) => Err(e),
            None => Err(ParseError::UnexpectedEndOfInput),
        }
    }

    fn close_paren(&mut self) -> Result<(), ParseError> {
        let Token { kind, span, .. } = self.advance()?;

        if kind == TokenKind::CloseParen {
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                found: kind,
                span,
                expected: &[TokenKind::CloseParen],
            })
        }
    }

    fn variable_or_application(&mut self) -> Result<Expression, ParseError> {
        let ident = self.advance()?;
        debug_assert_eq!(ident.kind, TokenKind::Identifier);

        let variable = match self.vocab.resolve(ident.text) {
            Some(Binding::Unknown) => Expression::Unknown,
            None => {
                return Err(ParseError::DisallowedReference {
                    name: ident.text.into(),
                    span: ident.span,
                })
            },
        };

        if self.peek() == Some(TokenKind::OpenParen) {
            let _ = self.advance()?;
            let argument = self.expression()?;
            self.close_paren()?;

            Ok(Expression::Apply {
                callee: Box::new(variable),
                argument: Box::new(argument),
            })
        } else {
            Ok(variable)
        }
    }

    fn number(&mut self) -> Result<Expression, ParseError> {
        let token = self
            .tokens
            .next()
            .ok_or(ParseError::UnexpectedEndOfInput)??;

        debug_assert_eq!(token.kind, TokenKind::Number);

        parse_decimal(token.text)
            .map(Expression::Constant)
            .ok_or(ParseError::InvalidNumber { span: token.span })
    }
}

/// Convert a decimal literal like `3.25` into the exact rational `13/4`.
fn parse_decimal(text: &str) -> Option<RBig> {
    let (whole, fraction) = match text.find('.') {
        Some(index) => (&text[..index], &text[index + 1..]),
        None => (text, ""),
    };

    let digits = format!("{}{}", whole, fraction);
    let numerator = IBig::from_str_radix(&digits, 10).ok()?;
    let denominator = UBig::from(10u8).pow(fraction.len());

    Some(RBig::from_parts(numerator, denominator))
}

/// Possible errors that may occur while parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    Empty,
    InvalidCharacter {
        character: char,
        index: usize,
    },
    InvalidNumber {
        span: Range<usize>,
    },
    UnexpectedEndOfInput,
    UnexpectedToken {
        found: TokenKind,
        span: Range<usize>,
        expected: &'static [TokenKind],
    },
    /// The text mentions a name which isn't on the allow-list.
    DisallowedReference {
        name: SmolStr,
        span: Range<usize>,
    },
    TooDeeplyNested {
        limit: usize,
    },
    TooLong {
        limit: usize,
    },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "expression is empty"),
            ParseError::InvalidCharacter { character, index } => write!(
                f,
                "invalid character {:?} at position {}",
                character, index
            ),
            ParseError::InvalidNumber { span } => {
                write!(f, "invalid number at position {}", span.start)
            },
            ParseError::UnexpectedEndOfInput => {
                write!(f, "unexpected end of input")
            },
            ParseError::UnexpectedToken {
                found,
                span,
                expected,
            } => {
                write!(f, "unexpected {} at position {}", found, span.start)?;

                if !expected.is_empty() {
                    let names: Vec<_> =
                        expected.iter().map(ToString::to_string).collect();
                    write!(f, ", expected {}", names.join(" or "))?;
                }

                Ok(())
            },
            ParseError::DisallowedReference { name, .. } => {
                write!(f, "\"{}\" is not an allowed name", name)
            },
            ParseError::TooDeeplyNested { limit } => write!(
                f,
                "expression is nested more than {} levels deep",
                limit
            ),
            ParseError::TooLong { limit } => {
                write!(f, "expression has more than {} tokens", limit)
            },
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, PartialEq)]
struct Tokens<'a> {
    src: &'a str,
    cursor: usize,
}

impl<'a> Tokens<'a> {
    fn new(src: &'a str) -> Self { Tokens { src, cursor: 0 } }

    fn rest(&self) -> &'a str { &self.src[self.cursor..] }

    fn peek(&self) -> Option<char> { self.rest().chars().next() }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor += c.len_utf8();
        Some(c)
    }

    fn chomp(&mut self, kind: TokenKind) -> Token<'a> {
        let start = self.cursor;
        self.advance();
        let end = self.cursor;

        Token::from_text(self.src, start..end, kind)
    }

    fn take_while<P>(&mut self, mut predicate: P) -> Range<usize>
    where
        P: FnMut(char) -> bool,
    {
        let start = self.cursor;

        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }

            self.advance();
        }

        start..self.cursor
    }

    fn chomp_number(&mut self) -> Token<'a> {
        let start = self.cursor;
        self.take_while(|c| c.is_ascii_digit());

        if self.peek() == Some('.') {
            // skip past the decimal
            self.advance();
            self.take_while(|c| c.is_ascii_digit());
        }

        let end = self.cursor;

        Token::from_text(self.src, start..end, TokenKind::Number)
    }

    fn chomp_identifier(&mut self) -> Token<'a> {
        let mut seen_first_character = false;

        let span = self.take_while(|c| {
            if seen_first_character {
                c.is_alphanumeric() || c == '_'
            } else {
                seen_first_character = true;
                c.is_alphabetic() || c == '_'
            }
        });

        Token::from_text(self.src, span, TokenKind::Identifier)
    }

    fn chomp_star(&mut self) -> Token<'a> {
        let start = self.cursor;
        self.advance();

        // "**" is another way of writing "^"
        let kind = if self.peek() == Some('*') {
            self.advance();
            TokenKind::Caret
        } else {
            TokenKind::Times
        };

        Token::from_text(self.src, start..self.cursor, kind)
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            return match self.peek()? {
                space if space.is_whitespace() => {
                    self.advance();
                    continue;
                },
                '(' => Some(Ok(self.chomp(TokenKind::OpenParen))),
                ')' => Some(Ok(self.chomp(TokenKind::CloseParen))),
                '+' => Some(Ok(self.chomp(TokenKind::Plus))),
                '-' => Some(Ok(self.chomp(TokenKind::Minus))),
                '/' => Some(Ok(self.chomp(TokenKind::Divide))),
                '^' => Some(Ok(self.chomp(TokenKind::Caret))),
                '*' => Some(Ok(self.chomp_star())),
                '_' | 'a'..='z' | 'A'..='Z' => {
                    Some(Ok(self.chomp_identifier()))
                },
                '0'..='9' => Some(Ok(self.chomp_number())),
                '.' if self.rest()[1..].starts_with(|c: char| {
                    c.is_ascii_digit()
                }) =>
                {
                    Some(Ok(self.chomp_number()))
                },
                other => {
                    let index = self.cursor;
                    // step over it so the caller can keep scanning
                    self.advance();
                    Some(Err(ParseError::InvalidCharacter {
                        character: other,
                        index,
                    }))
                },
            };
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Token<'a> {
    text: &'a str,
    span: Range<usize>,
    kind: TokenKind,
}

impl<'a> Token<'a> {
    fn from_text(
        original_source: &'a str,
        span: Range<usize>,
        kind: TokenKind,
    ) -> Self {
        Token {
            text: &original_source[span.clone()],
            span,
            kind,
        }
    }
}

/// The kinds of token that can appear in an [`Expression`]'s text form.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TokenKind {
    Identifier,
    Number,
    OpenParen,
    CloseParen,
    Plus,
    Minus,
    Times,
    Divide,
    Caret,
}

impl TokenKind {
    fn as_binary_op(self) -> BinaryOperation {
        match self {
            TokenKind::Plus => BinaryOperation::Plus,
            TokenKind::Minus => BinaryOperation::Minus,
            TokenKind::Times => BinaryOperation::Times,
            TokenKind::Divide => BinaryOperation::Divide,
            TokenKind::Caret => BinaryOperation::Power,
            other => unreachable!("{:?} is not a binary op", other),
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => write!(f, "name"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::OpenParen => write!(f, "\"(\""),
            TokenKind::CloseParen => write!(f, "\")\""),
            TokenKind::Plus => write!(f, "\"+\""),
            TokenKind::Minus => write!(f, "\"-\""),
            TokenKind::Times => write!(f, "\"*\""),
            TokenKind::Divide => write!(f, "\"/\""),
            TokenKind::Caret => write!(f, "\"^\""),
        }
    }
}

#[cfg(test)]
mod tokenizer_tests {
    use super::*;

    macro_rules! tokenize_test {
        ($name:ident, $src:expr, $should_be:expr) => {
            #[test]
            fn $name() {
                let mut tokens = Tokens::new($src);

                let got = tokens.next().unwrap().unwrap();

                let Range { start, end } = got.span;
                assert_eq!(start, 0);
                assert_eq!(end, $src.len());
                assert_eq!(got.kind, $should_be);

                assert!(
                    tokens.next().is_none(),
                    "{:?} should be empty",
                    tokens
                );
            }
        };
    }

    tokenize_test!(open_paren, "(", TokenKind::OpenParen);
    tokenize_test!(close_paren, ")", TokenKind::CloseParen);
    tokenize_test!(plus, "+", TokenKind::Plus);
    tokenize_test!(minus, "-", TokenKind::Minus);
    tokenize_test!(times, "*", TokenKind::Times);
    tokenize_test!(divide, "/", TokenKind::Divide);
    tokenize_test!(caret, "^", TokenKind::Caret);
    tokenize_test!(double_star, "**", TokenKind::Caret);
    tokenize_test!(single_digit_integer, "3", TokenKind::Number);
    tokenize_test!(multi_digit_integer, "31", TokenKind::Number);
    tokenize_test!(number_with_trailing_dot, "31.", TokenKind::Number);
    tokenize_test!(simple_decimal, "3.14", TokenKind::Number);
    tokenize_test!(leading_dot_decimal, ".5", TokenKind::Number);
    tokenize_test!(simple_identifier, "x", TokenKind::Identifier);
    tokenize_test!(longer_identifier, "hello", TokenKind::Identifier);
    tokenize_test!(
        identifiers_can_have_underscores,
        "hello_world",
        TokenKind::Identifier
    );
    tokenize_test!(
        identifiers_can_start_with_underscores,
        "__class__",
        TokenKind::Identifier
    );
    tokenize_test!(
        identifiers_can_contain_numbers,
        "var5",
        TokenKind::Identifier
    );

    #[test]
    fn invalid_characters_are_skipped_over() {
        let got: Vec<_> = Tokens::new("x . y").collect();

        assert_eq!(got.len(), 3);
        assert_eq!(
            got[1],
            Err(ParseError::InvalidCharacter {
                character: '.',
                index: 2
            })
        );
        assert!(got[2].is_ok());
    }
}
