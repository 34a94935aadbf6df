//! Tokenizer for the expression language.

use crate::error::{Error, Result};

/// One lexical token.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    String(String),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Lt,
    Le,
    Gt,
    Ge,
    LooseEq,
    LooseNe,
    StrictEq,
    StrictNe,
    AndAnd,
    OrOr,
    Question,
    Colon,
    Dot,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
}

/// A token plus the byte offset it started at, for error reporting.
pub(crate) type Spanned = (Token, usize);

pub(crate) fn tokenize(source: &str) -> Result<Vec<Spanned>> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let c = bytes[i];
        match c {
            b' ' | b'\t' | b'\r' | b'\n' => {
                i += 1;
            }
            b'0'..=b'9' => {
                let mut end = i + 1;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                if end < bytes.len()
                    && bytes[end] == b'.'
                    && end + 1 < bytes.len()
                    && bytes[end + 1].is_ascii_digit()
                {
                    end += 1;
                    while end < bytes.len() && bytes[end].is_ascii_digit() {
                        end += 1;
                    }
                }
                let text = &source[i..end];
                let value = text
                    .parse::<f64>()
                    .map_err(|_| Error::parse(format!("invalid number '{text}'"), start))?;
                tokens.push((Token::Number(value), start));
                i = end;
            }
            b'\'' | b'"' => {
                let quote = c;
                let mut text = String::new();
                i += 1;
                loop {
                    if i >= bytes.len() {
                        return Err(Error::parse("unterminated string literal", start));
                    }
                    let b = bytes[i];
                    if b == quote {
                        i += 1;
                        break;
                    }
                    if b == b'\\' {
                        i += 1;
                        if i >= bytes.len() {
                            return Err(Error::parse("unterminated string literal", start));
                        }
                        match bytes[i] {
                            b'n' => text.push('\n'),
                            b't' => text.push('\t'),
                            b'\\' => text.push('\\'),
                            b'\'' => text.push('\''),
                            b'"' => text.push('"'),
                            other => {
                                return Err(Error::parse(
                                    format!("unsupported escape '\\{}'", other as char),
                                    i,
                                ));
                            }
                        }
                        i += 1;
                    } else {
                        // Consume one full UTF-8 character.
                        let ch = source[i..].chars().next().unwrap_or('\u{FFFD}');
                        text.push(ch);
                        i += ch.len_utf8();
                    }
                }
                tokens.push((Token::String(text), start));
            }
            b'A'..=b'Z' | b'a'..=b'z' | b'_' | b'$' => {
                let mut end = i + 1;
                while end < bytes.len()
                    && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_' || bytes[end] == b'$')
                {
                    end += 1;
                }
                tokens.push((Token::Ident(source[i..end].to_string()), start));
                i = end;
            }
            b'+' => {
                tokens.push((Token::Plus, start));
                i += 1;
            }
            b'-' => {
                tokens.push((Token::Minus, start));
                i += 1;
            }
            b'*' => {
                tokens.push((Token::Star, start));
                i += 1;
            }
            b'/' => {
                tokens.push((Token::Slash, start));
                i += 1;
            }
            b'%' => {
                tokens.push((Token::Percent, start));
                i += 1;
            }
            b'?' => {
                tokens.push((Token::Question, start));
                i += 1;
            }
            b':' => {
                tokens.push((Token::Colon, start));
                i += 1;
            }
            b'.' => {
                tokens.push((Token::Dot, start));
                i += 1;
            }
            b',' => {
                tokens.push((Token::Comma, start));
                i += 1;
            }
            b'(' => {
                tokens.push((Token::LParen, start));
                i += 1;
            }
            b')' => {
                tokens.push((Token::RParen, start));
                i += 1;
            }
            b'[' => {
                tokens.push((Token::LBracket, start));
                i += 1;
            }
            b']' => {
                tokens.push((Token::RBracket, start));
                i += 1;
            }
            b'<' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    tokens.push((Token::Le, start));
                    i += 2;
                } else {
                    tokens.push((Token::Lt, start));
                    i += 1;
                }
            }
            b'>' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    tokens.push((Token::Ge, start));
                    i += 2;
                } else {
                    tokens.push((Token::Gt, start));
                    i += 1;
                }
            }
            b'=' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    if bytes.get(i + 2) == Some(&b'=') {
                        tokens.push((Token::StrictEq, start));
                        i += 3;
                    } else {
                        tokens.push((Token::LooseEq, start));
                        i += 2;
                    }
                } else {
                    return Err(Error::parse("assignment is not supported", start));
                }
            }
            b'!' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    if bytes.get(i + 2) == Some(&b'=') {
                        tokens.push((Token::StrictNe, start));
                        i += 3;
                    } else {
                        tokens.push((Token::LooseNe, start));
                        i += 2;
                    }
                } else {
                    tokens.push((Token::Bang, start));
                    i += 1;
                }
            }
            b'&' => {
                if bytes.get(i + 1) == Some(&b'&') {
                    tokens.push((Token::AndAnd, start));
                    i += 2;
                } else {
                    return Err(Error::parse("bitwise '&' is not supported", start));
                }
            }
            b'|' => {
                if bytes.get(i + 1) == Some(&b'|') {
                    tokens.push((Token::OrOr, start));
                    i += 2;
                } else {
                    return Err(Error::parse("bitwise '|' is not supported", start));
                }
            }
            _ => {
                let ch = source[i..].chars().next().unwrap_or('\u{FFFD}');
                return Err(Error::parse(format!("unexpected character '{ch}'"), start));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_operators_greedily() {
        let tokens = tokenize("a === b == c != d !== e").unwrap();
        let kinds: Vec<&Token> = tokens.iter().map(|(t, _)| t).collect();
        assert!(matches!(kinds[1], Token::StrictEq));
        assert!(matches!(kinds[3], Token::LooseEq));
        assert!(matches!(kinds[5], Token::LooseNe));
        assert!(matches!(kinds[7], Token::StrictNe));
    }

    #[test]
    fn tokenizes_string_escapes() {
        let tokens = tokenize(r#"'it\'s' "a\nb""#).unwrap();
        assert_eq!(tokens[0].0, Token::String("it's".to_string()));
        assert_eq!(tokens[1].0, Token::String("a\nb".to_string()));
    }

    #[test]
    fn rejects_assignment() {
        assert!(tokenize("a = 1").is_err());
    }

    #[test]
    fn numbers_with_decimals() {
        let tokens = tokenize("3.14 10").unwrap();
        assert_eq!(tokens[0].0, Token::Number(3.14));
        assert_eq!(tokens[1].0, Token::Number(10.0));
    }
}
