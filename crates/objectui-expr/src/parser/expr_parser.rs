//! Recursive-descent parser producing [`Expr`] trees.

use crate::error::{Error, Result};

use super::ast::{BinaryOp, Expr, UnaryOp};
use super::lexer::{Spanned, Token, tokenize};

/// Parse an expression source string into an AST.
///
/// The whole input must be one expression; trailing tokens are an error.
pub fn parse_expression(source: &str) -> Result<Expr> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        len: source.len(),
    };
    let expr = parser.ternary()?;
    if let Some((token, offset)) = parser.peek_spanned() {
        return Err(Error::parse(
            format!("unexpected trailing token {token:?}"),
            *offset,
        ));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    len: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn peek_spanned(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, o)| *o)
            .unwrap_or(self.len)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
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

    fn expect(&mut self, expected: Token, context: &str) -> Result<()> {
        if self.eat(&expected) {
            Ok(())
        } else {
            Err(Error::parse(
                format!("expected {expected:?} {context}"),
                self.offset(),
            ))
        }
    }

    fn ternary(&mut self) -> Result<Expr> {
        let cond = self.logical_or()?;
        if !self.eat(&Token::Question) {
            return Ok(cond);
        }
        let then_branch = self.ternary()?;
        self.expect(Token::Colon, "in conditional expression")?;
        let else_branch = self.ternary()?;
        Ok(Expr::Conditional {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    fn logical_or(&mut self) -> Result<Expr> {
        let mut left = self.logical_and()?;
        while self.eat(&Token::OrOr) {
            let right = self.logical_and()?;
            left = Expr::Binary(BinaryOp::Or, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn logical_and(&mut self) -> Result<Expr> {
        let mut left = self.equality()?;
        while self.eat(&Token::AndAnd) {
            let right = self.equality()?;
            left = Expr::Binary(BinaryOp::And, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn equality(&mut self) -> Result<Expr> {
        let mut left = self.comparison()?;
        loop {
            let op = match self.peek() {
                Some(Token::LooseEq) => BinaryOp::LooseEq,
                Some(Token::LooseNe) => BinaryOp::LooseNe,
                Some(Token::StrictEq) => BinaryOp::StrictEq,
                Some(Token::StrictNe) => BinaryOp::StrictNe,
                _ => break,
            };
            self.pos += 1;
            let right = self.comparison()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn comparison(&mut self) -> Result<Expr> {
        let mut left = self.additive()?;
        loop {
            let op = match self.peek() {
                Some(Token::Lt) => BinaryOp::Lt,
                Some(Token::Le) => BinaryOp::Le,
                Some(Token::Gt) => BinaryOp::Gt,
                Some(Token::Ge) => BinaryOp::Ge,
                _ => break,
            };
            self.pos += 1;
            let right = self.additive()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn additive(&mut self) -> Result<Expr> {
        let mut left = self.multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let right = self.multiplicative()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn multiplicative(&mut self) -> Result<Expr> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::Percent) => BinaryOp::Rem,
                _ => break,
            };
            self.pos += 1;
            let right = self.unary()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr> {
        match self.peek() {
            Some(Token::Bang) => {
                self.pos += 1;
                Ok(Expr::Unary(UnaryOp::Not, Box::new(self.unary()?)))
            }
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(Expr::Unary(UnaryOp::Neg, Box::new(self.unary()?)))
            }
            _ => self.postfix(),
        }
    }

    fn postfix(&mut self) -> Result<Expr> {
        let mut expr = self.primary()?;
        loop {
            if self.eat(&Token::Dot) {
                let offset = self.offset();
                match self.advance() {
                    Some(Token::Ident(name)) => {
                        expr = Expr::Member(Box::new(expr), name);
                    }
                    _ => return Err(Error::parse("expected member name after '.'", offset)),
                }
            } else if self.eat(&Token::LBracket) {
                let index = self.ternary()?;
                self.expect(Token::RBracket, "after index expression")?;
                expr = Expr::Index(Box::new(expr), Box::new(index));
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr> {
        let offset = self.offset();
        match self.advance() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::String(s)) => Ok(Expr::String(s)),
            Some(Token::Ident(name)) => match name.as_str() {
                "true" => Ok(Expr::Bool(true)),
                "false" => Ok(Expr::Bool(false)),
                "null" => Ok(Expr::Null),
                _ => {
                    if self.eat(&Token::LParen) {
                        let args = self.call_args()?;
                        Ok(Expr::Call {
                            function: name,
                            args,
                        })
                    } else {
                        Ok(Expr::Var(name))
                    }
                }
            },
            Some(Token::LParen) => {
                let expr = self.ternary()?;
                self.expect(Token::RParen, "to close group")?;
                Ok(expr)
            }
            Some(Token::LBracket) => {
                let mut items = Vec::new();
                if !self.eat(&Token::RBracket) {
                    loop {
                        items.push(self.ternary()?);
                        if self.eat(&Token::Comma) {
                            continue;
                        }
                        self.expect(Token::RBracket, "to close array literal")?;
                        break;
                    }
                }
                Ok(Expr::Array(items))
            }
            Some(other) => Err(Error::parse(format!("unexpected token {other:?}"), offset)),
            None => Err(Error::parse("unexpected end of expression", offset)),
        }
    }

    fn call_args(&mut self) -> Result<Vec<Expr>> {
        let mut args = Vec::new();
        if self.eat(&Token::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.ternary()?);
            if self.eat(&Token::Comma) {
                continue;
            }
            self.expect(Token::RParen, "to close argument list")?;
            break;
        }
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_mul_over_add() {
        let expr = parse_expression("1 + 2 * 3").unwrap();
        assert_eq!(
            expr,
            Expr::Binary(
                BinaryOp::Add,
                Box::new(Expr::Number(1.0)),
                Box::new(Expr::Binary(
                    BinaryOp::Mul,
                    Box::new(Expr::Number(2.0)),
                    Box::new(Expr::Number(3.0)),
                )),
            )
        );
    }

    #[test]
    fn member_and_index_chains() {
        let expr = parse_expression("data.items[0].price").unwrap();
        assert_eq!(
            expr,
            Expr::Member(
                Box::new(Expr::Index(
                    Box::new(Expr::Member(
                        Box::new(Expr::Var("data".to_string())),
                        "items".to_string(),
                    )),
                    Box::new(Expr::Number(0.0)),
                )),
                "price".to_string(),
            )
        );
    }

    #[test]
    fn calls_and_array_literals() {
        let expr = parse_expression("SUM([1, 2, 3])").unwrap();
        assert_eq!(
            expr,
            Expr::Call {
                function: "SUM".to_string(),
                args: vec![Expr::Array(vec![
                    Expr::Number(1.0),
                    Expr::Number(2.0),
                    Expr::Number(3.0),
                ])],
            }
        );
    }

    #[test]
    fn ternary_is_right_associative() {
        let expr = parse_expression("a ? 1 : b ? 2 : 3").unwrap();
        match expr {
            Expr::Conditional { else_branch, .. } => {
                assert!(matches!(*else_branch, Expr::Conditional { .. }));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        assert!(parse_expression("1 2").is_err());
        assert!(parse_expression("").is_err());
    }
}
