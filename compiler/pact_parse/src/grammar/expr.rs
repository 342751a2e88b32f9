//! Expression parsing: precedence climbing from `||` down to primaries.
//!
//! Precedence (loosest first):
//! `||`, `&&`, `== !=`, `< <= > >=`, `+ -`, `* / %`, unary `- !`,
//! postfix (`[index]`, `.Name(args)`, `.field`).

use pact_diagnostic::ErrorCode;
use pact_ir::{BinaryOp, Expr, ExprKind, MapEntry, Span, TokenKind, UnaryOp};
use pact_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

type OperatorTable = &'static [(TokenKind, BinaryOp)];

const OR_OPS: OperatorTable = &[(TokenKind::OrOr, BinaryOp::Or)];
const AND_OPS: OperatorTable = &[(TokenKind::AndAnd, BinaryOp::And)];
const EQUALITY_OPS: OperatorTable = &[
    (TokenKind::EqEq, BinaryOp::Eq),
    (TokenKind::NotEq, BinaryOp::NotEq),
];
const COMPARISON_OPS: OperatorTable = &[
    (TokenKind::Lt, BinaryOp::Lt),
    (TokenKind::LtEq, BinaryOp::LtEq),
    (TokenKind::Gt, BinaryOp::Gt),
    (TokenKind::GtEq, BinaryOp::GtEq),
];
const ADDITIVE_OPS: OperatorTable = &[
    (TokenKind::Plus, BinaryOp::Add),
    (TokenKind::Minus, BinaryOp::Sub),
];
const MULTIPLICATIVE_OPS: OperatorTable = &[
    (TokenKind::Star, BinaryOp::Mul),
    (TokenKind::Slash, BinaryOp::Div),
    (TokenKind::Percent, BinaryOp::Mod),
];

impl Parser<'_> {
    /// Parse a full expression.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_or())
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(OR_OPS, Self::parse_and)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(AND_OPS, Self::parse_equality)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(EQUALITY_OPS, Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(COMPARISON_OPS, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(ADDITIVE_OPS, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(MULTIPLICATIVE_OPS, Self::parse_unary)
    }

    /// Left-associative binary level. An operator at the start of a line
    /// ends the expression instead of continuing it.
    fn parse_binary_level(
        &mut self,
        ops: OperatorTable,
        next: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut left = next(self)?;
        loop {
            if self.cursor.at_line_start() {
                return Ok(left);
            }
            let current = self.cursor.current_kind();
            let Some(op) = ops
                .iter()
                .find(|(kind, _)| kind == current)
                .map(|(_, op)| *op)
            else {
                return Ok(left);
            };
            self.cursor.advance();
            let right = next(self)?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.cursor.current_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_postfix(),
        };
        let start = self.cursor.advance().span;
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        let span = start.merge(operand.span);
        let Expr {
            kind,
            span: operand_span,
        } = operand;
        // negative literals fold into the literal itself
        let kind = match (op, kind) {
            (UnaryOp::Neg, ExprKind::Int(n)) if n != i64::MIN => ExprKind::Int(-n),
            (UnaryOp::Neg, ExprKind::Float(f)) => ExprKind::Float(-f),
            (op, kind) => ExprKind::Unary {
                op,
                operand: Box::new(Expr::new(kind, operand_span)),
            },
        };
        Ok(Expr::new(kind, span))
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.cursor.check(&TokenKind::LBracket) && !self.cursor.at_line_start() {
                self.cursor.advance();
                let index = self.parse_expr()?;
                let close = self.cursor.expect(&TokenKind::RBracket)?;
                let span = expr.span.merge(close);
                expr = Expr::new(
                    ExprKind::Index {
                        target: Box::new(expr),
                        index: Box::new(index),
                    },
                    span,
                );
            } else if self.cursor.check(&TokenKind::Dot) {
                self.cursor.advance();
                let (name, name_span) = self.cursor.expect_ident()?;
                expr = if self.cursor.check(&TokenKind::LParen) && !self.cursor.at_line_start() {
                    let (args, close) = self.parse_args()?;
                    let span = expr.span.merge(close);
                    Expr::new(
                        ExprKind::TailCall {
                            receiver: Box::new(expr),
                            name,
                            args,
                        },
                        span,
                    )
                } else {
                    let span = expr.span.merge(name_span);
                    match expr.kind {
                        ExprKind::ExtVar(var) if var == "parent" => {
                            Expr::new(ExprKind::ParentVar(name), span)
                        }
                        kind => Expr::new(
                            ExprKind::Field {
                                target: Box::new(Expr::new(kind, expr.span)),
                                name,
                            },
                            span,
                        ),
                    }
                };
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current();
        let span = token.span;
        let kind = match &token.kind {
            TokenKind::Int(n) => ExprKind::Int(*n),
            TokenKind::Float(f) => ExprKind::Float(*f),
            TokenKind::Str(s) => ExprKind::Str(s.clone()),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Nil => ExprKind::Nil,
            TokenKind::ExtVar(name) => ExprKind::ExtVar(name.clone()),
            TokenKind::Ident(name) => {
                self.cursor.advance();
                return self.parse_name(None, name.clone(), span);
            }
            TokenKind::Qualified(scope, name) => {
                self.cursor.advance();
                if !self.cursor.check(&TokenKind::LParen) {
                    return Err(self.unexpected("`(` after a scope-qualified name"));
                }
                return self.parse_name(Some(*scope), name.clone(), span);
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                let close = self.cursor.expect(&TokenKind::RParen)?;
                return Ok(Expr::new(inner.kind, span.merge(close)));
            }
            TokenKind::LBracket => return self.parse_array_literal(),
            TokenKind::LBrace => return self.parse_map_literal(),
            kind => match kind.soft_keyword_name() {
                Some(name) => {
                    self.cursor.advance();
                    return self.parse_name(None, name.to_string(), span);
                }
                None => {
                    return Err(ParseError::new(
                        ErrorCode::E1002,
                        format!("expected expression, found {}", kind.display_name()),
                        span,
                    ))
                }
            },
        };
        self.cursor.advance();
        Ok(Expr::new(kind, span))
    }

    /// A name already consumed: a call if `(` follows on the same line,
    /// otherwise a variable reference.
    fn parse_name(
        &mut self,
        scope: Option<u32>,
        name: String,
        start: Span,
    ) -> Result<Expr, ParseError> {
        if self.cursor.check(&TokenKind::LParen) && !self.cursor.at_line_start() {
            let (args, close) = self.parse_args()?;
            return Ok(Expr::new(ExprKind::Call { scope, name, args }, start.merge(close)));
        }
        Ok(Expr::new(ExprKind::Ident(name), start))
    }

    /// `(arg, arg..., ...)` returning the arguments and the closing span.
    /// A trailing `...` spreads an array argument.
    fn parse_args(&mut self) -> Result<(Vec<Expr>, Span), ParseError> {
        let open = self.cursor.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        if self.cursor.check(&TokenKind::RParen) {
            return Ok((args, self.cursor.advance().span));
        }
        loop {
            let arg = self.parse_expr()?;
            let arg = if self.cursor.check(&TokenKind::Ellipsis) {
                let end = self.cursor.advance().span;
                let span = arg.span.merge(end);
                Expr::new(ExprKind::Spread(Box::new(arg)), span)
            } else {
                arg
            };
            args.push(arg);
            if self.cursor.eat(&TokenKind::Comma) {
                continue;
            }
            if self.cursor.check(&TokenKind::RParen) {
                return Ok((args, self.cursor.advance().span));
            }
            if self.cursor.is_at_end() {
                return Err(self.unclosed(open, "argument list"));
            }
            return Err(self.unexpected("`,` or `)` in argument list"));
        }
    }

    /// `[a, b, c]`
    fn parse_array_literal(&mut self) -> Result<Expr, ParseError> {
        let open = self.cursor.expect(&TokenKind::LBracket)?;
        let mut items = Vec::new();
        loop {
            if self.cursor.check(&TokenKind::RBracket) {
                let close = self.cursor.advance().span;
                return Ok(Expr::new(ExprKind::Array(items), open.merge(close)));
            }
            if self.cursor.is_at_end() {
                return Err(self.unclosed(open, "array literal"));
            }
            items.push(self.parse_expr()?);
            if !self.cursor.eat(&TokenKind::Comma) && !self.cursor.check(&TokenKind::RBracket) {
                return Err(self.unexpected("`,` or `]`"));
            }
        }
    }

    /// `{"key": value, name: value}`; a bare name key is taken as a string.
    fn parse_map_literal(&mut self) -> Result<Expr, ParseError> {
        let open = self.cursor.expect(&TokenKind::LBrace)?;
        let mut entries = Vec::new();
        loop {
            if self.cursor.check(&TokenKind::RBrace) {
                let close = self.cursor.advance().span;
                return Ok(Expr::new(ExprKind::Map(entries), open.merge(close)));
            }
            if self.cursor.is_at_end() {
                return Err(self.unclosed(open, "map literal"));
            }
            let key = match self.cursor.current_kind() {
                TokenKind::Ident(name) if self.cursor.peek_kind() == &TokenKind::Colon => {
                    let span = self.cursor.advance().span;
                    Expr::new(ExprKind::Str(name.clone()), span)
                }
                _ => self.parse_expr()?,
            };
            self.cursor.expect(&TokenKind::Colon)?;
            let value = self.parse_expr()?;
            entries.push(MapEntry { key, value });
            if !self.cursor.eat(&TokenKind::Comma) && !self.cursor.check(&TokenKind::RBrace) {
                return Err(self.unexpected("`,` or `}`"));
            }
        }
    }
}
