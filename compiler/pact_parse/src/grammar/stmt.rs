//! Statements and blocks.

use pact_diagnostic::ErrorCode;
use pact_ir::{
    Block, Expr, ExprKind, Place, PlaceRoot, SignalKind, Stmt, StmtKind, TokenKind, VarDecl,
};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `{ stmt* }`
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let open = self.cursor.expect(&TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        loop {
            match self.cursor.current_kind() {
                TokenKind::RBrace => {
                    let close = self.cursor.advance().span;
                    return Ok(Block {
                        stmts,
                        span: open.merge(close),
                    });
                }
                TokenKind::Eof => return Err(self.unclosed(open, "block, missing `}`")),
                _ => stmts.push(self.parse_stmt()?),
            }
        }
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::Var => {
                self.cursor.advance();
                StmtKind::Var(self.parse_var_decls()?)
            }
            TokenKind::If => self.parse_if()?,
            TokenKind::While => {
                self.cursor.advance();
                let cond = self.parse_expr()?;
                let body = self.parse_block()?;
                StmtKind::While { cond, body }
            }
            TokenKind::Return => {
                self.cursor.advance();
                if self.at_signal() {
                    // `return error "msg"` raises the signal
                    self.parse_signal()?
                } else if self.at_statement_end() {
                    StmtKind::Return(Vec::new())
                } else {
                    StmtKind::Return(self.parse_expr_list()?)
                }
            }
            TokenKind::Error | TokenKind::Warning | TokenKind::Info => self.parse_signal()?,
            TokenKind::Break => {
                self.cursor.advance();
                StmtKind::Break
            }
            TokenKind::Continue => {
                self.cursor.advance();
                StmtKind::Continue
            }
            _ => self.parse_simple_stmt()?,
        };
        Ok(Stmt {
            kind,
            span: start.merge(self.cursor.previous_span()),
        })
    }

    /// `error expr`, `warning expr`, `info expr`
    fn parse_signal(&mut self) -> Result<StmtKind, ParseError> {
        let kind = match self.cursor.advance().kind {
            TokenKind::Error => SignalKind::Error,
            TokenKind::Warning => SignalKind::Warning,
            _ => SignalKind::Info,
        };
        let message = self.parse_expr()?;
        Ok(StmtKind::Signal { kind, message })
    }

    fn at_signal(&self) -> bool {
        matches!(
            self.cursor.current_kind(),
            TokenKind::Error | TokenKind::Warning | TokenKind::Info
        ) && !self.cursor.at_line_start()
    }

    /// A bare `return` is followed by a line break or the closing brace.
    fn at_statement_end(&self) -> bool {
        matches!(
            self.cursor.current_kind(),
            TokenKind::RBrace | TokenKind::Eof
        ) || self.cursor.at_line_start()
    }

    /// `var a b int, c string` (names may be comma separated: `var i, k int`).
    ///
    /// The declaration ends at the line break after a type.
    fn parse_var_decls(&mut self) -> Result<Vec<VarDecl>, ParseError> {
        let mut decls = Vec::new();
        let mut names = Vec::new();
        loop {
            names.push(self.cursor.expect_ident()?);
            if let Some(ty) = self.cursor.type_keyword() {
                self.cursor.advance();
                decls.extend(
                    names
                        .drain(..)
                        .map(|(name, span)| VarDecl { name, ty, span }),
                );
                if self.cursor.check(&TokenKind::Comma) && !self.cursor.at_line_start() {
                    self.cursor.advance();
                    continue;
                }
                return Ok(decls);
            }
            let comma = self.cursor.eat(&TokenKind::Comma);
            if !comma && self.cursor.at_line_start() {
                return Err(self.expected_type_error());
            }
        }
    }

    /// `if cond {..} elif cond {..} else {..}`; `else if` nests.
    fn parse_if(&mut self) -> Result<StmtKind, ParseError> {
        self.cursor.expect(&TokenKind::If)?;
        let cond = self.parse_expr()?;
        let then = self.parse_block()?;
        let mut branches = vec![(cond, then)];
        let mut else_block = None;
        loop {
            if self.cursor.eat(&TokenKind::Elif) {
                let cond = self.parse_expr()?;
                let body = self.parse_block()?;
                branches.push((cond, body));
            } else if self.cursor.eat(&TokenKind::Else) {
                if self.cursor.check(&TokenKind::If) {
                    let nested = self.parse_stmt()?;
                    else_block = Some(Block {
                        span: nested.span,
                        stmts: vec![nested],
                    });
                } else {
                    else_block = Some(self.parse_block()?);
                }
                break;
            } else {
                break;
            }
        }
        Ok(StmtKind::If {
            branches,
            else_block,
        })
    }

    /// Assignment (`a, b[1] = x, y`) or a bare expression.
    fn parse_simple_stmt(&mut self) -> Result<StmtKind, ParseError> {
        let first = self.parse_expr()?;
        if !self.cursor.check(&TokenKind::Comma) && !self.cursor.check(&TokenKind::Assign) {
            return Ok(StmtKind::Expr(first));
        }
        let mut targets = vec![into_place(first)?];
        while self.cursor.eat(&TokenKind::Comma) {
            let target = self.parse_expr()?;
            targets.push(into_place(target)?);
        }
        self.cursor.expect(&TokenKind::Assign)?;
        let values = self.parse_expr_list()?;
        Ok(StmtKind::Assign { targets, values })
    }

    pub(crate) fn parse_expr_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = vec![self.parse_expr()?];
        while self.cursor.eat(&TokenKind::Comma) {
            exprs.push(self.parse_expr()?);
        }
        Ok(exprs)
    }
}

/// Convert a parsed expression into an assignment target.
fn into_place(expr: Expr) -> Result<Place, ParseError> {
    let span = expr.span;
    let mut path = Vec::new();
    let mut current = expr;
    loop {
        match current.kind {
            ExprKind::Index { target, index } => {
                path.push(*index);
                current = *target;
            }
            ExprKind::Ident(name) => return Ok(finish_place(PlaceRoot::Local(name), path, span)),
            ExprKind::ExtVar(name) => return Ok(finish_place(PlaceRoot::Ext(name), path, span)),
            ExprKind::ParentVar(name) => {
                return Ok(finish_place(PlaceRoot::Parent(name), path, span))
            }
            _ => {
                return Err(ParseError::new(
                    ErrorCode::E1007,
                    "invalid assignment target",
                    current.span,
                ))
            }
        }
    }
}

fn finish_place(root: PlaceRoot, mut path: Vec<Expr>, span: pact_ir::Span) -> Place {
    // indexes were collected outermost first
    path.reverse();
    Place { root, path, span }
}
