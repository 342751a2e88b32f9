//! Top-level declarations: contracts, functions and their sections.

use pact_diagnostic::ErrorCode;
use pact_ir::{
    ContractDecl, DataField, Expr, ExprKind, FuncDecl, Item, Module, Param, ParamType, Setting,
    Span, TailDecl, TokenKind,
};

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_items(&mut self) -> Result<Module, ParseError> {
        let mut items = Vec::new();
        loop {
            match self.cursor.current_kind() {
                TokenKind::Eof => break,
                TokenKind::Contract => items.push(Item::Contract(self.parse_contract()?)),
                TokenKind::Func => items.push(Item::Func(self.parse_func()?)),
                _ => return Err(self.unexpected("`contract` or `func`")),
            }
        }
        Ok(Module { items })
    }

    fn parse_contract(&mut self) -> Result<ContractDecl, ParseError> {
        let start = self.cursor.expect(&TokenKind::Contract)?;
        let (name, _) = self.cursor.expect_ident()?;
        let open = self.cursor.expect(&TokenKind::LBrace)?;
        let mut contract = ContractDecl {
            name,
            data: Vec::new(),
            settings: Vec::new(),
            conditions: None,
            action: None,
            funcs: Vec::new(),
            span: start,
        };

        loop {
            match self.cursor.current_kind() {
                TokenKind::RBrace => {
                    let close = self.cursor.advance().span;
                    contract.span = start.merge(close);
                    return Ok(contract);
                }
                TokenKind::Eof => return Err(self.unclosed(open, "contract body")),
                TokenKind::Data => {
                    self.cursor.advance();
                    let fields = self.parse_data_section()?;
                    contract.data.extend(fields);
                }
                TokenKind::Settings => {
                    self.cursor.advance();
                    let settings = self.parse_settings_section()?;
                    contract.settings.extend(settings);
                }
                TokenKind::Conditions => {
                    self.cursor.advance();
                    contract.conditions = Some(self.parse_block()?);
                }
                TokenKind::Action => {
                    self.cursor.advance();
                    contract.action = Some(self.parse_block()?);
                }
                TokenKind::Func => {
                    // `func conditions {..}` / `func action {..}` name the sections
                    let section = self.cursor.peek_kind().clone();
                    if matches!(section, TokenKind::Conditions | TokenKind::Action) {
                        self.cursor.advance();
                        self.cursor.advance();
                        if self.cursor.eat(&TokenKind::LParen) {
                            self.cursor.expect(&TokenKind::RParen)?;
                        }
                        let body = self.parse_block()?;
                        if section == TokenKind::Conditions {
                            contract.conditions = Some(body);
                        } else {
                            contract.action = Some(body);
                        }
                    } else {
                        contract.funcs.push(self.parse_func()?);
                    }
                }
                _ => return Err(self.unexpected("contract section or `func`")),
            }
        }
    }

    /// `{ Name type ["optional"] ... }`, one field per line.
    fn parse_data_section(&mut self) -> Result<Vec<DataField>, ParseError> {
        let open = self.cursor.expect(&TokenKind::LBrace)?;
        let mut fields = Vec::new();
        loop {
            if self.cursor.eat(&TokenKind::RBrace) {
                return Ok(fields);
            }
            if self.cursor.is_at_end() {
                return Err(self.unclosed(open, "data section"));
            }
            let (name, span) = self.cursor.expect_ident()?;
            let ty = self.expect_type()?;
            let optional = match self.cursor.current_kind() {
                TokenKind::Optional if !self.cursor.at_line_start() => {
                    self.cursor.advance();
                    true
                }
                TokenKind::Str(tag) if !self.cursor.at_line_start() => {
                    let optional = tag.contains("optional");
                    self.cursor.advance();
                    optional
                }
                _ => false,
            };
            fields.push(DataField {
                name,
                ty,
                optional,
                span: span.merge(self.cursor.previous_span()),
            });
        }
    }

    /// `{ name = literal ... }`
    fn parse_settings_section(&mut self) -> Result<Vec<Setting>, ParseError> {
        let open = self.cursor.expect(&TokenKind::LBrace)?;
        let mut settings = Vec::new();
        loop {
            if self.cursor.eat(&TokenKind::RBrace) {
                return Ok(settings);
            }
            if self.cursor.is_at_end() {
                return Err(self.unclosed(open, "settings section"));
            }
            let (name, span) = self.cursor.expect_ident()?;
            self.cursor.expect(&TokenKind::Assign)?;
            let value = self.parse_setting_value()?;
            settings.push(Setting {
                name,
                span: span.merge(value.span),
                value,
            });
        }
    }

    fn parse_setting_value(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        let negative = self.cursor.eat(&TokenKind::Minus);
        let kind = match self.cursor.current_kind() {
            TokenKind::Int(n) if negative => ExprKind::Int(-n),
            TokenKind::Int(n) => ExprKind::Int(*n),
            TokenKind::Float(f) if negative => ExprKind::Float(-f),
            TokenKind::Float(f) => ExprKind::Float(*f),
            TokenKind::Str(s) if !negative => ExprKind::Str(s.clone()),
            TokenKind::True if !negative => ExprKind::Bool(true),
            TokenKind::False if !negative => ExprKind::Bool(false),
            TokenKind::Nil if !negative => ExprKind::Nil,
            other => {
                return Err(ParseError::new(
                    ErrorCode::E1008,
                    format!(
                        "setting value must be a literal, found {}",
                        other.display_name()
                    ),
                    self.cursor.current_span(),
                ))
            }
        };
        let end = self.cursor.advance().span;
        Ok(Expr::new(kind, start.merge(end)))
    }

    /// `func name(params).Tail(params)... [result] { body }`
    ///
    /// The parameter list may be omitted entirely (`func init string {`).
    pub(crate) fn parse_func(&mut self) -> Result<FuncDecl, ParseError> {
        let start = self.cursor.expect(&TokenKind::Func)?;
        let (name, _) = self.cursor.expect_ident()?;
        let params = if self.cursor.check(&TokenKind::LParen) {
            self.parse_param_list()?
        } else {
            Vec::new()
        };

        let mut tails = Vec::new();
        while self.cursor.check(&TokenKind::Dot) {
            let dot = self.cursor.advance().span;
            let (tail_name, _) = self.cursor.expect_ident()?;
            let tail_params = self.parse_param_list()?;
            tails.push(TailDecl {
                name: tail_name,
                params: tail_params,
                span: dot.merge(self.cursor.previous_span()),
            });
        }

        let result = self.cursor.type_keyword();
        if result.is_some() {
            self.cursor.advance();
        }
        let body = self.parse_block()?;
        Ok(FuncDecl {
            name,
            params,
            tails,
            result,
            span: start.merge(body.span),
            body,
        })
    }

    /// `(a int, b, c string, rest ...)`
    ///
    /// Consecutive names share the type that follows them. A variadic
    /// parameter must close the list.
    fn parse_param_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let open = self.cursor.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        let mut untyped: Vec<(String, Span)> = Vec::new();
        if self.cursor.eat(&TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            if self.cursor.is_at_end() {
                return Err(self.unclosed(open, "parameter list"));
            }
            let (name, span) = self.cursor.expect_ident()?;
            if self.cursor.eat(&TokenKind::Ellipsis) {
                if let Some((pending, pending_span)) = untyped.first() {
                    return Err(missing_type(pending, *pending_span));
                }
                params.push(Param {
                    name: name.clone(),
                    ty: ParamType::Array,
                    variadic: true,
                    span,
                });
                if !self.cursor.check(&TokenKind::RParen) {
                    return Err(ParseError::new(
                        ErrorCode::E1006,
                        format!("variadic parameter `{name}` must be the last parameter"),
                        span,
                    ));
                }
            } else if let Some(ty) = self.cursor.type_keyword() {
                self.cursor.advance();
                params.extend(untyped.drain(..).map(|(name, span)| Param {
                    name,
                    ty,
                    variadic: false,
                    span,
                }));
                params.push(Param {
                    name,
                    ty,
                    variadic: false,
                    span,
                });
            } else if self.cursor.check(&TokenKind::Comma) {
                untyped.push((name, span));
            } else if self.cursor.is_at_end() {
                return Err(self.unclosed(open, "parameter list"));
            } else {
                return Err(self.expected_type_error());
            }

            if self.cursor.eat(&TokenKind::Comma) {
                continue;
            }
            if self.cursor.eat(&TokenKind::RParen) {
                break;
            }
            if self.cursor.is_at_end() {
                return Err(self.unclosed(open, "parameter list"));
            }
            return Err(self.unexpected("`,` or `)`"));
        }

        match untyped.first() {
            Some((name, span)) => Err(missing_type(name, *span)),
            None => Ok(params),
        }
    }

    pub(crate) fn expect_type(&mut self) -> Result<ParamType, ParseError> {
        match self.cursor.type_keyword() {
            Some(ty) => {
                self.cursor.advance();
                Ok(ty)
            }
            None => Err(self.expected_type_error()),
        }
    }

    #[cold]
    pub(crate) fn expected_type_error(&self) -> ParseError {
        ParseError::new(
            ErrorCode::E1005,
            format!(
                "expected type, found {}",
                self.cursor.current_kind().display_name()
            ),
            self.cursor.current_span(),
        )
    }
}

#[cold]
fn missing_type(name: &str, span: Span) -> ParseError {
    ParseError::new(
        ErrorCode::E1005,
        format!("parameter `{name}` has no type"),
        span,
    )
}
