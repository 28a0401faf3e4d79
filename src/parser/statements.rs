//! Statement parsing.
//!
//! # Grammar
//!
//! ```text
//! compound_stmt ::= '{' local_decls statement* '}'
//! statement     ::= compound_stmt | if_stmt | for_stmt | while_stmt
//!                 | return_stmt | expr_stmt
//! if_stmt       ::= 'if' '(' expression ')' statement ('else' statement)?
//! for_stmt      ::= 'for' '(' expression? ';' expression? ';' expression? ')'
//!                   statement
//! while_stmt    ::= 'while' '(' expression ')' statement
//! return_stmt   ::= 'return' expression? ';'
//! expr_stmt     ::= expression? ';'
//! ```
//!
//! Each statement is selected purely on the current token's kind; a token
//! outside the starter set is a parse error naming the whole set. A `}`
//! terminates the enclosing statement list.

use crate::error::SyntaxError;
use crate::lexer::TokenKind;
use crate::parser::ast::*;
use crate::parser::parse::Parser;

impl Parser {
    pub(crate) fn parse_compound_statement(&mut self) -> Result<CompoundStatement, SyntaxError> {
        self.expect(&TokenKind::LBrace)?;

        let locals = self.parse_local_declarations()?;

        let mut statements = Vec::new();
        while !self.check(&TokenKind::RBrace) && self.current().is_some() {
            statements.push(self.parse_statement()?);
        }

        self.expect(&TokenKind::RBrace)?;

        Ok(CompoundStatement { locals, statements })
    }

    fn parse_statement(&mut self) -> Result<Statement, SyntaxError> {
        if self.check(&TokenKind::LBrace) {
            return Ok(Statement::Compound(self.parse_compound_statement()?));
        }
        if self.check(&TokenKind::If) {
            return self.parse_if_statement();
        }
        if self.check(&TokenKind::For) {
            return self.parse_for_statement();
        }
        if self.check(&TokenKind::While) {
            return self.parse_while_statement();
        }
        if self.check(&TokenKind::Return) {
            return self.parse_return_statement();
        }
        if self.at_expression_start() {
            return self.parse_expression_statement();
        }

        Err(self.error_expected(
            "IF, FOR, WHILE, RETURN, compound statement or expression statement",
        ))
    }

    /// Starter set of an expression statement: `;`, an identifier, `(`, or a
    /// literal.
    fn at_expression_start(&self) -> bool {
        matches!(
            self.current().map(|t| &t.kind),
            Some(
                TokenKind::Semi
                    | TokenKind::Id(_)
                    | TokenKind::LParen
                    | TokenKind::Integer(_)
                    | TokenKind::Str(_)
            )
        )
    }

    fn parse_if_statement(&mut self) -> Result<Statement, SyntaxError> {
        self.expect(&TokenKind::If)?;
        self.expect(&TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(&TokenKind::RParen)?;

        let then_branch = Box::new(self.parse_statement()?);

        let else_branch = if self.match_token(&TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_for_statement(&mut self) -> Result<Statement, SyntaxError> {
        self.expect(&TokenKind::For)?;
        self.expect(&TokenKind::LParen)?;

        let init = if self.check(&TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(&TokenKind::Semi)?;

        let test = if self.check(&TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(&TokenKind::Semi)?;

        let update = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(&TokenKind::RParen)?;

        let body = Box::new(self.parse_statement()?);

        Ok(Statement::For {
            init,
            test,
            update,
            body,
        })
    }

    fn parse_while_statement(&mut self) -> Result<Statement, SyntaxError> {
        self.expect(&TokenKind::While)?;
        self.expect(&TokenKind::LParen)?;
        let test = self.parse_expression()?;
        self.expect(&TokenKind::RParen)?;
        let body = Box::new(self.parse_statement()?);

        Ok(Statement::While { test, body })
    }

    fn parse_return_statement(&mut self) -> Result<Statement, SyntaxError> {
        self.expect(&TokenKind::Return)?;

        let value = if self.check(&TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(&TokenKind::Semi)?;

        Ok(Statement::Return { value })
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, SyntaxError> {
        let expr = if self.check(&TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(&TokenKind::Semi)?;

        Ok(Statement::Expression { expr })
    }
}
