//! Declaration parsing: the program, top-level variable and function
//! declarations, parameter lists, and local declarations.
//!
//! # Grammar
//!
//! ```text
//! program        ::= declaration*
//! declaration    ::= type_specifier ID (var_decl_tail | fun_decl_tail)
//! type_specifier ::= 'int' | 'void'
//! var_decl_tail  ::= ';' | '[' INTEGER ']' ';'
//! fun_decl_tail  ::= '(' param_list ')' compound_stmt
//! param_list     ::= 'void' | param (',' param)*
//! param          ::= type_specifier ID ('[' ']')?
//! local_decls    ::= (type_specifier ID var_decl_tail)*
//! ```
//!
//! After `type_specifier ID`, a `;` or `[` commits to the variable path and
//! anything else to the function path — the one-token look-ahead choice that
//! keeps the grammar LL(1).

use crate::error::SyntaxError;
use crate::lexer::TokenKind;
use crate::parser::ast::*;
use crate::parser::parse::Parser;

impl Parser {
    pub(crate) fn parse_program(&mut self) -> Result<Program, SyntaxError> {
        let mut declarations = Vec::new();

        while self.current().is_some() {
            declarations.push(self.parse_declaration()?);
        }

        Ok(Program { declarations })
    }

    fn parse_declaration(&mut self) -> Result<Declaration, SyntaxError> {
        let ty = self.parse_type_specifier()?;
        let name = self.expect_identifier()?;

        if self.check(&TokenKind::Semi) || self.check(&TokenKind::LBrack) {
            self.parse_variable_tail(ty, name)
        } else {
            self.parse_function_tail(ty, name)
        }
    }

    pub(crate) fn parse_type_specifier(&mut self) -> Result<ValueType, SyntaxError> {
        if self.match_token(&TokenKind::Int) {
            Ok(ValueType::Int)
        } else if self.match_token(&TokenKind::Void) {
            Ok(ValueType::Void)
        } else {
            Err(self.error_expected("INT or VOID"))
        }
    }

    /// Finish a variable declaration after its type and name: `;` for a
    /// plain variable, `[ INTEGER ] ;` for a fixed-size array.
    pub(crate) fn parse_variable_tail(
        &mut self,
        ty: ValueType,
        name: String,
    ) -> Result<Declaration, SyntaxError> {
        if self.match_token(&TokenKind::Semi) {
            return Ok(Declaration {
                ty,
                name,
                kind: DeclKind::Plain,
            });
        }

        if self.match_token(&TokenKind::LBrack) {
            // The array size is a literal token, not a general expression.
            let size = self.expect_integer()?;
            self.expect(&TokenKind::RBrack)?;
            self.expect(&TokenKind::Semi)?;
            return Ok(Declaration {
                ty,
                name,
                kind: DeclKind::Array { size },
            });
        }

        Err(self.error_expected("SEMI or LBRACK"))
    }

    /// Finish a function declaration after its return type and name.
    fn parse_function_tail(
        &mut self,
        ty: ValueType,
        name: String,
    ) -> Result<Declaration, SyntaxError> {
        self.expect(&TokenKind::LParen)?;
        let params = self.parse_parameter_list()?;
        self.expect(&TokenKind::RParen)?;
        let body = self.parse_compound_statement()?;

        Ok(Declaration {
            ty,
            name,
            kind: DeclKind::Function { params, body },
        })
    }

    /// `'void'` for an empty list, otherwise one or more comma-separated
    /// parameters. Leaves the closing `)` for the caller.
    fn parse_parameter_list(&mut self) -> Result<Vec<Parameter>, SyntaxError> {
        if self.match_token(&TokenKind::Void) {
            return Ok(Vec::new());
        }

        let mut params = Vec::new();
        loop {
            params.push(self.parse_parameter()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        Ok(params)
    }

    fn parse_parameter(&mut self) -> Result<Parameter, SyntaxError> {
        let ty = self.parse_type_specifier()?;
        let name = self.expect_identifier()?;

        // Empty brackets mark an array parameter of unspecified size.
        let is_array = self.match_token(&TokenKind::LBrack);
        if is_array {
            self.expect(&TokenKind::RBrack)?;
        }

        Ok(Parameter { ty, name, is_array })
    }

    /// Zero or more local variable declarations at the head of a compound
    /// statement. Only variables: a declaration here never takes the
    /// function path.
    pub(crate) fn parse_local_declarations(&mut self) -> Result<Vec<Declaration>, SyntaxError> {
        let mut locals = Vec::new();

        while self.check(&TokenKind::Int) || self.check(&TokenKind::Void) {
            let ty = self.parse_type_specifier()?;
            let name = self.expect_identifier()?;
            locals.push(self.parse_variable_tail(ty, name)?);
        }

        Ok(locals)
    }
}
