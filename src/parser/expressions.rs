//! Expression parsing.
//!
//! # Grammar
//!
//! ```text
//! expression     ::= var '=' expression | simple_expr
//! simple_expr    ::= additive (relop additive)?
//! additive       ::= multiplicative (addop multiplicative)*
//! multiplicative ::= factor (mulop factor)*
//! factor         ::= '(' expression ')' | INTEGER | STRING
//!                  | var ('++' | '--')? | ID '(' args ')'
//! var            ::= ID ('[' expression ']')?
//! args           ::= ε | expression (',' expression)*
//! ```
//!
//! Conventions: assignment is right-associative and its target must be a
//! variable; at most one relational operator per simple expression (a chain
//! like `a < b < c` errors at the second operator); additive and
//! multiplicative levels are left-associative; `++`/`--` are postfix and
//! apply to variables only.

use crate::error::SyntaxError;
use crate::lexer::TokenKind;
use crate::parser::ast::*;
use crate::parser::parse::Parser;

impl Parser {
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, SyntaxError> {
        let expr = self.parse_simple_expression()?;

        if self.check(&TokenKind::Assign) {
            let target = match expr {
                Expression::Variable(access) => access,
                _ => return Err(self.error_expected("variable as assignment target")),
            };
            self.bump();
            let value = Box::new(self.parse_expression()?);
            return Ok(Expression::Assignment { target, value });
        }

        Ok(expr)
    }

    fn parse_simple_expression(&mut self) -> Result<Expression, SyntaxError> {
        let left = self.parse_additive_expression()?;

        if let Some(op) = self.relational_operator() {
            self.bump();
            let right = self.parse_additive_expression()?;
            return Ok(Expression::Relational {
                op,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    fn relational_operator(&self) -> Option<RelationalOperator> {
        match self.current().map(|t| &t.kind)? {
            TokenKind::Lt => Some(RelationalOperator::Lt),
            TokenKind::Lte => Some(RelationalOperator::Lte),
            TokenKind::Gt => Some(RelationalOperator::Gt),
            TokenKind::Gte => Some(RelationalOperator::Gte),
            TokenKind::Eq => Some(RelationalOperator::Eq),
            TokenKind::Neq => Some(RelationalOperator::Neq),
            _ => None,
        }
    }

    fn parse_additive_expression(&mut self) -> Result<Expression, SyntaxError> {
        let mut left = self.parse_multiplicative_expression()?;

        loop {
            let op = if self.match_token(&TokenKind::Plus) {
                AdditiveOperator::Plus
            } else if self.match_token(&TokenKind::Minus) {
                AdditiveOperator::Minus
            } else {
                break;
            };

            let right = self.parse_multiplicative_expression()?;
            left = Expression::Additive {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative_expression(&mut self) -> Result<Expression, SyntaxError> {
        let mut left = self.parse_factor()?;

        loop {
            let op = if self.match_token(&TokenKind::Times) {
                MultiplicativeOperator::Times
            } else if self.match_token(&TokenKind::Divide) {
                MultiplicativeOperator::Divide
            } else {
                break;
            };

            let right = self.parse_factor()?;
            left = Expression::Multiplicative {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expression, SyntaxError> {
        if self.match_token(&TokenKind::LParen) {
            let expr = self.parse_expression()?;
            self.expect(&TokenKind::RParen)?;
            return Ok(expr);
        }

        if let Some(TokenKind::Integer(value)) = self.current().map(|t| &t.kind) {
            let value = *value;
            self.bump();
            return Ok(Expression::IntegerLiteral(value));
        }

        if let Some(TokenKind::Str(text)) = self.current().map(|t| &t.kind) {
            let text = text.clone();
            self.bump();
            return Ok(Expression::StringLiteral(text));
        }

        if self.check(&TokenKind::Id(String::new())) {
            return self.parse_variable_or_call();
        }

        Err(self.error_expected("LPAREN, INTEGER, STRING or ID"))
    }

    /// An identifier begins a call (on `(`), a subscripted or plain variable,
    /// or a postfix increment/decrement of either variable form.
    fn parse_variable_or_call(&mut self) -> Result<Expression, SyntaxError> {
        let name = self.expect_identifier()?;

        if self.match_token(&TokenKind::LParen) {
            let arguments = self.parse_argument_list()?;
            self.expect(&TokenKind::RParen)?;
            return Ok(Expression::Call { name, arguments });
        }

        let subscript = if self.match_token(&TokenKind::LBrack) {
            let index = self.parse_expression()?;
            self.expect(&TokenKind::RBrack)?;
            Some(Box::new(index))
        } else {
            None
        };
        let access = VarAccess { name, subscript };

        if self.match_token(&TokenKind::Increment) {
            return Ok(Expression::Unary {
                op: UnaryOperator::Increment,
                target: access,
            });
        }
        if self.match_token(&TokenKind::Decrement) {
            return Ok(Expression::Unary {
                op: UnaryOperator::Decrement,
                target: access,
            });
        }

        Ok(Expression::Variable(access))
    }

    /// Leaves the closing `)` for the caller.
    fn parse_argument_list(&mut self) -> Result<Vec<Expression>, SyntaxError> {
        let mut arguments = Vec::new();

        if self.check(&TokenKind::RParen) {
            return Ok(arguments);
        }

        loop {
            arguments.push(self.parse_expression()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        Ok(arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Scanner;

    /// Parse `<expr>` out of `int f(void) { x = <expr> ; }` and return the
    /// assigned value.
    fn expr(source: &str) -> Expression {
        let wrapped = format!("int f(void) {{ x = {}; }}", source);
        let tokens = Scanner::from_str(&wrapped).lex_all().unwrap();
        let mut program = Parser::new(tokens).parse().unwrap();
        let body = match program.declarations.pop().map(|d| d.kind) {
            Some(DeclKind::Function { body, .. }) => body,
            other => panic!("expected function declaration, got {:?}", other),
        };
        match body.statements.into_iter().next() {
            Some(Statement::Expression {
                expr: Some(Expression::Assignment { value, .. }),
            }) => *value,
            other => panic!("expected assignment statement, got {:?}", other),
        }
    }

    fn expr_err(source: &str) -> SyntaxError {
        let wrapped = format!("int f(void) {{ x = {}; }}", source);
        let tokens = Scanner::from_str(&wrapped).lex_all().unwrap();
        Parser::new(tokens).parse().unwrap_err()
    }

    fn var(name: &str) -> Expression {
        Expression::Variable(VarAccess {
            name: name.into(),
            subscript: None,
        })
    }

    #[test]
    fn test_integer_literal() {
        assert_eq!(expr("42"), Expression::IntegerLiteral(42));
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(expr("\"hi\""), Expression::StringLiteral("hi".into()));
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let parsed = expr("1 + 2 * 3");
        assert_eq!(
            parsed,
            Expression::Additive {
                op: AdditiveOperator::Plus,
                left: Box::new(Expression::IntegerLiteral(1)),
                right: Box::new(Expression::Multiplicative {
                    op: MultiplicativeOperator::Times,
                    left: Box::new(Expression::IntegerLiteral(2)),
                    right: Box::new(Expression::IntegerLiteral(3)),
                }),
            }
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let parsed = expr("(1 + 2) * 3");
        assert!(matches!(
            parsed,
            Expression::Multiplicative {
                op: MultiplicativeOperator::Times,
                ..
            }
        ));
    }

    #[test]
    fn test_additive_is_left_associative() {
        let parsed = expr("a - b - c");
        match parsed {
            Expression::Additive {
                op: AdditiveOperator::Minus,
                left,
                right,
            } => {
                assert!(matches!(*left, Expression::Additive { .. }));
                assert_eq!(*right, var("c"));
            }
            other => panic!("expected additive expression, got {:?}", other),
        }
    }

    #[test]
    fn test_division_is_left_associative() {
        let parsed = expr("a / b / c");
        match parsed {
            Expression::Multiplicative {
                op: MultiplicativeOperator::Divide,
                left,
                ..
            } => assert!(matches!(*left, Expression::Multiplicative { .. })),
            other => panic!("expected multiplicative expression, got {:?}", other),
        }
    }

    #[test]
    fn test_relational_compares_additive_operands() {
        let parsed = expr("a + 1 < b * 2");
        match parsed {
            Expression::Relational {
                op: RelationalOperator::Lt,
                left,
                right,
            } => {
                assert!(matches!(*left, Expression::Additive { .. }));
                assert!(matches!(*right, Expression::Multiplicative { .. }));
            }
            other => panic!("expected relational expression, got {:?}", other),
        }
    }

    #[test]
    fn test_each_relational_operator() {
        for (source, op) in [
            ("a < b", RelationalOperator::Lt),
            ("a <= b", RelationalOperator::Lte),
            ("a > b", RelationalOperator::Gt),
            ("a >= b", RelationalOperator::Gte),
            ("a == b", RelationalOperator::Eq),
            ("a != b", RelationalOperator::Neq),
        ] {
            match expr(source) {
                Expression::Relational { op: parsed, .. } => assert_eq!(parsed, op),
                other => panic!("expected relational expression, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_relational_chain_is_rejected() {
        let err = expr_err("a < b < c");
        assert_eq!(err.message, "Expected SEMI, got LT");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        // Wrapper already provides one level: x = (y = (z = 1)).
        let parsed = expr("y = z = 1");
        match parsed {
            Expression::Assignment { target, value } => {
                assert_eq!(target.name, "y");
                assert!(matches!(*value, Expression::Assignment { .. }));
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_to_subscripted_variable() {
        let wrapped = "int f(void) { a[i + 1] = 0; }";
        let tokens = Scanner::from_str(wrapped).lex_all().unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        match &program.declarations[0].kind {
            DeclKind::Function { body, .. } => match &body.statements[0] {
                Statement::Expression {
                    expr: Some(Expression::Assignment { target, .. }),
                } => {
                    assert_eq!(target.name, "a");
                    assert!(matches!(
                        target.subscript.as_deref(),
                        Some(Expression::Additive { .. })
                    ));
                }
                other => panic!("expected assignment statement, got {:?}", other),
            },
            other => panic!("expected function declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_target_must_be_variable() {
        let err = expr_err("1 = 2");
        assert_eq!(
            err.message,
            "Expected variable as assignment target, got ASSIGN"
        );
    }

    #[test]
    fn test_postfix_increment_and_decrement() {
        assert_eq!(
            expr("i++"),
            Expression::Unary {
                op: UnaryOperator::Increment,
                target: VarAccess {
                    name: "i".into(),
                    subscript: None,
                },
            }
        );
        assert!(matches!(
            expr("a[0]--"),
            Expression::Unary {
                op: UnaryOperator::Decrement,
                ..
            }
        ));
    }

    #[test]
    fn test_prefix_increment_is_rejected() {
        let err = expr_err("++i");
        assert_eq!(
            err.message,
            "Expected LPAREN, INTEGER, STRING or ID, got INCREMENT"
        );
    }

    #[test]
    fn test_postfix_binds_tighter_than_multiplication() {
        let parsed = expr("i++ * 2");
        match parsed {
            Expression::Multiplicative { left, .. } => {
                assert!(matches!(*left, Expression::Unary { .. }));
            }
            other => panic!("expected multiplicative expression, got {:?}", other),
        }
    }

    #[test]
    fn test_call_with_arguments() {
        let parsed = expr("max(a, b + 1)");
        match parsed {
            Expression::Call { name, arguments } => {
                assert_eq!(name, "max");
                assert_eq!(arguments.len(), 2);
                assert_eq!(arguments[0], var("a"));
                assert!(matches!(arguments[1], Expression::Additive { .. }));
            }
            other => panic!("expected call expression, got {:?}", other),
        }
    }

    #[test]
    fn test_call_with_no_arguments() {
        let parsed = expr("next()");
        match parsed {
            Expression::Call { name, arguments } => {
                assert_eq!(name, "next");
                assert!(arguments.is_empty());
            }
            other => panic!("expected call expression, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_subscript() {
        let parsed = expr("grid[index[i]]");
        match parsed {
            Expression::Variable(access) => {
                assert_eq!(access.name, "grid");
                match access.subscript.as_deref() {
                    Some(Expression::Variable(inner)) => {
                        assert_eq!(inner.name, "index");
                        assert!(inner.subscript.is_some());
                    }
                    other => panic!("expected variable subscript, got {:?}", other),
                }
            }
            other => panic!("expected variable expression, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_factor_is_rejected() {
        let err = expr_err("* 2");
        assert_eq!(err.message, "Expected LPAREN, INTEGER, STRING or ID, got TIMES");
    }
}
