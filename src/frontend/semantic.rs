//! Semantic analysis for Sigil
//!
//! Performs:
//! - Symbol table management (declare-before-use, no scoping)
//! - Type checking of assignments, guards and I/O statements
//! - Numeric literal format classification (trailing-letter radix scheme)
//! - Infix-to-postfix conversion for expression token sequences
//!
//! The analyzer re-walks the raw token sequence with its own cursor; it does
//! not consume anything the grammar validator built.

use std::collections::HashMap;

use log::debug;

use crate::frontend::token::{Keyword, Token, TokenKind, TypeTag, ValueType};
use crate::utils::{Error, Result};

// ==================== Symbol Table ====================

/// Mapping from identifier name to its declared type. One table per
/// analysis run; entries never expire and never shadow.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, TypeTag>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration; a second declaration of the same name fails
    pub fn define(&mut self, name: &str, tag: TypeTag) -> Result<()> {
        if self.symbols.contains_key(name) {
            return Err(Error::RedeclaredIdentifier {
                name: name.to_string(),
            });
        }
        self.symbols.insert(name.to_string(), tag);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<TypeTag> {
        self.symbols.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

// ==================== Semantic Analyzer ====================

/// The semantic analyzer
pub struct SemanticAnalyzer<'a> {
    tokens: &'a [Token],
    pos: usize,
    symbols: SymbolTable,
}

impl<'a> SemanticAnalyzer<'a> {
    /// Create a new analyzer over a token sequence
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            symbols: SymbolTable::new(),
        }
    }

    /// The symbol table built by the last `analyze` run
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    // ==================== Helper Methods ====================

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_next(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos + 1)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn found(&self) -> String {
        match self.current() {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        }
    }

    fn expect(&mut self, kind: TokenKind, lexeme: &str) -> Result<()> {
        match self.current() {
            Some(token) if token.kind == kind && token.lexeme == lexeme => {
                self.advance();
                Ok(())
            }
            _ => Err(Error::SyntaxMismatch {
                expected: format!("{kind} '{lexeme}'"),
                got: self.found(),
            }),
        }
    }

    /// Consume an identifier token and return its name
    fn expect_id(&mut self) -> Result<String> {
        match self.current() {
            Some(token) if token.kind == TokenKind::Id => {
                let name = token.lexeme.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(Error::SyntaxMismatch {
                expected: "ID".to_string(),
                got: self.found(),
            }),
        }
    }

    // ==================== Analysis Walk ====================

    /// Run the full left-to-right pass. The first violation aborts.
    pub fn analyze(&mut self) -> Result<()> {
        while let Some(token) = self.current() {
            match token.kind {
                TokenKind::Type => self.handle_declaration()?,
                TokenKind::Id => {
                    if self.peek_next().and_then(Token::keyword) == Some(Keyword::As) {
                        self.handle_assignment()?;
                    } else {
                        return Err(Error::UnsupportedToken { got: self.found() });
                    }
                }
                TokenKind::Keyword => match token.keyword() {
                    Some(Keyword::True) | Some(Keyword::False) => self.advance(),
                    Some(Keyword::If) => self.handle_if()?,
                    Some(Keyword::For) => self.handle_for()?,
                    Some(Keyword::While) => self.handle_while()?,
                    Some(Keyword::Read) => self.handle_read()?,
                    Some(Keyword::Write) => self.handle_write()?,
                    _ => return Err(Error::UnsupportedToken { got: self.found() }),
                },
                TokenKind::Delimiter => self.advance(),
                _ => return Err(Error::UnsupportedToken { got: self.found() }),
            }
        }
        debug!("semantic analysis passed, {} symbols", self.symbols.len());
        Ok(())
    }

    /// Declaration: a TYPE token followed by everything up to the next `;`,
    /// from which every ID is collected. The scan is deliberately
    /// permissive about list punctuation.
    fn handle_declaration(&mut self) -> Result<()> {
        let Some(token) = self.current() else {
            return Err(Error::UnsupportedToken { got: self.found() });
        };
        let tag = TypeTag::from_sigil_str(&token.lexeme)
            .ok_or_else(|| Error::UnsupportedToken { got: self.found() })?;
        self.advance();

        let mut names = Vec::new();
        while let Some(token) = self.current() {
            if token.kind == TokenKind::Delimiter && token.lexeme == ";" {
                break;
            }
            if token.kind == TokenKind::Id {
                names.push(token.lexeme.clone());
            }
            self.advance();
        }

        for name in names {
            debug!("declaring '{name}' as {tag}");
            self.symbols.define(&name, tag)?;
        }
        self.advance(); // past ';'
        Ok(())
    }

    /// Assignment: `x as expression`; the expression type must equal the
    /// declared type of `x`.
    fn handle_assignment(&mut self) -> Result<()> {
        let target = self.expect_id()?;
        let declared = self
            .symbols
            .lookup(&target)
            .ok_or_else(|| Error::UndeclaredIdentifier {
                name: target.clone(),
            })?;
        self.expect(TokenKind::Keyword, "as")?;
        let value = self.evaluate_expression()?;
        if value != ValueType::from(declared) {
            return Err(Error::TypeMismatch {
                expected: declared.to_string(),
                got: value.to_string(),
                context: format!("assignment to '{target}'"),
            });
        }
        Ok(())
    }

    /// Statement dispatch used inside `if`/`while`/`for` bodies
    fn handle_statement(&mut self) -> Result<()> {
        let Some(token) = self.current() else {
            return Err(Error::SyntaxMismatch {
                expected: "a statement".to_string(),
                got: "end of input".to_string(),
            });
        };
        match token.kind {
            TokenKind::Keyword => match token.keyword() {
                Some(Keyword::If) => self.handle_if(),
                Some(Keyword::For) => self.handle_for(),
                Some(Keyword::While) => self.handle_while(),
                Some(Keyword::Read) => self.handle_read(),
                Some(Keyword::Write) => self.handle_write(),
                _ => Err(Error::UnsupportedToken { got: self.found() }),
            },
            TokenKind::Id => self.handle_assignment(),
            _ => Err(Error::UnsupportedToken { got: self.found() }),
        }
    }

    /// Infer the type of the expression at the cursor
    ///
    /// Numbers are integers, string literals carry the string pseudo-type,
    /// boolean literals are boolean, identifiers have their declared type.
    /// A relational operator after an identifier operand requires integer
    /// operands and yields boolean; a trailing additive/multiplicative
    /// operator requires integer operands and yields integer.
    fn evaluate_expression(&mut self) -> Result<ValueType> {
        let Some(token) = self.current() else {
            return Err(Error::SyntaxMismatch {
                expected: "an expression".to_string(),
                got: "end of input".to_string(),
            });
        };

        let mut left = match token.kind {
            TokenKind::Keyword
                if matches!(token.keyword(), Some(Keyword::True | Keyword::False)) =>
            {
                self.advance();
                return Ok(ValueType::Boolean);
            }
            TokenKind::Number => {
                self.advance();
                ValueType::Integer
            }
            TokenKind::Str => {
                self.advance();
                ValueType::Str
            }
            TokenKind::Id => {
                let name = token.lexeme.clone();
                let declared = self
                    .symbols
                    .lookup(&name)
                    .ok_or(Error::UndeclaredIdentifier { name })?;
                self.advance();
                let left = ValueType::from(declared);

                if let Some(op) = self.current().filter(|t| t.kind == TokenKind::RelOp) {
                    let op = op.lexeme.clone();
                    self.advance();
                    let right = self.evaluate_expression()?;
                    if left != ValueType::Integer || right != ValueType::Integer {
                        return Err(Error::OperandTypeMismatch {
                            op,
                            left: left.to_string(),
                            right: right.to_string(),
                        });
                    }
                    return Ok(ValueType::Boolean);
                }
                left
            }
            TokenKind::Delimiter if token.lexeme == "(" => {
                self.advance();
                let inner = self.evaluate_expression()?;
                self.expect(TokenKind::Delimiter, ")")?;
                inner
            }
            _ => return Err(Error::UnsupportedToken { got: self.found() }),
        };

        while let Some(op) = self
            .current()
            .filter(|t| matches!(t.kind, TokenKind::AddOp | TokenKind::MulOp))
        {
            let op = op.lexeme.clone();
            self.advance();
            let right = self.evaluate_expression()?;
            if left != ValueType::Integer || right != ValueType::Integer {
                return Err(Error::OperandTypeMismatch {
                    op,
                    left: left.to_string(),
                    right: right.to_string(),
                });
            }
            left = ValueType::Integer;
        }

        Ok(left)
    }

    fn handle_if(&mut self) -> Result<()> {
        self.expect(TokenKind::Keyword, "if")?;
        self.expect(TokenKind::Delimiter, "(")?;
        let guard = self.evaluate_expression()?;
        if guard != ValueType::Boolean {
            return Err(Error::TypeMismatch {
                expected: ValueType::Boolean.to_string(),
                got: guard.to_string(),
                context: "the 'if' condition".to_string(),
            });
        }
        self.expect(TokenKind::Delimiter, ")")?;
        self.expect(TokenKind::Keyword, "then")?;
        self.handle_statement()?;
        if self.current().and_then(Token::keyword) == Some(Keyword::Else) {
            self.advance();
            self.handle_statement()?;
        }
        Ok(())
    }

    fn handle_for(&mut self) -> Result<()> {
        self.expect(TokenKind::Keyword, "for")?;
        self.handle_assignment()?;
        self.expect(TokenKind::Keyword, "to")?;
        let bound = self.evaluate_expression()?;
        if bound != ValueType::Integer {
            return Err(Error::TypeMismatch {
                expected: ValueType::Integer.to_string(),
                got: bound.to_string(),
                context: "the 'for' bound".to_string(),
            });
        }
        self.expect(TokenKind::Keyword, "do")?;
        self.handle_statement()
    }

    /// `while ( expression ) do statement` — parenthesized in this walk
    fn handle_while(&mut self) -> Result<()> {
        self.expect(TokenKind::Keyword, "while")?;
        self.expect(TokenKind::Delimiter, "(")?;
        let guard = self.evaluate_expression()?;
        if guard != ValueType::Boolean {
            return Err(Error::TypeMismatch {
                expected: ValueType::Boolean.to_string(),
                got: guard.to_string(),
                context: "the 'while' condition".to_string(),
            });
        }
        self.expect(TokenKind::Delimiter, ")")?;
        self.expect(TokenKind::Keyword, "do")?;
        self.handle_statement()
    }

    /// `read(v, ...)`: every named variable must already be declared
    fn handle_read(&mut self) -> Result<()> {
        self.expect(TokenKind::Keyword, "read")?;
        self.expect(TokenKind::Delimiter, "(")?;
        loop {
            let name = self.expect_id()?;
            if self.symbols.lookup(&name).is_none() {
                return Err(Error::UndeclaredIdentifier { name });
            }
            if self
                .current()
                .is_some_and(|t| t.kind == TokenKind::Delimiter && t.lexeme == ",")
            {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(TokenKind::Delimiter, ")")?;
        Ok(())
    }

    /// `write(e, ...)`: arguments are type-checked but unconstrained
    fn handle_write(&mut self) -> Result<()> {
        self.expect(TokenKind::Keyword, "write")?;
        self.expect(TokenKind::Delimiter, "(")?;
        while self
            .current()
            .is_some_and(|t| matches!(t.kind, TokenKind::Id | TokenKind::Number | TokenKind::Str))
        {
            self.evaluate_expression()?;
            if self
                .current()
                .is_some_and(|t| t.kind == TokenKind::Delimiter && t.lexeme == ",")
            {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(TokenKind::Delimiter, ")")?;
        Ok(())
    }
}

// ==================== Numeric Literal Classification ====================

/// Radix of an integer literal in the trailing-letter scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

/// Classify an integer literal by its trailing radix letter: digits
/// followed by `B`/`O`/`H`/`D` (either case), or bare decimal digits.
///
/// Note the deliberate asymmetry with the lexer, which scans *prefixed*
/// radix literals (`0B...`); the two notations are mutually incompatible
/// for the same literal.
pub fn classify_integer(lexeme: &str) -> Result<NumberFormat> {
    if is_suffix_binary(lexeme) {
        Ok(NumberFormat::Binary)
    } else if is_suffix_octal(lexeme) {
        Ok(NumberFormat::Octal)
    } else if is_suffix_decimal(lexeme) {
        Ok(NumberFormat::Decimal)
    } else if is_suffix_hexadecimal(lexeme) {
        Ok(NumberFormat::Hexadecimal)
    } else {
        Err(Error::MalformedNumberLiteral {
            lexeme: lexeme.to_string(),
        })
    }
}

fn is_suffix_binary(lexeme: &str) -> bool {
    lexeme
        .strip_suffix(['B', 'b'])
        .is_some_and(|body| !body.is_empty() && body.chars().all(|c| matches!(c, '0' | '1')))
}

fn is_suffix_octal(lexeme: &str) -> bool {
    lexeme
        .strip_suffix(['O', 'o'])
        .is_some_and(|body| !body.is_empty() && body.chars().all(|c| matches!(c, '0'..='7')))
}

fn is_suffix_decimal(lexeme: &str) -> bool {
    if let Some(body) = lexeme.strip_suffix(['D', 'd']) {
        if !body.is_empty() && body.chars().all(|c| c.is_ascii_digit()) {
            return true;
        }
    }
    !lexeme.is_empty() && lexeme.chars().all(|c| c.is_ascii_digit())
}

fn is_suffix_hexadecimal(lexeme: &str) -> bool {
    lexeme
        .strip_suffix(['H', 'h'])
        .is_some_and(|body| !body.is_empty() && body.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Whether a lexeme is a well-formed real literal: `digits.digits` or
/// `digits E [+-] digits`
pub fn is_real_format(lexeme: &str) -> bool {
    if let Some((whole, frac)) = lexeme.split_once('.') {
        return !whole.is_empty()
            && whole.chars().all(|c| c.is_ascii_digit())
            && !frac.is_empty()
            && frac.chars().all(|c| c.is_ascii_digit());
    }
    if let Some((mantissa, exponent)) = lexeme.split_once(['E', 'e']) {
        let exponent = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        return !mantissa.is_empty()
            && mantissa.chars().all(|c| c.is_ascii_digit())
            && !exponent.is_empty()
            && exponent.chars().all(|c| c.is_ascii_digit());
    }
    false
}

// ==================== Postfix Conversion ====================

/// Operator precedence for postfix conversion. Only the four arithmetic
/// spellings participate; `or`/`and` have no numeric precedence.
fn operator_precedence(lexeme: &str) -> Option<u8> {
    match lexeme {
        "+" | "-" => Some(1),
        "*" | "/" => Some(2),
        _ => None,
    }
}

/// Convert an expression token sequence to postfix (RPN) text using the
/// shunting-yard algorithm.
///
/// Operands (`NUMBER`, `ID`) emit directly; `(` pushes; `)` pops to output
/// until the matching `(`; an operator first pops every stacked operator of
/// greater-or-equal precedence. The output is the bare concatenation of
/// lexemes in postfix order.
pub fn to_postfix(tokens: &[Token]) -> Result<String> {
    let mut output = String::new();
    let mut stack: Vec<&str> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::Number | TokenKind::Id => output.push_str(&token.lexeme),
            TokenKind::Delimiter if token.lexeme == "(" => stack.push("("),
            TokenKind::Delimiter if token.lexeme == ")" => {
                while let Some(&top) = stack.last() {
                    if top == "(" {
                        break;
                    }
                    output.push_str(top);
                    stack.pop();
                }
                if stack.pop() != Some("(") {
                    return Err(Error::UnbalancedParentheses);
                }
            }
            TokenKind::AddOp | TokenKind::MulOp => {
                let precedence =
                    operator_precedence(&token.lexeme).ok_or_else(|| Error::UnsupportedToken {
                        got: token.to_string(),
                    })?;
                while let Some(&top) = stack.last() {
                    match operator_precedence(top) {
                        Some(top_precedence) if precedence <= top_precedence => {
                            output.push_str(top);
                            stack.pop();
                        }
                        _ => break,
                    }
                }
                stack.push(&token.lexeme);
            }
            _ => {
                return Err(Error::UnsupportedToken {
                    got: token.to_string(),
                })
            }
        }
    }

    while let Some(op) = stack.pop() {
        if op == "(" || op == ")" {
            return Err(Error::UnbalancedParentheses);
        }
        output.push_str(op);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::Lexer;

    fn analyze(source: &str) -> Result<()> {
        let tokens = Lexer::new(source).tokenize();
        SemanticAnalyzer::new(&tokens).analyze()
    }

    #[test]
    fn test_declaration_and_assignment() {
        assert!(analyze("{ % a; a as 5; }").is_ok());
    }

    #[test]
    fn test_symbol_table_after_run() {
        let tokens = Lexer::new("{ % a; a as 5; }").tokenize();
        let mut analyzer = SemanticAnalyzer::new(&tokens);
        assert!(analyzer.analyze().is_ok());
        assert_eq!(analyzer.symbols().lookup("a"), Some(TypeTag::Integer));
        assert_eq!(analyzer.symbols().len(), 1);
    }

    #[test]
    fn test_redeclaration() {
        assert_eq!(
            analyze("{ % a; % a; }"),
            Err(Error::RedeclaredIdentifier { name: "a".into() })
        );
        // Same name under a different sigil is still a redeclaration
        assert_eq!(
            analyze("{ % a; ! a; }"),
            Err(Error::RedeclaredIdentifier { name: "a".into() })
        );
    }

    #[test]
    fn test_undeclared_use() {
        assert_eq!(
            analyze("{ % a; b as 5; }"),
            Err(Error::UndeclaredIdentifier { name: "b".into() })
        );
    }

    #[test]
    fn test_assignment_type_mismatch() {
        assert!(matches!(
            analyze("{ % a; a as 'hi'; }"),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(matches!(
            analyze("{ % a; a as true; }"),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_relational_yields_boolean() {
        assert!(analyze("{ % a; $ f; a as 3; f as a < 5; }").is_ok());
        // Boolean operand under a relational operator
        assert!(matches!(
            analyze("{ $ f, g; f as true; g as f < 5; }"),
            Err(Error::OperandTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_arithmetic_requires_integers() {
        assert!(analyze("{ % a, b; a as 1; b as a + 2 * 3; }").is_ok());
        assert!(matches!(
            analyze("{ % a; a as 1 + 'hi'; }"),
            Err(Error::OperandTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_parenthesized_expression() {
        assert!(analyze("{ % a; a as (1 + 2); }").is_ok());
    }

    #[test]
    fn test_if_guard_must_be_boolean() {
        assert!(analyze("{ $ f; % a; f as true; if (f) then a as 1; }").is_ok());
        assert!(matches!(
            analyze("{ % a; a as 1; if (a) then a as 2; }"),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_if_else_branches() {
        // No separator before `else`: the walk looks for it right after the
        // `then` branch
        assert!(analyze("{ $ f; % a; f as true; if (f) then a as 1 else a as 2; }").is_ok());
    }

    #[test]
    fn test_while_guard_is_parenthesized_here() {
        assert!(analyze("{ $ f; % i; f as true; while (f) do i as 1; }").is_ok());
        assert!(matches!(
            analyze("{ % i; i as 0; while (i) do i as 1; }"),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_for_bound_must_be_integer() {
        assert!(analyze("{ % i, n; n as 10; for i as 1 to n do i as 2; }").is_ok());
        assert!(matches!(
            analyze("{ % i; $ f; f as true; for i as 1 to f do i as 2; }"),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_read_requires_declared_variables() {
        assert!(analyze("{ % a, b; read(a, b); }").is_ok());
        assert_eq!(
            analyze("{ % a; read(b); }"),
            Err(Error::UndeclaredIdentifier { name: "b".into() })
        );
    }

    #[test]
    fn test_write_arguments_are_unconstrained() {
        assert!(analyze("{ % a; a as 2; write('total', a, 5); }").is_ok());
    }

    #[test]
    fn test_unsupported_token_in_walk() {
        // The ERROR token produced for `@` is not analyzable
        assert!(matches!(
            analyze("{ @ }"),
            Err(Error::UnsupportedToken { .. })
        ));
    }

    // ==================== Numeric Classification ====================

    #[test]
    fn test_suffix_radix_classification() {
        assert_eq!(classify_integer("101B"), Ok(NumberFormat::Binary));
        assert_eq!(classify_integer("17o"), Ok(NumberFormat::Octal));
        assert_eq!(classify_integer("123"), Ok(NumberFormat::Decimal));
        assert_eq!(classify_integer("25D"), Ok(NumberFormat::Decimal));
        assert_eq!(classify_integer("1FH"), Ok(NumberFormat::Hexadecimal));
        assert_eq!(
            classify_integer("xyz"),
            Err(Error::MalformedNumberLiteral {
                lexeme: "xyz".into()
            })
        );
    }

    #[test]
    fn test_radix_prefix_literal_rejected_by_suffix_classifier() {
        // The lexer scans `0B1010` as one NUMBER token, but this classifier
        // only accepts the trailing-letter scheme; the two notations are
        // incompatible for the same literal and that stays visible here.
        assert_eq!(
            classify_integer("0B1010"),
            Err(Error::MalformedNumberLiteral {
                lexeme: "0B1010".into()
            })
        );
        // ...while `1010B` means binary here and is not a single lexer token.
        assert_eq!(classify_integer("1010B"), Ok(NumberFormat::Binary));
    }

    #[test]
    fn test_real_format() {
        assert!(is_real_format("3.14"));
        assert!(is_real_format("2E10"));
        assert!(is_real_format("2e+5"));
        assert!(!is_real_format("5"));
        assert!(!is_real_format(".5"));
        assert!(!is_real_format("5."));
        assert!(!is_real_format("1.5e3")); // fraction and exponent never combine here
    }

    // ==================== Postfix Conversion ====================

    fn expr_tokens(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize()
    }

    #[test]
    fn test_postfix_simple_sum() {
        let tokens = vec![
            Token::new(TokenKind::Id, "sum"),
            Token::new(TokenKind::AddOp, "+"),
            Token::new(TokenKind::Id, "i"),
        ];
        assert_eq!(to_postfix(&tokens).unwrap(), "sumi+");
    }

    #[test]
    fn test_postfix_precedence() {
        assert_eq!(to_postfix(&expr_tokens("a + b * c")).unwrap(), "abc*+");
        assert_eq!(to_postfix(&expr_tokens("(a + b) * c")).unwrap(), "ab+c*");
        assert_eq!(to_postfix(&expr_tokens("a - b + c")).unwrap(), "ab-c+");
    }

    #[test]
    fn test_postfix_unbalanced_parentheses() {
        assert_eq!(
            to_postfix(&expr_tokens("a + b)")),
            Err(Error::UnbalancedParentheses)
        );
        assert_eq!(
            to_postfix(&expr_tokens("(a + b")),
            Err(Error::UnbalancedParentheses)
        );
    }

    #[test]
    fn test_postfix_unsupported_tokens() {
        assert!(matches!(
            to_postfix(&expr_tokens("a + 'hi'")),
            Err(Error::UnsupportedToken { .. })
        ));
        // `or` carries the ADD_OP tier but has no numeric precedence
        let tokens = vec![
            Token::new(TokenKind::Id, "a"),
            Token::new(TokenKind::AddOp, "or"),
            Token::new(TokenKind::Id, "b"),
        ];
        assert!(matches!(
            to_postfix(&tokens),
            Err(Error::UnsupportedToken { .. })
        ));
    }
}
