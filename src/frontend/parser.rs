//! Grammar validator for Sigil
//!
//! Recursive descent, one method per production. The validator walks the
//! token sequence with a private cursor and reports only pass/fail: no tree
//! is built or retained. The first unmet expectation aborts the run.

use log::debug;

use crate::frontend::token::{Keyword, Token, TokenKind};
use crate::utils::{Error, Result};

/// The grammar validator
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Create a new validator over a token sequence
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    // ==================== Helper Methods ====================

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Whether the current token spells exactly `lexeme`
    fn at_lexeme(&self, lexeme: &str) -> bool {
        self.current().is_some_and(|t| t.lexeme == lexeme)
    }

    /// Description of the current token for diagnostics
    fn found(&self) -> String {
        match self.current() {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        }
    }

    fn mismatch(&self, expected: impl Into<String>) -> Error {
        Error::SyntaxMismatch {
            expected: expected.into(),
            got: self.found(),
        }
    }

    /// Consume a token matching both kind and lexeme, or fail
    fn expect(&mut self, kind: TokenKind, lexeme: &str) -> Result<()> {
        match self.current() {
            Some(token) if token.kind == kind && token.lexeme == lexeme => {
                self.advance();
                Ok(())
            }
            _ => Err(self.mismatch(format!("{kind} '{lexeme}'"))),
        }
    }

    /// Consume a token matching a kind, or fail
    fn expect_kind(&mut self, kind: TokenKind) -> Result<()> {
        match self.current() {
            Some(token) if token.kind == kind => {
                self.advance();
                Ok(())
            }
            _ => Err(self.mismatch(kind.to_string())),
        }
    }

    // ==================== Productions ====================

    /// Validate a complete program: `{ (declaration | statement) ; ... }`
    pub fn validate(&mut self) -> Result<()> {
        self.parse_program()?;
        debug!("grammar validation passed");
        Ok(())
    }

    fn parse_program(&mut self) -> Result<()> {
        self.expect(TokenKind::Delimiter, "{")?;
        while self.current().is_some() && !self.at_lexeme("}") {
            if self.current().is_some_and(|t| t.kind == TokenKind::Type) {
                self.parse_declaration()?;
            } else {
                self.parse_statement()?;
            }
            self.expect(TokenKind::Delimiter, ";")?;
        }
        self.expect(TokenKind::Delimiter, "}")?;
        Ok(())
    }

    fn parse_declaration(&mut self) -> Result<()> {
        self.expect_kind(TokenKind::Type)?;
        self.parse_identifier_list()
    }

    fn parse_identifier_list(&mut self) -> Result<()> {
        self.expect_kind(TokenKind::Id)?;
        while self.at_lexeme(",") {
            self.expect(TokenKind::Delimiter, ",")?;
            self.expect_kind(TokenKind::Id)?;
        }
        Ok(())
    }

    fn parse_statement(&mut self) -> Result<()> {
        let Some(token) = self.current() else {
            return Err(self.mismatch("a statement"));
        };
        match token.kind {
            TokenKind::Delimiter if token.lexeme == "[" => self.parse_compound_statement(),
            TokenKind::Id => self.parse_assignment(),
            TokenKind::Keyword => match token.keyword() {
                Some(Keyword::If) => self.parse_if_statement(),
                Some(Keyword::While) => self.parse_while_statement(),
                Some(Keyword::For) => self.parse_for_statement(),
                Some(Keyword::Read) => self.parse_input_statement(),
                Some(Keyword::Write) => self.parse_output_statement(),
                Some(Keyword::Else) => Err(Error::SyntaxMismatch {
                    expected: "a statement".to_string(),
                    got: "'else' without a matching 'if'".to_string(),
                }),
                _ => Err(self.mismatch("a statement")),
            },
            _ => Err(self.mismatch("a statement")),
        }
    }

    /// Compound block: `[ statement ... ]` with an optional `:` or
    /// newline-token separator between statements. Deliberately not the
    /// same shape as the `{ ... ; }` program block.
    fn parse_compound_statement(&mut self) -> Result<()> {
        self.expect(TokenKind::Delimiter, "[")?;
        while self.current().is_some() && !self.at_lexeme("]") {
            self.parse_statement()?;
            if self.at_lexeme(":") || self.at_lexeme("\n") {
                self.advance();
            }
        }
        self.expect(TokenKind::Delimiter, "]")?;
        Ok(())
    }

    fn parse_assignment(&mut self) -> Result<()> {
        self.expect_kind(TokenKind::Id)?;
        self.expect(TokenKind::Keyword, "as")?;
        self.parse_expression()
    }

    fn parse_if_statement(&mut self) -> Result<()> {
        self.expect(TokenKind::Keyword, "if")?;
        self.expect(TokenKind::Delimiter, "(")?;
        self.parse_expression()?;
        self.expect(TokenKind::Delimiter, ")")?;
        self.expect(TokenKind::Keyword, "then")?;
        self.parse_statement()?;
        if self.current().and_then(Token::keyword) == Some(Keyword::Else) {
            self.advance();
            self.parse_statement()?;
        }
        Ok(())
    }

    /// `while expression do statement` — the guard is not parenthesized
    fn parse_while_statement(&mut self) -> Result<()> {
        self.expect(TokenKind::Keyword, "while")?;
        self.parse_expression()?;
        self.expect(TokenKind::Keyword, "do")?;
        self.parse_statement()
    }

    fn parse_for_statement(&mut self) -> Result<()> {
        self.expect(TokenKind::Keyword, "for")?;
        self.parse_assignment()?;
        self.expect(TokenKind::Keyword, "to")?;
        self.parse_expression()?;
        self.expect(TokenKind::Keyword, "do")?;
        self.parse_statement()
    }

    fn parse_input_statement(&mut self) -> Result<()> {
        self.expect(TokenKind::Keyword, "read")?;
        self.expect(TokenKind::Delimiter, "(")?;
        self.expect_kind(TokenKind::Id)?;
        while self.at_lexeme(",") {
            self.expect(TokenKind::Delimiter, ",")?;
            self.expect_kind(TokenKind::Id)?;
        }
        self.expect(TokenKind::Delimiter, ")")?;
        Ok(())
    }

    fn parse_output_statement(&mut self) -> Result<()> {
        self.expect(TokenKind::Keyword, "write")?;
        self.expect(TokenKind::Delimiter, "(")?;
        self.parse_expression()?;
        while self.at_lexeme(",") {
            self.expect(TokenKind::Delimiter, ",")?;
            self.parse_expression()?;
        }
        self.expect(TokenKind::Delimiter, ")")?;
        Ok(())
    }

    // ==================== Expressions ====================

    /// `term (('+' | '-' | 'or') term)*` followed by any trailing
    /// relational operators. The additive tier matches by spelling so that
    /// `or` (a keyword token) participates.
    fn parse_expression(&mut self) -> Result<()> {
        self.parse_term()?;
        while self
            .current()
            .is_some_and(|t| matches!(t.lexeme.as_str(), "+" | "-" | "or"))
        {
            self.advance();
            self.parse_term()?;
        }
        while self.current().is_some_and(|t| t.kind == TokenKind::RelOp) {
            self.advance();
            self.parse_term()?;
        }
        Ok(())
    }

    fn parse_term(&mut self) -> Result<()> {
        self.parse_factor()?;
        while self
            .current()
            .is_some_and(|t| matches!(t.lexeme.as_str(), "*" | "/" | "and"))
        {
            self.advance();
            self.parse_factor()?;
        }
        Ok(())
    }

    fn parse_factor(&mut self) -> Result<()> {
        let Some(token) = self.current() else {
            return Err(self.mismatch("a factor"));
        };
        match token.kind {
            TokenKind::Id | TokenKind::Str => {
                self.advance();
                Ok(())
            }
            TokenKind::Number => self.parse_number(),
            TokenKind::Keyword if matches!(token.keyword(), Some(Keyword::True | Keyword::False)) => {
                self.advance();
                Ok(())
            }
            TokenKind::Delimiter if token.lexeme == "(" => {
                self.advance();
                self.parse_expression()?;
                self.expect(TokenKind::Delimiter, ")")
            }
            TokenKind::Keyword if token.keyword() == Some(Keyword::Not) => {
                self.advance();
                self.parse_factor()
            }
            _ => Err(self.mismatch("a factor")),
        }
    }

    /// Re-validate a NUMBER lexeme against the radix-prefixed and real
    /// forms the lexer scans.
    fn parse_number(&mut self) -> Result<()> {
        let Some(token) = self.current() else {
            return Err(self.mismatch("NUMBER"));
        };
        let lexeme = token.lexeme.as_str();
        if is_prefix_binary(lexeme)
            || is_prefix_octal(lexeme)
            || is_plain_decimal(lexeme)
            || is_prefix_hexadecimal(lexeme)
            || is_real_literal(lexeme)
        {
            self.advance();
            Ok(())
        } else {
            Err(Error::MalformedNumberLiteral {
                lexeme: lexeme.to_string(),
            })
        }
    }
}

// ==================== Numeric Literal Forms ====================
//
// The prefix-radix scheme matched here is the one the lexer scans. An empty
// digit run after the prefix is accepted because the lexer emits exactly
// that lexeme for input like `0B`.

fn is_prefix_binary(lexeme: &str) -> bool {
    strip_radix_prefix(lexeme, 'b')
        .is_some_and(|digits| digits.chars().all(|c| matches!(c, '0' | '1')))
}

fn is_prefix_octal(lexeme: &str) -> bool {
    strip_radix_prefix(lexeme, 'o')
        .is_some_and(|digits| digits.chars().all(|c| matches!(c, '0'..='7')))
}

fn is_prefix_hexadecimal(lexeme: &str) -> bool {
    strip_radix_prefix(lexeme, 'h').is_some_and(|digits| digits.chars().all(|c| c.is_ascii_hexdigit()))
}

fn strip_radix_prefix(lexeme: &str, radix: char) -> Option<&str> {
    let rest = lexeme.strip_prefix('0')?;
    rest.strip_prefix(radix)
        .or_else(|| rest.strip_prefix(radix.to_ascii_uppercase()))
}

/// Plain digits, with an optional `d`/`D` suffix
fn is_plain_decimal(lexeme: &str) -> bool {
    let digits = lexeme.strip_suffix(['d', 'D']).unwrap_or(lexeme);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn is_real_literal(lexeme: &str) -> bool {
    lexeme.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::Lexer;

    fn validate(source: &str) -> Result<()> {
        let tokens = Lexer::new(source).tokenize();
        Parser::new(&tokens).validate()
    }

    #[test]
    fn test_minimal_program() {
        assert!(validate("{ }").is_ok());
        assert!(validate("{ % a; a as 5; }").is_ok());
    }

    #[test]
    fn test_declarations() {
        assert!(validate("{ % a, b, c; ! r; $ flag; }").is_ok());
        // Declaration list must be comma separated here
        assert!(validate("{ % a b; }").is_err());
    }

    #[test]
    fn test_if_statement() {
        assert!(validate("{ % a; if (a < 5) then a as 1; }").is_ok());
        assert!(validate("{ % a; if (a < 5) then a as 1 else a as 2; }").is_ok());
        // 'if' guard requires parentheses in this production
        assert!(validate("{ % a; if a < 5 then a as 1; }").is_err());
    }

    #[test]
    fn test_else_without_if() {
        let result = validate("{ else; }");
        assert!(matches!(result, Err(Error::SyntaxMismatch { .. })));
    }

    #[test]
    fn test_while_guard_is_bare() {
        assert!(validate("{ % i; while i < 10 do i as i + 1; }").is_ok());
    }

    #[test]
    fn test_for_statement() {
        assert!(validate("{ % i, n; for i as 1 to n do read(i); }").is_ok());
    }

    #[test]
    fn test_io_statements() {
        assert!(validate("{ % a, b; read(a, b); write(a + b, 'sum'); }").is_ok());
        assert!(validate("{ read(); }").is_err());
    }

    #[test]
    fn test_compound_block_uses_brackets() {
        assert!(validate("{ % a, b; [ a as 1 : b as 2 ]; }").is_ok());
        assert!(validate("{ % a; [ a as 1 ; }").is_err());
    }

    #[test]
    fn test_expression_forms() {
        assert!(validate("{ % a; $ f; a as (a + 2) * 3; f as not true; }").is_ok());
        assert!(validate("{ $ f; % a; f as false or a < 3; }").is_ok());
        // Relational operators only follow the additive tier; nothing after
        // the relational run is consumed
        assert!(validate("{ $ f; % a; f as a < 3 or false; }").is_err());
        assert!(validate("{ % a; a as ; }").is_err());
    }

    #[test]
    fn test_number_literal_forms() {
        assert!(validate("{ % a; a as 0B1010; }").is_ok());
        assert!(validate("{ % a; a as 0o17; }").is_ok());
        assert!(validate("{ % a; a as 0HFF; }").is_ok());
        assert!(validate("{ % a; a as 42d; }").is_ok());
        assert!(validate("{ % a; a as 3.14; }").is_ok());
        // An exponent with no digits survives the lexer but fails here
        assert!(matches!(
            validate("{ % a; a as 1e; }"),
            Err(Error::MalformedNumberLiteral { .. })
        ));
    }

    #[test]
    fn test_missing_semicolon() {
        let result = validate("{ % a; a as 5 }");
        assert!(matches!(result, Err(Error::SyntaxMismatch { .. })));
    }

    #[test]
    fn test_missing_closing_brace() {
        let result = validate("{ % a; a as 5;");
        assert!(matches!(result, Err(Error::SyntaxMismatch { .. })));
    }
}
