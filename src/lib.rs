//! Front-end for the Sigil teaching language.
//!
//! Sigil is a small imperative language: curly-brace-delimited programs,
//! variable declarations headed by a type sigil (`%` integer, `!` real,
//! `$` boolean), `if/then/else`, `while/do` and `for/to/do` control
//! statements, `read`/`write` I/O, and `as` assignment.
//!
//! ## Analysis pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Grammar Validator
//!                         ↘ Semantic Analyzer → Symbol table
//! ```
//!
//! 1. [`frontend::lexer`] — finite-state tokenizer producing `(kind, lexeme)`
//!    tokens; total, it never fails and embeds lexical faults in the stream.
//! 2. [`frontend::parser`] — recursive-descent grammar validator; pass/fail
//!    only, no tree is retained.
//! 3. [`frontend::semantic`] — an independent walk over the same tokens that
//!    builds the symbol table and type-checks statements; also home to the
//!    suffix-radix literal classifier and the infix-to-postfix converter.
//!
//! Both downstream stages re-walk the raw token sequence with private
//! cursors, so [`analyze`] always reports all three results for one source
//! string, and analyses of different strings are fully independent.

pub mod frontend;
pub mod utils;

pub use frontend::lexer::Lexer;
pub use frontend::parser::Parser;
pub use frontend::semantic::{to_postfix, SemanticAnalyzer};
pub use frontend::token::{Token, TokenKind};
pub use utils::{Error, Result};

/// Combined result of running all three stages over one source string
#[derive(Debug)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub syntax: Result<()>,
    pub semantic: Result<()>,
}

/// Run the full pipeline over one source string.
///
/// The token sequence is produced once; the grammar validator and the
/// semantic analyzer each traverse it independently. Neither downstream
/// failure prevents the other stage from reporting.
pub fn analyze(source: &str) -> Analysis {
    let tokens = Lexer::new(source).tokenize();
    let syntax = Parser::new(&tokens).validate();
    let semantic = SemanticAnalyzer::new(&tokens).analyze();
    Analysis {
        tokens,
        syntax,
        semantic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_success() {
        let analysis = analyze("{ % a; a as 5; }");
        assert_eq!(analysis.tokens.len(), 9);
        assert!(analysis.syntax.is_ok());
        assert!(analysis.semantic.is_ok());
    }

    #[test]
    fn test_undeclared_use_passes_grammar_only() {
        let analysis = analyze("{ % a; b as 5; }");
        assert!(analysis.syntax.is_ok());
        assert_eq!(
            analysis.semantic,
            Err(Error::UndeclaredIdentifier { name: "b".into() })
        );
    }

    #[test]
    fn test_lexical_faults_do_not_abort_tokenizing() {
        let analysis = analyze("{ @ }");
        assert_eq!(analysis.tokens.len(), 3);
        assert!(analysis.syntax.is_err());
        assert!(analysis.semantic.is_err());
    }

    #[test]
    fn test_analyses_are_independent() {
        let first = analyze("{ % a; a as 5; }");
        let second = analyze("{ % a; a as 5; }");
        assert_eq!(first.tokens, second.tokens);
        assert_eq!(first.syntax, second.syntax);
    }
}
