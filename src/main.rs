//! Sigil front-end CLI
//!
//! Thin host over the library pipeline: prints token tables, validates
//! grammar, runs semantic analysis, and converts expressions to postfix.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};

use sigil_lang::frontend::parser::Parser as SigilParser;
use sigil_lang::frontend::semantic::{to_postfix, SemanticAnalyzer};
use sigil_lang::Lexer;

/// Sigil front-end
#[derive(Parser, Debug)]
#[command(name = "sigilc")]
#[command(version = "0.1.0")]
#[command(about = "Sigil front-end - tokenizer, grammar validator and type checker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the token table for a source file
    Tokens {
        /// Input source file
        input: PathBuf,

        /// Emit the table as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate the grammar of a source file
    Check {
        /// Input source file
        input: PathBuf,
    },
    /// Run the full pipeline: tokens, grammar, semantics
    Analyze {
        /// Input source file
        input: PathBuf,
    },
    /// Convert an arithmetic expression to postfix notation
    Postfix {
        /// Expression text, e.g. "(a + b) * c"
        expr: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tokens { input, json } => {
            let source = read_source(&input)?;
            let tokens = Lexer::new(&source).tokenize();
            if json {
                println!("{}", serde_json::to_string_pretty(&tokens)?);
            } else {
                for token in &tokens {
                    println!("{:<10} {}", token.kind.to_string(), token.lexeme);
                }
            }
        }
        Commands::Check { input } => {
            let source = read_source(&input)?;
            let tokens = Lexer::new(&source).tokenize();
            match SigilParser::new(&tokens).validate() {
                Ok(()) => println!("  [✓] Grammar validation passed"),
                Err(e) => {
                    eprintln!("Syntax error: {e}");
                    process::exit(1);
                }
            }
        }
        Commands::Analyze { input } => {
            let source = read_source(&input)?;
            let tokens = Lexer::new(&source).tokenize();
            println!("  [✓] Tokenized {} tokens", tokens.len());

            if let Err(e) = SigilParser::new(&tokens).validate() {
                eprintln!("Syntax error: {e}");
                process::exit(1);
            }
            println!("  [✓] Grammar validation passed");

            let mut analyzer = SemanticAnalyzer::new(&tokens);
            if let Err(e) = analyzer.analyze() {
                eprintln!("Semantic error: {e}");
                process::exit(1);
            }
            println!(
                "  [✓] Semantic analysis passed ({} symbols)",
                analyzer.symbols().len()
            );
        }
        Commands::Postfix { expr } => {
            let tokens = Lexer::new(&expr).tokenize();
            match to_postfix(&tokens) {
                Ok(rpn) => println!("{rpn}"),
                Err(e) => {
                    eprintln!("Postfix error: {e}");
                    process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn read_source(input: &Path) -> anyhow::Result<String> {
    fs::read_to_string(input).with_context(|| format!("could not read {}", input.display()))
}
