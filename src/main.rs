use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codespan_reporting::diagnostic::{Diagnostic as CodespanDiagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use oclparse::error::LexError;
use oclparse::lexer::{format_tokens, tokenize};
use oclparse::{node_kind_catalog, Diagnostic, Tree};

#[derive(Parser)]
#[command(name = "oclparse")]
#[command(author, version, about = "A parser for OpenCL C kernels", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// tree-sitter style S-expression (default)
    #[value(name = "sexp")]
    Sexp,
    /// Full tree as JSON
    #[value(name = "json")]
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a source file and print its syntax tree
    Parse {
        /// The source file to parse
        input: PathBuf,

        /// How to print the tree
        #[arg(long, value_enum, default_value = "sexp")]
        format: OutputFormat,
    },
    /// Print the token stream of a source file
    Tokens {
        /// The source file to tokenize
        input: PathBuf,
    },
    /// Check a source file for syntax errors
    Check {
        /// The source file to check
        input: PathBuf,
    },
    /// Print the node kind catalog as JSON
    Kinds,
}

fn main() -> Result<()> {
    // Initialize logger before parsing CLI args
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let result = match cli.command {
        Commands::Parse { input, format } => parse(input, format, cli.verbose),
        Commands::Tokens { input } => tokens(input),
        Commands::Check { input } => check(input),
        Commands::Kinds => kinds(),
    };

    match result {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Source file loaded for parsing and diagnostic rendering
struct SourceFile {
    files: SimpleFiles<String, String>,
    file_id: usize,
    source: String,
}

impl SourceFile {
    fn load(path: &PathBuf) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file: {:?}", path))?;
        let mut files = SimpleFiles::new();
        let file_id = files.add(path.display().to_string(), source.clone());
        Ok(Self {
            files,
            file_id,
            source,
        })
    }

    fn emit(&self, diagnostic: &CodespanDiagnostic<usize>) -> Result<()> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();
        codespan_reporting::term::emit(&mut writer.lock(), &config, &self.files, diagnostic)?;
        Ok(())
    }

    fn report(&self, diagnostics: &[Diagnostic]) -> Result<()> {
        for diagnostic in diagnostics {
            self.emit(&diagnostic.to_codespan(self.file_id))?;
        }
        Ok(())
    }

    fn report_lex_errors(&self, errors: &[LexError]) -> Result<()> {
        for error in errors {
            let span = error.span();
            let diagnostic = CodespanDiagnostic::error()
                .with_message(format!("Lexical error: {}", error.kind))
                .with_labels(vec![Label::primary(self.file_id, span.start..span.end)]);
            self.emit(&diagnostic)?;
        }
        Ok(())
    }
}

fn parse_file(file: &SourceFile, verbose: bool) -> (Tree, Vec<Diagnostic>) {
    if verbose {
        println!("{}: Parsing {} bytes", "step".cyan().bold(), file.source.len());
    }
    oclparse::parse(&file.source)
}

fn parse(input: PathBuf, format: OutputFormat, verbose: bool) -> Result<bool> {
    let file = SourceFile::load(&input)?;
    let (tree, diagnostics) = parse_file(&file, verbose);

    match format {
        OutputFormat::Sexp => println!("{}", tree.to_sexp()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tree)?),
    }

    file.report(&diagnostics)?;
    Ok(diagnostics.is_empty())
}

fn tokens(input: PathBuf) -> Result<bool> {
    let file = SourceFile::load(&input)?;
    let (tokens, errors) = tokenize(&file.source);

    println!("{}", "=== Tokens ===".blue().bold());
    println!("{}", format_tokens(&file.source, &tokens));

    file.report_lex_errors(&errors)?;
    Ok(errors.is_empty())
}

fn check(input: PathBuf) -> Result<bool> {
    let file = SourceFile::load(&input)?;
    let (tree, diagnostics) = parse_file(&file, false);
    file.report(&diagnostics)?;

    let items = tree.items().count();
    if diagnostics.is_empty() {
        println!(
            "{}: {:?} ({} top-level items)",
            "ok".green().bold(),
            input,
            items
        );
        Ok(true)
    } else {
        println!(
            "{}: {:?} has {} error(s)",
            "failed".red().bold(),
            input,
            diagnostics.len()
        );
        Ok(false)
    }
}

fn kinds() -> Result<bool> {
    println!("{}", serde_json::to_string_pretty(node_kind_catalog())?);
    Ok(true)
}
