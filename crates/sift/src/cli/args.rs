//! Clap argument definitions for the `sift` CLI.

use std::{env, process::exit};

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, error::ErrorKind};
use sift_phrase::GrammarKind;

/// Parses a grammar name.
fn parse_grammar(s: &str) -> Result<GrammarKind, String> {
    s.parse()
}

/// Parses a `column:direction` sort term.
fn parse_sort(s: &str) -> Result<(String, String), String> {
    match s.split_once(':') {
        Some((column, direction)) if !column.is_empty() && !direction.is_empty() => {
            Ok((column.to_string(), direction.to_string()))
        }
        _ => Err(format!("expected column:direction, got '{s}'")),
    }
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Analyze query phrases and build structured query terms")]
pub struct Cli {
    /// Log more to stderr (-v debug, -vv trace); overrides SIFT_LOG
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// The phrase being analyzed and where the cursor is.
#[derive(Args, Debug, Clone)]
pub struct PhraseArgs {
    /// Text to analyze
    pub text: String,

    /// Cursor position in characters [default: end of text]
    #[arg(short = 'c', long)]
    pub cursor: Option<usize>,

    /// Grammar: word, field or matcher [default: from config]
    #[arg(short = 'g', long, value_parser = parse_grammar)]
    pub grammar: Option<GrammarKind>,
}

impl PhraseArgs {
    /// The cursor, defaulting to the end of the text.
    pub fn cursor(&self) -> usize {
        self.cursor.unwrap_or_else(|| self.text.chars().count())
    }
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `sift analyze`.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeCommand {
    #[command(flatten)]
    /// Phrase and cursor.
    pub phrase: PhraseArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `sift suggest`.
#[derive(Args, Debug, Clone)]
pub struct SuggestCommand {
    #[command(flatten)]
    /// Phrase and cursor.
    pub phrase: PhraseArgs,

    /// Candidate completion, replaces the configured vocabulary (repeatable)
    #[arg(long = "candidate", value_name = "CANDIDATE")]
    pub candidates: Vec<String>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `sift terms`.
#[derive(Args, Debug, Clone)]
pub struct TermsCommand {
    /// Matcher phrase, e.g. "status = open and priority >= 2"
    pub phrase: String,

    /// Sort term as column:direction (repeatable)
    #[arg(short = 's', long = "sort", value_parser = parse_sort, value_name = "COLUMN:DIR")]
    pub sorters: Vec<(String, String)>,

    /// Results to skip
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Page size [default: terms.page_size from config]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `sift decode`.
#[derive(Args, Debug, Clone)]
pub struct DecodeCommand {
    /// URL query string, with or without the leading '?'
    pub query: String,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `sift init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.sift.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `sift` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show how a phrase is tokenized and what the cursor touches
    #[command(after_help = "\
GRAMMARS:
  word       Words and whitespace
  field      field:value terms, AND/OR/NOT and quoted values
  matcher    column operator value, joined by and/or

EXAMPLES:
  sift analyze 'status:open AND priority:\"very high\"'
  sift analyze -g matcher 'name like foo or status = bar' --cursor 4")]
    Analyze(AnalyzeCommand),

    /// Complete the token under the cursor
    Suggest(SuggestCommand),

    /// Turn a matcher phrase into filter terms and request parameters
    #[command(after_help = "\
EXAMPLES:
  sift terms 'status = open and priority >= 2'
  sift terms 'title like \"war and peace\"' --sort year:desc --limit 10")]
    Terms(TermsCommand),

    /// Decode request parameters back into terms
    Decode(DecodeCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and diagnose issues
    Check,

    /// Initialize sift configuration in current directory
    Init(InitCommand),
}

/// Parses CLI arguments, printing compact help for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp && env::args().len() <= 2 {
                print_command_list();
                exit(0);
            }
            e.exit();
        }
    }
}

/// Prints the top-level help as a one-line-per-command list.
fn print_command_list() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: sift [OPTIONS] <COMMAND>");
    println!();
    println!("Commands:");
    for sub in cmd.get_subcommands() {
        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {:10} {about}", sub.get_name());
    }
    println!(
        "  {:<10} Print this message or the help of the given subcommand(s)",
        "help"
    );
    println!();
    println!("Options:");
    println!("  -v, --verbose...  Log more to stderr (-v debug, -vv trace); overrides SIFT_LOG");
    println!("  -h, --help        Print help");
}
