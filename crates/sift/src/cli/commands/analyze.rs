//! Implementation of `sift analyze`.

use std::process::ExitCode;

use serde::Serialize;
use sift_phrase::PhraseAnalysis;

use crate::cli::{
    args::AnalyzeCommand,
    context::CommandContext,
    output::{
        caret, describe_token, dim, format_token_tree, header, highlight_tokens, indent_content,
        print_json,
    },
};

/// JSON output for `sift analyze`.
#[derive(Serialize)]
struct JsonAnalysis<'a> {
    /// Grammar the phrase was analyzed with.
    grammar: &'static str,
    /// The analysis itself.
    #[serde(flatten)]
    analysis: &'a PhraseAnalysis,
}

/// Tokenizes a phrase and reports the context around the cursor.
pub fn run(ctx: &CommandContext, cmd: &AnalyzeCommand) -> ExitCode {
    let grammar = ctx.grammar(cmd.phrase.grammar);
    let mut analyzer = ctx.analyzer(Some(grammar));
    let analysis = analyzer.parse(&cmd.phrase.text, cmd.phrase.cursor());

    if cmd.output.json {
        return print_json(&JsonAnalysis {
            grammar: grammar.as_str(),
            analysis: &analysis,
        });
    }

    println!("{} {}", header("Phrase"), dim(&format!("({grammar})")));
    println!("  {}", highlight_tokens(&analysis.tokens));
    println!("  {}", caret(analysis.cursor));
    println!();

    println!("{}", header("Tokens"));
    if analysis.tokens.is_empty() {
        println!("  {}", dim("(empty)"));
    } else {
        println!("{}", indent_content(&format_token_tree(&analysis.tokens), 2));
    }
    println!();

    println!("{} {}", header("Cursor"), dim(&analysis.cursor.to_string()));
    println!("  current:    {}", describe_token(analysis.current.as_ref()));
    println!("  parent:     {}", describe_token(analysis.parent.as_ref()));
    println!("  completing: {:?}", analysis.suggest.value);
    println!(
        "  replaces:   {}",
        describe_token(analysis.suggest.token.as_ref())
    );

    ExitCode::SUCCESS
}
