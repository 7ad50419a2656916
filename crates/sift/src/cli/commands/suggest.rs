//! Implementation of `sift suggest`.

use std::process::ExitCode;

use serde::Serialize;
use sift_phrase::{CandidateSuggester, Suggester};

use crate::cli::{
    args::SuggestCommand,
    context::CommandContext,
    output::{dim, print_json},
};

/// JSON output for `sift suggest`.
#[derive(Serialize)]
struct JsonSuggestions {
    /// Text typed so far at the completion site.
    prefix: String,
    /// First character of the token a completion replaces, or the cursor when it inserts.
    start: usize,
    /// Matching completions, best first.
    suggestions: Vec<String>,
}

/// Lists completions for the token under the cursor.
///
/// `--candidate` values replace the configured vocabulary.
pub fn run(ctx: &CommandContext, cmd: &SuggestCommand) -> ExitCode {
    let mut analyzer = ctx.analyzer(cmd.phrase.grammar);
    let analysis = analyzer.parse(&cmd.phrase.text, cmd.phrase.cursor());

    let suggester: Box<dyn Suggester> = if cmd.candidates.is_empty() {
        ctx.config.suggester()
    } else {
        Box::new(CandidateSuggester::new(cmd.candidates.iter().cloned()))
    };
    let suggestions = suggester.suggest(&analysis);

    if cmd.output.json {
        let start = analysis
            .suggest
            .token
            .as_ref()
            .map_or(analysis.cursor, |token| token.start);
        return print_json(&JsonSuggestions {
            prefix: analysis.suggest.value.clone(),
            start,
            suggestions,
        });
    }

    if suggestions.is_empty() {
        println!("{}", dim("No suggestions."));
        return ExitCode::SUCCESS;
    }
    for suggestion in &suggestions {
        println!("{suggestion}");
    }
    ExitCode::SUCCESS
}
