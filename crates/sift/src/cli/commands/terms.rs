//! Implementation of `sift terms`.

use std::process::ExitCode;

use serde::Serialize;
use sift_phrase::{GrammarKind, PhraseAnalyzer};
use sift_terms::{QueryModel, QueryRequest, QueryTerm, terms_from_tokens};
use tracing::debug;

use crate::cli::{
    args::TermsCommand,
    context::CommandContext,
    output::{dim, header, param_table, print_json, success, term_table, warning},
};

/// JSON output for `sift terms`.
#[derive(Serialize)]
struct JsonTerms {
    /// The filters rendered back as a phrase.
    phrase: String,
    /// Whether both term lists are well formed.
    valid: bool,
    /// Why the lists are malformed, if they are.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    /// The committed request.
    request: QueryRequest,
    /// Flat request parameters under the configured names.
    params: Vec<(String, String)>,
    /// The parameters as a URL query string.
    query: String,
}

/// Builds the query model for a matcher phrase and the command's sort and page options.
fn build_model(ctx: &CommandContext, cmd: &TermsCommand) -> QueryModel {
    let mut analyzer = PhraseAnalyzer::for_grammar(GrammarKind::Matcher);
    let analysis = analyzer.parse(&cmd.phrase, 0);

    let mut model = ctx.config.model();
    for term in terms_from_tokens(&analysis.tokens) {
        model.filters.insert(term, false);
    }
    for (column, direction) in &cmd.sorters {
        model
            .sorters
            .insert(QueryTerm::sorter(column.clone(), direction.clone()), false);
    }
    model.offset = cmd.offset;
    if cmd.limit.is_some() {
        model.limit = cmd.limit;
    }
    debug!(
        filters = model.filters.count(),
        sorters = model.sorters.count(),
        "built query model"
    );
    model
}

/// Turns a matcher phrase into filter terms and request parameters.
///
/// Exits with failure when the resulting term lists are malformed.
pub fn run(ctx: &CommandContext, cmd: &TermsCommand) -> ExitCode {
    let model = build_model(ctx, cmd);
    let codec = ctx.config.codec();
    let request = model.request();
    let params = codec.encode(&request);
    let query = codec.encode_query_string(&request);
    let validation = model.validate();

    if cmd.output.json {
        let code = print_json(&JsonTerms {
            phrase: model.filters.to_phrase(),
            valid: validation.is_ok(),
            error: validation.as_ref().err().map(ToString::to_string),
            request,
            params,
            query,
        });
        return if validation.is_ok() {
            code
        } else {
            ExitCode::FAILURE
        };
    }

    println!("{}", header("Filters"));
    if model.filters.is_empty() {
        println!("  {}", dim("(none)"));
    } else {
        println!("{}", term_table(model.filters.terms()));
        println!("  {}", model.filters.to_phrase());
    }
    if !model.sorters.is_empty() {
        println!();
        println!("{}", header("Sorters"));
        println!("{}", term_table(model.sorters.terms()));
    }
    println!();

    println!("{}", header("Parameters"));
    println!("{}", param_table(&params));
    println!("  ?{query}");
    println!();

    match validation {
        Ok(()) => {
            println!("{}", success("Terms are valid."));
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", warning(&format!("Terms are invalid: {e}")));
            ExitCode::FAILURE
        }
    }
}
