//! Implementation of `sift decode`.

use std::process::ExitCode;

use serde::Serialize;
use sift_terms::QueryRequest;

use crate::cli::{
    args::DecodeCommand,
    context::CommandContext,
    output::{dim, header, print_json, term_table},
};

/// JSON output for `sift decode`.
#[derive(Serialize)]
struct JsonDecoded {
    /// The decoded filters as a matcher phrase.
    phrase: String,
    /// The committed request.
    request: QueryRequest,
}

/// Decodes request parameters, under the configured names, back into terms.
pub fn run(ctx: &CommandContext, cmd: &DecodeCommand) -> ExitCode {
    let model = ctx.config.codec().decode_query_string(&cmd.query);
    let phrase = model.filters.to_phrase();
    let request = model.request();

    if cmd.output.json {
        return print_json(&JsonDecoded { phrase, request });
    }

    println!("{}", header("Filters"));
    if request.filters.is_empty() {
        println!("  {}", dim("(none)"));
    } else {
        println!("{}", term_table(&request.filters));
        println!("  {phrase}");
    }
    if !request.sorters.is_empty() {
        println!();
        println!("{}", header("Sorters"));
        println!("{}", term_table(&request.sorters));
    }
    println!();

    println!("{}", header("Page"));
    let limit = request
        .limit
        .map_or_else(|| "none".to_string(), |limit| limit.to_string());
    println!("  offset: {}", request.offset);
    println!("  limit:  {limit}");

    if !request.parameters.is_empty() {
        println!();
        println!("{}", header("Other parameters"));
        for (name, value) in request.parameters.iter() {
            println!("  {name} = {value}");
        }
    }

    ExitCode::SUCCESS
}
