//! Implementation of `sift check`.

use std::process::ExitCode;

use sift_config::{ConfigWarning, format_path_for_display, is_global_config};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, the resolved analyzer and term settings, and validation warnings.
///
/// Exits with failure when there are warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let cwd = &ctx.cwd;
    let config = &ctx.config;

    if config.sources.is_empty() {
        println!("{}", dim("No configuration files found, using defaults."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("sift init")
        );
    } else {
        println!("{}", subheader("Config files:"));
        for path in &config.sources {
            let display_path = format_path_for_display(path, Some(cwd));
            let scope = if is_global_config(path) {
                "global"
            } else {
                "local"
            };
            println!("   {display_path} {}", dim(&format!("({scope})")));
        }
    }
    println!();

    println!("{}", subheader("Analyzer:"));
    println!("   grammar: {}", config.grammar());
    let columns = if config.vocabulary.columns.is_empty() {
        dim("(none)")
    } else {
        config.vocabulary.columns.join(", ")
    };
    println!("   columns: {columns}");
    println!();

    println!("{}", subheader("Terms:"));
    println!("   separator: {}", config.default_separator());
    println!("   matcher:   {}", config.default_matcher());
    println!("   page size: {}", config.terms.page_size);
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::EmptyVocabulary { .. } => {
                println!(
                    "{}",
                    dim("Hint: list completable columns under [vocabulary] in .sift.toml")
                );
            }
            ConfigWarning::AmbiguousParams { .. } => {
                println!(
                    "{}",
                    dim("Hint: pick distinct params.field_separator and params.term_delimiter")
                );
            }
            _ => {}
        }
    }
}
