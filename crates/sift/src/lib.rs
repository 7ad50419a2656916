//! sift: incremental query-phrase analysis.
//!
//! The `sift` binary exposes the phrase analyzer and the structured query model on the
//! command line: tokenize a phrase at a cursor, complete what is being typed, turn a matcher
//! phrase into filter terms and flat request parameters, and decode those parameters back.

#![warn(missing_docs)]

pub mod cli;
