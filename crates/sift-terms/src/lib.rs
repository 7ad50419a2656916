//! Structured query terms for sift.
//!
//! A [`QueryTermList`] is the editable form of a filter or sort criterion list, as a
//! query-builder control manipulates it: terms are inserted, removed and rewritten around a
//! cursor, and an uncommitted placeholder stands for what the user is about to type. A
//! [`QueryModel`] pairs a filter list and a sorter list with pagination and extra parameters,
//! and projects to a serializable [`QueryRequest`] with a flat parameter encoding.
//!
//! # Example
//!
//! ```
//! use sift_terms::{QueryModel, QueryTermList};
//!
//! let mut model = QueryModel::new();
//! model.filters = QueryTermList::from_phrase("name like foo or status = bar");
//! assert!(model.valid());
//!
//! let params = model.request().to_params();
//! assert_eq!(params[0].1, "name:like:foo,or,status:=:bar");
//! assert_eq!(QueryModel::from_params(params).request(), model.request());
//! ```

#![warn(missing_docs)]

mod error;
mod list;
mod model;
mod params;
mod phrase;
mod term;

pub use error::TermError;
pub use list::{ListKind, QueryTermList};
pub use model::{Parameters, QueryModel, QueryRequest};
pub use params::ParamCodec;
pub use phrase::terms_from_tokens;
pub use term::{Operator, QueryTerm, TermId, TermKind};
