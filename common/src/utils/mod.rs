//! Utility functions and helpers.

pub mod id_parser;
pub mod query_builder;

pub use id_parser::{parse_positive_id, PositiveId};
pub use query_builder::{BindValue, OrderBy, Predicate, SelectQuery, Table};
