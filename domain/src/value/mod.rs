//! Settings values: scalar/mapping values, ordered documents and the value bag.

pub mod config_value;
pub mod document;
pub mod value_bag;
