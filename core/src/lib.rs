pub mod card;
pub mod mood;
mod parse;
pub mod river;
pub mod transit;
pub mod utils;
pub use parse::{
    deserialize_lenient, deserialize_lenient_list, deserialize_lenient_string, parse_float_prefix,
    parse_timestamp, parse_timestamp_str, probe,
};

/// Shown in place of a value that has not been received yet.
pub const PLACEHOLDER: &str = "--";
/// Shown as "last update" before the first successful fetch.
pub const NOT_YET_UPDATED: &str = "gleich";
