//! The two search pipelines.
//!
//! - [`filter`]: direct, synchronous substring search over the catalog
//! - [`matcher`]: description search delegated to a language model, whose
//!   reply is intersected with the catalog

pub mod filter;
pub mod matcher;

pub use filter::{filter, match_ranges};
pub use matcher::{build_prompt, description_request, match_codes, parse_reply, TEMPERATURE};
