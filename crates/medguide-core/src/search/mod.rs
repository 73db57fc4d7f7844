//! Search over the medication catalog.
//!
//! Pipeline: raw query → [`normalize`] → [`score_keys`] per record → ranked results

mod normalizer;
mod scorer;

pub use normalizer::*;
pub use scorer::*;
