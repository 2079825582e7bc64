//! DMARC record analysis.

mod evaluate;
mod tags;

pub use evaluate::DmarcEvaluator;
pub use tags::{is_enforcing_policy, parse_tags, DmarcTag};
