//! SPF record analysis.
//!
//! - `term`: token grammar (qualifiers, mechanisms, the `all` check)
//! - `resolver`: include-chain walk with lookup-cost accounting
//! - `evaluate`: turns a domain's record and chain into findings

mod evaluate;
mod resolver;
mod term;

// Re-export public API
pub use evaluate::SpfEvaluator;
pub use resolver::{ResolutionState, SpfChain, SpfChainResolver};
pub use term::{all_qualifier, terms, Mechanism, Qualifier, SpfTerm};
