//! Error handling.
//!
//! Errors are categorized by how far they are allowed to travel:
//! - **DNS errors** (`FetchError`): recovered into findings by the evaluators
//! - **Chain errors** (`SpfChainError`): recovered into a single terminal SPF finding
//! - **Registration errors** (`RegistrationError`): logged per domain and skipped
//! - **Scan errors** (`ScanError`): end one evaluator for one domain, logged by the scanner
//! - **Initialization errors**: abort the run before any domain is scanned

mod types;

// Re-export public API
pub use types::{FetchError, InitializationError, RegistrationError, ScanError, SpfChainError};
