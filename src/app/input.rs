//! Domain list loading.

use std::collections::HashSet;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::Config;

/// Longest name DNS can carry (RFC 1035 section 2.3.4).
const MAX_DOMAIN_LENGTH: usize = 253;

/// Collects the domains to scan: the input list first, then `config.domains`.
///
/// Duplicates are dropped, keeping the first occurrence.
///
/// # Errors
///
/// Fails if the input list cannot be read.
pub async fn load_domains(config: &Config) -> Result<Vec<String>> {
    let mut domains = Vec::new();

    if let Some(path) = &config.input_list {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read input list {}", path.display()))?;
        let listed = parse_domain_list(&contents);
        info!("Read {} domains from {}", listed.len(), path.display());
        domains.extend(listed);
    }

    domains.extend(config.domains.iter().filter_map(|d| validate_domain(d)));

    let mut seen = HashSet::new();
    domains.retain(|d| seen.insert(d.clone()));
    Ok(domains)
}

/// Parses one domain per line. Blank lines and `#` comments are skipped.
pub fn parse_domain_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(validate_domain)
        .collect()
}

/// Trims `domain` and rejects values that cannot be a DNS name.
///
/// Logs a warning and returns `None` for rejected values.
pub fn validate_domain(domain: &str) -> Option<String> {
    let domain = domain.trim();
    if domain.is_empty() {
        return None;
    }
    if domain.len() > MAX_DOMAIN_LENGTH {
        warn!(
            "Skipping domain exceeding maximum length ({} > {MAX_DOMAIN_LENGTH}): {}...",
            domain.len(),
            &domain[..domain.char_indices().nth(50).map_or(domain.len(), |(i, _)| i)]
        );
        return None;
    }
    if domain.chars().any(char::is_whitespace) {
        warn!("Skipping domain containing whitespace: {domain:?}");
        return None;
    }
    Some(domain.to_string())
}
