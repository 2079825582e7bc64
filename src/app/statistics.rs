//! Scan statistics.

use std::collections::BTreeMap;

use log::info;
use strum::IntoEnumIterator;

use crate::findings::FindingKind;
use crate::scan::ScanResult;

/// Counts findings per code across all results.
pub fn count_findings(results: &[ScanResult]) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for finding in results.iter().flat_map(|r| &r.issues) {
        *counts.entry(finding.code).or_insert(0) += 1;
    }
    counts
}

/// Logs a per-kind breakdown of findings, in catalog order.
pub fn log_finding_statistics(findings_by_code: &BTreeMap<u32, usize>) {
    let total: usize = findings_by_code.values().sum();
    if total == 0 {
        info!("No findings");
        return;
    }

    info!("Finding Counts ({total} total):");
    for kind in FindingKind::iter() {
        if let Some(count) = findings_by_code.get(&kind.code()) {
            info!("   {}: {}", kind.name(), count);
        }
    }
}
