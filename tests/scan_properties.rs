//! End-to-end properties of a domain scan, driven through in-memory DNS.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::{ListRegistry, ZoneFetcher};
use mail_spoof::{scan_domains, FetchError, Finding, FindingKind, Scanner};

fn scanner(fetcher: ZoneFetcher) -> Scanner<ZoneFetcher, ListRegistry> {
    Scanner::new(fetcher, None)
}

fn codes(findings: &[Finding]) -> Vec<u32> {
    findings.iter().map(|f| f.code).collect()
}

#[tokio::test]
async fn test_strict_domain_has_no_findings() {
    let fetcher = ZoneFetcher::new()
        .txt(
            "strict.example",
            &[
                "google-site-verification=abc",
                "v=spf1 include:_spf.mailhost.example -all",
            ],
        )
        .txt("_spf.mailhost.example", &["v=spf1 ip4:198.51.100.0/24 -all"])
        .txt("_dmarc.strict.example", &["v=DMARC1; p=reject; pct=100"]);

    assert!(scanner(fetcher).scan("strict.example").await.is_empty());
}

#[tokio::test]
async fn test_missing_records() {
    let fetcher = ZoneFetcher::new()
        .txt("bare.example", &[])
        .txt("_dmarc.bare.example", &["unrelated"]);

    let findings = scanner(fetcher).scan("bare.example").await;
    assert_eq!(
        codes(&findings),
        vec![FindingKind::NoSpf.code(), FindingKind::NoDmarc.code()]
    );
}

#[tokio::test]
async fn test_pass_all_never_reports_soft_fail() {
    let fetcher = ZoneFetcher::new()
        .txt("open.example", &["v=spf1 +all"])
        .txt("_dmarc.open.example", &["v=DMARC1; p=reject"]);

    let findings = scanner(fetcher).scan("open.example").await;
    assert_eq!(codes(&findings), vec![FindingKind::SpfPassAll.code()]);
}

#[tokio::test]
async fn test_lax_dmarc_yields_two_distinct_findings() {
    let fetcher = ZoneFetcher::new()
        .txt("lax.example", &["v=spf1 -all"])
        .txt("_dmarc.lax.example", &["v=DMARC1; p=none; pct=50"]);

    let findings = scanner(fetcher).scan("lax.example").await;
    assert_eq!(findings.len(), 2);
    assert_ne!(findings[0].code, findings[1].code);
    assert!(findings[0].is(FindingKind::DmarcLaxPolicy));
    assert!(findings[1].is(FindingKind::DmarcNot100Pct));
}

#[tokio::test]
async fn test_lookup_count_is_additive_across_includes() {
    // 2 at the root, 5 + 4 in the includes: 11 lookups
    let fetcher = ZoneFetcher::new()
        .txt(
            "heavy.example",
            &["v=spf1 include:one.example include:two.example -all"],
        )
        .txt(
            "one.example",
            &["v=spf1 a:a1.one.example a:a2.one.example mx:m1.one.example mx:m2.one.example exists:x.one.example -all"],
        )
        .txt(
            "two.example",
            &["v=spf1 a:a1.two.example a:a2.two.example mx:m1.two.example ptr:p.two.example -all"],
        )
        .txt("_dmarc.heavy.example", &["v=DMARC1; p=reject"]);

    let findings = scanner(fetcher).scan("heavy.example").await;
    assert_eq!(codes(&findings), vec![FindingKind::SpfLookupError.code()]);
}

#[tokio::test]
async fn test_self_include_terminates_with_one_finding() {
    let fetcher = ZoneFetcher::new()
        .txt("loop.example", &["v=spf1 include:loop.example ~all"])
        .txt("_dmarc.loop.example", &["v=DMARC1; p=reject"]);

    let findings = scanner(fetcher).scan("loop.example").await;
    assert_eq!(findings.len(), 1);
    assert!(findings[0].is(FindingKind::SpfRecurse));
}

#[tokio::test]
async fn test_mutual_includes_terminate() {
    let fetcher = ZoneFetcher::new()
        .txt("ping.example", &["v=spf1 include:pong.example -all"])
        .txt("pong.example", &["v=spf1 include:ping.example -all"])
        .txt("_dmarc.ping.example", &["v=DMARC1; p=reject"]);

    let findings = tokio::time::timeout(
        Duration::from_secs(5),
        scanner(fetcher).scan("ping.example"),
    )
    .await
    .expect("scan must terminate");
    assert!(findings.is_empty());
}

#[tokio::test]
async fn test_nonexistent_domain_substitutes_name() {
    let findings = scanner(ZoneFetcher::new()).scan("gone.example").await;
    assert!(findings[0].is(FindingKind::NxDomain));
    assert!(findings[0].detail.contains("gone.example"));
    assert!(!findings[0].detail.contains('{'));
}

#[tokio::test]
async fn test_timeouts_become_findings() {
    let fetcher = ZoneFetcher::new()
        .error("slow.example", FetchError::Timeout("slow.example".into()))
        .error(
            "_dmarc.slow.example",
            FetchError::Timeout("_dmarc.slow.example".into()),
        );

    let findings = scanner(fetcher).scan("slow.example").await;
    assert_eq!(
        findings,
        vec![
            Finding::dns_timeout("slow.example"),
            Finding::dns_timeout("slow.example")
        ]
    );
}

#[tokio::test]
async fn test_unregistered_dependency_is_reported() {
    let fetcher = ZoneFetcher::new()
        .txt(
            "vendor-user.example",
            &["v=spf1 include:_spf.defunct-vendor.com mx:mx.acme.co.uk -all"],
        )
        .txt("_dmarc.vendor-user.example", &["v=DMARC1; p=reject"]);
    let registry = ListRegistry::with_free(&["defunct-vendor.com"]);

    let findings = Scanner::new(fetcher, Some(registry))
        .scan("vendor-user.example")
        .await;
    assert_eq!(
        findings,
        vec![Finding::unregistered_domains(["defunct-vendor.com"])]
    );
}

#[tokio::test]
async fn test_findings_are_independent_per_domain() {
    let fetcher = ZoneFetcher::new()
        .txt("a.example", &["v=spf1 -all"])
        .txt("b.example", &["v=spf1 -all"]);
    let scanner = scanner(fetcher);

    let mut a = scanner.scan("a.example").await;
    let b = scanner.scan("b.example").await;
    a[0].detail.push_str(" (edited)");
    assert_eq!(b, vec![Finding::plain(FindingKind::NoDmarc)]);
    assert_eq!(b[0].detail, FindingKind::NoDmarc.template());
}

#[tokio::test]
async fn test_batch_preserves_input_order_and_bounds_concurrency() {
    let domains: Vec<String> = (0..12).map(|i| format!("d{i}.example")).collect();
    let mut fetcher = ZoneFetcher::new().delay(Duration::from_millis(20));
    for domain in &domains {
        fetcher = fetcher.txt(domain, &["v=spf1 ~all"]);
    }
    let probe = fetcher.probe();

    let results = scan_domains(Arc::new(scanner(fetcher)), domains.clone(), 3).await;

    let scanned: Vec<&str> = results.iter().map(|r| r.domain.as_str()).collect();
    let expected: Vec<&str> = domains.iter().map(String::as_str).collect();
    assert_eq!(scanned, expected);
    assert!(results
        .iter()
        .all(|r| codes(&r.issues)
            == vec![FindingKind::SpfSoftFailAll.code(), FindingKind::NoDmarc.code()]));
    // each scan fetches sequentially, so overlapping fetches mean overlapping domains
    assert!(probe.max() <= 3);
    assert!(probe.max() >= 2);
}
