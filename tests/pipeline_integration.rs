//! Integration tests for the compiler pipeline.

use hostlist_compiler::source::{read_source_list, write_lines};
use hostlist_compiler::{
    compile_sources, dedupe_sources, run_pipeline, AdblockRule, Error, EtcHostsRule, Grammar,
    Pipeline, Result, SourceFetcher, Wildcard,
};
use std::collections::HashMap;
use std::fs;

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// In-memory sources keyed by identifier.
struct MemoryFetcher {
    sources: HashMap<String, String>,
}

impl MemoryFetcher {
    fn new(sources: &[(&str, &str)]) -> Self {
        Self {
            sources: sources
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl SourceFetcher for MemoryFetcher {
    fn fetch(&self, source: &str) -> Result<String> {
        self.sources
            .get(source)
            .cloned()
            .ok_or_else(|| Error::InvalidSource(source.to_string()))
    }
}

fn sample_list() -> Vec<String> {
    lines(&[
        "! Title: sample",
        "# hosts section",
        "0.0.0.0 ads.example.com",
        "127.0.0.1 tracker.example.net metrics.example.net # telemetry",
        "::1 localhost",
        "example.net",
        "||example.com^",
        "||cdn.example.net^$important",
        "||example.org^$important,3p",
        "@@||allowed.example.org^$important",
        "||a^",
        "||example.info^$script",
        "||example.biz^test*",
        "/banner[0-9]+/",
        "||example.com^",
        "",
        "sub.deep.example.org",
        "||deep.example.org^",
    ])
}

#[test]
fn test_sample_list() {
    assert_eq!(
        run_pipeline(sample_list()),
        lines(&[
            "||localhost^",
            "||example.net^",
            "||example.com^",
            "||cdn.example.net^$important",
            "||example.org^$important",
            "@@||allowed.example.org^$important",
            "/banner[0-9]+/",
            "||deep.example.org^",
        ])
    );
}

#[test]
fn test_idempotence() {
    let once = run_pipeline(sample_list());
    let twice = run_pipeline(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn test_stripped_modifier_exposes_covered_rule() {
    // Modifiers are stripped after compression, so the rule only becomes
    // compressible on the next run.
    let once = run_pipeline(lines(&["||example.com^", "||cdn.example.com^$third-party"]));
    assert_eq!(once, lines(&["||example.com^", "||cdn.example.com^"]));
    assert_eq!(run_pipeline(once), lines(&["||example.com^"]));
}

#[test]
fn test_compression_soundness() {
    let grammar = Grammar::shared();
    let output = run_pipeline(sample_list());
    let hostnames: Vec<String> = output
        .iter()
        .filter_map(|line| AdblockRule::parse(line, grammar).ok())
        .filter(|rule| !rule.is_allow_rule && rule.options.is_empty())
        .filter_map(|rule| rule.hostname)
        .collect();

    for a in &hostnames {
        for b in &hostnames {
            if a != b {
                assert!(!a.ends_with(&format!(".{}", b)), "{} is covered by {}", a, b);
            }
        }
    }
}

#[test]
fn test_indented_hosts_lines() {
    let input = lines(&["\t0.0.0.0 ads.example.com", "   127.0.0.1 cdn.example.com", "||example.com^"]);
    let once = run_pipeline(input);
    assert_eq!(once, lines(&["||example.com^"]));
    assert_eq!(run_pipeline(once.clone()), once);
}

#[test]
fn test_compression_completeness() {
    assert_eq!(
        run_pipeline(lines(&["0.0.0.0 sub.example.com", "||example.com^"])),
        lines(&["||example.com^"])
    );
}

#[test]
fn test_dedup_with_comment_cascade() {
    let pipeline = Pipeline::new();
    // Comments are stripped first, so a full run only leaves the rule.
    assert_eq!(
        pipeline.run(lines(&["# note", "||a.com^", "||a.com^"])),
        lines(&["||a.com^"])
    );
}

#[test]
fn test_validator_rejections() {
    assert!(run_pipeline(lines(&["||a^"])).is_empty());
    assert!(run_pipeline(lines(&["||example.com^$script"])).is_empty());
    assert_eq!(
        run_pipeline(lines(&["||example.com^$important"])),
        lines(&["||example.com^$important"])
    );
}

#[test]
fn test_modifier_stripping() {
    assert_eq!(
        run_pipeline(lines(&["||example.com^$third-party,important"])),
        lines(&["||example.com^$important"])
    );
}

#[test]
fn test_adblock_round_trip() {
    let line = "@@||example.com^$important,badfilter";
    let rule = AdblockRule::parse(line, Grammar::shared()).unwrap();
    assert_eq!(rule.to_string(), line);
}

#[test]
fn test_etc_hosts_parse() {
    let rule = EtcHostsRule::parse("127.0.0.1 a.com b.com # comment").unwrap();
    assert_eq!(rule.hostnames, vec!["a.com", "b.com"]);
}

#[test]
fn test_malformed_lines_do_not_abort() {
    assert_eq!(
        run_pipeline(lines(&["@@", "$third-party", "0.0.0.0  # no names", "||example.com^"])),
        lines(&["||example.com^"])
    );
}

#[test]
fn test_compile_sources_in_order() {
    let fetcher = MemoryFetcher::new(&[
        ("first", "! first list\n0.0.0.0 ads.example.com\r\n||b.example.org^\n"),
        ("second", "example.com\nexample.org\n"),
    ]);
    let sources = dedupe_sources(lines(&["first", "second", "first"]));
    let rules = compile_sources(&sources, &fetcher, &Pipeline::new()).unwrap();
    assert_eq!(rules, lines(&["||example.com^", "||example.org^"]));
}

#[test]
fn test_compile_sources_fails_on_missing_source() {
    let fetcher = MemoryFetcher::new(&[("first", "||a.com^\n")]);
    let result = compile_sources(&lines(&["first", "missing"]), &fetcher, &Pipeline::new());
    assert!(matches!(result, Err(Error::InvalidSource(s)) if s == "missing"));
}

#[test]
fn test_exclusions() {
    let fetcher = MemoryFetcher::new(&[("list", "||ads.example.com^\n||tracker.example.net^\n")]);
    let pipeline = Pipeline::with_exclusions(vec![Wildcard::new("*tracker*").unwrap()]);
    let rules = compile_sources(&lines(&["list"]), &fetcher, &pipeline).unwrap();
    assert_eq!(rules, lines(&["||ads.example.com^"]));
}

#[test]
fn test_files_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let hosts = dir.path().join("hosts.txt");
    fs::write(&hosts, "0.0.0.0 ads.example.com\n0.0.0.0 example.com\n").unwrap();

    let list = dir.path().join("list.txt");
    fs::write(&list, format!("# local\n{}\n{}\n", hosts.display(), hosts.display())).unwrap();

    let sources = dedupe_sources(read_source_list(&list).unwrap());
    assert_eq!(sources.len(), 1);

    let fetcher = hostlist_compiler::HttpFetcher::new().unwrap();
    let rules = compile_sources(&sources, &fetcher, &Pipeline::new()).unwrap();

    let out = dir.path().join("out.txt");
    write_lines(&out, &rules).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), "||example.com^\n");
}
