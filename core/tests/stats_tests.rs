use rpnsearch_core::stats::{CollectionStatistics, PairSearch};
use rpnsearch_core::{InvertedIndex, RawDocument};

/// Builds a collection where `alpha` is in docs 1..=60, `beta` in 1..=55 and `gamma` in 61..=116.
fn overlap_index() -> InvertedIndex {
    let docs = (1..=120).map(|i| {
        let mut words = vec![format!("w{i}")];
        if i <= 60 {
            words.push("alpha".into());
        }
        if i <= 55 {
            words.push("beta".into());
        }
        if (61..=116).contains(&i) {
            words.push("gamma".into());
        }
        RawDocument { docno: Some(format!("D{i}")), text: Some(words.join(" ")) }
    });
    InvertedIndex::from_documents(docs)
}

#[test]
fn finds_similar_overlapping_pair() {
    let idx = overlap_index();
    let stats = CollectionStatistics::new(&idx);
    let pair = stats.find_similar_pair(&PairSearch::default()).expect("pair");
    let mut terms = [pair.first.term.as_str(), pair.second.term.as_str()];
    terms.sort();
    assert_eq!(terms, ["alpha", "beta"]);
    assert_eq!(pair.shared.len(), 55);
    assert!((pair.overlap_percentage() - 100.0).abs() < 1e-9);
}

#[test]
fn no_pair_outside_frequency_range() {
    let idx = overlap_index();
    let cfg = PairSearch { min_doc_freq: 100, ..PairSearch::default() };
    assert!(CollectionStatistics::new(&idx).find_similar_pair(&cfg).is_none());
}

#[test]
fn window_limits_search() {
    let idx = overlap_index();
    let cfg = PairSearch { window: 1, ..PairSearch::default() };
    assert!(CollectionStatistics::new(&idx).find_similar_pair(&cfg).is_none());
}

#[test]
fn frequency_tolerance_is_enforced() {
    let idx = overlap_index();
    // 55 vs 60 differ by 5, more than 5% of 60
    let cfg = PairSearch { freq_tolerance: 0.05, ..PairSearch::default() };
    assert!(CollectionStatistics::new(&idx).find_similar_pair(&cfg).is_none());
}

#[test]
fn report_renders_all_sections() {
    let idx = overlap_index();
    let cfg = PairSearch::default();
    let report = CollectionStatistics::new(&idx).report(3, &cfg);
    assert_eq!(report.highest.len(), 3);
    assert_eq!(report.highest[0].term, "alpha");
    assert_eq!(report.lowest[0].doc_freq, 1);
    assert_eq!(report.shared_sample.len(), 10);
    assert_eq!(report.shared_sample[0], ("D1".to_string(), 1));

    let text = report.render_text(&cfg);
    assert!(text.contains("1. Top 3 Terms with Highest Document Frequency"));
    assert!(text.contains(" 1. 'alpha' - appears in 60 documents (50.0%)"));
    assert!(text.contains("SHARED DOCUMENTS: 55 documents"));
    assert!(text.contains("  - D1 (ID: 1)"));

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["num_documents"], 120);
    assert_eq!(json["similar_pair"]["shared"].as_array().unwrap().len(), 55);
}

#[test]
fn empty_index_report() {
    let idx = InvertedIndex::default();
    let cfg = PairSearch::default();
    let report = CollectionStatistics::new(&idx).report(10, &cfg);
    assert!(report.highest.is_empty());
    assert!(report.render_text(&cfg).contains("No suitable term pair found."));
}
