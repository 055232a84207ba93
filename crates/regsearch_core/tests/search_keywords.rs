use regsearch_core::db::open_db_in_memory;
use regsearch_core::{
    search_dockets, Docket, DocketRecord, DocketRepository, IngestPipeline, LexicalExtractor,
    SqliteDocketRepository,
};
use std::collections::BTreeSet;

fn keyword_set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn ingest_extract_search_scenario() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteDocketRepository::try_new(&mut conn).unwrap();
    let mut pipeline = IngestPipeline::new(repo, Box::new(LexicalExtractor::default()));

    pipeline
        .ingest_records(&[DocketRecord {
            docket_id: 1,
            title: "Clean Air Rule".to_string(),
            summary: "Limits on emissions from vehicles".to_string(),
        }])
        .unwrap();
    assert_eq!(pipeline.reextract_all().unwrap(), 1);
    drop(pipeline);

    let repo = SqliteDocketRepository::try_new(&mut conn).unwrap();
    let loaded = repo.get(1).unwrap().unwrap();
    for expected in [
        "clean", "air", "rule", "limits", "on", "emissions", "from", "vehicles",
    ] {
        assert!(
            loaded.keywords.contains(expected),
            "missing keyword `{expected}`"
        );
    }

    let hits = search_dockets(&repo, "emiss").unwrap();
    let ids: Vec<i64> = hits.iter().map(|docket| docket.docket_id).collect();
    assert_eq!(ids, vec![1]);

    assert!(search_dockets(&repo, "zzz").unwrap().is_empty());
}

#[test]
fn search_is_case_insensitive() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDocketRepository::try_new(&mut conn).unwrap();

    repo.create(&Docket::with_keywords(
        1,
        "title",
        "summary",
        keyword_set(&["emissions"]),
    ))
    .unwrap();

    let hits = search_dockets(&repo, "EMISS").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].docket_id, 1);
}

#[test]
fn docket_with_multiple_matching_keywords_is_returned_once() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDocketRepository::try_new(&mut conn).unwrap();

    repo.create(&Docket::with_keywords(
        1,
        "title",
        "summary",
        keyword_set(&["emission limits", "emissions", "emitter"]),
    ))
    .unwrap();

    let hits = search_dockets(&repo, "emi").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].docket_id, 1);
}

#[test]
fn like_wildcards_in_terms_match_literally() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDocketRepository::try_new(&mut conn).unwrap();

    repo.create(&Docket::with_keywords(
        1,
        "title",
        "summary",
        keyword_set(&["50% reduction"]),
    ))
    .unwrap();
    repo.create(&Docket::with_keywords(
        2,
        "title",
        "summary",
        keyword_set(&["co2_target"]),
    ))
    .unwrap();

    let percent_hits = search_dockets(&repo, "50%").unwrap();
    let percent_ids: Vec<i64> = percent_hits.iter().map(|docket| docket.docket_id).collect();
    assert_eq!(percent_ids, vec![1]);

    // `_` must not act as a single-character wildcard.
    let underscore_hits = search_dockets(&repo, "2_t").unwrap();
    let underscore_ids: Vec<i64> = underscore_hits
        .iter()
        .map(|docket| docket.docket_id)
        .collect();
    assert_eq!(underscore_ids, vec![2]);

    assert!(search_dockets(&repo, "5_%").unwrap().is_empty());
}

#[test]
fn empty_term_matches_every_docket_holding_keywords() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDocketRepository::try_new(&mut conn).unwrap();

    repo.create(&Docket::with_keywords(
        1,
        "title",
        "summary",
        keyword_set(&["air"]),
    ))
    .unwrap();
    repo.create(&Docket::new(2, "no keywords yet", "summary"))
        .unwrap();

    let hits = search_dockets(&repo, "").unwrap();
    let ids: Vec<i64> = hits.iter().map(|docket| docket.docket_id).collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn single_character_terms_are_accepted_by_core() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDocketRepository::try_new(&mut conn).unwrap();

    repo.create(&Docket::with_keywords(
        1,
        "title",
        "summary",
        keyword_set(&["emissions"]),
    ))
    .unwrap();

    let hits = search_dockets(&repo, "e").unwrap();
    assert_eq!(hits.len(), 1);
}

#[test]
fn search_on_empty_corpus_returns_empty() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteDocketRepository::try_new(&mut conn).unwrap();

    assert!(search_dockets(&repo, "anything").unwrap().is_empty());
}
