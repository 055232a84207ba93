use regsearch_core::db::open_db_in_memory;
use regsearch_core::{
    Docket, DocketRepository, DocketService, DocketServiceError, DocketUpdate,
    SqliteDocketRepository,
};
use std::collections::BTreeSet;

fn keyword_set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn supplied_keywords_replace_the_full_set() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDocketRepository::try_new(&mut conn).unwrap();

    repo.create(&Docket::new(1, "title", "summary")).unwrap();

    let after_first = repo
        .update(1, &DocketUpdate::keywords(keyword_set(&["air", "rule"])))
        .unwrap();
    assert_eq!(after_first.keywords, keyword_set(&["air", "rule"]));

    let after_replace = repo
        .update(1, &DocketUpdate::keywords(keyword_set(&["water"])))
        .unwrap();
    // Replacement, not merge: the old texts are gone from the docket.
    assert_eq!(after_replace.keywords, keyword_set(&["water"]));
}

#[test]
fn keywords_are_lowercased_and_deduplicated_on_write() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDocketRepository::try_new(&mut conn).unwrap();

    repo.create(&Docket::new(1, "title", "summary")).unwrap();
    let updated = repo
        .update(
            1,
            &DocketUpdate::keywords(keyword_set(&["Air", "AIR", " air "])),
        )
        .unwrap();
    assert_eq!(updated.keywords, keyword_set(&["air"]));

    let registry = repo.list_keywords().unwrap();
    assert_eq!(registry, vec!["air".to_string()]);
}

#[test]
fn shared_keywords_link_multiple_dockets_through_one_registry_row() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDocketRepository::try_new(&mut conn).unwrap();

    repo.create(&Docket::with_keywords(
        1,
        "first",
        "summary",
        keyword_set(&["emissions"]),
    ))
    .unwrap();
    repo.create(&Docket::with_keywords(
        2,
        "second",
        "summary",
        keyword_set(&["emissions", "vehicles"]),
    ))
    .unwrap();

    let hits = repo.search_by_keyword("emissions").unwrap();
    let ids: Vec<i64> = hits.iter().map(|docket| docket.docket_id).collect();
    assert_eq!(ids, vec![1, 2]);

    let registry = repo.list_keywords().unwrap();
    assert_eq!(registry, vec!["emissions".to_string(), "vehicles".to_string()]);
}

#[test]
fn orphaned_keywords_stay_registered() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDocketRepository::try_new(&mut conn).unwrap();

    repo.create(&Docket::with_keywords(
        1,
        "first",
        "summary",
        keyword_set(&["shared", "solo"]),
    ))
    .unwrap();
    repo.create(&Docket::with_keywords(
        2,
        "second",
        "summary",
        keyword_set(&["shared"]),
    ))
    .unwrap();

    // Clearing docket 1 leaves both texts in the registry: `shared` is
    // still referenced, `solo` becomes an orphan and is retained anyway.
    let cleared = repo
        .update(1, &DocketUpdate::keywords(BTreeSet::new()))
        .unwrap();
    assert!(cleared.keywords.is_empty());

    let registry = repo.list_keywords().unwrap();
    assert_eq!(registry, vec!["shared".to_string(), "solo".to_string()]);

    let hits = repo.search_by_keyword("shared").unwrap();
    let ids: Vec<i64> = hits.iter().map(|docket| docket.docket_id).collect();
    assert_eq!(ids, vec![2]);
    assert!(repo.search_by_keyword("solo").unwrap().is_empty());
}

#[test]
fn blank_keywords_are_dropped_by_normalization() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDocketRepository::try_new(&mut conn).unwrap();

    repo.create(&Docket::with_keywords(
        1,
        "title",
        "summary",
        keyword_set(&["  ", "air"]),
    ))
    .unwrap();

    let loaded = repo.get(1).unwrap().unwrap();
    assert_eq!(loaded.keywords, keyword_set(&["air"]));
}

#[test]
fn service_rejects_blank_keyword_values() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteDocketRepository::try_new(&mut conn).unwrap();
    let mut service = DocketService::new(repo);

    service.create(Docket::new(1, "title", "summary")).unwrap();
    let err = service
        .update(1, DocketUpdate::keywords(keyword_set(&["   "])))
        .unwrap_err();
    assert!(matches!(err, DocketServiceError::InvalidKeyword(_)));
}
