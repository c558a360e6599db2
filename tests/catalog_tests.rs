//! Catalog and verse-count data tests: file loading, structural invariants,
//! and the verse-spec canonical-form property.

use std::io::Write;

use proptest::prelude::*;
use scripture_ref::catalog::groups::GROUPS;
use scripture_ref::{parse_verse_spec, BookCatalog, BookId, Testament, VerseCountIndex};

fn fixtures() -> (BookCatalog, VerseCountIndex) {
    let catalog = BookCatalog::load_embedded().expect("embedded catalog loads");
    let counts = VerseCountIndex::load_embedded(&catalog).expect("embedded counts load");
    (catalog, counts)
}

#[test]
fn embedded_catalog_has_the_protestant_canon() {
    let (catalog, _) = fixtures();

    assert_eq!(catalog.len(), 66);
    assert_eq!(catalog.ids_by_testament(Testament::Old).len(), 39);
    assert_eq!(catalog.ids_by_testament(Testament::New).len(), 27);

    // Canonical order: Genesis first, Revelation last.
    assert_eq!(catalog.books()[0].id.as_str(), "GEN");
    assert_eq!(catalog.books()[65].id.as_str(), "REV");
}

#[test]
fn every_book_belongs_to_exactly_one_group() {
    let (catalog, _) = fixtures();

    let mut counted = 0;
    for group in GROUPS {
        counted += group.book_ids.len();
        for id in group.book_ids {
            assert!(catalog.get_by_id(id).is_some(), "{id} not in catalog");
        }
    }
    assert_eq!(counted, catalog.len());
}

#[test]
fn verse_count_index_covers_every_book_gaplessly() {
    let (catalog, counts) = fixtures();

    for book in catalog.books() {
        let chapter_count = counts.chapter_count(&book.id);
        assert!(chapter_count > 0, "{} has no chapters", book.id);

        for chapter in 1..=chapter_count {
            assert!(
                counts.verse_count(&book.id, chapter) > 0,
                "{} {} has no verses",
                book.id,
                chapter
            );
        }
        assert_eq!(counts.verse_count(&book.id, chapter_count + 1), 0);
    }
}

#[test]
fn offset_mapping_is_total_order_consistent() {
    let (_, counts) = fixtures();
    let jude = BookId::new("JUD");

    let total = counts.totals().by_book[&jude];
    assert_eq!(total, 25);

    let first = counts.verse_at_offset(&jude, 0).unwrap();
    assert_eq!((first.chapter, first.verse), (1, 1));

    let last = counts.verse_at_offset(&jude, total - 1).unwrap();
    assert_eq!((last.chapter, last.verse), (1, 25));

    assert!(counts.verse_at_offset(&jude, total).is_none());
}

#[test]
fn catalog_loads_from_file() {
    let (catalog, _) = fixtures();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(catalog.to_json().unwrap().as_bytes()).unwrap();
    file.flush().unwrap();

    let reloaded = BookCatalog::load_from_file(file.path()).unwrap();
    assert_eq!(reloaded.len(), 66);
    assert_eq!(reloaded.lookup_id("jn").unwrap().as_str(), "JHN");
}

#[test]
fn verse_counts_load_from_file() {
    let catalog = BookCatalog::load_embedded().unwrap();

    let json = r#"{
        "translationId": "web",
        "books": {
            "JUD": { "testament": "NT", "chapters": { "1": 25 } },
            "PHM": { "testament": "NT", "chapters": { "1": 25 } }
        }
    }"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.flush().unwrap();

    let counts = VerseCountIndex::load_from_file(file.path(), &catalog).unwrap();
    assert_eq!(counts.chapter_count(&BookId::new("JUD")), 1);
    assert_eq!(counts.totals().nt, 50);
    assert_eq!(counts.totals().ot, 0);

    // Books absent from a partial index report zero chapters, which the
    // parser treats as "skip bound validation".
    assert_eq!(counts.chapter_count(&BookId::new("GEN")), 0);
}

/// One verse-spec entry: a single verse or an ascending range.
fn entry_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u32..=200).prop_map(|v| v.to_string()),
        (1u32..=200, 1u32..=30).prop_map(|(start, len)| format!("{}-{}", start, start + len)),
    ]
}

proptest! {
    // Any spec rendered in canonical minimal form re-parses to itself.
    #[test]
    fn verse_spec_canonical_form_is_a_fixed_point(entries in prop::collection::vec(entry_strategy(), 1..6)) {
        let input = entries.join(",");

        let parsed = parse_verse_spec(&input).unwrap().unwrap();
        prop_assert_eq!(&parsed.spec, &input);

        let reparsed = parse_verse_spec(&parsed.spec).unwrap().unwrap();
        prop_assert_eq!(reparsed.spec, parsed.spec);
        prop_assert_eq!(reparsed.verses, parsed.verses);
    }

    // The expanded verse list is always positive, unique, and covered by
    // the ranges that produced it.
    #[test]
    fn verse_spec_expansion_matches_ranges(entries in prop::collection::vec(entry_strategy(), 1..6)) {
        let input = entries.join(",");
        let parsed = parse_verse_spec(&input).unwrap().unwrap();

        let mut seen = std::collections::HashSet::new();
        for &verse in &parsed.verses {
            prop_assert!(verse >= 1);
            prop_assert!(seen.insert(verse), "duplicate verse {}", verse);
            prop_assert!(
                parsed.ranges.iter().any(|r| r.start <= verse && verse <= r.end),
                "verse {} outside every range",
                verse
            );
        }
    }
}
