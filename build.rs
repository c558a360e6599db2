use std::collections::HashSet;
use std::path::Path;

fn main() {
    let books_path = Path::new("catalogs/books.json");
    let counts_path = Path::new("catalogs/web_verse_counts.json");

    let books = validate_books_file(books_path);
    validate_verse_counts_file(counts_path, &books);

    println!("cargo:rerun-if-changed={}", books_path.display());
    println!("cargo:rerun-if-changed={}", counts_path.display());
}

fn read_json(path: &Path, what: &str) -> serde_json::Value {
    assert!(
        path.exists(),
        "\n\n{what} BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the data file before building.\n",
        path.display()
    );

    let contents = std::fs::read_to_string(path).unwrap_or_else(|e| {
        panic!(
            "\n\n{what} BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            path.display()
        );
    });

    serde_json::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\n{what} BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            path.display()
        );
    })
}

/// Validate the book catalog and return the set of book ids.
fn validate_books_file(path: &Path) -> HashSet<String> {
    let catalog = read_json(path, "CATALOG");

    let books = catalog
        .get("books")
        .and_then(serde_json::Value::as_array)
        .unwrap_or_else(|| {
            panic!(
                "\n\nCATALOG BUILD ERROR: Missing 'books' array\n\
                 The catalog must have a top-level 'books' array.\n"
            )
        });

    assert!(
        books.len() == 66,
        "\n\nCATALOG BUILD ERROR: Expected 66 books, found {}\n",
        books.len()
    );

    let mut ids = HashSet::new();
    for (index, book) in books.iter().enumerate() {
        for field in ["id", "name", "testament", "api_name"] {
            assert!(
                book.get(field).and_then(serde_json::Value::as_str).is_some(),
                "\n\nCATALOG BUILD ERROR: Book {index} is missing '{field}'\n"
            );
        }

        let id = book["id"].as_str().unwrap();
        assert!(
            ids.insert(id.to_string()),
            "\n\nCATALOG BUILD ERROR: Duplicate book id '{id}'\n"
        );

        let testament = book["testament"].as_str().unwrap();
        assert!(
            testament == "OT" || testament == "NT",
            "\n\nCATALOG BUILD ERROR: Book '{id}' has invalid testament '{testament}'\n"
        );
    }

    ids
}

/// Validate the verse-count index against the catalog's book ids.
fn validate_verse_counts_file(path: &Path, book_ids: &HashSet<String>) {
    let data = read_json(path, "VERSE COUNTS");

    assert!(
        data.get("translationId")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|id| !id.is_empty()),
        "\n\nVERSE COUNTS BUILD ERROR: Missing 'translationId'\n"
    );

    let books = data
        .get("books")
        .and_then(serde_json::Value::as_object)
        .unwrap_or_else(|| {
            panic!(
                "\n\nVERSE COUNTS BUILD ERROR: Missing 'books' object\n\
                 The index must have a top-level 'books' object.\n"
            )
        });

    for (book_id, record) in books {
        assert!(
            book_ids.contains(book_id),
            "\n\nVERSE COUNTS BUILD ERROR: Unknown book id '{book_id}'\n"
        );

        let chapters = record
            .get("chapters")
            .and_then(serde_json::Value::as_object)
            .unwrap_or_else(|| {
                panic!("\n\nVERSE COUNTS BUILD ERROR: '{book_id}' has no chapters object\n")
            });
        assert!(
            !chapters.is_empty(),
            "\n\nVERSE COUNTS BUILD ERROR: '{book_id}' has no chapters\n"
        );

        // Chapter keys must run 1..=n with no gaps, every count positive.
        for number in 1..=chapters.len() {
            let count = chapters
                .get(&number.to_string())
                .and_then(serde_json::Value::as_u64)
                .unwrap_or_else(|| {
                    panic!(
                        "\n\nVERSE COUNTS BUILD ERROR: '{book_id}' is missing chapter {number}\n\
                         Chapters must be numbered 1..=n with no gaps.\n"
                    )
                });
            assert!(
                count > 0,
                "\n\nVERSE COUNTS BUILD ERROR: '{book_id}' chapter {number} has zero verses\n"
            );
        }
    }

    // Every catalog book should have counts; warn-level gaps are allowed in
    // custom data at runtime, but the embedded data must be complete.
    for id in book_ids {
        assert!(
            books.contains_key(id),
            "\n\nVERSE COUNTS BUILD ERROR: No verse counts for book '{id}'\n"
        );
    }
}
