//! Integration tests for `add`.

use crate::common::{SAMPLE_METADATA, Sandbox, read};
use pdftoc::PdfTocError;
use pdftoc::metadata::extract_toc;

fn pages_and_titles(metadata: &str) -> Vec<(u32, String)> {
    extract_toc(metadata)
        .unwrap()
        .entries()
        .iter()
        .map(|b| (b.page, b.title.clone()))
        .collect()
}

#[tokio::test]
async fn test_add_dumps_when_no_cache_exists() {
    let sandbox = Sandbox::new();

    sandbox
        .run(&["add", &sandbox.pdf_arg(), "-p", "5", "-l", "2", "Hawks", "and", "Kites"])
        .await
        .unwrap();

    let metadata = read(&sandbox.path("guide.metadata"));
    assert_eq!(
        pages_and_titles(&metadata),
        [
            (1, "Preface".to_string()),
            (5, "Birds".to_string()),
            (5, "Hawks and Kites".to_string()),
            (9, "Owls".to_string()),
        ]
    );
    // The PDF is only touched with --update.
    assert_eq!(sandbox.pdf_metadata(), SAMPLE_METADATA);
}

#[tokio::test]
async fn test_add_twice_edits_cached_metadata() {
    let sandbox = Sandbox::new();
    let pdf = sandbox.pdf_arg();

    sandbox.run(&["add", &pdf, "-p", "12", "Ravens"]).await.unwrap();
    sandbox.run(&["add", &pdf, "-p", "2", "Contents"]).await.unwrap();

    let metadata = read(&sandbox.path("guide.metadata"));
    let titles: Vec<String> = pages_and_titles(&metadata)
        .into_iter()
        .map(|(_, title)| title)
        .collect();
    assert_eq!(titles, ["Preface", "Contents", "Birds", "Owls", "Ravens"]);

    let backup = read(&sandbox.path("guide.metadata.bak"));
    assert!(backup.contains("Ravens"));
    assert!(!backup.contains("Contents"));
}

#[tokio::test]
async fn test_add_with_update_writes_pdf() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.path("guide.metadata"), "stale cache\n").unwrap();

    sandbox
        .run(&["add", &sandbox.pdf_arg(), "--dump", "--update", "-p", "20", "Index"])
        .await
        .unwrap();

    let titles: Vec<String> = pages_and_titles(&sandbox.pdf_metadata())
        .into_iter()
        .map(|(_, title)| title)
        .collect();
    assert_eq!(titles, ["Preface", "Birds", "Owls", "Index"]);
    assert!(sandbox.path("guide.pdf.bak").exists());
    assert_eq!(read(&sandbox.path("guide.metadata.bak")), "stale cache\n");
}

#[tokio::test]
async fn test_add_beyond_last_page_still_succeeds() {
    let sandbox = Sandbox::new();

    sandbox
        .run(&["add", &sandbox.pdf_arg(), "-p", "99", "Appendix"])
        .await
        .unwrap();

    let metadata = read(&sandbox.path("guide.metadata"));
    assert_eq!(pages_and_titles(&metadata).last().unwrap().0, 99);
}

#[tokio::test]
async fn test_add_keeps_marker_words_in_title() {
    let sandbox = Sandbox::new();

    sandbox
        .run(&["add", &sandbox.pdf_arg(), "-p", "3", "BookmarkBegin", "explained"])
        .await
        .unwrap();

    let metadata = read(&sandbox.path("guide.metadata"));
    assert!(metadata.contains("BookmarkTitle: BookmarkBegin explained\n"));
    assert_eq!(pages_and_titles(&metadata).len(), 4);
}

#[tokio::test]
async fn test_add_rejects_broken_cache() {
    let sandbox = Sandbox::new();
    let cache = sandbox.path("guide.metadata");
    std::fs::write(
        &cache,
        "NumberOfPages: 3\nBookmarkBegin\nBookmarkTitle: Half\nBookmarkLevel: one\nBookmarkPageNumber: 1\n",
    )
    .unwrap();

    let err = sandbox
        .run(&["add", &sandbox.pdf_arg(), "-p", "2", "New"])
        .await
        .unwrap_err();

    match &err {
        PdfTocError::MetadataFormat { path, diagnostics } => {
            assert_eq!(path.as_deref(), Some(cache.as_path()));
            assert_eq!(diagnostics[0].line, 4);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(read(&cache).contains("Half"));
}
