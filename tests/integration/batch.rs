//! Integration tests for `batch dump` and `batch update`.

use crate::common::{SAMPLE_METADATA, SAMPLE_TOC, Sandbox, read};
use pdftoc::PdfTocError;
use pdftoc::metadata::extract_toc;

#[tokio::test]
async fn test_batch_dump_writes_toc_next_to_pdf() {
    let sandbox = Sandbox::new();

    sandbox.run(&["batch", &sandbox.pdf_arg(), "dump"]).await.unwrap();

    assert_eq!(read(&sandbox.path("guide.toc")), SAMPLE_TOC);
}

#[tokio::test]
async fn test_batch_dump_to_named_file() {
    let sandbox = Sandbox::new();
    let toc = sandbox.path("contents.txt");

    sandbox
        .run(&["batch", &sandbox.pdf_arg(), "dump", &toc.display().to_string()])
        .await
        .unwrap();

    assert_eq!(read(&toc), SAMPLE_TOC);
    assert!(!sandbox.path("guide.toc").exists());
}

#[tokio::test]
async fn test_round_trip_reproduces_metadata() {
    let sandbox = Sandbox::new();
    let pdf = sandbox.pdf_arg();

    sandbox.run(&["batch", &pdf, "dump"]).await.unwrap();
    sandbox.run(&["batch", &pdf, "update"]).await.unwrap();

    assert_eq!(sandbox.pdf_metadata(), SAMPLE_METADATA);
    assert_eq!(read(&sandbox.path("guide.metadata")), SAMPLE_METADATA);
    assert!(sandbox.path("guide.pdf.bak").exists());
    assert!(!sandbox.path("guide.pdf.tmp").exists());
}

#[tokio::test]
async fn test_batch_update_keeps_toc_order() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.path("guide.toc"), "3 1 Intro\n1 1 Preface\n").unwrap();

    sandbox
        .run(&["batch", &sandbox.pdf_arg(), "update"])
        .await
        .unwrap();

    let metadata = sandbox.pdf_metadata();
    let toc = extract_toc(&metadata).unwrap();
    let entries: Vec<(u32, &str)> = toc
        .entries()
        .iter()
        .map(|b| (b.page, b.title.as_str()))
        .collect();
    assert_eq!(entries, [(3, "Intro"), (1, "Preface")]);

    // Everything that is not a bookmark survives.
    assert!(metadata.contains("InfoValue: Field Guide\n"));
    assert!(metadata.contains("PageMediaNumber: 1\n"));
    assert!(!metadata.contains("Owls"));
}

#[tokio::test]
async fn test_batch_update_normalises_description_spacing() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.path("guide.toc"), "\n12   1   Chapter    One\n\n").unwrap();

    sandbox
        .run(&["batch", &sandbox.pdf_arg(), "update"])
        .await
        .unwrap();

    let toc = extract_toc(&sandbox.pdf_metadata()).unwrap();
    assert_eq!(toc.render(), "12 1 Chapter One\n");
}

#[tokio::test]
async fn test_invalid_toc_leaves_pdf_untouched() {
    let sandbox = Sandbox::new();
    let before = read(&sandbox.pdf);
    std::fs::write(
        sandbox.path("guide.toc"),
        "1 1\nabc 1 Title\n3 x Title\n12 1 Chapter One\n",
    )
    .unwrap();

    let err = sandbox
        .run(&["batch", &sandbox.pdf_arg(), "update"])
        .await
        .unwrap_err();

    assert!(matches!(err, PdfTocError::TocValidation { .. }));
    assert_eq!(err.exit_code(), 1);

    let lines: Vec<usize> = err.diagnostics().iter().map(|d| d.line).collect();
    assert_eq!(lines, [1, 2, 3]);
    let message = err.to_string();
    assert!(message.contains("too few fields"));
    assert!(message.contains("non-integer page number"));
    assert!(message.contains("non-integer level number"));

    assert_eq!(read(&sandbox.pdf), before);
    assert!(!sandbox.path("guide.metadata").exists());
    assert!(!sandbox.path("guide.pdf.bak").exists());
}

#[tokio::test]
async fn test_batch_update_without_page_count_fails() {
    let sandbox = Sandbox::with_metadata("InfoBegin\nInfoKey: Title\nInfoValue: Loose\n");
    let before = read(&sandbox.pdf);
    std::fs::write(sandbox.path("guide.toc"), "1 1 Start\n").unwrap();

    let err = sandbox
        .run(&["batch", &sandbox.pdf_arg(), "update"])
        .await
        .unwrap_err();

    assert!(matches!(err, PdfTocError::MissingPageCount));
    assert_eq!(read(&sandbox.pdf), before);
}

#[tokio::test]
async fn test_batch_dump_reports_malformed_stanza() {
    let sandbox = Sandbox::with_metadata(
        "NumberOfPages: 20\n\
BookmarkBegin\n\
BookmarkTitle: Broken\n\
BookmarkPageNumber: 4\n\
BookmarkBegin\n\
BookmarkTitle: Fine\n\
BookmarkLevel: 1\n\
BookmarkPageNumber: 6\n",
    );

    let err = sandbox
        .run(&["batch", &sandbox.pdf_arg(), "dump"])
        .await
        .unwrap_err();

    assert!(matches!(err, PdfTocError::MetadataFormat { .. }));
    assert_eq!(err.diagnostics().len(), 1);
    assert_eq!(err.diagnostics()[0].line, 4);
    assert_eq!(err.diagnostics()[0].message, "expected BookmarkLevel");
    assert!(!sandbox.path("guide.toc").exists());
}
