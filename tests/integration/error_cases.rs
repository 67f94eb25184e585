//! Integration tests for error handling and edge cases.

use crate::common::Sandbox;
use clap::Parser;
use pdftoc::PdfTocError;
use pdftoc::cli::Cli;

#[tokio::test]
async fn test_missing_pdf() {
    let sandbox = Sandbox::new();
    let missing = sandbox.path("missing.pdf").display().to_string();

    let err = sandbox.run(&["batch", &missing, "dump"]).await.unwrap_err();

    assert!(matches!(err, PdfTocError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_input_that_is_not_a_pdf() {
    let sandbox = Sandbox::new();
    let notes = sandbox.path("notes.pdf");
    std::fs::write(&notes, "plain text\n").unwrap();

    let err = sandbox
        .run(&["dump", &notes.display().to_string()])
        .await
        .unwrap_err();

    assert!(matches!(err, PdfTocError::NotAPdf { .. }));
}

#[tokio::test]
async fn test_directory_instead_of_pdf() {
    let sandbox = Sandbox::new();
    let dir = sandbox.path("folder.pdf");
    std::fs::create_dir(&dir).unwrap();

    let err = sandbox
        .run(&["dump", &dir.display().to_string()])
        .await
        .unwrap_err();

    assert!(matches!(err, PdfTocError::NotAFile { .. }));
}

#[tokio::test]
async fn test_missing_tool() {
    let sandbox = Sandbox::new();
    let pdf = sandbox.pdf_arg();
    let cli = Cli::try_parse_from([
        "pdftoc",
        "-q",
        "--tool",
        "/nonexistent/pdftk",
        "dump",
        pdf.as_str(),
    ])
    .unwrap();

    let err = pdftoc::run(cli).await.unwrap_err();

    assert!(matches!(err, PdfTocError::ToolNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(!sandbox.path("guide.metadata").exists());
}

#[tokio::test]
async fn test_update_without_metadata_file() {
    let sandbox = Sandbox::new();

    let err = sandbox
        .run(&["update", &sandbox.pdf_arg()])
        .await
        .unwrap_err();

    assert!(matches!(err, PdfTocError::FileNotFound { .. }));
}

#[tokio::test]
async fn test_toc_may_not_replace_pdf() {
    let sandbox = Sandbox::new();
    let pdf = sandbox.pdf_arg();

    let err = sandbox.run(&["batch", &pdf, "dump", &pdf]).await.unwrap_err();

    assert!(matches!(err, PdfTocError::Usage { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_toc_spelled_through_dot_may_not_replace_pdf() {
    let sandbox = Sandbox::new();
    let before = std::fs::read(&sandbox.pdf).unwrap();
    let detour = sandbox.dir.path().join(".").join("guide.pdf");

    let err = sandbox
        .run(&["batch", &sandbox.pdf_arg(), "dump", &detour.display().to_string()])
        .await
        .unwrap_err();

    assert!(matches!(err, PdfTocError::Usage { .. }));
    assert_eq!(std::fs::read(&sandbox.pdf).unwrap(), before);
}

#[tokio::test]
async fn test_title_with_control_character() {
    let sandbox = Sandbox::new();

    let err = sandbox
        .run(&["add", &sandbox.pdf_arg(), "-p", "2", "Bell\u{7}Title"])
        .await
        .unwrap_err();

    assert!(matches!(err, PdfTocError::InvalidTitle { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(!sandbox.path("guide.metadata").exists());
}

#[tokio::test]
async fn test_check_valid_and_invalid_toc() {
    let sandbox = Sandbox::new();
    let toc = sandbox.path("guide.toc");
    let toc_arg = toc.display().to_string();

    std::fs::write(&toc, "12 1 Chapter One\n\n13 2 Section\n").unwrap();
    sandbox.run(&["check", &toc_arg]).await.unwrap();
    sandbox.run(&["check", &toc_arg, "--json"]).await.unwrap();

    std::fs::write(&toc, "12 1 Chapter One\n3 x Title\n").unwrap();
    let err = sandbox.run(&["check", &toc_arg]).await.unwrap_err();
    match &err {
        PdfTocError::TocValidation { path, diagnostics } => {
            assert_eq!(path.as_deref(), Some(toc.as_path()));
            assert_eq!(diagnostics.len(), 1);
            assert_eq!(diagnostics[0].line, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("line 2: non-integer level number"));
}
