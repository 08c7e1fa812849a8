mod common;

use common::*;
use lopdf::Document;
use pdf_nup::*;
use std::sync::Arc;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

async fn run(
    specs: &[PageSpec],
    options: &NupOptions,
    rasterizer: TestRasterizer,
) -> (tempfile::TempDir, Result<CombineReport>) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.pdf");
    write_test_pdf(&input, specs);
    let output = dir.path().join("output.pdf");
    let result = combine_with(&input, &output, options, rasterizer, Arc::new(NullSink)).await;
    (dir, result)
}

#[tokio::test]
async fn test_ten_pages_six_up() {
    let options = NupOptions::with_mini_pages(6);
    let (dir, result) = run(&text_pages(10), &options, TestRasterizer::new()).await;
    let report = result.unwrap();

    assert_eq!(report.source_pages, 10);
    assert_eq!(report.output_pages, 2);
    assert_eq!(report.placed_pages, 10);
    assert!(report.skipped.is_empty());

    let output = Document::load(dir.path().join("output.pdf")).unwrap();
    assert_eq!(output.get_pages().len(), 2);

    let drawn = xobject_names(&output);
    assert_eq!(drawn[0], names(&["Im0", "Im1", "Im2", "Im3", "Im4", "Im5"]));
    // Cells 4 and 5 of the second page stay empty
    assert_eq!(drawn[1], names(&["Im0", "Im1", "Im2", "Im3"]));
}

#[tokio::test]
async fn test_page_count_is_ceiling_division() {
    for mini_pages in [4, 6] {
        for source_pages in [1, 3, 4, 5, 6, 7, 12, 13] {
            let options = NupOptions::with_mini_pages(mini_pages);
            let (dir, result) =
                run(&text_pages(source_pages), &options, TestRasterizer::new()).await;
            let report = result.unwrap();

            let expected = source_pages.div_ceil(mini_pages);
            assert_eq!(report.output_pages, expected);

            let output = Document::load(dir.path().join("output.pdf")).unwrap();
            assert_eq!(
                output.get_pages().len(),
                expected,
                "{} pages at {}-up",
                source_pages,
                mini_pages
            );
        }
    }
}

#[tokio::test]
async fn test_raster_failure_leaves_cell_empty() {
    let options = NupOptions::with_mini_pages(4);
    let (dir, result) = run(&text_pages(6), &options, TestRasterizer::failing_on(&[3])).await;
    let report = result.unwrap();

    assert_eq!(report.output_pages, 2);
    assert_eq!(report.placed_pages, 5);
    assert_eq!(report.failed_pages(), 1);

    let skipped = &report.skipped[0];
    assert_eq!(skipped.page_index, 3);
    assert_eq!(skipped.group_index, 0);
    assert_eq!(skipped.cell_index, 3);
    assert!(matches!(
        skipped.reason,
        SkipReason::Failed(PageError::Raster { page: 3, .. })
    ));

    let output = Document::load(dir.path().join("output.pdf")).unwrap();
    let drawn = xobject_names(&output);
    assert_eq!(drawn[0], names(&["Im0", "Im1", "Im2"]));
    assert_eq!(drawn[1], names(&["Im0", "Im1"]));
}

#[tokio::test]
async fn test_blank_page_does_not_shift_later_cells() {
    let specs = vec![
        PageSpec::Text("one".into()),
        PageSpec::Blank,
        PageSpec::Text("three".into()),
        PageSpec::Text("four".into()),
        PageSpec::Text("five".into()),
    ];
    let options = NupOptions::with_mini_pages(4);
    let rasterizer = TestRasterizer::new();
    let (dir, result) = run(&specs, &options, rasterizer.clone()).await;
    let report = result.unwrap();

    assert_eq!(report.output_pages, 2);
    assert_eq!(report.blank_pages(), 1);
    assert_eq!(report.skipped[0].page_index, 1);
    assert_eq!(report.skipped[0].cell_index, 1);

    // Blank pages are never rendered; the rest are rendered in order
    assert_eq!(rasterizer.rendered(), vec![0, 2, 3, 4]);

    let output = Document::load(dir.path().join("output.pdf")).unwrap();
    let drawn = xobject_names(&output);
    assert_eq!(drawn[0], names(&["Im0", "Im2", "Im3"]));
    assert_eq!(drawn[1], names(&["Im0"]));
}

#[tokio::test]
async fn test_all_blank_pages_still_produce_pages() {
    let specs = vec![PageSpec::Blank; 5];
    let options = NupOptions::with_mini_pages(4);
    let (dir, result) = run(&specs, &options, TestRasterizer::new()).await;
    let report = result.unwrap();

    assert_eq!(report.output_pages, 2);
    assert_eq!(report.placed_pages, 0);
    assert_eq!(report.blank_pages(), 5);

    let output = Document::load(dir.path().join("output.pdf")).unwrap();
    assert_eq!(output.get_pages().len(), 2);
}

#[tokio::test]
async fn test_empty_document_is_rejected() {
    let options = NupOptions::with_mini_pages(4);
    let (dir, result) = run(&[], &options, TestRasterizer::new()).await;

    assert!(matches!(result, Err(NupError::NoPages)));
    assert!(!dir.path().join("output.pdf").exists());
}

#[tokio::test]
async fn test_unsupported_grid_is_a_config_error() {
    for mini_pages in [0, 2, 5, 8] {
        let options = NupOptions::with_mini_pages(mini_pages);
        let rasterizer = TestRasterizer::new();
        let (dir, result) = run(&text_pages(4), &options, rasterizer.clone()).await;

        match result {
            Err(NupError::Config(msg)) => assert!(msg.contains("Supported values are 4 and 6")),
            other => panic!("Expected Config error, got {:?}", other),
        }
        assert!(rasterizer.rendered().is_empty());
        assert!(!dir.path().join("output.pdf").exists());
    }
}

#[tokio::test]
async fn test_unreadable_input_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.pdf");
    std::fs::write(&input, b"this is not a pdf").unwrap();
    let output = dir.path().join("output.pdf");

    let result = combine_with(
        &input,
        &output,
        &NupOptions::default(),
        TestRasterizer::new(),
        Arc::new(NullSink),
    )
    .await;

    assert!(matches!(result, Err(NupError::Load(_))));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_missing_input_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = combine_with(
        dir.path().join("missing.pdf"),
        dir.path().join("output.pdf"),
        &NupOptions::default(),
        TestRasterizer::new(),
        Arc::new(NullSink),
    )
    .await;

    assert!(matches!(result, Err(NupError::Load(_))));
}

#[tokio::test]
async fn test_unwritable_output_is_a_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.pdf");
    write_test_pdf(&input, &text_pages(2));
    let output = dir.path().join("no-such-dir").join("output.pdf");

    let result = combine_with(
        &input,
        &output,
        &NupOptions::default(),
        TestRasterizer::new(),
        Arc::new(NullSink),
    )
    .await;

    assert!(matches!(result, Err(NupError::Write(_))));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_output_pages_use_configured_paper() {
    let mut options = NupOptions::with_mini_pages(4);
    let (dir, result) = run(&text_pages(5), &options, TestRasterizer::new()).await;
    result.unwrap();
    let output = Document::load(dir.path().join("output.pdf")).unwrap();
    for (w, h) in page_sizes(&output) {
        assert!((w - A4_DIMENSIONS_PT.0).abs() < 0.01);
        assert!((h - A4_DIMENSIONS_PT.1).abs() < 0.01);
    }

    options.paper_size = PaperSize::Letter;
    let (dir, result) = run(&text_pages(5), &options, TestRasterizer::new()).await;
    result.unwrap();
    let output = Document::load(dir.path().join("output.pdf")).unwrap();
    assert_eq!(page_sizes(&output), vec![LETTER_DIMENSIONS_PT; 2]);
}

#[tokio::test]
async fn test_temp_dir_staging_matches_memory_staging() {
    let specs = text_pages(9);
    let mut options = NupOptions::with_mini_pages(4);

    let (_memory_dir, memory) = run(&specs, &options, TestRasterizer::new()).await;
    options.staging = Staging::TempDir;
    let (temp_dir, staged) = run(&specs, &options, TestRasterizer::new()).await;

    assert_eq!(memory.unwrap(), staged.unwrap());

    let output = Document::load(temp_dir.path().join("output.pdf")).unwrap();
    assert_eq!(output.get_pages().len(), 3);
    assert_eq!(
        xobject_names(&output)[2],
        names(&["Im0"]),
        "last group holds only page 9"
    );
}

#[tokio::test]
async fn test_existing_output_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.pdf");
    write_test_pdf(&input, &text_pages(7));
    let output = dir.path().join("output.pdf");
    std::fs::write(&output, b"stale").unwrap();

    combine_with(
        &input,
        &output,
        &NupOptions::with_mini_pages(6),
        TestRasterizer::new(),
        Arc::new(NullSink),
    )
    .await
    .unwrap();

    let doc = Document::load(&output).unwrap();
    assert_eq!(doc.get_pages().len(), 2);

    // Only the input and the output remain; no temporary files are left behind
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[tokio::test]
async fn test_diagnostics_reach_the_sink() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.pdf");
    write_test_pdf(
        &input,
        &[
            PageSpec::Text("a".into()),
            PageSpec::Blank,
            PageSpec::Text("c".into()),
        ],
    );
    let output = dir.path().join("output.pdf");
    let sink = Arc::new(MemorySink::new(100));

    combine_with(
        &input,
        &output,
        &NupOptions::with_mini_pages(4),
        TestRasterizer::failing_on(&[2]),
        sink.clone(),
    )
    .await
    .unwrap();

    let debug = sink.messages_at(log::Level::Debug);
    assert!(debug.iter().any(|m| m == "Processed page 1 (group 0, cell 0)"));
    assert!(debug.iter().any(|m| m == "Skipping blank page: 2"));

    let errors = sink.messages_at(log::Level::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("page 3: rasterization failed"));

    let info = sink.messages_at(log::Level::Info);
    assert!(info.iter().any(|m| m.starts_with("PDF successfully created")));
}
