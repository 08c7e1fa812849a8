//! N-up combining - fitting several source pages onto each output page
//!
//! This module orchestrates the combine process:
//! 1. Validate options and load the source document
//! 2. Split the source pages into groups of `mini_pages_per_page`
//! 3. Compose one output page per group and stage it
//! 4. Merge the staged pages in group order and write the result

mod io;
mod staging;

pub use io::{load_pdf, save_pdf};

use crate::compose::compose_group;
use crate::diagnostics::DiagnosticSink;
use crate::layout::LayoutConfig;
use crate::options::NupOptions;
use crate::raster::PageRasterizer;
use crate::render::merge_documents;
use crate::source::SourceDocument;
use crate::types::*;
use io::{read_input, write_pdf};
use log::Level;
use lopdf::Document;
use staging::GroupStage;
use std::path::Path;
use std::sync::Arc;

/// Combine `input` into an n-up PDF at `output`, rendering with Pdfium.
///
/// Diagnostics go to the `log` facade.
#[cfg(all(feature = "pdfium", not(target_arch = "wasm32")))]
pub async fn combine(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &NupOptions,
) -> Result<CombineReport> {
    let library_dir = options.pdfium_library_dir.clone();
    let scale = options.render_scale;

    run_combine(
        input.as_ref(),
        output.as_ref(),
        options,
        Arc::new(crate::diagnostics::LogSink),
        move |source, config, staging, sink| {
            let backend = crate::raster::PdfiumBackend::new(library_dir.as_deref(), scale)?;
            let rasterizer = backend.open(source)?;
            assemble_document(source, config, staging, &rasterizer, sink)
        },
    )
    .await
}

/// Combine `input` into an n-up PDF at `output` with the given rasterizer and sink
pub async fn combine_with<R>(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &NupOptions,
    rasterizer: R,
    sink: Arc<dyn DiagnosticSink>,
) -> Result<CombineReport>
where
    R: PageRasterizer + Send + 'static,
{
    run_combine(
        input.as_ref(),
        output.as_ref(),
        options,
        sink,
        move |source, config, staging, sink| {
            assemble_document(source, config, staging, &rasterizer, sink)
        },
    )
    .await
}

/// Shared driver; `assemble` runs on the blocking thread, so a rasterizer
/// built inside it never has to cross threads.
async fn run_combine<F>(
    input: &Path,
    output: &Path,
    options: &NupOptions,
    sink: Arc<dyn DiagnosticSink>,
    assemble: F,
) -> Result<CombineReport>
where
    F: FnOnce(
            &SourceDocument,
            &LayoutConfig,
            Staging,
            &dyn DiagnosticSink,
        ) -> Result<(Document, CombineReport)>
        + Send
        + 'static,
{
    let config = LayoutConfig::from_options(options)?;
    let staging = options.staging;
    let bytes = read_input(input).await?;
    let output = output.to_owned();

    sink.record(
        Level::Info,
        &format!(
            "Combining {} ({}-up) into {}",
            input.display(),
            config.mini_pages_per_page,
            output.display()
        ),
    );

    tokio::task::spawn_blocking(move || {
        let source = SourceDocument::from_bytes(bytes)?;
        if source.page_count() == 0 {
            return Err(NupError::NoPages);
        }

        let (document, report) = assemble(&source, &config, staging, &*sink)?;

        write_pdf(document, &output)?;
        sink.record(
            Level::Info,
            &format!(
                "PDF successfully created: {} ({} pages from {})",
                output.display(),
                report.output_pages,
                report.source_pages
            ),
        );
        Ok(report)
    })
    .await?
}

/// Build the combined document for `source` without touching the file system
/// beyond `TempDir` staging.
///
/// Returns the merged document and a report of what was placed and skipped.
pub fn assemble_document(
    source: &SourceDocument,
    config: &LayoutConfig,
    staging: Staging,
    rasterizer: &dyn PageRasterizer,
    sink: &dyn DiagnosticSink,
) -> Result<(Document, CombineReport)> {
    let total_pages = source.page_count();
    if total_pages == 0 {
        return Err(NupError::NoPages);
    }

    let num_groups = config.group_count(total_pages);
    let mut report = CombineReport {
        source_pages: total_pages,
        ..Default::default()
    };

    // Dropping the stage on an early return removes anything staged on disk
    let mut stage = GroupStage::new(staging)?;
    for group_index in 0..num_groups {
        let group = compose_group(source, group_index, config, rasterizer, sink);
        report.placed_pages += group.placed.len();
        report.skipped.extend(group.skipped);
        stage.push(group.group_index, group.document)?;
    }

    sink.record(
        Level::Debug,
        &format!("Merging {} staged groups", stage.len()),
    );

    let mut merged = merge_documents(stage.into_documents()?);
    merged.compress();
    report.output_pages = merged.get_pages().len();

    Ok((merged, report))
}
