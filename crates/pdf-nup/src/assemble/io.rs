//! Document I/O for the combine pipeline

use crate::source::SourceDocument;
use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Load the input PDF
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<SourceDocument> {
    let bytes = read_input(path.as_ref()).await?;
    tokio::task::spawn_blocking(move || SourceDocument::from_bytes(bytes)).await?
}

/// Save a document to `path`, replacing any existing file
pub async fn save_pdf(doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    tokio::task::spawn_blocking(move || write_pdf(doc, &path)).await?
}

pub(crate) async fn read_input(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|e| NupError::Load(format!("{}: {}", path.display(), e)))
}

/// Serialize `doc` next to `path` and rename it into place.
///
/// A failure at any point leaves no file at `path` and removes the
/// temporary file.
pub(crate) fn write_pdf(mut doc: Document, path: &Path) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = tempfile::Builder::new()
        .prefix(".pdf-nup-")
        .suffix(".pdf")
        .tempfile_in(parent)
        .map_err(|e| write_error(path, e))?;

    doc.save_to(&mut file).map_err(|e| write_error(path, e))?;
    file.as_file().sync_all().map_err(|e| write_error(path, e))?;
    file.persist(path).map_err(|e| write_error(path, e.error))?;
    Ok(())
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> NupError {
    NupError::Write(format!("{}: {}", path.display(), e))
}
