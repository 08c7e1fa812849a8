//! Holding finished groups until the merge
//!
//! Groups are kept either in memory or as one file per group in a private
//! temporary directory. The directory and its files are removed when the
//! stage is dropped, whether or not the merge ever happens.

use crate::constants::STAGED_GROUP_PREFIX;
use crate::types::*;
use lopdf::Document;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub(crate) enum GroupStage {
    Memory(Vec<Document>),
    TempDir { dir: TempDir, files: Vec<PathBuf> },
}

impl GroupStage {
    /// Create a stage; `TempDir` staging uses the system temporary directory
    pub(crate) fn new(staging: Staging) -> Result<Self> {
        match staging {
            Staging::Memory => Ok(GroupStage::Memory(Vec::new())),
            Staging::TempDir => {
                Self::temp_dir(tempfile::Builder::new().prefix("pdf-nup-").tempdir()?)
            }
        }
    }

    /// Create a `TempDir` stage under `parent`
    #[cfg(test)]
    pub(crate) fn in_dir(parent: &Path) -> Result<Self> {
        Self::temp_dir(
            tempfile::Builder::new()
                .prefix("pdf-nup-")
                .tempdir_in(parent)?,
        )
    }

    fn temp_dir(dir: TempDir) -> Result<Self> {
        Ok(GroupStage::TempDir {
            dir,
            files: Vec::new(),
        })
    }

    /// Stage the document for `group_index`. Groups must arrive in order.
    pub(crate) fn push(&mut self, group_index: usize, mut document: Document) -> Result<()> {
        match self {
            GroupStage::Memory(documents) => documents.push(document),
            GroupStage::TempDir { dir, files } => {
                let path = staged_file_name(dir.path(), group_index);
                document
                    .save(&path)
                    .map_err(|e| NupError::Write(format!("{}: {}", path.display(), e)))?;
                files.push(path);
            }
        }
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            GroupStage::Memory(documents) => documents.len(),
            GroupStage::TempDir { files, .. } => files.len(),
        }
    }

    /// Take the staged groups back in staging order and release the stage
    pub(crate) fn into_documents(self) -> Result<Vec<Document>> {
        match self {
            GroupStage::Memory(documents) => Ok(documents),
            GroupStage::TempDir { dir, files } => {
                let documents = files
                    .iter()
                    .map(|path| {
                        Document::load(path)
                            .map_err(|e| NupError::Write(format!("{}: {}", path.display(), e)))
                    })
                    .collect::<Result<Vec<_>>>()?;
                dir.close()?;
                Ok(documents)
            }
        }
    }
}

/// Group files are keyed by group index so names never collide
fn staged_file_name(dir: &Path, group_index: usize) -> PathBuf {
    dir.join(format!("{}{:05}.pdf", STAGED_GROUP_PREFIX, group_index))
}
