use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use atlas_parser::{ParserError, SourceDocument};

use crate::progress::Progress;

/// Corpus documents read from disk, plus the names that were not there.
#[derive(Debug, Default)]
pub struct Corpus {
    pub documents: Vec<SourceDocument>,
    pub missing: Vec<String>,
}

/// Read `names` from `lore_dir` in order. Absent files are warned about and
/// recorded; any other I/O failure aborts.
pub fn read_corpus<S: AsRef<str>>(lore_dir: &Path, names: &[S]) -> anyhow::Result<Corpus> {
    let progress = Progress::bar(names.len(), "reading corpus");
    let mut corpus = Corpus::default();

    for name in names {
        let name = name.as_ref();
        progress.set_message(name);
        match SourceDocument::read(lore_dir, name) {
            Ok(document) => corpus.documents.push(document),
            Err(ParserError::Io(error)) if error.kind() == ErrorKind::NotFound => {
                tracing::warn!(file = %name, dir = %lore_dir.display(), "source document not found, skipping");
                corpus.missing.push(name.to_string());
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read {}", lore_dir.join(name).display()));
            }
        }
        progress.inc();
    }

    progress.finish_ok(&format!("read {} documents", corpus.documents.len()));
    Ok(corpus)
}
