use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::persist::PersistError;
use crate::xml_tree::XmlTreeError;

/// Failures that abort a whole import run. Per-record oddities never end up
/// here; they are logged and the run continues.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    OutputDir(PersistError),
    #[error("could not read input file {path:?}: {source}")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse XML in {path:?}: {source}")]
    InputMalformed {
        path: PathBuf,
        #[source]
        source: XmlTreeError,
    },
    #[error("no <channel> element found under <rss>{}", snapshot_note(.snapshot))]
    MissingChannel { snapshot: Option<PathBuf> },
    #[error("no items found in channel{}", snapshot_note(.snapshot))]
    NoItems { snapshot: Option<PathBuf> },
    #[error(transparent)]
    Persist(#[from] PersistError),
}

impl ImportError {
    /// Where the parsed document was dumped, if this failure produced a snapshot.
    pub fn snapshot(&self) -> Option<&PathBuf> {
        match self {
            ImportError::MissingChannel { snapshot } | ImportError::NoItems { snapshot } => {
                snapshot.as_ref()
            }
            _ => None,
        }
    }
}

fn snapshot_note(snapshot: &Option<PathBuf>) -> String {
    match snapshot {
        Some(path) => format!("; parsed structure written to {path:?}"),
        None => String::new(),
    }
}
