//! Scans a content directory for documents and extracts their titles (see
//! [`crate::title::extract_title`]). This is where titles get reported; the
//! extraction itself stays silent.

use std::{
    fmt,
    fs,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::title::extract_title;

/// A file found in the content directory.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    /// The path of the file, including the scanned directory.
    pub path: PathBuf,

    /// The file name without its extension.
    pub stem: String,

    /// The document's first level-1 heading, if it has one.
    pub title: Option<String>,
}

impl Document {
    /// Returns the extracted title, falling back to the file stem.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.stem)
    }

    /// Returns a URL-friendly name for the document based on
    /// [`Document::display_title`].
    pub fn slug(&self) -> String {
        slug::slugify(self.display_title())
    }
}

/// Reads every regular file directly inside `dir` (subdirectories aren't
/// descended into) and returns one [`Document`] per file, ordered by file
/// name. Symlinks are followed, so a link to a file counts as a file. Each
/// title is logged along with its slug as it is found.
pub fn scan(dir: &Path) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for result in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
    {
        let entry = result?;
        if !entry.file_type().is_file() {
            continue;
        }

        let document = read_document(entry.path())?;
        match &document.title {
            Some(title) => tracing::info!(
                path = %document.path.display(),
                slug = %document.slug(),
                "{}",
                title
            ),
            None => tracing::warn!(
                path = %document.path.display(),
                "no title found"
            ),
        }
        documents.push(document);
    }
    Ok(documents)
}

fn read_document(path: &Path) -> Result<Document> {
    let bytes = fs::read(path).map_err(|err| Error::Read {
        path: path.to_owned(),
        err,
    })?;
    let contents = String::from_utf8_lossy(&bytes);
    Ok(Document {
        path: path.to_owned(),
        stem: path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        title: extract_title(&contents).map(str::to_owned),
    })
}

/// Represents the result of a content scan.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error scanning the content directory.
#[derive(Debug)]
pub enum Error {
    /// Returned when a content file can't be read.
    Read { path: PathBuf, err: std::io::Error },

    /// Returned when the directory itself can't be walked.
    WalkDir(walkdir::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Read { path, err } => {
                write!(f, "Reading content file '{}': {}", path.display(), err)
            }
            Error::WalkDir(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read { path: _, err } => Some(err),
            Error::WalkDir(err) => Some(err),
        }
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator while walking the content directory.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}
