//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the site: loading the posts ([`crate::post`]), scanning
//! the content directory for titles ([`crate::content`]), formatting post
//! times ([`crate::timeago`]), and rendering the index page
//! ([`crate::write`]).

use crate::clock::Clock;
use crate::config::Config;
use crate::content::{self, Error as ContentError};
use crate::post::{self, Error as PostError, FormattedPost};
use crate::timeago;
use crate::write::{Error as WriteError, Writer};
use gtmpl::Template;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// What a build produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    /// The index page that was written.
    pub index_file: PathBuf,

    /// The number of posts on the index page.
    pub posts: usize,

    /// The number of posts left out because their timestamps didn't parse.
    pub omitted: usize,

    /// The number of content files scanned for titles.
    pub documents: usize,
}

/// Builds the site from a [`Config`] object. The current time is read from
/// `clock` exactly once so every post is measured against the same instant.
pub fn build_site(config: &Config, clock: &dyn Clock) -> Result<Summary> {
    let posts = post::load_posts(&config.posts_file)?;

    let documents = if config.content_directory.is_dir() {
        content::scan(&config.content_directory)?.len()
    } else {
        tracing::debug!(
            dir = %config.content_directory.display(),
            "no content directory; skipping title scan"
        );
        0
    };

    let now = clock.now();
    let mut formatted: Vec<FormattedPost> = Vec::with_capacity(posts.len());
    for post in &posts {
        match timeago::format(post, now) {
            Ok(p) => formatted.push(p),
            Err(err) => tracing::warn!(id = %post.id, "omitting post: {}", err),
        }
    }
    formatted.sort_by(|a, b| b.updated.cmp(&a.updated));

    let index_template = parse_template(config.index_template.iter())?;

    let writer = Writer {
        index_template: &index_template,
        site: &config.site,
    };
    let index_file = writer.write_index(&formatted, &config.output_directory)?;
    tracing::info!(
        path = %index_file.display(),
        posts = formatted.len(),
        "wrote index page"
    );

    Ok(Summary {
        index_file,
        posts: formatted.len(),
        omitted: posts.len() - formatted.len(),
        documents,
    })
}

// Loads the template file contents, concatenates them, and parses the result
// into a template.
fn parse_template<P: AsRef<Path>>(
    template_files: impl Iterator<Item = P>,
) -> Result<Template> {
    let mut contents = String::new();
    for template_file in template_files {
        use std::io::Read;
        let template_file = template_file.as_ref();
        File::open(&template_file)
            .map_err(|e| Error::OpenTemplateFile {
                path: template_file.to_owned(),
                err: e,
            })?
            .read_to_string(&mut contents)?;
        contents.push(' ');
    }

    let mut template = Template::default();
    template
        .parse(&contents)
        .map_err(|e| Error::ParseTemplate(e.to_string()))?;
    Ok(template)
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during post loading,
/// content scanning, writing, parsing template files, and other I/O.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors loading posts.
    Posts(PostError),

    /// Returned for errors scanning the content directory.
    Content(ContentError),

    /// Returned for errors writing the index page.
    Write(WriteError),

    /// Returned for I/O problems while opening template files.
    OpenTemplateFile { path: PathBuf, err: std::io::Error },

    /// Returned for errors parsing template files.
    ParseTemplate(String),

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Posts(err) => fmt::Display::fmt(err, f),
            Error::Content(err) => fmt::Display::fmt(err, f),
            Error::Write(err) => fmt::Display::fmt(err, f),
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate(err) => write!(f, "Parsing template: {}", err),
            Error::Io(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Posts(err) => Some(err),
            Error::Content(err) => Some(err),
            Error::Write(err) => Some(err),
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::ParseTemplate(_) => None,
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<PostError> for Error {
    /// Converts [`PostError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: PostError) -> Error {
        Error::Posts(err)
    }
}

impl From<ContentError> for Error {
    /// Converts [`ContentError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: ContentError) -> Error {
        Error::Content(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}
