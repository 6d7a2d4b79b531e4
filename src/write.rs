use crate::config::Site;
use crate::markdown;
use crate::post::FormattedPost;
use gtmpl::{Template, Value};
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// The name of the page written by [`Writer::write_index`].
pub const INDEX_FILE: &str = "index.html";

/// Responsible for templating the index page and writing it to disk.
pub struct Writer<'a> {
    /// The template for the index page.
    pub index_template: &'a Template,

    /// Metadata for the page head. Made available to the template as `site`.
    pub site: &'a Site,
}

impl Writer<'_> {
    /// Applies the index template to `posts` (in the order given) and writes
    /// the result to `w`. The template sees an object with fields `site` (the
    /// page metadata from [`Site`]) and `posts` (see
    /// [`FormattedPost::to_value`]).
    pub fn render<W: Write>(&self, posts: &[FormattedPost], w: &mut W) -> Result<()> {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("site".to_owned(), site_value(self.site));
        m.insert(
            "posts".to_owned(),
            Value::Array(posts.iter().map(FormattedPost::to_value).collect()),
        );

        let context = gtmpl::Context::from(Value::Object(m))
            .map_err(|e| Error::Template(e.to_string()))?;
        self.index_template
            .execute(w, &context)
            .map_err(|e| Error::Template(e.to_string()))?;
        Ok(())
    }

    /// Renders the index page into `{output_directory}/index.html`, creating
    /// the directory if needed, and returns the path of the written file. The
    /// page is rendered in memory first, so a template error leaves any
    /// existing page untouched.
    pub fn write_index(&self, posts: &[FormattedPost], output_directory: &Path) -> Result<PathBuf> {
        let mut page: Vec<u8> = Vec::new();
        self.render(posts, &mut page)?;

        std::fs::create_dir_all(output_directory)?;
        let file_path = output_directory.join(INDEX_FILE);
        std::fs::write(&file_path, page)?;
        Ok(file_path)
    }
}

/// Converts [`Site`] into a [`Value::Object`] with fields `title`,
/// `description`, `url`, `image`, and `twitter_creator`. Missing optional
/// fields become [`Value::Nil`].
fn site_value(site: &Site) -> Value {
    let option_to_value = |opt: Option<String>| match opt {
        Some(s) => Value::String(s),
        None => Value::Nil,
    };

    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert("title".to_owned(), Value::String(markdown::escape(&site.title)));
    m.insert(
        "description".to_owned(),
        Value::String(markdown::escape(&site.description)),
    );
    m.insert("url".to_owned(), Value::String(site.url.to_string()));
    m.insert(
        "image".to_owned(),
        option_to_value(site.image.as_ref().map(|url| url.to_string())),
    );
    m.insert(
        "twitter_creator".to_owned(),
        option_to_value(site.twitter_creator.as_deref().map(markdown::escape)),
    );
    Value::Object(m)
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// An error during templating.
    Template(String),

    /// An error writing the output file.
    Io(io::Error),
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use the
    /// `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => write!(f, "Rendering index page: {}", err),
            Error::Io(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(_) => None,
            Error::Io(err) => Some(err),
        }
    }
}
