//! Defines the [`Post`] and [`FormattedPost`] types, the logic for loading
//! posts from a YAML posts file, and the conversion of formatted posts into
//! template values (see [`FormattedPost::to_value`]).

use std::{
    collections::HashMap,
    fmt,
    fs::File,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use gtmpl::Value;
use serde::Deserialize;

use crate::markdown;

/// A blog post record. The text fields are carried through untouched; the
/// timestamps are RFC 3339 strings which are only parsed when the post is
/// formatted (see [`crate::timeago::format`]).
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Post {
    /// The post's unique identifier.
    pub id: String,

    /// The title of the post.
    pub title: String,

    /// The Markdown body of the post.
    #[serde(default)]
    pub content: String,

    /// The URL-friendly name of the post. Derived from the title when the
    /// posts file leaves it out.
    #[serde(default)]
    pub slug: String,

    /// A short Markdown summary shown on the post's card.
    #[serde(default)]
    pub description: String,

    /// When the post was created, e.g. `2021-08-28T03:54:50.580Z`.
    pub created_at: String,

    /// When the post was last updated. Elapsed time is measured from here.
    pub updated_at: String,
}

/// A [`Post`] together with its elapsed-time label. Built fresh by
/// [`crate::timeago::format`] on every call.
#[derive(Clone, Debug, PartialEq)]
pub struct FormattedPost {
    pub post: Post,

    /// The parsed `updated_at` instant, kept around for ordering.
    pub updated: DateTime<Utc>,

    /// Human-readable elapsed time since `updated_at`, e.g. `2 days ago`.
    pub time_ago: String,
}

impl FormattedPost {
    /// Converts the post into a [`Value::Object`] for templating. The title
    /// is HTML-escaped and the description is rendered from Markdown to
    /// HTML; the remaining fields are passed through as strings.
    pub fn to_value(&self) -> Value {
        let p = &self.post;
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("id".to_owned(), Value::String(p.id.clone()));
        m.insert(
            "title".to_owned(),
            Value::String(markdown::escape(&p.title)),
        );
        m.insert("slug".to_owned(), Value::String(p.slug.clone()));
        m.insert(
            "description".to_owned(),
            Value::String(markdown::to_html(&p.description)),
        );
        m.insert("created_at".to_owned(), Value::String(p.created_at.clone()));
        m.insert("updated_at".to_owned(), Value::String(p.updated_at.clone()));
        m.insert("time_ago".to_owned(), Value::String(self.time_ago.clone()));
        Value::Object(m)
    }
}

/// Loads the list of posts from a YAML file. Posts are returned in file
/// order; any post without a slug gets one derived from its title.
///
/// ```yaml
/// - id: "1"
///   title: Hello, world!
///   description: A `greeting`.
///   created_at: 2021-08-28T03:50:38.786Z
///   updated_at: 2021-08-28T03:50:41.515Z
/// ```
pub fn load_posts(path: &Path) -> Result<Vec<Post>> {
    let file = File::open(path).map_err(|err| Error::Open {
        path: path.to_owned(),
        err,
    })?;
    let mut posts: Vec<Post> =
        serde_yaml::from_reader(file).map_err(|err| Error::DeserializeYaml {
            path: path.to_owned(),
            err,
        })?;
    for post in posts.iter_mut() {
        if post.slug.is_empty() {
            post.slug = slug::slugify(&post.title);
        }
    }
    Ok(posts)
}

/// Represents the result of loading posts.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading posts.
#[derive(Debug)]
pub enum Error {
    /// Returned when the posts file can't be opened.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned when the posts file isn't a valid YAML list of posts.
    DeserializeYaml {
        path: PathBuf,
        err: serde_yaml::Error,
    },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open { path, err } => {
                write!(f, "Opening posts file '{}': {}", path.display(), err)
            }
            Error::DeserializeYaml { path, err } => {
                write!(f, "Parsing posts file '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { path: _, err } => Some(err),
            Error::DeserializeYaml { path: _, err } => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_load_posts() -> Result<()> {
        let posts = load_posts(Path::new("./testdata/posts.yaml"))?;
        assert_eq!(4, posts.len());

        let first = &posts[0];
        assert_eq!("3", first.id);
        assert_eq!("What is functional form of setState", first.title);
        assert_eq!("what-is-functional-form-of-setstate", first.slug);
        assert_eq!("2021-08-28T03:54:50.580Z", first.created_at);
        assert_eq!("2021-08-28T03:54:52.344Z", first.updated_at);
        Ok(())
    }

    #[test]
    fn test_load_posts_derives_missing_slug() -> Result<()> {
        let posts = load_posts(Path::new("./testdata/posts.yaml"))?;
        let untitled = posts.iter().find(|p| p.id == "4").unwrap();
        assert_eq!("a-post-with-a-broken-date", untitled.slug);
        Ok(())
    }

    #[test]
    fn test_load_posts_missing_file() {
        match load_posts(Path::new("./testdata/does-not-exist.yaml")) {
            Err(Error::Open { path, .. }) => {
                assert!(path.ends_with("does-not-exist.yaml"))
            }
            other => panic!("wanted Error::Open, got {:?}", other),
        }
    }

    #[test]
    fn test_to_value() {
        let formatted = FormattedPost {
            post: Post {
                id: "1".to_owned(),
                title: "Tags & <b>".to_owned(),
                content: String::new(),
                slug: "tags".to_owned(),
                description: "Uses `setState`".to_owned(),
                created_at: "2021-08-28T03:50:38.786Z".to_owned(),
                updated_at: "2021-08-28T03:50:41.515Z".to_owned(),
            },
            updated: DateTime::parse_from_rfc3339("2021-08-28T03:50:41.515Z")
                .unwrap()
                .with_timezone(&Utc),
            time_ago: "2 days ago".to_owned(),
        };

        let value = formatted.to_value();
        let obj = match &value {
            Value::Object(obj) => obj,
            _ => panic!("wanted an object"),
        };
        let field = |name: &str| match obj.get(name) {
            Some(Value::String(s)) => s.clone(),
            other => panic!("field {}: wanted a string, got {:?}", name, other),
        };
        assert_eq!("Tags &amp; &lt;b&gt;", field("title"));
        assert!(field("description").contains("<code>setState</code>"));
        assert_eq!("2 days ago", field("time_ago"));
        assert_eq!("tags", field("slug"));
    }
}
