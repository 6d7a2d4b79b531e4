//! Loads a [`Config`] from a project directory. A project is a directory
//! holding `tempo.yaml`, the posts file, the `content/` directory, and a
//! `theme/` directory whose `theme.yaml` lists the index template files.

use crate::util::open;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

const PROJECT_FILE: &str = "tempo.yaml";

fn default_posts_file() -> PathBuf {
    PathBuf::from("posts.yaml")
}

fn default_content_directory() -> PathBuf {
    PathBuf::from("content")
}

#[derive(Deserialize)]
struct Project {
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub site_root: Url,

    /// The cover image, relative to `site_root`.
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub twitter_creator: Option<String>,

    #[serde(default = "default_posts_file")]
    pub posts_file: PathBuf,

    #[serde(default = "default_content_directory")]
    pub content_directory: PathBuf,
}

#[derive(Deserialize)]
struct Theme {
    index_template: Vec<PathBuf>,
}

/// Site metadata shown in the page head.
#[derive(Clone, Debug, PartialEq)]
pub struct Site {
    pub title: String,
    pub description: String,
    pub url: Url,
    pub image: Option<Url>,
    pub twitter_creator: Option<String>,
}

/// Everything needed to build the site.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub site: Site,
    pub posts_file: PathBuf,
    pub content_directory: PathBuf,
    pub index_template: Vec<PathBuf>,
    pub output_directory: PathBuf,
}

impl Config {
    /// Searches `dir` and then each of its ancestors for `tempo.yaml` and
    /// loads the first one found.
    pub fn from_directory(dir: &Path, output_directory: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            Config::from_project_file(&path, output_directory)
                .with_context(|| format!("Loading configuration from `{}`", path.display()))
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent, output_directory),
                None => Err(anyhow!(
                    "Could not find `{}` in any parent directory",
                    PROJECT_FILE
                )),
            }
        }
    }

    pub fn from_project_file(path: &Path, output_directory: &Path) -> Result<Config> {
        let project: Project = serde_yaml::from_reader(open(path, "project")?)?;
        let project_root = path.parent().ok_or_else(|| {
            anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )
        })?;

        let theme_dir = project_root.join("theme");
        let theme: Theme =
            serde_yaml::from_reader(open(&theme_dir.join("theme.yaml"), "theme")?)?;
        if theme.index_template.is_empty() {
            return Err(anyhow!("Theme must list at least one `index_template` file"));
        }

        let image = match &project.image {
            Some(image) => Some(
                project
                    .site_root
                    .join(image)
                    .with_context(|| format!("Resolving image URL `{}`", image))?,
            ),
            None => None,
        };

        Ok(Config {
            site: Site {
                title: project.title,
                description: project.description,
                url: project.site_root,
                image,
                twitter_creator: project.twitter_creator,
            },
            posts_file: project_root.join(project.posts_file),
            content_directory: project_root.join(project.content_directory),
            index_template: theme
                .index_template
                .iter()
                .map(|relpath| theme_dir.join(relpath))
                .collect(),
            output_directory: output_directory.to_owned(),
        })
    }
}
