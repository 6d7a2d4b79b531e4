use anyhow::Result;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use std::path::{Path, PathBuf};
use tempo::build::build_site;
use tempo::clock::SystemClock;
use tempo::config::Config;
use tempo::content;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tempo=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let matches = App::new("tempo")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("build")
                .about("Renders the index page")
                .arg(
                    Arg::with_name("project")
                        .short("p")
                        .long("project")
                        .takes_value(true)
                        .default_value(".")
                        .help("Directory containing tempo.yaml (or a descendant of it)"),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .default_value("_output")
                        .help("Directory the index page is written to"),
                ),
        )
        .subcommand(
            SubCommand::with_name("titles")
                .about("Prints the title of every file in a content directory")
                .arg(
                    Arg::with_name("dir")
                        .index(1)
                        .default_value("content")
                        .help("The content directory"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("build", Some(args)) => build(args),
        ("titles", Some(args)) => titles(args),
        _ => Ok(()),
    }
}

fn build(args: &ArgMatches) -> Result<()> {
    // Canonicalize so the `tempo.yaml` search can climb past `.`.
    let project = Path::new(args.value_of("project").unwrap_or(".")).canonicalize()?;
    let output = PathBuf::from(args.value_of("output").unwrap_or("_output"));
    let config = Config::from_directory(&project, &output)?;
    let summary = build_site(&config, &SystemClock)?;
    if summary.omitted > 0 {
        tracing::warn!(omitted = summary.omitted, "some posts were left off the index");
    }
    Ok(())
}

fn titles(args: &ArgMatches) -> Result<()> {
    let dir = Path::new(args.value_of("dir").unwrap_or("content"));
    for document in content::scan(dir)? {
        println!("{}: {}", document.path.display(), document.display_title());
    }
    Ok(())
}
