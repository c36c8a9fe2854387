//! postbook - access tagging and book compilation for Markdown blog posts.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use postbook_core::Config;

mod commands;

/// Log levels
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "postbook",
    about = "Tag blog posts with access levels and compile flagged posts into a book",
    version,
    arg_required_else_help = true,
    after_help = "Examples:\n  postbook --update-access premium --pattern 2026/\n  postbook --check-access registered --pattern some-post.md\n  postbook --generate-book\n  postbook --build-book"
)]
struct Cli {
    /// List every post with its access level and published flag
    #[clap(long)]
    list_posts: bool,

    /// Set the access level on posts matching --pattern
    #[clap(long, value_name = "LEVEL")]
    update_access: Option<String>,

    /// Report whether a reader at LEVEL may open posts matching --pattern
    #[clap(long, value_name = "LEVEL")]
    check_access: Option<String>,

    /// Write the flagged chapters to book-chapters.json in the working directory
    #[clap(long)]
    generate_book: bool,

    /// Compile flagged chapters into blog-book.html and book-toc.json
    #[clap(long)]
    build_book: bool,

    /// Report posts whose front matter lacks `published`
    #[clap(long)]
    audit_published: bool,

    /// With --audit-published, write default access fields into those posts
    #[clap(long, requires = "audit_published")]
    fix: bool,

    /// Path substring selecting posts; `*` selects all
    #[clap(long, default_value = "*")]
    pattern: String,

    /// Posts root directory (overrides the config file)
    #[clap(long)]
    posts_dir: Option<PathBuf>,

    /// Book output directory (overrides the config file)
    #[clap(long)]
    output_dir: Option<PathBuf>,

    /// YAML configuration file
    #[clap(long)]
    config: Option<PathBuf>,

    /// Set log level
    #[clap(long, default_value = "info")]
    log_level: LogLevel,
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(posts_dir) = &self.posts_dir {
            config.posts_dir = posts_dir.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        Ok(config)
    }
}

fn init_logging(level: LogLevel) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level.to_filter_directive()),
    )
    .format_timestamp(None)
    .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let config = cli.load_config()?;
    log::debug!("Using posts root {}", config.posts_dir.display());

    let mut out = io::stdout().lock();

    if cli.generate_book {
        let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
        commands::generate_chapter_list(&config, &cwd, &mut out)?;
    }

    if cli.list_posts {
        commands::list_posts(&config, &mut out)?;
    }

    if let Some(level) = &cli.update_access {
        commands::update_access(&config, level, &cli.pattern, &mut out)?;
    }

    if let Some(level) = &cli.check_access {
        commands::check_access(&config, level, &cli.pattern, &mut out)?;
    }

    if cli.audit_published {
        let missing = commands::audit_published(&config, cli.fix, &mut out)?;
        if missing > 0 && !cli.fix {
            anyhow::bail!("{missing} posts are missing `published`; rerun with --fix");
        }
    }

    if cli.build_book {
        commands::build_book(&config, &mut out)?;
    }

    Ok(())
}
