mod logging;
mod print;

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use bookconnect_application::{ANY, Browser, Query, ThemeResolver};
use bookconnect_core::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Settings, ThemePreference};
use bookconnect_storage::{load_catalog, load_settings};
use bookconnect_ui::Ui;
use clap::Parser;
use directories::ProjectDirs;
use tracing::info;

use crate::print::PlainSink;

/// Browse a book catalog in the terminal.
#[derive(Debug, Parser)]
#[command(name = "bookconnect", version, about)]
struct Args {
    /// Catalog JSON file
    catalog: Option<PathBuf>,

    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Books per page
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=MAX_PAGE_SIZE as u64))]
    page_size: Option<u64>,

    /// Colour theme: auto, day or night
    #[arg(long)]
    theme: Option<ThemePreference>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the first page and exit
    #[arg(long)]
    print: bool,

    /// Title filter for --print
    #[arg(long, requires = "print")]
    title: Option<String>,

    /// Author id filter for --print
    #[arg(long, requires = "print")]
    author: Option<String>,

    /// Genre id filter for --print
    #[arg(long, requires = "print")]
    genre: Option<String>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let project_dirs = ProjectDirs::from("dev", "bookconnect", "bookconnect")
        .context("resolve project dirs")?;

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| project_dirs.data_dir().join("bookconnect.log"));
    logging::init(&log_path)?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| project_dirs.config_dir().join("config.toml"));
    let settings = load_settings(&config_path)?.unwrap_or_default();

    let catalog_path = resolve_catalog_path(&args, &settings, project_dirs.config_dir());
    let source = load_catalog(&catalog_path)?;
    let page_size = resolve_page_size(
        args.page_size.map(|n| n as usize),
        source.page_size,
        settings.page_size,
    );
    let theme = args.theme.unwrap_or(settings.theme);
    info!(
        catalog = %catalog_path.display(),
        page_size = page_size.get(),
        %theme,
        "starting"
    );

    let browser = Browser::new(
        source.catalog,
        page_size,
        ThemeResolver::from_preference(theme),
    );

    if args.print {
        print!("{}", print_first_page(browser, &args));
        return Ok(());
    }

    Ui::new(browser).run()
}

fn resolve_catalog_path(args: &Args, settings: &Settings, config_dir: &Path) -> PathBuf {
    args.catalog
        .clone()
        .or_else(|| settings.catalog_path.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| config_dir.join("catalog.json"))
}

/// CLI flag, then the catalog's `booksPerPage`, then the settings file, then the default.
fn resolve_page_size(
    cli: Option<usize>,
    catalog: Option<NonZeroUsize>,
    settings: Option<usize>,
) -> NonZeroUsize {
    cli.and_then(NonZeroUsize::new)
        .or(catalog)
        .or_else(|| settings.and_then(NonZeroUsize::new))
        .unwrap_or(NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN))
}

fn print_first_page(mut browser: Browser, args: &Args) -> String {
    let mut sink = PlainSink::default();
    browser.start(&mut sink);

    if args.title.is_some() || args.author.is_some() || args.genre.is_some() {
        let query = Query::new(
            args.title.clone().unwrap_or_default(),
            args.author.as_deref().unwrap_or(ANY),
            args.genre.as_deref().unwrap_or(ANY),
        );
        browser.submit_search(query, &mut sink);
    }

    sink.render()
}
