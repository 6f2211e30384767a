use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use quire::{Config, IndexMatch, PagesConfig, TreeConfig};

#[derive(Parser, Debug)]
#[clap(name = "quire", about, version)]
struct Args {
    /// Increase output logging verbosity.
    #[clap(short, long)]
    verbose: bool,

    /// Configuration file (JSON or YAML). Without this flag, `quire.json` is
    /// used if it exists.
    #[clap(short, long)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mirror a directory, rendering HTML files through a shared template.
    Tree {
        /// The shared template.
        #[clap(long)]
        template: Option<PathBuf>,
        /// Source directory.
        #[clap(long)]
        src: Option<PathBuf>,
        /// Destination directory.
        #[clap(long)]
        dest: Option<PathBuf>,
        /// Title given to index pages.
        #[clap(long)]
        index_title: Option<String>,
        /// How index pages are recognized: "exact" or "substring".
        #[clap(long)]
        index_match: Option<IndexMatch>,
        /// Fail on template variables that aren't supplied.
        #[clap(long)]
        strict: bool,
        /// Render missing template variables as empty, even if the
        /// configuration file enables strict mode.
        #[clap(long, conflicts_with = "strict")]
        no_strict: bool,
    },
    /// Build pages listed in a page definitions file.
    Pages {
        /// Directory containing page templates and the layout.
        #[clap(long)]
        templates: Option<PathBuf>,
        /// Directory containing page and site data.
        #[clap(long)]
        data: Option<PathBuf>,
        /// Page definitions file.
        #[clap(long)]
        pages: Option<PathBuf>,
        /// Output directory.
        #[clap(long)]
        dist: Option<PathBuf>,
        /// Fail on template variables that aren't supplied.
        #[clap(long)]
        strict: bool,
        /// Render missing template variables as empty, even if the
        /// configuration file enables strict mode.
        #[clap(long, conflicts_with = "strict")]
        no_strict: bool,
    },
}

const DEFAULT_CONFIG_FILE: &str = "quire.json";

fn main() {
    let args = Args::parse();
    simple_logger::init_with_level(if args.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    })
    .unwrap();

    let start = Instant::now();
    match run(args) {
        Ok(summary) => log::info!(
            "Success! {} in {:.2?}",
            summary,
            start.elapsed()
        ),
        Err(e) => {
            log::error!("Failed: {:?}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> eyre::Result<String> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(DEFAULT_CONFIG_FILE)?,
    };
    match args.command {
        Command::Tree {
            template,
            src,
            dest,
            index_title,
            index_match,
            strict,
            no_strict,
        } => {
            let defaults = config.tree;
            let tree = TreeConfig {
                template: template.unwrap_or(defaults.template),
                src: src.unwrap_or(defaults.src),
                dest: dest.unwrap_or(defaults.dest),
                index_title: index_title.unwrap_or(defaults.index_title),
                index_match: index_match.unwrap_or(defaults.index_match),
                strict: strict_mode(strict, no_strict, defaults.strict),
            };
            let summary = quire::build_tree(&tree)?;
            Ok(format!("{} into {}", summary, tree.dest.display()))
        }
        Command::Pages {
            templates,
            data,
            pages,
            dist,
            strict,
            no_strict,
        } => {
            let defaults = config.pages;
            let pages = PagesConfig {
                templates: templates.unwrap_or(defaults.templates),
                data: data.unwrap_or(defaults.data),
                pages: pages.unwrap_or(defaults.pages),
                dist: dist.unwrap_or(defaults.dist),
                strict: strict_mode(strict, no_strict, defaults.strict),
                ..defaults
            };
            let count = quire::build_pages(&pages)?;
            Ok(format!("{} pages built into {}", count, pages.dist.display()))
        }
    }
}

fn strict_mode(strict: bool, no_strict: bool, configured: bool) -> bool {
    if strict {
        true
    } else if no_strict {
        false
    } else {
        configured
    }
}
