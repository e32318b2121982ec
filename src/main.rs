use clap::{Parser, Subcommand};
use polypage::{config, generate, output, scan};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "polypage")]
#[command(about = "Static multi-language HTML page generator")]
#[command(long_about = "\
Static multi-language HTML page generator

One base layout, one HTML fragment per page, and one dictionary per language
produce one HTML file per page and language.

Project structure:

  site/
  ├── config.toml                  # Languages, paths, build settings (optional)
  ├── templates/
  │   ├── base.html                # Layout with a single {Content} marker
  │   ├── index.html               # Page \"index\"
  │   └── about.html               # Page \"about\"
  ├── dictionaries/
  │   ├── en.json                  # {\"greeting\": \"Hello\", ...}
  │   └── es.json
  └── assets/                      # Copied to the output root (optional)

Template syntax:
  {Content}          Where the page fragment goes (base template)
  {.name}            The page name
  {key}              The dictionary value for key (missing key = error)
  {If\"page\"BODY}     BODY only on the page named page

Output: dist/<lang>/<page>.html, plus dist/<page>.html for the default language.

Run 'polypage gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Project directory (holds config.toml)
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log diagnostics to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every page in every language without writing anything
    Check,
    /// Render every page in every language and write the output tree
    Build {
        /// Write the pages that render and report every failure
        #[arg(long)]
        keep_going: bool,
    },
    /// Render a single page to stdout
    Render {
        /// Page name (fragment filename without extension)
        page: String,
        /// Language code (defaults to the default language)
        #[arg(long)]
        lang: Option<String>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest);
            init_thread_pool(&manifest.config.build);

            let report = generate::check(&manifest);
            println!();
            output::print_check_output(&report);
            if !report.is_success() {
                return Err(format!("{} page(s) failed to render", report.failures.len()).into());
            }
            println!("==> All pages render");
        }
        Command::Build { keep_going } => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let mut manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest);
            manifest.config.build.keep_going |= keep_going;

            println!("==> Stage 2: Rendering \u{2192} {}", cli.output.display());
            init_thread_pool(&manifest.config.build);
            let report = generate::generate(&manifest, &cli.output)?;
            output::print_build_output(&manifest, &report);
            if !report.is_success() {
                return Err(format!("{} page(s) failed to render", report.failures.len()).into());
            }
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Render { page, lang } => {
            let manifest = scan::scan(&cli.source)?;
            let html = generate::render_one(&manifest, &page, lang.as_deref())?;
            print!("{}", html);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. Warnings only unless `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "polypage=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on build config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(build: &config::BuildConfig) {
    let threads = config::effective_threads(build);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
