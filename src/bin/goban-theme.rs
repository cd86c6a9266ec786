use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "goban-theme", version)]
struct Cli {
    /// Log engine diagnostics to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a theme document and report which fields were taken.
    Validate(ValidateArgs),
    /// Print the transform bundles a theme produces.
    Matrices(ThemeArgs),
    /// List the built-in themes, or print one of them.
    Stock(StockArgs),
    /// Place a row of stones and print the recorded draw calls.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Theme document.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Fail when the document has unknown or mistyped fields.
    #[arg(long)]
    strict: bool,
}

#[derive(Parser, Debug)]
struct ThemeArgs {
    /// Theme document. Defaults to the default stock theme.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct StockArgs {
    /// Print the document of this theme instead of listing names.
    #[arg(long)]
    name: Option<String>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Theme document. Defaults to the default stock theme.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Directory theme image paths are resolved against. Defaults to the document's directory.
    #[arg(long)]
    assets: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ColorChoice::Black)]
    color: ColorChoice,

    /// Number of stones to place.
    #[arg(long, default_value_t = 3)]
    count: usize,

    /// Stone radius in surface units.
    #[arg(long, default_value_t = 16.0)]
    radius: f64,

    /// Seed for the stone selectors.
    #[arg(long, default_value_t = 1.0)]
    seed: f64,

    /// Device pixels per surface unit.
    #[arg(long, default_value_t = 1.0)]
    device_scale: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorChoice {
    White,
    Black,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Matrices(args) => cmd_matrices(args),
        Command::Stock(args) => cmd_stock(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_theme_text(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) => {
            std::fs::read_to_string(p).with_context(|| format!("read theme '{}'", p.display()))
        }
        None => Ok(goban_theme::default_theme_json().to_string()),
    }
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{out}");
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let (config, report) = goban_theme::config::loader::read_theme_file(&args.in_path)?;

    print_json(&serde_json::json!({
        "name": config.theme_name(),
        "report": report,
    }))?;

    if args.strict && !report.is_clean() {
        anyhow::bail!(
            "'{}' has {} mistyped and {} unknown field(s)",
            args.in_path.display(),
            report.mismatched.len(),
            report.unknown.len()
        );
    }
    Ok(())
}

fn cmd_matrices(args: ThemeArgs) -> anyhow::Result<()> {
    let text = read_theme_text(args.in_path.as_deref())?;
    let (config, _) = goban_theme::parse_theme(&text)?;
    let cache = goban_theme::TransformMatrixCache::build(&config);
    print_json(&cache.bundles())
}

fn cmd_stock(args: StockArgs) -> anyhow::Result<()> {
    let catalog = goban_theme::ThemeCatalog::with_stock_themes();
    match args.name {
        Some(name) => {
            let def = catalog
                .get(&name)
                .with_context(|| format!("no stock theme named '{name}'"))?;
            println!("{}", def.json);
        }
        None => {
            for name in catalog.names() {
                println!("{name}");
            }
        }
    }
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let text = read_theme_text(args.in_path.as_deref())?;
    let root = args
        .assets
        .clone()
        .or_else(|| args.in_path.as_deref().and_then(Path::parent).map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let loader = goban_theme::FsImageLoader::new(
        root,
        goban_theme::FsImageLoaderOpts {
            background: false,
            ..Default::default()
        },
    );
    let opts = goban_theme::ThemeOptions {
        device_scale: args.device_scale,
    };
    let mut theme = goban_theme::JsonTheme::from_json(&text, Rc::new(loader), opts)?;

    let color = match args.color {
        ColorChoice::White => goban_theme::StoneColor::White,
        ColorChoice::Black => goban_theme::StoneColor::Black,
    };
    let selectors = match color {
        goban_theme::StoneColor::White => theme.pre_render_white(args.seed),
        goban_theme::StoneColor::Black => theme.pre_render_black(args.seed),
    };

    let stones = Rc::new(goban_theme::SurfaceCell::new(goban_theme::RecordingSurface::new()));
    let shadows = Rc::new(goban_theme::SurfaceCell::new(goban_theme::RecordingSurface::new()));
    let stone_surface = goban_theme::SurfaceHandle::from_rc(stones.clone());
    let shadow_surface = goban_theme::SurfaceHandle::from_rc(shadows.clone());

    let cell = args.radius * 2.0;
    let mut placements = Vec::with_capacity(args.count);
    for i in 0..args.count {
        let selector = selectors[i % selectors.len()];
        let cx = cell * (i as f64 + 0.5);
        let p = theme.place_stone(
            color,
            &stone_surface,
            Some(&shadow_surface),
            selector,
            cx,
            args.radius,
            args.radius,
        );
        placements.push(format!("{:?}/{:?}", p.shadow, p.stone));
    }

    // Synchronous loads resolve before the first draw; this only flushes stragglers.
    theme.advance_deferred(goban_theme::RETRY_INTERVAL * goban_theme::MAX_RETRIES);
    let pending = theme.pending_deferred();
    if pending > 0 {
        tracing::warn!(pending, "draws still waiting on artwork");
    }

    print_json(&serde_json::json!({
        "theme": theme.theme_name(),
        "background": theme.background_style(),
        "placements": placements,
        "stones": stones.borrow().ops(),
        "shadows": shadows.borrow().ops(),
    }))
}
