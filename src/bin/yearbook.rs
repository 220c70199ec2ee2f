use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "yearbook", version)]
struct Cli {
    /// Log at DEBUG instead of INFO.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render pages to `{out}/out/{index}.png`.
    Render(RenderArgs),
    /// Load a manifest and report media that is missing from the cache.
    Check(SourceArgs),
    /// List pages with their type tags.
    Pages(SourceArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Manifest JSON.
    #[arg(long)]
    manifest: PathBuf,

    /// Populated media cache directory. Defaults to the manifest's directory.
    #[arg(long)]
    media: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output directory; pages land in its `out/` subdirectory.
    #[arg(long)]
    out: PathBuf,

    /// Directory of .ttf/.otf/.ttc files registered by file stem.
    #[arg(long)]
    fonts: Option<PathBuf>,

    /// Render only this page (0-based).
    #[arg(long)]
    page: Option<usize>,

    /// Base URL for QR payloads on graduation-movie pages.
    #[arg(long)]
    qr_base: Option<String>,

    /// Clear to white before each page instead of painting over the previous one.
    #[arg(long)]
    clear: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Check(args) => cmd_check(args),
        Command::Pages(args) => cmd_pages(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn media_root(args: &SourceArgs) -> PathBuf {
    args.media.clone().unwrap_or_else(|| {
        args.manifest
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    })
}

fn load(book: &mut yearbook::Book, args: &SourceArgs) -> anyhow::Result<()> {
    let root = media_root(args);
    book.load(&args.manifest, &root).with_context(|| {
        format!(
            "load manifest '{}' (media root '{}')",
            args.manifest.display(),
            root.display()
        )
    })
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut opts = yearbook::BookOptions::default().with_clear_before_draw(args.clear);
    if let Some(base) = args.qr_base {
        opts = opts.with_qr_base_url(base);
    }
    let mut book = yearbook::Book::new(opts);

    if let Some(dir) = &args.fonts {
        let engine = book.text_engine_mut();
        let n = engine
            .register_fonts_dir(dir)
            .with_context(|| format!("register fonts from '{}'", dir.display()))?;
        let aliases = engine.aliases().collect::<Vec<_>>().join(", ");
        tracing::info!(count = n, dir = %dir.display(), %aliases, "fonts registered");
    }

    load(&mut book, &args.source)?;

    match args.page {
        None => {
            let written = book.save_all(&args.out)?;
            eprintln!("wrote {} pages to {}", written.len(), args.out.join("out").display());
        }
        Some(index) => match book.draw_page(index) {
            yearbook::PageOutcome::Drawn { kind } => {
                let path = args.out.join("out").join(format!("{index}.png"));
                book.save_current(&path)
                    .with_context(|| format!("write png '{}'", path.display()))?;
                eprintln!("wrote {} ({kind})", path.display());
            }
            other => anyhow::bail!("page {index} not drawn: {other:?}"),
        },
    }
    Ok(())
}

fn cmd_check(args: SourceArgs) -> anyhow::Result<()> {
    let mut book = yearbook::Book::default();
    load(&mut book, &args)?;

    let refs = book.media_refs();
    let missing: Vec<_> = refs.iter().filter(|r| !r.is_cached()).collect();
    for r in &missing {
        match r.page_id {
            Some(id) => println!("missing  page {id:<6} {}  -> {}", r.uri, r.path.display()),
            None => println!("missing  profile     {}  -> {}", r.uri, r.path.display()),
        }
    }
    println!(
        "{} pages, {} media references, {} missing",
        book.page_count(),
        refs.len(),
        missing.len()
    );
    if !missing.is_empty() {
        std::process::exit(2);
    }
    Ok(())
}

fn cmd_pages(args: SourceArgs) -> anyhow::Result<()> {
    let mut book = yearbook::Book::default();
    load(&mut book, &args)?;
    let Some(manifest) = book.manifest() else {
        anyhow::bail!("no manifest loaded");
    };
    for (i, page) in manifest.pages.iter().enumerate() {
        let footer = page
            .footer
            .as_ref()
            .map(|f| format!(" footer={:?}", f.side))
            .unwrap_or_default();
        println!("{i:>4}  id={:<6} {}{footer}", page.id, page.kind.page_type());
    }
    Ok(())
}
