use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "promocard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a banner and write it as a PNG.
    Generate(GenerateArgs),
    /// Print the default layout as JSON (a starting point for `--layout`).
    Layout,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Background image: a file path or an http(s) URL.
    #[arg(long)]
    background: String,

    /// Product image (file path or URL). Repeat for the second product.
    #[arg(long = "product", num_args = 1)]
    products: Vec<String>,

    /// First title line.
    #[arg(long, default_value = "NIKE × 愛迪達")]
    title1: String,

    /// Second title line.
    #[arg(long, default_value = "結帳享84折")]
    title2: String,

    /// Button label.
    #[arg(long, default_value = "立即前往")]
    button: String,

    /// Outline font file (TTF/OTF). Without one, a small built-in face is used.
    #[arg(long)]
    font: Option<PathBuf>,

    /// JSON layout overrides (see `promocard layout`).
    #[arg(long)]
    layout: Option<PathBuf>,

    /// How product backgrounds are removed. `keep-alpha` skips removal for cut-out PNGs.
    #[arg(long, value_enum, default_value_t = MatteChoice::BorderKey)]
    matte: MatteChoice,

    /// Refuse to generate without a font and exactly two products.
    #[arg(long)]
    strict: bool,

    /// Print the resolved font family and the SHA-256 of the font bytes.
    #[arg(long)]
    dump_font: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MatteChoice {
    /// Use the product images' own alpha.
    KeepAlpha,
    /// Key out a plain backdrop connected to the image border.
    BorderKey,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Layout => cmd_layout(),
    }
}

fn cmd_layout() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&promocard::LayoutSpec::default())
        .context("serialize default layout")?;
    println!("{json}");
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let spec = match &args.layout {
        Some(path) => promocard::LayoutSpec::load(path)?,
        None => promocard::LayoutSpec::default(),
    };

    let fetcher = promocard::ImageFetcher::new(promocard::FetchConfig::default())?;
    let background = load_field("background", &args.background, &fetcher);
    let products: Vec<_> = args
        .products
        .iter()
        .enumerate()
        .map(|(i, raw)| load_field(&format!("product {}", i + 1), raw, &fetcher))
        .collect();

    // Every field is attempted before bailing, so one bad URL does not hide another.
    let mut failed = 0usize;
    for r in std::iter::once(&background).chain(products.iter()) {
        if let Err(e) = r {
            eprintln!("error: {e:#}");
            failed += 1;
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} image input(s) could not be loaded");
    }
    let background = background?;
    let products = products.into_iter().collect::<anyhow::Result<Vec<_>>>()?;

    let mut request = promocard::GenerationRequest::new(background)
        .with_titles(args.title1, args.title2)
        .with_button_label(args.button);
    request.products = products;
    if let Some(path) = &args.font {
        request = request.with_font(promocard::FontSource::load(path)?);
    }

    if args.strict {
        request.validate_strict()?;
    }
    if args.dump_font {
        dump_font_diagnostics(request.font.as_ref(), spec.title_size_px);
    }

    let engine = match args.matte {
        MatteChoice::KeepAlpha => promocard::CompositeEngine::new(spec, promocard::KeepAlpha)?,
        MatteChoice::BorderKey => {
            promocard::CompositeEngine::new(spec, promocard::BorderKeyRemover::default())?
        }
    };

    let banner = engine.compose_with_progress(&request, &mut |p| {
        if let promocard::Progress::RemovingBackground { index, total } = p {
            eprintln!("removing background {}/{}", index + 1, total);
        }
    })?;
    for notice in &banner.notices {
        eprintln!("warning: {notice}");
    }

    write_png(&args.out, &banner.to_png()?)?;
    eprintln!("wrote {}", args.out.display());
    println!("theme: {}", banner.theme);
    Ok(())
}

fn load_field(
    field: &str,
    raw: &str,
    fetcher: &promocard::ImageFetcher,
) -> anyhow::Result<image::DynamicImage> {
    let source = promocard::ImageSource::parse(raw);
    source
        .load(fetcher)
        .with_context(|| format!("{field} ({source})"))
}

fn write_png(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))
}

fn dump_font_diagnostics(font: Option<&promocard::FontSource>, size_px: f32) {
    eprintln!("font diagnostics:");
    let Some(font) = font else {
        eprintln!("  family:  (built-in)");
        return;
    };
    let resolved = promocard::resolve_font(Some(font), size_px);
    eprintln!(
        "  family:  {}",
        resolved.handle.family_name().unwrap_or("(built-in fallback)")
    );
    eprintln!("  sha256:  {}", sha256_hex(font.bytes()));
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
