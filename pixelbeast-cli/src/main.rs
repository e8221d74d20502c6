use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pixelbeast", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate creature sprites and sound effects from a description.
    Generate(GenerateArgs),
    /// Give an existing image the blocky pixel-art look.
    Pixelate(PixelateArgs),
    /// Write the built-in keyword rule table as JSON.
    Rules(RulesArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Free-text creature description.
    #[arg(long)]
    description: String,

    /// Logical sprite resolution: 32px, 64px or 128px.
    #[arg(long, default_value = "32px")]
    pixel_size: pixelbeast::PixelSize,

    /// Number of variants.
    #[arg(long, default_value_t = 4)]
    quantity: u32,

    /// Engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory.
    #[arg(long, default_value = "out")]
    out: PathBuf,

    /// Generate variants in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct PixelateArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Block size in pixels.
    #[arg(long, default_value_t = 16)]
    block: u32,

    /// Resize to a square of this side (Lanczos3) before pixelating.
    #[arg(long)]
    size: Option<u32>,
}

#[derive(Parser, Debug)]
struct RulesArgs {
    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Pixelate(args) => cmd_pixelate(args),
        Command::Rules(args) => cmd_rules(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => pixelbeast::EngineConfig::from_path(path)?,
        None => pixelbeast::EngineConfig::default(),
    };
    if args.parallel {
        config.threading.parallel = true;
    }
    if args.threads.is_some() {
        config.threading.threads = args.threads;
    }
    let engine = pixelbeast::Engine::new(config)?;

    let req = pixelbeast::GenerateRequest::new(args.description)
        .with_pixel_size(args.pixel_size)
        .with_quantity(args.quantity);
    let resp = engine.generate(&req)?;
    tracing::info!(
        variants = resp.images.len(),
        method = ?resp.method,
        "generated batch"
    );

    create_dir(&args.out)?;
    for (i, (image, audio)) in resp.images.iter().zip(&resp.audios).enumerate() {
        write_data_uri(image, &args.out.join(format!("creature_{i}.png")))?;
        write_data_uri(audio, &args.out.join(format!("creature_{i}.wav")))?;
    }
    let json_path = args.out.join("response.json");
    std::fs::write(&json_path, resp.to_json_pretty()?)
        .with_context(|| format!("write response '{}'", json_path.display()))?;

    eprintln!("wrote {} variants to {}", resp.images.len(), args.out.display());
    Ok(())
}

fn cmd_pixelate(args: PixelateArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let mut img = pixelbeast::decode_image(&bytes)?;
    if let Some(size) = args.size {
        img = image::imageops::resize(&img, size, size, image::imageops::FilterType::Lanczos3);
    }
    let out = pixelbeast::pixelate(&img, args.block)?;

    if let Some(parent) = args.out.parent() {
        create_dir(parent)?;
    }
    std::fs::write(&args.out, pixelbeast::encode_png(&out)?)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_rules(args: RulesArgs) -> anyhow::Result<()> {
    let json = pixelbeast::RuleTable::default().to_json_pretty()?;
    if let Some(parent) = args.out.parent() {
        create_dir(parent)?;
    }
    std::fs::write(&args.out, json)
        .with_context(|| format!("write rules '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn write_data_uri(uri: &str, path: &Path) -> anyhow::Result<()> {
    let (_, bytes) = pixelbeast::data_uri::parse(uri)?;
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}

fn create_dir(dir: &Path) -> anyhow::Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).with_context(|| format!("create output dir '{}'", dir.display()))
}
