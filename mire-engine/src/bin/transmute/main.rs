// transmute - Edit an image with a text prompt through Gemini
//
// Usage: API_KEY=... cargo run --bin transmute -- --image in.jpg --prompt "..." --out out.png
//
// Logs go to stderr; set RUST_LOG=debug for request details.

mod http;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use mire_engine::transmute::{DEFAULT_MODEL, GeminiEditor, ImageEditor, InlineImage};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "transmute", version, about = "Edit an image with a text prompt")]
struct Args {
    /// Source image (png, jpeg or webp).
    #[arg(long)]
    image: PathBuf,

    /// Edit instruction.
    #[arg(long)]
    prompt: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Model id.
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let source = read_source(&args.image)?;

    let editor = GeminiEditor::new(std::env::var("API_KEY").ok(), http::IsahcTransport::new())
        .with_model(args.model.as_str());
    tracing::info!(model = %args.model, mime = %source.mime, "sending edit");

    let url = editor
        .edit(&source.to_data_url(), &args.prompt)
        .context("edit image")?;
    let bytes = InlineImage::from_data_url(&url).decode().context("decode result")?;
    image::load_from_memory(&bytes).context("result is not a readable image")?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &bytes).with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn read_source(path: &Path) -> anyhow::Result<InlineImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let format = image::guess_format(&bytes)
        .with_context(|| format!("unrecognised image format '{}'", path.display()))?;
    Ok(InlineImage::from_bytes(format.to_mime_type(), &bytes))
}
