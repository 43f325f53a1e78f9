use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "captionfx", version)]
struct Cli {
    /// Overlay request JSON.
    #[arg(long, required_unless_present = "list_fonts")]
    request: Option<PathBuf>,

    /// Directory of input PNG frames, processed in file name order.
    #[arg(long, required_unless_present = "list_fonts")]
    frames_dir: Option<PathBuf>,

    /// Directory receiving the output PNG frames (same file names as the input).
    #[arg(long, required_unless_present = "list_fonts")]
    out_dir: Option<PathBuf>,

    /// Directory holding `{font_id}.ttf|otf|ttc` files.
    #[arg(long, default_value = "fonts")]
    font_dir: PathBuf,

    /// Font id used when the requested font is missing.
    #[arg(long, default_value = "default")]
    default_font: String,

    /// Print the font ids found in `--font-dir` and exit.
    #[arg(long)]
    list_fonts: bool,

    /// Log debug output to stderr.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let fonts = captionfx::FontDirectory::new(&cli.font_dir).with_default_font(&cli.default_font);
    if cli.list_fonts {
        for id in fonts.available_fonts()? {
            println!("{id}");
        }
        return Ok(());
    }

    let (Some(request), Some(frames_dir), Some(out_dir)) =
        (cli.request.as_deref(), cli.frames_dir.as_deref(), cli.out_dir.as_deref())
    else {
        anyhow::bail!("--request, --frames-dir and --out-dir are required");
    };
    cmd_render(request, frames_dir, out_dir, fonts)
}

fn cmd_render(
    request: &Path,
    frames_dir: &Path,
    out_dir: &Path,
    fonts: captionfx::FontDirectory,
) -> anyhow::Result<()> {
    let json = fs::read_to_string(request)
        .with_context(|| format!("read request '{}'", request.display()))?;
    let req = captionfx::OverlayRequest::from_json(&json)
        .with_context(|| format!("parse request '{}'", request.display()))?;

    let paths = list_pngs(frames_dir)?;
    anyhow::ensure!(!paths.is_empty(), "no PNG frames in '{}'", frames_dir.display());
    let frames = read_frames(&paths)?;

    let mut cache = captionfx::FontCache::with_opts(fonts, captionfx::FontCacheOpts::from_env());
    let out = req.apply(&mut cache, &frames)?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;
    for (i, src) in paths.iter().enumerate() {
        let rgb = out
            .frames
            .frame_rgb8(i)
            .with_context(|| format!("missing output frame {i}"))?;
        let name = src
            .file_name()
            .with_context(|| format!("frame path '{}' has no file name", src.display()))?;
        let dst = out_dir.join(name);
        image::save_buffer_with_format(
            &dst,
            &rgb,
            out.frames.width(),
            out.frames.height(),
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", dst.display()))?;
    }

    eprintln!("wrote {} frames to {}", paths.len(), out_dir.display());
    Ok(())
}

fn list_pngs(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir '{}'", dir.display()))? {
        let path = entry
            .with_context(|| format!("read dir entry in '{}'", dir.display()))?
            .path();
        let is_png = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if is_png && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn read_frames(paths: &[PathBuf]) -> anyhow::Result<captionfx::FrameSequence> {
    let mut size = None;
    let mut frames = Vec::with_capacity(paths.len());
    for path in paths {
        let img = image::open(path)
            .with_context(|| format!("decode png '{}'", path.display()))?
            .to_rgb8();
        let dims = img.dimensions();
        let expected = *size.get_or_insert(dims);
        anyhow::ensure!(
            dims == expected,
            "frame '{}' is {}x{}, expected {}x{}",
            path.display(),
            dims.0,
            dims.1,
            expected.0,
            expected.1
        );
        frames.push(img.into_raw());
    }
    let (width, height) = size.unwrap_or((0, 0));
    Ok(captionfx::FrameSequence::from_rgb8_frames(width, height, &frames)?)
}
