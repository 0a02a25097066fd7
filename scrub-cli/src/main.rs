//! Scrub CLI Tool
//!
//! Command-line interface for inspecting scene manifests, checking frame
//! directories and rendering scroll positions to image files.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use image::{DynamicImage, RgbaImage};
use scrub_core::scroll::frame_for_progress;
use scrub_core::SceneManifest;
use scrub_render::frame_store::frame_path;
use scrub_render::{FrameRenderer, FrameStore, ProgressTracker};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "scrub")]
#[command(about = "Scroll-driven image sequence scrubber - inspect and render scenes")]
#[command(version)]
struct Cli {
    /// Scene manifest (JSON); the built-in scene is used when omitted
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the scene summary and caption windows
    Info,

    /// Write the active manifest as JSON
    Manifest {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify that every frame file exists
    Check {
        /// Directory holding the frame files
        #[arg(long)]
        frames: PathBuf,
    },

    /// Render a single frame aspect-fitted onto a surface
    Frame {
        /// Directory holding the frame files
        #[arg(long)]
        frames: PathBuf,

        #[command(flatten)]
        target: FrameTarget,

        /// Surface width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Surface height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Output image path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Preload all frames and render evenly spaced scroll positions
    Scrub {
        /// Directory holding the frame files
        #[arg(long)]
        frames: PathBuf,

        /// Output directory for rendered images
        #[arg(short, long)]
        output: PathBuf,

        /// Number of scroll positions to render
        #[arg(long, default_value = "10")]
        steps: u32,

        /// Surface width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Surface height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,
    },

    /// Print caption states at a scroll offset
    Captions {
        /// Fraction of the scroll region scrolled past the viewport top, in [0, 1]
        #[arg(long)]
        offset: f64,
    },
}

/// Which frame to render: exactly one of the two is required
#[derive(Args)]
#[group(required = true, multiple = false)]
struct FrameTarget {
    /// Scroll progress in [0, 1]
    #[arg(long)]
    progress: Option<f64>,

    /// Frame index (zero-based)
    #[arg(long)]
    index: Option<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let manifest = load_manifest(cli.manifest.as_deref())?;

    match cli.command {
        Commands::Info => print_info(&manifest),
        Commands::Manifest { output } => write_manifest(&manifest, output)?,
        Commands::Check { frames } => check_frames(&manifest, &frames)?,
        Commands::Frame {
            frames,
            target,
            width,
            height,
            output,
        } => render_frame(&manifest, &frames, &target, width, height, &output)?,
        Commands::Scrub {
            frames,
            output,
            steps,
            width,
            height,
        } => render_scrub(&manifest, &frames, &output, steps, width, height)?,
        Commands::Captions { offset } => print_captions(&manifest, offset),
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_manifest(path: Option<&Path>) -> Result<SceneManifest> {
    let Some(path) = path else {
        return Ok(SceneManifest::default());
    };
    let file = File::open(path)
        .with_context(|| format!("Failed to open manifest {}", path.display()))?;
    let manifest = SceneManifest::read(BufReader::new(file))
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    tracing::debug!(path = %path.display(), "manifest loaded");
    Ok(manifest)
}

fn write_manifest(manifest: &SceneManifest, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(&path).context("Failed to create manifest file")?;
            manifest
                .write(BufWriter::new(file))
                .context("Failed to write manifest")?;
            println!("Wrote manifest to {}", path.display());
        }
        None => manifest
            .write(io::stdout().lock())
            .context("Failed to write manifest")?,
    }
    Ok(())
}

fn check_frames(manifest: &SceneManifest, dir: &Path) -> Result<()> {
    let sequence = &manifest.frames;
    println!("Checking {} frames in {}", sequence.count, dir.display());

    let missing: Vec<u32> = (0..sequence.count)
        .filter(|&index| !frame_path(dir, sequence, index).is_file())
        .collect();

    let extra = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| sequence.pattern.parse_file_name(&entry.file_name().to_string_lossy()))
        .filter(|&index| index >= sequence.count)
        .count();
    if extra > 0 {
        println!("Ignoring {} frame file(s) past frame {}", extra, sequence.count);
    }

    if missing.is_empty() {
        println!("All {} frames present", sequence.count);
        return Ok(());
    }

    println!("Missing {} frame(s):", missing.len());
    for index in missing.iter().take(20) {
        println!("  [{}] {}", index, sequence.pattern.file_name(*index));
    }
    if missing.len() > 20 {
        println!("  ... and {} more", missing.len() - 20);
    }
    bail!("{} of {} frames missing", missing.len(), sequence.count)
}

fn render_frame(
    manifest: &SceneManifest,
    dir: &Path,
    target: &FrameTarget,
    width: u32,
    height: u32,
    output: &Path,
) -> Result<()> {
    let sequence = &manifest.frames;
    let index = match (target.progress, target.index) {
        (Some(progress), _) => frame_for_progress(progress, sequence.count),
        (None, Some(index)) => sequence.clamp_index(i64::from(index)),
        (None, None) => bail!("Either --progress or --index is required"),
    };

    println!("Rendering frame {} at {}x{}", index, width, height);
    let store = FrameStore::preload_only(dir, sequence, [index]);
    let renderer = FrameRenderer::new(width, height);
    let image = renderer
        .render(&store, index)
        .with_context(|| format!("Frame {} could not be drawn", index))?;

    save_image(image, output)?;
    println!("Saved frame to {}", output.display());
    Ok(())
}

fn render_scrub(
    manifest: &SceneManifest,
    dir: &Path,
    output: &Path,
    steps: u32,
    width: u32,
    height: u32,
) -> Result<()> {
    let sequence = &manifest.frames;
    std::fs::create_dir_all(output).context("Failed to create output directory")?;

    println!("Preloading {} frames from {}", sequence.count, dir.display());
    let mut tracker = ProgressTracker::new(sequence.count as u64, 100, "Loaded");
    let store = FrameStore::preload(dir, sequence, |_, ok| tracker.record(ok));
    if store.loaded_count() == 0 {
        bail!("No frames could be loaded from {}", dir.display());
    }

    let renderer = FrameRenderer::new(width, height);
    let steps = steps.max(1);
    let mut written = 0;

    for step in 0..steps {
        let progress = if steps == 1 {
            0.0
        } else {
            step as f64 / (steps - 1) as f64
        };
        let index = frame_for_progress(progress, sequence.count);

        let Some(image) = renderer.render(&store, index) else {
            tracing::warn!(step, index, "frame not loaded, skipping");
            continue;
        };

        let path = output.join(format!("scroll_{:04}.png", step));
        save_image(image, &path)?;
        written += 1;
        tracing::debug!(step, progress, index, path = %path.display(), "rendered");
    }

    println!("Rendered {} / {} scroll positions to {}", written, steps, output.display());
    Ok(())
}

/// Surfaces are opaque, so they are saved as RGB to allow JPEG output
fn save_image(image: RgbaImage, path: &Path) -> Result<()> {
    DynamicImage::ImageRgba8(image)
        .into_rgb8()
        .save(path)
        .with_context(|| format!("Failed to save {}", path.display()))
}

fn print_info(manifest: &SceneManifest) {
    let sequence = &manifest.frames;
    let timeline = manifest.timeline();

    println!("\n=== Scene ===");
    println!("Frames: {}", sequence.count);
    println!("First frame: {}", sequence.path(0));
    println!("Last frame: {}", sequence.path(sequence.last_index()));
    println!("Scroll height: {}vh", manifest.scroll_height_vh);
    println!(
        "Smooth scroll: lerp {}, wheel multiplier {}",
        manifest.smooth.lerp, manifest.smooth.wheel_multiplier
    );

    println!("\n=== Captions ===");
    for (i, entry) in timeline.entries.iter().enumerate() {
        let Some(window) = timeline.window(i) else {
            continue;
        };
        println!(
            "  [{}] frames {}-{} \"{}\" / \"{}\"",
            i,
            entry.start,
            entry.end,
            entry.heading(),
            entry.text
        );
        println!(
            "      enter {:.2}%-{:.2}%, exit {:.2}%-{:.2}%",
            window.enter_start * 100.0,
            window.enter_end * 100.0,
            window.exit_start * 100.0,
            window.exit_end * 100.0
        );
    }

    for (a, b) in timeline.overlapping_pairs() {
        println!("  warning: captions {} and {} overlap", a, b);
    }
}

fn print_captions(manifest: &SceneManifest, offset: f64) {
    let timeline = manifest.timeline();
    println!("Caption states at offset {:.4}:", offset);
    for (entry, state) in timeline.entries.iter().zip(timeline.states_at(offset)) {
        println!(
            "  {} {:<34} opacity {:.3}  x {:>6.2}%",
            entry.year,
            entry.text,
            state.opacity,
            state.offset_x_percent
        );
    }
}
