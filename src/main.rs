#[cfg(test)]
#[macro_use]
mod test_utils;

mod camera;
mod canvas;
mod color;
mod direction;
mod intersection;
mod light;
mod material;
mod matrix;
mod object;
mod point;
mod ray;
mod renderer;
mod scene;
mod shading;
mod shapes;
mod texture;
mod util;
mod vector;
mod world;

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{sleep, spawn, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use log::info;
use pbr::ProgressBar;
use rayon::ThreadPoolBuilder;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(Parser)]
#[command(version, about = "Offline CPU ray tracer with Phong shading, reflection and refraction")]
struct CommandLineOptions {
    /// The JSON file describing the scene to render
    scene: PathBuf,

    /// The PPM file to write the rendered image to
    image: PathBuf,

    /// Number of render threads
    #[arg(short('t'), long)]
    threads: Option<usize>,

    /// Suppress the progress bar
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let opts = CommandLineOptions::parse();

    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let num_threads = opts.threads.unwrap_or_else(num_cpus::get);
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .context("could not configure the render threadpool")?;

    let text = fs::read_to_string(&opts.scene)
        .with_context(|| format!("could not read scene file {}", opts.scene.display()))?;
    let scene = scene::parse(&text)
        .with_context(|| format!("could not parse scene file {}", opts.scene.display()))?;

    let width = scene.camera.viewport_width();
    let height = scene.camera.viewport_height();
    info!("rendering {width}x{height} with {num_threads} threads");

    let start = Instant::now();
    let rows_done = Arc::new(AtomicUsize::new(0));
    let ticker = if opts.quiet {
        None
    } else {
        Some(spawn_progress_ticker(&rows_done, height))
    };

    let image = renderer::render(&scene.world, &scene.camera, &rows_done);

    if let Some((stop, handle)) = ticker {
        stop.store(true, Ordering::Relaxed);
        let _ = handle.join();
    }
    info!("rendered in {:.2?}", start.elapsed());

    fs::write(&opts.image, image.to_ppm())
        .with_context(|| format!("could not write image file {}", opts.image.display()))?;
    info!("wrote {}", opts.image.display());

    Ok(())
}

fn spawn_progress_ticker(
    rows_done: &Arc<AtomicUsize>,
    total_rows: usize,
) -> (Arc<AtomicBool>, JoinHandle<()>) {
    let stop = Arc::new(AtomicBool::new(false));
    let handle = {
        let stop = stop.clone();
        let rows_done = rows_done.clone();
        spawn(move || {
            let mut pb = ProgressBar::new(total_rows as u64);
            pb.message("Rows: ");
            loop {
                pb.set(rows_done.load(Ordering::Relaxed) as u64);
                if stop.load(Ordering::Relaxed) {
                    break;
                }
                sleep(Duration::from_millis(250));
            }
            pb.finish();
        })
    };
    (stop, handle)
}
