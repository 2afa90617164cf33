use backdrop_common::{GeometryKind, MaterialKind, Viewport};
use backdrop_input::PointerTracker;
use backdrop_render::{DebugTextRenderer, PerspectiveCamera, Renderer, SnapshotRenderer};
use backdrop_scene::{SHAPE_COUNT, Scene};
use clap::{Parser, Subcommand};
use glam::Vec2;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "backdrop-cli", about = "Headless tool for inspecting the backdrop scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Build a scene, optionally move the pointer once, and run frame updates
    Simulate {
        /// Number of frame updates to run
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// RNG seed for the population
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Window width in pixels
        #[arg(long, default_value = "1280")]
        width: u32,
        /// Window height in pixels
        #[arg(long, default_value = "720")]
        height: u32,
        /// Pointer x in pixels (requires --pointer-y)
        #[arg(long, requires = "pointer_y")]
        pointer_x: Option<f32>,
        /// Pointer y in pixels (requires --pointer-x)
        #[arg(long, requires = "pointer_x")]
        pointer_y: Option<f32>,
        /// Print a JSON snapshot instead of text
        #[arg(long)]
        json: bool,
    },
    /// Build many scenes and report material and geometry frequencies
    Population {
        /// Number of scenes to build
        #[arg(short = 'n', long, default_value = "200")]
        scenes: u64,
        /// First seed; scene i uses seed + i
        #[arg(short, long, default_value = "1")]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("backdrop-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("scene: {SHAPE_COUNT} shapes per population");
            println!("render: {}", backdrop_render::crate_info());
        }
        Commands::Simulate {
            frames,
            seed,
            width,
            height,
            pointer_x,
            pointer_y,
            json,
        } => {
            let viewport = Viewport::new(width, height);
            let mut scene = Scene::with_seed(seed);
            let camera = PerspectiveCamera::new(viewport.aspect());
            let mut tracker = PointerTracker::new();

            if let (Some(x), Some(y)) = (pointer_x, pointer_y) {
                tracker.on_pointer_move(Vec2::new(x, y), viewport);
                tracing::debug!(pointer = ?tracker.pointer(), "pointer moved");
            }

            for _ in 0..frames {
                scene.advance_frame(tracker.pointer());
            }
            tracing::info!(seed, frames, hash = scene.state_hash(), "simulation finished");

            if json {
                let snapshot = SnapshotRenderer::new().render(&scene, &camera);
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", DebugTextRenderer::new().render(&scene, &camera));
            }
        }
        Commands::Population { scenes, seed } => {
            if scenes == 0 {
                anyhow::bail!("--scenes must be at least 1");
            }
            let mut materials = [0usize; 2];
            let mut geometries = [0usize; 3];
            for i in 0..scenes {
                let scene = Scene::with_seed(seed.wrapping_add(i));
                for (slot, kind) in MaterialKind::ALL.iter().enumerate() {
                    materials[slot] += scene.count_material(*kind);
                }
                for kind in GeometryKind::ALL {
                    geometries[kind.index()] += scene.count_geometry(kind);
                }
            }

            let total = scenes as usize * SHAPE_COUNT;
            let pct = |n: usize| 100.0 * n as f64 / total as f64;
            println!("Population over {scenes} scenes ({total} shapes):");
            for (slot, kind) in MaterialKind::ALL.iter().enumerate() {
                let n = materials[slot];
                println!("  material {:<11} {:>6} ({:5.1}%)", format!("{kind:?}"), n, pct(n));
            }
            for kind in GeometryKind::ALL {
                let n = geometries[kind.index()];
                println!("  geometry {:<11} {:>6} ({:5.1}%)", format!("{kind:?}"), n, pct(n));
            }
        }
    }

    Ok(())
}
