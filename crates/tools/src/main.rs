use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use constellation::{Animator, SpherePointSet};
use runtime::{Frame, TickLoop};
use serde::Serialize;
use tools::{PlacementLog, SvgSurface, load_config, parse_anchor, parse_viewport, point_records};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless constellation sphere renderer")]
struct Args {
    /// JSON configuration file (partial documents are filled with defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the generated sphere points as JSON
    Points,

    /// Print the effective configuration as JSON
    Config,

    /// Run a number of ticks headlessly and print metrics JSON
    Simulate {
        #[arg(long, default_value_t = 600)]
        frames: u64,

        /// Viewport as WIDTHxHEIGHT
        #[arg(long, default_value = "1280x720")]
        viewport: String,

        /// Overlay anchor as ID:LAT:LON (degrees); repeatable
        #[arg(long = "anchor")]
        anchors: Vec<String>,
    },

    /// Render a single frame to SVG
    Svg {
        /// Number of rotation steps before drawing
        #[arg(long, default_value_t = 0)]
        frame: u64,

        /// Viewport as WIDTHxHEIGHT
        #[arg(long, default_value = "1280x720")]
        viewport: String,

        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let args = Args::parse();

    match args.command {
        Command::Points => cmd_points(&args),
        Command::Config => cmd_config(&args),
        Command::Simulate {
            frames,
            ref viewport,
            ref anchors,
        } => cmd_simulate(&args, frames, viewport, anchors),
        Command::Svg {
            frame,
            ref viewport,
            ref out,
        } => cmd_svg(&args, frame, viewport, out.as_ref()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

fn cmd_points(args: &Args) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let points = SpherePointSet::generate(config.node_count, config.sphere_radius);
    print_json(&point_records(&points))
}

fn cmd_config(args: &Args) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let text = config.to_json_pretty().map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

#[derive(Serialize)]
struct SimulateReport<'a> {
    frames: u64,
    viewport: [f64; 2],
    metrics: &'a runtime::Metrics,
    overlays: &'a PlacementLog,
}

fn cmd_simulate(args: &Args, frames: u64, viewport: &str, anchors: &[String]) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let viewport = parse_viewport(viewport)?;
    let anchors = anchors
        .iter()
        .map(|s| parse_anchor(s))
        .collect::<Result<Vec<_>, _>>()?;

    let mut animator = Animator::new(config, viewport, anchors).map_err(|e| e.to_string())?;
    let mut surface = SvgSurface::new();
    let mut sink = PlacementLog::default();

    let mut ticks = TickLoop::new(Frame::first());
    let ran = ticks.run_for(frames, |frame| {
        animator.tick(frame, Some(&mut surface), &mut sink);
    });
    info!(frames = ran, "simulation finished");

    print_json(&SimulateReport {
        frames: ran,
        viewport: [viewport.width, viewport.height],
        metrics: animator.metrics(),
        overlays: &sink,
    })
}

fn cmd_svg(
    args: &Args,
    frame: u64,
    viewport: &str,
    out: Option<&PathBuf>,
) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let viewport = parse_viewport(viewport)?;
    let mut animator: Animator<String> =
        Animator::new(config, viewport, Vec::new()).map_err(|e| e.to_string())?;
    let mut sink = PlacementLog::default();

    let mut ticks = TickLoop::new(Frame::first());
    ticks.run_for(frame, |f| {
        animator.tick(f, None::<&mut SvgSurface>, &mut sink);
    });

    let mut surface = SvgSurface::new();
    let stats = animator.draw(Some(&mut surface), &mut sink);
    let doc = surface.finish();

    match out {
        Some(path) => {
            fs::write(path, doc).map_err(|e| format!("write {}: {e}", path.display()))?;
            info!(
                path = %path.display(),
                nodes = stats.nodes_drawn,
                edges = stats.edges_drawn,
                "svg written"
            );
        }
        None => print!("{doc}"),
    }
    Ok(())
}
