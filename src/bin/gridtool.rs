use clap::{Parser, Subcommand};
use grid_pack::geometry::{flip, is_trimmed, rotate_degrees, trim};
use grid_pack::tools::{load_shape, render_container, shape_files, shape_stats, shapes_dir_from_env};
use grid_pack::{FlipAxis, Grid, ShapeCatalog, pack_shapes};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridtool", version, about = "grid_pack CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Trim a shape to its bounding box and print it
    Trim {
        #[arg(long)]
        shape: PathBuf,
    },
    /// Rotate and/or flip a shape
    Transform {
        #[arg(long)]
        shape: PathBuf,
        #[arg(long, default_value_t = 0)]
        degrees: u32,
        #[arg(long)]
        flip: Option<FlipAxis>,
    },
    /// Pack shapes into a container at their first fits
    Pack {
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        /// Shape files; defaults to every shape under GRID_SHAPES_DIR
        #[arg(long)]
        shape: Vec<PathBuf>,
        /// Blocking pattern with the container's dimensions
        #[arg(long)]
        blocked: Option<PathBuf>,
        #[arg(long)]
        rotate: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let code = match cli.command {
        Command::Trim { shape } => trim_cmd(&shape),
        Command::Transform {
            shape,
            degrees,
            flip,
        } => transform_cmd(&shape, degrees, flip),
        Command::Pack {
            width,
            height,
            shape,
            blocked,
            rotate,
        } => pack_cmd(width, height, shape, blocked.as_deref(), rotate),
    };
    std::process::exit(code);
}

fn load_or_report(path: &Path) -> Option<Grid> {
    match load_shape(path) {
        Ok(grid) => Some(grid),
        Err(err) => {
            eprintln!("Failed to load shape {}: {}", path.display(), err);
            None
        }
    }
}

fn trim_cmd(path: &Path) -> i32 {
    let Some(grid) = load_or_report(path) else {
        return 1;
    };
    let stats = shape_stats(&grid);
    println!(
        "Shape: {} ({}x{}, {} cells, fill {:.1}%, trimmed={})",
        path.display(),
        grid.width(),
        grid.height(),
        stats.cells,
        stats.fill_ratio * 100.0,
        is_trimmed(&grid)
    );
    let trimmed = trim(&grid);
    println!("Trimmed: {}x{}", trimmed.width(), trimmed.height());
    println!("{trimmed}");
    0
}

fn transform_cmd(path: &Path, degrees: u32, axis: Option<FlipAxis>) -> i32 {
    let Some(grid) = load_or_report(path) else {
        return 1;
    };
    let mut out = match rotate_degrees(&trim(&grid), degrees) {
        Ok(out) => out,
        Err(err) => {
            eprintln!("{err}");
            return 2;
        }
    };
    if let Some(axis) = axis {
        out = flip(&out, axis);
    }
    println!("{}x{}", out.width(), out.height());
    println!("{out}");
    0
}

fn pack_cmd(
    width: u32,
    height: u32,
    paths: Vec<PathBuf>,
    blocked: Option<&Path>,
    rotate: bool,
) -> i32 {
    let paths = if paths.is_empty() {
        shape_files(shapes_dir_from_env())
    } else {
        paths
    };
    let shapes: Vec<Grid> = paths.iter().filter_map(|p| load_or_report(p)).collect();

    let blocking = match blocked {
        Some(path) => {
            let Some(grid) = load_or_report(path) else {
                return 1;
            };
            if (grid.width(), grid.height()) != (width, height) {
                eprintln!(
                    "Blocking pattern is {}x{}, expected {}x{}",
                    grid.width(),
                    grid.height(),
                    width,
                    height
                );
                return 2;
            }
            grid
        }
        None => Grid::new(width, height),
    };

    let catalog = Arc::new(ShapeCatalog::new());
    let start = Instant::now();
    let (container, placements) = match pack_shapes(&catalog, &blocking, &shapes, rotate) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{err}");
            return 2;
        }
    };
    let elapsed = start.elapsed();

    println!(
        "Container {}x{}: {} shapes, {} distinct",
        width,
        height,
        shapes.len(),
        catalog.len() - 1
    );
    for (i, placement) in placements.iter().enumerate() {
        match placement {
            Some(p) => println!(
                "  shape {}: item {} at {} rotated {}°",
                i,
                p.index,
                p.position,
                p.rotation.degrees()
            ),
            None => println!("  shape {}: no fit", i),
        }
    }
    print!("{}", render_container(&container));
    println!(
        "Placed {}/{} in {:.2?}, free cells: {}",
        container.item_count(),
        shapes.len(),
        elapsed,
        container.free_space()
    );
    0
}
