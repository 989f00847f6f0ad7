use crate::container::Container;
use crate::models::Grid;
use image::{DynamicImage, GenericImageView};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to turn a file into a shape grid
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// Bitmap could not be decoded
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    /// ASCII shape contained an unknown glyph
    #[error("unexpected {glyph:?} at line {line}, column {column}")]
    Glyph {
        /// Offending character
        glyph: char,
        /// 1-based line
        line: usize,
        /// 1-based column
        column: usize,
    },
}

/// Parse an ASCII shape: `#`, `X`, `x` or `1` mark set cells; `.`, `0`,
/// `_` or space mark clear ones. Short rows are padded with clear cells and
/// trailing blank lines are ignored.
pub fn parse_ascii(text: &str) -> Result<Grid, LoadError> {
    let mut rows: Vec<Vec<bool>> = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let mut row = Vec::with_capacity(line.len());
        for (col, glyph) in line.trim_end().chars().enumerate() {
            let set = match glyph {
                '#' | 'X' | 'x' | '1' => true,
                '.' | '0' | '_' | ' ' => false,
                _ => {
                    return Err(LoadError::Glyph {
                        glyph,
                        line: line_no + 1,
                        column: col + 1,
                    });
                }
            };
            row.push(set);
        }
        rows.push(row);
    }
    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
    let mut grid = Grid::new(width, rows.len() as u32);
    for (y, row) in rows.iter().enumerate() {
        for (x, &set) in row.iter().enumerate() {
            if set {
                grid.set_cell(x as u32, y as u32, true);
            }
        }
    }
    Ok(grid)
}

/// Convert a bitmap into a grid, one cell per pixel.
///
/// Images with any transparent pixel mark opaque pixels as set; fully opaque
/// images mark dark pixels (luma below 128) as set.
pub fn bitmap_to_grid(img: &DynamicImage) -> Grid {
    let rgba = img.to_rgba8();
    let (width, height) = img.dimensions();
    let has_alpha = rgba.pixels().any(|p| p[3] < 128);

    let mut grid = Grid::new(width, height);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let set = if has_alpha {
            a >= 128
        } else {
            let luma = (77 * r as u32 + 150 * g as u32 + 29 * b as u32) >> 8;
            luma < 128
        };
        if set {
            grid.set_cell(x, y, true);
        }
    }
    grid
}

/// Load a shape from an ASCII `.txt` file or any bitmap format `image` reads
pub fn load_shape<P: AsRef<Path>>(path: P) -> Result<Grid, LoadError> {
    let path = path.as_ref();
    let is_text = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if is_text {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        return parse_ascii(&text);
    }
    let img = image::open(path)?;
    Ok(bitmap_to_grid(&img))
}

/// Summary statistics for a shape or occupancy grid.
#[derive(Debug, Clone, Copy)]
pub struct ShapeStats {
    /// Count of set cells.
    pub cells: usize,
    /// Bounding box area.
    pub area: usize,
    /// Ratio of set cells to area.
    pub fill_ratio: f64,
}

/// Compute set-cell stats for a grid.
pub fn shape_stats(grid: &Grid) -> ShapeStats {
    let cells = grid.occupied_count();
    let area = grid.size();
    let fill_ratio = if area == 0 {
        0.0
    } else {
        cells as f64 / area as f64
    };
    ShapeStats {
        cells,
        area,
        fill_ratio,
    }
}

const ITEM_GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Render a container: one glyph per item (cycling `A-Z a-z 0-9` by slot
/// index), `#` for blocked cells and `.` for free cells.
pub fn render_container(container: &Container) -> String {
    let mut out = String::new();
    for y in 0..container.height() as i32 {
        for x in 0..container.width() as i32 {
            let glyph = match container.cell_occupant(x, y) {
                Some(index) => ITEM_GLYPHS[index.get() % ITEM_GLYPHS.len()] as char,
                None if container.occupancy().get_cell(x as u32, y as u32) => '#',
                None => '.',
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// Default shape directory from environment variables.
pub fn shapes_dir_from_env() -> PathBuf {
    env::var("GRID_SHAPES_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("shapes"))
}

/// Shape files (`.txt` and common bitmap formats) under `root`, sorted.
pub fn shape_files<P: AsRef<Path>>(root: P) -> Vec<PathBuf> {
    let mut stack = vec![root.as_ref().to_path_buf()];
    let mut files = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if matches!(ext.as_str(), "txt" | "png" | "bmp" | "gif") {
                    files.push(path);
                }
            }
        }
    }

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ShapeCatalog;
    use image::{Rgba, RgbaImage};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn write_temp_file(contents: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before UNIX epoch")
            .as_nanos();
        let sequence = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        path.push(format!("grid_pack_shape_{nanos}_{sequence}.txt"));
        fs::write(&path, contents).expect("failed to write temp shape file");
        path
    }

    #[test]
    fn parse_ascii_pads_short_rows() {
        let grid = parse_ascii(".#\n###\n\n").unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.to_string(), ".#.\n###");
    }

    #[test]
    fn parse_ascii_rejects_unknown_glyph() {
        let err = parse_ascii("#.\n#?").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Glyph {
                glyph: '?',
                line: 2,
                column: 2
            }
        ));
    }

    #[test]
    fn load_shape_reads_text_files() {
        let path = write_temp_file("..\n.#\n");
        let grid = load_shape(&path).unwrap();
        assert_eq!(grid.occupied_count(), 1);
        assert!(grid.get_cell(1, 1));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_shape_reports_missing_file() {
        let err = load_shape("/nonexistent/grid_pack/shape.txt").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn bitmap_dark_pixels_are_set() {
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(2, 1, Rgba([40, 40, 40, 255]));
        let grid = bitmap_to_grid(&DynamicImage::ImageRgba8(img));
        assert_eq!(grid.to_string(), ".#.\n..#");
    }

    #[test]
    fn bitmap_alpha_marks_opaque_pixels() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        img.put_pixel(0, 1, Rgba([250, 250, 250, 255]));
        let grid = bitmap_to_grid(&DynamicImage::ImageRgba8(img));
        assert_eq!(grid.to_string(), "..\n#.");
    }

    #[test]
    fn shape_stats_ratio() {
        let grid = parse_ascii("##\n#.").unwrap();
        let stats = shape_stats(&grid);
        assert_eq!(stats.cells, 3);
        assert_eq!(stats.area, 4);
        assert!((stats.fill_ratio - 0.75).abs() < 1e-9);
        assert_eq!(shape_stats(&Grid::new(0, 0)).fill_ratio, 0.0);
    }

    #[test]
    fn render_container_glyphs() {
        let catalog = Arc::new(ShapeCatalog::new());
        let bar = catalog.intern(&parse_ascii("##").unwrap()).unwrap();
        let blocked = parse_ascii("...\n..#").unwrap();
        let mut container = Container::from_blocking_pattern(&blocked, catalog);
        container.try_add(bar).unwrap();
        container.try_add(bar).unwrap();
        assert_eq!(render_container(&container), "AA.\nBB#\n");
    }
}
