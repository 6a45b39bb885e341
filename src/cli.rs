use clap::Parser;
use std::path::PathBuf;

use crate::constants::*;
use crate::references::ReferenceSources;

#[derive(Parser, Debug)]
#[command(name = "poster-wall")]
#[command(author, version, about = "Animated wall of posters scrolling behind foreground text")]
pub struct Cli {
    /// Image references (paths to image files)
    pub references: Vec<String>,

    /// File with one image reference per line
    #[arg(long, env = "POSTER_WALL_LIST")]
    pub list: Option<PathBuf>,

    /// Directory scanned for png, jpg, jpeg, bmp and gif files
    #[arg(long, env = "POSTER_WALL_DIR")]
    pub dir: Option<PathBuf>,

    /// Requested column count, clamped to 4..=10
    #[arg(short, long, env = "POSTER_WALL_COLUMNS", default_value_t = DEFAULT_COLUMNS, allow_negative_numbers = true)]
    pub columns: i64,

    /// Tile width in pixels
    #[arg(long, default_value_t = DEFAULT_TILE_WIDTH)]
    pub tile_width: f32,

    /// Tile height in pixels
    #[arg(long, default_value_t = DEFAULT_TILE_HEIGHT)]
    pub tile_height: f32,

    /// Posters decoded per frame while the wall fills in
    #[arg(long, default_value_t = DEFAULT_LOADS_PER_FRAME)]
    pub loads_per_frame: usize,

    /// Headline drawn over the wall
    #[arg(long)]
    pub headline: Option<String>,

    /// Smaller line drawn under the headline
    #[arg(long)]
    pub subtitle: Option<String>,

    /// Initial window width
    #[arg(long, default_value_t = DEFAULT_WINDOW_WIDTH)]
    pub width: i32,

    /// Initial window height
    #[arg(long, default_value_t = DEFAULT_WINDOW_HEIGHT)]
    pub height: i32,

    /// Target frames per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,
}

impl Cli {
    pub fn sources(&self) -> ReferenceSources {
        ReferenceSources {
            inline: self.references.clone(),
            list_file: self.list.clone(),
            directory: self.dir.clone(),
        }
    }
}
