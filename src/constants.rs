pub const ROWS_PER_COLUMN: usize = 10;         // Slots in every column
pub const MIN_COLUMNS: i64 = 4;                 // Requested column counts are clamped to this floor
pub const MAX_COLUMNS: i64 = 10;                // ... and to this ceiling
pub const DEFAULT_COLUMNS: i64 = 7;

pub const DEFAULT_TILE_WIDTH: f32 = 180.0;      // Tile size in pixels (layout only)
pub const DEFAULT_TILE_HEIGHT: f32 = 270.0;
pub const TILE_GAP: f32 = 16.0;                 // Gap between columns and between tiles of a column
pub const TILE_ROUNDNESS: f32 = 0.12;           // Corner roundness passed to raylib (0..1)

pub const WALL_SCALE: f32 = 1.4;                // Wall area relative to the viewport, centred

pub const BASE_DURATION: f32 = 18.0;            // Seconds for one leg of column 0
pub const DURATION_STEP: f32 = 6.0;             // Added per column, cycling every 4 columns
pub const BASE_DRIFT: f32 = 42.0;               // Pixels of drift for column 0
pub const DRIFT_STEP: f32 = 18.0;               // Added per column, cycling every 3 columns

pub const POSTER_OPACITY: f32 = 0.80;
pub const TILE_FILL_ALPHA: f32 = 0.03;
pub const TILE_BORDER_ALPHA: f32 = 0.10;
pub const TILE_SHADE_ALPHA: f32 = 0.35;         // Dark overlay drawn over every tile
pub const POSTER_FADE_IN: f32 = 0.6;            // Seconds for a freshly loaded poster to fade in

pub const DEFAULT_WINDOW_WIDTH: i32 = 1280;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 720;
pub const DEFAULT_FPS: u32 = 60;
pub const DEFAULT_LOADS_PER_FRAME: usize = 2;

pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];
