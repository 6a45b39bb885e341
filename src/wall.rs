//! Render/compose layer for the poster grid.
//!
//! The wall owns the memoized grid, the column descriptors and one
//! [`TileState`] per distinct reference. Empty slots draw only the tile
//! frame; a reference whose image fails to resolve is hidden for the rest
//! of the wall's life.

use std::collections::HashMap;
use raylib::prelude::*;

use crate::constants::*;
use crate::engine::Engine;
use crate::grid::{Grid, GridMemo, Slot};
use crate::motion::{descriptors_for, AnimationDescriptor};
use crate::state::TileState;
use crate::texture_loader::ImageSource;

pub struct TileBook<H> {
    states: HashMap<String, TileState<H>>,
    order: Vec<String>,
}

impl<H> Default for TileBook<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> TileBook<H> {
    pub fn new() -> Self {
        Self { states: HashMap::new(), order: Vec::new() }
    }

    /// Track the references of a freshly built grid.
    ///
    /// New references start pending. Loaded handles the grid no longer uses
    /// are released; hidden references stay hidden. Hidden entries are never
    /// dropped, so the book grows by one small entry per failing locator
    /// seen over the wall's lifetime, including across reloads.
    pub fn sync(&mut self, grid: &Grid) {
        let wanted = grid.distinct_references();

        self.states.retain(|reference, state| {
            matches!(state, TileState::Hidden) || wanted.contains(&reference.as_str())
        });
        for reference in &wanted {
            self.states.entry(reference.to_string()).or_insert(TileState::Pending);
        }
        self.order = wanted.into_iter().map(str::to_string).collect();
    }

    /// Up to `budget` pending references, in grid order.
    pub fn pending(&self, budget: usize) -> Vec<String> {
        self.order
            .iter()
            .filter(|reference| matches!(self.states.get(*reference), Some(TileState::Pending)))
            .take(budget)
            .cloned()
            .collect()
    }

    pub fn settle<E>(&mut self, reference: &str, outcome: Result<H, E>, now: f64) {
        let state = match outcome {
            Ok(handle) => TileState::Ready { handle, since: now },
            Err(_) => TileState::Hidden,
        };
        self.states.insert(reference.to_string(), state);
    }

    pub fn state(&self, reference: &str) -> Option<&TileState<H>> {
        self.states.get(reference)
    }
}

/// Screen placement of the columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallLayout {
    pub left: f32,
    pub top: f32,
    pub tile_width: f32,
    pub tile_height: f32,
}

impl WallLayout {
    /// Columns sit side by side with `TILE_GAP` between them, the block
    /// centred both ways inside a wall area `WALL_SCALE` times the screen.
    pub fn compute(screen_width: f32, screen_height: f32, columns: usize, tile_width: f32, tile_height: f32) -> Self {
        let area_width = screen_width * WALL_SCALE;
        let area_height = screen_height * WALL_SCALE;
        let area_x = (screen_width - area_width) * 0.5;
        let area_y = (screen_height - area_height) * 0.5;

        let block_width = columns as f32 * tile_width + columns.saturating_sub(1) as f32 * TILE_GAP;
        let column_height = ROWS_PER_COLUMN as f32 * tile_height + (ROWS_PER_COLUMN - 1) as f32 * TILE_GAP;

        Self {
            left: area_x + (area_width - block_width) * 0.5,
            top: area_y + (area_height - column_height) * 0.5,
            tile_width,
            tile_height,
        }
    }

    pub fn tile_rect(&self, column: usize, row: usize, offset: f32) -> Rectangle {
        Rectangle::new(
            self.left + column as f32 * (self.tile_width + TILE_GAP),
            self.top + row as f32 * (self.tile_height + TILE_GAP) + offset,
            self.tile_width,
            self.tile_height,
        )
    }
}

/// Source rectangle that crops a texture to fill a tile, keeping aspect.
pub fn cover_source(texture_width: f32, texture_height: f32, tile_width: f32, tile_height: f32) -> Rectangle {
    let scale = (tile_width / texture_width).max(tile_height / texture_height);
    let width = tile_width / scale;
    let height = tile_height / scale;
    Rectangle::new((texture_width - width) * 0.5, (texture_height - height) * 0.5, width, height)
}

pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t.clamp(0.0, 1.0)).round() as u8;
    Color::new(mix(from.r, to.r), mix(from.g, to.g), mix(from.b, to.b), mix(from.a, to.a))
}

/// Splits a rounded tile into three non-overlapping strips that leave out
/// the corner squares: a full-height centre strip and two side strips.
///
/// The corner radius matches raylib's rounded rectangles, which use
/// `roundness` times half the shorter side.
pub fn corner_free_strips(rect: Rectangle, roundness: f32) -> [Rectangle; 3] {
    let radius = rect.width.min(rect.height) * roundness * 0.5;
    let inner_height = rect.height - 2.0 * radius;
    [
        Rectangle::new(rect.x + radius, rect.y, rect.width - 2.0 * radius, rect.height),
        Rectangle::new(rect.x, rect.y + radius, radius, inner_height),
        Rectangle::new(rect.x + rect.width - radius, rect.y + radius, radius, inner_height),
    ]
}

/// The part of `strip` inside the vertical span of `band`, if any.
fn clip_to_band(strip: Rectangle, band: Rectangle) -> Option<Rectangle> {
    let top = strip.y.max(band.y);
    let bottom = (strip.y + strip.height).min(band.y + band.height);
    (bottom > top && strip.width > 0.0).then(|| Rectangle::new(strip.x, top, strip.width, bottom - top))
}

/// Vertical gradient spanning `band`, drawn only where it meets the tile's
/// corner-free strips so nothing spills past the rounded frame.
fn draw_rounded_gradient_v(d: &mut RaylibDrawHandle, tile: Rectangle, band: Rectangle, top: Color, bottom: Color) {
    for strip in corner_free_strips(tile, TILE_ROUNDNESS) {
        if let Some(part) = clip_to_band(strip, band) {
            let t0 = (part.y - band.y) / band.height;
            let t1 = (part.y + part.height - band.y) / band.height;
            d.draw_rectangle_gradient_v(
                part.x.round() as i32,
                part.y.round() as i32,
                part.width.round() as i32,
                part.height.round() as i32,
                lerp_color(top, bottom, t0),
                lerp_color(top, bottom, t1),
            );
        }
    }
}

pub struct PosterWall<S: ImageSource> {
    source: S,
    memo: GridMemo,
    descriptors: Vec<AnimationDescriptor>,
    book: TileBook<S::Handle>,
    tile_width: f32,
    tile_height: f32,
    loads_per_frame: usize,
    clock: f64,
}

impl<S: ImageSource> PosterWall<S> {
    pub fn new(source: S, references: Vec<String>, requested_columns: i64, tile_width: f32, tile_height: f32, loads_per_frame: usize) -> Self {
        let memo = GridMemo::new(references, requested_columns);
        let descriptors = descriptors_for(memo.grid().column_count());
        let mut book = TileBook::new();
        book.sync(memo.grid());

        tracing::info!(
            columns = memo.grid().column_count(),
            slots = memo.grid().total_slots(),
            references = memo.grid().distinct_references().len(),
            "poster wall ready"
        );
        if memo.grid().is_blank() {
            tracing::info!("no usable references, showing empty tiles");
        }

        Self {
            source,
            memo,
            descriptors,
            book,
            tile_width,
            tile_height,
            loads_per_frame: loads_per_frame.max(1),
            clock: 0.0,
        }
    }

    pub fn grid(&self) -> &Grid {
        self.memo.grid()
    }

    pub fn requested_columns(&self) -> i64 {
        self.memo.requested_columns()
    }

    /// Feed new inputs. The grid and descriptors are replaced wholesale
    /// when anything changed.
    pub fn set_inputs(&mut self, references: &[String], requested_columns: i64) -> bool {
        if !self.memo.update(references, requested_columns) {
            return false;
        }
        self.rebuilt();
        true
    }

    pub fn set_requested_columns(&mut self, requested_columns: i64) -> bool {
        if !self.memo.set_requested_columns(requested_columns) {
            return false;
        }
        self.rebuilt();
        true
    }

    fn rebuilt(&mut self) {
        let grid = self.memo.grid();
        self.descriptors = descriptors_for(grid.column_count());
        self.book.sync(grid);
        tracing::info!(
            columns = grid.column_count(),
            references = grid.distinct_references().len(),
            "poster grid rebuilt"
        );
    }
}

impl<S: ImageSource<Handle = Texture2D>> PosterWall<S> {
    fn draw_tile(&self, d: &mut RaylibDrawHandle, rect: Rectangle, slot: &Slot) {
        d.draw_rectangle_rounded(rect, TILE_ROUNDNESS, 8, with_alpha(Color::WHITE, TILE_FILL_ALPHA));

        if let Some(TileState::Ready { handle, since }) = slot.reference().and_then(|r| self.book.state(r)) {
            let fade = ((self.clock - since) as f32 / POSTER_FADE_IN).clamp(0.0, 1.0);
            d.draw_texture_pro(
                handle,
                cover_source(handle.width() as f32, handle.height() as f32, rect.width, rect.height),
                rect,
                Vector2::new(0.0, 0.0),
                0.0,
                with_alpha(Color::WHITE, POSTER_OPACITY * fade),
            );
        }

        d.draw_rectangle_rounded(rect, TILE_ROUNDNESS, 8, with_alpha(Color::BLACK, TILE_SHADE_ALPHA));

        // Top highlight fading to a darker bottom edge.
        let half = rect.height * 0.5;
        let upper = Rectangle::new(rect.x, rect.y, rect.width, half);
        let lower = Rectangle::new(rect.x, rect.y + half, rect.width, rect.height - half);
        draw_rounded_gradient_v(d, rect, upper, with_alpha(Color::WHITE, 0.10), with_alpha(Color::WHITE, 0.0));
        draw_rounded_gradient_v(d, rect, lower, with_alpha(Color::BLACK, 0.0), with_alpha(Color::BLACK, 0.20));

        d.draw_rectangle_rounded_lines(rect, TILE_ROUNDNESS, 8, with_alpha(Color::WHITE, TILE_BORDER_ALPHA));
    }

    fn draw_overlays(&self, d: &mut RaylibDrawHandle, screen_width: i32, screen_height: i32) {
        let (sw, sh) = (screen_width, screen_height);

        // Edge fade standing in for the radial mask around the wall.
        let band_x = (sw as f32 * 0.22) as i32;
        let band_y = (sh as f32 * 0.22) as i32;
        let clear = with_alpha(Color::BLACK, 0.0);
        d.draw_rectangle_gradient_h(0, 0, band_x, sh, Color::BLACK, clear);
        d.draw_rectangle_gradient_h(sw - band_x, 0, band_x, sh, clear, Color::BLACK);
        d.draw_rectangle_gradient_v(0, 0, sw, band_y, Color::BLACK, clear);
        d.draw_rectangle_gradient_v(0, sh - band_y, sw, band_y, clear, Color::BLACK);

        // Readability vignette.
        d.draw_rectangle_gradient_v(0, 0, sw, sh / 2, with_alpha(Color::BLACK, 0.70), with_alpha(Color::BLACK, 0.45));
        d.draw_rectangle_gradient_v(0, sh / 2, sw, sh - sh / 2, with_alpha(Color::BLACK, 0.45), with_alpha(Color::BLACK, 0.75));

        d.draw_circle_gradient(
            (sw as f32 * 0.30) as i32,
            (sh as f32 * 0.20) as i32,
            sw.max(sh) as f32 * 0.35,
            with_alpha(Color::WHITE, 0.06),
            with_alpha(Color::WHITE, 0.0),
        );
    }
}

impl<S: ImageSource<Handle = Texture2D>> Engine for PosterWall<S> {
    fn update(&mut self, _dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread) {
        self.clock = rl.get_time();

        for reference in self.book.pending(self.loads_per_frame) {
            let outcome = self.source.resolve(rl, thread, &reference);
            if let Err(e) = &outcome {
                tracing::debug!(reference = %reference, error = %e, "hiding poster");
            }
            self.book.settle(&reference, outcome, self.clock);
        }
    }

    fn draw(&self, d: &mut RaylibDrawHandle) {
        let screen_width = d.get_screen_width();
        let screen_height = d.get_screen_height();
        let grid = self.memo.grid();
        let layout = WallLayout::compute(
            screen_width as f32,
            screen_height as f32,
            grid.column_count(),
            self.tile_width,
            self.tile_height,
        );

        d.clear_background(Color::BLACK);

        for (column_index, descriptor) in self.descriptors.iter().enumerate() {
            let Some(column) = grid.column(column_index) else {
                continue;
            };
            let offset = descriptor.offset_at(self.clock);
            for (row, slot) in column.iter().enumerate() {
                let rect = layout.tile_rect(column_index, row, offset);
                let visible = rect.x + rect.width >= 0.0
                    && rect.x <= screen_width as f32
                    && rect.y + rect.height >= 0.0
                    && rect.y <= screen_height as f32;
                if visible {
                    self.draw_tile(d, rect, slot);
                }
            }
        }

        self.draw_overlays(d, screen_width, screen_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(references: &[&str], columns: i64) -> Grid {
        Grid::build(references, columns)
    }

    #[test]
    fn book_loads_in_grid_order_with_budget() {
        let mut book: TileBook<u32> = TileBook::new();
        book.sync(&grid(&["a", "b", "a", "c"], 4));
        assert_eq!(book.pending(2), vec!["a", "b"]);
        assert_eq!(book.pending(10), vec!["a", "b", "c"]);

        book.settle::<()>("a", Ok(1), 0.5);
        assert_eq!(book.pending(2), vec!["b", "c"]);
        assert_eq!(book.state("a"), Some(&TileState::Ready { handle: 1, since: 0.5 }));
    }

    #[test]
    fn failed_reference_stays_hidden_across_rebuilds() {
        let mut book: TileBook<u32> = TileBook::new();
        book.sync(&grid(&["a", "broken"], 4));
        book.settle("broken", Err("unreadable"), 0.0);
        assert_eq!(book.state("broken"), Some(&TileState::Hidden));
        assert_eq!(book.pending(10), vec!["a"]);

        book.sync(&grid(&["broken", "a"], 6));
        assert_eq!(book.state("broken"), Some(&TileState::Hidden));
        assert!(!book.pending(10).contains(&"broken".to_string()));
    }

    #[test]
    fn unused_handles_are_released() {
        let mut book: TileBook<u32> = TileBook::new();
        book.sync(&grid(&["a", "b"], 4));
        book.settle::<()>("a", Ok(7), 0.0);
        book.sync(&grid(&["b"], 4));
        assert!(book.state("a").is_none());
        assert_eq!(book.state("b"), Some(&TileState::Pending));
    }

    #[test]
    fn empty_grid_has_nothing_to_load() {
        let mut book: TileBook<u32> = TileBook::new();
        book.sync(&grid(&[], 12));
        assert!(book.pending(10).is_empty());
    }

    #[test]
    fn layout_centres_the_block() {
        let layout = WallLayout::compute(1920.0, 1080.0, 7, 180.0, 270.0);
        let block_width = 7.0 * 180.0 + 6.0 * TILE_GAP;
        let column_height = 10.0 * 270.0 + 9.0 * TILE_GAP;
        assert!((layout.left - (1920.0 - block_width) / 2.0).abs() < 1e-3);
        assert!((layout.top - (1080.0 - column_height) / 2.0).abs() < 1e-3);

        let last = layout.tile_rect(6, 9, 0.0);
        assert!((last.x + last.width - (layout.left + block_width)).abs() < 1e-3);
        assert!((last.y + last.height - (layout.top + column_height)).abs() < 1e-3);

        let shifted = layout.tile_rect(0, 0, -42.0);
        assert!((shifted.y - (layout.top - 42.0)).abs() < 1e-3);
    }

    #[test]
    fn cover_crops_the_long_side() {
        // Wide image into a tall tile: crop the width.
        let src = cover_source(1000.0, 500.0, 180.0, 270.0);
        assert!((src.height - 500.0).abs() < 1e-3);
        assert!((src.width - 500.0 * 180.0 / 270.0).abs() < 1e-3);
        assert!((src.x - (1000.0 - src.width) / 2.0).abs() < 1e-3);
        assert_eq!(src.y, 0.0);

        // Exact aspect: the whole texture.
        let src = cover_source(360.0, 540.0, 180.0, 270.0);
        assert!((src.width - 360.0).abs() < 1e-3 && (src.height - 540.0).abs() < 1e-3);
    }

    #[test]
    fn corner_strips_stay_inside_the_rounded_frame() {
        let tile = Rectangle::new(10.0, 20.0, 180.0, 270.0);
        let radius = 180.0 * TILE_ROUNDNESS * 0.5;
        let strips = corner_free_strips(tile, TILE_ROUNDNESS);

        // Together they cover the tile minus its four corner squares.
        let area: f32 = strips.iter().map(|s| s.width * s.height).sum();
        assert!((area - (180.0 * 270.0 - 4.0 * radius * radius)).abs() < 1e-2);

        // No strip reaches into a corner square.
        let corners = [
            (tile.x, tile.y),
            (tile.x + tile.width - radius, tile.y),
            (tile.x, tile.y + tile.height - radius),
            (tile.x + tile.width - radius, tile.y + tile.height - radius),
        ];
        for strip in &strips {
            for (cx, cy) in corners {
                let overlap_x = (strip.x + strip.width).min(cx + radius) - strip.x.max(cx);
                let overlap_y = (strip.y + strip.height).min(cy + radius) - strip.y.max(cy);
                assert!(overlap_x <= 1e-3 || overlap_y <= 1e-3, "{strip:?} touches corner at ({cx}, {cy})");
            }
        }

        // And they never overlap each other, so alpha is not doubled.
        assert!(strips[1].x + strips[1].width <= strips[0].x + 1e-3);
        assert!(strips[0].x + strips[0].width <= strips[2].x + 1e-3);
    }

    #[test]
    fn gradient_halves_clip_to_their_band() {
        let tile = Rectangle::new(0.0, 0.0, 180.0, 270.0);
        let upper = Rectangle::new(0.0, 0.0, 180.0, 135.0);
        let [centre, left, _] = corner_free_strips(tile, TILE_ROUNDNESS);

        let part = clip_to_band(centre, upper).unwrap();
        assert_eq!((part.y, part.height), (0.0, 135.0));
        let part = clip_to_band(left, upper).unwrap();
        assert!(part.y > 0.0 && (part.y + part.height - 135.0).abs() < 1e-3);

        let below = Rectangle::new(0.0, 300.0, 180.0, 10.0);
        assert!(clip_to_band(centre, below).is_none());
    }

    #[test]
    fn gradient_colour_is_interpolated() {
        let top = with_alpha(Color::WHITE, 0.10);
        let bottom = with_alpha(Color::WHITE, 0.0);
        assert_eq!(lerp_color(top, bottom, 0.0).a, top.a);
        assert_eq!(lerp_color(top, bottom, 1.0).a, 0);
        assert_eq!(lerp_color(top, bottom, 0.5).a, 13);
    }

    #[test]
    fn default_book_is_empty() {
        let book: TileBook<u32> = TileBook::default();
        assert!(book.pending(10).is_empty());
        assert!(book.state("a").is_none());
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(with_alpha(Color::WHITE, 2.0).a, 255);
        assert_eq!(with_alpha(Color::WHITE, -1.0).a, 0);
        assert_eq!(with_alpha(Color::BLACK, 0.35).a, 89);
    }
}
