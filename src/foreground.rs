use raylib::prelude::*;

use crate::engine::Engine;

/// Foreground text laid over the wall.
pub struct Foreground {
    pub headline: Option<String>,
    pub subtitle: Option<String>,
}

impl Engine for Foreground {
    fn update(&mut self, _dt: f32, _rl: &mut RaylibHandle, _thread: &RaylibThread) {}

    fn draw(&self, d: &mut RaylibDrawHandle) {
        let center_x = d.get_screen_width() / 2;
        let center_y = d.get_screen_height() / 2;

        if let Some(headline) = &self.headline {
            let width = d.measure_text(headline, 48);
            d.draw_text(headline, center_x - width / 2, center_y - 48, 48, Color::WHITE);
        }
        if let Some(subtitle) = &self.subtitle {
            let width = d.measure_text(subtitle, 22);
            d.draw_text(subtitle, center_x - width / 2, center_y + 12, 22, Color::LIGHTGRAY);
        }
    }
}
