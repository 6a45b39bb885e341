use raylib::prelude::*;

/// One layer of the screen, updated then drawn once per frame.
pub trait Engine {
    fn update(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread);
    fn draw(&self, d: &mut RaylibDrawHandle);
}
