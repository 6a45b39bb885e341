use anyhow::Result;
use clap::Parser;
use raylib::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod constants;
mod engine;
mod foreground;
mod grid;
mod motion;
mod references;
mod state;
mod texture_loader;
mod wall;

use crate::cli::Cli;
use crate::engine::Engine;
use crate::foreground::Foreground;
use crate::grid::clamp_columns;
use crate::texture_loader::TextureSource;
use crate::wall::PosterWall;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    let sources = cli.sources();
    let references = sources.gather()?;
    tracing::info!(references = references.len(), columns = cli.columns, "starting poster wall");

    let (mut rl, thread) = raylib::init()
        .size(cli.width, cli.height)
        .title("Poster Wall")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(cli.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut wall = PosterWall::new(
        TextureSource,
        references,
        cli.columns,
        cli.tile_width,
        cli.tile_height,
        cli.loads_per_frame,
    );
    let mut foreground = Foreground {
        headline: cli.headline.clone(),
        subtitle: cli.subtitle.clone(),
    };

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        // Column count steps stay inside the clamp so a held key never piles up.
        let step = if rl.is_key_pressed(KeyboardKey::KEY_UP) {
            1
        } else if rl.is_key_pressed(KeyboardKey::KEY_DOWN) {
            -1
        } else {
            0
        };
        if step != 0 {
            let requested = clamp_columns(wall.grid().column_count() as i64 + step) as i64;
            wall.set_requested_columns(requested);
        }

        if rl.is_key_pressed(KeyboardKey::KEY_R) {
            match sources.gather() {
                Ok(references) => {
                    let requested = wall.requested_columns();
                    if !wall.set_inputs(&references, requested) {
                        tracing::info!("references unchanged");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "failed to reload references"),
            }
        }

        wall.update(dt, &mut rl, &thread);
        foreground.update(dt, &mut rl, &thread);

        let mut d = rl.begin_drawing(&thread);
        wall.draw(&mut d);
        foreground.draw(&mut d);
    }

    Ok(())
}
