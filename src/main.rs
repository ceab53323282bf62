//! First-person viewer for sector/portal levels.
//!
//! ```bash
//! cargo run --release -- levels/demo.txt --width 960 --height 600
//! ```
//!
//! ↑/W ↓/S move, ←/→ turn, Alt+←/→ or A/D strafe, Tab toggles the minimap.

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use clap::Parser;
use log::{LevelFilter, info};
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use sectorcast::{
    config::RenderConfig,
    engine::{FrameStats, render_frame},
    level::load_level,
    renderer::{Renderer, Software, draw_minimap},
    sim::{Actions, FrameInput, apply_input},
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Level description to load
    #[arg(value_name = "FILE", default_value = "levels/demo.txt")]
    level: PathBuf,

    /// Frame-buffer width in pixels
    #[arg(long, default_value_t = 640)]
    width: usize,

    /// Frame-buffer height in pixels
    #[arg(long, default_value_t = 480)]
    height: usize,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 90.0)]
    fov: f32,

    /// Window pixel scale: 1, 2 or 4
    #[arg(long, default_value_t = 1)]
    scale: u8,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    verbose: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    TermLogger::init(
        opts.verbose,
        ConfigBuilder::default()
            .set_time_level(LevelFilter::Trace)
            .build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let level = load_level(&opts.level)?;
    info!(
        "level '{}': {} sectors, {} walls",
        level.name,
        level.world.sectors.len(),
        level.world.walls.len()
    );

    let cfg = RenderConfig {
        hfov: opts.fov.clamp(10.0, 170.0).to_radians(),
        ..RenderConfig::default().with_size(opts.width.max(1), opts.height.max(1))
    };
    let mut camera = level.camera(cfg.eye_height);
    info!("spawn in sector {} at {:?}", camera.sector, camera.pos);

    let scale = match opts.scale {
        2 => Scale::X2,
        4 => Scale::X4,
        _ => Scale::X1,
    };
    let mut win = Window::new(
        &format!("sectorcast - {}", level.name),
        cfg.width,
        cfg.height,
        WindowOptions {
            scale,
            ..WindowOptions::default()
        },
    )?;
    win.set_target_fps(60);

    let mut renderer = Software::default();
    let mut show_map = false;
    let mut last_frame = Instant::now();

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();
    let mut stats = FrameStats::default();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32().min(0.1);
        last_frame = now;

        /* --------------- input -------------------------------------------- */
        apply_input(&mut camera, &FrameInput::new(read_actions(&win), dt));
        if win.is_key_pressed(Key::Tab, KeyRepeat::No) {
            show_map = !show_map;
        }

        /* --------------- draw --------------------------------------------- */
        let t0 = Instant::now();
        if show_map {
            camera.relocate(&level.world, cfg.eye_height);
            draw_minimap(&level.world, &camera, &cfg, &mut renderer);
        } else {
            stats = render_frame(&level.world, &mut camera, &cfg, &mut renderer);
        }
        acc_time += t0.elapsed();
        acc_frames += 1;

        let mut shown = Ok(());
        renderer.end_frame(|fb, w, h| shown = win.update_with_buffer(fb, w, h));
        shown?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            info!(
                "avg render: {:.2} ms ({:.1} FPS)  sector {}  {} sectors / {} walls / {} columns",
                avg_ms,
                1000.0 / avg_ms,
                camera.sector,
                stats.sectors_visited,
                stats.walls_visible,
                stats.columns_drawn
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

/// Held keys → actions for this frame.
fn read_actions(win: &Window) -> Actions {
    let mut actions = Actions::empty();
    let down = |k: Key| win.is_key_down(k);

    actions.set(Actions::FORWARD, down(Key::Up) || down(Key::W));
    actions.set(Actions::BACK, down(Key::Down) || down(Key::S));

    /* Alt + ←/→ = strafe, plain ←/→ = turn */
    let alt = down(Key::LeftAlt) || down(Key::RightAlt);
    actions.set(Actions::TURN_LEFT, !alt && down(Key::Left));
    actions.set(Actions::TURN_RIGHT, !alt && down(Key::Right));
    actions.set(Actions::STRAFE_LEFT, (alt && down(Key::Left)) || down(Key::A));
    actions.set(Actions::STRAFE_RIGHT, (alt && down(Key::Right)) || down(Key::D));

    actions
}
