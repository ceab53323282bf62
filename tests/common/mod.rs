//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use sectorcast::{
    config::RenderConfig,
    level::{Level, parse_level},
    renderer::{Renderer, Rgba},
};

/// One closed 10×10 room, floor 0, ceiling 3.
pub const BOX: &str = "\
box
1
0 4 1 0.0 3.0
4
0 0 10 0 0
10 0 10 10 0
10 10 0 10 0
0 10 0 0 0
3 4 0.3
";

/// Room A (y 0..4) opens through x 1..3 into room B (y 4..12), whose floor is
/// higher and ceiling lower.
pub const DOORWAY: &str = "\
doorway
2
0 6 1 0.0 4.0
6 6 2 0.5 3.0
12
0 0 4 0 0
4 0 4 4 0
4 4 3 4 0
3 4 1 4 2
1 4 0 4 0
0 4 0 0 0
0 4 1 4 0
1 4 3 4 1
3 4 4 4 0
4 4 4 12 0
4 12 0 12 0
0 12 0 4 0
2 1 0
";

/// Room A (y 0..4) reaches room B (y 4..8) through two separate portals.
pub const TWIN_PORTALS: &str = "\
twin portals
2
0 5 1 0.0 3.0
5 5 2 0.0 3.0
10
0 0 4 0 0
4 0 4 4 0
4 4 2 4 2
2 4 0 4 2
0 4 0 0 0
0 4 2 4 1
2 4 4 4 1
4 4 4 8 0
4 8 0 8 0
0 8 0 4 0
2 1 0
";

pub fn level(text: &str) -> Level {
    parse_level(text).expect("fixture parses")
}

pub fn demo_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("levels/demo.txt")
}

/// Render target that only counts how often each pixel is written.
#[derive(Default)]
pub struct Counting {
    pub w: usize,
    pub h: usize,
    pub writes: Vec<u32>,
    pub last: Vec<Rgba>,
}

impl Counting {
    pub fn begin_frame_for(&mut self, cfg: &RenderConfig) {
        self.begin_frame(cfg.width, cfg.height, cfg.background);
    }

    pub fn max_writes(&self) -> u32 {
        self.writes.iter().copied().max().unwrap_or(0)
    }

    pub fn unpainted(&self) -> usize {
        self.writes.iter().filter(|&&n| n == 0).count()
    }
}

impl Renderer for Counting {
    fn begin_frame(&mut self, w: usize, h: usize, clear: Rgba) {
        self.w = w;
        self.h = h;
        self.writes = vec![0; w * h];
        self.last = vec![clear; w * h];
    }

    fn draw_column(&mut self, x: usize, y_top: usize, y_bot: usize, colour: Rgba) {
        assert!(x < self.w, "column {x} out of range");
        assert!(y_top <= y_bot && y_bot < self.h, "rows {y_top}..={y_bot}");
        for y in y_top..=y_bot {
            self.writes[y * self.w + x] += 1;
            self.last[y * self.w + x] = colour;
        }
    }

    fn draw_line(&mut self, _x0: i32, _y0: i32, _x1: i32, _y1: i32, _colour: Rgba) {}

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.last, self.w, self.h);
    }
}
