//! Hatch fill for partially filled diamonds.
//!
//! Each hatch line runs between two rails that slide along the diamond's edges. For a whole
//! diamond both rails follow the edges adjacent to the line's direction; for a half-diamond one
//! rail slides along the flat edge instead (at twice the speed, since the flat edge is the full
//! diagonal), so the lines end exactly on the truncated outline.

use crate::shape::{Cutoff, Diamond, Line, LineCap, Point};

#[derive(Debug, Clone, Copy)]
struct Rail {
    origin: Point,
    step: (f64, f64),
}

impl Rail {
    fn new(origin: Point, step: (f64, f64)) -> Self {
        Self { origin, step }
    }

    fn at(&self, i: f64, delta: f64) -> Point {
        self.origin
            .offset(self.step.0 * i * delta, self.step.1 * i * delta)
    }
}

/// Number of hatch intervals per orientation: `floor(side / stroke * fill)`.
///
/// Zero when the diamond is an outline, solid, or has no stroke to hatch with.
#[must_use]
pub fn hatch_intervals(diamond: &Diamond) -> usize {
    if !diamond.is_hatched() || diamond.stroke_width() <= 0.0 {
        return 0;
    }
    let n = (diamond.side_length() / diamond.stroke_width() * diamond.fill()).floor();
    if n.is_finite() && n > 0.0 {
        n as usize
    } else {
        0
    }
}

pub(crate) fn fill_lines(diamond: &Diamond) -> Vec<Line> {
    let n = hatch_intervals(diamond);
    if n < 2 {
        return Vec::new();
    }
    let delta = diamond.side_length() / n as f64 / std::f64::consts::SQRT_2;
    let pattern = diamond.pattern();

    let mut rails = Vec::with_capacity(2);
    if pattern.has_forward() {
        rails.push(forward_rails(diamond));
    }
    if pattern.has_backward() {
        rails.push(backward_rails(diamond));
    }

    let mut lines = Vec::with_capacity(rails.len() * (n - 1));
    for (start, end) in rails {
        for i in 1..n {
            let i = i as f64;
            lines.push(
                Line::new(start.at(i, delta), end.at(i, delta), diamond.stroke_width())
                    .with_color(diamond.color())
                    .with_cap(LineCap::Round)
                    .with_group(diamond.group().map(str::to_string)),
            );
        }
    }
    lines
}

// '/' lines, parallel to the top-left edge.
fn forward_rails(diamond: &Diamond) -> (Rail, Rail) {
    let [top, _, _, left] = diamond.vertices();
    let mut start = Rail::new(top, (1.0, 1.0));
    let mut end = Rail::new(left, (1.0, 1.0));
    match diamond.cutoff() {
        Cutoff::None => {}
        Cutoff::Top => start = Rail::new(left, (2.0, 0.0)),
        Cutoff::Right => start.step = (0.0, 2.0),
        Cutoff::Bottom => end.step = (2.0, 0.0),
        Cutoff::Left => end.step = (0.0, 2.0),
    }
    (start, end)
}

// '\' lines, parallel to the top-right edge.
fn backward_rails(diamond: &Diamond) -> (Rail, Rail) {
    let [top, right, _, _] = diamond.vertices();
    let mut start = Rail::new(top, (-1.0, 1.0));
    let mut end = Rail::new(right, (-1.0, 1.0));
    match diamond.cutoff() {
        Cutoff::None => {}
        Cutoff::Top => start.step = (-2.0, 0.0),
        Cutoff::Right => end = Rail::new(top, (0.0, 2.0)),
        Cutoff::Bottom => end.step = (-2.0, 0.0),
        Cutoff::Left => start.step = (0.0, 2.0),
    }
    (start, end)
}
