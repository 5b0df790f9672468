//! Interdigitated comb layout.
//!
//! Every column carries a vertical trace with horizontal fingers spaced one finger pitch
//! apart. Every row carries a short vertical segment on each column boundary whose fingers
//! slot in between the column fingers. The outermost row fingers only point into the array.

use asmr_core::{Layer, Line, LineCap, Point};
use tracing::debug;

use super::pads::PadNumbering;
use super::spacing::{solve_spacing, Spacing};
use super::{ArrayFrame, GridConfig, Palette};
use crate::error::DesignError;

const EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterleavedLayout {
    pub spacing: Spacing,
    pub frame: ArrayFrame,
}

pub fn layout_interleaved(
    config: &GridConfig,
    palette: &Palette,
    electrodes: &mut Layer,
) -> Result<InterleavedLayout, DesignError> {
    let spacing = solve_spacing(config.pitch, config.xwidth, config.ywidth, config.separation)?;
    let (cols, rows) = config.size;
    let p = config.pitch;
    let (xw, yw) = (config.xwidth, config.ywidth);
    let digits = spacing.digits;
    let dy = spacing.finger_pitch;

    // Half-length of every finger; the caps add the remaining clearance.
    let reach = (p - dy) / 2.0 - config.padding;
    if reach < -EPS {
        return Err(DesignError::invalid(
            "padding",
            format!(
                "{} mm leaves no room for fingers at pitch {p} mm",
                config.padding
            ),
        ));
    }
    let reach = reach.max(0.0);

    let frame = ArrayFrame {
        origin: Point::new(config.margin + yw / 2.0, config.margin + xw / 2.0),
        pitch: p,
        size: config.size,
        extent: (
            cols as f64 * p + yw + 2.0 * config.margin,
            rows as f64 * p + xw + 2.0 * config.margin,
        ),
    };
    let pads = PadNumbering::new(config.size, config.resolution);
    let top = frame.boundary_y(0);

    for c in 0..cols {
        let group = Some(pads.x_group(c));
        let xc = frame.boundary_x(c) + p / 2.0;
        let x_line = |start: Point, end: Point, cap: LineCap| {
            Line::new(start, end, xw)
                .with_cap(cap)
                .with_color(palette.x)
                .with_group(group.clone())
        };

        electrodes.push(x_line(
            Point::new(xc, top),
            Point::new(xc, frame.boundary_y(rows)),
            LineCap::Butt,
        ));
        for k in 0..=digits * rows {
            let y = top + k as f64 * dy;
            electrodes.push(x_line(
                Point::new(xc - reach, y),
                Point::new(xc + reach, y),
                LineCap::Round,
            ));
        }
        if pads.x_ganged_with_next(c) {
            electrodes.push(x_line(
                Point::new(xc, top),
                Point::new(xc + p, top),
                LineCap::Round,
            ));
        }
    }

    for r in 0..rows {
        let group = Some(pads.y_group(r));
        let y_start = frame.boundary_y(r) + xw / 2.0 + spacing.separation + yw / 2.0;
        let y_end = y_start + (digits - 1) as f64 * dy;
        let y_line = |start: Point, end: Point, cap: LineCap| {
            Line::new(start, end, yw)
                .with_cap(cap)
                .with_color(palette.y)
                .with_group(group.clone())
        };

        for b in 0..=cols {
            let xb = frame.boundary_x(b);
            if digits > 1 {
                electrodes.push(y_line(
                    Point::new(xb, y_start),
                    Point::new(xb, y_end),
                    LineCap::Butt,
                ));
            }
            let (left, right) = if b == 0 {
                (xb, xb + reach)
            } else if b == cols {
                (xb - reach, xb)
            } else {
                (xb - reach, xb + reach)
            };
            for j in 0..digits {
                let y = y_start + j as f64 * dy;
                electrodes.push(y_line(
                    Point::new(left, y),
                    Point::new(right, y),
                    LineCap::Round,
                ));
            }
            if pads.y_ganged_with_next(r) {
                electrodes.push(y_line(
                    Point::new(xb, y_end),
                    Point::new(xb, y_start + p),
                    LineCap::Butt,
                ));
            }
        }
    }

    debug!(
        digits,
        separation = spacing.separation,
        finger_pitch = dy,
        shapes = electrodes.len(),
        "interleaved layout"
    );
    Ok(InterleavedLayout { spacing, frame })
}
