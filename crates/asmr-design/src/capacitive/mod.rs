//! Capacitive touch-grid generator.
//!
//! A grid is described by a [`GridConfig`], laid out as interleaved combs or diamonds into an
//! electrode layer, framed by a solder mask and a silkscreen reference grid, and written as
//! SVG or as a KiCad footprint.

use asmr_core::{Color, Point};
use serde::Serialize;

pub mod config;
pub mod diamond;
pub mod grid;
pub mod interleaved;
pub mod pads;
pub mod perimeter;
pub mod spacing;

pub use config::{AxisFill, FillFormat, GridConfig, GridPattern};
pub use grid::{CapacitiveGrid, CapacitiveGridGenerator};
pub use pads::{PadNumbering, Polarity};
pub use spacing::{solve_spacing, Spacing};

/// Placement of the node array inside the artwork.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArrayFrame {
    /// Top-left corner of node (0, 0).
    pub origin: Point,
    pub pitch: f64,
    pub size: (usize, usize),
    /// Width and height of the whole artwork, margins included.
    pub extent: (f64, f64),
}

impl ArrayFrame {
    /// X coordinate of the `b`-th vertical node boundary.
    #[must_use]
    pub fn boundary_x(&self, b: usize) -> f64 {
        self.origin.x + b as f64 * self.pitch
    }

    #[must_use]
    pub fn boundary_y(&self, b: usize) -> f64 {
        self.origin.y + b as f64 * self.pitch
    }

    /// Top-left and bottom-right corner of node `(column, row)`.
    #[must_use]
    pub fn cell(&self, column: usize, row: usize) -> (Point, Point) {
        (
            Point::new(self.boundary_x(column), self.boundary_y(row)),
            Point::new(self.boundary_x(column + 1), self.boundary_y(row + 1)),
        )
    }
}

/// Colors used for each kind of artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub x: Color,
    pub y: Color,
    pub mask: Color,
    pub silkscreen: Color,
}

impl Palette {
    pub const X_ELECTRODE: Color = Color::rgb(0xD8, 0x1B, 0x60);
    pub const Y_ELECTRODE: Color = Color::rgb(0x1E, 0x88, 0xE5);

    /// Black electrodes unless `use_color` asks for one color per polarity.
    #[must_use]
    pub fn new(use_color: bool) -> Self {
        let (x, y) = if use_color {
            (Self::X_ELECTRODE, Self::Y_ELECTRODE)
        } else {
            (Color::BLACK, Color::BLACK)
        };
        Self {
            x,
            y,
            mask: Color::BLACK.with_alpha(0x40),
            silkscreen: Color::rgb(0x80, 0x80, 0x80),
        }
    }
}
