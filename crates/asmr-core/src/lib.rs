//! Intermediate representation of graphical shapes for PCB artwork.
//!
//! Shapes are plain values in millimeters with the origin at the top-left corner. They are
//! translated into output formats (SVG, KiCad footprints) by `asmr-export`.

pub mod color;
pub mod hatch;
pub mod layer;
pub mod shape;

pub use color::{Color, ColorError};
pub use layer::{Layer, LayerKind, LayerSet};
pub use shape::{
    Bounds, Cutoff, Diamond, DiamondParams, HatchPattern, Line, LineCap, Point, Rectangle, Shape,
    ShapeError,
};
