//! PCB artwork generators: capacitive touch grids and Eurorack panels.

pub mod capacitive;
pub mod error;
pub mod eurorack;

pub use capacitive::{
    ArrayFrame, CapacitiveGrid, CapacitiveGridGenerator, FillFormat, GridConfig, GridPattern,
    Spacing,
};
pub use error::DesignError;
pub use eurorack::EurorackPanel;
