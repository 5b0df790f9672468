//! Eurorack front panel outlines.
//!
//! Panel sizes follow the Doepfer A-100 mechanics: one HP is 5.0 mm wide, and a panel of
//! `u` rack units is `u * 44.45 - 4.85` mm tall to leave room for the rails.

use std::path::{Path, PathBuf};

use asmr_core::{Color, LayerSet, Point, Rectangle};
use asmr_export::{resolve_output, write_file, ExportMeta};

use crate::error::DesignError;

pub const MM_PER_HP: f64 = 5.0;
pub const MM_PER_U: f64 = 44.45;
pub const U_MARGIN: f64 = 4.85;
pub const PCB_MARGIN_X: f64 = 1.0;
pub const PCB_MARGIN_Y: f64 = 11.675;
pub const MOUNT_HOLE_DIA: f64 = 3.2;
pub const MOUNT_HOLE_X: f64 = 7.5;
pub const MOUNT_HOLE_Y: f64 = 3.0;

const LINE_WIDTH: f64 = 0.05;
const PCB_ZONE_COLOR: Color = Color::rgb(0xFF, 0, 0);

#[derive(Debug, Clone, PartialEq)]
pub struct EurorackPanel {
    hp: u32,
    u: u32,
    ovals: bool,
    pcb_zone: bool,
}

impl EurorackPanel {
    pub fn new(hp: u32, u: u32) -> Result<Self, DesignError> {
        if hp == 0 {
            return Err(DesignError::invalid("hp", "panel must be at least 1 HP wide"));
        }
        if u == 0 {
            return Err(DesignError::invalid("u", "panel must be at least 1 U tall"));
        }
        Ok(Self {
            hp,
            u,
            ovals: true,
            pcb_zone: false,
        })
    }

    /// Oval (slotted) mounting holes instead of round ones.
    #[must_use]
    pub fn with_ovals(mut self, ovals: bool) -> Self {
        self.ovals = ovals;
        self
    }

    /// Also draw the area a PCB behind the panel may occupy.
    #[must_use]
    pub fn with_pcb_zone(mut self, pcb_zone: bool) -> Self {
        self.pcb_zone = pcb_zone;
        self
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        f64::from(self.hp) * MM_PER_HP
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        f64::from(self.u) * MM_PER_U - U_MARGIN
    }

    #[must_use]
    pub fn layers(&self) -> LayerSet {
        let (w, h) = (self.width(), self.height());
        let mut layers = LayerSet::new();
        let outline = &mut layers.silkscreen;

        outline.push(Rectangle::new(Point::new(0.0, 0.0), Point::new(w, h), LINE_WIDTH).outlined());
        if self.pcb_zone {
            outline.push(
                Rectangle::new(
                    Point::new(PCB_MARGIN_X, PCB_MARGIN_Y),
                    Point::new(w - PCB_MARGIN_X, h - PCB_MARGIN_Y),
                    LINE_WIDTH,
                )
                .outlined()
                .with_color(PCB_ZONE_COLOR),
            );
        }

        let (hole_w, x_inset) = if self.ovals {
            (2.0 * MOUNT_HOLE_DIA, MOUNT_HOLE_DIA)
        } else {
            (MOUNT_HOLE_DIA, MOUNT_HOLE_DIA / 2.0)
        };
        let left = MOUNT_HOLE_X - x_inset;
        let right = w - (MOUNT_HOLE_X + x_inset);
        let top = MOUNT_HOLE_Y - MOUNT_HOLE_DIA / 2.0;
        let bottom = h - MOUNT_HOLE_Y - MOUNT_HOLE_DIA / 2.0;
        let radius = MOUNT_HOLE_DIA / 2.0;
        for (x, y) in [(left, top), (right, top), (right, bottom), (left, bottom)] {
            outline.push(
                Rectangle::new(
                    Point::new(x, y),
                    Point::new(x + hole_w, y + MOUNT_HOLE_DIA),
                    LINE_WIDTH,
                )
                .outlined()
                .with_radius(radius, radius),
            );
        }
        layers
    }

    pub fn save(&self, path: &Path) -> Result<PathBuf, DesignError> {
        let (path, format) = resolve_output(path)?;
        let meta = ExportMeta::for_path(
            &path,
            format!("Eurorack panel {} HP, {} U", self.hp, self.u),
        );
        write_file(&self.layers(), &path, format, &meta)?;
        Ok(path)
    }
}
