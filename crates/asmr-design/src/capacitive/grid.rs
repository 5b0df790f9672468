use std::path::{Path, PathBuf};

use asmr_core::LayerSet;
use asmr_export::{resolve_output, write_file, ExportMeta};
use tracing::debug;

use super::diamond::layout_diamond;
use super::interleaved::layout_interleaved;
use super::pads::PadNumbering;
use super::perimeter::{copy_electrodes_to_mask, layout_mask_openings, layout_silkscreen};
use super::{ArrayFrame, GridConfig, GridPattern, Palette, Spacing};
use crate::error::DesignError;

/// A fully laid out touch grid.
///
/// Layers are filled once on construction and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacitiveGrid {
    pattern: GridPattern,
    config: GridConfig,
    spacing: Option<Spacing>,
    frame: ArrayFrame,
    layers: LayerSet,
}

impl CapacitiveGrid {
    pub fn build(pattern: GridPattern, config: GridConfig) -> Result<Self, DesignError> {
        let fill = config.validate()?;
        let palette = Palette::new(config.use_color);
        let mut layers = LayerSet::new();

        let (spacing, frame) = match pattern {
            GridPattern::Interleaved => {
                let out = layout_interleaved(&config, &palette, &mut layers.electrodes)?;
                (Some(out.spacing), out.frame)
            }
            GridPattern::Diamond => (
                None,
                layout_diamond(&config, &fill, &palette, &mut layers.electrodes)?,
            ),
        };

        if config.mask_electrode_x || config.mask_electrode_y {
            let pads = PadNumbering::new(config.size, config.resolution);
            copy_electrodes_to_mask(
                &layers.electrodes,
                &pads,
                config.mask_electrode_x,
                config.mask_electrode_y,
                &mut layers.solder_mask,
            );
        } else {
            layout_mask_openings(&frame, config.padding, palette.mask, &mut layers.solder_mask);
        }
        layout_silkscreen(&frame, config.silk_scaling, palette.silkscreen, &mut layers.silkscreen);

        debug!(
            %pattern,
            electrodes = layers.electrodes.len(),
            solder_mask = layers.solder_mask.len(),
            silkscreen = layers.silkscreen.len(),
            "touch grid laid out"
        );
        Ok(Self {
            pattern,
            config,
            spacing,
            frame,
            layers,
        })
    }

    #[must_use]
    pub fn pattern(&self) -> GridPattern {
        self.pattern
    }

    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Solved finger spacing, interleaved grids only.
    #[must_use]
    pub fn spacing(&self) -> Option<&Spacing> {
        self.spacing.as_ref()
    }

    /// Clearance between opposite electrodes as laid out.
    #[must_use]
    pub fn separation(&self) -> f64 {
        self.spacing
            .map_or(self.config.separation, |s| s.separation)
    }

    #[must_use]
    pub fn frame(&self) -> &ArrayFrame {
        &self.frame
    }

    #[must_use]
    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    #[must_use]
    pub fn into_layers(self) -> LayerSet {
        self.layers
    }

    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "{} capacitive touch grid {}x{}, pitch {} mm",
            self.pattern, self.config.size.0, self.config.size.1, self.config.pitch
        )
    }

    /// Write the grid to `path` in the format implied by its extension.
    ///
    /// Returns the path actually written, which gains `.svg` when it had no extension.
    pub fn save(&self, path: &Path) -> Result<PathBuf, DesignError> {
        let (path, format) = resolve_output(path)?;
        let meta = ExportMeta::for_path(&path, self.description());
        write_file(&self.layers, &path, format, &meta)?;
        Ok(path)
    }
}

/// Builds grids from one configuration; every call starts from fresh layers.
#[derive(Debug, Clone, Default)]
pub struct CapacitiveGridGenerator {
    config: GridConfig,
}

impl CapacitiveGridGenerator {
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn generate(&self, pattern: GridPattern) -> Result<CapacitiveGrid, DesignError> {
        CapacitiveGrid::build(pattern, self.config.clone())
    }

    /// Lay out `pattern` and write it to `path`.
    ///
    /// The output extension is checked before any geometry is computed, and nothing is written
    /// unless the whole grid was built.
    pub fn create(
        &self,
        pattern: GridPattern,
        path: &Path,
    ) -> Result<(CapacitiveGrid, PathBuf), DesignError> {
        resolve_output(path)?;
        let grid = self.generate(pattern)?;
        let written = grid.save(path)?;
        Ok((grid, written))
    }
}
