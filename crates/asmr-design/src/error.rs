use asmr_core::ShapeError;
use asmr_export::ExportError;

/// Everything that can stop a design from being generated or written.
///
/// All configuration problems surface before any file is touched.
#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    #[error(
        "pitch {pitch} mm is too small for trace widths {xwidth}/{ywidth} mm at separation {separation} mm"
    )]
    InfeasibleSpacing {
        pitch: f64,
        xwidth: f64,
        ywidth: f64,
        separation: f64,
    },
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("invalid fill format {input:?}: {reason}")]
    InvalidFillFormat { input: String, reason: String },
    #[error("invalid shape: {0}")]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl DesignError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        DesignError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the request itself rather than by the filesystem.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        !matches!(self, DesignError::Export(ExportError::Io { .. }))
    }
}
