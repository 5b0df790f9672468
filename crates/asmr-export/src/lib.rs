//! Output writers for layered shape lists (SVG and KiCad footprints).

use std::path::{Path, PathBuf};

use asmr_core::{LayerSet, Shape};
use indexmap::IndexMap;

pub mod kicad_mod;
pub mod svg;
pub mod templates;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("nothing to export: all layers are empty")]
    Empty,
    #[error("unsupported output extension for {path:?} (expected .svg or .kicad_mod)")]
    UnsupportedExtension { path: PathBuf },
    #[error("template placeholder {{{{ {0} }}}} has no value")]
    MissingPlaceholder(String),
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    KicadFootprint,
}

impl OutputFormat {
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::KicadFootprint => "kicad_mod",
        }
    }
}

/// Pick the output format from the file extension.
///
/// A path without an extension is written as SVG and gets `.svg` appended.
pub fn resolve_output(path: &Path) -> Result<(PathBuf, OutputFormat), ExportError> {
    match path.extension().and_then(|e| e.to_str()) {
        None => {
            let mut raw = path.as_os_str().to_owned();
            raw.push(".svg");
            Ok((PathBuf::from(raw), OutputFormat::Svg))
        }
        Some(ext) if ext.eq_ignore_ascii_case("svg") => Ok((path.to_path_buf(), OutputFormat::Svg)),
        Some(ext) if ext.eq_ignore_ascii_case("kicad_mod") => {
            Ok((path.to_path_buf(), OutputFormat::KicadFootprint))
        }
        Some(_) => Err(ExportError::UnsupportedExtension {
            path: path.to_path_buf(),
        }),
    }
}

/// Naming that ends up inside exported files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportMeta {
    pub name: String,
    pub description: String,
}

impl ExportMeta {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Footprint name taken from the file stem.
    #[must_use]
    pub fn for_path(path: &Path, description: impl Into<String>) -> Self {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("touch_grid");
        Self::new(name, description)
    }
}

/// Shapes bucketed by group tag in order of first appearance. Ungrouped shapes share the
/// `None` bucket.
#[must_use]
pub fn group_shapes(shapes: &[Shape]) -> IndexMap<Option<&str>, Vec<&Shape>> {
    let mut groups: IndexMap<Option<&str>, Vec<&Shape>> = IndexMap::new();
    for shape in shapes {
        groups.entry(shape.group()).or_default().push(shape);
    }
    groups
}

pub fn render(layers: &LayerSet, format: OutputFormat, meta: &ExportMeta) -> Result<String, ExportError> {
    match format {
        OutputFormat::Svg => svg::svg_from_layers(layers),
        OutputFormat::KicadFootprint => kicad_mod::kicad_mod_from_layers(layers, meta),
    }
}

/// Render `layers` completely, then write the document to `path` in one go.
pub fn write_file(
    layers: &LayerSet,
    path: &Path,
    format: OutputFormat,
    meta: &ExportMeta,
) -> Result<(), ExportError> {
    let doc = render(layers, format, meta)?;
    std::fs::write(path, doc.as_bytes()).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        path = %path.display(),
        format = format.extension(),
        shapes = layers.shape_count(),
        "wrote output"
    );
    Ok(())
}
