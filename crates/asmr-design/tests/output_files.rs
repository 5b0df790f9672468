use std::path::Path;

use asmr_design::{CapacitiveGridGenerator, DesignError, EurorackPanel, GridConfig, GridPattern};
use asmr_export::ExportError;

fn generator() -> CapacitiveGridGenerator {
    CapacitiveGridGenerator::new(GridConfig {
        size: (2, 2),
        ..GridConfig::default()
    })
}

#[test]
fn yaml_config_overrides_only_named_fields() {
    let yaml = "size: [4, 3]\npitch: 5.0\nresolution: [2, 1]\nfmt: \"50,/|1\"\nuse_color: true\n";
    let config: GridConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.size, (4, 3));
    assert_eq!(config.resolution, (2, 1));
    assert!(config.use_color);
    assert_eq!(config.xwidth, GridConfig::default().xwidth);
    assert_eq!(config.silk_scaling, 1);
    config.validate().unwrap();
}

#[test]
fn yaml_config_rejects_unknown_fields() {
    assert!(serde_yaml::from_str::<GridConfig>("pich: 5.0\n").is_err());
}

#[test]
fn extensionless_path_is_written_as_svg() {
    let dir = tempfile::tempdir().unwrap();
    let (_, written) = generator()
        .create(GridPattern::Interleaved, &dir.path().join("grid"))
        .unwrap();
    assert_eq!(written, dir.path().join("grid.svg"));
    let svg = std::fs::read_to_string(&written).unwrap();
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("<g id=\"electrodes-pad1\">"));
    assert!(svg.contains("<g id=\"solder_mask\">"));
    assert!(svg.contains("<g id=\"silkscreen\">"));
}

#[test]
fn footprint_has_one_pad_per_electrode_group() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slider.kicad_mod");
    let (_, written) = generator().create(GridPattern::Diamond, &path).unwrap();
    assert_eq!(written, path);
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("(footprint \"slider\""));
    assert_eq!(text.matches("smd custom").count(), 4);
    assert!(text.contains("(layer \"F.Mask\")"));
    assert!(text.contains("(layer \"F.SilkS\")"));
    assert!(!text.contains("{{"));
}

#[test]
fn failed_runs_write_nothing() {
    let dir = tempfile::tempdir().unwrap();

    let png = dir.path().join("grid.png");
    let err = generator().create(GridPattern::Interleaved, &png).unwrap_err();
    assert!(matches!(err, DesignError::Export(ExportError::UnsupportedExtension { .. })));
    assert!(!png.exists());

    let svg = dir.path().join("grid.svg");
    let tight = CapacitiveGridGenerator::new(GridConfig {
        pitch: 1.0,
        ..GridConfig::default()
    });
    let err = tight.create(GridPattern::Interleaved, &svg).unwrap_err();
    assert!(matches!(err, DesignError::InfeasibleSpacing { .. }));
    assert!(!svg.exists());
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("grid.svg");
    let err = generator().create(GridPattern::Interleaved, &path).unwrap_err();
    assert!(matches!(err, DesignError::Export(ExportError::Io { .. })));
    assert!(!err.is_configuration());
}

#[test]
fn eurorack_panel_is_written_as_svg() {
    let dir = tempfile::tempdir().unwrap();
    let panel = EurorackPanel::new(4, 3).unwrap().with_pcb_zone(true);
    let written = panel.save(&dir.path().join("panel")).unwrap();
    assert_eq!(written.extension().and_then(|e| e.to_str()), Some("svg"));
    let svg = std::fs::read_to_string(written).unwrap();
    assert_eq!(svg.matches("<rect ").count(), 6);
    assert!(svg.contains("stroke=\"#ff0000\""));
    assert!(Path::new(dir.path()).join("panel.svg").exists());
}
