use std::process::Command;

fn asmr() -> Command {
    Command::new(env!("CARGO_BIN_EXE_asmr"))
}

#[test]
fn touch_grid_writes_svg_and_reports_spacing() {
    let temp = tempfile::tempdir().unwrap();
    let output = asmr()
        .current_dir(temp.path())
        .args([
            "design", "touch-grid", "-f", "grid", "-x", "2", "-y", "2", "--pitch", "5", "-s",
            "0.3",
        ])
        .output()
        .expect("run asmr");
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("3 digits per node, separation 0.3333 mm"), "{stdout}");
    let svg = std::fs::read_to_string(temp.path().join("grid.svg")).unwrap();
    assert!(svg.contains("<g id=\"electrodes-pad4\">"));
}

#[test]
fn config_file_and_flags_combine() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(
        temp.path().join("grid.yaml"),
        "size: [3, 2]\npitch: 6.0\nfmt: \"40,/|1\"\n",
    )
    .unwrap();
    let output = asmr()
        .current_dir(temp.path())
        .args([
            "design",
            "touch-grid",
            "-f",
            "grid.kicad_mod",
            "-p",
            "diamond",
            "--config",
            "grid.yaml",
            "--resolution",
            "3,1",
            "--dump-shapes",
            "shapes.json",
        ])
        .output()
        .expect("run asmr");
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let footprint = std::fs::read_to_string(temp.path().join("grid.kicad_mod")).unwrap();
    // one ganged column pad plus two row pads
    assert_eq!(footprint.matches("smd custom").count(), 3);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp.path().join("shapes.json")).unwrap())
            .unwrap();
    let electrodes = json["electrodes"]["shapes"].as_array().unwrap();
    assert!(electrodes.iter().any(|s| s["kind"] == "diamond"));
}

#[test]
fn eurorack_panel_outline() {
    let temp = tempfile::tempdir().unwrap();
    let output = asmr()
        .current_dir(temp.path())
        .args(["design", "eurorack", "-f", "panel.svg", "--hp", "6", "--pcb-zone"])
        .output()
        .expect("run asmr");
    assert!(output.status.success());
    let svg = std::fs::read_to_string(temp.path().join("panel.svg")).unwrap();
    assert!(svg.contains("<g id=\"silkscreen\">"));
    assert_eq!(svg.matches("<rect ").count(), 6);
}

#[test]
fn verbose_logs_go_to_stderr() {
    let temp = tempfile::tempdir().unwrap();
    let output = asmr()
        .current_dir(temp.path())
        .env_remove("RUST_LOG")
        .args(["-v", "design", "touch-grid", "-f", "grid.svg"])
        .output()
        .expect("run asmr");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("interleaved layout"), "{stderr}");
    assert!(!String::from_utf8_lossy(&output.stdout).contains("interleaved layout"));
}
