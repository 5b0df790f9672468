use std::path::{Path, PathBuf};

use anyhow::Context;
use asmr_core::LayerSet;
use asmr_design::{CapacitiveGridGenerator, EurorackPanel, GridConfig, GridPattern};
use clap::Args;
use tracing::debug;

use crate::error::CliError;

#[derive(Debug, Args)]
pub struct TouchGridArgs {
    /// Output file: .svg, .kicad_mod, or no extension for SVG
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: PathBuf,

    /// Electrode pattern (interleaved or diamond)
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: Option<GridPattern>,

    /// Number of columns
    #[arg(short = 'x', long = "columns", value_name = "N")]
    pub columns: Option<usize>,

    /// Number of rows
    #[arg(short = 'y', long = "rows", value_name = "N")]
    pub rows: Option<usize>,

    /// Node pitch (mm)
    #[arg(long)]
    pub pitch: Option<f64>,

    /// Column electrode trace width (mm)
    #[arg(long)]
    pub xwidth: Option<f64>,

    /// Row electrode trace width (mm)
    #[arg(long)]
    pub ywidth: Option<f64>,

    /// Target separation between electrodes (mm)
    #[arg(short, long)]
    pub separation: Option<f64>,

    /// Clearance around the array (mm)
    #[arg(long)]
    pub margin: Option<f64>,

    /// Inset of the sensing area inside each node (mm)
    #[arg(long)]
    pub padding: Option<f64>,

    /// Columns and rows ganged per pad, as X,Y
    #[arg(long, value_name = "X,Y", value_parser = parse_pair)]
    pub resolution: Option<(usize, usize)>,

    /// Draw the silkscreen grid every N nodes
    #[arg(long, value_name = "N")]
    pub silk_scaling: Option<usize>,

    /// Fill and hatch pattern per axis, as "row|column" (e.g. "60,#|1")
    #[arg(long, value_name = "FMT")]
    pub fmt: Option<String>,

    /// Color electrodes by polarity
    #[arg(long)]
    pub color: bool,

    /// Expose column electrodes through the solder mask
    #[arg(long)]
    pub mask_x: bool,

    /// Expose row electrodes through the solder mask
    #[arg(long)]
    pub mask_y: bool,

    /// YAML file with grid parameters; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also write the generated shapes as JSON
    #[arg(long, value_name = "FILE")]
    pub dump_shapes: Option<PathBuf>,
}

impl TouchGridArgs {
    fn apply(&self, config: &mut GridConfig) {
        if let Some(columns) = self.columns {
            config.size.0 = columns;
        }
        if let Some(rows) = self.rows {
            config.size.1 = rows;
        }
        let lengths = [
            (self.pitch, &mut config.pitch),
            (self.xwidth, &mut config.xwidth),
            (self.ywidth, &mut config.ywidth),
            (self.separation, &mut config.separation),
            (self.margin, &mut config.margin),
            (self.padding, &mut config.padding),
        ];
        for (flag, field) in lengths {
            if let Some(value) = flag {
                *field = value;
            }
        }
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(scaling) = self.silk_scaling {
            config.silk_scaling = scaling;
        }
        if let Some(fmt) = &self.fmt {
            config.fmt = fmt.clone();
        }
        config.use_color |= self.color;
        config.mask_electrode_x |= self.mask_x;
        config.mask_electrode_y |= self.mask_y;
    }
}

#[derive(Debug, Args)]
pub struct EurorackArgs {
    /// Output file: .svg, .kicad_mod, or no extension for SVG
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: PathBuf,

    /// Panel width in HP
    #[arg(long)]
    pub hp: u32,

    /// Panel height in rack units
    #[arg(long, default_value_t = 3)]
    pub u: u32,

    /// Round mounting holes instead of ovals
    #[arg(long)]
    pub no_ovals: bool,

    /// Outline the area available to a PCB
    #[arg(long)]
    pub pcb_zone: bool,
}

fn parse_pair(raw: &str) -> Result<(usize, usize), String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {raw:?}"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|e| format!("{s:?} in {raw:?}: {e}"))
    };
    Ok((parse(x)?, parse(y)?))
}

fn load_config(path: &Path) -> anyhow::Result<GridConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("could not read config {}", path.display()))?;
    let config = serde_yaml::from_str(&raw)
        .with_context(|| format!("invalid grid config {}", path.display()))?;
    Ok(config)
}

pub fn run_touch_grid(args: TouchGridArgs) -> Result<(), CliError> {
    let mut config = match &args.config {
        Some(path) => load_config(path).map_err(|e| CliError::input(format!("{e:#}")))?,
        None => GridConfig::default(),
    };
    args.apply(&mut config);
    let pattern = args.pattern.unwrap_or_default();
    debug!(?config, %pattern, "touch grid parameters");

    let generator = CapacitiveGridGenerator::new(config);
    let (grid, written) = generator.create(pattern, &args.file)?;
    if let Some(spacing) = grid.spacing() {
        println!(
            "{} digits per node, separation {:.4} mm",
            spacing.digits, spacing.separation
        );
    }
    if let Some(dump) = &args.dump_shapes {
        write_shapes(grid.layers(), dump)?;
    }
    println!("Wrote {}", written.display());
    Ok(())
}

pub fn run_eurorack(args: EurorackArgs) -> Result<(), CliError> {
    let panel = EurorackPanel::new(args.hp, args.u)?
        .with_ovals(!args.no_ovals)
        .with_pcb_zone(args.pcb_zone);
    let written = panel.save(&args.file)?;
    println!("Wrote {}", written.display());
    Ok(())
}

fn write_shapes(layers: &LayerSet, path: &Path) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(layers).map_err(|e| CliError::processing(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| {
        CliError::processing(format!("could not write {}: {e}", path.display()))
    })
}
