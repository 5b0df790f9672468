use std::fmt;
use std::str::FromStr;

use asmr_core::HatchPattern;
use serde::{Deserialize, Serialize};

use crate::error::DesignError;

/// Electrode arrangement of a touch grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridPattern {
    #[default]
    Interleaved,
    Diamond,
}

impl GridPattern {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            GridPattern::Interleaved => "interleaved",
            GridPattern::Diamond => "diamond",
        }
    }
}

impl fmt::Display for GridPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GridPattern {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interleaved" => Ok(GridPattern::Interleaved),
            "diamond" => Ok(GridPattern::Diamond),
            other => Err(DesignError::invalid(
                "pattern",
                format!("unknown pattern {other:?} (expected interleaved or diamond)"),
            )),
        }
    }
}

/// Touch grid parameters. Lengths are millimeters.
///
/// Every field has a default, so a YAML file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Sensor nodes as (columns, rows).
    pub size: (usize, usize),
    pub pitch: f64,
    /// Width of the column (X) electrode traces.
    pub xwidth: f64,
    /// Width of the row (Y) electrode traces.
    pub ywidth: f64,
    /// Target clearance between opposite electrodes. The interleaved layout solves for the
    /// separation actually used.
    pub separation: f64,
    pub margin: f64,
    pub padding: f64,
    /// Physical (columns, rows) ganged into one pad.
    pub resolution: (usize, usize),
    pub silk_scaling: usize,
    /// Fill DSL, see [`FillFormat`].
    pub fmt: String,
    pub use_color: bool,
    pub mask_electrode_x: bool,
    pub mask_electrode_y: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: (1, 1),
            pitch: 6.0,
            xwidth: 0.5,
            ywidth: 0.5,
            separation: 0.3,
            margin: 0.0,
            padding: 0.0,
            resolution: (1, 1),
            silk_scaling: 1,
            fmt: "0.6,#|0.6,#".to_string(),
            use_color: false,
            mask_electrode_x: false,
            mask_electrode_y: false,
        }
    }
}

impl GridConfig {
    #[must_use]
    pub fn columns(&self) -> usize {
        self.size.0
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.size.1
    }

    /// Check ranges and parse the fill format.
    pub fn validate(&self) -> Result<FillFormat, DesignError> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(DesignError::invalid(
                "size",
                format!("{}x{} has no sensor nodes", self.size.0, self.size.1),
            ));
        }
        for (name, value) in [
            ("pitch", self.pitch),
            ("xwidth", self.xwidth),
            ("ywidth", self.ywidth),
            ("separation", self.separation),
        ] {
            positive(name, value)?;
        }
        for (name, value) in [("margin", self.margin), ("padding", self.padding)] {
            if !value.is_finite() || value < 0.0 {
                return Err(DesignError::invalid(
                    name,
                    format!("{value} must be a non-negative number"),
                ));
            }
        }
        if self.resolution.0 == 0 || self.resolution.1 == 0 {
            return Err(DesignError::invalid(
                "resolution",
                "columns and rows per pad must be at least 1",
            ));
        }
        if self.silk_scaling == 0 {
            return Err(DesignError::invalid("silk_scaling", "must be at least 1"));
        }
        self.fmt.parse()
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), DesignError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DesignError::invalid(
            name,
            format!("{value} must be a positive number"),
        ))
    }
}

/// Copper fill of one electrode axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisFill {
    /// 0 = outline, 1 = solid, in between = hatched.
    pub fill: f64,
    pub pattern: HatchPattern,
}

/// Parsed `"<fill>[,<pattern>]|<fill>[,<pattern>]"` string.
///
/// The first segment describes the row (Y) electrodes, the second the column (X) electrodes.
/// Fills up to 1 are fractions, larger fills up to 100 are percentages. The pattern is one of
/// `/`, `\` or `#` and defaults to `#`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillFormat {
    pub rows: AxisFill,
    pub columns: AxisFill,
}

impl FromStr for FillFormat {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: String| DesignError::InvalidFillFormat {
            input: s.to_string(),
            reason,
        };
        let segments: Vec<&str> = s.split('|').collect();
        let [rows, columns] = segments.as_slice() else {
            return Err(err(format!(
                "expected 2 segments separated by '|', found {}",
                segments.len()
            )));
        };
        Ok(Self {
            rows: parse_axis(rows).map_err(err)?,
            columns: parse_axis(columns).map_err(err)?,
        })
    }
}

fn parse_axis(segment: &str) -> Result<AxisFill, String> {
    let mut parts = segment.split(',');
    let fill_raw = parts.next().unwrap_or_default().trim();
    let pattern_raw = parts.next().map(str::trim);
    if parts.next().is_some() {
        return Err(format!("segment {segment:?} has more than one ','"));
    }

    let value: f64 = fill_raw
        .parse()
        .map_err(|_| format!("fill {fill_raw:?} is not a number"))?;
    let fill = if !value.is_finite() || value < 0.0 || value > 100.0 {
        return Err(format!("fill {fill_raw} is outside 0..=100"));
    } else if value > 1.0 {
        value / 100.0
    } else {
        value
    };

    let pattern = match pattern_raw {
        None => HatchPattern::Cross,
        Some(raw) => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => HatchPattern::from_char(c).map_err(|e| e.to_string())?,
                _ => return Err(format!("pattern {raw:?} must be one of '/', '\\' or '#'")),
            }
        }
    };
    Ok(AxisFill { fill, pattern })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn parses_fractions_and_percentages() {
        let f: FillFormat = "0.6,/|60,\\".parse().unwrap();
        assert_abs_diff_eq!(f.rows.fill, 0.6);
        assert_eq!(f.rows.pattern, HatchPattern::Forward);
        assert_abs_diff_eq!(f.columns.fill, 0.6, epsilon = 1e-12);
        assert_eq!(f.columns.pattern, HatchPattern::Backward);
    }

    #[test]
    fn pattern_defaults_to_cross_hatch() {
        let f: FillFormat = " 1 | 0 ".parse().unwrap();
        assert_abs_diff_eq!(f.rows.fill, 1.0);
        assert_abs_diff_eq!(f.columns.fill, 0.0);
        assert_eq!(f.rows.pattern, HatchPattern::Cross);
        assert_eq!(f.columns.pattern, HatchPattern::Cross);
    }

    #[test]
    fn rejects_malformed_formats() {
        for bad in [
            "",
            "0.5",
            "0.5|0.5|0.5",
            "abc|0.5",
            "-1|0.5",
            "101|0.5",
            "NaN|0.5",
            "0.5,x|0.5",
            "0.5,|0.5",
            "0.5,//|0.5",
            "0.5,#,#|0.5",
        ] {
            assert!(
                matches!(bad.parse::<FillFormat>(), Err(DesignError::InvalidFillFormat { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn default_config_is_valid() {
        let fill = GridConfig::default().validate().unwrap();
        assert_abs_diff_eq!(fill.rows.fill, 0.6);
    }

    #[test]
    fn validation_rejects_degenerate_parameters() {
        let cases = [
            GridConfig {
                size: (0, 2),
                ..GridConfig::default()
            },
            GridConfig {
                pitch: 0.0,
                ..GridConfig::default()
            },
            GridConfig {
                separation: -0.1,
                ..GridConfig::default()
            },
            GridConfig {
                xwidth: f64::INFINITY,
                ..GridConfig::default()
            },
            GridConfig {
                padding: -1.0,
                ..GridConfig::default()
            },
            GridConfig {
                resolution: (1, 0),
                ..GridConfig::default()
            },
            GridConfig {
                silk_scaling: 0,
                ..GridConfig::default()
            },
        ];
        for cfg in cases {
            assert!(
                matches!(cfg.validate(), Err(DesignError::InvalidParameter { .. })),
                "{cfg:?}"
            );
        }
    }

    #[test]
    fn pattern_names_round_trip() {
        assert_eq!("Diamond".parse::<GridPattern>().unwrap(), GridPattern::Diamond);
        assert_eq!(GridPattern::Interleaved.to_string(), "interleaved");
        assert!("hex".parse::<GridPattern>().is_err());
    }
}
