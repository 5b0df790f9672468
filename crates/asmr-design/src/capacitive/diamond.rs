//! Diamond layout.
//!
//! Column (X) diamonds sit on the horizontal node boundaries and row (Y) diamonds on the
//! vertical ones, so each node is covered by four diamond quarters. Diamonds on the array edge
//! are folded in half. Column diamonds are chained by vertical bridges that pass between the
//! tips of the neighbouring row diamonds; row diamonds share their pad id instead.

use asmr_core::{Cutoff, Diamond, DiamondParams, Layer, Line, LineCap, Point};
use tracing::debug;

use super::pads::PadNumbering;
use super::{ArrayFrame, FillFormat, GridConfig, Palette};
use crate::error::DesignError;

/// Nominal diamond diagonal: the pitch minus room for a column bridge with clearance on both
/// sides, minus padding.
#[must_use]
pub fn diamond_diagonal(config: &GridConfig) -> f64 {
    config.pitch - config.xwidth - 2.0 * config.separation - 2.0 * config.padding
}

pub fn layout_diamond(
    config: &GridConfig,
    fill: &FillFormat,
    palette: &Palette,
    electrodes: &mut Layer,
) -> Result<ArrayFrame, DesignError> {
    let (cols, rows) = config.size;
    let p = config.pitch;
    let s = config.separation;
    let (xw, yw) = (config.xwidth, config.ywidth);
    let diagonal = diamond_diagonal(config);
    if diagonal <= 0.0 {
        return Err(DesignError::invalid(
            "pitch",
            format!(
                "{p} mm leaves no room for diamonds with xwidth {xw} mm, separation {s} mm and padding {} mm",
                config.padding
            ),
        ));
    }

    let pads = PadNumbering::new(config.size, config.resolution);
    let x_bus = pads.any_x_ganged();
    let y_bus = pads.any_y_ganged();
    let origin = Point::new(
        config.margin + yw / 2.0 + if y_bus { s + yw } else { 0.0 },
        config.margin + xw / 2.0 + if x_bus { s + xw } else { 0.0 },
    );
    let frame = ArrayFrame {
        origin,
        pitch: p,
        size: config.size,
        extent: (
            origin.x + cols as f64 * p + yw / 2.0 + config.margin,
            origin.y + rows as f64 * p + xw / 2.0 + config.margin,
        ),
    };

    let diamond = |center: Point, axis_fill: &super::AxisFill, stroke: f64, cutoff, color, group| {
        Diamond::new(DiamondParams {
            origin: center.offset(0.0, -diagonal / 2.0),
            diagonal,
            fill: axis_fill.fill,
            stroke_width: stroke,
            pattern: axis_fill.pattern,
            cutoff,
            color,
            group,
        })
    };

    for c in 0..cols {
        let group = Some(pads.x_group(c));
        let xc = frame.boundary_x(c) + p / 2.0;
        let mut column = Vec::with_capacity(rows + 1);
        for r in 0..=rows {
            let cutoff = if r == 0 {
                Cutoff::Top
            } else if r == rows {
                Cutoff::Bottom
            } else {
                Cutoff::None
            };
            column.push(diamond(
                Point::new(xc, frame.boundary_y(r)),
                &fill.columns,
                xw,
                cutoff,
                palette.x,
                group.clone(),
            )?);
        }
        for pair in column.windows(2) {
            let [upper, lower] = pair else { continue };
            electrodes.push(
                Line::new(upper.vertices()[2], lower.vertices()[0], xw)
                    .with_color(palette.x)
                    .with_group(group.clone()),
            );
        }
        electrodes.extend(column);
    }

    for r in 0..rows {
        let group = Some(pads.y_group(r));
        let yc = frame.boundary_y(r) + p / 2.0;
        for c in 0..=cols {
            let cutoff = if c == 0 {
                Cutoff::Left
            } else if c == cols {
                Cutoff::Right
            } else {
                Cutoff::None
            };
            electrodes.push(diamond(
                Point::new(frame.boundary_x(c), yc),
                &fill.rows,
                yw,
                cutoff,
                palette.y,
                group.clone(),
            )?);
        }
    }

    if x_bus {
        let bus_y = origin.y - (s + xw);
        for c in 0..cols {
            let xc = frame.boundary_x(c) + p / 2.0;
            let group = Some(pads.x_group(c));
            let joined_left = c > 0 && pads.x_ganged_with_next(c - 1);
            if pads.x_ganged_with_next(c) {
                electrodes.push(
                    Line::new(Point::new(xc, bus_y), Point::new(xc + p, bus_y), xw)
                        .with_cap(LineCap::Round)
                        .with_color(palette.x)
                        .with_group(group.clone()),
                );
            }
            if joined_left || pads.x_ganged_with_next(c) {
                electrodes.push(
                    Line::new(Point::new(xc, bus_y), Point::new(xc, origin.y), xw)
                        .with_color(palette.x)
                        .with_group(group),
                );
            }
        }
    }

    if y_bus {
        let bus_x = origin.x - (s + yw);
        for r in 0..rows {
            let yc = frame.boundary_y(r) + p / 2.0;
            let group = Some(pads.y_group(r));
            let joined_above = r > 0 && pads.y_ganged_with_next(r - 1);
            if pads.y_ganged_with_next(r) {
                electrodes.push(
                    Line::new(Point::new(bus_x, yc), Point::new(bus_x, yc + p), yw)
                        .with_cap(LineCap::Round)
                        .with_color(palette.y)
                        .with_group(group.clone()),
                );
            }
            if joined_above || pads.y_ganged_with_next(r) {
                electrodes.push(
                    Line::new(Point::new(bus_x, yc), Point::new(origin.x, yc), yw)
                        .with_color(palette.y)
                        .with_group(group),
                );
            }
        }
    }

    debug!(diagonal, shapes = electrodes.len(), "diamond layout");
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use asmr_core::{LayerKind, Shape};

    fn run(config: &GridConfig) -> (ArrayFrame, Layer) {
        let fill = config.validate().unwrap();
        let mut layer = Layer::new(LayerKind::Electrodes);
        let frame = layout_diamond(config, &fill, &Palette::new(true), &mut layer).unwrap();
        (frame, layer)
    }

    fn diamonds(layer: &Layer) -> Vec<&Diamond> {
        layer
            .shapes()
            .iter()
            .filter_map(|s| match s {
                Shape::Diamond(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn diamond_counts_cover_both_lattices() {
        let config = GridConfig {
            size: (3, 2),
            ..GridConfig::default()
        };
        let (_, layer) = run(&config);
        let all = diamonds(&layer);
        let x = all.iter().filter(|d| d.color() == Palette::X_ELECTRODE).count();
        let y = all.iter().filter(|d| d.color() == Palette::Y_ELECTRODE).count();
        assert_eq!(x, 3 * 3);
        assert_eq!(y, 2 * 4);
        let bridges = layer.len() - all.len();
        assert_eq!(bridges, 3 * 2);
    }

    #[test]
    fn edge_diamonds_are_folded_towards_the_array() {
        let (frame, layer) = run(&GridConfig::default());
        for d in diamonds(&layer) {
            let b = d.bounds();
            let half = d.stroke_width() / 2.0;
            assert!(b.min_x >= frame.boundary_x(0) - half - 1e-9);
            assert!(b.max_x <= frame.boundary_x(1) + half + 1e-9);
            assert!(b.min_y >= frame.boundary_y(0) - half - 1e-9);
            assert!(b.max_y <= frame.boundary_y(1) + half + 1e-9);
            assert_ne!(d.cutoff(), Cutoff::None);
        }
    }

    #[test]
    fn bridges_connect_vertices_of_one_column() {
        let config = GridConfig {
            size: (1, 2),
            ..GridConfig::default()
        };
        let (frame, layer) = run(&config);
        let bridges: Vec<_> = layer
            .shapes()
            .iter()
            .filter_map(|s| match s {
                Shape::Line(l) => Some(l),
                _ => None,
            })
            .collect();
        assert_eq!(bridges.len(), 2);
        for l in bridges {
            assert_abs_diff_eq!(l.start.x, frame.boundary_x(0) + config.pitch / 2.0);
            assert!(l.end.y > l.start.y);
            assert_eq!(l.group.as_deref(), Some("1"));
        }
    }

    #[test]
    fn ganged_columns_get_a_bus_above_the_array() {
        let config = GridConfig {
            size: (2, 1),
            resolution: (2, 1),
            ..GridConfig::default()
        };
        let (frame, layer) = run(&config);
        let b = layer.bounds();
        assert!(b.min_y >= -1e-9);
        assert_abs_diff_eq!(b.min_y, 0.0, epsilon = 1e-9);
        let above: Vec<_> = layer
            .shapes()
            .iter()
            .filter(|s| s.bounds().max_y < frame.origin.y - 1e-9)
            .collect();
        assert_eq!(above.len(), 1);
    }

    #[test]
    fn pitch_too_small_for_diamonds() {
        let config = GridConfig {
            pitch: 1.0,
            ..GridConfig::default()
        };
        let fill = config.validate().unwrap();
        let mut layer = Layer::new(LayerKind::Electrodes);
        let err = layout_diamond(&config, &fill, &Palette::new(false), &mut layer).unwrap_err();
        assert!(matches!(err, DesignError::InvalidParameter { name: "pitch", .. }));
    }
}
