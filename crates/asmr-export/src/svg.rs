use std::fmt::Write;

use asmr_core::{Color, Diamond, Layer, LayerSet, Line, Rectangle, Shape};

use crate::{group_shapes, ExportError};

/// Render every non-empty layer into one SVG document.
///
/// The document spans from the origin to the furthest right/bottom extent of any shape, in
/// millimeters. Each layer becomes a `<g>` and each shape group a nested `<g>` so pads can be
/// selected individually in an editor.
pub fn svg_from_layers(layers: &LayerSet) -> Result<String, ExportError> {
    let bounds = layers.bounds();
    if !bounds.is_valid() || bounds.max_x <= 0.0 || bounds.max_y <= 0.0 {
        return Err(ExportError::Empty);
    }
    let w = fmt_num(bounds.max_x);
    let h = fmt_num(bounds.max_y);

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\" ?>\n");
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{w}mm\" height=\"{h}mm\" viewBox=\"0 0 {w} {h}\">"
    );
    for layer in layers.iter().filter(|l| !l.is_empty()) {
        render_layer(&mut out, layer);
    }
    out.push_str("</svg>\n");
    Ok(out)
}

fn render_layer(out: &mut String, layer: &Layer) {
    let layer_id = layer.kind().name();
    let _ = writeln!(out, "  <g id=\"{layer_id}\">");
    for (group, shapes) in group_shapes(layer.shapes()) {
        match group {
            Some(group) => {
                let _ = writeln!(out, "    <g id=\"{layer_id}-pad{}\">", sanitize_id(group));
                for shape in shapes {
                    render_shape(out, shape, "      ");
                }
                out.push_str("    </g>\n");
            }
            None => {
                for shape in shapes {
                    render_shape(out, shape, "    ");
                }
            }
        }
    }
    out.push_str("  </g>\n");
}

fn render_shape(out: &mut String, shape: &Shape, indent: &str) {
    match shape {
        Shape::Line(line) => render_line(out, line, indent),
        Shape::Rectangle(rect) => render_rect(out, rect, indent),
        Shape::Diamond(diamond) => render_diamond(out, diamond, indent),
    }
}

fn render_line(out: &mut String, line: &Line, indent: &str) {
    let (stroke, opacity) = split_color(line.color);
    let _ = writeln!(
        out,
        "{indent}<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{stroke}\" stroke-opacity=\"{opacity}\" stroke-width=\"{}\" stroke-linecap=\"{}\" />",
        fmt_num(line.start.x),
        fmt_num(line.start.y),
        fmt_num(line.end.x),
        fmt_num(line.end.y),
        fmt_num(line.width),
        line.cap.as_str(),
    );
}

fn render_rect(out: &mut String, rect: &Rectangle, indent: &str) {
    let (color, opacity) = split_color(rect.color);
    let (tl, br) = rect.normalized();
    let fill = if rect.fill { color.as_str() } else { "none" };
    let stroke_width = if rect.fill { 0.0 } else { rect.width };
    let _ = writeln!(
        out,
        "{indent}<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" ry=\"{}\" fill=\"{fill}\" stroke=\"{color}\" stroke-width=\"{}\" opacity=\"{opacity}\" />",
        fmt_num(tl.x),
        fmt_num(tl.y),
        fmt_num(br.x - tl.x),
        fmt_num(br.y - tl.y),
        fmt_num(rect.rx),
        fmt_num(rect.ry),
        fmt_num(stroke_width),
    );
}

fn render_diamond(out: &mut String, diamond: &Diamond, indent: &str) {
    let (color, opacity) = split_color(diamond.color());
    let points: Vec<String> = diamond
        .polygon()
        .iter()
        .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
        .collect();
    let fill = if diamond.is_solid() {
        color.as_str()
    } else {
        "none"
    };
    let _ = writeln!(
        out,
        "{indent}<polygon points=\"{}\" fill=\"{fill}\" fill-opacity=\"{opacity}\" stroke=\"{color}\" stroke-opacity=\"{opacity}\" stroke-width=\"{}\" stroke-linejoin=\"round\" />",
        points.join(" "),
        fmt_num(diamond.stroke_width()),
    );
    for line in diamond.fill_lines() {
        render_line(out, line, indent);
    }
}

/// Split a color into the `(#rrggbb, opacity)` pair SVG expects as separate attributes.
#[must_use]
pub fn split_color(color: Color) -> (String, String) {
    (color.rgb_hex(), format!("{:.2}", color.opacity()))
}

fn sanitize_id(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn fmt_num(v: f64) -> String {
    let v = if v.abs() < 1e-9 { 0.0 } else { v };
    let mut buf = ryu::Buffer::new();
    let s = buf.format(v);
    s.strip_suffix(".0").unwrap_or(s).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use asmr_core::{DiamondParams, HatchPattern, LineCap, Point};

    fn line_layers() -> LayerSet {
        let mut layers = LayerSet::new();
        layers.electrodes.push(
            Line::new(Point::new(1.0, 1.0), Point::new(1.0, 9.0), 0.5)
                .with_group(Some("1".to_string())),
        );
        layers.electrodes.push(
            Line::new(Point::new(1.0, 1.0), Point::new(4.0, 1.0), 0.5)
                .with_cap(LineCap::Round)
                .with_group(Some("1".to_string())),
        );
        layers
    }

    #[test]
    fn color_split_separates_alpha() {
        assert_eq!(
            split_color(Color::rgba(0, 0x80, 0, 0x80)),
            ("#008000".to_string(), "0.50".to_string())
        );
        assert_eq!(
            split_color(Color::BLACK),
            ("#000000".to_string(), "1.00".to_string())
        );
    }

    #[test]
    fn document_size_follows_shape_extent() {
        let svg = svg_from_layers(&line_layers()).unwrap();
        assert!(svg.contains("width=\"4.25mm\""), "{svg}");
        assert!(svg.contains("height=\"9mm\""), "{svg}");
        assert!(svg.contains("viewBox=\"0 0 4.25 9\""));
    }

    #[test]
    fn shapes_are_grouped_per_pad() {
        let svg = svg_from_layers(&line_layers()).unwrap();
        assert_eq!(svg.matches("<g id=\"electrodes-pad1\">").count(), 1);
        assert_eq!(svg.matches("<line ").count(), 2);
        assert!(svg.contains("stroke-linecap=\"round\""));
        assert!(!svg.contains("id=\"solder_mask\""));
    }

    #[test]
    fn hatched_diamond_renders_outline_and_fill_lines() {
        let mut layers = LayerSet::new();
        let d = Diamond::new(DiamondParams {
            origin: Point::new(5.0, 0.0),
            diagonal: 10.0,
            fill: 0.5,
            stroke_width: 0.5,
            pattern: HatchPattern::Forward,
            ..DiamondParams::default()
        })
        .unwrap();
        let hatch = d.fill_lines().len();
        layers.electrodes.push(d);
        let svg = svg_from_layers(&layers).unwrap();
        assert_eq!(svg.matches("<polygon ").count(), 1);
        assert!(svg.contains("fill=\"none\""));
        assert_eq!(svg.matches("<line ").count(), hatch);
    }

    #[test]
    fn empty_layers_are_rejected() {
        assert!(matches!(svg_from_layers(&LayerSet::new()), Err(ExportError::Empty)));
    }
}
