//! KiCad footprint (`.kicad_mod`) export.
//!
//! Electrode shapes that share a group become one custom SMD pad. The pad is anchored at the
//! start point of the group's first shape and every primitive is stored relative to it. Mask
//! and silkscreen shapes become plain graphic items on `F.Mask` and `F.SilkS`.

use std::collections::HashMap;

use asmr_core::{Diamond, Layer, LayerSet, Line, LineCap, Point, Rectangle, Shape};

use crate::templates::{render_template, FOOTPRINT_TEMPLATE};
use crate::{group_shapes, ExportError, ExportMeta};

const GENERATOR: &str = "asmr";
const MIN_ANCHOR: f64 = 0.01;

const COPPER: &str = "F.Cu";
const MASK: &str = "F.Mask";
const SILKSCREEN: &str = "F.SilkS";

/// One electrically connected electrode: a group of shapes with a shared local origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Pad {
    pub number: String,
    pub origin: Point,
    pub anchor_size: f64,
    pub primitives: Vec<String>,
}

pub fn kicad_mod_from_layers(layers: &LayerSet, meta: &ExportMeta) -> Result<String, ExportError> {
    if layers.shape_count() == 0 {
        return Err(ExportError::Empty);
    }

    let mut loose_copper: Vec<&Shape> = Vec::new();
    let mut pads: Vec<Pad> = Vec::new();
    for (group, shapes) in group_shapes(layers.electrodes.shapes()) {
        match group {
            Some(number) => pads.push(build_pad(number, &shapes)),
            None => loose_copper.extend(shapes),
        }
    }

    let ctx = HashMap::from([
        ("footprint_name".to_string(), quote(&meta.name)),
        ("generator".to_string(), GENERATOR.to_string()),
        ("description".to_string(), quote(&meta.description)),
        ("silkscreen".to_string(), graphic_layer(&layers.silkscreen, SILKSCREEN)),
        ("mask".to_string(), graphic_layer(&layers.solder_mask, MASK)),
        (
            "copper".to_string(),
            loose_copper
                .iter()
                .flat_map(|s| graphic_items(s, COPPER))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        (
            "pads".to_string(),
            pads.iter().map(render_pad).collect::<Vec<_>>().join("\n"),
        ),
    ]);
    render_template(FOOTPRINT_TEMPLATE, &ctx)
}

/// Coalesce the shapes of one group into a pad anchored at the first shape's start point.
#[must_use]
pub fn build_pad(number: &str, shapes: &[&Shape]) -> Pad {
    let origin = shapes.first().map(|s| s.start()).unwrap_or_default();
    let anchor_size = shapes
        .first()
        .map(|s| s.stroke_width())
        .filter(|w| *w > MIN_ANCHOR)
        .unwrap_or(MIN_ANCHOR);
    let primitives = shapes
        .iter()
        .flat_map(|s| pad_primitives(s, origin))
        .collect();
    Pad {
        number: number.to_string(),
        origin,
        anchor_size,
        primitives,
    }
}

fn render_pad(pad: &Pad) -> String {
    let mut out = format!(
        "  (pad {} smd custom (at {} {}) (size {} {}) (layers \"{COPPER}\")\n",
        quote(&pad.number),
        fmt_mm(pad.origin.x),
        fmt_mm(pad.origin.y),
        fmt_mm(pad.anchor_size),
        fmt_mm(pad.anchor_size),
    );
    out.push_str("    (options (clearance outline) (anchor circle))\n");
    out.push_str("    (primitives\n");
    for p in &pad.primitives {
        out.push_str("      ");
        out.push_str(p);
        out.push('\n');
    }
    out.push_str("    )\n  )");
    out
}

fn pad_primitives(shape: &Shape, origin: Point) -> Vec<String> {
    let rel = |p: Point| Point::new(p.x - origin.x, p.y - origin.y);
    match shape {
        Shape::Line(line) => pad_line(line, rel).into_iter().collect(),
        Shape::Rectangle(rect) => {
            let (tl, br) = rect.normalized();
            let (tl, br) = (rel(tl), rel(br));
            let (width, fill) = rect_stroke(rect);
            vec![format!(
                "(gr_rect (start {} {}) (end {} {}) (width {}) (fill {}))",
                fmt_mm(tl.x),
                fmt_mm(tl.y),
                fmt_mm(br.x),
                fmt_mm(br.y),
                fmt_mm(width),
                if fill { "yes" } else { "none" },
            )]
        }
        Shape::Diamond(diamond) => {
            let pts: Vec<Point> = diamond.polygon().into_iter().map(rel).collect();
            let mut out = vec![format!(
                "(gr_poly (pts {}) (width {}) (fill {}))",
                xy_list(&pts),
                fmt_mm(diamond.stroke_width()),
                if diamond.is_solid() { "yes" } else { "none" },
            )];
            out.extend(diamond.fill_lines().iter().filter_map(|l| pad_line(l, rel)));
            out
        }
    }
}

// Pad line primitives always have round ends, so butt-capped lines become filled quads.
fn pad_line(line: &Line, rel: impl Fn(Point) -> Point) -> Option<String> {
    match line.cap {
        LineCap::Round => Some(format!(
            "(gr_line (start {} {}) (end {} {}) (width {}))",
            fmt_mm(rel(line.start).x),
            fmt_mm(rel(line.start).y),
            fmt_mm(rel(line.end).x),
            fmt_mm(rel(line.end).y),
            fmt_mm(line.width),
        )),
        LineCap::Butt => {
            let quad = line.stroke_outline()?;
            let pts: Vec<Point> = quad.into_iter().map(rel).collect();
            Some(format!("(gr_poly (pts {}) (width 0) (fill yes))", xy_list(&pts)))
        }
    }
}

fn graphic_layer(layer: &Layer, kicad_layer: &str) -> String {
    layer
        .shapes()
        .iter()
        .flat_map(|s| graphic_items(s, kicad_layer))
        .collect::<Vec<_>>()
        .join("\n")
}

fn graphic_items(shape: &Shape, kicad_layer: &str) -> Vec<String> {
    match shape {
        Shape::Line(line) => graphic_line(line, kicad_layer).into_iter().collect(),
        Shape::Rectangle(rect) => vec![graphic_rect(rect, kicad_layer)],
        Shape::Diamond(diamond) => graphic_diamond(diamond, kicad_layer),
    }
}

fn graphic_line(line: &Line, kicad_layer: &str) -> Option<String> {
    match line.cap {
        LineCap::Round => Some(format!(
            "  (fp_line (start {} {}) (end {} {}) (stroke (width {}) (type solid)) (layer \"{kicad_layer}\"))",
            fmt_mm(line.start.x),
            fmt_mm(line.start.y),
            fmt_mm(line.end.x),
            fmt_mm(line.end.y),
            fmt_mm(line.width),
        )),
        LineCap::Butt => {
            let quad = line.stroke_outline()?;
            Some(format!(
                "  (fp_poly (pts {}) (stroke (width 0) (type solid)) (fill solid) (layer \"{kicad_layer}\"))",
                xy_list(&quad),
            ))
        }
    }
}

fn graphic_rect(rect: &Rectangle, kicad_layer: &str) -> String {
    let (tl, br) = rect.normalized();
    let (width, fill) = rect_stroke(rect);
    format!(
        "  (fp_rect (start {} {}) (end {} {}) (stroke (width {}) (type solid)) (fill {}) (layer \"{kicad_layer}\"))",
        fmt_mm(tl.x),
        fmt_mm(tl.y),
        fmt_mm(br.x),
        fmt_mm(br.y),
        fmt_mm(width),
        if fill { "solid" } else { "none" },
    )
}

fn graphic_diamond(diamond: &Diamond, kicad_layer: &str) -> Vec<String> {
    let mut out = vec![format!(
        "  (fp_poly (pts {}) (stroke (width {}) (type solid)) (fill {}) (layer \"{kicad_layer}\"))",
        xy_list(&diamond.polygon()),
        fmt_mm(diamond.stroke_width()),
        if diamond.is_solid() { "solid" } else { "none" },
    )];
    out.extend(
        diamond
            .fill_lines()
            .iter()
            .filter_map(|l| graphic_line(l, kicad_layer)),
    );
    out
}

fn rect_stroke(rect: &Rectangle) -> (f64, bool) {
    if rect.fill {
        (0.0, true)
    } else {
        (rect.width, false)
    }
}

fn xy_list(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("(xy {} {})", fmt_mm(p.x), fmt_mm(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn fmt_mm(v: f64) -> String {
    let v = if v.abs() < 1e-9 { 0.0 } else { v };
    let s = format!("{v:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
