//! Solder mask and silkscreen around an electrode array.

use asmr_core::{Color, Layer, Line, LineCap, Point, Rectangle};

use super::pads::{PadNumbering, Polarity};
use super::ArrayFrame;

pub const SILKSCREEN_WIDTH: f64 = 0.12;

/// Reference grid every `scaling` node boundaries plus an outline of the whole artwork.
pub fn layout_silkscreen(frame: &ArrayFrame, scaling: usize, color: Color, silkscreen: &mut Layer) {
    let (cols, rows) = frame.size;
    let (top, bottom) = (frame.boundary_y(0), frame.boundary_y(rows));
    let (left, right) = (frame.boundary_x(0), frame.boundary_x(cols));
    let line = |start: Point, end: Point| {
        Line::new(start, end, SILKSCREEN_WIDTH)
            .with_cap(LineCap::Round)
            .with_color(color)
    };

    for b in boundaries(cols, scaling) {
        let x = frame.boundary_x(b);
        silkscreen.push(line(Point::new(x, top), Point::new(x, bottom)));
    }
    for b in boundaries(rows, scaling) {
        let y = frame.boundary_y(b);
        silkscreen.push(line(Point::new(left, y), Point::new(right, y)));
    }

    let inset = SILKSCREEN_WIDTH / 2.0;
    silkscreen.push(
        Rectangle::new(
            Point::new(inset, inset),
            Point::new(frame.extent.0 - inset, frame.extent.1 - inset),
            SILKSCREEN_WIDTH,
        )
        .outlined()
        .with_color(color),
    );
}

fn boundaries(count: usize, step: usize) -> Vec<usize> {
    let mut out: Vec<usize> = (0..=count).step_by(step.max(1)).collect();
    if out.last() != Some(&count) {
        out.push(count);
    }
    out
}

/// One mask opening per node, inset by `padding` on every side.
pub fn layout_mask_openings(frame: &ArrayFrame, padding: f64, color: Color, mask: &mut Layer) {
    let (cols, rows) = frame.size;
    for r in 0..rows {
        for c in 0..cols {
            let (tl, br) = frame.cell(c, r);
            mask.push(
                Rectangle::new(
                    tl.offset(padding, padding),
                    br.offset(-padding, -padding),
                    0.0,
                )
                .with_color(color),
            );
        }
    }
}

/// Copy the electrodes of the selected polarities into the mask layer.
///
/// The copies are independent values; the electrode layer is left untouched.
pub fn copy_electrodes_to_mask(
    electrodes: &Layer,
    pads: &PadNumbering,
    mask_x: bool,
    mask_y: bool,
    mask: &mut Layer,
) {
    for shape in electrodes.shapes() {
        let selected = match shape.group().and_then(|g| pads.polarity(g)) {
            Some(Polarity::X) => mask_x,
            Some(Polarity::Y) => mask_y,
            None => false,
        };
        if selected {
            mask.push(shape.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asmr_core::{LayerKind, Shape};

    fn frame(size: (usize, usize)) -> ArrayFrame {
        ArrayFrame {
            origin: Point::new(0.5, 0.5),
            pitch: 4.0,
            size,
            extent: (size.0 as f64 * 4.0 + 1.0, size.1 as f64 * 4.0 + 1.0),
        }
    }

    #[test]
    fn last_boundary_is_always_drawn() {
        assert_eq!(boundaries(5, 2), [0, 2, 4, 5]);
        assert_eq!(boundaries(4, 2), [0, 2, 4]);
        assert_eq!(boundaries(1, 3), [0, 1]);
    }

    #[test]
    fn silkscreen_has_grid_and_outline() {
        let mut layer = Layer::new(LayerKind::Silkscreen);
        layout_silkscreen(&frame((3, 2)), 1, Color::BLACK, &mut layer);
        assert_eq!(layer.len(), 4 + 3 + 1);
        let b = layer.bounds();
        assert!(b.min_x >= 0.0 && b.min_y >= 0.0);
        assert!(matches!(layer.shapes().last(), Some(Shape::Rectangle(r)) if !r.fill));
    }

    #[test]
    fn mask_openings_are_inset() {
        let mut layer = Layer::new(LayerKind::SolderMask);
        layout_mask_openings(&frame((2, 2)), 0.5, Color::BLACK, &mut layer);
        assert_eq!(layer.len(), 4);
        let Some(Shape::Rectangle(first)) = layer.shapes().first() else {
            panic!("expected rectangle");
        };
        assert_eq!(first.start, Point::new(1.0, 1.0));
        assert_eq!(first.end, Point::new(4.0, 4.0));
    }

    #[test]
    fn electrode_copy_selects_by_polarity() {
        let pads = PadNumbering::new((2, 2), (1, 1));
        let mut electrodes = Layer::new(LayerKind::Electrodes);
        for group in ["1", "2", "3", "4"] {
            electrodes.push(
                Line::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0), 0.5)
                    .with_group(Some(group.to_string())),
            );
        }
        let mut mask = Layer::new(LayerKind::SolderMask);
        copy_electrodes_to_mask(&electrodes, &pads, false, true, &mut mask);
        let groups: Vec<_> = mask.shapes().iter().filter_map(Shape::group).collect();
        assert_eq!(groups, ["3", "4"]);
        assert_eq!(electrodes.len(), 4);
    }
}
