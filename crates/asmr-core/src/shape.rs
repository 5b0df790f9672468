use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::hatch;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    #[error("{what} must be a finite number (got {value})")]
    NotFinite { what: &'static str, value: f64 },
    #[error("diamond fill must be >= 0 (got {0})")]
    NegativeFill(f64),
    #[error("diamond stroke width must be >= 0 (got {0})")]
    NegativeStroke(f64),
    #[error("diamond diagonal {diagonal} leaves no room for stroke width {stroke_width}")]
    DiagonalTooSmall { diagonal: f64, stroke_width: f64 },
    #[error("unknown hatch pattern '{0}' (expected '/', '\\' or '#')")]
    UnknownPattern(char),
}

/// A position in millimeters, y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn update_point(&mut self, p: Point, pad: f64) {
        self.min_x = self.min_x.min(p.x - pad);
        self.min_y = self.min_y.min(p.y - pad);
        self.max_x = self.max_x.max(p.x + pad);
        self.max_y = self.max_y.max(p.y + pad);
    }

    pub fn union(&mut self, other: &Bounds) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.min_y.is_finite()
            && self.max_y.is_finite()
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

impl LineCap {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub width: f64,
    pub color: Color,
    pub cap: LineCap,
    pub group: Option<String>,
}

impl Line {
    #[must_use]
    pub fn new(start: Point, end: Point, width: f64) -> Self {
        Self {
            start,
            end,
            width,
            color: Color::BLACK,
            cap: LineCap::Butt,
            group: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: Option<String>) -> Self {
        self.group = group;
        self
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Outline of a butt-capped stroke as a quad, in drawing order.
    ///
    /// Returns `None` for zero-length lines.
    #[must_use]
    pub fn stroke_outline(&self) -> Option<[Point; 4]> {
        let len = self.length();
        if len <= f64::EPSILON {
            return None;
        }
        let h = self.width / 2.0;
        let nx = -(self.end.y - self.start.y) / len * h;
        let ny = (self.end.x - self.start.x) / len * h;
        Some([
            self.start.offset(nx, ny),
            self.end.offset(nx, ny),
            self.end.offset(-nx, -ny),
            self.start.offset(-nx, -ny),
        ])
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds::empty();
        match self.cap {
            LineCap::Round => {
                b.update_point(self.start, self.width / 2.0);
                b.update_point(self.end, self.width / 2.0);
            }
            LineCap::Butt => match self.stroke_outline() {
                Some(quad) => quad.into_iter().for_each(|p| b.update_point(p, 0.0)),
                None => b.update_point(self.start, 0.0),
            },
        }
        b
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub start: Point,
    pub end: Point,
    pub width: f64,
    pub fill: bool,
    pub color: Color,
    pub rx: f64,
    pub ry: f64,
    pub group: Option<String>,
}

impl Rectangle {
    /// Rectangle spanning two opposite corners, filled, with square corners.
    #[must_use]
    pub fn new(start: Point, end: Point, width: f64) -> Self {
        Self {
            start,
            end,
            width,
            fill: true,
            color: Color::BLACK,
            rx: 0.0,
            ry: 0.0,
            group: None,
        }
    }

    #[must_use]
    pub fn outlined(mut self) -> Self {
        self.fill = false;
        self
    }

    #[must_use]
    pub fn with_radius(mut self, rx: f64, ry: f64) -> Self {
        self.rx = rx;
        self.ry = ry;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: Option<String>) -> Self {
        self.group = group;
        self
    }

    /// Top-left and bottom-right corners regardless of construction order.
    #[must_use]
    pub fn normalized(&self) -> (Point, Point) {
        (
            Point::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y)),
            Point::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y)),
        )
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let pad = if self.fill { 0.0 } else { self.width / 2.0 };
        let mut b = Bounds::empty();
        b.update_point(self.start, pad);
        b.update_point(self.end, pad);
        b
    }
}

/// Which vertex of a diamond is folded away at the edge of a sensor array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cutoff {
    #[default]
    None,
    Top,
    Right,
    Bottom,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HatchPattern {
    #[serde(rename = "/")]
    Forward,
    #[serde(rename = "\\")]
    Backward,
    #[default]
    #[serde(rename = "#")]
    Cross,
}

impl HatchPattern {
    pub fn from_char(c: char) -> Result<Self, ShapeError> {
        match c {
            '/' => Ok(HatchPattern::Forward),
            '\\' => Ok(HatchPattern::Backward),
            '#' => Ok(HatchPattern::Cross),
            other => Err(ShapeError::UnknownPattern(other)),
        }
    }

    #[must_use]
    pub fn as_char(&self) -> char {
        match self {
            HatchPattern::Forward => '/',
            HatchPattern::Backward => '\\',
            HatchPattern::Cross => '#',
        }
    }

    #[must_use]
    pub fn has_forward(&self) -> bool {
        matches!(self, HatchPattern::Forward | HatchPattern::Cross)
    }

    #[must_use]
    pub fn has_backward(&self) -> bool {
        matches!(self, HatchPattern::Backward | HatchPattern::Cross)
    }
}

/// Construction parameters for [`Diamond`].
#[derive(Debug, Clone, PartialEq)]
pub struct DiamondParams {
    /// Top vertex of the nominal (un-inset) diamond.
    pub origin: Point,
    /// Nominal vertex-to-vertex diagonal.
    pub diagonal: f64,
    /// 0 = outline, 1 = solid, anything else = hatched.
    pub fill: f64,
    pub stroke_width: f64,
    pub pattern: HatchPattern,
    pub cutoff: Cutoff,
    pub color: Color,
    pub group: Option<String>,
}

impl Default for DiamondParams {
    fn default() -> Self {
        Self {
            origin: Point::default(),
            diagonal: 1.0,
            fill: 1.0,
            stroke_width: 0.0,
            pattern: HatchPattern::Cross,
            cutoff: Cutoff::None,
            color: Color::BLACK,
            group: None,
        }
    }
}

/// A square rotated by 45 degrees, optionally folded in half at an array edge.
///
/// The outline is inset by half a stroke (measured perpendicular to the edges) so the stroke's
/// outer edge lands on the nominal outline. The hatch lines are computed on construction and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diamond {
    vertices: [Point; 4],
    diagonal: f64,
    fill: f64,
    stroke_width: f64,
    pattern: HatchPattern,
    cutoff: Cutoff,
    color: Color,
    group: Option<String>,
    fill_lines: Vec<Line>,
}

impl Diamond {
    pub fn new(params: DiamondParams) -> Result<Self, ShapeError> {
        let DiamondParams {
            origin,
            diagonal,
            fill,
            stroke_width,
            pattern,
            cutoff,
            color,
            group,
        } = params;

        for (what, value) in [
            ("diamond origin x", origin.x),
            ("diamond origin y", origin.y),
            ("diamond diagonal", diagonal),
            ("diamond fill", fill),
            ("diamond stroke width", stroke_width),
        ] {
            if !value.is_finite() {
                return Err(ShapeError::NotFinite { what, value });
            }
        }
        if fill < 0.0 {
            return Err(ShapeError::NegativeFill(fill));
        }
        if stroke_width < 0.0 {
            return Err(ShapeError::NegativeStroke(stroke_width));
        }

        let inset = std::f64::consts::SQRT_2 * stroke_width / 2.0;
        let d = diagonal - 2.0 * inset;
        if d <= 0.0 {
            return Err(ShapeError::DiagonalTooSmall {
                diagonal,
                stroke_width,
            });
        }

        let top = Point::new(origin.x, origin.y + inset);
        let mut vertices = [
            top,
            top.offset(d / 2.0, d / 2.0),
            top.offset(0.0, d),
            top.offset(-d / 2.0, d / 2.0),
        ];
        match cutoff {
            Cutoff::None => {}
            Cutoff::Top => vertices[0] = vertices[1],
            Cutoff::Right => vertices[1] = vertices[2],
            Cutoff::Bottom => vertices[2] = vertices[3],
            Cutoff::Left => vertices[3] = vertices[0],
        }

        let mut diamond = Self {
            vertices,
            diagonal: d,
            fill,
            stroke_width,
            pattern,
            cutoff,
            color,
            group,
            fill_lines: Vec::new(),
        };
        diamond.fill_lines = hatch::fill_lines(&diamond);
        Ok(diamond)
    }

    /// Top, right, bottom, left, after the cutoff was applied.
    #[must_use]
    pub fn vertices(&self) -> [Point; 4] {
        self.vertices
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        self.vertices[0]
    }

    /// Effective diagonal after the stroke inset.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        self.diagonal
    }

    #[must_use]
    pub fn side_length(&self) -> f64 {
        self.diagonal / std::f64::consts::SQRT_2
    }

    #[must_use]
    pub fn fill(&self) -> f64 {
        self.fill
    }

    #[must_use]
    pub fn is_solid(&self) -> bool {
        self.fill == 1.0
    }

    #[must_use]
    pub fn is_hatched(&self) -> bool {
        self.fill != 0.0 && self.fill != 1.0
    }

    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    #[must_use]
    pub fn pattern(&self) -> HatchPattern {
        self.pattern
    }

    #[must_use]
    pub fn cutoff(&self) -> Cutoff {
        self.cutoff
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    #[must_use]
    pub fn fill_lines(&self) -> &[Line] {
        &self.fill_lines
    }

    /// Outline points with collapsed (duplicate) vertices removed.
    #[must_use]
    pub fn polygon(&self) -> Vec<Point> {
        let mut pts: Vec<Point> = Vec::with_capacity(4);
        for p in self.vertices {
            if pts.last() != Some(&p) {
                pts.push(p);
            }
        }
        if pts.len() > 1 && pts.first() == pts.last() {
            pts.pop();
        }
        pts
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds::empty();
        for p in self.vertices {
            b.update_point(p, self.stroke_width / 2.0);
        }
        b
    }
}

/// Closed set of drawable shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
    Diamond(Diamond),
}

impl Shape {
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        match self {
            Shape::Line(l) => l.group.as_deref(),
            Shape::Rectangle(r) => r.group.as_deref(),
            Shape::Diamond(d) => d.group(),
        }
    }

    /// The point a footprint pad built from this shape is anchored at.
    #[must_use]
    pub fn start(&self) -> Point {
        match self {
            Shape::Line(l) => l.start,
            Shape::Rectangle(r) => r.start,
            Shape::Diamond(d) => d.origin(),
        }
    }

    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        match self {
            Shape::Line(l) => l.width,
            Shape::Rectangle(r) => r.width,
            Shape::Diamond(d) => d.stroke_width(),
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        match self {
            Shape::Line(l) => l.bounds(),
            Shape::Rectangle(r) => r.bounds(),
            Shape::Diamond(d) => d.bounds(),
        }
    }

    /// Every coordinate this shape carries, hatch lines included.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        match self {
            Shape::Line(l) => vec![l.start, l.end],
            Shape::Rectangle(r) => vec![r.start, r.end],
            Shape::Diamond(d) => {
                let mut pts = d.vertices().to_vec();
                for l in d.fill_lines() {
                    pts.push(l.start);
                    pts.push(l.end);
                }
                pts
            }
        }
    }
}

impl From<Line> for Shape {
    fn from(l: Line) -> Self {
        Shape::Line(l)
    }
}

impl From<Rectangle> for Shape {
    fn from(r: Rectangle) -> Self {
        Shape::Rectangle(r)
    }
}

impl From<Diamond> for Shape {
    fn from(d: Diamond) -> Self {
        Shape::Diamond(d)
    }
}
