use serde::Serialize;

use crate::shape::{Bounds, Shape};

/// The three layers a touch grid is drawn on. Export targets follow the layer, not the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Electrodes,
    SolderMask,
    Silkscreen,
}

impl LayerKind {
    pub const ALL: [LayerKind; 3] = [
        LayerKind::Electrodes,
        LayerKind::SolderMask,
        LayerKind::Silkscreen,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Electrodes => "electrodes",
            LayerKind::SolderMask => "solder_mask",
            LayerKind::Silkscreen => "silkscreen",
        }
    }
}

/// Ordered, append-only list of shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    kind: LayerKind,
    shapes: Vec<Shape>,
}

impl Layer {
    #[must_use]
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            shapes: Vec::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn push(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    pub fn extend<I>(&mut self, shapes: I)
    where
        I: IntoIterator,
        I::Item: Into<Shape>,
    {
        self.shapes.extend(shapes.into_iter().map(Into::into));
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds::empty();
        for s in &self.shapes {
            b.union(&s.bounds());
        }
        b
    }
}

/// The layered shape list produced by a layout run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSet {
    pub electrodes: Layer,
    pub solder_mask: Layer,
    pub silkscreen: Layer,
}

impl LayerSet {
    #[must_use]
    pub fn new() -> Self {
        Self {
            electrodes: Layer::new(LayerKind::Electrodes),
            solder_mask: Layer::new(LayerKind::SolderMask),
            silkscreen: Layer::new(LayerKind::Silkscreen),
        }
    }

    #[must_use]
    pub fn get(&self, kind: LayerKind) -> &Layer {
        match kind {
            LayerKind::Electrodes => &self.electrodes,
            LayerKind::SolderMask => &self.solder_mask,
            LayerKind::Silkscreen => &self.silkscreen,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        LayerKind::ALL.into_iter().map(move |k| self.get(k))
    }

    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.iter().map(Layer::len).sum()
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds::empty();
        for layer in self.iter() {
            b.union(&layer.bounds());
        }
        b
    }
}

impl Default for LayerSet {
    fn default() -> Self {
        Self::new()
    }
}
