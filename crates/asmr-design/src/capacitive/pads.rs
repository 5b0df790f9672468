//! Pad numbering shared by both layouts.
//!
//! Pads are 1-based. Column (X) pads come first and are numbered `1..=ceil(cols / xres)`;
//! row (Y) pads follow from `cols + 1`. An id `<= cols` is therefore always an X pad, which the
//! solder-mask electrode copy relies on.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadNumbering {
    columns: usize,
    rows: usize,
    per_x_pad: usize,
    per_y_pad: usize,
}

impl PadNumbering {
    #[must_use]
    pub fn new(size: (usize, usize), resolution: (usize, usize)) -> Self {
        Self {
            columns: size.0,
            rows: size.1,
            per_x_pad: resolution.0.max(1),
            per_y_pad: resolution.1.max(1),
        }
    }

    #[must_use]
    pub fn x_pad(&self, column: usize) -> usize {
        1 + column / self.per_x_pad
    }

    #[must_use]
    pub fn y_pad(&self, row: usize) -> usize {
        self.columns + 1 + row / self.per_y_pad
    }

    #[must_use]
    pub fn x_group(&self, column: usize) -> String {
        self.x_pad(column).to_string()
    }

    #[must_use]
    pub fn y_group(&self, row: usize) -> String {
        self.y_pad(row).to_string()
    }

    /// Whether columns `c` and `c + 1` feed the same pad.
    #[must_use]
    pub fn x_ganged_with_next(&self, column: usize) -> bool {
        column + 1 < self.columns && self.x_pad(column) == self.x_pad(column + 1)
    }

    #[must_use]
    pub fn y_ganged_with_next(&self, row: usize) -> bool {
        row + 1 < self.rows && self.y_pad(row) == self.y_pad(row + 1)
    }

    #[must_use]
    pub fn any_x_ganged(&self) -> bool {
        self.per_x_pad > 1 && self.columns > 1
    }

    #[must_use]
    pub fn any_y_ganged(&self) -> bool {
        self.per_y_pad > 1 && self.rows > 1
    }

    #[must_use]
    pub fn pad_count(&self) -> usize {
        self.columns.div_ceil(self.per_x_pad) + self.rows.div_ceil(self.per_y_pad)
    }

    /// Polarity of a group tag, `None` when the tag is not a pad id.
    #[must_use]
    pub fn polarity(&self, group: &str) -> Option<Polarity> {
        let id: usize = group.parse().ok()?;
        match id {
            0 => None,
            id if id <= self.columns => Some(Polarity::X),
            _ => Some(Polarity::Y),
        }
    }
}
