//! Splitting a segment into equal-width bays.

/// Bay count and width for one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BayLayout {
    pub count: usize,
    pub width: f64,
}

/// One bay, as distances along the segment's forward axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bay {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

impl Bay {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn center(&self) -> f64 {
        0.5 * (self.start + self.end)
    }
}

/// `count = max(1, floor(length / spacing))`, `width = length / count`.
///
/// `spacing` is a target, not a modulus: the resulting width is usually a
/// little larger. Callers validate `spacing > 0` beforehand.
#[must_use]
pub fn subdivide(length: f64, spacing: f64) -> BayLayout {
    let ratio = (length / spacing).floor();
    let count = if ratio.is_finite() && ratio >= 1.0 { ratio as usize } else { 1 };
    BayLayout {
        count,
        width: length / count as f64,
    }
}

impl BayLayout {
    /// Bays in forward order. The last bay ends exactly at `count * width`.
    pub fn bays(&self) -> impl Iterator<Item = Bay> + '_ {
        (0..self.count).map(move |index| Bay {
            index,
            start: self.width * index as f64,
            end: self.width * (index + 1) as f64,
        })
    }

    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.width * self.count as f64
    }
}
