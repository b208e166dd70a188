use crate::foundation::core::Canvas;
use crate::sample::placement::Placement;

/// Final ("after") arrangement: one horizontal row, largest circle on the left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowLayout {
    /// Circle ids from left to right.
    pub order: Vec<usize>,
    /// Final center x, indexed by circle id.
    pub center_x: Vec<i64>,
    pub line_y: i64,
    /// Sum of diameters plus inter-circle spacing.
    pub total_width: i64,
    /// Left edge of the first circle.
    pub start_x: i64,
}

impl RowLayout {
    /// `true` when the row stays within `budget` pixels.
    pub fn fits(&self, budget: i64) -> bool {
        self.total_width <= budget
    }
}

/// Width of a row of circles with the given radii.
pub fn row_width(radii: &[u32], spacing: u32) -> i64 {
    let diameters: i64 = radii.iter().map(|&r| 2 * i64::from(r)).sum();
    diameters + radii.len().saturating_sub(1) as i64 * i64::from(spacing)
}

/// Sort by circumference (descending, stable) and pack left to right, centered on the canvas.
///
/// Pure: always produces a layout, even one wider than the canvas. Callers check
/// [`RowLayout::fits`].
pub fn compute_row(placed: &[Placement], canvas: Canvas, spacing: u32) -> RowLayout {
    let mut sorted: Vec<&Placement> = placed.iter().collect();
    // Circumference is monotonic in radius, so comparing radii is exact.
    sorted.sort_by(|a, b| b.radius.cmp(&a.radius));

    let radii: Vec<u32> = sorted.iter().map(|p| p.radius).collect();
    let total_width = row_width(&radii, spacing);
    let start_x = (i64::from(canvas.width) - total_width).div_euclid(2);

    let max_id = placed.iter().map(|p| p.id + 1).max().unwrap_or(0);
    let mut center_x = vec![0i64; max_id];
    let mut x = start_x;
    for p in &sorted {
        let r = i64::from(p.radius);
        center_x[p.id] = x + r;
        x += 2 * r + i64::from(spacing);
    }

    RowLayout {
        order: sorted.iter().map(|p| p.id).collect(),
        center_x,
        line_y: canvas.mid_y(),
        total_width,
        start_x,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/row.rs"]
mod tests;
