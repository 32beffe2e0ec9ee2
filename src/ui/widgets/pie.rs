//! Pie / doughnut widget drawn cell by cell
//!
//! Each series becomes one ring, outermost first. Slices start at twelve
//! o'clock and run clockwise, one slice per label.

use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use super::palette;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

pub struct PieChart<'a> {
    rings: Vec<&'a [f64]>,
    /// Fraction of the radius left empty in the middle (0 for a pie)
    cutout: f64,
    symbol: char,
}

impl<'a> PieChart<'a> {
    pub fn new(rings: Vec<&'a [f64]>) -> Self {
        Self {
            rings,
            cutout: 0.0,
            symbol: '█',
        }
    }

    pub fn cutout(mut self, cutout: f64) -> Self {
        self.cutout = cutout.clamp(0.0, 0.95);
        self
    }
}

/// Slice index at `fraction` (0..1) of the full turn; zero-sum rings have no slices
pub fn slice_at(values: &[f64], fraction: f64) -> Option<usize> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        return None;
    }
    let target = fraction.clamp(0.0, 1.0) * total;
    let mut acc = 0.0;
    for (index, value) in values.iter().enumerate() {
        if *value <= 0.0 {
            continue;
        }
        acc += value;
        if target < acc {
            return Some(index);
        }
    }
    values.iter().rposition(|v| *v > 0.0)
}

/// Ring index for a normalised distance from the centre (1.0 = outer edge)
pub fn ring_at(distance: f64, cutout: f64, rings: usize) -> Option<usize> {
    if rings == 0 || distance > 1.0 || distance < cutout {
        return None;
    }
    let band = (1.0 - cutout) / rings as f64;
    let from_edge = ((1.0 - distance) / band) as usize;
    Some(from_edge.min(rings - 1))
}

/// Clockwise fraction of a full turn starting at twelve o'clock
fn turn_fraction(dx: f64, dy: f64) -> f64 {
    let angle = dy.atan2(dx) + FRAC_PI_2;
    angle.rem_euclid(TAU) / TAU
}

impl<'a> Widget for PieChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.rings.is_empty() {
            return;
        }

        let radius_y = f64::from(area.height) / 2.0;
        let radius_x = (radius_y * CELL_ASPECT).min(f64::from(area.width) / 2.0);
        let radius_y = radius_x / CELL_ASPECT;
        let cx = f64::from(area.x) + f64::from(area.width) / 2.0;
        let cy = f64::from(area.y) + f64::from(area.height) / 2.0;

        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                // Sample the middle of the cell; y grows downwards on screen
                let dx = (f64::from(x) + 0.5 - cx) / radius_x;
                let dy = (f64::from(y) + 0.5 - cy) / radius_y;
                let distance = (dx * dx + dy * dy).sqrt();
                let Some(ring) = ring_at(distance, self.cutout, self.rings.len()) else {
                    continue;
                };
                let Some(slice) = slice_at(self.rings[ring], turn_fraction(dx, dy)) else {
                    continue;
                };
                buf.get_mut(x, y)
                    .set_char(self.symbol)
                    .set_style(Style::default().fg(palette::color(slice)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_at_follows_proportions() {
        let values = [1.0, 3.0];
        assert_eq!(slice_at(&values, 0.1), Some(0));
        assert_eq!(slice_at(&values, 0.3), Some(1));
        assert_eq!(slice_at(&values, 1.0), Some(1));
    }

    #[test]
    fn test_slice_at_skips_zero_values() {
        assert_eq!(slice_at(&[0.0, 2.0, 0.0], 0.0), Some(1));
        assert_eq!(slice_at(&[0.0, 0.0], 0.5), None);
    }

    #[test]
    fn test_ring_at_respects_cutout() {
        assert_eq!(ring_at(0.2, 0.5, 1), None);
        assert_eq!(ring_at(0.8, 0.5, 1), Some(0));
        assert_eq!(ring_at(1.2, 0.0, 1), None);
        assert_eq!(ring_at(0.95, 0.0, 2), Some(0));
        assert_eq!(ring_at(0.1, 0.0, 2), Some(1));
    }

    #[test]
    fn test_turn_fraction_starts_at_top() {
        assert!(turn_fraction(0.0, -1.0).abs() < 1e-9);
        assert!((turn_fraction(1.0, 0.0) - 0.25).abs() < 1e-9);
        assert!((turn_fraction(0.0, 1.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_render_fills_cells() {
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        let values = [1.0, 1.0];
        PieChart::new(vec![&values[..]]).render(area, &mut buf);
        let filled = buf.content().iter().filter(|c| c.symbol() == "█").count();
        assert!(filled > 0);
    }
}
