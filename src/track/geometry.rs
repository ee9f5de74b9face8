//! Unit to pixel arithmetic for a vertical track.
//!
//! Two rounding paths coexist on purpose. Grid lines, band heights and
//! click hit-testing use integer floor division of whole units. Section
//! starts and the entry point and header markers scale the fractional unit
//! position and truncate; the selection takes the ratio to the track length
//! first. The paths disagree by a pixel at some boundaries.

use serde::{Deserialize, Serialize};

/// Pixel rectangle of the track, reduced to its vertical extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackGeometry {
    /// First pixel row of the track
    pub top: i64,
    /// Height of the track in pixels
    pub height: i64,
}

impl TrackGeometry {
    pub fn new(top: i64, height: i64) -> Self {
        Self { top, height }
    }

    pub fn is_valid(&self) -> bool {
        self.height > 0
    }

    /// Drawable rows below `top`; the last row is `top + span`.
    fn span(&self) -> i64 {
        self.height - 1
    }

    /// Row of the boundary above `unit` (integer path).
    pub fn grid_line_y(&self, unit: u64, total_units: u64) -> Option<i64> {
        if total_units == 0 || !self.is_valid() {
            return None;
        }
        let y = i128::from(unit) * i128::from(self.span()) / i128::from(total_units);
        i64::try_from(y).ok().map(|y| self.top.saturating_add(y))
    }

    /// Rows of the first `limit` unit boundaries.
    pub fn grid_lines(&self, total_units: u64, limit: usize) -> Vec<i64> {
        (0..total_units)
            .take(limit)
            .filter_map(|unit| self.grid_line_y(unit, total_units))
            .collect()
    }

    /// Row of a fractional unit position (real path).
    pub fn position_y(&self, unit: f64, total_units: u64) -> Option<i64> {
        if total_units == 0 || !self.is_valid() || !unit.is_finite() || unit < 0.0 {
            return None;
        }
        let offset = unit * self.span() as f64 / total_units as f64;
        Some(self.top.saturating_add(offset as i64))
    }

    /// Height of a section band: whole units scaled to the track, then
    /// scaled by the fill ratio, plus one row for any visible band.
    pub fn band_height(&self, unit_count: u64, fill_ratio: f64, total_units: u64) -> i64 {
        if total_units == 0 || !self.is_valid() {
            return 0;
        }
        let full = i128::from(unit_count) * i128::from(self.height) / i128::from(total_units);
        let full = i64::try_from(full).unwrap_or(i64::MAX);
        let filled = (full as f64 * fill_ratio) as i64;
        if filled > 0 {
            filled + 1
        } else {
            0
        }
    }

    /// Rows `(y1, y2)` spanned by a selection given in fractional units.
    ///
    /// The ratio to the track length is taken first, then scaled, and the
    /// lower edge is pushed one row down.
    pub fn selection_span(
        &self,
        start_unit: f64,
        end_unit: f64,
        total_units: u64,
    ) -> Option<(i64, i64)> {
        if total_units == 0 || !self.is_valid() {
            return None;
        }
        let total = total_units as f64;
        let span = self.span() as f64;
        let top = self.top as f64;
        let y1 = top + (start_unit / total) * span;
        let y2 = top + (end_unit / total) * span + 1.0;
        Some((y1 as i64, y2 as i64))
    }

    /// Unit whose integer band `[grid_line_y(u), grid_line_y(u + 1))`
    /// contains row `pos_y`; the last unit also owns the bottom row.
    ///
    /// When several units share a row, the highest one wins.
    ///
    /// A row exactly on a grid line belongs to the unit starting there.
    /// Diagrams that instead hand the rows `(y(u - 1), y(u)]` to unit `u`
    /// resolve most rows one unit later than this.
    pub fn unit_at(&self, pos_y: i64, total_units: u64) -> Option<u64> {
        if total_units == 0 || !self.is_valid() {
            return None;
        }
        let offset = pos_y.checked_sub(self.top)?;
        let span = self.span();
        if offset < 0 || offset > span {
            return None;
        }
        let last = total_units - 1;
        if span == 0 {
            return Some(last);
        }
        // Largest u with floor(u * span / total) <= offset.
        let bound = (i128::from(offset) + 1) * i128::from(total_units);
        let span = i128::from(span);
        let unit = (bound + span - 1) / span - 1;
        let unit = u64::try_from(unit).unwrap_or(last);
        Some(unit.min(last))
    }
}
