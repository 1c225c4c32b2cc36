//! Occluded intervals within one octant

#[cfg(not(feature = "std"))]
use crate::compat::*;

/// Half-open slice `[start, end)` of an octant row, normalized to 0..1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub start: f64,
    pub end: f64,
}

impl Shadow {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Slice subtended by the cell `col` of `row`, seen from the observer
    pub fn project(row: i32, col: i32) -> Self {
        let start = f64::from(col) / f64::from(row + 2);
        let end = f64::from(col + 1) / f64::from(row + 1);
        Self::new(start, end)
    }

    /// Check if `other` lies entirely within this shadow
    pub fn contains(&self, other: &Shadow) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    fn overlaps(&self, other: &Shadow) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Sorted, disjoint shadows of one octant scan
#[derive(Debug, Clone, Default)]
pub struct ShadowLine {
    shadows: Vec<Shadow>,
}

impl ShadowLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shadows(&self) -> &[Shadow] {
        &self.shadows
    }

    /// A projection is hidden only when one shadow covers all of it
    pub fn is_in_shadow(&self, projection: &Shadow) -> bool {
        self.shadows.iter().any(|s| s.contains(projection))
    }

    /// One shadow spanning the whole octant
    pub fn is_full_shadow(&self) -> bool {
        matches!(self.shadows.as_slice(), [only] if only.start <= 0.0 && only.end >= 1.0)
    }

    /// Insert a shadow, merging it with the neighbours it touches
    pub fn add(&mut self, shadow: Shadow) {
        let index = self
            .shadows
            .iter()
            .position(|s| s.start >= shadow.start)
            .unwrap_or(self.shadows.len());

        let mut at = index;
        if index > 0 && self.shadows[index - 1].overlaps(&shadow) {
            let prev = &mut self.shadows[index - 1];
            prev.end = prev.end.max(shadow.end);
            at = index - 1;
        } else {
            self.shadows.insert(index, shadow);
        }

        // Swallow every following shadow the merged one now reaches
        while at + 1 < self.shadows.len() && self.shadows[at].overlaps(&self.shadows[at + 1]) {
            let next = self.shadows.remove(at + 1);
            let merged = &mut self.shadows[at];
            merged.end = merged.end.max(next.end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection() {
        let s = Shadow::project(0, 0);
        assert_eq!(s, Shadow::new(0.0, 1.0));
        let s = Shadow::project(3, 1);
        assert_eq!(s, Shadow::new(0.2, 0.5));
    }

    #[test]
    fn test_disjoint_shadows_stay_sorted() {
        let mut line = ShadowLine::new();
        line.add(Shadow::new(0.6, 0.8));
        line.add(Shadow::new(0.1, 0.2));
        line.add(Shadow::new(0.3, 0.4));
        let starts: Vec<f64> = line.shadows().iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0.1, 0.3, 0.6]);
    }

    #[test]
    fn test_merge_with_previous() {
        let mut line = ShadowLine::new();
        line.add(Shadow::new(0.0, 0.3));
        line.add(Shadow::new(0.2, 0.5));
        assert_eq!(line.shadows(), &[Shadow::new(0.0, 0.5)]);
    }

    #[test]
    fn test_merge_with_next() {
        let mut line = ShadowLine::new();
        line.add(Shadow::new(0.4, 0.6));
        line.add(Shadow::new(0.2, 0.5));
        assert_eq!(line.shadows(), &[Shadow::new(0.2, 0.6)]);
    }

    #[test]
    fn test_bridge_unifies_both_neighbours() {
        let mut line = ShadowLine::new();
        line.add(Shadow::new(0.0, 0.3));
        line.add(Shadow::new(0.7, 1.0));
        assert!(!line.is_full_shadow());
        line.add(Shadow::new(0.25, 0.75));
        assert_eq!(line.shadows(), &[Shadow::new(0.0, 1.0)]);
        assert!(line.is_full_shadow());
    }

    #[test]
    fn test_in_shadow_needs_full_cover() {
        let mut line = ShadowLine::new();
        line.add(Shadow::new(0.0, 0.5));
        assert!(line.is_in_shadow(&Shadow::new(0.1, 0.4)));
        assert!(!line.is_in_shadow(&Shadow::new(0.4, 0.6)));
    }
}
