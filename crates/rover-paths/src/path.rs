use std::ops::Deref;

use rover_core::Coord;

/// An ordered sequence of coordinates from start to goal, both inclusive.
///
/// An empty path means no path was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Path(Vec<Coord>);

impl Path {
    /// The "no path found" value.
    #[inline]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Whether this path reaches its goal (i.e. is non-empty).
    #[inline]
    pub fn is_found(&self) -> bool {
        !self.0.is_empty()
    }

    /// The coordinates of the path.
    #[inline]
    pub fn coords(&self) -> &[Coord] {
        &self.0
    }

    /// First coordinate, if any.
    #[inline]
    pub fn start(&self) -> Option<Coord> {
        self.0.first().copied()
    }

    /// Last coordinate, if any.
    #[inline]
    pub fn goal(&self) -> Option<Coord> {
        self.0.last().copied()
    }

    /// Number of moves along the path (one less than its length).
    #[inline]
    pub fn steps(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Whether every consecutive pair is an orthogonal grid neighbor.
    pub fn is_contiguous(&self) -> bool {
        self.0.windows(2).all(|w| w[0].is_adjacent(w[1]))
    }

    /// Consume the path, returning its coordinates.
    #[inline]
    pub fn into_vec(self) -> Vec<Coord> {
        self.0
    }
}

impl Deref for Path {
    type Target = [Coord];

    fn deref(&self) -> &[Coord] {
        &self.0
    }
}

impl From<Vec<Coord>> for Path {
    fn from(coords: Vec<Coord>) -> Self {
        Self(coords)
    }
}

impl FromIterator<Coord> for Path {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_reports_not_found() {
        let p = Path::empty();
        assert!(!p.is_found());
        assert_eq!(p.start(), None);
        assert_eq!(p.steps(), 0);
        assert!(p.is_contiguous());
    }

    #[test]
    fn contiguity_detects_gaps() {
        let ok: Path = [(0, 0), (0, 1), (1, 1)].into_iter().map(Coord::from).collect();
        assert!(ok.is_contiguous());
        assert_eq!(ok.steps(), 2);
        assert_eq!(ok.goal(), Some(Coord::new(1, 1)));

        let diagonal: Path = vec![Coord::new(0, 0), Coord::new(1, 1)].into();
        assert!(!diagonal.is_contiguous());
    }
}
