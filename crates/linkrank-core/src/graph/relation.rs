//! Dense square link relation.
//!
//! Entry `(i, j)` set means page `i` links to page `j`. Self-links are
//! ordinary outlinks. The relation is validated once at construction, so
//! every `LinkRelation` in circulation is square and strictly 0/1.

use crate::error::RankError;

/// An N×N binary link matrix, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRelation {
    size: usize,
    cells: Vec<bool>,
}

impl LinkRelation {
    /// Build a relation from integer rows.
    ///
    /// # Errors
    ///
    /// - [`RankError::NotSquare`] if any row length differs from the row count.
    /// - [`RankError::MalformedRelation`] if an entry is not 0 or 1.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, RankError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);

        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(RankError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                match value {
                    0 => cells.push(false),
                    1 => cells.push(true),
                    _ => return Err(RankError::MalformedRelation { row, col, value }),
                }
            }
        }

        Ok(Self { size, cells })
    }

    /// Build a relation of `size` pages from `(from, to)` pairs.
    ///
    /// Repeated pairs set the same cell and are therefore collapsed.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::NodeOutOfRange`] if an endpoint is `>= size`.
    pub fn from_edges(size: usize, edges: &[(usize, usize)]) -> Result<Self, RankError> {
        let mut relation = Self::empty(size);
        for &(from, to) in edges {
            for node in [from, to] {
                if node >= size {
                    return Err(RankError::NodeOutOfRange { node, n: size });
                }
            }
            relation.set(from, to);
        }
        Ok(relation)
    }

    /// Set entry `(from, to)`. Callers guarantee both indices are in range.
    pub(crate) fn set(&mut self, from: usize, to: usize) {
        self.cells[from * self.size + to] = true;
    }

    /// A relation of `size` pages with no links.
    #[must_use]
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Number of rows (= number of columns).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Whether page `from` links to page `to`. Out-of-range indices read as no link.
    #[must_use]
    pub fn links(&self, from: usize, to: usize) -> bool {
        from < self.size && to < self.size && self.cells[from * self.size + to]
    }

    /// Iterate over row `from` as booleans in ascending column order.
    pub fn row(&self, from: usize) -> impl Iterator<Item = bool> + '_ {
        let start = from.min(self.size) * self.size;
        let end = if from < self.size { start + self.size } else { start };
        self.cells[start..end].iter().copied()
    }

    /// Total number of set entries.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_square_binary_rows() {
        let rel = LinkRelation::from_rows(&[vec![0, 1], vec![1, 1]]).unwrap();
        assert_eq!(rel.size(), 2);
        assert!(rel.links(0, 1));
        assert!(rel.links(1, 1));
        assert!(!rel.links(0, 0));
        assert_eq!(rel.link_count(), 3);
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = LinkRelation::from_rows(&[vec![0, 1], vec![1]]).unwrap_err();
        assert_eq!(
            err,
            RankError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn rejects_non_binary_entries() {
        let err = LinkRelation::from_rows(&[vec![0, 2], vec![1, 0]]).unwrap_err();
        assert_eq!(
            err,
            RankError::MalformedRelation {
                row: 0,
                col: 1,
                value: 2
            }
        );

        let err = LinkRelation::from_rows(&[vec![0, 0], vec![-1, 0]]).unwrap_err();
        assert!(matches!(err, RankError::MalformedRelation { value: -1, .. }));
    }

    #[test]
    fn empty_rows_give_zero_sized_relation() {
        let rel = LinkRelation::from_rows(&[]).unwrap();
        assert_eq!(rel.size(), 0);
        assert_eq!(rel.link_count(), 0);
    }

    #[test]
    fn from_edges_collapses_repeats() {
        let rel = LinkRelation::from_edges(3, &[(0, 1), (0, 1), (2, 2)]).unwrap();
        assert_eq!(rel.link_count(), 2);
        assert!(rel.links(2, 2));
    }

    #[test]
    fn from_edges_rejects_out_of_range() {
        let err = LinkRelation::from_edges(2, &[(0, 5)]).unwrap_err();
        assert_eq!(err, RankError::NodeOutOfRange { node: 5, n: 2 });
    }

    #[test]
    fn rows_read_back_as_set_cells() {
        let rows = vec![vec![0, 1, 1], vec![0, 0, 0], vec![1, 0, 0]];
        let rel = LinkRelation::from_rows(&rows).unwrap();
        let read: Vec<Vec<bool>> = (0..3).map(|i| rel.row(i).collect()).collect();
        assert_eq!(read[0], vec![false, true, true]);
        assert_eq!(read[2], vec![true, false, false]);
        assert_eq!(rel.link_count(), 3);
    }

    #[test]
    fn out_of_range_reads_as_no_link() {
        let rel = LinkRelation::from_rows(&[vec![1]]).unwrap();
        assert!(!rel.links(0, 3));
        assert_eq!(rel.row(4).count(), 0);
    }
}
