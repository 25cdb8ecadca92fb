//! Dense distance matrix over the start position and all nodes.

use super::geo::haversine_km;
use crate::models::{Node, Position};

/// A dense n×n distance matrix stored in row-major order.
///
/// Location 0 is the start position; location `i + 1` is node `i`. The
/// matrix is built once per optimization call and shared read-only by
/// every solver.
///
/// # Examples
///
/// ```
/// use u_tour::distance::DistanceMatrix;
/// use u_tour::models::{Node, Position};
///
/// let start = Position::new(0.0, 0.0);
/// let nodes = vec![
///     Node::new("a", Position::new(1.0, 0.0)),
///     Node::new("b", Position::new(2.0, 0.0)),
/// ];
/// let dm = DistanceMatrix::from_positions(start, &nodes);
/// assert_eq!(dm.size(), 3);
/// assert!((dm.get(0, 1) - 111.195).abs() < 0.01);
/// assert_eq!(dm.leg(None, 0), dm.get(0, 1));
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes haversine distances from the start and node positions.
    pub fn from_positions(start: Position, nodes: &[Node]) -> Self {
        let positions: Vec<Position> = std::iter::once(start)
            .chain(nodes.iter().map(Node::position))
            .collect();
        let n = positions.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = haversine_km(positions[i], positions[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Distance of one tour leg in node-index space.
    ///
    /// `from = None` means the start position.
    pub fn leg(&self, from: Option<usize>, to: usize) -> f64 {
        self.get(from.map_or(0, |f| f + 1), to + 1)
    }

    /// Total distance of an open tour visiting node indices in `order`.
    pub fn tour_distance(&self, order: &[usize]) -> f64 {
        let mut prev = None;
        let mut total = 0.0;
        for &node in order {
            total += self.leg(prev, node);
            prev = Some(node);
        }
        total
    }

    /// Number of locations in this matrix (nodes + start).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of nodes (excluding the start position).
    pub fn num_nodes(&self) -> usize {
        self.size.saturating_sub(1)
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DistanceMatrix {
        let nodes = vec![
            Node::new("a", Position::new(0.01, 0.0)),
            Node::new("b", Position::new(0.03, 0.0)),
            Node::new("c", Position::new(0.0, 0.02)),
        ];
        DistanceMatrix::from_positions(Position::new(0.0, 0.0), &nodes)
    }

    #[test]
    fn test_from_positions() {
        let dm = sample();
        assert_eq!(dm.size(), 4);
        assert_eq!(dm.num_nodes(), 3);
        assert_eq!(dm.get(0, 0), 0.0);
        assert!(dm.get(0, 2) > dm.get(0, 1));
    }

    #[test]
    fn test_symmetric() {
        assert!(sample().is_symmetric(1e-12));
    }

    #[test]
    fn test_tour_distance_open() {
        let dm = sample();
        let d = dm.tour_distance(&[0, 1]);
        // start -> a -> b along the equator, no return leg
        assert!((d - dm.get(0, 2)).abs() < 1e-9);
        assert_eq!(dm.tour_distance(&[]), 0.0);
    }

    #[test]
    fn test_set_get() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 1, 42.0);
        assert_eq!(dm.get(0, 1), 42.0);
        assert_eq!(dm.get(1, 0), 0.0);
        assert!(!dm.is_symmetric(1e-10));
    }
}
