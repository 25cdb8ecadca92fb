//! Symmetric pheromone trail matrix.

/// Pheromone levels on every edge between locations.
///
/// Location 0 is the start position and location `i + 1` is node `i`, the
/// same layout as [`DistanceMatrix`](crate::distance::DistanceMatrix).
/// Trails never drop below `floor`, so every edge keeps a non-zero chance of
/// being chosen.
///
/// # Examples
///
/// ```
/// use u_tour::aco::PheromoneMatrix;
///
/// let mut tau = PheromoneMatrix::new(3, 0.5, 1e-10);
/// tau.evaporate(0.1);
/// assert!((tau.get(0, 1) - 0.45).abs() < 1e-12);
///
/// tau.deposit_tour(&[1, 0], 1.0);
/// // start -> node 1 -> node 0
/// assert!((tau.get(0, 2) - 1.45).abs() < 1e-12);
/// assert!((tau.get(1, 2) - tau.get(2, 1)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct PheromoneMatrix {
    data: Vec<f64>,
    size: usize,
    floor: f64,
}

impl PheromoneMatrix {
    /// Creates a uniform matrix over `size` locations.
    pub fn new(size: usize, initial: f64, floor: f64) -> Self {
        Self {
            data: vec![initial.max(floor); size * size],
            size,
            floor,
        }
    }

    /// Trail level between two locations.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Multiplies every trail by `1 - rho`.
    pub fn evaporate(&mut self, rho: f64) {
        let keep = 1.0 - rho;
        let floor = self.floor;
        for tau in &mut self.data {
            *tau = (*tau * keep).max(floor);
        }
    }

    /// Adds `amount` to both directions of one edge.
    pub fn deposit(&mut self, a: usize, b: usize, amount: f64) {
        let size = self.size;
        self.data[a * size + b] += amount;
        self.data[b * size + a] += amount;
    }

    /// Reinforces every leg of an open tour given in node-index space.
    pub fn deposit_tour(&mut self, order: &[usize], amount: f64) {
        let mut prev = 0;
        for &node in order {
            let loc = node + 1;
            self.deposit(prev, loc, amount);
            prev = loc;
        }
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.size
    }
}
