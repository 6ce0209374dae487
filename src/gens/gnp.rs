use rand_distr::{Distribution, Geometric};

use super::*;

/// `G(n,p)` graphs contain every possible edge (no self-loops) independently with probability `p`.
///
/// Instead of tossing a coin for each of the `n^2` candidate pairs, the generator jumps from
/// one selected pair to the next by geometrically distributed gaps. Pairs `(u, v)` are
/// enumerated in row-major order; for undirected graphs only pairs with `u < v` are kept.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use wgraphs::{prelude::*, gens::*};
///
/// let rng = &mut rand::rngs::StdRng::seed_from_u64(3);
/// let graph: WeightedGraph = Gnp::new()
///     .nodes(10)
///     .prob(1.0)
///     .integral_weights(1, 5)
///     .direction(Direction::Undirected)
///     .generate(rng);
///
/// assert_eq!(graph.number_of_edges(), 45);
/// assert!(graph.weighted_edges(true).all(|e| (1.0..=5.0).contains(&e.weight)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Gnp {
    n: NumNodes,
    p: f64,
    direction: Direction,
    weights: WeightRange,
}

impl Default for Gnp {
    fn default() -> Self {
        Self {
            n: 0,
            p: 0.0,
            direction: Direction::Directed,
            weights: WeightRange::Unit,
        }
    }
}

impl Gnp {
    /// Creates a new empty `G(n,p)` generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates `p` directly
    /// ** Panics if `prob` is not in `[0, 1]` **
    pub fn set_prob(&mut self, prob: f64) {
        assert!(prob.is_valid_probility(), "invalid probability {prob}");
        self.p = prob;
    }

    /// Updates `p` directly
    /// ** Panics if `prob` is not in `[0, 1]` **
    pub fn prob(mut self, prob: f64) -> Self {
        self.set_prob(prob);
        self
    }

    /// Updates `p` such that every node has expected degree `deg`
    /// ** Panics if the resulting probability is not in `[0, 1]` **
    pub fn avg_deg(self, deg: f64) -> Self {
        let p = if self.n > 1 {
            deg / (self.n - 1) as f64
        } else {
            0.0
        };
        self.prob(p)
    }

    /// Creates a new graph from the generated edges
    pub fn generate<G, R>(&self, rng: &mut R) -> G
    where
        G: GraphNew + GraphEdgeEditing,
        R: Rng,
    {
        let mut graph = G::new(self.n, self.direction);
        for e in self.stream(rng) {
            graph.add_edge(e.origin, e.destination, e.weight);
        }
        graph
    }
}

impl NumNodesGen for Gnp {
    fn set_nodes(&mut self, n: NumNodes) {
        self.n = n;
    }
}

impl DirectionGen for Gnp {
    fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }
}

impl WeightsGen for Gnp {
    fn set_weight_range(&mut self, weights: WeightRange) {
        self.weights = weights;
    }
}

impl GraphGenerator for Gnp {
    fn stream<'a, R>(&'a self, rng: &'a mut R) -> impl Iterator<Item = WeightedEdge> + 'a
    where
        R: Rng,
    {
        let jumps = if self.p > 0.0 {
            Geometric::new(self.p).ok()
        } else {
            None
        };

        GnpEdges {
            rng,
            jumps,
            next: 0,
            n: self.n as u64,
            directed: self.direction.is_directed(),
            weights: &self.weights,
        }
    }
}

struct GnpEdges<'a, R> {
    rng: &'a mut R,
    jumps: Option<Geometric>,
    next: u64,
    n: u64,
    directed: bool,
    weights: &'a WeightRange,
}

impl<R: Rng> Iterator for GnpEdges<'_, R> {
    type Item = WeightedEdge;

    fn next(&mut self) -> Option<Self::Item> {
        let jumps = self.jumps?;
        loop {
            let skip = jumps.sample(self.rng);
            let pos = match self.next.checked_add(skip) {
                Some(pos) if pos < self.n * self.n => pos,
                _ => {
                    self.jumps = None;
                    return None;
                }
            };
            self.next = pos + 1;

            let (u, v) = ((pos / self.n) as Node, (pos % self.n) as Node);
            if u == v || (!self.directed && u > v) {
                continue;
            }

            return Some(WeightedEdge::new(u, v, self.weights.sample(self.rng)));
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn extreme_probabilities() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);

        let empty: WeightedGraph = Gnp::new().nodes(20).prob(0.0).generate(rng);
        assert!(empty.has_no_edges());

        let full: WeightedGraph = Gnp::new().nodes(20).prob(1.0).generate(rng);
        assert_eq!(full.number_of_edges(), 20 * 19);
        assert!(full.vertices().all(|u| !full.has_self_loop(u)));

        let full: WeightedGraph = Gnp::new()
            .nodes(20)
            .prob(1.0)
            .direction(Direction::Undirected)
            .generate(rng);
        assert_eq!(full.number_of_edges(), 20 * 19 / 2);
    }

    #[test]
    fn edge_count_is_close_to_expectation() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);
        let n = 200;
        let p = 0.1;

        let m = Gnp::new().nodes(n).prob(p).stream(rng).count() as f64;
        let expected = p * (n * (n - 1)) as f64;
        assert!((m - expected).abs() < 0.1 * expected, "{m} vs {expected}");
    }

    #[test]
    fn weights_are_drawn_from_range() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        let edges = Gnp::new()
            .nodes(30)
            .prob(0.3)
            .weights(-2.0..3.5)
            .generate_edges(rng);
        assert!(!edges.is_empty());
        assert!(edges.iter().all(|e| (-2.0..3.5).contains(&e.weight)));

        let edges = Gnp::new()
            .nodes(30)
            .prob(0.3)
            .integral_weights(4, 6)
            .generate_edges(rng);
        assert!(edges.iter().all(|e| [4.0, 5.0, 6.0].contains(&e.weight)));

        let edges = Gnp::new().nodes(30).prob(0.3).generate_edges(rng);
        assert!(edges.iter().all(|e| e.weight == 1.0));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let generator = Gnp::new().nodes(50).avg_deg(3.0).integral_weights(0, 9);
        let a = generator.generate_edges(&mut Pcg64Mcg::seed_from_u64(4));
        let b = generator.generate_edges(&mut Pcg64Mcg::seed_from_u64(4));
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic]
    fn invalid_probability() {
        let _ = Gnp::new().prob(1.5);
    }
}
