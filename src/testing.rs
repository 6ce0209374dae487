/// Conformance tests for the graph store, instantiated once per [`Direction`](crate::ops::Direction).
///
/// Every operation is checked against a dense weight matrix that is maintained alongside.
macro_rules! test_graph_ops {
    ($env:ident, $dir:ident, ($($trait:ident),*)) => {
        #[cfg(test)]
        mod $env {
            use crate::{prelude::*, testing::test_graph_ops};
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;
            use itertools::Itertools;

            const DIRECTION: Direction = Direction::$dir;

            /// Creates a list of at most `m_ub` random edges for nodes `0..n` with integral weights
            fn random_edges<R: Rng>(rng: &mut R, n: NumNodes, m_ub: NumEdges) -> Vec<WeightedEdge> {
                (0..m_ub).map(|_| {
                    let u = rng.random_range(0..n);
                    let v = rng.random_range(0..n);
                    let w = rng.random_range(0..10) as Weight;
                    WeightedEdge::new(u, v, w)
                }).collect_vec()
            }

            /// Dense reference: `matrix[u][v]` is the weight of the last inserted edge `(u, v)`
            fn reference_matrix(n: NumNodes, edges: &[WeightedEdge]) -> Vec<Vec<Option<Weight>>> {
                let mut matrix = vec![vec![None; n as usize]; n as usize];
                for e in edges {
                    matrix[e.origin as usize][e.destination as usize] = Some(e.weight);
                    if !DIRECTION.is_directed() {
                        matrix[e.destination as usize][e.origin as usize] = Some(e.weight);
                    }
                }
                matrix
            }

            $(
                test_graph_ops!($trait);
            )*
        }
    };
    (GraphNew) => {
        #[test]
        fn graph_new() {
            for n in 0..50 {
                let graph = WeightedGraph::new(n, DIRECTION);

                assert_eq!(graph.number_of_edges(), 0);
                assert_eq!(graph.number_of_nodes(), n);
                assert_eq!(graph.direction(), DIRECTION);
                assert_eq!(graph.vertices().collect_vec(), (0..n).collect_vec());
                assert_eq!(graph.max_degree(), 0);
            }
        }
    };
    (AdjacencyList) => {
        #[test]
        fn test_adjacency_list() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [10 as NumNodes, 20, 50] {
                for m_ub in [n * 2, n * 5] {
                    for _ in 0..5 {
                        let edges = random_edges(rng, n, m_ub);
                        let matrix = reference_matrix(n, &edges);
                        let graph = WeightedGraph::from_edges(n, DIRECTION, edges).unwrap();

                        for u in graph.vertices() {
                            let expected = matrix[u as usize]
                                .iter()
                                .enumerate()
                                .filter_map(|(v, w)| w.map(|w| (v as Node, w)))
                                .collect_vec();

                            assert_eq!(graph.weighted_neighbors_of(u).collect_vec(), expected);
                            assert_eq!(graph.degree_of(u) as usize, expected.len());
                            assert!(graph.neighbors_of(u).tuple_windows().all(|(a, b)| a < b));
                        }

                        let m = graph.weighted_edges(!DIRECTION.is_directed()).count();
                        assert_eq!(graph.number_of_edges() as usize, m);
                        assert_eq!(graph.edge_list().len(), m);
                    }
                }
            }
        }
    };
    (AdjacencyTest) => {
        #[test]
        fn test_adjacency_test() {
            let rng = &mut Pcg64Mcg::seed_from_u64(5);

            for n in [10 as NumNodes, 30] {
                let edges = random_edges(rng, n, 3 * n);
                let matrix = reference_matrix(n, &edges);
                let graph = WeightedGraph::from_edges(n, DIRECTION, edges).unwrap();

                for u in graph.vertices() {
                    for v in graph.vertices() {
                        let expected = matrix[u as usize][v as usize];
                        assert_eq!(graph.has_edge(u, v), expected.is_some());
                        assert_eq!(graph.edge_weight(u, v), expected);
                        assert_eq!(graph.weight(u, v), expected.unwrap_or(UNREACHABLE));
                    }
                }
            }
        }
    };
    (GraphEdgeEditing) => {
        #[test]
        fn test_graph_edge_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [10 as NumNodes, 20, 50] {
                let edges = random_edges(rng, n, 4 * n);
                let mut matrix = reference_matrix(n, &edges);
                let mut graph = WeightedGraph::from_edges(n, DIRECTION, edges).unwrap();

                let mut m = graph.number_of_edges();
                for _ in 0..(2 * n) {
                    let u = rng.random_range(0..n);
                    let v = rng.random_range(0..n);

                    let expected = matrix[u as usize][v as usize].take();
                    if !DIRECTION.is_directed() {
                        matrix[v as usize][u as usize] = None;
                    }

                    assert_eq!(graph.try_remove_edge(u, v).unwrap(), expected);
                    if expected.is_some() {
                        m -= 1;
                    }
                    assert_eq!(graph.number_of_edges(), m);
                    assert!(!graph.has_edge(u, v));
                }

                for u in graph.vertices() {
                    for v in graph.neighbors_of(u).collect_vec() {
                        graph.try_remove_edge(u, v).unwrap();
                    }
                }
                assert!(graph.has_no_edges());
            }
        }
    };
}

pub(crate) use test_graph_ops;
