use {
    num::Zero,
    std::{
        cmp::Ordering,
        collections::{BinaryHeap, HashMap, HashSet, VecDeque},
        hash::Hash,
        ops::Add,
    },
};

/// A frontier entry, ordered by reversed cost so that a `BinaryHeap` pops the cheapest entry
/// first.
pub struct OpenSetElement<V, C>(pub V, pub C);

impl<V, C: Ord> PartialEq for OpenSetElement<V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.1 == other.1
    }
}

impl<V, C: Ord> Eq for OpenSetElement<V, C> {}

impl<V, C: Ord> PartialOrd for OpenSetElement<V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V, C: Ord> Ord for OpenSetElement<V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse the order so that cost is minimized when popping from the heap
        other.1.cmp(&self.1)
    }
}

/// An implementation of [Dijkstra's algorithm][dijkstra] over an implicitly defined graph.
///
/// Vertex identity deliberately excludes accumulated cost: the first time a vertex is popped from
/// the frontier it is settled, which is cost-optimal as long as `neighbors` only ever reports
/// non-negative edge costs. An exhausted frontier yields `None` ("unreachable").
///
/// [dijkstra]: https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
pub trait Dijkstra {
    type Vertex: Clone + Eq + Hash;
    type Cost: Add<Self::Cost, Output = Self::Cost> + Clone + Ord + Zero;

    fn start(&self) -> &Self::Vertex;
    fn is_end(&self, vertex: &Self::Vertex) -> bool;

    /// The cost of each element is from `vertex` to the neighbor, not from the start.
    fn neighbors(
        &self,
        vertex: &Self::Vertex,
        neighbors: &mut Vec<OpenSetElement<Self::Vertex, Self::Cost>>,
    );

    /// Invoked whenever a strictly cheaper path to a vertex is discovered, with its cost from the
    /// start.
    fn record(&mut self, from: &Self::Vertex, to: &Self::Vertex, cost: Self::Cost);
    fn reset(&mut self);

    fn run(&mut self) -> Option<(Self::Vertex, Self::Cost)> {
        self.reset();

        let mut open_set: BinaryHeap<OpenSetElement<Self::Vertex, Self::Cost>> = BinaryHeap::new();
        let mut settled: HashSet<Self::Vertex> = HashSet::new();
        let mut best_costs: HashMap<Self::Vertex, Self::Cost> = HashMap::new();
        let mut neighbors: Vec<OpenSetElement<Self::Vertex, Self::Cost>> = Vec::new();

        best_costs.insert(self.start().clone(), Self::Cost::zero());
        open_set.push(OpenSetElement(self.start().clone(), Self::Cost::zero()));

        while let Some(OpenSetElement(current, cost)) = open_set.pop() {
            if !settled.insert(current.clone()) {
                // A cheaper path to this vertex was already expanded
                continue;
            }

            if self.is_end(&current) {
                return Some((current, cost));
            }

            self.neighbors(&current, &mut neighbors);

            for OpenSetElement(neighbor, edge_cost) in neighbors.drain(..) {
                if settled.contains(&neighbor) {
                    continue;
                }

                let neighbor_cost: Self::Cost = cost.clone() + edge_cost;

                if best_costs
                    .get(&neighbor)
                    .map_or(true, |best_cost| neighbor_cost < *best_cost)
                {
                    best_costs.insert(neighbor.clone(), neighbor_cost.clone());
                    self.record(&current, &neighbor, neighbor_cost.clone());
                    open_set.push(OpenSetElement(neighbor, neighbor_cost));
                }
            }
        }

        None
    }
}

/// An implementation of [breadth-first search][bfs] over an implicitly defined graph with uniform
/// edge costs.
///
/// [bfs]: https://en.wikipedia.org/wiki/Breadth-first_search
pub trait BreadthFirstSearch {
    type Vertex: Clone + Eq + Hash;

    fn start(&self) -> &Self::Vertex;
    fn is_end(&self, vertex: &Self::Vertex) -> bool;
    fn neighbors(&self, vertex: &Self::Vertex, neighbors: &mut Vec<Self::Vertex>);

    /// Invoked once per explored vertex, in non-decreasing distance order.
    fn visit(&mut self, vertex: &Self::Vertex, distance: u32);
    fn reset(&mut self);

    fn run(&mut self) -> Option<(Self::Vertex, u32)> {
        self.reset();

        let mut queue: VecDeque<(Self::Vertex, u32)> = VecDeque::new();
        let mut explored: HashSet<Self::Vertex> = HashSet::new();
        let mut neighbors: Vec<Self::Vertex> = Vec::new();

        let start: Self::Vertex = self.start().clone();

        explored.insert(start.clone());
        queue.push_back((start, 0_u32));

        while let Some((current, distance)) = queue.pop_front() {
            self.visit(&current, distance);

            if self.is_end(&current) {
                return Some((current, distance));
            }

            self.neighbors(&current, &mut neighbors);

            for neighbor in neighbors.drain(..) {
                if explored.insert(neighbor.clone()) {
                    queue.push_back((neighbor, distance + 1_u32));
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SmallWeightedGraph {
        edges: Vec<Vec<(usize, u32)>>,
        start: usize,
        end: usize,
        parents: Vec<Option<usize>>,
    }

    impl Dijkstra for SmallWeightedGraph {
        type Vertex = usize;
        type Cost = u32;

        fn start(&self) -> &usize {
            &self.start
        }

        fn is_end(&self, vertex: &usize) -> bool {
            *vertex == self.end
        }

        fn neighbors(&self, vertex: &usize, neighbors: &mut Vec<OpenSetElement<usize, u32>>) {
            neighbors.clear();
            neighbors.extend(
                self.edges[*vertex]
                    .iter()
                    .map(|(neighbor, cost)| OpenSetElement(*neighbor, *cost)),
            );
        }

        fn record(&mut self, from: &usize, to: &usize, _cost: u32) {
            self.parents[*to] = Some(*from);
        }

        fn reset(&mut self) {
            self.parents = vec![None; self.edges.len()];
        }
    }

    #[test]
    fn test_dijkstra() {
        let mut graph: SmallWeightedGraph = SmallWeightedGraph {
            edges: vec![
                vec![(1_usize, 1_u32), (2_usize, 4_u32)],
                vec![(2_usize, 1_u32), (3_usize, 5_u32)],
                vec![(3_usize, 1_u32)],
                vec![],
            ],
            start: 0_usize,
            end: 3_usize,
            parents: Vec::new(),
        };

        assert_eq!(graph.run(), Some((3_usize, 3_u32)));
        assert_eq!(graph.parents, vec![None, Some(0_usize), Some(1_usize), Some(2_usize)]);

        graph.start = 3_usize;
        graph.end = 0_usize;

        assert_eq!(graph.run(), None);
    }

    struct LineGraph {
        len: usize,
        start: usize,
        end: usize,
        distances: Vec<u32>,
    }

    impl BreadthFirstSearch for LineGraph {
        type Vertex = usize;

        fn start(&self) -> &usize {
            &self.start
        }

        fn is_end(&self, vertex: &usize) -> bool {
            *vertex == self.end
        }

        fn neighbors(&self, vertex: &usize, neighbors: &mut Vec<usize>) {
            neighbors.clear();

            if *vertex > 0_usize {
                neighbors.push(*vertex - 1_usize);
            }

            if *vertex + 1_usize < self.len {
                neighbors.push(*vertex + 1_usize);
            }
        }

        fn visit(&mut self, vertex: &usize, distance: u32) {
            self.distances[*vertex] = distance;
        }

        fn reset(&mut self) {
            self.distances = vec![u32::MAX; self.len];
        }
    }

    #[test]
    fn test_breadth_first_search() {
        let mut graph: LineGraph = LineGraph {
            len: 4_usize,
            start: 1_usize,
            end: 3_usize,
            distances: Vec::new(),
        };

        assert_eq!(graph.run(), Some((3_usize, 2_u32)));
        assert_eq!(graph.distances, vec![1_u32, 0_u32, 1_u32, 2_u32]);
    }
}
