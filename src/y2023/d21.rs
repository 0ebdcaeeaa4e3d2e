use {
    crate::*,
    glam::IVec2,
    nom::{combinator::map_opt, error::Error, Err, IResult},
    std::collections::{HashMap, HashSet},
    strum::IntoEnumIterator,
};

define_cell! {
    #[repr(u8)]
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    enum GardenCell {
        Plot = PLOT = b'.',
        Rock = ROCK = b'#',
        Start = START = b'S',
    }
}

const STEPS: u32 = 64_u32;
const INFINITE_STEPS: usize = 26501365_usize;

/// Past this many steps the reachable count is extrapolated instead of simulated.
const DIRECT_SIMULATION_LIMIT: usize = 1000_usize;

/// Flood fill of plot distances from the starting position on the finite grid.
struct PlotDistances<'s> {
    solution: &'s Solution,
    distances: HashMap<IVec2, u32>,
}

impl<'s> BreadthFirstSearch for PlotDistances<'s> {
    type Vertex = IVec2;

    fn start(&self) -> &IVec2 {
        &self.solution.start
    }

    fn is_end(&self, _vertex: &IVec2) -> bool {
        false
    }

    fn neighbors(&self, vertex: &IVec2, neighbors: &mut Vec<IVec2>) {
        neighbors.clear();
        neighbors.extend(Direction::iter().filter_map(|dir| {
            let pos: IVec2 = *vertex + dir.vec();

            self.solution
                .grid
                .get(pos)
                .filter(|cell| **cell != GardenCell::Rock)
                .map(|_| pos)
        }));
    }

    fn visit(&mut self, vertex: &IVec2, distance: u32) {
        self.distances.insert(*vertex, distance);
    }

    fn reset(&mut self) {
        self.distances.clear();
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    grid: Grid2D<GardenCell>,
    start: IVec2,
}

impl Solution {
    fn reachable_plot_count(&self, steps: u32) -> usize {
        let mut plot_distances: PlotDistances = PlotDistances {
            solution: self,
            distances: HashMap::new(),
        };

        plot_distances.run();

        plot_distances
            .distances
            .values()
            .filter(|distance| **distance <= steps && **distance % 2_u32 == steps % 2_u32)
            .count()
    }

    fn is_open(&self, pos: IVec2) -> bool {
        *self
            .grid
            .get(pos.rem_euclid(self.grid.dimensions()))
            .unwrap()
            != GardenCell::Rock
    }

    /// Frontier simulation on the infinitely tiled grid, returning the count of positions whose
    /// distance parity matches each requested step count. `sample_steps` must be sorted.
    fn simulate_infinite(&self, sample_steps: &[usize]) -> Vec<u64> {
        let mut visited: HashSet<IVec2> = [self.start].into();
        let mut frontier: Vec<IVec2> = vec![self.start];
        let mut parity_counts: [u64; 2_usize] = [1_u64, 0_u64];
        let mut samples: Vec<u64> = Vec::with_capacity(sample_steps.len());
        let mut sample_steps: std::slice::Iter<'_, usize> = sample_steps.iter();
        let mut next_sample: Option<&usize> = sample_steps.next();
        let mut step: usize = 0_usize;

        while let Some(sample_step) = next_sample {
            if step == *sample_step {
                samples.push(parity_counts[step % 2_usize]);
                next_sample = sample_steps.next();

                continue;
            }

            step += 1_usize;

            let mut next_frontier: Vec<IVec2> = Vec::new();

            for pos in frontier.drain(..) {
                for dir in Direction::iter() {
                    let next_pos: IVec2 = pos + dir.vec();

                    if self.is_open(next_pos) && visited.insert(next_pos) {
                        next_frontier.push(next_pos);
                    }
                }
            }

            parity_counts[step % 2_usize] += next_frontier.len() as u64;
            frontier = next_frontier;
        }

        samples
    }

    /// For large step counts the reachable count grows quadratically in whole grid periods, so
    /// three samples one period apart pin down the polynomial.
    fn infinite_reachable_plot_count(&self, steps: usize) -> u64 {
        if steps <= DIRECT_SIMULATION_LIMIT {
            self.simulate_infinite(&[steps])[0_usize]
        } else {
            let period: usize = self.grid.dimensions().x as usize;
            let remainder: usize = steps % period;
            let samples: Vec<u64> = self.simulate_infinite(&[
                remainder,
                remainder + period,
                remainder + 2_usize * period,
            ]);
            let k: u64 = (steps / period) as u64;
            let first_difference: u64 = samples[1_usize] - samples[0_usize];
            let second_difference: u64 =
                samples[2_usize] + samples[0_usize] - 2_u64 * samples[1_usize];

            samples[0_usize] + k * first_difference + k * (k - 1_u64) / 2_u64 * second_difference
        }
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map_opt(Grid2D::parse, |grid: Grid2D<GardenCell>| {
            let start: Option<IVec2> = grid
                .iter_positions()
                .find(|pos| *grid.get(*pos).unwrap() == GardenCell::Start);

            start.map(|start| Self { grid, start })
        })(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.reachable_plot_count(STEPS));
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.infinite_reachable_plot_count(INFINITE_STEPS));
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = Err<Error<&'i str>>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(Self::parse(input)?.1)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::OnceLock};

    const SOLUTION_STR: &str = "\
        ...........\n\
        .....###.#.\n\
        .###.##..#.\n\
        ..#.#...#..\n\
        ....#.#....\n\
        .##..S####.\n\
        .##..#...#.\n\
        .......##..\n\
        .##.#.####.\n\
        .##..##.##.\n\
        ...........\n";

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(SOLUTION_STR).unwrap())
    }

    #[test]
    fn test_parse() {
        assert_eq!(solution().start, IVec2::new(5_i32, 5_i32));

        // A map with no starting position is rejected.
        assert!(Solution::try_from("...\n.#.\n...\n").is_err());
    }

    #[test]
    fn test_reachable_plot_count() {
        assert_eq!(solution().reachable_plot_count(6_u32), 16_usize);
    }

    #[test]
    fn test_infinite_reachable_plot_count() {
        assert_eq!(
            solution().simulate_infinite(&[6_usize, 10_usize, 50_usize, 100_usize]),
            vec![16_u64, 50_u64, 1594_u64, 6536_u64]
        );
        assert_eq!(solution().infinite_reachable_plot_count(100_usize), 6536_u64);
    }
}
