use {
    crate::*,
    glam::IVec2,
    nom::{combinator::map_opt, error::Error, Err, IResult},
    strum::IntoEnumIterator,
};

define_cell! {
    #[repr(u8)]
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    enum TrailCell {
        Path = PATH = b'.',
        Forest = FOREST = b'#',
        SlopeNorth = SLOPE_NORTH = b'^',
        SlopeEast = SLOPE_EAST = b'>',
        SlopeSouth = SLOPE_SOUTH = b'v',
        SlopeWest = SLOPE_WEST = b'<',
    }
}

impl TrailCell {
    fn slope_dir(self) -> Option<Direction> {
        match self {
            Self::SlopeNorth => Some(Direction::North),
            Self::SlopeEast => Some(Direction::East),
            Self::SlopeSouth => Some(Direction::South),
            Self::SlopeWest => Some(Direction::West),
            _ => None,
        }
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    grid: Grid2D<TrailCell>,
    start: IVec2,
    end: IVec2,
}

impl Solution {
    fn is_walkable(&self, pos: IVec2) -> bool {
        self.grid
            .get(pos)
            .is_some_and(|cell| *cell != TrailCell::Forest)
    }

    /// Whether a hiker standing at `pos` may step in `dir`.
    fn may_step(&self, pos: IVec2, dir: Direction, slippery: bool) -> bool {
        (!slippery
            || self
                .grid
                .get(pos)
                .and_then(|cell| cell.slope_dir())
                .map_or(true, |slope_dir| slope_dir == dir))
            && self.is_walkable(pos + dir.vec())
    }

    fn walkable_neighbor_count(&self, pos: IVec2) -> usize {
        Direction::iter()
            .filter(|dir| self.is_walkable(pos + dir.vec()))
            .count()
    }

    /// The trail endpoints plus every cell where corridors branch.
    fn junctions(&self) -> Vec<IVec2> {
        let mut junctions: Vec<IVec2> = vec![self.start, self.end];

        junctions.extend(self.grid.iter_positions().filter(|pos| {
            self.is_walkable(*pos) && self.walkable_neighbor_count(*pos) > 2_usize
        }));

        junctions
    }

    /// Contracts each corridor between junctions into a single weighted edge.
    fn junction_graph(&self, junctions: &[IVec2], slippery: bool) -> Vec<Vec<(usize, u32)>> {
        let junction_index =
            |pos: IVec2| junctions.iter().position(|junction| *junction == pos);
        let mut edges: Vec<Vec<(usize, u32)>> = vec![Vec::new(); junctions.len()];

        for (index, junction) in junctions.iter().enumerate() {
            for start_dir in Direction::iter() {
                if !self.may_step(*junction, start_dir, slippery) {
                    continue;
                }

                let mut prev: IVec2 = *junction;
                let mut current: IVec2 = *junction + start_dir.vec();
                let mut len: u32 = 1_u32;

                loop {
                    if let Some(neighbor_index) = junction_index(current) {
                        edges[index].push((neighbor_index, len));

                        break;
                    }

                    let mut next: Option<IVec2> = None;

                    for dir in Direction::iter() {
                        let pos: IVec2 = current + dir.vec();

                        if pos != prev && self.may_step(current, dir, slippery) {
                            next = Some(pos);
                        }
                    }

                    // Dead ends contribute no edge
                    let Some(next) = next else {
                        break;
                    };

                    prev = current;
                    current = next;
                    len += 1_u32;
                }
            }
        }

        edges
    }

    fn longest_hike_internal(
        edges: &[Vec<(usize, u32)>],
        current: usize,
        end: usize,
        visited: u64,
        len: u32,
    ) -> Option<u32> {
        if current == end {
            return Some(len);
        }

        edges[current]
            .iter()
            .filter(|(neighbor, _)| visited & (1_u64 << *neighbor) == 0_u64)
            .filter_map(|(neighbor, edge_len)| {
                Self::longest_hike_internal(
                    edges,
                    *neighbor,
                    end,
                    visited | (1_u64 << *neighbor),
                    len + *edge_len,
                )
            })
            .max()
    }

    fn longest_hike(&self, slippery: bool) -> Option<u32> {
        let junctions: Vec<IVec2> = self.junctions();

        if junctions.len() > u64::BITS as usize {
            return None;
        }

        let edges: Vec<Vec<(usize, u32)>> = self.junction_graph(&junctions, slippery);

        // `junctions` starts with the two endpoints
        Self::longest_hike_internal(&edges, 0_usize, 1_usize, 1_u64, 0_u32)
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map_opt(Grid2D::parse, |grid: Grid2D<TrailCell>| {
            let max_y: i32 = grid.max_dimensions().y;
            let start: IVec2 = (0_i32..grid.dimensions().x)
                .map(|x| IVec2::new(x, 0_i32))
                .find(|pos| *grid.get(*pos).unwrap() == TrailCell::Path)?;
            let end: IVec2 = (0_i32..grid.dimensions().x)
                .map(|x| IVec2::new(x, max_y))
                .find(|pos| *grid.get(*pos).unwrap() == TrailCell::Path)?;

            Some(Self { grid, start, end })
        })(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.longest_hike(true));
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.longest_hike(false));
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
        #.#####################\n\
        #.......#########...###\n\
        #######.#########.#.###\n\
        ###.....#.>.>.###.#.###\n\
        ###v#####.#v#.###.#.###\n\
        ###.>...#.#.#.....#...#\n\
        ###v###.#.#.#########.#\n\
        ###...#.#.#.......#...#\n\
        #####.#.#.#######.#.###\n\
        #.....#.#.#.......#...#\n\
        #.#####.#.#.#########v#\n\
        #.#...#...#...###...>.#\n\
        #.#.#v#######v###.###v#\n\
        #...#.>.#...>.>.#.###.#\n\
        #####v#.#.###v#.#.###.#\n\
        #.....#...#...#.#.#...#\n\
        #.#########.###.#.#.###\n\
        #...###...#...#...#.###\n\
        ###.###.#.###v#####v###\n\
        #...#...#.#.>.>.#.>.###\n\
        #.###.###.#.###.#.#v###\n\
        #.....###...###...#...#\n\
        #####################.#\n";

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(SOLUTION_STR).unwrap())
    }

    #[test]
    fn test_parse() {
        assert_eq!(solution().start, IVec2::new(1_i32, 0_i32));
        assert_eq!(solution().end, IVec2::new(21_i32, 22_i32));
    }

    #[test]
    fn test_slippery_longest_hike() {
        assert_eq!(solution().longest_hike(true), Some(94_u32));
    }

    #[test]
    fn test_dry_longest_hike() {
        assert_eq!(solution().longest_hike(false), Some(154_u32));
    }
}
