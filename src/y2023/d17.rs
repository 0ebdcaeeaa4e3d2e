use {
    crate::*,
    glam::IVec2,
    nom::{character::complete::satisfy, combinator::map, error::Error, AsChar, Err, IResult},
    std::collections::HashMap,
    strum::IntoEnumIterator,
};

#[cfg_attr(test, derive(Debug, PartialEq))]
#[derive(Clone, Copy)]
struct HeatLoss(u8);

impl Parse for HeatLoss {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(satisfy(char::is_dec_digit), |c| Self(c as u8 - b'0'))(input)
    }
}

/// A crucible state. Two states with the same position but different approach direction or run
/// length are distinct vertices, since their legal continuations differ.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct Vertex {
    pos: IVec2,

    /// `None` only for the starting state, which may move in any direction
    dir: Option<Direction>,

    /// How many consecutive cells have been traversed in `dir`
    run: u8,
}

struct CruciblePathFinder<'s> {
    grid: &'s Grid2D<HeatLoss>,
    start: Vertex,
    end_pos: IVec2,

    /// Fewest cells the crucible must move straight before it may turn or stop
    min_run: u8,

    /// Most cells the crucible may move straight before it must turn
    max_run: u8,
    parents: HashMap<Vertex, Vertex>,
}

impl<'s> CruciblePathFinder<'s> {
    fn new(grid: &'s Grid2D<HeatLoss>, min_run: u8, max_run: u8) -> Self {
        Self {
            grid,
            start: Vertex {
                pos: IVec2::ZERO,
                dir: None,
                run: 0_u8,
            },
            end_pos: grid.max_dimensions(),
            min_run,
            max_run,
            parents: HashMap::new(),
        }
    }
}

impl<'s> Dijkstra for CruciblePathFinder<'s> {
    type Vertex = Vertex;
    type Cost = u32;

    fn start(&self) -> &Self::Vertex {
        &self.start
    }

    fn is_end(&self, vertex: &Self::Vertex) -> bool {
        vertex.pos == self.end_pos && vertex.run >= self.min_run
    }

    fn neighbors(
        &self,
        vertex: &Self::Vertex,
        neighbors: &mut Vec<OpenSetElement<Self::Vertex, Self::Cost>>,
    ) {
        neighbors.clear();
        neighbors.extend(Direction::iter().filter_map(|dir| {
            let run: u8 = match vertex.dir {
                None => 1_u8,
                Some(prev_dir) if dir == prev_dir => {
                    if vertex.run < self.max_run {
                        vertex.run + 1_u8
                    } else {
                        return None;
                    }
                }
                Some(prev_dir) if dir == prev_dir.rev() => return None,
                Some(_) => {
                    if vertex.run >= self.min_run {
                        1_u8
                    } else {
                        return None;
                    }
                }
            };
            let pos: IVec2 = vertex.pos + dir.vec();

            self.grid.get(pos).map(|heat_loss| {
                OpenSetElement(
                    Vertex {
                        pos,
                        dir: Some(dir),
                        run,
                    },
                    heat_loss.0 as u32,
                )
            })
        }));
    }

    fn record(&mut self, from: &Self::Vertex, to: &Self::Vertex, _cost: Self::Cost) {
        self.parents.insert(*to, *from);
    }

    fn reset(&mut self) {
        self.parents.clear();
    }
}

// The byte is only read through `transmute_copy` in the `String` rendering.
#[allow(dead_code)]
#[derive(Clone, Copy)]
struct PathCell(u8);

impl From<Direction> for PathCell {
    fn from(dir: Direction) -> Self {
        Self(match dir {
            Direction::North => b'^',
            Direction::East => b'>',
            Direction::South => b'v',
            Direction::West => b'<',
        })
    }
}

impl From<HeatLoss> for PathCell {
    fn from(heat_loss: HeatLoss) -> Self {
        Self(heat_loss.0 + b'0')
    }
}

// SAFETY: `PathCell` is only constructed from digit and arrow bytes.
unsafe impl IsValidAscii for PathCell {}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Grid2D<HeatLoss>);

impl Solution {
    const REGULAR_CRUCIBLE_RUN_RANGE: (u8, u8) = (1_u8, 3_u8);
    const ULTRA_CRUCIBLE_RUN_RANGE: (u8, u8) = (4_u8, 10_u8);

    fn min_heat_loss(&self, (min_run, max_run): (u8, u8)) -> Option<u32> {
        CruciblePathFinder::new(&self.0, min_run, max_run)
            .run()
            .map(|(_, cost)| cost)
    }

    /// The minimal heat loss along with the grid overlaid with the chosen path's directions.
    fn min_heat_loss_grid_and_cost(
        &self,
        (min_run, max_run): (u8, u8),
    ) -> Option<(Grid2D<PathCell>, u32)> {
        let mut path_finder: CruciblePathFinder = CruciblePathFinder::new(&self.0, min_run, max_run);

        path_finder.run().map(|(end, cost)| {
            let mut grid: Grid2D<PathCell> = Grid2D::try_from_cells_and_width(
                self.0.cells().iter().copied().map(PathCell::from).collect(),
                self.0.dimensions().x as usize,
            )
            .unwrap();
            let mut vertex: Vertex = end;

            loop {
                if let Some(dir) = vertex.dir {
                    *grid.get_mut(vertex.pos).unwrap() = dir.into();
                }

                match path_finder.parents.get(&vertex) {
                    Some(parent) => vertex = *parent,
                    None => break,
                }
            }

            (grid, cost)
        })
    }

    fn regular_crucible_min_heat_loss(&self) -> Option<u32> {
        self.min_heat_loss(Self::REGULAR_CRUCIBLE_RUN_RANGE)
    }

    fn ultra_crucible_min_heat_loss(&self) -> Option<u32> {
        self.min_heat_loss(Self::ULTRA_CRUCIBLE_RUN_RANGE)
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(Grid2D::<HeatLoss>::parse, Self)(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, args: &QuestionArgs) {
        if !args.verbose {
            dbg!(self.regular_crucible_min_heat_loss());
        } else if let Some((grid, cost)) =
            self.min_heat_loss_grid_and_cost(Self::REGULAR_CRUCIBLE_RUN_RANGE)
        {
            dbg!(cost);

            println!("\n{}\n", String::from(grid));
        } else {
            eprintln!("no legal regular crucible path reaches the destination");
        }
    }

    fn q2_internal(&mut self, args: &QuestionArgs) {
        if !args.verbose {
            dbg!(self.ultra_crucible_min_heat_loss());
        } else if let Some((grid, cost)) =
            self.min_heat_loss_grid_and_cost(Self::ULTRA_CRUCIBLE_RUN_RANGE)
        {
            dbg!(cost);

            println!("\n{}\n", String::from(grid));
        } else {
            eprintln!("no legal ultra crucible path reaches the destination");
        }
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

    const SOLUTION_STRS: &[&str] = &[
        "\
        2413432311323\n\
        3215453535623\n\
        3255245654254\n\
        3446585845452\n\
        4546657867536\n\
        1438598798454\n\
        4457876987766\n\
        3637877979653\n\
        4654967986887\n\
        4564679986453\n\
        1224686865563\n\
        2546548887735\n\
        4322674655533\n",
        "\
        111111111111\n\
        999999999991\n\
        999999999991\n\
        999999999991\n\
        999999999991\n",
    ];

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(SOLUTION_STRS[0_usize]).unwrap())
    }

    #[test]
    fn test_regular_crucible_min_heat_loss() {
        assert_eq!(solution().regular_crucible_min_heat_loss(), Some(102_u32));
    }

    #[test]
    fn test_ultra_crucible_min_heat_loss() {
        assert_eq!(solution().ultra_crucible_min_heat_loss(), Some(94_u32));
        assert_eq!(
            Solution::try_from(SOLUTION_STRS[1_usize])
                .unwrap()
                .ultra_crucible_min_heat_loss(),
            Some(71_u32)
        );
    }

    #[test]
    fn test_corridor_unreachable() {
        // A straight corridor longer than the maximum run cannot be finished without turning.
        let corridor: Solution = Solution::try_from("111111\n").unwrap();

        assert_eq!(corridor.regular_crucible_min_heat_loss(), None);
    }

    #[test]
    fn test_min_run_monotonicity() {
        let costs: Vec<Option<u32>> = (1_u8..=4_u8)
            .map(|min_run| solution().min_heat_loss((min_run, 10_u8)))
            .collect();

        for pair in costs.windows(2_usize) {
            assert!(pair[0_usize] <= pair[1_usize]);
        }
    }
}
