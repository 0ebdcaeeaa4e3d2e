use {
    crate::*,
    glam::IVec2,
    nom::{combinator::map, error::Error, Err, IResult},
    std::collections::HashMap,
};

define_cell! {
    #[repr(u8)]
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    enum DishCell {
        Round = ROUND = b'O',
        Cube = CUBE = b'#',
        Empty = EMPTY = b'.',
    }
}

const SPIN_CYCLES: usize = 1_000_000_000_usize;

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Grid2D<DishCell>);

impl Solution {
    /// The edge cells that rocks rolling toward `dir` come to rest against first.
    fn lane_starts(dimensions: IVec2, dir: Direction) -> Vec<IVec2> {
        match dir {
            Direction::North => (0_i32..dimensions.x).map(|x| IVec2::new(x, 0_i32)).collect(),
            Direction::South => (0_i32..dimensions.x)
                .map(|x| IVec2::new(x, dimensions.y - 1_i32))
                .collect(),
            Direction::West => (0_i32..dimensions.y).map(|y| IVec2::new(0_i32, y)).collect(),
            Direction::East => (0_i32..dimensions.y)
                .map(|y| IVec2::new(dimensions.x - 1_i32, y))
                .collect(),
        }
    }

    fn tilt(grid: &mut Grid2D<DishCell>, dir: Direction) {
        let lane_dir: Direction = dir.rev();
        let lane_vec: IVec2 = lane_dir.vec();

        for start in Self::lane_starts(grid.dimensions(), dir) {
            let mut free: IVec2 = start;

            for pos in CellIter2D::until_boundary(grid, start, lane_dir) {
                match *grid.get(pos).unwrap() {
                    DishCell::Cube => free = pos + lane_vec,
                    DishCell::Round => {
                        *grid.get_mut(pos).unwrap() = DishCell::Empty;
                        *grid.get_mut(free).unwrap() = DishCell::Round;
                        free += lane_vec;
                    }
                    DishCell::Empty => (),
                }
            }
        }
    }

    fn spin_cycle(grid: &mut Grid2D<DishCell>) {
        // North, West, South, East
        for dir in [
            Direction::North,
            Direction::West,
            Direction::South,
            Direction::East,
        ] {
            Self::tilt(grid, dir);
        }
    }

    fn north_load(grid: &Grid2D<DishCell>) -> i32 {
        let height: i32 = grid.dimensions().y;

        grid.iter_positions()
            .filter(|pos| *grid.get(*pos).unwrap() == DishCell::Round)
            .map(|pos| height - pos.y)
            .sum()
    }

    fn tilted_north_load(&self) -> i32 {
        let mut grid: Grid2D<DishCell> = self.0.clone();

        Self::tilt(&mut grid, Direction::North);

        Self::north_load(&grid)
    }

    /// Spins until the grid state repeats, then jumps ahead by whole periods.
    fn spun_north_load(&self) -> i32 {
        let mut grid: Grid2D<DishCell> = self.0.clone();
        let mut seen: HashMap<Vec<DishCell>, usize> = HashMap::new();
        let mut cycle: usize = 0_usize;

        while cycle < SPIN_CYCLES {
            if let Some(prev_cycle) = seen.insert(grid.cells().to_vec(), cycle) {
                let period: usize = cycle - prev_cycle;

                for _ in 0_usize..(SPIN_CYCLES - cycle) % period {
                    Self::spin_cycle(&mut grid);
                }

                return Self::north_load(&grid);
            }

            Self::spin_cycle(&mut grid);
            cycle += 1_usize;
        }

        Self::north_load(&grid)
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(Grid2D::parse, Self)(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.tilted_north_load());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.spun_north_load());
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = Err<Error<&'i str>>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(Self::parse(input)?.1)
    }
}
