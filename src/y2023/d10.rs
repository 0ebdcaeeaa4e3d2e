use {
    crate::*,
    glam::IVec2,
    nom::{combinator::map, error::Error, Err, IResult},
    strum::IntoEnumIterator,
};

define_cell! {
    #[repr(u8)]
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    enum Pipe {
        Vertical = VERTICAL = b'|',
        Horizontal = HORIZONTAL = b'-',
        NorthEast = NORTH_EAST = b'L',
        NorthWest = NORTH_WEST = b'J',
        SouthWest = SOUTH_WEST = b'7',
        SouthEast = SOUTH_EAST = b'F',
        Ground = GROUND = b'.',
        Start = START = b'S',
    }
}

impl Pipe {
    const CONNECTED: [Pipe; 6_usize] = [
        Self::Vertical,
        Self::Horizontal,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthWest,
        Self::SouthEast,
    ];

    const fn connections(self) -> Option<[Direction; 2_usize]> {
        match self {
            Self::Vertical => Some([Direction::North, Direction::South]),
            Self::Horizontal => Some([Direction::East, Direction::West]),
            Self::NorthEast => Some([Direction::North, Direction::East]),
            Self::NorthWest => Some([Direction::North, Direction::West]),
            Self::SouthWest => Some([Direction::South, Direction::West]),
            Self::SouthEast => Some([Direction::South, Direction::East]),
            _ => None,
        }
    }

    fn connects(self, dir: Direction) -> bool {
        self.connections()
            .map_or(false, |connections| connections.contains(&dir))
    }

    fn from_connections(dir_a: Direction, dir_b: Direction) -> Option<Self> {
        Self::CONNECTED.into_iter().find(|pipe| {
            let connections: [Direction; 2_usize] = pipe.connections().unwrap();

            connections.contains(&dir_a) && connections.contains(&dir_b)
        })
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Grid2D<Pipe>);

impl Solution {
    /// Walks the loop from the start cell, returning a grid marking only the loop's cells (with
    /// the start cell resolved to its real pipe shape) and the loop's length.
    fn trace_loop(&self) -> Option<(Grid2D<Option<Pipe>>, usize)> {
        let start: IVec2 = self
            .0
            .iter_positions()
            .find(|pos| self.0.get(*pos) == Some(&Pipe::Start))?;

        let mut start_dirs = Direction::iter().filter(|dir| {
            self.0
                .get(start + dir.vec())
                .map_or(false, |pipe| pipe.connects(dir.rev()))
        });
        let first_dir: Direction = start_dirs.next()?;
        let second_dir: Direction = start_dirs.next()?;

        let mut loop_grid: Grid2D<Option<Pipe>> = Grid2D::default(self.0.dimensions());

        *loop_grid.get_mut(start)? = Pipe::from_connections(first_dir, second_dir);

        let mut pos: IVec2 = start + first_dir.vec();
        let mut incoming: Direction = first_dir;
        let mut len: usize = 1_usize;

        while pos != start {
            let pipe: Pipe = *self.0.get(pos)?;

            *loop_grid.get_mut(pos)? = Some(pipe);

            let connections: [Direction; 2_usize] = pipe.connections()?;
            let outgoing: Direction = if connections[0_usize] == incoming.rev() {
                connections[1_usize]
            } else if connections[1_usize] == incoming.rev() {
                connections[0_usize]
            } else {
                // The walk entered a pipe that doesn't connect back
                return None;
            };

            pos += outgoing.vec();
            incoming = outgoing;
            len += 1_usize;
        }

        Some((loop_grid, len))
    }

    fn farthest_loop_distance(&self) -> Option<usize> {
        self.trace_loop().map(|(_, len)| len / 2_usize)
    }

    /// Even-odd rule per row: a cell is enclosed iff the loop cells west of it include an odd
    /// number of north-connecting pipes.
    fn enclosed_tile_count(&self) -> Option<usize> {
        let (loop_grid, _) = self.trace_loop()?;

        let mut enclosed: usize = 0_usize;

        for y in 0_i32..loop_grid.dimensions().y {
            let mut inside: bool = false;

            for pos in
                CellIter2D::until_boundary(&loop_grid, IVec2::new(0_i32, y), Direction::East)
            {
                match loop_grid.get(pos).copied().flatten() {
                    Some(pipe) => {
                        if pipe.connects(Direction::North) {
                            inside = !inside;
                        }
                    }
                    None => {
                        enclosed += inside as usize;
                    }
                }
            }
        }

        Some(enclosed)
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(Grid2D::parse, Self)(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.farthest_loop_distance());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.enclosed_tile_count());
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
    use super::*;

    const SOLUTION_STRS: &[&str] = &[
        "\
        -L|F7\n\
        7S-7|\n\
        L|7||\n\
        -L-J|\n\
        L|-JF\n",
        "\
        7-F7-\n\
        .FJ|7\n\
        SJLL7\n\
        |F--J\n\
        LJ.LJ\n",
        "\
        ...........\n\
        .S-------7.\n\
        .|F-----7|.\n\
        .||.....||.\n\
        .||.....||.\n\
        .|L-7.F-J|.\n\
        .|..|.|..|.\n\
        .L--J.L--J.\n\
        ...........\n",
        "\
        .F----7F7F7F7F-7....\n\
        .|F--7||||||||FJ....\n\
        .||.FJ||||||||L7....\n\
        FJL7L7LJLJ||LJ.L-7..\n\
        L--J.L7...LJS7F-7L7.\n\
        ....F-J..F7FJ|L7L7L7\n\
        ....L7.F7||L7|.L7L7|\n\
        .....|FJLJ|FJ|F7|.LJ\n\
        ....FJL-7.||.||||...\n\
        ....L---J.LJ.LJLJ...\n",
        "\
        FF7FSF7F7F7F7F7F---7\n\
        L|LJ||||||||||||F--J\n\
        FL-7LJLJ||||||LJL-77\n\
        F--JF--7||LJLJ7F7FJ-\n\
        L---JF-JLJ.||-FJLJJ7\n\
        |F|F-JF---7F7-L7L|7|\n\
        |FFJF7L7F-JF7|JL---7\n\
        7-L-JL7||F7|L7F-7F7|\n\
        L.L7LFJ|||||FJL7||LJ\n\
        L7JLJL-JLJLJL--JLJ.L\n",
    ];

    #[test]
    fn test_farthest_loop_distance() {
        assert_eq!(
            Solution::try_from(SOLUTION_STRS[0_usize])
                .unwrap()
                .farthest_loop_distance(),
            Some(4_usize)
        );
        assert_eq!(
            Solution::try_from(SOLUTION_STRS[1_usize])
                .unwrap()
                .farthest_loop_distance(),
            Some(8_usize)
        );
    }

    #[test]
    fn test_enclosed_tile_count() {
        assert_eq!(
            Solution::try_from(SOLUTION_STRS[2_usize])
                .unwrap()
                .enclosed_tile_count(),
            Some(4_usize)
        );
        assert_eq!(
            Solution::try_from(SOLUTION_STRS[3_usize])
                .unwrap()
                .enclosed_tile_count(),
            Some(8_usize)
        );
        assert_eq!(
            Solution::try_from(SOLUTION_STRS[4_usize])
                .unwrap()
                .enclosed_tile_count(),
            Some(10_usize)
        );
    }
}
