use {
    crate::*,
    bitvec::prelude::*,
    glam::IVec2,
    nom::{combinator::map, error::Error, Err, IResult},
    rayon::iter::{IntoParallelRefIterator, ParallelIterator},
    strum::EnumCount,
};

define_cell! {
    #[repr(u8)]
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    enum ContraptionCell {
        Empty = EMPTY = b'.',
        ForwardMirror = FORWARD_MIRROR = b'/',
        BackwardMirror = BACKWARD_MIRROR = b'\\',
        VerticalSplitter = VERTICAL_SPLITTER = b'|',
        HorizontalSplitter = HORIZONTAL_SPLITTER = b'-',
    }
}

impl ContraptionCell {
    /// The directions a beam heading `dir` leaves this cell in.
    fn outputs(self, dir: Direction) -> (Direction, Option<Direction>) {
        match self {
            Self::Empty => (dir, None),
            Self::ForwardMirror => match dir {
                Direction::North => (Direction::East, None),
                Direction::East => (Direction::North, None),
                Direction::South => (Direction::West, None),
                Direction::West => (Direction::South, None),
            },
            Self::BackwardMirror => match dir {
                Direction::North => (Direction::West, None),
                Direction::West => (Direction::North, None),
                Direction::South => (Direction::East, None),
                Direction::East => (Direction::South, None),
            },
            Self::VerticalSplitter => {
                if dir.is_north_or_south() {
                    (dir, None)
                } else {
                    (Direction::North, Some(Direction::South))
                }
            }
            Self::HorizontalSplitter => {
                if dir.is_north_or_south() {
                    (Direction::East, Some(Direction::West))
                } else {
                    (dir, None)
                }
            }
        }
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Grid2D<ContraptionCell>);

impl Solution {
    fn energized_tile_count(&self, start: IVec2, start_dir: Direction) -> usize {
        let grid: &Grid2D<ContraptionCell> = &self.0;
        let mut visited: BitVec = bitvec![0; grid.cells().len() * Direction::COUNT];
        let mut beams: Vec<(IVec2, Direction)> = vec![(start, start_dir)];

        while let Some((pos, dir)) = beams.pop() {
            let Some(index) = grid.try_index_from_pos(pos) else {
                continue;
            };

            let bit_index: usize = index * Direction::COUNT + dir as usize;

            if visited[bit_index] {
                continue;
            }

            visited.set(bit_index, true);

            let (first, second): (Direction, Option<Direction>) =
                grid.cells()[index].outputs(dir);

            beams.push((pos + first.vec(), first));

            if let Some(second) = second {
                beams.push((pos + second.vec(), second));
            }
        }

        visited
            .chunks(Direction::COUNT)
            .filter(|cell_bits| cell_bits.any())
            .count()
    }

    fn top_left_energized_tile_count(&self) -> usize {
        self.energized_tile_count(IVec2::ZERO, Direction::East)
    }

    fn max_energized_tile_count(&self) -> Option<usize> {
        let dimensions: IVec2 = self.0.dimensions();
        let mut starts: Vec<(IVec2, Direction)> = Vec::new();

        for x in 0_i32..dimensions.x {
            starts.push((IVec2::new(x, 0_i32), Direction::South));
            starts.push((IVec2::new(x, dimensions.y - 1_i32), Direction::North));
        }

        for y in 0_i32..dimensions.y {
            starts.push((IVec2::new(0_i32, y), Direction::East));
            starts.push((IVec2::new(dimensions.x - 1_i32, y), Direction::West));
        }

        starts
            .par_iter()
            .map(|(start, start_dir)| self.energized_tile_count(*start, *start_dir))
            .max()
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(Grid2D::parse, Self)(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.top_left_energized_tile_count());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.max_energized_tile_count());
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
        .|...\\....\n\
        |.-.\\.....\n\
        .....|-...\n\
        ........|.\n\
        ..........\n\
        .........\\\n\
        ..../.\\\\..\n\
        .-.-/..|..\n\
        .|....-|.\\\n\
        ..//.|....\n";

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(SOLUTION_STR).unwrap())
    }

    #[test]
    fn test_top_left_energized_tile_count() {
        assert_eq!(solution().top_left_energized_tile_count(), 46_usize);
    }

    #[test]
    fn test_best_start() {
        assert_eq!(
            solution().energized_tile_count(IVec2::new(3_i32, 0_i32), Direction::South),
            51_usize
        );
    }

    #[test]
    fn test_max_energized_tile_count() {
        assert_eq!(solution().max_energized_tile_count(), Some(51_usize));
    }
}
