use {
    crate::*,
    glam::IVec2,
    nom::{
        character::complete::line_ending,
        combinator::{map, opt},
        error::Error,
        multi::many1,
        sequence::terminated,
        Err, IResult,
    },
};

define_cell! {
    #[repr(u8)]
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    enum ValleyCell {
        Ash = ASH = b'.',
        Rock = ROCK = b'#',
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
struct Pattern {
    /// Each row as a bitmask of rock cells
    rows: Vec<u32>,
    /// Each column as a bitmask of rock cells
    cols: Vec<u32>,
}

impl Pattern {
    /// A reflection axis between `values[axis - 1]` and `values[axis]` is accepted iff the
    /// mirrored pairs differ in exactly `smudges` bits total.
    fn reflection_axis(values: &[u32], smudges: u32) -> Option<usize> {
        (1_usize..values.len()).find(|axis| {
            (0_usize..(*axis).min(values.len() - axis))
                .map(|offset| {
                    (values[axis - 1_usize - offset] ^ values[axis + offset]).count_ones()
                })
                .sum::<u32>()
                == smudges
        })
    }

    fn summary(&self, smudges: u32) -> usize {
        Self::reflection_axis(&self.cols, smudges).unwrap_or_default()
            + 100_usize * Self::reflection_axis(&self.rows, smudges).unwrap_or_default()
    }
}

impl From<Grid2D<ValleyCell>> for Pattern {
    fn from(grid: Grid2D<ValleyCell>) -> Self {
        let dimensions: IVec2 = grid.dimensions();
        let mut rows: Vec<u32> = vec![0_u32; dimensions.y as usize];
        let mut cols: Vec<u32> = vec![0_u32; dimensions.x as usize];

        for pos in grid.iter_positions() {
            if *grid.get(pos).unwrap() == ValleyCell::Rock {
                rows[pos.y as usize] |= 1_u32 << pos.x;
                cols[pos.x as usize] |= 1_u32 << pos.y;
            }
        }

        Self { rows, cols }
    }
}

impl Parse for Pattern {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(Grid2D::parse, Self::from)(input)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    patterns: Vec<Pattern>,
}

impl Solution {
    fn summary_sum(&self, smudges: u32) -> usize {
        self.patterns
            .iter()
            .map(|pattern| pattern.summary(smudges))
            .sum()
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            many1(terminated(Pattern::parse, opt(line_ending))),
            |patterns| Self { patterns },
        )(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.summary_sum(0_u32));
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.summary_sum(1_u32));
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
        #.##..##.\n\
        ..#.##.#.\n\
        ##......#\n\
        ##......#\n\
        ..#.##.#.\n\
        ..##..##.\n\
        #.#.##.#.\n\
        \n\
        #...##..#\n\
        #....#..#\n\
        ..##..###\n\
        #####.##.\n\
        #####.##.\n\
        ..##..###\n\
        #....#..#\n";

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(SOLUTION_STR).unwrap())
    }

    #[test]
    fn test_summary() {
        assert_eq!(solution().patterns[0_usize].summary(0_u32), 5_usize);
        assert_eq!(solution().patterns[1_usize].summary(0_u32), 400_usize);
    }

    #[test]
    fn test_summary_sum() {
        assert_eq!(solution().summary_sum(0_u32), 405_usize);
    }

    #[test]
    fn test_smudged_summary_sum() {
        assert_eq!(solution().summary_sum(1_u32), 400_usize);
    }
}
