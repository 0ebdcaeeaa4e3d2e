use {
    crate::*,
    glam::I64Vec2,
    nom::{combinator::map, error::Error, Err, IResult},
};

define_cell! {
    #[repr(u8)]
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    enum SkyCell {
        #[default]
        Empty = EMPTY = b'.',
        Galaxy = GALAXY = b'#',
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Grid2D<SkyCell>);

impl Solution {
    const EXPANSION_FACTOR: i64 = 2_i64;
    const FULL_EXPANSION_FACTOR: i64 = 1_000_000_i64;

    /// Galaxy positions with every empty row and column counted `expansion_factor` times.
    fn expanded_galaxies(&self, expansion_factor: i64) -> Vec<I64Vec2> {
        let dimensions = self.0.dimensions();
        let mut col_is_empty: Vec<bool> = vec![true; dimensions.x as usize];
        let mut row_is_empty: Vec<bool> = vec![true; dimensions.y as usize];

        for pos in self.0.iter_positions() {
            if *self.0.get(pos).unwrap() == SkyCell::Galaxy {
                col_is_empty[pos.x as usize] = false;
                row_is_empty[pos.y as usize] = false;
            }
        }

        let expansion_before = |is_empty: &[bool]| -> Vec<i64> {
            is_empty
                .iter()
                .scan(0_i64, |empty_count, is_empty| {
                    let expansion: i64 = *empty_count * (expansion_factor - 1_i64);

                    *empty_count += *is_empty as i64;

                    Some(expansion)
                })
                .collect()
        };

        let col_expansions: Vec<i64> = expansion_before(&col_is_empty);
        let row_expansions: Vec<i64> = expansion_before(&row_is_empty);

        self.0
            .iter_positions()
            .filter(|pos| *self.0.get(*pos).unwrap() == SkyCell::Galaxy)
            .map(|pos| {
                I64Vec2::new(
                    pos.x as i64 + col_expansions[pos.x as usize],
                    pos.y as i64 + row_expansions[pos.y as usize],
                )
            })
            .collect()
    }

    fn expanded_distance_sum(&self, expansion_factor: i64) -> i64 {
        let galaxies: Vec<I64Vec2> = self.expanded_galaxies(expansion_factor);

        galaxies
            .iter()
            .enumerate()
            .flat_map(|(index, galaxy_a)| {
                galaxies[index + 1_usize..]
                    .iter()
                    .map(|galaxy_b| galaxy_a.manhattan_distance(*galaxy_b))
            })
            .sum()
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(Grid2D::parse, Self)(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.expanded_distance_sum(Self::EXPANSION_FACTOR));
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.expanded_distance_sum(Self::FULL_EXPANSION_FACTOR));
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
        ...#......\n\
        .......#..\n\
        #.........\n\
        ..........\n\
        ......#...\n\
        .#........\n\
        .........#\n\
        ..........\n\
        .......#..\n\
        #...#.....\n";

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(SOLUTION_STR).unwrap())
    }

    #[test]
    fn test_expanded_galaxies() {
        assert_eq!(
            solution().expanded_galaxies(2_i64).len(),
            9_usize
        );
        assert_eq!(
            solution().expanded_galaxies(2_i64)[0_usize],
            I64Vec2::new(4_i64, 0_i64)
        );
    }

    #[test]
    fn test_expanded_distance_sum() {
        assert_eq!(solution().expanded_distance_sum(2_i64), 374_i64);
        assert_eq!(solution().expanded_distance_sum(10_i64), 1030_i64);
        assert_eq!(solution().expanded_distance_sum(100_i64), 8410_i64);
    }
}
