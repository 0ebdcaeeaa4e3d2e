use {
    crate::*,
    nom::{
        bytes::complete::tag,
        character::complete::{line_ending, space1},
        combinator::{map, opt},
        error::Error,
        multi::separated_list1,
        sequence::{preceded, terminated, tuple},
        Err, IResult,
    },
};

#[cfg_attr(test, derive(Debug, PartialEq))]
#[derive(Clone, Copy)]
struct Race {
    time: u64,
    distance: u64,
}

impl Race {
    /// Holding for `t` covers `t * (time - t)`, a downward parabola, so the winning holds form a
    /// contiguous interval found from the roots of `t * (time - t) - distance`.
    fn winning_hold_count(self) -> u64 {
        let time: f64 = self.time as f64;
        let discriminant: f64 = time * time - 4.0_f64 * self.distance as f64;

        if discriminant <= 0.0_f64 {
            0_u64
        } else {
            let mut min_hold: u64 =
                (((time - discriminant.sqrt()) * 0.5_f64).floor().max(0.0_f64)) as u64;

            // Nudge across floating-point rounding error
            while min_hold <= self.time && min_hold * (self.time - min_hold) <= self.distance {
                min_hold += 1_u64;
            }

            if min_hold > self.time {
                // The parabola peaks between integer holds without beating the record
                0_u64
            } else {
                while min_hold > 1_u64
                    && (min_hold - 1_u64) * (self.time - min_hold + 1_u64) > self.distance
                {
                    min_hold -= 1_u64;
                }

                (self.time + 1_u64).saturating_sub(2_u64 * min_hold)
            }
        }
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    races: Vec<Race>,
}

impl Solution {
    fn winning_hold_count_product(&self) -> u64 {
        self.races.iter().map(|race| race.winning_hold_count()).product()
    }

    /// The race list read with bad kerning: all times are one time, all distances one distance.
    fn combined_race(&self) -> Race {
        self.races.iter().fold(
            Race {
                time: 0_u64,
                distance: 0_u64,
            },
            |combined_race, race| Race {
                time: combined_race.time * 10_u64.pow(digits(race.time)) + race.time,
                distance: combined_race.distance * 10_u64.pow(digits(race.distance))
                    + race.distance,
            },
        )
    }
}

const fn digits(value: u64) -> u32 {
    if value == 0_u64 {
        1_u32
    } else {
        value.ilog10() + 1_u32
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            tuple((
                terminated(
                    preceded(
                        tuple((tag("Time:"), space1)),
                        separated_list1(space1, parse_integer::<u64>),
                    ),
                    opt(line_ending),
                ),
                terminated(
                    preceded(
                        tuple((tag("Distance:"), space1)),
                        separated_list1(space1, parse_integer::<u64>),
                    ),
                    opt(line_ending),
                ),
            )),
            |(times, distances)| Self {
                races: times
                    .into_iter()
                    .zip(distances)
                    .map(|(time, distance)| Race { time, distance })
                    .collect(),
            },
        )(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.winning_hold_count_product());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.combined_race().winning_hold_count());
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
        Time:      7  15   30\n\
        Distance:  9  40  200\n";

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(SOLUTION_STR).unwrap())
    }

    #[test]
    fn test_winning_hold_count() {
        assert_eq!(
            solution()
                .races
                .iter()
                .map(|race| race.winning_hold_count())
                .collect::<Vec<u64>>(),
            vec![4_u64, 8_u64, 9_u64]
        );
    }

    #[test]
    fn test_winning_hold_count_unwinnable() {
        // Positive discriminant, but every integer hold ties or loses.
        assert_eq!(
            Race {
                time: 3_u64,
                distance: 2_u64
            }
            .winning_hold_count(),
            0_u64
        );
        assert_eq!(
            Race {
                time: 4_u64,
                distance: 4_u64
            }
            .winning_hold_count(),
            0_u64
        );
        assert_eq!(
            Race {
                time: 3_u64,
                distance: 1_u64
            }
            .winning_hold_count(),
            2_u64
        );
    }

    #[test]
    fn test_winning_hold_count_product() {
        assert_eq!(solution().winning_hold_count_product(), 288_u64);
    }

    #[test]
    fn test_combined_race() {
        let combined_race: Race = solution().combined_race();

        assert_eq!(
            (combined_race.time, combined_race.distance),
            (71530_u64, 940200_u64)
        );
        assert_eq!(combined_race.winning_hold_count(), 71503_u64);
    }
}
