use {
    crate::*,
    glam::I64Vec2,
    nom::{
        bytes::complete::{tag, take_while_m_n},
        character::complete::{line_ending, one_of},
        combinator::{map, map_res, opt},
        error::Error,
        multi::many1,
        sequence::{delimited, terminated, tuple},
        Err, IResult,
    },
};

#[cfg_attr(test, derive(Debug, PartialEq))]
struct DigStep {
    dir: Direction,
    len: i64,

    /// Six hex digits, actually an encoded (length, direction) pair
    color: u32,
}

impl DigStep {
    fn decoded(&self) -> (Direction, i64) {
        let dir: Direction = match self.color & 0xF_u32 {
            0_u32 => Direction::East,
            1_u32 => Direction::South,
            2_u32 => Direction::West,
            _ => Direction::North,
        };

        (dir, (self.color >> 4_u32) as i64)
    }
}

impl Parse for DigStep {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            tuple((
                terminated(
                    map(one_of("UDLR"), |c| match c {
                        'U' => Direction::North,
                        'D' => Direction::South,
                        'L' => Direction::West,
                        _ => Direction::East,
                    }),
                    tag(" "),
                ),
                terminated(parse_integer::<i64>, tag(" ")),
                delimited(
                    tag("(#"),
                    map_res(
                        take_while_m_n(6_usize, 6_usize, |c: char| c.is_ascii_hexdigit()),
                        |hex: &str| u32::from_str_radix(hex, 16_u32),
                    ),
                    tag(")"),
                ),
            )),
            |(dir, len, color)| Self { dir, len, color },
        )(input)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    steps: Vec<DigStep>,
}

impl Solution {
    /// Shoelace area of the trench loop plus the boundary cells. With interior `I`, boundary `B`,
    /// and polygon area `A`, Pick's theorem gives `I + B = A + B / 2 + 1`.
    fn lagoon_volume(steps: impl Iterator<Item = (Direction, i64)>) -> i64 {
        let mut pos: I64Vec2 = I64Vec2::ZERO;
        let mut double_area: i64 = 0_i64;
        let mut perimeter: i64 = 0_i64;

        for (dir, len) in steps {
            let next: I64Vec2 = pos + dir.vec().as_i64vec2() * len;

            double_area += pos.x * next.y - next.x * pos.y;
            perimeter += len;
            pos = next;
        }

        double_area.abs() / 2_i64 + perimeter / 2_i64 + 1_i64
    }

    fn plan_lagoon_volume(&self) -> i64 {
        Self::lagoon_volume(self.steps.iter().map(|step| (step.dir, step.len)))
    }

    fn decoded_lagoon_volume(&self) -> i64 {
        Self::lagoon_volume(self.steps.iter().map(DigStep::decoded))
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            many1(terminated(DigStep::parse, opt(line_ending))),
            |steps| Self { steps },
        )(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.plan_lagoon_volume());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.decoded_lagoon_volume());
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
        R 6 (#70c710)\n\
        D 5 (#0dc571)\n\
        L 2 (#5713f0)\n\
        D 2 (#d2c081)\n\
        R 2 (#59c680)\n\
        D 2 (#411b91)\n\
        L 5 (#8ceee2)\n\
        U 2 (#caa173)\n\
        L 1 (#1b58a2)\n\
        U 2 (#caa171)\n\
        R 2 (#7807d2)\n\
        U 3 (#a77fa3)\n\
        L 2 (#015232)\n\
        U 2 (#7a21e3)\n";

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(SOLUTION_STR).unwrap())
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            solution().steps[0_usize],
            DigStep {
                dir: Direction::East,
                len: 6_i64,
                color: 0x70c710_u32,
            }
        );
    }

    #[test]
    fn test_decoded() {
        assert_eq!(
            solution().steps[0_usize].decoded(),
            (Direction::East, 461937_i64)
        );
    }

    #[test]
    fn test_plan_lagoon_volume() {
        assert_eq!(solution().plan_lagoon_volume(), 62_i64);
    }

    #[test]
    fn test_decoded_lagoon_volume() {
        assert_eq!(solution().decoded_lagoon_volume(), 952408144115_i64);
    }
}
