use {
    crate::*,
    nom::{
        branch::alt,
        bytes::complete::tag,
        character::complete::line_ending,
        combinator::{map, opt},
        error::Error,
        multi::{many1, separated_list1},
        sequence::{preceded, separated_pair, terminated},
        Err, IResult,
    },
};

#[cfg_attr(test, derive(Debug, PartialEq))]
#[derive(Clone, Copy, Default)]
struct CubeSet {
    red: u32,
    green: u32,
    blue: u32,
}

impl CubeSet {
    const BAG: Self = Self {
        red: 12_u32,
        green: 13_u32,
        blue: 14_u32,
    };

    fn contains(self, other: Self) -> bool {
        self.red >= other.red && self.green >= other.green && self.blue >= other.blue
    }

    fn max(self, other: Self) -> Self {
        Self {
            red: self.red.max(other.red),
            green: self.green.max(other.green),
            blue: self.blue.max(other.blue),
        }
    }

    fn power(self) -> u32 {
        self.red * self.green * self.blue
    }
}

impl Parse for CubeSet {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            separated_list1(
                tag(", "),
                separated_pair(
                    parse_integer::<u32>,
                    tag(" "),
                    alt((tag("red"), tag("green"), tag("blue"))),
                ),
            ),
            |counts| {
                counts
                    .into_iter()
                    .fold(Self::default(), |cube_set, (count, color)| match color {
                        "red" => Self { red: count, ..cube_set },
                        "green" => Self {
                            green: count,
                            ..cube_set
                        },
                        _ => Self {
                            blue: count,
                            ..cube_set
                        },
                    })
            },
        )(input)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
struct Game {
    id: u32,
    draws: Vec<CubeSet>,
}

impl Game {
    fn is_possible(&self) -> bool {
        self.draws.iter().all(|draw| CubeSet::BAG.contains(*draw))
    }

    fn minimal_set(&self) -> CubeSet {
        self.draws
            .iter()
            .fold(CubeSet::default(), |minimal_set, draw| {
                minimal_set.max(*draw)
            })
    }
}

impl Parse for Game {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            separated_pair(
                preceded(tag("Game "), parse_integer::<u32>),
                tag(": "),
                separated_list1(tag("; "), CubeSet::parse),
            ),
            |(id, draws)| Self { id, draws },
        )(input)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    games: Vec<Game>,
}

impl Solution {
    fn possible_game_id_sum(&self) -> u32 {
        self.games
            .iter()
            .filter_map(|game| game.is_possible().then_some(game.id))
            .sum()
    }

    fn minimal_set_power_sum(&self) -> u32 {
        self.games
            .iter()
            .map(|game| game.minimal_set().power())
            .sum()
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(many1(terminated(Game::parse, opt(line_ending))), |games| {
            Self { games }
        })(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.possible_game_id_sum());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.minimal_set_power_sum());
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
        Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green\n\
        Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue\n\
        Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red\n\
        Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red\n\
        Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green\n";

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(SOLUTION_STR).unwrap())
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            solution().games[0_usize],
            Game {
                id: 1_u32,
                draws: vec![
                    CubeSet {
                        red: 4_u32,
                        green: 0_u32,
                        blue: 3_u32
                    },
                    CubeSet {
                        red: 1_u32,
                        green: 2_u32,
                        blue: 6_u32
                    },
                    CubeSet {
                        red: 0_u32,
                        green: 2_u32,
                        blue: 0_u32
                    },
                ]
            }
        );
    }

    #[test]
    fn test_possible_game_id_sum() {
        assert_eq!(solution().possible_game_id_sum(), 8_u32);
    }

    #[test]
    fn test_minimal_set_power_sum() {
        assert_eq!(solution().minimal_set_power_sum(), 2286_u32);
    }
}
