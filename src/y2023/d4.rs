use {
    crate::*,
    nom::{
        bytes::complete::tag,
        character::complete::{line_ending, space1},
        combinator::{map, opt},
        error::Error,
        multi::{many1, separated_list1},
        sequence::{delimited, preceded, separated_pair, terminated, tuple},
        Err, IResult,
    },
};

#[cfg_attr(test, derive(Debug, PartialEq))]
struct Card {
    winning_numbers: Vec<u8>,
    own_numbers: Vec<u8>,
}

impl Card {
    fn matches(&self) -> usize {
        self.own_numbers
            .iter()
            .filter(|own_number| self.winning_numbers.contains(own_number))
            .count()
    }

    fn points(&self) -> u32 {
        match self.matches() {
            0_usize => 0_u32,
            matches => 1_u32 << (matches - 1_usize),
        }
    }
}

impl Parse for Card {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            preceded(
                tuple((tag("Card"), space1, parse_integer::<u8>, tag(":"), space1)),
                separated_pair(
                    separated_list1(space1, parse_integer::<u8>),
                    delimited(space1, tag("|"), space1),
                    separated_list1(space1, parse_integer::<u8>),
                ),
            ),
            |(winning_numbers, own_numbers)| Self {
                winning_numbers,
                own_numbers,
            },
        )(input)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    cards: Vec<Card>,
}

impl Solution {
    fn point_sum(&self) -> u32 {
        self.cards.iter().map(Card::points).sum()
    }

    /// Each card with `n` matches wins one copy of each of the `n` following cards, copies
    /// included.
    fn total_card_count(&self) -> usize {
        let mut card_counts: Vec<usize> = vec![1_usize; self.cards.len()];

        for (index, card) in self.cards.iter().enumerate() {
            let card_count: usize = card_counts[index];

            for won_index in index + 1_usize..(index + 1_usize + card.matches()).min(self.cards.len())
            {
                card_counts[won_index] += card_count;
            }
        }

        card_counts.into_iter().sum()
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(many1(terminated(Card::parse, opt(line_ending))), |cards| {
            Self { cards }
        })(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.point_sum());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.total_card_count());
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
        Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53\n\
        Card 2: 13 32 20 16 61 | 61 30 68 82 17 32 24 19\n\
        Card 3:  1 21 53 59 44 | 69 82 63 72 16 21 14  1\n\
        Card 4: 41 92 73 84 69 | 59 84 76 51 58  5 54 83\n\
        Card 5: 87 83 26 28 32 | 88 30 70 12 93 22 82 36\n\
        Card 6: 31 18 13 56 72 | 74 77 10 23 35 67 36 11\n";

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(SOLUTION_STR).unwrap())
    }

    #[test]
    fn test_matches() {
        assert_eq!(
            solution()
                .cards
                .iter()
                .map(Card::matches)
                .collect::<Vec<usize>>(),
            vec![4_usize, 2_usize, 2_usize, 1_usize, 0_usize, 0_usize]
        );
    }

    #[test]
    fn test_point_sum() {
        assert_eq!(solution().point_sum(), 13_u32);
    }

    #[test]
    fn test_total_card_count() {
        assert_eq!(solution().total_card_count(), 30_usize);
    }
}
