use {
    crate::*,
    nom::{
        bytes::complete::tag,
        character::complete::{line_ending, one_of},
        combinator::{map, opt},
        error::Error,
        multi::{count, many1},
        sequence::{separated_pair, terminated},
        Err, IResult,
    },
    std::cmp::Reverse,
};

const CARDS_PER_HAND: usize = 5_usize;
const CARD_LABELS: &str = "23456789TJQKA";
const JACK_VALUE: u8 = 9_u8;

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

#[cfg_attr(test, derive(Debug, PartialEq))]
#[derive(Clone, Copy)]
struct Hand {
    /// Card label indices into `CARD_LABELS`
    cards: [u8; CARDS_PER_HAND],
    bid: u32,
}

impl Hand {
    fn hand_type(&self, jacks_are_jokers: bool) -> HandType {
        let mut label_counts: [u8; CARD_LABELS.len()] = [0_u8; CARD_LABELS.len()];

        for card in self.cards {
            label_counts[card as usize] += 1_u8;
        }

        let joker_count: u8 = if jacks_are_jokers {
            std::mem::take(&mut label_counts[JACK_VALUE as usize])
        } else {
            0_u8
        };

        label_counts.sort_by_key(|label_count| Reverse(*label_count));

        // Jokers always strengthen the largest group
        match (label_counts[0_usize] + joker_count, label_counts[1_usize]) {
            (5_u8, _) => HandType::FiveOfAKind,
            (4_u8, _) => HandType::FourOfAKind,
            (3_u8, 2_u8) => HandType::FullHouse,
            (3_u8, _) => HandType::ThreeOfAKind,
            (2_u8, 2_u8) => HandType::TwoPair,
            (2_u8, _) => HandType::OnePair,
            _ => HandType::HighCard,
        }
    }

    fn rank_key(&self, jacks_are_jokers: bool) -> (HandType, [u8; CARDS_PER_HAND]) {
        let mut cards: [u8; CARDS_PER_HAND] = self.cards;

        if jacks_are_jokers {
            for card in cards.iter_mut() {
                if *card == JACK_VALUE {
                    // Jokers are the weakest individual card
                    *card = 0_u8;
                } else if *card < JACK_VALUE {
                    *card += 1_u8;
                }
            }
        }

        (self.hand_type(jacks_are_jokers), cards)
    }
}

impl Parse for Hand {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            separated_pair(
                count(
                    map(one_of(CARD_LABELS), |label| {
                        CARD_LABELS.find(label).unwrap() as u8
                    }),
                    CARDS_PER_HAND,
                ),
                tag(" "),
                parse_integer::<u32>,
            ),
            |(cards, bid)| Self {
                cards: cards.try_into().unwrap(),
                bid,
            },
        )(input)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    hands: Vec<Hand>,
}

impl Solution {
    fn total_winnings(&self, jacks_are_jokers: bool) -> u32 {
        let mut hands: Vec<Hand> = self.hands.clone();

        hands.sort_by_key(|hand| hand.rank_key(jacks_are_jokers));

        hands
            .into_iter()
            .enumerate()
            .map(|(index, hand)| (index as u32 + 1_u32) * hand.bid)
            .sum()
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(many1(terminated(Hand::parse, opt(line_ending))), |hands| {
            Self { hands }
        })(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.total_winnings(false));
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.total_winnings(true));
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
        32T3K 765\n\
        T55J5 684\n\
        KK677 28\n\
        KTJJT 220\n\
        QQQJA 483\n";

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(SOLUTION_STR).unwrap())
    }

    #[test]
    fn test_hand_type() {
        assert_eq!(
            solution()
                .hands
                .iter()
                .map(|hand| hand.hand_type(false))
                .collect::<Vec<HandType>>(),
            vec![
                HandType::OnePair,
                HandType::ThreeOfAKind,
                HandType::TwoPair,
                HandType::TwoPair,
                HandType::ThreeOfAKind,
            ]
        );
        assert_eq!(
            solution()
                .hands
                .iter()
                .map(|hand| hand.hand_type(true))
                .collect::<Vec<HandType>>(),
            vec![
                HandType::OnePair,
                HandType::FourOfAKind,
                HandType::TwoPair,
                HandType::FourOfAKind,
                HandType::FourOfAKind,
            ]
        );
    }

    #[test]
    fn test_total_winnings() {
        assert_eq!(solution().total_winnings(false), 6440_u32);
    }

    #[test]
    fn test_total_winnings_with_jokers() {
        assert_eq!(solution().total_winnings(true), 5905_u32);
    }
}
