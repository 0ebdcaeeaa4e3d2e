use {
    crate::*,
    nom::{
        bytes::complete::tag,
        character::complete::line_ending,
        combinator::{map, opt},
        error::Error,
        multi::{many1, separated_list1},
        sequence::terminated,
        Err, IResult,
    },
};

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    histories: Vec<Vec<i64>>,
}

impl Solution {
    /// Repeatedly differences `values` down to an all-zero row, accumulating the last element of
    /// each row, which sums to the next value of the original sequence.
    fn extrapolate(values: &[i64]) -> i64 {
        let mut row: Vec<i64> = values.to_vec();
        let mut extrapolation: i64 = 0_i64;

        while row.iter().any(|value| *value != 0_i64) {
            extrapolation += row.last().copied().unwrap_or_default();
            row = row.windows(2_usize).map(|pair| pair[1_usize] - pair[0_usize]).collect();
        }

        extrapolation
    }

    fn extrapolation_sum(&self) -> i64 {
        self.histories
            .iter()
            .map(|history| Self::extrapolate(history))
            .sum()
    }

    /// Extrapolating backwards is extrapolating the reversed sequence forwards.
    fn back_extrapolation_sum(&self) -> i64 {
        self.histories
            .iter()
            .map(|history| {
                let reversed: Vec<i64> = history.iter().rev().copied().collect();

                Self::extrapolate(&reversed)
            })
            .sum()
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            many1(terminated(
                separated_list1(tag(" "), parse_integer::<i64>),
                opt(line_ending),
            )),
            |histories| Self { histories },
        )(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.extrapolation_sum());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.back_extrapolation_sum());
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = Err<Error<&'i str>>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(Self::parse(input)?.1)
    }
}
