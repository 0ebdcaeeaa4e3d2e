use {
    crate::*,
    nom::{
        character::complete::{alphanumeric1, line_ending},
        combinator::{map, opt},
        error::Error,
        multi::many1,
        sequence::terminated,
        Err, IResult,
    },
};

const SPELLED_DIGITS: [&str; 9_usize] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    lines: Vec<String>,
}

impl Solution {
    /// Spelled digits may overlap ("twone"), so every byte offset is probed individually instead
    /// of consuming matches.
    fn digit_at(line: &str, index: usize, allow_spelled: bool) -> Option<u32> {
        let suffix: &str = &line[index..];
        let first_byte: u8 = suffix.as_bytes()[0_usize];

        if first_byte.is_ascii_digit() {
            Some((first_byte - b'0') as u32)
        } else if allow_spelled {
            SPELLED_DIGITS
                .iter()
                .position(|spelled_digit| suffix.starts_with(spelled_digit))
                .map(|position| position as u32 + 1_u32)
        } else {
            None
        }
    }

    fn calibration_value(line: &str, allow_spelled: bool) -> u32 {
        let mut digits = (0_usize..line.len())
            .filter_map(|index| Self::digit_at(line, index, allow_spelled));

        digits.next().map_or(0_u32, |first_digit| {
            let last_digit: u32 = digits.last().unwrap_or(first_digit);

            10_u32 * first_digit + last_digit
        })
    }

    fn calibration_sum(&self, allow_spelled: bool) -> u32 {
        self.lines
            .iter()
            .map(|line| Self::calibration_value(line, allow_spelled))
            .sum()
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            many1(terminated(
                map(alphanumeric1, str::to_owned),
                opt(line_ending),
            )),
            |lines| Self { lines },
        )(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.calibration_sum(false));
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.calibration_sum(true));
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
        1abc2\n\
        pqr3stu8vwx\n\
        a1b2c3d4e5f\n\
        treb7uchet\n",
        "\
        two1nine\n\
        eightwothree\n\
        abcone2threexyz\n\
        xtwone3four\n\
        4nineeightseven2\n\
        zoneight234\n\
        7pqrstsixteen\n",
    ];

    #[test]
    fn test_try_from_str() {
        assert_eq!(
            Solution::try_from(SOLUTION_STRS[0_usize]),
            Ok(Solution {
                lines: vec![
                    "1abc2".to_owned(),
                    "pqr3stu8vwx".to_owned(),
                    "a1b2c3d4e5f".to_owned(),
                    "treb7uchet".to_owned(),
                ]
            })
        );
    }

    #[test]
    fn test_calibration_sum() {
        assert_eq!(
            Solution::try_from(SOLUTION_STRS[0_usize])
                .unwrap()
                .calibration_sum(false),
            142_u32
        );
    }

    #[test]
    fn test_spelled_calibration_sum() {
        assert_eq!(
            Solution::try_from(SOLUTION_STRS[1_usize])
                .unwrap()
                .calibration_sum(true),
            281_u32
        );
    }
}
