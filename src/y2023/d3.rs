use {
    crate::*,
    glam::IVec2,
    nom::{
        character::complete::satisfy, combinator::map, error::Error, Err, IResult,
    },
    std::{collections::HashMap, ops::Range},
};

#[cfg_attr(test, derive(Debug, PartialEq))]
#[derive(Clone, Copy)]
struct SchematicCell(u8);

impl SchematicCell {
    fn digit(self) -> Option<u32> {
        self.0
            .is_ascii_digit()
            .then(|| (self.0 - b'0') as u32)
    }

    fn is_symbol(self) -> bool {
        !self.0.is_ascii_digit() && self.0 != b'.'
    }

    fn is_gear(self) -> bool {
        self.0 == b'*'
    }
}

impl Parse for SchematicCell {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(satisfy(|c| c != '\n' && c != '\r'), |c| Self(c as u8))(input)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
struct PartNumber {
    value: u32,
    y: i32,
    x_range: Range<i32>,
}

impl PartNumber {
    fn iter_ring(&self) -> impl Iterator<Item = IVec2> + '_ {
        ((self.y - 1_i32)..=(self.y + 1_i32)).flat_map(move |y| {
            ((self.x_range.start - 1_i32)..=self.x_range.end)
                .map(move |x| IVec2::new(x, y))
                .filter(move |pos| pos.y != self.y || !self.x_range.contains(&pos.x))
        })
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Grid2D<SchematicCell>);

impl Solution {
    fn part_numbers(&self) -> Vec<PartNumber> {
        let mut part_numbers: Vec<PartNumber> = Vec::new();

        for y in 0_i32..self.0.dimensions().y {
            let mut x: i32 = 0_i32;

            while x < self.0.dimensions().x {
                let x_start: i32 = x;
                let mut value: u32 = 0_u32;

                while let Some(digit) = self
                    .0
                    .get(IVec2::new(x, y))
                    .and_then(|cell| cell.digit())
                {
                    value = 10_u32 * value + digit;
                    x += 1_i32;
                }

                if x > x_start {
                    part_numbers.push(PartNumber {
                        value,
                        y,
                        x_range: x_start..x,
                    });
                } else {
                    x += 1_i32;
                }
            }
        }

        part_numbers
    }

    fn part_number_sum(&self) -> u32 {
        self.part_numbers()
            .into_iter()
            .filter(|part_number| {
                part_number
                    .iter_ring()
                    .any(|pos| self.0.get(pos).map_or(false, |cell| cell.is_symbol()))
            })
            .map(|part_number| part_number.value)
            .sum()
    }

    fn gear_ratio_sum(&self) -> u32 {
        let mut gear_to_part_numbers: HashMap<IVec2, Vec<u32>> = HashMap::new();

        for part_number in self.part_numbers() {
            for pos in part_number.iter_ring() {
                if self.0.get(pos).map_or(false, |cell| cell.is_gear()) {
                    gear_to_part_numbers
                        .entry(pos)
                        .or_default()
                        .push(part_number.value);
                }
            }
        }

        gear_to_part_numbers
            .into_values()
            .filter_map(|part_numbers| {
                (part_numbers.len() == 2_usize)
                    .then(|| part_numbers[0_usize] * part_numbers[1_usize])
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
        dbg!(self.part_number_sum());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.gear_ratio_sum());
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
        467..114..\n\
        ...*......\n\
        ..35..633.\n\
        ......#...\n\
        617*......\n\
        .....+.58.\n\
        ..592.....\n\
        ......755.\n\
        ...$.*....\n\
        .664.598..\n";

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(SOLUTION_STR).unwrap())
    }

    #[test]
    fn test_part_numbers() {
        assert_eq!(
            solution()
                .part_numbers()
                .into_iter()
                .map(|part_number| part_number.value)
                .collect::<Vec<u32>>(),
            vec![467, 114, 35, 633, 617, 58, 592, 755, 664, 598]
        );
    }

    #[test]
    fn test_part_number_sum() {
        assert_eq!(solution().part_number_sum(), 4361_u32);
    }

    #[test]
    fn test_gear_ratio_sum() {
        assert_eq!(solution().gear_ratio_sum(), 467835_u32);
    }
}
