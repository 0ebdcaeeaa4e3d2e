use {
    crate::*,
    nom::{
        bytes::complete::tag,
        character::complete::{alpha1, line_ending},
        combinator::{map, opt},
        error::Error,
        multi::{many1, separated_list1},
        sequence::{delimited, preceded, terminated, tuple},
        Err, IResult,
    },
    std::{mem::take, ops::Range},
};

#[cfg_attr(test, derive(Debug, PartialEq))]
struct MapRange {
    destination_start: i64,
    source_range: Range<i64>,
}

impl Parse for MapRange {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            tuple((
                terminated(parse_integer::<i64>, tag(" ")),
                terminated(parse_integer::<i64>, tag(" ")),
                parse_integer::<i64>,
            )),
            |(destination_start, source_start, len)| Self {
                destination_start,
                source_range: source_start..source_start + len,
            },
        )(input)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
struct CategoryMap {
    /// Sorted by source range start, non-overlapping
    ranges: Vec<MapRange>,
}

impl CategoryMap {
    fn map_value(&self, value: i64) -> i64 {
        self.ranges
            .iter()
            .find(|map_range| map_range.source_range.contains(&value))
            .map_or(value, |map_range| {
                map_range.destination_start + value - map_range.source_range.start
            })
    }

    /// Splits `range` into mapped and pass-through pieces, pushing each onto `output`.
    fn map_range(&self, range: Range<i64>, output: &mut Vec<Range<i64>>) {
        let mut start: i64 = range.start;

        for map_range in self.ranges.iter() {
            if start >= range.end {
                break;
            }

            let source_range: &Range<i64> = &map_range.source_range;

            if source_range.end <= start {
                continue;
            }

            if source_range.start > start {
                let pass_through_end: i64 = source_range.start.min(range.end);

                output.push(start..pass_through_end);
                start = pass_through_end;
            }

            let overlap_end: i64 = source_range.end.min(range.end);

            if start < overlap_end {
                let offset: i64 = map_range.destination_start - source_range.start;

                output.push(start + offset..overlap_end + offset);
                start = overlap_end;
            }
        }

        if start < range.end {
            output.push(start..range.end);
        }
    }
}

impl Parse for CategoryMap {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            preceded(
                tuple((alpha1, tag("-to-"), alpha1, tag(" map:"), line_ending)),
                many1(terminated(MapRange::parse, opt(line_ending))),
            ),
            |mut ranges| {
                ranges.sort_by_key(|map_range| map_range.source_range.start);

                Self { ranges }
            },
        )(input)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    seeds: Vec<i64>,
    maps: Vec<CategoryMap>,
}

impl Solution {
    fn location_for_seed(&self, seed: i64) -> i64 {
        self.maps
            .iter()
            .fold(seed, |value, category_map| category_map.map_value(value))
    }

    fn min_location_for_seeds(&self) -> Option<i64> {
        self.seeds
            .iter()
            .map(|seed| self.location_for_seed(*seed))
            .min()
    }

    /// The seed list pairs up into (start, length) ranges, which are pushed through all maps with
    /// splitting rather than seed by seed.
    fn min_location_for_seed_ranges(&self) -> Option<i64> {
        let mut ranges: Vec<Range<i64>> = self
            .seeds
            .chunks_exact(2_usize)
            .map(|pair| pair[0_usize]..pair[0_usize] + pair[1_usize])
            .collect();
        let mut next_ranges: Vec<Range<i64>> = Vec::new();

        for category_map in self.maps.iter() {
            for range in take(&mut ranges) {
                category_map.map_range(range, &mut next_ranges);
            }

            ranges = take(&mut next_ranges);
        }

        ranges.into_iter().map(|range| range.start).min()
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            tuple((
                delimited(
                    tag("seeds: "),
                    separated_list1(tag(" "), parse_integer::<i64>),
                    many1(line_ending),
                ),
                separated_list1(line_ending, CategoryMap::parse),
            )),
            |(seeds, maps)| Self { seeds, maps },
        )(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.min_location_for_seeds());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.min_location_for_seed_ranges());
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
        seeds: 79 14 55 13\n\
        \n\
        seed-to-soil map:\n\
        50 98 2\n\
        52 50 48\n\
        \n\
        soil-to-fertilizer map:\n\
        0 15 37\n\
        37 52 2\n\
        39 0 15\n\
        \n\
        fertilizer-to-water map:\n\
        49 53 8\n\
        0 11 42\n\
        42 0 7\n\
        57 7 4\n\
        \n\
        water-to-light map:\n\
        88 18 7\n\
        18 25 70\n\
        \n\
        light-to-temperature map:\n\
        45 77 23\n\
        81 45 19\n\
        68 64 13\n\
        \n\
        temperature-to-humidity map:\n\
        0 69 1\n\
        1 0 69\n\
        \n\
        humidity-to-location map:\n\
        60 56 37\n\
        56 93 4\n";

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(SOLUTION_STR).unwrap())
    }

    #[test]
    fn test_parse() {
        assert_eq!(solution().seeds, vec![79_i64, 14_i64, 55_i64, 13_i64]);
        assert_eq!(solution().maps.len(), 7_usize);
    }

    #[test]
    fn test_location_for_seed() {
        assert_eq!(
            solution()
                .seeds
                .iter()
                .map(|seed| solution().location_for_seed(*seed))
                .collect::<Vec<i64>>(),
            vec![82_i64, 43_i64, 86_i64, 35_i64]
        );
    }

    #[test]
    fn test_min_location_for_seeds() {
        assert_eq!(solution().min_location_for_seeds(), Some(35_i64));
    }

    #[test]
    fn test_min_location_for_seed_ranges() {
        assert_eq!(solution().min_location_for_seed_ranges(), Some(46_i64));
    }
}
