use {
    crate::*,
    nom::{
        bytes::complete::tag,
        character::complete::line_ending,
        combinator::{map, opt},
        error::Error,
        multi::{many1, separated_list1},
        sequence::{separated_pair, terminated},
        Err, IResult,
    },
    rayon::iter::{IntoParallelRefIterator, ParallelIterator},
};

define_cell! {
    #[repr(u8)]
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    enum SpringCell {
        Operational = OPERATIONAL = b'.',
        Damaged = DAMAGED = b'#',
        Unknown = UNKNOWN = b'?',
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
struct Row {
    springs: Vec<SpringCell>,
    groups: Vec<usize>,
}

impl Row {
    const UNFOLD_COPIES: usize = 5_usize;

    /// Counts assignments of the unknown springs consistent with the damaged group list, memoized
    /// over (spring index, group index) since the remainder of the row is fully determined by
    /// that pair.
    fn arrangement_count(&self) -> u64 {
        let springs_len: usize = self.springs.len();
        let groups_len: usize = self.groups.len();
        let mut memo: Vec<Option<u64>> = vec![None; (springs_len + 1_usize) * (groups_len + 1_usize)];

        self.arrangement_count_internal(0_usize, 0_usize, &mut memo)
    }

    fn arrangement_count_internal(
        &self,
        spring_index: usize,
        group_index: usize,
        memo: &mut Vec<Option<u64>>,
    ) -> u64 {
        let memo_index: usize = spring_index * (self.groups.len() + 1_usize) + group_index;

        if let Some(count) = memo[memo_index] {
            return count;
        }

        let count: u64 = if spring_index >= self.springs.len() {
            (group_index == self.groups.len()) as u64
        } else {
            let spring: SpringCell = self.springs[spring_index];
            let mut count: u64 = 0_u64;

            if spring != SpringCell::Damaged {
                count += self.arrangement_count_internal(spring_index + 1_usize, group_index, memo);
            }

            if spring != SpringCell::Operational && group_index < self.groups.len() {
                let group: usize = self.groups[group_index];
                let group_end: usize = spring_index + group;

                if group_end <= self.springs.len()
                    && self.springs[spring_index..group_end]
                        .iter()
                        .all(|spring| *spring != SpringCell::Operational)
                    && self.springs.get(group_end) != Some(&SpringCell::Damaged)
                {
                    let next_spring_index: usize = (group_end + 1_usize).min(self.springs.len());

                    count +=
                        self.arrangement_count_internal(next_spring_index, group_index + 1_usize, memo);
                }
            }

            count
        };

        memo[memo_index] = Some(count);

        count
    }

    fn unfold(&self) -> Self {
        let mut springs: Vec<SpringCell> = Vec::with_capacity(
            self.springs.len() * Self::UNFOLD_COPIES + Self::UNFOLD_COPIES - 1_usize,
        );

        for copy in 0_usize..Self::UNFOLD_COPIES {
            if copy != 0_usize {
                springs.push(SpringCell::Unknown);
            }

            springs.extend_from_slice(&self.springs);
        }

        Self {
            springs,
            groups: self.groups.repeat(Self::UNFOLD_COPIES),
        }
    }
}

impl Parse for Row {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            separated_pair(
                many1(SpringCell::parse),
                tag(" "),
                separated_list1(tag(","), parse_integer::<usize>),
            ),
            |(springs, groups)| Self { springs, groups },
        )(input)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    rows: Vec<Row>,
}

impl Solution {
    fn arrangement_count_sum(&self) -> u64 {
        self.rows.iter().map(Row::arrangement_count).sum()
    }

    fn unfolded_arrangement_count_sum(&self) -> u64 {
        self.rows
            .par_iter()
            .map(|row| row.unfold().arrangement_count())
            .sum()
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(many1(terminated(Row::parse, opt(line_ending))), |rows| {
            Self { rows }
        })(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.arrangement_count_sum());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.unfolded_arrangement_count_sum());
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
        ???.### 1,1,3\n\
        .??..??...?##. 1,1,3\n\
        ?#?#?#?#?#?#?#? 1,3,1,6\n\
        ????.#...#... 4,1,1\n\
        ????.######..#####. 1,6,5\n\
        ?###???????? 3,2,1\n";

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(SOLUTION_STR).unwrap())
    }

    #[test]
    fn test_arrangement_count() {
        assert_eq!(
            solution()
                .rows
                .iter()
                .map(Row::arrangement_count)
                .collect::<Vec<u64>>(),
            vec![1_u64, 4_u64, 1_u64, 1_u64, 4_u64, 10_u64]
        );
    }

    #[test]
    fn test_arrangement_count_sum() {
        assert_eq!(solution().arrangement_count_sum(), 21_u64);
    }

    #[test]
    fn test_unfolded_arrangement_count_sum() {
        assert_eq!(solution().unfolded_arrangement_count_sum(), 525152_u64);
    }
}
