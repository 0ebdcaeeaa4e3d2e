use {
    crate::*,
    glam::{IVec2, IVec3},
    nom::{
        bytes::complete::tag,
        character::complete::line_ending,
        combinator::{map, opt},
        error::Error,
        multi::many1,
        sequence::{separated_pair, terminated, tuple},
        Err, IResult,
    },
    std::collections::{HashMap, HashSet, VecDeque},
};

fn parse_ivec3<'i>(input: &'i str) -> IResult<&'i str, IVec3> {
    map(
        tuple((
            terminated(parse_integer::<i32>, tag(",")),
            terminated(parse_integer::<i32>, tag(",")),
            parse_integer::<i32>,
        )),
        |(x, y, z)| IVec3::new(x, y, z),
    )(input)
}

#[cfg_attr(test, derive(Debug, PartialEq))]
#[derive(Clone, Copy)]
struct Brick {
    min: IVec3,
    max: IVec3,
}

impl Brick {
    fn footprint(&self) -> impl Iterator<Item = IVec2> + '_ {
        (self.min.x..=self.max.x)
            .flat_map(move |x| (self.min.y..=self.max.y).map(move |y| IVec2::new(x, y)))
    }

    fn height(&self) -> i32 {
        self.max.z - self.min.z
    }
}

impl Parse for Brick {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            separated_pair(parse_ivec3, tag("~"), parse_ivec3),
            |(a, b)| Self {
                min: a.min(b),
                max: a.max(b),
            },
        )(input)
    }
}

/// Support relations after all bricks have fallen as far as they can.
struct SettledBricks {
    supports: Vec<Vec<usize>>,
    supported_by: Vec<Vec<usize>>,
}

impl SettledBricks {
    fn new(bricks: &[Brick]) -> Self {
        let mut order: Vec<usize> = (0_usize..bricks.len()).collect();

        order.sort_by_key(|index| bricks[*index].min.z);

        let mut supports: Vec<Vec<usize>> = vec![Vec::new(); bricks.len()];
        let mut supported_by: Vec<Vec<usize>> = vec![Vec::new(); bricks.len()];

        // Top of the settled stack per column, with the brick occupying it
        let mut column_tops: HashMap<IVec2, (i32, usize)> = HashMap::new();

        for index in order {
            let brick: &Brick = &bricks[index];
            let rest_z: i32 = brick
                .footprint()
                .filter_map(|column| column_tops.get(&column).map(|(top_z, _)| *top_z))
                .max()
                .unwrap_or_default()
                + 1_i32;

            for column in brick.footprint() {
                if let Some((top_z, supporter)) = column_tops.get(&column) {
                    if *top_z == rest_z - 1_i32 && !supported_by[index].contains(supporter) {
                        supported_by[index].push(*supporter);
                        supports[*supporter].push(index);
                    }
                }
            }

            let top_z: i32 = rest_z + brick.height();

            for column in brick.footprint() {
                column_tops.insert(column, (top_z, index));
            }
        }

        Self {
            supports,
            supported_by,
        }
    }

    fn is_sole_supporter(&self, index: usize) -> bool {
        self.supports[index]
            .iter()
            .any(|supported| self.supported_by[*supported].len() == 1_usize)
    }

    /// How many other bricks fall if `index` is disintegrated.
    fn chain_reaction_len(&self, index: usize) -> usize {
        let mut fallen: HashSet<usize> = [index].into();
        let mut queue: VecDeque<usize> = [index].into();

        while let Some(current) = queue.pop_front() {
            for supported in self.supports[current].iter() {
                if !fallen.contains(supported)
                    && self.supported_by[*supported]
                        .iter()
                        .all(|supporter| fallen.contains(supporter))
                {
                    fallen.insert(*supported);
                    queue.push_back(*supported);
                }
            }
        }

        fallen.len() - 1_usize
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    bricks: Vec<Brick>,
}

impl Solution {
    fn safely_disintegrable_count(&self) -> usize {
        let settled: SettledBricks = SettledBricks::new(&self.bricks);

        (0_usize..self.bricks.len())
            .filter(|index| !settled.is_sole_supporter(*index))
            .count()
    }

    fn chain_reaction_sum(&self) -> usize {
        let settled: SettledBricks = SettledBricks::new(&self.bricks);

        (0_usize..self.bricks.len())
            .map(|index| settled.chain_reaction_len(index))
            .sum()
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            many1(terminated(Brick::parse, opt(line_ending))),
            |bricks| Self { bricks },
        )(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.safely_disintegrable_count());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.chain_reaction_sum());
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
        1,0,1~1,2,1\n\
        0,0,2~2,0,2\n\
        0,2,3~2,2,3\n\
        0,0,4~0,2,4\n\
        2,0,5~2,2,5\n\
        0,1,6~2,1,6\n\
        1,1,8~1,1,9\n";

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(SOLUTION_STR).unwrap())
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            solution().bricks[0_usize],
            Brick {
                min: IVec3::new(1_i32, 0_i32, 1_i32),
                max: IVec3::new(1_i32, 2_i32, 1_i32),
            }
        );
    }

    #[test]
    fn test_settle() {
        let settled: SettledBricks = SettledBricks::new(&solution().bricks);

        // Brick A supports both B and C; F supports only G.
        assert_eq!(settled.supports[0_usize], vec![1_usize, 2_usize]);
        assert_eq!(settled.supported_by[6_usize], vec![5_usize]);
    }

    #[test]
    fn test_safely_disintegrable_count() {
        assert_eq!(solution().safely_disintegrable_count(), 5_usize);
    }

    #[test]
    fn test_chain_reaction_sum() {
        assert_eq!(solution().chain_reaction_sum(), 7_usize);
    }
}
