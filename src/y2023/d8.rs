use {
    crate::*,
    nom::{
        bytes::complete::{tag, take},
        character::complete::{line_ending, one_of},
        combinator::{map, map_res, opt},
        error::Error,
        multi::many1,
        sequence::{delimited, separated_pair, terminated},
        Err, IResult,
    },
    num::integer::lcm,
    std::collections::HashMap,
};

/// Following the instruction list cyclically must terminate well before this many steps for any
/// well-formed input.
const MAX_STEPS: u64 = 1_u64 << 32_u32;

type NodeId = [u8; 3_usize];

const START_NODE: NodeId = *b"AAA";
const END_NODE: NodeId = *b"ZZZ";

fn parse_node_id<'i>(input: &'i str) -> IResult<&'i str, NodeId> {
    map_res(take(3_usize), |node_id: &str| {
        node_id
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric())
            .then(|| node_id.as_bytes().try_into().unwrap())
            .ok_or(())
    })(input)
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    /// `false` is left, `true` is right
    instructions: Vec<bool>,
    nodes: HashMap<NodeId, (NodeId, NodeId)>,
}

impl Solution {
    fn steps_from<F: Fn(NodeId) -> bool>(&self, start: NodeId, is_end: F) -> Option<u64> {
        let mut node: NodeId = start;
        let mut steps: u64 = 0_u64;

        while !is_end(node) {
            if steps >= MAX_STEPS {
                return None;
            }

            let (left, right) = *self.nodes.get(&node)?;

            node = if self.instructions[(steps % self.instructions.len() as u64) as usize] {
                right
            } else {
                left
            };
            steps += 1_u64;
        }

        Some(steps)
    }

    fn steps_to_end(&self) -> Option<u64> {
        self.steps_from(START_NODE, |node| node == END_NODE)
    }

    /// Every `..A` ghost reaches a `..Z` node on a cycle whose length equals its lead-in, so the
    /// simultaneous arrival is the LCM of the individual step counts.
    fn ghost_steps_to_end(&self) -> Option<u64> {
        self.nodes
            .keys()
            .filter(|node| node[2_usize] == b'A')
            .try_fold(1_u64, |combined_steps, start| {
                self.steps_from(*start, |node| node[2_usize] == b'Z')
                    .map(|steps| lcm(combined_steps, steps))
            })
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            separated_pair(
                many1(map(one_of("LR"), |instruction| instruction == 'R')),
                many1(line_ending),
                map(
                    many1(terminated(
                        separated_pair(
                            parse_node_id,
                            tag(" = "),
                            delimited(
                                tag("("),
                                separated_pair(parse_node_id, tag(", "), parse_node_id),
                                tag(")"),
                            ),
                        ),
                        opt(line_ending),
                    )),
                    |nodes| nodes.into_iter().collect(),
                ),
            ),
            |(instructions, nodes)| Self {
                instructions,
                nodes,
            },
        )(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.steps_to_end());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.ghost_steps_to_end());
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
        RL\n\
        \n\
        AAA = (BBB, CCC)\n\
        BBB = (DDD, EEE)\n\
        CCC = (ZZZ, GGG)\n\
        DDD = (DDD, DDD)\n\
        EEE = (EEE, EEE)\n\
        GGG = (GGG, GGG)\n\
        ZZZ = (ZZZ, ZZZ)\n",
        "\
        LLR\n\
        \n\
        AAA = (BBB, BBB)\n\
        BBB = (AAA, ZZZ)\n\
        ZZZ = (ZZZ, ZZZ)\n",
        "\
        LR\n\
        \n\
        11A = (11B, XXX)\n\
        11B = (XXX, 11Z)\n\
        11Z = (11B, XXX)\n\
        22A = (22B, XXX)\n\
        22B = (22C, 22C)\n\
        22C = (22Z, 22Z)\n\
        22Z = (22B, 22B)\n\
        XXX = (XXX, XXX)\n",
    ];

    #[test]
    fn test_try_from_str() {
        let solution: Solution = Solution::try_from(SOLUTION_STRS[1_usize]).unwrap();

        assert_eq!(solution.instructions, vec![false, false, true]);
        assert_eq!(
            solution.nodes.get(b"AAA"),
            Some(&(*b"BBB", *b"BBB"))
        );
    }

    #[test]
    fn test_steps_to_end() {
        assert_eq!(
            Solution::try_from(SOLUTION_STRS[0_usize])
                .unwrap()
                .steps_to_end(),
            Some(2_u64)
        );
        assert_eq!(
            Solution::try_from(SOLUTION_STRS[1_usize])
                .unwrap()
                .steps_to_end(),
            Some(6_u64)
        );
    }

    #[test]
    fn test_ghost_steps_to_end() {
        assert_eq!(
            Solution::try_from(SOLUTION_STRS[2_usize])
                .unwrap()
                .ghost_steps_to_end(),
            Some(6_u64)
        );
    }
}
