use {
    crate::*,
    nom::{
        bytes::complete::tag,
        character::complete::{alpha1, line_ending, one_of},
        combinator::{map, opt},
        error::Error,
        multi::{many0, many1},
        sequence::{delimited, preceded, terminated, tuple},
        Err, IResult,
    },
    std::{collections::HashMap, ops::Range},
};

const CATEGORIES: &str = "xmas";
const CATEGORY_COUNT: usize = 4_usize;
const RATING_RANGE: Range<u16> = 1_u16..4001_u16;
const START_WORKFLOW: &str = "in";

#[cfg_attr(test, derive(Debug, PartialEq))]
#[derive(Clone)]
enum Target {
    Accept,
    Reject,
    Workflow(String),
}

impl Parse for Target {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(alpha1, |name: &str| match name {
            "A" => Self::Accept,
            "R" => Self::Reject,
            _ => Self::Workflow(name.into()),
        })(input)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
struct Rule {
    category: usize,
    greater: bool,
    threshold: u16,
    target: Target,
}

impl Rule {
    /// The sub-ranges of `range` that pass and fail this rule's comparison.
    fn split(&self, range: &Range<u16>) -> (Range<u16>, Range<u16>) {
        if self.greater {
            (
                range.start.max(self.threshold + 1_u16)..range.end,
                range.start..range.end.min(self.threshold + 1_u16),
            )
        } else {
            (
                range.start..range.end.min(self.threshold),
                range.start.max(self.threshold)..range.end,
            )
        }
    }
}

impl Parse for Rule {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            tuple((
                one_of(CATEGORIES),
                one_of("<>"),
                parse_integer::<u16>,
                preceded(tag(":"), Target::parse),
            )),
            |(category, comparison, threshold, target)| Self {
                category: CATEGORIES.find(category).unwrap(),
                greater: comparison == '>',
                threshold,
                target,
            },
        )(input)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
struct Workflow {
    rules: Vec<Rule>,
    fallback: Target,
}

impl Parse for Workflow {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            delimited(
                tag("{"),
                tuple((many0(terminated(Rule::parse, tag(","))), Target::parse)),
                tag("}"),
            ),
            |(rules, fallback)| Self { rules, fallback },
        )(input)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
struct Part([u16; CATEGORY_COUNT]);

impl Part {
    fn rating_sum(&self) -> u32 {
        self.0.iter().map(|rating| *rating as u32).sum()
    }
}

impl Parse for Part {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        let (input, _) = tag("{")(input)?;
        let mut ratings: [u16; CATEGORY_COUNT] = [0_u16; CATEGORY_COUNT];
        let mut remaining: &str = input;

        for category in 0_usize..CATEGORY_COUNT {
            let (input, rating) = preceded(
                tuple((
                    opt(tag(",")),
                    tag(&CATEGORIES[category..category + 1_usize]),
                    tag("="),
                )),
                parse_integer::<u16>,
            )(remaining)?;

            ratings[category] = rating;
            remaining = input;
        }

        let (remaining, _) = tag("}")(remaining)?;

        Ok((remaining, Self(ratings)))
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    workflows: HashMap<String, Workflow>,
    parts: Vec<Part>,
}

impl Solution {
    fn is_accepted(&self, part: &Part) -> bool {
        let mut target: &Target = &Target::Workflow(START_WORKFLOW.into());

        loop {
            let name: &str = match target {
                Target::Accept => return true,
                Target::Reject => return false,
                Target::Workflow(name) => name,
            };

            let Some(workflow) = self.workflows.get(name) else {
                return false;
            };

            target = workflow
                .rules
                .iter()
                .find(|rule| {
                    let rating: u16 = part.0[rule.category];

                    if rule.greater {
                        rating > rule.threshold
                    } else {
                        rating < rule.threshold
                    }
                })
                .map_or(&workflow.fallback, |rule| &rule.target);
        }
    }

    fn accepted_rating_sum(&self) -> u32 {
        self.parts
            .iter()
            .filter(|part| self.is_accepted(part))
            .map(Part::rating_sum)
            .sum()
    }

    /// Counts the rating combinations in `ranges` that `target` ultimately accepts, splitting the
    /// hypercube at each comparison.
    fn accepted_combinations(&self, target: &Target, mut ranges: [Range<u16>; CATEGORY_COUNT]) -> u64 {
        let name: &str = match target {
            Target::Accept => {
                return ranges
                    .iter()
                    .map(|range| (range.end - range.start) as u64)
                    .product()
            }
            Target::Reject => return 0_u64,
            Target::Workflow(name) => name,
        };

        let Some(workflow) = self.workflows.get(name) else {
            return 0_u64;
        };

        let mut combinations: u64 = 0_u64;

        for rule in workflow.rules.iter() {
            let (pass, fail): (Range<u16>, Range<u16>) = rule.split(&ranges[rule.category]);

            if !pass.is_empty() {
                let mut pass_ranges: [Range<u16>; CATEGORY_COUNT] = ranges.clone();

                pass_ranges[rule.category] = pass;
                combinations += self.accepted_combinations(&rule.target, pass_ranges);
            }

            if fail.is_empty() {
                return combinations;
            }

            ranges[rule.category] = fail;
        }

        combinations + self.accepted_combinations(&workflow.fallback, ranges)
    }

    fn total_accepted_combinations(&self) -> u64 {
        self.accepted_combinations(
            &Target::Workflow(START_WORKFLOW.into()),
            [RATING_RANGE; CATEGORY_COUNT],
        )
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            tuple((
                many1(terminated(
                    tuple((alpha1, Workflow::parse)),
                    opt(line_ending),
                )),
                preceded(line_ending, many1(terminated(Part::parse, opt(line_ending)))),
            )),
            |(workflows, parts): (Vec<(&str, Workflow)>, Vec<Part>)| Self {
                workflows: workflows
                    .into_iter()
                    .map(|(name, workflow)| (name.into(), workflow))
                    .collect(),
                parts,
            },
        )(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.accepted_rating_sum());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.total_accepted_combinations());
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
        px{a<2006:qkq,m>2090:A,rfg}\n\
        pv{a>1716:R,A}\n\
        lnx{m>1548:A,A}\n\
        rfg{s<537:gd,x>2440:R,A}\n\
        qs{s>3448:A,lnx}\n\
        qkq{x<1416:A,crn}\n\
        crn{x>2662:A,R}\n\
        in{s<1351:px,qqz}\n\
        qqz{s>2770:qs,m<1801:hdj,R}\n\
        gd{a>3333:R,R}\n\
        hdj{m>838:A,pv}\n\
        \n\
        {x=787,m=2655,a=1222,s=2876}\n\
        {x=1679,m=44,a=2067,s=496}\n\
        {x=2036,m=264,a=79,s=2244}\n\
        {x=2461,m=1339,a=466,s=291}\n\
        {x=2127,m=1623,a=2188,s=1013}\n";

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(SOLUTION_STR).unwrap())
    }

    #[test]
    fn test_parse() {
        assert_eq!(solution().workflows.len(), 11_usize);
        assert_eq!(solution().parts.len(), 5_usize);
        assert_eq!(
            solution().parts[0_usize],
            Part([787_u16, 2655_u16, 1222_u16, 2876_u16])
        );
    }

    #[test]
    fn test_is_accepted() {
        assert_eq!(
            solution()
                .parts
                .iter()
                .map(|part| solution().is_accepted(part))
                .collect::<Vec<bool>>(),
            vec![true, false, true, false, true]
        );
    }

    #[test]
    fn test_accepted_rating_sum() {
        assert_eq!(solution().accepted_rating_sum(), 19114_u32);
    }

    #[test]
    fn test_total_accepted_combinations() {
        assert_eq!(
            solution().total_accepted_combinations(),
            167409079868000_u64
        );
    }
}
