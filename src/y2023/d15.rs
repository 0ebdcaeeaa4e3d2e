use {
    crate::*,
    nom::{
        branch::alt,
        bytes::complete::tag,
        character::complete::{alpha1, line_ending},
        combinator::{map, opt, value},
        error::Error,
        multi::separated_list1,
        sequence::{preceded, terminated, tuple},
        Err, IResult,
    },
};

const BOX_COUNT: usize = 256_usize;

fn hash_byte(hash: u8, byte: u8) -> u8 {
    hash.wrapping_add(byte).wrapping_mul(17_u8)
}

fn hash_str(string: &str) -> u8 {
    string.bytes().fold(0_u8, hash_byte)
}

#[derive(Clone, Copy)]
#[cfg_attr(test, derive(Debug, PartialEq))]
enum Operation {
    Remove,

    /// Insert a lens with the given focal length (1 to 9)
    Insert(u8),
}

#[cfg_attr(test, derive(Debug, PartialEq))]
struct Step {
    label: String,
    operation: Operation,
}

impl Step {
    fn hash(&self) -> u8 {
        let label_hash: u8 = hash_str(&self.label);

        match self.operation {
            Operation::Remove => hash_byte(label_hash, b'-'),
            Operation::Insert(focal_length) => {
                hash_byte(hash_byte(label_hash, b'='), focal_length + b'0')
            }
        }
    }
}

impl Parse for Step {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            tuple((
                alpha1,
                alt((
                    value(Operation::Remove, tag("-")),
                    map(preceded(tag("="), parse_integer::<u8>), Operation::Insert),
                )),
            )),
            |(label, operation): (&str, Operation)| Self {
                label: label.into(),
                operation,
            },
        )(input)
    }
}

#[derive(Clone, Default)]
struct LensBox {
    /// Insertion-ordered, labels unique
    lenses: Vec<(String, u8)>,
}

impl LensBox {
    fn apply(&mut self, step: &Step) {
        match step.operation {
            Operation::Remove => self.lenses.retain(|(label, _)| *label != step.label),
            Operation::Insert(focal_length) => {
                if let Some(lens) = self.lenses.iter_mut().find(|(label, _)| *label == step.label)
                {
                    lens.1 = focal_length;
                } else {
                    self.lenses.push((step.label.clone(), focal_length));
                }
            }
        }
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    steps: Vec<Step>,
}

impl Solution {
    fn hash_sum(&self) -> u32 {
        self.steps.iter().map(|step| step.hash() as u32).sum()
    }

    fn focusing_power(&self) -> u32 {
        let mut boxes: Vec<LensBox> = vec![LensBox::default(); BOX_COUNT];

        for step in self.steps.iter() {
            boxes[hash_str(&step.label) as usize].apply(step);
        }

        boxes
            .iter()
            .enumerate()
            .flat_map(|(box_index, lens_box)| {
                lens_box
                    .lenses
                    .iter()
                    .enumerate()
                    .map(move |(slot_index, (_, focal_length))| {
                        (box_index as u32 + 1_u32)
                            * (slot_index as u32 + 1_u32)
                            * *focal_length as u32
                    })
            })
            .sum()
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            terminated(
                separated_list1(tag(","), Step::parse),
                opt(line_ending),
            ),
            |steps| Self { steps },
        )(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.hash_sum());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.focusing_power());
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

    const SOLUTION_STR: &str = "rn=1,cm-,qp=3,cm=2,qp-,pc=4,ot=9,ab=5,pc-,pc=6,ot=7\n";

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(SOLUTION_STR).unwrap())
    }

    #[test]
    fn test_hash_str() {
        assert_eq!(hash_str("HASH"), 52_u8);
        assert_eq!(hash_str("rn"), 0_u8);
        assert_eq!(hash_str("qp"), 1_u8);
    }

    #[test]
    fn test_step_hash() {
        assert_eq!(solution().steps[0_usize].hash(), 30_u8);
        assert_eq!(solution().steps[1_usize].hash(), 253_u8);
    }

    #[test]
    fn test_hash_sum() {
        assert_eq!(solution().hash_sum(), 1320_u32);
    }

    #[test]
    fn test_focusing_power() {
        assert_eq!(solution().focusing_power(), 145_u32);
    }
}
