use {
    crate::*,
    nom::{
        bytes::complete::tag,
        character::complete::{alpha1, line_ending},
        combinator::{map, opt},
        error::Error,
        multi::{many1, separated_list1},
        sequence::{separated_pair, terminated},
        Err, IResult,
    },
    rand::{rngs::StdRng, seq::SliceRandom, SeedableRng},
    std::collections::HashMap,
};

const TARGET_CUT_LEN: usize = 3_usize;
const MAX_ATTEMPTS: u64 = 10_000_u64;

/// Union-find over component indices, tracking component sizes.
struct Components {
    parents: Vec<usize>,
    sizes: Vec<usize>,
    count: usize,
}

impl Components {
    fn new(len: usize) -> Self {
        Self {
            parents: (0_usize..len).collect(),
            sizes: vec![1_usize; len],
            count: len,
        }
    }

    fn find(&mut self, index: usize) -> usize {
        let parent: usize = self.parents[index];

        if parent == index {
            index
        } else {
            let root: usize = self.find(parent);

            self.parents[index] = root;

            root
        }
    }

    fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a: usize = self.find(a);
        let root_b: usize = self.find(b);

        if root_a == root_b {
            false
        } else {
            self.parents[root_a] = root_b;
            self.sizes[root_b] += self.sizes[root_a];
            self.count -= 1_usize;

            true
        }
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    component_count: usize,
    edges: Vec<(usize, usize)>,
}

impl Solution {
    /// One Karger contraction pass, returning the crossing edge count and the product of the two
    /// remaining component sizes.
    fn contract(&self, rng: &mut StdRng) -> (usize, u64) {
        let mut edges: Vec<(usize, usize)> = self.edges.clone();

        edges.shuffle(rng);

        let mut components: Components = Components::new(self.component_count);
        let mut edges_iter = edges.iter();

        while components.count > 2_usize {
            let Some((a, b)) = edges_iter.next() else {
                break;
            };

            components.union(*a, *b);
        }

        let cut_len: usize = self
            .edges
            .iter()
            .filter(|(a, b)| components.find(*a) != components.find(*b))
            .count();
        let size_product: u64 = components
            .sizes
            .iter()
            .enumerate()
            .filter(|(index, _)| components.parents[*index] == *index)
            .map(|(_, size)| *size as u64)
            .product();

        (cut_len, size_product)
    }

    /// Repeats randomized contraction with fresh seeds until the known 3-edge cut appears.
    fn three_cut_component_size_product(&self) -> Option<u64> {
        (0_u64..MAX_ATTEMPTS).find_map(|seed| {
            let (cut_len, size_product): (usize, u64) =
                self.contract(&mut StdRng::seed_from_u64(seed));

            (cut_len == TARGET_CUT_LEN).then_some(size_product)
        })
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            many1(terminated(
                separated_pair(alpha1, tag(": "), separated_list1(tag(" "), alpha1)),
                opt(line_ending),
            )),
            |lines: Vec<(&str, Vec<&str>)>| {
                let mut component_indices: HashMap<&str, usize> = HashMap::new();
                let mut edges: Vec<(usize, usize)> = Vec::new();
                let mut index_of = |name: &'i str, next: &mut usize| -> usize {
                    *component_indices.entry(name).or_insert_with(|| {
                        let index: usize = *next;

                        *next += 1_usize;

                        index
                    })
                };
                let mut next_index: usize = 0_usize;

                for (from, destinations) in lines {
                    let from_index: usize = index_of(from, &mut next_index);

                    for to in destinations {
                        let to_index: usize = index_of(to, &mut next_index);

                        edges.push((from_index, to_index));
                    }
                }

                Self {
                    component_count: next_index,
                    edges,
                }
            },
        )(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.three_cut_component_size_product());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        // The final day has a single question.
        eprintln!("day 25 has no second question");
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = Err<Error<&'i str>>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(Self::parse(input)?.1)
    }
}
