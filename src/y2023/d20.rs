use {
    crate::*,
    nom::{
        branch::alt,
        bytes::complete::tag,
        character::complete::{alpha1, line_ending},
        combinator::{map, opt, success, value},
        error::Error,
        multi::{many1, separated_list1},
        sequence::{preceded, terminated, tuple},
        Err, IResult,
    },
    std::collections::{HashMap, VecDeque},
};

const BROADCASTER: &str = "broadcaster";
const BUTTON: &str = "button";
const FINAL_MODULE: &str = "rx";
const PRESS_COUNT: u64 = 1000_u64;
const MAX_PRESSES: u64 = 100_000_u64;

#[cfg_attr(test, derive(Debug, PartialEq))]
#[derive(Clone, Copy)]
enum ModuleKind {
    Broadcaster,
    FlipFlop,
    Conjunction,
}

#[cfg_attr(test, derive(Debug, PartialEq))]
struct Module {
    kind: ModuleKind,
    destinations: Vec<String>,
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    modules: HashMap<String, Module>,
}

/// Per-press runtime state, rebuilt for each question so runs are independent.
struct Simulation<'s> {
    solution: &'s Solution,
    flip_flops: HashMap<&'s str, bool>,
    conjunction_inputs: HashMap<&'s str, HashMap<&'s str, bool>>,
    low_pulses: u64,
    high_pulses: u64,
}

impl<'s> Simulation<'s> {
    fn new(solution: &'s Solution) -> Self {
        let mut conjunction_inputs: HashMap<&str, HashMap<&str, bool>> = solution
            .modules
            .iter()
            .filter(|(_, module)| matches!(module.kind, ModuleKind::Conjunction))
            .map(|(name, _)| (name.as_str(), HashMap::new()))
            .collect();

        for (name, module) in solution.modules.iter() {
            for destination in module.destinations.iter() {
                if let Some(inputs) = conjunction_inputs.get_mut(destination.as_str()) {
                    inputs.insert(name.as_str(), false);
                }
            }
        }

        Self {
            solution,
            flip_flops: HashMap::new(),
            conjunction_inputs,
            low_pulses: 0_u64,
            high_pulses: 0_u64,
        }
    }

    /// Presses the button once, invoking `observe` with each pulse's sender and level. Sender
    /// names borrow from the solution, so observers may retain them across presses.
    fn press<F: FnMut(&'s str, bool)>(&mut self, mut observe: F) {
        let mut pulses: VecDeque<(&'s str, &'s str, bool)> =
            [(BUTTON, BROADCASTER, false)].into();

        while let Some((from, to, high)) = pulses.pop_front() {
            if high {
                self.high_pulses += 1_u64;
            } else {
                self.low_pulses += 1_u64;
            }

            observe(from, high);

            let Some(module) = self.solution.modules.get(to) else {
                continue;
            };

            let output: bool = match module.kind {
                ModuleKind::Broadcaster => high,
                ModuleKind::FlipFlop => {
                    if high {
                        continue;
                    }

                    let state: &mut bool = self.flip_flops.entry(to).or_default();

                    *state = !*state;

                    *state
                }
                ModuleKind::Conjunction => {
                    let inputs: &mut HashMap<&str, bool> =
                        self.conjunction_inputs.get_mut(to).unwrap();

                    inputs.insert(from, high);

                    !inputs.values().all(|high| *high)
                }
            };

            for destination in module.destinations.iter() {
                pulses.push_back((to, destination.as_str(), output));
            }
        }
    }
}

impl Solution {
    fn pulse_product(&self) -> u64 {
        let mut simulation: Simulation = Simulation::new(self);

        for _ in 0_u64..PRESS_COUNT {
            simulation.press(|_, _| ());
        }

        simulation.low_pulses * simulation.high_pulses
    }

    /// The conjunction feeding the final module goes high only when each of its inputs has;
    /// those inputs cycle independently, so the answer is the LCM of their first high presses.
    fn presses_until_final_module_low(&self) -> Option<u64> {
        let feeder: &str = self
            .modules
            .iter()
            .find(|(_, module)| {
                module
                    .destinations
                    .iter()
                    .any(|destination| destination == FINAL_MODULE)
            })
            .map(|(name, _)| name.as_str())?;
        let mut first_high_presses: HashMap<&str, u64> = HashMap::new();
        let input_count: usize = self
            .modules
            .values()
            .filter(|module| {
                module
                    .destinations
                    .iter()
                    .any(|destination| destination == feeder)
            })
            .count();
        let mut simulation: Simulation = Simulation::new(self);

        for press in 1_u64..=MAX_PRESSES {
            simulation.press(|from, high| {
                if high
                    && self.modules.get(from).is_some_and(|module| {
                        module
                            .destinations
                            .iter()
                            .any(|destination| destination == feeder)
                    })
                {
                    first_high_presses.entry(from).or_insert(press);
                }
            });

            if first_high_presses.len() == input_count {
                return Some(
                    first_high_presses
                        .values()
                        .fold(1_u64, |lcm, press| num::integer::lcm(lcm, *press)),
                );
            }
        }

        None
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            many1(terminated(
                tuple((
                    alt((
                        value(ModuleKind::FlipFlop, tag("%")),
                        value(ModuleKind::Conjunction, tag("&")),
                        success(ModuleKind::Broadcaster),
                    )),
                    alpha1,
                    preceded(tag(" -> "), separated_list1(tag(", "), alpha1)),
                )),
                opt(line_ending),
            )),
            |modules: Vec<(ModuleKind, &str, Vec<&str>)>| Self {
                modules: modules
                    .into_iter()
                    .map(|(kind, name, destinations)| {
                        (
                            name.into(),
                            Module {
                                kind,
                                destinations: destinations
                                    .into_iter()
                                    .map(String::from)
                                    .collect(),
                            },
                        )
                    })
                    .collect(),
            },
        )(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.pulse_product());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.presses_until_final_module_low());
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = Err<Error<&'i str>>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(Self::parse(input)?.1)
    }
}
