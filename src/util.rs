pub use {clap::Parser, direction::*, graph::*, grid::*};

use {
    clap::Parser as ClapParser,
    memmap::Mmap,
    nom::{
        bytes::complete::tag,
        character::complete::digit1,
        combinator::{map_res, opt, recognize, rest},
        sequence::{preceded, tuple},
        IResult,
    },
    num::Integer,
    std::{
        any::type_name,
        fmt::Debug,
        fs::File,
        io::{Error as IoError, ErrorKind, Result as IoResult},
        str::{from_utf8, FromStr, Utf8Error},
    },
};

mod direction;
mod graph;
mod grid;

pub const DAY_COUNT: usize = 25_usize;

#[derive(Debug, ClapParser)]
pub struct QuestionArgs {
    /// Print extra output for days that have any
    #[arg(short, long, default_value_t)]
    pub verbose: bool,
}

#[derive(Debug, ClapParser)]
pub struct Args {
    /// Puzzle input path; `input/d<day>.txt` when omitted
    #[arg(short, long)]
    input_file_path: Option<String>,

    /// Which day's solution to run
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=DAY_COUNT as i64))]
    pub day: u8,

    /// Which question to run; both when omitted
    #[arg(short, long, default_value_t, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub question: u8,

    #[command(flatten)]
    pub question_args: QuestionArgs,
}

impl Args {
    fn input_file_path(&self) -> String {
        self.input_file_path
            .clone()
            .unwrap_or_else(|| format!("input/d{}.txt", self.day))
    }

    /// Reads and parses the day's input, reporting any failure on stderr instead of panicking.
    fn parse_solution<S>(&self) -> Option<S>
    where
        S: for<'i> TryFrom<&'i str>,
        for<'i> <S as TryFrom<&'i str>>::Error: Debug,
    {
        let file_path: String = self.input_file_path();

        // SAFETY: The mapping is only read here, and nothing in this process writes puzzle
        // inputs. An external writer racing us is accepted as out of scope.
        unsafe {
            map_utf8_file(&file_path, |input| match S::try_from(input) {
                Ok(solution) => Some(solution),
                Err(error) => {
                    eprintln!(
                        "Parsing \"{file_path}\" as {} failed:\n{error:#?}",
                        type_name::<S>()
                    );

                    None
                }
            })
        }
        .map_err(|error| eprintln!("Reading \"{file_path}\" failed:\n{error}"))
        .ok()
        .flatten()
    }
}

pub trait RunQuestions
where
    Self: Sized + for<'i> TryFrom<&'i str>,
    for<'i> <Self as TryFrom<&'i str>>::Error: Debug,
{
    fn q1_internal(&mut self, args: &QuestionArgs);
    fn q2_internal(&mut self, args: &QuestionArgs);

    fn q1(args: &Args) {
        if let Some(mut solution) = args.parse_solution::<Self>() {
            solution.q1_internal(&args.question_args);
        }
    }

    fn q2(args: &Args) {
        if let Some(mut solution) = args.parse_solution::<Self>() {
            solution.q2_internal(&args.question_args);
        }
    }

    fn both(args: &Args) {
        if let Some(mut solution) = args.parse_solution::<Self>() {
            solution.q1_internal(&args.question_args);
            solution.q2_internal(&args.question_args);
        }
    }
}

#[derive(Clone, Copy)]
pub struct Day {
    pub q1: fn(&Args),
    pub q2: fn(&Args),
    pub both: fn(&Args),
}

impl Day {
    fn run(&self, args: &Args) {
        let question: fn(&Args) = match args.question {
            1_u8 => self.q1,
            2_u8 => self.q2,
            _ => self.both,
        };

        question(args);
    }
}

/// The registered day solutions, indexed by day number.
pub struct Solutions {
    days: [Option<Day>; DAY_COUNT],
}

fn parse_tagged_int<'i, I: FromStr>(prefix: &str, input: &'i str) -> IResult<&'i str, I> {
    preceded(tag(prefix), map_res(rest, I::from_str))(input)
}

impl Solutions {
    /// Builds the registry from `(module name, day)` pairs, where each module name is `d<day>`.
    pub fn new(entries: &[(&str, Day)]) -> Self {
        let mut days: [Option<Day>; DAY_COUNT] = [None; DAY_COUNT];

        for (module_name, day) in entries {
            match parse_tagged_int::<u8>("d", module_name) {
                Ok((_, day_number)) if (1_u8..=DAY_COUNT as u8).contains(&day_number) => {
                    days[day_number as usize - 1_usize] = Some(*day);
                }
                _ => eprintln!("Module name \"{module_name}\" does not name a day"),
            }
        }

        Self { days }
    }

    pub fn run(&self, args: &Args) {
        // `args.day` was validated by clap
        match self.days[args.day as usize - 1_usize] {
            Some(day) => day.run(args),
            None => eprintln!("Day {} has no registered solution", args.day),
        }
    }
}

#[macro_export]
macro_rules! solutions {
    [ $( $day:ident ),* $(,)? ] => {
        pub mod y2023 {
            $(
                pub mod $day;
            )*
        }

        pub fn solutions() -> &'static Solutions {
            static SOLUTIONS: std::sync::OnceLock<Solutions> = std::sync::OnceLock::new();

            SOLUTIONS.get_or_init(|| Solutions::new(&[ $(
                (
                    stringify!($day),
                    Day {
                        q1: y2023::$day::Solution::q1,
                        q2: y2023::$day::Solution::q2,
                        both: y2023::$day::Solution::both,
                    },
                ),
            )* ]))
        }
    };
}

/// Maps the file at `file_path` into memory, validates it as UTF-8, and hands the text to `f`.
///
/// # Errors
///
/// Fails with an `std::io::Error` if the file cannot be opened or mapped, or with
/// `ErrorKind::InvalidData` if its contents are not UTF-8. `f` only runs once mapping and
/// validation have succeeded.
///
/// # Safety
///
/// `Mmap::map` is unsafe: another process modifying the file while the mapping is alive is
/// undefined behavior. Callers must ensure the file stays untouched for the duration of the call.
pub unsafe fn map_utf8_file<T, F: FnOnce(&str) -> T>(file_path: &str, f: F) -> IoResult<T> {
    let mmap: Mmap = Mmap::map(&File::open(file_path)?)?;
    let text: &str =
        from_utf8(&mmap).map_err(|error: Utf8Error| IoError::new(ErrorKind::InvalidData, error))?;

    Ok(f(text))
}

pub trait Parse: Sized {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self>;
}

/// Parses an optionally negated integer literal. Types that cannot represent the parsed value
/// (a negative literal for an unsigned type included) yield a parse error, not a panic.
pub fn parse_integer<'i, I: FromStr + Integer>(input: &'i str) -> IResult<&'i str, I> {
    map_res(recognize(tuple((opt(tag("-")), digit1))), I::from_str)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer::<i32>("-42 rest"), Ok((" rest", -42_i32)));
        assert_eq!(parse_integer::<u64>("123"), Ok(("", 123_u64)));
        assert!(parse_integer::<u8>("-1").is_err());
        assert!(parse_integer::<i32>("x").is_err());
    }

    #[test]
    fn test_parse_tagged_int() {
        assert_eq!(parse_tagged_int::<u8>("d", "d17"), Ok(("", 17_u8)));
        assert!(parse_tagged_int::<u8>("d", "17").is_err());
    }
}
