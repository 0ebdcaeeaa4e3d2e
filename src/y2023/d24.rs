use {
    crate::*,
    glam::{DVec2, I64Vec3},
    nom::{
        bytes::complete::tag,
        character::complete::{line_ending, space0},
        combinator::{map, opt},
        error::Error,
        multi::many1,
        sequence::{preceded, separated_pair, terminated, tuple},
        Err, IResult,
    },
    num::{BigInt, BigRational, ToPrimitive, Zero},
    std::ops::RangeInclusive,
};

fn parse_i64vec3<'i>(input: &'i str) -> IResult<&'i str, I64Vec3> {
    map(
        tuple((
            terminated(preceded(space0, parse_integer::<i64>), tag(",")),
            terminated(preceded(space0, parse_integer::<i64>), tag(",")),
            preceded(space0, parse_integer::<i64>),
        )),
        |(x, y, z)| I64Vec3::new(x, y, z),
    )(input)
}

#[cfg_attr(test, derive(Debug, PartialEq))]
#[derive(Clone, Copy)]
struct Hailstone {
    pos: I64Vec3,
    vel: I64Vec3,
}

impl Hailstone {
    fn xy_pos(&self) -> DVec2 {
        DVec2::new(self.pos.x as f64, self.pos.y as f64)
    }

    fn xy_vel(&self) -> DVec2 {
        DVec2::new(self.vel.x as f64, self.vel.y as f64)
    }
}

impl Parse for Hailstone {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            separated_pair(parse_i64vec3, tuple((space0, tag("@"))), parse_i64vec3),
            |(pos, vel)| Self { pos, vel },
        )(input)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    hailstones: Vec<Hailstone>,
}

impl Solution {
    const TEST_AREA: RangeInclusive<f64> = 200000000000000.0_f64..=400000000000000.0_f64;

    /// Counts hailstone pairs whose XY paths cross in the future of both, inside the test area.
    fn xy_future_crossings(&self, test_area: &RangeInclusive<f64>) -> usize {
        let mut crossings: usize = 0_usize;

        for (index, a) in self.hailstones.iter().enumerate() {
            for b in self.hailstones[index + 1_usize..].iter() {
                let denominator: f64 = a.xy_vel().perp_dot(b.xy_vel());

                if denominator == 0.0_f64 {
                    // Parallel paths
                    continue;
                }

                let delta: DVec2 = b.xy_pos() - a.xy_pos();
                let time_a: f64 = delta.perp_dot(b.xy_vel()) / denominator;
                let time_b: f64 = delta.perp_dot(a.xy_vel()) / denominator;

                if time_a < 0.0_f64 || time_b < 0.0_f64 {
                    continue;
                }

                let crossing: DVec2 = a.xy_pos() + time_a * a.xy_vel();

                if test_area.contains(&crossing.x) && test_area.contains(&crossing.y) {
                    crossings += 1_usize;
                }
            }
        }

        crossings
    }

    fn big_rational(value: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(value))
    }

    /// Three rows of `(rock_pos x (v_b - v_a)) + ((p_b - p_a) x rock_vel) = p_b x v_b - p_a x v_a`,
    /// the linearization of requiring the rock line to intersect both hailstone lines.
    fn linear_rows(a: &Hailstone, b: &Hailstone) -> [[i64; 7_usize]; 3_usize] {
        let d: I64Vec3 = b.vel - a.vel;
        let e: I64Vec3 = b.pos - a.pos;
        let rhs: I64Vec3 = b.pos.cross(b.vel) - a.pos.cross(a.vel);

        // `v x w` is linear in `v` with coefficient matrix `-skew(w)`
        [
            [0_i64, d.z, -d.y, 0_i64, -e.z, e.y, rhs.x],
            [-d.z, 0_i64, d.x, e.z, 0_i64, -e.x, rhs.y],
            [d.y, -d.x, 0_i64, -e.y, e.x, 0_i64, rhs.z],
        ]
    }

    /// Solves the 6x6 system for the rock's position and velocity exactly, returning the sum of
    /// the position's coordinates.
    fn rock_position_coordinate_sum(&self) -> Option<i64> {
        if self.hailstones.len() < 3_usize {
            return None;
        }

        let mut rows: Vec<Vec<BigRational>> = Self::linear_rows(
            &self.hailstones[0_usize],
            &self.hailstones[1_usize],
        )
        .into_iter()
        .chain(Self::linear_rows(
            &self.hailstones[0_usize],
            &self.hailstones[2_usize],
        ))
        .map(|row| row.into_iter().map(Self::big_rational).collect())
        .collect();

        // Gaussian elimination with a nonzero pivot per column
        for column in 0_usize..6_usize {
            let pivot_row: usize = (column..rows.len())
                .find(|row| !rows[*row][column].is_zero())?;

            rows.swap(column, pivot_row);

            let pivot: BigRational = rows[column][column].clone();

            for value in rows[column].iter_mut() {
                *value /= pivot.clone();
            }

            for row in 0_usize..rows.len() {
                if row != column && !rows[row][column].is_zero() {
                    let factor: BigRational = rows[row][column].clone();

                    for value_column in column..7_usize {
                        let delta: BigRational = factor.clone() * rows[column][value_column].clone();

                        rows[row][value_column] -= delta;
                    }
                }
            }
        }

        let coordinate_sum: BigRational =
            rows[0_usize][6_usize].clone() + rows[1_usize][6_usize].clone() + rows[2_usize][6_usize].clone();

        coordinate_sum.is_integer().then(|| coordinate_sum.to_integer().to_i64())?
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            many1(terminated(Hailstone::parse, opt(line_ending))),
            |hailstones| Self { hailstones },
        )(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.xy_future_crossings(&Self::TEST_AREA));
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.rock_position_coordinate_sum());
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = Err<Error<&'i str>>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(Self::parse(input)?.1)
    }
}
