use {
    super::{Direction, Parse},
    glam::{I64Vec2, IVec2},
    nom::{
        character::complete::line_ending,
        combinator::{map, opt},
        error::{Error as NomError, ErrorKind as NomErrorKind},
        multi::many1_count,
        sequence::terminated,
        Err, IResult,
    },
    std::{
        fmt::{Debug, DebugList, Formatter, Result as FmtResult},
        mem::transmute_copy,
        ops::{Index, Range, Sub},
    },
};

/// A rectangular grid of cells, stored as a flat row-major buffer plus dimensions.
///
/// Positions are addressed as `IVec2`s with `x` as the column and `y` as the row. Out-of-bounds
/// lookups through `get` yield `None` rather than wrapping or panicking.
#[derive(Clone)]
pub struct Grid2D<T> {
    cells: Vec<T>,

    /// Should only contain non-negative values, but is signed for ease of iteration
    dimensions: IVec2,
}

impl<T> Grid2D<T> {
    pub fn try_from_cells_and_width(cells: Vec<T>, width: usize) -> Option<Self> {
        let cells_len: usize = cells.len();

        (width != 0_usize && cells_len % width == 0_usize).then(|| Self {
            cells,
            dimensions: IVec2::new(width as i32, (cells_len / width) as i32),
        })
    }

    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    #[inline]
    pub fn dimensions(&self) -> IVec2 {
        self.dimensions
    }

    #[inline]
    pub fn contains(&self, pos: IVec2) -> bool {
        pos.cmpge(IVec2::ZERO).all() && pos.cmplt(self.dimensions).all()
    }

    #[inline]
    pub fn index_from_pos(&self, pos: IVec2) -> usize {
        pos.y as usize * self.dimensions.x as usize + pos.x as usize
    }

    pub fn try_index_from_pos(&self, pos: IVec2) -> Option<usize> {
        self.contains(pos).then(|| self.index_from_pos(pos))
    }

    pub fn pos_from_index(&self, index: usize) -> IVec2 {
        let width: usize = self.dimensions.x as usize;

        IVec2::new((index % width) as i32, (index / width) as i32)
    }

    #[inline(always)]
    pub fn max_dimensions(&self) -> IVec2 {
        self.dimensions - IVec2::ONE
    }

    pub fn get(&self, pos: IVec2) -> Option<&T> {
        self.try_index_from_pos(pos)
            .map(|index: usize| &self.cells[index])
    }

    pub fn get_mut(&mut self, pos: IVec2) -> Option<&mut T> {
        self.try_index_from_pos(pos)
            .map(|index: usize| &mut self.cells[index])
    }

    pub fn iter_positions(&self) -> impl Iterator<Item = IVec2> + '_ {
        (0_usize..self.cells.len()).map(|index| self.pos_from_index(index))
    }
}

impl<T: Default> Grid2D<T> {
    pub fn default(dimensions: IVec2) -> Self {
        let capacity: usize = (dimensions.x * dimensions.y) as usize;
        let mut cells: Vec<T> = Vec::with_capacity(capacity);

        cells.resize_with(capacity, T::default);

        Self { cells, dimensions }
    }
}

impl<T: Debug> Debug for Grid2D<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("Grid2D")?;

        let mut y_list: DebugList = f.debug_list();

        for y in 0_i32..self.dimensions.y {
            let start: usize = (y * self.dimensions.x) as usize;

            y_list.entry(&&self.cells[start..(start + self.dimensions.x as usize)]);
        }

        y_list.finish()
    }
}

impl<T: PartialEq> PartialEq for Grid2D<T> {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions == other.dimensions && self.cells == other.cells
    }
}

/// Rows must all match the width of the first row: ragged input is a parse failure, not UB.
impl<T: Parse> Parse for Grid2D<T> {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        let mut cells: Vec<T> = Vec::new();
        let mut width: usize = 0_usize;

        let (input, height): (&str, usize) = many1_count(|input: &'i str| {
            let (input, row_len): (&str, usize) = terminated(
                many1_count(map(T::parse, |cell| cells.push(cell))),
                opt(line_ending),
            )(input)?;

            if width == 0_usize {
                width = row_len;
            }

            if row_len != width {
                Err(Err::Failure(NomError::new(input, NomErrorKind::ManyMN)))
            } else {
                Ok((input, ()))
            }
        })(input)?;

        Ok((
            input,
            Self {
                cells,
                dimensions: IVec2::new(width as i32, height as i32),
            },
        ))
    }
}

/// Marker for cell types whose byte representation is a printable ASCII character.
///
/// # Safety
///
/// Implementors must be `#[repr(u8)]` single-byte types whose every inhabited value is a valid
/// ASCII byte.
pub unsafe trait IsValidAscii {}

impl<T: Copy + IsValidAscii> From<Grid2D<T>> for String {
    fn from(grid: Grid2D<T>) -> Self {
        let width: usize = grid.dimensions.x as usize;
        let mut string: String = String::with_capacity(grid.cells.len() + grid.cells.len() / width);

        for row in grid.cells.chunks(width) {
            for cell in row {
                // SAFETY: `IsValidAscii` implementors are single ASCII bytes
                string.push(unsafe { transmute_copy::<T, u8>(cell) } as char);
            }

            string.push('\n');
        }

        string
    }
}

/// Generates a `#[repr(u8)]` cell enum whose variants are single ASCII characters, along with
/// `Parse` and fallible byte/char conversions.
#[macro_export]
macro_rules! define_cell {
    {
        #[repr(u8)]
        $( #[$attr:meta] )*
        $vis:vis enum $cell:ident { $(
            $( #[$variant_attr:meta] )*
            $variant:ident = $variant_const:ident = $variant_u8:expr
        ),* $(,)? }
    } => {
        #[repr(u8)]
        $( #[$attr] )*
        $vis enum $cell { $(
            $( #[$variant_attr] )*
            $variant = Self::$variant_const,
        )* }

        impl $cell {
            $(
                const $variant_const: u8 = $variant_u8;
            )*
            const STR: &'static str =
                // SAFETY: Trivial
                unsafe { ::std::str::from_utf8_unchecked(&[ $(
                    $cell::$variant_const,
                )* ]) };
        }

        unsafe impl IsValidAscii for $cell {}

        impl Parse for $cell {
            fn parse<'i>(input: &'i str) -> ::nom::IResult<&'i str, Self> {
                ::nom::combinator::map(
                    ::nom::character::complete::one_of($cell::STR),
                    |value: char| $cell::try_from(value).unwrap()
                )(input)
            }
        }

        impl TryFrom<u8> for $cell {
            type Error = ();

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $(
                        Self::$variant_const => Ok(Self::$variant),
                    )*
                    _ => Err(()),
                }
            }
        }

        impl TryFrom<char> for $cell {
            type Error = ();

            fn try_from(value: char) -> Result<Self, Self::Error> {
                (value as u8).try_into()
            }
        }
    }
}

pub struct CellIter2D {
    curr: IVec2,
    end: IVec2,
    dir: Direction,
}

impl CellIter2D {
    pub fn until_boundary<T>(grid: &Grid2D<T>, curr: IVec2, dir: Direction) -> Self {
        let dir_vec: IVec2 = dir.vec();
        let end: IVec2 = (curr + dir_vec * grid.dimensions())
            .clamp(IVec2::ZERO, grid.max_dimensions())
            + dir_vec;

        Self { curr, end, dir }
    }
}

impl Iterator for CellIter2D {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        (self.curr != self.end).then(|| {
            let prev: IVec2 = self.curr;

            self.curr += self.dir.vec();

            prev
        })
    }
}

#[derive(Debug)]
pub enum CellIterFromRangeError {
    PositionsIdentical,
    PositionsNotAligned,
}

impl TryFrom<Range<IVec2>> for CellIter2D {
    type Error = CellIterFromRangeError;

    fn try_from(Range { start, end }: Range<IVec2>) -> Result<Self, Self::Error> {
        use CellIterFromRangeError::*;

        let delta: IVec2 = end - start;

        if delta == IVec2::ZERO {
            Err(PositionsIdentical)
        } else if delta.x != 0_i32 && delta.y != 0_i32 {
            Err(PositionsNotAligned)
        } else {
            let abs: IVec2 = delta.abs();
            let dir: Direction = (delta / (abs.x + abs.y)).try_into().unwrap();

            Ok(Self {
                curr: start,
                end,
                dir,
            })
        }
    }
}

pub trait Manhattan
where
    Self: Copy + Index<usize> + Sub<Self, Output = Self> + Sized,
    <Self as Index<usize>>::Output: Sized,
{
    fn manhattan_magnitude(&self) -> <Self as Index<usize>>::Output;

    fn manhattan_distance(self, other: Self) -> <Self as Index<usize>>::Output {
        (self - other).manhattan_magnitude()
    }
}

macro_rules! impl_manhattan {
    ( $( $glam_vec:ty ),* $(,)? ) => { $(
        impl Manhattan for $glam_vec {
            fn manhattan_magnitude(&self) -> <Self as Index<usize>>::Output {
                let abs: Self = self.abs();

                abs.x + abs.y
            }
        }
    )* };
}

impl_manhattan!(I64Vec2, IVec2);

#[cfg(test)]
mod tests {
    use {super::*, crate::define_cell};

    define_cell! {
        #[repr(u8)]
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        enum Pixel {
            #[default]
            Dark = DARK = b'.',
            Light = LIGHT = b'#',
        }
    }

    #[test]
    fn test_parse() {
        let grid: Grid2D<Pixel> = Grid2D::parse(".#\n#.\n").unwrap().1;

        assert_eq!(grid.dimensions(), IVec2::new(2_i32, 2_i32));
        assert_eq!(grid.get(IVec2::new(1_i32, 0_i32)), Some(&Pixel::Light));
        assert_eq!(grid.get(IVec2::new(2_i32, 0_i32)), None);
        assert_eq!(String::from(grid), ".#\n#.\n".to_owned());
    }

    #[test]
    fn test_parse_ragged() {
        assert!(Grid2D::<Pixel>::parse(".#\n#\n").is_err());
        assert!(Grid2D::<Pixel>::parse("").is_err());
    }

    #[test]
    fn test_until_boundary() {
        let grid: Grid2D<Pixel> = Grid2D::default(IVec2::new(3_i32, 3_i32));

        assert_eq!(
            CellIter2D::until_boundary(&grid, IVec2::ZERO, Direction::East).collect::<Vec<IVec2>>(),
            vec![
                IVec2::new(0_i32, 0_i32),
                IVec2::new(1_i32, 0_i32),
                IVec2::new(2_i32, 0_i32)
            ]
        );
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(
            IVec2::new(1_i32, 6_i32).manhattan_distance(IVec2::new(5_i32, 11_i32)),
            9_i32
        );
        assert_eq!(I64Vec2::new(-3_i64, 4_i64).manhattan_magnitude(), 7_i64);
        assert_eq!(
            I64Vec2::new(4_i64, 0_i64).manhattan_distance(I64Vec2::new(9_i64, 10_i64)),
            15_i64
        );
    }
}
