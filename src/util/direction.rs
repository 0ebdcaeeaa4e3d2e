use {
    glam::IVec2,
    static_assertions::const_assert,
    std::mem::transmute,
    strum::EnumCount,
    strum_macros::EnumIter,
};

macro_rules! define_direction {
    {
        $( #[$meta:meta] )*
        $vis:vis enum $direction:ident {
            $(
                $( #[$variant_meta:meta] )?
                $variant:ident,
            )*
        }
    } => {
        $( #[$meta] )*
        $vis enum $direction {
            $(
                $( #[$variant_meta] )?
                $variant,
            )*
        }

        const VECS: [IVec2; $direction::COUNT] = [
            $( $direction::$variant.vec_internal(), )*
        ];
    };
}

define_direction! {
    #[derive(
        Copy,
        Clone,
        Debug,
        Default,
        strum_macros::EnumCount,
        EnumIter,
        Eq,
        Hash,
        PartialEq
    )]
    #[repr(u8)]
    pub enum Direction {
        #[default]
        North,
        East,
        South,
        West,
    }
}

// This guarantees we can safely convert from `u8` to `Direction` by masking the smallest 2 bits,
// which is the same as masking by `MASK`
const_assert!(Direction::COUNT == 4_usize);

impl Direction {
    pub const COUNT_U8: u8 = Self::COUNT as u8;
    pub const MASK: u8 = Self::COUNT_U8 - 1_u8;
    pub const HALF_COUNT: u8 = Self::COUNT_U8 / 2_u8;
    pub const PREV_DELTA: u8 = Self::COUNT_U8 - 1_u8;

    #[inline]
    pub const fn vec(self) -> IVec2 {
        VECS[self as usize]
    }

    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        // SAFETY: See `const_assert` above
        unsafe { transmute(value & Self::MASK) }
    }

    #[inline]
    pub const fn next(self) -> Self {
        Self::from_u8(self as u8 + 1_u8)
    }

    #[inline]
    pub const fn rev(self) -> Self {
        Self::from_u8(self as u8 + Self::HALF_COUNT)
    }

    #[inline]
    pub const fn prev(self) -> Self {
        Self::from_u8(self as u8 + Self::PREV_DELTA)
    }

    pub const fn turn(self, left: bool) -> Self {
        if left {
            self.prev()
        } else {
            self.next()
        }
    }

    pub const fn is_north_or_south(self) -> bool {
        (self as u8 & 1_u8) == 0_u8
    }

    const fn vec_internal(self) -> IVec2 {
        match self {
            Self::North => IVec2::NEG_Y,
            Self::East => IVec2::X,
            Self::South => IVec2::Y,
            Self::West => IVec2::NEG_X,
        }
    }
}

impl From<Direction> for IVec2 {
    fn from(value: Direction) -> Self {
        value.vec()
    }
}

impl From<u8> for Direction {
    fn from(value: u8) -> Self {
        Self::from_u8(value)
    }
}

impl TryFrom<IVec2> for Direction {
    type Error = ();

    fn try_from(value: IVec2) -> Result<Self, Self::Error> {
        VECS.iter()
            .position(|vec| *vec == value)
            .map(|index| (index as u8).into())
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rev() {
        assert_eq!(Direction::North.rev(), Direction::South);
        assert_eq!(Direction::East.rev(), Direction::West);
        assert_eq!(Direction::South.rev(), Direction::North);
        assert_eq!(Direction::West.rev(), Direction::East);
    }

    #[test]
    fn test_turn() {
        assert_eq!(Direction::North.turn(true), Direction::West);
        assert_eq!(Direction::North.turn(false), Direction::East);
        assert_eq!(Direction::West.turn(false), Direction::North);
    }

    #[test]
    fn test_try_from_ivec2() {
        assert_eq!(IVec2::NEG_Y.try_into(), Ok(Direction::North));
        assert_eq!(Direction::try_from(IVec2::ONE), Err(()));
    }
}
