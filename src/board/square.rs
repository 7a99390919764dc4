/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

/// Represents a single square on an `8x8` chess board.
///
/// Squares are indexed in FEN reading order: rank 8 first, file `a` first,
/// so `square = file + (8 - rank) * 8`. The indices of each square on the
/// board are given as follows:
/// ```text
/// 8|  0  1  2  3  4  5  6  7
/// 7|  8  9 10 11 12 13 14 15
/// 6| 16 17 18 19 20 21 22 23
/// 5| 24 25 26 27 28 29 30 31
/// 4| 32 33 34 35 36 37 38 39
/// 3| 40 41 42 43 44 45 46 47
/// 2| 48 49 50 51 52 53 54 55
/// 1| 56 57 58 59 60 61 62 63
///  +------------------------
///     a  b  c  d  e  f  g  h
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    pub const A8: Self = Self::new(0, 0);
    pub const B8: Self = Self::new(1, 0);
    pub const C8: Self = Self::new(2, 0);
    pub const D8: Self = Self::new(3, 0);
    pub const E8: Self = Self::new(4, 0);
    pub const F8: Self = Self::new(5, 0);
    pub const G8: Self = Self::new(6, 0);
    pub const H8: Self = Self::new(7, 0);

    pub const A7: Self = Self::new(0, 1);
    pub const B7: Self = Self::new(1, 1);
    pub const C7: Self = Self::new(2, 1);
    pub const D7: Self = Self::new(3, 1);
    pub const E7: Self = Self::new(4, 1);
    pub const F7: Self = Self::new(5, 1);
    pub const G7: Self = Self::new(6, 1);
    pub const H7: Self = Self::new(7, 1);

    pub const A6: Self = Self::new(0, 2);
    pub const B6: Self = Self::new(1, 2);
    pub const C6: Self = Self::new(2, 2);
    pub const D6: Self = Self::new(3, 2);
    pub const E6: Self = Self::new(4, 2);
    pub const F6: Self = Self::new(5, 2);
    pub const G6: Self = Self::new(6, 2);
    pub const H6: Self = Self::new(7, 2);

    pub const A5: Self = Self::new(0, 3);
    pub const B5: Self = Self::new(1, 3);
    pub const C5: Self = Self::new(2, 3);
    pub const D5: Self = Self::new(3, 3);
    pub const E5: Self = Self::new(4, 3);
    pub const F5: Self = Self::new(5, 3);
    pub const G5: Self = Self::new(6, 3);
    pub const H5: Self = Self::new(7, 3);

    pub const A4: Self = Self::new(0, 4);
    pub const B4: Self = Self::new(1, 4);
    pub const C4: Self = Self::new(2, 4);
    pub const D4: Self = Self::new(3, 4);
    pub const E4: Self = Self::new(4, 4);
    pub const F4: Self = Self::new(5, 4);
    pub const G4: Self = Self::new(6, 4);
    pub const H4: Self = Self::new(7, 4);

    pub const A3: Self = Self::new(0, 5);
    pub const B3: Self = Self::new(1, 5);
    pub const C3: Self = Self::new(2, 5);
    pub const D3: Self = Self::new(3, 5);
    pub const E3: Self = Self::new(4, 5);
    pub const F3: Self = Self::new(5, 5);
    pub const G3: Self = Self::new(6, 5);
    pub const H3: Self = Self::new(7, 5);

    pub const A2: Self = Self::new(0, 6);
    pub const B2: Self = Self::new(1, 6);
    pub const C2: Self = Self::new(2, 6);
    pub const D2: Self = Self::new(3, 6);
    pub const E2: Self = Self::new(4, 6);
    pub const F2: Self = Self::new(5, 6);
    pub const G2: Self = Self::new(6, 6);
    pub const H2: Self = Self::new(7, 6);

    pub const A1: Self = Self::new(0, 7);
    pub const B1: Self = Self::new(1, 7);
    pub const C1: Self = Self::new(2, 7);
    pub const D1: Self = Self::new(3, 7);
    pub const E1: Self = Self::new(4, 7);
    pub const F1: Self = Self::new(5, 7);
    pub const G1: Self = Self::new(6, 7);
    pub const H1: Self = Self::new(7, 7);

    pub const MIN: u8 = 0;
    pub const MAX: u8 = 63;
    pub const COUNT: usize = 64;

    /// Returns an iterator over all available squares, in index order.
    ///
    /// # Example
    /// ```
    /// # use skewer::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap(), Square::A8);
    /// assert_eq!(iter.last().unwrap(), Square::H1);
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Creates a new [`Square`] from the provided file and rank *indices*,
    /// both `[0, 8)`. A rank index of `0` is rank 8, per FEN ordering.
    ///
    /// # Example
    /// ```
    /// # use skewer::Square;
    /// let c4 = Square::new(2, 4);
    /// assert_eq!(c4, Square::C4);
    /// ```
    #[inline(always)]
    pub const fn new(file: u8, rank: u8) -> Self {
        Self(rank * 8 + file)
    }

    /// Creates a new [`Square`] from the provided index value.
    ///
    /// The provided `index` must be `[0, 63]` or else an error is returned.
    ///
    /// # Example
    /// ```
    /// # use skewer::Square;
    /// let c4 = Square::from_index(34);
    /// assert!(c4.is_ok());
    /// assert_eq!(c4.unwrap(), Square::C4);
    ///
    /// assert!(Square::from_index(64).is_err());
    /// ```
    #[inline(always)]
    pub fn from_index(index: usize) -> Result<Self> {
        if index > Self::MAX as usize {
            bail!(
                "Invalid index for Square: Must be between [{}, {}]. Got {index}",
                Self::MIN,
                Self::MAX
            );
        }
        Ok(Self(index as u8))
    }

    /// Creates a new [`Square`] from the provided index value, without error checking.
    ///
    /// # Panics
    ///
    /// If `index` is greater than `63` and debug assertions are enabled.
    #[inline(always)]
    pub const fn from_index_unchecked(index: usize) -> Self {
        debug_assert!(index < Self::COUNT, "Index must be between [0,64)");
        Self(index as u8)
    }

    /// Returns this [`Square`] as a `usize`, for indexing into the board array.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the file index of this square, `[0, 8)`, where `0` is file `a`.
    ///
    /// # Example
    /// ```
    /// # use skewer::Square;
    /// assert_eq!(Square::C4.file(), 2);
    /// ```
    #[inline(always)]
    pub const fn file(&self) -> u8 {
        self.0 % 8
    }

    /// Returns the rank index of this square, `[0, 8)`, where `0` is rank 8
    /// and `7` is rank 1 (FEN reading order).
    ///
    /// # Example
    /// ```
    /// # use skewer::Square;
    /// assert_eq!(Square::A8.rank(), 0);
    /// assert_eq!(Square::C4.rank(), 4);
    /// ```
    #[inline(always)]
    pub const fn rank(&self) -> u8 {
        self.0 / 8
    }

    /// Returns the file letter of this square, `'a'..='h'`.
    #[inline(always)]
    pub const fn file_char(&self) -> char {
        (b'a' + self.file()) as char
    }

    /// Returns the rank *number* of this square, `1..=8`, as printed in
    /// algebraic notation.
    ///
    /// # Example
    /// ```
    /// # use skewer::Square;
    /// assert_eq!(Square::C4.rank_number(), 4);
    /// assert_eq!(Square::A8.rank_number(), 8);
    /// ```
    #[inline(always)]
    pub const fn rank_number(&self) -> u8 {
        8 - self.rank()
    }
}

impl fmt::Display for Square {
    /// Formats this [`Square`] as its algebraic label.
    ///
    /// # Example
    /// ```
    /// # use skewer::Square;
    /// assert_eq!(Square::from_index(0).unwrap().to_string(), "a8");
    /// assert_eq!(Square::from_index(63).unwrap().to_string(), "h1");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_number())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({})", self.0)
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    /// Parses an algebraic label like `e4` into a [`Square`].
    ///
    /// # Example
    /// ```
    /// # use skewer::Square;
    /// assert_eq!("e4".parse::<Square>().unwrap(), Square::E4);
    /// assert!("j9".parse::<Square>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_bytes() {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => {
                Ok(Self::new(file - b'a', 8 - (rank - b'0')))
            }
            _ => bail!("Invalid Square: Expected a label like 'e4'. Got {s:?}"),
        }
    }
}
