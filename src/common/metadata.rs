use std::fmt::{Display, Formatter};
use std::ops::{Deref, Not};
use std::str::FromStr;

use super::error::{QRError, QRResult};

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub fn select<T>(self, light: T, dark: T) -> T {
        match self {
            Self::Light => light,
            Self::Dark => dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl From<bool> for Color {
    fn from(bit: bool) -> Self {
        if bit {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Version {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(40);

    pub fn new(version: usize) -> QRResult<Self> {
        if (*Self::MIN..=*Self::MAX).contains(&version) {
            Ok(Self(version))
        } else {
            Err(QRError::InvalidVersion)
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (*Self::MIN..=*Self::MAX).map(Self)
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    // Bits in the byte-mode character count indicator
    pub const fn char_cnt_bits(self) -> usize {
        if self.0 <= 9 {
            8
        } else {
            16
        }
    }

    pub const fn has_version_info(self) -> bool {
        self.0 >= 7
    }

    // Number of codewords the encoding region holds, excluding remainder bits.
    // Derived from the module count left over after all function patterns.
    pub const fn total_codewords(self) -> usize {
        let v = self.0;
        let mut modules = (16 * v + 128) * v + 64;
        if v >= 2 {
            let aligns = v / 7 + 2;
            modules -= (25 * aligns - 10) * aligns - 55;
            if v >= 7 {
                modules -= 36;
            }
        }
        modules >> 3
    }

    pub const fn remainder_bits(self) -> usize {
        match self.0 {
            2..=6 => 7,
            14..=20 | 28..=34 => 3,
            21..=27 => 4,
            _ => 0,
        }
    }
}

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    pub const ALL: [Self; 4] = [Self::L, Self::M, Self::Q, Self::H];
}

impl FromStr for ECLevel {
    type Err = QRError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(Self::L),
            "M" | "MEDIUM" => Ok(Self::M),
            "Q" | "QUARTILE" => Ok(Self::Q),
            "H" | "HIGH" => Ok(Self::H),
            _ => Err(QRError::InvalidECLevel),
        }
    }
}

impl Display for ECLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod metadata_tests {
    use test_case::test_case;

    use super::{Color, ECLevel, Version};
    use crate::common::error::QRError;

    #[test]
    fn test_width() {
        for v in Version::all() {
            let w = v.width();
            assert_eq!(w, 17 + 4 * *v);
            assert_eq!(w % 4, 1);
        }
        assert_eq!(Version::MIN.width(), 21);
        assert_eq!(Version::MAX.width(), 177);
    }

    #[test]
    fn test_invalid_version() {
        assert_eq!(Version::new(0), Err(QRError::InvalidVersion));
        assert_eq!(Version::new(41), Err(QRError::InvalidVersion));
        assert_eq!(Version::new(40).map(|v| *v), Ok(40));
    }

    #[test_case(1, 26)]
    #[test_case(2, 44)]
    #[test_case(7, 196)]
    #[test_case(14, 581)]
    #[test_case(40, 3706)]
    fn test_total_codewords(v: usize, exp: usize) {
        assert_eq!(Version::new(v).unwrap().total_codewords(), exp);
    }

    #[test_case("L", ECLevel::L)]
    #[test_case("m", ECLevel::M)]
    #[test_case(" Quartile ", ECLevel::Q)]
    #[test_case("high", ECLevel::H)]
    fn test_parse_ec_level(s: &str, exp: ECLevel) {
        assert_eq!(s.parse::<ECLevel>(), Ok(exp));
    }

    #[test]
    fn test_parse_invalid_ec_level() {
        assert_eq!("X".parse::<ECLevel>(), Err(QRError::InvalidECLevel));
    }

    #[test]
    fn test_color() {
        assert_eq!(!Color::Dark, Color::Light);
        assert_eq!(Color::from(true), Color::Dark);
        assert_eq!(Color::Light.select('a', 'b'), 'a');
    }
}
