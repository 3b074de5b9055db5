use std::ops::{Add, AddAssign, Mul, MulAssign, Sub};

// Galois field GF(256) under x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

pub const PRIMITIVE_POLYNOMIAL: u16 = 0x11D;

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub struct G(pub u8);

impl G {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    // Generator raised to the power i
    pub fn gen_pow(i: usize) -> Self {
        Self(EXP_TABLE[i % 255])
    }
}

impl From<G> for u8 {
    fn from(g: G) -> Self {
        g.0
    }
}

impl Add for G {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for G {
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Sub for G {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        self + rhs
    }
}

impl Mul for G {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self(multiply(self.0, rhs.0))
    }
}

impl MulAssign for G {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

pub fn multiply(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    EXP_TABLE[LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize]
}

// Exponent table is doubled so that the sum of two logs never needs a modulo
pub static EXP_TABLE: [u8; 510] = exp_table();

pub static LOG_TABLE: [u8; 256] = log_table();

const fn exp_table() -> [u8; 510] {
    let mut table = [0u8; 510];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE_POLYNOMIAL;
        }
        i += 1;
    }
    while i < 510 {
        table[i] = table[i - 255];
        i += 1;
    }
    table
}

const fn log_table() -> [u8; 256] {
    let exp = exp_table();
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

#[cfg(test)]
mod galois_tests {
    use super::{multiply, EXP_TABLE, G, LOG_TABLE};

    #[test]
    fn test_exp_table() {
        assert_eq!(EXP_TABLE[0], 1);
        assert_eq!(EXP_TABLE[7], 128);
        assert_eq!(EXP_TABLE[8], 29);
        assert_eq!(EXP_TABLE[254], 142);
        assert_eq!(EXP_TABLE[255], 1);
        assert_eq!(&EXP_TABLE[255..], &EXP_TABLE[..255]);
    }

    #[test]
    fn test_log_inverts_exp() {
        for i in 0..255 {
            assert_eq!(LOG_TABLE[EXP_TABLE[i] as usize] as usize, i);
        }
    }

    #[test]
    fn test_multiply() {
        assert_eq!(multiply(0, 37), 0);
        assert_eq!(multiply(37, 0), 0);
        assert_eq!(multiply(1, 37), 37);
        assert_eq!(multiply(2, 128), 29);
        assert_eq!(multiply(3, 7), 9);
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                assert_eq!(multiply(a, b), multiply(b, a));
            }
        }
    }

    #[test]
    fn test_field_ops() {
        assert_eq!(G(0b1010) + G(0b0110), G(0b1100));
        assert_eq!(G(0b1010) - G(0b0110), G(0b1100));
        assert_eq!(G::gen_pow(8), G(29));
        assert_eq!(G::gen_pow(255), G::ONE);
        let mut g = G(2);
        g *= G(128);
        assert_eq!(g, G(29));
    }
}
