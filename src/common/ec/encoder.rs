use super::galois::{multiply, EXP_TABLE};

// Reed-Solomon encoder
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ReedSolomon {
    // Monic generator polynomial, highest degree coefficient first
    generator: Vec<u8>,
}

impl ReedSolomon {
    // Generator polynomial is the product of (x - a^d) for d in [0, nsym)
    pub fn new(nsym: usize) -> Self {
        let mut generator = vec![1u8];
        for d in 0..nsym {
            let root = EXP_TABLE[d % 255];
            let mut next = vec![0u8; generator.len() + 1];
            for (i, &coeff) in generator.iter().enumerate() {
                next[i] ^= coeff;
                next[i + 1] ^= multiply(coeff, root);
            }
            generator = next;
        }
        Self { generator }
    }

    pub fn nsym(&self) -> usize {
        self.generator.len() - 1
    }

    #[cfg(test)]
    pub fn generator(&self) -> &[u8] {
        &self.generator
    }

    // Performs polynomial long division with data polynomial(num)
    // and generator polynomial(den) to compute remainder polynomial,
    // the coefficients of which are the ecc
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let len = data.len();
        let nsym = self.nsym();

        let mut res = data.to_vec();
        res.resize(len + nsym, 0);

        for i in 0..len {
            let lead_coeff = res[i];
            if lead_coeff == 0 {
                continue;
            }

            for (u, &v) in res[i..].iter_mut().zip(self.generator.iter()) {
                *u ^= multiply(lead_coeff, v);
            }
        }

        res.split_off(len)
    }
}
