use super::{galois::G, ReedSolomon, MAX_BLOCK_SIZE, MAX_EC_SIZE};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Block {
    data: [u8; MAX_BLOCK_SIZE],
    // Block length
    len: usize,
    // Data length
    dlen: usize,
}

impl Block {
    pub fn new(raw: &[u8], rs: &ReedSolomon) -> Self {
        let dlen = raw.len();
        let len = dlen + rs.nsym();
        debug_assert!(len <= MAX_BLOCK_SIZE, "Block too large: Len {len}");

        let mut data = [0u8; MAX_BLOCK_SIZE];
        data[..dlen].copy_from_slice(raw);
        data[dlen..len].copy_from_slice(&rs.encode(raw));
        let block = Self { data, len, dlen };

        debug_assert!(block.syndromes().is_ok(), "Parity codewords don't verify");
        block
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn ec_len(&self) -> usize {
        self.len - self.dlen
    }

    pub fn data_len(&self) -> usize {
        self.dlen
    }

    pub fn full(&self) -> &[u8] {
        &self.data[..self.len]
    }

    #[cfg(test)]
    pub fn full_mut(&mut self) -> &mut [u8] {
        &mut self.data[..self.len]
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..self.dlen]
    }

    pub fn ecc(&self) -> &[u8] {
        &self.data[self.dlen..self.len]
    }
}

// Syndromes
//------------------------------------------------------------------------------

impl Block {
    // Evaluates the codeword polynomial at each generator root a^i.
    // A valid codeword has every syndrome equal to zero.
    pub fn syndromes(&self) -> Result<(), [G; MAX_EC_SIZE]> {
        let ec_len = self.ec_len();
        debug_assert!(ec_len <= MAX_EC_SIZE, "Too many parity codewords: {ec_len}");

        let mut synd = [G::ZERO; MAX_EC_SIZE];
        let mut valid = true;
        for (i, s) in synd.iter_mut().enumerate().take(ec_len) {
            let root = G::gen_pow(i);
            *s = self.full().iter().fold(G::ZERO, |acc, &c| acc * root + G(c));
            valid &= *s == G::ZERO;
        }

        if valid {
            Ok(())
        } else {
            Err(synd)
        }
    }
}
