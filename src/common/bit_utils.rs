use std::{fmt::Display, mem};

use num_traits::PrimInt;

// Bit stream
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
    // Pointer to take bits
    cursor: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { data: vec![0; (capacity + 7) >> 3], len: 0, capacity, cursor: 0 }
    }

    pub fn from(inp: &[u8]) -> Self {
        let bit_len = inp.len() << 3;
        Self { data: inp.to_vec(), len: bit_len, capacity: bit_len, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..(self.len + 7) >> 3]
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(size <= max_bits, "Bit count exceeds type width: Size {size}");
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );
        debug_assert!(
            self.len + size <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        for i in (0..size).rev() {
            self.push((bits >> i) & T::one() == T::one());
        }
    }

    pub fn push(&mut self, bit: bool) {
        debug_assert!(
            self.len < self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + 1
        );

        if bit {
            let offset = self.len & 7;
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }

        self.len += 1;
    }

    pub fn extend(&mut self, arr: &[u8]) {
        debug_assert!(
            (self.len & 7) == 0,
            "Bit offset must be zero to extend from another array: Bit offset {}",
            self.len & 7
        );
        let pos = self.len >> 3;
        let arr_bits = arr.len() << 3;
        debug_assert!(
            self.len + arr_bits <= self.capacity,
            "Extension shouldn't overflow capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + arr_bits
        );
        self.data[pos..pos + arr.len()].copy_from_slice(arr);
        self.len += arr_bits;
    }
}

#[cfg(test)]
mod bit_stream_push_tests {

    use super::BitStream;

    #[test]
    fn test_len() {
        let bit_capacity = 152;
        let mut bs = BitStream::new(bit_capacity);
        assert_eq!(bs.len(), 0);
        bs.push_bits(0, 0);
        assert_eq!(bs.len(), 0);
        bs.push_bits(0b0100, 4);
        assert_eq!(bs.len(), 4);
        bs.push_bits(0b1000, 8);
        assert_eq!(bs.len(), 12);
        bs.push_bits(0b111111111111u16, 16);
        assert_eq!(bs.len(), 28);
    }

    #[test]
    fn test_push() {
        let mut bs = BitStream::new(2);
        bs.push(false);
        assert_eq!(bs.data(), [0b00000000]);
        bs.push(true);
        assert_eq!(bs.data(), [0b01000000]);
    }

    #[test]
    fn test_push_bits_across_bytes() {
        let mut bs = BitStream::new(32);
        bs.push_bits(0b0100u8, 4);
        bs.push_bits(5u16, 8);
        bs.push_bits(b'H', 8);
        bs.push_bits(0u8, 4);
        assert_eq!(bs.data(), [0x40, 0x54, 0x80]);
    }

    #[test]
    fn test_extend() {
        let mut bs = BitStream::new(24);
        bs.push_bits(0xAB_u8, 8);
        bs.extend(&[0xCD, 0xEF]);
        assert_eq!(bs.data(), [0xAB, 0xCD, 0xEF]);
    }

    #[test]
    #[should_panic]
    fn test_push_bits_capacity_overflow() {
        let mut bs = BitStream::new(8);
        bs.push_bits(0xFF_u8, 8);
        bs.push(true);
    }
}

// Take bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn take_bit(&mut self) -> Option<bool> {
        if self.cursor == self.len {
            return None;
        }

        let offset = self.cursor & 7;
        let pos = self.cursor >> 3;
        let bit = (self.data[pos] << offset) >> 7;

        self.cursor += 1;

        Some(bit != 0)
    }
}

// Iterator for bit stream
//------------------------------------------------------------------------------

impl Iterator for BitStream {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        self.take_bit()
    }
}

#[cfg(test)]
mod bit_stream_take_tests {

    use super::BitStream;

    #[test]
    fn test_take() {
        let mut bs = BitStream::from(&[0b1010_0000]);
        let bits = bs.by_ref().take(4).collect::<Vec<_>>();
        assert_eq!(bits, [true, false, true, false]);
        assert_eq!(bs.count(), 4);
    }

    #[test]
    fn test_take_empty() {
        let mut bs = BitStream::from(&[]);
        assert_eq!(bs.take_bit(), None);
    }
}
