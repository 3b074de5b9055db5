use encoding_rs::Encoding;
use tracing::debug;

use super::error::{QRError, QRResult};
use super::metadata::{ECLevel, Version};
use super::version_db::CapacityTable;

pub use encode::*;

// Byte mode
//------------------------------------------------------------------------------

pub const BYTE_MODE: u8 = 0b0100;

pub const MODE_BITS: usize = 4;

pub const TERMINATOR_BITS: usize = 4;

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

// Codewords needed for a byte segment of the given length, header and terminator included
pub const fn required_codewords(len: usize, ver: Version) -> usize {
    (MODE_BITS + ver.char_cnt_bits() + (len << 3) + TERMINATOR_BITS + 7) >> 3
}

// Writer
//------------------------------------------------------------------------------

mod writer {
    use super::{BYTE_MODE, MODE_BITS, PADDING_CODEWORDS, TERMINATOR_BITS};
    use crate::common::bit_utils::BitStream;
    use crate::common::metadata::Version;

    pub fn push_segment(data: &[u8], ver: Version, out: &mut BitStream) {
        push_header(data.len(), ver, out);
        push_byte_data(data, out);
    }

    fn push_header(char_cnt: usize, ver: Version, out: &mut BitStream) {
        let len_bits = ver.char_cnt_bits();
        debug_assert!(
            char_cnt < (1 << len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {len_bits}"
        );
        out.push_bits(BYTE_MODE, MODE_BITS);
        out.push_bits(char_cnt as u16, len_bits);
    }

    fn push_byte_data(data: &[u8], out: &mut BitStream) {
        for &b in data {
            out.push_bits(b, 8);
        }
    }

    pub fn push_terminator(out: &mut BitStream) {
        let bit_len = out.len();
        let bit_capacity = out.capacity();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(TERMINATOR_BITS, bit_capacity - bit_len);
            out.push_bits(0u8, term_len);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            out.push_bits(0u8, 8 - offset);
        }
    }

    // Pad bytes alternate by index parity, starting with 0xEC
    fn push_padding_codewords(out: &mut BitStream) {
        debug_assert!(
            out.len() & 7 == 0,
            "Bit offset should be zero before padding codewords: {}",
            out.len() & 7
        );

        let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

}

// Encoder
//------------------------------------------------------------------------------

mod encode {
    use tracing::debug;

    use super::writer::{pad_remaining_capacity, push_segment, push_terminator};
    use super::fits;
    use crate::common::bit_utils::BitStream;
    use crate::common::error::{QRError, QRResult};
    use crate::common::metadata::{ECLevel, Version};
    use crate::common::version_db::CapacityTable;

    /// Smallest version whose data capacity holds a byte segment of `len` bytes.
    pub fn find_version(len: usize, ecl: ECLevel, table: &CapacityTable) -> QRResult<Version> {
        Version::all().find(|&ver| fits(len, ver, ecl, table)).ok_or(QRError::DataTooLong)
    }

    pub fn encode(
        data: &[u8],
        ecl: ECLevel,
        table: &CapacityTable,
    ) -> QRResult<(BitStream, Version)> {
        let ver = find_version(data.len(), ecl, table)?;
        debug!(version = *ver, len = data.len(), "Selected version");
        let bs = encode_with_version(data, ver, ecl, table)?;
        Ok((bs, ver))
    }

    pub fn encode_with_version(
        data: &[u8],
        ver: Version,
        ecl: ECLevel,
        table: &CapacityTable,
    ) -> QRResult<BitStream> {
        if !fits(data.len(), ver, ecl, table) {
            return Err(QRError::DataTooLong);
        }

        let cap = table.data_capacity(ver, ecl);
        let mut bs = BitStream::new(cap << 3);
        push_segment(data, ver, &mut bs);
        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);

        debug_assert!(bs.len() == bs.capacity(), "Bit stream isn't filled to capacity");
        Ok(bs)
    }

}

// Text transcoding
//------------------------------------------------------------------------------

/// Transcodes `text` into the character set named by `label` (a WHATWG
/// encoding label such as `"shift_jis"` or `"latin1"`) so it can be carried in
/// byte mode.
pub fn encode_text(text: &str, label: &str) -> QRResult<Vec<u8>> {
    let encoding =
        Encoding::for_label(label.trim().as_bytes()).ok_or(QRError::UnsupportedCharset)?;
    let (bytes, used, unmappable) = encoding.encode(text);
    if unmappable {
        return Err(QRError::UnsupportedCharset);
    }
    debug!(charset = used.name(), len = bytes.len(), "Transcoded text");
    Ok(bytes.into_owned())
}

/// Codeword capacity check without building the stream.
pub fn fits(len: usize, ver: Version, ecl: ECLevel, table: &CapacityTable) -> bool {
    required_codewords(len, ver) <= table.data_capacity(ver, ecl)
}
