use super::ec::{MAX_BLOCK_SIZE, MAX_EC_SIZE};
use super::error::{QRError, QRResult};
use super::mask::MaskPattern;
use super::metadata::{ECLevel, Version};
use crate::builder::StructureMap;

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const VERSION_INFO_BIT_LEN: usize = 18;

// Block schema
//------------------------------------------------------------------------------

/// A run of `blocks` Reed-Solomon blocks sharing the same shape.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct BlockSchema {
    pub blocks: usize,
    pub data: usize,
    pub nsym: usize,
}

impl BlockSchema {
    pub const fn new(blocks: usize, data: usize, nsym: usize) -> Self {
        Self { blocks, data, nsym }
    }

    pub const fn data_capacity(&self) -> usize {
        self.blocks * self.data
    }

    pub const fn total_codewords(&self) -> usize {
        self.blocks * (self.data + self.nsym)
    }
}

// Capacity table
//------------------------------------------------------------------------------

/// Read-only tables driving symbol construction: block schemas per version and
/// ec level, alignment pattern centers, and the precomputed BCH words for
/// format and version information.
///
/// The table is validated once at construction. Lookups afterwards never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityTable {
    schemas: Vec<[Vec<BlockSchema>; 4]>,
    alignments: Vec<Vec<i16>>,
    format_infos: [[u32; 8]; 4],
    version_infos: Vec<u32>,
}

impl CapacityTable {
    pub fn standard() -> QRResult<Self> {
        let schemas: Vec<[Vec<BlockSchema>; 4]> = BLOCK_SCHEMAS
            .iter()
            .map(|lvls| {
                lvls.map(|s| {
                    s.iter().map(|&(b, d, n)| BlockSchema::new(b, d, n)).collect::<Vec<_>>()
                })
            })
            .collect();
        let alignments = ALIGNMENT_PATTERN_POSITIONS.iter().map(|a| a.to_vec()).collect();
        Self::from_parts(schemas, alignments, FORMAT_INFOS, VERSION_INFOS.to_vec())
    }

    pub fn from_parts(
        schemas: Vec<[Vec<BlockSchema>; 4]>,
        alignments: Vec<Vec<i16>>,
        format_infos: [[u32; 8]; 4],
        version_infos: Vec<u32>,
    ) -> QRResult<Self> {
        let table = Self { schemas, alignments, format_infos, version_infos };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> QRResult<()> {
        let ver_cnt = *Version::MAX;
        let ver_info_cnt = ver_cnt - 6;
        if self.schemas.len() != ver_cnt
            || self.alignments.len() != ver_cnt
            || self.version_infos.len() != ver_info_cnt
        {
            return Err(QRError::MissingTableEntry);
        }

        for (ver, lvls) in Version::all().zip(&self.schemas) {
            for schema in lvls {
                if schema.is_empty() {
                    return Err(QRError::MissingTableEntry);
                }
                let malformed = schema.iter().any(|s| {
                    s.blocks == 0
                        || s.data == 0
                        || s.nsym == 0
                        || s.nsym > MAX_EC_SIZE
                        || s.data + s.nsym > MAX_BLOCK_SIZE
                });
                let total = schema.iter().map(BlockSchema::total_codewords).sum::<usize>();
                if malformed || total != ver.total_codewords() {
                    return Err(QRError::MalformedTable);
                }
            }
        }

        for (ver, poses) in Version::all().zip(&self.alignments) {
            let w = ver.width() as i16;
            if poses.iter().any(|&p| p < 0 || p >= w) {
                return Err(QRError::MalformedTable);
            }
        }

        if self.format_infos.iter().flatten().any(|&f| f >> FORMAT_INFO_BIT_LEN != 0)
            || self.version_infos.iter().any(|&v| v >> VERSION_INFO_BIT_LEN != 0)
        {
            return Err(QRError::MalformedTable);
        }

        // Alignment patterns decide how many modules are left for codewords
        for ver in Version::all() {
            let pending = StructureMap::draw(ver, self).pending_count();
            if pending != (ver.total_codewords() << 3) + ver.remainder_bits() {
                return Err(QRError::MalformedTable);
            }
        }

        Ok(())
    }

    pub fn schema(&self, ver: Version, ecl: ECLevel) -> &[BlockSchema] {
        &self.schemas[*ver - 1][ecl as usize]
    }

    /// Data codewords available to the bit stream at the given version and ec level.
    pub fn data_capacity(&self, ver: Version, ecl: ECLevel) -> usize {
        self.schema(ver, ecl).iter().map(BlockSchema::data_capacity).sum()
    }

    pub fn ecc_capacity(&self, ver: Version, ecl: ECLevel) -> usize {
        self.schema(ver, ecl).iter().map(|s| s.blocks * s.nsym).sum()
    }

    pub fn block_count(&self, ver: Version, ecl: ECLevel) -> usize {
        self.schema(ver, ecl).iter().map(|s| s.blocks).sum()
    }

    pub fn alignment_pattern(&self, ver: Version) -> &[i16] {
        &self.alignments[*ver - 1]
    }

    pub fn format_info(&self, ecl: ECLevel, mask: MaskPattern) -> u32 {
        self.format_infos[ecl as usize][*mask as usize]
    }

    pub fn version_info(&self, ver: Version) -> Option<u32> {
        ver.has_version_info().then(|| self.version_infos[*ver - 7])
    }
}


// Global constants
//------------------------------------------------------------------------------

// Block schemas per version, in L, M, Q, H order: (blocks, data codewords, parity codewords)
static BLOCK_SCHEMAS: [[&[(usize, usize, usize)]; 4]; 40] = [
    [&[(1, 19, 7)], &[(1, 16, 10)], &[(1, 13, 13)], &[(1, 9, 17)]],
    [&[(1, 34, 10)], &[(1, 28, 16)], &[(1, 22, 22)], &[(1, 16, 28)]],
    [&[(1, 55, 15)], &[(1, 44, 26)], &[(2, 17, 18)], &[(2, 13, 22)]],
    [&[(1, 80, 20)], &[(2, 32, 18)], &[(2, 24, 26)], &[(4, 9, 16)]],
    [&[(1, 108, 26)], &[(2, 43, 24)], &[(2, 15, 18), (2, 16, 18)], &[(2, 11, 22), (2, 12, 22)]],
    [&[(2, 68, 18)], &[(4, 27, 16)], &[(4, 19, 24)], &[(4, 15, 28)]],
    [&[(2, 78, 20)], &[(4, 31, 18)], &[(2, 14, 18), (4, 15, 18)], &[(4, 13, 26), (1, 14, 26)]],
    [&[(2, 97, 24)], &[(2, 38, 22), (2, 39, 22)], &[(4, 18, 22), (2, 19, 22)], &[(4, 14, 26), (2, 15, 26)]],
    [&[(2, 116, 30)], &[(3, 36, 22), (2, 37, 22)], &[(4, 16, 20), (4, 17, 20)], &[(4, 12, 24), (4, 13, 24)]],
    [&[(2, 68, 18), (2, 69, 18)], &[(4, 43, 26), (1, 44, 26)], &[(6, 19, 24), (2, 20, 24)], &[(6, 15, 28), (2, 16, 28)]],
    [&[(4, 81, 20)], &[(1, 50, 30), (4, 51, 30)], &[(4, 22, 28), (4, 23, 28)], &[(3, 12, 24), (8, 13, 24)]],
    [&[(2, 92, 24), (2, 93, 24)], &[(6, 36, 22), (2, 37, 22)], &[(4, 20, 26), (6, 21, 26)], &[(7, 14, 28), (4, 15, 28)]],
    [&[(4, 107, 26)], &[(8, 37, 22), (1, 38, 22)], &[(8, 20, 24), (4, 21, 24)], &[(12, 11, 22), (4, 12, 22)]],
    [&[(3, 115, 30), (1, 116, 30)], &[(4, 40, 24), (5, 41, 24)], &[(11, 16, 20), (5, 17, 20)], &[(11, 12, 24), (5, 13, 24)]],
    [&[(5, 87, 22), (1, 88, 22)], &[(5, 41, 24), (5, 42, 24)], &[(5, 24, 30), (7, 25, 30)], &[(11, 12, 24), (7, 13, 24)]],
    [&[(5, 98, 24), (1, 99, 24)], &[(7, 45, 28), (3, 46, 28)], &[(15, 19, 24), (2, 20, 24)], &[(3, 15, 30), (13, 16, 30)]],
    [&[(1, 107, 28), (5, 108, 28)], &[(10, 46, 28), (1, 47, 28)], &[(1, 22, 28), (15, 23, 28)], &[(2, 14, 28), (17, 15, 28)]],
    [&[(5, 120, 30), (1, 121, 30)], &[(9, 43, 26), (4, 44, 26)], &[(17, 22, 28), (1, 23, 28)], &[(2, 14, 28), (19, 15, 28)]],
    [&[(3, 113, 28), (4, 114, 28)], &[(3, 44, 26), (11, 45, 26)], &[(17, 21, 26), (4, 22, 26)], &[(9, 13, 26), (16, 14, 26)]],
    [&[(3, 107, 28), (5, 108, 28)], &[(3, 41, 26), (13, 42, 26)], &[(15, 24, 30), (5, 25, 30)], &[(15, 15, 28), (10, 16, 28)]],
    [&[(4, 116, 28), (4, 117, 28)], &[(17, 42, 26)], &[(17, 22, 28), (6, 23, 28)], &[(19, 16, 30), (6, 17, 30)]],
    [&[(2, 111, 28), (7, 112, 28)], &[(17, 46, 28)], &[(7, 24, 30), (16, 25, 30)], &[(34, 13, 24)]],
    [&[(4, 121, 30), (5, 122, 30)], &[(4, 47, 28), (14, 48, 28)], &[(11, 24, 30), (14, 25, 30)], &[(16, 15, 30), (14, 16, 30)]],
    [&[(6, 117, 30), (4, 118, 30)], &[(6, 45, 28), (14, 46, 28)], &[(11, 24, 30), (16, 25, 30)], &[(30, 16, 30), (2, 17, 30)]],
    [&[(8, 106, 26), (4, 107, 26)], &[(8, 47, 28), (13, 48, 28)], &[(7, 24, 30), (22, 25, 30)], &[(22, 15, 30), (13, 16, 30)]],
    [&[(10, 114, 28), (2, 115, 28)], &[(19, 46, 28), (4, 47, 28)], &[(28, 22, 28), (6, 23, 28)], &[(33, 16, 30), (4, 17, 30)]],
    [&[(8, 122, 30), (4, 123, 30)], &[(22, 45, 28), (3, 46, 28)], &[(8, 23, 30), (26, 24, 30)], &[(12, 15, 30), (28, 16, 30)]],
    [&[(3, 117, 30), (10, 118, 30)], &[(3, 45, 28), (23, 46, 28)], &[(4, 24, 30), (31, 25, 30)], &[(11, 15, 30), (31, 16, 30)]],
    [&[(7, 116, 30), (7, 117, 30)], &[(21, 45, 28), (7, 46, 28)], &[(1, 23, 30), (37, 24, 30)], &[(19, 15, 30), (26, 16, 30)]],
    [&[(5, 115, 30), (10, 116, 30)], &[(19, 47, 28), (10, 48, 28)], &[(15, 24, 30), (25, 25, 30)], &[(23, 15, 30), (25, 16, 30)]],
    [&[(13, 115, 30), (3, 116, 30)], &[(2, 46, 28), (29, 47, 28)], &[(42, 24, 30), (1, 25, 30)], &[(23, 15, 30), (28, 16, 30)]],
    [&[(17, 115, 30)], &[(10, 46, 28), (23, 47, 28)], &[(10, 24, 30), (35, 25, 30)], &[(19, 15, 30), (35, 16, 30)]],
    [&[(17, 115, 30), (1, 116, 30)], &[(14, 46, 28), (21, 47, 28)], &[(29, 24, 30), (19, 25, 30)], &[(11, 15, 30), (46, 16, 30)]],
    [&[(13, 115, 30), (6, 116, 30)], &[(14, 46, 28), (23, 47, 28)], &[(44, 24, 30), (7, 25, 30)], &[(59, 16, 30), (1, 17, 30)]],
    [&[(12, 121, 30), (7, 122, 30)], &[(12, 47, 28), (26, 48, 28)], &[(39, 24, 30), (14, 25, 30)], &[(22, 15, 30), (41, 16, 30)]],
    [&[(6, 121, 30), (14, 122, 30)], &[(6, 47, 28), (34, 48, 28)], &[(46, 24, 30), (10, 25, 30)], &[(2, 15, 30), (64, 16, 30)]],
    [&[(17, 122, 30), (4, 123, 30)], &[(29, 46, 28), (14, 47, 28)], &[(49, 24, 30), (10, 25, 30)], &[(24, 15, 30), (46, 16, 30)]],
    [&[(4, 122, 30), (18, 123, 30)], &[(13, 46, 28), (32, 47, 28)], &[(48, 24, 30), (14, 25, 30)], &[(42, 15, 30), (32, 16, 30)]],
    [&[(20, 117, 30), (4, 118, 30)], &[(40, 47, 28), (7, 48, 28)], &[(43, 24, 30), (22, 25, 30)], &[(10, 15, 30), (67, 16, 30)]],
    [&[(19, 118, 30), (6, 119, 30)], &[(18, 47, 28), (31, 48, 28)], &[(34, 24, 30), (34, 25, 30)], &[(20, 15, 30), (61, 16, 30)]],
];

static ALIGNMENT_PATTERN_POSITIONS: [&[i16]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

// Format info per ec level (L, M, Q, H) and mask pattern, BCH coded and masked
static FORMAT_INFOS: [[u32; 8]; 4] = [
    [0x77C4, 0x72F3, 0x7DAA, 0x789D, 0x662F, 0x6318, 0x6C41, 0x6976],
    [0x5412, 0x5125, 0x5E7C, 0x5B4B, 0x45F9, 0x40CE, 0x4F97, 0x4AA0],
    [0x355F, 0x3068, 0x3F31, 0x3A06, 0x24B4, 0x2183, 0x2EDA, 0x2BED],
    [0x1689, 0x13BE, 0x1CE7, 0x19D0, 0x0762, 0x0255, 0x0D0C, 0x083B],
];

// Version info for versions 7 to 40
static VERSION_INFOS: [u32; 34] = [
    0x07C94, 0x085BC, 0x09A99, 0x0A4D3, 0x0BBF6, 0x0C762,
    0x0D847, 0x0E60D, 0x0F928, 0x10B78, 0x1145D, 0x12A17,
    0x13532, 0x149A6, 0x15683, 0x168C9, 0x177EC, 0x18EC4,
    0x191E1, 0x1AFAB, 0x1B08E, 0x1CC1A, 0x1D33F, 0x1ED75,
    0x1F250, 0x209D5, 0x216F0, 0x228BA, 0x2379F, 0x24B0B,
    0x2542E, 0x26A64, 0x27541, 0x28C69,
];
