mod placement;
mod qr;
mod structure;

pub use placement::ShadowMap;
pub use qr::{QR, QUIET_ZONE_WIDTH};
pub use structure::{Module, StructureMap};

use std::ops::Deref;

use tracing::{debug, info};

use crate::common::{
    bit_utils::BitStream,
    codec::{encode, encode_with_version},
    ec::{Block, ReedSolomon},
    error::QRResult,
    mask::{apply_best_mask, evaluate_mask, MaskPattern},
    metadata::{ECLevel, Version},
    version_db::{BlockSchema, CapacityTable},
};

/// Configures and builds a byte mode symbol.
///
/// Version and mask are chosen automatically unless forced. The ec level
/// defaults to [`ECLevel::M`].
#[derive(Debug, Clone)]
pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: None, ec_level: ECLevel::M, mask: None }
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        let version = self.version.map_or("None".to_string(), |v| v.to_string());
        let mask = self.mask.map_or("None".to_string(), |m| m.to_string());
        format!("{{ Version: {version}, Ec level: {}, Mask: {mask} }}", self.ec_level)
    }
}

#[cfg(test)]
mod qrbuilder_util_tests {
    use super::QRBuilder;
    use crate::common::{ECLevel, MaskPattern, Version};

    #[test]
    fn test_metadata() {
        let data = "Hello, world!".as_bytes();
        let mut qr_builder = QRBuilder::new(data);
        assert_eq!(qr_builder.metadata(), "{ Version: None, Ec level: M, Mask: None }");
        qr_builder
            .version(Version::MIN)
            .ec_level(ECLevel::L)
            .mask(MaskPattern::new(4).unwrap());
        assert_eq!(qr_builder.metadata(), "{ Version: 1, Ec level: L, Mask: 4 }");
        qr_builder.unset_version().unset_mask();
        assert_eq!(qr_builder.metadata(), "{ Version: None, Ec level: L, Mask: None }");
    }
}

impl QRBuilder<'_> {
    pub fn build(&self, table: &CapacityTable) -> QRResult<QR> {
        debug!(len = self.data.len(), config = %self.metadata(), "Generating QR");

        debug!("Encoding data");
        let (encoded_data, version) = match self.version {
            Some(v) => (encode_with_version(self.data, v, self.ec_level, table)?, v),
            None => encode(self.data, self.ec_level, table)?,
        };

        debug!("Constructing payload with ecc & interleaving");
        let payload = Self::assemble_payload(encoded_data.data(), version, self.ec_level, table);

        debug!("Building structure map");
        let structure = StructureMap::new(version, table);

        debug!("Placing payload");
        let shadow = ShadowMap::place(&structure, payload);

        let qr = match self.mask {
            Some(m) => {
                debug!(mask = *m, "Applying forced mask");
                evaluate_mask(&structure, &shadow, self.ec_level, m, table)
            }
            None => {
                debug!("Finding & applying best mask");
                apply_best_mask(&structure, &shadow, self.ec_level, table)
            }
        };

        info!(
            version = *qr.version(),
            ec_level = %qr.ec_level(),
            mask = *qr.mask(),
            penalty = qr.penalty(),
            dark_modules = qr.count_dark_modules(),
            "QR generated"
        );

        Ok(qr)
    }

    // Data codewords interleaved across blocks, followed by parity codewords
    // interleaved the same way
    pub(crate) fn assemble_payload(
        data: &[u8],
        version: Version,
        ec_level: ECLevel,
        table: &CapacityTable,
    ) -> BitStream {
        let blocks = Self::compute_ecc(data, table.schema(version, ec_level));
        let data_blocks = blocks.iter().map(Block::data).collect::<Vec<_>>();
        let ecc_blocks = blocks.iter().map(Block::ecc).collect::<Vec<_>>();

        let mut payload = BitStream::new(version.total_codewords() << 3);
        payload.extend(&Self::interleave(&data_blocks));
        payload.extend(&Self::interleave(&ecc_blocks));
        payload
    }

    // ECC: Error Correction Codeword generator
    fn compute_ecc(data: &[u8], schema: &[BlockSchema]) -> Vec<Block> {
        let mut blocks = Vec::with_capacity(schema.iter().map(|s| s.blocks).sum());
        let mut rest = data;
        for s in schema {
            let rs = ReedSolomon::new(s.nsym);
            for _ in 0..s.blocks {
                let (head, tail) = rest.split_at(s.data);
                blocks.push(Block::new(head, &rs));
                rest = tail;
            }
        }
        debug_assert!(rest.is_empty(), "Data left over after blockifying: {}", rest.len());
        blocks
    }

    pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
        let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
        let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
        let mut res = Vec::with_capacity(total_size);
        for i in 0..max_block_size {
            for b in blocks {
                if i < b.len() {
                    res.push(b[i]);
                }
            }
        }
        res
    }
}

/// Encodes `data` at the smallest version that fits, picking the mask with the
/// lowest penalty.
pub fn generate(table: &CapacityTable, data: &[u8], ec_level: ECLevel) -> QRResult<QR> {
    QRBuilder::new(data).ec_level(ec_level).build(table)
}
