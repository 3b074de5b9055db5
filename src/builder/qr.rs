use image::{GrayImage, Luma};

use super::placement::ShadowMap;
use super::structure::{draw_format_info, StructureMap};
use crate::common::iter::coord_to_index;
use crate::common::mask::{compute_penalty, MaskPattern, Penalty};
use crate::common::metadata::{Color, ECLevel, Version};
use crate::common::version_db::CapacityTable;

pub const QUIET_ZONE_WIDTH: usize = 4;

// QR symbol
//------------------------------------------------------------------------------

/// A finished symbol: the resolved module matrix along with the version, ec
/// level and mask it was built with, and the penalty that mask scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QR {
    grid: Vec<Color>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: MaskPattern,
    penalty: Penalty,
}

impl QR {
    /// Resolves fixed modules and payload bits into one grid, writes the
    /// format word for `mask` and flips the pending modules the mask selects.
    pub(crate) fn realize(
        structure: &StructureMap,
        shadow: &ShadowMap,
        ecl: ECLevel,
        mask: MaskPattern,
        table: &CapacityTable,
    ) -> Self {
        let w = structure.width();
        debug_assert!(shadow.width() == w, "Shadow map width doesn't match structure map");

        let mut grid = structure
            .grid()
            .iter()
            .zip(shadow.grid())
            .map(|(m, &bit)| m.fixed().unwrap_or(bit))
            .collect::<Vec<_>>();

        draw_format_info(&mut grid, w, table.format_info(ecl, mask));

        for (i, (m, clr)) in structure.grid().iter().zip(grid.iter_mut()).enumerate() {
            if m.is_pending() && mask.is_masked(i / w, i % w) {
                *clr = !*clr;
            }
        }

        let penalty = compute_penalty(&grid, w);
        Self { grid, w, ver: structure.version(), ecl, mask, penalty }
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    pub fn penalty(&self) -> u32 {
        self.penalty.total()
    }

    pub fn penalty_breakdown(&self) -> Penalty {
        self.penalty
    }

    pub fn grid(&self) -> &[Color] {
        &self.grid
    }

    pub fn get(&self, r: i16, c: i16) -> Color {
        self.grid[coord_to_index(self.w, r, c)]
    }

    /// Rows of the module matrix, `true` for dark.
    pub fn to_bits(&self) -> Vec<Vec<bool>> {
        self.grid
            .chunks_exact(self.w)
            .map(|row| row.iter().map(|c| c.is_dark()).collect())
            .collect()
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|c| c.is_dark()).count()
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Version: {}, Ec level: {}, Mask: {}, Penalty: {} }}",
            self.ver,
            self.ecl,
            self.mask,
            self.penalty()
        )
    }
}

#[cfg(test)]
mod qr_util_tests {
    use super::QR;
    use crate::builder::placement::ShadowMap;
    use crate::builder::structure::{Module, StructureMap};
    use crate::common::bit_utils::BitStream;
    use crate::common::mask::MaskPattern;
    use crate::common::metadata::{Color, ECLevel, Version};
    use crate::common::version_db::CapacityTable;

    fn blank_qr(ver: Version, mask: u8) -> (QR, StructureMap) {
        let table = CapacityTable::standard().unwrap();
        let structure = StructureMap::new(ver, &table);
        let payload = BitStream::from(&vec![0; ver.total_codewords()]);
        let shadow = ShadowMap::place(&structure, payload);
        let mask = MaskPattern::new(mask).unwrap();
        (QR::realize(&structure, &shadow, ECLevel::L, mask, &table), structure)
    }

    #[test]
    fn test_fixed_modules_unmasked() {
        let (qr, structure) = blank_qr(Version::new(7).unwrap(), 0);
        let w = qr.width() as i16;
        for r in 0..w {
            for c in 0..w {
                if let Module::Func(clr) | Module::Version(clr) = structure.get(r, c) {
                    assert_eq!(qr.get(r, c), clr, "Module ({r}, {c})");
                }
            }
        }
    }

    #[test]
    fn test_blank_payload_shows_mask() {
        let (qr, structure) = blank_qr(Version::MIN, 1);
        // Mask 1 darkens even rows of an all light payload
        assert_eq!(qr.get(10, 9), Color::Dark);
        assert_eq!(qr.get(11, 9), Color::Light);
        assert!(structure.is_pending(10, 9) && structure.is_pending(11, 9));
    }

    #[test]
    fn test_format_word_and_dark_module() {
        let (qr, _) = blank_qr(Version::MIN, 3);
        // L, mask 3 is 111100010011101
        let main = [(8, 0), (8, 1), (8, 2), (8, 3), (8, 4)].map(|(r, c)| qr.get(r, c).is_dark());
        assert_eq!(main, [true, true, true, true, false]);
        assert_eq!(qr.get(-8, 8), Color::Dark);
    }

    #[test]
    fn test_to_bits() {
        let (qr, _) = blank_qr(Version::MIN, 0);
        let bits = qr.to_bits();
        assert_eq!(bits.len(), 21);
        assert!(bits.iter().all(|row| row.len() == 21));
        assert_eq!(bits.iter().flatten().filter(|&&b| b).count(), qr.count_dark_modules());
        // Top left finder corner
        assert!(bits[0][0] && !bits[1][1] && bits[2][2]);
    }

    #[test]
    fn test_metadata() {
        let (qr, _) = blank_qr(Version::MIN, 5);
        let exp = format!("{{ Version: 1, Ec level: L, Mask: 5, Penalty: {} }}", qr.penalty());
        assert_eq!(qr.metadata(), exp);
    }
}

// Render
//------------------------------------------------------------------------------

impl QR {
    /// Grayscale image with a light quiet zone, each module drawn as a
    /// `module_sz` square.
    pub fn render(&self, module_sz: u32) -> GrayImage {
        let qz_sz = QUIET_ZONE_WIDTH as u32 * module_sz;
        let qr_sz = self.w as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = GrayImage::from_pixel(total_sz, total_sz, Luma([255]));
        for i in qz_sz..qz_sz + qr_sz {
            for j in qz_sz..qz_sz + qr_sz {
                let r = (i - qz_sz) / module_sz;
                let c = (j - qz_sz) / module_sz;
                let clr = self.get(r as i16, c as i16);
                canvas.put_pixel(j, i, Luma([clr.select(255, 0)]));
            }
        }

        canvas
    }

    /// Text rendering for terminals with a dark background: light modules are
    /// drawn as full blocks.
    pub fn to_str(&self, module_sz: usize) -> String {
        let qz_sz = QUIET_ZONE_WIDTH * module_sz;
        let qr_sz = self.w * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = String::with_capacity(total_sz * (total_sz * 3 + 1));
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.push('█');
                    continue;
                }
                let r = ((i - qz_sz) / module_sz) as i16;
                let c = ((j - qz_sz) / module_sz) as i16;
                canvas.push(self.get(r, c).select('█', ' '));
            }
            canvas.push('\n');
        }

        canvas
    }
}

#[cfg(test)]
mod render_tests {
    use image::Luma;

    use crate::builder::QRBuilder;
    use crate::common::metadata::ECLevel;
    use crate::common::version_db::CapacityTable;

    #[test]
    fn test_render_size_and_quiet_zone() {
        let table = CapacityTable::standard().unwrap();
        let qr = QRBuilder::new(b"HELLO").ec_level(ECLevel::L).build(&table).unwrap();
        let img = qr.render(3);
        assert_eq!(img.dimensions(), (87, 87));
        assert_eq!(*img.get_pixel(0, 0), Luma([255]));
        assert_eq!(*img.get_pixel(11, 11), Luma([255]));
        // Top left finder corner spans the first module
        assert_eq!(*img.get_pixel(12, 12), Luma([0]));
        assert_eq!(*img.get_pixel(14, 14), Luma([0]));
    }

    #[test]
    fn test_render_scales_modules() {
        let table = CapacityTable::standard().unwrap();
        let qr = QRBuilder::new(b"HELLO").ec_level(ECLevel::L).build(&table).unwrap();
        let img = qr.render(2);
        let w = qr.width() as i16;
        for r in 0..w {
            for c in 0..w {
                let exp = Luma([qr.get(r, c).select(255, 0)]);
                let (x, y) = (8 + 2 * c as u32, 8 + 2 * r as u32);
                assert_eq!(*img.get_pixel(x, y), exp);
                assert_eq!(*img.get_pixel(x + 1, y + 1), exp);
            }
        }
    }

    #[test]
    fn test_to_str() {
        let table = CapacityTable::standard().unwrap();
        let qr = QRBuilder::new(b"HELLO").ec_level(ECLevel::L).build(&table).unwrap();
        let s = qr.to_str(1);
        let lines = s.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 29);
        assert!(lines.iter().all(|l| l.chars().count() == 29));
        assert!(lines[0].chars().all(|ch| ch == '█'));
        assert!(lines[4].starts_with("████       "));
    }
}
