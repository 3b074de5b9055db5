use crate::common::iter::coord_to_index;
use crate::common::metadata::{Color, Version};
use crate::common::version_db::{CapacityTable, FORMAT_INFO_BIT_LEN, VERSION_INFO_BIT_LEN};

// Module
//------------------------------------------------------------------------------

/// A cell of the structure map: either fixed by a function pattern or pending
/// data.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Module {
    Pending,
    Func(Color),
    Format(Color),
    Version(Color),
}

impl Module {
    pub fn is_pending(self) -> bool {
        self == Self::Pending
    }

    pub fn fixed(self) -> Option<Color> {
        match self {
            Self::Pending => None,
            Self::Func(c) | Self::Format(c) | Self::Version(c) => Some(c),
        }
    }
}

// Structure map
//------------------------------------------------------------------------------

/// Template grid of a symbol. Function patterns, the reserved format area and
/// version information are fixed; every other module is pending and forms the
/// encoding region.
#[derive(Debug, Clone)]
pub struct StructureMap {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
}

impl StructureMap {
    pub fn new(ver: Version, table: &CapacityTable) -> Self {
        let map = Self::draw(ver, table);
        debug_assert!(
            map.pending_count() == (ver.total_codewords() << 3) + ver.remainder_bits(),
            "Pending modules don't match encoding region: Pending {}, Version {ver}",
            map.pending_count()
        );
        map
    }

    // Draws every function pattern without checking the resulting encoding
    // region. Alignment positions must lie inside the grid.
    pub(crate) fn draw(ver: Version, table: &CapacityTable) -> Self {
        let mut map = Self::empty(ver);
        map.draw_finder_patterns();
        map.reserve_format_area();
        map.draw_alignment_patterns(table.alignment_pattern(ver));
        map.draw_timing_patterns();
        if let Some(info) = table.version_info(ver) {
            map.draw_version_info(info);
        }
        map
    }

    fn empty(ver: Version) -> Self {
        let w = ver.width();
        Self { grid: vec![Module::Pending; w * w], w, ver }
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn grid(&self) -> &[Module] {
        &self.grid
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[coord_to_index(self.w, r, c)]
    }

    fn set(&mut self, r: i16, c: i16, module: Module) {
        let idx = coord_to_index(self.w, r, c);
        self.grid[idx] = module;
    }

    pub fn is_pending(&self, r: i16, c: i16) -> bool {
        self.get(r, c).is_pending()
    }

    pub fn pending_count(&self) -> usize {
        self.grid.iter().filter(|m| m.is_pending()).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity(self.w * (self.w + 1) + 1);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Pending => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl StructureMap {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Draws the 7x7 finder centered at (r, c) along with its separator
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_top, dr_bottom) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (4 | -4, _) | (_, 4 | -4) => Module::Func(Color::Light),
                        (3 | -3, _) | (_, 3 | -3) => Module::Func(Color::Dark),
                        (2 | -2, _) | (_, 2 | -2) => Module::Func(Color::Light),
                        _ => Module::Func(Color::Dark),
                    },
                );
            }
        }
    }
}

#[cfg(test)]
mod finder_pattern_tests {
    use super::StructureMap;
    use crate::common::metadata::Version;

    #[test]
    fn test_finder_patterns() {
        let mut map = StructureMap::empty(Version::MIN);
        map.draw_finder_patterns();
        assert_eq!(
            map.to_debug_str(),
            "\n\
             fffffffF.....Ffffffff\n\
             fFFFFFfF.....FfFFFFFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFFFFFfF.....FfFFFFFf\n\
             fffffffF.....Ffffffff\n\
             FFFFFFFF.....FFFFFFFF\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             FFFFFFFF.............\n\
             fffffffF.............\n\
             fFFFFFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFFFFFfF.............\n\
             fffffffF.............\n"
        );
    }
}

// Format area
//------------------------------------------------------------------------------

impl StructureMap {
    // Placeholder bits, overwritten per mask candidate
    fn reserve_format_area(&mut self) {
        for &(r, c) in FORMAT_INFO_COORDS_MAIN.iter().chain(FORMAT_INFO_COORDS_SIDE.iter()) {
            self.set(r, c, Module::Format(Color::Light));
        }
        self.set(-8, 8, Module::Format(Color::Dark));
    }
}

/// Writes a 15-bit format word, most significant bit first, into both format
/// strips of a realized grid of width `w`.
pub(crate) fn draw_format_info(grid: &mut [Color], w: usize, format_info: u32) {
    for coords in [&FORMAT_INFO_COORDS_MAIN, &FORMAT_INFO_COORDS_SIDE] {
        for (i, &(r, c)) in coords.iter().enumerate() {
            let bit = (format_info >> (FORMAT_INFO_BIT_LEN - 1 - i)) & 1;
            grid[coord_to_index(w, r, c)] = Color::from(bit == 1);
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl StructureMap {
    fn draw_alignment_patterns(&mut self, poses: &[i16]) {
        for &r in poses {
            for &c in poses {
                self.draw_alignment_pattern_at(r, c)
            }
        }
    }

    // Skipped when the 5x5 area would leave the grid or overlap a fixed module
    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        let w = self.w as i16;
        let in_bounds = |x: i16| x - 2 >= 0 && x + 2 < w;
        if !in_bounds(r) || !in_bounds(c) {
            return;
        }
        let all_pending =
            (-2..=2).all(|i| (-2..=2).all(|j| self.is_pending(r + i, c + j)));
        if !all_pending {
            return;
        }
        for i in -2..=2 {
            for j in -2..=2 {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Module::Func(Color::Dark),
                        _ => Module::Func(Color::Light),
                    },
                )
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl StructureMap {
    fn draw_timing_patterns(&mut self) {
        let w = self.w as i16;
        for i in 0..w {
            let m = if i & 1 == 0 { Module::Func(Color::Dark) } else { Module::Func(Color::Light) };
            if self.is_pending(6, i) {
                self.set(6, i, m);
            }
            if self.is_pending(i, 6) {
                self.set(i, 6, m);
            }
        }
    }
}

#[cfg(test)]
mod timing_pattern_tests {
    use super::StructureMap;
    use crate::common::metadata::Version;

    #[test]
    fn test_timing_pattern_1() {
        let mut map = StructureMap::empty(Version::MIN);
        map.draw_finder_patterns();
        map.draw_timing_patterns();
        assert_eq!(
            map.to_debug_str(),
            "\n\
             fffffffF.....Ffffffff\n\
             fFFFFFfF.....FfFFFFFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFFFFFfF.....FfFFFFFf\n\
             fffffffFfFfFfFfffffff\n\
             FFFFFFFF.....FFFFFFFF\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             FFFFFFFF.............\n\
             fffffffF.............\n\
             fFFFFFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFFFFFfF.............\n\
             fffffffF.............\n"
        );
    }
}

// Version info
//------------------------------------------------------------------------------

impl StructureMap {
    // Bit i, counted from the least significant, lands at (i / 3, w - 11 + i % 3)
    // in the top right block and at the transposed position bottom left
    fn draw_version_info(&mut self, info: u32) {
        let w = self.w as i16;
        for i in 0..VERSION_INFO_BIT_LEN {
            let clr = Color::from((info >> i) & 1 == 1);
            let a = (i / 3) as i16;
            let b = w - 11 + (i % 3) as i16;
            self.set(a, b, Module::Version(clr));
            self.set(b, a, Module::Version(clr));
        }
    }
}


// Global constants
//------------------------------------------------------------------------------

// Format info bit positions, most significant bit first
pub(crate) static FORMAT_INFO_COORDS_MAIN: [(i16, i16); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

pub(crate) static FORMAT_INFO_COORDS_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];
