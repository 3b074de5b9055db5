use std::fmt::{Display, Formatter};
use std::ops::Deref;

use tracing::trace;

use super::error::{QRError, QRResult};
use super::metadata::{Color, ECLevel};
use super::version_db::CapacityTable;
use crate::builder::{ShadowMap, StructureMap, QR};

// Mask pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern < 8 {
            Ok(Self(pattern))
        } else {
            Err(QRError::InvalidMaskingPattern)
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).map(Self)
    }

    /// Whether the module at row `r`, column `c` is flipped by this mask.
    pub fn is_masked(self, r: usize, c: usize) -> bool {
        let (i, j) = (r, c);
        match self.0 {
            0b000 => (i + j) & 1 == 0,
            0b001 => i & 1 == 0,
            0b010 => j % 3 == 0,
            0b011 => (i + j) % 3 == 0,
            0b100 => ((i >> 1) + (j / 3)) & 1 == 0,
            0b101 => (i * j) % 2 + (i * j) % 3 == 0,
            0b110 => ((i * j) % 3 + i * j) & 1 == 0,
            0b111 => ((i + j) % 3 + i + j) & 1 == 0,
            _ => unreachable!("Invalid masking pattern"),
        }
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for MaskPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}


// Mask selection
//------------------------------------------------------------------------------

/// Realizes and scores the symbol under a single mask.
pub fn evaluate_mask(
    structure: &StructureMap,
    shadow: &ShadowMap,
    ecl: ECLevel,
    mask: MaskPattern,
    table: &CapacityTable,
) -> QR {
    let qr = QR::realize(structure, shadow, ecl, mask, table);
    let pen = qr.penalty_breakdown();
    trace!(
        mask = *mask,
        adjacent = pen.adjacent,
        block = pen.block,
        finder = pen.finder,
        balance = pen.balance,
        total = pen.total(),
        "Evaluated mask"
    );
    qr
}

/// Tries all masks in ascending order and keeps the first with the lowest
/// penalty.
pub fn apply_best_mask(
    structure: &StructureMap,
    shadow: &ShadowMap,
    ecl: ECLevel,
    table: &CapacityTable,
) -> QR {
    let first = evaluate_mask(structure, shadow, ecl, MaskPattern(0), table);
    MaskPattern::all().skip(1).fold(first, |best, mask| {
        let qr = evaluate_mask(structure, shadow, ecl, mask, table);
        if qr.penalty() < best.penalty() {
            qr
        } else {
            best
        }
    })
}


// Penalty
//------------------------------------------------------------------------------

/// Penalty score of a realized grid, broken down by rule.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Hash)]
pub struct Penalty {
    pub adjacent: u32,
    pub block: u32,
    pub finder: u32,
    pub balance: u32,
}

impl Penalty {
    pub fn total(&self) -> u32 {
        self.adjacent + self.block + self.finder + self.balance
    }
}

/// Scores a square row-major grid of width `w` with the four penalty rules.
pub fn compute_penalty(grid: &[Color], w: usize) -> Penalty {
    debug_assert!(grid.len() == w * w, "Grid isn't square: Len {}, Width {w}", grid.len());

    Penalty {
        adjacent: compute_adjacent_penalty(grid, w),
        block: compute_block_penalty(grid, w),
        finder: compute_finder_pattern_penalty(grid, w, true)
            + compute_finder_pattern_penalty(grid, w, false),
        balance: compute_balance_penalty(grid),
    }
}

// Runs of 5 or more same colored modules in a row or column add len - 2
fn compute_adjacent_penalty(grid: &[Color], w: usize) -> u32 {
    let mut pen = 0;
    let mut cols = vec![(Color::Dark, 0u32); w];
    for r in 0..w {
        let mut last = Color::Dark;
        let mut consec_row_len = 0u32;
        for (c, col) in cols.iter_mut().enumerate() {
            let clr = grid[r * w + c];
            if last != clr {
                last = clr;
                consec_row_len = 0;
            }
            consec_row_len += 1;
            pen += run_penalty(consec_row_len);

            if col.0 != clr {
                col.0 = clr;
                col.1 = 0;
            }
            col.1 += 1;
            pen += run_penalty(col.1);
        }
    }
    pen
}

// Incremental contribution of a run reaching length `len`
fn run_penalty(len: u32) -> u32 {
    match len {
        0..=4 => 0,
        5 => 3,
        _ => 1,
    }
}

// Every uniform 2x2 window adds 3
fn compute_block_penalty(grid: &[Color], w: usize) -> u32 {
    let mut pen = 0;
    for r in 0..w.saturating_sub(1) {
        for c in 0..w - 1 {
            let clr = grid[r * w + c];
            if clr == grid[(r + 1) * w + c]
                && clr == grid[r * w + c + 1]
                && clr == grid[(r + 1) * w + c + 1]
            {
                pen += 3;
            }
        }
    }
    pen
}

const FINDER_PATTERN: [bool; 11] =
    [false, false, false, false, true, false, true, true, true, false, true];

// Light modules left in each line once non-overlapping left to right matches
// of the finder-like pattern or its reverse are cut out, one point each
fn compute_finder_pattern_penalty(grid: &[Color], w: usize, is_hor: bool) -> u32 {
    let len = FINDER_PATTERN.len();
    let mut pen = 0;
    for i in 0..w {
        let get = |k: usize| {
            let idx = if is_hor { i * w + k } else { k * w + i };
            grid[idx].is_dark()
        };
        let mut j = 0;
        while j < w {
            let fits = j + len <= w;
            let fwd = fits && (0..len).all(|k| get(j + k) == FINDER_PATTERN[k]);
            let rev = fits && (0..len).all(|k| get(j + k) == FINDER_PATTERN[len - 1 - k]);
            if fwd || rev {
                j += len;
                continue;
            }
            if !get(j) {
                pen += 1;
            }
            j += 1;
        }
    }
    pen
}

// Deviation of the dark ratio from 50%, in whole steps of 5%
fn compute_balance_penalty(grid: &[Color]) -> u32 {
    if grid.is_empty() {
        return 0;
    }
    let dark_cnt = grid.iter().filter(|c| c.is_dark()).count();
    let ratio = dark_cnt * 100 / grid.len();
    let rounded = ratio - ratio % 5;
    (rounded.abs_diff(50) / 5 * 10) as u32
}

#[cfg(test)]
mod penalty_tests {
    use test_case::test_case;

    use super::{
        compute_adjacent_penalty, compute_balance_penalty, compute_block_penalty,
        compute_finder_pattern_penalty, compute_penalty, Penalty,
    };
    use crate::common::metadata::Color;

    fn parse(rows: &[&str]) -> (Vec<Color>, usize) {
        let w = rows.len();
        let grid = rows
            .iter()
            .flat_map(|r| {
                assert_eq!(r.len(), w);
                r.chars().map(|ch| Color::from(ch == '#'))
            })
            .collect();
        (grid, w)
    }

    fn checkerboard(w: usize) -> Vec<Color> {
        (0..w * w).map(|i| Color::from((i / w + i % w) & 1 == 0)).collect()
    }

    #[test_case(5, 3)]
    #[test_case(6, 4)]
    #[test_case(7, 5)]
    #[test_case(4, 0)]
    fn test_adjacent_penalty_single_run(run: usize, exp: u32) {
        let w = 11;
        let mut grid = checkerboard(w);
        assert_eq!(compute_adjacent_penalty(&grid, w), 0);
        // Row 0: a dark run followed by a differing module
        for (c, m) in grid.iter_mut().take(w).enumerate() {
            *m = Color::from(c < run || (c > run && (c - run) % 2 == 0));
        }
        assert_eq!(compute_adjacent_penalty(&grid, w), exp);
    }

    #[test]
    fn test_adjacent_penalty_row_and_column() {
        let (grid, w) = parse(&["#####", ".#.#.", "#.#.#", ".#.#.", "#.#.#"]);
        // Row 0 contributes 3, column 0 alternates from row 1 on
        assert_eq!(compute_adjacent_penalty(&grid, w), 3);
        let (grid, w) = parse(&["#.#.#", "#.#.#", "#.#.#", "#.#.#", "#.#.#"]);
        // Every column is a uniform run of 5
        assert_eq!(compute_adjacent_penalty(&grid, w), 15);
    }

    #[test]
    fn test_block_penalty() {
        let (grid, w) = parse(&["###.", "###.", "###.", "...#"]);
        // Uniform 3x3 block has four overlapping windows
        assert_eq!(compute_block_penalty(&grid, w), 12);
        let (grid, w) = parse(&["#.", ".#"]);
        assert_eq!(compute_block_penalty(&grid, w), 0);
    }

    fn light_grid(w: usize) -> Vec<String> {
        (0..w).map(|_| ".".repeat(w)).collect()
    }

    #[test]
    fn test_finder_pattern_penalty_all_light() {
        let rows = light_grid(11);
        let rows = rows.iter().map(String::as_str).collect::<Vec<_>>();
        let (grid, w) = parse(&rows);
        assert_eq!(compute_finder_pattern_penalty(&grid, w, true), 121);
        assert_eq!(compute_finder_pattern_penalty(&grid, w, false), 121);
        assert_eq!(compute_penalty(&grid, w).finder, 242);
    }

    #[test]
    fn test_finder_pattern_penalty() {
        let mut rows = light_grid(11);
        rows[0] = "....#.###.#".to_string();
        rows[1] = "#.###.#....".to_string();
        let rows = rows.iter().map(String::as_str).collect::<Vec<_>>();
        let (grid, w) = parse(&rows);
        // Both matched rows are cut out entirely, leaving 9 light rows
        assert_eq!(compute_finder_pattern_penalty(&grid, w, true), 99);
        // No column matches, so every light module counts
        assert_eq!(compute_finder_pattern_penalty(&grid, w, false), 111);
    }

    #[test]
    fn test_finder_pattern_non_overlapping() {
        // Second match would reuse the trailing modules of the first
        let mut rows = light_grid(21);
        rows[0] = "....#.###.#.###.#....".to_string();
        let rows = rows.iter().map(String::as_str).collect::<Vec<_>>();
        let (grid, w) = parse(&rows);
        // ".###.#...." is left over from row 0
        assert_eq!(compute_finder_pattern_penalty(&grid, w, true), 6 + 20 * 21);
    }

    #[test]
    fn test_finder_pattern_mid_line() {
        let mut rows = vec!["#".repeat(16); 16];
        // Reversed pattern starting at column 3
        rows[0] = "...#.###.#......".to_string();
        let rows = rows.iter().map(String::as_str).collect::<Vec<_>>();
        let (grid, w) = parse(&rows);
        assert_eq!(compute_finder_pattern_penalty(&grid, w, true), 5);
        assert_eq!(compute_finder_pattern_penalty(&grid, w, false), 11);
    }

    #[test_case(50, 0)]
    #[test_case(0, 100)]
    #[test_case(100, 100)]
    #[test_case(47, 10)]
    #[test_case(54, 0)]
    #[test_case(55, 10)]
    fn test_balance_penalty(dark_percent: usize, exp: u32) {
        let grid = (0..100).map(|i| Color::from(i < dark_percent)).collect::<Vec<_>>();
        assert_eq!(compute_balance_penalty(&grid), exp);
    }

    #[test]
    fn test_penalty_total() {
        let (grid, w) = parse(&["#####", "#####", "#####", "#####", "#####"]);
        let pen = compute_penalty(&grid, w);
        assert_eq!(pen, Penalty { adjacent: 30, block: 48, finder: 0, balance: 100 });
        assert_eq!(pen.total(), 178);
    }

    #[test]
    fn test_penalty_deterministic() {
        let w = 21;
        let grid = (0..w * w).map(|i| Color::from((i * 7 + i / 3) % 5 < 2)).collect::<Vec<_>>();
        assert_eq!(compute_penalty(&grid, w), compute_penalty(&grid, w));
    }
}
