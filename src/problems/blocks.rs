//! Block-image reconstruction.
//!
//! A grayscale target image is approximated by a tiling of axis-aligned
//! rectangles, each painted with one of eight fixed [`INTENSITIES`]. No
//! block side may drop below the minimum side `k`. The quality is the mean
//! squared error against the target, to be minimized.

use std::fmt;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::{MetaheurError, Result};
use crate::sa::SaProblem;

/// Intensities a block may take.
pub const INTENSITIES: [u8; 8] = [0, 32, 64, 128, 160, 192, 223, 255];

/// One painted rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub row: usize,
    pub col: usize,
    pub height: usize,
    pub width: usize,
    pub value: u8,
}

impl Block {
    fn contains(&self, row: usize, col: usize) -> bool {
        (self.row..self.row + self.height).contains(&row)
            && (self.col..self.col + self.width).contains(&col)
    }

    /// Whether `other` shares this block's rows and touches it left or right.
    fn beside(&self, other: &Block) -> bool {
        self.row == other.row
            && self.height == other.height
            && (other.col + other.width == self.col || self.col + self.width == other.col)
    }

    /// Whether `other` shares this block's columns and touches it above or below.
    fn stacked(&self, other: &Block) -> bool {
        self.col == other.col
            && self.width == other.width
            && (other.row + other.height == self.row || self.row + self.height == other.row)
    }
}

/// A set of blocks covering a `rows x cols` image.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockMatrix {
    blocks: Vec<Block>,
    rows: usize,
    cols: usize,
}

impl BlockMatrix {
    /// Tiles the image with `side x side` blocks of random intensity. The
    /// last block row and column absorb the remainder.
    pub fn tiled<R: Rng>(rows: usize, cols: usize, side: usize, rng: &mut R) -> Result<Self> {
        if side == 0 || side > rows || side > cols {
            return Err(MetaheurError::InvalidInput(format!(
                "block side {side} does not fit a {rows}x{cols} image"
            )));
        }
        Ok(Self::tile(rows, cols, side, rng))
    }

    fn tile<R: Rng>(rows: usize, cols: usize, side: usize, rng: &mut R) -> Self {
        let (row_blocks, col_blocks) = (rows / side, cols / side);
        let mut blocks = Vec::with_capacity(row_blocks * col_blocks);
        for i in 0..row_blocks {
            for j in 0..col_blocks {
                let height = if i + 1 == row_blocks { rows - i * side } else { side };
                let width = if j + 1 == col_blocks { cols - j * side } else { side };
                blocks.push(Block {
                    row: i * side,
                    col: j * side,
                    height,
                    width,
                    value: random_intensity(rng),
                });
            }
        }
        Self { blocks, rows, cols }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Intensity at a cell, if some block covers it.
    pub fn value_at(&self, row: usize, col: usize) -> Option<u8> {
        self.blocks
            .iter()
            .find(|b| b.contains(row, col))
            .map(|b| b.value)
    }

    /// Paints every block into a dense image.
    pub fn render(&self) -> Vec<Vec<u8>> {
        let mut image = vec![vec![0; self.cols]; self.rows];
        for b in &self.blocks {
            for row in &mut image[b.row..b.row + b.height] {
                row[b.col..b.col + b.width].fill(b.value);
            }
        }
        image
    }

    /// Whether every cell is covered by exactly one block.
    pub fn is_tiling(&self) -> bool {
        let mut covered = vec![vec![0u32; self.cols]; self.rows];
        for b in &self.blocks {
            let fits = b.row + b.height <= self.rows && b.col + b.width <= self.cols;
            if b.height == 0 || b.width == 0 || !fits {
                return false;
            }
            for row in &mut covered[b.row..b.row + b.height] {
                for cell in &mut row[b.col..b.col + b.width] {
                    *cell += 1;
                }
            }
        }
        covered.iter().flatten().all(|&c| c == 1)
    }

    /// Smallest block side.
    pub fn min_side(&self) -> usize {
        self.blocks
            .iter()
            .map(|b| b.height.min(b.width))
            .min()
            .unwrap_or(0)
    }
}

impl fmt::Display for BlockMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.render() {
            let line: Vec<String> = row.iter().map(u8::to_string).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

fn random_intensity<R: Rng>(rng: &mut R) -> u8 {
    INTENSITIES[rng.random_range(0..INTENSITIES.len())]
}

/// Approximates a target image with blocks no thinner than `min_side`.
#[derive(Debug, Clone)]
pub struct BlockImageProblem {
    target: Vec<Vec<u8>>,
    rows: usize,
    cols: usize,
    min_side: usize,
}

impl BlockImageProblem {
    /// Validates the target and the minimum side. The image must be at
    /// least `min_side` in both directions.
    pub fn new(target: Vec<Vec<u8>>, min_side: usize) -> Result<Self> {
        let rows = target.len();
        let cols = target.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(MetaheurError::InvalidInput("image is empty".into()));
        }
        if let Some(row) = target.iter().position(|r| r.len() != cols) {
            return Err(MetaheurError::InvalidInput(format!(
                "image row {row} has {} pixels, expected {cols}",
                target[row].len()
            )));
        }
        if min_side == 0 || min_side > rows || min_side > cols {
            return Err(MetaheurError::InvalidInput(format!(
                "minimum block side {min_side} does not fit a {rows}x{cols} image"
            )));
        }
        Ok(Self {
            target,
            rows,
            cols,
            min_side,
        })
    }

    pub fn min_side(&self) -> usize {
        self.min_side
    }

    /// Mean squared error between the target and the painted blocks.
    pub fn mse(&self, matrix: &BlockMatrix) -> f64 {
        let image = matrix.render();
        let total: f64 = self
            .target
            .iter()
            .zip(&image)
            .flat_map(|(t, p)| t.iter().zip(p))
            .map(|(&t, &p)| (f64::from(t) - f64::from(p)).powi(2))
            .sum();
        total / (self.rows * self.cols) as f64
    }

    /// Repaints one random block.
    pub fn intensity_disruption<R: Rng>(&self, mut matrix: BlockMatrix, rng: &mut R) -> BlockMatrix {
        if !matrix.blocks.is_empty() {
            let i = rng.random_range(0..matrix.blocks.len());
            matrix.blocks[i].value = random_intensity(rng);
        }
        matrix
    }

    /// Merges a block wider or taller than the minimum with its first aligned
    /// neighbor, then splits the pair again at a random cut that leaves both
    /// parts at least `min_side` long. Without such a pair a block is
    /// repainted instead.
    pub fn merge_then_split<R: Rng>(&self, mut matrix: BlockMatrix, rng: &mut R) -> BlockMatrix {
        let k = self.min_side;
        let big: Vec<usize> = (0..matrix.blocks.len())
            .filter(|&i| matrix.blocks[i].height > k || matrix.blocks[i].width > k)
            .collect();
        let Some(&b) = big.choose(rng) else {
            return self.intensity_disruption(matrix, rng);
        };

        let target = matrix.blocks[b];
        let neighbor = matrix
            .blocks
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != b)
            .find_map(|(i, other)| {
                if target.beside(other) {
                    Some((i, true))
                } else if target.stacked(other) {
                    Some((i, false))
                } else {
                    None
                }
            });

        match neighbor {
            Some((n, true)) => {
                let (first, second) = self.split(target.width + matrix.blocks[n].width, rng);
                let col = target.col.min(matrix.blocks[n].col);
                matrix.blocks[n].col = col;
                matrix.blocks[n].width = first;
                matrix.blocks[b].col = col + first;
                matrix.blocks[b].width = second;
            }
            Some((n, false)) => {
                let (first, second) = self.split(target.height + matrix.blocks[n].height, rng);
                let row = target.row.min(matrix.blocks[n].row);
                matrix.blocks[n].row = row;
                matrix.blocks[n].height = first;
                matrix.blocks[b].row = row + first;
                matrix.blocks[b].height = second;
            }
            None => matrix.blocks[b].value = random_intensity(rng),
        }
        matrix
    }

    /// Exchanges the intensities of two distinct blocks.
    pub fn block_swap<R: Rng>(&self, mut matrix: BlockMatrix, rng: &mut R) -> BlockMatrix {
        let n = matrix.blocks.len();
        if n < 2 {
            return self.intensity_disruption(matrix, rng);
        }
        let i = rng.random_range(0..n);
        let mut j = rng.random_range(0..n - 1);
        if j >= i {
            j += 1;
        }
        let value = matrix.blocks[i].value;
        matrix.blocks[i].value = matrix.blocks[j].value;
        matrix.blocks[j].value = value;
        matrix
    }

    /// Splits `total` into two lengths of at least `min_side`, handing out
    /// the remainder one cell at a time by coin flip.
    fn split<R: Rng>(&self, total: usize, rng: &mut R) -> (usize, usize) {
        let k = self.min_side;
        let rest = total.saturating_sub(2 * k);
        let first = k + (0..rest).filter(|_| rng.random_bool(0.5)).count();
        (first, total - first)
    }
}

impl SaProblem for BlockImageProblem {
    type Solution = BlockMatrix;

    /// Tiles with blocks one cell longer than the minimum where they fit.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> BlockMatrix {
        let side = (self.min_side + 1).min(self.rows).min(self.cols);
        BlockMatrix::tile(self.rows, self.cols, side, rng)
    }

    fn quality(&self, matrix: &BlockMatrix) -> f64 {
        self.mse(matrix)
    }

    fn tweak<R: Rng>(&self, matrix: BlockMatrix, rng: &mut R) -> BlockMatrix {
        match rng.random_range(0..3) {
            0 => self.intensity_disruption(matrix, rng),
            1 => self.merge_then_split(matrix, rng),
            _ => self.block_swap(matrix, rng),
        }
    }
}
