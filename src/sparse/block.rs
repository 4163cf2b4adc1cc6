use serde::{Deserialize, Serialize};

/// Structural classification of a block matrix.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockMatrixKind {
    /// Blocks may have arbitrary, unrelated structure.
    General,
    /// All blocks share one sparsity structure, as in a system with `nvar` coupled variables
    /// stored block by block.
    GroupMatrix,
}

/// A matrix composed of `nblocks_per_col x nblocks_per_row` blocks, stored row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockMatrix<M> {
    nblocks_per_col: usize,
    nblocks_per_row: usize,
    blocks: Vec<M>,
    kind: BlockMatrixKind,
}

impl<M> BlockMatrix<M> {
    /// Panics if the number of blocks does not match the block dimensions.
    pub fn from_blocks(nblocks_per_col: usize, nblocks_per_row: usize, blocks: Vec<M>, kind: BlockMatrixKind) -> Self {
        assert_eq!(
            blocks.len(),
            nblocks_per_col * nblocks_per_row,
            "Number of blocks must match the block dimensions."
        );
        Self {
            nblocks_per_col,
            nblocks_per_row,
            blocks,
            kind,
        }
    }

    /// A 1x1 block matrix.
    pub fn from_single(block: M) -> Self {
        Self::from_blocks(1, 1, vec![block], BlockMatrixKind::General)
    }

    /// Number of block rows.
    pub fn nblocks_per_col(&self) -> usize {
        self.nblocks_per_col
    }

    /// Number of block columns.
    pub fn nblocks_per_row(&self) -> usize {
        self.nblocks_per_row
    }

    pub fn kind(&self) -> BlockMatrixKind {
        self.kind
    }

    pub fn block(&self, block_row: usize, block_col: usize) -> &M {
        assert!(block_row < self.nblocks_per_col && block_col < self.nblocks_per_row);
        &self.blocks[block_row * self.nblocks_per_row + block_col]
    }

    pub fn blocks(&self) -> &[M] {
        &self.blocks
    }
}

/// A vector composed of consecutive blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockVector<V> {
    blocks: Vec<V>,
}

impl<V> BlockVector<V> {
    pub fn from_blocks(blocks: Vec<V>) -> Self {
        Self { blocks }
    }

    pub fn nblocks(&self) -> usize {
        self.blocks.len()
    }

    pub fn block(&self, index: usize) -> &V {
        &self.blocks[index]
    }

    pub fn blocks(&self) -> &[V] {
        &self.blocks
    }
}
