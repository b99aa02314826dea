//! Relations between symbols, `R(A, B)`, in the form of bit matrices.

use std::ops::{self, Deref, DerefMut};

use bit_matrix::BitMatrix;

use super::{Symbol, SymbolBitSet};

/// A matrix that represents a relation `R(A, B)` between two symbols.
#[derive(Debug)]
pub struct SymbolBitMatrix {
    bit_matrix: BitMatrix,
}

impl SymbolBitMatrix {
    /// Creates the empty matrix of size `num_syms` x `num_syms`.
    pub fn new(num_syms: usize) -> Self {
        SymbolBitMatrix {
            bit_matrix: BitMatrix::new(num_syms, num_syms),
        }
    }

    /// Includes or excludes the pair `(row, col)` from the relation.
    pub fn set(&mut self, row: Symbol, col: Symbol, included: bool) {
        self.bit_matrix.set(row.usize(), col.usize(), included);
    }

    /// Creates an iterator over symbols which appear in the given row.
    pub fn iter_row_syms(&self, row: Symbol) -> impl Iterator<Item = Symbol> + '_ {
        self.bit_matrix
            .iter_row(row.usize())
            .enumerate()
            .filter_map(|(i, present)| if present { Some(Symbol::from(i)) } else { None })
    }

    /// Collects the given row into a symbol set.
    pub fn row_set(&self, row: Symbol) -> SymbolBitSet {
        self.iter_row_syms(row).collect()
    }
}

impl Deref for SymbolBitMatrix {
    type Target = BitMatrix;
    fn deref(&self) -> &Self::Target {
        &self.bit_matrix
    }
}

impl DerefMut for SymbolBitMatrix {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.bit_matrix
    }
}

static TRUE: bool = true;
static FALSE: bool = false;

impl ops::Index<(Symbol, Symbol)> for SymbolBitMatrix {
    type Output = bool;
    fn index(&self, index: (Symbol, Symbol)) -> &Self::Output {
        if self.bit_matrix[(index.0.usize(), index.1.usize())] {
            &TRUE
        } else {
            &FALSE
        }
    }
}
