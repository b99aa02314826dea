//! Sets of symbols, such as the terminals, nonterminals or nullable symbols of a grammar.

use std::iter;
use std::ops;

use bit_vec::{self, BitVec};

use super::Symbol;

/// A set of symbols in the form of a bit vector.
///
/// The set grows when a symbol beyond its length is inserted. Symbols beyond
/// its length are not in the set.
#[derive(Clone, Debug, Default)]
pub struct SymbolBitSet {
    bit_vec: BitVec,
}

/// An iterator over a symbol set.
pub struct Iter<'a> {
    iter: iter::Enumerate<bit_vec::Iter<'a>>,
}

impl SymbolBitSet {
    /// Constructs an empty `SymbolBitSet`.
    pub fn new() -> Self {
        SymbolBitSet {
            bit_vec: BitVec::new(),
        }
    }

    /// Makes room for `num_syms` symbols.
    pub fn reserve(&mut self, num_syms: usize) {
        if self.bit_vec.len() < num_syms {
            let additional = num_syms - self.bit_vec.len();
            self.bit_vec.grow(additional, false);
        }
    }

    /// Sets the entry for a symbol.
    pub fn set(&mut self, sym: Symbol, elem: bool) {
        if elem {
            self.reserve(sym.usize() + 1);
        } else if sym.usize() >= self.bit_vec.len() {
            return;
        }
        self.bit_vec.set(sym.usize(), elem);
    }

    /// Adds a symbol to the set.
    pub fn insert(&mut self, sym: Symbol) {
        self.set(sym, true);
    }

    /// Removes a symbol from the set.
    pub fn remove(&mut self, sym: Symbol) {
        self.set(sym, false);
    }

    /// Checks whether a given symbol is in this set.
    pub fn contains(&self, sym: Symbol) -> bool {
        self.bit_vec.get(sym.usize()).unwrap_or(false)
    }

    /// Adds all symbols of `other` to this set.
    pub fn union(&mut self, other: &SymbolBitSet) {
        self.reserve(other.bit_vec.len());
        for sym in other.iter() {
            self.insert(sym);
        }
    }

    /// Keeps only the symbols that are also in `other`.
    pub fn intersect(&mut self, other: &SymbolBitSet) {
        let removed: Vec<Symbol> = self.iter().filter(|&sym| !other.contains(sym)).collect();
        for sym in removed {
            self.remove(sym);
        }
    }

    /// Returns the number of symbols in the set.
    pub fn count(&self) -> usize {
        self.bit_vec.iter().filter(|&present| present).count()
    }

    /// Checks whether the set has no symbols.
    pub fn is_empty(&self) -> bool {
        self.bit_vec.none()
    }

    /// Iterates over symbols in the set.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            iter: self.bit_vec.iter().enumerate(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Self::Item> {
        for (id, is_present) in &mut self.iter {
            if is_present {
                return Some(Symbol::from(id));
            }
        }
        None
    }
}

impl FromIterator<Symbol> for SymbolBitSet {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let mut set = SymbolBitSet::new();
        for sym in iter {
            set.insert(sym);
        }
        set
    }
}

impl Extend<Symbol> for SymbolBitSet {
    fn extend<I: IntoIterator<Item = Symbol>>(&mut self, iter: I) {
        for sym in iter {
            self.insert(sym);
        }
    }
}

impl PartialEq for SymbolBitSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for SymbolBitSet {}

static TRUE: bool = true;
static FALSE: bool = false;

impl ops::Index<Symbol> for SymbolBitSet {
    type Output = bool;

    fn index(&self, index: Symbol) -> &Self::Output {
        if self.contains(index) {
            &TRUE
        } else {
            &FALSE
        }
    }
}
