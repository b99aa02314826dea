//! A type that can represent symbols in a context-free grammar. Symbols are distinguished by their
//! IDs, and each ID stands for exactly one name.

pub mod matrix;
pub mod set;
pub mod source;

pub use self::matrix::SymbolBitMatrix;
pub use self::set::SymbolBitSet;
pub use self::source::SymbolSource;

/// The representation of symbol IDs.
pub type SymbolRepr = u32;

/// A common grammar symbol type.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub struct Symbol(SymbolRepr);

impl Symbol {
    /// Cast the symbol's ID to `usize`.
    #[inline]
    pub fn usize(self) -> usize {
        self.0 as usize
    }
}

impl From<SymbolRepr> for Symbol {
    #[inline]
    fn from(id: SymbolRepr) -> Self {
        Symbol(id)
    }
}

impl From<usize> for Symbol {
    #[inline]
    fn from(id: usize) -> Self {
        Symbol(id as SymbolRepr)
    }
}

impl From<Symbol> for usize {
    #[inline]
    fn from(sym: Symbol) -> usize {
        sym.usize()
    }
}
