//! Checks whether a grammar's language is empty.

use crate::cfg::Cfg;
use crate::symbol::SymbolBitSet;

impl Cfg {
    /// Returns the set of symbols that derive at least one finite string of
    /// terminals. Every terminal is in the set, and so is every nonterminal
    /// with a rule whose RHS symbols are all in the set. An epsilon rule
    /// qualifies on its own.
    pub fn derivable_symbols(&self) -> SymbolBitSet {
        let mut derivable = self.terminal_set().clone();
        derivable.union(&self.nulling_symbols());
        self.rhs_closure_for_all(&mut derivable);
        derivable
    }

    /// Checks whether the start symbol derives no terminal string at all.
    pub fn is_language_empty(&self) -> bool {
        !self.derivable_symbols()[self.start()]
    }
}
