//! Elimination of epsilon rules.

use std::collections::BTreeSet;

use crate::cfg::{Cfg, CfgRule};
use crate::normalize::Naming;
use crate::symbol::{Symbol, SymbolBitSet};

impl Cfg {
    /// Returns the set of nonterminals that derive the empty string.
    pub fn nullable_symbols(&self) -> SymbolBitSet {
        let mut nullable = self.nulling_symbols();
        self.rhs_closure_for_all(&mut nullable);
        nullable
    }

    /// Removes all epsilon rules while keeping the language, except that the
    /// empty string is derived only by the start symbol.
    ///
    /// Every rule with nullable symbols on its RHS is expanded into one rule
    /// per way of leaving out some of them. When the start symbol is
    /// nullable, a fresh start symbol is introduced with the rules
    /// `start′ → start` and `start′ → ε`.
    pub fn eliminate_nulling_rules(&self, naming: &Naming) -> Cfg {
        let nullable = self.nullable_symbols();

        let mut seen = BTreeSet::new();
        let mut rules = vec![];
        for rule in self.rules().filter(|rule| !rule.is_nulling()) {
            for rhs in rhs_variants(&rule.rhs, &nullable) {
                let new_rule = CfgRule::new(rule.lhs, rhs);
                if seen.insert(new_rule.clone()) {
                    rules.push(new_rule);
                }
            }
        }
        let mut result = self.with_rules(rules);

        if nullable[self.start()] {
            let start_name = format!("{}{}", self.name_of(self.start()), naming.start_suffix);
            let new_start = self.fresh_sym(start_name, &naming.start_suffix);
            log::trace!("new start symbol {}", self.name_of(new_start));
            result.set_start(new_start);
            result.rule(new_start).rhs([self.start()]).rhs([]);
        }

        // Nonterminals that only had epsilon rules are now unproductive.
        let result = result.remove_unproductive();
        log::debug!(
            "nulling: {} rules left of {}, {} nullable symbols",
            result.num_rules(),
            self.num_rules(),
            nullable.count()
        );
        result
    }
}

/// Returns every non-empty RHS that results from removing some of the
/// nullable symbols, starting with the original RHS.
fn rhs_variants(rhs: &[Symbol], nullable: &SymbolBitSet) -> Vec<Vec<Symbol>> {
    let mut variants = vec![vec![]];
    for &sym in rhs {
        if nullable[sym] {
            let without = variants.clone();
            for variant in &mut variants {
                variant.push(sym);
            }
            variants.extend(without);
        } else {
            for variant in &mut variants {
                variant.push(sym);
            }
        }
    }
    variants.retain(|variant| !variant.is_empty());
    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_of_two_nullable_symbols() {
        let [a, b, c] = [0usize, 1, 2].map(Symbol::from);
        let nullable: SymbolBitSet = [a, c].into_iter().collect();
        assert_eq!(
            rhs_variants(&[a, b, c], &nullable),
            vec![vec![a, b, c], vec![b, c], vec![a, b], vec![b]]
        );
        let nullable: SymbolBitSet = [a].into_iter().collect();
        assert_eq!(rhs_variants(&[a], &nullable), vec![vec![a]]);
    }
}
