//! Indexes rules by the symbols that occur in them.

use std::collections::BTreeMap;

use crate::cfg::CfgRule;
use crate::symbol::Symbol;

type RuleIndex = usize;

/// Maps every symbol to the rules it occurs in.
pub struct OccurenceMap {
    occurences: BTreeMap<Symbol, Occurences>,
    empty_occurences: Occurences,
}

/// Two `Vec`s of rule indices.
#[derive(Clone, Default)]
pub struct Occurences {
    lhs: Vec<RuleIndex>,
    rhs: Vec<RuleIndex>,
}

impl OccurenceMap {
    /// Indexes the given rules. Rule indices follow the iteration order.
    pub fn from_rules<'a>(rules: impl Iterator<Item = &'a CfgRule>) -> Self {
        let mut occurences: BTreeMap<Symbol, Occurences> = BTreeMap::new();
        for (i, rule) in rules.enumerate() {
            occurences.entry(rule.lhs).or_default().lhs.push(i);
            let mut rhs_syms = rule.rhs.to_vec();
            rhs_syms.sort();
            rhs_syms.dedup();
            for rhs_sym in rhs_syms {
                occurences.entry(rhs_sym).or_default().rhs.push(i);
            }
        }
        OccurenceMap {
            occurences,
            empty_occurences: Occurences::default(),
        }
    }

    /// Returns the occurences of a symbol. A symbol that occurs nowhere has
    /// empty occurences.
    pub fn get(&self, sym: Symbol) -> &Occurences {
        self.occurences.get(&sym).unwrap_or(&self.empty_occurences)
    }
}

impl Occurences {
    /// Indices of rules with the symbol on the LHS.
    pub fn lhs(&self) -> &[RuleIndex] {
        &self.lhs[..]
    }

    /// Indices of rules with the symbol on the RHS, each listed once.
    pub fn rhs(&self) -> &[RuleIndex] {
        &self.rhs[..]
    }
}
