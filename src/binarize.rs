//! Binarization of rules, the last step towards Chomsky Normal Form.

use std::collections::BTreeMap;

use crate::cfg::{Cfg, CfgRule};
use crate::normalize::Naming;
use crate::symbol::Symbol;

/// Memoizes the nonterminals introduced during binarization.
///
/// Each terminal gets at most one wrapper, and each ordered pair of symbols
/// gets at most one helper. A context is meant for a single invocation of
/// [`Cfg::binarize_with`].
#[derive(Clone, Debug, Default)]
pub struct BinarizeContext {
    naming: Naming,
    wrappers: BTreeMap<Symbol, Symbol>,
    pairs: BTreeMap<(Symbol, Symbol), Symbol>,
    next_helper: usize,
}

impl BinarizeContext {
    /// Creates an empty context with the given naming.
    pub fn new(naming: Naming) -> Self {
        BinarizeContext {
            naming,
            ..Default::default()
        }
    }

    /// Returns the wrapper of a terminal, if one was introduced.
    pub fn wrapper(&self, terminal: Symbol) -> Option<Symbol> {
        self.wrappers.get(&terminal).copied()
    }

    /// Returns the helper for a pair of symbols, if one was introduced.
    pub fn helper(&self, left: Symbol, right: Symbol) -> Option<Symbol> {
        self.pairs.get(&(left, right)).copied()
    }

    /// Returns the number of wrappers introduced so far.
    pub fn num_wrappers(&self) -> usize {
        self.wrappers.len()
    }

    /// Returns the number of helpers introduced so far.
    pub fn num_helpers(&self) -> usize {
        self.pairs.len()
    }

    fn wrap(&mut self, grammar: &mut Cfg, terminal: Symbol) -> Symbol {
        if let Some(wrapper) = self.wrapper(terminal) {
            return wrapper;
        }
        let name = format!("{}{}", self.naming.wrapper_prefix, grammar.name_of(terminal));
        let wrapper = grammar.fresh_sym(name, &self.naming.start_suffix);
        grammar.nonterminal_set_mut().insert(wrapper);
        grammar.rule(wrapper).rhs([terminal]);
        log::trace!("wrapper {} for {}", grammar.name_of(wrapper), grammar.name_of(terminal));
        self.wrappers.insert(terminal, wrapper);
        wrapper
    }

    fn pair(&mut self, grammar: &mut Cfg, left: Symbol, right: Symbol) -> Symbol {
        if let Some(helper) = self.helper(left, right) {
            return helper;
        }
        let name = loop {
            self.next_helper += 1;
            let name = format!("{}{}", self.naming.helper_prefix, self.next_helper);
            if !grammar.is_taken(&name) {
                break name;
            }
        };
        let helper = grammar.sym_source().intern(name);
        grammar.nonterminal_set_mut().insert(helper);
        grammar.rule(helper).rhs([left, right]);
        log::trace!(
            "helper {} for {} {}",
            grammar.name_of(helper),
            grammar.name_of(left),
            grammar.name_of(right)
        );
        self.pairs.insert((left, right), helper);
        helper
    }
}

impl Cfg {
    /// Binarizes the grammar with a fresh context. See [`Cfg::binarize_with`].
    pub fn binarize(&self, naming: &Naming) -> Cfg {
        let mut context = BinarizeContext::new(naming.clone());
        self.binarize_with(&mut context)
    }

    /// Binarizes the grammar. Expects a grammar without unit rules and with
    /// no epsilon rules except for the start symbol.
    ///
    /// Rules with at most one symbol on the RHS pass through. In longer rules,
    /// terminals are replaced with wrappers such as `T_a → a`, then the
    /// leftmost pair of symbols is replaced with a helper such as `H1 → A B`
    /// until two symbols remain.
    pub fn binarize_with(&self, context: &mut BinarizeContext) -> Cfg {
        let mut result = self.with_rules(vec![]);
        for rule in self.rules() {
            if rule.rhs.len() <= 1 {
                result.add_rule(rule.clone());
                continue;
            }
            let mut rhs: Vec<Symbol> = rule
                .rhs
                .iter()
                .map(|&sym| {
                    if self.is_terminal(sym) {
                        context.wrap(&mut result, sym)
                    } else {
                        sym
                    }
                })
                .collect();
            while rhs.len() > 2 {
                let helper = context.pair(&mut result, rhs[0], rhs[1]);
                rhs[0] = helper;
                rhs.remove(1);
            }
            result.add_rule(CfgRule::new(rule.lhs, rhs));
        }
        log::debug!(
            "binarization: {} rules from {}, {} wrappers, {} helpers",
            result.num_rules(),
            self.num_rules(),
            context.num_wrappers(),
            context.num_helpers()
        );
        result
    }
}
