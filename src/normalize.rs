//! The normalization pipeline.

use crate::cfg::Cfg;
use crate::error::GrammarError;

/// Names for the nonterminals introduced during normalization.
///
/// A name that is already taken gets the start suffix appended until it is
/// free, except for helpers, which skip to the next number.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Naming {
    /// Appended to the start symbol's name to name a new start symbol.
    pub start_suffix: String,
    /// Prepended to a terminal's name to name its wrapper.
    pub wrapper_prefix: String,
    /// Prepended to a counter to name helpers for pairs of symbols.
    pub helper_prefix: String,
}

impl Default for Naming {
    fn default() -> Self {
        Naming {
            start_suffix: "'".to_string(),
            wrapper_prefix: "T_".to_string(),
            helper_prefix: "H".to_string(),
        }
    }
}

/// Brings grammars into Chomsky Normal Form.
#[derive(Clone, Debug, Default)]
pub struct Normalizer {
    naming: Naming,
}

/// Snapshots taken after each transformation.
#[derive(Clone, Debug)]
pub struct Stages {
    /// Only productive symbols remain.
    pub productive: Cfg,
    /// Only reachable symbols remain.
    pub reachable: Cfg,
    /// Epsilon rules are gone, except for the start symbol's.
    pub epsilon_free: Cfg,
    /// Unit rules are gone.
    pub unit_free: Cfg,
    /// The grammar in Chomsky Normal Form, without useless rules,
    /// sorted and deduplicated.
    pub cnf: Cfg,
}

/// The outcome of normalization.
#[derive(Clone, Debug)]
pub enum Normalized {
    /// The grammar in Chomsky Normal Form, with intermediate snapshots.
    Cnf(Stages),
    /// The start symbol derives no terminal string.
    EmptyLanguage,
}

impl Normalizer {
    /// Creates a normalizer with the default naming.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the naming for introduced nonterminals.
    pub fn naming(mut self, naming: Naming) -> Self {
        self.naming = naming;
        self
    }

    /// Sets the suffix for new start symbols.
    pub fn start_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.naming.start_suffix = suffix.into();
        self
    }

    /// Sets the prefix for wrappers of terminals.
    pub fn wrapper_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.naming.wrapper_prefix = prefix.into();
        self
    }

    /// Sets the prefix for helpers.
    pub fn helper_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.naming.helper_prefix = prefix.into();
        self
    }

    /// Runs every transformation in order. Returns `EmptyLanguage` before
    /// rewriting anything when the start symbol derives no terminal string.
    pub fn normalize(&self, grammar: &Cfg) -> Result<Normalized, GrammarError> {
        grammar.validate()?;
        if grammar.is_language_empty() {
            log::info!(
                "the language of `{}` is empty",
                grammar.name_of(grammar.start())
            );
            return Ok(Normalized::EmptyLanguage);
        }
        let productive = grammar.remove_unproductive();
        let reachable = productive.remove_unreachable();
        let epsilon_free = reachable.eliminate_nulling_rules(&self.naming);
        let unit_free = epsilon_free.eliminate_unit_rules();
        let mut cnf = unit_free.binarize(&self.naming).remove_useless();
        cnf.sort();
        cnf.dedup();
        log::debug!(
            "normalized `{}`: {} rules in, {} rules out",
            grammar.name_of(grammar.start()),
            grammar.num_rules(),
            cnf.num_rules()
        );
        Ok(Normalized::Cnf(Stages {
            productive,
            reachable,
            epsilon_free,
            unit_free,
            cnf,
        }))
    }
}

impl Normalized {
    /// Returns the grammar in Chomsky Normal Form, unless the language is empty.
    pub fn grammar(&self) -> Option<&Cfg> {
        self.stages().map(|stages| &stages.cnf)
    }

    /// Returns all snapshots, unless the language is empty.
    pub fn stages(&self) -> Option<&Stages> {
        match self {
            Normalized::Cnf(stages) => Some(stages),
            Normalized::EmptyLanguage => None,
        }
    }

    /// Checks whether the language is empty.
    pub fn is_empty_language(&self) -> bool {
        matches!(self, Normalized::EmptyLanguage)
    }
}

impl Cfg {
    /// Brings the grammar into Chomsky Normal Form with the default naming.
    pub fn normalize(&self) -> Result<Normalized, GrammarError> {
        Normalizer::new().normalize(self)
    }
}
