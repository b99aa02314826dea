//! Library for bringing context-free grammars into Chomsky Normal Form.
//!
//! A grammar goes through a fixed sequence of transformations, each taking a
//! [`Cfg`] snapshot and returning a new one: removal of unproductive and
//! unreachable symbols, elimination of epsilon rules, elimination of unit
//! rules, and binarization. See [`Normalizer`].
//!
//! ```
//! use cfg_cnf::{Cfg, Normalized};
//!
//! let grammar = Cfg::load("S ::= a S b | ε").unwrap();
//! let normalized = grammar.normalize().unwrap();
//! assert!(matches!(normalized, Normalized::Cnf(_)));
//! ```

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(missing_docs)]
#![cfg_attr(test, allow(missing_docs))]

pub mod binarize;
pub mod cfg;
pub mod description;
pub mod emptiness;
pub mod error;
pub mod load;
pub mod normalize;
pub mod nulling;
pub mod occurence_map;
pub mod rule_builder;
pub mod symbol;
pub mod unit;
pub mod usefulness;

pub use crate::binarize::BinarizeContext;
pub use crate::cfg::{Cfg, CfgRule, NamedCfgRule};
pub use crate::description::{GrammarDescription, RuleDescription};
pub use crate::error::{Error, GrammarError, LoadError};
pub use crate::load::Token;
pub use crate::normalize::{Naming, Normalized, Normalizer, Stages};
pub use crate::rule_builder::RuleBuilder;
pub use crate::symbol::{Symbol, SymbolBitMatrix, SymbolBitSet, SymbolSource};
pub use crate::usefulness::Usefulness;

/// The reserved token for the empty string in textual grammars.
pub const EPSILON: &str = "ε";
