//! relang: manipulate the three principal representations of regular
//! languages — deterministic finite automata, nondeterministic finite
//! automata (with or without ε-transitions), and right-linear grammars —
//! plus an extended regular-expression surface.
//!
//! The regex surface supports the postfix operators `*`, `+` and `?`, the
//! σ-closure operator `:` (`x:y` denotes `x(yx)*`), alternation `|`,
//! implicit concatenation, parentheses, `&` for ε, and `\` as a
//! one-character literal escape.
//!
//! ```
//! use relang::regexp::{parse_str, thompson};
//!
//! let tree = parse_str("01*|1").unwrap();
//! let nfae = thompson(&tree).unwrap();
//! let dfa = nfae.to_dfa().compact(0).unwrap().minimize().unwrap();
//! assert!(dfa.accepts(&['0', '1', '1']));
//! assert!(!dfa.accepts(&['1', '0']));
//! ```
//!
//! All state sets, alphabets, and transition tables iterate in key order,
//! so every derived construction is deterministic given the same inputs.
//! The library takes no locks, keeps no global state, and neither logs nor
//! prints; failures surface only as [`RelangError`].

use std::fmt;

pub mod automaton;
mod conversion;
mod function;
pub mod grammar;
pub mod regexp;
mod tree;

#[cfg(test)]
mod tests;

pub use automaton::{
    acceptance_list, complement, difference, fresh_state, fresh_state_avoiding, intersection,
    reverse, simultaneous_run, union, Dfa, EpsilonNfa, FreshState, Input, Nfa, Tuples,
};
pub use function::PartialFn;
pub use grammar::{Grammar, GrammarSymbol, Production};
pub use regexp::{de_simone, parse_str, thompson, ExprValue, Operator, Paren, Token};
pub use tree::{ExprTree, NodeId, ThreadedTree};

/// Errors reported by the library.
///
/// Nothing is retried and no partial state is exposed: any failure aborts
/// the operation and surfaces here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelangError {
    /// Malformed regex: unbalanced parentheses, misplaced operator,
    /// missing operand.
    Syntax(String),
    /// A symbolic value was narrowed to the wrong variant.
    WrongTag,
    /// A partial function was applied outside its domain.
    OutOfDomain,
    /// A rewrite or traversal encountered an operator it does not handle.
    ExtraneousOperator,
}

impl fmt::Display for RelangError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelangError::Syntax(msg) => write!(f, "malformed regex: {}", msg),
            RelangError::WrongTag => write!(f, "symbolic value narrowed to the wrong variant"),
            RelangError::OutOfDomain => write!(f, "element is not in domain of function"),
            RelangError::ExtraneousOperator => write!(f, "extraneous operator found"),
        }
    }
}

impl std::error::Error for RelangError {}
