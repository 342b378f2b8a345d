//! Finite automata: the three δ variants, the state generator, and every
//! DFA reduction and decision procedure.
//!
//! The three automaton kinds share their shape — alphabet, state set,
//! initial state, final set — and differ only in the codomain of δ:
//! a single state for [`Dfa`], a state set for [`Nfa`], and a state set
//! keyed by `Σ ⊎ {ε}` for [`EpsilonNfa`].

mod acceptance;
mod closure;
mod compaction;
mod decision;
mod dfa;
mod epsilon_nfa;
mod fresh;
mod minimization;
mod nfa;

pub use acceptance::{acceptance_list, Tuples};
pub use closure::{complement, difference, intersection, reverse, simultaneous_run, union};
pub use dfa::Dfa;
pub use epsilon_nfa::{EpsilonNfa, Input};
pub use fresh::{fresh_state, fresh_state_avoiding, FreshState};
pub use nfa::Nfa;
