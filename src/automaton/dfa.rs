//! Deterministic finite automata.

use std::collections::BTreeSet;

use crate::automaton::fresh::{fresh_state, FreshState};
use crate::function::PartialFn;

/// A deterministic finite automaton `M = (Q, Σ, δ, q₀, F)`.
///
/// δ is a partial function; a missing transition means the run dies and
/// the word is rejected. The automaton is *compact* when
/// `Q = {offset, …, offset+|Q|−1}` and `q₀ = offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa<Q, S> {
    pub states: BTreeSet<Q>,
    pub alphabet: BTreeSet<S>,
    pub delta: PartialFn<(Q, S), Q>,
    pub initial_state: Q,
    pub final_states: BTreeSet<Q>,
}

impl<Q: Ord + Clone, S: Ord + Clone> Dfa<Q, S> {
    /// Decide whether the automaton accepts `word`.
    ///
    /// Follows δ from `q₀`; the first missing transition rejects.
    pub fn accepts(&self, word: &[S]) -> bool {
        let mut q = self.initial_state.clone();
        for a in word {
            match self.delta.apply(&(q.clone(), a.clone())) {
                Ok(next) => q = next.clone(),
                Err(_) => return false,
            }
        }
        self.final_states.contains(&q)
    }

    /// Remove a state together with its finality and outgoing transitions.
    ///
    /// The initial state must not be removed through this; callers that
    /// strip dead states keep `initial_state` as a dangling label instead.
    pub fn remove_state(&mut self, q: &Q) {
        if self.states.remove(q) {
            self.final_states.remove(q);
            for a in self.alphabet.clone() {
                self.delta.remove(&(q.clone(), a));
            }
        }
    }

    /// Complete δ: every missing `(q, a)` is routed to a single fresh
    /// non-final sink state that loops to itself on every symbol.
    pub fn complete(mut self) -> Dfa<Q, S>
    where
        Q: FreshState,
    {
        let sink = fresh_state(&self.states);
        let mut need_sink = false;

        for q in self.states.clone() {
            for a in self.alphabet.clone() {
                if !self.delta.on_domain(&(q.clone(), a.clone())) {
                    self.delta.insert((q.clone(), a), sink.clone());
                    need_sink = true;
                }
            }
        }

        if need_sink {
            self.states.insert(sink.clone());
            for a in self.alphabet.clone() {
                self.delta.insert((sink.clone(), a), sink.clone());
            }
        }
        self
    }
}
