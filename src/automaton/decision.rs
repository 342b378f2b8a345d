//! Decision procedures on regular languages represented as DFAs.

use std::collections::BTreeSet;

use crate::automaton::closure::{complement, difference, intersection};
use crate::automaton::fresh::FreshState;
use crate::automaton::Dfa;
use crate::RelangError;

impl<Q: Ord + Clone, S: Ord + Clone> Dfa<Q, S> {
    /// `true` iff the automaton accepts no word at all.
    pub fn is_empty(&self) -> Result<bool, RelangError> {
        Ok(self.compact(0)?.minimize()?.final_states.is_empty())
    }

    /// `true` iff the language is infinite: after dead-state removal,
    /// some reachable state lies on a directed cycle.
    pub fn is_infinite(&self) -> bool {
        let dfa = self.clone().remove_dead();
        if !dfa.states.contains(&dfa.initial_state) {
            return false;
        }

        // Iterative DFS; a back edge into the grey (on-path) set is a
        // cycle.
        let mut grey = BTreeSet::new();
        let mut black = BTreeSet::new();
        let mut stack = vec![(dfa.initial_state.clone(), false)];

        while let Some((q, leaving)) = stack.pop() {
            if leaving {
                grey.remove(&q);
                black.insert(q);
                continue;
            }
            if black.contains(&q) || grey.contains(&q) {
                continue;
            }
            grey.insert(q.clone());
            stack.push((q.clone(), true));
            for a in &dfa.alphabet {
                if let Ok(r) = dfa.delta.apply(&(q.clone(), a.clone())) {
                    if grey.contains(r) {
                        return true;
                    }
                    if !black.contains(r) {
                        stack.push((r.clone(), false));
                    }
                }
            }
        }
        false
    }

    /// `true` iff the language is finite.
    pub fn is_finite(&self) -> bool {
        !self.is_infinite()
    }
}

impl<Q: FreshState, S: Ord + Clone> Dfa<Q, S> {
    /// `true` iff `L(self) ⊆ L(other)`.
    pub fn included<Q2: FreshState>(&self, other: &Dfa<Q2, S>) -> Result<bool, RelangError> {
        difference(self.clone(), other.clone())?.is_empty()
    }

    /// `true` iff the two automata accept the same language.
    pub fn equivalent<Q2: FreshState>(&self, other: &Dfa<Q2, S>) -> Result<bool, RelangError> {
        Ok(self.included(other)? && other.included(self)?)
    }

    /// `true` iff the two languages do not intersect.
    pub fn disjoint<Q2: FreshState>(&self, other: &Dfa<Q2, S>) -> Result<bool, RelangError> {
        intersection(self.clone(), other.clone())?.is_empty()
    }

    /// `true` iff `other` accepts exactly the words this automaton
    /// rejects.
    pub fn complementary<Q2: FreshState>(&self, other: &Dfa<Q2, S>) -> Result<bool, RelangError> {
        self.equivalent(&complement(other.clone()))
    }
}
