//! Compaction: relabel the state set as a contiguous integer range.
//!
//! A compact automaton has `Q = {offset, …, offset+|Q|−1}` with
//! `q₀ = offset`. Every automaton has a compact isomorphic equivalent;
//! the construction below is the proof.
//!
//! Compaction does not preserve disjointness between the state set and
//! the input alphabet, so take care with automata whose symbol type is
//! an integer (see `fresh_state_avoiding`).

use std::collections::BTreeSet;

use crate::automaton::{Dfa, EpsilonNfa, Nfa};
use crate::function::PartialFn;
use crate::RelangError;

impl<Q: Ord + Clone, S: Ord + Clone> Dfa<Q, S> {
    /// Relabel the states as `{offset, …}` with `q₀ ↦ offset`; remaining
    /// states are numbered in their iteration order.
    ///
    /// Fails with [`RelangError::OutOfDomain`] if δ mentions a state
    /// outside `Q`.
    pub fn compact(&self, offset: u32) -> Result<Dfa<u32, S>, RelangError> {
        let map = remap(&self.states, &self.initial_state, offset);

        let mut delta = PartialFn::new();
        for ((q, a), r) in &self.delta {
            delta.insert((*map.apply(q)?, a.clone()), *map.apply(r)?);
        }

        Ok(Dfa {
            states: relabel_set(&map, &self.states)?,
            alphabet: self.alphabet.clone(),
            delta,
            initial_state: offset,
            final_states: relabel_set(&map, &self.final_states)?,
        })
    }
}

impl<Q: Ord + Clone, S: Ord + Clone> Nfa<Q, S> {
    /// Relabel the states as `{offset, …}` with `q₀ ↦ offset`.
    pub fn compact(&self, offset: u32) -> Result<Nfa<u32, S>, RelangError> {
        let map = remap(&self.states, &self.initial_state, offset);

        let mut delta = PartialFn::new();
        for ((q, a), rs) in &self.delta {
            delta.insert((*map.apply(q)?, a.clone()), map.apply_set(rs)?);
        }

        Ok(Nfa {
            states: relabel_set(&map, &self.states)?,
            alphabet: self.alphabet.clone(),
            delta,
            initial_state: offset,
            final_states: relabel_set(&map, &self.final_states)?,
        })
    }
}

impl<Q: Ord + Clone, S: Ord + Clone> EpsilonNfa<Q, S> {
    /// Relabel the states as `{offset, …}` with `q₀ ↦ offset`.
    pub fn compact(&self, offset: u32) -> Result<EpsilonNfa<u32, S>, RelangError> {
        let map = remap(&self.states, &self.initial_state, offset);

        let mut delta = PartialFn::new();
        for ((q, on), rs) in &self.delta {
            delta.insert((*map.apply(q)?, on.clone()), map.apply_set(rs)?);
        }

        Ok(EpsilonNfa {
            states: relabel_set(&map, &self.states)?,
            alphabet: self.alphabet.clone(),
            delta,
            initial_state: offset,
            final_states: relabel_set(&map, &self.final_states)?,
        })
    }
}

/// The relabelling map: `q₀ ↦ offset`, then the remaining states in their
/// iteration order.
fn remap<Q: Ord + Clone>(states: &BTreeSet<Q>, initial: &Q, offset: u32) -> PartialFn<Q, u32> {
    let mut map = PartialFn::new();
    let mut next = offset;
    map.insert(initial.clone(), next);
    for q in states {
        if q != initial {
            next += 1;
            map.insert(q.clone(), next);
        }
    }
    map
}

fn relabel_set<Q: Ord + Clone>(
    map: &PartialFn<Q, u32>,
    states: &BTreeSet<Q>,
) -> Result<BTreeSet<u32>, RelangError> {
    states.iter().map(|q| map.apply(q).copied()).collect()
}
