//! Nondeterministic finite automata without ε-transitions.

use std::collections::BTreeSet;

use crate::function::PartialFn;

/// A nondeterministic finite automaton `M = (Q, Σ, δ, q₀, F)` where
/// `δ: (Q × Σ) ⇸ 2^Q`. A missing key means the empty move-set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa<Q, S> {
    pub states: BTreeSet<Q>,
    pub alphabet: BTreeSet<S>,
    pub delta: PartialFn<(Q, S), BTreeSet<Q>>,
    pub initial_state: Q,
    pub final_states: BTreeSet<Q>,
}

impl<Q: Ord + Clone, S: Ord + Clone> Nfa<Q, S> {
    /// Add `to` to the move-set of `(from, on)`.
    pub fn add_transition(&mut self, from: Q, on: S, to: Q) {
        let key = (from, on);
        let mut targets = match self.delta.apply(&key) {
            Ok(existing) => existing.clone(),
            Err(_) => BTreeSet::new(),
        };
        targets.insert(to);
        self.delta.insert(key, targets);
    }

    /// Decide acceptance by simulating the set of active states.
    pub fn accepts(&self, word: &[S]) -> bool {
        let mut current: BTreeSet<Q> = [self.initial_state.clone()].into_iter().collect();
        for a in word {
            let mut next = BTreeSet::new();
            for q in &current {
                if let Ok(targets) = self.delta.apply(&(q.clone(), a.clone())) {
                    next.extend(targets.iter().cloned());
                }
            }
            current = next;
            if current.is_empty() {
                return false;
            }
        }
        current.iter().any(|q| self.final_states.contains(q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_transition_unions() {
        let mut nfa = Nfa {
            states: [0, 1, 2].into_iter().collect(),
            alphabet: ['a'].into_iter().collect(),
            delta: PartialFn::new(),
            initial_state: 0,
            final_states: [2].into_iter().collect(),
        };
        nfa.add_transition(0, 'a', 1);
        nfa.add_transition(0, 'a', 2);
        assert_eq!(
            *nfa.delta.apply(&(0, 'a')).unwrap(),
            [1, 2].into_iter().collect()
        );
    }

    #[test]
    fn test_accepts_tracks_all_branches() {
        // 0 -a-> {0, 1}, 1 -b-> {2}; accepts a+b.
        let mut nfa = Nfa {
            states: [0, 1, 2].into_iter().collect(),
            alphabet: ['a', 'b'].into_iter().collect(),
            delta: PartialFn::new(),
            initial_state: 0,
            final_states: [2].into_iter().collect(),
        };
        nfa.add_transition(0, 'a', 0);
        nfa.add_transition(0, 'a', 1);
        nfa.add_transition(1, 'b', 2);

        assert!(nfa.accepts(&['a', 'b']));
        assert!(nfa.accepts(&['a', 'a', 'a', 'b']));
        assert!(!nfa.accepts(&['b']));
        assert!(!nfa.accepts(&['a']));
        assert!(!nfa.accepts(&['a', 'b', 'b']));
    }
}
