//! DFA reductions: unreachable-state removal, dead-state removal, and
//! partition-refinement minimisation.

use std::collections::BTreeSet;

use crate::automaton::fresh::FreshState;
use crate::automaton::Dfa;
use crate::function::PartialFn;
use crate::RelangError;

impl<Q: Ord + Clone, S: Ord + Clone> Dfa<Q, S> {
    /// Remove every state the initial state cannot reach through δ.
    pub fn remove_unreachable(mut self) -> Dfa<Q, S> {
        let mut reachable = BTreeSet::new();
        let mut frontier = vec![self.initial_state.clone()];

        while let Some(q) = frontier.pop() {
            if !reachable.insert(q.clone()) {
                continue;
            }
            for a in &self.alphabet {
                if let Ok(r) = self.delta.apply(&(q.clone(), a.clone())) {
                    if !reachable.contains(r) {
                        frontier.push(r.clone());
                    }
                }
            }
        }

        for q in self.states.clone() {
            if !reachable.contains(&q) {
                self.remove_state(&q);
            }
        }
        self
    }

    /// Remove every dead state: a state from which no final state can be
    /// reached. Transitions into removed states are swept afterwards.
    ///
    /// When `F = ∅` this removes every state; the initial-state label then
    /// dangles, which downstream reductions tolerate.
    pub fn remove_dead(mut self) -> Dfa<Q, S> {
        let mut alive: BTreeSet<Q> = self
            .states
            .iter()
            .filter(|q| self.final_states.contains(q))
            .cloned()
            .collect();

        // Least fixed point: a state becomes alive when one of its
        // transitions enters the alive set.
        let mut changed = true;
        while changed {
            changed = false;
            for q in &self.states {
                if alive.contains(q) {
                    continue;
                }
                let has_alive_successor = self.alphabet.iter().any(|a| {
                    self.delta
                        .apply(&(q.clone(), a.clone()))
                        .map(|r| alive.contains(r))
                        .unwrap_or(false)
                });
                if has_alive_successor {
                    alive.insert(q.clone());
                    changed = true;
                }
            }
        }

        for q in self.states.clone() {
            if !alive.contains(&q) {
                self.remove_state(&q);
            }
        }

        // Sweep transitions whose target was removed.
        for q in self.states.clone() {
            for a in self.alphabet.clone() {
                let dangling = self
                    .delta
                    .apply(&(q.clone(), a.clone()))
                    .map(|r| !self.states.contains(r))
                    .unwrap_or(false);
                if dangling {
                    self.delta.remove(&(q.clone(), a));
                }
            }
        }
        self
    }

    /// Merge language-equivalent states by partition refinement.
    ///
    /// δ must be total over the remaining states (run
    /// [`complete`](Dfa::complete) first); a missing transition surfaces
    /// as [`RelangError::OutOfDomain`].
    pub fn remove_redundant(self) -> Result<Dfa<Q, S>, RelangError> {
        let mut classes: BTreeSet<BTreeSet<Q>> = BTreeSet::new();
        if self.final_states.is_empty() {
            if !self.states.is_empty() {
                classes.insert(self.states.clone());
            }
        } else {
            let non_final: BTreeSet<Q> = self
                .states
                .difference(&self.final_states)
                .cloned()
                .collect();
            if !non_final.is_empty() {
                classes.insert(non_final);
            }
            classes.insert(self.final_states.clone());
        }

        // Refine until no class holds two states that disagree on the
        // class of some successor.
        loop {
            let mut split_request = None;
            'scan: for class in &classes {
                if class.len() < 2 {
                    continue;
                }
                for q in class {
                    for r in class {
                        if !self.equivalent_in(&classes, q, r)? {
                            split_request = Some((class.clone(), q.clone()));
                            break 'scan;
                        }
                    }
                }
            }

            match split_request {
                None => break,
                Some((class, pivot)) => {
                    let mut with_pivot = BTreeSet::new();
                    let mut without = BTreeSet::new();
                    for r in &class {
                        if self.equivalent_in(&classes, r, &pivot)? {
                            with_pivot.insert(r.clone());
                        } else {
                            without.insert(r.clone());
                        }
                    }
                    classes.remove(&class);
                    classes.insert(with_pivot);
                    classes.insert(without);
                }
            }
        }

        // Rebuild the automaton from one representative per class.
        let class_of = |q: &Q| classes.iter().find(|class| class.contains(q));
        let representative = |q: &Q| -> Option<Q> { class_of(q).and_then(|c| c.iter().next()).cloned() };

        let mut reduced = Dfa {
            states: BTreeSet::new(),
            alphabet: self.alphabet.clone(),
            delta: PartialFn::new(),
            initial_state: representative(&self.initial_state)
                .unwrap_or_else(|| self.initial_state.clone()),
            final_states: BTreeSet::new(),
        };

        for q in &self.states {
            if let Some(rep) = representative(q) {
                reduced.states.insert(rep);
            }
        }
        for q in &self.final_states {
            if let Some(rep) = representative(q) {
                reduced.final_states.insert(rep);
            }
        }
        for q in reduced.states.clone() {
            for a in &self.alphabet {
                let target = self.delta.apply(&(q.clone(), a.clone()))?;
                if let Some(rep) = representative(target) {
                    reduced.delta.insert((q.clone(), a.clone()), rep);
                }
            }
        }
        Ok(reduced)
    }

    /// `true` iff `q` and `r` sit in the same class and every symbol sends
    /// them into one class.
    fn equivalent_in(
        &self,
        classes: &BTreeSet<BTreeSet<Q>>,
        q: &Q,
        r: &Q,
    ) -> Result<bool, RelangError> {
        let same_class =
            |x: &Q, y: &Q| classes.iter().any(|c| c.contains(x) && c.contains(y));
        if !same_class(q, r) {
            return Ok(false);
        }
        for a in &self.alphabet {
            let qa = self.delta.apply(&(q.clone(), a.clone()))?;
            let ra = self.delta.apply(&(r.clone(), a.clone()))?;
            if !same_class(qa, ra) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// The minimal automaton for this DFA's language, smallest in state
    /// count.
    ///
    /// Reduction order: prune unreachable and dead states, complete,
    /// merge redundant states, then drop the completion sink again.
    pub fn minimize(self) -> Result<Dfa<Q, S>, RelangError>
    where
        Q: FreshState,
    {
        Ok(self
            .remove_unreachable()
            .remove_dead()
            .complete()
            .remove_redundant()?
            .remove_dead())
    }
}
