//! Conversions between the representations of regular languages:
//! DFA ⇄ NFA ⇄ NFAε ⇄ grammar, with every composite edge routed through
//! the direct ones. Conversion of a representation to itself is included
//! for completeness.

use std::collections::{BTreeSet, VecDeque};

use crate::automaton::{fresh_state, Dfa, EpsilonNfa, FreshState, Input, Nfa};
use crate::function::PartialFn;
use crate::grammar::{Grammar, GrammarSymbol, Production};
use crate::RelangError;

impl<Q: Ord + Clone, S: Ord + Clone> Dfa<Q, S> {
    /// Identity conversion.
    pub fn to_dfa(self) -> Dfa<Q, S> {
        self
    }

    /// View each transition as a singleton move-set.
    pub fn to_nfa(self) -> Nfa<Q, S> {
        Nfa {
            states: self.states,
            alphabet: self.alphabet,
            delta: self
                .delta
                .into_iter()
                .map(|(key, r)| (key, [r].into_iter().collect()))
                .collect(),
            initial_state: self.initial_state,
            final_states: self.final_states,
        }
    }

    /// Lift through the NFA embedding.
    pub fn to_nfae(self) -> EpsilonNfa<Q, S> {
        self.to_nfa().to_nfae()
    }

    /// The right-linear grammar of this automaton's language.
    pub fn to_grammar(self) -> Grammar<Q, S> {
        self.to_nfa().to_grammar()
    }
}

impl<Q: Ord + Clone, S: Ord + Clone> Nfa<Q, S> {
    /// Determinise by the subset construction.
    ///
    /// States of the result are the subsets of `Q` actually reached from
    /// `{q₀}`; an empty move-set produces no transition rather than a
    /// trap state. A subset is final iff it meets `F`.
    pub fn to_dfa(self) -> Dfa<BTreeSet<Q>, S> {
        let initial: BTreeSet<Q> = [self.initial_state.clone()].into_iter().collect();
        let mut dfa = Dfa {
            states: BTreeSet::new(),
            alphabet: self.alphabet.clone(),
            delta: PartialFn::new(),
            initial_state: initial.clone(),
            final_states: BTreeSet::new(),
        };

        let mut to_include = VecDeque::from([initial]);
        while let Some(current) = to_include.pop_front() {
            if !dfa.states.insert(current.clone()) {
                continue;
            }
            if current.iter().any(|q| self.final_states.contains(q)) {
                dfa.final_states.insert(current.clone());
            }

            for a in &self.alphabet {
                let mut next = BTreeSet::new();
                for q in &current {
                    if let Ok(targets) = self.delta.apply(&(q.clone(), a.clone())) {
                        next.extend(targets.iter().cloned());
                    }
                }
                if next.is_empty() {
                    continue;
                }
                dfa.delta.insert((current.clone(), a.clone()), next.clone());
                if !dfa.states.contains(&next) {
                    to_include.push_back(next);
                }
            }
        }
        dfa
    }

    /// Identity conversion.
    pub fn to_nfa(self) -> Nfa<Q, S> {
        self
    }

    /// Embed: an NFA is an ε-NFA with no ε-transitions.
    pub fn to_nfae(self) -> EpsilonNfa<Q, S> {
        EpsilonNfa {
            states: self.states,
            alphabet: self.alphabet,
            delta: self
                .delta
                .into_iter()
                .map(|((q, a), targets)| ((q, Input::Symbol(a)), targets))
                .collect(),
            initial_state: self.initial_state,
            final_states: self.final_states,
        }
    }

    /// The right-linear grammar of this automaton's language: states
    /// become non-terminals, `q —a→ r` becomes `q → a r`, plus `q → a`
    /// whenever `r` is final.
    pub fn to_grammar(self) -> Grammar<Q, S> {
        let mut productions = BTreeSet::new();
        for ((q, a), targets) in &self.delta {
            for r in targets {
                productions.insert(Production {
                    left: q.clone(),
                    right: [
                        GrammarSymbol::Terminal(a.clone()),
                        GrammarSymbol::NonTerminal(r.clone()),
                    ]
                    .into_iter()
                    .collect(),
                });
                if self.final_states.contains(r) {
                    productions.insert(Production {
                        left: q.clone(),
                        right: [GrammarSymbol::Terminal(a.clone())].into_iter().collect(),
                    });
                }
            }
        }

        Grammar {
            non_terminals: self.states,
            terminals: self.alphabet,
            productions,
            start_symbol: self.initial_state,
        }
    }
}

impl<Q: Ord + Clone, S: Ord + Clone> EpsilonNfa<Q, S> {
    /// Determinise, through ε-removal.
    pub fn to_dfa(self) -> Dfa<BTreeSet<Q>, S> {
        self.to_nfa().to_dfa()
    }

    /// Eliminate ε-transitions.
    ///
    /// `δ'(q, a)` is the ε-closure of everything `a` reaches from the
    /// ε-closure of `q`; empty images are left out of the domain. The
    /// initial state becomes final if its closure meets `F`.
    pub fn to_nfa(self) -> Nfa<Q, S> {
        let mut nfa = Nfa {
            states: self.states.clone(),
            alphabet: self.alphabet.clone(),
            delta: PartialFn::new(),
            initial_state: self.initial_state.clone(),
            final_states: self.final_states.clone(),
        };

        for q in &self.states {
            let closure = self.epsilon_closure(q);
            for a in &self.alphabet {
                let mut reached = BTreeSet::new();
                for p in &closure {
                    if let Ok(targets) = self.delta.apply(&(p.clone(), Input::Symbol(a.clone()))) {
                        reached.extend(targets.iter().cloned());
                    }
                }
                let image = self.epsilon_closure_set(&reached);
                if !image.is_empty() {
                    nfa.delta.insert((q.clone(), a.clone()), image);
                }
            }
        }

        let initial_closure = self.epsilon_closure(&self.initial_state);
        if initial_closure
            .iter()
            .any(|q| self.final_states.contains(q))
        {
            nfa.final_states.insert(self.initial_state.clone());
        }
        nfa
    }

    /// Identity conversion.
    pub fn to_nfae(self) -> EpsilonNfa<Q, S> {
        self
    }

    /// The right-linear grammar of this automaton's language.
    pub fn to_grammar(self) -> Grammar<Q, S> {
        self.to_nfa().to_grammar()
    }
}

impl<N: FreshState, T: Ord + Clone> Grammar<N, T> {
    /// The NFA of a right-linear grammar: non-terminals become states, a
    /// fresh state accepts, `A → aB` becomes `A —a→ B` and `A → a`
    /// becomes `A —a→ f`.
    ///
    /// Fails with [`RelangError::WrongTag`] if some production body is
    /// not of the right-linear shape `a` or `aB`.
    pub fn to_nfa(self) -> Result<Nfa<N, T>, RelangError> {
        let mut nfa = Nfa {
            states: self.non_terminals.clone(),
            alphabet: self.terminals.clone(),
            delta: PartialFn::new(),
            initial_state: self.start_symbol.clone(),
            final_states: BTreeSet::new(),
        };

        let final_state = fresh_state(&nfa.states);
        nfa.states.insert(final_state.clone());
        nfa.final_states.insert(final_state.clone());

        for p in &self.productions {
            match p.right.as_slice() {
                [only] => nfa.add_transition(
                    p.left.clone(),
                    only.as_terminal()?.clone(),
                    final_state.clone(),
                ),
                [first, second] => nfa.add_transition(
                    p.left.clone(),
                    first.as_terminal()?.clone(),
                    second.as_non_terminal()?.clone(),
                ),
                _ => return Err(RelangError::WrongTag),
            }
        }
        Ok(nfa)
    }

    /// Determinise the grammar's NFA.
    pub fn to_dfa(self) -> Result<Dfa<BTreeSet<N>, T>, RelangError> {
        Ok(self.to_nfa()?.to_dfa())
    }

    /// Lift through the NFA embedding.
    pub fn to_nfae(self) -> Result<EpsilonNfa<N, T>, RelangError> {
        Ok(self.to_nfa()?.to_nfae())
    }

    /// Identity conversion.
    pub fn to_grammar(self) -> Grammar<N, T> {
        self
    }
}
