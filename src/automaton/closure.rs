//! Boolean closure: product construction, complement, and reversal.

use std::collections::BTreeSet;

use crate::automaton::fresh::{fresh_state, FreshState};
use crate::automaton::{Dfa, EpsilonNfa, Input};
use crate::function::PartialFn;
use crate::RelangError;

/// Run two automata simultaneously and accept a word iff
/// `pred(M₁ accepts it, M₂ accepts it)`.
///
/// Both inputs are completed first; the product ranges over the whole of
/// `Q₁ × Q₂` with componentwise transitions. The two alphabets are
/// assumed identical — a symbol known to only one automaton surfaces as
/// [`RelangError::OutOfDomain`].
pub fn simultaneous_run<Q1, Q2, S>(
    m1: Dfa<Q1, S>,
    m2: Dfa<Q2, S>,
    pred: fn(bool, bool) -> bool,
) -> Result<Dfa<(Q1, Q2), S>, RelangError>
where
    Q1: FreshState,
    Q2: FreshState,
    S: Ord + Clone,
{
    let m1 = m1.complete();
    let m2 = m2.complete();

    let mut product = Dfa {
        states: BTreeSet::new(),
        alphabet: m1.alphabet.clone(),
        delta: PartialFn::new(),
        initial_state: (m1.initial_state.clone(), m2.initial_state.clone()),
        final_states: BTreeSet::new(),
    };

    for q1 in &m1.states {
        for q2 in &m2.states {
            product.states.insert((q1.clone(), q2.clone()));
            if pred(
                m1.final_states.contains(q1),
                m2.final_states.contains(q2),
            ) {
                product.final_states.insert((q1.clone(), q2.clone()));
            }
            for a in &product.alphabet {
                let r1 = m1.delta.apply(&(q1.clone(), a.clone()))?;
                let r2 = m2.delta.apply(&(q2.clone(), a.clone()))?;
                product.delta.insert(
                    ((q1.clone(), q2.clone()), a.clone()),
                    (r1.clone(), r2.clone()),
                );
            }
        }
    }
    Ok(product)
}

/// A DFA for `L(M₁) ∪ L(M₂)`.
pub fn union<Q1, Q2, S>(
    m1: Dfa<Q1, S>,
    m2: Dfa<Q2, S>,
) -> Result<Dfa<(Q1, Q2), S>, RelangError>
where
    Q1: FreshState,
    Q2: FreshState,
    S: Ord + Clone,
{
    simultaneous_run(m1, m2, |x, y| x || y)
}

/// A DFA for `L(M₁) ∩ L(M₂)`.
pub fn intersection<Q1, Q2, S>(
    m1: Dfa<Q1, S>,
    m2: Dfa<Q2, S>,
) -> Result<Dfa<(Q1, Q2), S>, RelangError>
where
    Q1: FreshState,
    Q2: FreshState,
    S: Ord + Clone,
{
    simultaneous_run(m1, m2, |x, y| x && y)
}

/// A DFA for `L(M₁) ∖ L(M₂)`.
pub fn difference<Q1, Q2, S>(
    m1: Dfa<Q1, S>,
    m2: Dfa<Q2, S>,
) -> Result<Dfa<(Q1, Q2), S>, RelangError>
where
    Q1: FreshState,
    Q2: FreshState,
    S: Ord + Clone,
{
    simultaneous_run(m1, m2, |x, y| x && !y)
}

/// A DFA for the complement of `L(M)` over `M`'s alphabet.
///
/// The automaton is completed, then the final set becomes `Q ∖ F` of the
/// completed state set — the sink is accepting in the complement.
pub fn complement<Q, S>(m: Dfa<Q, S>) -> Dfa<Q, S>
where
    Q: FreshState,
    S: Ord + Clone,
{
    let mut m = m.complete();
    let flipped: BTreeSet<Q> = m.states.difference(&m.final_states).cloned().collect();
    m.final_states = flipped;
    m
}

/// An ε-NFA for the reverse of `L(M)`: every transition is flipped, a
/// fresh initial state ε-moves onto the old final set, and the old initial
/// state becomes the unique final state.
pub fn reverse<Q, S>(m: EpsilonNfa<Q, S>) -> EpsilonNfa<Q, S>
where
    Q: FreshState,
    S: Ord + Clone,
{
    let new_initial = fresh_state(&m.states);
    let mut out = EpsilonNfa {
        states: m.states.clone(),
        alphabet: m.alphabet.clone(),
        delta: PartialFn::new(),
        initial_state: new_initial.clone(),
        final_states: [m.initial_state.clone()].into_iter().collect(),
    };
    out.states.insert(new_initial.clone());

    for ((from, on), targets) in &m.delta {
        for to in targets {
            out.add_transition(to.clone(), on.clone(), from.clone());
        }
    }
    out.delta
        .insert((new_initial, Input::Epsilon), m.final_states.clone());

    out
}
