//! Thompson's construction: an ε-NFA built by induction over the
//! expression tree.
//!
//! Every automaton produced here satisfies three invariants: the initial
//! state has no incoming edges, there is exactly one final state distinct
//! from the initial, and no edge leaves the final state. The inductive
//! cases splice operand automata together with fresh extremal states and
//! ε-wires.

use std::collections::BTreeSet;

use crate::automaton::{fresh_state, EpsilonNfa, Input};
use crate::function::PartialFn;
use crate::regexp::tokens::{ExprValue, Operator};
use crate::tree::{ExprTree, NodeId};
use crate::RelangError;

/// Convert an expression tree into an equivalent ε-NFA.
pub fn thompson<T: Ord + Clone>(
    tree: &ExprTree<ExprValue<T>>,
) -> Result<EpsilonNfa<u32, T>, RelangError> {
    build(tree, tree.root())
}

fn build<T: Ord + Clone>(
    tree: &ExprTree<ExprValue<T>>,
    n: NodeId,
) -> Result<EpsilonNfa<u32, T>, RelangError> {
    if n.is_none() {
        return Err(RelangError::ExtraneousOperator);
    }
    match tree.value(n) {
        ExprValue::Symbol(c) => Ok(nfae_to_symbol(c.clone())),
        ExprValue::Epsilon => Ok(nfae_to_epsilon()),
        ExprValue::Op(op) => match op {
            Operator::KleeneClosure => Ok(kleene_closure(build(tree, tree.left_child(n))?)),
            Operator::PositiveClosure => Ok(positive_closure(build(tree, tree.left_child(n))?)),
            Operator::Optional => Ok(optional(build(tree, tree.left_child(n))?)),
            Operator::SigmaClosure => Ok(sigma_closure(
                build(tree, tree.left_child(n))?,
                build(tree, tree.right_child(n))?,
            )?),
            Operator::Concatenation => Ok(concatenate(
                build(tree, tree.left_child(n))?,
                build(tree, tree.right_child(n))?,
            )?),
            Operator::VerticalBar => Ok(unite(
                build(tree, tree.left_child(n))?,
                build(tree, tree.right_child(n))?,
            )?),
        },
    }
}

/// The two-state automaton recognising exactly the word `c`.
fn nfae_to_symbol<T: Ord + Clone>(c: T) -> EpsilonNfa<u32, T> {
    EpsilonNfa {
        states: [0, 1].into_iter().collect(),
        alphabet: [c.clone()].into_iter().collect(),
        delta: [((0, Input::Symbol(c)), [1].into_iter().collect())]
            .into_iter()
            .collect(),
        initial_state: 0,
        final_states: [1].into_iter().collect(),
    }
}

/// The two-state automaton recognising exactly the empty word.
fn nfae_to_epsilon<T: Ord + Clone>() -> EpsilonNfa<u32, T> {
    EpsilonNfa {
        states: [0, 1].into_iter().collect(),
        alphabet: BTreeSet::new(),
        delta: [((0, Input::Epsilon), [1].into_iter().collect())]
            .into_iter()
            .collect(),
        initial_state: 0,
        final_states: [1].into_iter().collect(),
    }
}

fn concatenate<T: Ord + Clone>(
    a: EpsilonNfa<u32, T>,
    b: EpsilonNfa<u32, T>,
) -> Result<EpsilonNfa<u32, T>, RelangError> {
    let (mut r, a, b) = join(a, b)?;
    r.add_transition(r.initial_state, Input::Epsilon, a.initial_state);
    r.add_transition(final_state_of(&a), Input::Epsilon, b.initial_state);
    r.add_transition(final_state_of(&b), Input::Epsilon, final_state_of(&r));
    Ok(r)
}

fn unite<T: Ord + Clone>(
    a: EpsilonNfa<u32, T>,
    b: EpsilonNfa<u32, T>,
) -> Result<EpsilonNfa<u32, T>, RelangError> {
    let (mut r, a, b) = join(a, b)?;
    r.add_transition(r.initial_state, Input::Epsilon, a.initial_state);
    r.add_transition(r.initial_state, Input::Epsilon, b.initial_state);
    r.add_transition(final_state_of(&a), Input::Epsilon, final_state_of(&r));
    r.add_transition(final_state_of(&b), Input::Epsilon, final_state_of(&r));
    Ok(r)
}

fn sigma_closure<T: Ord + Clone>(
    a: EpsilonNfa<u32, T>,
    b: EpsilonNfa<u32, T>,
) -> Result<EpsilonNfa<u32, T>, RelangError> {
    let (mut r, a, b) = join(a, b)?;
    r.add_transition(r.initial_state, Input::Epsilon, a.initial_state);
    r.add_transition(final_state_of(&a), Input::Epsilon, final_state_of(&r));
    r.add_transition(final_state_of(&a), Input::Epsilon, b.initial_state);
    r.add_transition(final_state_of(&b), Input::Epsilon, a.initial_state);
    Ok(r)
}

fn kleene_closure<T: Ord + Clone>(a: EpsilonNfa<u32, T>) -> EpsilonNfa<u32, T> {
    let mut r = positive_closure(a);
    r.add_transition(r.initial_state, Input::Epsilon, final_state_of(&r));
    r
}

fn positive_closure<T: Ord + Clone>(a: EpsilonNfa<u32, T>) -> EpsilonNfa<u32, T> {
    let inner_initial = a.initial_state;
    let inner_final = final_state_of(&a);
    let mut r = extend(a);
    r.add_transition(r.initial_state, Input::Epsilon, inner_initial);
    r.add_transition(inner_final, Input::Epsilon, inner_initial);
    r.add_transition(inner_final, Input::Epsilon, final_state_of(&r));
    r
}

fn optional<T: Ord + Clone>(mut a: EpsilonNfa<u32, T>) -> EpsilonNfa<u32, T> {
    a.add_transition(a.initial_state, Input::Epsilon, final_state_of(&a));
    a
}

/// Merge two automata into one carrier: `b` is renumbered past `a`'s
/// states, their state sets, alphabets, and transitions are united, and
/// two fresh extremal states are appended. The renumbered parts are
/// returned so callers can wire their initial and final states.
#[allow(clippy::type_complexity)]
fn join<T: Ord + Clone>(
    a: EpsilonNfa<u32, T>,
    b: EpsilonNfa<u32, T>,
) -> Result<(EpsilonNfa<u32, T>, EpsilonNfa<u32, T>, EpsilonNfa<u32, T>), RelangError> {
    let b = b.compact(fresh_state(&a.states))?;

    let mut r = EpsilonNfa {
        states: a.states.union(&b.states).cloned().collect(),
        alphabet: a.alphabet.union(&b.alphabet).cloned().collect(),
        delta: PartialFn::new(),
        initial_state: a.initial_state,
        final_states: BTreeSet::new(),
    };
    for (key, targets) in a.delta.iter().chain(b.delta.iter()) {
        r.delta.insert(key.clone(), targets.clone());
    }

    Ok((extend(r), a, b))
}

/// Append a fresh initial state and a fresh unique final state.
fn extend<T: Ord + Clone>(mut a: EpsilonNfa<u32, T>) -> EpsilonNfa<u32, T> {
    let initial = fresh_state(&a.states);
    a.states.insert(initial);
    let final_ = fresh_state(&a.states);
    a.states.insert(final_);
    a.initial_state = initial;
    a.final_states = [final_].into_iter().collect();
    a
}

/// Thompson automata carry exactly one final state.
fn final_state_of<T>(a: &EpsilonNfa<u32, T>) -> u32 {
    *a.final_states.iter().next().unwrap()
}
