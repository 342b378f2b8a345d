//! The De Simone construction: a DFA synthesised directly from a
//! right-threaded expression tree.
//!
//! Two mutually recursive traversals drive the construction. `deepen`
//! collects the leaves that can begin the next input symbol; `advance`
//! collects the leaves that can follow once a leaf has been consumed.
//! Both are guarded by per-node visit flags, which bounds the recursion
//! on the cyclic threaded structure. The DFA's states are sets of leaf
//! cursors; a state is final iff it holds the end-of-word sentinel
//! ([`NodeId::NONE`]).
//!
//! Preconditions: σ-closures removed, ε leaves pruned, tree threaded.
//! [`de_simone`] handles all three.

use std::collections::{BTreeSet, VecDeque};

use rustc_hash::FxHashSet;

use crate::automaton::Dfa;
use crate::function::PartialFn;
use crate::regexp::rewrite::{remove_epsilon, remove_sigma_closure};
use crate::regexp::tokens::{ExprValue, Operator};
use crate::tree::{ExprTree, NodeId, ThreadedTree};
use crate::RelangError;

/// Convert an expression tree into an equivalent DFA, compacted to
/// integer states.
pub fn de_simone<T: Ord + Clone + Default>(
    tree: ExprTree<ExprValue<T>>,
) -> Result<Dfa<u32, T>, RelangError> {
    let mut tree = tree;
    remove_sigma_closure(&mut tree);
    let whole_tree_is_epsilon = remove_epsilon(&mut tree);

    if whole_tree_is_epsilon {
        // A lone ε leaf has no leaf cursors to compose; the language is
        // just the empty word.
        return Ok(Dfa {
            states: [0].into_iter().collect(),
            alphabet: BTreeSet::new(),
            delta: PartialFn::new(),
            initial_state: 0,
            final_states: [0].into_iter().collect(),
        });
    }

    let threaded = tree.into_right_threaded();
    synthesize(&threaded)?.compact(0)
}

/// Worklist synthesis over cursor-set states.
fn synthesize<T: Ord + Clone>(
    tree: &ThreadedTree<ExprValue<T>>,
) -> Result<Dfa<BTreeSet<NodeId>, T>, RelangError> {
    let alphabet = leaf_alphabet(tree);

    let initial = initial_composition(tree)?;
    let mut dfa = Dfa {
        states: BTreeSet::new(),
        alphabet: alphabet.clone(),
        delta: PartialFn::new(),
        initial_state: initial.clone(),
        final_states: BTreeSet::new(),
    };

    let mut worklist = VecDeque::from([initial]);
    while let Some(state) = worklist.pop_front() {
        if !dfa.states.insert(state.clone()) {
            continue;
        }
        if state.contains(&NodeId::NONE) {
            dfa.final_states.insert(state.clone());
        }

        for symbol in &alphabet {
            let mut next = BTreeSet::new();
            for leaf in &state {
                if leaf.is_none() {
                    continue;
                }
                if matches!(tree.value(*leaf), ExprValue::Symbol(s) if s == symbol) {
                    next.extend(composition(tree, *leaf)?);
                }
            }
            if next.is_empty() {
                continue;
            }
            dfa.delta
                .insert((state.clone(), symbol.clone()), next.clone());
            if !dfa.states.contains(&next) {
                worklist.push_back(next);
            }
        }
    }
    Ok(dfa)
}

/// The symbols at the live leaves, gathered through structural edges only.
fn leaf_alphabet<T: Ord + Clone>(tree: &ThreadedTree<ExprValue<T>>) -> BTreeSet<T> {
    fn walk<T: Ord + Clone>(
        tree: &ThreadedTree<ExprValue<T>>,
        n: NodeId,
        out: &mut BTreeSet<T>,
    ) {
        if n.is_none() {
            return;
        }
        match tree.value(n) {
            ExprValue::Symbol(s) => {
                out.insert(s.clone());
            }
            ExprValue::Epsilon => {}
            ExprValue::Op(op) => {
                walk(tree, tree.left(n), out);
                // The right slot is structural only under binary operators.
                if matches!(op, Operator::Concatenation | Operator::VerticalBar) {
                    walk(tree, tree.right(n), out);
                }
            }
        }
    }
    let mut out = BTreeSet::new();
    walk(tree, tree.root(), &mut out);
    out
}

/// The set of leaves able to begin the first input: `deepen(root)`.
fn initial_composition<T: Ord + Clone>(
    tree: &ThreadedTree<ExprValue<T>>,
) -> Result<BTreeSet<NodeId>, RelangError> {
    let mut flags = Flags::default();
    let mut out = BTreeSet::new();
    deepen(tree, tree.root(), &mut flags, &mut out)?;
    Ok(out)
}

/// The set of leaves able to follow after `leaf` is consumed:
/// `advance(leaf)` from a cleared flag map.
fn composition<T: Ord + Clone>(
    tree: &ThreadedTree<ExprValue<T>>,
    leaf: NodeId,
) -> Result<BTreeSet<NodeId>, RelangError> {
    let mut flags = Flags::default();
    let mut out = BTreeSet::new();
    advance(tree, leaf, &mut flags, &mut out)?;
    Ok(out)
}

/// Per-composition visit flags bounding the mutual recursion.
#[derive(Default)]
struct Flags {
    deepened: FxHashSet<NodeId>,
    advanced: FxHashSet<NodeId>,
}

fn deepen<T: Ord + Clone>(
    tree: &ThreadedTree<ExprValue<T>>,
    n: NodeId,
    flags: &mut Flags,
    out: &mut BTreeSet<NodeId>,
) -> Result<(), RelangError> {
    if !flags.deepened.insert(n) {
        return Ok(());
    }
    if n.is_none() {
        out.insert(n);
        return Ok(());
    }
    match tree.value(n) {
        ExprValue::Symbol(_) => {
            out.insert(n);
            Ok(())
        }
        ExprValue::Epsilon => Err(RelangError::ExtraneousOperator),
        ExprValue::Op(op) => match op {
            Operator::KleeneClosure | Operator::Optional => {
                deepen(tree, tree.left(n), flags, out)?;
                advance(tree, tree.right(n), flags, out)
            }
            Operator::PositiveClosure => deepen(tree, tree.left(n), flags, out),
            Operator::Concatenation => deepen(tree, tree.left(n), flags, out),
            Operator::VerticalBar => {
                deepen(tree, tree.left(n), flags, out)?;
                deepen(tree, tree.right(n), flags, out)
            }
            Operator::SigmaClosure => Err(RelangError::ExtraneousOperator),
        },
    }
}

fn advance<T: Ord + Clone>(
    tree: &ThreadedTree<ExprValue<T>>,
    n: NodeId,
    flags: &mut Flags,
    out: &mut BTreeSet<NodeId>,
) -> Result<(), RelangError> {
    if n.is_none() {
        // Ran off the root thread: the word may end here.
        out.insert(NodeId::NONE);
        return Ok(());
    }
    if !flags.advanced.insert(n) {
        return Ok(());
    }
    match tree.value(n) {
        ExprValue::Symbol(_) => advance(tree, tree.right(n), flags, out),
        ExprValue::Epsilon => Err(RelangError::ExtraneousOperator),
        ExprValue::Op(op) => match op {
            Operator::KleeneClosure | Operator::PositiveClosure => {
                deepen(tree, tree.left(n), flags, out)?;
                advance(tree, tree.right(n), flags, out)
            }
            Operator::Optional => advance(tree, tree.right(n), flags, out),
            Operator::Concatenation => deepen(tree, tree.right(n), flags, out),
            Operator::VerticalBar => {
                // Skip over this alternation's own right subtree: walk the
                // right slots through `.`/`|` nodes, then leave through
                // the first thread encountered.
                let mut m = n;
                loop {
                    let r = tree.right(m);
                    if r.is_none() {
                        return advance(tree, r, flags, out);
                    }
                    match tree.value(r) {
                        ExprValue::Op(Operator::Concatenation)
                        | ExprValue::Op(Operator::VerticalBar) => m = r,
                        _ => return advance(tree, tree.right(r), flags, out),
                    }
                }
            }
            Operator::SigmaClosure => Err(RelangError::ExtraneousOperator),
        },
    }
}
