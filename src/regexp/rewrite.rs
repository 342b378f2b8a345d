//! Expression-tree rewrites: σ-closure expansion and ε-pruning.
//!
//! The De Simone construction cannot traverse σ-closure operators or ε
//! leaves, so both are rewritten away first. `x : y` expands to its
//! definition `x . (y . x)*`; ε leaves are absorbed into the surrounding
//! operator.

use crate::regexp::tokens::{ExprValue, Operator};
use crate::tree::{ExprTree, NodeId};

/// Expand every σ-closure node into `x . (y . x)*`.
///
/// The rewrite at one node, step by step:
///
/// ```text
///     0        1       2        3
///     :        .       .        .
///    / \      / \     / \      / \
///   x   y    x   y   x   *    x   *
///                       /        /
///                      y        .
///                              / \
///                             y   x
/// ```
pub fn remove_sigma_closure<T: Clone + Default>(tree: &mut ExprTree<ExprValue<T>>) {
    rewrite_sigma(tree, tree.root());
}

fn rewrite_sigma<T: Clone + Default>(tree: &mut ExprTree<ExprValue<T>>, n: NodeId) {
    let op = match tree.value(n) {
        ExprValue::Op(op) => *op,
        _ => return,
    };
    match op {
        Operator::Concatenation | Operator::VerticalBar => {
            let right = tree.right_child(n);
            rewrite_sigma(tree, right);
            let left = tree.left_child(n);
            rewrite_sigma(tree, left);
        }
        Operator::KleeneClosure | Operator::PositiveClosure | Operator::Optional => {
            let left = tree.left_child(n);
            rewrite_sigma(tree, left);
        }
        Operator::SigmaClosure => {
            tree.set_value(n, ExprValue::Op(Operator::Concatenation)); // step 1
            let lhs = tree.left_child(n);

            let star = tree.right_child(n);
            tree.right_ascent(star);
            tree.set_value(star, ExprValue::Op(Operator::KleeneClosure)); // step 2

            let inner = tree.left_child(star);
            tree.right_ascent(inner);
            tree.set_value(inner, ExprValue::Op(Operator::Concatenation)); // step 3

            let copy = tree.ensure_right_child(inner);
            tree.copy_subtree(lhs, copy); // step 4

            rewrite_sigma(tree, lhs);
            let inner_left = tree.left_child(inner);
            rewrite_sigma(tree, inner_left);
            rewrite_sigma(tree, copy);
        }
    }
}

/// Prune ε leaves bottom-up, absorbing them into the adjacent operators:
/// closures of ε become ε, `x.ε` collapses to `x`, `x|ε` becomes `x?`,
/// and `x:ε` becomes `x+` (symmetrically for ε on the left).
///
/// Returns `true` iff the whole tree denotes ε. Never fails.
pub fn remove_epsilon<T: Clone + Default>(tree: &mut ExprTree<ExprValue<T>>) -> bool {
    prune(tree, tree.root())
}

fn prune<T: Clone + Default>(tree: &mut ExprTree<ExprValue<T>>, n: NodeId) -> bool {
    let op = match tree.value(n) {
        ExprValue::Epsilon => return true,
        ExprValue::Symbol(_) => return false,
        ExprValue::Op(op) => *op,
    };

    match op {
        Operator::KleeneClosure | Operator::PositiveClosure | Operator::Optional => {
            // Any closure of ε is ε itself.
            let left = tree.left_child(n);
            if prune(tree, left) {
                tree.destroy_left_subtree(n);
                tree.set_value(n, ExprValue::Epsilon);
                return true;
            }
            false
        }
        Operator::Concatenation => {
            // x.ε = x and ε.y = y; ε.ε needs the re-scan after collapse.
            let right = tree.right_child(n);
            if prune(tree, right) {
                tree.destroy_right_subtree(n);
                tree.collapse_left(n);
                return prune(tree, n);
            }
            let left = tree.left_child(n);
            if prune(tree, left) {
                tree.destroy_left_subtree(n);
                tree.collapse_right(n);
            }
            false
        }
        Operator::VerticalBar => {
            // x|ε = x? and ε|y = y?.
            let right = tree.right_child(n);
            if prune(tree, right) {
                tree.destroy_right_subtree(n);
                tree.set_value(n, ExprValue::Op(Operator::Optional));
                return prune(tree, n);
            }
            let left = tree.left_child(n);
            if prune(tree, left) {
                tree.destroy_left_subtree(n);
                tree.set_value(n, ExprValue::Op(Operator::Optional));
                let right = tree.right_child(n);
                tree.set_left_child(n, right);
                tree.set_right_child(n, NodeId::NONE);
            }
            false
        }
        Operator::SigmaClosure => {
            // x:ε = x+ and ε:y = y*.
            let right = tree.right_child(n);
            if prune(tree, right) {
                tree.destroy_right_subtree(n);
                tree.set_value(n, ExprValue::Op(Operator::PositiveClosure));
                return prune(tree, n);
            }
            let left = tree.left_child(n);
            if prune(tree, left) {
                tree.destroy_left_subtree(n);
                tree.set_value(n, ExprValue::Op(Operator::KleeneClosure));
                let right = tree.right_child(n);
                tree.set_left_child(n, right);
                tree.set_right_child(n, NodeId::NONE);
            }
            false
        }
    }
}
