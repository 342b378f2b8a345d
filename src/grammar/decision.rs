//! Decision procedures on grammars.

use std::collections::BTreeSet;

use crate::grammar::{Grammar, GrammarSymbol};

impl<N: Ord + Clone, T: Ord + Clone> Grammar<N, T> {
    /// `true` iff the grammar derives no word: after dead-symbol removal,
    /// the start symbol has no production left.
    pub fn is_empty(&self) -> bool {
        let g = self.clone().remove_dead();
        let result = g.productions_from(&self.start_symbol).next().is_none();
        result
    }

    /// `true` iff the language is infinite: once every non-terminal is
    /// productive and reachable, any cycle in the derivation graph can be
    /// pumped.
    pub fn is_infinite(&self) -> bool {
        let g = self.clone().remove_dead().remove_unreachable();

        // DFS over the non-terminal graph; a back edge into the path is a
        // cycle.
        let mut grey = BTreeSet::new();
        let mut black = BTreeSet::new();
        let mut stack = vec![(g.start_symbol.clone(), false)];

        while let Some((n, leaving)) = stack.pop() {
            if leaving {
                grey.remove(&n);
                black.insert(n);
                continue;
            }
            if black.contains(&n) || grey.contains(&n) {
                continue;
            }
            grey.insert(n.clone());
            stack.push((n.clone(), true));
            for p in g.productions_from(&n) {
                for s in &p.right {
                    if let GrammarSymbol::NonTerminal(m) = s {
                        if !g.non_terminals.contains(m) {
                            continue;
                        }
                        if grey.contains(m) {
                            return true;
                        }
                        if !black.contains(m) {
                            stack.push((m.clone(), false));
                        }
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
