//! Grammar manipulations: dead and unreachable non-terminal removal.

use std::collections::BTreeSet;

use crate::grammar::{Grammar, GrammarSymbol};

impl<N: Ord + Clone, T: Ord + Clone> Grammar<N, T> {
    /// Remove the dead non-terminals: those unable to derive, in one or
    /// more steps, a string of terminals only.
    ///
    /// Least fixed point over "good" symbols. Terminals start good; a
    /// non-terminal becomes good once some production expands it entirely
    /// into good symbols. Everything still bad at the fixpoint is erased,
    /// productions mentioning it included.
    pub fn remove_dead(mut self) -> Grammar<N, T> {
        let mut good: BTreeSet<GrammarSymbol<N, T>> = self
            .terminals
            .iter()
            .map(|t| GrammarSymbol::Terminal(t.clone()))
            .collect();

        let mut marked_last_iteration = true;
        while marked_last_iteration {
            marked_last_iteration = false;
            for p in &self.productions {
                if good.contains(&GrammarSymbol::NonTerminal(p.left.clone())) {
                    continue;
                }
                if p.right.iter().all(|s| good.contains(s)) {
                    good.insert(GrammarSymbol::NonTerminal(p.left.clone()));
                    marked_last_iteration = true;
                }
            }
        }

        for n in self.non_terminals.clone() {
            if !good.contains(&GrammarSymbol::NonTerminal(n.clone())) {
                self.erase(&n);
            }
        }
        self
    }

    /// Remove the non-terminals the start symbol cannot reach through
    /// productions.
    pub fn remove_unreachable(mut self) -> Grammar<N, T> {
        let mut reachable: BTreeSet<N> = [self.start_symbol.clone()].into_iter().collect();

        let mut changed = true;
        while changed {
            changed = false;
            for p in &self.productions {
                if !reachable.contains(&p.left) {
                    continue;
                }
                for s in &p.right {
                    if let GrammarSymbol::NonTerminal(n) = s {
                        if !reachable.contains(n) {
                            reachable.insert(n.clone());
                            changed = true;
                        }
                    }
                }
            }
        }

        for n in self.non_terminals.clone() {
            if !reachable.contains(&n) {
                self.erase(&n);
            }
        }
        self
    }
}
