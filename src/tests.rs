//! End-to-end scenarios across the whole pipeline: parse → synthesise →
//! convert → reduce → decide.

use std::collections::BTreeSet;

use crate::automaton::{acceptance_list, intersection, union, Dfa, Tuples};
use crate::function::PartialFn;
use crate::regexp::{de_simone, parse_str, thompson};
use crate::RelangError;

/// Scenario: the `01*|1` pipeline. Thompson, determinise, compact,
/// minimise — three states, one initial, two final, and exactly the
/// language {01ⁿ} ∪ {1}.
#[test]
fn test_thompson_pipeline_01star_or_1() {
    let nfae = thompson(&parse_str("01*|1").unwrap()).unwrap();
    let minimal = nfae
        .to_dfa()
        .compact(0)
        .unwrap()
        .minimize()
        .unwrap();

    assert_eq!(minimal.states.len(), 3);
    assert_eq!(minimal.final_states.len(), 2);
    assert!(minimal.states.contains(&minimal.initial_state));

    assert!(minimal.accepts(&['0']));
    assert!(minimal.accepts(&['0', '1']));
    assert!(minimal.accepts(&['0', '1', '1', '1']));
    assert!(minimal.accepts(&['1']));
    assert!(!minimal.accepts(&[]));
    assert!(!minimal.accepts(&['1', '1']));
    assert!(!minimal.accepts(&['1', '0']));
    assert!(!minimal.accepts(&['0', '0']));
}

/// The De Simone pipeline agrees with Thompson's on the same input.
#[test]
fn test_de_simone_pipeline_01star_or_1() {
    let direct = de_simone(parse_str("01*|1").unwrap()).unwrap();
    let minimal = direct.minimize().unwrap();
    assert_eq!(minimal.states.len(), 3);
    assert!(minimal.accepts(&['0', '1', '1']));
    assert!(!minimal.accepts(&['1', '1']));
}

fn even_length() -> Dfa<i32, char> {
    Dfa {
        states: [0, 1].into_iter().collect(),
        alphabet: ['0', '1'].into_iter().collect(),
        delta: [((0, '0'), 1), ((0, '1'), 1), ((1, '0'), 0), ((1, '1'), 0)]
            .into_iter()
            .collect(),
        initial_state: 0,
        final_states: [0].into_iter().collect(),
    }
}

fn value_mod_three() -> Dfa<i32, char> {
    Dfa {
        states: [0, 1, 2].into_iter().collect(),
        alphabet: ['0', '1'].into_iter().collect(),
        delta: [
            ((0, '0'), 0),
            ((0, '1'), 1),
            ((1, '0'), 2),
            ((1, '1'), 0),
            ((2, '0'), 1),
            ((2, '1'), 2),
        ]
        .into_iter()
        .collect(),
        initial_state: 0,
        final_states: [0].into_iter().collect(),
    }
}

/// Scenario: products of the even-length and mod-3 automata have 2×3
/// states, and the intersection accepts exactly the even-length words
/// divisible by three.
#[test]
fn test_product_of_even_length_and_mod_three() {
    let u = union(even_length(), value_mod_three()).unwrap();
    let i = intersection(even_length(), value_mod_three()).unwrap();
    assert_eq!(u.states.len(), 6);
    assert_eq!(i.states.len(), 6);

    for n in 0..=6 {
        for word in Tuples::new(&i.alphabet, n) {
            let even = word.len() % 2 == 0;
            let value = word
                .iter()
                .fold(0u32, |v, c| v * 2 + if *c == '1' { 1 } else { 0 });
            assert_eq!(
                i.accepts(&word),
                even && value % 3 == 0,
                "word {:?}",
                word
            );
        }
    }
}

/// Scenario: the length-5 acceptance list of `(0|1)+:\*:\+`.
///
/// The σ-closure folds to digit blocks separated by single `*` or `+`
/// operators, so the accepted length-5 words are exactly those of the
/// shape `d⁺ ([*+] d⁺)*`.
#[test]
fn test_acceptance_list_of_sigma_regex() {
    let dfa = thompson(&parse_str("(0|1)+:\\*:\\+").unwrap())
        .unwrap()
        .to_dfa()
        .compact(0)
        .unwrap()
        .minimize()
        .unwrap();

    let accepted: BTreeSet<Vec<char>> = acceptance_list(&dfa, 5).into_iter().collect();

    let matches_shape = |word: &[char]| {
        // d⁺ ([*+] d⁺)*: no leading/trailing operator, no two adjacent
        // operators.
        if word.is_empty() {
            return false;
        }
        let is_digit = |c: char| c == '0' || c == '1';
        if !is_digit(word[0]) || !is_digit(word[word.len() - 1]) {
            return false;
        }
        word.windows(2)
            .all(|w| is_digit(w[0]) || is_digit(w[1]))
    };

    let alphabet: BTreeSet<char> = ['0', '1', '*', '+'].into_iter().collect();
    let expected: BTreeSet<Vec<char>> = Tuples::new(&alphabet, 5)
        .filter(|w| matches_shape(w))
        .collect();

    assert_eq!(accepted, expected);
    // 32 all-digit words, 96 with one operator, 32 with two.
    assert_eq!(accepted.len(), 160);
    assert!(accepted.contains(&vec!['0', '*', '1', '+', '0']));
    assert!(accepted.contains(&vec!['0', '0', '0', '0', '0']));
    assert!(!accepted.contains(&vec!['*', '0', '0', '0', '0']));
    assert!(!accepted.contains(&vec!['0', '*', '+', '0', '0']));
}

/// Scenario: `aa+?*` parses; the five malformed inputs do not.
#[test]
fn test_parser_scenarios() {
    assert!(parse_str("aa+?*").is_ok());
    for bad in ["a(", "(a", "(|a)", ")a", "*a"] {
        assert!(
            matches!(parse_str(bad), Err(RelangError::Syntax(_))),
            "regex {:?} should fail",
            bad
        );
    }
}

/// Emptiness agrees with exhaustive enumeration up to |Q|.
#[test]
fn test_empty_iff_no_acceptance_list_up_to_state_count() {
    let empty_lang: Dfa<i32, char> = Dfa {
        states: [0, 1].into_iter().collect(),
        alphabet: ['b'].into_iter().collect(),
        delta: [((0, 'b'), 1)].into_iter().collect(),
        initial_state: 0,
        final_states: BTreeSet::new(),
    };
    assert!(empty_lang.is_empty().unwrap());
    for n in 0..=empty_lang.states.len() {
        assert!(acceptance_list(&empty_lang, n).is_empty());
    }

    let nonempty = even_length();
    assert!(!nonempty.is_empty().unwrap());
    assert!((0..=nonempty.states.len()).any(|n| !acceptance_list(&nonempty, n).is_empty()));
}

/// Infiniteness agrees with enumeration beyond |Q|.
#[test]
fn test_infinite_iff_words_beyond_state_count() {
    let infinite = even_length();
    assert!(infinite.is_infinite());
    let beyond = infinite.states.len() + 2;
    assert!(!acceptance_list(&infinite, beyond).is_empty());

    // a|b: finite, nothing of length 2 or more.
    let finite = de_simone(parse_str("a|b").unwrap()).unwrap();
    assert!(finite.is_finite());
    for n in 2..=5 {
        assert!(acceptance_list(&finite, n).is_empty());
    }
}

/// A full circuit: regex → DFA → grammar → NFA → DFA preserves the
/// language and the decisions.
#[test]
fn test_representation_circuit_preserves_language() {
    let dfa = de_simone(parse_str("(a|b)+c").unwrap()).unwrap();
    let grammar = dfa.clone().to_grammar();
    assert!(!grammar.is_empty());
    assert!(grammar.is_infinite());

    let back = grammar.to_dfa().unwrap();
    for n in 0..=4 {
        for word in Tuples::new(&dfa.alphabet, n) {
            assert_eq!(dfa.accepts(&word), back.accepts(&word), "word {:?}", word);
        }
    }

    let dfa2 = de_simone(parse_str("ac|bc").unwrap()).unwrap();
    assert!(dfa2.included(&dfa).unwrap());
    assert!(!dfa.included(&dfa2).unwrap());
    assert!(!dfa.equivalent(&dfa2).unwrap());
}

/// Grammar emptiness survives the trip to automata.
#[test]
fn test_grammar_and_automaton_decisions_agree() {
    use crate::grammar::{Grammar, GrammarSymbol, Production};
    use GrammarSymbol::{NonTerminal as N, Terminal as T};

    // S → aS | a: the language a⁺.
    let g = Grammar {
        non_terminals: ['S'].into_iter().collect(),
        terminals: ['a'].into_iter().collect(),
        productions: [
            Production {
                left: 'S',
                right: [T('a'), N('S')].into_iter().collect(),
            },
            Production {
                left: 'S',
                right: [T('a')].into_iter().collect(),
            },
        ]
        .into_iter()
        .collect(),
        start_symbol: 'S',
    };

    assert!(!g.is_empty());
    assert!(g.is_infinite());

    let dfa = g.clone().to_dfa().unwrap();
    assert!(!dfa.is_empty().unwrap());
    assert!(dfa.is_infinite());

    // Severing the recursion makes both views finite.
    let mut finite = g;
    finite.productions.retain(|p| p.right.len() == 1);
    assert!(finite.is_finite());
    let dfa = finite.to_dfa().unwrap();
    assert!(dfa.is_finite());
    assert!(!dfa.is_empty().unwrap());
}

/// Reversal round-trips the language.
#[test]
fn test_reverse_round_trip() {
    use crate::automaton::reverse;
    let nfae = thompson(&parse_str("ab*c").unwrap()).unwrap();
    let double = reverse(reverse(nfae.clone()));

    for n in 0..=4 {
        let alphabet: BTreeSet<char> = ['a', 'b', 'c'].into_iter().collect();
        for word in Tuples::new(&alphabet, n) {
            assert_eq!(nfae.accepts(&word), double.accepts(&word), "word {:?}", word);
        }
    }

    let reversed = reverse(nfae);
    assert!(reversed.accepts(&['c', 'a']));
    assert!(reversed.accepts(&['c', 'b', 'b', 'a']));
    assert!(!reversed.accepts(&['a', 'b', 'c']));
}

/// An automaton with every state final accepts everything over its
/// alphabet.
#[test]
fn test_all_final_accepts_all_words() {
    let mut m = even_length();
    m.final_states = m.states.clone();
    for n in 0..=5 {
        assert_eq!(acceptance_list(&m, n).len(), 2usize.pow(n as u32));
    }
}

/// PartialFn surfaces OutOfDomain through the decision procedures when
/// the product is asked about a symbol only one side knows.
#[test]
fn test_mismatched_alphabets_surface_out_of_domain() {
    let mut odd_alphabet = even_length();
    odd_alphabet.alphabet.insert('2');
    let result = union(odd_alphabet, value_mod_three());
    assert_eq!(result.unwrap_err(), RelangError::OutOfDomain);
}

/// Tokenisation, concatenation insertion, and parsing of `ab*c:d`, end
/// to end.
#[test]
fn test_tokenise_scenario_ab_star_c_sigma_d() {
    use crate::regexp::{explicit_concatenations, tokenize, Operator, Token};

    let tokens = tokenize("ab*c:d".chars());
    assert_eq!(
        tokens,
        vec![
            Token::Symbol('a'),
            Token::Symbol('b'),
            Token::Op(Operator::KleeneClosure),
            Token::Symbol('c'),
            Token::Op(Operator::SigmaClosure),
            Token::Symbol('d'),
        ]
    );

    let explicit = explicit_concatenations(&tokens);
    assert_eq!(
        explicit,
        vec![
            Token::Symbol('a'),
            Token::Op(Operator::Concatenation),
            Token::Symbol('b'),
            Token::Op(Operator::KleeneClosure),
            Token::Op(Operator::Concatenation),
            Token::Symbol('c'),
            Token::Op(Operator::SigmaClosure),
            Token::Symbol('d'),
        ]
    );

    // σ binds tighter than the implicit concatenations, so `c:d` is a
    // subtree under the concatenation chain; the language bears it out:
    // a b* c(dc)*.
    let dfa = de_simone(parse_str("ab*c:d").unwrap()).unwrap();
    assert!(dfa.accepts(&['a', 'c']));
    assert!(dfa.accepts(&['a', 'b', 'b', 'c']));
    assert!(dfa.accepts(&['a', 'c', 'd', 'c']));
    assert!(dfa.accepts(&['a', 'b', 'c', 'd', 'c', 'd', 'c']));
    assert!(!dfa.accepts(&['a', 'c', 'd']));
    assert!(!dfa.accepts(&['a', 'c', 'd', 'a', 'c']));
    assert!(!dfa.accepts(&['d']));
}

/// `PartialFn` is the backbone of every δ: spot-check the failure mode
/// at the API surface.
#[test]
fn test_partial_fn_failure_surfaces() {
    let f: PartialFn<(i32, char), i32> = [((0, 'a'), 1)].into_iter().collect();
    assert_eq!(f.apply(&(0, 'b')), Err(RelangError::OutOfDomain));
}
