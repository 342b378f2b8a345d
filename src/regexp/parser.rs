//! Regex tokenisation and parsing.
//!
//! Three stages: [`tokenize`] maps characters onto tokens, with `\` as a
//! one-character literal escape, `&` for ε, and `.` dropped (concatenation
//! is implicit); [`explicit_concatenations`] re-inserts the concatenation
//! operator between adjacent operands; [`build_expression_tree`] runs a
//! recursive descent with one production per precedence level, growing the
//! tree by right ascents:
//!
//! ```text
//! alt   → cat ( '|' cat )*
//! cat   → sig ( '.' sig )*
//! sig   → unary ( ':' unary )*
//! unary → atom ( '*' | '+' | '?' )*
//! atom  → '(' alt ')' | symbol | ε
//! ```

use crate::regexp::tokens::{ExprValue, Operator, Paren, Token};
use crate::tree::{ExprTree, NodeId};
use crate::RelangError;

/// Parse a regular expression into its annotated expression tree.
pub fn parse<T, I>(input: I) -> Result<ExprTree<ExprValue<T>>, RelangError>
where
    T: Clone + Default + Into<char>,
    I: IntoIterator<Item = T>,
{
    build_expression_tree(&explicit_concatenations(&tokenize(input)))
}

/// Parse a regular expression given as a string slice.
pub fn parse_str(input: &str) -> Result<ExprTree<ExprValue<char>>, RelangError> {
    parse(input.chars())
}

/// Turn a symbol sequence into a token vector.
///
/// The control characters are `:*+?.|()&\`. A backslash forces the next
/// character to be read literally; a trailing backslash is dropped
/// silently. Dots are discarded here — other stages deal with
/// concatenation being implicit. Whitespace is a literal symbol like any
/// other.
pub fn tokenize<T, I>(input: I) -> Vec<Token<T>>
where
    T: Clone + Into<char>,
    I: IntoIterator<Item = T>,
{
    let mut tokens = Vec::new();
    let mut next_is_literal = false;

    for symbol in input {
        if next_is_literal {
            tokens.push(Token::Symbol(symbol));
            next_is_literal = false;
            continue;
        }
        match symbol.clone().into() {
            ':' => tokens.push(Token::Op(Operator::SigmaClosure)),
            '*' => tokens.push(Token::Op(Operator::KleeneClosure)),
            '+' => tokens.push(Token::Op(Operator::PositiveClosure)),
            '?' => tokens.push(Token::Op(Operator::Optional)),
            '|' => tokens.push(Token::Op(Operator::VerticalBar)),
            '(' => tokens.push(Token::Paren(Paren::Left)),
            ')' => tokens.push(Token::Paren(Paren::Right)),
            '&' => tokens.push(Token::Epsilon),
            '.' => {}
            '\\' => next_is_literal = true,
            _ => tokens.push(Token::Symbol(symbol)),
        }
    }
    tokens
}

/// Make the implicit concatenations explicit.
///
/// A concatenation operator is inserted before each symbol, ε, or left
/// parenthesis, except when the preceding token is `|`, `:`, `.`, a left
/// parenthesis, or there is no preceding token.
pub fn explicit_concatenations<T: Clone>(input: &[Token<T>]) -> Vec<Token<T>> {
    let mut output = Vec::with_capacity(input.len() * 2);
    let mut skip_next = true;

    for token in input {
        if skip_next {
            output.push(token.clone());
            skip_next = false;
            continue;
        }

        if matches!(
            token,
            Token::Symbol(_) | Token::Epsilon | Token::Paren(Paren::Left)
        ) {
            output.push(Token::Op(Operator::Concatenation));
        }

        if matches!(
            token,
            Token::Op(Operator::VerticalBar)
                | Token::Op(Operator::SigmaClosure)
                | Token::Op(Operator::Concatenation)
                | Token::Paren(Paren::Left)
        ) {
            skip_next = true;
        }

        output.push(token.clone());
    }
    output
}

/// Build the expression tree for a token vector.
pub fn build_expression_tree<T: Clone + Default>(
    tokens: &[Token<T>],
) -> Result<ExprTree<ExprValue<T>>, RelangError> {
    let mut tree = ExprTree::new();
    let mut builder = TreeBuilder { tokens, index: 0 };
    let root = tree.root();
    builder.build_subexpression(&mut tree, root)?;

    if builder.index != tokens.len() {
        return Err(RelangError::Syntax("unbalanced parentheses".into()));
    }
    Ok(tree)
}

/// Recursive-descent state: the token vector and a read position.
struct TreeBuilder<'a, T> {
    tokens: &'a [Token<T>],
    index: usize,
}

impl<T: Clone + Default> TreeBuilder<'_, T> {
    fn peek(&self) -> Option<&Token<T>> {
        self.tokens.get(self.index)
    }

    /// `alt → cat ( '|' cat )*`
    fn build_subexpression(
        &mut self,
        tree: &mut ExprTree<ExprValue<T>>,
        node: NodeId,
    ) -> Result<(), RelangError> {
        self.build_until_bar(tree, node)?;
        while matches!(self.peek(), Some(Token::Op(Operator::VerticalBar))) {
            tree.right_ascent(node);
            tree.set_value(node, ExprValue::Op(Operator::VerticalBar));
            self.index += 1;
            let right = tree.ensure_right_child(node);
            self.build_until_bar(tree, right)?;
        }
        Ok(())
    }

    /// `cat → sig ( '.' sig )*`
    fn build_until_bar(
        &mut self,
        tree: &mut ExprTree<ExprValue<T>>,
        node: NodeId,
    ) -> Result<(), RelangError> {
        self.build_until_cat(tree, node)?;
        while matches!(self.peek(), Some(Token::Op(Operator::Concatenation))) {
            tree.right_ascent(node);
            tree.set_value(node, ExprValue::Op(Operator::Concatenation));
            self.index += 1;
            let right = tree.ensure_right_child(node);
            self.build_until_cat(tree, right)?;
        }
        Ok(())
    }

    /// `sig → unary ( ':' unary )*`
    fn build_until_cat(
        &mut self,
        tree: &mut ExprTree<ExprValue<T>>,
        node: NodeId,
    ) -> Result<(), RelangError> {
        self.build_unary(tree, node)?;
        while matches!(self.peek(), Some(Token::Op(Operator::SigmaClosure))) {
            tree.right_ascent(node);
            tree.set_value(node, ExprValue::Op(Operator::SigmaClosure));
            self.index += 1;
            let right = tree.ensure_right_child(node);
            self.build_unary(tree, right)?;
        }
        Ok(())
    }

    /// `unary → atom ( '*' | '+' | '?' )*`
    fn build_unary(
        &mut self,
        tree: &mut ExprTree<ExprValue<T>>,
        node: NodeId,
    ) -> Result<(), RelangError> {
        match self.peek() {
            None => return Err(RelangError::Syntax("missing operand".into())),
            Some(Token::Paren(Paren::Left)) => {
                self.index += 1;
                self.build_subexpression(tree, node)?;
                if !matches!(self.peek(), Some(Token::Paren(Paren::Right))) {
                    return Err(RelangError::Syntax("unbalanced parentheses".into()));
                }
            }
            Some(Token::Symbol(s)) => tree.set_value(node, ExprValue::Symbol(s.clone())),
            Some(Token::Epsilon) => tree.set_value(node, ExprValue::Epsilon),
            Some(Token::Paren(Paren::Right)) => {
                return Err(RelangError::Syntax("lacking inner symbol".into()))
            }
            Some(Token::Op(_)) => {
                return Err(RelangError::Syntax("wrong operator sequence".into()))
            }
        }
        self.index += 1;

        // The base is built; stack any postfix operators above it.
        while let Some(&Token::Op(op)) = self.peek() {
            if !matches!(
                op,
                Operator::KleeneClosure | Operator::PositiveClosure | Operator::Optional
            ) {
                break;
            }
            tree.right_ascent(node);
            tree.set_value(node, ExprValue::Op(op));
            self.index += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Flatten a tree into a parenthesised prefix string, for structural
    /// comparisons across different arena layouts.
    pub(crate) fn shape(tree: &ExprTree<ExprValue<char>>) -> String {
        fn walk(tree: &ExprTree<ExprValue<char>>, n: NodeId, out: &mut String) {
            if n.is_none() {
                out.push('_');
                return;
            }
            match tree.value(n) {
                ExprValue::Symbol(c) => out.push(*c),
                ExprValue::Epsilon => out.push('&'),
                ExprValue::Op(op) => {
                    out.push(match op {
                        Operator::KleeneClosure => '*',
                        Operator::PositiveClosure => '+',
                        Operator::Optional => '?',
                        Operator::SigmaClosure => ':',
                        Operator::Concatenation => '.',
                        Operator::VerticalBar => '|',
                    });
                    out.push('(');
                    walk(tree, tree.left_child(n), out);
                    out.push(',');
                    walk(tree, tree.right_child(n), out);
                    out.push(')');
                }
            }
        }
        let mut out = String::new();
        walk(tree, tree.root(), &mut out);
        out
    }

    #[test]
    fn test_tokenize_controls_and_escapes() {
        let tokens = tokenize("a:b(\\(.*\\.))".chars());
        assert_eq!(
            tokens,
            vec![
                Token::Symbol('a'),
                Token::Op(Operator::SigmaClosure),
                Token::Symbol('b'),
                Token::Paren(Paren::Left),
                Token::Symbol('('),
                Token::Op(Operator::KleeneClosure),
                Token::Symbol('.'),
                Token::Paren(Paren::Right),
                Token::Paren(Paren::Right),
            ]
        );
    }

    #[test]
    fn test_tokenize_epsilon_whitespace_and_trailing_backslash() {
        let tokens = tokenize("a a+|b?&\\".chars());
        assert_eq!(
            tokens,
            vec![
                Token::Symbol('a'),
                Token::Symbol(' '),
                Token::Symbol('a'),
                Token::Op(Operator::PositiveClosure),
                Token::Op(Operator::VerticalBar),
                Token::Symbol('b'),
                Token::Op(Operator::Optional),
                Token::Epsilon,
            ]
        );
    }

    #[test]
    fn test_explicit_concatenations() {
        let tokens = explicit_concatenations(&tokenize("ab*c:d".chars()));
        assert_eq!(
            tokens,
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
    }

    #[test]
    fn test_no_concatenation_inserted_at_start_or_after_opener() {
        let tokens = explicit_concatenations(&tokenize("(a|b)c".chars()));
        assert_eq!(
            tokens,
            vec![
                Token::Paren(Paren::Left),
                Token::Symbol('a'),
                Token::Op(Operator::VerticalBar),
                Token::Symbol('b'),
                Token::Paren(Paren::Right),
                Token::Op(Operator::Concatenation),
                Token::Symbol('c'),
            ]
        );
    }

    #[test]
    fn test_parse_precedence() {
        // "ab|c" has | at the root, with ab on the left.
        assert_eq!(shape(&parse_str("ab|c").unwrap()), "|(.(a,b),c)");
        // ':' binds tighter than concatenation, looser than postfix.
        assert_eq!(
            shape(&parse_str("ab*c:d").unwrap()),
            ".(.(a,*(b,_)),:(c,d))"
        );
        // Left associativity everywhere.
        assert_eq!(shape(&parse_str("a|b|c").unwrap()), "|(|(a,b),c)");
        assert_eq!(shape(&parse_str("a:b:c").unwrap()), ":(:(a,b),c)");
    }

    #[test]
    fn test_parse_unary_stacking() {
        assert_eq!(shape(&parse_str("aa+?*").unwrap()), ".(a,*(?(+(a,_),_),_))");
    }

    #[test]
    fn test_parse_is_invariant_under_outer_parentheses() {
        for re in ["a", "ab|c", "ab*c:d", "(a|b)c"] {
            let plain = parse_str(re).unwrap();
            let wrapped = parse_str(&format!("({})", re)).unwrap();
            assert_eq!(shape(&plain), shape(&wrapped), "regex {:?}", re);
        }
    }

    #[test]
    fn test_parse_groups() {
        assert_eq!(shape(&parse_str("a(a|b)").unwrap()), ".(a,|(a,b))");
    }

    #[test]
    fn test_parse_epsilon_literal() {
        assert_eq!(shape(&parse_str("a|&").unwrap()), "|(a,&)");
    }

    #[test]
    fn test_syntax_errors() {
        for bad in ["a(", "(a", "(|a)", ")a", "*a", "a|", "", "()"] {
            assert!(
                matches!(parse_str(bad), Err(RelangError::Syntax(_))),
                "regex {:?} should fail",
                bad
            );
        }
    }
}
