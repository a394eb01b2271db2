// Pattern syntax tree produced by the parser and consumed by the compiler

use super::class::CharSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// Matches the empty string (empty pattern, empty alternative, `()`)
    Empty,
    /// Literal character
    Literal(char),
    /// Any character (.)
    Any,
    /// Character set ([abc], [^a-z])
    Set(CharSet),
    /// Sequence of nodes
    Concat(Vec<Ast>),
    /// Alternatives, tried left to right (a|b)
    Alternation(Vec<Ast>),
    /// Repetition (*, +, ?, {n,m}); `max: None` means unbounded
    Repetition {
        node: Box<Ast>,
        min: u32,
        max: Option<u32>,
        greedy: bool,
    },
    /// Capture group; `index` starts at 1
    Group { node: Box<Ast>, index: usize },
    /// Start of subject (^)
    AnchorStart,
    /// End of subject ($)
    AnchorEnd,
}

impl Ast {
    /// Check if the tree is a plain literal string (no operators, no groups).
    /// Returns Some(string) if it is, None otherwise.
    pub fn as_literal_string(&self) -> Option<String> {
        match self {
            Ast::Empty => Some(String::new()),
            Ast::Literal(c) => Some(c.to_string()),
            Ast::Concat(nodes) => {
                let mut result = String::new();
                for node in nodes {
                    match node {
                        Ast::Literal(c) => result.push(*c),
                        _ => return None,
                    }
                }
                Some(result)
            }
            _ => None,
        }
    }

    /// True if every match of this tree must begin at offset 0.
    pub fn is_start_anchored(&self) -> bool {
        match self {
            Ast::AnchorStart => true,
            Ast::Concat(nodes) => nodes.first().is_some_and(Ast::is_start_anchored),
            Ast::Group { node, .. } => node.is_start_anchored(),
            Ast::Alternation(branches) => branches.iter().all(Ast::is_start_anchored),
            _ => false,
        }
    }
}
