// Pattern parser
// Recursive descent over: alternation < concatenation < repetition < atom

use super::ast::Ast;
use super::class::CharSet;
use crate::error::{RegexError, RegexResult, SyntaxErrorKind};
use crate::limits::{MAX_NESTING_DEPTH, MAX_REPEAT};

/// Parse a pattern string into a syntax tree.
pub fn parse_pattern(pattern: &str) -> RegexResult<Ast> {
    let mut parser = Parser::new(pattern);
    let ast = parser.parse_alternation()?;
    if let Some(c) = parser.peek() {
        // parse_alternation only stops early on ')'
        debug_assert_eq!(c, ')');
        return Err(parser.error_here(SyntaxErrorKind::UnopenedGroup));
    }
    Ok(ast)
}

struct Parser<'a> {
    src: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
    depth: usize,
    groups: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().collect(),
            pos: 0,
            depth: 0,
            groups: 0,
        }
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    #[inline]
    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).map(|&(_, c)| c)
    }

    #[inline]
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Byte offset of the character at char index `pos` (pattern length past the end).
    #[inline]
    fn offset_of(&self, pos: usize) -> usize {
        self.chars.get(pos).map_or(self.src.len(), |&(off, _)| off)
    }

    fn error_at(&self, pos: usize, kind: SyntaxErrorKind) -> RegexError {
        RegexError::syntax(self.offset_of(pos), kind)
    }

    fn error_here(&self, kind: SyntaxErrorKind) -> RegexError {
        self.error_at(self.pos, kind)
    }

    fn enter(&mut self, at: usize) -> RegexResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(self.error_at(at, SyntaxErrorKind::NestedTooDeep));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_alternation(&mut self) -> RegexResult<Ast> {
        let mut branches = vec![self.parse_concat()?];
        while self.peek() == Some('|') {
            self.pos += 1;
            branches.push(self.parse_concat()?);
        }
        if branches.len() == 1 {
            Ok(branches.pop().unwrap_or(Ast::Empty))
        } else {
            Ok(Ast::Alternation(branches))
        }
    }

    fn parse_concat(&mut self) -> RegexResult<Ast> {
        let mut seq = Vec::new();
        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            seq.push(self.parse_repeat()?);
        }
        match seq.len() {
            0 => Ok(Ast::Empty),
            1 => Ok(seq.pop().unwrap_or(Ast::Empty)),
            _ => Ok(Ast::Concat(seq)),
        }
    }

    fn parse_repeat(&mut self) -> RegexResult<Ast> {
        let mut node = self.parse_atom()?;
        let mut wraps = 0;

        loop {
            let op_pos = self.pos;
            let (min, max) = match self.peek() {
                Some('*') => {
                    self.pos += 1;
                    (0, None)
                }
                Some('+') => {
                    self.pos += 1;
                    (1, None)
                }
                Some('?') => {
                    self.pos += 1;
                    (0, Some(1))
                }
                Some('{') => self.parse_bounds()?,
                _ => break,
            };

            // A '?' directly after an operator makes it lazy
            let greedy = if self.peek() == Some('?') {
                self.pos += 1;
                false
            } else {
                true
            };

            wraps += 1;
            self.enter(op_pos)?;
            node = Ast::Repetition {
                node: Box::new(node),
                min,
                max,
                greedy,
            };
        }

        for _ in 0..wraps {
            self.leave();
        }
        Ok(node)
    }

    /// Parse `{n,m}`, `{n,}`, `{,m}`, `{,}` or `{n}`. `self.pos` points to `{`.
    fn parse_bounds(&mut self) -> RegexResult<(u32, Option<u32>)> {
        let open = self.pos;
        let close = (open + 1..self.chars.len())
            .find(|&i| self.chars[i].1 == '}')
            .ok_or_else(|| self.error_at(open, SyntaxErrorKind::MalformedRepeat))?;

        let body = &self.src[self.offset_of(open + 1)..self.offset_of(close)];
        let (min, max) = match body.split_once(',') {
            Some((min, max)) => (
                self.parse_bound(min, open)?,
                self.parse_bound(max, open)?,
            ),
            None => {
                let exact = self.parse_bound(body, open)?;
                if exact.is_none() {
                    return Err(self.error_at(open, SyntaxErrorKind::MalformedRepeat));
                }
                (exact, exact)
            }
        };

        let min = min.unwrap_or(0);
        if let Some(max) = max
            && min > max
        {
            return Err(self.error_at(open, SyntaxErrorKind::RepeatMinOverMax));
        }

        self.pos = close + 1;
        Ok((min, max))
    }

    fn parse_bound(&self, text: &str, open: usize) -> RegexResult<Option<u32>> {
        if text.is_empty() {
            return Ok(None);
        }
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.error_at(open, SyntaxErrorKind::MalformedRepeat));
        }
        match text.parse::<u32>() {
            Ok(n) if n <= MAX_REPEAT => Ok(Some(n)),
            _ => Err(self.error_at(open, SyntaxErrorKind::RepeatTooLarge)),
        }
    }

    fn parse_atom(&mut self) -> RegexResult<Ast> {
        let start = self.pos;
        let Some(c) = self.bump() else {
            return Ok(Ast::Empty);
        };

        match c {
            '(' => {
                self.enter(start)?;
                self.groups += 1;
                let index = self.groups;
                let inner = self.parse_alternation()?;
                if self.peek() != Some(')') {
                    return Err(self.error_at(start, SyntaxErrorKind::UnclosedGroup));
                }
                self.pos += 1;
                self.leave();
                Ok(Ast::Group {
                    node: Box::new(inner),
                    index,
                })
            }
            '*' | '+' | '?' | '{' => Err(self.error_at(start, SyntaxErrorKind::NothingToRepeat(c))),
            '.' => Ok(Ast::Any),
            '^' => Ok(Ast::AnchorStart),
            '$' => Ok(Ast::AnchorEnd),
            '[' => self.parse_set(start),
            '\\' => self.parse_escape(start).map(Ast::Literal),
            c => Ok(Ast::Literal(c)),
        }
    }

    /// `self.pos` points just past the backslash at `start`.
    fn parse_escape(&mut self, start: usize) -> RegexResult<char> {
        let Some(c) = self.bump() else {
            return Err(self.error_at(start, SyntaxErrorKind::TrailingEscape));
        };
        if c.is_ascii_digit() || (c == 'k' && self.peek() == Some('<')) {
            return Err(self.error_at(start, SyntaxErrorKind::Backreference));
        }
        Ok(c)
    }

    /// `self.pos` points just past the `[` at `start`.
    fn parse_set(&mut self, start: usize) -> RegexResult<Ast> {
        let negated = self.peek() == Some('^');
        if negated {
            self.pos += 1;
        }

        let mut set = CharSet::new(negated);
        let mut first = true;

        loop {
            let item_pos = self.pos;
            let Some(c) = self.bump() else {
                return Err(self.error_at(start, SyntaxErrorKind::UnclosedSet));
            };
            // ']' as first char in set is a literal
            if c == ']' && !first {
                break;
            }
            first = false;

            let lo = if c == '\\' { self.set_escape(start)? } else { c };

            // Range: a-z. A '-' right before ']' is a literal.
            if self.peek() == Some('-') && !matches!(self.peek_at(1), None | Some(']')) {
                self.pos += 1;
                let hi = match self.bump() {
                    Some('\\') => self.set_escape(start)?,
                    Some(hi) => hi,
                    None => return Err(self.error_at(start, SyntaxErrorKind::UnclosedSet)),
                };
                if lo > hi {
                    return Err(self.error_at(item_pos, SyntaxErrorKind::ReversedRange(lo, hi)));
                }
                set.push_range(lo, hi);
            } else {
                set.push_char(lo);
            }
        }

        Ok(Ast::Set(set))
    }

    fn set_escape(&mut self, start: usize) -> RegexResult<char> {
        self.bump()
            .ok_or_else(|| self.error_at(start, SyntaxErrorKind::UnclosedSet))
    }
}
