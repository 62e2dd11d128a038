//! The operand-span locator.
//!
//! For one operator of the static table, finds every occurrence in the normalized input and the
//! span(s) of its operand(s): one for a prefix or postfix operator, two for a binary operator,
//! and N for a flattened commutative run. Balanced delimiter groups are skipped atomically, and
//! operand boundaries are decided by comparing binding power with every operator encountered on
//! the way out from the occurrence.

use crate::catalog::operators::{lookup, Fixity, Operator};
use crate::common::Span;
use crate::diagnostics::Diagnostic;

use std::collections::HashSet;

/// A resolved occurrence of an operator glyph in the input.
struct Occurrence {
    op: &'static Operator,
    start: usize,
    end: usize,
}

/// One application of an operator: its full extent and its operand spans.
#[derive(Debug)]
pub(crate) struct OperandMatch {
    /// Full extent of the application, glyph included.
    pub span: Span,
    /// Operand spans, in notation order.
    pub operands: Vec<Span>,
}

/// Locates operand spans over one normalized input.
///
/// All operator occurrences are resolved up front with maximal munch (`**` wins over `*`) and the
/// adjacency rule for unary disambiguation; individual operators are then located against that
/// shared occurrence index.
pub(crate) struct OperandLocator<'a> {
    chars: &'a [char],
    occurrences: Vec<Occurrence>,
    occupied: Vec<Option<usize>>,
}

/// Characters that may appear inside an operand without bounding it.
fn is_operand_char(c: char) -> bool {
    c.is_alphanumeric() || c == '.' || c == '_'
}

/// Disambiguates `+ - @ $` at position `i`: binary iff the nearest character to the left is
/// operand-like, otherwise (string start, another operator, opening delimiter, comma) prefix.
fn unary_or_binary(chars: &[char], i: usize) -> Fixity {
    match i.checked_sub(1).map(|p| chars[p]) {
        Some(c) if c.is_alphanumeric() || matches!(c, '!' | '\'' | ')' | '}' | ']' | '_') => {
            Fixity::Infix
        }
        _ => Fixity::Prefix,
    }
}

fn complement(c: char) -> (char, char) {
    match c {
        '(' | ')' => ('(', ')'),
        '[' | ']' => ('[', ']'),
        _ => ('{', '}'),
    }
}

impl<'a> OperandLocator<'a> {
    pub fn new(chars: &'a [char]) -> Self {
        let (occurrences, occupied) = Self::scan(chars);
        Self {
            chars,
            occurrences,
            occupied,
        }
    }

    /// Resolves every operator occurrence in the input, longest glyph first.
    fn scan(chars: &[char]) -> (Vec<Occurrence>, Vec<Option<usize>>) {
        let mut occurrences: Vec<Occurrence> = Vec::new();
        let mut occupied: Vec<Option<usize>> = vec![None; chars.len()];
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if is_operand_char(c) || matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | ',') {
                i += 1;
                continue;
            }
            let next = chars.get(i + 1).copied();
            let resolved: Option<(&'static str, Fixity)> = match c {
                '*' if next == Some('*') => Some(("**", Fixity::Infix)),
                '/' if next == Some('/') => Some(("//", Fixity::Infix)),
                '*' => Some(("*", Fixity::Infix)),
                '/' => Some(("/", Fixity::Infix)),
                '%' => Some(("%", Fixity::Infix)),
                '^' => Some(("^", Fixity::Infix)),
                '|' => Some(("|", Fixity::Infix)),
                '~' => Some(("~", Fixity::Prefix)),
                '!' => Some(("!", Fixity::Postfix)),
                '\'' => Some(("'", Fixity::Postfix)),
                '+' => Some(("+", unary_or_binary(chars, i))),
                '-' => Some(("-", unary_or_binary(chars, i))),
                '@' => Some(("@", unary_or_binary(chars, i))),
                // There is no binary `$`; such a character just bounds its neighbors' operands.
                '$' => match unary_or_binary(chars, i) {
                    Fixity::Prefix => Some(("$", Fixity::Prefix)),
                    _ => None,
                },
                _ => None,
            };
            match resolved.and_then(|(glyph, fixity)| lookup(glyph, fixity)) {
                Some(op) => {
                    let end = i + op.glyph.chars().count();
                    let index = occurrences.len();
                    occurrences.push(Occurrence { op, start: i, end });
                    for slot in occupied.iter_mut().take(end).skip(i) {
                        *slot = Some(index);
                    }
                    i = end;
                }
                None => i += 1,
            }
        }
        (occurrences, occupied)
    }

    fn occurrence_at(&self, pos: usize) -> Option<&Occurrence> {
        self.occupied[pos].map(|index| &self.occurrences[index])
    }

    /// Index of the opener matching the closing delimiter at `close`.
    fn matching_open(&self, close: usize) -> Result<usize, Diagnostic> {
        let (open_c, close_c) = complement(self.chars[close]);
        let mut depth = 1;
        let mut i = close as isize - 1;
        while i >= 0 {
            let c = self.chars[i as usize];
            if c == close_c {
                depth += 1;
            } else if c == open_c {
                depth -= 1;
                if depth == 0 {
                    return Ok(i as usize);
                }
            }
            i -= 1;
        }
        Err(UnbalancedDelimiter!(unopened (close, close + 1), close_c))
    }

    /// Index of the closer matching the opening delimiter at `open`.
    fn matching_close(&self, open: usize) -> Result<usize, Diagnostic> {
        let (open_c, close_c) = complement(self.chars[open]);
        let mut depth = 1;
        let mut i = open + 1;
        while i < self.chars.len() {
            let c = self.chars[i];
            if c == open_c {
                depth += 1;
            } else if c == close_c {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            i += 1;
        }
        Err(UnbalancedDelimiter!(unclosed (open, open + 1), open_c))
    }

    /// Expands leftwards from an occurrence to the start of its left operand. Returns the operand
    /// start and, for commutative runs, the glyph spans of same-operator split points.
    fn expand_left(&self, occ: &Occurrence) -> Result<(usize, Vec<(usize, usize)>), Diagnostic> {
        let op = occ.op;
        let mut splits = Vec::new();
        let mut lo = 0;
        let mut i = occ.start as isize - 1;
        while i >= 0 {
            let pos = i as usize;
            let c = self.chars[pos];
            if matches!(c, ')' | ']' | '}') {
                i = self.matching_open(pos)? as isize - 1;
            } else if is_operand_char(c) {
                i -= 1;
            } else if let Some(other) = self.occurrence_at(pos) {
                if std::ptr::eq(other.op, op) {
                    if op.commutative {
                        splits.push((other.start, other.end));
                        i = other.start as isize - 1;
                    } else if op.priority.is_right_assoc() {
                        lo = other.end;
                        break;
                    } else {
                        i = other.start as isize - 1;
                    }
                } else if other.op.priority == op.priority {
                    if op.priority.is_right_assoc() {
                        lo = other.end;
                        break;
                    } else {
                        i = other.start as isize - 1;
                    }
                } else if other.op.priority > op.priority {
                    i = other.start as isize - 1;
                } else {
                    lo = other.end;
                    break;
                }
            } else {
                // opening delimiter, comma, or a character outside the notation
                lo = pos + 1;
                break;
            }
        }
        Ok((lo, splits))
    }

    /// Expands rightwards from an occurrence to the end of its right operand. The mirror image of
    /// [expand_left](OperandLocator::expand_left), except that a prefix operator is always part
    /// of the operand: it can only begin one.
    fn expand_right(&self, occ: &Occurrence) -> Result<(usize, Vec<(usize, usize)>), Diagnostic> {
        let op = occ.op;
        let mut splits = Vec::new();
        let mut hi = self.chars.len();
        let mut i = occ.end;
        while i < self.chars.len() {
            let c = self.chars[i];
            if matches!(c, '(' | '[' | '{') {
                i = self.matching_close(i)? + 1;
            } else if is_operand_char(c) {
                i += 1;
            } else if let Some(other) = self.occurrence_at(i) {
                if other.op.fixity == Fixity::Prefix && !std::ptr::eq(other.op, op) {
                    i = other.end;
                } else if std::ptr::eq(other.op, op) {
                    if op.commutative {
                        splits.push((other.start, other.end));
                        i = other.end;
                    } else if op.fixity == Fixity::Prefix || op.priority.is_right_assoc() {
                        i = other.end;
                    } else {
                        hi = i;
                        break;
                    }
                } else if other.op.priority == op.priority {
                    if op.priority.is_right_assoc() {
                        i = other.end;
                    } else {
                        hi = i;
                        break;
                    }
                } else if other.op.priority > op.priority {
                    i = other.end;
                } else {
                    hi = i;
                    break;
                }
            } else {
                hi = i;
                break;
            }
        }
        Ok((hi, splits))
    }

    /// Returns every application of `target` in the input with its operand spans. Identical
    /// rediscoveries of one commutative run (one per glyph occurrence) are deduplicated.
    pub fn locate(&self, target: &'static Operator) -> Result<Vec<OperandMatch>, Diagnostic> {
        let mut matches = Vec::new();
        let mut seen: HashSet<Vec<(usize, usize)>> = HashSet::new();
        for occ in self
            .occurrences
            .iter()
            .filter(|occ| std::ptr::eq(occ.op, target))
        {
            let (span, operands): (Span, Vec<Span>) = match target.fixity {
                Fixity::Prefix => {
                    let (hi, _) = self.expand_right(occ)?;
                    ((occ.start, hi).into(), vec![(occ.end, hi).into()])
                }
                Fixity::Postfix => {
                    let (lo, _) = self.expand_left(occ)?;
                    ((lo, occ.end).into(), vec![(lo, occ.start).into()])
                }
                Fixity::Infix => {
                    let (lo, left_splits) = self.expand_left(occ)?;
                    let (hi, right_splits) = self.expand_right(occ)?;
                    let mut cuts = left_splits;
                    cuts.push((occ.start, occ.end));
                    cuts.extend(right_splits);
                    cuts.sort_unstable();
                    let mut operands = Vec::with_capacity(cuts.len() + 1);
                    let mut pos = lo;
                    for (cut_start, cut_end) in cuts {
                        operands.push((pos, cut_start).into());
                        pos = cut_end;
                    }
                    operands.push((pos, hi).into());
                    ((lo, hi).into(), operands)
                }
            };
            for operand in &operands {
                if operand.is_empty() {
                    return Err(EmptyOperand!((occ.start, occ.end), target.glyph));
                }
            }
            let key: Vec<(usize, usize)> = operands.iter().map(|s| (s.lo, s.hi)).collect();
            if seen.insert(key) {
                matches.push(OperandMatch { span, operands });
            }
        }
        Ok(matches)
    }
}
