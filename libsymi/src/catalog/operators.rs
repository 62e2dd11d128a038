//! The static operator table of symi notation.
//!
//! The table is ordered by binding power and is the single source of truth for occurrence
//! scanning, operand boundary detection, and parenthesization decisions. It is initialized once
//! and shared read-only across all calls.

use lazy_static::lazy_static;

use std::collections::HashMap;

/// Where an operator sits relative to its operands.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Fixity {
    /// `OP operand`
    Prefix,
    /// `lhs OP rhs`
    Infix,
    /// `operand OP`
    Postfix,
}

/// The precedence bucket an operation belongs to, ordered from lowest to highest binding power.
///
/// Parenthesization compares buckets, not operators: `+` and `-` share [Additive], so `a+b-c`
/// re-renders without parentheses. Function calls, subscripts and list literals all sit in the
/// highest, self-delimiting [Call] bucket.
///
/// [Additive]: Priority::Additive
/// [Call]: Priority::Call
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug)]
pub enum Priority {
    /// `lhs | name`, rewritten to `name(lhs)` by pipe flattening.
    Pipe,
    /// Postfix `'`.
    Derivative,
    /// Prefix `$`.
    Integral,
    /// `+` and `-`.
    Additive,
    /// `*`, `/`, `//`, `%` and `@`.
    Multiplicative,
    /// Prefix `+`, `-` and `~`.
    Sign,
    /// `**` and `^`.
    Exponent,
    /// Postfix `!`.
    Factorial,
    /// Prefix `@`, marking a stored-variable substitution.
    Substitution,
    /// Function calls, subscripts and list literals.
    Call,
}

impl Priority {
    /// Whether operators in this bucket associate right-to-left.
    pub(crate) fn is_right_assoc(&self) -> bool {
        matches!(self, Priority::Exponent)
    }
}

/// A notation operator known to the catalog scanner.
#[derive(Debug)]
pub struct Operator {
    /// The operator's glyph as written in notation text.
    pub glyph: &'static str,
    /// Where the operator sits relative to its operands.
    pub fixity: Fixity,
    /// The operator's precedence bucket.
    pub priority: Priority,
    /// Whether runs of the operator flatten into one n-ary operation.
    pub commutative: bool,
}

/// Every operator the catalog scans for. Unary variants are separate entries scanned
/// independently of their binary spellings.
pub static OPERATORS: &[Operator] = &[
    Operator {
        glyph: "|",
        fixity: Fixity::Infix,
        priority: Priority::Pipe,
        commutative: false,
    },
    Operator {
        glyph: "'",
        fixity: Fixity::Postfix,
        priority: Priority::Derivative,
        commutative: false,
    },
    Operator {
        glyph: "$",
        fixity: Fixity::Prefix,
        priority: Priority::Integral,
        commutative: false,
    },
    Operator {
        glyph: "+",
        fixity: Fixity::Infix,
        priority: Priority::Additive,
        commutative: true,
    },
    Operator {
        glyph: "-",
        fixity: Fixity::Infix,
        priority: Priority::Additive,
        commutative: false,
    },
    Operator {
        glyph: "*",
        fixity: Fixity::Infix,
        priority: Priority::Multiplicative,
        commutative: true,
    },
    Operator {
        glyph: "/",
        fixity: Fixity::Infix,
        priority: Priority::Multiplicative,
        commutative: false,
    },
    Operator {
        glyph: "//",
        fixity: Fixity::Infix,
        priority: Priority::Multiplicative,
        commutative: false,
    },
    Operator {
        glyph: "%",
        fixity: Fixity::Infix,
        priority: Priority::Multiplicative,
        commutative: false,
    },
    Operator {
        glyph: "@",
        fixity: Fixity::Infix,
        priority: Priority::Multiplicative,
        commutative: false,
    },
    Operator {
        glyph: "+",
        fixity: Fixity::Prefix,
        priority: Priority::Sign,
        commutative: false,
    },
    Operator {
        glyph: "-",
        fixity: Fixity::Prefix,
        priority: Priority::Sign,
        commutative: false,
    },
    Operator {
        glyph: "~",
        fixity: Fixity::Prefix,
        priority: Priority::Sign,
        commutative: false,
    },
    Operator {
        glyph: "**",
        fixity: Fixity::Infix,
        priority: Priority::Exponent,
        commutative: false,
    },
    Operator {
        glyph: "^",
        fixity: Fixity::Infix,
        priority: Priority::Exponent,
        commutative: false,
    },
    Operator {
        glyph: "!",
        fixity: Fixity::Postfix,
        priority: Priority::Factorial,
        commutative: false,
    },
    Operator {
        glyph: "@",
        fixity: Fixity::Prefix,
        priority: Priority::Substitution,
        commutative: false,
    },
];

lazy_static! {
    static ref BY_SPELLING: HashMap<(&'static str, Fixity), &'static Operator> = OPERATORS
        .iter()
        .map(|op| ((op.glyph, op.fixity), op))
        .collect();
}

/// Looks up the operator written as `glyph` with the given fixity.
pub(crate) fn lookup(glyph: &str, fixity: Fixity) -> Option<&'static Operator> {
    let table: &HashMap<(&str, Fixity), &'static Operator> = &BY_SPELLING;
    table.get(&(glyph, fixity)).copied()
}
