//! Scans symi notation into a catalog of operations.
//!
//! The catalog is the flat, unordered set of every operator application, function call,
//! subscript, and list literal discovered in one normalized input. Catalog entries carry operand
//! spans but no structure; the [tree builder](crate::build_tree) resolves parent/child links by
//! span containment afterwards.

#[macro_use]
pub(crate) mod errors;

mod call;
mod operand;
pub(crate) mod operators;
mod types;

pub use self::operators::Priority;
pub use self::types::{Notation, OpSpec, Operand, Operation};

use self::call::{scan_calls, CallKind};
use self::operand::OperandLocator;
use self::operators::{Fixity, OPERATORS};
use crate::common::Span;
use crate::diagnostics::Diagnostic;

/// The set of all operations discovered in one normalized input.
#[derive(Debug)]
pub struct Catalog {
    /// The normalized source text the catalog's spans index into.
    pub source: String,
    /// The discovered operations. Entry indices are the arena handles used by child links and
    /// the tree builder.
    pub ops: Vec<Operation>,
}

/// Normalizes notation text for scanning: strips all whitespace and rewrites
/// scientific-notation numbers to plain decimal form (`1e3` becomes `1000.0`).
pub fn normalize(text: &str) -> String {
    let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    expand_scientific(&stripped)
}

/// Scans `text` for every known operation and returns the flat catalog.
///
/// Fails with an [UnbalancedDelimiter](errors::UnbalancedDelimiter) or
/// [EmptyOperand](errors::EmptyOperand) diagnostic on malformed input.
pub fn parse_catalog(text: &str) -> Result<Catalog, Diagnostic> {
    let source = normalize(text);
    let chars: Vec<char> = source.chars().collect();
    check_balance(&chars)?;

    let mut ops = Vec::new();
    let calls = scan_calls(&chars)?;
    for kind in &[CallKind::Function, CallKind::Subscript, CallKind::List] {
        for call in calls.iter().filter(|call| call.kind == *kind) {
            let (symbol, notation) = match call.kind {
                CallKind::Function => (call.name.clone(), Notation::Call),
                CallKind::Subscript => (call.name.clone(), Notation::Subscript),
                CallKind::List => ("[]".to_string(), Notation::List),
            };
            let operands = call.args.iter().map(|&arg| operand(&chars, arg)).collect();
            ops.push(Operation::new(
                symbol,
                notation,
                Priority::Call,
                call.span,
                operands,
            ));
        }
    }

    let locator = OperandLocator::new(&chars);
    for op in OPERATORS {
        let notation = match op.fixity {
            Fixity::Prefix => Notation::Prefix,
            Fixity::Infix => Notation::Infix,
            Fixity::Postfix => Notation::Postfix,
        };
        for found in locator.locate(op)? {
            let operands = found.operands.iter().map(|&s| operand(&chars, s)).collect();
            ops.push(Operation::new(
                op.glyph.to_string(),
                notation,
                op.priority,
                found.span,
                operands,
            ));
        }
    }

    Ok(Catalog { source, ops })
}

fn operand(chars: &[char], span: Span) -> Operand {
    Operand {
        span,
        text: chars[span.lo..span.hi].iter().collect(),
    }
}

/// Verifies that every delimiter in the input closes in nesting order. Running this up front
/// keeps every later scan total: balanced-group skips cannot run past the ends of the input.
fn check_balance(chars: &[char]) -> Result<(), Diagnostic> {
    let mut stack: Vec<(char, usize)> = Vec::new();
    for (i, &c) in chars.iter().enumerate() {
        match c {
            '(' | '[' | '{' => stack.push((c, i)),
            ')' | ']' | '}' => {
                let opener = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                match stack.pop() {
                    Some((open, _)) if open == opener => {}
                    Some((open, _)) => {
                        let expected = match open {
                            '(' => ')',
                            '[' => ']',
                            _ => '}',
                        };
                        return Err(UnbalancedDelimiter!(mismatched (i, i + 1), c, expected));
                    }
                    None => return Err(UnbalancedDelimiter!(unopened (i, i + 1), c)),
                }
            }
            _ => {}
        }
    }
    if let Some((open, i)) = stack.pop() {
        return Err(UnbalancedDelimiter!(unclosed (i, i + 1), open));
    }
    Ok(())
}

/// Rewrites every scientific-notation number not preceded by a word character to plain decimal
/// form, leaving everything else untouched.
fn expand_scientific(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let starts_number = (chars[i].is_ascii_digit() || chars[i] == '.')
            && (i == 0 || !(chars[i - 1].is_alphanumeric() || chars[i - 1] == '_'));
        if !starts_number {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
            i += 1;
        }
        let mantissa: String = chars[start..i].iter().collect();
        if i < chars.len() && chars[i] == 'e' {
            let exp_start = i + 1;
            let mut k = exp_start;
            if k < chars.len() && (chars[k] == '+' || chars[k] == '-') {
                k += 1;
            }
            let digits_start = k;
            while k < chars.len() && chars[k].is_ascii_digit() {
                k += 1;
            }
            if k > digits_start {
                let exponent: String = chars[exp_start..k].iter().collect();
                if let Some(plain) = exponent
                    .parse::<i32>()
                    .ok()
                    .and_then(|exp| plain_decimal(&mantissa, exp))
                {
                    out.push_str(&plain);
                    i = k;
                    continue;
                }
            }
        }
        out.push_str(&mantissa);
    }
    out
}

/// Formats `<mantissa>e<exponent>` in plain decimal notation, keeping as many decimals as the
/// scientific form spelled out.
fn plain_decimal(mantissa: &str, exponent: i32) -> Option<String> {
    let value: f64 = format!("{}e{}", mantissa, exponent).parse().ok()?;
    let e_index = mantissa.chars().count() as i32;
    let after_point = match mantissa.find('.') {
        Some(dot) => e_index - dot as i32,
        None => e_index,
    } - exponent;
    let precision = std::cmp::max(after_point - 1, 1) as usize;
    Some(format!("{:.*}", precision, value))
}
