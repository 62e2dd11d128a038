//! The function, subscript and list-literal span locator.
//!
//! Function calls and subscripts share one algorithm keyed by their opening delimiter; a list
//! literal is an opening bracket *not* preceded by a word character. Argument spans split at
//! top-level commas, with nested delimiter groups skipped atomically.

use crate::common::Span;
use crate::diagnostics::Diagnostic;

/// The spelling of a located call-like span.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub(crate) enum CallKind {
    /// `name(arg, ...)`
    Function,
    /// `name[arg, ...]`
    Subscript,
    /// `[item, ...]`
    List,
}

/// One located call, subscript, or list literal.
#[derive(Debug)]
pub(crate) struct CallMatch {
    pub kind: CallKind,
    /// The called name; empty for list literals.
    pub name: String,
    /// Full extent, from the first name character (or opening bracket) through the closer.
    pub span: Span,
    /// Argument spans, delimiters and commas excluded.
    pub args: Vec<Span>,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits the arguments of the group opening at `open`, returning the index of the matching
/// closer and the top-level argument spans.
fn split_args(chars: &[char], open: usize) -> Result<(usize, Vec<Span>), Diagnostic> {
    let (open_c, close_c) = if chars[open] == '(' {
        ('(', ')')
    } else {
        ('[', ']')
    };
    let (other_open, _other_close) = if open_c == '(' { ('[', ']') } else { ('(', ')') };

    let mut args: Vec<Span> = Vec::new();
    let mut arg_start = open + 1;
    let mut depth = 1;
    let mut i = open + 1;
    loop {
        if i >= chars.len() {
            return Err(UnbalancedDelimiter!(unclosed (open, open + 1), open_c));
        }
        let c = chars[i];
        if c == other_open || c == '{' {
            // the other delimiter kind and braces are atomic
            i = skip_group(chars, i)?;
        } else if c == open_c {
            depth += 1;
        } else if c == close_c {
            depth -= 1;
            if depth == 0 {
                args.push((arg_start, i).into());
                return Ok((i, args));
            }
        } else if c == ',' && depth == 1 {
            args.push((arg_start, i).into());
            arg_start = i + 1;
        }
        i += 1;
    }
}

/// Index of the closer matching the opener at `open`, counting only that delimiter kind.
fn skip_group(chars: &[char], open: usize) -> Result<usize, Diagnostic> {
    let (open_c, close_c) = match chars[open] {
        '(' => ('(', ')'),
        '[' => ('[', ']'),
        _ => ('{', '}'),
    };
    let mut depth = 1;
    let mut i = open + 1;
    while i < chars.len() {
        if chars[i] == open_c {
            depth += 1;
        } else if chars[i] == close_c {
            depth -= 1;
            if depth == 0 {
                return Ok(i);
            }
        }
        i += 1;
    }
    Err(UnbalancedDelimiter!(unclosed (open, open + 1), open_c))
}

/// Locates every function call, subscript, and list literal in the input.
pub(crate) fn scan_calls(chars: &[char]) -> Result<Vec<CallMatch>, Diagnostic> {
    let mut calls = Vec::new();
    for (i, &c) in chars.iter().enumerate() {
        if c != '(' && c != '[' {
            continue;
        }
        // the called name is the maximal word-character run before the opener
        let mut name_start = i;
        while name_start > 0 && is_word_char(chars[name_start - 1]) {
            name_start -= 1;
        }
        let kind = match (c, name_start < i) {
            ('(', true) => CallKind::Function,
            ('(', false) => continue, // a plain grouping parenthesis
            ('[', true) => CallKind::Subscript,
            ('[', false) => CallKind::List,
            // `c` is guaranteed to be '(' or '[' by the guard above
            _ => unreachable!(),
        };
        let (close, mut args) = split_args(chars, i)?;
        if args.len() == 1 && args[0].is_empty() {
            // a zero-argument call like `f()`
            args.clear();
        }
        for arg in &args {
            if arg.is_empty() {
                return Err(EmptyOperand!((i, close + 1), ","));
            }
        }
        calls.push(CallMatch {
            kind,
            name: chars[name_start..i].iter().collect(),
            span: (name_start, close + 1).into(),
            args,
        });
    }
    Ok(calls)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(input: &str, kind: CallKind) -> Vec<Vec<String>> {
        let chars: Vec<char> = input.chars().collect();
        scan_calls(&chars)
            .unwrap()
            .into_iter()
            .filter(|call| call.kind == kind)
            .map(|call| {
                call.args
                    .iter()
                    .map(|s| chars[s.lo..s.hi].iter().collect())
                    .collect()
            })
            .collect()
    }

    macro_rules! call_tests {
        ($($name:ident: $input:expr, $kind:ident => [$($arg:expr),*])*) => {$(
            #[test]
            fn $name() {
                let all = args_of($input, CallKind::$kind);
                let expected: Vec<String> = vec![$($arg.to_string()),*];
                assert_eq!(all[0], expected);
            }
        )*};
    }

    call_tests! {
        single_argument:      "cos(x)", Function => ["x"]
        splits_top_level:     "f(g(x,y),[1,2,3])", Function => ["g(x,y)", "[1,2,3]"]
        subscript_args:       "k[0]", Subscript => ["0"]
        subscript_two_args:   "m[i,j]", Subscript => ["i", "j"]
        list_items:           "[1,2,3]", List => ["1", "2", "3"]
        list_after_comma:     "f(x,[a,b])", List => ["a", "b"]
        braces_are_atomic:    "f({a,b},c)", Function => ["{a,b}", "c"]
        zero_arguments:       "f()", Function => []
    }

    #[test]
    fn nested_same_name_calls_both_found() {
        let all = args_of("cos(cos(x))", CallKind::Function);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], vec!["cos(x)".to_string()]);
        assert_eq!(all[1], vec!["x".to_string()]);
    }

    #[test]
    fn bracket_after_group_is_a_list() {
        let chars: Vec<char> = "f(x)[0]".chars().collect();
        let calls = scan_calls(&chars).unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].kind, CallKind::List);
    }

    #[test]
    fn unclosed_call_is_fatal() {
        let chars: Vec<char> = "cos(x+1".chars().collect();
        let err = scan_calls(&chars).unwrap_err();
        assert_eq!(err.code, Some("C0001"));
    }
}
