//! Diagnostic errors produced while scanning a notation catalog.

use crate::diagnostics::{DiagnosticRecord, DiagnosticRegistry};

macro_rules! define_errors {
    ($($(#[doc = $doc:expr])+ $code:ident: $error:ident $gen_macro:tt)*) => {$(
        $(#[doc = $doc])+
        pub(crate) struct $error;

        impl DiagnosticRecord for $error {
            const CODE: &'static str = stringify!($code);
            const EXPLANATION: &'static str = concat!($($doc, "\n"),+);
        })*

        /// Diagnostic errors produced while scanning a notation catalog.
        pub(crate) struct CatalogErrors;

        impl DiagnosticRegistry for CatalogErrors {
            fn codes_with_explanations() -> Vec<(&'static str, &'static str)> {
                let mut vec = Vec::new();
                $(vec.push(($error::CODE, $error::EXPLANATION));)*
                vec
            }
        }

        $(
            macro_rules! $error $gen_macro
        )*
    };
}

define_errors! {
    ///Every opening delimiter in a symi expression must be closed by its complement, in nesting
    ///order. In particular,
    ///
    ///  - `(` and `)` are complements (parentheses)
    ///  - `[` and `]` are complements (brackets)
    ///  - `{` and `}` are complements (braces)
    ///
    ///Operand and argument scanning treats a balanced delimiter group as an atomic unit, so an
    ///unbalanced delimiter leaves an operand without a boundary and the whole expression cannot
    ///be rewritten. Some examples that fire this error:
    ///
    ///```text
    ///cos(x+1
    ///   ^- never closed
    ///```
    ///
    ///```text
    ///x+1)
    ///   ^- never opened
    ///```
    C0001: UnbalancedDelimiter {
        (unclosed $span:expr, $delim:expr) => {{
            use crate::diagnostics::*;

            Diagnostic::span_err(
                $span,
                format!(r#"Unbalanced delimiter "{}""#, $delim),
                $crate::catalog::errors::UnbalancedDelimiter::CODE,
                "this delimiter is never closed".to_string(),
            )
        }};
        (unopened $span:expr, $delim:expr) => {{
            use crate::diagnostics::*;

            Diagnostic::span_err(
                $span,
                format!(r#"Unbalanced delimiter "{}""#, $delim),
                $crate::catalog::errors::UnbalancedDelimiter::CODE,
                "this delimiter is never opened".to_string(),
            )
        }};
        (mismatched $span:expr, $found:expr, $expected:expr) => {{
            use crate::diagnostics::*;

            Diagnostic::span_err(
                $span,
                format!(r#"Mismatched closing delimiter "{}""#, $found),
                $crate::catalog::errors::UnbalancedDelimiter::CODE,
                format!(r#"expected closing "{}""#, $expected),
            )
        }};
    }

    ///Every operator in a symi expression must be fully applied: a binary operator needs an
    ///operand on both sides, a prefix operator needs one to its right, and a postfix operator one
    ///to its left. This error fires when an operand span turns out empty, for example:
    ///
    ///```text
    ///1+
    /// ^- missing a right operand
    ///```
    ///
    ///```text
    ///*a
    ///^- missing a left operand
    ///```
    ///
    ///It also fires when an operator of lower binding power cuts an operand short, as in `a'+b`:
    ///the postfix `'` binds more loosely than `+`, so `+` is left without a left operand.
    ///Parenthesizing the intended operand, as in `(a')+b`, resolves the ambiguity.
    C0002: EmptyOperand {
        ($span:expr, $operator:expr) => {{
            use crate::diagnostics::*;

            Diagnostic::span_err(
                $span,
                format!(r#"Missing an operand for "{}""#, $operator),
                $crate::catalog::errors::EmptyOperand::CODE,
                "expected a nonempty operand here".to_string(),
            )
            .with_note("operands end at the first operator of lower binding power")
        }}
    }
}
