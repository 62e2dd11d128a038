//! Translation of symi notation into the algebra engine's standard syntax.
//!
//! This is the boundary layer the calculator front end calls before handing text to the
//! external algebra engine: pipes flatten to calls, custom spellings rename to the engine's
//! spellings in one atomic pass, and constants rewrite on leaves. The engine itself is an
//! opaque collaborator; it only ever receives the fully rewritten text this module produces.

use crate::catalog::OpSpec;
use crate::diagnostics::Diagnostic;
use crate::transform::{apply_to_leaves, flatten_pipes, rename, replace_variable};

/// Lookup table of custom spellings to the algebra engine's spellings, supplied by
/// configuration.
pub struct TranslationTable {
    /// Operator and function relabelings, applied as one atomic rename pass.
    pub renames: Vec<(OpSpec, OpSpec)>,
    /// Constant spellings, replaced on exactly-matching leaves.
    pub constants: Vec<(String, String)>,
}

impl Default for TranslationTable {
    /// The stock table: trigonometric aliases, the `^` exponent, the unary notation markers,
    /// and the usual constants.
    fn default() -> Self {
        let renames = vec![
            (OpSpec::function("arccos"), OpSpec::function("acos")),
            (OpSpec::function("arcsin"), OpSpec::function("asin")),
            (OpSpec::function("arctan"), OpSpec::function("atan")),
            (OpSpec::function("conj"), OpSpec::function("conjugate")),
            (OpSpec::function("abs"), OpSpec::function("Abs")),
            (OpSpec::operator("^"), OpSpec::operator("**")),
            (OpSpec::prefix("@"), OpSpec::function("__SUB")),
            (OpSpec::prefix("$"), OpSpec::function("__integrate")),
            (OpSpec::postfix("'"), OpSpec::function("__diff")),
            (OpSpec::postfix("!"), OpSpec::function("factorial")),
        ];
        let constants = ["i", "j", "inf", "e"]
            .iter()
            .zip(["I", "J", "oo", "E"].iter())
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        Self { renames, constants }
    }
}

/// Rewrites `expr` into standard algebra-engine syntax using `table`.
///
/// When `substitute` is set, every leaf is first wrapped in the substitution marker so the
/// engine resolves stored variables before evaluating.
pub fn translate(
    expr: &str,
    table: &TranslationTable,
    substitute: bool,
) -> Result<String, Diagnostic> {
    let mut expr = expr.to_string();
    if substitute {
        expr = apply_to_leaves(&expr, &OpSpec::prefix("@"), false)?;
    }
    expr = flatten_pipes(&expr)?;
    let (from, to): (Vec<OpSpec>, Vec<OpSpec>) = table.renames.iter().cloned().unzip();
    expr = rename(&expr, &from, &to)?;
    for (var, standard) in &table.constants {
        expr = replace_variable(&expr, var, standard)?;
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::{translate, TranslationTable};

    fn stock(expr: &str) -> String {
        translate(expr, &TranslationTable::default(), false).unwrap()
    }

    macro_rules! translate_tests {
        ($($name:ident: $input:expr => $expected:expr)*) => {$(
            #[test]
            fn $name() {
                assert_eq!(stock($input), $expected);
            }
        )*};
    }

    translate_tests! {
        function_alias:      "arccos(x)^2"  => "acos(x)**2"
        exponent_operator:   "x^2+1"        => "x**2+1"
        factorial_marker:    "x!"           => "factorial(x)"
        derivative_marker:   "x^2'"         => "__diff(x**2)"
        integral_marker:     "$x+1"         => "__integrate(x+1)"
        substitution_marker: "@x*2"         => "__SUB(x)*2"
        pipe_then_rename:    "x+1 | arccos" => "acos(x+1)"
        constant_leaves:     "2*i"          => "2*I"
        constant_alone:      "e"            => "E"
        untouched_notation:  "a+b*c"        => "a+b*c"
    }

    #[test]
    fn substitute_wraps_leaves_first() {
        let out = translate("x+1", &TranslationTable::default(), true).unwrap();
        assert_eq!(out, "__SUB(x)+__SUB(1)");
    }

    #[test]
    fn malformed_input_propagates() {
        assert!(translate("cos(x", &TranslationTable::default(), false).is_err());
    }
}
