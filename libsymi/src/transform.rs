//! Structural transforms over the operation catalog.
//!
//! Every transform is a fresh catalog → tree → edit → render pass over an immutable input
//! string: there is no cross-call state, and a caller gets either a completely rewritten string
//! or a fatal diagnostic, never a partial result.

use crate::catalog::{parse_catalog, Notation, OpSpec, Operation, Priority};
use crate::diagnostics::{Diagnostic, DiagnosticRecord, DiagnosticRegistry};
use crate::render::render_tree;
use crate::tree::build_tree;

///The round-trip validator warns when an expression does not re-render to its own
///whitespace-stripped text. Two common reasons:
///
///  - redundant parentheses, as in `(a+b)` or `(a*b)+c` — harmless, the rewritten result is
///    equivalent;
///  - juxtapositions the notation does not track, such as implicit multiplication — the
///    rewritten result may differ from what was meant, so the expression should be retyped
///    explicitly.
///
///The warning is advisory: processing continues with the re-rendered form.
pub(crate) struct UnsupportedNotation;

impl DiagnosticRecord for UnsupportedNotation {
    const CODE: &'static str = "V0001";
    const EXPLANATION: &'static str = concat!(
        "The round-trip validator warns when an expression does not re-render to its own\n",
        "whitespace-stripped text. Two common reasons:\n",
        "\n",
        "  - redundant parentheses, as in `(a+b)` or `(a*b)+c` — harmless, the rewritten result\n",
        "    is equivalent;\n",
        "  - juxtapositions the notation does not track, such as implicit multiplication — the\n",
        "    rewritten result may differ from what was meant, so the expression should be\n",
        "    retyped explicitly.\n",
        "\n",
        "The warning is advisory: processing continues with the re-rendered form.\n",
    );
}

/// Diagnostic warnings produced by round-trip validation.
pub(crate) struct ValidationWarnings;

impl DiagnosticRegistry for ValidationWarnings {
    fn codes_with_explanations() -> Vec<(&'static str, &'static str)> {
        vec![(UnsupportedNotation::CODE, UnsupportedNotation::EXPLANATION)]
    }
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parses `expr` and renders it back: the identity rewrite.
///
/// Input with no operations at all (a bare number or name) is returned normalized; empty input
/// fails with [NoUniqueRoot](crate::tree::errors::NoUniqueRoot).
pub fn rewrite(expr: &str) -> Result<String, Diagnostic> {
    let mut catalog = parse_catalog(expr)?;
    if !catalog.ops.is_empty() {
        let tree = build_tree(&mut catalog)?;
        return Ok(render_tree(&tree, &catalog));
    }
    if catalog.source.is_empty() {
        // empty input: the tree builder reports the canonical no-root error
        build_tree(&mut catalog)?;
    }
    Ok(catalog.source)
}

/// Relabels every catalog entry matching an entry of `from` with the corresponding entry of
/// `to`, in one atomic pass, then renders once.
///
/// The pass is atomic on purpose: renaming symbols one at a time through repeated render/parse
/// round-trips corrupts later matches whenever a target name collides with a still-unprocessed
/// source name. Here every entry is relabeled at most once.
pub fn rename(expr: &str, from: &[OpSpec], to: &[OpSpec]) -> Result<String, Diagnostic> {
    let mut catalog = parse_catalog(expr)?;
    if catalog.ops.is_empty() {
        return Ok(catalog.source);
    }
    let tree = build_tree(&mut catalog)?;
    let mut touched = vec![false; catalog.ops.len()];
    for (from, to) in from.iter().zip(to.iter()) {
        for (index, op) in catalog.ops.iter_mut().enumerate() {
            if !touched[index] && op.spec() == *from {
                relabel(op, to);
                touched[index] = true;
            }
        }
    }
    Ok(render_tree(&tree, &catalog))
}

fn relabel(op: &mut Operation, to: &OpSpec) {
    if to.is_function {
        op.symbol = to.name.clone();
        op.notation = Notation::Call;
        // calls delimit themselves, so children must not inherit operator parenthesization
        op.priority = Priority::Call;
        return;
    }
    if let Some(glyph) = to.name.strip_suffix('u') {
        op.symbol = glyph.to_string();
        op.notation = Notation::Prefix;
    } else if let Some(glyph) = to.name.strip_suffix('s') {
        op.symbol = glyph.to_string();
        op.notation = Notation::Postfix;
    } else {
        op.symbol = to.name.clone();
        op.notation = Notation::Infix;
    }
    // operator targets keep the entry's bucket: the operation still renders where it sat
}

/// Wraps every leaf operand in `func`, optionally quoting the leaf text first, then renders.
pub fn apply_to_leaves(expr: &str, func: &OpSpec, stringify: bool) -> Result<String, Diagnostic> {
    let mut catalog = parse_catalog(expr)?;
    if catalog.ops.is_empty() {
        return Ok(wrap_leaf(&catalog.source, func, stringify));
    }
    let tree = build_tree(&mut catalog)?;
    for op in catalog.ops.iter_mut() {
        for slot in 0..op.operands.len() {
            if op.children[slot].is_none() {
                op.operands[slot].text = wrap_leaf(&op.operands[slot].text, func, stringify);
            }
        }
    }
    Ok(render_tree(&tree, &catalog))
}

fn wrap_leaf(text: &str, func: &OpSpec, stringify: bool) -> String {
    let text = if stringify {
        format!("'{}'", text)
    } else {
        text.to_string()
    };
    if func.is_function {
        format!("{}({})", func.name, text)
    } else if let Some(glyph) = func.name.strip_suffix('s') {
        format!("{}{}", text, glyph)
    } else {
        let glyph = func.name.strip_suffix('u').unwrap_or(&func.name);
        format!("{}{}", glyph, text)
    }
}

/// Reinterprets every pipe application `lhs | name` as the unary call `name(lhs)`, then renders.
pub fn flatten_pipes(expr: &str) -> Result<String, Diagnostic> {
    let mut catalog = parse_catalog(expr)?;
    if catalog.ops.is_empty() {
        return Ok(catalog.source);
    }
    let tree = build_tree(&mut catalog)?;
    for op in catalog.ops.iter_mut() {
        if op.notation == Notation::Infix && op.symbol == "|" {
            op.symbol = op.operands[1].text.clone();
            op.notation = Notation::Call;
            op.priority = Priority::Call;
            op.operands.remove(1);
            op.children.remove(1);
        }
    }
    Ok(render_tree(&tree, &catalog))
}

/// Rewrites every leaf operand exactly equal to `var` with `new`, then renders.
pub fn replace_variable(expr: &str, var: &str, new: &str) -> Result<String, Diagnostic> {
    let mut catalog = parse_catalog(expr)?;
    if catalog.ops.is_empty() {
        if catalog.source == var {
            return Ok(new.to_string());
        }
        return Ok(catalog.source);
    }
    let tree = build_tree(&mut catalog)?;
    for op in catalog.ops.iter_mut() {
        for slot in 0..op.operands.len() {
            if op.children[slot].is_none() && op.operands[slot].text == var {
                op.operands[slot].text = new.to_string();
            }
        }
    }
    Ok(render_tree(&tree, &catalog))
}

/// Reports the identity of the expression's root operation, or `None` for an expression with no
/// operations at all.
pub fn root_operation(expr: &str) -> Result<Option<OpSpec>, Diagnostic> {
    let mut catalog = parse_catalog(expr)?;
    if catalog.ops.is_empty() {
        return Ok(None);
    }
    let tree = build_tree(&mut catalog)?;
    Ok(Some(catalog.ops[tree.root].spec()))
}

/// Whether `expr` round-trips through the engine unchanged (modulo whitespace).
///
/// This doubles as a fuzz oracle: for any accepted input, a second rewrite of the rewritten
/// text must be the identity.
pub fn is_supported(expr: &str) -> bool {
    match rewrite(expr) {
        Ok(rendered) => rendered == strip_whitespace(expr),
        Err(_) => false,
    }
}

/// Validates `expr`, returning fatal diagnostics for malformed input and an advisory
/// [UnsupportedNotation] warning when the expression does not round-trip.
pub fn validate(expr: &str) -> Vec<Diagnostic> {
    let stripped = strip_whitespace(expr);
    match rewrite(expr) {
        Err(diagnostic) => vec![diagnostic],
        Ok(ref rendered) if *rendered == stripped => vec![],
        Ok(rendered) => {
            vec![Diagnostic::span_warn(
                (0, stripped.chars().count()),
                "Expression does not round-trip",
                UnsupportedNotation::CODE,
                None,
            )
            .with_note(format!(r#"this expression re-renders as "{}""#, rendered))
            .with_help(
                "if the difference is only redundant parentheses the result is unaffected; \
                 otherwise retype the expression without implicit notation",
            )]
        }
    }
}

#[cfg(test)]
mod tests {
    mod rename {
        use super::super::rename;
        use crate::catalog::OpSpec;

        macro_rules! rename_tests {
            ($($name:ident: $input:expr, [$($from:expr),*] => [$($to:expr),*] = $expected:expr)*) => {$(
                #[test]
                fn $name() {
                    let from = vec![$($from),*];
                    let to = vec![$($to),*];
                    assert_eq!(rename($input, &from, &to).unwrap(), $expected);
                }
            )*};
        }

        rename_tests! {
            flattened_run_renames_once:
                "a+b+c", [OpSpec::operator("+")] => [OpSpec::function("add")] = "add(a,b,c)"
            operator_to_operator:
                "a^b", [OpSpec::operator("^")] => [OpSpec::operator("**")] = "a**b"
            prefix_to_function:
                "-x", [OpSpec::prefix("-")] => [OpSpec::function("neg")] = "neg(x)"
            postfix_to_function:
                "x!", [OpSpec::postfix("!")] => [OpSpec::function("factorial")] = "factorial(x)"
            subscript_to_function:
                "k[0]", [OpSpec::subscript("k")] => [OpSpec::function("getitem_k")] = "getitem_k(0)"
            list_to_function:
                "[1,2]", [OpSpec::list()] => [OpSpec::function("Matrix")] = "Matrix(1,2)"
            function_to_function:
                "arccos(x)+1", [OpSpec::function("arccos")] => [OpSpec::function("acos")] = "acos(x)+1"
            no_match_is_identity:
                "a+b", [OpSpec::function("cos")] => [OpSpec::function("acos")] = "a+b"
            leaf_is_identity:
                "x", [OpSpec::operator("+")] => [OpSpec::function("add")] = "x"
        }

        #[test]
        fn colliding_targets_do_not_cascade() {
            // swapping two operators must not relabel the same entry twice
            let from = vec![OpSpec::operator("+"), OpSpec::operator("-")];
            let to = vec![OpSpec::operator("-"), OpSpec::operator("+")];
            assert_eq!(rename("a+b", &from, &to).unwrap(), "a-b");
            assert_eq!(rename("a-b", &from, &to).unwrap(), "a+b");
        }
    }

    mod pipes {
        use super::super::flatten_pipes;

        macro_rules! pipe_tests {
            ($($name:ident: $input:expr => $expected:expr)*) => {$(
                #[test]
                fn $name() {
                    assert_eq!(flatten_pipes($input).unwrap(), $expected);
                }
            )*};
        }

        pipe_tests! {
            simple_pipe:      "x+1 | cos"   => "cos(x+1)"
            chained_pipes:    "x|f|g"       => "g(f(x))"
            pipe_of_product:  "2*a | sqrt"  => "sqrt(2*a)"
            no_pipe_identity: "x+1"         => "x+1"
            leaf_identity:    "x"           => "x"
        }
    }

    mod leaves {
        use super::super::apply_to_leaves;
        use crate::catalog::OpSpec;

        #[test]
        fn wraps_leaves_in_prefix_operator() {
            let marker = OpSpec::prefix("@");
            assert_eq!(apply_to_leaves("x+1", &marker, false).unwrap(), "@x+@1");
        }

        #[test]
        fn wraps_only_leaf_slots() {
            let marker = OpSpec::prefix("@");
            assert_eq!(
                apply_to_leaves("cos(x)+1", &marker, false).unwrap(),
                "cos(@x)+@1"
            );
        }

        #[test]
        fn stringify_quotes_leaf_text() {
            let symbol = OpSpec::function("MySymbol");
            assert_eq!(
                apply_to_leaves("x+1", &symbol, true).unwrap(),
                "MySymbol('x')+MySymbol('1')"
            );
        }

        #[test]
        fn bare_leaf_is_wrapped_whole() {
            let marker = OpSpec::prefix("@");
            assert_eq!(apply_to_leaves("x", &marker, false).unwrap(), "@x");
        }
    }

    mod variables {
        use super::super::replace_variable;

        #[test]
        fn replaces_exact_leaf_matches() {
            assert_eq!(replace_variable("x+cos(y)", "x", "z").unwrap(), "z+cos(y)");
        }

        #[test]
        fn ignores_partial_matches() {
            assert_eq!(replace_variable("xx+1", "x", "z").unwrap(), "xx+1");
        }

        #[test]
        fn replaces_a_bare_variable() {
            assert_eq!(replace_variable("x", "x", "z").unwrap(), "z");
        }
    }

    mod roots {
        use super::super::root_operation;
        use crate::catalog::OpSpec;

        #[test]
        fn pipe_is_the_loosest_root() {
            let root = root_operation("x+1|cos").unwrap().unwrap();
            assert_eq!(root, OpSpec::operator("|"));
        }

        #[test]
        fn call_root() {
            let root = root_operation("cos(x+1)").unwrap().unwrap();
            assert_eq!(root, OpSpec::function("cos"));
        }

        #[test]
        fn leaf_has_no_root() {
            assert_eq!(root_operation("x").unwrap(), None);
        }
    }

    mod validation {
        use super::super::{is_supported, validate};

        macro_rules! supported_tests {
            ($($name:ident: $input:expr => $supported:expr)*) => {$(
                #[test]
                fn $name() {
                    assert_eq!(is_supported($input), $supported);
                }
            )*};
        }

        supported_tests! {
            precedence:           "1+2*3"     => true
            commutative_run:      "a+b+c"     => true
            kept_inner_parens:    "3-(-4)"    => true
            bare_leaf:            "x"         => true
            spaced:               "x + 1 | cos" => true
            redundant_parens:     "(a+b)"     => false
            unary_juxtaposition:  "a*-b"      => false
            scientific_notation:  "1e3"       => false
            dangling_operator:    "a+"        => false
            disjoint_expressions: "f(x)g(y)"  => false
            empty_input:          ""          => false
        }

        #[test]
        fn roundtrip_mismatch_is_advisory() {
            let diagnostics = validate("(a+b)");
            assert_eq!(diagnostics.len(), 1);
            assert_eq!(diagnostics[0].code, Some("V0001"));
        }

        #[test]
        fn malformed_input_is_fatal() {
            let diagnostics = validate("cos(x");
            assert_eq!(diagnostics.len(), 1);
            assert_eq!(diagnostics[0].code, Some("C0001"));
        }

        #[test]
        fn supported_input_is_quiet() {
            assert!(validate("1+2*3").is_empty());
        }

        #[test]
        fn rewriting_is_idempotent() {
            for expr in &["(a+b)", "a*-b", "1e3", "2**-x", "x+1|cos"] {
                let once = super::super::rewrite(expr).unwrap();
                let twice = super::super::rewrite(&once).unwrap();
                assert_eq!(once, twice, "for {}", expr);
            }
        }
    }
}
