//! Renders operations and trees back to notation text.
//!
//! Rendering is children-first: each child is rendered, wrapped in parentheses only when the
//! precedence table demands it, and substituted into its parent's operand slot. The result is
//! minimally parenthesized text that scans back to the same tree.

use crate::catalog::{Catalog, Notation, Operation};
use crate::tree::ExprTree;

/// Renders a single operation from its own operand texts.
///
/// `parenthesize` wraps the rendered operator application in parentheses; function calls,
/// subscripts and list literals delimit themselves and ignore it.
pub fn render_node(op: &Operation, parenthesize: bool) -> String {
    let operands: Vec<String> = op.operands.iter().map(|o| o.text.clone()).collect();
    render_with(op, &operands, parenthesize)
}

/// Renders the whole tree anchored at `tree.root` back to notation text.
pub fn render_tree(tree: &ExprTree, catalog: &Catalog) -> String {
    render_rec(catalog, tree.root, None)
}

fn render_rec(catalog: &Catalog, index: usize, parent: Option<(&Operation, usize)>) -> String {
    let op = &catalog.ops[index];
    let operands: Vec<String> = op
        .operands
        .iter()
        .enumerate()
        .map(|(slot, operand)| match op.children[slot] {
            Some(child) => render_rec(catalog, child, Some((op, slot))),
            None => operand.text.clone(),
        })
        .collect();
    render_with(op, &operands, needs_parens(op, parent))
}

fn render_with(op: &Operation, operands: &[String], parenthesize: bool) -> String {
    match op.notation {
        Notation::Call => format!("{}({})", op.symbol, operands.join(",")),
        Notation::Subscript => format!("{}[{}]", op.symbol, operands.join(",")),
        Notation::List => format!("[{}]", operands.join(",")),
        Notation::Prefix => wrap(format!("{}{}", op.symbol, operands[0]), parenthesize),
        Notation::Infix => wrap(operands.join(&op.symbol), parenthesize),
        Notation::Postfix => wrap(format!("{}{}", operands[0], op.symbol), parenthesize),
    }
}

fn wrap(text: String, parenthesize: bool) -> String {
    if parenthesize {
        format!("({})", text)
    } else {
        text
    }
}

/// Decides whether a rendered child must be parenthesized inside its parent's operand slot.
///
/// A child is wrapped iff the parent binds strictly tighter, or both share a precedence bucket
/// and the child does not sit in the bucket's canonical associated position (leftmost operand;
/// rightmost for right-to-left associative buckets). Self-delimiting children are never wrapped,
/// nor is anything inside a self-delimiting parent. A prefix-unary child after the first operand
/// is always wrapped: `3-(-4)` must not re-render as `3--4`.
fn needs_parens(op: &Operation, parent: Option<(&Operation, usize)>) -> bool {
    let (parent, slot) = match parent {
        Some(found) => found,
        None => return false,
    };
    if parent.notation.is_self_delimiting() || op.notation.is_self_delimiting() {
        return false;
    }
    if op.notation == Notation::Prefix && slot > 0 {
        return true;
    }
    if parent.priority > op.priority {
        return true;
    }
    if parent.priority == op.priority {
        let canonical = if parent.priority.is_right_assoc() {
            parent.operands.len() - 1
        } else {
            0
        };
        return slot != canonical;
    }
    false
}

#[cfg(test)]
mod tests {
    mod node {
        use crate::catalog::parse_catalog;
        use crate::render::render_node;

        #[test]
        fn renders_every_notation() {
            let cases: &[(&str, &str)] = &[
                ("f(a,b)", "f(a,b)"),
                ("k[0,1]", "k[0,1]"),
                ("[1,2,3]", "[1,2,3]"),
                ("-x", "-x"),
                ("a!", "a!"),
                ("a**b", "a**b"),
            ];
            for (input, expected) in cases {
                let catalog = parse_catalog(input).unwrap();
                assert_eq!(&render_node(&catalog.ops[0], false), expected);
            }
        }

        #[test]
        fn parenthesize_wraps_operators_only() {
            let catalog = parse_catalog("a+b").unwrap();
            assert_eq!(render_node(&catalog.ops[0], true), "(a+b)");

            let catalog = parse_catalog("f(a)").unwrap();
            assert_eq!(render_node(&catalog.ops[0], true), "f(a)");
        }
    }

    mod tree {
        use crate::catalog::parse_catalog;
        use crate::render::render_tree;
        use crate::tree::build_tree;

        fn rerender(input: &str) -> String {
            let mut catalog = parse_catalog(input).unwrap();
            let tree = build_tree(&mut catalog).unwrap();
            render_tree(&tree, &catalog)
        }

        /// The rendering must reproduce the (whitespace-stripped) input exactly.
        macro_rules! roundtrip_tests {
            ($($name:ident: $input:expr)*) => {$(
                #[test]
                fn $name() {
                    assert_eq!(rerender($input), $input.replace(' ', ""));
                }
            )*};
        }

        roundtrip_tests! {
            precedence_unchanged:    "1+2*3"
            flat_commutative_run:    "a+b+c"
            needed_parens_kept:      "(a+b)*c"
            inner_unary_parens_kept: "3-(-4)"
            sub_chain:               "a-b-c"
            sub_then_add:            "a-b+c"
            add_then_sub:            "a+b-c"
            division_chain:          "a/b/c"
            mul_after_div:           "a/b*c"
            exponent_right_assoc:    "a^b^c"
            exponent_left_grouped:   "(a^b)^c"
            sign_of_exponent:        "-x**2"
            nested_call_args:        "f(g(x,y),[1,2,3])"
            subscript_quotient:      "k[0]/1"
            loose_derivative:        "x^2+1'"
            loose_integral:          "$x+1|f"
            double_sign:             "--4"
            factorial_sum:           "a!+b"
            additive_regrouped:      "a+(b-c)"
            spaced_input:            "x + 1 | cos"
        }

        /// Redundant structure is dropped: the re-rendering is minimal, not literal.
        macro_rules! minimal_parens_tests {
            ($($name:ident: $input:expr => $expected:expr)*) => {$(
                #[test]
                fn $name() {
                    assert_eq!(rerender($input), $expected);
                }
            )*};
        }

        minimal_parens_tests! {
            redundant_on_tighter:   "(a*b)+c"   => "a*b+c"
            redundant_outermost:    "(a+b)"     => "a+b"
            redundant_canonical:    "(a+b)+c"   => "a+b+c"
            redundant_exponent:     "a^(b^c)"   => "a^b^c"
            unary_juxtaposition:    "a*-b"      => "a*(-b)"
            sign_under_exponent:    "2**-x"     => "2**(-x)"
        }
    }
}
