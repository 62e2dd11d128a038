//! The symi app. For an overview of symi's design, see [libsymi's documentation](libsymi).

#![deny(warnings)]
#![deny(missing_docs)]

#[cfg(test)]
mod test;

mod diagnostics;
use diagnostics::{emit_symi_diagnostics, sanitize_source_for_diagnostics};

use libsymi::diagnostics::{Diagnostic, DiagnosticKind};
use libsymi::{build_tree, parse_catalog, translate, validate, Emit, EmitFormat, TranslationTable};

/// Options to run symi with.
pub struct Opts {
    /// Notation expression to rewrite.
    pub program: String,
    /// How the result of symi's execution should be emitted.
    pub emit_format: String,
    /// When true, symi stops after validating the expression.
    pub check: bool,
    /// When true, leaves are wrapped in the substitution marker before translating.
    pub substitute: bool,
    /// When is [Some](Option::Some) diagnostic code, will explain that code.
    pub explain_diagnostic: Option<String>,
    /// When true, symi emit will be colored.
    pub color: bool,
}

/// Output of a symi execution.
#[derive(Default)]
pub struct SymiResult {
    /// Exit code
    pub code: i32,
    /// Emit for stdout
    pub stdout: String,
    /// Emit for stderr
    pub stderr: String,
    /// Whether the stdout should be emit as paged
    pub page: bool,
}

/// Builds a [SymiResult](self::SymiResult).
struct SymiResultBuilder {
    /// Program source code sanitized for diagnostic emission.
    sanitized_program: String,
    color: bool,
    stdout: String,
    stderr: String,
    page: bool,
}

impl SymiResultBuilder {
    fn new(program: &str, color: bool) -> Self {
        Self {
            sanitized_program: sanitize_source_for_diagnostics(program),
            color,
            page: false,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    fn emit(&mut self, text: &str) {
        self.stdout.push_str(text);
    }

    fn err(&mut self, diagnostics: &[Diagnostic]) {
        self.stderr.push_str(&emit_symi_diagnostics(
            None,
            &self.sanitized_program,
            diagnostics,
            self.color,
        ));
    }

    fn page(&mut self, page: bool) {
        self.page = page;
    }

    fn ok(self) -> SymiResult {
        SymiResult {
            code: 0,
            stdout: self.stdout,
            stderr: self.stderr,
            page: self.page,
        }
    }

    fn failed(self) -> SymiResult {
        SymiResult {
            code: 1,
            stdout: self.stdout,
            stderr: self.stderr,
            page: self.page,
        }
    }
}

/// Runs symi end-to-end.
pub fn run_symi(opts: Opts) -> SymiResult {
    let mut result = SymiResultBuilder::new(&opts.program, opts.color);

    if let Some(diag_code) = opts.explain_diagnostic {
        let codes = Diagnostic::all_codes_with_explanations();
        return match codes.get::<str>(&diag_code) {
            Some(explanation) => {
                result.emit(explanation);
                result.page(true);
                result.ok()
            }
            None => {
                result
                    .stderr
                    .push_str(&format!("{} is not a diagnostic code", diag_code));
                result.failed()
            }
        };
    }

    // Validation runs first: fatal diagnostics stop the run, the round-trip warning is advisory
    // and the rewrite proceeds under it.
    let diagnostics = validate(&opts.program);
    let fatal = diagnostics
        .iter()
        .any(|diagnostic| diagnostic.kind == DiagnosticKind::Error);
    result.err(&diagnostics);
    if fatal {
        return result.failed();
    }
    if opts.check {
        return result.ok();
    }

    if opts.emit_format == "debug" {
        return match parse_catalog(&opts.program) {
            Ok(mut catalog) if !catalog.ops.is_empty() => match build_tree(&mut catalog) {
                Ok(tree) => {
                    result.emit(&catalog.emit(EmitFormat::Debug));
                    result.emit(&tree.emit(EmitFormat::Debug));
                    result.ok()
                }
                Err(diagnostic) => {
                    result.err(&[diagnostic]);
                    result.failed()
                }
            },
            Ok(catalog) => {
                result.emit(&catalog.emit(EmitFormat::Debug));
                result.ok()
            }
            Err(diagnostic) => {
                result.err(&[diagnostic]);
                result.failed()
            }
        };
    }

    match translate(&opts.program, &TranslationTable::default(), opts.substitute) {
        Ok(rewritten) => {
            result.emit(&rewritten);
            result.ok()
        }
        Err(diagnostic) => {
            result.err(&[diagnostic]);
            result.failed()
        }
    }
}
