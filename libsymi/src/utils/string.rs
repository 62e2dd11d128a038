/// Indents all lines of a string with `n` spaces.
pub(crate) fn indent<T: Into<String>>(s: T, n: usize) -> String {
    let s: String = s.into();
    let indent = " ".repeat(n);
    s.lines()
        .map(|l| format!("{}{}", indent, l))
        .collect::<Vec<_>>()
        .join("\n")
}
