#![no_main]
use libfuzzer_sys::fuzz_target;

// Rewriting is idempotent: any text the engine accepts must re-render to itself on a second
// pass, and validation must never panic on arbitrary input.
fuzz_target!(|program: String| {
    libsymi::validate(&program);

    if let Ok(once) = libsymi::rewrite(&program) {
        let twice = libsymi::rewrite(&once).expect("a rendering must parse back");
        assert_eq!(once, twice);
    }
});
