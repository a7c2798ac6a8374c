#![no_main]

use arbitrary::Arbitrary;
use gramcheck::{CompareConfig, Matches, SymbolFormatter};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Notation {
    Default,
    Verbose,
    Pattern(String),
}

#[derive(Debug, Arbitrary)]
struct Input {
    notation: Notation,
    spec: String,
}

fuzz_target!(|input: Input| {
    let formatter = match input.notation {
        Notation::Default => SymbolFormatter::Default,
        Notation::Verbose => SymbolFormatter::Verbose,
        Notation::Pattern(pattern) => match SymbolFormatter::of_pattern(&pattern) {
            Ok(formatter) => formatter,
            Err(err) => {
                assert!(err.offset <= pattern.len());
                return;
            }
        },
    };

    let symbols = match formatter.parse_list(&input.spec) {
        Ok(symbols) => symbols,
        Err(err) => {
            assert!(err.offset <= input.spec.len());
            let _ = err.to_string();
            return;
        }
    };

    let rendered = formatter.render(&symbols);
    if formatter == SymbolFormatter::Default {
        let reparsed = formatter.parse_list(&rendered).unwrap();
        assert_eq!(reparsed, symbols);
    }
    assert!(symbols[..].matches(&symbols, &CompareConfig::default()).is_ok());
});
