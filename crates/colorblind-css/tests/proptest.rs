//! Property-based tests for token rewriting and method resolution.

use colorblind_css::{
    classify, names, resolve_method, rewrite_value, transform_token, ColorToken, Deficiency,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn deficiency_strategy() -> impl Strategy<Value = Deficiency> {
    prop::sample::select(Deficiency::ALL.to_vec())
}

fn opaque_word() -> impl Strategy<Value = String> {
    "[a-z][a-z-]{0,11}".prop_filter("named colors are not opaque", |w| {
        !names::is_named_color(w)
    })
}

fn length_token() -> impl Strategy<Value = String> {
    ("[0-9]{1,3}", prop::sample::select(vec!["px", "em", "rem", "%", ""]))
        .prop_map(|(n, unit)| format!("{}{}", n, unit))
}

fn hex_token() -> impl Strategy<Value = String> {
    prop_oneof!["#[0-9a-fA-F]{3}", "#[0-9a-fA-F]{6}"]
}

fn value_token() -> impl Strategy<Value = String> {
    prop_oneof![
        opaque_word(),
        length_token(),
        hex_token(),
        prop::sample::select(vec!["red", "Lime", "NAVY", "aliceblue"]).prop_map(String::from),
    ]
}

fn separator() -> impl Strategy<Value = String> {
    prop::sample::select(vec![" ", "  ", "\t", "\n", " \t "]).prop_map(String::from)
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Rewriting never adds or drops tokens.
    #[test]
    fn rewrite_preserves_token_count(
        tokens in prop::collection::vec((value_token(), separator()), 0..12),
        d in deficiency_strategy(),
    ) {
        let value: String = tokens.iter().map(|(t, sep)| format!("{}{}", t, sep)).collect();
        let out = rewrite_value(&value, d.simulation());
        prop_assert_eq!(out.split(' ').filter(|t| !t.is_empty()).count(), tokens.len());
        prop_assert!(!out.contains("  "));
    }

    /// Tokens that are neither hex nor named colors pass through unchanged.
    #[test]
    fn opaque_tokens_pass_through(
        token in prop_oneof![opaque_word(), length_token()],
        d in deficiency_strategy(),
    ) {
        prop_assert_eq!(classify(&token), ColorToken::Opaque(&token));
        prop_assert_eq!(transform_token(&token, d.simulation()), token.as_str());
    }

    /// Hex tokens are matched regardless of letter case.
    #[test]
    fn hex_is_case_insensitive(token in hex_token(), d in deficiency_strategy()) {
        let simulate = d.simulation();
        let lower = transform_token(&token.to_lowercase(), simulate).into_owned();
        let upper = transform_token(&token.to_uppercase(), simulate).into_owned();
        prop_assert_eq!(&lower, &upper);
        prop_assert_eq!(lower.len(), 7);
    }

    /// Method identifiers ignore case and surrounding whitespace.
    #[test]
    fn method_resolution_is_normalized(
        d in deficiency_strategy(),
        mask in prop::collection::vec(any::<bool>(), 16),
        pad in "[ \t]{0,3}",
    ) {
        let mixed: String = d
            .name()
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect();
        let raw = format!("{}{}{}", pad, mixed, pad);
        prop_assert_eq!(resolve_method(Some(raw.as_str())).unwrap(), d);
    }
}
