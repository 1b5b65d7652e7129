//! Property tests for the token pipeline.
//!
//! Verifies:
//! 1. Any valid base color yields exactly ten steps with 500 kept verbatim
//! 2. import(export json) restores the exported token set
//! 3. CSS export has one line per token inside the `:root` block
//! 4. Applying tokens to a stylesheet survives a to_css / parse cycle
//! 5. Lab lightness never increases from step 50 to step 900

use proptest::prelude::*;
use sm_tokens::{
    Categories, ExportFormat, MemoryEnvironment, Palette, Step, StyleEnvironment, StyleSheet,
    TokenSet, TokenStore, load_from,
};

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_hex_color() -> impl Strategy<Value = String> {
    (any::<[u8; 3]>(), any::<bool>()).prop_map(|([r, g, b], upper)| {
        let hex = format!("#{r:02x}{g:02x}{b:02x}");
        if upper { hex.to_uppercase() } else { hex }
    })
}

fn arb_token() -> impl Strategy<Value = (String, String)> {
    let prefix = prop::sample::select(vec![
        "--color-",
        "--font-size-",
        "--line-height-",
        "--space-",
        "--shadow-",
        "--radius-",
    ]);
    (prefix, "[a-z0-9][a-z0-9-]{0,9}", "[a-z0-9#.%(), ]{0,14}[a-z0-9#.%()]")
        .prop_map(|(p, suffix, value)| (format!("{p}{suffix}"), value))
}

fn arb_token_set() -> impl Strategy<Value = TokenSet> {
    prop::collection::vec(arb_token(), 0..24).prop_map(TokenSet::from_variables)
}

// ── Properties ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn palette_has_ten_steps_and_verbatim_base(base in arb_hex_color()) {
        let palette = Palette::derive(&base).unwrap();
        prop_assert_eq!(palette.entries().len(), 10);
        for (entry, step) in palette.entries().iter().zip(Step::ALL) {
            prop_assert_eq!(entry.step, step);
        }
        prop_assert_eq!(palette.base(), base.as_str());
        for entry in palette.entries() {
            prop_assert!(sm_color::Color::parse(&entry.value).is_ok());
        }
    }

    #[test]
    fn palette_lightness_never_increases(base in arb_hex_color()) {
        let palette = Palette::derive(&base).unwrap();
        let lightness: Vec<f64> = palette
            .entries()
            .iter()
            .map(|e| sm_color::Color::parse(&e.value).unwrap().lab().0)
            .collect();
        for (step, pair) in Step::ALL.iter().zip(lightness.windows(2)) {
            prop_assert!(
                pair[0] >= pair[1],
                "{base}: L* rises after step {step}: {lightness:?}"
            );
        }
    }

    #[test]
    fn json_export_import_roundtrip(tokens in arb_token_set(), other in arb_token_set()) {
        let json = sm_tokens::export(&tokens, ExportFormat::Json);

        let mut env = MemoryEnvironment::new();
        let mut store = TokenStore::new();
        store.import_json(&sm_tokens::export(&other, ExportFormat::Json), &mut env).unwrap();
        store.import_json(&json, &mut env).unwrap();

        prop_assert_eq!(store.tokens(), &tokens);
    }

    #[test]
    fn css_export_line_per_token(tokens in arb_token_set()) {
        let css = sm_tokens::export(&tokens, ExportFormat::Css);
        prop_assert!(css.starts_with(":root {\n"), "css must start with the :root block opener");
        prop_assert!(css.ends_with('}'), "css must end with a closing brace");
        prop_assert_eq!(css.lines().count(), tokens.len() + 2);
    }

    #[test]
    fn stylesheet_roundtrip_keeps_tokens(tokens in arb_token_set()) {
        let mut store = TokenStore::new();
        store.import_json(&sm_tokens::export(&tokens, ExportFormat::Json), &mut MemoryEnvironment::new()).unwrap();

        let mut sheet = StyleSheet::default();
        store.apply(&mut sheet);
        let reparsed = StyleSheet::parse(&sheet.to_css()).unwrap();

        prop_assert_eq!(reparsed.variables(), sheet.variables());
        prop_assert_eq!(load_from(&reparsed), tokens);
    }
}

#[test]
fn filtered_export_matches_filtered_set() {
    let tokens = TokenSet::from_variables([("--color-white", "#fff"), ("--space-1", "4px")]);
    let store = {
        let mut s = TokenStore::new();
        s.import_json(&sm_tokens::export(&tokens, ExportFormat::Json), &mut MemoryEnvironment::new())
            .unwrap();
        s
    };
    for format in ExportFormat::ALL {
        assert_eq!(
            store.export(format, Categories::SPACING),
            sm_tokens::export(&tokens.filtered(Categories::SPACING), format)
        );
    }
}
