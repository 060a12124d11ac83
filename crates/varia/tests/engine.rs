//! Integration tests for the full pipeline and variation generation.

use varia::{
    Engine, NamedValuePool, RandomChooser, ScriptedChooser, ServiceForms, VariableValues,
    replacements, variable_sets,
};

#[test]
fn test_service_in_location() {
    let engine = Engine::new();
    let values = replacements! { "service" => "painting", "location" => "Brisbane" };
    let out = engine.process(
        "{service|capitalize} in {location}",
        &values,
        &mut RandomChooser::seeded(1),
    );
    assert_eq!(out, "Painting in Brisbane");
}

#[test]
fn test_all_passes_in_order() {
    let engine = Engine::new();
    let values = replacements! { "name" => "ada", "phone" => "555-0100" };
    let mut chooser = ScriptedChooser::new([1]);
    let out = engine.process(
        "{Hi|Hello} {name|first}{if:phone}, call {phone}{/if}{if:email} or {email}{/if}.",
        &values,
        &mut chooser,
    );
    assert_eq!(out, "Hello Ada, call 555-0100.");
}

#[test]
fn test_pool_values_survive_spintax() {
    let pool = NamedValuePool::new().with_list("location", ["Perth", "Darwin"]);
    let engine = Engine::with_pool(pool);
    let mut chooser = ScriptedChooser::new([0, 1]);
    let out = engine.process("{Visit|See} {location}", &replacements! {}, &mut chooser);
    assert_eq!(out, "Visit Darwin");
}

#[test]
fn test_service_plural_survives_spintax() {
    let pool = NamedValuePool::new()
        .with_services("service", [("paint", ServiceForms::new("painter", "painters"))]);
    let engine = Engine::with_pool(pool);
    let out = engine.process(
        "Local {service_plural}",
        &replacements! { "service_key" => "paint" },
        &mut ScriptedChooser::default(),
    );
    assert_eq!(out, "Local painters");
}

#[test]
fn test_unknown_placeholder_is_unwrapped_by_spintax() {
    let out = Engine::new().process(
        "Hi {nobody}",
        &replacements! {},
        &mut ScriptedChooser::default(),
    );
    assert_eq!(out, "Hi nobody");
}

#[test]
fn test_spintax_disabled() {
    let engine = Engine::builder().spintax(false).build();
    assert!(!engine.spintax_enabled());
    let out = engine.process(
        "{a|b} {x}",
        &replacements! { "x" => "y" },
        &mut ScriptedChooser::default(),
    );
    assert_eq!(out, "{a|b} y");
}

#[test]
fn test_missing_modifier_value_falls_back_to_name() {
    let out = Engine::new().process(
        "{brand|upper}",
        &replacements! {},
        &mut ScriptedChooser::default(),
    );
    assert_eq!(out, "BRAND");
}

#[test]
fn test_is_known() {
    let engine = Engine::with_pool(NamedValuePool::new().with_list("city", ["A"]));
    let values = replacements! { "name" => "x" };
    assert!(engine.is_known("name", &values));
    assert!(engine.is_known("city", &values));
    assert!(!engine.is_known("other", &values));
}

// =============================================================================
// Variation generation
// =============================================================================

#[test]
fn test_generate_variations_returns_exact_count() {
    let engine = Engine::new();
    let sets = variable_sets! { "x" => ["a", "b"] };
    let variations = engine.generate_variations("{x}", &sets, 10, &mut RandomChooser::seeded(9));
    assert_eq!(variations.len(), 10);
    for variation in &variations {
        assert_eq!(variation.content, variation.replacements["x"]);
    }
}

#[test]
fn test_generate_variations_scalar_and_list() {
    let engine = Engine::new();
    let sets = variable_sets! {
        "brand" => "Acme",
        "city" => vec!["Perth", "Darwin", "Hobart"],
    };
    // Picks: city for variation 1, city for variation 2.
    let mut chooser = ScriptedChooser::new([2, 0]);
    let variations = engine.generate_variations("{brand} {city|upper}", &sets, 2, &mut chooser);
    assert_eq!(variations[0].content, "Acme HOBART");
    assert_eq!(variations[1].content, "Acme PERTH");
    assert_eq!(variations[0].replacements["brand"], "Acme");
    assert_eq!(variations[1].replacements["city"], "Perth");
}

#[test]
fn test_generate_variations_keeps_duplicates() {
    let engine = Engine::new();
    let sets = variable_sets! { "x" => ["same"] };
    let variations = engine.generate_variations("{x}", &sets, 3, &mut RandomChooser::seeded(0));
    assert_eq!(variations.len(), 3);
    assert!(variations.iter().all(|v| v.content == "same"));
}

#[test]
fn test_empty_list_contributes_no_replacement() {
    let engine = Engine::new();
    let mut sets = variable_sets! {};
    sets.insert("x".to_string(), VariableValues::Many(vec![]));
    let variations =
        engine.generate_variations("[{x|upper}]", &sets, 1, &mut ScriptedChooser::default());
    assert!(variations[0].replacements.is_empty());
    assert_eq!(variations[0].content, "[X]");
}

#[test]
fn test_variation_serializes_as_content_and_replacements() {
    let engine = Engine::new();
    let sets = variable_sets! { "x" => "v" };
    let variations = engine.generate_variations("{x}", &sets, 1, &mut ScriptedChooser::default());
    let json = serde_json::to_value(&variations[0]).unwrap();
    assert_eq!(json, serde_json::json!({ "content": "v", "replacements": { "x": "v" } }));
}

#[test]
fn test_variable_sets_deserialize_from_json() {
    let sets: varia::VariableSets =
        serde_json::from_str(r#"{"brand": "Acme", "city": ["Perth", "Darwin"]}"#).unwrap();
    assert_eq!(sets["brand"], VariableValues::One("Acme".into()));
    assert_eq!(
        sets["city"],
        VariableValues::Many(vec!["Perth".into(), "Darwin".into()])
    );
}

#[test]
fn test_unmatched_open_braces_pass_through_pipeline() {
    let engine = Engine::new();
    let input = "{".repeat(100_000);
    let values = replacements! { "service" => "roofing" };
    let out = engine.process(&input, &values, &mut ScriptedChooser::default());
    assert_eq!(out, input);
}
