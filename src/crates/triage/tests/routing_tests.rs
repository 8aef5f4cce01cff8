//! End-to-end routing behavior over the public API

use triage::testing::fixtures;
use triage::{
    build_manifest, score, select, LayoutConfig, Manifest, RouteOutcome, ScoringWeights,
    SelectOptions, CLARIFICATION_MESSAGE,
};

#[test]
fn scores_are_never_negative() {
    let manifest = build_manifest(&LayoutConfig::default());
    let weights = ScoringWeights::default();

    let prompts = [
        "",
        "help me design the database schema",
        "completely unrelated poetry request",
        "DEPLOY THE FRONTEND TO THE SERVER",
        "日本語のプロンプト",
    ];

    for prompt in prompts {
        for entry in &manifest.entries {
            assert!(score(prompt, entry, &weights) >= 0.0);
        }
    }
}

#[test]
fn result_never_repeats_a_handler() {
    let manifest = build_manifest(&LayoutConfig::default());
    let options = SelectOptions {
        top_n: 5,
        ..Default::default()
    };

    // Hits entries for several handlers, plus three entries that all
    // route to the frontend specialist
    let outcome = select(
        "frontend design with tailwind patterns, an api and webapp testing",
        &manifest,
        &options,
    );

    let matches = outcome.matches().expect("should match");
    assert!(matches.len() <= 5);
    assert!(matches.len() >= 3);

    let mut handlers: Vec<_> = matches.iter().map(|m| m.entry.handler.as_str()).collect();
    handlers.sort();
    handlers.dedup();
    assert_eq!(handlers.len(), matches.len());
}

#[test]
fn reference_scenario_routes_to_database_architect() {
    let manifest = fixtures::sample_manifest();
    let outcome = select(
        "help me design the database schema",
        &manifest,
        &SelectOptions::default(),
    );

    let matches = outcome.matches().expect("should match");
    assert_eq!(matches[0].entry.handler, "database-architect");

    // The frontend entry never clears the threshold for this prompt
    assert!(matches
        .iter()
        .all(|m| m.entry.handler != "frontend-specialist"));
}

#[test]
fn generated_manifest_routes_database_prompts() {
    let manifest = build_manifest(&LayoutConfig::default());
    let outcome = select(
        "help me design the database schema",
        &manifest,
        &SelectOptions::default(),
    );

    let matches = outcome.matches().expect("should match");
    assert_eq!(matches[0].entry.name, "database-design");
    assert_eq!(matches[0].entry.handler, "database-architect");
    // "database" phrase (10) + pattern hit (20) + priority nudge (0.5)
    assert_eq!(matches[0].score, 30.5);
}

#[test]
fn identical_phrase_sets_tie_in_manifest_order() {
    let manifest = Manifest::new(vec![
        fixtures::entry("earlier", "handler-a", &["migrate", "schema"]),
        fixtures::entry("later", "handler-b", &["migrate", "schema"]),
    ])
    .unwrap();

    let options = SelectOptions {
        top_n: 2,
        ..Default::default()
    };
    let outcome = select("migrate the schema", &manifest, &options);

    let matches = outcome.matches().expect("should match");
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].entry.name, "earlier");
    assert_eq!(matches[1].entry.name, "later");
    assert_eq!(matches[0].score, matches[1].score);
}

#[test]
fn select_is_deterministic_across_calls() {
    let manifest = build_manifest(&LayoutConfig::default());
    let options = SelectOptions {
        top_n: 3,
        ..Default::default()
    };
    let prompt = "set up deployment procedures and server management on linux";

    let first = select(prompt, &manifest, &options);
    for _ in 0..10 {
        assert_eq!(select(prompt, &manifest, &options), first);
    }
}

#[test]
fn all_below_threshold_yields_clarification_not_empty_list() {
    let manifest = fixtures::sample_manifest();
    let outcome = select("write me a poem about autumn", &manifest, &SelectOptions::default());

    match outcome {
        RouteOutcome::NeedsClarification { message } => {
            assert_eq!(message, CLARIFICATION_MESSAGE);
        }
        RouteOutcome::Matched { matches } => {
            panic!("expected clarification, got {} matches", matches.len())
        }
    }
}

#[test]
fn empty_prompt_yields_clarification() {
    let manifest = build_manifest(&LayoutConfig::default());
    let outcome = select("", &manifest, &SelectOptions::default());
    assert!(outcome.needs_clarification());
}

#[test]
fn malformed_pattern_does_not_poison_the_call() {
    let manifest = Manifest::new(vec![
        fixtures::entry_with_pattern("broken", "handler-a", &["database"], "(unclosed"),
        fixtures::entry("healthy", "handler-b", &["frontend"]),
    ])
    .unwrap();

    let options = SelectOptions {
        top_n: 2,
        ..Default::default()
    };
    let outcome = select("database and frontend work", &manifest, &options);

    // The broken entry's phrases still count; the call completes
    let matches = outcome.matches().expect("should match");
    assert_eq!(matches.len(), 2);
    let broken = matches.iter().find(|m| m.entry.name == "broken").unwrap();
    assert_eq!(broken.score, 10.5);
}

#[test]
fn clarification_is_phrased_as_a_request_not_an_error() {
    let lowercase = CLARIFICATION_MESSAGE.to_lowercase();
    assert!(!lowercase.contains("error"));
    assert!(!lowercase.contains("fail"));
    assert!(lowercase.contains("please"));
}
