//! Integration test: Load catalog -> Import character -> Time a plan -> Remap
//!
//! Runs the whole engine against the built-in skill catalog.

use training_core::config::{default_catalog, parse_constants};
use training_core::prelude::*;
use training_core::remap::RemapStage;
use training_core::{CharacterSnapshot, NewPlayerBonus};

const PILOT: &str = r#"
name = "Kiri Tanaka"

[attributes]
intelligence = 20
perception = 20
willpower = 20
charisma = 20
memory = 19

[[skills]]
skill = "spaceship_command"
skill_points = 250
level = 1

[[skills]]
skill = "learning"
skill_points = 1415
level = 2
"#;

const CRUISER_PLAN: &str = r#"
[[goals]]
skill = "caldari_cruiser"
level = 3

[[goals]]
skill = "gunnery"
level = 5
"#;

fn constants() -> TrainingConstants {
    TrainingConstants {
        new_player_bonus: NewPlayerBonus::disabled(),
        ..TrainingConstants::default()
    }
}

fn pilot(catalog: &SkillCatalog) -> CharacterState {
    let snapshot: CharacterSnapshot = toml::from_str(PILOT).unwrap();
    CharacterState::from_snapshot(catalog, &snapshot)
}

fn skill(catalog: &SkillCatalog, id: &str) -> SkillIndex {
    catalog.index_of(&SkillId::from(id)).unwrap()
}

#[test]
fn test_imported_character() {
    let catalog = default_catalog();
    let state = pilot(&catalog);

    assert_eq!(state.skill_level(skill(&catalog, "spaceship_command")), 1);
    assert_eq!(state.total_skill_points(), 250 + 1415);

    let pad = state.scratchpad(&catalog);
    assert_eq!(pad.learning_level(), 2);
    assert!((pad.effective_value(Attribute::Memory) - 19.0 * 1.04).abs() < 1e-9);
}

#[test]
fn test_breakdown_trains_prerequisites_first() {
    let catalog = default_catalog();
    let constants = constants();
    let state = pilot(&catalog);
    let calc = TrainingTimeCalculator::new(&catalog, &constants);

    let mut plan = TrainingPlan::new();
    plan.push("caldari_cruiser", 1).unwrap();
    let resolved = plan.resolve(&catalog).unwrap();

    let steps = calc.plan_breakdown(&state, &resolved, &state.scratchpad(&catalog));
    let order: Vec<(SkillIndex, u8)> = steps.iter().map(|s| (s.skill, s.level)).collect();

    // Spaceship Command 1 is already trained
    let frigate = skill(&catalog, "caldari_frigate");
    let cruiser = skill(&catalog, "caldari_cruiser");
    assert_eq!(
        order,
        vec![(frigate, 1), (frigate, 2), (frigate, 3), (frigate, 4), (cruiser, 1)]
    );

    // Steps are back to back
    for pair in steps.windows(2) {
        assert!((pair[0].start_hours + pair[0].hours - pair[1].start_hours).abs() < 1e-9);
    }
}

#[test]
fn test_learning_first_shortens_plan() {
    let catalog = default_catalog();
    let constants = constants();
    let state = CharacterState::new("Fresh", &catalog, [20, 20, 20, 20, 19]);
    let calc = TrainingTimeCalculator::new(&catalog, &constants);
    let pad = state.scratchpad(&catalog);

    let learning = skill(&catalog, "learning");
    let gunnery = skill(&catalog, "gunnery");

    let separately =
        calc.time_to_level(&state, learning, 5, &pad) + calc.time_to_level(&state, gunnery, 5, &pad);

    let mut plan = TrainingPlan::new();
    plan.push("learning", 5).unwrap();
    plan.push("gunnery", 5).unwrap();
    let together = calc.plan_duration(&state, &plan.resolve(&catalog).unwrap(), &pad);

    assert!(together < separately);
}

#[test]
fn test_remap_best_is_reproducible() {
    let catalog = default_catalog();
    let constants = constants();
    let state = pilot(&catalog);

    let plan: TrainingPlan = toml::from_str(CRUISER_PLAN).unwrap();
    let resolved = plan.resolve(&catalog).unwrap();
    let optimizer = RemappingOptimizer::new(&catalog, &constants, &state, resolved);

    let result = optimizer.optimize();
    let rules = optimizer.rules();
    assert!(result.best_duration <= result.base_duration);
    assert!(result.best_scratchpad.validate(&rules).is_ok());
    assert_eq!(result.unassigned_points(&rules), 0);
    assert!(matches!(result.stage, RemapStage::Optimized { candidates: 2885 }));

    // Evaluating the winner by hand gives the same numbers
    let manual = optimizer.evaluate(result.best_scratchpad.bases()).unwrap();
    assert_eq!(manual.best_duration, result.best_duration);
    assert_eq!(manual.base_duration, result.base_duration);

    // Initial matches the base side of the search
    let initial = optimizer.initial();
    assert_eq!(initial.base_duration, result.base_duration);
    assert_eq!(initial.gain(), RemapGain::Same);
}

#[test]
fn test_first_year_horizon_keeps_short_plans() {
    let catalog = default_catalog();
    let constants = constants();
    let state = pilot(&catalog);

    let plan: TrainingPlan = toml::from_str(CRUISER_PLAN).unwrap();
    let resolved = plan.resolve(&catalog).unwrap();
    let optimizer =
        RemappingOptimizer::new(&catalog, &constants, &state, resolved).with_horizon(ONE_YEAR);
    assert_eq!(optimizer.plan().len(), 2);
}

#[test]
fn test_custom_constants_change_search() {
    let catalog = default_catalog();
    let constants = parse_constants(
        r#"
[remap]
floor = 17
ceiling = 27
pool = 4

[new_player_bonus]
threshold = 0
multiplier = 1.0
"#,
    )
    .unwrap();
    let state = CharacterState::new("Fresh", &catalog, [17, 21, 17, 17, 17]);

    let mut plan = TrainingPlan::new();
    plan.push("mechanics", 4).unwrap();
    let resolved = plan.resolve(&catalog).unwrap();
    let optimizer = RemappingOptimizer::new(&catalog, &constants, &state, resolved);

    let result = optimizer.optimize();
    // Mechanics is INT/MEM: every point goes to Intelligence
    assert_eq!(result.best_scratchpad.bases(), [21, 17, 17, 17, 17]);
    assert!(result.is_improvement());
}

#[test]
fn test_result_serializes_to_json() {
    let catalog = default_catalog();
    let constants = constants();
    let state = pilot(&catalog);

    let mut plan = TrainingPlan::new();
    plan.push("gunnery", 3).unwrap();
    let optimizer =
        RemappingOptimizer::new(&catalog, &constants, &state, plan.resolve(&catalog).unwrap());

    let json = serde_json::to_value(optimizer.optimize()).unwrap();
    assert_eq!(json["stage"]["stage"], "optimized");
    assert!(json["base_duration"]["secs"].as_u64().unwrap() > 0);
    assert_eq!(json["best_scratchpad"]["learning_level"], 2);
}
