//! Full playthroughs of the built-in Blackwood Manor story.

use bw_fiction::{
    ConclusionKind, Ending, EngineConfig, FictionError, GameSession, MAX_STRESS, MIN_STRESS, Phase,
};
use proptest::prelude::*;

fn session() -> GameSession {
    GameSession::builtin(EngineConfig::default()).unwrap()
}

fn play(session: &mut GameSession, path: &[&str]) {
    for id in path {
        assert!(!session.is_over(), "session ended before {id}");
        let at = session.state().current_location.clone();
        session
            .choose(id)
            .unwrap_or_else(|e| panic!("choice {id} at {at} failed: {e}"));
    }
}

fn available_ids(session: &GameSession) -> Vec<String> {
    session
        .available_choices()
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect()
}

// ---------------------------------------------------------------------------
// Endings
// ---------------------------------------------------------------------------

#[test]
fn perfect_crime() {
    let mut session = session();
    play(
        &mut session,
        &[
            "examine_exterior",
            "enter_tool_shed",
            "search_tools",
            "take_lockpick",
            "leave_shed",
            "enter_library",
            "search_books",
            "pull_lever",
            "proceed_deeper",
            "exit_hidden_room",
            "return_main_hall",
            "examine_hall",
            "follow_footprints",
            "inspect_desk",
            "analyze_records",
        ],
    );
    assert!(!session.is_over());
    assert_eq!(session.state().relationship("elena"), 0);

    let outcome = session.choose("confront_elena").unwrap();
    let conclusion = outcome.conclusion.unwrap();

    assert_eq!(conclusion.kind, ConclusionKind::Ending);
    assert_eq!(conclusion.ending, Some(Ending::PerfectCrime));
    assert!(conclusion.text.starts_with("Elena's perfect crime is unveiled"));
    assert_eq!(session.state().relationship("elena"), -3);
    assert_eq!(session.state().time_remaining, 5);
    assert_eq!(session.turn(), 16);
    assert_eq!(session.phase(), Phase::Ended);
}

#[test]
fn marcus_ai_conspiracy() {
    let mut session = session();
    play(
        &mut session,
        &[
            "examine_exterior",
            "enter_library",
            "search_books",
            "pull_lever",
            "proceed_deeper",
            "investigate_terminal",
            "decrypt_logs",
            "leave_logs",
            "exit_terminal",
            "exit_hidden_room",
            "return_main_hall",
            "visit_west_wing",
            "examine_medical",
        ],
    );
    assert!(available_ids(&session).contains(&"cross_reference".to_string()));

    let outcome = session.choose("cross_reference").unwrap();
    assert_eq!(
        outcome.conclusion.and_then(|c| c.ending),
        Some(Ending::MarcusAiConspiracy)
    );
    assert_eq!(session.state().time_remaining, 2);
    assert_eq!(session.state().stress_level, 5);
    assert_eq!(session.state().current_track, bw_core::Track::Medical);
}

#[test]
fn victoria_alliance() {
    let mut session = session();
    play(
        &mut session,
        &[
            "examine_exterior",
            "enter_library",
            "search_books",
            "ignore_lever",
            "leave_library",
            "visit_west_wing",
            "talk_victoria",
        ],
    );
    assert_eq!(session.phase(), Phase::InDialogue);

    let outcome = session.choose("show_map").unwrap();
    assert!(outcome.returned_to_hub);
    assert!(outcome.outcome_text.unwrap().contains("Marcus drew this"));
    assert_eq!(session.state().current_location, "main_hall");
    assert_eq!(session.state().relationship("victoria"), 3);

    play(&mut session, &["visit_west_wing"]);
    let outcome = session.choose("talk_victoria").unwrap();
    assert_eq!(
        outcome.conclusion.and_then(|c| c.ending),
        Some(Ending::VictoriaAlliance)
    );
}

#[test]
fn timeout_by_interviewing() {
    let mut session = session();
    play(&mut session, &["front_door"]);

    // Each round trip through James's dialogue costs four hours
    let mut rounds = 0;
    while !session.is_over() {
        session.choose("talk_james").unwrap();
        if !session.is_over() {
            session.choose("james_reveal").unwrap();
        }
        rounds += 1;
        assert!(rounds < 10, "the clock never ran out");
    }

    let conclusion = session.conclusion().unwrap();
    assert_eq!(conclusion.kind, ConclusionKind::Timeout);
    assert_eq!(conclusion.ending, Some(Ending::Timeout));
    assert!(session.state().time_remaining <= 0);
}

// ---------------------------------------------------------------------------
// Gating and routing
// ---------------------------------------------------------------------------

#[test]
fn lockpick_gates_the_desk() {
    let mut session = session();
    play(&mut session, &["front_door", "examine_hall", "follow_footprints"]);
    assert_eq!(session.state().current_location, "study");
    assert!(!available_ids(&session).contains(&"inspect_desk".to_string()));
    assert!(matches!(
        session.choose("inspect_desk"),
        Err(FictionError::InvalidChoice(_))
    ));
}

#[test]
fn lockpick_is_never_duplicated() {
    let mut session = session();
    play(
        &mut session,
        &["examine_exterior", "enter_tool_shed", "search_tools", "take_lockpick"],
    );
    assert_eq!(session.state().inventory, vec!["lockpick"]);

    // The shed can only be searched once
    assert!(!available_ids(&session).contains(&"search_tools".to_string()));
}

#[test]
fn leaving_the_lockpick_removes_it() {
    let mut session = session();
    play(
        &mut session,
        &["examine_exterior", "enter_tool_shed", "search_tools", "leave_lockpick"],
    );
    assert!(!session.state().has_item("lockpick"));
}

#[test]
fn dialogue_outcome_returns_to_hall() {
    let mut session = session();
    play(&mut session, &["front_door", "talk_elena"]);
    assert_eq!(session.phase(), Phase::InDialogue);
    assert_eq!(session.state().relationship("elena"), 1);

    let outcome = session.choose("elena_reveal").unwrap();
    assert!(outcome.outcome_text.unwrap().contains("embezzling"));
    assert_eq!(session.state().current_location, "main_hall");
    assert_eq!(session.phase(), Phase::Exploring);
    assert_eq!(session.state().flag("elena_revealed"), Some(true));
}

#[test]
fn secret_passage_shortcut_opens() {
    let mut early = session();
    play(&mut early, &["front_door"]);
    assert!(!available_ids(&early).contains(&"access_secret_passage".to_string()));

    let mut late = session();
    play(
        &mut late,
        &[
            "examine_exterior",
            "enter_library",
            "search_books",
            "pull_lever",
            "proceed_deeper",
            "exit_hidden_room",
            "return_main_hall",
        ],
    );
    assert!(available_ids(&late).contains(&"access_secret_passage".to_string()));
}

#[test]
fn hall_description_darkens_with_time() {
    let config = EngineConfig::default().with_initial_time(8);
    let mut session = GameSession::builtin(config).unwrap();
    play(&mut session, &["front_door"]);

    let snapshot = session.snapshot(false).unwrap();
    assert!(snapshot.description.starts_with("Thunder rattles"));

    play(&mut session, &["visit_west_wing", "leave_west_wing"]);
    let snapshot = session.snapshot(false).unwrap();
    assert!(snapshot.description.starts_with("The lights flicker"));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn random_walks_keep_invariants(picks in proptest::collection::vec(0usize..8, 1..60)) {
        let mut session = session();
        let mut previous_time = session.state().time_remaining;

        for pick in picks {
            if session.is_over() {
                break;
            }
            let choices = session.available_choices().unwrap();
            prop_assert!(!choices.is_empty());
            let choice = &choices[pick % choices.len()];
            let expected_cost = session
                .current_location()
                .unwrap()
                .choice(&choice.id)
                .unwrap()
                .time_cost;

            session.choose(&choice.id).unwrap();

            let state = session.state();
            prop_assert_eq!(state.time_remaining, previous_time - expected_cost);
            prop_assert!((MIN_STRESS..=MAX_STRESS).contains(&state.stress_level));
            let mut names: Vec<_> = state.evidence.iter().map(|e| e.name.as_str()).collect();
            names.sort_unstable();
            names.dedup();
            prop_assert_eq!(names.len(), state.evidence.len());
            previous_time = state.time_remaining;
        }
    }
}
