//! Integration tests for autosuggest
//!
//! These tests drive the public API end to end: candidate files and config
//! files feeding a controller, the documented input scenarios, debounced
//! remote lookups on a paused clock, and the terminal key handling.

use autosuggest::candidates::load_candidates;
use autosuggest::config::AutosuggestConfig;
use autosuggest::controller::{ControllerConfig, InputController, Key, KeyOutcome};
use autosuggest::source::{MockTransport, RemoteSource, SourceKind, SuggestionSource, movie_titles};
use autosuggest::tui::{EditorState, EventResult, handle_key};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use proptest::prelude::*;
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// Helper to build a static controller over the fruit list
fn fruit_controller() -> InputController {
    let source = SuggestionSource::from_candidates(vec![
        "apple".to_string(),
        "banana".to_string(),
        "coconut".to_string(),
    ]);
    InputController::new(ControllerConfig::default(), source).unwrap()
}

/// Helper to record every value passed to the change callback
fn recorder() -> (Arc<Mutex<Vec<String>>>, impl FnMut(&str) + Send + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |value: &str| sink.lock().unwrap().push(value.to_string()))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_type_then_commit_with_keyboard() {
    let (seen, on_change) = recorder();
    let mut input = fruit_controller().with_on_change(on_change);

    input.on_text_input("an");
    assert_eq!(input.visible_suggestions(), ["banana".to_string()]);

    assert_eq!(input.on_key_press(Key::ArrowDown), KeyOutcome::Handled);
    assert_eq!(input.highlighted(), Some("banana"));
    assert_eq!(
        input.on_key_press(Key::Enter),
        KeyOutcome::Committed("banana".to_string())
    );

    assert_eq!(input.value(), "banana");
    assert!(!input.is_open());
    assert_eq!(*seen.lock().unwrap(), vec!["an".to_string(), "banana".to_string()]);
}

#[test]
fn test_arrow_down_on_closed_dropdown_only_opens() {
    let (seen, on_change) = recorder();
    let mut input = fruit_controller().with_on_change(on_change);
    assert!(!input.is_open());

    input.on_key_press(Key::ArrowDown);

    assert!(input.is_open());
    assert_eq!(input.selection_index(), -1);
    assert_eq!(input.value(), "");
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_click_commits_without_notifying() {
    let (seen, on_change) = recorder();
    let mut input = fruit_controller().with_on_change(on_change);

    input.on_text_input("co");
    assert_eq!(input.visible_suggestions(), ["coconut".to_string()]);

    assert!(input.on_item_select("coconut"));
    assert_eq!(input.value(), "coconut");
    assert!(!input.is_open());
    assert_eq!(*seen.lock().unwrap(), vec!["co".to_string()]);
}

#[test]
fn test_clicking_current_value_keeps_dropdown() {
    let mut input = fruit_controller();
    input.on_text_input("coconut");
    input.on_key_press(Key::ArrowDown);

    assert!(!input.on_item_select("coconut"));
    assert!(input.is_open());
    assert_eq!(input.highlighted(), Some("coconut"));
}

#[test]
fn test_tab_and_space_commit_like_enter() {
    for commit in [Key::Tab, Key::Space] {
        let mut input = fruit_controller();
        input.on_text_input("a");
        input.on_key_press(Key::ArrowDown);
        input.on_key_press(Key::ArrowDown);

        assert_eq!(input.on_key_press(commit), KeyOutcome::Committed("banana".to_string()));
        assert_eq!(input.value(), "banana");
    }
}

#[test]
fn test_candidate_file_feeds_controller() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("films.json");
    fs::write(&path, r#"[{"title": "Alien"}, {"title": "Aliens"}, {"title": "Heat"}]"#).unwrap();

    let candidates = load_candidates(&path).unwrap();
    let mut input =
        InputController::new(ControllerConfig::default(), SuggestionSource::from_candidates(candidates))
            .unwrap();

    input.on_text_input("ALIEN");
    assert_eq!(input.visible_suggestions(), ["Alien".to_string(), "Aliens".to_string()]);
}

#[test]
fn test_config_file_drives_controller() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "initial_value = \"the\"\nmatch_strategy = \"pattern\"\ndebounce_interval_ms = 10\n",
    )
    .unwrap();

    let config = AutosuggestConfig::load_from(&path).unwrap();
    let mut input = InputController::new(
        config.controller_config(),
        SuggestionSource::from_candidates(movie_titles()),
    )
    .unwrap();

    assert_eq!(input.value(), "the");
    assert!(input.matches().iter().all(|title| title.to_lowercase().contains("the")));

    input.on_text_input("^the god");
    assert_eq!(
        input.matches(),
        ["The Godfather".to_string(), "The Godfather: Part II".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn test_remote_burst_fetches_once() {
    let transport = MockTransport::movies();
    let config = ControllerConfig::default();
    let mut input =
        InputController::new(config, SuggestionSource::remote(transport.clone())).unwrap();
    assert_eq!(input.source_kind(), SourceKind::Remote);

    input.on_text_input("ap");
    tokio::time::sleep(Duration::from_millis(50)).await;
    input.on_text_input("apo");

    assert!(input.next_suggestions().await);
    assert_eq!(transport.requests(), vec!["apo".to_string()]);
    assert_eq!(input.matches(), ["Apocalypse Now".to_string()]);
    assert!(input.is_open());
}

#[tokio::test(start_paused = true)]
async fn test_typing_within_debounce_window_with_defaults() {
    let transport = MockTransport::movies();
    let mut input =
        InputController::new(ControllerConfig::default(), SuggestionSource::remote(transport.clone()))
            .unwrap();

    input.on_text_input("ap");
    tokio::time::sleep(Duration::from_millis(100)).await;
    input.on_text_input("app");
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert_eq!(transport.requests(), vec!["app".to_string()]);
    input.poll_suggestions();
    assert!(input.matches().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_remote_backend_down_shows_nothing() {
    let transport = MockTransport::movies();
    transport.set_failing(true);
    let source = SuggestionSource::Remote(RemoteSource::with_cache_config(
        transport.clone(),
        Duration::from_secs(60),
        0,
    ));
    let config = ControllerConfig::default();
    let mut input = InputController::new(config, source).unwrap();

    input.on_text_input("alien");
    input.next_suggestions().await;
    assert!(input.matches().is_empty());

    transport.set_failing(false);
    input.on_text_input("aliens");
    assert!(input.next_suggestions().await);
    assert_eq!(input.matches(), ["Aliens".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_slow_lookup_for_old_query_is_ignored() {
    let transport = MockTransport::with_latency(movie_titles(), Duration::from_millis(500));
    let config = ControllerConfig::default().with_debounce_interval(Duration::from_millis(100));
    let mut input =
        InputController::new(config, SuggestionSource::remote(transport.clone())).unwrap();

    input.on_text_input("the");
    // Lookup for "the" is in flight when the user keeps typing
    tokio::time::sleep(Duration::from_millis(200)).await;
    input.on_text_input("the god");

    assert!(!input.next_suggestions().await);
    assert!(input.matches().is_empty());
    assert!(input.next_suggestions().await);
    assert_eq!(input.matches().len(), 2);
    assert_eq!(transport.requests(), vec!["the".to_string(), "the god".to_string()]);
}

#[test]
fn test_terminal_keys_drive_controller() {
    let mut input = fruit_controller();
    let mut editor = EditorState::default();

    for c in "co".chars() {
        assert_eq!(
            handle_key(&mut input, &mut editor, key(KeyCode::Char(c))),
            EventResult::Continue
        );
    }
    assert_eq!(input.value(), "co");
    assert_eq!(input.visible_suggestions(), ["coconut".to_string()]);

    handle_key(&mut input, &mut editor, key(KeyCode::Down));
    handle_key(&mut input, &mut editor, key(KeyCode::Enter));
    assert_eq!(input.value(), "coconut");

    assert_eq!(
        handle_key(
            &mut input,
            &mut editor,
            KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)
        ),
        EventResult::Confirm("coconut".to_string())
    );
}

#[derive(Debug, Clone)]
enum Op {
    Type(String),
    Press(Key),
    Click(usize),
    Close,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-z]{0,3}".prop_map(Op::Type),
        prop_oneof![
            Just(Key::Escape),
            Just(Key::Enter),
            Just(Key::Tab),
            Just(Key::Space),
            Just(Key::ArrowUp),
            Just(Key::ArrowDown),
        ]
        .prop_map(Op::Press),
        (0usize..4).prop_map(Op::Click),
        Just(Op::Close),
    ]
}

proptest! {
    #[test]
    fn prop_selection_index_stays_in_range(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut input = fruit_controller();

        for op in ops {
            match op {
                Op::Type(text) => {
                    input.on_text_input(text);
                }
                Op::Press(key) => {
                    input.on_key_press(key);
                }
                Op::Click(position) => {
                    let candidate = input.matches().get(position).cloned();
                    if let Some(candidate) = candidate {
                        input.on_item_select(&candidate);
                    }
                }
                Op::Close => input.close(),
            }

            let len = input.matches().len();
            let index = input.selection_index();
            prop_assert!(index >= -1);
            prop_assert!(index < isize::try_from(len.max(1)).unwrap());
            if len == 0 {
                prop_assert_eq!(index, -1);
            }
        }
    }
}
