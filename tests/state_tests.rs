//! App State Flow Tests
//!
//! Drives `AppState` through the same actions the input layer produces
//! and checks navigation, reload and execution transitions.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use tempfile::TempDir;

use pimenu::tui::{Action, AppState, Modal};
use pimenu::{ConfigSource, ExecutionPhase, IconResolver, TileAction};

// ============================================================================
// TEST HELPERS
// ============================================================================

const MENU: &str = r#"
- label: Tools
  name: tools
  items:
    - label: Hello
      command: echo hello
    - label: Nested
      items:
        - label: Deep
          command: "true"
- label: Broken
  command: python "C:\Users\x\Scripts\show.py
- label: Missing
  command: no-such-program-31337
- label: Sleeper
  command: sleep 30
- label: Logo
"#;

fn write_menu(dir: &TempDir, yaml: &str) -> PathBuf {
    let path = dir.path().join("pimenu.yaml");
    fs::write(&path, yaml).unwrap();
    path
}

fn state_with(yaml: &str) -> (TempDir, AppState) {
    let dir = TempDir::new().unwrap();
    let path = write_menu(&dir, yaml);
    let mut state = AppState::new(
        ConfigSource::new(path),
        IconResolver::new(dir.path().join("ico")),
    );
    state.load().unwrap();
    (dir, state)
}

/// Move the file's mtime forward so the change is visible at any granularity
fn touch_later(path: &Path) {
    let later = SystemTime::now() + Duration::from_secs(60);
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(later)
        .unwrap();
}

fn tile_index(state: &AppState, label: &str) -> usize {
    state
        .top_tiles()
        .iter()
        .position(|t| t.label == label)
        .unwrap_or_else(|| panic!("no tile labelled {label}"))
}

async fn wait_for_modal(state: &mut AppState) {
    let started = Instant::now();
    while state.modal.is_none() {
        assert!(started.elapsed() < Duration::from_secs(10), "no modal shown");
        state.tick();
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

// ============================================================================
// NAVIGATION
// ============================================================================

#[tokio::test]
async fn branch_push_and_back_pop() {
    let (_dir, mut state) = state_with(MENU);
    let root = state.nav.top().unwrap().clone();

    state.dispatch(Action::ActivateTile(tile_index(&state, "Tools…"))).await;
    assert_eq!(state.nav.depth(), 2);
    assert_eq!(state.top_tiles()[0].action, TileAction::Back);
    assert_eq!(state.nav.top().unwrap().path, vec!["tools"]);

    state.dispatch(Action::Back).await;
    assert_eq!(state.nav.depth(), 1);
    assert_eq!(state.nav.top().unwrap(), &root);
}

#[tokio::test]
async fn back_tile_pops_like_back_key() {
    let (_dir, mut state) = state_with(MENU);
    state.dispatch(Action::ActivateTile(tile_index(&state, "Tools…"))).await;
    state.dispatch(Action::ActivateTile(0)).await;
    assert!(state.nav.is_root());
}

#[tokio::test]
async fn changed_config_resets_to_root_on_back() {
    let (dir, mut state) = state_with(MENU);
    state.dispatch(Action::ActivateTile(tile_index(&state, "Tools…"))).await;
    state.dispatch(Action::ActivateTile(tile_index(&state, "Nested…"))).await;
    assert_eq!(state.nav.depth(), 3);

    let path = write_menu(&dir, "- label: Fresh\n  command: echo fresh\n");
    touch_later(&path);

    state.dispatch(Action::Back).await;
    assert!(state.nav.is_root(), "expected reset, not a single pop");
    assert_eq!(state.top_tiles().len(), 1);
    assert_eq!(state.top_tiles()[0].label, "Fresh");
    assert!(state.modal.is_none());
}

#[tokio::test]
async fn unchanged_config_pops_one_level() {
    let (_dir, mut state) = state_with(MENU);
    state.dispatch(Action::ActivateTile(tile_index(&state, "Tools…"))).await;
    state.dispatch(Action::ActivateTile(tile_index(&state, "Nested…"))).await;

    state.dispatch(Action::Back).await;
    assert_eq!(state.nav.depth(), 2);
}

#[tokio::test]
async fn broken_config_on_reload_is_fatal() {
    let (dir, mut state) = state_with(MENU);
    state.dispatch(Action::ActivateTile(tile_index(&state, "Tools…"))).await;

    let path = write_menu(&dir, "label: [unclosed\n");
    touch_later(&path);
    state.dispatch(Action::Back).await;

    assert!(matches!(state.modal, Some(Modal::Fatal { .. })));
    state.dispatch(Action::Acknowledge).await;
    assert!(state.should_quit);
    assert!(state.take_fatal().is_some());
}

// ============================================================================
// EXECUTION
// ============================================================================

#[tokio::test]
async fn malformed_command_reports_and_returns_to_root() {
    let (_dir, mut state) = state_with(MENU);
    state.dispatch(Action::ActivateTile(tile_index(&state, "Broken"))).await;

    assert!(!state.is_running());
    assert!(state.nav.is_root());
    let Some(Modal::Error { message }) = &state.modal else {
        panic!("expected error modal, got {:?}", state.modal);
    };
    assert!(message.contains("unbalanced quotes"));

    state.dispatch(Action::Acknowledge).await;
    assert!(state.modal.is_none());
    assert!(!state.should_quit);
}

#[tokio::test]
async fn spawn_failure_reports_and_returns_to_root() {
    let (_dir, mut state) = state_with(MENU);
    state.dispatch(Action::ActivateTile(tile_index(&state, "Missing"))).await;

    assert!(!state.is_running());
    let Some(Modal::Error { message }) = &state.modal else {
        panic!("expected error modal, got {:?}", state.modal);
    };
    assert!(message.contains("no-such-program-31337"));
}

#[cfg(unix)]
#[tokio::test]
async fn finished_command_lands_on_root() {
    let (_dir, mut state) = state_with(MENU);
    state.dispatch(Action::ActivateTile(tile_index(&state, "Tools…"))).await;
    state.dispatch(Action::ActivateTile(tile_index(&state, "Hello"))).await;
    assert!(state.is_running());

    wait_for_modal(&mut state).await;
    let Some(Modal::Finished { message }) = &state.modal else {
        panic!("expected finished modal, got {:?}", state.modal);
    };
    assert_eq!(message, "Process finished (exit code 0)");
    assert_eq!(
        state.execution.as_ref().unwrap().phase(),
        ExecutionPhase::Finished
    );

    state.dispatch(Action::Acknowledge).await;
    assert!(!state.is_running());
    assert!(state.modal.is_none());
    assert!(state.nav.is_root(), "user always returns to the menu root");
}

#[cfg(unix)]
#[tokio::test]
async fn launches_are_refused_while_running() {
    let (_dir, mut state) = state_with(MENU);
    state.dispatch(Action::ActivateTile(tile_index(&state, "Sleeper"))).await;
    assert!(state.is_running());

    state.launch("echo second");
    assert_eq!(state.execution.as_ref().unwrap().command(), "sleep 30");

    // Menu actions are ignored too
    state.dispatch(Action::ActivateTile(0)).await;
    assert_eq!(state.execution.as_ref().unwrap().command(), "sleep 30");

    state.dispatch(Action::Terminate).await;
    assert!(state.execution.as_ref().unwrap().terminate_requested());
    wait_for_modal(&mut state).await;
    assert_eq!(
        state.modal,
        Some(Modal::Finished {
            message: "Process terminated".to_string()
        })
    );

    state.dispatch(Action::Acknowledge).await;
    assert!(!state.is_running());
}

#[cfg(unix)]
#[tokio::test]
async fn config_edited_during_run_is_reloaded_on_return() {
    let (dir, mut state) = state_with(MENU);
    state.dispatch(Action::ActivateTile(tile_index(&state, "Tools…"))).await;
    state.dispatch(Action::ActivateTile(tile_index(&state, "Hello"))).await;

    let path = write_menu(&dir, "- label: Only\n");
    touch_later(&path);

    wait_for_modal(&mut state).await;
    state.dispatch(Action::Acknowledge).await;

    assert!(state.nav.is_root());
    assert_eq!(state.top_tiles().len(), 1);
    assert_eq!(state.top_tiles()[0].label, "Only");
}
