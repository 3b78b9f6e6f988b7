//! Engine scenarios on the headless platform
//!
//! Frames are pumped by hand, so every test controls exactly when retry ticks
//! and deferred captures run relative to scroll events and navigations.

use std::cell::RefCell;
use std::rc::Rc;

use scrollkeep_platform::{
    Location, LocationProvider, PageLifecycleState, PositionStore, ScrollPosition,
    ScrollRestoration, ScrollSurface,
};
use scrollkeep_platform_headless::{HeadlessPlatform, HeadlessRouter, HeadlessSurface};

use crate::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Navigation context handed to decision callbacks
#[derive(Clone, Debug, Default, PartialEq)]
struct Route {
    path: &'static str,
    fail: bool,
}

impl Route {
    fn at(path: &'static str) -> Self {
        Self { path, fail: false }
    }

    fn failing(path: &'static str) -> Self {
        Self { path, fail: true }
    }
}

/// Position store that records every save
#[derive(Default)]
struct RecordingStore {
    inner: MemoryPositionStore,
    saves: RefCell<Vec<(String, Option<String>, ScrollPosition)>>,
}

impl RecordingStore {
    /// Write without recording
    fn seed(&self, location: &Location, key: Option<&str>, position: ScrollPosition) {
        self.inner.save(location, key, position);
    }

    fn window_saves(&self) -> Vec<ScrollPosition> {
        self.saves_for(None)
    }

    fn element_saves(&self, key: &str) -> Vec<ScrollPosition> {
        self.saves_for(Some(key))
    }

    fn saves_for(&self, key: Option<&str>) -> Vec<ScrollPosition> {
        self.saves
            .borrow()
            .iter()
            .filter(|(_, saved_key, _)| saved_key.as_deref() == key)
            .map(|(_, _, position)| *position)
            .collect()
    }

    fn forget_saves(&self) {
        self.saves.borrow_mut().clear();
    }
}

impl PositionStore for RecordingStore {
    fn save(&self, location: &Location, key: Option<&str>, position: ScrollPosition) {
        self.saves
            .borrow_mut()
            .push((location.storage_key(), key.map(str::to_string), position));
        self.inner.save(location, key, position);
    }

    fn read(&self, location: &Location, key: Option<&str>) -> Option<ScrollPosition> {
        self.inner.read(location, key)
    }
}

struct Harness {
    platform: HeadlessPlatform,
    router: Rc<HeadlessRouter>,
    store: Rc<RecordingStore>,
}

impl Harness {
    fn new() -> Self {
        init_tracing();
        Self {
            platform: HeadlessPlatform::new(),
            router: Rc::new(HeadlessRouter::new("/")),
            store: Rc::new(RecordingStore::default()),
        }
    }

    fn builder(&self) -> ScrollBehaviorBuilder<Route> {
        ScrollBehavior::builder(
            &self.platform,
            self.router.clone(),
            self.router.clone(),
            self.store.clone(),
        )
    }

    fn behavior(&self) -> ScrollBehavior<Route> {
        self.builder().build().unwrap()
    }

    fn here(&self) -> Location {
        self.router.current_location()
    }

    fn window(&self) -> &HeadlessSurface {
        &self.platform.window
    }

    /// Run frames until no callback is pending
    fn settle(&self) {
        self.platform.frames.run_until_idle(32);
    }
}

fn pos(x: f32, y: f32) -> ScrollPosition {
    ScrollPosition::new(x, y)
}

// ============================================================================
// Window target resolution
// ============================================================================

#[test]
fn test_pop_restores_saved_window_position() {
    let h = Harness::new();
    h.store.seed(&h.here(), None, pos(0.0, 240.0));
    let behavior = h.behavior();

    let mut completion = behavior.update_scroll(None, &Route::at("/")).unwrap();
    assert!(!completion.is_complete());

    h.settle();
    assert!(completion.is_complete());
    assert_eq!(h.window().scroll_offset(), pos(0.0, 240.0));
    pollster::block_on(completion);
}

#[test]
fn test_push_with_hash_scrolls_fragment_into_view() {
    let h = Harness::new();
    h.platform
        .document
        .add_anchor("section2", h.platform.window.clone(), pos(0.0, 900.0));
    let behavior = h.behavior();

    h.router.push("/docs", Some("#section2"));
    let completion = behavior
        .update_scroll(Some(&Route::at("/")), &Route::at("/docs"))
        .unwrap();
    h.settle();
    pollster::block_on(completion);

    assert_eq!(h.window().scroll_offset(), pos(0.0, 900.0));
    // Fragment targets cannot be observed, so both attempts run
    assert_eq!(h.platform.document.revealed(), vec!["section2", "section2"]);
}

#[test]
fn test_push_never_restores_saved_position() {
    let h = Harness::new();
    let behavior = h.behavior();
    h.window().set_offset_silently(pos(0.0, 300.0));

    // The next pushed entry will be `k1`
    let upcoming = Location::new(scrollkeep_platform::NavigationAction::Push, "/a").with_key("k1");
    h.store.seed(&upcoming, None, pos(0.0, 500.0));

    h.router.push("/a", None);
    let _completion = behavior.update_scroll(None, &Route::at("/a")).unwrap();
    h.settle();

    assert_eq!(h.window().scroll_offset(), ScrollPosition::ORIGIN);
}

#[test]
fn test_missing_fragment_scrolls_window_to_top() {
    let h = Harness::new();
    let behavior = h.behavior();
    h.window().set_offset_silently(pos(0.0, 300.0));

    h.router.push("/a", Some("#missing"));
    let _completion = behavior.update_scroll(None, &Route::at("/a")).unwrap();
    h.settle();

    assert_eq!(h.window().scroll_offset(), ScrollPosition::ORIGIN);
    assert!(h.platform.document.revealed().is_empty());
}

#[test]
fn test_window_decision_false_skips_scrolling() {
    let h = Harness::new();
    h.window().set_offset_silently(pos(0.0, 300.0));
    let behavior = h
        .builder()
        .should_update_scroll(decision_fn(|_, _: &Route| false))
        .build()
        .unwrap();

    let mut completion = behavior.update_scroll(None, &Route::at("/")).unwrap();
    h.settle();

    assert!(completion.is_complete());
    assert!(h.window().scroll_commands().is_empty());
    assert_eq!(h.window().scroll_offset(), pos(0.0, 300.0));
    // Skipped surfaces still get a fresh position
    assert_eq!(h.store.window_saves(), vec![pos(0.0, 300.0)]);
}

#[test]
fn test_window_decision_sees_contexts() {
    let h = Harness::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_clone = seen.clone();
    let behavior = h
        .builder()
        .should_update_scroll(decision_fn(move |prev: Option<&Route>, next: &Route| {
            seen_clone
                .borrow_mut()
                .push((prev.map(|route| route.path), next.path));
            true
        }))
        .build()
        .unwrap();

    let _first = behavior.update_scroll(None, &Route::at("/")).unwrap();
    let _second = behavior
        .update_scroll(Some(&Route::at("/")), &Route::at("/b"))
        .unwrap();

    assert_eq!(*seen.borrow(), vec![(None, "/"), (Some("/"), "/b")]);
}

#[test]
fn test_window_decision_override_position() {
    let h = Harness::new();
    h.store.seed(&h.here(), None, pos(0.0, 240.0));
    let behavior = h
        .builder()
        .should_update_scroll(decision_fn(|_, _: &Route| pos(0.0, 42.0)))
        .build()
        .unwrap();

    let _completion = behavior.update_scroll(None, &Route::at("/")).unwrap();
    h.settle();
    assert_eq!(h.window().scroll_offset(), pos(0.0, 42.0));
}

#[test]
fn test_decision_error_propagates_and_supersedes() {
    let h = Harness::new();
    let behavior = h
        .builder()
        .should_update_scroll(Rc::new(
            |_: Option<&Route>, next: &Route| -> std::result::Result<ScrollDecision, DecisionError> {
                if next.fail {
                    Err(DecisionError::new("route not ready"))
                } else {
                    Ok(ScrollDecision::UseDefault)
                }
            },
        ))
        .build()
        .unwrap();

    let mut first = behavior.update_scroll(None, &Route::at("/")).unwrap();
    let err = behavior
        .update_scroll(None, &Route::failing("/"))
        .err()
        .unwrap();
    if let ScrollError::Decision { source, .. } = &err {
        assert_eq!(source.message(), "route not ready");
    }
    assert_eq!(
        err,
        ScrollError::Decision {
            surface: "window".into(),
            source: DecisionError::new("route not ready"),
        }
    );

    // The first loop was cancelled before the failure; it still resolves
    h.settle();
    assert!(first.is_complete());
    assert!(h.window().scroll_commands().is_empty());
    assert!(h.store.window_saves().is_empty());
}

// ============================================================================
// Window retry loop
// ============================================================================

#[test]
fn test_update_scroll_saves_window_exactly_once() {
    let h = Harness::new();
    let behavior = h.behavior();

    let completion = behavior.update_scroll(None, &Route::at("/")).unwrap();
    h.settle();
    pollster::block_on(completion);

    assert_eq!(h.store.window_saves(), vec![ScrollPosition::ORIGIN]);
    assert_eq!(h.platform.frames.pending(), 0);
}

#[test]
fn test_window_loop_gives_up_after_two_attempts() {
    let h = Harness::new();
    // Content too short for the saved offset
    h.window().set_extent(pos(0.0, 100.0));
    h.window().set_emit_on_scroll_to(true);
    h.store.seed(&h.here(), None, pos(0.0, 240.0));
    let behavior = h.behavior();

    let mut completion = behavior.update_scroll(None, &Route::at("/")).unwrap();
    h.settle();

    assert!(completion.is_complete());
    assert_eq!(h.window().scroll_commands(), vec![pos(0.0, 240.0); 2]);
    assert_eq!(h.window().scroll_offset(), pos(0.0, 100.0));
    assert_eq!(h.store.window_saves(), vec![pos(0.0, 100.0)]);
}

#[test]
fn test_window_loop_retries_dropped_command() {
    let h = Harness::new();
    h.window().drop_next_scroll_commands(1);
    h.store.seed(&h.here(), None, pos(0.0, 240.0));
    let behavior = h.behavior();

    let _completion = behavior.update_scroll(None, &Route::at("/")).unwrap();
    h.platform.frames.run_frame();
    assert_eq!(h.window().scroll_offset(), ScrollPosition::ORIGIN);

    h.settle();
    assert_eq!(h.window().scroll_commands().len(), 2);
    assert_eq!(h.window().scroll_offset(), pos(0.0, 240.0));
}

#[test]
fn test_attempt_budget_is_configurable() {
    let h = Harness::new();
    h.window().set_extent(pos(0.0, 100.0));
    h.store.seed(&h.here(), None, pos(0.0, 240.0));
    let behavior = h
        .builder()
        .config(ScrollBehaviorConfig::standard().max_window_scroll_attempts(3))
        .build()
        .unwrap();
    assert_eq!(behavior.config().max_window_scroll_attempts, 3);

    let _completion = behavior.update_scroll(None, &Route::at("/")).unwrap();
    h.settle();
    assert_eq!(h.window().scroll_commands().len(), 3);
}

#[test]
fn test_observed_target_ends_loop_early() {
    let h = Harness::new();
    h.window().set_emit_on_scroll_to(true);
    h.store.seed(&h.here(), None, pos(0.0, 240.0));
    let behavior = h.behavior();

    let mut completion = behavior.update_scroll(None, &Route::at("/")).unwrap();
    h.platform.frames.run_frame();

    assert!(completion.is_complete());
    assert_eq!(h.window().scroll_commands(), vec![pos(0.0, 240.0)]);
    assert_eq!(h.store.window_saves(), vec![pos(0.0, 240.0)]);
    assert_eq!(h.platform.frames.pending(), 0);
}

#[test]
fn test_own_scroll_events_are_not_captured_separately() {
    let h = Harness::new();
    h.window().set_emit_on_scroll_to(true);
    h.store.seed(&h.here(), None, pos(0.0, 240.0));
    let behavior = h.behavior();

    let completion = behavior.update_scroll(None, &Route::at("/")).unwrap();
    h.settle();
    pollster::block_on(completion);

    assert_eq!(h.window().scroll_commands(), vec![pos(0.0, 240.0)]);
    assert_eq!(h.store.window_saves(), vec![pos(0.0, 240.0)]);

    // Once settled, scrolling is captured as usual
    h.window().user_scroll(pos(0.0, 300.0));
    assert_eq!(h.platform.frames.pending(), 1);
    h.settle();
    assert_eq!(
        h.store.window_saves(),
        vec![pos(0.0, 240.0), pos(0.0, 300.0)]
    );
}

#[test]
fn test_user_reaching_target_prevents_attempts() {
    let h = Harness::new();
    h.store.seed(&h.here(), None, pos(0.0, 240.0));
    let behavior = h.behavior();

    let mut completion = behavior.update_scroll(None, &Route::at("/")).unwrap();
    h.window().user_scroll(pos(0.0, 240.0));
    h.platform.frames.run_frame();

    assert!(completion.is_complete());
    assert!(h.window().scroll_commands().is_empty());
    assert_eq!(h.store.window_saves(), vec![pos(0.0, 240.0)]);
    assert_eq!(h.platform.frames.pending(), 0);
}

#[test]
fn test_superseded_loop_still_completes() {
    let h = Harness::new();
    let behavior = h.behavior();

    let mut first = behavior.update_scroll(None, &Route::at("/")).unwrap();
    let mut second = behavior.update_scroll(None, &Route::at("/")).unwrap();

    h.platform.frames.run_frame();
    assert!(first.is_complete());
    assert!(!second.is_complete());
    // Only the live loop applied anything
    assert_eq!(h.window().scroll_commands().len(), 1);
    assert!(h.store.window_saves().is_empty());

    h.settle();
    assert!(second.is_complete());
    assert_eq!(h.window().scroll_commands().len(), 2);
    assert_eq!(h.store.window_saves().len(), 1);
}

// ============================================================================
// Capture scheduling and suppression
// ============================================================================

#[test]
fn test_window_scroll_capture_is_coalesced() {
    let h = Harness::new();
    let _behavior = h.behavior();

    h.window().user_scroll(pos(0.0, 10.0));
    h.window().user_scroll(pos(0.0, 20.0));
    assert_eq!(h.platform.frames.pending(), 1);

    h.platform.frames.run_frame();
    assert_eq!(h.store.window_saves(), vec![pos(0.0, 20.0)]);

    // The handle was cleared when the capture ran
    h.window().user_scroll(pos(0.0, 30.0));
    assert_eq!(h.platform.frames.pending(), 1);
}

#[test]
fn test_ignoring_scroll_events_suppresses_capture_and_early_exit() {
    let h = Harness::new();
    h.window().set_emit_on_scroll_to(true);
    let behavior = h.behavior();
    let list = Rc::new(HeadlessSurface::new());
    behavior
        .register_element("list", list.clone(), None, &Route::at("/"))
        .unwrap();
    h.settle();
    h.store.forget_saves();

    behavior.start_ignoring_scroll_events();
    assert!(behavior.is_ignoring_scroll_events());

    // The origin target would be observed after one attempt if events counted
    let _completion = behavior.update_scroll(None, &Route::at("/")).unwrap();
    h.settle();
    assert_eq!(h.window().scroll_commands().len(), 2);
    // Only the capture made as the loop finishes
    assert_eq!(h.store.window_saves(), vec![ScrollPosition::ORIGIN]);

    h.window().user_scroll(pos(0.0, 50.0));
    list.user_scroll(pos(0.0, 70.0));
    assert_eq!(h.platform.frames.pending(), 0);
    assert_eq!(h.store.window_saves(), vec![ScrollPosition::ORIGIN]);
    assert!(h.store.element_saves("list").is_empty());

    behavior.stop_ignoring_scroll_events();
    h.window().user_scroll(pos(0.0, 60.0));
    list.user_scroll(pos(0.0, 80.0));
    h.settle();
    assert_eq!(
        h.store.window_saves(),
        vec![ScrollPosition::ORIGIN, pos(0.0, 60.0)]
    );
    assert_eq!(h.store.element_saves("list"), vec![pos(0.0, 80.0)]);
}

// ============================================================================
// Elements
// ============================================================================

#[test]
fn test_register_twice_and_unregister_unknown() {
    let h = Harness::new();
    let behavior = h.behavior();
    let list = Rc::new(HeadlessSurface::new());

    behavior
        .register_element("list", list.clone(), None, &Route::at("/"))
        .unwrap();
    let err = behavior
        .register_element("list", Rc::new(HeadlessSurface::new()), None, &Route::at("/"))
        .unwrap_err();
    assert_eq!(err, ScrollError::DuplicateKey("list".into()));
    assert_eq!(list.listener_count(), 1);

    let err = behavior.unregister_element("missing").unwrap_err();
    assert_eq!(err, ScrollError::UnknownKey("missing".into()));

    behavior.unregister_element("list").unwrap();
    assert!(!behavior.is_registered("list"));
    assert_eq!(list.listener_count(), 0);
    assert_eq!(h.platform.frames.pending(), 0);
}

#[test]
fn test_register_restores_and_saves_initial_position() {
    let h = Harness::new();
    h.store.seed(&h.here(), Some("list"), pos(0.0, 80.0));
    let behavior = h.behavior();
    let list = Rc::new(HeadlessSurface::new());

    behavior
        .register_element("list", list.clone(), None, &Route::at("/"))
        .unwrap();
    assert_eq!(list.scroll_offset(), pos(0.0, 80.0));
    assert_eq!(h.platform.frames.pending(), 1);

    h.settle();
    assert_eq!(h.store.element_saves("list"), vec![pos(0.0, 80.0)]);
    assert_eq!(behavior.registered_keys(), vec!["list"]);
}

#[test]
fn test_element_scroll_capture_is_coalesced() {
    let h = Harness::new();
    let behavior = h.behavior();
    let list = Rc::new(HeadlessSurface::new());
    behavior
        .register_element("list", list.clone(), None, &Route::at("/"))
        .unwrap();
    h.settle();
    h.store.forget_saves();

    list.user_scroll(pos(0.0, 10.0));
    list.user_scroll(pos(0.0, 20.0));
    assert_eq!(h.platform.frames.pending(), 1);

    h.settle();
    assert_eq!(h.store.element_saves("list"), vec![pos(0.0, 20.0)]);
}

#[test]
fn test_element_decision_controls_updates() {
    let h = Harness::new();
    let behavior = h.behavior();
    let list = Rc::new(HeadlessSurface::new());
    let skip_modals = decision_fn(|_, next: &Route| next.path != "/modal");
    behavior
        .register_element("list", list.clone(), Some(skip_modals), &Route::at("/"))
        .unwrap();
    list.user_scroll(pos(0.0, 55.0));
    let commands = list.scroll_commands().len();

    h.router.push("/modal", None);
    let _completion = behavior
        .update_scroll(Some(&Route::at("/")), &Route::at("/modal"))
        .unwrap();
    assert_eq!(list.scroll_commands().len(), commands);
    assert_eq!(list.scroll_offset(), pos(0.0, 55.0));

    h.router.push("/next", None);
    let _completion = behavior
        .update_scroll(Some(&Route::at("/modal")), &Route::at("/next"))
        .unwrap();
    assert_eq!(list.scroll_offset(), ScrollPosition::ORIGIN);
}

#[test]
fn test_element_decision_override_position() {
    let h = Harness::new();
    let behavior = h.behavior();
    let list = Rc::new(HeadlessSurface::new());

    behavior
        .register_element(
            "list",
            list.clone(),
            Some(decision_fn(|_, _: &Route| pos(0.0, 42.0))),
            &Route::at("/"),
        )
        .unwrap();
    assert_eq!(list.scroll_offset(), pos(0.0, 42.0));
}

#[test]
fn test_failed_registration_is_rolled_back() {
    let h = Harness::new();
    let behavior = h.behavior();
    let list = Rc::new(HeadlessSurface::new());
    let failing: DecisionFn<Route> = Rc::new(
        |_: Option<&Route>, _: &Route| -> std::result::Result<ScrollDecision, DecisionError> {
            Err(DecisionError::new("no layout yet"))
        },
    );

    let err = behavior
        .register_element("list", list.clone(), Some(failing), &Route::at("/"))
        .unwrap_err();
    assert!(matches!(err, ScrollError::Decision { ref surface, .. } if surface == "element `list`"));
    assert!(!behavior.is_registered("list"));
    assert_eq!(list.listener_count(), 0);
    assert_eq!(h.platform.frames.pending(), 0);

    // The key is free again
    behavior
        .register_element("list", list.clone(), None, &Route::at("/"))
        .unwrap();
}

#[test]
fn test_scroll_to_target_applies_once() {
    let h = Harness::new();
    let behavior = h.behavior();
    let list = HeadlessSurface::new();

    behavior.scroll_to_target(&list, &ScrollTarget::Position(pos(0.0, 12.0)));
    assert_eq!(list.scroll_commands(), vec![pos(0.0, 12.0)]);

    behavior.scroll_to_target(&list, &ScrollTarget::Fragment("nowhere".into()));
    assert_eq!(list.scroll_offset(), ScrollPosition::ORIGIN);
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_navigation_saves_elements_immediately() {
    let h = Harness::new();
    let behavior = h.behavior();
    let list = Rc::new(HeadlessSurface::new());
    behavior
        .register_element("list", list.clone(), None, &Route::at("/"))
        .unwrap();
    let home = h.here();

    list.user_scroll(pos(0.0, 50.0));
    h.window().user_scroll(pos(0.0, 300.0));
    h.router.push("/next", None);

    assert_eq!(h.store.read(&home, Some("list")), Some(pos(0.0, 50.0)));
    // Pending captures were dropped, not deferred to the new location
    assert_eq!(h.platform.frames.pending(), 0);
    assert!(h.store.window_saves().is_empty());
}

#[test]
fn test_pop_does_not_capture_window() {
    let h = Harness::new();
    let _behavior = h.behavior();
    h.router.push("/next", None);

    // The platform moved the window for the entry being restored
    h.window().user_scroll(pos(0.0, 700.0));
    h.router.back();
    h.settle();

    assert!(h.store.window_saves().is_empty());
}

#[test]
fn test_navigation_while_ignoring_skips_element_saves() {
    let h = Harness::new();
    let behavior = h.behavior();
    let list = Rc::new(HeadlessSurface::new());
    behavior
        .register_element("list", list.clone(), None, &Route::at("/"))
        .unwrap();

    behavior.start_ignoring_scroll_events();
    h.router.push("/next", None);
    h.settle();
    assert!(h.store.element_saves("list").is_empty());
}

#[test]
fn test_push_then_back_restores_everything() {
    let h = Harness::new();
    let behavior = h.behavior();
    let list = Rc::new(HeadlessSurface::new());
    let home = Route::at("/");
    let detail = Route::at("/detail");

    behavior
        .register_element("list", list.clone(), None, &home)
        .unwrap();
    h.window().user_scroll(pos(0.0, 400.0));
    list.user_scroll(pos(0.0, 80.0));
    h.settle();

    h.router.push("/detail", None);
    let completion = behavior.update_scroll(Some(&home), &detail).unwrap();
    h.settle();
    pollster::block_on(completion);
    assert_eq!(h.window().scroll_offset(), ScrollPosition::ORIGIN);
    assert_eq!(list.scroll_offset(), ScrollPosition::ORIGIN);

    h.router.back();
    let completion = behavior.update_scroll(Some(&detail), &home).unwrap();
    h.settle();
    pollster::block_on(completion);
    assert_eq!(h.window().scroll_offset(), pos(0.0, 400.0));
    assert_eq!(list.scroll_offset(), pos(0.0, 80.0));
}

// ============================================================================
// Scroll restoration flag and lifecycle
// ============================================================================

#[test]
fn test_flag_managed_for_engine_lifetime() {
    let h = Harness::new();
    let behavior = h.behavior();
    assert_eq!(h.platform.history.current(), ScrollRestoration::Manual);

    behavior.stop();
    assert_eq!(h.platform.history.current(), ScrollRestoration::Auto);
}

#[test]
fn test_suspension_saves_everything_and_releases_flag() {
    let h = Harness::new();
    let behavior = h.behavior();
    let list = Rc::new(HeadlessSurface::new());
    behavior
        .register_element("list", list.clone(), None, &Route::at("/"))
        .unwrap();
    let home = h.here();

    list.user_scroll(pos(0.0, 30.0));
    h.window().user_scroll(pos(0.0, 120.0));
    h.platform.lifecycle.transition(PageLifecycleState::Frozen);

    assert_eq!(h.store.read(&home, None), Some(pos(0.0, 120.0)));
    assert_eq!(h.store.read(&home, Some("list")), Some(pos(0.0, 30.0)));
    assert_eq!(h.platform.frames.pending(), 0);
    assert_eq!(h.platform.history.current(), ScrollRestoration::Auto);

    h.platform.lifecycle.transition(PageLifecycleState::Active);
    assert_eq!(h.platform.history.current(), ScrollRestoration::Manual);
}

#[test]
fn test_non_suspending_states_keep_flag() {
    let h = Harness::new();
    let _behavior = h.behavior();

    h.platform.lifecycle.transition(PageLifecycleState::Hidden);
    h.platform.lifecycle.transition(PageLifecycleState::Passive);
    assert_eq!(h.platform.history.current(), ScrollRestoration::Manual);
    assert_eq!(h.platform.history.write_count(), 1);
}

#[test]
fn test_unsupported_flag_stays_untouched() {
    let h = Harness::new();
    h.platform.history.set_supported(false);
    let behavior = h.behavior();

    h.platform.lifecycle.transition(PageLifecycleState::Terminated);
    h.platform.lifecycle.transition(PageLifecycleState::Active);
    behavior.stop();
    assert_eq!(h.platform.history.write_count(), 0);
}

#[test]
fn test_unmanaged_config_leaves_flag_alone() {
    let h = Harness::new();
    let behavior = h
        .builder()
        .config(ScrollBehaviorConfig::unmanaged())
        .build()
        .unwrap();

    h.platform.lifecycle.transition(PageLifecycleState::Discarded);
    h.platform.lifecycle.transition(PageLifecycleState::Active);
    drop(behavior);
    assert_eq!(h.platform.history.write_count(), 0);
}

#[test]
fn test_invalid_config_rejected_before_attaching() {
    let h = Harness::new();
    let err = h
        .builder()
        .config(ScrollBehaviorConfig::standard().max_window_scroll_attempts(0))
        .build()
        .err()
        .unwrap();

    assert!(matches!(err, ScrollError::Config(_)));
    assert_eq!(h.router.listener_count(), 0);
    assert_eq!(h.platform.history.write_count(), 0);
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_stop_detaches_everything() {
    let h = Harness::new();
    let behavior = h.behavior();
    let list = Rc::new(HeadlessSurface::new());
    behavior
        .register_element("list", list.clone(), None, &Route::at("/"))
        .unwrap();
    let mut completion = behavior.update_scroll(None, &Route::at("/")).unwrap();

    behavior.stop();
    behavior.stop();

    assert!(behavior.is_stopped());
    assert_eq!(h.window().listener_count(), 0);
    assert_eq!(h.router.listener_count(), 0);
    assert_eq!(h.platform.lifecycle.listener_count(), 0);
    assert_eq!(list.listener_count(), 0);
    assert!(behavior.registered_keys().is_empty());
    assert_eq!(h.platform.history.current(), ScrollRestoration::Auto);

    // The loop was cancelled but its completion still resolves
    h.settle();
    assert!(completion.is_complete());
    assert!(h.window().scroll_commands().is_empty());
    assert!(h.store.window_saves().is_empty());
    assert!(h.store.element_saves("list").is_empty());
}

#[test]
fn test_drop_stops_and_resolves_pending_completion() {
    let h = Harness::new();
    let mut completion = {
        let behavior = h.behavior();
        behavior.update_scroll(None, &Route::at("/")).unwrap()
    };

    assert_eq!(h.window().listener_count(), 0);
    assert_eq!(h.router.listener_count(), 0);
    assert_eq!(h.platform.history.current(), ScrollRestoration::Auto);

    h.settle();
    assert!(completion.is_complete());
    assert!(h.window().scroll_commands().is_empty());
}
