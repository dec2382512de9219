// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the screen-routing state types

use std::thread::sleep;
use std::time::Duration;

use realyou::app::{
    ContextPage, Orientation, PermissionGate, TapTracker, grant_button_enabled, toggle_context,
};
use realyou::portal::PermissionDecision;

#[test]
fn test_orientation_landscape_iff_wider_than_tall() {
    assert_eq!(Orientation::of(800.0, 600.0), Orientation::Landscape);
    assert_eq!(Orientation::of(600.0, 800.0), Orientation::Portrait);
    assert_eq!(
        Orientation::of(640.0, 640.0),
        Orientation::Portrait,
        "A square window must count as portrait"
    );
    assert_eq!(Orientation::of(0.0, 0.0), Orientation::Portrait);
}

#[test]
fn test_camera_screen_shown_iff_granted() {
    assert!(PermissionGate::Granted.is_granted());
    assert!(!PermissionGate::Unknown.is_granted());
    assert!(!PermissionGate::Denied { rationale: false }.is_granted());
    assert!(!PermissionGate::Denied { rationale: true }.is_granted());
}

#[test]
fn test_rationale_shown_only_after_active_dismissal() {
    assert!(PermissionGate::Denied { rationale: true }.shows_rationale());
    assert!(!PermissionGate::Denied { rationale: false }.shows_rationale());
    assert!(!PermissionGate::Unknown.shows_rationale());
    assert!(!PermissionGate::Granted.shows_rationale());
}

#[test]
fn test_grant_button_requires_presence_and_idle_request() {
    assert!(grant_button_enabled(true, false));
    assert!(
        !grant_button_enabled(true, true),
        "an in-flight portal request must disable the button"
    );
    assert!(
        !grant_button_enabled(false, false),
        "a system without a camera must disable the button"
    );
    assert!(!grant_button_enabled(false, true));
}

#[test]
fn test_portal_decisions_fold_into_the_gate() {
    let gate = PermissionGate::Unknown;

    assert_eq!(
        gate.resolve(PermissionDecision::Granted),
        PermissionGate::Granted
    );
    assert_eq!(
        gate.resolve(PermissionDecision::Dismissed),
        PermissionGate::Denied { rationale: true }
    );
    assert_eq!(
        gate.resolve(PermissionDecision::Refused),
        PermissionGate::Denied { rationale: false }
    );
}

#[test]
fn test_context_page_toggle_is_an_involution() {
    // Requesting the visible page hides the drawer, and vice versa
    let (page, shown) = toggle_context(ContextPage::About, false, ContextPage::About);
    assert_eq!((page, shown), (ContextPage::About, true));

    let (page, shown) = toggle_context(page, shown, ContextPage::About);
    assert_eq!((page, shown), (ContextPage::About, false));

    // Requesting a different page switches and shows
    let (page, shown) = toggle_context(ContextPage::About, true, ContextPage::Settings);
    assert_eq!((page, shown), (ContextPage::Settings, true));

    let (page, shown) = toggle_context(page, shown, ContextPage::Settings);
    assert_eq!((page, shown), (ContextPage::Settings, false));
}

#[test]
fn test_double_tap_fires_on_second_quick_tap() {
    let mut tracker = TapTracker::default();

    assert!(!tracker.register_tap(), "first tap must not fire");
    assert!(tracker.register_tap(), "second quick tap must fire");
    assert!(
        !tracker.register_tap(),
        "a completed double tap must reset the tracker"
    );
}

#[test]
fn test_slow_taps_never_fire() {
    let mut tracker = TapTracker::default();

    assert!(!tracker.register_tap());
    sleep(Duration::from_millis(400));
    assert!(
        !tracker.register_tap(),
        "taps outside the double-tap window must not fire"
    );
}

#[test]
fn test_mirror_toggle_inverts_and_even_count_restores() {
    let mut mirrored = false;

    for _ in 0..3 {
        let before = mirrored;
        mirrored = !mirrored;
        assert_ne!(mirrored, before, "each toggle must invert the flag");
        mirrored = !mirrored;
        assert_eq!(mirrored, before, "an even number of toggles must restore");
    }
    assert!(!mirrored);
}
