// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the session binder invariants

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use realyou::backends::camera::{
    CameraDevice, CameraLocation, CameraProvider, CameraSession, FrameSender, SessionBinder,
    frame_channel,
};
use realyou::errors::CameraError;

/// Counts live and total sessions so binding overlap is observable.
#[derive(Default)]
struct Counters {
    live: AtomicUsize,
    peak: AtomicUsize,
    opened: AtomicUsize,
}

struct FakeSession {
    counters: Arc<Counters>,
}

impl CameraSession for FakeSession {
    fn stop(&mut self) {
        self.counters.live.fetch_sub(1, Ordering::SeqCst);
    }
}

struct FakeProvider {
    devices: Vec<CameraDevice>,
    counters: Arc<Counters>,
}

impl FakeProvider {
    fn new(devices: Vec<CameraDevice>) -> (Arc<Self>, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        let provider = Arc::new(Self {
            devices,
            counters: Arc::clone(&counters),
        });
        (provider, counters)
    }
}

impl CameraProvider for FakeProvider {
    fn enumerate(&self) -> Result<Vec<CameraDevice>, CameraError> {
        Ok(self.devices.clone())
    }

    fn open(
        &self,
        _device: &CameraDevice,
        _sink: FrameSender,
    ) -> Result<Box<dyn CameraSession>, CameraError> {
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        let live = self.counters.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.peak.fetch_max(live, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            counters: Arc::clone(&self.counters),
        }))
    }
}

fn device(name: &str, location: CameraLocation) -> CameraDevice {
    CameraDevice {
        name: name.to_string(),
        path: format!("pipewire-{}", name),
        location,
    }
}

fn sink() -> FrameSender {
    frame_channel().0
}

#[test]
fn test_front_camera_prefers_user_facing_device() {
    let (provider, _) = FakeProvider::new(vec![
        device("rear", CameraLocation::Back),
        device("selfie", CameraLocation::Front),
    ]);
    let binder = SessionBinder::new(provider);

    let front = binder.front_camera().expect("front camera must resolve");
    assert_eq!(front.name, "selfie");
}

#[test]
fn test_unknown_location_qualifies_as_front() {
    // Desktop webcams rarely report a location; they still face the user
    let (provider, _) = FakeProvider::new(vec![device("webcam", CameraLocation::Unknown)]);
    let binder = SessionBinder::new(provider);

    let front = binder.front_camera().expect("front camera must resolve");
    assert_eq!(front.name, "webcam");
}

#[test]
fn test_no_front_camera_fails_without_binding() {
    let (provider, counters) = FakeProvider::new(vec![
        device("rear", CameraLocation::Back),
        device("capture-card", CameraLocation::External),
    ]);
    let binder = SessionBinder::new(provider);

    assert_eq!(
        binder.front_camera(),
        Err(CameraError::FrontCameraUnavailable)
    );
    assert_eq!(
        counters.opened.load(Ordering::SeqCst),
        0,
        "no session may be opened when no front camera exists"
    );
    assert!(!binder.has_active_session());
}

#[test]
fn test_empty_enumeration_reports_no_camera() {
    let (provider, _) = FakeProvider::new(Vec::new());
    let binder = SessionBinder::new(provider);

    assert_eq!(binder.front_camera(), Err(CameraError::NoCameraFound));
}

#[test]
fn test_rebind_unbinds_previous_session_first() {
    let (provider, counters) = FakeProvider::new(vec![device("selfie", CameraLocation::Front)]);
    let binder = SessionBinder::new(provider);
    let target = device("selfie", CameraLocation::Front);

    binder.bind(&target, sink()).expect("first bind");
    binder.bind(&target, sink()).expect("rebind");
    binder.bind(&target, sink()).expect("rebind again");

    assert_eq!(counters.opened.load(Ordering::SeqCst), 3);
    assert_eq!(
        counters.peak.load(Ordering::SeqCst),
        1,
        "two sessions must never be live at the same time"
    );
    assert_eq!(counters.live.load(Ordering::SeqCst), 1);
    assert!(binder.has_active_session());
}

#[test]
fn test_unbind_all_releases_the_session() {
    let (provider, counters) = FakeProvider::new(vec![device("selfie", CameraLocation::Front)]);
    let binder = SessionBinder::new(provider);
    let target = device("selfie", CameraLocation::Front);

    binder.bind(&target, sink()).expect("bind");
    binder.unbind_all();

    assert_eq!(counters.live.load(Ordering::SeqCst), 0);
    assert!(!binder.has_active_session());

    // A second unbind is a no-op
    binder.unbind_all();
    assert_eq!(counters.live.load(Ordering::SeqCst), 0);
}
