//! System-wide click watcher.
//!
//! The OS hook runs on its own thread and only ever pushes left-press
//! coordinates into a bounded channel. The UI thread drains that channel once
//! per frame and keeps the clicks that landed outside the overlay.

use crate::geometry::{Point, Rect};
use anyhow::anyhow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

/// One global mouse button event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookEvent {
    pub x: i32,
    pub y: i32,
    pub button: MouseButton,
    pub pressed: bool,
}

pub type HookCallback = Box<dyn FnMut(HookEvent) + Send + 'static>;

/// One-shot channel a hook uses to say it stopped working after install
/// returned. Some backends keep the callback alive after failing, so this is
/// the only reliable signal.
#[derive(Debug, Clone)]
pub struct HookFailure {
    tx: SyncSender<String>,
}

impl HookFailure {
    pub fn report(&self, reason: impl Into<String>) {
        let _ = self.tx.try_send(reason.into());
    }
}

/// Source of global mouse events.
pub trait InputHookBackend {
    /// Subscribe `callback` to every global button event. Later failures go
    /// through `failure`; dropping the callback also means the hook is gone.
    fn install(&mut self, callback: HookCallback, failure: HookFailure) -> anyhow::Result<()>;
}

/// Hook backed by `rdev::listen` on a dedicated daemon thread.
#[derive(Debug, Default)]
pub struct RdevHook;

fn map_button(button: rdev::Button) -> MouseButton {
    match button {
        rdev::Button::Left => MouseButton::Left,
        rdev::Button::Right => MouseButton::Right,
        rdev::Button::Middle => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

impl InputHookBackend for RdevHook {
    fn install(&mut self, mut callback: HookCallback, failure: HookFailure) -> anyhow::Result<()> {
        thread::Builder::new()
            .name("global-input-watcher".into())
            .spawn(move || {
                // rdev button events carry no position, so remember the last move.
                let mut cursor = (0_i32, 0_i32);
                let result = rdev::listen(move |event| match event.event_type {
                    rdev::EventType::MouseMove { x, y } => {
                        cursor = (x.round() as i32, y.round() as i32);
                    }
                    rdev::EventType::ButtonPress(button) => callback(HookEvent {
                        x: cursor.0,
                        y: cursor.1,
                        button: map_button(button),
                        pressed: true,
                    }),
                    rdev::EventType::ButtonRelease(button) => callback(HookEvent {
                        x: cursor.0,
                        y: cursor.1,
                        button: map_button(button),
                        pressed: false,
                    }),
                    _ => {}
                });
                // rdev may keep the callback registered after failing, so the
                // click channel alone would never disconnect.
                if let Err(err) = result {
                    tracing::error!(?err, "global mouse hook failed");
                    failure.report(format!("{err:?}"));
                }
            })
            .map_err(|e| anyhow!("failed to spawn watcher thread: {e}"))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatcherStatus {
    Running,
    /// Click chasing is off for the rest of the process.
    Unavailable(String),
}

pub fn format_watcher_status(status: &WatcherStatus) -> String {
    match status {
        WatcherStatus::Running => "Global click watcher: running".to_string(),
        WatcherStatus::Unavailable(reason) => {
            format!("Global click watcher: unavailable ({reason}); click chasing disabled")
        }
    }
}

pub struct GlobalInputWatcher {
    clicks: Option<Receiver<Point>>,
    failures: Option<Receiver<String>>,
    status: WatcherStatus,
}

impl GlobalInputWatcher {
    /// Install `backend` and start forwarding left presses. Never fails: a
    /// backend error only leaves the watcher unavailable.
    pub fn start(backend: &mut dyn InputHookBackend, capacity: usize) -> Self {
        let (tx, rx) = mpsc::sync_channel(capacity.max(1));
        let (failure_tx, failure_rx) = mpsc::sync_channel(1);
        let callback: HookCallback = Box::new(move |event: HookEvent| {
            if event.button != MouseButton::Left || !event.pressed {
                return;
            }
            match tx.try_send(Point::new(event.x, event.y)) {
                Ok(()) => {}
                Err(TrySendError::Full(point)) => {
                    tracing::debug!(?point, "click queue full, dropping click");
                }
                Err(TrySendError::Disconnected(_)) => {}
            }
        });
        match backend.install(callback, HookFailure { tx: failure_tx }) {
            Ok(()) => Self {
                clicks: Some(rx),
                failures: Some(failure_rx),
                status: WatcherStatus::Running,
            },
            Err(err) => {
                tracing::error!(error = %format!("{err:#}"), "failed to install global mouse hook");
                Self::disabled(format!("{err:#}"))
            }
        }
    }

    pub fn disabled(reason: impl Into<String>) -> Self {
        Self {
            clicks: None,
            failures: None,
            status: WatcherStatus::Unavailable(reason.into()),
        }
    }

    fn stop(&mut self, reason: String) {
        tracing::warn!(%reason, "global mouse hook stopped; click chasing disabled");
        self.clicks = None;
        self.failures = None;
        self.status = WatcherStatus::Unavailable(reason);
    }

    /// Take every queued click that landed outside `bounds`, oldest first.
    /// Returns nothing once the hook has reported a failure.
    pub fn drain_outside(&mut self, bounds: Rect) -> Vec<Point> {
        let mut outside = Vec::new();
        let reported = self.failures.as_ref().and_then(|rx| rx.try_recv().ok());
        if let Some(reason) = reported {
            self.stop(reason);
            return outside;
        }
        let Some(rx) = &self.clicks else {
            return outside;
        };
        let disconnected = loop {
            match rx.try_recv() {
                Ok(point) => {
                    if !bounds.contains(point) {
                        outside.push(point);
                    }
                }
                Err(TryRecvError::Empty) => break false,
                Err(TryRecvError::Disconnected) => break true,
            }
        };
        if disconnected {
            self.stop("input hook stopped".into());
        }
        outside
    }

    pub fn status(&self) -> &WatcherStatus {
        &self.status
    }
}

/// In-process backend for tests: events are pushed through a
/// [`MockInputHandle`].
pub struct MockInputHook {
    state: Arc<MockHookState>,
    fail_with: Option<String>,
}

#[derive(Default)]
struct MockHookState {
    install_count: AtomicUsize,
    callback: Mutex<Option<HookCallback>>,
    failure: Mutex<Option<HookFailure>>,
}

#[derive(Clone)]
pub struct MockInputHandle {
    state: Arc<MockHookState>,
}

impl MockInputHook {
    pub fn new() -> (Self, MockInputHandle) {
        let state = Arc::new(MockHookState::default());
        (
            Self {
                state: Arc::clone(&state),
                fail_with: None,
            },
            MockInputHandle { state },
        )
    }

    /// A backend whose install always fails, like a hook denied by the OS.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            state: Arc::new(MockHookState::default()),
            fail_with: Some(reason.into()),
        }
    }
}

impl InputHookBackend for MockInputHook {
    fn install(&mut self, callback: HookCallback, failure: HookFailure) -> anyhow::Result<()> {
        if let Some(reason) = &self.fail_with {
            return Err(anyhow!("{reason}"));
        }
        let mut guard = self.state.callback.lock().map_err(|_| anyhow!("lock"))?;
        self.state.install_count.fetch_add(1, Ordering::SeqCst);
        *guard = Some(callback);
        *self.state.failure.lock().map_err(|_| anyhow!("lock"))? = Some(failure);
        Ok(())
    }
}

impl MockInputHandle {
    pub fn emit(&self, event: HookEvent) {
        if let Ok(mut guard) = self.state.callback.lock() {
            if let Some(callback) = guard.as_mut() {
                callback(event);
            }
        }
    }

    pub fn press(&self, x: i32, y: i32, button: MouseButton) {
        self.emit(HookEvent {
            x,
            y,
            button,
            pressed: true,
        });
    }

    /// Drop the subscribed callback, as if the hook thread died.
    pub fn disconnect(&self) {
        if let Ok(mut guard) = self.state.callback.lock() {
            guard.take();
        }
    }

    /// Report a failure while keeping the callback registered, the way
    /// rdev behaves when it cannot open the display.
    pub fn fail(&self, reason: &str) {
        if let Ok(guard) = self.state.failure.lock() {
            if let Some(failure) = guard.as_ref() {
                failure.report(reason);
            }
        }
    }

    pub fn install_count(&self) -> usize {
        self.state.install_count.load(Ordering::SeqCst)
    }
}
