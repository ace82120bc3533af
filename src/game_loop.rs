//! Frame scheduling
//!
//! [`GameLoop`] drives `update(dt)` then `render()` once per frame from
//! whatever timing primitive a [`FrameScheduler`] wraps. Each frame's `dt` is
//! capped at [`MAX_FRAME_DT`] so a stall (debugger, backgrounded window)
//! cannot produce one huge physics step.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::consts::MAX_FRAME_DT;

pub type FrameHandle = u64;

/// Source of frame callbacks
pub trait FrameScheduler {
    /// Monotonic clock in milliseconds
    fn now_ms(&self) -> f64;
    /// Ask for one frame callback
    fn request_frame(&mut self) -> FrameHandle;
    /// Drop a requested frame; unknown handles are ignored
    fn cancel_frame(&mut self, handle: FrameHandle);
    /// Wait for the next requested frame and return it with its timestamp.
    /// `None` when nothing is pending.
    fn next_frame(&mut self) -> Option<(FrameHandle, f64)>;
}

/// Stops a loop from inside its own callbacks
#[derive(Debug, Clone)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.0.get()
    }
}

pub struct GameLoop<S: FrameScheduler> {
    scheduler: S,
    running: Rc<Cell<bool>>,
    last_time: f64,
    pending: Option<FrameHandle>,
}

impl<S: FrameScheduler> GameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            running: Rc::new(Cell::new(false)),
            last_time: 0.0,
            pending: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Rc::clone(&self.running))
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Begin the frame chain; no-op when already running
    pub fn start(&mut self) {
        if self.running.get() {
            return;
        }
        self.running.set(true);
        self.last_time = self.scheduler.now_ms();
        self.pending = Some(self.scheduler.request_frame());
        log::debug!("game loop started");
    }

    /// Cancel the pending frame and stop; safe to call repeatedly
    pub fn stop(&mut self) {
        self.running.set(false);
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
            log::debug!("game loop stopped");
        }
    }

    /// One scheduled callback. A callback that fires after `stop` does nothing.
    pub fn on_frame<U, R>(&mut self, now_ms: f64, update: &mut U, render: &mut R)
    where
        U: FnMut(f32),
        R: FnMut(),
    {
        self.pending = None;
        if !self.running.get() {
            return;
        }

        let dt = (((now_ms - self.last_time) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT);
        self.last_time = now_ms;

        update(dt);
        render();

        // Update may have stopped us through a StopHandle
        if self.running.get() {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    /// Start and pump frames until the loop is stopped
    pub fn run<U, R>(&mut self, mut update: U, mut render: R)
    where
        U: FnMut(f32),
        R: FnMut(),
    {
        if self.running.get() {
            return;
        }
        self.start();
        while let Some((handle, now)) = self.scheduler.next_frame() {
            if self.pending != Some(handle) {
                continue;
            }
            self.on_frame(now, &mut update, &mut render);
        }
        self.running.set(false);
    }
}

/// Deterministic scheduler: each frame advances a virtual clock by a fixed
/// step, or by queued intervals when given
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    now: f64,
    step_ms: f64,
    queued_steps: Vec<f64>,
    next_handle: FrameHandle,
    pending: Option<FrameHandle>,
    /// Frames requested so far
    pub requested: u64,
    /// Frames cancelled before firing
    pub cancelled: u64,
}

impl ManualScheduler {
    pub fn new(step_ms: f64) -> Self {
        Self {
            now: 0.0,
            step_ms,
            queued_steps: Vec::new(),
            next_handle: 1,
            pending: None,
            requested: 0,
            cancelled: 0,
        }
    }

    /// Use these intervals for the next frames, in order
    pub fn with_steps(mut self, steps: impl IntoIterator<Item = f64>) -> Self {
        self.queued_steps = steps.into_iter().collect();
        self.queued_steps.reverse();
        self
    }

    pub fn advance(&mut self, ms: f64) {
        self.now += ms;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl FrameScheduler for ManualScheduler {
    fn now_ms(&self) -> f64 {
        self.now
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.pending = Some(handle);
        self.requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }

    fn next_frame(&mut self) -> Option<(FrameHandle, f64)> {
        let handle = self.pending.take()?;
        let step = self.queued_steps.pop().unwrap_or(self.step_ms);
        self.now += step;
        Some((handle, self.now))
    }
}

/// Wall-clock scheduler that sleeps to hold a fixed frame rate
#[derive(Debug)]
pub struct SleepScheduler {
    origin: Instant,
    interval: Duration,
    next_handle: FrameHandle,
    pending: Option<(FrameHandle, Instant)>,
}

impl SleepScheduler {
    pub fn new(target_fps: u32) -> Self {
        Self {
            origin: Instant::now(),
            interval: Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1))),
            next_handle: 1,
            pending: None,
        }
    }
}

impl FrameScheduler for SleepScheduler {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.pending = Some((handle, Instant::now() + self.interval));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if matches!(self.pending, Some((pending, _)) if pending == handle) {
            self.pending = None;
        }
    }

    fn next_frame(&mut self) -> Option<(FrameHandle, f64)> {
        let (handle, due) = self.pending.take()?;
        let now = Instant::now();
        if due > now {
            std::thread::sleep(due - now);
        }
        Some((handle, self.now_ms()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_idempotent() {
        let mut game_loop = GameLoop::new(ManualScheduler::new(16.0));
        game_loop.start();
        game_loop.start();
        assert!(game_loop.is_running());
        assert_eq!(game_loop.scheduler().requested, 1);
    }

    #[test]
    fn stop_cancels_pending_and_is_idempotent() {
        let mut game_loop = GameLoop::new(ManualScheduler::new(16.0));
        game_loop.start();
        game_loop.stop();
        game_loop.stop();
        assert!(!game_loop.is_running());
        assert_eq!(game_loop.scheduler().cancelled, 1);
        assert!(!game_loop.scheduler().has_pending());
    }

    #[test]
    fn late_callback_after_stop_does_nothing() {
        let mut game_loop = GameLoop::new(ManualScheduler::new(16.0));
        game_loop.start();
        game_loop.stop();

        let mut updates = 0;
        game_loop.on_frame(16.0, &mut |_| updates += 1, &mut || {});
        assert_eq!(updates, 0);
        assert!(!game_loop.scheduler().has_pending());
    }

    #[test]
    fn dt_is_capped() {
        let scheduler = ManualScheduler::new(16.0).with_steps([16.0, 5000.0, 50.0]);
        let mut game_loop = GameLoop::new(scheduler);
        let handle = game_loop.stop_handle();
        let mut seen = Vec::new();
        game_loop.run(
            |dt| {
                seen.push(dt);
                if seen.len() == 3 {
                    handle.stop();
                }
            },
            || {},
        );
        assert_eq!(seen.len(), 3);
        assert!((seen[0] - 0.016).abs() < 1e-6);
        assert_eq!(seen[1], MAX_FRAME_DT);
        assert!((seen[2] - 0.05).abs() < 1e-6);
        assert!(!game_loop.is_running());
    }

    #[test]
    fn render_follows_each_update() {
        let mut game_loop = GameLoop::new(ManualScheduler::new(10.0));
        let handle = game_loop.stop_handle();
        let log = std::cell::RefCell::new(Vec::new());
        let mut frames = 0;
        game_loop.run(
            |_| {
                log.borrow_mut().push("update");
                frames += 1;
                if frames == 2 {
                    handle.stop();
                }
            },
            || log.borrow_mut().push("render"),
        );
        assert_eq!(*log.borrow(), vec!["update", "render", "update", "render"]);
    }
}
