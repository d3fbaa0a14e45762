//! Mounted-scene lifecycle.
//!
//! A `Session` is the one object that owns a running scene: the runner,
//! the renderer and the host resources (surface, listeners, pending frame).
//! Everything acquired during `mount` is released by `teardown`, which
//! runs at most once and is also triggered by `Drop`.

use orrery_engine::{Game, GameConfig, InitError, Renderer, Viewport};
use crate::runner::GameRunner;

/// What a platform must provide to host a scene.
pub trait Host {
    /// Current viewport in CSS pixels plus device pixel ratio.
    fn viewport(&self) -> Viewport;

    /// Register the resize and click listeners.
    fn attach_listeners(&mut self) -> Result<(), InitError>;

    /// Remove every listener registered by `attach_listeners`.
    fn detach_listeners(&mut self);

    /// Listeners currently registered.
    fn listener_count(&self) -> usize;

    /// Request one frame callback at the next vsync.
    fn schedule_frame(&mut self) -> Result<(), InitError>;

    /// Cancel a pending frame callback, if any.
    fn cancel_frame(&mut self);

    /// Remove the drawing surface from the page.
    fn release_surface(&mut self);
}

pub struct Session<G: Game, R: Renderer, H: Host> {
    runner: GameRunner<G>,
    renderer: R,
    host: H,
    torn_down: bool,
}

impl<G: Game, R: Renderer, H: Host> Session<G, R, H> {
    pub fn mount(game: G, renderer: R, host: H) -> Result<Self, InitError> {
        let config = game.config();
        Self::mount_with_config(game, config, renderer, host)
    }

    /// Build the scene, size it to the host, attach listeners and schedule
    /// the first frame. On error the partially mounted session is dropped,
    /// which releases whatever was acquired.
    pub fn mount_with_config(
        game: G,
        config: GameConfig,
        renderer: R,
        host: H,
    ) -> Result<Self, InitError> {
        let mut session = Self {
            runner: GameRunner::with_config(game, config),
            renderer,
            host,
            torn_down: false,
        };

        session.runner.init();
        session.on_resize();
        session.host.attach_listeners()?;
        session.runner.start_loop();
        session.host.schedule_frame()?;

        log::info!(
            "mounted ({} backend, {} listeners)",
            session.renderer.backend(),
            session.host.listener_count()
        );
        Ok(session)
    }

    /// Frame callback. Runs one render loop iteration and re-schedules
    /// itself only while the loop is running. Returns whether a frame ran.
    pub fn on_frame(&mut self, now_ms: f64) -> bool {
        if !self.runner.tick(now_ms) {
            return false;
        }
        self.renderer.draw(&self.runner.frame_data());
        if self.runner.is_running() {
            if let Err(err) = self.host.schedule_frame() {
                log::error!("render loop halted: {err}");
                self.runner.stop_loop();
            }
        }
        true
    }

    /// Resize callback: re-read the host viewport and propagate it to the
    /// camera and the drawing surface.
    pub fn on_resize(&mut self) {
        if self.torn_down {
            return;
        }
        let viewport = self.host.viewport();
        if let Some(size) = self.runner.resize(viewport) {
            self.renderer.resize(size);
        }
    }

    /// Click callback at viewport CSS pixel coordinates.
    pub fn on_click(&mut self, x: f32, y: f32) -> Option<&str> {
        if self.torn_down {
            return None;
        }
        self.runner.click(x, y)
    }

    /// Release everything. Returns false if already torn down.
    pub fn teardown(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.torn_down = true;
        self.runner.stop_loop();
        self.host.cancel_frame();
        self.host.detach_listeners();
        self.host.release_surface();
        log::info!("unmounted after {} frames", self.runner.frames());
        true
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn runner(&self) -> &GameRunner<G> {
        &self.runner
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<G: Game, R: Renderer, H: Host> Drop for Session<G, R, H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use orrery_engine::{FrameData, SurfaceSize};
    use crate::runner::tests::Beacon;

    #[derive(Debug, Default)]
    struct HostLog {
        listeners: usize,
        pending_frame: bool,
        scheduled: u32,
        cancelled: u32,
        detached: u32,
        released: u32,
        fail_attach: bool,
        fail_schedule: bool,
    }

    struct MockHost {
        log: Rc<RefCell<HostLog>>,
        viewport: Viewport,
    }

    impl MockHost {
        fn new(viewport: Viewport) -> (Self, Rc<RefCell<HostLog>>) {
            let log = Rc::new(RefCell::new(HostLog::default()));
            (Self { log: Rc::clone(&log), viewport }, log)
        }
    }

    impl Host for MockHost {
        fn viewport(&self) -> Viewport {
            self.viewport
        }

        fn attach_listeners(&mut self) -> Result<(), InitError> {
            let mut log = self.log.borrow_mut();
            if log.fail_attach {
                // The first of the two listeners went in before the failure
                log.listeners = 1;
                return Err(InitError::ListenerRegistration("click".into()));
            }
            log.listeners = 2;
            Ok(())
        }

        fn detach_listeners(&mut self) {
            let mut log = self.log.borrow_mut();
            log.listeners = 0;
            log.detached += 1;
        }

        fn listener_count(&self) -> usize {
            self.log.borrow().listeners
        }

        fn schedule_frame(&mut self) -> Result<(), InitError> {
            let mut log = self.log.borrow_mut();
            if log.fail_schedule {
                return Err(InitError::FrameScheduling("no vsync".into()));
            }
            log.pending_frame = true;
            log.scheduled += 1;
            Ok(())
        }

        fn cancel_frame(&mut self) {
            let mut log = self.log.borrow_mut();
            log.pending_frame = false;
            log.cancelled += 1;
        }

        fn release_surface(&mut self) {
            self.log.borrow_mut().released += 1;
        }
    }

    #[derive(Default)]
    struct MockRenderer {
        resizes: Vec<SurfaceSize>,
        draws: u32,
        last_instances: usize,
    }

    impl Renderer for MockRenderer {
        fn backend(&self) -> &'static str {
            "mock"
        }

        fn resize(&mut self, size: SurfaceSize) {
            self.resizes.push(size);
        }

        fn draw(&mut self, frame: &FrameData) {
            self.draws += 1;
            self.last_instances = frame.instances.len();
        }
    }

    fn mounted() -> (Session<Beacon, MockRenderer, MockHost>, Rc<RefCell<HostLog>>) {
        let (host, log) = MockHost::new(Viewport::new(1280.0, 720.0, 1.0));
        let session = Session::mount(Beacon::new(), MockRenderer::default(), host).unwrap();
        (session, log)
    }

    #[test]
    fn mount_sizes_attaches_and_schedules() {
        let (session, log) = mounted();
        assert_eq!(session.renderer().resizes, vec![SurfaceSize::new(1280, 720)]);
        assert_eq!(session.runner().context().camera.aspect, 1280.0 / 720.0);
        assert_eq!(session.host().listener_count(), 2);
        assert!(log.borrow().pending_frame);
        assert!(session.runner().is_running());
    }

    #[test]
    fn frame_draws_and_reschedules() {
        let (mut session, log) = mounted();
        assert!(session.on_frame(1000.0));
        assert!(session.on_frame(1016.0));
        assert_eq!(session.renderer().draws, 2);
        assert_eq!(session.renderer().last_instances, 1);
        assert_eq!(log.borrow().scheduled, 3);
    }

    #[test]
    fn teardown_leaves_nothing_behind() {
        let (mut session, log) = mounted();
        session.on_frame(0.0);
        assert!(session.teardown());

        let log = log.borrow();
        assert_eq!(log.listeners, 0);
        assert!(!log.pending_frame);
        assert_eq!(log.released, 1);
        assert!(!session.runner().is_running());
    }

    #[test]
    fn teardown_runs_once_even_with_drop() {
        let (mut session, log) = mounted();
        assert!(session.teardown());
        assert!(!session.teardown());
        drop(session);

        let log = log.borrow();
        assert_eq!(log.detached, 1);
        assert_eq!(log.cancelled, 1);
        assert_eq!(log.released, 1);
    }

    #[test]
    fn no_motion_after_teardown() {
        let (mut session, log) = mounted();
        session.on_frame(0.0);
        session.teardown();
        let scheduled = log.borrow().scheduled;

        // A callback that was already in flight must not update or re-arm
        assert!(!session.on_frame(5000.0));
        assert_eq!(session.runner().game().updates, 1);
        assert_eq!(session.renderer().draws, 1);
        assert_eq!(log.borrow().scheduled, scheduled);
    }

    #[test]
    fn drop_tears_down() {
        let (session, log) = mounted();
        drop(session);
        assert_eq!(log.borrow().listeners, 0);
        assert_eq!(log.borrow().released, 1);
    }

    #[test]
    fn failed_listener_registration_releases_everything() {
        let (host, log) = MockHost::new(Viewport::new(800.0, 600.0, 1.0));
        log.borrow_mut().fail_attach = true;

        let result = Session::mount(Beacon::new(), MockRenderer::default(), host);
        assert!(matches!(result, Err(InitError::ListenerRegistration(_))));

        let log = log.borrow();
        assert_eq!(log.listeners, 0);
        assert_eq!(log.released, 1);
        assert_eq!(log.detached, 1);
    }

    #[test]
    fn failed_first_frame_releases_everything() {
        let (host, log) = MockHost::new(Viewport::new(800.0, 600.0, 1.0));
        log.borrow_mut().fail_schedule = true;

        let result = Session::mount(Beacon::new(), MockRenderer::default(), host);
        assert!(matches!(result, Err(InitError::FrameScheduling(_))));
        assert_eq!(log.borrow().listeners, 0);
        assert_eq!(log.borrow().released, 1);
    }

    #[test]
    fn resize_reaches_camera_and_surface() {
        let (mut session, _log) = mounted();
        session.host.viewport = Viewport::new(600.0, 900.0, 2.0);
        session.on_resize();
        assert_eq!(session.runner().context().camera.aspect, 600.0 / 900.0);
        assert_eq!(session.renderer().resizes.last(), Some(&SurfaceSize::new(1200, 1800)));

        // Degenerate sizes leave both untouched
        session.host.viewport = Viewport::new(600.0, 0.0, 2.0);
        session.on_resize();
        assert_eq!(session.renderer().resizes.len(), 2);
        assert_eq!(session.runner().context().camera.aspect, 600.0 / 900.0);
    }

    #[test]
    fn click_after_teardown_is_ignored() {
        let (mut session, _log) = mounted();
        assert_eq!(session.on_click(640.0, 360.0), Some("Beacon"));
        session.teardown();
        assert_eq!(session.on_click(640.0, 360.0), None);
        assert_eq!(session.runner().selection().get(), Some("Beacon"));
    }
}
