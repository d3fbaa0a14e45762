/// State of the repeating render task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Created but never started.
    Idle,
    /// Frames are processed and the host should keep re-scheduling.
    Running,
    /// Terminal. Set on teardown; a stopped loop never runs again.
    Stopped,
}

/// Cancellable repeating task driven by the host's vsync callback.
///
/// The loop never schedules anything itself. The host asks `begin_frame`
/// whether to run, and re-registers only while `is_running` holds, so
/// stopping is just flipping the flag before the next scheduling decision.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    state: LoopState,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            frames: 0,
        }
    }

    /// Idle → Running. No effect once stopped.
    pub fn start(&mut self) {
        if self.state == LoopState::Idle {
            self.state = LoopState::Running;
        }
    }

    /// Stop for good. Returns true if the loop was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.state == LoopState::Running;
        self.state = LoopState::Stopped;
        was_running
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Gate for one iteration. Returns false (and counts nothing) unless running.
    pub fn begin_frame(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.frames += 1;
        true
    }

    /// Number of frames processed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}
