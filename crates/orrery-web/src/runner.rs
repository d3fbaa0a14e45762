use orrery_engine::{
    apply_resize, build_draw_list, pick,
    DrawList, EngineContext, FrameData, FrameLoop, Game, GameConfig,
    LegendEntry, Selection, SurfaceSize, Viewport,
};

/// Generic runner that wires a `Game` to the engine loop.
///
/// It owns everything the running scene needs: the engine context, the
/// per-frame draw list, the frame loop gate, the current viewport and the
/// selection the presentation layer observes. Hosts drive it through
/// `Session`; nothing here touches the browser.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    draw_list: DrawList,
    frame_loop: FrameLoop,
    viewport: Viewport,
    surface: SurfaceSize,
    selection: Selection,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self::with_config(game, config)
    }

    /// Build a runner with a configuration other than the game's own.
    pub fn with_config(game: G, config: GameConfig) -> Self {
        let viewport = Viewport::default();
        let mut ctx = EngineContext::new(&config);
        let surface = apply_resize(&mut ctx.camera, &viewport).unwrap_or_default();
        Self {
            ctx,
            draw_list: DrawList::new(),
            frame_loop: FrameLoop::new(),
            surface,
            viewport,
            selection: Selection::new(),
            game,
            config,
            initialized: false,
        }
    }

    /// Build the scene. Call once after construction; later calls are no-ops.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.game.init(&mut self.ctx);
        self.ctx.sync_transforms();
        build_draw_list(self.ctx.scene.iter(), &mut self.draw_list);
        self.initialized = true;
        log::info!(
            "scene built: {} entities, {} point lights",
            self.ctx.scene.len(),
            self.ctx.lights.count()
        );
    }

    pub fn start_loop(&mut self) {
        self.frame_loop.start();
    }

    /// Stop the render loop for good. Returns true if it was running.
    pub fn stop_loop(&mut self) -> bool {
        self.frame_loop.stop()
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    pub fn frames(&self) -> u64 {
        self.frame_loop.frames()
    }

    /// One render loop iteration: motion update, attachment propagation,
    /// draw list rebuild. Returns false (and changes nothing) unless the
    /// loop is running.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if !self.initialized || !self.frame_loop.begin_frame() {
            return false;
        }
        self.game.update(&mut self.ctx, now_ms);
        self.ctx.sync_transforms();
        build_draw_list(self.ctx.scene.iter(), &mut self.draw_list);
        true
    }

    /// Apply a new host viewport. Returns the surface size the renderer
    /// must adopt, or `None` if the viewport was ignored.
    pub fn resize(&mut self, viewport: Viewport) -> Option<SurfaceSize> {
        let viewport = match self.config.max_pixel_ratio {
            Some(cap) => Viewport::new(viewport.width, viewport.height, viewport.pixel_ratio.min(cap)),
            None => viewport,
        };
        let surface = apply_resize(&mut self.ctx.camera, &viewport)?;
        log::debug!(
            "viewport {}x{} @{} -> surface {}x{}",
            viewport.width, viewport.height, viewport.pixel_ratio,
            surface.width, surface.height
        );
        self.viewport = viewport;
        self.surface = surface;
        Some(surface)
    }

    /// Pick at a point in viewport CSS pixels and overwrite the selection
    /// with the result. A miss clears it.
    pub fn click(&mut self, x: f32, y: f32) -> Option<&str> {
        let hit = pick(
            x,
            y,
            self.viewport.width,
            self.viewport.height,
            &self.ctx.camera,
            self.ctx.scene.pick_targets(),
        );
        let label = hit
            .and_then(|h| self.game.pick_label(h.id))
            .map(str::to_owned);
        log::debug!("click ({x}, {y}) selected {label:?}");
        self.selection.set(label);
        self.selection.get()
    }

    /// Snapshot for the renderer.
    pub fn frame_data(&self) -> FrameData<'_> {
        FrameData {
            instances: self.draw_list.instances(),
            camera: &self.ctx.camera,
            lights: &self.ctx.lights,
            background: self.config.background,
            surface: self.surface,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        self.game.legend()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
