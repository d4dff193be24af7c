use runtime::{Frame, FrameStats, Metrics};

use crate::config::ConstellationConfig;
use crate::error::ConfigError;
use crate::graph::{GraphRenderer, Surface};
use crate::layout::Viewport;
use crate::overlay::{OverlayAnchor, OverlayLayer, OverlayPlacer, StyleSink};
use crate::projection::{ProjectedPoint, Projector};
use crate::rotation::RotationState;
use crate::scene::SceneState;

/// Drives the constellation one tick at a time.
///
/// The host decides *when* to tick (vsync callback, headless loop); each tick
/// advances the rotation, redraws the graph and restyles the overlays from the
/// same rotation and projection centre.
#[derive(Debug)]
pub struct Animator<H> {
    config: ConstellationConfig,
    scene: SceneState,
    projector: Projector,
    renderer: GraphRenderer,
    placer: OverlayPlacer,
    overlays: OverlayLayer<H>,
    metrics: Metrics,
}

impl<H> Animator<H> {
    pub fn new(
        config: ConstellationConfig,
        viewport: Viewport,
        anchors: Vec<OverlayAnchor<H>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let projector = Projector::new(config.projection_distance, config.sphere_radius);
        let placer = OverlayPlacer::new(
            config.projection_distance,
            config.sphere_radius,
            config.overlay,
        );
        let overlays = OverlayLayer::new(anchors, &placer);
        let scene = SceneState::new(&config, viewport);

        if scene.points.is_empty() && overlays.is_empty() {
            tracing::warn!("constellation has no nodes and no overlays; ticks will only clear");
        }

        tracing::info!(
            nodes = scene.points.len(),
            overlays = overlays.len(),
            width = viewport.width,
            height = viewport.height,
            "constellation animator ready"
        );

        Ok(Self {
            renderer: GraphRenderer::new(config.graph),
            config,
            scene,
            projector,
            placer,
            overlays,
            metrics: Metrics::new(),
        })
    }

    pub fn config(&self) -> &ConstellationConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn rotation(&self) -> RotationState {
        self.scene.rotation
    }

    pub fn set_rotation(&mut self, rotation: RotationState) {
        self.scene.rotation = rotation;
    }

    pub fn overlays(&self) -> &OverlayLayer<H> {
        &self.overlays
    }

    pub fn set_overlays_active(&mut self, active: bool) {
        if self.overlays.is_active() != active {
            tracing::debug!(active, "overlay styling toggled");
        }
        self.overlays.set_active(active);
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Nodes as projected by the last draw that had a surface.
    ///
    /// Draws without a surface skip node projection, so after those this
    /// still holds the earlier frame's points.
    pub fn projected(&self) -> &[ProjectedPoint] {
        self.scene.projected()
    }

    /// One full animation step: rotate, then draw everything.
    ///
    /// Rotation advances even when there is no surface or the overlays are
    /// hidden, so whatever becomes visible later shows the current angle.
    pub fn tick<S, K>(&mut self, frame: Frame, surface: Option<&mut S>, sink: &mut K) -> FrameStats
    where
        S: Surface + ?Sized,
        K: StyleSink<H> + ?Sized,
    {
        self.scene.advance(&self.config.rotation);
        self.metrics.record_tick(frame);
        self.draw(surface, sink)
    }

    /// Draws the current state without advancing the rotation.
    pub fn draw<S, K>(&mut self, surface: Option<&mut S>, sink: &mut K) -> FrameStats
    where
        S: Surface + ?Sized,
        K: StyleSink<H> + ?Sized,
    {
        let mut stats = FrameStats::default();

        if let Some(surface) = surface {
            let viewport = self.scene.viewport;
            let points = self.scene.project_all(&self.projector);
            let counts = self.renderer.render(surface, viewport, points);
            stats.nodes_drawn = counts.nodes;
            stats.edges_drawn = counts.edges;
        }

        let update = self.overlays.update(
            &self.placer,
            self.scene.rotation,
            self.scene.center,
            sink,
        );
        stats.overlays_updated = update.updated;
        stats.overlays_skipped = update.skipped;

        self.metrics.record_frame(stats);
        stats
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.scene.resize(viewport, &self.config.layout);
        self.metrics.record_resize();
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            cx = self.scene.center.x,
            cy = self.scene.center.y,
            "viewport resized"
        );
    }
}
