use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use tricam_engine::core::{App, FrameCtx, InitCtx};
use tricam_engine::render::{FrameStats, SceneRenderer};
use tricam_engine::scene::{SceneConfig, TriangleScene};
use tricam_engine::shader::{load_program, ProgramSource};

/// The two-triangle orbit demo.
pub struct TriangleApp {
    config: SceneConfig,
    scene: TriangleScene,
    renderer: Option<SceneRenderer>,
    rate: FrameRate,
}

impl TriangleApp {
    pub fn new(config: SceneConfig) -> Self {
        let scene = TriangleScene::new(&config);
        Self {
            config,
            scene,
            renderer: None,
            rate: FrameRate::new(Duration::from_secs(1)),
        }
    }
}

/// One program per triangle: shared vertex shader, own fragment shader.
fn load_programs(config: &SceneConfig) -> Result<Vec<ProgramSource>> {
    let shaders = &config.shaders;
    shaders
        .fragments
        .iter()
        .map(|fragment| {
            load_program(&shaders.dir, &shaders.vertex, fragment)
                .with_context(|| format!("failed to load shader program for {fragment}"))
        })
        .collect()
}

impl App for TriangleApp {
    fn on_init(&mut self, ctx: &mut InitCtx<'_, '_>) -> Result<()> {
        let programs = load_programs(&self.config)?;

        let sample_count = ctx.gpu.supported_sample_count(self.config.sample_count);
        if sample_count != self.config.sample_count {
            log::warn!(
                "{}x MSAA unsupported for this surface; using {sample_count}x",
                self.config.sample_count
            );
        }

        let renderer = SceneRenderer::new(&ctx.render_ctx(), &self.scene, &programs, sample_count)?;
        log::info!(
            "scene ready: {} programs, {sample_count}x MSAA",
            renderer.programs().len()
        );

        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<()> {
        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(());
        };

        let scene = &self.scene;
        let elapsed = ctx.time.elapsed;
        let mut stats = FrameStats::default();

        ctx.render(self.config.clear_color, |rctx, target| {
            stats = renderer.render(rctx, target, scene, elapsed);
        })?;

        if let Some(fps) = self.rate.record(ctx.time.now) {
            log::debug!(
                "{fps:.1} fps, {} draw calls / {} vertices per frame",
                stats.draw_calls,
                stats.vertices
            );
        }

        Ok(())
    }

    fn on_exit(&mut self) {
        if self.renderer.take().is_some() {
            log::debug!("scene renderer released");
        }
    }
}

/// Counts frames and reports the rate once per `period`.
#[derive(Debug)]
struct FrameRate {
    period: Duration,
    window_start: Option<Instant>,
    frames: u32,
}

impl FrameRate {
    fn new(period: Duration) -> Self {
        Self {
            period,
            window_start: None,
            frames: 0,
        }
    }

    fn record(&mut self, now: Instant) -> Option<f64> {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        let span = now.saturating_duration_since(start);
        if span < self.period {
            return None;
        }

        let fps = self.frames as f64 / span.as_secs_f64();
        self.window_start = Some(now);
        self.frames = 0;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn frame_rate_reports_once_per_period() {
        let mut rate = FrameRate::new(Duration::from_secs(1));
        let t0 = Instant::now();

        for i in 0..60 {
            assert_eq!(rate.record(t0 + Duration::from_millis(i * 10)), None);
        }
        let fps = rate.record(t0 + Duration::from_secs(1)).unwrap();
        assert!((fps - 61.0).abs() < 1e-9);

        assert_eq!(rate.record(t0 + Duration::from_millis(1100)), None);
    }

    #[test]
    fn bundled_programs_load() {
        let mut config = SceneConfig::default();
        config.shaders.dir = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders"));

        let programs = load_programs(&config).unwrap();
        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].label(), "simple_transform.vert.wgsl + triangle1.frag.wgsl");
        assert_eq!(programs[1].label(), "simple_transform.vert.wgsl + triangle2.frag.wgsl");
    }

    #[test]
    fn missing_shader_directory_is_an_error() {
        let mut config = SceneConfig::default();
        config.shaders.dir = std::env::temp_dir().join("tricam-no-such-shader-dir");

        let err = load_programs(&config).unwrap_err();
        assert!(format!("{err:#}").contains("triangle1.frag.wgsl"));
    }
}
