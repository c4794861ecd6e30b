//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]: it forwards input
//! to the [`SceneDriver`], polls the texture loader, ticks the scene once per
//! redraw and hands the result to the [`SceneRenderer`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ringlet_config::Config;
use ringlet_input::{ClickDetector, Modifiers, material_hotkey};
use ringlet_materials::{AssetLoader, MaterialCatalog, MaterialKind, MaterialManifest};
use ringlet_render::{RenderContext, SurfaceError, init_render_context_blocking};
use ringlet_scene::{BodyId, SceneDriver, button_name};
use tracing::{debug, error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::frame_clock::FrameClock;
use crate::platform::resolve_asset_path;
use crate::renderer::SceneRenderer;
use crate::settings::{scene_tuning, starfield_generator};
use crate::status::status_title;

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    let attrs = WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ));
    if config.window.fullscreen {
        attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attrs
    }
}

/// Application state: window, GPU, scene and asset loading.
pub struct AppState {
    pub config: Config,
    pub window: Option<Arc<Window>>,
    pub gpu: Option<RenderContext>,
    renderer: Option<SceneRenderer>,
    pub scene: SceneDriver,
    loader: Option<AssetLoader>,
    catalog: Option<MaterialCatalog>,
    clock: FrameClock,
    click: ClickDetector,
    modifiers: Modifiers,
    title: String,
    base_dir: PathBuf,
}

impl AppState {
    /// `base_dir` anchors relative texture and manifest paths.
    pub fn new(config: Config, base_dir: &Path) -> Self {
        let scene = SceneDriver::new(
            scene_tuning(&config),
            config.window.width,
            config.window.height,
        );
        Self {
            title: config.window.title.clone(),
            config,
            window: None,
            gpu: None,
            renderer: None,
            scene,
            loader: None,
            catalog: None,
            clock: FrameClock::new(),
            click: ClickDetector::new(),
            modifiers: Modifiers::NONE,
            base_dir: base_dir.to_path_buf(),
        }
    }

    /// Start decoding textures on the worker pool. Failures are logged and the
    /// rings stay on their placeholders.
    fn start_loading(&mut self) {
        let manifest_path = self
            .config
            .assets
            .manifest
            .as_deref()
            .map(|p| resolve_asset_path(p, &self.base_dir));
        let manifest = match MaterialManifest::load_or_builtin(manifest_path.as_deref()) {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!("Material manifest unavailable: {e}");
                return;
            }
        };
        let root = resolve_asset_path(&self.config.assets.texture_root, &self.base_dir);
        match AssetLoader::start(manifest, &root, self.config.assets.loader_threads) {
            Ok(loader) => self.loader = Some(loader),
            Err(e) => warn!("Texture loader could not start: {e}"),
        }
    }

    fn poll_loader(&mut self) {
        let Some(loader) = &mut self.loader else {
            return;
        };
        let Some(catalog) = loader.poll() else {
            return;
        };
        if let (Some(renderer), Some(gpu)) = (&mut self.renderer, &self.gpu) {
            renderer.upload_catalog(gpu, &catalog);
        }
        self.scene.on_catalog_ready(&catalog);
        self.catalog = Some(catalog);
    }

    fn on_key(&mut self, event: &KeyEvent, event_loop: &ActiveEventLoop) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        if code == KeyCode::Escape {
            info!("Escape pressed, shutting down");
            event_loop.exit();
            return;
        }
        let Some(hotkey) = material_hotkey(code, self.modifiers) else {
            return;
        };
        let (Some(body), Some(kind)) = (
            BodyId::from_index(hotkey.body_index),
            MaterialKind::from_index(hotkey.set_index),
        ) else {
            return;
        };
        let name = button_name(body, kind);
        match &self.catalog {
            Some(catalog) => {
                self.scene.press_button(catalog, &name);
            }
            None => debug!("'{name}' ignored, materials still loading"),
        }
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.scene.on_resize(width, height);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(width, height);
            if let Some(renderer) = &mut self.renderer {
                renderer.resize(&gpu.device, width, height);
            }
        }
        info!("Window resized to {}x{}", width, height);
    }

    fn update_title(&mut self) {
        if !self.config.debug.show_status_in_title {
            return;
        }
        let progress = self
            .loader
            .as_ref()
            .filter(|l| !l.is_delivered())
            .map(AssetLoader::progress);
        let title = status_title(&self.config.window.title, progress, self.scene.bodies());
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.poll_loader();
        let input = self.clock.tick();
        self.scene.tick(input);
        self.update_title();

        if let (Some(renderer), Some(gpu)) = (&self.renderer, &self.gpu) {
            match renderer.render(gpu, &self.scene) {
                Ok(()) => {}
                Err(SurfaceError::Timeout) => debug!("Surface timeout, skipping frame"),
                Err(e) => {
                    error!("Render failed: {e}");
                    event_loop.exit();
                    return;
                }
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = window_attributes_from_config(&self.config);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.scene.on_resize(size.width, size.height);

        match init_render_context_blocking(window.clone(), self.config.window.vsync) {
            Ok(gpu) => {
                let stars = starfield_generator(&self.config).generate();
                self.renderer = Some(SceneRenderer::new(
                    &gpu,
                    &self.scene,
                    &stars,
                    self.config.scene.star_size,
                ));
                self.gpu = Some(gpu);
            }
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        }

        self.start_loading();
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.on_resize(size.width, size.height),
            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = Modifiers::from(mods.state());
            }
            WindowEvent::KeyboardInput { event, .. } => self.on_key(&event, event_loop),
            WindowEvent::CursorMoved { position, .. } => {
                self.scene.mouse_mut().on_cursor_moved(position.x, position.y);
            }
            WindowEvent::CursorLeft { .. } => self.click.cancel(),
            WindowEvent::MouseInput { state, button, .. } => {
                if self.click.on_button(button, state) {
                    self.scene.on_click();
                }
            }
            WindowEvent::MouseWheel { delta, .. } => self.scene.scroll_mut().on_scroll(delta),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(loader) = &mut self.loader {
            loader.shutdown();
        }
        info!("Rendered {} frames", self.scene.frame_count());
    }
}

/// Creates an event loop and runs the application until the window closes.
///
/// # Errors
///
/// Returns the winit error if the event loop cannot be created or fails.
#[instrument(skip_all)]
pub fn run(config: Config, base_dir: &Path) -> Result<(), winit::error::EventLoopError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config, base_dir);
    event_loop.run_app(&mut app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_has_no_window() {
        let state = AppState::new(Config::default(), Path::new("."));
        assert!(state.window.is_none());
        assert!(state.gpu.is_none());
        assert!(!state.scene.is_ready());
        assert_eq!(state.title, "ringlet");
    }

    #[test]
    fn test_window_attributes_build() {
        let mut config = Config::default();
        config.window.fullscreen = true;
        let attrs = window_attributes_from_config(&config);
        assert_eq!(attrs.title, "ringlet");
        assert!(attrs.fullscreen.is_some());
    }
}
