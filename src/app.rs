use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::AppConfig;
use crate::editor::{FieldGrid, MatrixEditor};
use crate::error::SceneError;
use crate::gfx::{
    camera::{CameraController, CameraManager, OrbitCamera},
    geometry::generate_axes,
    resources::material::Material,
    scene::{Lighting, LineObject, Scene},
    RenderEngine,
};
use crate::ui::{matrix_editor_panel, EditorStatus, PanelAction, UiManager};

/// Material the edited sphere is drawn with
pub const SPHERE_MATERIAL: &str = "sphere";

/// Window, renderer and event loop around one [`MatrixEditor`]
pub struct MatrixSphereApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: AppConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    editor: MatrixEditor,
    grid: FieldGrid,
    status: EditorStatus,
    last_frame: Instant,
    fatal: Option<anyhow::Error>,
}

impl MatrixSphereApp {
    /// Builds the scene and the event loop; the window opens in [`run`]
    ///
    /// [`run`]: MatrixSphereApp::run
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        let app_state = AppState::new(config).context("failed to build the scene")?;

        Ok(Self {
            event_loop,
            app_state,
        })
    }

    /// Runs until the window is closed or Escape is pressed
    pub fn run(self) -> anyhow::Result<()> {
        let Self {
            event_loop,
            mut app_state,
        } = self;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop
            .run_app(&mut app_state)
            .context("event loop terminated abnormally")?;

        match app_state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// The demo scene: lights, camera, the editor's sphere and the axes helper
pub fn build_scene(config: &AppConfig) -> Result<(Scene, MatrixEditor), SceneError> {
    let camera = OrbitCamera::from_config(&config.camera, config.aspect());
    let controller = CameraController::from_config(&config.camera);
    let mut scene = Scene::new(
        CameraManager::new(camera, controller),
        Lighting::from(&config.lighting),
    );

    let [r, g, b] = config.sphere_color;
    scene.add_material(Material::new(SPHERE_MATERIAL, [r, g, b, 1.0]));
    let editor = MatrixEditor::new(&mut scene, SPHERE_MATERIAL, config.sphere)?;

    if let Some(length) = config.axes_length {
        scene.add_helper(LineObject::from_lines("axes", &generate_axes(length)));
    }

    Ok((scene, editor))
}

impl AppState {
    fn new(config: AppConfig) -> Result<Self, SceneError> {
        let (scene, editor) = build_scene(&config)?;
        Ok(Self {
            config,
            window: None,
            render_engine: None,
            ui_manager: None,
            scene,
            editor,
            grid: FieldGrid::identity(),
            status: EditorStatus::default(),
            last_frame: Instant::now(),
            fatal: None,
        })
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attributes = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );

        let PhysicalSize { width, height } = window.inner_size();
        let render_engine = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            self.config.vsync,
        ))?;

        let ui_manager = UiManager::new(
            render_engine.device(),
            render_engine.queue(),
            render_engine.surface_format(),
            &window,
            self.config.font_size,
        );

        self.window = Some(window);
        self.render_engine = Some(render_engine);
        self.ui_manager = Some(ui_manager);
        self.on_resize(width, height);
        log::info!("Window ready at {}x{}", width, height);
        Ok(())
    }

    /// Resets the viewport and the camera aspect to the new framebuffer size
    fn on_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        if let Some(render_engine) = self.render_engine.as_mut() {
            render_engine.resize(width, height);
        }
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            ui_manager.update_display_size(width, height);
        }
        self.scene
            .camera_manager
            .camera
            .resize_projection(width, height);
        log::trace!("Resized to {}x{}", width, height);
    }

    /// Draws one frame and carries out whatever the panel asked for
    fn render(&mut self, delta: Duration) -> anyhow::Result<()> {
        let (Some(window), Some(render_engine), Some(ui_manager)) = (
            self.window.as_ref(),
            self.render_engine.as_mut(),
            self.ui_manager.as_mut(),
        ) else {
            return Ok(());
        };

        self.scene.update();
        self.scene.sync_gpu_resources(
            render_engine.device(),
            render_engine.queue(),
            render_engine.material_layout(),
        );
        render_engine.update(
            self.scene.camera_manager.camera.uniform,
            &self.scene.lighting,
        );

        let grid = &mut self.grid;
        let status = &self.status;
        let mut action = PanelAction::None;

        let result = render_engine.render_frame(
            &self.scene,
            self.config.clear_color,
            Some(|device: &wgpu::Device,
                  queue: &wgpu::Queue,
                  encoder: &mut wgpu::CommandEncoder,
                  view: &wgpu::TextureView| {
                ui_manager.draw(device, queue, encoder, window, view, delta, |ui| {
                    action = matrix_editor_panel(ui, grid, status);
                });
            }),
        );

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                render_engine.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(anyhow!("GPU ran out of memory"));
            }
            Err(err) => log::warn!("Skipping frame: {err}"),
        }

        self.handle_panel_action(action);
        Ok(())
    }

    fn handle_panel_action(&mut self, action: PanelAction) {
        match action {
            PanelAction::None => {}
            PanelAction::Apply => {
                let result = self.editor.apply_transform(&mut self.scene, &self.grid);
                self.status = EditorStatus::from_result(&result);
            }
            PanelAction::ResetToIdentity => {
                self.grid.reset_identity();
                self.status = EditorStatus::Ready;
            }
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.init_graphics(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // Handle UI input first
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: Event<()> = Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                if matches!(event, WindowEvent::MouseInput { .. }) {
                    self.scene.camera_manager.release_buttons();
                }
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            }
            | WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.on_resize(width, height);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.scene
                    .camera_manager
                    .process_mouse_button(button, state);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let delta = now - self.last_frame;
                self.last_frame = now;

                if let Err(err) = self.render(delta) {
                    self.fail(event_loop, err);
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        // Don't process camera events when UI is active
        if let Some(ui_manager) = self.ui_manager.as_ref() {
            if ui_manager.wants_mouse() {
                return;
            }
        }

        self.scene.camera_manager.process_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn state() -> AppState {
        AppState::new(AppConfig::default()).unwrap()
    }

    #[test]
    fn test_build_scene_matches_demo() {
        let (scene, editor) = build_scene(&AppConfig::default()).unwrap();

        assert_eq!(scene.mesh_count(), 1);
        assert_eq!(scene.helpers().len(), 1);
        let sphere = scene.mesh(editor.target()).unwrap();
        assert_eq!(sphere.vertex_count(), 561);
        assert_eq!(sphere.material_id(), SPHERE_MATERIAL);

        let material = scene.get_material_for_object(sphere).unwrap();
        assert_eq!(material.base_color, [0.0, 0.0, 0.545, 1.0]);
        assert_eq!(scene.lighting, Lighting::default());

        let eye = scene.camera_manager.camera.eye;
        assert_relative_eq!(eye.z, 3.0);
        assert_relative_eq!(scene.camera_manager.camera.aspect, 1.5);
    }

    #[test]
    fn test_axes_are_optional() {
        let (scene, _) = build_scene(&AppConfig::default().with_axes(None)).unwrap();
        assert!(scene.helpers().is_empty());
    }

    #[test]
    fn test_resize_updates_camera_and_ignores_zero() {
        let mut state = state();
        state.on_resize(1000, 500);
        assert_relative_eq!(state.scene.camera_manager.camera.aspect, 2.0);

        state.on_resize(0, 0);
        assert_relative_eq!(state.scene.camera_manager.camera.aspect, 2.0);
    }

    #[test]
    fn test_update_button_applies_grid() {
        let mut state = state();
        let original = state.editor.target();
        for i in 0..3 {
            state.grid.set(i, i, "2");
        }

        state.handle_panel_action(PanelAction::Apply);

        assert_eq!(state.status, EditorStatus::Applied { vertex_count: 561 });
        assert_ne!(state.editor.target(), original);
        let sphere = state.scene.mesh(state.editor.target()).unwrap();
        for p in sphere.positions() {
            let length = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert_relative_eq!(length, 2.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_rejected_apply_then_reset() {
        let mut state = state();
        let original = state.editor.target();
        state.grid.set(2, 2, "two");

        state.handle_panel_action(PanelAction::Apply);

        assert_eq!(state.status.invalid_field(), Some(8));
        assert_eq!(state.editor.target(), original);
        assert!(state.scene.mesh(original).is_some());

        state.handle_panel_action(PanelAction::ResetToIdentity);
        assert_eq!(state.grid, FieldGrid::identity());
        assert_eq!(state.status, EditorStatus::Ready);
        assert_eq!(state.editor.target(), original);
    }

    #[test]
    fn test_no_action_changes_nothing() {
        let mut state = state();
        let original = state.editor.target();
        state.handle_panel_action(PanelAction::None);
        assert_eq!(state.editor.target(), original);
        assert_eq!(state.status, EditorStatus::Ready);
    }
}
