//! View task: window, scene and render loop.
//!
//! Everything here runs on the thread that owns the window. Messages from the
//! logic task are drained once per frame; input produces messages the other
//! way.

mod overlay;
mod zoom;

pub use zoom::ScrollZoom;

use std::time::Duration;

use anyhow::Result;

use clockcal_engine::coords::{Vec2, Vec3, Viewport};
use clockcal_engine::core::{App, AppControl, FrameCtx};
use clockcal_engine::input::{InputEvent, MouseButton, MouseButtonState, PointerButtonEvent};
use clockcal_engine::paint::Color;
use clockcal_engine::render::{LineRenderer, TextRenderer};
use clockcal_engine::scene::{self, AmbientLight, Anchor, Camera, Label, NodeId, PointLight, Scene};
use clockcal_engine::text::{FontId, FontSystem};
use clockcal_engine::time::FrameRater;
use clockcal_engine::window::Runtime;

use crate::bus::QueueError;
use crate::config::AppConfig;
use crate::message::{ToLogic, ToView};
use crate::shutdown::{Shutdown, ShutdownReason};
use crate::supervisor::{View, ViewPort};

const CLEAR: Color = Color::grey(0.5);
const LABEL_SIZE: f32 = 20.0;

/// What a held mouse button would do to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Zoom,
    Pan,
}

impl DragMode {
    fn from_button(button: MouseButton) -> Option<Self> {
        match button {
            MouseButton::Left => Some(DragMode::Rotate),
            MouseButton::Middle => Some(DragMode::Zoom),
            MouseButton::Right => Some(DragMode::Pan),
            _ => None,
        }
    }
}

/// The clock/calendar view.
pub struct ClockView {
    config: AppConfig,
    port: ViewPort,
}

impl ClockView {
    pub fn new(config: AppConfig, port: ViewPort) -> Self {
        Self { config, port }
    }
}

impl View for ClockView {
    /// Builds the scene, then blocks in the window loop until the window
    /// closes or shutdown is triggered.
    fn run(self, shutdown: Shutdown) -> Result<()> {
        let mut fonts = FontSystem::new();
        let font = match fonts.load_system_font() {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("overlay labels disabled: {e}");
                None
            }
        };

        let window = self.config.window.clone();
        let gpu = self.config.gpu;
        let app = ClockApp::new(&self.config, self.port, shutdown, fonts, font);
        Runtime::run(window, gpu, app)
    }
}

struct ClockApp {
    port: ViewPort,
    shutdown: Shutdown,

    scene: Scene,
    camera: Camera,
    zoom: ScrollZoom,
    drag: Option<DragMode>,

    fonts: FontSystem,
    fps_label: NodeId,
    clock_label: NodeId,

    lines: LineRenderer,
    text: TextRenderer,

    rater: FrameRater,
    fps_interval: Duration,
}

impl ClockApp {
    fn new(
        config: &AppConfig,
        port: ViewPort,
        shutdown: Shutdown,
        fonts: FontSystem,
        font: Option<FontId>,
    ) -> Self {
        let size = config.window.initial_size;
        let mut camera = Camera::new((size.width / size.height) as f32);
        camera.set_far(config.far_plane);
        let zoom = ScrollZoom::new(config.zoom);
        camera.set_position(Vec3::new(0.0, 0.0, zoom.distance()));

        let mut scene = Scene::new();
        scene.add(AmbientLight::new(Color::WHITE, 0.8));
        scene.add(PointLight::new(Color::WHITE, 5.0, Vec3::new(1.0, 0.0, 2.0)));
        scene.add(scene::helper::axes(100.0));

        let fps_label = scene.add(
            Label::new(" ")
                .with_size(LABEL_SIZE)
                .with_color(Color::grey(0.83))
                .with_font(font),
        );
        let clock_label = scene.add(
            Label::new(" ")
                .with_size(LABEL_SIZE)
                .with_font(font)
                .with_anchor(Anchor::TopRight, Vec2::new(8.0, 8.0)),
        );

        Self {
            port,
            shutdown,
            scene,
            camera,
            zoom,
            drag: None,
            fonts,
            fps_label,
            clock_label,
            lines: LineRenderer::new(),
            text: TextRenderer::new(),
            rater: FrameRater::new(config.target_fps),
            fps_interval: config.fps_interval,
        }
    }

    fn set_label(&mut self, id: NodeId, text: String) {
        if let Some(label) = self.scene.label_mut(id) {
            label.set_text(text);
        }
    }

    fn handle_message(&mut self, msg: ToView) {
        match msg {
            ToView::Tick(reading) => self.set_label(self.clock_label, overlay::clock_text(&reading)),
            ToView::Unrecognized { tag } => log::warn!("view ignoring unknown message {tag:?}"),
        }
    }

    fn drain_inbox(&mut self) {
        while let Some(msg) = self.port.inbox.try_recv() {
            self.handle_message(msg);
        }
    }

    fn on_button(&mut self, ev: &PointerButtonEvent) {
        let Some(mode) = DragMode::from_button(ev.button) else {
            return;
        };
        match ev.state {
            MouseButtonState::Pressed => self.drag = Some(mode),
            MouseButtonState::Released if self.drag == Some(mode) => self.drag = None,
            MouseButtonState::Released => {}
        }
        log::trace!("drag mode {:?}", self.drag);
    }

    fn on_scroll(&mut self, delta: f32) -> AppControl {
        let Some(distance) = self.zoom.scroll(delta) else {
            return AppControl::Continue;
        };
        self.camera.set_position(Vec3::new(0.0, 0.0, distance));

        match self.port.outbox.try_send(ToLogic::CameraZoom { distance }) {
            Ok(()) => AppControl::Continue,
            Err(QueueError::Full(_)) => {
                log::warn!("queue {} saturated", self.port.outbox.name());
                self.shutdown.trigger(ShutdownReason::QueueSaturated {
                    queue: self.port.outbox.name(),
                });
                AppControl::Exit
            }
            Err(QueueError::Closed(_)) => {
                log::debug!("logic inbox closed");
                AppControl::Continue
            }
        }
    }
}

impl App for ClockApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.shutdown.is_triggered() {
            return AppControl::Exit;
        }
        self.rater.start();

        let control = ctx.render(CLEAR, |rctx, target| {
            self.lines.render(rctx, target, &self.scene, &self.camera);
            self.text.render(rctx, target, self.scene.labels(), &self.fonts);
        });

        self.drain_inbox();
        self.rater.wait();

        if let Some((fps, potential)) = self.rater.fps(self.fps_interval) {
            self.set_label(self.fps_label, overlay::fps_text(fps, potential));
        }
        control
    }

    fn on_resize(&mut self, viewport: Viewport) {
        if let Some(aspect) = viewport.aspect() {
            self.camera.set_aspect(aspect);
        }
    }

    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        match event {
            InputEvent::PointerButton(ev) => {
                self.on_button(ev);
                AppControl::Continue
            }
            InputEvent::MouseWheel { delta, .. } => self.on_scroll(delta.y()),
            _ => AppControl::Continue,
        }
    }

    fn on_idle(&mut self) -> AppControl {
        // Frames stop while minimized; ticks must still be consumed.
        self.drain_inbox();
        if self.shutdown.is_triggered() {
            AppControl::Exit
        } else {
            AppControl::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use clockcal_engine::input::{Modifiers, MouseWheelDelta};

    use super::*;
    use crate::bus::{self, QueueName, QueueReceiver, QueueSender};
    use crate::message::ClockReading;
    use crate::supervisor::Supervisor;

    struct Harness {
        app: ClockApp,
        to_view: QueueSender<ToView>,
        from_view: QueueReceiver<ToLogic>,
        shutdown: Shutdown,
    }

    fn harness(capacity: usize) -> Harness {
        let config = AppConfig { queue_capacity: capacity, ..AppConfig::default() };
        let (to_view, inbox) = bus::bounded(QueueName::LogicToView, capacity);
        let (outbox, from_view) = bus::bounded(QueueName::ViewToLogic, capacity);
        let shutdown = Shutdown::new();
        let app = ClockApp::new(
            &config,
            ViewPort { inbox, outbox },
            shutdown.clone(),
            FontSystem::new(),
            None,
        );
        Harness { app, to_view, from_view, shutdown }
    }

    fn wheel(y: f32) -> InputEvent {
        InputEvent::MouseWheel {
            delta: MouseWheelDelta::Line { x: 0.0, y },
            modifiers: Modifiers::default(),
        }
    }

    fn button(button: MouseButton, state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state,
            x: 0.0,
            y: 0.0,
            modifiers: Modifiers::default(),
        })
    }

    #[test]
    fn scroll_moves_the_camera_and_notifies_logic() {
        let mut h = harness(10);
        assert_eq!(h.app.camera.position(), Vec3::new(0.0, 0.0, 100.0));

        assert_eq!(h.app.on_input(&wheel(1.0)), AppControl::Continue);
        assert_eq!(h.app.camera.position(), Vec3::new(0.0, 0.0, 150.0));
        assert_eq!(h.from_view.try_recv(), Some(ToLogic::CameraZoom { distance: 150.0 }));

        h.app.on_input(&wheel(0.0));
        assert_eq!(h.from_view.try_recv(), None);
    }

    #[test]
    fn full_outbox_is_fatal_not_dropped() {
        let mut h = harness(1);
        h.app.on_input(&wheel(1.0));
        assert_eq!(h.app.on_input(&wheel(1.0)), AppControl::Exit);
        assert_eq!(
            h.shutdown.reason(),
            Some(ShutdownReason::QueueSaturated { queue: QueueName::ViewToLogic })
        );
        assert_eq!(h.app.on_idle(), AppControl::Exit);
    }

    #[test]
    fn resize_updates_aspect_but_ignores_zero_height() {
        let mut h = harness(10);
        h.app.on_resize(Viewport::new(800.0, 400.0));
        assert_eq!(h.app.camera.aspect(), 2.0);
        h.app.on_resize(Viewport::new(800.0, 0.0));
        assert_eq!(h.app.camera.aspect(), 2.0);
    }

    #[test]
    fn buttons_track_drag_mode_without_moving_the_camera() {
        let mut h = harness(10);
        let before = h.app.camera.clone();

        h.app.on_input(&button(MouseButton::Middle, MouseButtonState::Pressed));
        assert_eq!(h.app.drag, Some(DragMode::Zoom));
        h.app.on_input(&button(MouseButton::Left, MouseButtonState::Released));
        assert_eq!(h.app.drag, Some(DragMode::Zoom));
        h.app.on_input(&button(MouseButton::Middle, MouseButtonState::Released));
        assert_eq!(h.app.drag, None);

        assert_eq!(h.app.camera, before);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_window_keeps_up_with_ticks() {
        let config = AppConfig::default();
        let (sup, port) = Supervisor::new(&config);
        let shutdown = sup.shutdown();
        let mut app = ClockApp::new(&config, port, shutdown.clone(), FontSystem::new(), None);
        let task = tokio::spawn(sup.supervise());

        for _ in 0..config.queue_capacity + 5 {
            tokio::time::sleep(Duration::from_secs(1)).await;
            assert_eq!(app.on_idle(), AppControl::Continue);
        }

        assert!(!shutdown.is_triggered());
        shutdown.trigger(ShutdownReason::Requested);
        assert_eq!(task.await.expect("join"), ShutdownReason::Requested);
    }

    #[test]
    fn inbox_is_drained_and_unknown_messages_are_not_fatal() {
        let mut h = harness(10);
        h.to_view
            .try_send(ToView::Unrecognized { tag: "future".into() })
            .expect("space");
        h.to_view.try_send(ToView::Tick(ClockReading::now())).expect("space");

        h.app.drain_inbox();

        assert_eq!(h.to_view.occupancy().len, 0);
        assert!(!h.shutdown.is_triggered());
        let clock = h.app.scene.labels().nth(1).map(|l| l.text.clone()).expect("clock label");
        assert!(clock.contains(':'));
    }
}
