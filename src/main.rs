use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use futures::executor::{block_on, LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;
use scene_editor::cli::Cli;
use scene_editor::commands::{EditorCommand, ScriptRunner};
use scene_editor::editor::{load_from_source, EditorSession};
use scene_editor::input::PointerTracker;
use scene_editor::loaders::ModelSource;
use scene_editor::renderer::{EditorRenderer, UiOutput};
use scene_editor::ui::{EditorPanels, PanelAction};
use scene_editor::viewport::ViewportRect;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

// === Constants ===

const WINDOW_TITLE: &str = "Scene Editor";
const FRAME_LOG_INTERVAL: u64 = 600;

// === Application ===

struct App {
    cli: Cli,
    window: Option<Arc<Window>>,
    renderer: Option<EditorRenderer>,
    session: Rc<RefCell<EditorSession>>,
    panels: EditorPanels,
    pointer: PointerTracker,
    pool: LocalPool,
    spawner: LocalSpawner,
}

impl App {
    fn new(cli: Cli, session: Rc<RefCell<EditorSession>>) -> Self {
        let panels = EditorPanels::new(session.borrow().events());
        let pool = LocalPool::new();
        let spawner = pool.spawner();

        Self {
            cli,
            window: None,
            renderer: None,
            session,
            panels,
            pointer: PointerTracker::new(),
            pool,
            spawner,
        }
    }

    /// Queue a load; it completes while the event loop keeps running
    fn spawn_load(&self, source: ModelSource) {
        let session = Rc::clone(&self.session);
        let task = async move {
            match load_from_source(&session, source).await {
                Ok(entry) => log::info!("Loaded {} as {}", entry.name, entry.id),
                Err(err) => log::warn!("Load failed: {}", err),
            }
        };

        if let Err(err) = self.spawner.spawn_local(task) {
            log::error!("Could not queue model load: {}", err);
        }
    }

    fn apply(&mut self, action: PanelAction) {
        let load = self.panels.apply(&mut self.session.borrow_mut(), action);
        if let Some(source) = load {
            self.spawn_load(source);
        }
    }

    fn apply_ui_output(&mut self, output: UiOutput) {
        {
            let mut session = self.session.borrow_mut();
            let rect = output.viewport;
            if session.viewport().is_mounted()
                && !rect.is_empty()
                && session.viewport().rect() != Some(rect)
            {
                session.mount(rect);
            }
        }

        for action in output.actions {
            self.apply(action);
        }
    }

    fn redraw(&mut self) {
        let frame = self.session.borrow_mut().tick();
        if let Some(frame) = &frame {
            if frame.info.number % FRAME_LOG_INTERVAL == 0 {
                log::debug!(
                    "Frame {} at {:.1}s, highlighted {:?}",
                    frame.info.number,
                    frame.info.time,
                    frame.highlighted
                );
            }
        }
        self.panels.refresh(&self.session.borrow());

        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };
        let result = renderer.render(
            window,
            &self.session.borrow(),
            &self.panels,
            frame.as_ref(),
        );

        match result {
            Ok(output) => self.apply_ui_output(output),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.reconfigure();
                }
            }
            Err(e) => log::error!("Render error: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(WINDOW_TITLE)
                .with_inner_size(winit::dpi::PhysicalSize::new(
                    self.cli.width,
                    self.cli.height,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let show_panels = !self.cli.no_ui;
        let renderer = match pollster::block_on(EditorRenderer::new(window.clone(), show_panels)) {
            Ok(r) => r,
            Err(e) => {
                log::error!("Failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.session
            .borrow_mut()
            .mount(ViewportRect::sized(size.width, size.height));
        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return;
            }
        }

        if let Some(click) = self.pointer.process_event(&event) {
            let picked = self.session.borrow_mut().click_at(click.x, click.y);
            log::debug!("Click at ({}, {}) picked {:?}", click.x, click.y, picked);
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                self.session.borrow_mut().unmount();
                event_loop.exit();
            }
            WindowEvent::Destroyed => self.session.borrow_mut().unmount(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Delete),
                        ..
                    },
                ..
            } => self.apply(PanelAction::RemoveSelected),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
                self.session.borrow_mut().resize(size.width, size.height);
            }
            WindowEvent::DroppedFile(path) => self.spawn_load(ModelSource::path(path)),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.pool.run_until_stalled();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

// === Entry points ===

fn run_script(cli: &Cli, script: &std::path::Path) -> Result<()> {
    let text = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let commands = EditorCommand::parse_script(&text)?;

    // Headless runs mount a virtual viewport so loads and clicks work
    let session = RefCell::new(EditorSession::new());
    session
        .borrow_mut()
        .mount(ViewportRect::sized(cli.width, cli.height));

    let mut runner = ScriptRunner::new(&session);
    let preload: Vec<EditorCommand> = cli
        .models
        .iter()
        .map(|path| EditorCommand::Load { path: path.clone() })
        .collect();
    runner.run(&preload);
    runner.run(&commands);

    let report = serde_json::to_string_pretty(&runner.report())?;
    println!("{}", report);
    Ok(())
}

fn run_window(cli: Cli) -> Result<()> {
    let session = Rc::new(RefCell::new(EditorSession::new()));
    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli, Rc::clone(&session));

    // Startup models load against a provisional viewport; the window
    // replaces it once it exists
    session
        .borrow_mut()
        .mount(ViewportRect::sized(app.cli.width, app.cli.height));
    for path in app.cli.models.clone() {
        if let Err(err) = block_on(load_from_source(&session, ModelSource::path(&path))) {
            log::warn!("Skipping {}: {}", path.display(), err);
        }
    }

    if !app.cli.no_ui {
        println!("Scene Editor - Controls: click to select, Delete removes, drop a glTF file to load, Escape to quit");
    }
    event_loop.run_app(&mut app)?;

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.script.clone() {
        Some(script) => run_script(&cli, &script),
        None => run_window(cli),
    }
}
