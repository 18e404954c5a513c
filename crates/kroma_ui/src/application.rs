use std::sync::Arc;
use winit::window::Window;

use crate::error::Error;
use crate::{Element, Renderer};

/// Core application trait that defines the lifecycle of a kroma_ui
/// application.
///
/// Applications maintain state, respond to messages, and produce a view
/// (the Elm architecture): `view` rebuilds the widget tree from state every
/// frame, events on that tree produce messages, and `update` folds messages
/// back into state.
pub trait Application: Sized {
    /// The message type that this application handles.
    type Message: 'static;

    /// Initialize the application state. Called once at startup.
    fn new() -> Self;

    /// Return the window title for the application.
    fn title(&self) -> String;

    /// Update the application state in response to a message.
    fn update(&mut self, message: Self::Message);

    /// Produce the view tree for the current application state.
    fn view(&self) -> Element<Self::Message>;
}

/// Settings for running an application.
pub struct Settings {
    /// Window title (can be overridden by `Application::title`)
    pub window_title: Option<String>,

    /// Initial window size
    pub window_size: (u32, u32),

    /// Whether the window should be resizable
    pub resizable: bool,

    /// Log level filter for env_logger (overridable via RUST_LOG)
    pub log_level: log::LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_title: None,
            window_size: (800, 600),
            resizable: true,
            log_level: log::LevelFilter::Info,
        }
    }
}

/// Run an application with default settings.
pub fn run<A: Application + 'static>() -> Result<(), Error> {
    run_with_settings::<A>(Settings::default())
}

/// Run an application with the given settings.
///
/// Creates a window, initializes the GPU renderer, and runs the event loop
/// until the window is closed.
pub fn run_with_settings<A: Application + 'static>(settings: Settings) -> Result<(), Error> {
    use winit::event::{Event as WinitEvent, WindowEvent};
    use winit::event_loop::{ControlFlow, EventLoop};
    use winit::window::WindowBuilder;

    env_logger::Builder::from_default_env()
        .filter_level(settings.log_level)
        .init();

    let event_loop = EventLoop::new()?;

    let mut builder = WindowBuilder::new()
        .with_inner_size(winit::dpi::LogicalSize::new(
            settings.window_size.0,
            settings.window_size.1,
        ))
        .with_resizable(settings.resizable);

    if let Some(title) = settings.window_title {
        builder = builder.with_title(title);
    }

    let window = Arc::new(builder.build(&event_loop)?);

    let app = A::new();
    window.set_title(&app.title());

    let mut app_state = ApplicationState::new(app, Arc::clone(&window))?;

    // Track mouse position for event conversion; winit reports button
    // presses without coordinates.
    let mut mouse_position = crate::Point::zero();

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Wait);

        if let WinitEvent::WindowEvent { event, .. } = event {
            match event {
                WindowEvent::CloseRequested => {
                    elwt.exit();
                }
                WindowEvent::Resized(size) => {
                    app_state.renderer.resize(size.width, size.height);
                    window.request_redraw();
                }
                WindowEvent::RedrawRequested => {
                    app_state.render();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    mouse_position = crate::Point::new(position.x as f32, position.y as f32);
                    app_state.handle_event(crate::Event::MouseMoved {
                        position: mouse_position,
                    });
                    window.request_redraw();
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    let button = match button {
                        winit::event::MouseButton::Left => crate::MouseButton::Left,
                        winit::event::MouseButton::Right => crate::MouseButton::Right,
                        winit::event::MouseButton::Middle => crate::MouseButton::Middle,
                        winit::event::MouseButton::Other(n) => crate::MouseButton::Other(n),
                        _ => return,
                    };

                    let ui_event = match state {
                        winit::event::ElementState::Pressed => crate::Event::MousePressed {
                            button,
                            position: mouse_position,
                        },
                        winit::event::ElementState::Released => crate::Event::MouseReleased {
                            button,
                            position: mouse_position,
                        },
                    };

                    app_state.handle_event(ui_event);
                    window.request_redraw();
                }
                _ => {}
            }
        }
    })?;

    Ok(())
}

/// The application runtime state, managed by the framework.
struct ApplicationState<A: Application> {
    app: A,
    renderer: Renderer,
}

impl<A: Application> ApplicationState<A> {
    fn new(app: A, window: Arc<Window>) -> Result<Self, Error> {
        let renderer = pollster::block_on(Renderer::new(window))?;
        Ok(Self { app, renderer })
    }

    fn render(&mut self) {
        let mut element = self.app.view();
        self.renderer.render(&mut element);
    }

    fn handle_event(&mut self, event: crate::Event) {
        // Rebuild the view, lay it out at window size, and dispatch.
        let messages = {
            let mut element = self.app.view();
            let available = self.renderer.size();
            element.layout(available);
            let bounds = crate::Bounds::new(0.0, 0.0, available.width, available.height);
            element.on_event(&event, bounds).into_messages()
        };

        for message in messages {
            self.app.update(message);
        }
    }
}
