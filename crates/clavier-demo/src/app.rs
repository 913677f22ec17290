//! Window creation and event handling via winit.
//!
//! [`App`] implements winit's [`ApplicationHandler`]: window events feed a
//! [`WinitInput`], and once per input frame the controls advance and every
//! bound name that changed is logged.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use clavier::{
    Activation, Bindings, ComboOrder, Controls, CustomHandle, Key, MouseButton, WinitInput,
};
use clavier_config::{Config, ConfigError};
use tracing::{debug, error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::frame_clock::FrameClock;
use crate::hold::Hold;

/// Binding whose activation closes the demo.
pub const QUIT_BINDING: &str = "quit";

/// Binding whose activation re-reads the key bindings from `config.ron`.
pub const RELOAD_BINDING: &str = "reload";

/// Key watched by the hold-to-confirm control.
pub const HOLD_KEY: Key = Key::Enter;

/// Returns [`WindowAttributes`] based on the given configuration.
#[must_use]
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            f64::from(config.window.width),
            f64::from(config.window.height),
        ))
}

/// Demo state: the window plus one input session.
pub struct App {
    config: Config,
    config_dir: Option<PathBuf>,
    window: Option<Window>,
    input: WinitInput,
    controls: Controls,
    bindings: Bindings,
    clock: FrameClock,
    hold: Rc<RefCell<Hold>>,
    _hold_handle: CustomHandle,
}

impl App {
    /// Builds the controls and bindings described by `config`.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let bindings = config.input.bindings()?;
        warn_conflicts(&bindings, config.input.combo_order);

        let mut controls = Controls::with_combo_order(config.input.combo_order);
        bindings.register(&mut controls);

        // One second at the configured rate.
        let hold = Rc::new(RefCell::new(Hold::new(HOLD_KEY, config.input.frame_rate_hz)));
        let hold_handle = controls.register(hold.clone());

        info!(
            bindings = bindings.len(),
            combos = controls.combo_count(),
            combo_order = ?controls.combo_order(),
            "Input session ready"
        );

        Ok(Self {
            clock: FrameClock::new(config.input.frame_rate_hz),
            config,
            config_dir: None,
            window: None,
            input: WinitInput::new(),
            controls,
            bindings,
            hold,
            _hold_handle: hold_handle,
        })
    }

    /// Directory the [`RELOAD_BINDING`] re-reads `config.ron` from.
    #[must_use]
    pub fn with_config_dir(mut self, config_dir: PathBuf) -> Self {
        self.config_dir = Some(config_dir);
        self
    }

    /// The active named bindings.
    #[must_use]
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// The live controls.
    #[must_use]
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Raw input fed by window events.
    pub fn input_mut(&mut self) -> &mut WinitInput {
        &mut self.input
    }

    /// Runs one input frame and logs what changed. Returns `true` when the
    /// quit binding was just activated.
    pub fn step(&mut self) -> bool {
        self.controls.advance(&self.input);
        self.input.end_frame();
        let frame = self.controls.frame();

        for (name, state) in self.bindings.transitions(&self.controls) {
            info!(frame, binding = name, ?state, "Binding transition");
        }

        if self.config.debug.trace_transitions {
            self.trace_raw_transitions(frame);
        }

        if self.hold.borrow().is_just_activated() {
            info!(frame, key = %HOLD_KEY, "Hold confirmed");
        }

        if self.just_activated(RELOAD_BINDING) {
            self.reload_bindings();
        }

        self.just_activated(QUIT_BINDING)
    }

    /// Runs up to `count` input frames, stopping at the first one that
    /// requests quit. Returns `true` if quit was requested.
    pub fn step_frames(&mut self, count: u32) -> bool {
        (0..count).any(|_| self.step())
    }

    fn just_activated(&self, name: &str) -> bool {
        self.bindings
            .state(name, &self.controls)
            .is_some_and(|s| s.is_just_activated())
    }

    /// Re-reads `config.ron` and swaps in its key bindings. Other settings
    /// take effect on restart.
    fn reload_bindings(&mut self) {
        let Some(dir) = self.config_dir.as_deref() else {
            warn!("No config directory to reload from");
            return;
        };
        let reloaded = match self.config.reload(dir) {
            Ok(Some(reloaded)) => reloaded,
            Ok(None) => {
                info!("Config unchanged");
                return;
            }
            Err(e) => {
                error!("Config reload failed: {e}");
                return;
            }
        };
        if reloaded.input.keybindings == self.config.input.keybindings {
            info!("Key bindings unchanged");
            return;
        }

        match reloaded.input.bindings() {
            Ok(bindings) => {
                warn_conflicts(&bindings, self.controls.combo_order());
                bindings.register(&mut self.controls);
                self.bindings = bindings;
                self.config.input.keybindings = reloaded.input.keybindings;
                info!(bindings = self.bindings.len(), "Key bindings reloaded");
            }
            Err(e) => warn!("Keeping previous key bindings: {e}"),
        }
    }

    fn trace_raw_transitions(&self, frame: u64) {
        for &key in Key::ALL {
            let state = self.controls.key(key).state();
            if state.is_edge() {
                debug!(frame, %key, ?state, "Key transition");
            }
        }
        for &button in MouseButton::ALL {
            let state = self.controls.button(button).state();
            if state.is_edge() {
                debug!(frame, %button, ?state, "Button transition");
            }
        }
    }
}

fn warn_conflicts(bindings: &Bindings, order: ComboOrder) {
    for conflict in bindings.detect_conflicts(order) {
        warn!(
            control = %conflict.control,
            names = ?conflict.names,
            "Control bound under several names"
        );
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match event_loop.create_window(window_attributes_from_config(&self.config)) {
            Ok(window) => {
                let size = window.inner_size();
                info!("Window created: {}x{}", size.width, size.height);
                self.window = Some(window);
            }
            Err(e) => {
                error!("Window creation failed: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            info!("Close requested, shutting down");
            event_loop.exit();
            return;
        }
        self.input.handle_window_event(&event);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let due = self.clock.advance_to(Instant::now());
        if self.step_frames(due) {
            info!("Quit binding activated, shutting down");
            event_loop.exit();
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_deadline()));
        }
    }
}

/// Creates an event loop and runs the demo until the window closes.
#[instrument(skip(app))]
pub fn run(mut app: App) -> Result<(), EventLoopError> {
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clavier::{ControlId, RawKeyEvent};
    use winit::event::ElementState;
    use winit::keyboard::{KeyCode, PhysicalKey};

    fn key_event(code: KeyCode, state: ElementState) -> RawKeyEvent {
        RawKeyEvent {
            key: PhysicalKey::Code(code),
            state,
            repeat: false,
        }
    }

    #[test]
    fn test_window_attributes_from_config() {
        let mut config = Config::default();
        config.window.title = "Bindings".to_string();
        let attrs = window_attributes_from_config(&config);
        assert_eq!(attrs.title, "Bindings");
    }

    #[test]
    fn test_default_config_builds_app() {
        let app = App::new(Config::default()).unwrap();
        assert_eq!(app.controls().combo_count(), 1, "save binds one combo");
        assert_eq!(app.controls().custom_count(), 1);
    }

    #[test]
    fn test_bad_binding_fails() {
        let mut config = Config::default();
        config
            .input
            .keybindings
            .insert("dash".to_string(), "NotAKey".to_string());
        assert!(matches!(App::new(config), Err(ConfigError::Binding(_))));
    }

    #[test]
    fn test_quit_binding_stops_on_first_frame() {
        let mut app = App::new(Config::default()).unwrap();
        assert!(!app.step());

        app.input_mut()
            .keyboard
            .process_raw(key_event(KeyCode::Escape, ElementState::Pressed));
        assert!(app.step());
        assert!(!app.step(), "holding quit does not fire again");
    }

    #[test]
    fn test_save_combo_through_window_input() {
        let mut app = App::new(Config::default()).unwrap();
        let keyboard = &mut app.input_mut().keyboard;
        keyboard.process_raw(key_event(KeyCode::ControlLeft, ElementState::Pressed));
        keyboard.process_raw(key_event(KeyCode::KeyS, ElementState::Pressed));
        app.step();

        let save = app
            .controls()
            .find_combo([Key::ControlLeft, Key::KeyS])
            .unwrap();
        assert!(save.is_just_activated());
    }

    #[test]
    fn test_hold_key_confirms_after_one_second() {
        let mut config = Config::default();
        config.input.frame_rate_hz = 4;
        let mut app = App::new(config).unwrap();
        app.input_mut()
            .keyboard
            .process_raw(key_event(KeyCode::Enter, ElementState::Pressed));

        for _ in 0..3 {
            app.step();
            assert!(app.hold.borrow().is_still_inactive());
        }
        app.step();
        assert!(app.hold.borrow().is_just_activated());
    }

    #[test]
    fn test_step_frames_stops_at_quit() {
        let mut app = App::new(Config::default()).unwrap();
        app.input_mut()
            .keyboard
            .process_raw(key_event(KeyCode::Escape, ElementState::Pressed));
        assert!(app.step_frames(3));
        assert_eq!(app.controls().frame(), 1, "no frames run after quit");

        assert!(!app.step_frames(2));
        assert_eq!(app.controls().frame(), 3);
    }

    #[test]
    fn test_step_frames_zero_runs_nothing() {
        let mut app = App::new(Config::default()).unwrap();
        assert!(!app.step_frames(0));
        assert_eq!(app.controls().frame(), 0);
    }

    fn press_reload(app: &mut App) {
        app.input_mut()
            .keyboard
            .process_raw(key_event(KeyCode::F5, ElementState::Pressed));
        app.step();
        app.input_mut()
            .keyboard
            .process_raw(key_event(KeyCode::F5, ElementState::Released));
        app.step();
    }

    #[test]
    fn test_reload_binding_swaps_in_new_bindings() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        let mut app = App::new(config.clone())
            .unwrap()
            .with_config_dir(dir.path().to_path_buf());

        let mut edited = config;
        edited
            .input
            .keybindings
            .insert("jump".to_string(), "ShiftLeft+Space".to_string());
        edited.save(dir.path()).unwrap();

        press_reload(&mut app);
        let jump = ControlId::Combo([Key::ShiftLeft, Key::Space].into());
        assert_eq!(app.bindings().get("jump"), Some(&jump));
        assert!(app.controls().peek(&jump).is_some(), "new combo registered");
    }

    #[test]
    fn test_reload_with_bad_binding_keeps_previous() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        let mut app = App::new(config.clone())
            .unwrap()
            .with_config_dir(dir.path().to_path_buf());

        let mut edited = config;
        edited
            .input
            .keybindings
            .insert("jump".to_string(), "Warp".to_string());
        edited.save(dir.path()).unwrap();

        press_reload(&mut app);
        assert_eq!(
            app.bindings().get("jump"),
            Some(&ControlId::Key(Key::Space))
        );
    }

    #[test]
    fn test_reload_without_config_dir_is_harmless() {
        let mut app = App::new(Config::default()).unwrap();
        press_reload(&mut app);
        assert_eq!(app.bindings().len(), Config::default().input.keybindings.len());
    }
}
