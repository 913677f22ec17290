//! Windowed demo for clavier: logs bound control transitions as they happen.
//!
//! Provides the winit application, the fixed-rate input clock and a
//! hold-to-confirm custom control.

pub mod app;
pub mod frame_clock;
pub mod hold;
