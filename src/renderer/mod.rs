//! Rendering module
//!
//! `Scene` describes a frame independently of the backend. The browser draws
//! it with a WebGPU triangle pipeline (text goes to the DOM HUD), native
//! builds draw it to the terminal.

pub mod pipeline;
pub mod scene;
pub mod shapes;
#[cfg(not(target_arch = "wasm32"))]
pub mod term;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{OverlayKind, Scene, TextAnchor};
