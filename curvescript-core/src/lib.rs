/// curvescript core library - script interpreter and geometry pipeline
///
/// Reads line-oriented scene scripts, keeps the running transform and the
/// edge buffer, tessellates curves, and drives a [`Renderer`] on `display`
/// and `save`. Drawing pixels is left to the renderer implementation.

pub mod command;
pub mod config;
pub mod curves;
pub mod error;
pub mod geometry;
pub mod interpreter;
pub mod render;
pub mod script;
pub mod transform;

// Re-export commonly used types
pub use command::{Command, Keyword};
pub use config::{ConfigError, ErrorPolicy, InterpreterConfig};
pub use error::{ArgumentError, ScriptError};
pub use geometry::EdgeBuffer;
pub use interpreter::{Completion, Control, RunSummary, Session};
pub use render::{Color, RenderError, RenderResult, Renderer};
pub use script::{ScriptReader, STDIN_SENTINEL};
pub use transform::{Axis, Transform, TransformState};
