/// Script execution: one session owns the transform, the edge buffer and
/// the renderer, and runs commands strictly in order.
use std::io::BufRead;

use log::{debug, error, info, warn};

use crate::command::{Command, Keyword};
use crate::config::{ErrorPolicy, InterpreterConfig};
use crate::curves;
use crate::error::ScriptError;
use crate::geometry::EdgeBuffer;
use crate::render::Renderer;
use crate::script::ScriptReader;
use crate::transform::{Transform, TransformState};

/// What the caller should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Halt,
}

/// How a script run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// `quit` was executed
    Quit,
    /// Input ran out without `quit`
    EndOfInput,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub skipped: usize,
}

pub struct Session<R> {
    transform: TransformState,
    edges: EdgeBuffer,
    renderer: R,
    config: InterpreterConfig,
}

impl<R: Renderer> Session<R> {
    /// Start a session; the canvas is cleared once here
    pub fn new(mut renderer: R, config: InterpreterConfig) -> Self {
        renderer.clear();
        Self {
            transform: TransformState::new(),
            edges: EdgeBuffer::new(),
            renderer,
            config,
        }
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn edges(&self) -> &EdgeBuffer {
        &self.edges
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Execute a single validated command
    pub fn execute(&mut self, command: &Command) -> Result<Control, ScriptError> {
        let keyword = command.keyword().as_str();
        debug!("{keyword}: {:?}", command);
        match command {
            Command::Line(p0, p1) => self.edges.add_edge(*p0, *p1),
            Command::Circle { center, radius } => {
                let points = curves::circle(center.x, center.y, *radius, self.config.circle_steps);
                self.edges.add_polyline(&points);
            }
            Command::Hermite(control) => {
                let points = curves::hermite(control, self.config.hermite_steps);
                self.edges.add_polyline(&points);
            }
            Command::Bezier(control) => {
                let points = curves::bezier(control, self.config.bezier_steps);
                self.edges.add_polyline(&points);
            }
            Command::Ident => self.transform.reset(),
            Command::Scale(s) => self
                .transform
                .compose_with(&Transform::scale_matrix(s.x, s.y, s.z)),
            Command::Translate(t) => self
                .transform
                .compose_with(&Transform::translation_matrix(t.x, t.y, t.z)),
            Command::Rotate { axis, degrees } => self
                .transform
                .compose_with(&axis.rotation(degrees.to_radians())),
            Command::Apply => self.edges.apply(self.transform.current()),
            Command::Display => {
                self.draw(keyword)?;
                self.renderer
                    .present()
                    .map_err(|source| ScriptError::Render { keyword, source })?;
                self.renderer.clear();
            }
            Command::Save(path) => {
                self.draw(keyword)?;
                self.renderer
                    .save(path)
                    .map_err(|source| ScriptError::Render { keyword, source })?;
                info!("saved {} segment(s) to {}", self.edges.segment_count(), path.display());
                self.renderer.clear();
            }
            Command::Quit => return Ok(Control::Halt),
        }
        Ok(Control::Continue)
    }

    fn draw(&mut self, keyword: &'static str) -> Result<(), ScriptError> {
        self.renderer
            .draw_segments(&self.edges, self.config.draw_color)
            .map_err(|source| ScriptError::Render { keyword, source })
    }

    /// Run a script until `quit` or end of input.
    ///
    /// Parse errors and unknown keywords follow the configured
    /// [`ErrorPolicy`]; everything else is fatal.
    pub fn run<B: BufRead>(
        &mut self,
        reader: &mut ScriptReader<B>,
    ) -> Result<(Completion, RunSummary), ScriptError> {
        let mut summary = RunSummary::default();

        while let Some(line) = reader.next_line()? {
            // a keyword line holds the keyword alone
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            let line_number = reader.line_number();

            let Some(keyword) = Keyword::lookup(word) else {
                let err = ScriptError::UnknownCommand {
                    keyword: word.to_string(),
                    line: line_number,
                };
                match self.config.unknown_commands {
                    ErrorPolicy::Abort => return Err(err),
                    ErrorPolicy::Skip => {
                        warn!("{err}, skipping");
                        summary.skipped += 1;
                        continue;
                    }
                }
            };

            let args = if keyword.takes_arguments() {
                reader.next_line()?
            } else {
                None
            };

            let command = match Command::parse(keyword, args.as_deref()) {
                Ok(command) => command,
                Err(reason) => {
                    let err = ScriptError::Parse {
                        keyword: keyword.to_string(),
                        raw: args.unwrap_or_default(),
                        line: line_number,
                        reason,
                    };
                    match self.config.parse_errors {
                        ErrorPolicy::Abort => return Err(err),
                        ErrorPolicy::Skip => {
                            error!("{err}, skipping");
                            summary.skipped += 1;
                            continue;
                        }
                    }
                }
            };

            summary.executed += 1;
            if self.execute(&command)? == Control::Halt {
                return Ok((Completion::Quit, summary));
            }
        }

        Ok((Completion::EndOfInput, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Color, RenderResult};
    use nalgebra::{Matrix4, Point3};
    use std::path::Path;

    #[derive(Default)]
    struct NullRenderer {
        clears: usize,
    }

    impl Renderer for NullRenderer {
        fn clear(&mut self) {
            self.clears += 1;
        }

        fn draw_segments(&mut self, _edges: &EdgeBuffer, _color: Color) -> RenderResult<()> {
            Ok(())
        }

        fn present(&mut self) -> RenderResult<()> {
            Ok(())
        }

        fn save(&mut self, _path: &Path) -> RenderResult<()> {
            Ok(())
        }
    }

    fn session() -> Session<NullRenderer> {
        Session::new(NullRenderer::default(), InterpreterConfig::default())
    }

    #[test]
    fn test_new_session_clears_canvas() {
        let session = session();
        assert_eq!(session.renderer().clears, 1);
        assert_eq!(*session.transform().current(), Matrix4::identity());
        assert!(session.edges().is_empty());
    }

    #[test]
    fn test_rotation_is_retained() {
        let mut session = session();
        session
            .execute(&Command::Rotate {
                axis: crate::Axis::Z,
                degrees: 90.0,
            })
            .unwrap();
        session
            .execute(&Command::Line(Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)))
            .unwrap();
        session.execute(&Command::Apply).unwrap();

        let p = session.edges().points()[1];
        assert!((p - Point3::new(0.0, 2.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn test_quit_halts() {
        let mut session = session();
        assert_eq!(session.execute(&Command::Quit).unwrap(), Control::Halt);
        assert_eq!(session.execute(&Command::Ident).unwrap(), Control::Continue);
    }

    #[test]
    fn test_curves_use_configured_steps() {
        let config = InterpreterConfig {
            circle_steps: 12,
            ..Default::default()
        };
        let mut session = Session::new(NullRenderer::default(), config);
        session
            .execute(&Command::Circle {
                center: nalgebra::Point2::new(0.0, 0.0),
                radius: 1.0,
            })
            .unwrap();
        assert_eq!(session.edges().segment_count(), 12);
    }
}
