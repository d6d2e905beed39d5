/// Terminal front-end for curvescript: runs a script against a pixel canvas
/// that is printed to the terminal on `display` and written to disk on `save`.
use anyhow::Context as _;
use crossterm::terminal;
use curvescript_core::{
    Completion, ConfigError, InterpreterConfig, Renderer, RunSummary, ScriptReader, Session,
};
use log::info;
use std::io::{self, stdout, IsTerminal};

pub mod canvas;
pub mod renderer;

pub use canvas::{Canvas, MAX_SIDE};
pub use renderer::TerminalRenderer;

pub const CANVAS_VAR: &str = "CURVESCRIPT_CANVAS";

/// Character grid used when stdout is not a terminal
const FALLBACK_GRID: (usize, usize) = (100, 50);

/// Canvas size from a `WIDTHxHEIGHT` value
pub fn parse_canvas_size(value: &str) -> Result<(usize, usize), ConfigError> {
    let invalid = || ConfigError::Invalid {
        var: CANVAS_VAR.to_string(),
        message: format!("expected WIDTHxHEIGHT with sizes in 1..={MAX_SIDE}, got {value:?}"),
    };

    let (w, h) = value.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: usize = w.trim().parse().map_err(|_| invalid())?;
    let height: usize = h.trim().parse().map_err(|_| invalid())?;
    let in_range = |side: usize| (1..=MAX_SIDE).contains(&side);
    if !in_range(width) || !in_range(height) || width.checked_mul(height).is_none() {
        return Err(invalid());
    }
    Ok((width, height))
}

fn canvas_from_env() -> Result<Canvas, ConfigError> {
    match std::env::var(CANVAS_VAR) {
        Ok(value) => {
            let (width, height) = parse_canvas_size(&value)?;
            Ok(Canvas::new(width, height))
        }
        Err(_) => Ok(Canvas::default()),
    }
}

fn character_grid() -> (usize, usize) {
    if !io::stdout().is_terminal() {
        return FALLBACK_GRID;
    }
    match terminal::size() {
        // leave the last row for the prompt
        Ok((cols, rows)) => (cols as usize, (rows as usize).saturating_sub(1)),
        Err(_) => FALLBACK_GRID,
    }
}

/// Run the script at `source` (or standard input for `stdin`).
///
/// The renderer is always finished before returning, also when the script
/// fails part-way.
pub fn run_script(source: &str) -> anyhow::Result<(Completion, RunSummary)> {
    let config = InterpreterConfig::from_env().context("invalid interpreter configuration")?;
    let canvas = canvas_from_env().context("invalid canvas configuration")?;
    let mut reader = ScriptReader::open(source)?;

    let (cols, rows) = character_grid();
    let renderer = TerminalRenderer::new(canvas, stdout(), cols, rows);
    let mut session = Session::new(renderer, config);

    let result = session.run(&mut reader);
    session
        .renderer_mut()
        .finish()
        .context("failed to flush output")?;

    let (completion, summary) =
        result.with_context(|| format!("script `{source}` stopped at line {}", reader.line_number()))?;
    info!(
        "{source}: {:?} after {} command(s), {} skipped",
        completion, summary.executed, summary.skipped
    );
    Ok((completion, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn run_text(script: &str) -> anyhow::Result<(Completion, RunSummary)> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.script");
        fs::write(&path, script).unwrap();
        run_script(path.to_str().unwrap())
    }

    #[test]
    fn test_parse_canvas_size() {
        assert_eq!(parse_canvas_size("500x500"), Ok((500, 500)));
        assert_eq!(parse_canvas_size(" 640 X 480 "), Ok((640, 480)));
        assert!(parse_canvas_size("0x10").is_err());
        assert!(parse_canvas_size("500").is_err());
        assert!(parse_canvas_size("ax b").is_err());
        assert_eq!(parse_canvas_size("8192x8192"), Ok((MAX_SIDE, MAX_SIDE)));
        assert!(parse_canvas_size("8193x10").is_err());
        assert!(matches!(
            parse_canvas_size("4294967296x4294967296"),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_missing_script_is_error() {
        let err = run_script("/no/such/dir/script.txt").unwrap_err();
        assert!(err.to_string().contains("cannot open script"));
    }

    #[test]
    fn test_run_script_until_quit() {
        let (completion, summary) =
            run_text("ident\nline\n0 0 0 10 10 0\nquit\nline\n1 1 1 2 2 2\n").unwrap();
        assert_eq!(completion, Completion::Quit);
        assert_eq!(summary.executed, 3);
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn test_run_script_until_end_of_input() {
        let (completion, summary) = run_text("circle\n250 250 100\napply\n").unwrap();
        assert_eq!(completion, Completion::EndOfInput);
        assert_eq!(summary.executed, 2);
    }

    #[test]
    fn test_run_script_parse_error() {
        let err = run_text("line\n0 0 0 1 1\n").unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("stopped at line 2"), "{message}");
        assert!(message.contains("line"), "{message}");
    }
}
