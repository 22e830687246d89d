//! Line-oriented gesture scripts for the headless host.
//!
//! The CLI binary replays a small command language against a drawing board,
//! which makes every core operation reachable without a windowing system:
//!
//! ```text
//! # strokes are pointer gestures
//! shape circle
//! color blue
//! down 10 10
//! up 50 40
//! undo
//! redo
//! save
//! ```

use crate::board::{DrawingBoard, SurfaceHost};
use crate::draw::{Color, ShapeKind, name_to_color};
use crate::input::PointerAction;
use std::path::PathBuf;
use thiserror::Error;

/// Script parse failures, reported with 1-based line numbers.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: {message}")]
    BadArguments { line: usize, message: String },
}

/// One parsed script command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SelectColor(Color),
    SelectTexture(String),
    SelectStrokeSize(f64),
    SelectShapeKind(ShapeKind),
    EnableRandomColor,
    Pointer(PointerAction, f64, f64),
    Undo,
    Redo,
    Clear,
    Save,
}

/// Parses a script source into commands.
///
/// Blank lines and `#` comments are skipped. Command words are
/// case-insensitive.
pub fn parse(source: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut words = trimmed.split_whitespace();
        let command = words.next().expect("non-empty line").to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let parsed = match command.as_str() {
            "color" => {
                let name = one_arg(line, &command, &args)?;
                let color = name_to_color(name).ok_or_else(|| ScriptError::BadArguments {
                    line,
                    message: format!("unknown color '{name}'"),
                })?;
                Command::SelectColor(color)
            }
            "texture" => Command::SelectTexture(one_arg(line, &command, &args)?.to_string()),
            "size" => {
                let px = one_arg(line, &command, &args)?;
                Command::SelectStrokeSize(parse_number(line, px)?)
            }
            "shape" => {
                let kind = one_arg(line, &command, &args)?;
                let kind = kind
                    .parse::<ShapeKind>()
                    .map_err(|message| ScriptError::BadArguments { line, message })?;
                Command::SelectShapeKind(kind)
            }
            "random-color" => no_args(line, &command, &args, Command::EnableRandomColor)?,
            "down" => pointer(line, PointerAction::Down, &args)?,
            "move" => pointer(line, PointerAction::Move, &args)?,
            "up" => pointer(line, PointerAction::Up, &args)?,
            "undo" => no_args(line, &command, &args, Command::Undo)?,
            "redo" => no_args(line, &command, &args, Command::Redo)?,
            "clear" => no_args(line, &command, &args, Command::Clear)?,
            "save" => no_args(line, &command, &args, Command::Save)?,
            _ => {
                return Err(ScriptError::UnknownCommand { line, command });
            }
        };

        commands.push(parsed);
    }

    Ok(commands)
}

fn one_arg<'a>(line: usize, command: &str, args: &[&'a str]) -> Result<&'a str, ScriptError> {
    match args {
        &[value] => Ok(value),
        _ => Err(ScriptError::BadArguments {
            line,
            message: format!("'{command}' takes exactly one argument"),
        }),
    }
}

fn no_args(
    line: usize,
    command: &str,
    args: &[&str],
    parsed: Command,
) -> Result<Command, ScriptError> {
    if args.is_empty() {
        Ok(parsed)
    } else {
        Err(ScriptError::BadArguments {
            line,
            message: format!("'{command}' takes no arguments"),
        })
    }
}

fn pointer(line: usize, action: PointerAction, args: &[&str]) -> Result<Command, ScriptError> {
    match args {
        &[x, y] => Ok(Command::Pointer(
            action,
            parse_number(line, x)?,
            parse_number(line, y)?,
        )),
        _ => Err(ScriptError::BadArguments {
            line,
            message: "pointer commands take x and y coordinates".to_string(),
        }),
    }
}

fn parse_number(line: usize, value: &str) -> Result<f64, ScriptError> {
    value.parse::<f64>().map_err(|_| ScriptError::BadArguments {
        line,
        message: format!("'{value}' is not a number"),
    })
}

/// What a script replay did.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Commands executed
    pub commands: usize,
    /// Paths reported by successful saves
    pub saved: Vec<PathBuf>,
    /// Saves that failed at the export sink
    pub save_failures: usize,
}

/// Parses and replays a script against an active board.
///
/// Export failures do not abort the replay - the drawing session survives
/// them by design - but they are logged and counted in the summary.
pub fn run<H: SurfaceHost>(
    board: &mut DrawingBoard<H>,
    source: &str,
) -> Result<RunSummary, ScriptError> {
    let commands = parse(source)?;
    let mut summary = RunSummary::default();

    for command in commands {
        summary.commands += 1;
        match command {
            Command::SelectColor(color) => board.select_color(color),
            Command::SelectTexture(name) => board.select_texture(&name),
            Command::SelectStrokeSize(px) => board.select_stroke_size(px),
            Command::SelectShapeKind(kind) => board.select_shape_kind(kind),
            Command::EnableRandomColor => board.enable_random_color(),
            Command::Pointer(action, x, y) => board.on_pointer_event(action, x, y),
            Command::Undo => board.undo(),
            Command::Redo => board.redo(),
            Command::Clear => board.clear(),
            Command::Save => match board.save() {
                Ok(Some(path)) => summary.saved.push(path),
                Ok(None) => log::info!("Nothing to save yet"),
                Err(err) => {
                    log::error!("Save failed: {err}");
                    summary.save_failures += 1;
                }
            },
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetError, AssetProvider};
    use crate::board::MemorySurfaceHost;
    use crate::draw::color::BLUE;
    use crate::export::PngExporter;
    use cairo::ImageSurface;
    use tempfile::TempDir;

    struct NoAssets;

    impl AssetProvider for NoAssets {
        fn load_texture(&self, name: &str) -> Result<ImageSurface, AssetError> {
            Err(AssetError::NotFound(name.to_string()))
        }
    }

    #[test]
    fn parses_commands_and_skips_comments() {
        let commands = parse(
            "# a circle\n\
             shape circle\n\
             color blue\n\
             down 10 10\n\
             up 50 40\n\
             \n\
             save\n",
        )
        .unwrap();

        assert_eq!(
            commands,
            vec![
                Command::SelectShapeKind(ShapeKind::Circle),
                Command::SelectColor(BLUE),
                Command::Pointer(PointerAction::Down, 10.0, 10.0),
                Command::Pointer(PointerAction::Up, 50.0, 40.0),
                Command::Save,
            ]
        );
    }

    #[test]
    fn unknown_command_reports_line_number() {
        let err = parse("shape line\nwiggle 3 4\n").unwrap_err();
        assert!(matches!(
            err,
            ScriptError::UnknownCommand { line: 2, .. }
        ));
    }

    #[test]
    fn bad_arguments_report_line_number() {
        let err = parse("down 10\n").unwrap_err();
        assert!(matches!(err, ScriptError::BadArguments { line: 1, .. }));

        let err = parse("color chartreuse\n").unwrap_err();
        assert!(matches!(err, ScriptError::BadArguments { line: 1, .. }));

        let err = parse("size big\n").unwrap_err();
        assert!(matches!(err, ScriptError::BadArguments { line: 1, .. }));
    }

    #[test]
    fn replay_drives_the_board_end_to_end() {
        let dir = TempDir::new().unwrap();
        let host = MemorySurfaceHost::new(64, 64).unwrap();
        let exporter = PngExporter::new(dir.path());
        let mut board = DrawingBoard::new(host, Box::new(NoAssets), Box::new(exporter));
        board.activate().unwrap();

        let summary = run(
            &mut board,
            "shape rectangle\n\
             color red\n\
             down 4 4\n\
             up 20 20\n\
             clear\n\
             undo\n\
             save\n",
        )
        .unwrap();

        assert_eq!(summary.commands, 7);
        assert_eq!(summary.save_failures, 0);
        assert_eq!(summary.saved.len(), 1);
        assert!(summary.saved[0].exists());
        assert_eq!(board.history().len(), 1);
        assert_eq!(board.history().snapshot()[0].kind, ShapeKind::Rectangle);
    }
}
