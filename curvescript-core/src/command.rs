/// Script keywords and their validated commands
use std::fmt;
use std::path::PathBuf;

use nalgebra::{Point2, Point3, Vector3};

use crate::error::ArgumentError;
use crate::script::parse_numbers;
use crate::transform::Axis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Line,
    Circle,
    Hermite,
    Bezier,
    Ident,
    Scale,
    Translate,
    XRotate,
    YRotate,
    ZRotate,
    Apply,
    Display,
    Save,
    Quit,
}

impl Keyword {
    pub const ALL: [Keyword; 14] = [
        Keyword::Line,
        Keyword::Circle,
        Keyword::Hermite,
        Keyword::Bezier,
        Keyword::Ident,
        Keyword::Scale,
        Keyword::Translate,
        Keyword::XRotate,
        Keyword::YRotate,
        Keyword::ZRotate,
        Keyword::Apply,
        Keyword::Display,
        Keyword::Save,
        Keyword::Quit,
    ];

    pub fn lookup(word: &str) -> Option<Keyword> {
        Self::ALL.into_iter().find(|k| k.as_str() == word)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Line => "line",
            Keyword::Circle => "circle",
            Keyword::Hermite => "hermite",
            Keyword::Bezier => "bezier",
            Keyword::Ident => "ident",
            Keyword::Scale => "scale",
            Keyword::Translate => "translate",
            Keyword::XRotate => "xrotate",
            Keyword::YRotate => "yrotate",
            Keyword::ZRotate => "zrotate",
            Keyword::Apply => "apply",
            Keyword::Display => "display",
            Keyword::Save => "save",
            Keyword::Quit => "quit",
        }
    }

    /// Number of arguments on the following line (`save` takes one path)
    pub fn arity(self) -> usize {
        match self {
            Keyword::Line => 6,
            Keyword::Circle => 3,
            Keyword::Hermite | Keyword::Bezier => 8,
            Keyword::Scale | Keyword::Translate => 3,
            Keyword::XRotate | Keyword::YRotate | Keyword::ZRotate => 1,
            Keyword::Save => 1,
            Keyword::Ident | Keyword::Apply | Keyword::Display | Keyword::Quit => 0,
        }
    }

    pub fn takes_arguments(self) -> bool {
        self.arity() > 0
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A command with its arguments already validated
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Line(Point3<f32>, Point3<f32>),
    Circle { center: Point2<f32>, radius: f32 },
    Hermite([Point2<f32>; 4]),
    Bezier([Point2<f32>; 4]),
    Ident,
    Scale(Vector3<f32>),
    Translate(Vector3<f32>),
    /// Angle in degrees, as written in the script
    Rotate { axis: Axis, degrees: f32 },
    Apply,
    Display,
    Save(PathBuf),
    Quit,
}

impl Command {
    /// Build a command from its keyword and argument line.
    ///
    /// `args` is `None` when the input ended before the argument line; that
    /// is only valid for keywords without arguments.
    pub fn parse(keyword: Keyword, args: Option<&str>) -> Result<Command, ArgumentError> {
        let args = match (keyword.takes_arguments(), args) {
            (false, _) => "",
            (true, Some(line)) => line,
            (true, None) => return Err(ArgumentError::MissingLine),
        };

        let command = match keyword {
            Keyword::Line => {
                let [x0, y0, z0, x1, y1, z1] = parse_numbers::<6>(args)?;
                Command::Line(Point3::new(x0, y0, z0), Point3::new(x1, y1, z1))
            }
            Keyword::Circle => {
                let [cx, cy, r] = parse_numbers::<3>(args)?;
                Command::Circle {
                    center: Point2::new(cx, cy),
                    radius: r,
                }
            }
            Keyword::Hermite => Command::Hermite(control_points(args)?),
            Keyword::Bezier => Command::Bezier(control_points(args)?),
            Keyword::Ident => Command::Ident,
            Keyword::Scale => Command::Scale(Vector3::from(parse_numbers::<3>(args)?)),
            Keyword::Translate => Command::Translate(Vector3::from(parse_numbers::<3>(args)?)),
            Keyword::XRotate => rotate(Axis::X, args)?,
            Keyword::YRotate => rotate(Axis::Y, args)?,
            Keyword::ZRotate => rotate(Axis::Z, args)?,
            Keyword::Apply => Command::Apply,
            Keyword::Display => Command::Display,
            Keyword::Save => {
                let path = args.trim();
                if path.is_empty() {
                    return Err(ArgumentError::EmptyPath);
                }
                Command::Save(PathBuf::from(path))
            }
            Keyword::Quit => Command::Quit,
        };
        Ok(command)
    }

    pub fn keyword(&self) -> Keyword {
        match self {
            Command::Line(..) => Keyword::Line,
            Command::Circle { .. } => Keyword::Circle,
            Command::Hermite(_) => Keyword::Hermite,
            Command::Bezier(_) => Keyword::Bezier,
            Command::Ident => Keyword::Ident,
            Command::Scale(_) => Keyword::Scale,
            Command::Translate(_) => Keyword::Translate,
            Command::Rotate { axis: Axis::X, .. } => Keyword::XRotate,
            Command::Rotate { axis: Axis::Y, .. } => Keyword::YRotate,
            Command::Rotate { axis: Axis::Z, .. } => Keyword::ZRotate,
            Command::Apply => Keyword::Apply,
            Command::Display => Keyword::Display,
            Command::Save(_) => Keyword::Save,
            Command::Quit => Keyword::Quit,
        }
    }
}

fn control_points(args: &str) -> Result<[Point2<f32>; 4], ArgumentError> {
    let [x0, y0, x1, y1, x2, y2, x3, y3] = parse_numbers::<8>(args)?;
    Ok([
        Point2::new(x0, y0),
        Point2::new(x1, y1),
        Point2::new(x2, y2),
        Point2::new(x3, y3),
    ])
}

fn rotate(axis: Axis, args: &str) -> Result<Command, ArgumentError> {
    let [degrees] = parse_numbers::<1>(args)?;
    Ok(Command::Rotate { axis, degrees })
}
