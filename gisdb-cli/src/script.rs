//! Command script reader.
//!
//! A script is a text file with one tab-separated command per line. Lines
//! starting with `;` are comments and blank lines are ignored.
//!
//! ```text
//! ; Highland County
//! world	0794500W	0792000W	381500N	383500N
//! import	VA_Highland.txt
//! what_is	Monterey	VA
//! what_is_at	382443N	0793452W
//! what_is_in	382000N	0793000W	60	90
//! show	quad
//! quit
//! ```

use std::io::{self, BufRead};
use std::path::PathBuf;

use gisdb::engine::Structure;

/// Field separator within a command line.
const SEPARATOR: char = '\t';

/// Comment marker at the start of a line.
const COMMENT: char = ';';

/// One parsed script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    World {
        west: String,
        east: String,
        south: String,
        north: String,
    },
    Import {
        file: PathBuf,
    },
    WhatIs {
        name: String,
        region: String,
    },
    WhatIsAt {
        latitude: String,
        longitude: String,
    },
    WhatIsIn {
        latitude: String,
        longitude: String,
        half_height: i64,
        half_width: i64,
    },
    Show(Structure),
    Quit,
}

/// Error for a script line that cannot be run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: {command} expects {expected} argument(s), found {found}")]
    WrongArity {
        line: usize,
        command: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid {argument} '{value}'")]
    InvalidArgument {
        line: usize,
        argument: &'static str,
        value: String,
    },
}

impl ScriptError {
    /// Script line the error refers to.
    pub fn line(&self) -> usize {
        match self {
            ScriptError::UnknownCommand { line, .. }
            | ScriptError::WrongArity { line, .. }
            | ScriptError::InvalidArgument { line, .. } => *line,
        }
    }
}

/// A command line read from a script, with its position and parse result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEntry {
    /// 1-based line number in the script file.
    pub line: usize,
    /// The line as written, without terminator.
    pub text: String,
    pub command: Result<Command, ScriptError>,
}

/// Read every command line of a script.
///
/// Comments and blank lines are dropped. Lines that fail to parse are kept
/// with their error so the caller can report them in sequence.
pub fn read_script<R: BufRead>(reader: R) -> io::Result<Vec<ScriptEntry>> {
    let mut entries = Vec::new();
    for (index, text) in reader.lines().enumerate() {
        let text = text?;
        let line = index + 1;
        if let Some(command) = parse_line(&text, line) {
            entries.push(ScriptEntry {
                line,
                text: text.trim_end_matches('\r').to_string(),
                command,
            });
        }
    }
    Ok(entries)
}

/// Parse one script line.
///
/// Returns `None` for comments and blank lines.
pub fn parse_line(text: &str, line: usize) -> Option<Result<Command, ScriptError>> {
    let text = text.trim_end();
    if text.trim_start().is_empty() || text.starts_with(COMMENT) {
        return None;
    }

    let mut fields = text.split(SEPARATOR);
    let name = fields.next().unwrap_or("").trim();
    let args: Vec<&str> = fields.map(str::trim).collect();

    Some(parse_command(name, &args, line))
}

fn parse_command(name: &str, args: &[&str], line: usize) -> Result<Command, ScriptError> {
    match name {
        "world" => {
            let [west, east, south, north] = arguments::<4>("world", args, line)?;
            Ok(Command::World {
                west: west.to_string(),
                east: east.to_string(),
                south: south.to_string(),
                north: north.to_string(),
            })
        }
        "import" => {
            let [file] = arguments::<1>("import", args, line)?;
            Ok(Command::Import {
                file: PathBuf::from(file),
            })
        }
        "what_is" => {
            let [name, region] = arguments::<2>("what_is", args, line)?;
            Ok(Command::WhatIs {
                name: name.to_string(),
                region: region.to_string(),
            })
        }
        "what_is_at" => {
            let [latitude, longitude] = arguments::<2>("what_is_at", args, line)?;
            Ok(Command::WhatIsAt {
                latitude: latitude.to_string(),
                longitude: longitude.to_string(),
            })
        }
        "what_is_in" => {
            let [latitude, longitude, half_height, half_width] =
                arguments::<4>("what_is_in", args, line)?;
            Ok(Command::WhatIsIn {
                latitude: latitude.to_string(),
                longitude: longitude.to_string(),
                half_height: half_extent("half height", half_height, line)?,
                half_width: half_extent("half width", half_width, line)?,
            })
        }
        "show" => {
            let [structure] = arguments::<1>("show", args, line)?;
            let structure = structure
                .parse::<Structure>()
                .map_err(|_| ScriptError::InvalidArgument {
                    line,
                    argument: "structure",
                    value: structure.to_string(),
                })?;
            Ok(Command::Show(structure))
        }
        "quit" => {
            arguments::<0>("quit", args, line)?;
            Ok(Command::Quit)
        }
        other => Err(ScriptError::UnknownCommand {
            line,
            command: other.to_string(),
        }),
    }
}

/// Check the argument count and return the arguments as an array.
fn arguments<'a, const N: usize>(
    command: &'static str,
    args: &[&'a str],
    line: usize,
) -> Result<[&'a str; N], ScriptError> {
    <[&str; N]>::try_from(args).map_err(|_| ScriptError::WrongArity {
        line,
        command,
        expected: N,
        found: args.len(),
    })
}

fn half_extent(argument: &'static str, value: &str, line: usize) -> Result<i64, ScriptError> {
    value
        .parse::<i64>()
        .ok()
        .filter(|v| *v >= 0)
        .ok_or_else(|| ScriptError::InvalidArgument {
            line,
            argument,
            value: value.to_string(),
        })
}
