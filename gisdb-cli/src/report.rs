//! Command log writer.
//!
//! Produces the human-readable report of a script run: a banner, one block
//! per command with its results, and a closing line on quit. Diagnostic
//! logging goes through `tracing` separately.

use std::io::{self, Write};
use std::path::Path;

use chrono::Local;
use gisdb::coord;
use gisdb::engine::{ImportStats, QueryResult, WorldBounds};
use gisdb::store::Record;

use crate::script::ScriptError;

/// Width of the separator line between commands.
const SEPARATOR_WIDTH: usize = 80;

/// Text shown for a coordinate that is missing or unparsable.
pub const COORDINATE_NOT_GIVEN: &str = "Coordinate is not given";

/// Format DMS text for display, e.g. `382712N` → `38d 27m 12s North`.
pub fn display_coordinate(text: &str) -> String {
    match coord::parse_dms(text) {
        Ok(dms) => dms.to_string(),
        Err(_) => COORDINATE_NOT_GIVEN.to_string(),
    }
}

fn timestamp() -> String {
    Local::now().format("%a %b %d %H:%M:%S %Z %Y").to_string()
}

/// Writer for the command log.
pub struct Report<W: Write> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Program banner with the session's file names and start time.
    pub fn banner(&mut self, db_file: &Path, script_file: &Path, log_file: &Path) -> io::Result<()> {
        writeln!(self.out, "GIS Program")?;
        writeln!(self.out)?;
        writeln!(self.out, "dbFile:     {}", db_file.display())?;
        writeln!(self.out, "script:     {}", script_file.display())?;
        writeln!(self.out, "log:        {}", log_file.display())?;
        writeln!(self.out, "Start time: {}", timestamp())?;
        writeln!(self.out, "Quadtree children are printed in the order SW  SE  NE  NW")?;
        self.separator()?;
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Latitude/longitude values in index entries are shown as signed integers, in total seconds."
        )?;
        writeln!(self.out)
    }

    pub fn separator(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "-".repeat(SEPARATOR_WIDTH))
    }

    /// Header line introducing a command.
    pub fn command(&mut self, number: usize, text: &str) -> io::Result<()> {
        writeln!(self.out, "Command {}: {}", number, text)?;
        writeln!(self.out)
    }

    pub fn world(&mut self, bounds: &WorldBounds) -> io::Result<()> {
        writeln!(self.out, "World boundaries are set to:")?;
        writeln!(self.out, "\t\t\t{}", bounds.north)?;
        writeln!(self.out, "\t{}\t\t\t\t{}", bounds.west, bounds.east)?;
        writeln!(self.out, "\t\t\t{}", bounds.south)
    }

    pub fn import(&mut self, stats: &ImportStats) -> io::Result<()> {
        writeln!(self.out, "Imported Features by name: {}", stats.name_entries)?;
        writeln!(self.out, "Imported Locations:\t   {}", stats.locations)?;
        writeln!(self.out, "Average name length:\t   {}", stats.average_name_length)?;
        if stats.out_of_bounds > 0 {
            writeln!(self.out, "Records outside world:\t   {}", stats.out_of_bounds)?;
        }
        Ok(())
    }

    pub fn what_is(&mut self, name: &str, region: &str, results: &QueryResult) -> io::Result<()> {
        if results.is_empty() {
            return writeln!(self.out, "No records match {} and {}", name, region);
        }
        for (offset, line) in results {
            match Record::parse(line) {
                Ok(record) => writeln!(
                    self.out,
                    "\t{}:  {}  ({}, {})",
                    offset,
                    record.county(),
                    display_coordinate(record.longitude()),
                    display_coordinate(record.latitude())
                )?,
                Err(_) => writeln!(self.out, "\t{}:  {}", offset, line)?,
            }
        }
        Ok(())
    }

    pub fn what_is_at(
        &mut self,
        latitude: &str,
        longitude: &str,
        results: &QueryResult,
    ) -> io::Result<()> {
        let location = format!(
            "({}, {})",
            display_coordinate(longitude),
            display_coordinate(latitude)
        );
        if results.is_empty() {
            return writeln!(self.out, "\tNothing was found at {}", location);
        }

        writeln!(self.out, "\tThe following feature(s) were found at {}:", location)?;
        for (offset, line) in results {
            match Record::parse(line) {
                Ok(record) => writeln!(
                    self.out,
                    "\t {}:  {}  {}  {}",
                    offset,
                    record.name(),
                    record.county(),
                    record.region()
                )?,
                Err(_) => writeln!(self.out, "\t {}:  {}", offset, line)?,
            }
        }
        Ok(())
    }

    pub fn what_is_in(
        &mut self,
        latitude: &str,
        longitude: &str,
        half_height: i64,
        half_width: i64,
        results: &QueryResult,
    ) -> io::Result<()> {
        let area = format!(
            "({} +/- {}, {} +/- {})",
            display_coordinate(longitude),
            half_width,
            display_coordinate(latitude),
            half_height
        );
        if results.is_empty() {
            return writeln!(self.out, "\tNothing was found in {}", area);
        }

        writeln!(
            self.out,
            "\tThe following {} feature(s) were found in {}",
            results.len(),
            area
        )?;
        for (offset, line) in results {
            match Record::parse(line) {
                Ok(record) => writeln!(
                    self.out,
                    "\t {}:  {}  {}  ({}, {})",
                    offset,
                    record.name(),
                    record.region(),
                    display_coordinate(record.longitude()),
                    display_coordinate(record.latitude())
                )?,
                Err(_) => writeln!(self.out, "\t {}:  {}", offset, line)?,
            }
        }
        Ok(())
    }

    /// Verbatim dump of an index structure.
    pub fn dump(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// A command that failed while running.
    pub fn failure(&mut self, error: &dyn std::error::Error) -> io::Result<()> {
        writeln!(self.out, "\tCommand failed: {}", error)
    }

    /// A script line that could not be parsed.
    pub fn script_error(&mut self, text: &str, error: &ScriptError) -> io::Result<()> {
        writeln!(self.out, "Skipped: {}", text)?;
        writeln!(self.out, "\t{}", error)?;
        self.separator()
    }

    pub fn quit(&mut self) -> io::Result<()> {
        writeln!(self.out, "Terminating execution of commands.")?;
        writeln!(self.out, "End time: {}", timestamp())
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
