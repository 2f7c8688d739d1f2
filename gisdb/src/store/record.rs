//! Pipe-delimited feature records.

use crate::coord;

/// Header line written at the top of every record store.
pub const HEADER: &str = "FEATURE_ID|FEATURE_NAME|FEATURE_CLASS|STATE_ALPHA|STATE_NUMERIC|COUNTY_NAME|COUNTY_NUMERIC|PRIMARY_LAT_DMS|PRIM_LONG_DMS|PRIM_LAT_DEC|PRIM_LONG_DEC|SOURCE_LAT_DMS|SOURCE_LONG_DMS|SOURCE_LAT_DEC|SOURCE_LONG_DEC|ELEV_IN_M|ELEV_IN_FT|MAP_NAME|DATE_CREATED|DATE_EDITED";

/// Number of columns in a complete record.
pub const FIELD_COUNT: usize = 20;

/// Field delimiter.
pub const DELIMITER: char = '|';

// Field positions.
const FEATURE_ID: usize = 0;
const FEATURE_NAME: usize = 1;
const FEATURE_CLASS: usize = 2;
const STATE_ALPHA: usize = 3;
const COUNTY_NAME: usize = 5;
const PRIMARY_LAT_DMS: usize = 7;
const PRIM_LONG_DMS: usize = 8;
const ELEV_IN_M: usize = 15;
const ELEV_IN_FT: usize = 16;

/// Error type for record parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("record has {found} fields, field {index} ({name}) is missing")]
    MissingField {
        index: usize,
        name: &'static str,
        found: usize,
    },
}

/// One feature record.
///
/// Only the fields up to the longitude are required; records with fewer than
/// [`FIELD_COUNT`] columns are accepted and their trailing fields read as
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    line: String,
    fields: Vec<String>,
}

impl Record {
    /// Parse one line of a record file.
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let fields: Vec<String> = line.split(DELIMITER).map(str::to_string).collect();

        if fields.len() <= PRIM_LONG_DMS {
            let (index, name) = if fields.len() <= PRIMARY_LAT_DMS {
                (PRIMARY_LAT_DMS, "PRIMARY_LAT_DMS")
            } else {
                (PRIM_LONG_DMS, "PRIM_LONG_DMS")
            };
            return Err(RecordError::MissingField {
                index,
                name,
                found: fields.len(),
            });
        }

        Ok(Self {
            line: line.to_string(),
            fields,
        })
    }

    /// The record exactly as it appears in the file, without terminator.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Field at `index`, or an empty string past the end of the record.
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn feature_id(&self) -> &str {
        self.field(FEATURE_ID)
    }

    pub fn name(&self) -> &str {
        self.field(FEATURE_NAME)
    }

    pub fn class(&self) -> &str {
        self.field(FEATURE_CLASS)
    }

    /// Two-letter state code.
    pub fn region(&self) -> &str {
        self.field(STATE_ALPHA)
    }

    pub fn county(&self) -> &str {
        self.field(COUNTY_NAME)
    }

    /// Primary latitude as DMS text.
    pub fn latitude(&self) -> &str {
        self.field(PRIMARY_LAT_DMS)
    }

    /// Primary longitude as DMS text.
    pub fn longitude(&self) -> &str {
        self.field(PRIM_LONG_DMS)
    }

    pub fn elevation_m(&self) -> Option<&str> {
        non_empty(self.field(ELEV_IN_M))
    }

    pub fn elevation_ft(&self) -> Option<&str> {
        non_empty(self.field(ELEV_IN_FT))
    }

    /// Spatial index coordinate `(x, y)`: longitude and latitude in
    /// arc-seconds.
    pub fn location(&self) -> (i64, i64) {
        (
            coord::to_arc_seconds(self.longitude()),
            coord::to_arc_seconds(self.latitude()),
        )
    }
}

fn non_empty(field: &str) -> Option<&str> {
    let field = field.trim();
    (!field.is_empty()).then_some(field)
}
