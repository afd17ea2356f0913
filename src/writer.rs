use std::fs::File;
use std::io;
use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;

use crate::error::Gpx2CsvError;
use crate::options::CsvOptions;
use crate::waypoint::Waypoint;

type Result<T> = std::result::Result<T, Gpx2CsvError>;

/// CSV header; the column order is fixed for compatibility with existing
/// consumers of the output.
pub const HEADER: [&str; 6] = ["name", "lat", "lon", "ele", "desc", "time"];

/// One output row, borrowing from a [`Waypoint`] in [`HEADER`] order.
#[derive(Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    lat: &'a str,
    lon: &'a str,
    ele: &'a str,
    desc: &'a str,
    time: &'a str,
}

impl<'a> From<&'a Waypoint> for CsvRow<'a> {
    fn from(wpt: &'a Waypoint) -> Self {
        Self {
            name: &wpt.name,
            lat: &wpt.latitude,
            lon: &wpt.longitude,
            ele: &wpt.elevation,
            desc: &wpt.description,
            time: &wpt.timestamp,
        }
    }
}

/// Write the header and one row per waypoint to `sink`.
///
/// Fields containing a comma, a double quote or a line break are quoted, with
/// inner quotes doubled. The header is written even if there are no
/// waypoints.
pub fn write_csv(waypoints: &[Waypoint], sink: impl io::Write, opts: &CsvOptions) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(opts.line_ending.terminator())
        .from_writer(sink);

    writer.write_record(HEADER)?;
    for wpt in waypoints {
        writer.serialize(CsvRow::from(wpt))?;
    }
    writer.flush().map_err(csv::Error::from)?;

    Ok(())
}

/// Create (or truncate) the file at `path` and write the waypoints to it.
/// The file is closed before returning, on success and on error.
pub fn write_csv_file(waypoints: &[Waypoint], path: &Path, opts: &CsvOptions) -> Result<()> {
    let file = File::create(path).map_err(|source| Gpx2CsvError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(waypoints, file, opts)
}

/// Render the waypoints as a CSV string.
pub fn to_csv_string(waypoints: &[Waypoint], opts: &CsvOptions) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(waypoints, &mut buf, opts)?;
    String::from_utf8(buf).map_err(|e| Gpx2CsvError::Utf8(e.utf8_error()))
}
