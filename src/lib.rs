//! Convert the waypoints of a [GPX](https://www.topografix.com/gpx.asp) 1.1
//! document to CSV.
//!
//! Every `<wpt>` becomes one row with the columns
//! `name,lat,lon,ele,desc,time`. Values are copied verbatim; missing
//! children become empty fields.
//!
//! ```
//! let gpx = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <gpx xmlns="http://www.topografix.com/GPX/1/1" version="1.1">
//!     <wpt lat="45.0" lon="-122.0"><name>Summit</name></wpt>
//! </gpx>"#;
//! let opts = gpx2csv::CsvOptions { line_ending: gpx2csv::LineEnding::Lf };
//!
//! let csv = gpx2csv::convert_str(gpx, &opts).unwrap();
//! assert_eq!(csv, "name,lat,lon,ele,desc,time\nSummit,45.0,-122.0,,,\n");
//! ```

pub mod app;
pub mod confirm;
pub mod error;
pub mod options;
pub mod parser;
pub mod waypoint;
pub mod writer;

use wasm_bindgen::prelude::*;

pub use crate::error::{Gpx2CsvError, RunError};
pub use crate::options::{CsvOptions, LineEnding};
pub use crate::waypoint::Waypoint;

/// Convert a GPX document to a CSV string.
pub fn convert_str(gpx: &str, opts: &CsvOptions) -> Result<String, Gpx2CsvError> {
    let waypoints = parser::parse_gpx(gpx)?;
    writer::to_csv_string(&waypoints, opts)
}

/// Convert GPX string to CSV, returned as a string.
#[wasm_bindgen(js_name = gpxToCsv)]
pub fn gpx_to_csv(gpx_string: &str, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    Ok(convert_str(gpx_string, &opts)?)
}

/// Parse GPX string, returning its waypoints as an array of JS objects.
#[wasm_bindgen(js_name = gpxToWaypoints)]
pub fn gpx_to_waypoints(gpx_string: &str) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let waypoints = parser::parse_gpx(gpx_string)?;
    serde_wasm_bindgen::to_value(&waypoints).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_options(options: JsValue) -> Result<CsvOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(CsvOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
