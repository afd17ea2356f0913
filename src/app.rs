//! A single command-line conversion run: checks, confirmation, parse, write.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::confirm::Confirm;
use crate::error::RunError;
use crate::options::CsvOptions;
use crate::parser::read_gpx_file;
use crate::writer::write_csv_file;

/// Arguments of a run. Paths are optional so that a missing one can be
/// reported as a usage error by [`run`].
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub options: CsvOptions,
}

/// How a run ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The CSV file was written.
    Converted { waypoints: usize },
    /// The output existed and the operator chose to keep it.
    Declined,
}

/// Convert `args.input` to `args.output`.
///
/// Nothing is written unless both paths are given, the input exists, and
/// `confirm` allows overwriting an existing output. The output is only
/// created once the input has been parsed successfully.
pub fn run(args: &RunArgs, confirm: &mut dyn Confirm) -> Result<Outcome, RunError> {
    let (Some(input), Some(output)) = (&args.input, &args.output) else {
        return Err(RunError::Usage);
    };

    if !input.is_file() {
        return Err(RunError::InputNotFound(input.clone()));
    }

    if output.exists() {
        let question = format!("'{}' exists. Overwrite it?", output.display());
        if !confirm.ask(&question, true).map_err(RunError::Confirm)? {
            debug!(output = %output.display(), "keeping existing output");
            return Ok(Outcome::Declined);
        }
    }

    info!("Converting GPX file {} to a CSV file...", input.display());
    let waypoints = read_gpx_file(input)?;
    debug!(count = waypoints.len(), "parsed waypoints");

    write_csv_file(&waypoints, output, &args.options)?;
    info!(count = waypoints.len(), "Wrote {}", output.display());

    Ok(Outcome::Converted {
        waypoints: waypoints.len(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io;

    use super::*;
    use crate::confirm::AssumeYes;

    /// Records the questions asked and gives a fixed answer.
    struct Scripted {
        answer: bool,
        asked: Vec<String>,
    }

    impl Confirm for Scripted {
        fn ask(&mut self, question: &str, _default: bool) -> io::Result<bool> {
            self.asked.push(question.to_string());
            Ok(self.answer)
        }
    }

    const GPX: &str = r#"<?xml version="1.0"?>
<gpx xmlns="http://www.topografix.com/GPX/1/1" version="1.1">
  <wpt lat="45.0" lon="-122.0"><name>Summit</name></wpt>
</gpx>"#;

    fn args(input: Option<PathBuf>, output: Option<PathBuf>) -> RunArgs {
        RunArgs {
            input,
            output,
            options: CsvOptions {
                line_ending: crate::options::LineEnding::Lf,
            },
        }
    }

    #[test]
    fn test_missing_paths_are_usage_errors() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.gpx");
        fs::write(&input, GPX).unwrap();
        let output = dir.path().join("out.csv");

        let err = run(&args(Some(input), None), &mut AssumeYes).unwrap_err();
        assert!(matches!(err, RunError::Usage));
        let err = run(&args(None, Some(output.clone())), &mut AssumeYes).unwrap_err();
        assert!(matches!(err, RunError::Usage));
        assert!(!output.exists());
    }

    #[test]
    fn test_input_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");
        let err = run(
            &args(Some(dir.path().join("nope.gpx")), Some(output.clone())),
            &mut AssumeYes,
        )
        .unwrap_err();
        assert!(matches!(err, RunError::InputNotFound(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_converts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.gpx");
        let output = dir.path().join("out.csv");
        fs::write(&input, GPX).unwrap();

        let mut confirm = Scripted {
            answer: false,
            asked: Vec::new(),
        };
        let outcome = run(&args(Some(input), Some(output.clone())), &mut confirm).unwrap();
        assert_eq!(outcome, Outcome::Converted { waypoints: 1 });
        assert!(confirm.asked.is_empty());
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "name,lat,lon,ele,desc,time\nSummit,45.0,-122.0,,,\n"
        );
    }

    #[test]
    fn test_declined_overwrite_keeps_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.gpx");
        let output = dir.path().join("out.csv");
        fs::write(&input, GPX).unwrap();
        fs::write(&output, "keep me").unwrap();

        let mut confirm = Scripted {
            answer: false,
            asked: Vec::new(),
        };
        let outcome = run(&args(Some(input), Some(output.clone())), &mut confirm).unwrap();
        assert_eq!(outcome, Outcome::Declined);
        assert_eq!(confirm.asked.len(), 1);
        assert!(confirm.asked[0].ends_with("exists. Overwrite it?"));
        assert_eq!(fs::read_to_string(&output).unwrap(), "keep me");
    }

    #[test]
    fn test_accepted_overwrite_replaces_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.gpx");
        let output = dir.path().join("out.csv");
        fs::write(&input, GPX).unwrap();
        fs::write(&output, "old contents that are longer than the new ones ...").unwrap();

        let mut confirm = Scripted {
            answer: true,
            asked: Vec::new(),
        };
        run(&args(Some(input), Some(output.clone())), &mut confirm).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "name,lat,lon,ele,desc,time\nSummit,45.0,-122.0,,,\n"
        );
    }

    #[test]
    fn test_malformed_input_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.gpx");
        let output = dir.path().join("out.csv");
        fs::write(&input, "<gpx><wpt lat=\"1\"").unwrap();

        let err = run(&args(Some(input), Some(output.clone())), &mut AssumeYes).unwrap_err();
        assert!(matches!(err, RunError::Convert(ref e) if e.is_malformed_input()));
        assert!(!output.exists());
    }
}
