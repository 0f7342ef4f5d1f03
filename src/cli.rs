use std::path::PathBuf;

use anyhow::{Result, bail};
use microcar_compare::BatchRequest;

pub const USAGE: &str = "\
Usage:
  microcar-compare [--report] <manifest.json>
  microcar-compare [--report] --expected <exp.csv>... --actual <act.csv>...
  microcar-compare                 (open the viewer empty)";

/// What the binary was asked to do.
#[derive(Debug, PartialEq)]
pub enum Invocation {
    /// Open the viewer, optionally with a batch to run first.
    View(Option<BatchRequest>),
    /// Print the batch results as JSON and exit.
    Report(BatchRequest),
    Help,
}

#[derive(Clone, Copy)]
enum List {
    None,
    Expected,
    Actual,
}

/// Parse the arguments after the program name.
pub fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut report = false;
    let mut manifest: Option<PathBuf> = None;
    let mut expected: Vec<String> = Vec::new();
    let mut actual: Vec<String> = Vec::new();
    let mut current = List::None;
    let mut lists_given = false;

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Invocation::Help),
            "--report" => report = true,
            "--expected" => {
                current = List::Expected;
                lists_given = true;
            }
            "--actual" => {
                current = List::Actual;
                lists_given = true;
            }
            flag if flag.starts_with("--") => bail!("unknown option `{flag}`"),
            value => match current {
                List::Expected => expected.push(value.to_string()),
                List::Actual => actual.push(value.to_string()),
                List::None if manifest.is_none() => manifest = Some(PathBuf::from(value)),
                List::None => bail!("unexpected argument `{value}`"),
            },
        }
    }

    let request = match (manifest, lists_given) {
        (Some(_), true) => bail!("give either a manifest or --expected/--actual lists, not both"),
        (Some(path), false) => Some(BatchRequest::from_manifest(&path)?),
        (None, true) => Some(BatchRequest::new(expected, actual)?),
        (None, false) => None,
    };

    match (report, request) {
        (true, Some(request)) => Ok(Invocation::Report(request)),
        (true, None) => bail!("--report needs a manifest or file lists"),
        (false, request) => Ok(Invocation::View(request)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use microcar_compare::{BatchError, Role};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_opens_empty_viewer() {
        assert_eq!(parse_args(&[]).unwrap(), Invocation::View(None));
    }

    #[test]
    fn file_lists_build_a_request() {
        let inv = parse_args(&args(&[
            "--report", "--expected", "e1.csv", "e2.csv", "--actual", "a1.csv", "a2.csv",
        ]))
        .unwrap();
        let expected = BatchRequest::new(["e1.csv", "e2.csv"], ["a1.csv", "a2.csv"]).unwrap();
        assert_eq!(inv, Invocation::Report(expected));
    }

    #[test]
    fn empty_actual_list_is_a_shape_error() {
        let err = parse_args(&args(&["--expected", "e1.csv", "--actual"])).unwrap_err();
        let shape = err.downcast_ref::<BatchError>().unwrap();
        assert_eq!(shape.role(), Some(Role::Actual));
    }

    #[test]
    fn report_without_input_is_rejected() {
        assert!(parse_args(&args(&["--report"])).is_err());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(parse_args(&args(&["--plot"])).is_err());
    }

    #[test]
    fn help_wins() {
        assert_eq!(parse_args(&args(&["x.json", "--help"])).unwrap(), Invocation::Help);
    }
}
