//! Path collection: positional arguments, or newline-delimited stdin.

use std::io::{self, BufRead};
use std::path::PathBuf;

/// Collect the list of paths to order.
///
/// Positional arguments win: when `args` is non-empty it is returned
/// verbatim, in the order given, and the reader is never touched. Otherwise
/// paths are read one per line from `reader`.
///
/// Only entirely blank lines are skipped. A line of whitespace is a legal
/// (if unusual) filename and is kept as-is; this is deliberately not a
/// trim-based filter.
///
/// No existence checks happen here; a path that can't be opened is the
/// resolver's error to report.
pub fn collect_paths<R: BufRead>(args: Vec<PathBuf>, reader: R) -> io::Result<Vec<PathBuf>> {
    if !args.is_empty() {
        return Ok(args);
    }

    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        paths.push(PathBuf::from(line));
    }
    Ok(paths)
}
