//! Detection of an existing, shared numeric field in a batch of filenames

use crate::types::PrefixVerdict;
use std::ops::Range;

/// How one character position looks across the batch
enum Column {
    /// Every name has a digit here
    Digits,
    /// Every name has the same non-digit character here
    Shared,
    /// Names disagree
    Mismatch,
}

/// Decide whether a batch of names is already consistently numbered
pub fn detect_prefix<S: AsRef<str>>(names: &[S]) -> PrefixVerdict {
    if shared_numeric_field(names).is_some() {
        PrefixVerdict::AlreadyNumbered
    } else {
        PrefixVerdict::NeedsNumbering
    }
}

/// Find the digit run that follows a common literal prefix in every name
///
/// Positions are scanned left to right. While every name agrees on a literal
/// character the scan continues; the first position where every name holds a
/// digit starts the run, which extends while all names keep a digit. Returns
/// the run as a range of character indices, or `None` when names diverge
/// before any digit column or the batch is empty.
///
/// Names too short to reach a position are ignored when that position is
/// classified, but a short name ends a digit run that is already open.
pub fn shared_numeric_field<S: AsRef<str>>(names: &[S]) -> Option<Range<usize>> {
    let names: Vec<Vec<char>> = names.iter().map(|n| n.as_ref().chars().collect()).collect();
    let longest = names.iter().map(Vec::len).max()?;

    let mut run_start = None;
    for i in 0..longest {
        match run_start {
            None => match classify(&names, i) {
                Column::Digits => run_start = Some(i),
                Column::Shared => {}
                Column::Mismatch => return None,
            },
            Some(start) => {
                let all_digits = names
                    .iter()
                    .all(|name| name.get(i).is_some_and(|c| c.is_numeric()));
                if !all_digits {
                    return Some(start..i);
                }
            }
        }
    }

    run_start.map(|start| start..longest)
}

fn classify(names: &[Vec<char>], i: usize) -> Column {
    let mut present = names.iter().filter_map(|name| name.get(i).copied());
    let Some(first) = present.next() else {
        return Column::Mismatch;
    };

    if first.is_numeric() {
        if present.all(char::is_numeric) {
            Column::Digits
        } else {
            Column::Mismatch
        }
    } else if present.all(|c| c == first) {
        Column::Shared
    } else {
        Column::Mismatch
    }
}
