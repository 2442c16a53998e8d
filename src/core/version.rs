//! RPM version ordering
//!
//! Versions and releases are compared as sequences of maximal numeric or
//! alphabetic runs. ASCII punctuation only separates runs. Anything outside
//! ASCII counts as an alphabetic run member, so odd input never panics.
//!
//! - numeric runs compare as integers (leading zeros ignored)
//! - alphabetic runs compare byte-wise
//! - a numeric run is newer than an alphabetic one
//! - `~` sorts before everything, `^` after the base but before any further run
//! - when one side runs out first, the other side is newer

use crate::core::types::Evr;
use std::cmp::Ordering;

/// Compare two EVR triples: epoch first, then version, then release.
pub fn compare_evr(a: &Evr, b: &Evr) -> Ordering {
    a.epoch
        .cmp(&b.epoch)
        .then_with(|| rpmvercmp(&a.version, &b.version))
        .then_with(|| rpmvercmp(&a.release, &b.release))
}

/// Compare a single version or release string.
pub fn rpmvercmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let mut one = a;
    let mut two = b;

    loop {
        one = one.trim_start_matches(is_separator);
        two = two.trim_start_matches(is_separator);

        let (tilde_one, tilde_two) = (one.starts_with('~'), two.starts_with('~'));
        if tilde_one || tilde_two {
            if !tilde_one {
                return Ordering::Greater;
            }
            if !tilde_two {
                return Ordering::Less;
            }
            one = &one[1..];
            two = &two[1..];
            continue;
        }

        let (caret_one, caret_two) = (one.starts_with('^'), two.starts_with('^'));
        if caret_one || caret_two {
            if one.is_empty() {
                return Ordering::Less;
            }
            if two.is_empty() {
                return Ordering::Greater;
            }
            if !caret_one {
                return Ordering::Greater;
            }
            if !caret_two {
                return Ordering::Less;
            }
            one = &one[1..];
            two = &two[1..];
            continue;
        }

        if one.is_empty() || two.is_empty() {
            break;
        }

        let numeric = one.starts_with(|c: char| c.is_ascii_digit());
        let (run_one, rest_one) = split_run(one, numeric);
        let (run_two, rest_two) = split_run(two, numeric);

        // Run types differ: numeric wins over alphabetic
        if run_two.is_empty() {
            return if numeric {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        let ord = if numeric {
            compare_numeric(run_one, run_two)
        } else {
            run_one.cmp(run_two)
        };
        if ord != Ordering::Equal {
            return ord;
        }

        one = rest_one;
        two = rest_two;
    }

    match (one.is_empty(), two.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, _) => Ordering::Greater,
    }
}

fn is_separator(c: char) -> bool {
    c.is_ascii() && !c.is_ascii_alphanumeric() && c != '~' && c != '^'
}

fn is_alpha_member(c: char) -> bool {
    c.is_ascii_alphabetic() || !c.is_ascii()
}

fn split_run(s: &str, numeric: bool) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|&(_, c)| {
            if numeric {
                !c.is_ascii_digit()
            } else {
                !is_alpha_member(c)
            }
        })
        .map(|(idx, _)| idx)
        .unwrap_or(s.len());
    s.split_at(end)
}

fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests;
