//! Shift pairing: turns an unordered punch set into ordered shift rows.
//!
//! An exit is paired with an entry only through its `related_id`. Codes are
//! never used for matching: the same code can legitimately come back in a later,
//! unrelated cycle.

use crate::models::punch::Punch;
use crate::models::shift::Shift;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Pair entries with the exits that reference them.
///
/// One row per entry (CLOSED when an exit references it, OPEN otherwise) plus
/// one CLOSED_NO_ENTRY row per exit left unpaired. Rows are sorted newest
/// first by entry time (exit time for orphans); ties fall back to ids, so the
/// result depends only on the input set and never on its order.
pub fn pair_shifts(punches: &[Punch]) -> Vec<Shift> {
    let (entries, exits): (Vec<&Punch>, Vec<&Punch>) =
        punches.iter().partition(|p| p.is_entry());

    // exit indexes grouped by referenced entry, earliest exit first
    let mut by_entry: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, x) in exits.iter().enumerate() {
        if let Some(rel) = x.related_id.as_deref() {
            by_entry.entry(rel).or_default().push(idx);
        }
    }
    for candidates in by_entry.values_mut() {
        candidates.sort_by(|&a, &b| chronological(exits[a], exits[b]));
    }

    let mut consumed = vec![false; exits.len()];
    let mut rows = Vec::with_capacity(punches.len());

    for entry in entries {
        let matched = by_entry
            .get(entry.id.as_str())
            .and_then(|candidates| candidates.iter().copied().find(|&i| !consumed[i]));

        if let Some(i) = matched {
            consumed[i] = true;
        }

        rows.push(Shift::from_entry(
            entry.clone(),
            matched.map(|i| exits[i].clone()),
        ));
    }

    // orphans: entry deleted, or outside the current filter window
    for (idx, exit) in exits.iter().enumerate() {
        if !consumed[idx] {
            rows.push(Shift::orphan((*exit).clone()));
        }
    }

    rows.sort_by(newest_first);
    rows
}

fn chronological(a: &Punch, b: &Punch) -> Ordering {
    a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id))
}

fn newest_first(a: &Shift, b: &Shift) -> Ordering {
    b.anchor()
        .cmp(&a.anchor())
        .then_with(|| a.row_id().cmp(b.row_id()))
        .then_with(|| {
            let ax = a.exit().map(|x| x.id.as_str());
            let bx = b.exit().map(|x| x.id.as_str());
            ax.cmp(&bx)
        })
}
