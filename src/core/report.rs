use crate::core::filter::ShiftFilter;
use crate::core::pairing::pair_shifts;
use crate::errors::AppResult;
use crate::models::punch::Punch;
use crate::models::shift::{Shift, ShiftStatus};
use crate::store::PunchStore;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShiftTotals {
    pub open: usize,
    pub closed: usize,
    pub orphans: usize,
    /// Sum over rows holding both an entry and an exit.
    pub worked_minutes: i64,
}

/// Filtered, paired view of the punch store.
#[derive(Debug, Default, Clone)]
pub struct ShiftReport {
    pub shifts: Vec<Shift>,
    pub totals: ShiftTotals,
}

impl ShiftReport {
    /// Snapshot read of the store, then filter and pair in memory.
    pub fn build<S: PunchStore + ?Sized>(store: &S, filter: &ShiftFilter) -> AppResult<Self> {
        let punches = store.list_punches()?;
        Ok(Self::from_punches(&punches, filter))
    }

    pub fn from_punches(punches: &[Punch], filter: &ShiftFilter) -> Self {
        let shifts = pair_shifts(&filter.apply(punches));

        let mut totals = ShiftTotals::default();
        for s in &shifts {
            match s.status() {
                ShiftStatus::Open => totals.open += 1,
                ShiftStatus::Closed => totals.closed += 1,
                ShiftStatus::ClosedNoEntry => totals.orphans += 1,
            }
            totals.worked_minutes += s.worked_minutes().unwrap_or(0);
        }

        Self { shifts, totals }
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }
}
