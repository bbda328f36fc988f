//! Punch filtering by site, sector, worker and calendar-date range.

use crate::models::punch::Punch;
use chrono::NaiveDate;

/// Filter criteria. Every unset field matches everything; set fields are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftFilter {
    pub site_id: Option<String>,
    pub sector_id: Option<String>,
    pub worker_id: Option<String>,
    /// Inclusive lower bound on the punch's local calendar date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the punch's local calendar date.
    pub date_to: Option<NaiveDate>,
}

impl ShiftFilter {
    pub fn matches(&self, punch: &Punch) -> bool {
        if let Some(site) = &self.site_id
            && punch.site_id != *site
        {
            return false;
        }
        if let Some(sector) = &self.sector_id
            && punch.sector_id != *sector
        {
            return false;
        }
        if let Some(worker) = &self.worker_id
            && punch.worker_id != *worker
        {
            return false;
        }

        let date = punch.date();
        if let Some(from) = self.date_from
            && date < from
        {
            return false;
        }
        if let Some(to) = self.date_to
            && date > to
        {
            return false;
        }

        true
    }

    pub fn is_empty(&self) -> bool {
        *self == ShiftFilter::default()
    }

    /// Keep the punches matching every criterion.
    pub fn apply(&self, punches: &[Punch]) -> Vec<Punch> {
        punches.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}
