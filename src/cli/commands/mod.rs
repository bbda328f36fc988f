pub mod backup;
pub mod config;
pub mod db;
pub mod del;
pub mod entry;
pub mod exit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod site;
pub mod worker;

use crate::cli::parser::FilterArgs;
use crate::config::Config;
use crate::core::OperatorContext;
use crate::core::filter::ShiftFilter;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date::{local_datetime, parse_optional_date, today};
use crate::utils::time::parse_optional_time;
use chrono::{DateTime, Local, Timelike};

/// Open the configured database with its schema up to date.
pub(crate) fn open_db(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

pub(crate) fn operator(cfg: &Config) -> OperatorContext {
    OperatorContext::new(&cfg.operator, cfg.code_attempts)
}

/// `--date`/`--time` into a local instant; missing parts default to now.
pub(crate) fn timestamp_from(
    date: Option<&String>,
    time: Option<&String>,
) -> AppResult<DateTime<Local>> {
    let now = Local::now();
    let d = parse_optional_date(date)?.unwrap_or_else(today);
    let t = match parse_optional_time(time)? {
        Some(t) => t,
        None => now
            .time()
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .ok_or_else(|| AppError::InvalidTime(now.format("%H:%M").to_string()))?,
    };
    local_datetime(d, t)
}

pub(crate) fn filter_from(args: &FilterArgs) -> AppResult<ShiftFilter> {
    let clean = |v: &Option<String>| {
        v.as_ref()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    Ok(ShiftFilter {
        site_id: clean(&args.site),
        sector_id: clean(&args.sector),
        worker_id: clean(&args.worker),
        date_from: parse_optional_date(args.from.as_ref())?,
        date_to: parse_optional_date(args.to.as_ref())?,
    })
}

/// First character of the configured separator, `-` when empty.
pub(crate) fn separator(cfg: &Config) -> char {
    cfg.separator_char.chars().next().unwrap_or('-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    #[test]
    fn explicit_date_and_time() {
        let (date, time) = ("2024-03-10".to_string(), "07:30".to_string());
        let ts = timestamp_from(Some(&date), Some(&time)).unwrap();
        assert_eq!(ts.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(ts.format("%H:%M").to_string(), "07:30");
    }

    #[test]
    fn missing_date_is_today_and_bad_time_is_rejected() {
        let ts = timestamp_from(None, Some(&"12:00".to_string())).unwrap();
        assert_eq!(ts.date_naive().year(), today().year());
        assert!(matches!(
            timestamp_from(None, Some(&"25:00".to_string())),
            Err(AppError::InvalidTime(_))
        ));
    }

    #[test]
    fn blank_filter_values_are_ignored() {
        let args = FilterArgs {
            site: Some("  ".into()),
            worker: Some("W1".into()),
            from: Some("2024-01-01".into()),
            ..Default::default()
        };
        let f = filter_from(&args).unwrap();
        assert_eq!(f.site_id, None);
        assert_eq!(f.worker_id.as_deref(), Some("W1"));
        assert_eq!(f.date_from, NaiveDate::from_ymd_opt(2024, 1, 1));
    }
}
