use crate::errors::{AppError, AppResult};
use crate::models::punch::Punch;
use crate::store::PunchStore;

/// Shortest id prefix accepted in place of a full punch id.
pub const MIN_ID_PREFIX: usize = 4;

pub struct DeleteLogic;

/// Find a punch by full id, or by a unique id prefix of at least
/// [`MIN_ID_PREFIX`] characters.
pub fn resolve_punch<'a>(punches: &'a [Punch], token: &str) -> AppResult<&'a Punch> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::Validation("missing punch id".into()));
    }

    if let Some(p) = punches.iter().find(|p| p.id == token) {
        return Ok(p);
    }

    if token.len() >= MIN_ID_PREFIX {
        let mut hits = punches.iter().filter(|p| p.id.starts_with(token));
        if let Some(first) = hits.next() {
            if hits.next().is_some() {
                return Err(AppError::Validation(format!(
                    "punch id prefix '{}' is ambiguous",
                    token
                )));
            }
            return Ok(first);
        }
    }

    Err(AppError::NotFound(format!("punch '{}'", token)))
}

impl DeleteLogic {
    /// Delete a shift starting from one of its punches.
    ///
    /// An ENTRY takes every EXIT referencing it along. An EXIT is removed on
    /// its own and its entry keeps the CLOSED status.
    ///
    /// Returns the removed punches, entry first.
    pub fn apply<S: PunchStore + ?Sized>(store: &mut S, punch_id: &str) -> AppResult<Vec<Punch>> {
        let punches = store.list_punches()?;
        let target = resolve_punch(&punches, punch_id)?;

        let mut removed = vec![target.clone()];
        if target.is_entry() {
            removed.extend(punches.iter().filter(|p| p.closes(&target.id)).cloned());
        }

        let ids: Vec<String> = removed.iter().map(|p| p.id.clone()).collect();
        store.delete_cascade(&ids)?;

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{entry_at, exit_for};
    use crate::core::pairing::pair_shifts;
    use crate::models::punch_kind::PunchStatus;
    use crate::models::shift::ShiftStatus;
    use crate::store::MemoryStore;

    fn closed_pair() -> (Punch, Punch) {
        let mut e = entry_at("e1-aaaa", "123456", "W1", "2024-01-01T08:00");
        let x = exit_for("x1-bbbb", &e, "2024-01-01T16:00");
        e.status = PunchStatus::Closed;
        (e, x)
    }

    #[test]
    fn deleting_entry_cascades_to_exit() {
        let (e, x) = closed_pair();
        let other = entry_at("e2-cccc", "654321", "W2", "2024-01-02T08:00");
        let mut store = MemoryStore::with_punches(vec![e, x, other]);

        let removed = DeleteLogic::apply(&mut store, "e1-aaaa").unwrap();

        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0].id, "e1-aaaa");
        let left: Vec<String> = store.list_punches().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(left, vec!["e2-cccc".to_string()]);
    }

    #[test]
    fn deleting_exit_leaves_entry_closed() {
        let (e, x) = closed_pair();
        let mut store = MemoryStore::with_punches(vec![e, x]);

        let removed = DeleteLogic::apply(&mut store, "x1-bbbb").unwrap();
        assert_eq!(removed.len(), 1);

        let left = store.list_punches().unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].status, PunchStatus::Closed);

        // the view still derives OPEN from the missing back-reference
        let rows = pair_shifts(&left);
        assert_eq!(rows[0].status(), ShiftStatus::Open);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut store = MemoryStore::new();
        let err = DeleteLogic::apply(&mut store, "nope").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn unique_prefix_resolves_and_ambiguous_prefix_fails() {
        let a = entry_at("abcd-1", "111111", "W1", "2024-01-01T08:00");
        let b = entry_at("abcd-2", "222222", "W1", "2024-01-02T08:00");
        let all = vec![a, b];

        assert_eq!(resolve_punch(&all, "abcd-2").unwrap().id, "abcd-2");
        assert!(matches!(
            resolve_punch(&all, "abcd"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(resolve_punch(&all, "abc"), Err(AppError::NotFound(_))));
    }
}
