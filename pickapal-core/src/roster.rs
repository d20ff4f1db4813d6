//! The name roster: validated names, random picks and one saved snapshot

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::change::{RosterChange, Subscribers, SubscriptionId};
use crate::error::{Result, RosterError};
use crate::notice::Notice;

/// Names the roster can be pre-seeded with on launch
pub const SAMPLE_NAMES: [&str; 4] = ["Elisha", "Andre", "Jasmine", "Po-Chun"];

/// Shown in place of the picked name before the first pick
pub const PICK_PLACEHOLDER: &str = "Pick a name to see who wins";

/// Build the random source used for picks
///
/// A fixed seed gives repeatable draws; `None` seeds from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Case-insensitive name comparison key
///
/// Round-trips through uppercase so expanding mappings fold together:
/// "Strauß", "STRAUSS" and "STRAUẞ" share the key "strauss".
fn name_key(name: &str) -> String {
    name.to_lowercase().to_uppercase().to_lowercase()
}

/// Ordered list of names plus a saved snapshot and the state a UI renders
///
/// Every mutation bumps [`revision`](Self::revision) and notifies subscribers,
/// so a host can redraw without polling individual fields.
#[derive(Debug, Default)]
pub struct NameRoster {
    names: Vec<String>,
    saved: Vec<String>,
    picked: Option<String>,
    pending_input: String,
    remove_on_pick: bool,
    notice: Option<Notice>,
    revision: u64,
    subscribers: Subscribers,
}

/// Everything a host needs to render the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterView {
    pub names: Vec<String>,
    pub picked: Option<String>,
    /// Picked name, or the placeholder prompt before any pick
    pub picked_label: String,
    pub notice: Option<Notice>,
    pub remove_on_pick: bool,
    pub pending_input: String,
    pub saved_count: usize,
    pub revision: u64,
}

impl NameRoster {
    /// Create an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Add each name through normal validation
    ///
    /// Rejected names are returned rather than left as a pending notice,
    /// since nobody is looking at the screen yet.
    pub fn seed<I, S>(&mut self, names: I) -> Vec<RosterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rejected: Vec<RosterError> = names
            .into_iter()
            .filter_map(|name| self.add_name(name.as_ref()).err())
            .collect();

        if !rejected.is_empty() {
            self.dismiss_notice();
        }
        rejected
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn saved_names(&self) -> &[String] {
        &self.saved
    }

    pub fn picked(&self) -> Option<&str> {
        self.picked.as_deref()
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn remove_on_pick(&self) -> bool {
        self.remove_on_pick
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Incremented once per mutation, including failed validations
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether a name is on the list, ignoring case and surrounding whitespace
    pub fn contains(&self, name: &str) -> bool {
        let key = name_key(name.trim());
        self.names.iter().any(|existing| name_key(existing) == key)
    }

    /// Validate and append a name
    pub fn add_name(&mut self, input: &str) -> Result<()> {
        let name = input.trim();

        if name.is_empty() {
            return self.fail(RosterError::EmptyInput);
        }

        if self.contains(name) {
            return self.fail(RosterError::duplicate(name));
        }

        let name = name.to_string();
        self.names.push(name.clone());
        self.pending_input.clear();
        self.notice = None;
        debug!(name = %name, total = self.names.len(), "name added");

        self.emit(RosterChange::NameAdded { name });
        Ok(())
    }

    /// Add whatever is staged in the entry field
    pub fn submit_pending(&mut self) -> Result<()> {
        let input = self.pending_input.clone();
        self.add_name(&input)
    }

    /// Pick uniformly at random using the thread-local generator
    pub fn pick_random(&mut self) -> Result<String> {
        self.pick_random_with(&mut rand::thread_rng())
    }

    /// Pick uniformly at random from the current names
    ///
    /// With remove-on-pick enabled, every entry matching the pick (ignoring
    /// case) is removed, not only the one drawn.
    pub fn pick_random_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<String> {
        let picked = match self.names.choose(rng).cloned() {
            Some(name) => name,
            None => return self.fail(RosterError::EmptyRoster),
        };

        let removed = if self.remove_on_pick {
            let key = name_key(&picked);
            let before = self.names.len();
            self.names.retain(|name| name_key(name) != key);
            before - self.names.len()
        } else {
            0
        };

        self.picked = Some(picked.clone());
        self.notice = None;
        debug!(name = %picked, removed, remaining = self.names.len(), "name picked");

        self.emit(RosterChange::Picked {
            name: picked.clone(),
            removed,
        });
        Ok(picked)
    }

    /// Replace the saved snapshot with the current names
    pub fn save_snapshot(&mut self) -> Result<()> {
        if self.names.is_empty() {
            return self.fail(RosterError::SavingEmptyList);
        }

        self.saved = self.names.clone();
        self.notice = Some(Notice::saved());
        info!(count = self.saved.len(), "snapshot saved");

        self.emit(RosterChange::Saved {
            count: self.saved.len(),
        });
        Ok(())
    }

    /// Replace the current names with the saved snapshot
    pub fn load_snapshot(&mut self) -> Result<()> {
        if self.saved.is_empty() {
            return self.fail(RosterError::LoadingEmptyList);
        }

        self.names = self.saved.clone();
        self.notice = Some(Notice::loaded());
        info!(count = self.names.len(), "snapshot loaded");

        self.emit(RosterChange::Loaded {
            count: self.names.len(),
        });
        Ok(())
    }

    /// Remove every current name; the snapshot and last pick are kept
    pub fn clear(&mut self) {
        let count = self.names.len();
        self.names.clear();
        self.notice = None;
        debug!(count, "names cleared");

        self.emit(RosterChange::Cleared { count });
    }

    pub fn set_remove_on_pick(&mut self, enabled: bool) {
        self.remove_on_pick = enabled;
        self.emit(RosterChange::RemoveOnPickChanged { enabled });
    }

    /// Mirror the entry field; no validation happens until submit
    pub fn update_pending_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
        self.emit(RosterChange::PendingInputChanged {
            text: self.pending_input.clone(),
        });
    }

    /// Clear the current notice, as when an alert is acknowledged
    pub fn dismiss_notice(&mut self) {
        if self.notice.take().is_some() {
            self.emit(RosterChange::NoticeDismissed);
        }
    }

    /// Register a listener called after every mutation
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&RosterChange) + 'static,
    {
        self.subscribers.subscribe(Box::new(listener))
    }

    /// Returns false if the id was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Snapshot of render state
    pub fn view(&self) -> RosterView {
        RosterView {
            names: self.names.clone(),
            picked: self.picked.clone(),
            picked_label: self
                .picked
                .clone()
                .unwrap_or_else(|| PICK_PLACEHOLDER.to_string()),
            notice: self.notice.clone(),
            remove_on_pick: self.remove_on_pick,
            pending_input: self.pending_input.clone(),
            saved_count: self.saved.len(),
            revision: self.revision,
        }
    }

    /// Record a validation failure as the current notice
    fn fail<T>(&mut self, err: RosterError) -> Result<T> {
        debug!(error = %err, "roster operation rejected");
        let notice = err.notice();
        let code = notice.code;
        self.notice = Some(notice);
        self.emit(RosterChange::NoticeRaised { code });
        Err(err)
    }

    fn emit(&mut self, change: RosterChange) {
        self.revision += 1;
        self.subscribers.notify(&change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::{NoticeCode, NoticeKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn roster_with(names: &[&str]) -> NameRoster {
        let mut roster = NameRoster::new();
        assert!(roster.seed(names.iter()).is_empty());
        roster
    }

    #[test]
    fn test_add_trims_and_appends() {
        let mut roster = NameRoster::new();
        roster.update_pending_input("  Ana  ");
        roster.submit_pending().unwrap();

        assert_eq!(roster.names(), ["Ana"]);
        assert_eq!(roster.pending_input(), "");
        assert!(roster.notice().is_none());
    }

    #[test]
    fn test_add_empty_sets_notice_and_keeps_input() {
        let mut roster = NameRoster::new();
        roster.update_pending_input("   ");

        assert_eq!(roster.submit_pending(), Err(RosterError::EmptyInput));
        assert!(roster.is_empty());
        assert_eq!(roster.pending_input(), "   ");
        assert_eq!(roster.notice().unwrap().code, NoticeCode::EmptyInput);
    }

    #[test]
    fn test_duplicate_ignores_case() {
        let mut roster = roster_with(&["Ana"]);

        let err = roster.add_name(" ANA ").unwrap_err();
        assert_eq!(err, RosterError::duplicate("ANA"));
        assert_eq!(roster.names(), ["Ana"]);
        assert_eq!(roster.notice().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn test_duplicate_uses_full_case_folding() {
        let mut roster = roster_with(&["Strauß"]);

        assert!(matches!(
            roster.add_name("STRAUSS"),
            Err(RosterError::DuplicateName { .. })
        ));
        assert!(matches!(
            roster.add_name("STRAUẞ"),
            Err(RosterError::DuplicateName { .. })
        ));
        assert_eq!(roster.names(), ["Strauß"]);
    }

    #[test]
    fn test_removal_folds_case_like_duplicate_check() {
        let mut roster = roster_with(&["Strauß", "Elisha"]);
        roster.set_remove_on_pick(true);
        let mut rng = seeded_rng(Some(1));

        let picked = roster.pick_random_with(&mut rng).unwrap();
        assert!(!roster.contains(&picked));
        assert!(!roster.contains(&picked.to_uppercase()));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_substring_of_existing_name_is_not_duplicate() {
        let mut roster = roster_with(&["ana"]);

        roster.add_name("an").unwrap();
        assert_eq!(roster.names(), ["ana", "an"]);
    }

    #[test]
    fn test_successful_add_clears_previous_notice() {
        let mut roster = NameRoster::new();
        let _ = roster.add_name("");
        assert!(roster.notice().is_some());

        roster.add_name("Andre").unwrap();
        assert!(roster.notice().is_none());
    }

    #[test]
    fn test_pick_empty_keeps_previous_pick() {
        let mut roster = roster_with(&["Elisha"]);
        roster.set_remove_on_pick(true);
        roster.pick_random().unwrap();

        assert_eq!(roster.pick_random(), Err(RosterError::EmptyRoster));
        assert_eq!(roster.picked(), Some("Elisha"));
        assert_eq!(roster.notice().unwrap().code, NoticeCode::EmptyRoster);
    }

    #[test]
    fn test_pick_without_removal_keeps_size() {
        let mut roster = roster_with(&SAMPLE_NAMES);
        let mut rng = seeded_rng(Some(7));

        for _ in 0..20 {
            let picked = roster.pick_random_with(&mut rng).unwrap();
            assert!(SAMPLE_NAMES.contains(&picked.as_str()));
            assert_eq!(roster.len(), SAMPLE_NAMES.len());
        }
    }

    #[test]
    fn test_seeded_picks_repeat() {
        let picks = |seed| {
            let mut roster = roster_with(&SAMPLE_NAMES);
            let mut rng = seeded_rng(Some(seed));
            (0..8)
                .map(|_| roster.pick_random_with(&mut rng).unwrap())
                .collect::<Vec<_>>()
        };

        assert_eq!(picks(42), picks(42));
    }

    #[test]
    fn test_pick_with_removal_drains_roster() {
        let mut roster = roster_with(&SAMPLE_NAMES);
        roster.set_remove_on_pick(true);

        let mut picked = Vec::new();
        while !roster.is_empty() {
            picked.push(roster.pick_random().unwrap());
        }

        picked.sort();
        let mut expected: Vec<String> = SAMPLE_NAMES.iter().map(|s| s.to_string()).collect();
        expected.sort();
        assert_eq!(picked, expected);
    }

    #[test]
    fn test_save_clear_load_restores_order() {
        let mut roster = roster_with(&["A", "B"]);
        roster.save_snapshot().unwrap();
        assert_eq!(roster.notice().unwrap().code, NoticeCode::Saved);

        roster.clear();
        assert!(roster.is_empty());

        roster.load_snapshot().unwrap();
        assert_eq!(roster.names(), ["A", "B"]);
        assert_eq!(roster.notice().unwrap().code, NoticeCode::Loaded);
    }

    #[test]
    fn test_save_empty_keeps_prior_snapshot() {
        let mut roster = roster_with(&["A", "B"]);
        roster.save_snapshot().unwrap();
        roster.clear();

        assert_eq!(roster.save_snapshot(), Err(RosterError::SavingEmptyList));
        assert_eq!(roster.saved_names(), ["A", "B"]);
    }

    #[test]
    fn test_load_replaces_instead_of_merging() {
        let mut roster = roster_with(&["A"]);
        roster.save_snapshot().unwrap();
        roster.add_name("C").unwrap();

        roster.load_snapshot().unwrap();
        assert_eq!(roster.names(), ["A"]);
    }

    #[test]
    fn test_load_without_snapshot_fails() {
        let mut roster = roster_with(&["A"]);

        assert_eq!(roster.load_snapshot(), Err(RosterError::LoadingEmptyList));
        assert_eq!(roster.names(), ["A"]);
    }

    #[test]
    fn test_scenario_add_duplicate_pick_drain() {
        let mut roster = NameRoster::new();
        roster.add_name("Ana").unwrap();
        assert!(matches!(
            roster.add_name("ana"),
            Err(RosterError::DuplicateName { .. })
        ));

        roster.set_remove_on_pick(true);
        assert_eq!(roster.pick_random().unwrap(), "Ana");
        assert!(roster.is_empty());
        assert_eq!(roster.pick_random(), Err(RosterError::EmptyRoster));
    }

    #[test]
    fn test_seed_reports_rejected_names() {
        let mut roster = NameRoster::new();
        let rejected = roster.seed(["Elisha", "", "elisha", "Andre"]);

        assert_eq!(roster.names(), ["Elisha", "Andre"]);
        assert_eq!(rejected.len(), 2);
        assert!(roster.notice().is_none());
    }

    #[test]
    fn test_subscribers_see_every_mutation() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let mut roster = NameRoster::new();

        let sink = Rc::clone(&changes);
        roster.subscribe(move |change| sink.borrow_mut().push(change.clone()));

        roster.add_name("Jasmine").unwrap();
        let _ = roster.add_name("jasmine");
        roster.save_snapshot().unwrap();

        assert_eq!(
            *changes.borrow(),
            vec![
                RosterChange::NameAdded {
                    name: "Jasmine".to_string()
                },
                RosterChange::NoticeRaised {
                    code: NoticeCode::DuplicateName
                },
                RosterChange::Saved { count: 1 },
            ]
        );
        assert_eq!(roster.revision(), 3);
    }

    #[test]
    fn test_dismiss_only_notifies_when_notice_present() {
        let mut roster = NameRoster::new();
        roster.dismiss_notice();
        assert_eq!(roster.revision(), 0);

        let _ = roster.pick_random();
        roster.dismiss_notice();
        assert!(roster.notice().is_none());
        assert_eq!(roster.revision(), 2);
    }

    #[test]
    fn test_view_uses_placeholder_before_pick() {
        let mut roster = roster_with(&["Po-Chun"]);
        assert_eq!(roster.view().picked_label, PICK_PLACEHOLDER);

        roster.pick_random().unwrap();
        let view = roster.view();
        assert_eq!(view.picked.as_deref(), Some("Po-Chun"));
        assert_eq!(view.picked_label, "Po-Chun");
        assert_eq!(view.saved_count, 0);
    }
}
