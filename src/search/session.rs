use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use super::models::Package;

/// How long the in-flight indicator stays up after a dispatch settles. The
/// clear is scheduled, not tied to the response, so the indicator always
/// comes down even when the caller abandoned the request.
pub const SEARCH_INDICATOR_CLEAR_MS: u64 = 500;

/// Per-interest display state. Derived, never stored: an abandoned search
/// can therefore not wedge an interest in `searching` past the timed clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchState {
    Idle,
    Searching,
    ResultsAvailable,
    NoResults,
}

#[derive(Debug, Clone)]
struct InterestSlot {
    locations_text: String,
    /// `None` until a search for this interest has committed at least once.
    packages: Option<Vec<Package>>,
    seq: u64,
}

#[derive(Default)]
struct UserSession {
    slots: HashMap<Uuid, InterestSlot>,
    in_flight: std::collections::HashSet<Uuid>,
    next_seq: u64,
}

/// One search group as the presenter consumes it.
#[derive(Debug, Clone, Serialize)]
pub struct InterestResults {
    pub interest_id: Uuid,
    pub locations_text: String,
    pub state: SearchState,
    pub packages: Vec<Package>,
}

/// Ephemeral per-user search results, keyed by interest id. Each user's
/// session is independent; within a session the newest commit for an
/// interest fully replaces the previous one. Nothing here survives a server
/// restart and nothing is persisted.
///
/// The map lives behind an `Arc` so the delayed-clear tasks can outlive the
/// request that spawned them.
#[derive(Clone, Default)]
pub struct SearchSessions {
    sessions: Arc<DashMap<Uuid, UserSession>>,
}

impl SearchSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an interest as in flight and records its display text. Any
    /// previously committed packages stay visible until a new commit
    /// replaces them.
    pub fn begin_search(&self, user_id: Uuid, interest_id: Uuid, locations_text: &str) {
        let mut session = self.sessions.entry(user_id).or_default();
        let seq = session.next_seq;
        let slot = session
            .slots
            .entry(interest_id)
            .or_insert_with(|| InterestSlot {
                locations_text: String::new(),
                packages: None,
                seq,
            });
        slot.locations_text = locations_text.to_string();
        if slot.seq == seq {
            session.next_seq += 1;
        }
        session.in_flight.insert(interest_id);
    }

    /// Replaces the committed result set for an interest. Last write wins;
    /// there is no append.
    pub fn commit_results(
        &self,
        user_id: Uuid,
        interest_id: Uuid,
        locations_text: &str,
        packages: Vec<Package>,
    ) {
        let mut session = self.sessions.entry(user_id).or_default();
        let seq = session.next_seq;
        match session.slots.entry(interest_id) {
            std::collections::hash_map::Entry::Occupied(mut entry) => {
                let slot = entry.get_mut();
                slot.locations_text = locations_text.to_string();
                slot.packages = Some(packages);
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(InterestSlot {
                    locations_text: locations_text.to_string(),
                    packages: Some(packages),
                    seq,
                });
                session.next_seq += 1;
            }
        }
    }

    pub fn clear_in_flight(&self, user_id: Uuid, interest_id: Uuid) {
        if let Some(mut session) = self.sessions.get_mut(&user_id) {
            session.in_flight.remove(&interest_id);
        }
    }

    /// Clears the in-flight indicator after the fixed delay, from a spawned
    /// task the caller does not await.
    pub fn schedule_indicator_clear(&self, user_id: Uuid, interest_id: Uuid) {
        let sessions = Arc::clone(&self.sessions);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(SEARCH_INDICATOR_CLEAR_MS)).await;
            if let Some(mut session) = sessions.get_mut(&user_id) {
                session.in_flight.remove(&interest_id);
            }
        });
    }

    /// Drops an interest's results, for caller-side reconciliation after the
    /// interest itself was deleted. Returns whether anything was removed.
    pub fn discard_results(&self, user_id: Uuid, interest_id: Uuid) -> bool {
        match self.sessions.get_mut(&user_id) {
            Some(mut session) => {
                session.in_flight.remove(&interest_id);
                session.slots.remove(&interest_id).is_some()
            }
            None => false,
        }
    }

    pub fn state(&self, user_id: Uuid, interest_id: Uuid) -> SearchState {
        match self.sessions.get(&user_id) {
            Some(session) => {
                if session.in_flight.contains(&interest_id) {
                    return SearchState::Searching;
                }
                match session.slots.get(&interest_id).and_then(|s| s.packages.as_ref()) {
                    None => SearchState::Idle,
                    Some(packages) if packages.is_empty() => SearchState::NoResults,
                    Some(_) => SearchState::ResultsAvailable,
                }
            }
            None => SearchState::Idle,
        }
    }

    /// All result groups for a user, in first-searched order. Interests that
    /// are in flight but have never committed appear with an empty package
    /// list; interests never searched do not appear at all.
    pub fn snapshot(&self, user_id: Uuid) -> Vec<InterestResults> {
        let Some(session) = self.sessions.get(&user_id) else {
            return Vec::new();
        };

        let mut groups: Vec<(u64, InterestResults)> = session
            .slots
            .iter()
            .filter(|(id, slot)| slot.packages.is_some() || session.in_flight.contains(*id))
            .map(|(id, slot)| {
                let state = if session.in_flight.contains(id) {
                    SearchState::Searching
                } else if slot.packages.as_ref().is_some_and(|p| p.is_empty()) {
                    SearchState::NoResults
                } else {
                    SearchState::ResultsAvailable
                };
                let results = InterestResults {
                    interest_id: *id,
                    locations_text: slot.locations_text.clone(),
                    state,
                    packages: slot.packages.clone().unwrap_or_default(),
                };
                (slot.seq, results)
            })
            .collect();

        groups.sort_by_key(|(seq, _)| *seq);
        groups.into_iter().map(|(_, results)| results).collect()
    }

    pub fn results_for(&self, user_id: Uuid, interest_id: Uuid) -> Option<InterestResults> {
        self.snapshot(user_id)
            .into_iter()
            .find(|group| group.interest_id == interest_id)
    }

    /// Detail lookup straight from the session, no refetch.
    pub fn package(&self, user_id: Uuid, interest_id: Uuid, package_id: &str) -> Option<Package> {
        let session = self.sessions.get(&user_id)?;
        session
            .slots
            .get(&interest_id)?
            .packages
            .as_ref()?
            .iter()
            .find(|package| package.id == package_id)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(id: &str) -> Package {
        Package {
            id: id.to_string(),
            title: format!("Package {id}"),
            provider_id: None,
            location_id: None,
            price: 100.0,
            duration_days: 2,
            highlights: vec![],
            description: String::new(),
            image_url: None,
            is_ai_generated: None,
        }
    }

    #[test]
    fn second_commit_replaces_the_first() {
        let sessions = SearchSessions::new();
        let (user, interest) = (Uuid::new_v4(), Uuid::new_v4());

        sessions.commit_results(user, interest, "Hanoi, Vietnam", vec![package("a"), package("b")]);
        sessions.commit_results(user, interest, "Hanoi, Vietnam", vec![package("c")]);

        let groups = sessions.snapshot(user);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].packages.len(), 1);
        assert_eq!(groups[0].packages[0].id, "c");
    }

    #[test]
    fn interests_do_not_interfere() {
        let sessions = SearchSessions::new();
        let user = Uuid::new_v4();
        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());

        sessions.commit_results(user, first, "Hanoi, Vietnam", vec![package("a")]);
        sessions.commit_results(user, second, "Osaka, Japan", vec![package("b")]);

        let groups = sessions.snapshot(user);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].interest_id, first);
        assert_eq!(groups[1].interest_id, second);
    }

    #[test]
    fn state_cycle_follows_commit_and_clear() {
        let sessions = SearchSessions::new();
        let (user, interest) = (Uuid::new_v4(), Uuid::new_v4());

        assert_eq!(sessions.state(user, interest), SearchState::Idle);

        sessions.begin_search(user, interest, "Hanoi, Vietnam");
        assert_eq!(sessions.state(user, interest), SearchState::Searching);

        sessions.commit_results(user, interest, "Hanoi, Vietnam", vec![package("a")]);
        assert_eq!(sessions.state(user, interest), SearchState::Searching);

        sessions.clear_in_flight(user, interest);
        assert_eq!(sessions.state(user, interest), SearchState::ResultsAvailable);
    }

    #[test]
    fn empty_commit_reads_as_no_results() {
        let sessions = SearchSessions::new();
        let (user, interest) = (Uuid::new_v4(), Uuid::new_v4());

        sessions.begin_search(user, interest, "Hanoi, Vietnam");
        sessions.commit_results(user, interest, "Hanoi, Vietnam", vec![]);
        sessions.clear_in_flight(user, interest);
        assert_eq!(sessions.state(user, interest), SearchState::NoResults);
    }

    #[test]
    fn failed_search_leaves_prior_results_untouched() {
        let sessions = SearchSessions::new();
        let (user, interest) = (Uuid::new_v4(), Uuid::new_v4());

        sessions.commit_results(user, interest, "Hanoi, Vietnam", vec![package("a")]);

        // A later dispatch that never commits
        sessions.begin_search(user, interest, "Hanoi, Vietnam");
        sessions.clear_in_flight(user, interest);

        let groups = sessions.snapshot(user);
        assert_eq!(groups[0].packages.len(), 1);
        assert_eq!(groups[0].packages[0].id, "a");
        assert_eq!(groups[0].state, SearchState::ResultsAvailable);
    }

    #[test]
    fn discard_removes_the_group() {
        let sessions = SearchSessions::new();
        let (user, interest) = (Uuid::new_v4(), Uuid::new_v4());

        sessions.commit_results(user, interest, "Hanoi, Vietnam", vec![package("a")]);
        assert!(sessions.discard_results(user, interest));
        assert!(sessions.snapshot(user).is_empty());
        assert_eq!(sessions.state(user, interest), SearchState::Idle);
        assert!(!sessions.discard_results(user, interest));
    }

    #[test]
    fn package_lookup_serves_fetched_fields() {
        let sessions = SearchSessions::new();
        let (user, interest) = (Uuid::new_v4(), Uuid::new_v4());

        sessions.commit_results(user, interest, "Hanoi, Vietnam", vec![package("a")]);
        let found = sessions.package(user, interest, "a").unwrap();
        assert_eq!(found.title, "Package a");
        assert!(sessions.package(user, interest, "missing").is_none());
    }

    #[test]
    fn sessions_are_isolated_per_user() {
        let sessions = SearchSessions::new();
        let interest = Uuid::new_v4();
        let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());

        sessions.commit_results(alice, interest, "Hanoi, Vietnam", vec![package("a")]);
        assert!(sessions.snapshot(bob).is_empty());
    }

    #[tokio::test]
    async fn indicator_clears_after_the_fixed_delay() {
        let sessions = SearchSessions::new();
        let (user, interest) = (Uuid::new_v4(), Uuid::new_v4());

        sessions.begin_search(user, interest, "Hanoi, Vietnam");
        sessions.commit_results(user, interest, "Hanoi, Vietnam", vec![package("a")]);
        sessions.schedule_indicator_clear(user, interest);

        assert_eq!(sessions.state(user, interest), SearchState::Searching);
        tokio::time::sleep(Duration::from_millis(SEARCH_INDICATOR_CLEAR_MS + 200)).await;
        assert_eq!(sessions.state(user, interest), SearchState::ResultsAvailable);
    }
}
