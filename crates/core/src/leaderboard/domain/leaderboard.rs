use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::leaderboard::domain::leaderboard_entry::LeaderboardEntry;
use crate::shared::constants::{DEMO_LEADERBOARD, LEADERBOARD_CAPACITY};

/// In-memory ranked list of the best scores.
///
/// Entries are kept sorted by descending score with ties in arrival order,
/// and never exceed `capacity`. Every submission runs its
/// append-sort-truncate under one lock, so concurrent submitters always
/// observe a fully sorted list.
pub struct Leaderboard {
    entries: Mutex<Vec<LeaderboardEntry>>,
    capacity: usize,
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(Vec::with_capacity(capacity + 1)),
            capacity,
        }
    }

    /// Default-capacity board pre-filled with the demo players.
    pub fn with_demo_entries() -> Self {
        let board = Self::new(LEADERBOARD_CAPACITY);
        for (username, score) in DEMO_LEADERBOARD {
            board.submit(LeaderboardEntry::new(*username, *score));
        }
        board
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn submit(&self, entry: LeaderboardEntry) {
        let mut entries = self.lock();
        entries.push(entry);
        // `sort_by` is stable: equal scores keep their arrival order.
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(self.capacity);
    }

    /// Snapshot of the ranking, best first.
    pub fn top(&self) -> Vec<LeaderboardEntry> {
        self.lock().clone()
    }

    // A panic mid-submit cannot leave the list unsorted (the sort runs on
    // a fully built vector), so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Vec<LeaderboardEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(LEADERBOARD_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn entry(name: &str, score: u32) -> LeaderboardEntry {
        LeaderboardEntry::new(name, score)
    }

    fn names(board: &Leaderboard) -> Vec<String> {
        board.top().into_iter().map(|e| e.username).collect()
    }

    #[test]
    fn test_new_board_is_empty() {
        assert!(Leaderboard::default().top().is_empty());
    }

    #[test]
    fn test_demo_entries_seeded_in_order() {
        let board = Leaderboard::with_demo_entries();
        assert_eq!(
            board.top(),
            vec![
                entry("GrinMaster", 950),
                entry("GiggleQueen", 820),
                entry("BeamBot", 700),
            ]
        );
    }

    #[test]
    fn test_submit_keeps_descending_order() {
        let board = Leaderboard::default();
        board.submit(entry("b", 20));
        board.submit(entry("a", 50));
        board.submit(entry("c", 35));
        assert_eq!(names(&board), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_eleven_entries_truncated_to_ten() {
        let board = Leaderboard::default();
        for i in 0..11u32 {
            board.submit(entry(&format!("p{i}"), 1000 - i * 10));
        }
        let top = board.top();
        assert_eq!(top.len(), 10);
        assert_eq!(top[0], entry("p0", 1000));
        assert_eq!(top[9], entry("p9", 910));
        assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(!top.iter().any(|e| e.username == "p10"));
    }

    #[test]
    fn test_low_score_on_full_board_is_dropped() {
        let board = Leaderboard::default();
        for i in 0..10u32 {
            board.submit(entry(&format!("p{i}"), 100 + i));
        }
        board.submit(entry("late", 1));
        assert_eq!(board.top().len(), 10);
        assert!(!names(&board).contains(&"late".to_string()));
    }

    #[test]
    fn test_tie_keeps_earlier_entry_first() {
        let board = Leaderboard::default();
        board.submit(entry("first", 500));
        board.submit(entry("other", 900));
        board.submit(entry("second", 500));
        assert_eq!(names(&board), vec!["other", "first", "second"]);
    }

    #[test]
    fn test_tie_with_demo_entry_ranks_after_it() {
        let board = Leaderboard::with_demo_entries();
        board.submit(entry("Challenger", 820));
        assert_eq!(
            names(&board),
            vec!["GrinMaster", "GiggleQueen", "Challenger", "BeamBot"]
        );
    }

    #[test]
    fn test_duplicate_usernames_allowed() {
        let board = Leaderboard::default();
        board.submit(entry("Ada", 10));
        board.submit(entry("Ada", 20));
        assert_eq!(board.top(), vec![entry("Ada", 20), entry("Ada", 10)]);
    }

    #[test]
    fn test_custom_capacity() {
        let board = Leaderboard::new(2);
        for s in [5, 9, 7] {
            board.submit(entry("x", s));
        }
        let scores: Vec<u32> = board.top().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![9, 7]);
        assert_eq!(board.capacity(), 2);
    }

    #[test]
    fn test_concurrent_submissions_stay_sorted_and_bounded() {
        let board = Arc::new(Leaderboard::default());
        std::thread::scope(|s| {
            for t in 0..8u32 {
                let board = Arc::clone(&board);
                s.spawn(move || {
                    for i in 0..50u32 {
                        board.submit(entry(&format!("t{t}"), t * 1000 + i));
                        let top = board.top();
                        assert!(top.len() <= 10);
                        assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
                    }
                });
            }
        });
        let top = board.top();
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].score, 7049);
        assert_eq!(top[9].score, 7040);
    }
}
