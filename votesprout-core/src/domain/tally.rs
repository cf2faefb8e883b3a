//! Per-option vote counting over `(choice_index, count)` groups.
//!
//! Out-of-range choice indices never fail a read: they are left out of the
//! per-option counts but still contribute to `total_votes`, which mirrors the
//! grouped `count(*)` aggregation of the relational backend.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposalTally {
    pub tallies: Vec<u64>,
    pub total_votes: u64,
}

impl ProposalTally {
    pub fn empty(option_count: usize) -> Self {
        Self { tallies: vec![0; option_count], total_votes: 0 }
    }

    fn add(&mut self, choice_index: i64, count: u64) {
        self.total_votes = self.total_votes.saturating_add(count);
        let Ok(index) = usize::try_from(choice_index) else {
            return;
        };
        if let Some(slot) = self.tallies.get_mut(index) {
            *slot = slot.saturating_add(count);
        }
    }
}

/// Tally pre-aggregated `(choice_index, count)` groups.
pub fn tally_grouped(option_count: usize, groups: impl IntoIterator<Item = (i64, u64)>) -> ProposalTally {
    let mut tally = ProposalTally::empty(option_count);
    for (choice, count) in groups {
        tally.add(choice, count);
    }
    tally
}
