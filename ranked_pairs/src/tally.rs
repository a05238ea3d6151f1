use crate::{Ballot, CandidateId};

/// Pairwise preference counts between all the candidates of an election.
///
/// `get(i, j)` is the number of ballots that rank candidate `i` strictly
/// above candidate `j`. The diagonal is always zero.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PreferenceMatrix {
    num_candidates: usize,
    num_ballots: u64,
    // Row-major, num_candidates * num_candidates entries.
    counts: Vec<u64>,
}

impl PreferenceMatrix {
    /// Builds the matrix for a sequence of complete ballots.
    ///
    /// Every candidate gains one point over every candidate ranked after it on
    /// a ballot, not only over the next one.
    ///
    /// # Panics
    ///
    /// If a ballot ranks a candidate outside of `0..num_candidates`.
    /// Ballots produced by the [`Builder`](crate::builder::Builder) for the same
    /// election always satisfy this.
    pub fn from_ballots(num_candidates: usize, ballots: &[Ballot]) -> PreferenceMatrix {
        let mut counts = vec![0; num_candidates * num_candidates];
        for ballot in ballots {
            let ranks = ballot.ranks();
            for (pos, preferred) in ranks.iter().enumerate() {
                for other in ranks[pos + 1..].iter() {
                    counts[preferred.0 * num_candidates + other.0] += 1;
                }
            }
        }
        PreferenceMatrix {
            num_candidates,
            num_ballots: ballots.len() as u64,
            counts,
        }
    }

    pub fn num_candidates(&self) -> usize {
        self.num_candidates
    }

    pub fn num_ballots(&self) -> u64 {
        self.num_ballots
    }

    /// The number of ballots preferring `preferred` over `other`.
    pub fn get(&self, preferred: CandidateId, other: CandidateId) -> u64 {
        self.counts[preferred.0 * self.num_candidates + other.0]
    }

    /// The matrix as nested rows, for reporting.
    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        if self.num_candidates == 0 {
            return Vec::new();
        }
        self.counts
            .chunks(self.num_candidates)
            .map(|row| row.to_vec())
            .collect()
    }
}
