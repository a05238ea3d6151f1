use std::cmp::Reverse;

use log::debug;

use crate::config::TieBreakMode;
use crate::tally::PreferenceMatrix;
use crate::CandidateId;

/// A strict head-to-head victory of one candidate over another.
///
/// The margin is always positive: ties do not produce a pair.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct Pair {
    pub winner: CandidateId,
    pub loser: CandidateId,
    pub margin: u64,
}

/// Collects all the pairs in which one candidate is strictly preferred over the other.
///
/// Pairs are produced in candidate order (by winner, then by loser).
/// At most one pair exists for any two candidates.
pub fn extract_pairs(preferences: &PreferenceMatrix) -> Vec<Pair> {
    let n = preferences.num_candidates();
    let mut pairs: Vec<Pair> = Vec::new();
    for i in 0..n {
        for j in 0..n {
            let (winner, loser) = (CandidateId(i), CandidateId(j));
            let for_winner = preferences.get(winner, loser);
            let for_loser = preferences.get(loser, winner);
            if for_winner > for_loser {
                pairs.push(Pair {
                    winner,
                    loser,
                    margin: for_winner - for_loser,
                });
            }
        }
    }
    debug!("extract_pairs: {} pairs for {} candidates", pairs.len(), n);
    pairs
}

/// Returns the pairs sorted by decreasing margin.
///
/// Pairs with the same margin are ordered according to the tiebreak mode.
/// `candidate_names` is only consulted for the random mode.
pub fn sort_pairs(
    pairs: &[Pair],
    tiebreak: TieBreakMode,
    candidate_names: &[String],
) -> Vec<Pair> {
    let mut sorted = pairs.to_vec();
    match tiebreak {
        TieBreakMode::UseCandidateOrder => {
            sorted.sort_by(|a, b| {
                b.margin
                    .cmp(&a.margin)
                    .then(a.winner.cmp(&b.winner))
                    .then(a.loser.cmp(&b.loser))
            });
        }
        TieBreakMode::Random(seed) => {
            sorted.sort_by_cached_key(|p| {
                (Reverse(p.margin), pair_digest(p, seed, candidate_names))
            });
        }
    }
    sorted
}

/// A hash that is hard to predict without knowing the seed, but stable for a given seed.
fn pair_digest(pair: &Pair, seed: u32, candidate_names: &[String]) -> String {
    let name = |cid: CandidateId| {
        candidate_names
            .get(cid.0)
            .map(String::as_str)
            .unwrap_or_default()
    };
    sha256::digest(format!(
        "{:08}\n{}\n{}",
        seed,
        name(pair.winner),
        name(pair.loser)
    ))
}
