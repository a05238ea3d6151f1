/*!
This crate implements the ranked-pairs voting method, also known as the Tideman method.

Every voter ranks all the candidates. The ballots are first reduced to the number of voters
preferring each candidate over each other candidate. Every head-to-head victory is then
considered, from the largest margin to the smallest, and locked in as a defeat unless it
contradicts the defeats already locked in (that is, unless it would create a cycle).
The winners are the candidates that no locked defeat points to.

The simplest entry point is [`run_voting_stats`]. The [`builder::Builder`] gives more control
when votes arrive one at a time, and the individual stages ([`PreferenceMatrix`],
[`extract_pairs`], [`sort_pairs`], [`lock_pairs`], [`find_winners`]) are exposed as well.

```
use ranked_pairs::{run_voting_stats, VoteRules};

let candidates: Vec<String> = ["Alice", "Bob", "Charlie"].iter().map(|s| s.to_string()).collect();
let votes: Vec<Vec<String>> = [
    ["Alice", "Bob", "Charlie"],
    ["Alice", "Bob", "Charlie"],
    ["Charlie", "Bob", "Alice"],
]
.iter()
.map(|v| v.iter().map(|s| s.to_string()).collect())
.collect();

let result = run_voting_stats(&votes, &VoteRules::DEFAULT_RULES, &candidates)?;
assert_eq!(result.winners, vec!["Alice".to_string()]);
# Ok::<(), ranked_pairs::VotingErrors>(())
```
*/

pub mod builder;
mod config;
mod graph;
pub mod manual;
mod pairs;
mod tally;

use log::{debug, info};

pub use crate::config::*;
pub use crate::graph::{find_winners, lock_pairs, LockedGraph};
pub use crate::pairs::{extract_pairs, sort_pairs, Pair};
pub use crate::tally::PreferenceMatrix;

/// The position of a candidate in the registration order, starting at 0.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct CandidateId(pub usize);

/// A complete ranking of all the candidates, from the most preferred to the least preferred.
///
/// A ballot is always a permutation of the candidates of its election.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Ballot {
    ranks: Vec<CandidateId>,
}

impl Ballot {
    /// Creates a ballot if `ranks` contains each of `0..num_candidates` exactly once.
    pub fn new(ranks: Vec<CandidateId>, num_candidates: usize) -> Option<Ballot> {
        if ranks.len() != num_candidates {
            return None;
        }
        let mut seen = vec![false; num_candidates];
        for cid in ranks.iter() {
            match seen.get_mut(cid.0) {
                Some(s) if !*s => *s = true,
                _ => return None,
            }
        }
        Some(Ballot { ranks })
    }

    pub fn ranks(&self) -> &[CandidateId] {
        &self.ranks
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// An election whose ballots have all been counted.
///
/// All the state of a run lives here, so that several elections can be
/// tabulated side by side.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Election {
    candidates: Vec<Candidate>,
    rules: VoteRules,
    preferences: PreferenceMatrix,
}

impl Election {
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn preferences(&self) -> &PreferenceMatrix {
        &self.preferences
    }

    /// Runs the ranked-pairs method on the counted ballots.
    ///
    /// This does not modify the election: running it again gives the same result.
    pub fn tabulate(&self) -> VotingResult {
        let names: Vec<String> = self.candidates.iter().map(|c| c.name.clone()).collect();
        info!(
            "Processing {} ballots, rules: {:?}",
            self.preferences.num_ballots(),
            self.rules
        );
        for (idx, name) in names.iter().enumerate() {
            info!("Candidate: {}: {}", idx, name);
        }

        let pairs = extract_pairs(&self.preferences);
        let sorted_pairs = sort_pairs(&pairs, self.rules.tiebreak_mode, &names);
        let (graph, statuses) = lock_pairs(&sorted_pairs, names.len());
        let winners = find_winners(&graph);

        let pair_stats: Vec<PairStats> = sorted_pairs
            .iter()
            .zip(statuses.iter())
            .map(|(p, status)| PairStats {
                winner: names[p.winner.0].clone(),
                loser: names[p.loser.0].clone(),
                margin: p.margin,
                status: *status,
            })
            .collect();
        for ps in pair_stats.iter() {
            info!(
                "      {} over {} by {} -> {:?}",
                ps.winner, ps.loser, ps.margin, ps.status
            );
        }

        let winner_names: Vec<String> = winners.iter().map(|cid| names[cid.0].clone()).collect();
        match winner_names.len() {
            1 => info!("Winner: {}", winner_names[0]),
            0 => info!("No winner: every candidate is defeated"),
            _ => info!("Tie between {} candidates: {:?}", winner_names.len(), winner_names),
        }

        VotingResult {
            winners: winner_names,
            candidates: names,
            num_ballots: self.preferences.num_ballots(),
            preferences: self.preferences.to_rows(),
            pairs: pair_stats,
        }
    }
}

/// Runs the voting algorithm with the given rules for the given votes.
///
/// Arguments:
/// * `coll` the votes, each one listing all the candidate names in order of preference
/// * `rules` the rules that govern this election
/// * `candidates` the registered candidates for this election, in order
///
/// The first invalid vote stops the count.
pub fn run_voting_stats(
    coll: &[Vec<String>],
    rules: &VoteRules,
    candidates: &[String],
) -> Result<VotingResult, VotingErrors> {
    debug!("run_voting_stats: {} votes", coll.len());
    let mut builder = builder::Builder::new(rules)?.candidates(candidates)?;
    for vote in coll.iter() {
        builder.add_vote_simple(vote)?;
    }
    Ok(builder.build()?.tabulate())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn strings(l: &[&str]) -> Vec<String> {
        l.iter().map(|s| s.to_string()).collect()
    }

    fn votes<const N: usize>(l: &[([&str; N], usize)]) -> Vec<Vec<String>> {
        let mut res: Vec<Vec<String>> = Vec::new();
        for (ranking, count) in l.iter() {
            for _ in 0..*count {
                res.push(strings(ranking));
            }
        }
        res
    }

    #[test]
    fn ballot_must_be_a_permutation() {
        fn c(l: &[usize]) -> Vec<CandidateId> {
            l.iter().map(|&i| CandidateId(i)).collect()
        }
        assert!(Ballot::new(c(&[1, 0, 2]), 3).is_some());
        assert!(Ballot::new(c(&[1, 0]), 3).is_none());
        assert!(Ballot::new(c(&[1, 1, 2]), 3).is_none());
        assert!(Ballot::new(c(&[1, 0, 3]), 3).is_none());
    }

    #[test]
    fn majority_winner() {
        init();
        let candidates = strings(&["Alice", "Bob", "Charlie"]);
        let coll = votes(&[
            (["Alice", "Bob", "Charlie"], 2),
            (["Charlie", "Bob", "Alice"], 1),
        ]);
        let res = run_voting_stats(&coll, &VoteRules::DEFAULT_RULES, &candidates).unwrap();
        assert_eq!(res.winners, strings(&["Alice"]));
        assert_eq!(res.num_ballots, 3);
        assert_eq!(
            res.preferences,
            vec![vec![0, 2, 2], vec![1, 0, 2], vec![1, 1, 0]]
        );
        assert_eq!(res.pairs.len(), 3);
        assert!(res.pairs.iter().all(|p| p.margin == 1));
        assert!(res.pairs.iter().all(|p| p.status == PairStatus::Locked));
    }

    #[test]
    fn cycle_is_broken_at_the_weakest_defeat() {
        init();
        // A > B by 3, B > C by 2, C > A by 1.
        let candidates = strings(&["A", "B", "C"]);
        let coll = votes(&[
            (["A", "B", "C"], 3),
            (["B", "C", "A"], 2),
            (["C", "A", "B"], 2),
        ]);
        let res = run_voting_stats(&coll, &VoteRules::DEFAULT_RULES, &candidates).unwrap();
        let summary: Vec<(&str, &str, u64, PairStatus)> = res
            .pairs
            .iter()
            .map(|p| (p.winner.as_str(), p.loser.as_str(), p.margin, p.status))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("A", "B", 3, PairStatus::Locked),
                ("B", "C", 3, PairStatus::Locked),
                ("C", "A", 1, PairStatus::Rejected),
            ]
        );
        assert_eq!(res.winners, strings(&["A"]));
    }

    #[test]
    fn even_split_gives_two_winners() {
        init();
        let candidates = strings(&["A", "B"]);
        let coll = votes(&[(["A", "B"], 1), (["B", "A"], 1)]);
        let res = run_voting_stats(&coll, &VoteRules::DEFAULT_RULES, &candidates).unwrap();
        assert!(res.pairs.is_empty());
        assert_eq!(res.winners, strings(&["A", "B"]));
    }

    #[test]
    fn no_ballots_means_everyone_ties() {
        let candidates = strings(&["A", "B", "C"]);
        let res = run_voting_stats(&[], &VoteRules::DEFAULT_RULES, &candidates).unwrap();
        assert_eq!(res.num_ballots, 0);
        assert_eq!(res.winners, candidates);
    }

    #[test]
    fn single_candidate() {
        let candidates = strings(&["Solo"]);
        let coll = votes(&[(["Solo"], 4)]);
        let res = run_voting_stats(&coll, &VoteRules::DEFAULT_RULES, &candidates).unwrap();
        assert_eq!(res.winners, candidates);
        assert!(res.pairs.is_empty());
    }

    #[test]
    fn condorcet_winner_among_four() {
        init();
        // The classic Tennessee capital example: Nashville beats everyone head to head.
        let candidates = strings(&["Memphis", "Nashville", "Chattanooga", "Knoxville"]);
        let coll = votes(&[
            (["Memphis", "Nashville", "Chattanooga", "Knoxville"], 42),
            (["Nashville", "Chattanooga", "Knoxville", "Memphis"], 26),
            (["Chattanooga", "Knoxville", "Nashville", "Memphis"], 15),
            (["Knoxville", "Chattanooga", "Nashville", "Memphis"], 17),
        ]);
        let res = run_voting_stats(&coll, &VoteRules::DEFAULT_RULES, &candidates).unwrap();
        assert_eq!(res.winners, strings(&["Nashville"]));
        assert!(res.pairs.iter().all(|p| p.status == PairStatus::Locked));
        assert_eq!(res.pairs[0].margin, 66);
    }

    #[test]
    fn rejected_vote_stops_the_count() {
        let candidates = strings(&["A", "B"]);
        let coll = votes(&[(["A", "B"], 1), (["A", "Z"], 1)]);
        assert_eq!(
            run_voting_stats(&coll, &VoteRules::DEFAULT_RULES, &candidates),
            Err(VotingErrors::UnknownCandidate {
                ballot: 2,
                name: "Z".to_string()
            })
        );
    }

    #[test]
    fn tabulation_is_idempotent() {
        let candidates = strings(&["A", "B", "C", "D"]);
        let coll = votes(&[
            (["A", "B", "C", "D"], 2),
            (["B", "C", "D", "A"], 2),
            (["C", "D", "A", "B"], 2),
            (["D", "A", "B", "C"], 1),
        ]);
        for rules in [
            VoteRules::DEFAULT_RULES,
            VoteRules {
                tiebreak_mode: TieBreakMode::Random(3),
            },
        ] {
            let mut b = builder::Builder::new(&rules)
                .unwrap()
                .candidates(&candidates)
                .unwrap();
            for v in coll.iter() {
                b.add_vote_simple(v).unwrap();
            }
            let election = b.build().unwrap();
            let first = election.tabulate();
            let second = election.tabulate();
            assert_eq!(first, second);
            assert_eq!(
                first,
                run_voting_stats(&coll, &rules, &candidates).unwrap()
            );
        }
    }
}
