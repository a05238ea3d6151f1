use std::collections::{HashMap, HashSet};

use log::debug;
use snafu::ensure;

pub use crate::config::*;
use crate::{Ballot, CandidateId, Election, PreferenceMatrix};

/// A builder for adding votes.
///
/// The builder is the only way to turn voter-supplied names into ballots. Each
/// vote is checked on its own: a vote that is rejected leaves no trace in the
/// election.
///
/// ```
/// pub use ranked_pairs::builder::Builder;
/// pub use ranked_pairs::VoteRules;
/// # use ranked_pairs::VotingErrors;
///
/// let mut builder = Builder::new(&VoteRules::DEFAULT_RULES)?
///     .candidates(&["Anna".to_string(), "Bob".to_string()])?;
///
/// builder.add_vote_simple(&["Anna".to_string(), "Bob".to_string()])?;
/// // Clara is not running.
/// assert!(builder.add_vote_simple(&["Anna".to_string(), "Clara".to_string()]).is_err());
///
/// let result = builder.build()?.tabulate();
/// assert_eq!(result.winners, vec!["Anna".to_string()]);
/// # Ok::<(), VotingErrors>(())
/// ```
pub struct Builder {
    rules: VoteRules,
    candidates: Option<Vec<Candidate>>,
    candidate_ids: HashMap<String, CandidateId>,
    ballots: Vec<Ballot>,
    // Number of votes submitted so far, accepted or not.
    num_submitted: usize,
}

impl Builder {
    pub fn new(rules: &VoteRules) -> Result<Builder, VotingErrors> {
        Ok(Builder {
            rules: rules.clone(),
            candidates: None,
            candidate_ids: HashMap::new(),
            ballots: Vec::new(),
            num_submitted: 0,
        })
    }

    /// Registers the candidates, in order. Any vote added before is discarded.
    pub fn candidates(self, cands: &[String]) -> Result<Builder, VotingErrors> {
        ensure!(!cands.is_empty(), EmptyElectionSnafu {});
        ensure!(
            cands.len() <= MAX_CANDIDATES,
            TooManyCandidatesSnafu {
                count: cands.len(),
                max: MAX_CANDIDATES,
            }
        );
        let mut candidate_ids: HashMap<String, CandidateId> = HashMap::new();
        for (idx, name) in cands.iter().enumerate() {
            ensure!(
                candidate_ids.insert(name.clone(), CandidateId(idx)).is_none(),
                DuplicateCandidateNameSnafu { name: name.clone() }
            );
        }
        Ok(Builder {
            rules: self.rules,
            candidates: Some(
                cands
                    .iter()
                    .map(|name| Candidate { name: name.clone() })
                    .collect(),
            ),
            candidate_ids,
            ballots: Vec::new(),
            num_submitted: 0,
        })
    }

    /// Adds a vote to the builder.
    ///
    /// candidates: the names of all the candidates, from the most preferred to the least preferred.
    /// Every registered candidate must appear exactly once.
    ///
    /// Errors refer to the vote by its 1-based position among all the submitted votes.
    pub fn add_vote_simple(&mut self, candidates: &[String]) -> Result<(), VotingErrors> {
        self.num_submitted += 1;
        let ballot = self.num_submitted;
        let expected = self.num_candidates()?;

        let mut seen: HashSet<CandidateId> = HashSet::new();
        let mut ranks: Vec<CandidateId> = Vec::with_capacity(candidates.len());
        for name in candidates {
            let cid = match self.candidate_ids.get(name) {
                Some(cid) => *cid,
                None => {
                    return UnknownCandidateSnafu {
                        ballot,
                        name: name.clone(),
                    }
                    .fail()
                }
            };
            ensure!(
                seen.insert(cid),
                DuplicateRankingSnafu {
                    ballot,
                    name: name.clone(),
                }
            );
            ranks.push(cid);
        }
        ensure!(
            ranks.len() == expected,
            IncompleteBallotSnafu {
                ballot,
                ranked: ranks.len(),
                expected,
            }
        );
        debug!("add_vote_simple: ballot {}: {:?}", ballot, ranks);
        self.ballots.push(Ballot { ranks });
        Ok(())
    }

    /// Adds a ballot that was validated by the caller.
    ///
    /// The ballot must rank exactly the registered candidates.
    pub fn add_ballot(&mut self, ballot: Ballot) -> Result<(), VotingErrors> {
        self.num_submitted += 1;
        let expected = self.num_candidates()?;
        ensure!(
            ballot.len() == expected,
            IncompleteBallotSnafu {
                ballot: self.num_submitted,
                ranked: ballot.len(),
                expected,
            }
        );
        self.ballots.push(ballot);
        Ok(())
    }

    /// The number of accepted ballots so far.
    pub fn num_ballots(&self) -> usize {
        self.ballots.len()
    }

    /// Looks up a registered candidate by its exact name.
    ///
    /// An unknown name is reported against the next vote to be submitted.
    pub fn candidate_id(&self, name: &str) -> Result<CandidateId, VotingErrors> {
        self.num_candidates()?;
        match self.candidate_ids.get(name) {
            Some(cid) => Ok(*cid),
            None => UnknownCandidateSnafu {
                ballot: self.num_submitted + 1,
                name,
            }
            .fail(),
        }
    }

    /// Tallies the accepted ballots.
    pub fn build(self) -> Result<Election, VotingErrors> {
        let candidates = match self.candidates {
            Some(c) => c,
            None => return MissingCandidatesSnafu {}.fail(),
        };
        let preferences = PreferenceMatrix::from_ballots(candidates.len(), &self.ballots);
        Ok(Election {
            candidates,
            rules: self.rules,
            preferences,
        })
    }

    fn num_candidates(&self) -> Result<usize, VotingErrors> {
        match self.candidates.as_deref() {
            Some(c) => Ok(c.len()),
            None => MissingCandidatesSnafu {}.fail(),
        }
    }
}
