// ********* Input data structures ***********

use snafu::Snafu;

/// The largest number of candidates accepted in a single election.
pub const MAX_CANDIDATES: usize = 9;

/// A registered candidate.
///
/// Candidates are identified by their position in the registration order.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Candidate {
    pub name: String,
}

// ******** Output data structures *********

/// The final state of a ranked pair after the locking pass.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum PairStatus {
    /// The defeat was committed to the graph.
    Locked,
    /// Committing the defeat would have created a cycle with stronger,
    /// already locked defeats.
    Rejected,
}

/// One head-to-head victory, as reported to the caller.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PairStats {
    pub winner: String,
    pub loser: String,
    pub margin: u64,
    pub status: PairStatus,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VotingResult {
    /// The sources of the locked graph, in candidate order.
    /// Usually a single candidate, but it may be empty or contain several
    /// candidates (for example when every head-to-head race is a tie).
    pub winners: Vec<String>,
    /// The candidate names, in registration order.
    pub candidates: Vec<String>,
    pub num_ballots: u64,
    /// preferences[i][j] is the number of ballots ranking candidate i above candidate j.
    pub preferences: Vec<Vec<u64>>,
    /// The pairs in the order in which they were considered for locking.
    pub pairs: Vec<PairStats>,
}

/// Errors that prevent a ballot or an election from being accepted.
#[derive(Eq, PartialEq, Debug, Clone, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum VotingErrors {
    #[snafu(display("no candidates were provided"))]
    EmptyElection {},

    #[snafu(display("maximum number of candidates is {max}, got {count}"))]
    TooManyCandidates { count: usize, max: usize },

    #[snafu(display("candidate {name:?} is registered more than once"))]
    DuplicateCandidateName { name: String },

    #[snafu(display("candidates must be registered before adding votes"))]
    MissingCandidates {},

    #[snafu(display("ballot {ballot}: {name:?} is not a registered candidate"))]
    UnknownCandidate { ballot: usize, name: String },

    #[snafu(display("ballot {ballot}: candidate {name:?} is ranked more than once"))]
    DuplicateRanking { ballot: usize, name: String },

    #[snafu(display("ballot {ballot}: ranks {ranked} candidates, expected {expected}"))]
    IncompleteBallot {
        ballot: usize,
        ranked: usize,
        expected: usize,
    },
}

// ********* Configuration **********

/// How pairs with the same margin are ordered before locking.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TieBreakMode {
    /// Equal margins are ordered by winner index, then by loser index.
    UseCandidateOrder,
    /// Equal margins are ordered by a cryptographic hash of the seed and the
    /// candidate names. The order is reproducible for a given seed but hard
    /// to guess in advance.
    Random(u32),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteRules {
    pub tiebreak_mode: TieBreakMode,
}

impl VoteRules {
    pub const DEFAULT_RULES: VoteRules = VoteRules {
        tiebreak_mode: TieBreakMode::UseCandidateOrder,
    };
}

impl Default for VoteRules {
    fn default() -> Self {
        VoteRules::DEFAULT_RULES
    }
}
