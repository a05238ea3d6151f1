use log::{debug, info, warn};

use ranked_pairs::builder::Builder;
use ranked_pairs::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::rcv::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_json;
mod io_prompt;

#[derive(Debug, Snafu)]
pub enum RcvError {
    #[snafu(display("{source}"))]
    Configuration { source: VotingErrors },

    #[snafu(display("Invalid vote ({id}): {source}"))]
    InvalidBallot { id: String, source: VotingErrors },

    #[snafu(display(
        "Candidates cannot be given both on the command line and in a configuration file"
    ))]
    ConflictingCandidates {},

    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("Expected a number starting at 1 or a column name"))]
    ParsingJsonNumber {},
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},

    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading CSV file {path}"))]
    CsvLineParse { source: csv::Error, path: String },
    #[snafu(display("Line {lineno} of {path} is too short"))]
    CsvLineTooShort { path: String, lineno: usize },

    #[snafu(display("Error reading the votes"))]
    PromptIo { source: std::io::Error },
    #[snafu(display("The input ended before all the votes were entered"))]
    PromptEof {},

    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

impl RcvError {
    /// The exit code of the program for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            RcvError::Configuration {
                source: VotingErrors::TooManyCandidates { .. },
            } => 2,
            RcvError::Configuration { .. } => 1,
            RcvError::ConflictingCandidates {} => 1,
            RcvError::Whatever { .. } => 1,
            RcvError::InvalidBallot { .. } => 3,
            _ => 4,
        }
    }
}

pub type RcvResult<T> = Result<T, RcvError>;

/// A ballot, as read from an input.
/// The names have not been checked against the candidates yet.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedBallot {
    pub id: Option<String>,
    pub choices: Vec<String>,
}

/// The result of an election, with the number of ballots that were left out.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Outcome {
    pub result: VotingResult,
    pub rejected_ballots: u64,
}

fn result_stats_to_json(outcome: &Outcome) -> JSValue {
    let rs = &outcome.result;
    let pairs: Vec<JSValue> = rs
        .pairs
        .iter()
        .map(|p| {
            let status = match p.status {
                PairStatus::Locked => "locked",
                PairStatus::Rejected => "rejected",
            };
            json!({
                "winner": p.winner,
                "loser": p.loser,
                "margin": p.margin,
                "status": status
            })
        })
        .collect();
    json!({
        "candidates": rs.candidates,
        "ballots": rs.num_ballots,
        "rejectedBallots": outcome.rejected_ballots,
        "preferences": rs.preferences,
        "pairs": pairs,
        "winners": rs.winners
    })
}

pub fn build_summary_js(config: &RcvConfig, outcome: &Outcome) -> JSValue {
    let c = OutputConfig {
        contest: config.output_settings.contest_name.clone(),
        date: config.output_settings.contest_date.clone(),
        jurisdiction: config.output_settings.contest_juridiction.clone(),
        office: config.output_settings.contest_office.clone(),
    };
    json!({
        "config": c,
        "results": result_stats_to_json(outcome) })
}

fn validate_rules(rcv_rules: &RcvRules) -> RcvResult<VoteRules> {
    let res = VoteRules {
        tiebreak_mode: match rcv_rules.tiebreak_mode.as_deref() {
            None | Some("useCandidateOrder") => TieBreakMode::UseCandidateOrder,
            Some("random") => {
                let seed: Option<u32> = match &rcv_rules.random_seed {
                    Some(JSValue::Number(n)) => n.as_u64().and_then(|x| u32::try_from(x).ok()),
                    Some(JSValue::String(s)) => s.parse::<u32>().ok(),
                    _ => None,
                };
                match seed {
                    Some(x) => TieBreakMode::Random(x),
                    None => {
                        whatever!(
                            "Tiebreak mode random requires a randomSeed between 0 and {}, got {:?}",
                            u32::MAX,
                            rcv_rules.random_seed
                        )
                    }
                }
            }
            Some(x) => {
                whatever!(
                    "Cannot use tiebreak mode {:?} (currently not implemented)",
                    x
                )
            }
        },
    };
    Ok(res)
}

/// Builds the configuration of the election from the command line, and from the
/// configuration file if one is given. Returns the directory against which the paths
/// of the ballot files are resolved.
pub fn load_config(args: &Args) -> RcvResult<(RcvConfig, PathBuf)> {
    let (mut config, mut root) = match &args.config {
        Some(config_path) => {
            ensure!(args.candidates.is_empty(), ConflictingCandidatesSnafu {});
            let config = read_config(config_path)?;
            let root = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            (config, root)
        }
        None => (
            RcvConfig {
                output_settings: OutputSettings::default(),
                cvr_file_sources: Vec::new(),
                candidates: args
                    .candidates
                    .iter()
                    .map(|name| RcvCandidate { name: name.clone() })
                    .collect(),
                rules: RcvRules::default(),
            },
            PathBuf::new(),
        ),
    };

    // Command line options take precedence over the configuration file.
    if let Some(input) = &args.input {
        let provider = args.input_type.as_deref().unwrap_or("csv");
        config.cvr_file_sources = vec![FileSource::new(provider, input)];
        root = PathBuf::new();
    }
    if let Some(tiebreak) = &args.tiebreak {
        config.rules.tiebreak_mode = Some(tiebreak.clone());
    }
    if let Some(seed) = args.seed {
        config.rules.random_seed = Some(json!(seed));
    }
    if args.skip_invalid_ballots {
        config.rules.invalid_ballot_mode = Some("skip".to_string());
    }
    Ok((config, root))
}

fn read_ranking_data(root: &Path, cfs: &FileSource) -> RcvResult<Vec<ParsedBallot>> {
    let p: PathBuf = root.join(&cfs.file_path);
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read rank file {:?}", p2);
    match cfs.provider.as_str() {
        "csv" => io_csv::read_csv_ranking(&p2, cfs),
        "json" => io_json::read_json_ranking(&p2),
        x => whatever!("Provider not implemented {:?}", x),
    }
}

/// Adds the ballots to the election. Returns the number of ballots that were left out.
fn record_ballots(
    builder: &mut Builder,
    parsed_ballots: &[ParsedBallot],
    mode: InvalidBallotMode,
) -> RcvResult<u64> {
    let mut rejected: u64 = 0;
    for pb in parsed_ballots.iter() {
        let id = pb.id.clone().unwrap_or_else(|| "NO ID".to_string());
        if let Err(e) = builder.add_vote_simple(&pb.choices) {
            match mode {
                InvalidBallotMode::Abort => {
                    return Err(e).context(InvalidBallotSnafu { id });
                }
                InvalidBallotMode::Skip => {
                    warn!("Skipping ballot {}: {}", id, e);
                    rejected += 1;
                }
            }
        }
    }
    Ok(rejected)
}

/// Collects the ballots and runs the election.
///
/// When the configuration has no ballot source, the votes are asked for on `output`
/// and read from `input`.
pub fn tabulate<R: BufRead, W: Write>(
    config: &RcvConfig,
    root: &Path,
    input: &mut R,
    output: &mut W,
) -> RcvResult<Outcome> {
    let rules = validate_rules(&config.rules)?;
    let invalid_ballot_mode = config.rules.invalid_ballot_mode()?;
    let candidate_names: Vec<String> = config.candidates.iter().map(|c| c.name.clone()).collect();

    let mut builder = Builder::new(&rules)
        .context(ConfigurationSnafu {})?
        .candidates(&candidate_names)
        .context(ConfigurationSnafu {})?;

    let mut rejected_ballots: u64 = 0;
    if config.cvr_file_sources.is_empty() {
        if invalid_ballot_mode == InvalidBallotMode::Skip {
            warn!(
                "Invalid ballots cannot be skipped when votes are entered interactively: \
                 the first invalid vote stops the count"
            );
        }
        io_prompt::read_prompt_votes(input, output, candidate_names.len(), &mut builder)?;
    } else {
        for cfs in config.cvr_file_sources.iter() {
            let parsed_ballots = read_ranking_data(root, cfs)?;
            rejected_ballots += record_ballots(&mut builder, &parsed_ballots, invalid_ballot_mode)?;
        }
    }
    if rejected_ballots > 0 {
        warn!("{} invalid ballots were not counted", rejected_ballots);
    }

    let election = builder.build().context(ConfigurationSnafu {})?;
    Ok(Outcome {
        result: election.tabulate(),
        rejected_ballots,
    })
}

fn write_summary(summary: &JSValue, out: &str) -> RcvResult<()> {
    let pretty_js_stats = serde_json::to_string_pretty(summary).context(WritingJsonSnafu {})?;
    if out == "stdout" {
        println!("{}", pretty_js_stats);
    } else {
        info!("Writing summary to {:?}", out);
        fs::write(out, pretty_js_stats).context(WritingOutputSnafu { path: out })?;
    }
    Ok(())
}

/// Compares the summary with a reference summary. Differences are printed.
pub fn check_reference(summary: &JSValue, reference_path: &str) -> RcvResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("reference summary: {:?}", summary_ref);
    let pretty_js_stats = serde_json::to_string_pretty(summary).context(WritingJsonSnafu {})?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(WritingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(
            pretty_js_summary_ref.as_str(),
            pretty_js_stats.as_ref(),
            "\n",
        );
        return ReferenceMismatchSnafu {}.fail();
    }
    Ok(())
}

pub fn run_election(args: &Args) -> RcvResult<()> {
    let (config, root) = load_config(args)?;
    info!("config: {:?}", config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = tabulate(&config, &root, &mut stdin.lock(), &mut stdout.lock())?;

    for name in outcome.result.winners.iter() {
        println!("{}", name);
    }

    let summary = build_summary_js(&config, &outcome);
    if let Some(out) = &args.out {
        write_summary(&summary, out)?;
    }
    if let Some(reference) = &args.reference {
        check_reference(&summary, reference)?;
    }
    Ok(())
}

#[cfg(test)]
fn run_election_test(test_name: &str, config_lpath: &str, summary_lpath: &str) -> RcvResult<()> {
    let test_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data");
    info!("Running test {}", test_name);
    let config_path = format!("{}/{}/{}", test_dir, test_name, config_lpath);
    let config = read_config(&config_path)?;
    let root = Path::new(&config_path)
        .parent()
        .context(MissingParentDirSnafu {})?;
    let outcome = tabulate(&config, root, &mut io::empty(), &mut io::sink())?;
    check_reference(
        &build_summary_js(&config, &outcome),
        &format!("{}/{}/{}", test_dir, test_name, summary_lpath),
    )
}

#[cfg(test)]
pub fn test_wrapper(test_name: &str) {
    let _ = env_logger::builder().is_test(true).try_init();
    let res = run_election_test(
        test_name,
        format!("{}_config.json", test_name).as_str(),
        format!("{}_expected_summary.json", test_name).as_str(),
    );
    if let Err(e) = res {
        panic!("{}: {} (exit code {})", test_name, e, e.exit_code());
    }
}
