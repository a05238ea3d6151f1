mod args;
mod rcv;

use clap::Parser;
use log::{debug, error};
use ranked_pairs::VotingErrors;

use crate::args::Args;
use crate::rcv::RcvError;

/// A reminder of the command line, when the candidates were missing from it.
fn usage_hint(args: &Args, e: &RcvError) -> Option<&'static str> {
    match e {
        RcvError::Configuration {
            source: VotingErrors::EmptyElection {},
        } if args.config.is_none() => Some("Usage: tideman [CANDIDATES]..."),
        _ => None,
    }
}

fn main() {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    debug!("args: {:?}", args);

    if let Err(e) = rcv::run_election(&args) {
        error!("Election failed: {:?}", e);
        eprintln!("{}", e);
        if let Some(hint) = usage_hint(&args, &e) {
            eprintln!("{}", hint);
        }
        std::process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_election() -> RcvError {
        RcvError::Configuration {
            source: VotingErrors::EmptyElection {},
        }
    }

    #[test]
    fn usage_hint_only_without_config() {
        let args = Args::parse_from(["tideman"]);
        assert!(usage_hint(&args, &empty_election()).is_some());

        let args = Args::parse_from(["tideman", "--config", "election.json"]);
        assert_eq!(usage_hint(&args, &empty_election()), None);

        let other = RcvError::ReferenceMismatch {};
        assert_eq!(usage_hint(&Args::parse_from(["tideman"]), &other), None);
    }
}
