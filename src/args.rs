use clap::Parser;

/// This is a ranked pairs (Tideman) election program.
///
/// Without an input file, the votes are entered interactively.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// The names of the candidates (at most 9). Cannot be combined with --config.
    #[clap(value_parser)]
    pub candidates: Vec<String>,

    /// (file path, optional) The file containing the election description in JSON format.
    /// The paths of the ballot files it lists are relative to its directory.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the outcome of an election in JSON format. If provided, tideman will
    /// check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path or 'stdout') If specified, the summary of the election will be written in JSON format to the given
    /// location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) If specified, the ballots are read from this file. Setting this option overrides the ballot
    /// files that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: csv or json.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (useCandidateOrder or random) How pairs with the same margin are ordered.
    #[clap(long, value_parser)]
    pub tiebreak: Option<String>,

    /// The seed of the random tiebreak.
    #[clap(long, value_parser)]
    pub seed: Option<u32>,

    /// If passed as an argument, invalid ballots are reported and left out instead of stopping the count.
    #[clap(long, takes_value = false)]
    pub skip_invalid_ballots: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_candidates() {
        let args = Args::parse_from(["tideman", "Alice", "Bob", "--seed", "4", "--verbose"]);
        assert_eq!(args.candidates, vec!["Alice".to_string(), "Bob".to_string()]);
        assert_eq!(args.seed, Some(4));
        assert!(args.verbose);
        assert!(!args.skip_invalid_ballots);
        assert_eq!(args.config, None);
    }
}
