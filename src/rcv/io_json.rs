// Ballots stored as a JSON document:
// { "ballots": [ ["Alice", "Bob"], ["Bob", "Alice"] ] }

use serde::Deserialize;

use crate::rcv::{io_common::make_default_id, *};

#[derive(Debug, Deserialize)]
struct BallotFile {
    ballots: Vec<Vec<String>>,
}

pub fn read_json_ranking(path: &str) -> RcvResult<Vec<ParsedBallot>> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let bf: BallotFile =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_json_ranking: {} ballots in {}", bf.ballots.len(), path);
    let default_id = make_default_id(path);
    Ok(bf
        .ballots
        .into_iter()
        .enumerate()
        .map(|(idx, choices)| ParsedBallot {
            id: Some(default_id(idx + 1)),
            choices,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_ballots() {
        let p = std::env::temp_dir().join("tideman_io_json.json");
        fs::write(&p, r#"{ "ballots": [ ["A", "B"], ["B", "A"], [] ] }"#).unwrap();
        let path = p.display().to_string();
        let ballots = read_json_ranking(&path).unwrap();
        assert_eq!(ballots.len(), 3);
        assert_eq!(ballots[1].choices, vec!["B".to_string(), "A".to_string()]);
        assert!(ballots[2].choices.is_empty());
        assert_eq!(ballots[0].id.as_deref(), Some("tideman_io_json.json-00000001"));
    }

    #[test]
    fn rejects_other_documents() {
        let p = std::env::temp_dir().join("tideman_io_json_bad.json");
        fs::write(&p, r#"{ "votes": [] }"#).unwrap();
        let err = read_json_ranking(&p.display().to_string()).unwrap_err();
        assert!(matches!(err, RcvError::ParsingJson { .. }));
    }
}
