// Interactive collection of votes: the number of voters, then one name per rank.

use std::io::{BufRead, Write};

use crate::rcv::*;

/// Reads one line, without its line ending. Fails at the end of the input.
fn read_answer<R: BufRead>(input: &mut R) -> RcvResult<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context(PromptIoSnafu {})?;
    ensure!(read > 0, PromptEofSnafu {});
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> RcvResult<String> {
    write!(output, "{}", text).context(PromptIoSnafu {})?;
    output.flush().context(PromptIoSnafu {})?;
    read_answer(input)
}

/// Asks for the number of voters until a non-negative integer is given.
fn prompt_voter_count<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> RcvResult<usize> {
    loop {
        let answer = prompt(input, output, "Number of voters: ")?;
        match answer.trim().parse::<usize>() {
            Ok(n) => return Ok(n),
            Err(_) => debug!("prompt_voter_count: not a number: {:?}", answer),
        }
    }
}

/// Collects the votes interactively and adds them to the builder as they come.
///
/// Every voter is asked for one candidate name per rank. Names must match a
/// candidate exactly: an unknown name stops the collection at once, without
/// asking for the remaining ranks. The first invalid vote stops the collection.
pub fn read_prompt_votes<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    num_candidates: usize,
    builder: &mut Builder,
) -> RcvResult<()> {
    let voter_count = prompt_voter_count(input, output)?;
    info!("Collecting {} votes", voter_count);
    for voter in 0..voter_count {
        let mut choices: Vec<String> = Vec::with_capacity(num_candidates);
        let id = format!("voter {}", voter + 1);
        for rank in 0..num_candidates {
            let name = prompt(input, output, &format!("Rank {}: ", rank + 1))?;
            builder
                .candidate_id(&name)
                .context(InvalidBallotSnafu { id: id.as_str() })?;
            choices.push(name);
        }
        builder
            .add_vote_simple(&choices)
            .context(InvalidBallotSnafu { id })?;
        writeln!(output).context(PromptIoSnafu {})?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn builder(names: &[&str]) -> Builder {
        let names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        Builder::new(&VoteRules::DEFAULT_RULES)
            .unwrap()
            .candidates(&names)
            .unwrap()
    }

    #[test]
    fn collects_votes() {
        let mut b = builder(&["Alice", "Bob"]);
        let mut input = Cursor::new("x\n2\nAlice\nBob\r\nBob\nAlice\n");
        let mut output: Vec<u8> = Vec::new();
        read_prompt_votes(&mut input, &mut output, 2, &mut b).unwrap();
        assert_eq!(b.num_ballots(), 2);
        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "Number of voters: Number of voters: Rank 1: Rank 2: \nRank 1: Rank 2: \n"
        );
    }

    #[test]
    fn stops_at_invalid_vote() {
        let mut b = builder(&["Alice", "Bob"]);
        let mut input = Cursor::new("2\nAlice\nBob\nAlice\nCarol\nBob\nAlice\n");
        let mut output: Vec<u8> = Vec::new();
        let err = read_prompt_votes(&mut input, &mut output, 2, &mut b).unwrap_err();
        match err {
            RcvError::InvalidBallot { id, source } => {
                assert_eq!(id, "voter 2");
                assert_eq!(
                    source,
                    VotingErrors::UnknownCandidate {
                        ballot: 2,
                        name: "Carol".to_string()
                    }
                );
            }
            e => panic!("unexpected error {:?}", e),
        }
        assert_eq!(b.num_ballots(), 1);
    }

    #[test]
    fn unknown_name_stops_at_once() {
        let mut b = builder(&["A", "B"]);
        let mut input = Cursor::new("1\nZ\n");
        let mut output: Vec<u8> = Vec::new();
        let err = read_prompt_votes(&mut input, &mut output, 2, &mut b).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        match err {
            RcvError::InvalidBallot { id, source } => {
                assert_eq!(id, "voter 1");
                assert_eq!(
                    source,
                    VotingErrors::UnknownCandidate {
                        ballot: 1,
                        name: "Z".to_string()
                    }
                );
            }
            e => panic!("unexpected error {:?}", e),
        }
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Number of voters: Rank 1: "
        );
    }

    #[test]
    fn end_of_input() {
        let mut b = builder(&["Alice", "Bob"]);
        let mut input = Cursor::new("1\nAlice\n");
        let mut output: Vec<u8> = Vec::new();
        let err = read_prompt_votes(&mut input, &mut output, 2, &mut b).unwrap_err();
        assert!(matches!(err, RcvError::PromptEof {}));
    }
}
