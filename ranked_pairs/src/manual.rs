/*!

This is the long-form manual for `ranked_pairs` and the `tideman` program.

## The method

Each voter ranks every candidate, from the most preferred to the least preferred.
Partial rankings are not accepted: a ballot that skips or repeats a candidate is
rejected as a whole.

1. **Tally.** For every two candidates `X` and `Y`, count the ballots that place `X` above `Y`.
2. **Pairs.** Whenever more ballots prefer `X` over `Y` than the opposite, `X` wins the pair
   with a margin equal to the difference. A head-to-head tie produces no pair.
3. **Ranking.** Pairs are sorted from the largest margin to the smallest.
4. **Locking.** Pairs are considered in that order. The victory of `X` over `Y` is locked in,
   unless `Y` already beats `X` through a chain of locked victories. Such a pair is
   skipped for good.
5. **Winners.** The winners are the candidates that have no locked defeat against them.

With a complete set of ballots there is usually exactly one winner. When head-to-head
races end in ties, several candidates can be left without a defeat; all of them are reported.

### Pairs with the same margin

The order of the pairs with the same margin can change the outcome. Two modes are available:
- `useCandidateOrder` (default): by the order of the winner in the candidate list, then by the
  order of the loser.
- `random`: by a SHA-256 hash of a seed and the candidate names. The order cannot be guessed
  without the seed, but running the election again with the same seed gives the same result.

## Running `tideman`

The candidates are given on the command line. Without any other option, the votes are
entered interactively:

```text
$ tideman Alice Bob Charlie
Number of voters: 3
Rank 1: Alice
Rank 2: Bob
Rank 3: Charlie

Rank 1: Alice
Rank 2: Bob
Rank 3: Charlie

Rank 1: Charlie
Rank 2: Bob
Rank 3: Alice

Alice
```

The names of the winners are printed one per line, in the order of the candidates.

At most 9 candidates are accepted. The exit code is:
- `1` when no candidate is given,
- `2` when too many candidates are given,
- `3` when a vote is invalid,
- `4` for other errors (unreadable files, reference mismatch).

## Input formats

Ballots can also be read from a file with `--input` and `--input-type`.

### `csv`

One ballot per row, one candidate name per column, from the most preferred to the least
preferred. Empty cells are ignored. Spaces around a name are removed before the name is
matched against the candidates, so `Alice, Bob ,Charlie` is the same ballot as
`Alice,Bob,Charlie`. Everywhere else, names must match exactly.

```text
Alice,Bob,Charlie
Alice,Bob,Charlie
Charlie,Bob,Alice
```

### `json`

```text
{ "ballots": [ ["Alice", "Bob", "Charlie"], ["Charlie", "Bob", "Alice"] ] }
```

## Configuration

An election can be fully described in a JSON file passed with `--config`. Paths are relative
to the configuration file.

```text
{
  "outputSettings": { "contestName": "Board election" },
  "cvrFileSources": [
    { "provider": "csv", "filePath": "ballots.csv", "firstVoteColumnIndex": 2, "firstVoteRowIndex": 2, "idColumnIndex": 1 }
  ],
  "candidates": [ { "name": "Alice" }, { "name": "Bob" }, { "name": "Charlie" } ],
  "rules": { "tiebreakMode": "useCandidateOrder", "invalidBallotMode": "abort" }
}
```

FileSource:
 - `provider`: `csv` or `json`
 - `firstVoteColumnIndex` (string or number, optional, starts at 1): the first column with a name.
 - `firstVoteRowIndex` (string or number, optional, starts at 1): the first row with a ballot.
   Use `2` to skip a header.
 - `idColumnIndex` (string or number, optional): the column holding the ballot identifier,
   used in error messages.

Rules:
 - `tiebreakMode`: `useCandidateOrder` or `random`
 - `randomSeed`: a number, required by the `random` mode
 - `invalidBallotMode`: `abort` (default) stops at the first invalid ballot, `skip`
   reports invalid ballots and counts the others. Votes entered interactively always stop at
   the first invalid vote.

The command line options `--tiebreak`, `--seed` and `--skip-invalid-ballots` override these rules.

## Summary

`--out` writes a JSON summary of the election: the preferences, every pair with its margin
and whether it was locked, and the winners. `--reference` compares this summary to a
previously saved one and fails if they differ.

 */
