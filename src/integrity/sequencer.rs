//! Stateful line sequencer.
//!
//! Sequence numbers are positional: each record's number depends on every
//! line before it back to the most recent segment boundary. The sequencer is
//! therefore a strictly sequential scan — it cannot be parallelized
//! line-by-line, and restarting mid-file without replaying from the last
//! boundary produces wrong numbers. For random access into large files,
//! capture [`Sequencer::counter`] at a known position (at or after the last
//! boundary) and rebuild with [`Sequencer::resume_at`].

use crate::integrity::record::{DELIMITER, SEGMENT_BOUNDARY};

/// Whether a trimmed line opens a new log segment (`01|...`).
fn is_boundary_line(line: &str) -> bool {
    line.strip_prefix(SEGMENT_BOUNDARY)
        .is_some_and(|rest| rest.starts_with(DELIMITER))
}

/// Assigns sequence numbers to the lines of one file scan.
///
/// State is a single counter, starting at 1. Empty lines (after trimming)
/// consume nothing; a segment-boundary line resets the counter before
/// taking its own number, so the boundary record itself is numbered 1.
/// Every other non-empty line takes the current number and advances the
/// counter — including lines the engine will later reject as malformed.
///
/// One sequencer serves one scan of one file. Create a fresh one per file.
#[derive(Debug)]
pub struct Sequencer {
    counter: u64,
}

impl Sequencer {
    /// Sequencer positioned at the start of a file.
    #[must_use]
    pub fn new() -> Self {
        Self { counter: 1 }
    }

    /// Resume a scan from a checkpointed counter value.
    ///
    /// Only sound if the checkpoint was taken at or after the most recent
    /// segment boundary; resuming from an arbitrary mid-segment position
    /// with a guessed counter yields wrong numbers for every line after it.
    #[must_use]
    pub fn resume_at(counter: u64) -> Self {
        Self { counter }
    }

    /// Current counter value — the number the next non-empty, non-boundary
    /// line would receive. Suitable as a checkpoint for [`resume_at`].
    ///
    /// [`resume_at`]: Sequencer::resume_at
    #[must_use]
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Process one raw line.
    ///
    /// Returns the trimmed line and its sequence number, or `None` for
    /// lines that are empty after trimming.
    pub fn feed<'a>(&mut self, raw: &'a str) -> Option<(&'a str, u64)> {
        let line = raw.trim();
        if line.is_empty() {
            return None;
        }
        if is_boundary_line(line) {
            self.counter = 1;
        }
        let n = self.counter;
        self.counter += 1;
        Some((line, n))
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a full sequencing pass over an iterator of raw lines.
///
/// ```
/// use logseal::integrity::sequencer::number_lines;
///
/// let lines = ["21|a|x", "", "01|b|x", "21|c|x"];
/// let numbered: Vec<u64> = number_lines(lines).map(|(_, n)| n).collect();
/// assert_eq!(numbered, [1, 1, 2]);
/// ```
pub fn number_lines<'a, I>(lines: I) -> impl Iterator<Item = (&'a str, u64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seq = Sequencer::new();
    lines.into_iter().filter_map(move |raw| seq.feed(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plain_lines_number_one_to_k() {
        let lines = ["21|a|x", "21|b|x", "21|c|x", "21|d|x"];
        let numbers: Vec<u64> = number_lines(lines).map(|(_, n)| n).collect();
        assert_eq!(numbers, [1, 2, 3, 4]);
    }

    #[test]
    fn test_boundary_resets_and_takes_one() {
        // 01, 21, 21, 21, 01, 21
        let lines = [
            "01|t|0134|Zone|c",
            "21|a|x",
            "21|b|x",
            "21|c|x",
            "01|t|0135|Zone|c",
            "21|d|x",
        ];
        let numbers: Vec<u64> = number_lines(lines).map(|(_, n)| n).collect();
        assert_eq!(numbers, [1, 2, 3, 4, 1, 2]);
    }

    #[test]
    fn test_empty_lines_consume_nothing() {
        let lines = ["21|a|x", "", "   ", "\t", "21|b|x"];
        let numbered: Vec<(&str, u64)> = number_lines(lines).collect();
        assert_eq!(numbered, [("21|a|x", 1), ("21|b|x", 2)]);
    }

    #[test]
    fn test_lines_are_trimmed() {
        let mut seq = Sequencer::new();
        let (line, n) = seq.feed("  21|a|x\r\n").unwrap();
        assert_eq!(line, "21|a|x");
        assert_eq!(n, 1);
    }

    #[test]
    fn test_undelimited_lines_still_take_a_number() {
        let lines = ["21|a|x", "garbage", "21|b|x"];
        let numbers: Vec<u64> = number_lines(lines).map(|(_, n)| n).collect();
        assert_eq!(numbers, [1, 2, 3]);
    }

    #[test]
    fn test_bare_01_is_not_a_boundary() {
        let lines = ["21|a|x", "01", "21|b|x"];
        let numbers: Vec<u64> = number_lines(lines).map(|(_, n)| n).collect();
        assert_eq!(numbers, [1, 2, 3]);
    }

    #[test]
    fn test_checkpoint_resume_matches_full_scan() {
        let lines = ["01|t|z|c", "21|a|x", "21|b|x", "21|c|x", "21|d|x"];

        let full: Vec<u64> = number_lines(lines).map(|(_, n)| n).collect();

        // Replay the first three lines, checkpoint, resume over the rest.
        let mut head = Sequencer::new();
        for raw in &lines[..3] {
            head.feed(raw);
        }
        let mut tail = Sequencer::resume_at(head.counter());
        let resumed: Vec<u64> =
            lines[3..].iter().filter_map(|raw| tail.feed(raw)).map(|(_, n)| n).collect();

        assert_eq!(resumed, full[3..]);
    }

    proptest! {
        #[test]
        fn sequence_is_one_to_k_without_boundaries(
            fields in proptest::collection::vec("[a-z0-9]{1,8}", 1..40),
        ) {
            // Build k plain records; none can start with "01|".
            let lines: Vec<String> = fields
                .iter()
                .map(|f| format!("21|{f}|code"))
                .collect();
            let numbers: Vec<u64> =
                number_lines(lines.iter().map(String::as_str)).map(|(_, n)| n).collect();
            let expected: Vec<u64> = (1..=lines.len() as u64).collect();
            prop_assert_eq!(numbers, expected);
        }

        #[test]
        fn boundary_insertion_renumbers_the_tail(
            head_len in 0usize..10,
            tail_len in 0usize..10,
        ) {
            let mut lines: Vec<String> =
                (0..head_len).map(|i| format!("21|h{i}|c")).collect();
            lines.push("01|t|z|c".to_owned());
            lines.extend((0..tail_len).map(|i| format!("21|t{i}|c")));

            let numbers: Vec<u64> =
                number_lines(lines.iter().map(String::as_str)).map(|(_, n)| n).collect();

            // Head counts 1..=head_len, the boundary restarts at 1, and the
            // tail continues 2, 3, ...
            let mut expected: Vec<u64> = (1..=head_len as u64).collect();
            expected.push(1);
            expected.extend(2..=(tail_len as u64 + 1));
            prop_assert_eq!(numbers, expected);
        }
    }
}
