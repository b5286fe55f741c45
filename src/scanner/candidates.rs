//! Candidate sources: what string to validate once bars are seen

use rand::seq::SliceRandom;

/// Codes handed out by [`MockCandidates`]
pub const MOCK_CODES: [&str; 5] = [
    "TEST8898777",
    "123456789012",
    "CODE128DEMO",
    "2024022400001",
    "BARCODE001",
];

pub trait CandidateSource: Send {
    fn next_candidate(&mut self) -> String;
}

/// Random pick from a fixed list of demo codes
#[derive(Default)]
pub struct MockCandidates;

impl CandidateSource for MockCandidates {
    fn next_candidate(&mut self) -> String {
        let mut rng = rand::thread_rng();
        MOCK_CODES
            .choose(&mut rng)
            .copied()
            .unwrap_or(MOCK_CODES[0])
            .to_string()
    }
}

/// Hands out a fixed sequence of candidates in order, repeating the last one
#[cfg(test)]
pub struct ScriptedCandidates {
    queue: Vec<String>,
    position: usize,
}

#[cfg(test)]
impl ScriptedCandidates {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: candidates.into_iter().map(Into::into).collect(),
            position: 0,
        }
    }
}

#[cfg(test)]
impl CandidateSource for ScriptedCandidates {
    fn next_candidate(&mut self) -> String {
        let Some(last) = self.queue.len().checked_sub(1) else {
            return String::new();
        };
        let candidate = self.queue[self.position.min(last)].clone();
        self.position += 1;
        candidate
    }
}
