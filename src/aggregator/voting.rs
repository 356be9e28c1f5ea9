//! Confidence-weighted voting over the prediction history.

use crate::defaults;

/// Votes collected for one label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTally<'a> {
    pub label: &'a str,
    pub count: usize,
    pub confidence_sum: f32,
}

impl LabelTally<'_> {
    pub fn mean_confidence(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            self.confidence_sum / self.count as f32
        }
    }

    /// `count × mean(confidence)`.
    pub fn score(&self) -> f32 {
        self.count as f32 * self.mean_confidence()
    }
}

/// Winning label of a vote.
#[derive(Debug, Clone, PartialEq)]
pub struct Vote {
    pub label: String,
    /// `mean × (0.5 + 0.5 × consistency)`, at most 1.
    pub confidence: f32,
    /// Share of the history held by the winner.
    pub consistency: f32,
    pub score: f32,
}

/// Groups the history by label, in order of first appearance.
pub fn tally<'a, I>(history: I) -> Vec<LabelTally<'a>>
where
    I: IntoIterator<Item = &'a (String, f32)>,
{
    let mut tallies: Vec<LabelTally<'a>> = Vec::new();
    for (label, confidence) in history {
        let label = label.as_str();
        match tallies.iter_mut().find(|t| t.label == label) {
            Some(t) => {
                t.count += 1;
                t.confidence_sum += *confidence;
            }
            None => tallies.push(LabelTally {
                label,
                count: 1,
                confidence_sum: *confidence,
            }),
        }
    }
    tallies
}

/// Picks the highest-scoring label.
///
/// Abstains with fewer than two samples or when the winner holds less than
/// 40% of the history. Ties go to the label seen first.
pub fn vote<'a, I>(history: I) -> Option<Vote>
where
    I: IntoIterator<Item = &'a (String, f32)>,
{
    let tallies = tally(history);
    let total: usize = tallies.iter().map(|t| t.count).sum();
    if total < defaults::MIN_VOTE_SAMPLES {
        return None;
    }

    let mut best: Option<&LabelTally<'_>> = None;
    let mut best_score = 0.0f32;
    for t in &tallies {
        let score = t.score();
        if score > best_score {
            best_score = score;
            best = Some(t);
        }
    }
    let winner = best?;

    let consistency = winner.count as f32 / total as f32;
    if consistency < defaults::MIN_VOTE_CONSISTENCY {
        tracing::trace!(
            label = winner.label,
            consistency,
            "Vote rejected for low consistency"
        );
        return None;
    }

    let confidence = (winner.mean_confidence() * (0.5 + 0.5 * consistency)).min(1.0);
    tracing::trace!(label = winner.label, confidence, consistency, "Vote");
    Some(Vote {
        label: winner.label.to_string(),
        confidence,
        consistency,
        score: best_score,
    })
}
