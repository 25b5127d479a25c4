use crate::domain::values::confidence::Confidence;
use crate::domain::values::embedding::FeatureVector;
use log::{debug, warn};

/// Minimum cosine similarity for an identification to succeed.
pub const MATCH_THRESHOLD: f64 = 0.85;

/// One enrolled subject offered to the matcher, with its embedding still in
/// stored (serialized) form.
#[derive(Debug, Clone)]
pub struct Candidate<R> {
    pub key: String,
    pub record: R,
    pub embedding: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome<R> {
    Matched { record: R, confidence: Confidence },
    NoMatch,
}

/// Scans candidates in the order given and keeps the highest-scoring one that
/// meets `threshold`.
///
/// A candidate replaces the current best only with a strictly higher score,
/// so on ties the earlier candidate wins. Candidates whose embedding cannot
/// be decoded are logged and skipped.
pub fn find_best_match<R, I>(
    probe: &FeatureVector,
    candidates: I,
    threshold: f64,
) -> MatchOutcome<R>
where
    I: IntoIterator<Item = Candidate<R>>,
{
    let mut best_score = 0.0_f64;
    let mut best: Option<R> = None;
    let mut scanned = 0usize;
    let mut skipped = 0usize;

    for candidate in candidates {
        scanned += 1;
        let stored = match FeatureVector::decode(&candidate.embedding) {
            Ok(v) => v,
            Err(e) => {
                skipped += 1;
                warn!("Error parsing embedding for driver {}: {e}", candidate.key);
                continue;
            }
        };

        let score = probe.similarity(&stored);
        if score > best_score && score >= threshold {
            best_score = score;
            best = Some(candidate.record);
        }
    }

    debug!(
        "scanned {scanned} candidates ({skipped} skipped) against a {}-d probe, best score {best_score:.4}, threshold {threshold}",
        probe.dimension()
    );

    match best {
        Some(record) => MatchOutcome::Matched {
            record,
            confidence: Confidence::saturating(best_score),
        },
        None => MatchOutcome::NoMatch,
    }
}
