//! Digit pool accumulation.
//!
//! Collects distinct tokens from a text source until enough have been
//! gathered for one tabular batch.

use super::DigitToken;
use crate::sample::{Sample, WidthClass};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Upper bound on up-front allocation; larger pools grow as tokens arrive.
const INITIAL_CAPACITY_LIMIT: usize = 1 << 16;

/// Errors that can occur while sampling the digit pool.
#[derive(Debug, Error)]
pub enum SamplerError {
    /// The source ran out before enough distinct tokens were found.
    #[error("insufficient source data: need {required} distinct tokens, source holds {available}")]
    InsufficientSourceData {
        /// Distinct tokens requested.
        required: usize,
        /// Distinct tokens the source held.
        available: usize,
    },

    /// The source file could not be opened.
    #[error("failed to open digit source {path}: {source}")]
    Open {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// Reading the source failed midway.
    #[error("failed to read digit source: {0}")]
    Io(#[from] io::Error),
}

/// Reads distinct digit tokens from a whitespace-separated source.
///
/// Deduplication is by token text. Tokens are kept in order of first
/// appearance, and reading stops at the end of the first line that
/// brings the distinct count to `required`; the overshoot from that
/// line is truncated away.
#[derive(Debug, Default)]
pub struct DigitPoolSampler {
    /// Lines consumed by the last call.
    lines_read: usize,
    /// Non-digit tokens skipped by the last call.
    skipped: usize,
}

impl DigitPoolSampler {
    /// Creates a sampler with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects exactly `required` distinct tokens from `source`.
    ///
    /// Fails with [`SamplerError::InsufficientSourceData`] if the source
    /// runs dry first; no partial pool is returned.
    pub fn sample<R: BufRead>(
        &mut self,
        required: usize,
        source: R,
    ) -> Result<Vec<DigitToken>, SamplerError> {
        self.lines_read = 0;
        self.skipped = 0;

        let capacity = required.min(INITIAL_CAPACITY_LIMIT);
        let mut seen: HashSet<DigitToken> = HashSet::with_capacity(capacity);
        let mut pool: Vec<DigitToken> = Vec::with_capacity(capacity);

        if required > 0 {
            for line in source.lines() {
                let line = line?;
                self.lines_read += 1;

                for word in line.split_whitespace() {
                    match DigitToken::parse(word) {
                        Some(token) => {
                            if seen.insert(token.clone()) {
                                pool.push(token);
                            }
                        }
                        None => self.skipped += 1,
                    }
                }

                if pool.len() >= required {
                    break;
                }
            }
        }

        if self.skipped > 0 {
            tracing::warn!(skipped = self.skipped, "Skipped non-numeric tokens in digit source");
        }

        if pool.len() < required {
            return Err(SamplerError::InsufficientSourceData {
                required,
                available: pool.len(),
            });
        }

        pool.truncate(required);

        tracing::debug!(
            tokens = pool.len(),
            lines_read = self.lines_read,
            "Collected digit pool"
        );

        Ok(pool)
    }

    /// Collects exactly `required` distinct tokens from the file at `path`.
    pub fn sample_file(
        &mut self,
        required: usize,
        path: impl AsRef<Path>,
    ) -> Result<Vec<DigitToken>, SamplerError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SamplerError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.sample(required, BufReader::new(file))
    }

    /// Lines consumed by the last call.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Non-digit tokens skipped by the last call.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Shuffles the pool and splits it into one sample per width class.
///
/// The pool is cut into three contiguous slices of `pool.len() / 3`
/// tokens; any remainder is dropped. Slice `i` maps to `WidthClass::ALL[i]`.
pub fn split_into_classes<R: Rng + ?Sized>(
    mut pool: Vec<DigitToken>,
    rng: &mut R,
) -> [Sample; 3] {
    pool.shuffle(rng);
    let per_class = pool.len() / 3;

    std::array::from_fn(|i| {
        let class = WidthClass::ALL[i];
        let values = pool[i * per_class..(i + 1) * per_class]
            .iter()
            .map(|token| class.from_residue(token.residue(class.span())))
            .collect();
        Sample::from_class_unchecked(values, class)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::io::Cursor;

    fn tokens(pool: &[DigitToken]) -> Vec<&str> {
        pool.iter().map(DigitToken::as_str).collect()
    }

    #[test]
    fn test_dedup_keeps_first_appearance_order() {
        let source = Cursor::new("5 3 5 9\n3 1 7\n");
        let mut sampler = DigitPoolSampler::new();

        let pool = sampler.sample(5, source).unwrap();
        assert_eq!(tokens(&pool), ["5", "3", "9", "1", "7"]);
    }

    #[test]
    fn test_overshoot_is_truncated() {
        let source = Cursor::new("1 2\n3 4 5 6\n7 8\n");
        let mut sampler = DigitPoolSampler::new();

        let pool = sampler.sample(3, source).unwrap();
        assert_eq!(tokens(&pool), ["1", "2", "3"]);
        // Stopped after the second line
        assert_eq!(sampler.lines_read(), 2);
    }

    #[test]
    fn test_textual_dedup() {
        let source = Cursor::new("7 07 007 7\n");
        let mut sampler = DigitPoolSampler::new();

        let pool = sampler.sample(3, source).unwrap();
        assert_eq!(tokens(&pool), ["7", "07", "007"]);
    }

    #[test]
    fn test_exhausted_source_fails() {
        let source = Cursor::new("1 2 2 3\n1\n");
        let mut sampler = DigitPoolSampler::new();

        assert!(matches!(
            sampler.sample(4, source),
            Err(SamplerError::InsufficientSourceData {
                required: 4,
                available: 3
            })
        ));
    }

    #[test]
    fn test_huge_request_on_short_source_fails_cleanly() {
        let mut sampler = DigitPoolSampler::new();

        assert!(matches!(
            sampler.sample(usize::MAX / 2, Cursor::new("1 2 3\n")),
            Err(SamplerError::InsufficientSourceData { available: 3, .. })
        ));
    }

    #[test]
    fn test_non_numeric_tokens_skipped() {
        let source = Cursor::new("12 abc 34\n-5 56\n");
        let mut sampler = DigitPoolSampler::new();

        let pool = sampler.sample(3, source).unwrap();
        assert_eq!(tokens(&pool), ["12", "34", "56"]);
        assert_eq!(sampler.skipped(), 2);
    }

    #[test]
    fn test_missing_file() {
        let mut sampler = DigitPoolSampler::new();
        assert!(matches!(
            sampler.sample_file(3, "/definitely/not/here/digits.txt"),
            Err(SamplerError::Open { .. })
        ));
    }

    #[test]
    fn test_split_maps_into_classes() {
        let pool: Vec<DigitToken> = (1000..1030)
            .map(|n| DigitToken::parse(&n.to_string()).unwrap())
            .collect();
        let mut rng = ChaCha20Rng::seed_from_u64(7);

        let samples = split_into_classes(pool, &mut rng);
        for (sample, class) in samples.iter().zip(WidthClass::ALL) {
            assert_eq!(sample.len(), 10);
            assert_eq!(sample.width_class(), Some(class));
            assert!(sample.values().iter().all(|v| class.range().contains(v)));
        }
    }

    #[test]
    fn test_split_drops_remainder() {
        let pool: Vec<DigitToken> = (0..32)
            .map(|n| DigitToken::parse(&n.to_string()).unwrap())
            .collect();
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        let samples = split_into_classes(pool, &mut rng);
        assert!(samples.iter().all(|s| s.len() == 10));
    }

    #[test]
    fn test_split_same_seed_same_samples() {
        let pool: Vec<DigitToken> = (0..300)
            .map(|n| DigitToken::parse(&n.to_string()).unwrap())
            .collect();

        let first = split_into_classes(pool.clone(), &mut ChaCha20Rng::seed_from_u64(9));
        let second = split_into_classes(pool, &mut ChaCha20Rng::seed_from_u64(9));
        assert_eq!(first, second);
    }
}
