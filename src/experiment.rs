//! Tabular vs. algorithmic comparison runs.
//!
//! A run validates its configuration, produces one sample per width
//! class with each method, and scores all six samples with the same
//! coefficient so the two methods can be compared directly.
//!
//! The two methods share no state: the algorithmic batch owns a fresh
//! generator and the tabular batch owns its own pool and shuffle RNG.

use crate::analysis::{
    Coefficient, Diagnostics, QualityThresholds, RandomnessCoefficient, ThresholdViolation,
};
use crate::config::{ConfigError, RunConfig};
use crate::error::Result;
use crate::generator::CongruentialGenerator;
use crate::sample::{Sample, WidthClass};
use crate::sampling::{split_into_classes, DigitPoolSampler, SamplerError};
use chrono::{DateTime, Utc};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a batch of numbers was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Sampled from pre-existing digit material.
    Tabular,
    /// Computed by the congruential generator.
    Algorithmic,
}

impl Method {
    /// Column heading used in the report table.
    pub const fn label(self) -> &'static str {
        match self {
            Method::Tabular => "TABULAR METHOD",
            Method::Algorithmic => "ALGORITHMIC METHOD",
        }
    }
}

/// Draws one sample per width class from a fresh generator.
///
/// The generator is shared across the three classes in order, so the
/// two-digit sample continues the recurrence where the one-digit sample
/// stopped.
pub fn algorithmic_batch(config: &RunConfig) -> std::result::Result<[Sample; 3], ConfigError> {
    config.validate()?;
    let mut generator = CongruentialGenerator::new(config.generator)?;

    let samples = WidthClass::ALL.map(|class| generator.draw_sample(class, config.count));

    tracing::debug!(
        draws = generator.draws(),
        final_state = generator.state(),
        "Algorithmic batch complete"
    );

    Ok(samples)
}

/// Samples `3 * count` distinct tokens, shuffles them, and splits them
/// into one sample per width class.
pub fn tabular_batch<R: Rng + ?Sized>(
    config: &RunConfig,
    rng: &mut R,
) -> std::result::Result<[Sample; 3], SamplerError> {
    let mut sampler = DigitPoolSampler::new();
    let pool = sampler.sample_file(config.required_tokens(), &config.source_path)?;

    tracing::debug!(
        tokens = pool.len(),
        lines_read = sampler.lines_read(),
        source = %config.source_path.display(),
        "Tabular pool collected"
    );

    Ok(split_into_classes(pool, rng))
}

/// One scored sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSample {
    /// Width class the sample was drawn for.
    pub class: WidthClass,
    /// Uniformity score.
    pub coefficient: Coefficient,
    /// Descriptive figures reported next to the score.
    pub diagnostics: Diagnostics,
    /// First threshold the score missed, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<ThresholdViolation>,
    /// The scored values.
    pub sample: Sample,
}

/// The three scored samples of one method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodReport {
    /// Method that produced the samples.
    pub method: Method,
    /// One entry per width class, in [`WidthClass::ALL`] order.
    pub samples: Vec<ScoredSample>,
}

impl MethodReport {
    /// Scored sample of one width class.
    pub fn get(&self, class: WidthClass) -> Option<&ScoredSample> {
        self.samples.iter().find(|s| s.class == class)
    }

    /// Coefficients in width-class order.
    pub fn coefficients(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.coefficient.value).collect()
    }

    /// True if every sample met the thresholds.
    pub fn all_passed(&self) -> bool {
        self.samples.iter().all(|s| s.violation.is_none())
    }
}

/// Outcome of a full comparison run: six (sample, coefficient) pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// When the run finished.
    pub generated_at: DateTime<Utc>,
    /// Configuration the run used.
    pub config: RunConfig,
    /// Thresholds the scores were checked against.
    pub thresholds: QualityThresholds,
    /// Samples from the digit source.
    pub tabular: MethodReport,
    /// Samples from the congruential generator.
    pub algorithmic: MethodReport,
}

impl Report {
    /// Side-by-side text table of the first `rows` rows of both methods,
    /// followed by the coefficients rounded to two places.
    pub fn table(&self, rows: usize) -> Table<'_> {
        Table {
            report: self,
            rows: rows.min(self.config.count),
        }
    }

    /// Renders [`table`](Self::table) into a string.
    pub fn render_table(&self, rows: usize) -> String {
        self.table(rows).to_string()
    }

    /// Serializes the whole report as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Text rendering of a [`Report`], built by [`Report::table`].
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    report: &'a Report,
    rows: usize,
}

impl Table<'_> {
    fn row(method: &MethodReport, row: usize) -> String {
        let cells: String = method
            .samples
            .iter()
            .map(|scored| match scored.sample.values().get(row) {
                Some(value) => format!(" {:>10}", value),
                None => format!(" {:>10}", ""),
            })
            .collect();
        format!("{:>6}{}", row + 1, cells)
    }

    fn coefficients(method: &MethodReport) -> String {
        let cells: String = method
            .samples
            .iter()
            .map(|scored| format!(" {:>10}", scored.coefficient.to_string()))
            .collect();
        format!("{:>6}{}", "Coeff.", cells)
    }
}

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Report {
            tabular,
            algorithmic,
            ..
        } = self.report;

        writeln!(f, "{:<45}{}", tabular.method.label(), algorithmic.method.label())?;

        let header = format!("{:>6} {:>10} {:>10} {:>10}", "#", "1 digit", "2 digits", "3 digits");
        writeln!(f, "{:<45}{}", header, header)?;

        for row in 0..self.rows {
            writeln!(f, "{:<45}{}", Self::row(tabular, row), Self::row(algorithmic, row))?;
        }

        writeln!(
            f,
            "{:<45}{}",
            Self::coefficients(tabular),
            Self::coefficients(algorithmic)
        )?;

        for method in [tabular, algorithmic] {
            for scored in &method.samples {
                if let Some(violation) = &scored.violation {
                    writeln!(
                        f,
                        "warning: {} / {}: {}",
                        method.method.label().to_lowercase(),
                        scored.class,
                        violation
                    )?;
                }
            }
        }

        Ok(())
    }
}

/// Runs and scores comparison batches.
#[derive(Debug, Clone, Default)]
pub struct Experiment {
    scorer: RandomnessCoefficient,
    thresholds: QualityThresholds,
}

impl Experiment {
    /// Creates an experiment checking scores against `thresholds`.
    pub fn new(thresholds: QualityThresholds) -> Self {
        Self {
            scorer: RandomnessCoefficient::new(),
            thresholds,
        }
    }

    /// Runs both methods and scores all six samples.
    ///
    /// The shuffle RNG is seeded from `config.shuffle_seed` when set and
    /// from OS entropy otherwise.
    pub fn run(&self, config: &RunConfig) -> Result<Report> {
        let mut rng = match config.shuffle_seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        self.run_with_rng(config, &mut rng)
    }

    /// Runs both methods with a caller-supplied shuffle RNG.
    pub fn run_with_rng<R: Rng + ?Sized>(&self, config: &RunConfig, rng: &mut R) -> Result<Report> {
        config.validate()?;

        tracing::info!(
            count = config.count,
            a = config.generator.multiplier,
            b = config.generator.increment,
            c = config.generator.modulus,
            "Starting comparison run"
        );

        let algorithmic = self.score_batch(Method::Algorithmic, algorithmic_batch(config)?)?;
        let tabular = self.score_batch(Method::Tabular, tabular_batch(config, rng)?)?;

        tracing::info!(
            algorithmic = ?algorithmic.coefficients(),
            tabular = ?tabular.coefficients(),
            "Comparison run complete"
        );

        Ok(Report {
            generated_at: Utc::now(),
            config: config.clone(),
            thresholds: self.thresholds.clone(),
            tabular,
            algorithmic,
        })
    }

    /// Scores the three samples of one method.
    pub fn score_batch(&self, method: Method, samples: [Sample; 3]) -> Result<MethodReport> {
        let samples = samples
            .into_iter()
            .zip(WidthClass::ALL)
            .map(|(sample, class)| -> Result<ScoredSample> {
                let (coefficient, diagnostics) = self.scorer.score_with_diagnostics(&sample)?;
                let violation = self.thresholds.check(&coefficient).err();

                if let Some(ref violation) = violation {
                    tracing::warn!(
                        method = ?method,
                        class = %class,
                        violation = %violation,
                        "Sample below quality threshold"
                    );
                }

                Ok(ScoredSample {
                    class,
                    coefficient,
                    diagnostics,
                    violation,
                    sample,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(MethodReport { method, samples })
    }

    /// Scores a hand-entered list of values.
    ///
    /// The declared range is `[low, high)` when given, otherwise the
    /// narrowest width class holding every value.
    pub fn score_values(
        &self,
        values: Vec<u64>,
        range: Option<(u64, u64)>,
    ) -> Result<(Coefficient, Diagnostics)> {
        let sample = match range {
            Some((low, high)) => Sample::new(values, low, high)?,
            None => Sample::infer(values)?,
        };
        Ok(self.scorer.score_with_diagnostics(&sample)?)
    }

    /// Thresholds scores are checked against.
    pub fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::generator::GeneratorParams;
    use crate::sample::SampleError;
    use std::io::Write;

    fn digit_file(tokens: usize) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for chunk in (0..tokens).collect::<Vec<_>>().chunks(10) {
            let line: Vec<String> = chunk.iter().map(|n| (n * 7919 + 13).to_string()).collect();
            writeln!(file, "{}", line.join(" ")).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_algorithmic_batch_shares_generator() {
        let params = GeneratorParams::new(5, 3, 16).with_seed(7);
        let config = RunConfig::new(10, params);

        let [one, two, _] = algorithmic_batch(&config).unwrap();

        let mut lcg = CongruentialGenerator::new(params).unwrap();
        let expected_one: Vec<u64> = (0..10).map(|_| lcg.draw(0, 10)).collect();
        let expected_two: Vec<u64> = (0..10).map(|_| lcg.draw(10, 100)).collect();
        assert_eq!(one.values(), expected_one.as_slice());
        assert_eq!(two.values(), expected_two.as_slice());
    }

    #[test]
    fn test_run_produces_six_pairs() {
        let file = digit_file(90);
        let config = RunConfig::new(30, GeneratorParams::default())
            .with_source(file.path())
            .with_shuffle_seed(3);

        let report = Experiment::default().run(&config).unwrap();
        for method in [&report.tabular, &report.algorithmic] {
            assert_eq!(method.samples.len(), 3);
            for (scored, class) in method.samples.iter().zip(WidthClass::ALL) {
                assert_eq!(scored.class, class);
                assert_eq!(scored.sample.len(), 30);
                assert!((0.0..=1.0).contains(&scored.coefficient.value));
                assert!(scored.diagnostics.missing_values < scored.sample.span() as usize);
            }
        }
    }

    #[test]
    fn test_fixed_shuffle_seed_reproducible() {
        let file = digit_file(60);
        let config = RunConfig::new(20, GeneratorParams::default())
            .with_source(file.path())
            .with_shuffle_seed(11);

        let first = Experiment::default().run(&config).unwrap();
        let second = Experiment::default().run(&config).unwrap();
        assert_eq!(first.tabular, second.tabular);
        assert_eq!(first.algorithmic, second.algorithmic);
    }

    #[test]
    fn test_degenerate_generator_flagged_not_failed() {
        let file = digit_file(30);
        let config = RunConfig::new(10, GeneratorParams::new(1, 1, 2))
            .with_source(file.path())
            .with_shuffle_seed(0);

        // States alternate 0, 1 so the three-digit sample is 100, 101, ...
        let report = Experiment::default().run(&config).unwrap();
        let three = report.algorithmic.get(WidthClass::ThreeDigit).unwrap();
        assert!(three.violation.is_some());
        assert!(!report.algorithmic.all_passed());
    }

    #[test]
    fn test_score_values_infers_class() {
        let experiment = Experiment::default();
        let (coeff, diagnostics) = experiment
            .score_values((0..100).map(|i| i % 10).collect(), None)
            .unwrap();
        assert_eq!(coeff.degrees_of_freedom, 9);
        assert_eq!(diagnostics.missing_values, 0);

        let (coeff, diagnostics) = experiment.score_values(vec![3, 42], Some((0, 100))).unwrap();
        assert_eq!(coeff.degrees_of_freedom, 99);
        assert_eq!(diagnostics.missing_values, 98);

        assert!(matches!(
            experiment.score_values(vec![3, 42], None),
            Err(Error::Sample(SampleError::NoWidthClass { .. }))
        ));
    }

    #[test]
    fn test_render_table_layout() {
        let file = digit_file(30);
        let config = RunConfig::new(10, GeneratorParams::default())
            .with_source(file.path())
            .with_shuffle_seed(5);

        let report = Experiment::new(QualityThresholds::permissive()).run(&config).unwrap();
        let table = report.render_table(15);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("TABULAR METHOD"));
        assert!(lines[0].contains("ALGORITHMIC METHOD"));
        // header + 10 rows (clamped to count) + coefficients
        assert!(lines[12].trim_start().starts_with("Coeff."));
        assert_eq!(table, report.table(10).to_string());
        let short = report.table(2).to_string();
        assert!(short.lines().nth(4).unwrap().trim_start().starts_with("Coeff."));
    }

    #[test]
    fn test_report_toml_roundtrip_keeps_config() {
        let file = digit_file(30);
        let config = RunConfig::new(10, GeneratorParams::default())
            .with_source(file.path())
            .with_shuffle_seed(5);

        let report = Experiment::default().run(&config).unwrap();
        let text = report.to_toml().unwrap();
        let parsed: Report = toml::from_str(&text).unwrap();
        assert_eq!(parsed.config, report.config);
        assert_eq!(parsed.algorithmic, report.algorithmic);
        assert!(text.contains("autocorrelation"));
        assert!(text.contains("missing_values"));
    }
}
