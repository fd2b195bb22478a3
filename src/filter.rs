//! Rarity & functional filtering.
//!
//! Runs before any inheritance logic so that the combinatorial pairing
//! work downstream only ever sees rare, functionally plausible variants.
//! Checks run in order: consequence class, population frequency, then the
//! site FILTER status. Missing frequency data never fails a variant on
//! frequency grounds; it is flagged so aggregation can lower confidence.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::FilterConfig;
use crate::trio::TrioVariantRecord;
use crate::variant::Consequence;

/// Why a variant failed the filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterFailure {
    /// The consequence class is not in the accepted set.
    ConsequenceExcluded {
        /// The excluded class.
        consequence: Consequence,
    },
    /// Population allele frequency above the configured ceiling.
    CommonVariant {
        /// Observed frequency.
        frequency: f64,
        /// Configured ceiling.
        max: f64,
    },
    /// The site failed upstream VCF filtering.
    SiteFilterFailed {
        /// The FILTER column value.
        status: String,
    },
}

impl fmt::Display for FilterFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterFailure::ConsequenceExcluded { consequence } => {
                write!(f, "consequence {consequence} not in accepted set")
            }
            FilterFailure::CommonVariant { frequency, max } => {
                write!(f, "allele frequency {frequency} above {max}")
            }
            FilterFailure::SiteFilterFailed { status } => {
                write!(f, "site filter {status}")
            }
        }
    }
}

/// Verdict of the rarity & functional filter for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterVerdict {
    /// The variant is retained.
    Pass {
        /// True when no frequency data was available; the variant is
        /// treated as rare but reported at reduced confidence.
        frequency_missing: bool,
    },
    /// The variant is removed before inheritance checking.
    Fail {
        /// The first failed check.
        reason: FilterFailure,
    },
}

impl FilterVerdict {
    /// Whether the record survived the filter.
    pub fn is_pass(&self) -> bool {
        matches!(self, FilterVerdict::Pass { .. })
    }
}

/// Apply the rarity & functional filter to one trio record.
pub fn evaluate(record: &TrioVariantRecord, config: &FilterConfig) -> FilterVerdict {
    if !config.accepts(record.consequence) {
        return FilterVerdict::Fail {
            reason: FilterFailure::ConsequenceExcluded {
                consequence: record.consequence,
            },
        };
    }

    if let Some(af) = record.allele_frequency {
        if af > config.max_allele_frequency {
            return FilterVerdict::Fail {
                reason: FilterFailure::CommonVariant {
                    frequency: af,
                    max: config.max_allele_frequency,
                },
            };
        }
    }

    if config.respect_site_filter {
        if let Some(status) = record.site_filter.as_deref() {
            // LOW_VQSLOD sites rescued by a de novo caller stay in
            let rescued = status == "LOW_VQSLOD" && record.denovo_support;
            if status != "PASS" && !rescued {
                return FilterVerdict::Fail {
                    reason: FilterFailure::SiteFilterFailed {
                        status: status.to_string(),
                    },
                };
            }
        }
    }

    FilterVerdict::Pass {
        frequency_missing: record.allele_frequency.is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{Chromosome, Genotype, VariantKey};

    fn record(consequence: Consequence, af: Option<f64>) -> TrioVariantRecord {
        TrioVariantRecord {
            key: VariantKey::new(Chromosome::Autosome(1), 100, "A", "G"),
            id: None,
            child: Some(Genotype::Het),
            mother: None,
            father: None,
            allele_frequency: af,
            consequence,
            gene: Some("TEST".to_string()),
            site_filter: None,
            denovo_support: false,
        }
    }

    #[test]
    fn test_rare_functional_variant_passes() {
        let verdict = evaluate(
            &record(Consequence::MissenseVariant, Some(0.0001)),
            &FilterConfig::default(),
        );
        assert_eq!(
            verdict,
            FilterVerdict::Pass {
                frequency_missing: false
            }
        );
    }

    #[test]
    fn test_common_variant_fails() {
        let verdict = evaluate(
            &record(Consequence::MissenseVariant, Some(0.05)),
            &FilterConfig::default(),
        );
        match verdict {
            FilterVerdict::Fail {
                reason: FilterFailure::CommonVariant { frequency, max },
            } => {
                assert_eq!(frequency, 0.05);
                assert_eq!(max, 0.01);
            }
            other => panic!("unexpected verdict: {other:?}"),
        }
    }

    #[test]
    fn test_frequency_at_threshold_passes() {
        // the ceiling is exclusive: fail only strictly above it
        let verdict = evaluate(
            &record(Consequence::MissenseVariant, Some(0.01)),
            &FilterConfig::default(),
        );
        assert!(verdict.is_pass());
    }

    #[test]
    fn test_missing_frequency_passes_but_is_flagged() {
        let verdict = evaluate(
            &record(Consequence::StopGained, None),
            &FilterConfig::default(),
        );
        assert_eq!(
            verdict,
            FilterVerdict::Pass {
                frequency_missing: true
            }
        );
    }

    #[test]
    fn test_benign_consequence_fails() {
        let verdict = evaluate(
            &record(Consequence::SynonymousVariant, Some(0.0001)),
            &FilterConfig::default(),
        );
        assert!(matches!(
            verdict,
            FilterVerdict::Fail {
                reason: FilterFailure::ConsequenceExcluded { .. }
            }
        ));
    }

    #[test]
    fn test_consequence_checked_before_frequency() {
        // a common synonymous variant reports the consequence failure
        let verdict = evaluate(
            &record(Consequence::SynonymousVariant, Some(0.5)),
            &FilterConfig::default(),
        );
        assert!(matches!(
            verdict,
            FilterVerdict::Fail {
                reason: FilterFailure::ConsequenceExcluded { .. }
            }
        ));
    }

    #[test]
    fn test_site_filter_failure() {
        let mut rec = record(Consequence::MissenseVariant, Some(0.0001));
        rec.site_filter = Some("LOW_VQSLOD".to_string());
        let verdict = evaluate(&rec, &FilterConfig::default());
        assert!(matches!(
            verdict,
            FilterVerdict::Fail {
                reason: FilterFailure::SiteFilterFailed { .. }
            }
        ));
    }

    #[test]
    fn test_low_vqslod_rescued_by_denovo_support() {
        let mut rec = record(Consequence::MissenseVariant, Some(0.0001));
        rec.site_filter = Some("LOW_VQSLOD".to_string());
        rec.denovo_support = true;
        assert!(evaluate(&rec, &FilterConfig::default()).is_pass());
    }

    #[test]
    fn test_pass_site_filter_accepted() {
        let mut rec = record(Consequence::MissenseVariant, Some(0.0001));
        rec.site_filter = Some("PASS".to_string());
        assert!(evaluate(&rec, &FilterConfig::default()).is_pass());
    }

    #[test]
    fn test_site_filter_ignored_when_configured_off() {
        let mut rec = record(Consequence::MissenseVariant, Some(0.0001));
        rec.site_filter = Some("q10".to_string());
        let config = FilterConfig {
            respect_site_filter: false,
            ..FilterConfig::default()
        };
        assert!(evaluate(&rec, &config).is_pass());
    }
}
