//! Filter configuration.
//!
//! The rarity & functional filter is driven by a [`FilterConfig`]: the
//! population-frequency ceiling, the set of consequence classes worth
//! keeping, and the site-filter policy. Defaults reproduce the standard
//! clinical screen: 1% frequency cap, loss-of-function / missense-class /
//! splice-region consequences retained.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::TriageError;
use crate::variant::Consequence;

/// The consequence classes retained when no explicit set is configured.
static DEFAULT_CONSEQUENCES: Lazy<HashSet<Consequence>> = Lazy::new(|| {
    [
        Consequence::TranscriptAblation,
        Consequence::SpliceAcceptorVariant,
        Consequence::SpliceDonorVariant,
        Consequence::StopGained,
        Consequence::FrameshiftVariant,
        Consequence::StopLost,
        Consequence::StartLost,
        Consequence::MissenseVariant,
        Consequence::InframeInsertion,
        Consequence::InframeDeletion,
        Consequence::ProteinAlteringVariant,
        Consequence::SpliceRegionVariant,
    ]
    .into_iter()
    .collect()
});

/// Configuration for the rarity & functional filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Maximum population allele frequency; variants strictly above this
    /// fail. Missing frequency data never fails on frequency grounds.
    pub max_allele_frequency: f64,

    /// Consequence classes that pass the functional filter.
    pub accepted_consequences: HashSet<Consequence>,

    /// Whether to honour the VCF FILTER column. When true, calls whose
    /// site filter is neither absent nor PASS fail, except LOW_VQSLOD
    /// sites with de novo caller support.
    pub respect_site_filter: bool,
}

impl FilterConfig {
    /// Create a config with the given frequency ceiling and default
    /// consequence set. The ceiling must lie in [0, 1].
    pub fn with_max_frequency(max_allele_frequency: f64) -> Result<Self, TriageError> {
        if !(0.0..=1.0).contains(&max_allele_frequency) {
            return Err(TriageError::InvalidFrequency {
                value: max_allele_frequency,
            });
        }
        Ok(Self {
            max_allele_frequency,
            ..Self::default()
        })
    }

    /// Replace the accepted consequence set.
    pub fn with_consequences<I: IntoIterator<Item = Consequence>>(mut self, classes: I) -> Self {
        self.accepted_consequences = classes.into_iter().collect();
        self
    }

    /// Whether the given class passes the functional filter.
    pub fn accepts(&self, consequence: Consequence) -> bool {
        self.accepted_consequences.contains(&consequence)
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_allele_frequency: 0.01,
            accepted_consequences: DEFAULT_CONSEQUENCES.clone(),
            respect_site_filter: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_retains_disruptive_classes() {
        let config = FilterConfig::default();
        assert!(config.accepts(Consequence::StopGained));
        assert!(config.accepts(Consequence::MissenseVariant));
        assert!(config.accepts(Consequence::SpliceRegionVariant));
        assert!(!config.accepts(Consequence::SynonymousVariant));
        assert!(!config.accepts(Consequence::IntronVariant));
        assert_eq!(config.max_allele_frequency, 0.01);
    }

    #[test]
    fn test_frequency_bounds_enforced() {
        assert!(FilterConfig::with_max_frequency(0.005).is_ok());
        assert!(FilterConfig::with_max_frequency(0.0).is_ok());
        assert!(FilterConfig::with_max_frequency(1.0).is_ok());
        assert!(FilterConfig::with_max_frequency(-0.1).is_err());
        assert!(FilterConfig::with_max_frequency(1.5).is_err());
    }

    #[test]
    fn test_custom_consequence_set() {
        let config =
            FilterConfig::default().with_consequences([Consequence::SynonymousVariant]);
        assert!(config.accepts(Consequence::SynonymousVariant));
        assert!(!config.accepts(Consequence::StopGained));
    }
}
