//! Result aggregation: one [`CandidateResult`] per surviving variant.
//!
//! Combines the filter verdict, the inheritance classifications and any
//! syndrome-region evidence, and assigns an ordinal confidence tier. The
//! full classification set is preserved for auditing; the tier reflects
//! the strongest one.

use serde::{Deserialize, Serialize};

use crate::family::{Family, Role};
use crate::filter::FilterVerdict;
use crate::inheritance::Classification;
use crate::regions::{CopyNumberDirection, SyndromeRegion};
use crate::trio::TrioVariantRecord;
use crate::variant::VariantKey;

/// Ordinal confidence ranking for a candidate, lowest first.
///
/// Fully confirmed de novo events and compound-het pairs outrank
/// confirmed inherited patterns, which outrank purely syndromic evidence,
/// which outranks any classification weakened by untested parents or
/// penetrance caveats; unconstrained variants rank last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Confidence {
    /// Passed the rarity/functional filter, no known constraint.
    Unconstrained,
    /// Classification weakened by untested parents, penetrance caveats,
    /// or missing frequency data.
    Reduced,
    /// Syndromic region overlap only.
    Syndromic,
    /// Inherited dominant or recessive pattern, fully confirmed.
    InheritedConfirmed,
    /// De novo event or compound-het pair, fully confirmed.
    DeNovoConfirmed,
}

impl Confidence {
    /// Short display form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Unconstrained => "unconstrained",
            Confidence::Reduced => "reduced",
            Confidence::Syndromic => "syndromic",
            Confidence::InheritedConfirmed => "inherited",
            Confidence::DeNovoConfirmed => "de novo",
        }
    }
}

/// Syndromic evidence attached to a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyndromeMatch {
    /// Syndrome name.
    pub name: String,
    /// Expected copy-number direction of the region.
    pub direction: CopyNumberDirection,
}

impl From<&SyndromeRegion> for SyndromeMatch {
    fn from(region: &SyndromeRegion) -> Self {
        Self {
            name: region.name.clone(),
            direction: region.direction,
        }
    }
}

/// Final per-variant verdict, with enough information for a report
/// writer or VCF exporter to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    /// The merged trio record.
    pub record: TrioVariantRecord,
    /// Rarity & functional filter verdict (always a pass for emitted
    /// results; kept for the missing-frequency flag and provenance).
    pub filter: FilterVerdict,
    /// Every applicable inheritance classification.
    pub classifications: Vec<Classification>,
    /// Overlapping syndrome regions.
    pub syndromes: Vec<SyndromeMatch>,
    /// Ordinal confidence tier.
    pub confidence: Confidence,
    /// For compound-het calls, the paired variant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<VariantKey>,
}

/// The tier one classification earns on its own.
fn classification_tier(
    classification: &Classification,
    record: &TrioVariantRecord,
    family: &Family,
) -> Confidence {
    match classification {
        Classification::DeNovo { .. } | Classification::CompoundHet { .. } => {
            Confidence::DeNovoConfirmed
        }
        Classification::DominantInherited { .. }
        | Classification::XLinkedRecessiveHemizygous { .. } => Confidence::InheritedConfirmed,
        Classification::RecessiveHomozygous { .. } => {
            // an untested parent leaves one allele's origin unconfirmed
            let untested = [Role::Mother, Role::Father].into_iter().any(|role| {
                family.parent(role).is_none() || record.genotype(role).is_none()
            });
            if untested {
                Confidence::Reduced
            } else {
                Confidence::InheritedConfirmed
            }
        }
        Classification::PossibleDeNovo { .. }
        | Classification::PossibleCompoundHet { .. }
        | Classification::NonPenetrantCarrier { .. }
        | Classification::MendelianInconsistency => Confidence::Reduced,
        Classification::NoConstraint => Confidence::Unconstrained,
    }
}

/// Combine the evidence for one record into a [`CandidateResult`].
pub(crate) fn build_result(
    record: TrioVariantRecord,
    filter: FilterVerdict,
    classifications: Vec<Classification>,
    syndromes: Vec<SyndromeMatch>,
    family: &Family,
) -> CandidateResult {
    let mut confidence = classifications
        .iter()
        .map(|c| classification_tier(c, &record, family))
        .max()
        .unwrap_or(Confidence::Unconstrained);

    // syndromic overlap can only raise a candidate, never lower it
    if !syndromes.is_empty() {
        confidence = confidence.max(Confidence::Syndromic);
    }

    // a variant with no frequency data was assumed rare; cap it
    if matches!(
        filter,
        FilterVerdict::Pass {
            frequency_missing: true
        }
    ) {
        confidence = confidence.min(Confidence::Reduced);
    }

    let partner = classifications.iter().find_map(|c| match c {
        Classification::CompoundHet { partner, .. }
        | Classification::PossibleCompoundHet { partner, .. } => Some(partner.clone()),
        _ => None,
    });

    CandidateResult {
        record,
        filter,
        classifications,
        syndromes,
        confidence,
        partner,
    }
}
