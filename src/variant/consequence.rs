//! Predicted functional consequence classes.
//!
//! Consequence terms follow the Sequence Ontology vocabulary used by
//! standard annotation tools; the rarity & functional filter keys off the
//! severity predicates defined here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sequence Ontology consequence term for an annotated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Consequence {
    /// Complete transcript deletion.
    TranscriptAblation,
    /// Within 2bp of splice acceptor site (AG).
    SpliceAcceptorVariant,
    /// Within 2bp of splice donor site (GT).
    SpliceDonorVariant,
    /// Introduces a premature stop codon.
    StopGained,
    /// Insertion/deletion causing frameshift.
    FrameshiftVariant,
    /// Stop codon changed to amino acid.
    StopLost,
    /// Start codon changed to other.
    StartLost,
    /// Amino acid substitution.
    MissenseVariant,
    /// In-frame insertion of amino acids.
    InframeInsertion,
    /// In-frame deletion of amino acids.
    InframeDeletion,
    /// Generic protein-altering variant.
    ProteinAlteringVariant,
    /// Within 3-8bp of splice site.
    SpliceRegionVariant,
    /// Silent change (codon change, same amino acid).
    SynonymousVariant,
    /// Variant in 5' UTR.
    FivePrimeUtrVariant,
    /// Variant in 3' UTR.
    ThreePrimeUtrVariant,
    /// Variant in intron.
    IntronVariant,
    /// Variant between genes.
    IntergenicVariant,
    /// Coding sequence variant of unresolved effect.
    CodingSequenceVariant,
}

impl Consequence {
    /// Get the Sequence Ontology term.
    pub fn so_term(&self) -> &'static str {
        match self {
            Consequence::TranscriptAblation => "transcript_ablation",
            Consequence::SpliceAcceptorVariant => "splice_acceptor_variant",
            Consequence::SpliceDonorVariant => "splice_donor_variant",
            Consequence::StopGained => "stop_gained",
            Consequence::FrameshiftVariant => "frameshift_variant",
            Consequence::StopLost => "stop_lost",
            Consequence::StartLost => "start_lost",
            Consequence::MissenseVariant => "missense_variant",
            Consequence::InframeInsertion => "inframe_insertion",
            Consequence::InframeDeletion => "inframe_deletion",
            Consequence::ProteinAlteringVariant => "protein_altering_variant",
            Consequence::SpliceRegionVariant => "splice_region_variant",
            Consequence::SynonymousVariant => "synonymous_variant",
            Consequence::FivePrimeUtrVariant => "5_prime_UTR_variant",
            Consequence::ThreePrimeUtrVariant => "3_prime_UTR_variant",
            Consequence::IntronVariant => "intron_variant",
            Consequence::IntergenicVariant => "intergenic_variant",
            Consequence::CodingSequenceVariant => "coding_sequence_variant",
        }
    }

    /// Whether the consequence is loss-of-function.
    ///
    /// Matches the set of terms treated as gene-truncating by annotation
    /// tools: ablation, splice-site disruption, premature stop, frameshift
    /// and loss of the start or stop codon.
    pub fn is_lof(&self) -> bool {
        matches!(
            self,
            Consequence::TranscriptAblation
                | Consequence::SpliceAcceptorVariant
                | Consequence::SpliceDonorVariant
                | Consequence::StopGained
                | Consequence::FrameshiftVariant
                | Consequence::StopLost
                | Consequence::StartLost
        )
    }

    /// Whether the consequence alters protein sequence without truncation.
    pub fn is_missense_like(&self) -> bool {
        matches!(
            self,
            Consequence::MissenseVariant
                | Consequence::InframeInsertion
                | Consequence::InframeDeletion
                | Consequence::ProteinAlteringVariant
        )
    }

    /// Whether the consequence lies in the extended splice region.
    pub fn is_splice_region(&self) -> bool {
        matches!(self, Consequence::SpliceRegionVariant)
    }

    /// Whether a variant of this class is functionally disruptive enough
    /// to be retained by default.
    pub fn is_functional(&self) -> bool {
        self.is_lof() || self.is_missense_like() || self.is_splice_region()
    }
}

impl fmt::Display for Consequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.so_term())
    }
}

/// Error for an unrecognised consequence term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownConsequence(pub String);

impl fmt::Display for UnknownConsequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown consequence term: {}", self.0)
    }
}

impl std::error::Error for UnknownConsequence {}

impl FromStr for Consequence {
    type Err = UnknownConsequence;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "transcript_ablation" => Self::TranscriptAblation,
            "splice_acceptor_variant" => Self::SpliceAcceptorVariant,
            "splice_donor_variant" => Self::SpliceDonorVariant,
            "stop_gained" => Self::StopGained,
            "frameshift_variant" => Self::FrameshiftVariant,
            "stop_lost" => Self::StopLost,
            "start_lost" | "initiator_codon_variant" => Self::StartLost,
            "missense_variant" => Self::MissenseVariant,
            "inframe_insertion" => Self::InframeInsertion,
            "inframe_deletion" => Self::InframeDeletion,
            "protein_altering_variant" => Self::ProteinAlteringVariant,
            "splice_region_variant" => Self::SpliceRegionVariant,
            "synonymous_variant" => Self::SynonymousVariant,
            "5_prime_utr_variant" => Self::FivePrimeUtrVariant,
            "3_prime_utr_variant" => Self::ThreePrimeUtrVariant,
            "intron_variant" => Self::IntronVariant,
            "intergenic_variant" => Self::IntergenicVariant,
            "coding_sequence_variant" => Self::CodingSequenceVariant,
            other => return Err(UnknownConsequence(other.to_string())),
        })
    }
}
