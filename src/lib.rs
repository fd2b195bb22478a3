//! trio-triage: trio variant filtering and inheritance-model
//! reconciliation
//!
//! Triages genetic variants observed in a child against the child's
//! parents to surface variants plausibly causal for a developmental
//! disorder. Per-individual call streams are merged into trio-level
//! records, filtered on population frequency and functional consequence,
//! matched against a curated inheritance-mode gene table and curated
//! syndromic regions, and classified against the expected transmission
//! patterns: de novo, dominant inherited, biallelic recessive (including
//! compound heterozygosity), and the X-linked forms.
//!
//! VCF/PED parsing and report export live in collaborating tools; this
//! crate consumes in-memory [`VariantCall`] streams plus a [`Family`] and
//! produces ordered [`CandidateResult`]s.
//!
//! # Example
//!
//! ```
//! use trio_triage::{
//!     AffectionStatus, Confidence, Consequence, Family, FamilyCalls, FilterConfig,
//!     GeneConfidence, Genotype, Individual, InheritanceMode, KnownGeneDatabase,
//!     KnownGeneEntry, ReferenceContext, Role, Sex, SyndromeRegionSet, VariantCall,
//!     screen_family,
//! };
//!
//! // reference data is loaded once and shared across families
//! let genes = KnownGeneDatabase::from_entries([KnownGeneEntry {
//!     symbol: "ARID1B".to_string(),
//!     modes: vec![InheritanceMode::AutosomalDominant],
//!     confidence: GeneConfidence::Confirmed,
//!     mechanism: None,
//! }]);
//! let ctx = ReferenceContext::new(genes, SyndromeRegionSet::new());
//!
//! let family = Family::new(
//!     "fam001",
//!     Individual::new("proband", Sex::Female, AffectionStatus::Affected, Role::Child),
//! )
//! .with_mother(Individual::new("mum", Sex::Female, AffectionStatus::Unaffected, Role::Mother))
//! .unwrap()
//! .with_father(Individual::new("dad", Sex::Male, AffectionStatus::Unaffected, Role::Father))
//! .unwrap();
//!
//! let call = |genotype| {
//!     VariantCall::new("6", 157150547, "A", "G", Some(genotype), Consequence::MissenseVariant)
//!         .with_gene("ARID1B")
//!         .with_frequency(0.0001)
//! };
//! let calls = FamilyCalls {
//!     child: vec![call(Genotype::Het)],
//!     mother: Some(vec![call(Genotype::HomRef)]),
//!     father: Some(vec![call(Genotype::HomRef)]),
//! };
//!
//! let results = screen_family(&ctx, &FilterConfig::default(), &family, &calls);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].confidence, Confidence::DeNovoConfirmed);
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod family;
pub mod filter;
pub mod genes;
pub mod inheritance;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod pipeline;
pub mod regions;
pub mod trio;
pub mod variant;

// Re-export commonly used types
pub use aggregate::{CandidateResult, Confidence, SyndromeMatch};
pub use config::FilterConfig;
pub use error::TriageError;
pub use family::{AffectionStatus, Family, Individual, Role, Sex};
pub use filter::{FilterFailure, FilterVerdict};
pub use genes::{GeneConfidence, InheritanceMode, KnownGeneDatabase, KnownGeneEntry};
pub use inheritance::Classification;
pub use pipeline::{screen_family, ReferenceContext};
pub use regions::{CopyNumberDirection, SyndromeRegion, SyndromeRegionSet};
pub use trio::{merge_family_calls, FamilyCalls, TrioVariantRecord};
pub use variant::{Chromosome, Consequence, Genotype, VariantCall, VariantKey};

/// Result type alias for trio-triage operations
pub type Result<T> = std::result::Result<T, TriageError>;
