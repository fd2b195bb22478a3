//! Inheritance-model checking.
//!
//! Each candidate variant (or same-gene variant pair) is tested against
//! every inheritance mode carried by its matched gene entries. All
//! applicable classifications are retained; the aggregator picks the
//! highest-confidence one for display but the full set is preserved for
//! auditing.
//!
//! Dispatch is by chromosome: X loci go through the allosomal rules with
//! the child's sex consulted, autosomes through the autosomal rules, and
//! Y/mitochondrial loci receive only the mode-agnostic check. Autosomal
//! logic is never applied to sex-chromosome loci.

pub mod allosomal;
pub mod autosomal;
pub mod compound_het;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::family::{Family, Role, Sex};
use crate::genes::{InheritanceMode, KnownGeneEntry};
use crate::trio::TrioVariantRecord;
use crate::variant::{Genotype, VariantKey};

pub use compound_het::find_compound_hets;

/// One way the observed trio genotypes fit (or contradict) an expected
/// transmission pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Classification {
    /// Present in the child, absent from both tested parents.
    DeNovo {
        /// The mode this observation is consistent with.
        mode: InheritanceMode,
    },
    /// Looks de novo, but one or both parents are untested here.
    PossibleDeNovo {
        /// The mode this observation is consistent with.
        mode: InheritanceMode,
        /// Parents without a usable genotype at this locus.
        untested: Vec<Role>,
    },
    /// Transmitted from an affected carrier parent.
    DominantInherited {
        /// The dominant mode matched.
        mode: InheritanceMode,
        /// The transmitting parent.
        origin: Role,
    },
    /// Carried by an unaffected parent; contradicts full-penetrance
    /// dominant inheritance but is reported rather than discarded.
    NonPenetrantCarrier {
        /// The dominant mode in question.
        mode: InheritanceMode,
        /// The carrier parent.
        origin: Role,
    },
    /// Child homozygous-alternate with every tested parent a carrier.
    RecessiveHomozygous {
        /// The recessive mode matched.
        mode: InheritanceMode,
    },
    /// One of two same-gene heterozygous variants, each traced to a
    /// different unaffected carrier parent.
    CompoundHet {
        /// The recessive mode matched.
        mode: InheritanceMode,
        /// The paired variant.
        partner: VariantKey,
    },
    /// A same-gene pairing where one parent is untested, so parental
    /// origin of one side is unconfirmed.
    PossibleCompoundHet {
        /// The recessive mode in question.
        mode: InheritanceMode,
        /// The paired variant.
        partner: VariantKey,
        /// The untested parent.
        untested: Role,
    },
    /// Hemizygous male child, variant traced to a carrier mother.
    XLinkedRecessiveHemizygous {
        /// The transmitting parent (the mother).
        origin: Role,
    },
    /// Genotypes inconsistent with Mendelian transmission; possible de
    /// novo event or data-quality problem, surfaced rather than dropped.
    MendelianInconsistency,
    /// No known-gene constraint applied; retained for visibility.
    NoConstraint,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::DeNovo { mode } => write!(f, "de novo ({mode})"),
            Classification::PossibleDeNovo { mode, untested } => {
                let parents: Vec<String> = untested.iter().map(Role::to_string).collect();
                write!(f, "possible de novo ({mode}), {} untested", parents.join(" and "))
            }
            Classification::DominantInherited { mode, origin } => {
                write!(f, "inherited from affected {origin} ({mode})")
            }
            Classification::NonPenetrantCarrier { mode, origin } => {
                write!(
                    f,
                    "reduced penetrance or non-penetrant carrier {origin} ({mode})"
                )
            }
            Classification::RecessiveHomozygous { mode } => {
                write!(f, "biallelic inherited ({mode})")
            }
            Classification::CompoundHet { mode, partner } => {
                write!(f, "compound heterozygous with {partner} ({mode})")
            }
            Classification::PossibleCompoundHet { mode, partner, untested } => {
                write!(
                    f,
                    "possible compound heterozygous with {partner} ({mode}), parental origin unconfirmed ({untested} untested)"
                )
            }
            Classification::XLinkedRecessiveHemizygous { origin } => {
                write!(f, "hemizygous, inherited from carrier {origin}")
            }
            Classification::MendelianInconsistency => {
                write!(f, "inconsistent with Mendelian transmission")
            }
            Classification::NoConstraint => write!(f, "no known constraint"),
        }
    }
}

/// The genotype and pedigree context for one record, distilled for the
/// rule functions. "Untested" covers both a parent with no data supplied
/// at all and a parent whose stream had no usable call at this locus.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TrioContext {
    pub child: Option<Genotype>,
    pub mother: Option<Genotype>,
    pub father: Option<Genotype>,
    pub mother_affected: bool,
    pub father_affected: bool,
    pub child_sex: Sex,
}

impl TrioContext {
    pub(crate) fn new(record: &TrioVariantRecord, family: &Family) -> Self {
        Self {
            child: record.child,
            // a genotype only counts when the parent exists in the family
            mother: family.mother().and_then(|_| record.mother),
            father: family.father().and_then(|_| record.father),
            mother_affected: family.mother_affected(),
            father_affected: family.father_affected(),
            child_sex: family.child().sex,
        }
    }

    /// Parents without a usable genotype at this locus.
    pub(crate) fn untested_parents(&self) -> Vec<Role> {
        let mut untested = Vec::new();
        if self.mother.is_none() {
            untested.push(Role::Mother);
        }
        if self.father.is_none() {
            untested.push(Role::Father);
        }
        untested
    }

    pub(crate) fn parent_genotype(&self, role: Role) -> Option<Genotype> {
        match role {
            Role::Mother => self.mother,
            Role::Father => self.father,
            Role::Child => None,
        }
    }

    pub(crate) fn parent_affected(&self, role: Role) -> bool {
        match role {
            Role::Mother => self.mother_affected,
            Role::Father => self.father_affected,
            Role::Child => false,
        }
    }

    /// Child homozygous-alternate while a tested parent is homozygous
    /// reference: one of the child's alleles has no Mendelian source.
    /// On the X chromosome this only applies to female children; a
    /// homozygous-alternate male is hemizygous, with a single maternal
    /// allele.
    pub(crate) fn mendelian_inconsistency(&self, on_x: bool) -> bool {
        if on_x && self.child_sex == Sex::Male {
            return false;
        }
        self.child == Some(Genotype::HomAlt)
            && self.mother.is_some()
            && self.father.is_some()
            && (self.mother == Some(Genotype::HomRef) || self.father == Some(Genotype::HomRef))
    }
}

/// Classify one trio record against its matched gene entries.
///
/// Returns every applicable classification, in a deterministic order.
/// An empty result means the genotype pattern is incompatible with every
/// listed mode (and shows no Mendelian inconsistency); compound-het
/// pairing is handled separately by [`find_compound_hets`].
pub fn classify_record(
    record: &TrioVariantRecord,
    family: &Family,
    entries: &[KnownGeneEntry],
) -> Vec<Classification> {
    if !record.child_carries_alt() {
        return Vec::new();
    }

    let ctx = TrioContext::new(record, family);
    let chrom = record.key.chrom;
    let on_x = chrom.is_x();
    let mut out = Vec::new();

    // every listed mode is tested, not just the first, and not just the
    // first entry for the gene
    let mut modes: Vec<InheritanceMode> = Vec::new();
    for entry in entries {
        for mode in &entry.modes {
            if mode.applies_to(chrom) && !modes.contains(mode) {
                modes.push(*mode);
            }
        }
    }

    if modes.is_empty() {
        // mode-agnostic check: flag implausible calls, otherwise leave
        // the variant unconstrained
        if ctx.mendelian_inconsistency(on_x) {
            out.push(Classification::MendelianInconsistency);
        }
        if entries.is_empty() {
            out.push(Classification::NoConstraint);
        }
        return out;
    }

    for mode in modes {
        if on_x {
            allosomal::check(&ctx, mode, &mut out);
        } else {
            autosomal::check(&ctx, mode, &mut out);
        }
    }

    if ctx.mendelian_inconsistency(on_x) {
        out.push(Classification::MendelianInconsistency);
    }

    out
}
