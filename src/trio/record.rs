//! Trio-level variant records.

use serde::{Deserialize, Serialize};

use crate::family::Role;
use crate::variant::{Consequence, Genotype, VariantKey};

/// One variant merged across the family's individuals at a single locus.
///
/// A genotype of `None` means that individual is untested at this locus,
/// either because no variant data was supplied for them at all or because
/// their stream carried no call here. An untested genotype is never
/// treated as homozygous-reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrioVariantRecord {
    /// Identity key: chromosome, position, alleles.
    pub key: VariantKey,

    /// Pass-through variant identifier (e.g. rsID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Child genotype at this locus.
    pub child: Option<Genotype>,

    /// Mother genotype at this locus.
    pub mother: Option<Genotype>,

    /// Father genotype at this locus.
    pub father: Option<Genotype>,

    /// Maximum population allele frequency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allele_frequency: Option<f64>,

    /// Predicted functional consequence class.
    pub consequence: Consequence,

    /// Annotated gene symbol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gene: Option<String>,

    /// VCF FILTER status of the site; `None` means ".".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_filter: Option<String>,

    /// Whether a de novo caller flagged this site.
    #[serde(default)]
    pub denovo_support: bool,
}

impl TrioVariantRecord {
    /// Genotype of the given family member at this locus.
    pub fn genotype(&self, role: Role) -> Option<Genotype> {
        match role {
            Role::Child => self.child,
            Role::Mother => self.mother,
            Role::Father => self.father,
        }
    }

    /// Whether the locus lies on the X chromosome.
    pub fn is_x(&self) -> bool {
        self.key.chrom.is_x()
    }

    /// Whether the child carries at least one alternate allele here.
    pub fn child_carries_alt(&self) -> bool {
        self.child.is_some_and(|g| g.carries_alt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Chromosome;

    fn record() -> TrioVariantRecord {
        TrioVariantRecord {
            key: VariantKey::new(Chromosome::Autosome(1), 100, "A", "G"),
            id: None,
            child: Some(Genotype::Het),
            mother: Some(Genotype::HomRef),
            father: None,
            allele_frequency: Some(0.0001),
            consequence: Consequence::MissenseVariant,
            gene: Some("TEST".to_string()),
            site_filter: None,
            denovo_support: false,
        }
    }

    #[test]
    fn test_genotype_by_role() {
        let rec = record();
        assert_eq!(rec.genotype(Role::Child), Some(Genotype::Het));
        assert_eq!(rec.genotype(Role::Mother), Some(Genotype::HomRef));
        assert_eq!(rec.genotype(Role::Father), None);
    }

    #[test]
    fn test_child_carries_alt() {
        let mut rec = record();
        assert!(rec.child_carries_alt());
        rec.child = Some(Genotype::HomRef);
        assert!(!rec.child_carries_alt());
        rec.child = None;
        assert!(!rec.child_carries_alt());
    }
}
