//! Per-individual variant calls and their identity keys.
//!
//! A [`VariantCall`] is the in-memory record a VCF-parsing collaborator
//! hands to this crate, one stream per family member. The chromosome is
//! kept as written in the source file; it is resolved to a [`Chromosome`]
//! when the trio merger validates the call, so that calls on unrecognised
//! contigs can be skipped with a warning rather than aborting the family.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::variant::consequence::Consequence;

/// A recognised chromosome, ordered genomically: 1-22, X, Y, MT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chromosome {
    /// An autosome, 1 through 22.
    Autosome(u8),
    /// The X chromosome.
    X,
    /// The Y chromosome.
    Y,
    /// The mitochondrial genome.
    Mito,
}

impl Chromosome {
    /// Whether the chromosome is the X chromosome.
    pub fn is_x(&self) -> bool {
        matches!(self, Chromosome::X)
    }

    fn rank(&self) -> u8 {
        match self {
            Chromosome::Autosome(n) => *n,
            Chromosome::X => 23,
            Chromosome::Y => 24,
            Chromosome::Mito => 25,
        }
    }
}

impl Ord for Chromosome {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Chromosome {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chromosome::Autosome(n) => write!(f, "{n}"),
            Chromosome::X => write!(f, "X"),
            Chromosome::Y => write!(f, "Y"),
            Chromosome::Mito => write!(f, "MT"),
        }
    }
}

/// Error for a contig name outside the recognised set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChromosome(pub String);

impl fmt::Display for UnknownChromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognised chromosome: {}", self.0)
    }
}

impl std::error::Error for UnknownChromosome {}

impl FromStr for Chromosome {
    type Err = UnknownChromosome;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s
            .strip_prefix("chr")
            .or_else(|| s.strip_prefix("Chr"))
            .or_else(|| s.strip_prefix("CHR"))
            .unwrap_or(s);
        match name {
            "X" | "x" => Ok(Chromosome::X),
            "Y" | "y" => Ok(Chromosome::Y),
            "MT" | "M" | "mt" | "m" => Ok(Chromosome::Mito),
            _ => match name.parse::<u8>() {
                Ok(n) if (1..=22).contains(&n) => Ok(Chromosome::Autosome(n)),
                _ => Err(UnknownChromosome(s.to_string())),
            },
        }
    }
}

/// Zygosity state of one individual at one locus.
///
/// On the male X chromosome the single allele is reported as `HomRef` or
/// `HomAlt` (hemizygous); a heterozygous male X call is invalid data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genotype {
    /// Homozygous for the reference allele.
    HomRef,
    /// Heterozygous.
    Het,
    /// Homozygous for the alternate allele.
    HomAlt,
}

impl Genotype {
    /// Whether the genotype carries at least one alternate allele.
    pub fn carries_alt(&self) -> bool {
        matches!(self, Genotype::Het | Genotype::HomAlt)
    }

    /// Parse a VCF GT field into a genotype.
    ///
    /// Accepts phased (`0|1`) and unphased (`0/1`) separators. Two
    /// differing alleles count as heterozygous even when both are
    /// non-reference; those calls are nearly always indel artefacts where
    /// one allele is really the reference. Missing genotypes (`./.` or
    /// `.`) yield `None`.
    pub fn from_vcf(gt: &str) -> Result<Option<Genotype>, InvalidGenotype> {
        let gt = gt.trim();
        if gt == "." || gt == "./." || gt == ".|." {
            return Ok(None);
        }
        let (a, b) = gt
            .split_once('/')
            .or_else(|| gt.split_once('|'))
            .ok_or_else(|| InvalidGenotype(gt.to_string()))?;
        let parse = |allele: &str| -> Result<u32, InvalidGenotype> {
            allele
                .parse::<u32>()
                .map_err(|_| InvalidGenotype(gt.to_string()))
        };
        let (a, b) = (parse(a)?, parse(b)?);
        Ok(Some(if a != b {
            Genotype::Het
        } else if a == 0 {
            Genotype::HomRef
        } else {
            Genotype::HomAlt
        }))
    }
}

/// Error for a GT field that cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidGenotype(pub String);

impl fmt::Display for InvalidGenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unparseable genotype: {}", self.0)
    }
}

impl std::error::Error for InvalidGenotype {}

/// Identity key for a variant: chromosome, position and alleles.
///
/// Calls from different individuals merge into one trio record exactly
/// when their keys are equal. Ordering is genomic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariantKey {
    /// Resolved chromosome.
    pub chrom: Chromosome,
    /// 1-based position of the first reference base.
    pub pos: u64,
    /// Reference allele.
    pub ref_allele: String,
    /// Alternate allele.
    pub alt_allele: String,
}

impl VariantKey {
    /// Create a new key.
    pub fn new(chrom: Chromosome, pos: u64, ref_allele: &str, alt_allele: &str) -> Self {
        Self {
            chrom,
            pos,
            ref_allele: ref_allele.to_string(),
            alt_allele: alt_allele.to_string(),
        }
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {}>{}",
            self.chrom, self.pos, self.ref_allele, self.alt_allele
        )
    }
}

/// One individual's call at one locus, as prepared by a VCF collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantCall {
    /// Chromosome name as written in the source file (e.g. "chr7", "X").
    pub chrom: String,

    /// 1-based position of the first base in the reference allele.
    pub pos: u64,

    /// Reference allele.
    pub ref_allele: String,

    /// Alternate allele.
    pub alt_allele: String,

    /// Variant identifier (e.g. rsID); pass-through metadata only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Genotype of this individual; `None` when uncalled.
    pub genotype: Option<Genotype>,

    /// Maximum population allele frequency; `None` when unobserved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allele_frequency: Option<f64>,

    /// Predicted functional consequence class.
    pub consequence: Consequence,

    /// Annotated gene symbol, absent for intergenic variants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gene: Option<String>,

    /// VCF FILTER column; `None` means "." (no filter applied).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_filter: Option<String>,

    /// Whether a de novo caller flagged this site, which exempts it from
    /// the LOW_VQSLOD site filter.
    #[serde(default)]
    pub denovo_support: bool,
}

impl VariantCall {
    /// Create a call with the minimal required fields; optional fields
    /// start absent.
    pub fn new(
        chrom: &str,
        pos: u64,
        ref_allele: &str,
        alt_allele: &str,
        genotype: Option<Genotype>,
        consequence: Consequence,
    ) -> Self {
        Self {
            chrom: chrom.to_string(),
            pos,
            ref_allele: ref_allele.to_string(),
            alt_allele: alt_allele.to_string(),
            id: None,
            genotype,
            allele_frequency: None,
            consequence,
            gene: None,
            site_filter: None,
            denovo_support: false,
        }
    }

    /// Set the annotated gene symbol.
    pub fn with_gene(mut self, gene: &str) -> Self {
        self.gene = Some(gene.to_string());
        self
    }

    /// Set the population allele frequency.
    pub fn with_frequency(mut self, af: f64) -> Self {
        self.allele_frequency = Some(af);
        self
    }

    /// Resolve the raw chromosome name.
    pub fn chromosome(&self) -> Result<Chromosome, UnknownChromosome> {
        self.chrom.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chromosome_parsing() {
        assert_eq!("1".parse::<Chromosome>().unwrap(), Chromosome::Autosome(1));
        assert_eq!("chr7".parse::<Chromosome>().unwrap(), Chromosome::Autosome(7));
        assert_eq!("X".parse::<Chromosome>().unwrap(), Chromosome::X);
        assert_eq!("chrY".parse::<Chromosome>().unwrap(), Chromosome::Y);
        assert_eq!("MT".parse::<Chromosome>().unwrap(), Chromosome::Mito);
        assert!("23".parse::<Chromosome>().is_err());
        assert!("contig_471".parse::<Chromosome>().is_err());
    }

    #[test]
    fn test_chromosome_ordering() {
        let mut chroms = vec![
            Chromosome::X,
            Chromosome::Autosome(2),
            Chromosome::Mito,
            Chromosome::Autosome(10),
            Chromosome::Y,
        ];
        chroms.sort();
        assert_eq!(
            chroms,
            vec![
                Chromosome::Autosome(2),
                Chromosome::Autosome(10),
                Chromosome::X,
                Chromosome::Y,
                Chromosome::Mito,
            ]
        );
    }

    #[test]
    fn test_genotype_from_vcf() {
        assert_eq!(Genotype::from_vcf("0/0").unwrap(), Some(Genotype::HomRef));
        assert_eq!(Genotype::from_vcf("0/1").unwrap(), Some(Genotype::Het));
        assert_eq!(Genotype::from_vcf("1|0").unwrap(), Some(Genotype::Het));
        assert_eq!(Genotype::from_vcf("1/1").unwrap(), Some(Genotype::HomAlt));
        // differing non-reference alleles count as het
        assert_eq!(Genotype::from_vcf("1/2").unwrap(), Some(Genotype::Het));
        assert_eq!(Genotype::from_vcf("./.").unwrap(), None);
        assert!(Genotype::from_vcf("0").is_err());
        assert!(Genotype::from_vcf("A/B").is_err());
    }

    #[test]
    fn test_key_ordering_is_genomic() {
        let a = VariantKey::new(Chromosome::Autosome(2), 500, "A", "G");
        let b = VariantKey::new(Chromosome::Autosome(10), 100, "C", "T");
        let c = VariantKey::new(Chromosome::X, 1, "G", "A");
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_key_display() {
        let key = VariantKey::new(Chromosome::Autosome(7), 15000000, "A", "G");
        assert_eq!(key.to_string(), "7:15000000 A>G");
    }
}
