//! Curated syndromic genomic intervals.
//!
//! Syndrome regions are checked by locus containment, independent of gene
//! annotation: a variant inside a region is reportable on syndromic
//! grounds even with no gene-based inheritance match. Containment is
//! inclusive at both boundary coordinates.

use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::error::TriageError;
use crate::variant::Chromosome;

/// Expected copy-number direction of a syndromic region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CopyNumberDirection {
    /// Duplication/gain causes the syndrome.
    Gain,
    /// Deletion/loss causes the syndrome.
    Loss,
    /// Either direction is pathogenic.
    Either,
}

impl CopyNumberDirection {
    /// Short display form.
    pub fn as_str(&self) -> &'static str {
        match self {
            CopyNumberDirection::Gain => "gain",
            CopyNumberDirection::Loss => "loss",
            CopyNumberDirection::Either => "either",
        }
    }
}

impl fmt::Display for CopyNumberDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CopyNumberDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gain" | "dup" | "duplication" => Ok(Self::Gain),
            "loss" | "del" | "deletion" => Ok(Self::Loss),
            "either" | "both" | "any" => Ok(Self::Either),
            other => Err(format!("unknown copy-number direction: {other}")),
        }
    }
}

/// A curated genomic interval associated with a chromosomal syndrome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyndromeRegion {
    /// Chromosome of the interval.
    pub chrom: Chromosome,
    /// Start coordinate, 1-based inclusive.
    pub start: u64,
    /// End coordinate, 1-based inclusive.
    pub end: u64,
    /// Syndrome name.
    pub name: String,
    /// Expected copy-number direction.
    pub direction: CopyNumberDirection,
}

impl SyndromeRegion {
    /// Create a region; `start` must not exceed `end`.
    pub fn new(
        chrom: Chromosome,
        start: u64,
        end: u64,
        name: &str,
        direction: CopyNumberDirection,
    ) -> Result<Self, TriageError> {
        if start > end {
            return Err(TriageError::InvalidRegion {
                name: name.to_string(),
                start,
                end,
            });
        }
        Ok(Self {
            chrom,
            start,
            end,
            name: name.to_string(),
            direction,
        })
    }

    /// Whether the position falls inside this region, boundaries
    /// included.
    pub fn contains(&self, pos: u64) -> bool {
        self.start <= pos && pos <= self.end
    }
}

/// All syndrome regions for a run, indexed by chromosome.
#[derive(Debug, Clone, Default)]
pub struct SyndromeRegionSet {
    by_chrom: HashMap<Chromosome, Vec<SyndromeRegion>>,
    count: usize,
}

impl SyndromeRegionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from regions.
    pub fn from_regions<I: IntoIterator<Item = SyndromeRegion>>(regions: I) -> Self {
        let mut set = Self::new();
        for region in regions {
            set.insert(region);
        }
        set
    }

    /// Add one region.
    pub fn insert(&mut self, region: SyndromeRegion) {
        self.by_chrom.entry(region.chrom).or_default().push(region);
        self.count += 1;
    }

    /// Regions on the given chromosome containing the position.
    pub fn overlapping(&self, chrom: Chromosome, pos: u64) -> Vec<&SyndromeRegion> {
        self.by_chrom
            .get(&chrom)
            .map(|regions| regions.iter().filter(|r| r.contains(pos)).collect())
            .unwrap_or_default()
    }

    /// Total number of regions.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the set holds no regions.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Load from a tab-separated table; `.gz` paths are decompressed.
    ///
    /// Expected columns: `chrom`, `start`, `end`, `name`, `direction`.
    /// The first line is a header. Any malformed row is fatal, as is a
    /// row whose start exceeds its end.
    pub fn from_tsv_path<P: AsRef<Path>>(path: P) -> Result<Self, TriageError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TriageError::Io {
            msg: format!("{}: {e}", path.display()),
        })?;
        let reader: Box<dyn BufRead> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(BufReader::new(GzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };
        Self::from_tsv_reader(reader, &path.display().to_string())
    }

    /// Load a tab-separated table from any reader; `label` names the
    /// source in errors.
    pub fn from_tsv_reader<R: BufRead>(reader: R, label: &str) -> Result<Self, TriageError> {
        let mut set = Self::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let lineno = idx + 1;
            if lineno == 1 || line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 5 {
                return Err(TriageError::RegionTable {
                    path: label.to_string(),
                    line: lineno,
                    reason: format!("expected 5 columns, found {}", fields.len()),
                });
            }
            let parse_err = |reason: String| TriageError::RegionTable {
                path: label.to_string(),
                line: lineno,
                reason,
            };
            let chrom: Chromosome = fields[0]
                .parse()
                .map_err(|e: crate::variant::UnknownChromosome| parse_err(e.to_string()))?;
            let start: u64 = fields[1]
                .trim()
                .parse()
                .map_err(|_| parse_err(format!("bad start coordinate: {}", fields[1])))?;
            let end: u64 = fields[2]
                .trim()
                .parse()
                .map_err(|_| parse_err(format!("bad end coordinate: {}", fields[2])))?;
            let direction: CopyNumberDirection =
                fields[4].parse().map_err(parse_err)?;
            set.insert(SyndromeRegion::new(
                chrom,
                start,
                end,
                fields[3].trim(),
                direction,
            )?);
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn region(start: u64, end: u64) -> SyndromeRegion {
        SyndromeRegion::new(
            Chromosome::Autosome(1),
            start,
            end,
            "1q21.1 deletion",
            CopyNumberDirection::Loss,
        )
        .unwrap()
    }

    #[test]
    fn test_containment_inclusive_at_both_ends() {
        let r = region(100, 200);
        assert!(r.contains(100));
        assert!(r.contains(200));
        assert!(r.contains(150));
        assert!(!r.contains(99));
        assert!(!r.contains(201));
    }

    #[test]
    fn test_single_base_region() {
        let r = region(100, 100);
        assert!(r.contains(100));
        assert!(!r.contains(101));
    }

    #[test]
    fn test_inverted_region_rejected() {
        let err = SyndromeRegion::new(
            Chromosome::Autosome(1),
            200,
            100,
            "backwards",
            CopyNumberDirection::Gain,
        )
        .unwrap_err();
        assert!(matches!(err, TriageError::InvalidRegion { .. }));
    }

    #[test]
    fn test_lookup_is_chromosome_scoped() {
        let set = SyndromeRegionSet::from_regions([region(100, 200)]);
        assert_eq!(set.overlapping(Chromosome::Autosome(1), 150).len(), 1);
        assert!(set.overlapping(Chromosome::Autosome(2), 150).is_empty());
        assert!(set.overlapping(Chromosome::X, 150).is_empty());
    }

    #[test]
    fn test_overlapping_regions_all_returned() {
        let set = SyndromeRegionSet::from_regions([region(100, 200), region(150, 300)]);
        assert_eq!(set.overlapping(Chromosome::Autosome(1), 175).len(), 2);
        assert_eq!(set.overlapping(Chromosome::Autosome(1), 250).len(), 1);
    }

    #[test]
    fn test_tsv_loader() {
        let tsv = "chrom\tstart\tend\tname\tdirection\n\
                   1\t146577069\t147394444\t1q21.1 deletion\tloss\n\
                   X\t1\t5000\tXp terminal\teither\n";
        let set = SyndromeRegionSet::from_tsv_reader(Cursor::new(tsv), "regions.tsv").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.overlapping(Chromosome::Autosome(1), 146577069).len(), 1);
        assert_eq!(set.overlapping(Chromosome::X, 5000).len(), 1);
    }

    #[test]
    fn test_tsv_bad_coordinate_is_fatal() {
        let tsv = "chrom\tstart\tend\tname\tdirection\n1\tzzz\t200\tbad\tloss\n";
        let err = SyndromeRegionSet::from_tsv_reader(Cursor::new(tsv), "bad.tsv").unwrap_err();
        assert!(matches!(err, TriageError::RegionTable { line: 2, .. }));
    }

    #[test]
    fn test_tsv_inverted_row_is_fatal() {
        let tsv = "chrom\tstart\tend\tname\tdirection\n1\t300\t200\tbackwards\tloss\n";
        assert!(SyndromeRegionSet::from_tsv_reader(Cursor::new(tsv), "bad.tsv").is_err());
    }
}
