//! Curated known-gene table: inheritance modes per gene symbol.
//!
//! The table is authoritative reference data, loaded once per run and
//! shared read-only across families. Malformed input is a fatal load-time
//! error; a *missing* gene at lookup time is not an error, it simply
//! leaves the variant unconstrained.
//!
//! Two on-disk forms are supported: a tab-separated table in the layout
//! used by curation exports (`gene  inheritance  confidence  mechanism`,
//! with comma-separated mode lists), and a JSON document. Either may be
//! gzip-compressed.

use chrono::NaiveDate;
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use crate::error::TriageError;
use crate::variant::Chromosome;

/// Transmission pattern by which a gene's disease-causing variants
/// segregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InheritanceMode {
    /// One altered autosomal copy suffices.
    AutosomalDominant,
    /// Both autosomal copies must be altered.
    AutosomalRecessive,
    /// One altered X copy suffices, either sex.
    XLinkedDominant,
    /// Altered X copies on every carried X; hemizygous males affected.
    XLinkedRecessive,
    /// Post-zygotic mosaic occurrence.
    Mosaic,
}

impl InheritanceMode {
    /// Human-readable mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            InheritanceMode::AutosomalDominant => "autosomal dominant",
            InheritanceMode::AutosomalRecessive => "autosomal recessive",
            InheritanceMode::XLinkedDominant => "X-linked dominant",
            InheritanceMode::XLinkedRecessive => "X-linked recessive",
            InheritanceMode::Mosaic => "mosaic",
        }
    }

    /// Whether a single altered copy is enough under this mode.
    ///
    /// Mosaic genes present like dominant ones in the child: a single
    /// post-zygotic allele, absent from both parents.
    pub fn is_dominant(&self) -> bool {
        matches!(
            self,
            InheritanceMode::AutosomalDominant
                | InheritanceMode::XLinkedDominant
                | InheritanceMode::Mosaic
        )
    }

    /// Whether this mode requires biallelic (or hemizygous) alteration.
    pub fn is_recessive(&self) -> bool {
        matches!(
            self,
            InheritanceMode::AutosomalRecessive | InheritanceMode::XLinkedRecessive
        )
    }

    /// Whether the mode is X-linked.
    pub fn is_x_linked(&self) -> bool {
        matches!(
            self,
            InheritanceMode::XLinkedDominant | InheritanceMode::XLinkedRecessive
        )
    }

    /// Whether this mode can be evaluated at a locus on the given
    /// chromosome. X-linked modes apply only on X; autosomal modes never
    /// apply there.
    pub fn applies_to(&self, chrom: Chromosome) -> bool {
        match chrom {
            Chromosome::X => self.is_x_linked(),
            Chromosome::Autosome(_) => !self.is_x_linked(),
            // Y and MT loci are outside both rule sets
            Chromosome::Y | Chromosome::Mito => false,
        }
    }
}

impl fmt::Display for InheritanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InheritanceMode {
    type Err = UnknownMode;

    /// Accepts both the descriptive names and the vocabulary of curated
    /// gene tables ("Monoallelic", "Biallelic", "Hemizygous"). The table
    /// term "Both" expands to two modes and is handled by
    /// [`parse_mode_list`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "autosomal dominant" | "autosomal_dominant" | "monoallelic" => {
                Self::AutosomalDominant
            }
            "autosomal recessive" | "autosomal_recessive" | "biallelic" => {
                Self::AutosomalRecessive
            }
            "x-linked dominant" | "x_linked_dominant" => Self::XLinkedDominant,
            "x-linked recessive" | "x_linked_recessive" | "hemizygous" => Self::XLinkedRecessive,
            "mosaic" => Self::Mosaic,
            other => return Err(UnknownMode(other.to_string())),
        })
    }
}

/// Error for an inheritance-mode term outside the recognised vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(pub String);

impl fmt::Display for UnknownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown inheritance mode: {}", self.0)
    }
}

impl std::error::Error for UnknownMode {}

/// Parse a comma-separated mode list, expanding the table term "Both"
/// into dominant + recessive.
pub fn parse_mode_list(s: &str) -> Result<Vec<InheritanceMode>, UnknownMode> {
    let mut modes = Vec::new();
    for token in s.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if token.eq_ignore_ascii_case("both") {
            modes.push(InheritanceMode::AutosomalDominant);
            modes.push(InheritanceMode::AutosomalRecessive);
        } else {
            modes.push(token.parse()?);
        }
    }
    if modes.is_empty() {
        return Err(UnknownMode(s.to_string()));
    }
    modes.dedup();
    Ok(modes)
}

/// Curation confidence for a gene-disorder association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GeneConfidence {
    /// Confirmed association.
    Confirmed,
    /// Probable association.
    Probable,
    /// Possible association.
    Possible,
    /// No confidence recorded.
    #[default]
    Unknown,
}

impl FromStr for GeneConfidence {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Ok(if lower.contains("confirmed") {
            Self::Confirmed
        } else if lower.contains("probable") {
            Self::Probable
        } else if lower.contains("possible") {
            Self::Possible
        } else {
            Self::Unknown
        })
    }
}

/// One curated entry for a gene. A symbol may carry several entries from
/// overlapping curation sources, and each entry may list several modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownGeneEntry {
    /// Gene symbol (e.g. HGNC).
    pub symbol: String,
    /// Inheritance modes; never empty.
    pub modes: Vec<InheritanceMode>,
    /// Curation confidence tag.
    pub confidence: GeneConfidence,
    /// Associated disease mechanism, when recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanism: Option<String>,
}

/// The full known-gene table: a multimap from symbol to curated entries.
#[derive(Debug, Clone, Default)]
pub struct KnownGeneDatabase {
    genes: HashMap<String, Vec<KnownGeneEntry>>,
    /// Curation export date; provenance only, never consulted by logic.
    pub curation_date: Option<NaiveDate>,
}

/// Serialized form of the table for the JSON loader.
#[derive(Debug, Serialize, Deserialize)]
struct KnownGeneTableFile {
    #[serde(default)]
    curation_date: Option<NaiveDate>,
    genes: Vec<KnownGeneEntry>,
}

impl KnownGeneDatabase {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from entries.
    pub fn from_entries<I: IntoIterator<Item = KnownGeneEntry>>(entries: I) -> Self {
        let mut db = Self::new();
        for entry in entries {
            db.insert(entry);
        }
        db
    }

    /// Add one curated entry.
    pub fn insert(&mut self, entry: KnownGeneEntry) {
        self.genes.entry(entry.symbol.clone()).or_default().push(entry);
    }

    /// All curated entries for a symbol; empty when the gene is not in
    /// the table ("no known constraint", not an error).
    pub fn lookup(&self, symbol: &str) -> &[KnownGeneEntry] {
        self.genes.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct gene symbols.
    pub fn gene_count(&self) -> usize {
        self.genes.len()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Load from a tab-separated table; `.gz` paths are decompressed.
    ///
    /// Expected columns: `gene`, `inheritance` (comma-separated mode
    /// list), `confidence`, and an optional `mechanism`. The first line
    /// is a header. Any malformed row is fatal.
    pub fn from_tsv_path<P: AsRef<Path>>(path: P) -> Result<Self, TriageError> {
        let path = path.as_ref();
        Self::from_tsv_reader(open_table(path)?, &path.display().to_string())
    }

    /// Load a tab-separated table from any reader; `label` names the
    /// source in errors.
    pub fn from_tsv_reader<R: BufRead>(reader: R, label: &str) -> Result<Self, TriageError> {
        let mut db = Self::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let lineno = idx + 1;
            if lineno == 1 || line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 3 {
                return Err(TriageError::GeneTable {
                    path: label.to_string(),
                    line: lineno,
                    reason: format!("expected at least 3 columns, found {}", fields.len()),
                });
            }
            let symbol = fields[0].trim();
            if symbol.is_empty() {
                return Err(TriageError::GeneTable {
                    path: label.to_string(),
                    line: lineno,
                    reason: "empty gene symbol".to_string(),
                });
            }
            let modes = parse_mode_list(fields[1]).map_err(|e| TriageError::GeneTable {
                path: label.to_string(),
                line: lineno,
                reason: e.to_string(),
            })?;
            let confidence: GeneConfidence = fields[2].parse().unwrap_or_default();
            let mechanism = fields
                .get(3)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from);
            db.insert(KnownGeneEntry {
                symbol: symbol.to_string(),
                modes,
                confidence,
                mechanism,
            });
        }
        Ok(db)
    }

    /// Load from a JSON document; `.gz` paths are decompressed.
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, TriageError> {
        Self::from_json_reader(open_table(path.as_ref())?)
    }

    /// Load a JSON document from any reader.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, TriageError> {
        let table: KnownGeneTableFile = serde_json::from_reader(reader)?;
        let mut db = Self::from_entries(table.genes);
        db.curation_date = table.curation_date;
        Ok(db)
    }
}

/// Open a reference table, transparently decompressing `.gz` files.
fn open_table(path: &Path) -> Result<Box<dyn BufRead>, TriageError> {
    let file = File::open(path).map_err(|e| TriageError::Io {
        msg: format!("{}: {e}", path.display()),
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
