//! Parallel screening of independent families.
//!
//! Families share no mutable state; the reference context is read-only,
//! so a rayon fan-out needs no locking. Enable with the `parallel`
//! feature.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use trio_triage::parallel::screen_families;
//! use trio_triage::{FilterConfig, ReferenceContext};
//!
//! let ctx = ReferenceContext::default();
//! let config = FilterConfig::default();
//! let inputs = Vec::new();
//! let results = screen_families(&ctx, &config, &inputs);
//! assert!(results.is_empty());
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use rayon::prelude::*;

use crate::aggregate::CandidateResult;
use crate::config::FilterConfig;
use crate::family::Family;
use crate::pipeline::{screen_family, ReferenceContext};
use crate::trio::FamilyCalls;

/// Screen multiple families in parallel against one shared context.
///
/// Returns one result list per input family, in input order; within each
/// list, candidates preserve genomic position order.
pub fn screen_families(
    ctx: &ReferenceContext,
    config: &FilterConfig,
    families: &[(Family, FamilyCalls)],
) -> Vec<Vec<CandidateResult>> {
    families
        .par_iter()
        .map(|(family, calls)| screen_family(ctx, config, family, calls))
        .collect()
}
