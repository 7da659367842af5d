//! # evref-catalog
//!
//! A merged reference catalog of Windows Security and Sysmon event ids:
//! descriptions, categories, MITRE ATT&CK technique mappings, key log
//! fields, analyst scenarios, and long-form enhanced content.
//!
//! The catalog is a deterministic join over independently authored lookup
//! tables bundled into the crate. All data is static; there is no network
//! access and nothing mutates after load.
//!
//! ## Architecture
//!
//! - **Technique index builder**: normalizes the loosely-typed ATT&CK
//!   corpus into an id-keyed lookup, dropping (and reporting) malformed
//!   records instead of failing.
//! - **Merge engine**: joins each base event with its side tables and
//!   resolved techniques; missing entries degrade to absent fields, never
//!   to errors.
//! - **Query façade**: [`Catalog`] owns the merged corpus and exposes
//!   read-only lookups plus the curated most-exploited ranking.
//!
//! ## Quick Start
//!
//! ```rust
//! use evref_catalog::Catalog;
//!
//! let catalog = Catalog::load().unwrap();
//!
//! let logon = catalog.event_by_id("4624").unwrap();
//! assert_eq!(logon.name, "An account was successfully logged on");
//!
//! // Techniques come back sorted by id, or not at all.
//! let techniques = logon.mitre_attack.as_ref().unwrap();
//! assert!(techniques.windows(2).all(|w| w[0].id <= w[1].id));
//!
//! // The curated ranking preserves its editorial order.
//! let top = catalog.top_exploited();
//! assert_eq!(top[0].id, "4624");
//! ```

pub mod catalog;
pub mod error;
pub mod merge;
pub mod model;
pub mod raw;
pub mod technique_index;

// Re-export the most commonly used types at crate root
pub use catalog::{Catalog, LoadReport, RawTables};
pub use error::{CatalogError, Result};
pub use merge::{MergeReport, SideTables, UnresolvedTechnique, merge_events};
pub use model::{EnhancedContent, EventDetail, EventSource, KeyLogField, Technique};
pub use raw::{RawEvent, RawTechnique};
pub use technique_index::{DroppedTechnique, TechniqueIndex, UNKNOWN_ID};
