//! # evref-search
//!
//! Client-side filtering and sorting over the [`evref_catalog`] corpus.
//!
//! The search layer is a pure function from (catalog, predicate set) to a
//! sorted subset of the corpus. Predicates are AND-combined; free text is
//! OR-matched across an event's id, name, description, category, mapped
//! technique ids/names, and scenario notes.
//!
//! ## Quick Start
//!
//! ```rust
//! use evref_catalog::{Catalog, EventSource};
//! use evref_search::{EventQuery, SourceFilter, search};
//!
//! let catalog = Catalog::load().unwrap();
//!
//! // Free text reaches into technique names: Kerberoasting -> 4769.
//! let query = EventQuery {
//!     text: Some("kerberoasting".into()),
//!     ..Default::default()
//! };
//! let hits = search(&catalog, &query);
//! assert!(hits.iter().any(|e| e.id == "4769"));
//!
//! // Same text, wrong source: predicates AND together.
//! let query = EventQuery {
//!     text: Some("kerberoasting".into()),
//!     source: SourceFilter::Only(EventSource::Sysmon),
//!     ..Default::default()
//! };
//! assert!(search(&catalog, &query).is_empty());
//! ```

pub mod query;

pub use query::{EventQuery, SortKey, SourceFilter, search};
