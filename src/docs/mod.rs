//! Document export: creation, text insertion, heading emphasis, sharing.

pub mod client;
pub mod emphasis;
mod exporter;

pub use client::{DocsClient, DocumentService};
pub use emphasis::{
    find_all_nonoverlapping, find_first, heading_ranges, EmphasisRange, BODY_START_INDEX,
};
pub use exporter::{document_url, ClinicalDocExporter};
