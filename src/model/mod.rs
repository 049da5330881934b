//! Data model for positioned text and its reconstructed layout.
//!
//! Fragments are projected once per page and never mutated; every derived
//! structure (blocks, items, pairs, rows) refers to them by index into the
//! page's fragment list. Derived structures are rebuilt from scratch on
//! every run of the pipeline.

mod fragment;
mod geometry;
mod grid;
mod page;
mod structure;

pub use fragment::{Fragment, RawFragment};
pub use geometry::{BoundingBox, Transform};
pub use grid::{GridCell, GridRow, RenditionGrid};
pub use page::{Page, PageInput, Viewport};
pub use structure::{Block, ConsolidatedItem, ItemSource, LabelValuePair, Row, Title};
