//! Shared types for the frequent tree mining workspace.
//!
//! This crate provides labeled trees and their postorders, the transaction
//! database and its text loader, canonical strings with the per-level pattern
//! index, the frequent label alphabet and the run configuration.

pub mod alphabet;
pub mod canonical;
mod config;
pub mod database;
mod error;
mod ids;
pub mod index;
mod label;
pub mod postorder;
pub mod tree;

pub use crate::alphabet::{EdgeKey, ExtensionEdge, FrequentAlphabet, FrequentVertex};
pub use crate::canonical::{CanonicalString, canonical_string};
pub use crate::config::*;
pub use crate::database::{GraphReader, Transaction, TransactionDb, load_database};
pub use crate::error::{LoadError, TreeError};
pub use crate::ids::{PatternId, TransactionId};
pub use crate::index::{IndexEntry, PatternIndex};
pub use crate::label::{Label, WILDCARD_TOKEN};
pub use crate::postorder::Postorder;
pub use crate::tree::{LabeledTree, Neighbor};
