//! # gridflow-io: Network importers
//!
//! The data collaborator of the gridflow workspace: parsers that turn
//! external case files into fully populated [`gridflow_core::Network`]
//! values. Two formats are supported:
//!
//! - **DIMACS max** (`.max`/`.dimacs`) - the textual maximum-flow
//!   interchange format (`p max`, `n`, `a` lines); carries its own
//!   source/sink markers
//! - **CSV arc list** (`.csv`) - a `from,to,capacity` table; terminals are
//!   not representable in the format, so the caller names them
//!
//! ```no_run
//! use gridflow_io::importers::{load_network, Format};
//! use std::path::Path;
//!
//! let path = Path::new("network.max");
//! assert_eq!(Format::detect(path), Some(Format::Dimacs));
//! let network = load_network(path, None)?;
//! println!("{}", network.stats());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! All parsers validate eagerly and attach file/line context to failures;
//! a partially populated network is never returned.

pub mod importers;

pub use importers::{
    load_network, parse_arclist_file, parse_arclist_string, parse_dimacs_file,
    parse_dimacs_string, Format,
};
