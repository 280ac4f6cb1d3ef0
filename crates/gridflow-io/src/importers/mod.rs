//! Flow-network format importers.
//!
//! Each importer returns a fully populated [`gridflow_core::Network`] or an
//! error with file/line context; there is no partial import. [`Format`]
//! detects the format from the file extension and dispatches.

use anyhow::{anyhow, Result};
use gridflow_core::Network;
use std::path::Path;

mod arclist;
mod dimacs;

pub use arclist::{parse_arclist_file, parse_arclist_string};
pub use dimacs::{parse_dimacs_file, parse_dimacs_string};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// DIMACS maximum-flow format (`p max`, `n`, `a` lines)
    Dimacs,
    /// CSV arc list with a `from,to,capacity` header
    ArcList,
}

impl Format {
    /// Detect the format from the file extension.
    pub fn detect(path: &Path) -> Option<Format> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("max") | Some("dimacs") => Some(Format::Dimacs),
            Some("csv") => Some(Format::ArcList),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Dimacs => "dimacs",
            Format::ArcList => "arclist",
        }
    }
}

/// Load a network from `path`, detecting the format from the extension.
///
/// DIMACS files carry their own source/sink markers; for CSV arc lists the
/// terminals are supplied as `(source, sink)` node names.
pub fn load_network(path: &Path, terminals: Option<(&str, &str)>) -> Result<Network> {
    let format = Format::detect(path)
        .ok_or_else(|| anyhow!("cannot detect input format of '{}'", path.display()))?;
    match format {
        Format::Dimacs => parse_dimacs_file(path),
        Format::ArcList => {
            let (source, sink) = terminals.ok_or_else(|| {
                anyhow!("csv arc lists carry no terminal markers; pass --source and --sink")
            })?;
            parse_arclist_file(path, source, sink)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::detect(Path::new("net.max")), Some(Format::Dimacs));
        assert_eq!(
            Format::detect(Path::new("net.DIMACS")),
            Some(Format::Dimacs)
        );
        assert_eq!(Format::detect(Path::new("net.csv")), Some(Format::ArcList));
        assert_eq!(Format::detect(Path::new("net.json")), None);
        assert_eq!(Format::detect(Path::new("net")), None);
    }

    #[test]
    fn test_load_network_requires_terminals_for_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.csv");
        std::fs::write(&path, "from,to,capacity\nA,B,1.0\n").unwrap();

        let err = load_network(&path, None).unwrap_err();
        assert!(err.to_string().contains("no terminal markers"));

        let network = load_network(&path, Some(("A", "B"))).unwrap();
        assert_eq!(network.arc_count(), 1);
    }

    #[test]
    fn test_load_network_unknown_extension() {
        let err = load_network(Path::new("net.xml"), None).unwrap_err();
        assert!(err.to_string().contains("cannot detect input format"));
    }
}
