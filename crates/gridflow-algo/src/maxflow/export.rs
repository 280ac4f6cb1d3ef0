//! Export functionality for FlowAssignment (JSON and CSV).

use super::solution::FlowAssignment;
use anyhow::{Context, Result};
use std::path::Path;

impl FlowAssignment {
    /// Export to JSON format
    pub fn to_json(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("serializing FlowAssignment to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing JSON to {}", path.display()))?;
        Ok(())
    }

    /// Convert to JSON value (for streaming/stdout)
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).context("converting FlowAssignment to JSON value")
    }

    /// Export to CSV format. Rows follow the canonical model order, so
    /// repeated exports of the same assignment are byte-identical.
    pub fn to_csv(&self, path: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("creating CSV writer for {}", path.display()))?;

        wtr.write_record(["from", "to", "capacity", "flow"])
            .context("writing CSV header")?;

        for arc in self.arc_flows() {
            let capacity = arc.capacity.to_string();
            let flow = arc.flow.to_string();
            wtr.write_record([
                arc.from_name.as_str(),
                arc.to_name.as_str(),
                capacity.as_str(),
                flow.as_str(),
            ])
            .context("writing CSV record")?;
        }

        wtr.flush().context("flushing CSV writer")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::solution::ArcFlow;
    use super::*;
    use gridflow_core::NodeId;
    use std::time::Duration;
    use tempfile::TempDir;

    fn create_test_assignment() -> FlowAssignment {
        FlowAssignment::new(
            5.0,
            "clarabel",
            Duration::from_millis(8),
            vec![
                ArcFlow {
                    from: NodeId::new(0),
                    to: NodeId::new(1),
                    from_name: "A".to_string(),
                    to_name: "B".to_string(),
                    capacity: 5.0,
                    flow: 3.0,
                },
                ArcFlow {
                    from: NodeId::new(1),
                    to: NodeId::new(2),
                    from_name: "B".to_string(),
                    to_name: "C".to_string(),
                    capacity: 3.0,
                    flow: 3.0,
                },
            ],
        )
    }

    #[test]
    fn test_to_json_value() {
        let assignment = create_test_assignment();
        let json = assignment.to_json_value().expect("to_json_value");

        assert!(json.is_object());
        assert_eq!(json.get("max_flow").and_then(|v| v.as_f64()), Some(5.0));
        assert_eq!(
            json.get("backend").and_then(|v| v.as_str()),
            Some("clarabel")
        );
        assert_eq!(
            json.get("flows").and_then(|v| v.as_array()).map(|a| a.len()),
            Some(2)
        );
    }

    #[test]
    fn test_to_json_file() {
        let assignment = create_test_assignment();
        let temp_dir = TempDir::new().unwrap();
        let json_path = temp_dir.path().join("flows.json");

        assignment.to_json(&json_path).expect("to_json");

        assert!(json_path.exists());
        let content = std::fs::read_to_string(&json_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(parsed.get("max_flow").is_some());
    }

    #[test]
    fn test_to_csv_file() {
        let assignment = create_test_assignment();
        let temp_dir = TempDir::new().unwrap();
        let csv_path = temp_dir.path().join("flows.csv");

        assignment.to_csv(&csv_path).expect("to_csv");

        let content = std::fs::read_to_string(&csv_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "from,to,capacity,flow");
        assert_eq!(lines[1], "A,B,5,3");
    }
}
