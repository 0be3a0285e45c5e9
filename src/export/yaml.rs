//! YAML Export functionality

use serde::Serialize;
use std::io::Write;

use super::json::ExportDocument;
use crate::error::{ProfitError, ProfitResult};

/// Write a document as YAML with a short comment header
pub fn export_yaml<T: Serialize, W: Write>(
    document: &ExportDocument<T>,
    writer: &mut W,
) -> ProfitResult<()> {
    let header = format!(
        "# profit-calc {} export\n# Generated: {}\n# App Version: {}\n\n",
        document.kind, document.exported_at, document.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| ProfitError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, document).map_err(|e| ProfitError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CaseInput, ReviewCases, RevenueBreakdown};
    use crate::services::evaluate_review;

    #[test]
    fn test_yaml_export() {
        let cases = ReviewCases {
            worst: CaseInput::new(RevenueBreakdown::new(1000.0, 0.0, 0.0)),
            best: CaseInput::new(RevenueBreakdown::new(2000.0, 0.0, 0.0)),
        };
        let document = ExportDocument::new("review", evaluate_review(&cases));

        let mut output = Vec::new();
        export_yaml(&document, &mut output).unwrap();
        let yaml_string = String::from_utf8(output).unwrap();

        assert!(yaml_string.starts_with("# profit-calc review export"));
        assert!(yaml_string.contains("kind: review"));
        assert!(yaml_string.contains("total_revenue: 2000.0"));
        assert!(yaml_string.contains("risk_cost: 100.0"));
    }
}
