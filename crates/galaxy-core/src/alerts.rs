//! Alert board: the seeded alerts, the list filter and the per-status tab
//! counts.

use galaxy_schema::{Alert, AlertSeverity, AlertSource, AlertStatus, SourceDocument};
use serde::Serialize;

/// Every criterion left at `None` (or an empty search) matches all alerts.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub status: Option<AlertStatus>,
    pub severity: Option<AlertSeverity>,
    pub source: Option<AlertSource>,
    /// Case-insensitive substring of title, description or category.
    pub search: String,
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        let needle = self.search.to_lowercase();
        self.status.map_or(true, |s| alert.status == s)
            && self.severity.map_or(true, |s| alert.severity == s)
            && self.source.map_or(true, |s| alert.source == s)
            && [&alert.title, &alert.description, &alert.category]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}

pub fn filter_alerts<'a>(alerts: &'a [Alert], filter: &AlertFilter) -> Vec<&'a Alert> {
    alerts.iter().filter(|a| filter.matches(a)).collect()
}

/// Tab badge counts. Always taken over the whole board, never the filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub all: usize,
    pub new: usize,
    pub unresolved: usize,
    pub resolved: usize,
}

impl StatusCounts {
    pub fn tally(alerts: &[Alert]) -> Self {
        alerts.iter().fold(
            Self {
                all: alerts.len(),
                ..Self::default()
            },
            |mut counts, alert| {
                match alert.status {
                    AlertStatus::New => counts.new += 1,
                    AlertStatus::Unresolved => counts.unresolved += 1,
                    AlertStatus::Resolved => counts.resolved += 1,
                }
                counts
            },
        )
    }

    /// `None` is the "All" tab.
    pub fn get(&self, status: Option<AlertStatus>) -> usize {
        match status {
            None => self.all,
            Some(AlertStatus::New) => self.new,
            Some(AlertStatus::Unresolved) => self.unresolved,
            Some(AlertStatus::Resolved) => self.resolved,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn alert(
    id: u32,
    title: &str,
    severity: AlertSeverity,
    category: &str,
    description: &str,
    status: AlertStatus,
    source: AlertSource,
    document: (&str, &str, &str),
) -> Alert {
    let (kind, link, reference) = document;
    Alert {
        id,
        title: title.to_string(),
        severity,
        category: category.to_string(),
        description: description.to_string(),
        status,
        source,
        source_document: SourceDocument {
            kind: kind.to_string(),
            link: link.to_string(),
            reference: reference.to_string(),
        },
    }
}

pub fn sample_alerts() -> Vec<Alert> {
    use AlertSeverity::*;
    use AlertSource::*;
    use AlertStatus::*;

    vec![
        alert(
            1,
            "Calibration Overdue",
            Critical,
            "Equipment Management",
            "Analytical Balance (ML204) calibration is overdue by 5 days, last calibrated on \
             2025-04-01 per [Calibration Log - QA Lab]. Immediate recalibration required before \
             next moisture test.",
            New,
            System,
            (
                "SOP Document",
                "/assets/labresources/SOP_Lab_Moisture_Analysis_Expanded_v3.docx.pdf",
                "SOP-LAB-MA-003",
            ),
        ),
        alert(
            2,
            "Test Result Outside SOP Range",
            Critical,
            "Quality Control",
            "Moisture result of 14.7% for Corn Batch #C-4456 exceeds SOP-LAB-QC-014's limit of \
             13.0%. Retest and CAPA action completed, see [CAPA Report - Moisture Deviation].",
            Unresolved,
            Integration,
            (
                "CAPA Report",
                "/assets/labresources/CAPA_Report_Corn_Batch_C4456_Moisture.pdf",
                "CAPA-C4456-M",
            ),
        ),
        alert(
            3,
            "Incomplete ELN Record",
            Medium,
            "Documentation",
            "Incomplete ELN entry detected for moisture test on Batch #C-4483. Technician \
             signature missing as noted in [Audit Report - QC Lab Q1 2025].",
            New,
            System,
            (
                "Audit Report",
                "/assets/labresources/Audit_Report_QC_Lab_Q1_2025.pdf",
                "AUD-QC-Q1-25",
            ),
        ),
        alert(
            4,
            "Incoming Raw Material Approval",
            Info,
            "Quality Control",
            "New wheat shipment (Batch WHT-HRS-4522) passed all quality checks. Moisture: 12.2%, \
             Protein: 13.4%. Accepted by QA, see [Vendor Inspection Report - AgriPure].",
            New,
            User,
            (
                "Inspection Report",
                "/assets/labresources/Vendor_Inspection_Report_Wheat_AgriPure_2025.pdf",
                "VQI-WHT4522",
            ),
        ),
        alert(
            5,
            "Low Stock Warning",
            Medium,
            "Inventory Management",
            "Low stock alert: Drying Reagent A inventory at 1.5L as of March 31. Review needed \
             per [Inventory Log - QC Lab, March 2025].",
            Unresolved,
            System,
            (
                "Inventory Report",
                "/assets/labresources/Inventory_Reagent_Log_QC_March_2025.pdf",
                "INV-QC-MAR25",
            ),
        ),
        alert(
            6,
            "Training Record Check Passed",
            Info,
            "Training",
            "Technician Emily Saunders completed training on SOP-LAB-QC-014 and passed with 92%. \
             Verified and archived in [Training Record - Emily Saunders, QC Lab].",
            Resolved,
            Integration,
            (
                "Training Record",
                "/assets/labresources/Training_Record_Emily_Saunders_QC_2025.pdf",
                "TRN-ES-2025",
            ),
        ),
    ]
}
