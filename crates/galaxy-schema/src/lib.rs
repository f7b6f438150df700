use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Data source that frames a query. Only the fallback response echoes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dataset {
    #[default]
    #[serde(rename = "LIMS Data")]
    Lims,
    #[serde(rename = "MES Data")]
    Mes,
    #[serde(rename = "ELN Data")]
    Eln,
    #[serde(rename = "QMS Data")]
    Qms,
    #[serde(rename = "Inventory Data")]
    Inventory,
}

impl Dataset {
    pub const ALL: [Dataset; 5] = [
        Dataset::Lims,
        Dataset::Mes,
        Dataset::Eln,
        Dataset::Qms,
        Dataset::Inventory,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Lims => "LIMS Data",
            Self::Mes => "MES Data",
            Self::Eln => "ELN Data",
            Self::Qms => "QMS Data",
            Self::Inventory => "Inventory Data",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Lims => "lims",
            Self::Mes => "mes",
            Self::Eln => "eln",
            Self::Qms => "qms",
            Self::Inventory => "inventory",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Dataset {
    type Err = anyhow::Error;

    /// Accepts either the display label ("ELN Data") or the slug ("eln").
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let needle = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.slug() == needle || d.label().to_lowercase() == needle)
            .ok_or_else(|| anyhow!("unknown dataset: {raw}"))
    }
}

/// Per-point classification used to colour chart bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn color(&self) -> &'static str {
        match self {
            Self::Normal => "#00C4A7",
            Self::Warning => "#FFB547",
            Self::Critical => "#FF5A75",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub data: Vec<f64>,
    pub severities: Vec<Severity>,
}

impl ChartSeries {
    pub fn new(label: &str, data: &[f64], severities: &[Severity]) -> Self {
        debug_assert_eq!(data.len(), severities.len());
        Self {
            label: label.to_string(),
            data: data.to_vec(),
            severities: severities.to_vec(),
        }
    }

    /// Series where every point shares one severity.
    pub fn uniform(label: &str, data: &[f64], severity: Severity) -> Self {
        Self {
            label: label.to_string(),
            data: data.to_vec(),
            severities: vec![severity; data.len()],
        }
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, Severity)> + '_ {
        self.data.iter().copied().zip(self.severities.iter().copied())
    }
}

/// Bar chart payload. Rendering is left to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl Chart {
    pub fn new(title: &str, labels: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            series: Vec::new(),
        }
    }

    pub fn with_series(mut self, series: ChartSeries) -> Self {
        self.series.push(series);
        self
    }

    pub fn primary(&self) -> Option<&ChartSeries> {
        self.series.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTableRow {
    pub technician: String,
    pub batch_id: String,
    pub moisture: String,
    pub status: String,
}

impl DataTableRow {
    pub fn new(technician: &str, batch_id: &str, moisture: &str, status: &str) -> Self {
        Self {
            technician: technician.to_string(),
            batch_id: batch_id.to_string(),
            moisture: moisture.to_string(),
            status: status.to_string(),
        }
    }
}

/// Detail shown in the side canvas when a turn is expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasDetail {
    pub title: String,
    pub description: String,
    pub chart: Chart,
    #[serde(default)]
    pub data_table: Vec<DataTableRow>,
    #[serde(default)]
    pub additional_info: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseActions {
    pub can_download: bool,
    pub can_add_to_report: bool,
    pub can_copy: bool,
    pub can_regenerate: bool,
}

impl ResponseActions {
    pub fn all() -> Self {
        Self {
            can_download: true,
            can_add_to_report: true,
            can_copy: true,
            can_regenerate: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.can_download || self.can_add_to_report || self.can_copy || self.can_regenerate)
    }
}

/// Which canned response a query was classified as.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    MoistureRiskTrend,
    FailurePattern,
    AshContent,
    FermentationCorrelation,
    LineFailureDistribution,
    NotebookSummary,
    NoteRewrite,
    RootCause,
    SoyTrend,
    PhDistribution,
    Custom(String),
    Unsupported,
}

impl Intent {
    pub fn name(&self) -> &str {
        match self {
            Self::MoistureRiskTrend => "moisture_risk_trend",
            Self::FailurePattern => "failure_pattern",
            Self::AshContent => "ash_content",
            Self::FermentationCorrelation => "fermentation_correlation",
            Self::LineFailureDistribution => "line_failure_distribution",
            Self::NotebookSummary => "notebook_summary",
            Self::NoteRewrite => "note_rewrite",
            Self::RootCause => "root_cause",
            Self::SoyTrend => "soy_trend",
            Self::PhDistribution => "ph_distribution",
            Self::Custom(name) => name,
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub intent: Intent,
    pub text: String,
    #[serde(default)]
    pub chart: Option<Chart>,
    #[serde(default)]
    pub canvas: Option<CanvasDetail>,
    #[serde(default)]
    pub actions: ResponseActions,
}

impl Response {
    pub fn text_only(intent: Intent, text: impl Into<String>) -> Self {
        Self {
            intent,
            text: text.into(),
            chart: None,
            canvas: None,
            actions: ResponseActions::default(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.intent == Intent::Unsupported
    }

    /// Sample breakdown rows; empty when the response has no canvas table.
    pub fn table(&self) -> &[DataTableRow] {
        self.canvas
            .as_ref()
            .map(|c| c.data_table.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct TurnId(pub Uuid);

impl TurnId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub turn_id: TurnId,
    pub text: String,
    /// Dataset selected when the query was submitted.
    pub dataset: Dataset,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: TurnId,
    pub query: Query,
    pub response: Response,
    pub completed_at: DateTime<Utc>,
}

/// Parses `raw` against a closed set of labels, ignoring case and
/// surrounding whitespace.
fn parse_label<T: Copy>(
    raw: &str,
    all: &[T],
    label: fn(&T) -> &'static str,
    kind: &str,
) -> anyhow::Result<T> {
    let needle = raw.trim();
    all.iter()
        .copied()
        .find(|v| label(v).eq_ignore_ascii_case(needle))
        .ok_or_else(|| anyhow!("unknown {kind}: {raw}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertSeverity {
    Critical,
    Medium,
    Info,
}

impl AlertSeverity {
    pub const ALL: [AlertSeverity; 3] = [Self::Critical, Self::Medium, Self::Info];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Medium => "Medium",
            Self::Info => "Info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertStatus {
    New,
    Unresolved,
    Resolved,
}

impl AlertStatus {
    pub const ALL: [AlertStatus; 3] = [Self::New, Self::Unresolved, Self::Resolved];

    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Unresolved => "Unresolved",
            Self::Resolved => "Resolved",
        }
    }
}

/// Where an alert was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertSource {
    System,
    Integration,
    User,
}

impl AlertSource {
    pub const ALL: [AlertSource; 3] = [Self::System, Self::Integration, Self::User];

    pub fn label(&self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Integration => "Integration",
            Self::User => "User",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityCategory {
    Data,
    Analysis,
    Report,
    Document,
    Security,
}

impl ActivityCategory {
    pub const ALL: [ActivityCategory; 5] = [
        Self::Data,
        Self::Analysis,
        Self::Report,
        Self::Document,
        Self::Security,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Data => "Data",
            Self::Analysis => "Analysis",
            Self::Report => "Report",
            Self::Document => "Document",
            Self::Security => "Security",
        }
    }
}

/// Who produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSource {
    Ai,
    Manual,
}

impl ReportSource {
    pub const ALL: [ReportSource; 2] = [Self::Ai, Self::Manual];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Manual => "manual",
        }
    }
}

macro_rules! label_traits {
    ($($ty:ident => $kind:literal),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.pad(self.label())
                }
            }

            impl FromStr for $ty {
                type Err = anyhow::Error;

                fn from_str(raw: &str) -> Result<Self, Self::Err> {
                    parse_label(raw, &Self::ALL, Self::label, $kind)
                }
            }
        )*
    };
}

label_traits! {
    AlertSeverity => "alert severity",
    AlertStatus => "alert status",
    AlertSource => "alert source",
    ActivityCategory => "activity category",
    ReportSource => "report source",
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub kind: String,
    pub link: String,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: u32,
    pub title: String,
    pub severity: AlertSeverity,
    pub category: String,
    pub description: String,
    pub status: AlertStatus,
    pub source: AlertSource,
    pub source_document: SourceDocument,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u32,
    pub action: String,
    pub description: String,
    /// Local wall-clock time as recorded, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    pub category: ActivityCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub time_ago: String,
    pub file_name: String,
    pub tags: Vec<String>,
    pub source: ReportSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BusMessage {
    QuerySubmitted {
        turn_id: TurnId,
        text: String,
        dataset: Dataset,
    },
    ResponseReady {
        turn_id: TurnId,
        intent: Intent,
    },
    DatasetSelected {
        dataset: Dataset,
    },
    CanvasOpened {
        turn_id: TurnId,
    },
    CanvasClosed {
        turn_id: Option<TurnId>,
    },
}
