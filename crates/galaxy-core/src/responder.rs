//! Query intent classification and canned response selection.

use std::fmt;
use std::sync::Arc;

use galaxy_schema::{Dataset, Intent, Response};

use crate::fixtures;

pub type ResponseFactory = Arc<dyn Fn() -> Response + Send + Sync>;

/// One entry of the ordered intent table. A rule matches when every keyword
/// occurs in the lower-cased query.
#[derive(Clone)]
pub struct IntentRule {
    intent: Intent,
    keywords: Vec<String>,
    factory: ResponseFactory,
}

impl IntentRule {
    pub fn new<F>(intent: Intent, keywords: &[&str], factory: F) -> Self
    where
        F: Fn() -> Response + Send + Sync + 'static,
    {
        Self {
            intent,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            factory: Arc::new(factory),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().all(|k| lowered.contains(k.as_str()))
    }

    fn build(&self) -> Response {
        let mut response = (self.factory)();
        response.intent = self.intent.clone();
        response
    }
}

impl fmt::Debug for IntentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntentRule")
            .field("intent", &self.intent)
            .field("keywords", &self.keywords)
            .finish_non_exhaustive()
    }
}

/// Built-in rules in priority order. First match wins.
pub fn builtin_rules() -> Vec<IntentRule> {
    vec![
        IntentRule::new(
            Intent::MoistureRiskTrend,
            &["batch 410", "moisture"],
            fixtures::moisture_risk_trend,
        ),
        IntentRule::new(
            Intent::FailurePattern,
            &["pattern", "qc failures"],
            fixtures::failure_pattern,
        ),
        IntentRule::new(
            Intent::AshContent,
            &["ash content above 0.6"],
            fixtures::ash_content,
        ),
        IntentRule::new(
            Intent::FermentationCorrelation,
            &["ph", "pressure"],
            fixtures::fermentation_correlation,
        ),
        IntentRule::new(
            Intent::LineFailureDistribution,
            &["chickpea line", "qc failures"],
            fixtures::line_failure_distribution,
        ),
        IntentRule::new(
            Intent::NotebookSummary,
            &["lisa", "may 12"],
            fixtures::notebook_summary,
        ),
        IntentRule::new(
            Intent::NoteRewrite,
            &["rewrite lisa", "clarify"],
            fixtures::note_rewrite,
        ),
        IntentRule::new(
            Intent::RootCause,
            &["key observations", "failed batches"],
            fixtures::root_cause,
        ),
        IntentRule::new(
            Intent::SoyTrend,
            &["technicians note", "soy qc failures"],
            fixtures::soy_trend,
        ),
        IntentRule::new(
            Intent::PhDistribution,
            &["comments", "borderline ph"],
            fixtures::ph_distribution,
        ),
    ]
}

/// Response for queries no rule recognises. Echoes the query and dataset;
/// carries no chart, table or actions.
pub fn fallback_response(query: &str, dataset: Dataset) -> Response {
    Response::text_only(
        Intent::Unsupported,
        format!(
            "I'm analyzing your query about \"{query}\" using {dataset}. Please note that this \
             query type isn't currently supported. Try one of the suggested queries for better \
             results."
        ),
    )
}

#[derive(Debug, Clone)]
pub struct QueryResponder {
    rules: Vec<IntentRule>,
}

impl Default for QueryResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryResponder {
    pub fn new() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Appends a rule after the existing ones, ahead of the fallback.
    pub fn with_rule(mut self, rule: IntentRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    fn matching_rule(&self, query: &str) -> Option<&IntentRule> {
        let lowered = query.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&lowered))
    }

    pub fn classify(&self, query: &str) -> Intent {
        let intent = self
            .matching_rule(query)
            .map(|rule| rule.intent.clone())
            .unwrap_or(Intent::Unsupported);
        tracing::debug!(%intent, "classified query");
        intent
    }

    pub fn respond(&self, query: &str, dataset: Dataset) -> Response {
        let response = match self.matching_rule(query) {
            Some(rule) => rule.build(),
            None => fallback_response(query, dataset),
        };
        tracing::debug!(intent = %response.intent, %dataset, "classified query");
        response
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;

    use super::*;
    use galaxy_schema::Severity;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[test]
    fn batch_410_moisture_returns_trend_chart() {
        let responder = QueryResponder::new();
        let response = responder.respond("Why is Batch 410 at risk of low moisture?", Dataset::Lims);

        assert_eq!(response.intent, Intent::MoistureRiskTrend);
        let chart = response.chart.as_ref().expect("chart");
        assert_eq!(
            chart.labels,
            vec!["8:00 AM", "9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "1:00 PM"]
        );
        assert_eq!(
            chart.primary().unwrap().data,
            vec![12.5, 11.8, 11.2, 10.8, 10.4, 10.1]
        );
        assert_eq!(response.table().len(), 4);
        assert_eq!(response.table()[0].batch_id, "Batch 410");
    }

    #[test]
    fn keywords_match_in_any_order_and_case() {
        let responder = QueryResponder::new();
        for query in [
            "MOISTURE readings for BATCH 410",
            "moisture    batch 410",
            "is batch 410 fine? moisture, pattern, qc failures, ph, pressure",
        ] {
            assert_eq!(responder.classify(query), Intent::MoistureRiskTrend, "{query}");
        }
    }

    #[test]
    fn first_matching_rule_wins() {
        let responder = QueryResponder::new();
        let query = "Does batch 410 moisture follow the pattern behind QC failures?";
        assert_eq!(responder.classify(query), Intent::MoistureRiskTrend);

        // "pattern" + "qc failures" outranks the chickpea line rule.
        let query = "Is the chickpea line pattern linked to QC failures?";
        assert_eq!(responder.classify(query), Intent::FailurePattern);
    }

    #[test]
    fn ph_keyword_matches_inside_words() {
        // "ph" is a bare substring test, so "graph" plus "pressure" qualifies.
        let responder = QueryResponder::new();
        assert_eq!(
            responder.classify("graph the dryer pressure"),
            Intent::FermentationCorrelation
        );
    }

    #[test]
    fn notebook_rules_are_distinguished() {
        let responder = QueryResponder::new();
        assert_eq!(
            responder.classify("Summarize Lisa D's ELN notes for May 12."),
            Intent::NotebookSummary
        );
        assert_eq!(
            responder.classify("Rewrite Lisa's note to clarify the issue for review."),
            Intent::NoteRewrite
        );
    }

    #[test]
    fn unmatched_query_falls_back_with_echo() {
        let responder = QueryResponder::new();
        let response = responder.respond("asdf random text", Dataset::Qms);

        assert!(response.is_fallback());
        assert!(response.text.contains("asdf random text"));
        assert!(response.text.contains("QMS Data"));
        assert!(response.chart.is_none());
        assert!(response.canvas.is_none());
        assert!(response.table().is_empty());
        assert!(response.actions.is_empty());
    }

    #[test]
    fn fallback_preserves_original_casing() {
        let response = fallback_response("Which Vendors failed in Q1?", Dataset::Mes);
        assert_eq!(
            response.text,
            "I'm analyzing your query about \"Which Vendors failed in Q1?\" using MES Data. \
             Please note that this query type isn't currently supported. Try one of the \
             suggested queries for better results."
        );
    }

    #[test]
    fn dataset_does_not_change_matched_responses() {
        let responder = QueryResponder::new();
        let query = "List all comments linked to borderline pH results.";
        let a = responder.respond(query, Dataset::Lims);
        let b = responder.respond(query, Dataset::Inventory);
        assert_eq!(a, b);
        assert_eq!(a.intent, Intent::PhDistribution);
    }

    #[test]
    fn custom_rule_runs_after_builtins_before_fallback() {
        let responder = QueryResponder::new().with_rule(IntentRule::new(
            Intent::Custom("vendor_scorecard".into()),
            &["scorecard"],
            || Response::text_only(Intent::Unsupported, "AgroHarvest scorecard"),
        ));

        let response = responder.respond("Generate a scorecard for AgroHarvest", Dataset::Lims);
        assert_eq!(response.intent, Intent::Custom("vendor_scorecard".into()));
        assert_eq!(response.text, "AgroHarvest scorecard");

        // Built-ins still take priority.
        assert_eq!(
            responder.classify("batch 410 moisture scorecard"),
            Intent::MoistureRiskTrend
        );
        assert_eq!(responder.rules().len(), 11);
    }

    #[test]
    fn respond_logs_the_classified_intent() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let responder = QueryResponder::new();
            responder.respond("What did technicians note during soy QC failures?", Dataset::Lims);
            responder.respond("asdf", Dataset::Mes);
        });

        let text = logs.text();
        assert!(text.contains("intent=soy_trend"), "{text}");
        assert!(text.contains("intent=unsupported"), "{text}");
        assert!(text.contains("dataset=MES Data"), "{text}");
    }

    #[test]
    fn builtin_rule_keywords_are_lowercase() {
        for rule in builtin_rules() {
            for keyword in rule.keywords() {
                assert_eq!(keyword, &keyword.to_lowercase());
            }
        }
    }

    #[test]
    fn moisture_chart_severity_escalates() {
        let response = fixtures::moisture_risk_trend();
        let severities = &response.chart.unwrap().series[0].severities;
        assert_eq!(severities.first(), Some(&Severity::Normal));
        assert_eq!(severities.last(), Some(&Severity::Critical));
    }
}
