use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UseCase {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub suggested_prompts: &'static [&'static str],
}

pub const USE_CASES: &[UseCase] = &[
    UseCase {
        id: "workflow",
        name: "Workflow Optimization",
        description: "Optimize laboratory workflows and processes",
        suggested_prompts: &[
            "Based on current dryer settings, is Batch 410 at risk of low moisture?",
            "Alert me if any batch shows a pattern that previously led to QC failures.",
            "What process conditions usually result in ash content above 0.6%?",
            "Correlate pH levels from lab tests with fermentation tank pressure over time.",
            "Why did Chickpea Line A have more QC failures yesterday?",
        ],
    },
    UseCase {
        id: "notebooks",
        name: "Digital Notebooks",
        description: "Manage and analyze lab notebook data",
        suggested_prompts: &[
            "Summarize Lisa D's ELN notes for May 12.",
            "Rewrite Lisa's note to clarify the issue for review.",
            "Extract key observations from ELNs for failed batches.",
            "What did technicians note during recent soy QC failures?",
            "List all comments linked to borderline pH results.",
        ],
    },
    UseCase {
        id: "vendor",
        name: "Vendor Management",
        description: "Track and analyze vendor performance",
        suggested_prompts: &[
            "Which vendors had the highest failure rates in Q1?",
            "Generate a scorecard for AgroHarvest's performance.",
            "List vendor-linked CAPAs from the last 90 days.",
            "Compare Vendor X and Y by failure rate and delivery timeliness.",
            "What's the complaint trend related to vendor-supplied materials?",
        ],
    },
    UseCase {
        id: "compliance",
        name: "Compliance & Audits",
        description: "Monitor compliance and handle audits",
        suggested_prompts: &[
            "Generate compliance summary for April",
            "Show recent audit findings",
            "List non-compliance incidents",
        ],
    },
    UseCase {
        id: "tracking",
        name: "Sample Tracking",
        description: "Track samples through the lab process",
        suggested_prompts: &[
            "Track Batch GPC-A1245 through QA process",
            "Show samples in stability testing",
            "List pending sample analyses",
        ],
    },
    UseCase {
        id: "inventory",
        name: "Inventory Management",
        description: "Monitor and manage lab inventory",
        suggested_prompts: &[
            "Which reagents are below reorder threshold?",
            "Show inventory status report",
            "List expired materials",
        ],
    },
];

pub fn find_use_case(id: &str) -> Option<&'static UseCase> {
    let id = id.trim();
    USE_CASES.iter().find(|uc| uc.id.eq_ignore_ascii_case(id))
}

/// Prompt by 1-based position, as listed to the user.
pub fn suggested_prompt(use_case_id: &str, number: usize) -> Option<&'static str> {
    let use_case = find_use_case(use_case_id)?;
    number
        .checked_sub(1)
        .and_then(|idx| use_case.suggested_prompts.get(idx))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::QueryResponder;
    use galaxy_schema::Intent;

    #[test]
    fn workflow_prompts_map_to_their_intents() {
        let responder = QueryResponder::new();
        let intents: Vec<_> = find_use_case("workflow")
            .unwrap()
            .suggested_prompts
            .iter()
            .map(|p| responder.classify(p))
            .collect();
        assert_eq!(
            intents,
            vec![
                Intent::MoistureRiskTrend,
                Intent::FailurePattern,
                Intent::AshContent,
                Intent::FermentationCorrelation,
                Intent::LineFailureDistribution,
            ]
        );
    }

    #[test]
    fn notebook_prompts_map_to_their_intents() {
        let responder = QueryResponder::new();
        let intents: Vec<_> = find_use_case("notebooks")
            .unwrap()
            .suggested_prompts
            .iter()
            .map(|p| responder.classify(p))
            .collect();
        assert_eq!(
            intents,
            vec![
                Intent::NotebookSummary,
                Intent::NoteRewrite,
                Intent::RootCause,
                Intent::SoyTrend,
                Intent::PhDistribution,
            ]
        );
    }

    #[test]
    fn inventory_prompts_are_unsupported() {
        let responder = QueryResponder::new();
        for prompt in find_use_case("inventory").unwrap().suggested_prompts {
            assert_eq!(responder.classify(prompt), Intent::Unsupported, "{prompt}");
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find_use_case(" Vendor ").unwrap().name, "Vendor Management");
        assert!(find_use_case("billing").is_none());
    }

    #[test]
    fn suggested_prompt_is_one_based() {
        assert_eq!(
            suggested_prompt("compliance", 2),
            Some("Show recent audit findings")
        );
        assert_eq!(suggested_prompt("compliance", 0), None);
        assert_eq!(suggested_prompt("compliance", 4), None);
    }
}
