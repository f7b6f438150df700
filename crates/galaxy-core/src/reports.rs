use galaxy_schema::{Report, ReportSource};

#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    /// Case-insensitive substring of the title.
    pub search: String,
    /// Exact tag, compared ignoring ASCII case.
    pub tag: Option<String>,
    pub creator: Option<ReportSource>,
}

impl ReportFilter {
    pub fn matches(&self, report: &Report) -> bool {
        report
            .title
            .to_lowercase()
            .contains(&self.search.to_lowercase())
            && self.tag.as_deref().map_or(true, |tag| {
                report.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
            })
            && self.creator.map_or(true, |c| report.source == c)
    }
}

pub fn filter_reports<'a>(reports: &'a [Report], filter: &ReportFilter) -> Vec<&'a Report> {
    reports.iter().filter(|r| filter.matches(r)).collect()
}

fn report(
    id: u32,
    title: &str,
    author: &str,
    time_ago: &str,
    file_name: &str,
    tags: &[&str],
    source: ReportSource,
) -> Report {
    Report {
        id,
        title: title.to_string(),
        author: author.to_string(),
        time_ago: time_ago.to_string(),
        file_name: file_name.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        source,
    }
}

pub fn sample_reports() -> Vec<Report> {
    vec![
        report(
            1,
            "DON Test Analysis - March 2025",
            "John Smith",
            "2 days ago",
            "Test_001.xlsx",
            &["DON", "Corn", "Monthly"],
            ReportSource::Manual,
        ),
        report(
            2,
            "Batch B-005 Compliance Report",
            "Galaxy AI",
            "1 week ago",
            "LIMS_Sync_B005",
            &["Compliance", "B-005"],
            ReportSource::Ai,
        ),
        report(
            3,
            "Aflatoxin Trend Analysis Q1 2025",
            "Sarah Lee",
            "2 weeks ago",
            "Test_001.xlsx +1",
            &["Aflatoxin", "Trend", "Quarterly"],
            ReportSource::Manual,
        ),
        report(
            4,
            "Supplier Risk Assessment",
            "Galaxy AI",
            "1 month ago",
            "Supplier_Data_2025.xlsx",
            &["Risk", "Supplier", "Automated"],
            ReportSource::Ai,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(filter: &ReportFilter) -> Vec<u32> {
        let reports = sample_reports();
        filter_reports(&reports, filter).iter().map(|r| r.id).collect()
    }

    #[test]
    fn search_matches_titles_only() {
        assert_eq!(
            ids(&ReportFilter {
                search: "ANALYSIS".into(),
                ..ReportFilter::default()
            }),
            vec![1, 3]
        );
        // "Galaxy AI" is an author, not part of any title.
        assert!(ids(&ReportFilter {
            search: "galaxy".into(),
            ..ReportFilter::default()
        })
        .is_empty());
    }

    #[test]
    fn tag_must_match_a_whole_tag() {
        assert_eq!(
            ids(&ReportFilter {
                tag: Some("compliance".into()),
                ..ReportFilter::default()
            }),
            vec![2]
        );
        assert!(ids(&ReportFilter {
            tag: Some("Comp".into()),
            ..ReportFilter::default()
        })
        .is_empty());
    }

    #[test]
    fn creator_splits_ai_from_manual() {
        assert_eq!(
            ids(&ReportFilter {
                creator: Some(ReportSource::Ai),
                ..ReportFilter::default()
            }),
            vec![2, 4]
        );
        assert_eq!(
            ids(&ReportFilter {
                search: "analysis".into(),
                creator: Some(ReportSource::Manual),
                ..ReportFilter::default()
            }),
            vec![1, 3]
        );
    }
}
