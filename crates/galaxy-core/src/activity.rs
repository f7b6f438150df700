//! Activity log listing with search, category filter and fixed-size pages.

use galaxy_schema::{Activity, ActivityCategory};
use serde::Serialize;

pub const ITEMS_PER_PAGE: usize = 6;

#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
    /// Case-insensitive substring of the action name or description.
    pub search: String,
    pub category: Option<ActivityCategory>,
}

impl ActivityFilter {
    pub fn matches(&self, activity: &Activity) -> bool {
        let needle = self.search.to_lowercase();
        let hit = activity.action.to_lowercase().contains(&needle)
            || activity.description.to_lowercase().contains(&needle);
        hit && self.category.map_or(true, |c| activity.category == c)
    }
}

pub fn filter_activities<'a>(
    activities: &'a [Activity],
    filter: &ActivityFilter,
) -> Vec<&'a Activity> {
    activities.iter().filter(|a| filter.matches(a)).collect()
}

/// One page of a listing. `number` is 1-based; `total_pages` is zero for an
/// empty listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slices out page `number` (1-based). Pages outside `1..=total_pages` are
/// empty rather than an error. A `per_page` of zero is treated as one.
pub fn paginate<T: Clone>(items: &[T], number: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);
    let page_items = match number.checked_sub(1) {
        Some(idx) => items
            .iter()
            .skip(idx.saturating_mul(per_page))
            .take(per_page)
            .cloned()
            .collect(),
        None => Vec::new(),
    };
    Page {
        items: page_items,
        number,
        total_pages,
        total_items: items.len(),
    }
}

fn activity(
    id: u32,
    action: &str,
    description: &str,
    timestamp: &str,
    category: ActivityCategory,
) -> Activity {
    Activity {
        id,
        action: action.to_string(),
        description: description.to_string(),
        timestamp: timestamp.to_string(),
        category,
    }
}

pub fn sample_activities() -> Vec<Activity> {
    use ActivityCategory::*;

    vec![
        activity(
            1,
            "File Upload",
            "Uploaded lab results data for Batch 2024-B56",
            "2024-05-12 14:32:45",
            Data,
        ),
        activity(
            2,
            "AI Query",
            "Analyzed contamination trends in recent samples",
            "2024-05-12 13:15:10",
            Analysis,
        ),
        activity(
            3,
            "Report Generated",
            "Monthly compliance summary report",
            "2024-05-12 11:28:33",
            Report,
        ),
        activity(
            4,
            "Document Download",
            "Downloaded SOP for Sample Processing",
            "2024-05-11 16:42:15",
            Document,
        ),
        activity(
            5,
            "System Login",
            "User login from IP 192.168.1.45",
            "2024-05-11 09:03:22",
            Security,
        ),
        activity(
            6,
            "Data Export",
            "Exported analytical data to CSV",
            "2024-05-11 08:45:12",
            Data,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_covers_action_and_description() {
        let activities = sample_activities();
        let hits = |search: &str| {
            let filter = ActivityFilter {
                search: search.into(),
                ..ActivityFilter::default()
            };
            filter_activities(&activities, &filter)
                .iter()
                .map(|a| a.id)
                .collect::<Vec<_>>()
        };

        assert_eq!(hits("LOGIN"), vec![5]);
        assert_eq!(hits("csv"), vec![6]);
        assert_eq!(hits(""), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn category_filter_combines_with_search() {
        let activities = sample_activities();
        let filter = ActivityFilter {
            search: "data".into(),
            category: Some(ActivityCategory::Data),
        };
        let ids: Vec<_> = filter_activities(&activities, &filter)
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![1, 6]);

        let filter = ActivityFilter {
            search: "data".into(),
            category: Some(ActivityCategory::Security),
        };
        assert!(filter_activities(&activities, &filter).is_empty());
    }

    #[test]
    fn page_count_rounds_up() {
        let items: Vec<u32> = (1..=13).collect();
        let page = paginate(&items, 3, ITEMS_PER_PAGE);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 13);
        assert_eq!(page.items, vec![13]);

        let page = paginate(&items, 2, ITEMS_PER_PAGE);
        assert_eq!(page.items, vec![7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn sample_log_fits_on_one_page() {
        let activities = sample_activities();
        let page = paginate(&activities, 1, ITEMS_PER_PAGE);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.items.len(), 6);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items = vec!["a", "b"];
        assert!(paginate(&items, 0, 6).items.is_empty());
        assert!(paginate(&items, 2, 6).items.is_empty());
        assert_eq!(paginate::<u8>(&[], 1, 6).total_pages, 0);
        assert_eq!(paginate(&items, 2, 0).items, vec!["b"]);
    }
}
