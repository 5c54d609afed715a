use chrono::{DateTime, Datelike, Duration, Local};

use crate::model::query::{DateFilter, Query};

/// Filter set for a query search. Empty/absent fields are skipped; the
/// remaining filters compose with logical AND.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Case-insensitive substring, matched against title, details or answer.
    pub search: Option<String>,
    /// Exact topic match (wire form, e.g. `technical`). A value outside the
    /// topic vocabulary matches nothing, same as the original portal.
    pub topic: Option<String>,
    /// Exact author match.
    pub employee_id: Option<String>,
    pub date: Option<DateFilter>,
}

/// Apply `filter` to `records` relative to the instant `now`.
///
/// Pure function over its inputs: `now` is passed in rather than read from
/// the clock so date windows are testable against fixtures. Results are
/// sorted newest first; the sort is stable, so equal dates keep their
/// insertion order.
pub fn search_queries(
    records: &[Query],
    filter: &SearchFilter,
    now: DateTime<Local>,
) -> Vec<Query> {
    let term = filter
        .search
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);

    let mut results: Vec<Query> = records
        .iter()
        .filter(|q| match &term {
            Some(t) => {
                q.title.to_lowercase().contains(t)
                    || q.details.to_lowercase().contains(t)
                    || q.answer.to_lowercase().contains(t)
            }
            None => true,
        })
        .filter(|q| match &filter.topic {
            Some(topic) => q.topic.to_string() == *topic,
            None => true,
        })
        .filter(|q| match &filter.employee_id {
            Some(employee_id) => q.employee_id == *employee_id,
            None => true,
        })
        .filter(|q| match filter.date {
            Some(window) => in_date_window(q, window, now),
            None => true,
        })
        .cloned()
        .collect();

    results.sort_by(|a, b| b.date.cmp(&a.date));
    results
}

/// Date windows use the local calendar; `week` is a rolling 7-day window
/// ending at `now` inclusive.
fn in_date_window(query: &Query, window: DateFilter, now: DateTime<Local>) -> bool {
    let date = query.date.with_timezone(&Local);

    match window {
        DateFilter::Today => date.date_naive() == now.date_naive(),
        DateFilter::Week => {
            let week_start = now - Duration::days(7);
            week_start <= date && date <= now
        }
        DateFilter::Month => date.year() == now.year() && date.month() == now.month(),
        DateFilter::Year => date.year() == now.year(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::query::Topic;
    use chrono::{TimeZone, Utc};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn query(id: u64, title: &str, details: &str, answer: &str, topic: Topic) -> Query {
        Query {
            id,
            title: title.to_string(),
            details: details.to_string(),
            answer: answer.to_string(),
            topic,
            employee_id: format!("E{:04}", id),
            date: Utc::now(),
        }
    }

    fn fixture() -> Vec<Query> {
        let mut q1 = query(
            1,
            "500 internal server error",
            "Getting 500 error when saving a large document",
            "The CMS has a 10MB limit on uploads",
            Topic::Technical,
        );
        q1.employee_id = "E2301".to_string();
        q1.date = at(2024, 4, 25, 10, 0);

        let mut q2 = query(
            2,
            "How to update profile picture?",
            "I can't find where to change my profile picture",
            "Go to My Account > Settings > Profile Information",
            Topic::Account,
        );
        q2.employee_id = "E1856".to_string();
        q2.date = at(2024, 4, 28, 14, 15);

        let mut q3 = query(
            3,
            "Monitor flickering",
            "My laptop screen flickers when docked",
            "Update the dock firmware",
            Topic::Hardware,
        );
        q3.employee_id = "E1406".to_string();
        q3.date = at(2024, 5, 1, 9, 0);

        vec![q1, q2, q3]
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let results = search_queries(&[], &SearchFilter::default(), now());
        assert!(results.is_empty());
    }

    #[test]
    fn default_filters_return_everything_newest_first() {
        let results = search_queries(&fixture(), &SearchFilter::default(), now());
        let ids: Vec<u64> = results.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn empty_search_term_is_a_no_op() {
        let filter = SearchFilter {
            search: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(search_queries(&fixture(), &filter, now()).len(), 3);
    }

    #[test]
    fn search_term_matches_details_case_insensitively() {
        // "laptop" appears only in q3's details, and only lowercase there.
        let filter = SearchFilter {
            search: Some("LAPTOP".to_string()),
            ..Default::default()
        };
        let results = search_queries(&fixture(), &filter, now());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 3);
    }

    #[test]
    fn search_term_matches_answer_too() {
        let filter = SearchFilter {
            search: Some("10mb limit".to_string()),
            ..Default::default()
        };
        let results = search_queries(&fixture(), &filter, now());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn topic_filter_is_exact() {
        let filter = SearchFilter {
            topic: Some("account".to_string()),
            ..Default::default()
        };
        let results = search_queries(&fixture(), &filter, now());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 2);
    }

    #[test]
    fn unknown_topic_matches_nothing() {
        let filter = SearchFilter {
            topic: Some("gardening".to_string()),
            ..Default::default()
        };
        assert!(search_queries(&fixture(), &filter, now()).is_empty());
    }

    #[test]
    fn employee_filter_is_exact() {
        let filter = SearchFilter {
            employee_id: Some("E1856".to_string()),
            ..Default::default()
        };
        let results = search_queries(&fixture(), &filter, now());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 2);
    }

    #[test]
    fn week_window_is_rolling_seven_days() {
        // now = 2024-05-02 12:00; the window starts 2024-04-25 12:00, so the
        // 04-25 10:00 record falls out while 04-28 and 05-01 stay in.
        let filter = SearchFilter {
            date: Some(DateFilter::Week),
            ..Default::default()
        };
        let ids: Vec<u64> = search_queries(&fixture(), &filter, now())
            .iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn today_window_matches_calendar_day() {
        let mut records = fixture();
        records[0].date = at(2024, 5, 2, 0, 30);

        let filter = SearchFilter {
            date: Some(DateFilter::Today),
            ..Default::default()
        };
        let results = search_queries(&records, &filter, now());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn month_window_matches_calendar_month() {
        let filter = SearchFilter {
            date: Some(DateFilter::Month),
            ..Default::default()
        };
        let ids: Vec<u64> = search_queries(&fixture(), &filter, now())
            .iter()
            .map(|q| q.id)
            .collect();
        // Only q3 is dated in May.
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn year_window_matches_calendar_year() {
        let mut records = fixture();
        records[1].date = at(2023, 12, 31, 23, 0);

        let filter = SearchFilter {
            date: Some(DateFilter::Year),
            ..Default::default()
        };
        let ids: Vec<u64> = search_queries(&records, &filter, now())
            .iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn filters_compose_with_and() {
        let filter = SearchFilter {
            search: Some("error".to_string()),
            topic: Some("technical".to_string()),
            employee_id: Some("E2301".to_string()),
            date: Some(DateFilter::Year),
        };
        let results = search_queries(&fixture(), &filter, now());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);

        // Same filters with one mismatched leg yields nothing.
        let filter = SearchFilter {
            employee_id: Some("E1856".to_string()),
            ..filter
        };
        assert!(search_queries(&fixture(), &filter, now()).is_empty());
    }

    #[test]
    fn equal_dates_keep_insertion_order() {
        let mut records = fixture();
        let same = at(2024, 5, 1, 9, 0);
        for q in &mut records {
            q.date = same;
        }

        let ids: Vec<u64> = search_queries(&records, &SearchFilter::default(), now())
            .iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
