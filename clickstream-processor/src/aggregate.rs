use std::collections::BTreeMap;

use crate::types::{AggregateRow, ClickEvent};

#[derive(Default)]
struct GroupAccumulator {
    click_count: u64,
    timestamp_sum: f64,
    timestamp_count: u64,
}

/// Group a batch of events by `(url, country)` and compute one row per group:
/// the count of events carrying a non-null `user_id`, and the mean of the
/// non-null timestamps as epoch seconds.
///
/// Null grouping keys bucket together into their own group. Output rows are
/// sorted by grouping key, so identical input always yields identical output.
pub fn aggregate_clicks(events: &[ClickEvent]) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<(Option<String>, Option<String>), GroupAccumulator> = BTreeMap::new();

    for event in events {
        let group = groups
            .entry((event.url.clone(), event.country.clone()))
            .or_default();

        if event.user_id.is_some() {
            group.click_count += 1;
        }
        if let Some(timestamp) = event.timestamp {
            // The mean is over raw epoch timestamps, not durations.
            group.timestamp_sum += timestamp.timestamp_micros() as f64 / 1_000_000.0;
            group.timestamp_count += 1;
        }
    }

    groups
        .into_iter()
        .map(|((url, country), group)| AggregateRow {
            url,
            country,
            click_count: group.click_count,
            avg_time_spent: (group.timestamp_count > 0)
                .then(|| group.timestamp_sum / group.timestamp_count as f64),
        })
        .collect()
}
