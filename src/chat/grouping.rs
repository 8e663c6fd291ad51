//! Read-only date-bucket grouping for the conversation list display.

use chrono::{DateTime, Local, TimeZone};

use crate::models::Conversation;

/// Relative-date bucket derived from a conversation's `updated_at`.
///
/// Buckets compare local calendar days, not elapsed hours: a conversation
/// updated at 23:50 yesterday reads "Yesterday" this morning even though
/// less than 24 hours have passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateBucket {
    Today,
    Yesterday,
    DaysAgo(i64),
    /// Anything a week or more back shows the calendar date.
    Date(String),
}

impl DateBucket {
    pub fn label(&self) -> String {
        match self {
            DateBucket::Today => "Today".to_string(),
            DateBucket::Yesterday => "Yesterday".to_string(),
            DateBucket::DaysAgo(days) => format!("{} days ago", days),
            DateBucket::Date(date) => date.clone(),
        }
    }
}

/// Bucket for a millisecond timestamp relative to `now`.
///
/// Future or out-of-range timestamps bucket as Today.
pub fn date_bucket(updated_at_ms: i64, now: DateTime<Local>) -> DateBucket {
    let Some(then) = Local.timestamp_millis_opt(updated_at_ms).single() else {
        return DateBucket::Today;
    };

    let days = (now.date_naive() - then.date_naive()).num_days();
    match days {
        i64::MIN..=0 => DateBucket::Today,
        1 => DateBucket::Yesterday,
        2..=6 => DateBucket::DaysAgo(days),
        _ => DateBucket::Date(then.format("%-m/%-d/%Y").to_string()),
    }
}

/// Group conversations by date bucket. Groups appear in first-seen order and
/// each group preserves the source list's internal order; nothing is mutated.
pub fn group_conversations(
    conversations: &[Conversation],
    now: DateTime<Local>,
) -> Vec<(DateBucket, Vec<&Conversation>)> {
    let mut groups: Vec<(DateBucket, Vec<&Conversation>)> = Vec::new();
    for conv in conversations {
        let bucket = date_bucket(conv.updated_at, now);
        match groups.iter_mut().find(|(b, _)| *b == bucket) {
            Some((_, members)) => members.push(conv),
            None => groups.push((bucket, vec![conv])),
        }
    }
    groups
}
