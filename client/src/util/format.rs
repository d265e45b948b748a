//! Ranking and display formatting for songs and suggestions.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use crate::net::types::{Song, Suggestion, SuggestionStatus};

/// Number of songs highlighted at the top of the ranking.
pub const TOP_SONGS: usize = 5;

/// Order songs by view count, most viewed first. Ties keep backend order.
pub fn rank_songs(songs: &mut [Song]) {
    songs.sort_by(|a, b| b.view_count.cmp(&a.view_count));
}

/// Split a ranked list into the highlighted head and the remainder.
pub fn split_ranking(songs: &[Song], top: usize) -> (&[Song], &[Song]) {
    songs.split_at(top.min(songs.len()))
}

/// Pending suggestions first; relative order is otherwise preserved.
pub fn sort_pending_first(suggestions: &mut [Suggestion]) {
    suggestions.sort_by_key(|s| !s.is_pending());
}

/// Human view count: `1.3M visualizações`, `12.5K visualizações`, `999 visualizações`.
///
/// One decimal, rounded half up.
pub fn format_view_count(views: u64) -> String {
    let scaled = |unit: u64| {
        let tenths = (u128::from(views) * 10 + u128::from(unit) / 2) / u128::from(unit);
        format!("{}.{}", tenths / 10, tenths % 10)
    };
    if views >= 1_000_000 {
        format!("{}M visualizações", scaled(1_000_000))
    } else if views >= 1_000 {
        format!("{}K visualizações", scaled(1_000))
    } else {
        format!("{views} visualizações")
    }
}

/// 1-based ranking position label.
pub fn rank_label(index: usize) -> String {
    format!("#{}", index + 1)
}

/// Portuguese label for a moderation status.
pub fn status_label(status: SuggestionStatus) -> &'static str {
    match status {
        SuggestionStatus::Pending => "Pendente",
        SuggestionStatus::Approved => "Aprovada",
        SuggestionStatus::Rejected => "Rejeitada",
        SuggestionStatus::Other => "Desconhecido",
    }
}

/// Suggestion timestamp as `dd/mm/yyyy, hh:mm`.
///
/// Accepts `YYYY-MM-DD` optionally followed by `THH:MM` (or a space) and any
/// seconds/offset suffix, which is ignored. The wall-clock time is shown as
/// sent, without timezone conversion.
pub fn format_created_at(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return "Data indisponível".to_owned();
    };
    match parse_timestamp(raw) {
        Some(ts) => format!(
            "{:02}/{:02}/{:04}, {:02}:{:02}",
            ts.day, ts.month, ts.year, ts.hour, ts.minute
        ),
        None => "Data inválida".to_owned(),
    }
}

struct Timestamp {
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
}

fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let (date, time) = match raw.split_once(['T', ' ']) {
        Some((date, time)) => (date, Some(time)),
        None => (raw, None),
    };

    let mut parts = date.splitn(3, '-');
    let year = parts.next().filter(|y| y.len() == 4)?.parse::<u32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok().filter(|m| (1..=12).contains(m))?;
    let day = parts.next()?.parse::<u32>().ok().filter(|d| (1..=31).contains(d))?;

    let (hour, minute) = match time {
        Some(time) => {
            let mut hm = time.splitn(3, ':');
            let hour = hm.next()?.parse::<u32>().ok().filter(|h| *h < 24)?;
            let minute = hm.next()?.get(..2)?.parse::<u32>().ok().filter(|m| *m < 60)?;
            (hour, minute)
        }
        None => (0, 0),
    };

    Some(Timestamp { year, month, day, hour, minute })
}
