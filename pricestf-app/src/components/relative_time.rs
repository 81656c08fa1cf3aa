use chrono::{DateTime, Utc};
use leptos::prelude::*;
use leptos_use::{use_interval, UseIntervalReturn};
use timeago::Formatter;

/// Human label for how long ago `timestamp` was. Non-positive deltas
/// (clock skew, timestamps from the future) collapse to "just now".
pub(crate) fn relative_time_label(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match (now - timestamp).to_std() {
        Ok(elapsed) if elapsed.as_secs() >= 1 => Formatter::new().convert(elapsed),
        _ => "just now".to_string(),
    }
}

#[component]
pub fn RelativeToNow(timestamp: DateTime<Utc>) -> impl IntoView {
    // this could probably be moved to a global state so we just have one interval for every clock
    let UseIntervalReturn { counter, .. } = use_interval(1000u64);
    let label = Memo::new(move |_| {
        counter.track();
        relative_time_label(timestamp, Utc::now())
    });
    view! { <span>{label}</span> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn collapses_to_just_now() {
        let now = Utc::now();
        assert_eq!(relative_time_label(now, now), "just now");
        assert_eq!(relative_time_label(now + Duration::seconds(30), now), "just now");
        assert_eq!(
            relative_time_label(now - Duration::milliseconds(400), now),
            "just now"
        );
    }

    #[test]
    fn formats_past_timestamps() {
        let now = Utc::now();
        assert_eq!(
            relative_time_label(now - Duration::seconds(200), now),
            "3 minutes ago"
        );
        assert_eq!(
            relative_time_label(now - Duration::seconds(30), now),
            "30 seconds ago"
        );
    }
}
