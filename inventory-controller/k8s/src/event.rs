use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::Event;
use kube::api::{Api, ListParams};
use serde_json::Value;

use super::client::Inventory;

// === impl Inventory ===

impl Inventory {
    /// Lists cluster-wide events, annotating each with a human-readable
    /// age interval and the `Kind/name` of the object it concerns.
    pub(crate) async fn list_cluster_events(&self) -> Result<Vec<Value>> {
        let events = Api::<Event>::all(self.client.clone())
            .list(&ListParams::default())
            .await?;

        let now = Utc::now();
        events.items.iter().map(|event| wrap(event, now)).collect()
    }
}

fn wrap(event: &Event, now: DateTime<Utc>) -> Result<Value> {
    let mut value = serde_json::to_value(event)?;
    let obj = value
        .as_object_mut()
        .ok_or_else(|| anyhow!("event did not serialize to an object"))?;
    obj.insert("interval".to_string(), Value::String(interval(event, now)));
    obj.insert("object".to_string(), Value::String(object_ref(event)));
    Ok(value)
}

/// `Kind/name` of the involved object, e.g. `Pod/web-7d4b9`.
fn object_ref(event: &Event) -> String {
    let kind = event.involved_object.kind.as_deref().unwrap_or_default();
    let name = event.involved_object.name.as_deref().unwrap_or_default();
    format!("{kind}/{name}")
}

/// Renders the event's age the way `kubectl get events` does: a single
/// timestamp for one-shot events, and a `last (xN over first)` form for
/// repeated ones.
fn interval(event: &Event, now: DateTime<Utc>) -> String {
    let first_seen = event
        .event_time
        .as_ref()
        .map(|t| since(t.0, now))
        .or_else(|| event.first_timestamp.as_ref().map(|t| since(t.0, now)));

    if let Some(series) = &event.series {
        let last = series
            .last_observed_time
            .as_ref()
            .map(|t| since(t.0, now))
            .unwrap_or_else(|| "<unknown>".to_string());
        let count = series.count.unwrap_or(0);
        let first = first_seen.unwrap_or_else(|| "<unknown>".to_string());
        return format!("{last} (x{count} over {first})");
    }

    if event.count.unwrap_or(0) > 1 {
        let last = event
            .last_timestamp
            .as_ref()
            .map(|t| since(t.0, now))
            .unwrap_or_else(|| "<unknown>".to_string());
        let count = event.count.unwrap_or(0);
        let first = first_seen.clone().unwrap_or_else(|| "<unknown>".to_string());
        return format!("{last} (x{count} over {first})");
    }

    first_seen.unwrap_or_else(|| "<unknown>".to_string())
}

fn since(t: DateTime<Utc>, now: DateTime<Utc>) -> String {
    human_duration(now - t)
}

fn human_duration(d: chrono::Duration) -> String {
    let secs = d.num_seconds();
    if secs < 0 {
        return "0s".to_string();
    }
    if secs < 120 {
        return format!("{secs}s");
    }
    let mins = d.num_minutes();
    if mins < 120 {
        return format!("{mins}m");
    }
    let hours = d.num_hours();
    if hours < 48 {
        return format!("{hours}h");
    }
    format!("{}d", d.num_days())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use k8s_openapi::api::core::v1::EventSeries;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::{MicroTime, Time};

    fn at(secs_ago: i64, now: DateTime<Utc>) -> DateTime<Utc> {
        now - chrono::Duration::seconds(secs_ago)
    }

    #[test]
    fn human_duration_buckets() {
        let d = chrono::Duration::seconds;
        assert_eq!(human_duration(d(-5)), "0s");
        assert_eq!(human_duration(d(0)), "0s");
        assert_eq!(human_duration(d(119)), "119s");
        assert_eq!(human_duration(d(120)), "2m");
        assert_eq!(human_duration(d(119 * 60)), "119m");
        assert_eq!(human_duration(d(120 * 60)), "2h");
        assert_eq!(human_duration(d(47 * 3600)), "47h");
        assert_eq!(human_duration(d(48 * 3600)), "2d");
    }

    #[test]
    fn one_shot_event_uses_first_seen() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().unwrap();
        let event = Event {
            first_timestamp: Some(Time(at(30, now))),
            ..Event::default()
        };
        assert_eq!(interval(&event, now), "30s");
    }

    #[test]
    fn repeated_event_renders_count_over_window() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().unwrap();
        let event = Event {
            count: Some(4),
            first_timestamp: Some(Time(at(600, now))),
            last_timestamp: Some(Time(at(5, now))),
            ..Event::default()
        };
        assert_eq!(interval(&event, now), "5s (x4 over 10m)");
    }

    #[test]
    fn series_takes_precedence_over_count() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().unwrap();
        let event = Event {
            count: Some(2),
            event_time: Some(MicroTime(at(3600 * 3, now))),
            last_timestamp: Some(Time(at(99, now))),
            series: Some(EventSeries {
                count: Some(12),
                last_observed_time: Some(MicroTime(at(10, now))),
            }),
            ..Event::default()
        };
        assert_eq!(interval(&event, now), "10s (x12 over 3h)");
    }

    #[test]
    fn missing_timestamps_render_unknown() {
        let now = Utc::now();
        assert_eq!(interval(&Event::default(), now), "<unknown>");
    }

    #[test]
    fn wrap_annotates_interval_and_object() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().unwrap();
        let mut event = Event {
            first_timestamp: Some(Time(at(45, now))),
            ..Event::default()
        };
        event.involved_object.kind = Some("Pod".to_string());
        event.involved_object.name = Some("web-0".to_string());

        let value = wrap(&event, now).unwrap();
        assert_eq!(value["interval"], "45s");
        assert_eq!(value["object"], "Pod/web-0");
    }
}
