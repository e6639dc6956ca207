//! Chart reducers over the filtered incident slice.
//!
//! Every reducer is recomputed from scratch on each call and is total:
//! empty input yields zero counts and zero statistics.

use std::collections::{BTreeMap, HashMap};

use cad_dashboard_analytics_models::{
    CategoryCount, Charts, DayCount, DistrictResponseTime, HourCount, SummaryStats, TimeSeriesPoint,
};
use cad_dashboard_incident_models::{DayOfWeek, EnrichedIncident, HIGH_PRIORITY, UNKNOWN_CATEGORY};
use chrono::NaiveDate;

use crate::stats::{average, median};

/// Maximum number of call types on the top call types chart.
pub const TOP_CALL_TYPES: usize = 10;

/// Maximum number of districts on the response time chart.
pub const TOP_DISTRICTS: usize = 10;

/// Number of most recent dates kept on the daily trend.
pub const TREND_DAYS: usize = 30;

/// Priority codes shown first, in this order.
const PRIORITY_ORDER: [&str; 3] = ["A", "B", "C"];

/// Counts records per key in first-encountered order. Missing and empty
/// keys share the [`UNKNOWN_CATEGORY`] bucket.
fn count_by<'a, F>(records: &[&'a EnrichedIncident], key: F) -> Vec<CategoryCount>
where
    F: Fn(&'a EnrichedIncident) -> Option<&'a str>,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<CategoryCount> = Vec::new();

    for &record in records {
        let name = key(record)
            .filter(|value| !value.is_empty())
            .unwrap_or(UNKNOWN_CATEGORY);
        if let Some(&index) = positions.get(name) {
            buckets[index].count += 1;
        } else {
            positions.insert(name, buckets.len());
            buckets.push(CategoryCount {
                name: name.to_string(),
                count: 1,
            });
        }
    }

    buckets
}

/// The most frequent call types, highest count first.
///
/// Equal counts keep the order in which the call types first appear.
#[must_use]
pub fn top_call_types(records: &[&EnrichedIncident]) -> Vec<CategoryCount> {
    let mut counts = count_by(records, |r| r.incident.call_type_final_desc.as_deref());
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_CALL_TYPES);
    counts
}

/// Counts per priority code: A, B and C first, then everything else in
/// first-encountered order.
#[must_use]
pub fn priority_distribution(records: &[&EnrichedIncident]) -> Vec<CategoryCount> {
    let mut counts = count_by(records, |r| r.incident.priority_final.as_deref());
    counts.sort_by_key(|bucket| {
        PRIORITY_ORDER
            .iter()
            .position(|code| *code == bucket.name)
            .unwrap_or(PRIORITY_ORDER.len())
    });
    counts
}

/// Records per hour of day. Always 24 buckets, hour 0 first.
#[must_use]
pub fn hourly_histogram(records: &[&EnrichedIncident]) -> Vec<HourCount> {
    let mut counts = [0_u64; 24];
    for hour in records.iter().filter_map(|r| r.hour_of_day) {
        if let Some(slot) = counts.get_mut(hour as usize) {
            *slot += 1;
        }
    }
    (0_u32..)
        .zip(counts)
        .map(|(hour, count)| HourCount { hour, count })
        .collect()
}

/// Records per day of week. Always 7 buckets, Sunday first.
#[must_use]
pub fn day_of_week_histogram(records: &[&EnrichedIncident]) -> Vec<DayCount> {
    let mut counts = [0_u64; 7];
    for day in records.iter().filter_map(|r| r.day_of_week) {
        counts[day.index()] += 1;
    }
    DayOfWeek::ALL
        .into_iter()
        .zip(counts)
        .map(|(day, count)| DayCount { day, count })
        .collect()
}

/// Average and median response time per police district, slowest first.
///
/// Only records with a non-empty district and a non-negative response time
/// count.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn district_response_times(records: &[&EnrichedIncident]) -> Vec<DistrictResponseTime> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<f64>)> = Vec::new();

    for record in records {
        let (Some(district), Some(minutes)) = (
            record
                .incident
                .police_district
                .as_deref()
                .filter(|district| !district.is_empty()),
            record.valid_response_time(),
        ) else {
            continue;
        };
        if let Some(&index) = positions.get(district) {
            groups[index].1.push(minutes as f64);
        } else {
            positions.insert(district, groups.len());
            groups.push((district, vec![minutes as f64]));
        }
    }

    let mut districts: Vec<DistrictResponseTime> = groups
        .into_iter()
        .map(|(district, minutes)| DistrictResponseTime {
            district: district.to_string(),
            average: average(&minutes),
            median: median(&minutes),
        })
        .collect();
    districts.sort_by(|a, b| b.average.total_cmp(&a.average));
    districts.truncate(TOP_DISTRICTS);
    districts
}

/// Records per received date, oldest first, limited to the most recent
/// [`TREND_DAYS`] dates that have any records.
#[must_use]
pub fn daily_trend(records: &[&EnrichedIncident]) -> Vec<TimeSeriesPoint> {
    let mut by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for date in records.iter().filter_map(|r| r.date) {
        *by_date.entry(date).or_default() += 1;
    }
    let skip = by_date.len().saturating_sub(TREND_DAYS);
    by_date
        .into_iter()
        .skip(skip)
        .map(|(date, count)| TimeSeriesPoint { date, count })
        .collect()
}

/// Headline totals and response time statistics.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summary(records: &[&EnrichedIncident]) -> SummaryStats {
    let response_times: Vec<f64> = records
        .iter()
        .filter_map(|r| r.valid_response_time())
        .map(|minutes| minutes as f64)
        .collect();
    let high_priority = records
        .iter()
        .filter(|r| r.incident.priority_final.as_deref() == Some(HIGH_PRIORITY))
        .count();

    SummaryStats {
        total: records.len() as u64,
        high_priority: high_priority as u64,
        average_response_minutes: average(&response_times),
        median_response_minutes: median(&response_times),
    }
}

/// Computes every chart for `records`.
#[must_use]
pub fn charts(records: &[&EnrichedIncident]) -> Charts {
    log::debug!("Computing charts for {} incidents", records.len());

    Charts {
        top_call_types: top_call_types(records),
        priorities: priority_distribution(records),
        hourly: hourly_histogram(records),
        weekly: day_of_week_histogram(records),
        district_response_times: district_response_times(records),
        daily_trend: daily_trend(records),
        summary: summary(records),
    }
}

#[cfg(test)]
mod tests {
    use cad_dashboard_incident::enrich;
    use cad_dashboard_incident_models::RawIncident;

    use super::*;

    fn call(call_type: &str) -> EnrichedIncident {
        enrich(RawIncident {
            call_type_final_desc: Some(call_type.to_string()),
            ..RawIncident::default()
        })
    }

    fn priority(code: Option<&str>) -> EnrichedIncident {
        enrich(RawIncident {
            received_datetime: Some("2025-05-03T10:15:00.000".to_string()),
            priority_final: code.map(str::to_string),
            ..RawIncident::default()
        })
    }

    fn response(district: Option<&str>, on_scene: Option<&str>) -> EnrichedIncident {
        enrich(RawIncident {
            received_datetime: Some("2025-05-03T10:00:00.000".to_string()),
            onscene_datetime: on_scene.map(str::to_string),
            police_district: district.map(str::to_string),
            ..RawIncident::default()
        })
    }

    fn received(at: &str) -> EnrichedIncident {
        enrich(RawIncident {
            received_datetime: Some(at.to_string()),
            ..RawIncident::default()
        })
    }

    fn names(counts: &[CategoryCount]) -> Vec<(&str, u64)> {
        counts.iter().map(|c| (c.name.as_str(), c.count)).collect()
    }

    #[test]
    fn empty_input_yields_empty_charts() {
        let charts = charts(&[]);
        assert!(charts.top_call_types.is_empty());
        assert!(charts.priorities.is_empty());
        assert_eq!(charts.hourly.len(), 24);
        assert!(charts.hourly.iter().all(|h| h.count == 0));
        assert_eq!(charts.weekly.len(), 7);
        assert!(charts.district_response_times.is_empty());
        assert!(charts.daily_trend.is_empty());
        assert_eq!(charts.summary.total, 0);
        assert!(charts.summary.average_response_minutes.abs() < f64::EPSILON);
    }

    #[test]
    fn top_call_types_sorted_descending_with_stable_ties() {
        let records = [
            call("TRAFFIC STOP"),
            call("ALARM"),
            call("ALARM"),
            call("WELL BEING CHECK"),
            call("TRAFFIC STOP"),
            call("NOISE"),
        ];
        let refs: Vec<&EnrichedIncident> = records.iter().collect();
        assert_eq!(
            names(&top_call_types(&refs)),
            vec![
                ("TRAFFIC STOP", 2),
                ("ALARM", 2),
                ("WELL BEING CHECK", 1),
                ("NOISE", 1),
            ]
        );
    }

    #[test]
    fn top_call_types_keeps_ten_and_buckets_missing_as_unknown() {
        let mut records: Vec<EnrichedIncident> =
            (0..12).map(|i| call(&format!("TYPE {i:02}"))).collect();
        records.push(enrich(RawIncident::default()));
        records.push(enrich(RawIncident::default()));
        let refs: Vec<&EnrichedIncident> = records.iter().collect();

        let top = top_call_types(&refs);
        assert_eq!(top.len(), TOP_CALL_TYPES);
        assert_eq!(top[0].name, UNKNOWN_CATEGORY);
        assert_eq!(top[0].count, 2);
        assert!(top.windows(2).all(|pair| pair[0].count >= pair[1].count));
    }

    #[test]
    fn empty_text_is_grouped_as_unknown() {
        let records = [
            enrich(RawIncident {
                call_type_final_desc: Some(String::new()),
                priority_final: Some(String::new()),
                ..RawIncident::default()
            }),
            enrich(RawIncident::default()),
        ];
        let refs: Vec<&EnrichedIncident> = records.iter().collect();
        assert_eq!(names(&top_call_types(&refs)), vec![("Unknown", 2)]);
        assert_eq!(names(&priority_distribution(&refs)), vec![("Unknown", 2)]);
    }

    #[test]
    fn empty_district_is_excluded_from_response_times() {
        let records = [
            response(Some(""), Some("2025-05-03T10:10:00.000")),
            response(Some("BAYVIEW"), Some("2025-05-03T10:05:00.000")),
        ];
        let refs: Vec<&EnrichedIncident> = records.iter().collect();
        let districts = district_response_times(&refs);
        assert_eq!(districts.len(), 1);
        assert_eq!(districts[0].district, "BAYVIEW");
    }

    #[test]
    fn priorities_order_known_codes_first() {
        let records = [
            priority(Some("E")),
            priority(None),
            priority(Some("C")),
            priority(Some("A")),
            priority(Some("B")),
            priority(Some("A")),
        ];
        let refs: Vec<&EnrichedIncident> = records.iter().collect();
        assert_eq!(
            names(&priority_distribution(&refs)),
            vec![("A", 2), ("B", 1), ("C", 1), ("E", 1), ("Unknown", 1)]
        );
    }

    #[test]
    fn hourly_histogram_counts_received_hour() {
        let records = [
            received("2025-05-03T00:05:00"),
            received("2025-05-03T23:59:59"),
            received("2025-05-04T23:00:00"),
            enrich(RawIncident::default()),
        ];
        let refs: Vec<&EnrichedIncident> = records.iter().collect();
        let hourly = hourly_histogram(&refs);
        assert_eq!(hourly.len(), 24);
        assert_eq!(hourly[0].count, 1);
        assert_eq!(hourly[23].count, 2);
        assert_eq!(hourly.iter().map(|h| h.count).sum::<u64>(), 3);
        assert!(hourly.iter().zip(0..).all(|(h, hour)| h.hour == hour));
    }

    #[test]
    fn day_of_week_histogram_starts_on_sunday() {
        // 2025-05-03 is a Saturday, 2025-05-04 a Sunday.
        let records = [
            received("2025-05-03T12:00:00"),
            received("2025-05-04T12:00:00"),
            received("2025-05-04T13:00:00"),
        ];
        let refs: Vec<&EnrichedIncident> = records.iter().collect();
        let weekly = day_of_week_histogram(&refs);
        assert_eq!(weekly.len(), 7);
        assert_eq!(weekly[0].day, DayOfWeek::Sunday);
        assert_eq!(weekly[0].count, 2);
        assert_eq!(weekly[6].day, DayOfWeek::Saturday);
        assert_eq!(weekly[6].count, 1);
    }

    #[test]
    fn district_response_times_skip_negative_and_missing() {
        let records = [
            response(Some("MISSION"), Some("2025-05-03T10:10:00.000")),
            response(Some("MISSION"), Some("2025-05-03T09:55:00.000")),
            response(Some("MISSION"), Some("2025-05-03T10:20:00.000")),
            response(Some("MISSION"), None),
            response(None, Some("2025-05-03T11:00:00.000")),
            response(Some("PARK"), Some("2025-05-03T10:30:00.000")),
        ];
        let refs: Vec<&EnrichedIncident> = records.iter().collect();
        let districts = district_response_times(&refs);

        assert_eq!(districts.len(), 2);
        assert_eq!(districts[0].district, "PARK");
        assert!((districts[0].average - 30.0).abs() < f64::EPSILON);
        assert_eq!(districts[1].district, "MISSION");
        assert!((districts[1].average - 15.0).abs() < f64::EPSILON);
        assert!((districts[1].median - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn district_response_times_keep_top_ten() {
        let records: Vec<EnrichedIncident> = (0..12)
            .map(|i| {
                response(
                    Some(&format!("DISTRICT {i}")),
                    Some(&format!("2025-05-03T10:{i:02}:00.000")),
                )
            })
            .collect();
        let refs: Vec<&EnrichedIncident> = records.iter().collect();
        let districts = district_response_times(&refs);
        assert_eq!(districts.len(), TOP_DISTRICTS);
        assert_eq!(districts[0].district, "DISTRICT 11");
        assert!(districts.windows(2).all(|p| p[0].average >= p[1].average));
    }

    #[test]
    fn daily_trend_keeps_latest_thirty_dates_ascending() {
        let april = (1..=4).map(|day| received(&format!("2025-04-{day:02}T08:00:00")));
        let records: Vec<EnrichedIncident> = (1..=31)
            .map(|day| received(&format!("2025-03-{day:02}T08:00:00")))
            .chain(april)
            .collect();
        let refs: Vec<&EnrichedIncident> = records.iter().collect();
        let trend = daily_trend(&refs);

        assert_eq!(trend.len(), TREND_DAYS);
        assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2025, 3, 6).unwrap());
        assert_eq!(
            trend.last().unwrap().date,
            NaiveDate::from_ymd_opt(2025, 4, 4).unwrap()
        );
        assert!(trend.windows(2).all(|p| p[0].date < p[1].date));
    }

    #[test]
    fn summary_uses_only_usable_response_times() {
        let records = [
            response(None, Some("2025-05-03T10:10:00.000")),
            response(None, Some("2025-05-03T09:55:00.000")),
            response(None, Some("2025-05-03T10:20:00.000")),
            response(None, None),
        ];
        let refs: Vec<&EnrichedIncident> = records.iter().collect();
        let stats = summary(&refs);
        assert_eq!(stats.total, 4);
        assert!((stats.average_response_minutes - 15.0).abs() < f64::EPSILON);
        assert!((stats.median_response_minutes - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn same_day_priorities_without_location() {
        let records = [
            priority(Some("A")),
            priority(Some("B")),
            priority(Some("A")),
        ];
        let refs: Vec<&EnrichedIncident> = records.iter().collect();
        let charts = charts(&refs);

        assert_eq!(names(&charts.priorities), vec![("A", 2), ("B", 1)]);
        assert_eq!(charts.summary.high_priority, 2);
        assert_eq!(charts.daily_trend.len(), 1);
        assert_eq!(charts.daily_trend[0].count, 3);
        assert_eq!(charts.hourly[10].count, 3);
    }
}
