use crate::entities::reading::Reading;
use crate::entities::trends::{BloodPressurePoint, ReadingTrends, TrendPoint};

/// Build chart series from readings given newest first.
///
/// Glucose, SpO2 and temperature come from the newest `window` readings,
/// dropping absent values. Blood pressure takes the newest `window` readings
/// that carry both halves, however far back they are. Every series comes out
/// oldest first.
pub fn build_trends(newest_first: &[Reading], window: usize) -> ReadingTrends {
    let mut trends = ReadingTrends::default();

    for reading in newest_first.iter().take(window).rev() {
        let vitals = &reading.vitals;
        push_point(&mut trends.glucose, reading, vitals.glucose_mg_dl);
        push_point(&mut trends.spo2, reading, vitals.spo2);
        push_point(&mut trends.temperature, reading, vitals.temp_c);
    }

    trends.blood_pressure = newest_first
        .iter()
        .filter_map(|reading| {
            reading
                .vitals
                .blood_pressure()
                .map(|(systolic, diastolic)| BloodPressurePoint {
                    timestamp: reading.timestamp,
                    systolic,
                    diastolic,
                })
        })
        .take(window)
        .collect();
    trends.blood_pressure.reverse();

    trends
}

fn push_point(series: &mut Vec<TrendPoint>, reading: &Reading, value: Option<f64>) {
    if let Some(value) = value {
        series.push(TrendPoint {
            timestamp: reading.timestamp,
            value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::reading::VitalSigns;
    use chrono::{Duration, TimeZone, Utc};

    fn reading(hours: i64, vitals: VitalSigns) -> Reading {
        Reading {
            id: format!("r{}", hours),
            patient_id: "p".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hours),
            vitals,
            notes: None,
        }
    }

    #[test]
    fn test_series_are_oldest_first_and_skip_gaps() {
        let newest_first = vec![
            reading(
                3,
                VitalSigns {
                    systolic: Some(130),
                    diastolic: Some(85),
                    spo2: Some(96.0),
                    ..Default::default()
                },
            ),
            reading(
                2,
                VitalSigns {
                    systolic: Some(125),
                    glucose_mg_dl: Some(110.0),
                    ..Default::default()
                },
            ),
            reading(
                1,
                VitalSigns {
                    systolic: Some(120),
                    diastolic: Some(80),
                    temp_c: Some(36.8),
                    ..Default::default()
                },
            ),
        ];

        let trends = build_trends(&newest_first, 30);

        let bp: Vec<(i32, i32)> = trends
            .blood_pressure
            .iter()
            .map(|p| (p.systolic, p.diastolic))
            .collect();
        assert_eq!(bp, vec![(120, 80), (130, 85)]);
        assert!(trends.blood_pressure[0].timestamp < trends.blood_pressure[1].timestamp);

        assert_eq!(trends.glucose.len(), 1);
        assert_eq!(trends.glucose[0].value, 110.0);
        assert_eq!(trends.spo2.len(), 1);
        assert_eq!(trends.temperature.len(), 1);
    }

    #[test]
    fn test_window_keeps_newest_readings() {
        let newest_first: Vec<Reading> = (0..40)
            .rev()
            .map(|h| {
                reading(
                    h,
                    VitalSigns {
                        spo2: Some(90.0 + (h % 10) as f64),
                        ..Default::default()
                    },
                )
            })
            .collect();

        let trends = build_trends(&newest_first, 30);
        assert_eq!(trends.spo2.len(), 30);
        assert_eq!(trends.spo2[0].timestamp, newest_first[29].timestamp);
        assert_eq!(trends.spo2[29].timestamp, newest_first[0].timestamp);
    }

    #[test]
    fn test_blood_pressure_reaches_past_window() {
        // 30 newer glucose-only readings, 5 older blood pressure readings
        let newest_first: Vec<Reading> = (0..35)
            .rev()
            .map(|h| {
                let vitals = if h < 5 {
                    VitalSigns {
                        systolic: Some(120 + h as i32),
                        diastolic: Some(80),
                        ..Default::default()
                    }
                } else {
                    VitalSigns {
                        glucose_mg_dl: Some(100.0),
                        ..Default::default()
                    }
                };
                reading(h, vitals)
            })
            .collect();

        let trends = build_trends(&newest_first, 30);
        assert_eq!(trends.glucose.len(), 30);
        let systolics: Vec<i32> = trends.blood_pressure.iter().map(|p| p.systolic).collect();
        assert_eq!(systolics, vec![120, 121, 122, 123, 124]);
    }

    #[test]
    fn test_blood_pressure_keeps_newest_complete_pairs() {
        let newest_first: Vec<Reading> = (0..40)
            .rev()
            .map(|h| {
                reading(
                    h,
                    VitalSigns {
                        systolic: Some(100 + h as i32),
                        diastolic: if h % 2 == 0 { Some(70) } else { None },
                        ..Default::default()
                    },
                )
            })
            .collect();

        let trends = build_trends(&newest_first, 10);
        assert_eq!(trends.blood_pressure.len(), 10);
        assert_eq!(trends.blood_pressure[0].systolic, 120);
        assert_eq!(trends.blood_pressure[9].systolic, 138);
    }

    #[test]
    fn test_no_readings_gives_empty_trends() {
        assert!(build_trends(&[], 30).is_empty());
    }
}
