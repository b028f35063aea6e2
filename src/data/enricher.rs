//! Enricher Module
//! Attaches season, weekday and weather labels to coded rows.

use crate::data::record::{Coded, Enriched};

/// Label every row. Unknown codes become unknown labels, never errors.
pub fn enrich<R: Coded>(rows: Vec<R>) -> Vec<Enriched<R>> {
    rows.into_iter()
        .map(|record| {
            let labels = record.codes().labels();
            Enriched { record, labels }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::category::{Category, Season, Weather, Weekday};
    use crate::data::record::{CategoryCodes, DailyRecord, RiderCounts};
    use chrono::NaiveDate;

    fn day(season: i64, weekday: i64, weathersit: i64) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
            codes: CategoryCodes {
                season,
                weekday,
                weathersit,
            },
            working_day: false,
            counts: RiderCounts::default(),
        }
    }

    #[test]
    fn test_enrich_adds_labels() {
        let rows = enrich(vec![day(1, 6, 2), day(3, 0, 1)]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].labels.season, Season::Spring);
        assert_eq!(rows[0].labels.weekday, Weekday::Saturday);
        assert_eq!(rows[0].labels.weather, Weather::CloudyMisty);
        assert_eq!(rows[1].labels.season.label(), Some("Fall"));
        assert_eq!(rows[1].labels.weekday.label(), Some("Sunday"));
    }

    #[test]
    fn test_enrich_out_of_range_codes() {
        let rows = enrich(vec![day(9, 12, 0)]);

        assert_eq!(rows[0].labels.season.label(), None);
        assert_eq!(rows[0].labels.weekday.label(), None);
        assert_eq!(rows[0].labels.weather.label(), None);
        // the record itself is untouched
        assert_eq!(rows[0].codes.season, 9);
    }
}
