//! Keyed tabular time series.
//!
//! A [`TimeSeries`] holds one value per (location, age group, sex, draw,
//! date) key. Key uniqueness is enforced at construction: a duplicate key
//! before a merge would silently duplicate or double-count rows downstream,
//! so it aborts the run instead. Every transformation returns a new value
//! rather than mutating shared state.

use std::collections::hash_map;
use std::hash::Hash;

use chrono::{Duration, NaiveDate};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::{Error, Result};

/// Unique row key within one time series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesKey {
    /// Location identifier
    pub location_id: i32,
    /// Age group identifier
    pub age_group_id: i32,
    /// Sex identifier
    pub sex_id: i32,
    /// Uncertainty draw label (e.g. "draw_12")
    pub draw: String,
    /// Calendar date the value describes
    pub date: NaiveDate,
}

impl SeriesKey {
    /// The demographic part of the key, used for population lookups.
    #[must_use]
    pub const fn demographic(&self) -> DemographicKey {
        DemographicKey {
            location_id: self.location_id,
            age_group_id: self.age_group_id,
            sex_id: self.sex_id,
        }
    }

    /// The key without its date, used after annual collapse.
    #[must_use]
    pub fn annual(&self) -> AnnualKey {
        AnnualKey {
            location_id: self.location_id,
            age_group_id: self.age_group_id,
            sex_id: self.sex_id,
            draw: self.draw.clone(),
        }
    }

    fn shifted(mut self, days: i64) -> Self {
        self.date += Duration::days(days);
        self
    }
}

/// Population lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DemographicKey {
    /// Location identifier
    pub location_id: i32,
    /// Age group identifier
    pub age_group_id: i32,
    /// Sex identifier
    pub sex_id: i32,
}

/// Row key after collapsing across the days of the reference year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AnnualKey {
    /// Location identifier
    pub location_id: i32,
    /// Age group identifier
    pub age_group_id: i32,
    /// Sex identifier
    pub sex_id: i32,
    /// Uncertainty draw label
    pub draw: String,
}

impl AnnualKey {
    /// The demographic part of the key, used for population lookups.
    #[must_use]
    pub const fn demographic(&self) -> DemographicKey {
        DemographicKey {
            location_id: self.location_id,
            age_group_id: self.age_group_id,
            sex_id: self.sex_id,
        }
    }
}

/// A tabular time series: one value of type `V` per unique [`SeriesKey`].
#[derive(Debug, Clone)]
pub struct TimeSeries<V> {
    rows: FxHashMap<SeriesKey, V>,
}

impl<V> TimeSeries<V> {
    /// Build a series from rows, rejecting duplicate keys.
    ///
    /// `context` names the series in the error when uniqueness fails.
    pub fn from_rows(
        context: &'static str,
        rows: impl IntoIterator<Item = (SeriesKey, V)>,
    ) -> Result<Self> {
        let iter = rows.into_iter();
        let mut map = FxHashMap::with_capacity_and_hasher(iter.size_hint().0, Default::default());
        for (key, value) in iter {
            if map.insert(key.clone(), value).is_some() {
                return Err(Error::DuplicateKey { context, key });
            }
        }
        Ok(Self { rows: map })
    }

    pub(crate) fn from_map(rows: FxHashMap<SeriesKey, V>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the series has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up the value for a key.
    #[must_use]
    pub fn get(&self, key: &SeriesKey) -> Option<&V> {
        self.rows.get(key)
    }

    /// Iterate over (key, value) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&SeriesKey, &V)> {
        self.rows.iter()
    }

    /// The lag engine: move every row's date by a whole number of days
    /// (negative shifts backward). Pure date translation, no aggregation;
    /// shifting all keys by the same offset preserves uniqueness.
    #[must_use]
    pub fn shift(self, days: i64) -> Self {
        let rows = self
            .rows
            .into_iter()
            .map(|(key, value)| (key.shifted(days), value))
            .collect();
        Self { rows }
    }

    /// Transform every value, keeping the keys.
    pub fn map<W>(self, mut f: impl FnMut(&SeriesKey, V) -> W) -> TimeSeries<W> {
        let rows = self
            .rows
            .into_iter()
            .map(|(key, value)| {
                let mapped = f(&key, value);
                (key, mapped)
            })
            .collect();
        TimeSeries { rows }
    }

    /// Left join on the full key. Rows of `self` with no counterpart in
    /// `right` carry `None` on the right side: a defined missing value, not
    /// an error, since lagged series rarely cover identical date ranges.
    pub fn left_join<W: Clone>(self, right: &TimeSeries<W>) -> TimeSeries<(V, Option<W>)> {
        let rows = self
            .rows
            .into_iter()
            .map(|(key, value)| {
                let matched = right.rows.get(&key).cloned();
                (key, (value, matched))
            })
            .collect();
        TimeSeries { rows }
    }

    /// Drop rows whose date falls outside `[start, end]`.
    #[must_use]
    pub fn restrict(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.rows.retain(|key, _| key.date >= start && key.date <= end);
        self
    }

    /// Grouped fold onto a coarser key (STATA-style collapse): every row is
    /// folded into the accumulator of its group, all other columns dropped.
    pub fn collapse<K, A>(
        self,
        mut group: impl FnMut(&SeriesKey) -> K,
        mut fold: impl FnMut(&mut A, V),
    ) -> FxHashMap<K, A>
    where
        K: Eq + Hash,
        A: Default,
    {
        let mut out: FxHashMap<K, A> = FxHashMap::default();
        for (key, value) in self.rows {
            fold(out.entry(group(&key)).or_default(), value);
        }
        out
    }
}

impl<V> IntoIterator for TimeSeries<V> {
    type Item = (SeriesKey, V);
    type IntoIter = hash_map::IntoIter<SeriesKey, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(date: NaiveDate) -> SeriesKey {
        SeriesKey {
            location_id: 33,
            age_group_id: 22,
            sex_id: 1,
            draw: "draw_0".to_string(),
            date,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let rows = vec![(key(date(2020, 3, 1)), 1.0), (key(date(2020, 3, 1)), 2.0)];
        let err = TimeSeries::from_rows("infections", rows).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { context: "infections", .. }));
    }

    #[test]
    fn test_shift_round_trip_is_identity() {
        let dates = [date(2020, 1, 1), date(2020, 2, 29), date(2020, 12, 31)];
        let rows: Vec<_> = dates.iter().map(|d| (key(*d), 1.0)).collect();
        let series = TimeSeries::from_rows("infections", rows).unwrap();

        let shifted = series.shift(11).shift(-11);
        for d in dates {
            assert_eq!(shifted.get(&key(d)), Some(&1.0));
        }
        assert_eq!(shifted.len(), dates.len());
    }

    #[test]
    fn test_shift_crosses_month_and_year_boundaries() {
        let series =
            TimeSeries::from_rows("infections", vec![(key(date(2020, 12, 30)), 1.0)]).unwrap();
        let shifted = series.shift(5);
        assert_eq!(shifted.get(&key(date(2021, 1, 4))), Some(&1.0));
    }

    #[test]
    fn test_left_join_unmatched_is_none() {
        let left = TimeSeries::from_rows(
            "left",
            vec![(key(date(2020, 3, 1)), 10.0), (key(date(2020, 3, 2)), 20.0)],
        )
        .unwrap();
        let right =
            TimeSeries::from_rows("right", vec![(key(date(2020, 3, 2)), 4.0)]).unwrap();

        let joined = left.left_join(&right);
        assert_eq!(joined.get(&key(date(2020, 3, 1))), Some(&(10.0, None)));
        assert_eq!(joined.get(&key(date(2020, 3, 2))), Some(&(20.0, Some(4.0))));
    }

    #[test]
    fn test_restrict_is_inclusive() {
        let rows = vec![
            (key(date(2019, 12, 31)), 1.0),
            (key(date(2020, 1, 1)), 2.0),
            (key(date(2020, 12, 31)), 3.0),
            (key(date(2021, 1, 1)), 4.0),
        ];
        let series = TimeSeries::from_rows("infections", rows).unwrap();
        let restricted = series.restrict(date(2020, 1, 1), date(2020, 12, 31));
        assert_eq!(restricted.len(), 2);
        assert!(restricted.get(&key(date(2019, 12, 31))).is_none());
        assert!(restricted.get(&key(date(2021, 1, 1))).is_none());
    }

    #[test]
    fn test_collapse_sums_groups() {
        let rows = vec![
            (key(date(2020, 3, 1)), 1.5),
            (key(date(2020, 3, 2)), 2.5),
            (key(date(2020, 3, 3)), 3.0),
        ];
        let series = TimeSeries::from_rows("infections", rows).unwrap();
        let collapsed = series.collapse(SeriesKey::annual, |acc: &mut f64, v| *acc += v);
        assert_eq!(collapsed.len(), 1);
        let total = collapsed.values().next().unwrap();
        assert!((total - 7.0).abs() < 1e-12);
    }
}
