//! 闭区间日期范围

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// `[start, end]`，首尾都包含在内
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// 起止顺序是否合法（允许同一天）
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    /// 两个范围至少共享一天
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// 范围内的天数，逆序范围为 0
    pub fn len_days(&self) -> i64 {
        if self.is_ordered() {
            (self.end - self.start).num_days() + 1
        } else {
            0
        }
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |day| *day <= self.end)
    }

    pub fn count_matching<F>(&self, mut predicate: F) -> u32
    where
        F: FnMut(NaiveDate) -> bool,
    {
        self.days().filter(|day| predicate(*day)).count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    #[test]
    fn test_overlap_is_inclusive() {
        let a = DateRange::new(d(1, 1), d(1, 5));
        assert!(a.overlaps(&a));
        assert!(a.overlaps(&DateRange::new(d(1, 5), d(1, 10))));
        assert!(!a.overlaps(&DateRange::new(d(1, 6), d(1, 10))));
        assert!(DateRange::new(d(1, 6), d(1, 10)).overlaps(&DateRange::new(d(1, 1), d(1, 31))));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let ranges = [
            DateRange::new(d(1, 1), d(1, 5)),
            DateRange::new(d(1, 3), d(1, 4)),
            DateRange::new(d(1, 6), d(1, 10)),
            DateRange::new(d(1, 5), d(1, 5)),
        ];
        for a in &ranges {
            for b in &ranges {
                assert_eq!(a.overlaps(b), b.overlaps(a));
                assert_eq!(a.overlaps(b), a.start <= b.end && b.start <= a.end);
            }
        }
    }

    #[test]
    fn test_contains_is_inclusive() {
        let year = DateRange::new(d(1, 1), d(6, 1));
        assert!(year.contains(d(1, 1)));
        assert!(year.contains(d(6, 1)));
        assert!(!year.contains(d(6, 2)));
    }

    #[test]
    fn test_len_and_days() {
        let week = DateRange::new(d(9, 2), d(9, 8));
        assert_eq!(week.len_days(), 7);
        assert_eq!(week.days().count(), 7);
        assert_eq!(DateRange::new(d(9, 8), d(9, 2)).len_days(), 0);
        assert_eq!(DateRange::new(d(9, 8), d(9, 2)).days().count(), 0);
    }
}
