//! 星期活动掩码
//!
//! 学年与课程都用一个 7 位掩码记录每周哪几天上课。
//! 数据库中存为整数，API 中以 7 个布尔字段表示。

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// 7 位星期掩码（周日 = 1 ... 周六 = 64）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "WeekdayFlags", into = "WeekdayFlags")]
pub struct DaysOfWeek(u8);

impl DaysOfWeek {
    pub const NO_DAYS: DaysOfWeek = DaysOfWeek(0);
    pub const SUNDAY: DaysOfWeek = DaysOfWeek(1);
    pub const MONDAY: DaysOfWeek = DaysOfWeek(1 << 1);
    pub const TUESDAY: DaysOfWeek = DaysOfWeek(1 << 2);
    pub const WEDNESDAY: DaysOfWeek = DaysOfWeek(1 << 3);
    pub const THURSDAY: DaysOfWeek = DaysOfWeek(1 << 4);
    pub const FRIDAY: DaysOfWeek = DaysOfWeek(1 << 5);
    pub const SATURDAY: DaysOfWeek = DaysOfWeek(1 << 6);
    pub const ALL_DAYS: DaysOfWeek = DaysOfWeek(0b111_1111);
    pub const WEEKDAYS: DaysOfWeek = DaysOfWeek(0b011_1110);

    /// 从数据库整数列还原，超出 7 位的部分被丢弃
    pub fn from_bits(bits: i32) -> Self {
        DaysOfWeek((bits & 0b111_1111) as u8)
    }

    pub fn bits(self) -> i32 {
        self.0 as i32
    }

    /// 单个星期对应的标志位
    pub fn flag(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => Self::SUNDAY,
            Weekday::Mon => Self::MONDAY,
            Weekday::Tue => Self::TUESDAY,
            Weekday::Wed => Self::WEDNESDAY,
            Weekday::Thu => Self::THURSDAY,
            Weekday::Fri => Self::FRIDAY,
            Weekday::Sat => Self::SATURDAY,
        }
    }

    pub fn from_weekdays<I: IntoIterator<Item = Weekday>>(weekdays: I) -> Self {
        weekdays
            .into_iter()
            .fold(Self::NO_DAYS, |mask, day| mask | Self::flag(day))
    }

    pub fn contains(self, weekday: Weekday) -> bool {
        self.0 & Self::flag(weekday).0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 该日期所在星期是否被标记为活动日
    pub fn runs_on(self, date: NaiveDate) -> bool {
        self.contains(date.weekday())
    }

    /// 统计日期范围内的活动日数量（包含首尾）
    ///
    /// `start > end` 时退化为对 `start` 单日的判断，返回 0 或 1。
    pub fn task_count_in_range(self, start: NaiveDate, end: NaiveDate) -> u32 {
        if start > end {
            return u32::from(self.runs_on(start));
        }

        start
            .iter_days()
            .take_while(|day| *day <= end)
            .filter(|day| self.runs_on(*day))
            .count() as u32
    }
}

impl std::ops::BitOr for DaysOfWeek {
    type Output = DaysOfWeek;

    fn bitor(self, rhs: Self) -> Self::Output {
        DaysOfWeek(self.0 | rhs.0)
    }
}

/// API 层的 7 个布尔字段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayFlags {
    #[serde(default)]
    pub sunday: bool,
    #[serde(default)]
    pub monday: bool,
    #[serde(default)]
    pub tuesday: bool,
    #[serde(default)]
    pub wednesday: bool,
    #[serde(default)]
    pub thursday: bool,
    #[serde(default)]
    pub friday: bool,
    #[serde(default)]
    pub saturday: bool,
}

impl From<WeekdayFlags> for DaysOfWeek {
    fn from(flags: WeekdayFlags) -> Self {
        let pairs = [
            (flags.sunday, Weekday::Sun),
            (flags.monday, Weekday::Mon),
            (flags.tuesday, Weekday::Tue),
            (flags.wednesday, Weekday::Wed),
            (flags.thursday, Weekday::Thu),
            (flags.friday, Weekday::Fri),
            (flags.saturday, Weekday::Sat),
        ];
        DaysOfWeek::from_weekdays(
            pairs
                .into_iter()
                .filter_map(|(active, day)| active.then_some(day)),
        )
    }
}

impl From<DaysOfWeek> for WeekdayFlags {
    fn from(days: DaysOfWeek) -> Self {
        WeekdayFlags {
            sunday: days.contains(Weekday::Sun),
            monday: days.contains(Weekday::Mon),
            tuesday: days.contains(Weekday::Tue),
            wednesday: days.contains(Weekday::Wed),
            thursday: days.contains(Weekday::Thu),
            friday: days.contains(Weekday::Fri),
            saturday: days.contains(Weekday::Sat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_runs_on_matches_flag() {
        // 2024-09-02 是周一
        let monday = date(2024, 9, 2);
        assert!(DaysOfWeek::MONDAY.runs_on(monday));
        assert!(!DaysOfWeek::TUESDAY.runs_on(monday));
        assert!(DaysOfWeek::WEEKDAYS.runs_on(monday));
        assert!(!DaysOfWeek::WEEKDAYS.runs_on(date(2024, 9, 1)));
    }

    #[test]
    fn test_no_days_never_runs() {
        let start = date(2024, 1, 1);
        let end = date(2024, 12, 31);
        assert_eq!(DaysOfWeek::NO_DAYS.task_count_in_range(start, end), 0);
        assert_eq!(DaysOfWeek::NO_DAYS.task_count_in_range(end, start), 0);
        assert!(start.iter_days().take(7).all(|d| !DaysOfWeek::NO_DAYS.runs_on(d)));
    }

    #[test]
    fn test_task_count_is_inclusive() {
        // 2024-09-02 (周一) 到 2024-09-08 (周日)
        let start = date(2024, 9, 2);
        let end = date(2024, 9, 8);
        assert_eq!(DaysOfWeek::WEEKDAYS.task_count_in_range(start, end), 5);
        assert_eq!(DaysOfWeek::ALL_DAYS.task_count_in_range(start, end), 7);
        assert_eq!(DaysOfWeek::SUNDAY.task_count_in_range(start, end), 1);
        assert_eq!(DaysOfWeek::MONDAY.task_count_in_range(start, start), 1);
    }

    #[test]
    fn test_reversed_range_checks_start_only() {
        let monday = date(2024, 9, 2);
        let earlier = date(2024, 8, 1);
        assert_eq!(DaysOfWeek::MONDAY.task_count_in_range(monday, earlier), 1);
        assert_eq!(DaysOfWeek::TUESDAY.task_count_in_range(monday, earlier), 0);
        assert_eq!(DaysOfWeek::ALL_DAYS.task_count_in_range(monday, earlier), 1);
    }

    #[test]
    fn test_count_matches_manual_iteration() {
        let mask = DaysOfWeek::MONDAY | DaysOfWeek::WEDNESDAY | DaysOfWeek::FRIDAY;
        let start = date(2024, 9, 1);
        for span in [0i64, 1, 6, 30, 200] {
            let end = start + chrono::Duration::days(span);
            let mut expected = 0;
            let mut day = start;
            while day <= end {
                if mask.contains(day.weekday()) {
                    expected += 1;
                }
                day = day.succ_opt().unwrap();
            }
            assert_eq!(mask.task_count_in_range(start, end), expected);
        }
    }

    #[test]
    fn test_bits_roundtrip_and_truncation() {
        assert_eq!(DaysOfWeek::from_bits(127), DaysOfWeek::ALL_DAYS);
        assert_eq!(DaysOfWeek::from_bits(128 | 2), DaysOfWeek::MONDAY);
        assert_eq!(DaysOfWeek::WEEKDAYS.bits(), 62);
    }

    #[test]
    fn test_weekday_flags_serde() {
        let json = r#"{"monday": true, "friday": true}"#;
        let days: DaysOfWeek = serde_json::from_str(json).unwrap();
        assert_eq!(days, DaysOfWeek::MONDAY | DaysOfWeek::FRIDAY);

        let value = serde_json::to_value(days).unwrap();
        assert_eq!(value["monday"], true);
        assert_eq!(value["tuesday"], false);
        assert_eq!(value["friday"], true);
    }
}
