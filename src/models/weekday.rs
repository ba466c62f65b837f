//! Weekday and schedule models.
//!
//! A tracker's schedule is a set of weekdays. For persistence the set is
//! packed into a bitmask where bit i corresponds to the i-th day in
//! declaration order (Monday first).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeekDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekDay {
    /// All days in declaration order (Monday first). The position in this
    /// array is the bit index used by [`Schedule::mask`].
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
        WeekDay::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WeekDay::Monday => "Monday",
            WeekDay::Tuesday => "Tuesday",
            WeekDay::Wednesday => "Wednesday",
            WeekDay::Thursday => "Thursday",
            WeekDay::Friday => "Friday",
            WeekDay::Saturday => "Saturday",
            WeekDay::Sunday => "Sunday",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            WeekDay::Monday => "Mon",
            WeekDay::Tuesday => "Tue",
            WeekDay::Wednesday => "Wed",
            WeekDay::Thursday => "Thu",
            WeekDay::Friday => "Fri",
            WeekDay::Saturday => "Sat",
            WeekDay::Sunday => "Sun",
        }
    }

    /// Display ordinal, Monday=1 through Sunday=7. Used for sorting only;
    /// not the calendar weekday numbering.
    pub fn order(&self) -> u8 {
        match self {
            WeekDay::Monday => 1,
            WeekDay::Tuesday => 2,
            WeekDay::Wednesday => 3,
            WeekDay::Thursday => 4,
            WeekDay::Friday => 5,
            WeekDay::Saturday => 6,
            WeekDay::Sunday => 7,
        }
    }

    /// Maps a calendar weekday number (1=Sunday through 7=Saturday) to a
    /// [`WeekDay`]. Values outside 1..=7 yield `None`.
    pub fn from_calendar_weekday(value: u32) -> Option<WeekDay> {
        match value {
            1 => Some(WeekDay::Sunday),
            2 => Some(WeekDay::Monday),
            3 => Some(WeekDay::Tuesday),
            4 => Some(WeekDay::Wednesday),
            5 => Some(WeekDay::Thursday),
            6 => Some(WeekDay::Friday),
            7 => Some(WeekDay::Saturday),
            _ => None,
        }
    }
}

impl From<chrono::Weekday> for WeekDay {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => WeekDay::Monday,
            chrono::Weekday::Tue => WeekDay::Tuesday,
            chrono::Weekday::Wed => WeekDay::Wednesday,
            chrono::Weekday::Thu => WeekDay::Thursday,
            chrono::Weekday::Fri => WeekDay::Friday,
            chrono::Weekday::Sat => WeekDay::Saturday,
            chrono::Weekday::Sun => WeekDay::Sunday,
        }
    }
}

/// The set of weekdays a tracker is active on. An empty schedule means the
/// tracker is never scheduled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    days: BTreeSet<WeekDay>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, day: WeekDay) -> bool {
        self.days.contains(&day)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Days in display order (Monday first).
    pub fn days(&self) -> impl Iterator<Item = WeekDay> + '_ {
        self.days.iter().copied()
    }

    /// Packs the schedule into a bitmask, bit i set iff the i-th day of
    /// [`WeekDay::ALL`] is included.
    pub fn mask(&self) -> u16 {
        let mut mask: u16 = 0;
        for (index, day) in WeekDay::ALL.iter().enumerate() {
            if self.days.contains(day) {
                mask |= 1 << index;
            }
        }
        mask
    }

    /// Reconstructs a schedule from a bitmask. Bits beyond the seven
    /// weekdays are ignored.
    pub fn from_mask(mask: u16) -> Self {
        WeekDay::ALL
            .iter()
            .enumerate()
            .filter(|(index, _)| mask & (1 << index) != 0)
            .map(|(_, day)| *day)
            .collect()
    }
}

impl FromIterator<WeekDay> for Schedule {
    fn from_iter<I: IntoIterator<Item = WeekDay>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_weekday_mapping() {
        assert_eq!(WeekDay::from_calendar_weekday(1), Some(WeekDay::Sunday));
        assert_eq!(WeekDay::from_calendar_weekday(2), Some(WeekDay::Monday));
        assert_eq!(WeekDay::from_calendar_weekday(4), Some(WeekDay::Wednesday));
        assert_eq!(WeekDay::from_calendar_weekday(7), Some(WeekDay::Saturday));
        assert_eq!(WeekDay::from_calendar_weekday(0), None);
        assert_eq!(WeekDay::from_calendar_weekday(8), None);
    }

    #[test]
    fn display_order_is_monday_first() {
        assert_eq!(WeekDay::Monday.order(), 1);
        assert_eq!(WeekDay::Sunday.order(), 7);

        let orders: Vec<u8> = WeekDay::ALL.iter().map(|day| day.order()).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn from_chrono_weekday() {
        assert_eq!(WeekDay::from(chrono::Weekday::Mon), WeekDay::Monday);
        assert_eq!(WeekDay::from(chrono::Weekday::Sun), WeekDay::Sunday);
    }

    #[test]
    fn mask_round_trips_every_subset() {
        for bits in 0u16..128 {
            let subset: Schedule = WeekDay::ALL
                .iter()
                .enumerate()
                .filter(|(index, _)| bits & (1 << index) != 0)
                .map(|(_, day)| *day)
                .collect();

            assert_eq!(Schedule::from_mask(subset.mask()), subset);
            assert_eq!(subset.mask(), bits);
        }
    }

    #[test]
    fn decode_ignores_high_bits() {
        let schedule = Schedule::from_mask(0b1000_0000_0000_0101);
        let expected: Schedule = [WeekDay::Monday, WeekDay::Wednesday].into_iter().collect();
        assert_eq!(schedule, expected);
    }

    #[test]
    fn empty_schedule_has_zero_mask() {
        assert_eq!(Schedule::new().mask(), 0);
        assert!(Schedule::from_mask(0).is_empty());
    }
}
