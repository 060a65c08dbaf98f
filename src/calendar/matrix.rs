use std::fmt;
use std::iter::successors;
use thiserror::Error;
use time::{Date, Month, Weekday};

pub const DAYS_IN_WEEK: usize = 7;

/// Number of weeks in every [`MonthMatrix`], including padding
pub const WEEKS_IN_MONTH: usize = 6;

static MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

static WEEKDAY_NAMES: [&str; DAYS_IN_WEEK] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Return the English name of `date`'s month
pub fn month_name(date: Date) -> &'static str {
    MONTH_NAMES[usize::from(u8::from(date.month())) - 1]
}

/// Return the English name of `date`'s day of the week
pub fn weekday_name(date: Date) -> &'static str {
    WEEKDAY_NAMES[date.weekday().index0()]
}

pub(crate) trait WeekdayExt {
    fn index0(&self) -> usize;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> usize {
        self.number_days_from_sunday().into()
    }
}

/// Classification of a cell in a [`MonthMatrix`]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum DayType {
    /// A day of the month before the one being shown
    Prev,
    /// A day of the month being shown
    Day,
    /// A day of the month after the one being shown
    Next,
    /// The current day, wherever it falls.  Cells are only given this type
    /// when rendered.
    Today,
}

impl DayType {
    /// The class name that marks this type on a rendered element
    pub fn as_str(self) -> &'static str {
        match self {
            DayType::Prev => "prev",
            DayType::Day => "day",
            DayType::Next => "next",
            DayType::Today => "today",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single cell of a [`MonthMatrix`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Day {
    pub value: Date,
    pub kind: DayType,
}

impl Day {
    pub fn new(value: Date, kind: DayType) -> Day {
        Day { value, kind }
    }

    pub fn day_of_month(&self) -> u8 {
        self.value.day()
    }
}

/// Error returned when a month's padding would extend past the range of
/// representable dates
#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;

/// Six weeks of seven days, Sunday first, covering an entire month together
/// with the tail of the month before and the start of the month after.
///
/// The cells are consecutive calendar days in row-major order.  The sixth
/// week is always present, even when it lies entirely in the next month.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct MonthMatrix {
    weeks: [[Day; DAYS_IN_WEEK]; WEEKS_IN_MONTH],
    first: Date,
    last: Date,
}

type Grid = [[Option<Day>; DAYS_IN_WEEK]; WEEKS_IN_MONTH];

impl MonthMatrix {
    /// Build the matrix for the month containing `reference`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfTimeError` if the padding days before or after the month
    /// cannot be represented as a [`Date`].
    pub fn build(reference: Date) -> Result<MonthMatrix, OutOfTimeError> {
        let mut grid: Grid = [[None; DAYS_IN_WEEK]; WEEKS_IN_MONTH];
        let first = first_of_month(reference);
        let lead = first.weekday().index0();

        // Place every day of the month where it falls in the grid.
        let mut last = first;
        let mut last_row = 0;
        for date in iter_days_from(first).take_while(|d| d.month() == first.month()) {
            let row = (usize::from(date.day()) - 1 + lead) / DAYS_IN_WEEK;
            grid[row][date.weekday().index0()] = Some(Day::new(date, DayType::Day));
            last = date;
            last_row = row;
        }

        // Pad before day 1.  Only the first cell's date is computed from its
        // distance to day 1; each later cell is the day after its
        // predecessor.
        let mut cursor: Option<Date> = None;
        for (col, cell) in grid[0].iter_mut().enumerate().take(lead) {
            let date = match cursor {
                None => iter_days_before(first).nth(lead - col - 1),
                Some(prev) => prev.next_day(),
            }
            .ok_or(OutOfTimeError)?;
            *cell = Some(Day::new(date, DayType::Prev));
            cursor = Some(date);
        }

        // Pad after the last day, through the end of the sixth week.
        let mut cursor = last;
        for week in grid.iter_mut().skip(last_row) {
            for cell in week.iter_mut().filter(|c| c.is_none()) {
                cursor = cursor.next_day().ok_or(OutOfTimeError)?;
                *cell = Some(Day::new(cursor, DayType::Next));
            }
        }

        Ok(MonthMatrix {
            weeks: seal(grid),
            first,
            last,
        })
    }

    /// The first day of the month being shown
    pub fn first_of_month(&self) -> Date {
        self.first
    }

    /// The last day of the month being shown
    pub fn last_of_month(&self) -> Date {
        self.last
    }

    pub fn weeks(&self) -> &[[Day; DAYS_IN_WEEK]; WEEKS_IN_MONTH] {
        &self.weeks
    }

    pub(crate) fn weeks_mut(&mut self) -> &mut [[Day; DAYS_IN_WEEK]; WEEKS_IN_MONTH] {
        &mut self.weeks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, [Day; DAYS_IN_WEEK]> {
        self.weeks.iter()
    }

    /// Iterate over all 42 cells in row-major order
    pub fn days(&self) -> impl Iterator<Item = &Day> + '_ {
        self.weeks.iter().flatten()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Day> {
        self.weeks.get(row).and_then(|week| week.get(col))
    }

    /// Return the `(row, column)` of the cell for `date`, if it is shown
    pub fn position_of(&self, date: Date) -> Option<(usize, usize)> {
        self.days()
            .position(|d| d.value == date)
            .map(|i| (i / DAYS_IN_WEEK, i % DAYS_IN_WEEK))
    }
}

impl<'a> IntoIterator for &'a MonthMatrix {
    type Item = &'a [Day; DAYS_IN_WEEK];
    type IntoIter = std::slice::Iter<'a, [Day; DAYS_IN_WEEK]>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn first_of_month(date: Date) -> Date {
    date.replace_day(1)
        .expect("every month should have a first day")
}

fn seal(grid: Grid) -> [[Day; DAYS_IN_WEEK]; WEEKS_IN_MONTH] {
    grid.map(|week| week.map(|cell| cell.expect("every cell should have been filled")))
}

fn iter_days_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day())
}

fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}

/// Return `date` moved by `months` calendar months.  If the day of the month
/// does not exist in the target month, the last day of that month is used.
pub(crate) fn add_months(date: Date, months: i32) -> Option<Date> {
    let index = date
        .year()
        .checked_mul(12)?
        .checked_add(i32::from(u8::from(date.month())) - 1)?
        .checked_add(months)?;
    let year = index.div_euclid(12);
    let month = Month::try_from(u8::try_from(index.rem_euclid(12) + 1).ok()?).ok()?;
    (1..=date.day())
        .rev()
        .find_map(|day| Date::from_calendar_date(year, month, day).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn kinds(matrix: &MonthMatrix) -> Vec<Vec<DayType>> {
        matrix
            .iter()
            .map(|week| week.iter().map(|d| d.kind).collect())
            .collect()
    }

    fn check_invariants(reference: Date) {
        let matrix = MonthMatrix::build(reference).unwrap();
        let days = matrix.days().copied().collect::<Vec<_>>();
        assert_eq!(days.len(), 42);
        for pair in days.windows(2) {
            assert_eq!(
                pair[0].value.next_day(),
                Some(pair[1].value),
                "cells of {reference} are not consecutive"
            );
        }
        let first = first_of_month(reference);
        let lead = first.weekday().index0();
        assert!(days[..lead].iter().all(|d| d.kind == DayType::Prev));
        let month_len = days.iter().filter(|d| d.kind == DayType::Day).count();
        assert!(days[lead..lead + month_len]
            .iter()
            .all(|d| d.kind == DayType::Day && d.value.month() == reference.month()));
        assert!(days[lead + month_len..]
            .iter()
            .all(|d| d.kind == DayType::Next));
        assert_eq!(days[lead].value, first);
        assert_eq!(days[lead + month_len - 1].value, matrix.last_of_month());
        assert_ne!(
            matrix.last_of_month().next_day().map(Date::month),
            Some(reference.month())
        );
        if lead > 0 {
            assert_eq!(days[lead - 1].value.next_day(), Some(first));
        }
    }

    #[test]
    fn test_leap_february() {
        use DayType::{Day as D, Next as N, Prev as P};
        let matrix = MonthMatrix::build(date!(2024 - 02 - 01)).unwrap();
        assert_eq!(
            kinds(&matrix),
            [
                [P, P, P, P, D, D, D],
                [D; 7],
                [D; 7],
                [D; 7],
                [D, D, D, D, D, N, N],
                [N; 7],
            ]
        );
        assert_eq!(matrix.get(0, 0).map(|d| d.value), Some(date!(2024 - 01 - 28)));
        assert_eq!(matrix.get(0, 4).map(|d| d.value), Some(date!(2024 - 02 - 01)));
        assert_eq!(matrix.get(4, 4).map(|d| d.value), Some(date!(2024 - 02 - 29)));
        assert_eq!(matrix.get(5, 6).map(|d| d.value), Some(date!(2024 - 03 - 09)));
        assert_eq!(matrix.days().filter(|d| d.kind == D).count(), 29);
        assert_eq!(matrix.get(6, 0), None);
    }

    #[test]
    fn test_month_starting_saturday() {
        let matrix = MonthMatrix::build(date!(2023 - 04 - 01)).unwrap();
        let week = matrix.weeks()[0];
        assert!(week[..6].iter().all(|d| d.kind == DayType::Prev));
        assert_eq!(week[0].value, date!(2023 - 03 - 26));
        assert_eq!(week[5].value, date!(2023 - 03 - 31));
        assert_eq!(week[6], Day::new(date!(2023 - 04 - 01), DayType::Day));
        assert_eq!(matrix.position_of(date!(2023 - 04 - 30)), Some((5, 0)));
        assert_eq!(matrix.get(5, 1).map(|d| d.kind), Some(DayType::Next));
    }

    #[test]
    fn test_four_week_february() {
        let matrix = MonthMatrix::build(date!(2015 - 02 - 14)).unwrap();
        let rows = kinds(&matrix);
        assert!(rows[..4].iter().flatten().all(|&k| k == DayType::Day));
        assert!(rows[4..].iter().flatten().all(|&k| k == DayType::Next));
        assert_eq!(matrix.get(0, 0).map(|d| d.value), Some(date!(2015 - 02 - 01)));
        assert_eq!(matrix.get(4, 0).map(|d| d.value), Some(date!(2015 - 03 - 01)));
        assert_eq!(matrix.get(5, 6).map(|d| d.value), Some(date!(2015 - 03 - 14)));
    }

    #[test]
    fn test_month_ending_saturday() {
        let matrix = MonthMatrix::build(date!(2026 - 10 - 17)).unwrap();
        assert_eq!(matrix.position_of(date!(2026 - 10 - 31)), Some((4, 6)));
        assert!(matrix.weeks()[5].iter().all(|d| d.kind == DayType::Next));
        assert_eq!(matrix.weeks()[5][0].value, date!(2026 - 11 - 01));
    }

    #[test]
    fn test_every_month_of_several_years() {
        for year in [1900, 1999, 2000, 2015, 2023, 2024, 2100] {
            for month in 1..=12 {
                let month = Month::try_from(month).unwrap();
                check_invariants(Date::from_calendar_date(year, month, 1).unwrap());
                check_invariants(Date::from_calendar_date(year, month, 28).unwrap());
            }
        }
    }

    #[test]
    fn test_reference_day_does_not_matter() {
        let a = MonthMatrix::build(date!(2024 - 07 - 01)).unwrap();
        let b = MonthMatrix::build(date!(2024 - 07 - 31)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.first_of_month(), date!(2024 - 07 - 01));
        assert_eq!(a.last_of_month(), date!(2024 - 07 - 31));
    }

    #[test]
    fn test_end_of_time() {
        assert_eq!(
            MonthMatrix::build(date!(9999 - 12 - 25)),
            Err(OutOfTimeError)
        );
        assert!(MonthMatrix::build(date!(9999 - 11 - 25)).is_ok());
    }

    #[test]
    fn test_names() {
        assert_eq!(month_name(date!(2024 - 02 - 01)), "February");
        assert_eq!(weekday_name(date!(2024 - 02 - 01)), "Thursday");
        assert_eq!(month_name(date!(2023 - 12 - 31)), "December");
        assert_eq!(weekday_name(date!(2023 - 12 - 31)), "Sunday");
    }

    #[test]
    fn test_add_months() {
        assert_eq!(add_months(date!(2024 - 01 - 31), 1), Some(date!(2024 - 02 - 29)));
        assert_eq!(add_months(date!(2023 - 01 - 31), 1), Some(date!(2023 - 02 - 28)));
        assert_eq!(add_months(date!(2024 - 03 - 15), -3), Some(date!(2023 - 12 - 15)));
        assert_eq!(add_months(date!(2024 - 12 - 01), 13), Some(date!(2026 - 01 - 01)));
        assert_eq!(add_months(date!(9999 - 12 - 01), 1), None);
    }
}
