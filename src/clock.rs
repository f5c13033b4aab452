/// Source of "now" for a build
///
/// Anything time dependent in the rendered site (the copyright year) is read from here once per
/// build, so the output stays fixed until the next build.
pub trait Clock {
    fn now(&self) -> time::OffsetDateTime;

    fn year(&self) -> i32 {
        self.now().year()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> time::OffsetDateTime {
        time::OffsetDateTime::now_utc()
    }
}

/// Always reports the same instant
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FixedClock(pub time::OffsetDateTime);

impl FixedClock {
    /// Midnight UTC on January 1st of `year`
    pub fn from_year(year: i32) -> Option<Self> {
        let date = time::Date::from_calendar_date(year, time::Month::January, 1).ok()?;
        Some(Self(date.midnight().assume_utc()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> time::OffsetDateTime {
        self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fixed_clock_year() {
        let clock = FixedClock::from_year(2023).unwrap();
        assert_eq!(clock.year(), 2023);
    }

    #[test]
    fn fixed_clock_rejects_out_of_range() {
        assert_eq!(FixedClock::from_year(1_000_000), None);
    }
}
