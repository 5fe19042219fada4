/// Time primitives
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Time(pub f64); // seconds

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn from_millis(ms: f64) -> Self {
        Time(ms / 1000.0)
    }

    pub fn as_millis(self) -> f64 {
        self.0 * 1000.0
    }

    pub fn seconds(self) -> f64 {
        self.0
    }

    /// Returns this time shifted forward by `seconds`.
    pub fn after(self, seconds: f64) -> Self {
        Time(self.0 + seconds)
    }

    pub fn max(self, other: Time) -> Self {
        if other.0 > self.0 { other } else { self }
    }
}

#[cfg(test)]
mod tests {
    use super::Time;

    #[test]
    fn millis_round_trip() {
        let t = Time::from_millis(1500.0);
        assert_eq!(t.seconds(), 1.5);
        assert_eq!(t.as_millis(), 1500.0);
        assert_eq!(t.after(0.5), Time(2.0));
    }

    #[test]
    fn max_keeps_later_time() {
        assert_eq!(Time(1.0).max(Time(2.0)), Time(2.0));
        assert_eq!(Time(3.0).max(Time(2.0)), Time(3.0));
    }
}
