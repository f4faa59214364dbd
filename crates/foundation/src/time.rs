/// Engine time in seconds.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64);

impl Time {
    pub fn seconds(&self) -> f64 {
        self.0
    }

    pub fn advanced(self, dt_s: f64) -> Self {
        Time(self.0 + dt_s)
    }
}

#[cfg(test)]
mod tests {
    use super::Time;

    #[test]
    fn advances_by_delta() {
        assert_eq!(Time(1.5).advanced(0.5), Time(2.0));
        assert_eq!(Time::default().seconds(), 0.0);
    }
}
