/// `mm:ss.t`, the clock format used by the transport bar and the
/// properties panel.
pub fn format_time(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    let tenths = ((seconds % 1.0) * 10.0).floor() as u64;
    format!("{mins:02}:{secs:02}.{tenths}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_seconds_tenths() {
        assert_eq!(format_time(0.0), "00:00.0");
        assert_eq!(format_time(7.25), "00:07.2");
        assert_eq!(format_time(61.5), "01:01.5");
        assert_eq!(format_time(-3.0), "00:00.0");
    }
}
