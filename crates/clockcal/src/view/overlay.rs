//! Overlay label text.

use crate::message::ClockReading;

/// Frame rate readout: achieved rate and the rate the loop could reach
/// without pacing.
pub fn fps_text(fps: f32, potential: f32) -> String {
    format!("{fps:3.1} / {potential:3.1}")
}

/// Calendar date and time of day.
pub fn clock_text(reading: &ClockReading) -> String {
    reading.local.format("%A %-d %B %Y  %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::*;

    #[test]
    fn fps_has_one_decimal() {
        assert_eq!(fps_text(59.94, 312.0), "59.9 / 312.0");
        assert_eq!(fps_text(7.0, 8.26), "7.0 / 8.3");
    }

    #[test]
    fn clock_shows_date_and_time() {
        let local = Local
            .with_ymd_and_hms(2024, 3, 5, 9, 7, 2)
            .single()
            .expect("unambiguous local time");
        let text = clock_text(&ClockReading { local });
        assert_eq!(text, "Tuesday 5 March 2024  09:07:02");
    }
}
