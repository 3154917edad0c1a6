//! Message formatter
//!
//! Renders a normalized route into the two notification texts: the message
//! forwarded to the configured recipient and the confirmation echoed back
//! to the sender.

use domain::RouteResult;

/// Fixed delay-warning line appended when a route carries a delay
pub const DELAY_MARKER: &str = "▲▽遅延情報あり▽▲";

/// Renders route notifications addressed between two named people
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    recipient_name: String,
    sender_name: String,
}

impl MessageFormatter {
    /// Create a formatter for the given recipient/sender display names
    #[must_use]
    pub fn new(recipient_name: impl Into<String>, sender_name: impl Into<String>) -> Self {
        Self {
            recipient_name: recipient_name.into(),
            sender_name: sender_name.into(),
        }
    }

    /// The message pushed to the recipient
    ///
    /// States destination and estimated arrival, origin and departure,
    /// transfer count, and the first line ridden when available.
    #[must_use]
    pub fn format_forwarded(&self, route: &RouteResult) -> String {
        let mut text = format!(
            "{recipient}様\n\n以下、{sender}様からご伝言です\n\n{to}{arrival}見込み\n\n* {from}{departure}発\n  乗換{transfers}回",
            recipient = self.recipient_name,
            sender = self.sender_name,
            to = route.destination_station,
            arrival = route.arrival_clock_time,
            from = route.origin_station,
            departure = route.departure_clock_time,
            transfers = route.transfer_count,
        );
        if let Some(first_line) = route.lines.first() {
            text.push_str(&format!("\n  {}", first_line.line_name));
        }
        if route.has_delay == Some(true) {
            text.push_str(&format!("\n{DELAY_MARKER}"));
        }
        text
    }

    /// The confirmation echoed back to the sender
    ///
    /// Restates departure and arrival, then lists each transfer with its
    /// departure time, next-leg platform, and change time in minutes. The
    /// terminal station is never rendered as a transfer.
    #[must_use]
    pub fn format_confirmation(&self, route: &RouteResult) -> String {
        let mut text = format!(
            "以下の内容で送信しました。\n-----\n{from}{departure}発",
            from = route.origin_station,
            departure = route.departure_clock_time,
        );
        if let Some(first_line) = route.lines.first() {
            text.push_str(&format!(" ({})", first_line.line_name));
        }
        text.push_str(&format!(
            "\n{to}{arrival}着 見込み",
            to = route.destination_station,
            arrival = route.arrival_clock_time,
        ));
        if route.has_delay == Some(true) {
            text.push_str(&format!("\n{DELAY_MARKER}"));
        }
        text.push_str("\n*********");

        if route.transfer_count > 0 {
            let line_count = route.lines.len();
            for (i, line) in route.lines.iter().enumerate() {
                if i + 1 == line_count {
                    // the last line ends at the destination, not a transfer
                    break;
                }
                let transfer = route.transfers.get(i);
                let station = transfer.map_or("", |t| t.station_name.as_str());
                let departure = transfer.map_or_else(
                    Default::default,
                    |t| t.departure_clock_time.clone(),
                );
                let arrival = transfer.map_or_else(
                    Default::default,
                    |t| t.arrival_clock_time.clone(),
                );
                let change_minutes = departure.delta(&arrival);
                let platform = route
                    .lines
                    .get(i + 1)
                    .and_then(|next| next.boarding_platform.as_deref())
                    .unwrap_or("-");
                text.push_str(&format!(
                    "\n -{station}({line})\n  {departure}発({platform}番線 {change_minutes}分乗換)",
                    line = line.line_name,
                ));
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use domain::value_objects::ClockTime;
    use domain::{LineRecord, TransferRecord};

    use super::*;

    fn formatter() -> MessageFormatter {
        MessageFormatter::new("りか", "りゅーと")
    }

    fn line(index: u32, name: &str) -> LineRecord {
        LineRecord {
            sequence_index: index,
            line_name: name.to_string(),
            boarding_platform: None,
            alighting_platform: None,
        }
    }

    fn transfer(index: u32, station: &str, arrival: &str, departure: &str) -> TransferRecord {
        TransferRecord {
            sequence_index: index,
            station_name: station.to_string(),
            arrival_clock_time: ClockTime::new(arrival),
            departure_clock_time: ClockTime::new(departure),
        }
    }

    fn sample_route() -> RouteResult {
        RouteResult {
            id: "transit-1".to_string(),
            origin_station: "大船".to_string(),
            destination_station: "東京".to_string(),
            via_stations: vec![],
            departure_clock_time: ClockTime::new("08:00"),
            arrival_clock_time: ClockTime::new("08:50"),
            duration_text: "0時間50分".to_string(),
            transfer_count: 1,
            total_fare: 580,
            has_delay: None,
            lines: vec![line(0, "東海道本線"), line(1, "京浜東北線")],
            transfers: vec![
                transfer(0, "横浜", "08:20", "08:26"),
                transfer(1, "東京", "08:50", ""),
            ],
        }
    }

    #[test]
    fn test_forwarded_states_route_summary() {
        let text = formatter().format_forwarded(&sample_route());
        assert!(text.starts_with("りか様\n"));
        assert!(text.contains("りゅーと様からご伝言です"));
        assert!(text.contains("東京08:50見込み"));
        assert!(text.contains("* 大船08:00発"));
        assert!(text.contains("乗換1回"));
        assert!(text.contains("東海道本線"));
    }

    #[test]
    fn test_forwarded_without_lines_omits_line_name() {
        let route = RouteResult {
            lines: vec![],
            ..sample_route()
        };
        let text = formatter().format_forwarded(&route);
        assert!(text.ends_with("乗換1回"));
    }

    #[test]
    fn test_delay_marker_in_both_messages_when_delayed() {
        let route = RouteResult {
            has_delay: Some(true),
            ..sample_route()
        };
        let formatter = formatter();
        assert!(formatter.format_forwarded(&route).contains(DELAY_MARKER));
        assert!(formatter.format_confirmation(&route).contains(DELAY_MARKER));
    }

    #[test]
    fn test_delay_marker_absent_when_not_delayed() {
        let formatter = formatter();
        for has_delay in [None, Some(false)] {
            let route = RouteResult {
                has_delay,
                ..sample_route()
            };
            assert!(!formatter.format_forwarded(&route).contains(DELAY_MARKER));
            assert!(!formatter.format_confirmation(&route).contains(DELAY_MARKER));
        }
    }

    #[test]
    fn test_confirmation_lists_transfers_with_change_time() {
        let text = formatter().format_confirmation(&sample_route());
        assert!(text.contains("大船08:00発 (東海道本線)"));
        assert!(text.contains("東京08:50着 見込み"));
        assert!(text.contains("*********"));
        // 08:26 departure minus 08:20 arrival
        assert!(text.contains(" -横浜(東海道本線)\n  08:26発(-番線 6分乗換)"));
    }

    #[test]
    fn test_confirmation_never_renders_terminal_station_as_transfer() {
        let text = formatter().format_confirmation(&sample_route());
        assert!(!text.contains(" -東京"));
    }

    #[test]
    fn test_confirmation_without_transfers_has_no_transfer_lines() {
        let route = RouteResult {
            transfer_count: 0,
            lines: vec![line(0, "東海道本線")],
            transfers: vec![],
            ..sample_route()
        };
        let text = formatter().format_confirmation(&route);
        assert!(text.ends_with("*********"));
    }

    #[test]
    fn test_confirmation_shows_platform_when_known() {
        let mut route = sample_route();
        route.lines[1].boarding_platform = Some("4".to_string());
        let text = formatter().format_confirmation(&route);
        assert!(text.contains("(4番線 6分乗換)"));
    }

    #[test]
    fn test_confirmation_degrades_on_missing_transfer_record() {
        // more lines than transfer records; the gap renders as empty fields
        let route = RouteResult {
            transfer_count: 2,
            lines: vec![line(0, "A線"), line(1, "B線"), line(2, "C線")],
            transfers: vec![transfer(0, "横浜", "08:20", "08:26")],
            ..sample_route()
        };
        let text = formatter().format_confirmation(&route);
        assert!(text.contains(" -横浜(A線)"));
        assert!(text.contains(" -(B線)\n  発(-番線 0分乗換)"));
    }

    #[test]
    fn test_confirmation_change_time_crossing_midnight() {
        let route = RouteResult {
            transfer_count: 1,
            lines: vec![line(0, "終電線"), line(1, "始発線")],
            transfers: vec![transfer(0, "横浜", "23:50", "0:10")],
            ..sample_route()
        };
        let text = formatter().format_confirmation(&route);
        assert!(text.contains("20分乗換"));
    }
}
