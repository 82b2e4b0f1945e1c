use chrono::{DateTime, Datelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Opaque order identifier as issued by the API; never parsed client-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Order lifecycle status. The server enforces no transition ordering; an
/// operator may set any of the six options at any time. `Unknown` absorbs
/// values the server sends that this client does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Penjemputan,
    Pencucian,
    Selesai,
    Batal,
    Kesalahan,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// The operator-settable options, in the order the dashboard offers them.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Penjemputan,
        OrderStatus::Pencucian,
        OrderStatus::Selesai,
        OrderStatus::Batal,
        OrderStatus::Kesalahan,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Penjemputan => "penjemputan",
            OrderStatus::Pencucian => "pencucian",
            OrderStatus::Selesai => "selesai",
            OrderStatus::Batal => "batal",
            OrderStatus::Kesalahan => "kesalahan",
            OrderStatus::Unknown => "unknown",
        }
    }

    pub fn color(self) -> StatusColor {
        match self {
            OrderStatus::Pending => StatusColor::Warning,
            OrderStatus::Penjemputan => StatusColor::Info,
            OrderStatus::Pencucian => StatusColor::Primary,
            OrderStatus::Selesai => StatusColor::Success,
            OrderStatus::Batal => StatusColor::Error,
            OrderStatus::Kesalahan => StatusColor::Neutral,
            OrderStatus::Unknown => StatusColor::Default,
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown order status '{0}'")]
pub struct UnknownStatus(pub String);

/// Display color class for a status badge. Purely presentational; the
/// front-end maps these onto its own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Warning,
    Info,
    Primary,
    Success,
    Error,
    Neutral,
    Default,
}

const WEEKDAYS_ID: [&str; 7] = [
    "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu",
];

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Formats a timestamp the way the dashboard displays dates, e.g.
/// "Senin, 05 Januari 2026". Locale is fixed to id-ID.
pub fn format_date_id(timestamp: &DateTime<Utc>) -> String {
    let weekday = match timestamp.weekday() {
        Weekday::Mon => WEEKDAYS_ID[0],
        Weekday::Tue => WEEKDAYS_ID[1],
        Weekday::Wed => WEEKDAYS_ID[2],
        Weekday::Thu => WEEKDAYS_ID[3],
        Weekday::Fri => WEEKDAYS_ID[4],
        Weekday::Sat => WEEKDAYS_ID[5],
        Weekday::Sun => WEEKDAYS_ID[6],
    };
    let month = MONTHS_ID[timestamp.month0() as usize];
    format!(
        "{weekday}, {:02} {month} {}",
        timestamp.day(),
        timestamp.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_form() {
        for status in OrderStatus::ALL {
            let json = serde_json::to_string(&status).expect("serialize");
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: OrderStatus = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, status);
        }
    }

    #[test]
    fn unrecognized_status_deserializes_as_unknown() {
        let status: OrderStatus = serde_json::from_str("\"diantar\"").expect("deserialize");
        assert_eq!(status, OrderStatus::Unknown);
        assert_eq!(status.color(), StatusColor::Default);
    }

    #[test]
    fn color_mapping_matches_dashboard_palette() {
        assert_eq!(OrderStatus::Pending.color(), StatusColor::Warning);
        assert_eq!(OrderStatus::Penjemputan.color(), StatusColor::Info);
        assert_eq!(OrderStatus::Pencucian.color(), StatusColor::Primary);
        assert_eq!(OrderStatus::Selesai.color(), StatusColor::Success);
        assert_eq!(OrderStatus::Batal.color(), StatusColor::Error);
        assert_eq!(OrderStatus::Kesalahan.color(), StatusColor::Neutral);
    }

    #[test]
    fn formats_dates_in_fixed_indonesian_locale() {
        let ts: DateTime<Utc> = "2024-01-01T09:30:00Z".parse().expect("timestamp");
        assert_eq!(format_date_id(&ts), "Senin, 01 Januari 2024");

        let ts: DateTime<Utc> = "2025-12-28T00:00:00Z".parse().expect("timestamp");
        assert_eq!(format_date_id(&ts), "Minggu, 28 Desember 2025");
    }
}
