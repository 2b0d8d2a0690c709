//! Utilities for date and time formatting
//!
//! Dates are shown in the Brazilian DD/MM/YYYY convention.

use contracts::domain::a001_pedido::aggregate::OrderTimestamp;

/// Format an order timestamp as DD/MM/YYYY HH:MM (UTC)
/// Example: "2026-01-31T12:30:00.000+00:00" -> "31/01/2026 12:30"
pub fn format_timestamp(ts: &OrderTimestamp) -> String {
    match ts.to_datetime() {
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => match ts {
            OrderTimestamp::Text(raw) => raw.clone(),
            OrderTimestamp::Millis(ms) => ms.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        let ts = OrderTimestamp::Text("2026-01-31T12:30:00.000+00:00".into());
        assert_eq!(format_timestamp(&ts), "31/01/2026 12:30");
        assert_eq!(format_timestamp(&OrderTimestamp::Millis(0)), "01/01/1970 00:00");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_timestamp(&OrderTimestamp::Text("ontem".into())), "ontem");
        assert_eq!(format_timestamp(&OrderTimestamp::Millis(i64::MAX)), i64::MAX.to_string());
    }
}
