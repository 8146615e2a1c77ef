//! Outcome message rendering.

use fast_core::{TradeOutcome, TradeSignal};

/// Rendering style of the delivered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageFormat {
    /// Plain text, no markup.
    Plain,
    /// HTML markup (Telegram `parse_mode: "HTML"`).
    #[default]
    Markup,
}

/// Render one terminal outcome as a human-readable message.
pub fn format_outcome(
    signal: &TradeSignal,
    outcome: &TradeOutcome,
    format: MessageFormat,
) -> String {
    let header = if outcome.is_purchased() {
        "🚨 Trade Executed"
    } else {
        "❌ Trade Failed"
    };
    let timestamp = chrono::Utc::now().to_rfc3339();

    match format {
        MessageFormat::Plain => {
            let mut text = format!(
                "{header}\nSignal: {}\nPair: {}\nDuration: {}\nStatus: {} ({} step)\nDetail: {}",
                signal.direction,
                signal.instrument,
                outcome.duration,
                outcome.status,
                outcome.step,
                outcome.detail,
            );
            if let Some(tag) = &signal.correlation_tag {
                text.push_str(&format!("\nTag: {tag}"));
            }
            text.push_str(&format!("\nTime: {timestamp}"));
            text
        }
        MessageFormat::Markup => {
            let mut text = format!(
                "{header}\n<b>Signal:</b> <b>{}</b>\n<b>Pair:</b> <b>{}</b>\n\
                 <b>Duration:</b> <b>{}</b>\n<b>Status:</b> <b>{} ({} step)</b>\n\
                 <b>Detail:</b> <code>{}</code>",
                signal.direction,
                escape_html(&signal.instrument),
                outcome.duration,
                outcome.status,
                outcome.step,
                escape_html(&outcome.detail),
            );
            if let Some(tag) = &signal.correlation_tag {
                text.push_str(&format!("\n<b>Tag:</b> <code>{}</code>", escape_html(tag)));
            }
            text.push_str(&format!("\n<b>Time:</b> <code>{timestamp}</code>"));
            text
        }
    }
}

/// Escape the three characters Telegram's HTML mode reserves.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fast_core::{Direction, NegotiationStep, PurchaseReceipt};
    use rust_decimal_macros::dec;

    fn signal() -> TradeSignal {
        TradeSignal {
            direction: Direction::Buy,
            instrument: "frxUSDJPY".to_string(),
            amount: dec!(10),
            durations: vec![60],
            correlation_tag: Some("tv-42".to_string()),
        }
    }

    #[test]
    fn test_plain_purchased_message() {
        let outcome = TradeOutcome::purchased(60, PurchaseReceipt::default());
        let text = format_outcome(&signal(), &outcome, MessageFormat::Plain);
        assert!(text.starts_with("🚨 Trade Executed"));
        assert!(text.contains("Signal: BUY"));
        assert!(text.contains("Pair: frxUSDJPY"));
        assert!(text.contains("Duration: 60"));
        assert!(text.contains("Status: purchased"));
        assert!(text.contains("Tag: tv-42"));
        assert!(!text.contains("<b>"));
    }

    #[test]
    fn test_markup_failed_message() {
        let outcome = TradeOutcome::failed(
            120,
            NegotiationStep::Propose,
            "proposal rejected: ContractBuyValidationError",
        );
        let text = format_outcome(&signal(), &outcome, MessageFormat::Markup);
        assert!(text.starts_with("❌ Trade Failed"));
        assert!(text.contains("<b>Signal:</b> <b>BUY</b>"));
        assert!(text.contains("ContractBuyValidationError"));
        assert!(text.contains("propose step"));
    }

    #[test]
    fn test_markup_escapes_detail() {
        let outcome = TradeOutcome::failed(60, NegotiationStep::Purchase, "price < stake & odd");
        let text = format_outcome(&signal(), &outcome, MessageFormat::Markup);
        assert!(text.contains("price &lt; stake &amp; odd"));
    }
}
