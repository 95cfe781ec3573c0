//! Line classification.
//!
//! Signatures are checked in a fixed priority order and the first match
//! wins, so a line is only ever one kind of event. Fields are extracted only
//! for the kinds that carry them.

use crate::domain::{Event, SolvedOrder};
use crate::port::{Field, FieldExtractor};

/// Kinds of line the solver emits that we care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    AuctionCompleted,
    OrderProcessed,
    OrderFailed,
    OrderSolved,
}

/// Priority-ordered signature table.
pub const SIGNATURES: [(Signature, &str); 4] = [
    (Signature::AuctionCompleted, "Curve LP solver completed"),
    (Signature::OrderProcessed, "processing Curve LP order"),
    (Signature::OrderFailed, "failed to solve order"),
    (Signature::OrderSolved, "solved order"),
];

/// First signature contained in `line`, if any.
#[must_use]
pub fn match_signature(line: &str) -> Option<Signature> {
    SIGNATURES
        .iter()
        .find(|(_, marker)| line.contains(marker))
        .map(|(signature, _)| *signature)
}

/// Classify one raw line. Never fails: anything unknown is `Unrecognized`.
pub fn classify(line: &str, extractor: &dyn FieldExtractor) -> Event {
    match match_signature(line) {
        Some(Signature::AuctionCompleted) => Event::AuctionCompleted {
            solution_count: extractor
                .extract(line, Field::NumSolutions)
                .and_then(|n| n.parse().ok())
                .unwrap_or(0),
        },
        Some(Signature::OrderProcessed) => Event::OrderProcessed,
        Some(Signature::OrderFailed) => Event::OrderFailed,
        Some(Signature::OrderSolved) => Event::OrderSolved(extract_solved(line, extractor)),
        None => Event::Unrecognized,
    }
}

fn extract_solved(line: &str, extractor: &dyn FieldExtractor) -> SolvedOrder {
    SolvedOrder {
        order_id: extractor.extract_or_placeholder(line, Field::OrderUid),
        sell_token: extractor.extract_or_placeholder(line, Field::SellToken),
        buy_token: extractor.extract_or_placeholder(line, Field::BuyToken),
        sell_amount: extractor.extract_or_placeholder(line, Field::SellAmount),
        buy_amount: extractor.extract_or_placeholder(line, Field::BuyAmount),
        timestamp: extractor.extract_or_placeholder(line, Field::Timestamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::extractor::{JsonExtractor, RegexExtractor};

    fn regex() -> RegexExtractor {
        RegexExtractor::new().unwrap()
    }

    #[test]
    fn test_each_signature() {
        let ex = regex();
        assert_eq!(
            classify("INFO Curve LP solver completed num_solutions=3", &ex),
            Event::AuctionCompleted { solution_count: 3 }
        );
        assert_eq!(
            classify("DEBUG processing Curve LP order order_uid=0x1", &ex),
            Event::OrderProcessed
        );
        assert_eq!(
            classify("WARN failed to solve order order_uid=0x1 err=Timeout", &ex),
            Event::OrderFailed
        );
        assert!(matches!(
            classify("INFO solved order order_uid=0x1", &ex),
            Event::OrderSolved(_)
        ));
    }

    #[test]
    fn test_first_signature_wins() {
        let ex = regex();
        let line = "Curve LP solver completed num_solutions=1 after solved order";
        assert_eq!(
            classify(line, &ex),
            Event::AuctionCompleted { solution_count: 1 }
        );

        let line = "processing Curve LP order; previous: failed to solve order";
        assert_eq!(classify(line, &ex), Event::OrderProcessed);
    }

    #[test]
    fn test_missing_solution_count_is_zero() {
        let ex = regex();
        assert_eq!(
            classify("Curve LP solver completed", &ex),
            Event::AuctionCompleted { solution_count: 0 }
        );
        assert_eq!(
            classify("Curve LP solver completed num_solutions=0", &ex),
            Event::AuctionCompleted { solution_count: 0 }
        );
    }

    #[test]
    fn test_unrecognized_lines() {
        let ex = regex();
        assert_eq!(classify("", &ex), Event::Unrecognized);
        assert_eq!(classify("INFO fetching Curve route", &ex), Event::Unrecognized);
        assert_eq!(classify("\u{0}\u{1}garbage", &ex), Event::Unrecognized);
    }

    #[test]
    fn test_solved_order_with_missing_fields_uses_placeholders() {
        let event = classify("INFO solved order order_uid=0xdead", &regex());
        let Event::OrderSolved(order) = event else {
            panic!("expected solved order");
        };
        assert_eq!(order.order_id, "0xdead");
        assert_eq!(order.sell_token, "???");
        assert_eq!(order.buy_token, "???");
        assert_eq!(order.sell_amount, "0");
        assert_eq!(order.buy_amount, "0");
        assert_eq!(order.timestamp, "???");
    }

    #[test]
    fn test_json_lines_classify_the_same() {
        let line = r#"{"timestamp":"2024-01-01T00:00:00Z","fields":{"message":"Curve LP solver completed","num_solutions":2}}"#;
        assert_eq!(
            classify(line, &JsonExtractor::new()),
            Event::AuctionCompleted { solution_count: 2 }
        );
    }
}
