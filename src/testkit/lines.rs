//! Canonical solver log lines.

pub const SOLVED: &str = "2024-01-01T00:00:00Z INFO \"solved order\" order_uid=0xabc123 \
    sell_token=TokenAddress(0xSELL) buy_token=TokenAddress(0xBUY) sell_amount=1000 buy_amount=2000";

pub const SOLVED_LEDGER_LINE: &str =
    "2024-01-01T00:00:00Z TRADE uid=0xabc123 sell=0xSELL amt=1000 buy=0xBUY amt=2000";

pub const AUCTION_3: &str =
    "2024-01-01T00:00:01Z INFO solvers: Curve LP solver completed num_solutions=3";

pub const AUCTION_0: &str =
    "2024-01-01T00:00:02Z INFO solvers: Curve LP solver completed num_solutions=0";

pub const AUCTION_NO_COUNT: &str = "2024-01-01T00:00:03Z INFO solvers: Curve LP solver completed";

pub const PROCESSING: &str = "2024-01-01T00:00:04Z DEBUG solvers: processing Curve LP order \
    order_uid=0xabc123 sell_token=TokenAddress(0xSELL) buy_token=TokenAddress(0xBUY)";

pub const FAILED: &str =
    "2024-01-01T00:00:05Z WARN solvers: failed to solve order order_uid=0xdef err=QuoteDeviation";

pub const NOISE: &str = "2024-01-01T00:00:06Z DEBUG solvers: fetching Curve route url=https://api";
