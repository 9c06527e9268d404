//! Read-only views over a leaderboard snapshot: filtering and spotlight.

use std::fmt;
use std::str::FromStr;

use crate::models::{Trader, TraderTag};

/// Tag filter offered on the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagFilter {
    #[default]
    All,
    Only(TraderTag),
}

impl TagFilter {
    pub fn matches(&self, trader: &Trader) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Only(tag) => trader.has_tag(*tag),
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagFilter::All => f.pad("ALL"),
            TagFilter::Only(tag) => f.pad(&tag.as_str().to_uppercase()),
        }
    }
}

impl FromStr for TagFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(TagFilter::All);
        }
        match s.parse::<TraderTag>()? {
            TraderTag::Trader => anyhow::bail!("Filter must be one of ALL, WHALE, DEGEN, SAFE, ALPHA"),
            tag => Ok(TagFilter::Only(tag)),
        }
    }
}

/// Address search combined with a tag filter.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardFilter {
    pub search: String,
    pub tag: TagFilter,
}

impl LeaderboardFilter {
    pub fn new(search: impl Into<String>, tag: TagFilter) -> Self {
        Self {
            search: search.into(),
            tag,
        }
    }

    pub fn matches(&self, trader: &Trader) -> bool {
        trader.matches_search(&self.search) && self.tag.matches(trader)
    }

    /// Matching traders in their original order.
    pub fn apply<'a>(&self, traders: &'a [Trader]) -> Vec<&'a Trader> {
        traders.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Top `n` traders by P&L, largest first.
pub fn top_gainers(traders: &[Trader], n: usize) -> Vec<&Trader> {
    let mut sorted: Vec<&Trader> = traders.iter().collect();
    sorted.sort_by(|a, b| b.pnl.partial_cmp(&a.pnl).unwrap_or(std::cmp::Ordering::Equal));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::LeaderboardGenerator;
    use crate::models::TimeRange;

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<TagFilter>().unwrap(), TagFilter::All);
        assert_eq!(
            "Whale".parse::<TagFilter>().unwrap(),
            TagFilter::Only(TraderTag::Whale)
        );
        assert!("trader".parse::<TagFilter>().is_err());
        assert!("moon".parse::<TagFilter>().is_err());
    }

    #[test]
    fn test_filter_by_tag() {
        let traders = LeaderboardGenerator::from_seed(21).generate(100, TimeRange::Month);
        let filter = LeaderboardFilter::new("", TagFilter::Only(TraderTag::Whale));

        let whales = filter.apply(&traders);
        assert!(!whales.is_empty());
        assert!(whales.iter().all(|t| t.has_tag(TraderTag::Whale)));
        for pair in whales.windows(2) {
            assert!(pair[0].rank < pair[1].rank);
        }

        let everyone = LeaderboardFilter::default().apply(&traders);
        assert_eq!(everyone.len(), traders.len());
    }

    #[test]
    fn test_filter_by_search() {
        let traders = LeaderboardGenerator::from_seed(4).generate(30, TimeRange::Month);
        let needle = traders[7].address[2..10].to_uppercase();

        let hits = LeaderboardFilter::new(needle, TagFilter::All).apply(&traders);
        assert!(hits.iter().any(|t| t.rank == 8));
    }

    #[test]
    fn test_top_gainers() {
        let traders = LeaderboardGenerator::from_seed(13).generate(50, TimeRange::Week);
        let top = top_gainers(&traders, 3);

        assert_eq!(top.len(), 3);
        assert!(top[0].pnl >= top[1].pnl && top[1].pnl >= top[2].pnl);
        let best = traders.iter().map(|t| t.pnl).fold(f64::MIN, f64::max);
        assert_eq!(top[0].pnl, best);

        assert_eq!(top_gainers(&traders[..2], 3).len(), 2);
    }

    #[test]
    fn test_filter_label_respects_width() {
        assert_eq!(format!("[{:<6}]", TagFilter::All), "[ALL   ]");
        assert_eq!(format!("[{:>6}]", TagFilter::Only(TraderTag::Degen)), "[ DEGEN]");
    }
}
