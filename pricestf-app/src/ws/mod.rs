use std::collections::VecDeque;

use pricestf_api_types::Price;

pub(crate) mod price_feed;

/// The landing page keeps this many recent changes.
pub(crate) const FEED_CAPACITY: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FeedEventKind {
    PriceChanged,
}

/// A push event as the landing page holds it: newest first, capped at
/// [`FEED_CAPACITY`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FeedEntry {
    pub kind: FeedEventKind,
    pub record: Price,
}

pub(crate) fn push_feed_entry(feed: &mut VecDeque<FeedEntry>, entry: FeedEntry) {
    feed.push_front(entry);
    feed.truncate(FEED_CAPACITY);
}
