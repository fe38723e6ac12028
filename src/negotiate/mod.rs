//! Content negotiation.
//!
//! [`negotiate`] implements quality-aware selection over an ordered list
//! of offered media types. [`Format::from_accept`] applies it to the two
//! representations an error can be rendered in.

use strum_macros::{Display, EnumString, IntoStaticStr};

mod accept;

pub use accept::{MediaRange, parse_accept};

/// How well one media range matches one offer.
#[derive(Debug, Clone, Copy)]
struct Priority {
    quality: f32,
    specificity: u8,
    range_index: usize,
    offer_index: usize,
}

/// Pick the best offer for an `Accept` header.
///
/// Each offer is scored by its most specific matching range (type 4,
/// subtype 2, parameters 1). Offers scoring `q=0` are unacceptable. The
/// winner has the highest quality, then specificity, then the earliest
/// range in the header, then the earliest position in `offers`.
///
/// An absent header matches nothing.
pub fn negotiate<'a>(accept: Option<&str>, offers: &[&'a str]) -> Option<&'a str> {
    let ranges = parse_accept(accept?);

    offers
        .iter()
        .enumerate()
        .filter_map(|(offer_index, offer)| priority(offer, offer_index, &ranges))
        .filter(|p| p.quality > 0.0)
        .min_by(|a, b| {
            b.quality
                .total_cmp(&a.quality)
                .then(b.specificity.cmp(&a.specificity))
                .then(a.range_index.cmp(&b.range_index))
                .then(a.offer_index.cmp(&b.offer_index))
        })
        .map(|p| offers[p.offer_index])
}

fn priority(offer: &str, offer_index: usize, ranges: &[MediaRange]) -> Option<Priority> {
    let (kind, subtype) = accept::parse_type(offer)?;

    ranges
        .iter()
        .filter_map(|range| {
            specificity(&kind, &subtype, range).map(|specificity| Priority {
                quality: range.quality,
                specificity,
                range_index: range.index,
                offer_index,
            })
        })
        .max_by(|a, b| {
            a.specificity
                .cmp(&b.specificity)
                .then(a.quality.total_cmp(&b.quality))
        })
}

fn specificity(kind: &str, subtype: &str, range: &MediaRange) -> Option<u8> {
    let mut score = 0;

    if range.kind == kind {
        score |= 4;
    } else if range.kind != "*" {
        return None;
    }

    if range.subtype == subtype {
        score |= 2;
    } else if range.subtype != "*" {
        return None;
    }

    // Offers carry no parameters, so only wildcard parameters can match.
    if !range.params.is_empty() {
        if range.params.iter().all(|(_, value)| value == "*") {
            score |= 1;
        } else {
            return None;
        }
    }

    Some(score)
}

/// The representations an error response can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum Format {
    #[strum(serialize = "text/html")]
    Html,
    #[strum(serialize = "application/json")]
    Json,
}

impl Format {
    /// Offered media types. JSON comes first so that ties, including a
    /// bare `*/*`, resolve to JSON.
    const OFFERS: [&'static str; 2] = ["application/json", "text/html"];

    /// Negotiate a format. HTML only when the client prefers `text/html`;
    /// JSON otherwise, including for an absent header.
    pub fn from_accept(accept: Option<&str>) -> Self {
        match negotiate(accept, &Self::OFFERS).and_then(|offer| offer.parse().ok()) {
            Some(Format::Html) => Format::Html,
            _ => Format::Json,
        }
    }

    pub fn content_type(self) -> &'static str {
        self.into()
    }
}
