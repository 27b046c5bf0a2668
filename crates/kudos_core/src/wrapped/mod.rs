//! Yearly retrospective ("Wrapped") aggregation.
//!
//! # Responsibility
//! - Project persisted accomplishments into an ordered slide sequence.
//!
//! # Invariants
//! - Output is always `Intro`, zero or more entry slides, then `Outro`.
//! - Only entries in the reference's calendar year (in the reference's time
//!   zone) are included, ascending by date; equal dates keep input order.
//! - The projection never mutates its input and keeps no state.

mod slide;

pub use slide::{Slide, ThemedGradient};

use crate::model::accomplishment::Accomplishment;
use chrono::{DateTime, Datelike, TimeZone};

/// Builds the Wrapped slide sequence for the year containing `reference`.
pub fn build_slides<Tz: TimeZone>(
    entities: &[Accomplishment],
    reference: &DateTime<Tz>,
) -> Vec<Slide> {
    let year = reference.year();
    let zone = reference.timezone();

    let mut selected: Vec<&Accomplishment> = entities
        .iter()
        .filter(|item| item.date().with_timezone(&zone).year() == year)
        .collect();
    selected.sort_by_key(|item| item.date());

    let mut slides = Vec::with_capacity(selected.len() + 2);
    slides.push(Slide::Intro {
        year,
        count: selected.len(),
    });
    slides.extend(selected.into_iter().map(entry_slide));
    slides.push(Slide::Outro);
    slides
}

fn entry_slide(item: &Accomplishment) -> Slide {
    match item.photo_data() {
        Some(image) => Slide::Photo {
            image: image.to_vec(),
            caption: item.has_text().then(|| item.text().to_string()),
        },
        None => Slide::Text {
            text: item.text().to_string(),
            gradient_key: item.color().to_string(),
        },
    }
}
