// SPDX-License-Identifier: MPL-2.0
//! The polaroid deck shown while a track plays.
//!
//! A deck holds up to [`STACK_SIZE`] cards drawn from a shuffled copy of the
//! photo manifest, each with a small random tilt and offset. Advancing drops
//! the top card and slides the next manifest photo in at the bottom.

use crate::domain::catalog::Photo;
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of cards on the table at once.
pub const STACK_SIZE: usize = 5;

const MAX_ROTATION_DEG: f32 = 10.0;
const MAX_OFFSET_PX: f32 = 20.0;
const SLIDE_IN_OPACITY: f32 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct PhotoCard {
    pub id: u64,
    pub photo: Photo,
    pub rotation_deg: f32,
    pub offset: (f32, f32),
    pub z_index: u32,
    pub opacity: f32,
    /// Freshly added at the bottom of the deck.
    pub sliding_in: bool,
}

#[derive(Debug, Clone)]
pub struct PhotoStack {
    manifest: Vec<Photo>,
    cards: Vec<PhotoCard>,
    cursor: usize,
    next_id: u64,
}

impl PhotoStack {
    /// Deals the initial deck from a shuffled copy of `manifest`.
    pub fn new<R: Rng + ?Sized>(manifest: &[Photo], rng: &mut R) -> Self {
        let mut shuffled = manifest.to_vec();
        shuffled.shuffle(rng);

        let mut stack = Self {
            manifest: manifest.to_vec(),
            cards: Vec::with_capacity(STACK_SIZE),
            cursor: STACK_SIZE,
            next_id: 0,
        };

        for (i, photo) in shuffled.into_iter().take(STACK_SIZE).enumerate() {
            let card = stack.deal(photo, rng, stack_z(i), stack_opacity(i), false);
            stack.cards.push(card);
        }

        stack
    }

    /// Cards from top (index 0) to bottom.
    #[must_use]
    pub fn cards(&self) -> &[PhotoCard] {
        &self.cards
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Discards the top card and slides the next manifest photo in.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.manifest.is_empty() {
            return;
        }

        let next = self.manifest[self.cursor % self.manifest.len()].clone();

        if !self.cards.is_empty() {
            self.cards.remove(0);
        }
        for (i, card) in self.cards.iter_mut().enumerate() {
            card.z_index = stack_z(i);
            card.opacity = stack_opacity(i);
            card.sliding_in = false;
        }

        let card = self.deal(next, rng, 1, SLIDE_IN_OPACITY, true);
        self.cards.push(card);
        self.cursor += 1;
    }

    fn deal<R: Rng + ?Sized>(
        &mut self,
        photo: Photo,
        rng: &mut R,
        z_index: u32,
        opacity: f32,
        sliding_in: bool,
    ) -> PhotoCard {
        self.next_id += 1;
        PhotoCard {
            id: self.next_id,
            photo,
            rotation_deg: rng.random_range(-MAX_ROTATION_DEG..MAX_ROTATION_DEG),
            offset: (
                rng.random_range(-MAX_OFFSET_PX..MAX_OFFSET_PX),
                rng.random_range(-MAX_OFFSET_PX..MAX_OFFSET_PX),
            ),
            z_index,
            opacity,
            sliding_in,
        }
    }
}

fn stack_z(position: usize) -> u32 {
    (STACK_SIZE - position.min(STACK_SIZE)) as u32
}

fn stack_opacity(position: usize) -> f32 {
    1.0 - 0.1 * position as f32
}

/// Formats an ISO date for a polaroid caption, e.g. `Jun 28, 2014`.
///
/// Unparsable input is returned unchanged.
///
/// ```
/// use greeting_reel::application::photo_stack::caption_date;
///
/// assert_eq!(caption_date("2014-06-28"), "Jun 28, 2014");
/// assert_eq!(caption_date("summer"), "summer");
/// assert_eq!(caption_date(""), "");
/// ```
#[must_use]
pub fn caption_date(date: &str) -> String {
    if date.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%b %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}
