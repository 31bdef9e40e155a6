// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for gallery navigation.
//!
//! Measures the performance of:
//! - Carousel paging (swipe and wheel input)
//! - Coordinator round trips (activate, pump, exit overlay)
//! - Photo stack advancing

use criterion::{criterion_group, criterion_main, Criterion};
use greeting_reel::application::port::MediaEventKind;
use greeting_reel::application::testing::{ManualClock, ScriptedElement};
use greeting_reel::application::{
    GalleryCarousel, NavigationCoordinator, PhotoStack, PlaybackController,
};
use greeting_reel::domain::catalog::Catalog;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;

/// Benchmark carousel paging across the built-in catalog.
fn bench_carousel(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_navigation");
    let len = Catalog::default().len();

    group.bench_function("swipe_through_gallery", |b| {
        b.iter(|| {
            let mut carousel = GalleryCarousel::new(len);
            for _ in 0..len {
                carousel.swipe_begin(400.0);
                black_box(carousel.swipe_end(100.0));
            }
            for _ in 0..len {
                black_box(carousel.wheel(-1.0));
            }
            black_box(carousel.page_offset());
        });
    });

    group.finish();
}

/// Benchmark a full activate/play/exit cycle on every normal entry.
fn bench_coordinator(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_navigation");
    let catalog = Catalog::default();

    group.bench_function("activate_and_exit_all", |b| {
        b.iter(|| {
            let mut nav = NavigationCoordinator::new(
                catalog.clone(),
                PlaybackController::new(ScriptedElement::new()),
            );
            let mut clock = ManualClock::new();
            let _ = nav.touch();

            for index in 0..catalog.len() {
                if nav.activate(index, &mut clock).is_err() {
                    continue;
                }
                let element = nav.playback_mut().element_mut();
                element.emit(MediaEventKind::Ready);
                element.emit(MediaEventKind::PlayStarted);
                black_box(nav.pump_media());
                let _ = nav.exit_overlay();
            }
            black_box(nav.state());
        });
    });

    group.finish();
}

/// Benchmark dealing and cycling the polaroid deck.
fn bench_photo_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_navigation");
    let catalog = Catalog::default();

    group.bench_function("photo_stack_advance", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| {
            let mut stack = PhotoStack::new(catalog.photos(), &mut rng);
            for _ in 0..catalog.photos().len() {
                stack.advance(&mut rng);
            }
            black_box(stack.cards().len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_carousel, bench_coordinator, bench_photo_stack);
criterion_main!(benches);
