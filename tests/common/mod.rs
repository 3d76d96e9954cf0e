#![allow(dead_code)]

use std::collections::HashMap;

use carousel_wasm::{
    Backdrop, CarouselConfig, CarouselController, CarouselItems, ItemTransform, Stage, TickReport,
};

pub const FRAME_MS: f64 = 16.0;
const MAX_FRAMES: usize = 10_000;

#[derive(Debug, Default)]
pub struct RecordingStage {
    pub transforms: HashMap<usize, ItemTransform>,
    pub applied: usize,
    pub container_opacity: Option<f64>,
    pub centered: Vec<usize>,
}

impl Stage for RecordingStage {
    fn apply_transform(&mut self, index: usize, transform: &ItemTransform) {
        self.transforms.insert(index, *transform);
        self.applied += 1;
    }

    fn set_container_opacity(&mut self, opacity: f64) {
        self.container_opacity = Some(opacity);
    }

    fn mark_centered(&mut self, index: usize) {
        self.centered.push(index);
    }
}

#[derive(Debug, Default)]
pub struct RecordingBackdrop {
    pub total: usize,
    pub calls: Vec<(usize, f64)>,
}

impl RecordingBackdrop {
    pub fn with_images(total: usize) -> Self {
        Self {
            total,
            calls: Vec::new(),
        }
    }

    pub fn indices(&self) -> Vec<usize> {
        self.calls.iter().map(|(index, _)| *index).collect()
    }
}

impl Backdrop for RecordingBackdrop {
    fn total_images(&self) -> usize {
        self.total
    }

    fn set_background_image(&mut self, index: usize, transition_ms: f64) {
        self.calls.push((index, transition_ms));
    }
}

pub type TestCarousel = CarouselController<RecordingStage, RecordingBackdrop>;

pub fn items(n: usize) -> CarouselItems {
    const CATEGORIES: [&str; 3] = ["web", "3d", "motion"];
    (0..n)
        .map(|i| (format!("poster {i}"), CATEGORIES[i % CATEGORIES.len()], None))
        .collect()
}

pub fn carousel(n: usize, images: usize) -> TestCarousel {
    CarouselController::new(
        items(n),
        CarouselConfig::default(),
        1280.0,
        RecordingStage::default(),
        RecordingBackdrop::with_images(images),
    )
}

/// Tick at a fixed frame rate until nothing is animating.
pub fn drive<S: Stage, B: Backdrop>(
    carousel: &mut CarouselController<S, B>,
    now: &mut f64,
) -> Vec<TickReport> {
    let mut reports = Vec::new();
    for _ in 0..MAX_FRAMES {
        *now += FRAME_MS;
        let report = carousel.tick(*now);
        reports.push(report);
        if !report.animating {
            return reports;
        }
    }
    panic!("carousel still animating after {MAX_FRAMES} frames");
}
