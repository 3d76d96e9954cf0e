//! The carousel state machine.
//!
//! One motion runs at a time. Single-step moves issued while a motion is
//! in flight are queued (coalesced by target) and drained in FIFO order as
//! each motion completes; fast scrolls issued while busy are dropped. The
//! host drives everything through [`CarouselController::tick`] once per
//! animation frame.

use std::collections::VecDeque;
use std::f64::consts::PI;

use crate::config::CarouselConfig;
use crate::easing::Easing;
use crate::entrance::{self, EntrancePlan};
use crate::item::CarouselItems;
use crate::layout::{self, ItemTransform, LayoutParams};
use crate::ring;
use crate::stage::{Backdrop, Stage};
use crate::tween::Tween;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Transitioning,
    EntranceAnimating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A single-step animation began immediately.
    Started,
    Queued,
    /// The same target was already waiting in the queue.
    Coalesced,
    /// Already centered on the target with nothing in flight.
    Unchanged,
    /// The entrance sweep owns the carousel.
    Rejected,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    Started { steps: i64 },
    Busy,
    Unchanged,
    Rejected,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub target: usize,
    /// +1 or -1; drives background stepping.
    pub direction: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// A motion is still running after this frame.
    pub animating: bool,
    /// A move or fast scroll (including its settle) completed this frame.
    pub transition_finished: bool,
    /// The entrance sweep completed this frame; input may be attached.
    pub entrance_finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntranceStatus {
    NotRun,
    Running,
    Done,
}

struct StepMotion {
    from: Vec<ItemTransform>,
    to: Vec<ItemTransform>,
    tween: Tween,
}

struct SweepMotion {
    origin: usize,
    target: usize,
    steps: i64,
    tween: Tween,
    background_origin: i64,
    background_shown: i64,
}

struct SettleMotion {
    index: usize,
    resting: ItemTransform,
    direction: f64,
    tween: Tween,
}

enum EntrancePhase {
    FadeIn {
        container: Tween,
        items: Vec<(Tween, ItemTransform)>,
    },
    Sweep(StepMotion),
}

struct EntranceMotion {
    phase: EntrancePhase,
    remaining: VecDeque<f64>,
}

enum Motion {
    Idle,
    Step(StepMotion),
    FastScroll(SweepMotion),
    Settle(SettleMotion),
    Entrance(EntranceMotion),
}

pub struct CarouselController<S, B> {
    items: CarouselItems,
    config: CarouselConfig,
    params: LayoutParams,
    stage: S,
    backdrop: B,
    center: usize,
    last_center: usize,
    background_index: usize,
    pending: VecDeque<MoveRequest>,
    motion: Motion,
    rendered: Vec<ItemTransform>,
    entrance: EntranceStatus,
}

impl<S: Stage, B: Backdrop> CarouselController<S, B> {
    pub fn new(
        items: CarouselItems,
        config: CarouselConfig,
        viewport_width: f64,
        stage: S,
        backdrop: B,
    ) -> Self {
        let params = LayoutParams::for_viewport(&config.geometry, viewport_width);
        let rendered = vec![ItemTransform::HIDDEN; items.len()];
        let mut controller = Self {
            items,
            config,
            params,
            stage,
            backdrop,
            center: 0,
            last_center: 0,
            background_index: 0,
            pending: VecDeque::new(),
            motion: Motion::Idle,
            rendered,
            entrance: EntranceStatus::NotRun,
        };
        controller.settle_at(0);
        controller
    }

    /// Place the carousel on `center` without animation.
    pub fn with_initial_center(mut self, center: i64) -> Self {
        if !self.items.is_empty() {
            self.settle_at(ring::normalize(center, self.items.len()));
        }
        self
    }

    pub fn center(&self) -> usize {
        self.center
    }

    pub fn last_center(&self) -> usize {
        self.last_center
    }

    pub fn background_index(&self) -> usize {
        self.background_index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &CarouselItems {
        &self.items
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    pub fn backdrop(&self) -> &B {
        &self.backdrop
    }

    /// Last transform handed to the stage for `index`.
    pub fn rendered(&self, index: usize) -> Option<&ItemTransform> {
        self.rendered.get(index)
    }

    pub fn pending(&self) -> impl Iterator<Item = &MoveRequest> {
        self.pending.iter()
    }

    pub fn state(&self) -> ControllerState {
        match self.motion {
            Motion::Idle => ControllerState::Idle,
            Motion::Entrance(_) => ControllerState::EntranceAnimating,
            Motion::Step(_) | Motion::FastScroll(_) | Motion::Settle(_) => {
                ControllerState::Transitioning
            }
        }
    }

    pub fn is_moving(&self) -> bool {
        self.state() == ControllerState::Transitioning
    }

    /// Where the carousel will rest once the running motion and every
    /// queued move have finished. Relative gestures step from here.
    pub fn destination(&self) -> usize {
        if let Some(request) = self.pending.back() {
            return request.target;
        }
        match &self.motion {
            Motion::FastScroll(sweep) => sweep.target,
            _ => self.center,
        }
    }

    /// False only while the entrance sweep is running.
    pub fn is_interactive(&self) -> bool {
        self.entrance != EntranceStatus::Running
    }

    pub fn entrance_complete(&self) -> bool {
        self.entrance == EntranceStatus::Done
    }

    pub fn move_to(&mut self, target: i64, direction: Option<i32>) -> MoveOutcome {
        let n = self.items.len();
        if n == 0 {
            log::debug!("move_to({target}) ignored: carousel is empty");
            return MoveOutcome::Empty;
        }
        if !self.is_interactive() {
            log::debug!("move_to({target}) rejected during entrance");
            return MoveOutcome::Rejected;
        }
        let target = ring::normalize(target, n);
        let direction = direction
            .map(i32::signum)
            .filter(|d| *d != 0)
            .unwrap_or_else(|| self.inferred_direction(target));

        if self.is_moving() {
            if self.pending.iter().any(|req| req.target == target) {
                return MoveOutcome::Coalesced;
            }
            log::debug!("carousel busy, queueing move to {target}");
            self.pending.push_back(MoveRequest { target, direction });
            return MoveOutcome::Queued;
        }
        if target == self.center {
            return MoveOutcome::Unchanged;
        }
        self.motion = Motion::Step(self.begin_step(target, direction, None));
        MoveOutcome::Started
    }

    pub fn fast_scroll(&mut self, target: usize) -> ScrollOutcome {
        let n = self.items.len();
        if n == 0 {
            log::debug!("fast_scroll({target}) ignored: carousel is empty");
            return ScrollOutcome::Empty;
        }
        if !self.is_interactive() {
            log::debug!("fast_scroll({target}) rejected during entrance");
            return ScrollOutcome::Rejected;
        }
        if self.is_moving() {
            log::debug!("fast_scroll({target}) dropped: carousel busy");
            return ScrollOutcome::Busy;
        }
        let target = target % n;
        if target == self.center {
            return ScrollOutcome::Unchanged;
        }

        let steps = ring::shortest_steps(self.center, target, n);
        let timing = &self.config.timing;
        let duration = (timing.fast_base_ms + timing.fast_per_step_ms * steps.unsigned_abs() as f64)
            .min(timing.fast_max_ms);
        log::debug!(
            "fast scroll {} -> {} ({} steps, {:.0}ms)",
            self.center,
            target,
            steps,
            duration
        );

        self.last_center = self.center;
        let background_origin = self.background_index as i64;
        self.motion = Motion::FastScroll(SweepMotion {
            origin: self.center,
            target,
            steps,
            tween: Tween::new(0.0, steps as f64, duration, timing.fast_ease),
            background_origin,
            background_shown: background_origin,
        });
        ScrollOutcome::Started { steps }
    }

    /// Fast scroll to the first poster in `label`. `None` when no poster
    /// carries that category.
    pub fn jump_to_category(&mut self, label: &str) -> Option<ScrollOutcome> {
        let Some(index) = self.items.first_in_category(label) else {
            log::debug!("no poster in category {label:?}");
            return None;
        };
        Some(self.fast_scroll(index))
    }

    /// Start the one-time startup sweep. Returns false when it has already
    /// run, the carousel is empty, or a motion is in flight.
    pub fn run_entrance_animation(&mut self) -> bool {
        let n = self.items.len();
        if n == 0 || self.entrance != EntranceStatus::NotRun || !matches!(self.motion, Motion::Idle)
        {
            return false;
        }
        let timing = self.config.timing.entrance.clone();
        let plan = EntrancePlan::new(self.center, n, &timing);
        log::info!(
            "carousel entrance: {} -> {} over {} steps",
            plan.start_center,
            plan.target_center,
            plan.total_steps()
        );

        self.center = plan.start_center;
        self.last_center = plan.start_center;
        self.stage.mark_centered(plan.start_center);
        let rewind = -(plan.total_steps() as i64) * self.background_steps();
        self.advance_background(rewind, 0.0);

        let resting = self.resting_layout(plan.start_center);
        for (index, transform) in resting.iter().enumerate() {
            self.apply(index, transform.with_opacity(0.0));
        }
        self.stage.set_container_opacity(0.0);

        let items = resting
            .iter()
            .enumerate()
            .map(|(index, transform)| {
                let rel = ring::relative_offset(index, plan.start_center as f64, n);
                let tween = Tween::new(0.0, transform.opacity, timing.item_fade_ms, Easing::Power2Out)
                    .with_delay(entrance::stagger_delay(rel, timing.stagger_ms));
                (tween, *transform)
            })
            .collect();

        self.entrance = EntranceStatus::Running;
        self.motion = Motion::Entrance(EntranceMotion {
            phase: EntrancePhase::FadeIn {
                container: Tween::new(0.0, 1.0, timing.container_fade_ms, Easing::Power2Out),
                items,
            },
            remaining: plan.step_ms.into(),
        });
        true
    }

    /// Recompute geometry for a new viewport. Idle carousels re-render at
    /// once. A running motion retargets whatever resting layout it will
    /// land on; a fast scroll reads the new params on its next frame.
    pub fn resize(&mut self, viewport_width: f64, _viewport_height: f64) {
        self.params = LayoutParams::for_viewport(&self.config.geometry, viewport_width);
        if matches!(self.motion, Motion::Idle) {
            self.render_at(self.center as f64);
            return;
        }
        let layout = self.resting_layout(self.center);
        match &mut self.motion {
            Motion::Step(step)
            | Motion::Entrance(EntranceMotion {
                phase: EntrancePhase::Sweep(step),
                ..
            }) => step.to = layout,
            Motion::Entrance(EntranceMotion {
                phase: EntrancePhase::FadeIn { items, .. },
                ..
            }) => {
                for ((_, resting), transform) in items.iter_mut().zip(layout) {
                    *resting = transform;
                }
            }
            Motion::Settle(settle) => {
                if let Some(resting) = layout.get(settle.index) {
                    settle.resting = *resting;
                }
            }
            Motion::Idle | Motion::FastScroll(_) => {}
        }
    }

    /// Advance every running tween to `now_ms` and apply the frame.
    pub fn tick(&mut self, now_ms: f64) -> TickReport {
        let mut report = TickReport::default();
        self.motion = match std::mem::replace(&mut self.motion, Motion::Idle) {
            Motion::Idle => Motion::Idle,
            Motion::Step(step) => self.tick_step(step, now_ms, &mut report),
            Motion::FastScroll(sweep) => self.tick_sweep(sweep, now_ms),
            Motion::Settle(settle) => self.tick_settle(settle, now_ms, &mut report),
            Motion::Entrance(entrance) => self.tick_entrance(entrance, now_ms, &mut report),
        };
        report.animating = !matches!(self.motion, Motion::Idle);
        report
    }

    fn tick_step(&mut self, mut step: StepMotion, now_ms: f64, report: &mut TickReport) -> Motion {
        if self.blend_step(&mut step, now_ms) {
            report.transition_finished = true;
            self.next_pending()
        } else {
            Motion::Step(step)
        }
    }

    fn tick_sweep(&mut self, mut sweep: SweepMotion, now_ms: f64) -> Motion {
        let n = self.items.len();
        let sample = sweep.tween.sample(now_ms);
        let per_item = self.background_steps();
        let fade_ms = self.config.timing.fast_background_ms;

        if !sample.finished {
            self.render_at(sweep.origin as f64 + sample.value);
            let background =
                (sweep.background_origin as f64 + sample.value * per_item as f64).round() as i64;
            if background != sweep.background_shown {
                sweep.background_shown = background;
                self.show_background(background, fade_ms);
            }
            return Motion::FastScroll(sweep);
        }

        self.center = ring::normalize(sweep.target as i64, n);
        self.stage.mark_centered(self.center);
        self.render_at(self.center as f64);
        let background = sweep.background_origin + sweep.steps * per_item;
        if background != sweep.background_shown {
            self.show_background(background, fade_ms);
        }

        let index = self.center;
        Motion::Settle(SettleMotion {
            index,
            resting: self.rendered[index],
            direction: -(sweep.steps.signum() as f64),
            tween: Tween::new(0.0, 1.0, self.config.timing.settle_ms, Easing::SineInOut),
        })
    }

    fn tick_settle(
        &mut self,
        mut settle: SettleMotion,
        now_ms: f64,
        report: &mut TickReport,
    ) -> Motion {
        let sample = settle.tween.sample(now_ms);
        if sample.finished {
            // Neighbours may still carry a pre-resize layout.
            self.render_at(settle.index as f64);
            report.transition_finished = true;
            return self.next_pending();
        }
        let bump = (PI * sample.value).sin() * settle.direction;
        let timing = &self.config.timing;
        let mut transform = settle.resting;
        transform.x += bump * timing.settle_offset_px;
        transform.rotation += bump * timing.settle_rotation_deg;
        self.apply(settle.index, transform);
        Motion::Settle(settle)
    }

    fn tick_entrance(
        &mut self,
        mut entrance: EntranceMotion,
        now_ms: f64,
        report: &mut TickReport,
    ) -> Motion {
        let phase_done = match &mut entrance.phase {
            EntrancePhase::FadeIn { container, items } => {
                let container_sample = container.sample(now_ms);
                self.stage.set_container_opacity(container_sample.value);
                let mut done = container_sample.finished;
                for (index, (tween, resting)) in items.iter_mut().enumerate() {
                    let sample = tween.sample(now_ms);
                    done &= sample.finished;
                    self.apply(index, resting.with_opacity(sample.value));
                }
                done
            }
            EntrancePhase::Sweep(step) => self.blend_step(step, now_ms),
        };
        if !phase_done {
            return Motion::Entrance(entrance);
        }

        match entrance.remaining.pop_front() {
            Some(step_ms) => {
                let target = ring::normalize(self.center as i64 + 1, self.items.len());
                entrance.phase = EntrancePhase::Sweep(self.begin_step(target, 1, Some(step_ms)));
                Motion::Entrance(entrance)
            }
            None => {
                self.entrance = EntranceStatus::Done;
                report.entrance_finished = true;
                log::info!("carousel entrance complete at {}", self.center);
                Motion::Idle
            }
        }
    }

    /// Update logical state for a single step and build its animation.
    /// `duration_ms` overrides the configured step duration with a linear
    /// ease, which the entrance uses to decelerate step by step.
    fn begin_step(&mut self, target: usize, direction: i32, duration_ms: Option<f64>) -> StepMotion {
        log::debug!("carousel step {} -> {}", self.center, target);
        self.last_center = self.center;
        self.center = target;
        self.stage.mark_centered(target);

        let timing = &self.config.timing;
        let tween = match duration_ms {
            Some(ms) => Tween::new(0.0, 1.0, ms, Easing::Linear),
            None => Tween::new(0.0, 1.0, timing.step_ms, timing.step_ease),
        };
        let fade_ms = duration_ms.unwrap_or(timing.step_background_ms);
        self.advance_background(direction as i64 * self.background_steps(), fade_ms);

        StepMotion {
            from: self.rendered.clone(),
            to: self.resting_layout(target),
            tween,
        }
    }

    /// Returns true once the step has landed on its resting layout.
    fn blend_step(&mut self, step: &mut StepMotion, now_ms: f64) -> bool {
        let sample = step.tween.sample(now_ms);
        for index in 0..step.to.len() {
            let transform = if sample.finished {
                step.to[index]
            } else {
                step.from[index].lerp(&step.to[index], sample.value)
            };
            self.apply(index, transform);
        }
        sample.finished
    }

    /// Start the oldest queued request that still changes the center.
    fn next_pending(&mut self) -> Motion {
        while let Some(request) = self.pending.pop_front() {
            if request.target == self.center {
                log::debug!("dropping queued move to current center {}", request.target);
                continue;
            }
            return Motion::Step(self.begin_step(request.target, request.direction, None));
        }
        Motion::Idle
    }

    fn inferred_direction(&self, target: usize) -> i32 {
        match ring::shortest_steps(self.center, target, self.items.len()) {
            steps if steps < 0 => -1,
            _ => 1,
        }
    }

    fn background_steps(&self) -> i64 {
        i64::from(self.config.background.steps_per_item)
    }

    fn advance_background(&mut self, delta: i64, transition_ms: f64) {
        if delta != 0 {
            self.show_background(self.background_index as i64 + delta, transition_ms);
        }
    }

    fn show_background(&mut self, index: i64, transition_ms: f64) {
        if let Some(index) = ring::wrap_background(index, self.backdrop.total_images()) {
            self.background_index = index;
            self.backdrop.set_background_image(index, transition_ms);
        }
    }

    fn settle_at(&mut self, center: usize) {
        self.center = center;
        self.last_center = center;
        if self.items.is_empty() {
            return;
        }
        self.stage.mark_centered(center);
        self.render_at(center as f64);
        let background = center as i64 * self.background_steps();
        if let Some(index) = ring::wrap_background(background, self.backdrop.total_images()) {
            self.background_index = index;
            self.backdrop.set_background_image(index, 0.0);
        }
    }

    fn resting_layout(&self, center: usize) -> Vec<ItemTransform> {
        let n = self.items.len();
        (0..n)
            .map(|index| layout::transform(ring::relative_offset(index, center as f64, n), &self.params))
            .collect()
    }

    fn render_at(&mut self, position: f64) {
        let n = self.items.len();
        for index in 0..n {
            let rel = ring::relative_offset(index, position, n);
            self.apply(index, layout::transform(rel, &self.params));
        }
    }

    fn apply(&mut self, index: usize, transform: ItemTransform) {
        self.rendered[index] = transform;
        self.stage.apply_transform(index, &transform);
    }
}
