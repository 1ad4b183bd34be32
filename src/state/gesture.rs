// Pointer/touch gesture tracking: which pointers are down, whether they form a drag
// or a pinch, and what each move means for rotation and scale.
use std::collections::BTreeMap;

use glam::DVec2;

use super::scale::ScaleSmoother;
use crate::model::{GestureState, PointerKind, PointerSample};

/// Side effect a pointer event has on the rotation physics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEffect {
    None,
    /// A fresh drag began; momentum from a previous fling is discarded.
    DragStarted,
    /// Rotation delta (yaw, pitch) in radians for this move.
    Rotate(DVec2),
}

#[derive(Debug, Clone)]
pub struct GestureTracker {
    // Ordered by id so the "first two touches" of a pinch are stable.
    pointers: BTreeMap<i32, PointerSample>,
    state: GestureState,
    drag_pointer: Option<i32>,
    drag_last: Option<DVec2>,
    initial_pinch_distance: f64,
    sensitivity: f64,
}

impl GestureTracker {
    pub fn new(sensitivity: f64) -> Self {
        Self {
            pointers: BTreeMap::new(),
            state: GestureState::Idle,
            drag_pointer: None,
            drag_last: None,
            initial_pinch_distance: 0.0,
            sensitivity,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == GestureState::Dragging
    }

    #[cfg(test)]
    pub fn active_pointers(&self) -> usize {
        self.pointers.len()
    }

    pub fn touch_count(&self) -> usize {
        self.pointers
            .values()
            .filter(|p| p.kind == PointerKind::Touch)
            .count()
    }

    /// Gesture implied by a pointer set: 0 → Idle, ≥2 touches → Pinching, else Dragging.
    pub fn classify<'a>(pointers: impl IntoIterator<Item = &'a PointerSample>) -> GestureState {
        let mut total = 0;
        let mut touches = 0;
        for p in pointers {
            total += 1;
            if p.kind == PointerKind::Touch {
                touches += 1;
            }
        }
        if touches >= 2 {
            GestureState::Pinching
        } else if total >= 1 {
            GestureState::Dragging
        } else {
            GestureState::Idle
        }
    }

    pub fn on_pointer_down(
        &mut self,
        id: i32,
        kind: PointerKind,
        x: f64,
        y: f64,
        scale: &mut ScaleSmoother,
    ) -> GestureEffect {
        self.pointers.insert(id, PointerSample { id, x, y, kind });
        let next = Self::classify(self.pointers.values());

        if next == GestureState::Pinching && !scale.is_pinching() {
            self.initial_pinch_distance = self.pinch_distance().unwrap_or(0.0);
            scale.begin_pinch();
            self.drag_pointer = None;
            self.drag_last = None;
            self.transition(next);
            return GestureEffect::None;
        }

        // A press for the pointer already dragging means its release was lost.
        if self.state == GestureState::Dragging && self.drag_pointer == Some(id) {
            self.drag_last = Some(DVec2::new(x, y));
            return GestureEffect::DragStarted;
        }

        if self.state != GestureState::Pinching && self.drag_pointer.is_none() {
            self.drag_pointer = Some(id);
            self.drag_last = Some(DVec2::new(x, y));
            self.transition(GestureState::Dragging);
            return GestureEffect::DragStarted;
        }
        GestureEffect::None
    }

    pub fn on_pointer_move(&mut self, id: i32, x: f64, y: f64, scale: &mut ScaleSmoother) -> GestureEffect {
        let Some(sample) = self.pointers.get_mut(&id) else {
            return GestureEffect::None;
        };
        sample.x = x;
        sample.y = y;

        if self.state == GestureState::Pinching {
            if self.touch_count() >= 2 && self.initial_pinch_distance > 0.0 {
                if let Some(current) = self.pinch_distance() {
                    scale.pinch_to(current / self.initial_pinch_distance);
                }
            }
            return GestureEffect::None;
        }

        if self.state != GestureState::Dragging || self.drag_pointer != Some(id) {
            return GestureEffect::None;
        }
        let pos = DVec2::new(x, y);
        match self.drag_last.replace(pos) {
            Some(prev) => GestureEffect::Rotate((pos - prev) * self.sensitivity),
            None => GestureEffect::Rotate(DVec2::ZERO),
        }
    }

    pub fn on_pointer_up(&mut self, id: i32, scale: &mut ScaleSmoother) -> GestureEffect {
        let pair_before = self.pinch_ids();
        if self.pointers.remove(&id).is_none() {
            return GestureEffect::None;
        }
        if scale.is_pinching() && self.touch_count() < 2 {
            scale.end_pinch();
            self.initial_pinch_distance = 0.0;
        }

        match Self::classify(self.pointers.values()) {
            GestureState::Idle => {
                self.drag_pointer = None;
                self.drag_last = None;
                self.transition(GestureState::Idle);
            }
            GestureState::Dragging => {
                if self.drag_pointer.is_none_or(|d| !self.pointers.contains_key(&d)) {
                    // Resume from the survivor's last known position.
                    if let Some(rest) = self.pointers.values().next() {
                        self.drag_pointer = Some(rest.id);
                        self.drag_last = Some(rest.position());
                    }
                }
                self.transition(GestureState::Dragging);
            }
            GestureState::Pinching => {
                // A finger of the measured pair lifted; measure the new pair from here.
                if self.pinch_ids() != pair_before {
                    self.initial_pinch_distance = self.pinch_distance().unwrap_or(0.0);
                    scale.rebase_pinch();
                }
            }
        }
        GestureEffect::None
    }

    pub fn on_pointer_cancel(&mut self, id: i32, scale: &mut ScaleSmoother) -> GestureEffect {
        self.on_pointer_up(id, scale)
    }

    fn pinch_pair(&self) -> Option<(&PointerSample, &PointerSample)> {
        let mut touches = self
            .pointers
            .values()
            .filter(|p| p.kind == PointerKind::Touch);
        Some((touches.next()?, touches.next()?))
    }

    fn pinch_ids(&self) -> Option<(i32, i32)> {
        self.pinch_pair().map(|(a, b)| (a.id, b.id))
    }

    fn pinch_distance(&self) -> Option<f64> {
        let (a, b) = self.pinch_pair()?;
        Some(a.position().distance(b.position()))
    }

    fn transition(&mut self, next: GestureState) {
        if self.state != next {
            log::debug!("gesture {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}
