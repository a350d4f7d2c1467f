//! The context a controller traversal is handed. It bundles the data graph
//! cursor for this pass, the event driving it, and the routing/system
//! handles widgets consult to answer "does this concern me."

use std::cell::{Cell, RefCell};

use rui_data::DataTraversal;
use rui_event::{Delivery, Event, FocusQueryKind, FocusTracker};
use rui_id::{CapturedId, Id};
use rui_layout::{LayoutBox, LayoutScalar, LayoutVector};

use crate::interfaces::CursorKind;
use crate::system::System;

fn region_contains(region: LayoutBox, point: LayoutVector) -> bool {
    let within_axis = |axis: usize| {
        point[axis] >= region.corner[axis] && point[axis] < region.corner[axis] + region.size[axis]
    };
    within_axis(0) && within_axis(1)
}

pub struct Context<'a> {
    data: &'a mut DataTraversal,
    event: &'a Event,
    delivery: Delivery,
    system: &'a System,
    acknowledged: &'a Cell<bool>,
    hit_result: &'a RefCell<Option<CapturedId>>,
    focus_tracker: Option<&'a RefCell<FocusTracker>>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        data: &'a mut DataTraversal,
        event: &'a Event,
        delivery: Delivery,
        system: &'a System,
        acknowledged: &'a Cell<bool>,
        hit_result: &'a RefCell<Option<CapturedId>>,
        focus_tracker: Option<&'a RefCell<FocusTracker>>,
    ) -> Self {
        Self { data, event, delivery, system, acknowledged, hit_result, focus_tracker }
    }

    pub fn data(&mut self) -> &mut DataTraversal {
        self.data
    }

    pub fn event(&self) -> &Event {
        self.event
    }

    pub fn delivery(&self) -> &Delivery {
        &self.delivery
    }

    /// Borrow a child context for descending into child `index`, or `None`
    /// if a targeted delivery doesn't pass through that child.
    pub fn enter_child(&mut self, index: usize) -> Option<Context<'_>> {
        if !self.delivery.enters_child(index) {
            return None;
        }
        Some(Context {
            data: self.data,
            event: self.event,
            delivery: self.delivery.for_child(index),
            system: self.system,
            acknowledged: self.acknowledged,
            hit_result: self.hit_result,
            focus_tracker: self.focus_tracker,
        })
    }

    pub fn tick_count(&self) -> u64 {
        self.system.tick_count()
    }

    pub fn is_focused(&self, id: &Id<'_>) -> bool {
        self.system.focused().is_some_and(|c| c.matches(id))
    }

    pub fn is_hot(&self, id: &Id<'_>) -> bool {
        self.system.hot().is_some_and(|c| c.matches(id))
    }

    pub fn is_captured(&self, id: &Id<'_>) -> bool {
        self.system.captured().is_some_and(|c| c.matches(id))
    }

    pub fn window_has_focus(&self) -> bool {
        self.system.window_has_focus()
    }

    pub fn request_animation(&self) {
        self.system.request_animation();
    }

    pub fn set_cursor(&self, kind: CursorKind) {
        self.system.set_cursor(kind);
    }

    pub fn get_clipboard_text(&self) -> Option<String> {
        self.system.get_clipboard_text()
    }

    pub fn set_clipboard_text(&self, text: &str) -> anyhow::Result<()> {
        self.system.set_clipboard_text(text)
    }

    /// Marks the current dispatch as handled by some widget along its path.
    pub fn acknowledge(&self) {
        self.acknowledged.set(true);
    }

    /// During a [`Event::MouseHitTest`] pass, a widget reports itself as
    /// the occupant of `region` in its parent's coordinate space. Later
    /// reporters win: in traversal order a widget painted on top is
    /// declared after the widgets underneath it.
    pub fn report_hit_region(&self, id: &Id<'_>, region: LayoutBox) {
        if let Event::MouseHitTest { point } = self.event {
            let rounded = LayoutVector::new(point.x.round() as LayoutScalar, point.y.round() as LayoutScalar);
            if region_contains(region, rounded) {
                *self.hit_result.borrow_mut() = Some(id.capture());
            }
        }
    }

    /// During a [`Event::FocusQuery`] pass, every focusable widget reports
    /// itself in traversal order so [`rui_event::FocusTracker`] can answer
    /// "what comes right after/before the currently focused widget."
    pub fn report_focusable(&self, id: &Id<'_>) {
        if let Some(tracker) = self.focus_tracker {
            tracker.borrow_mut().visit(id);
        }
    }

    pub fn focus_query_kind(&self) -> Option<FocusQueryKind> {
        match self.event {
            Event::FocusQuery(kind) => Some(*kind),
            _ => None,
        }
    }
}
