//! Exercises the host-facing refresh → update → resolve_layout → render
//! cycle end to end, against a small toy controller rather than any real
//! widget set.

use std::cell::Cell;
use std::rc::Rc;

use rui_event::{Event, KeyCode, KeyInput, Modifiers, Point};
use rui_id::make_id;
use rui_layout::{LayoutBox, LayoutFlags, LayoutLeaf, LayoutNode, LayoutVector, LeafRequirements, Layout, StyleInfo};
use rui_system::{Context, System};

#[test]
fn refresh_runs_the_controller_and_increments_the_count() {
    let calls = Rc::new(Cell::new(0));
    let controller_calls = calls.clone();
    let system = System::new(move |ctx: &mut Context| {
        if matches!(ctx.event(), Event::Refresh) {
            controller_calls.set(controller_calls.get() + 1);
        }
    });

    assert_eq!(system.refresh_count(), 0);
    system.refresh();
    system.refresh();
    assert_eq!(calls.get(), 2);
    assert_eq!(system.refresh_count(), 2);
}

#[test]
fn update_promotes_hit_widget_to_hot_and_refreshes() {
    let refreshes = Rc::new(Cell::new(0));
    let ctrl_refreshes = refreshes.clone();
    let region = LayoutBox::new(LayoutVector::new(0, 0), LayoutVector::new(20, 20));
    let system = System::new(move |ctx: &mut Context| {
        match ctx.event() {
            Event::Refresh => ctrl_refreshes.set(ctrl_refreshes.get() + 1),
            Event::MouseHitTest { .. } => {
                ctx.report_hit_region(&make_id("button"), region);
            }
            _ => {}
        }
    });

    assert!(system.hot().is_none());
    system.dispatch_mouse_motion(Point::new(10.0, 10.0));
    system.update();

    let hot = system.hot().expect("mouse over the button's region");
    assert!(hot.matches(&make_id("button")));
    // update() re-refreshes once the hot element changes.
    assert!(refreshes.get() >= 1);

    // Moving off the region clears hot again without a further region match.
    system.dispatch_mouse_motion(Point::new(100.0, 100.0));
    system.update();
    assert!(system.hot().is_none());
}

#[test]
fn advance_and_regress_focus_cycle_through_reported_widgets() {
    let system = System::new(move |ctx: &mut Context| {
        if ctx.focus_query_kind().is_some() {
            ctx.report_focusable(&make_id("first"));
            ctx.report_focusable(&make_id("second"));
            ctx.report_focusable(&make_id("third"));
        }
    });

    assert!(system.focused().is_none());
    system.advance_focus();
    assert!(system.focused().unwrap().matches(&make_id("first")));

    system.advance_focus();
    assert!(system.focused().unwrap().matches(&make_id("second")));

    system.regress_focus();
    assert!(system.focused().unwrap().matches(&make_id("first")));
}

#[test]
fn plain_tab_advances_focus_without_reaching_the_controller_as_a_key_press() {
    let key_presses = Rc::new(Cell::new(0));
    let ctrl_key_presses = key_presses.clone();
    let system = System::new(move |ctx: &mut Context| {
        if ctx.focus_query_kind().is_some() {
            ctx.report_focusable(&make_id("only"));
        }
        if matches!(ctx.event(), Event::FocusedKeyPress(_)) {
            ctrl_key_presses.set(ctrl_key_presses.get() + 1);
        }
    });

    let tab = KeyInput::new(KeyCode::Tab, Modifiers::empty());
    system.dispatch_key_press(tab);

    assert!(system.focused().unwrap().matches(&make_id("only")));
    assert_eq!(key_presses.get(), 0);
}

#[test]
fn resolve_layout_assigns_the_root_the_full_surface_region() {
    let system = System::new(|_ctx: &mut Context| {});
    let leaf = Rc::new(LayoutLeaf::new());
    system.set_layout_root(leaf.clone());
    system.set_surface_size(LayoutVector::new(800, 600));

    let fill = Layout { flags: LayoutFlags::fill_unpadded(), ..Layout::default() };
    leaf.refresh_layout(
        [96.0, 96.0],
        &StyleInfo::default(),
        fill,
        LeafRequirements::from_size(LayoutVector::new(100, 50)),
        LayoutFlags::NONE,
    );

    system.resolve_layout();

    let assignment = leaf.assignment().expect("resolve_layout assigns the root");
    assert_eq!(assignment.region.size, LayoutVector::new(800, 600));
}

#[test]
fn render_and_refresh_share_the_same_data_graph_state() {
    let renders_saw_value = Rc::new(Cell::new(None));
    let renders_saw_value_ctrl = renders_saw_value.clone();
    let system = System::new(move |ctx: &mut Context| {
        let (mut counter, is_new) = ctx.data().get_data_node::<i32>();
        if is_new {
            *counter = 7;
        }
        if matches!(ctx.event(), Event::Render) {
            renders_saw_value_ctrl.set(Some(*counter));
        }
    });

    system.refresh();
    system.render();

    assert_eq!(renders_saw_value.get(), Some(7));
}
