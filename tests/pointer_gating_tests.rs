use chart_trendlines::api::{TrendlineEngine, TrendlineEngineConfig};
use chart_trendlines::core::{PaneId, PriceScale, SimulatedHost, TimeScale, Viewport};
use chart_trendlines::interaction::{HitTolerance, PointerButton, PointerEvent};
use chart_trendlines::render::{CursorStyle, NullSurface, PointerPolicy};

fn host() -> SimulatedHost {
    let mut time_scale = TimeScale::new(1000.0, 1500.0).expect("time scale");
    time_scale
        .set_visible_range(1000.0, 2000.0)
        .expect("visible range");
    SimulatedHost::new(Viewport::new(500, 400))
        .with_time_scale(time_scale)
        .with_price_scale(PaneId::MAIN, PriceScale::new(100.0, 200.0).expect("price scale"))
}

/// One trendline from (100, 200) to (200, 100) with the pointer parked far
/// away afterwards.
fn engine_with_line(host: SimulatedHost) -> TrendlineEngine<SimulatedHost, NullSurface> {
    let mut engine =
        TrendlineEngine::new(host, NullSurface::default(), TrendlineEngineConfig::default())
            .expect("engine init");
    engine.start_drawing();
    engine.pointer_down(100.0, 200.0);
    engine.pointer_down(200.0, 100.0);
    engine.container_pointer_move(450.0, 20.0);
    engine
}

#[test]
fn overlay_passes_events_through_by_default() {
    let engine = TrendlineEngine::new(
        host(),
        NullSurface::default(),
        TrendlineEngineConfig::default(),
    )
    .expect("engine init");
    assert_eq!(engine.pointer_policy(), PointerPolicy::PassThrough);
    assert_eq!(engine.cursor_style(), CursorStyle::Default);
    assert_eq!(engine.surface().expect("surface").pointer_policy_changes, 0);
}

#[test]
fn hovering_close_to_a_line_captures_the_pointer() {
    let mut engine = engine_with_line(host());
    assert_eq!(engine.pointer_policy(), PointerPolicy::PassThrough);

    // ~4.2px from the body, inside the strict 6px tolerance.
    assert_eq!(
        engine.container_pointer_move(153.0, 153.0),
        PointerPolicy::Intercept
    );
    assert_eq!(engine.cursor_style(), CursorStyle::Grab);
    let surface = engine.surface().expect("surface");
    assert_eq!(surface.pointer_policy, PointerPolicy::Intercept);
    assert_eq!(surface.cursor, CursorStyle::Grab);
}

#[test]
fn loose_hover_hits_do_not_capture_the_pointer() {
    let mut engine = engine_with_line(host());
    // ~7.1px from the body: a click would hit, hovering does not capture.
    assert!(!engine.is_intentional_hit(155.0, 155.0));
    assert_eq!(
        engine.container_pointer_move(155.0, 155.0),
        PointerPolicy::PassThrough
    );

    // 13px from the start point: inside the hover radius, outside the strict one.
    assert!(!engine.is_intentional_hit(113.0, 200.0));
    assert!(engine.is_intentional_hit(110.0, 200.0));
}

#[test]
fn pointer_state_is_pushed_only_when_it_changes() {
    let mut engine = engine_with_line(host());
    let before = engine.surface().expect("surface").pointer_policy_changes;

    engine.container_pointer_move(150.0, 150.0);
    engine.container_pointer_move(151.0, 151.0);
    engine.container_pointer_move(149.0, 149.0);
    assert_eq!(
        engine.surface().expect("surface").pointer_policy_changes,
        before + 1
    );

    engine.container_pointer_move(450.0, 20.0);
    engine.container_pointer_move(440.0, 30.0);
    assert_eq!(
        engine.surface().expect("surface").pointer_policy_changes,
        before + 2
    );
}

#[test]
fn indicator_panes_always_receive_pointer_events() {
    let mut host = host();
    host.add_indicator_pane(1.0, PriceScale::new(0.0, 100.0).expect("rsi scale"))
        .expect("indicator pane");
    let mut engine =
        TrendlineEngine::new(host, NullSurface::default(), TrendlineEngineConfig::default())
            .expect("engine init");

    engine.start_drawing();
    assert_eq!(engine.pointer_policy(), PointerPolicy::Intercept);

    assert_eq!(
        engine.container_pointer_move(100.0, 300.0),
        PointerPolicy::PassThrough
    );
    assert_eq!(engine.cursor_style(), CursorStyle::Default);
    assert!(!engine.pointer_down(100.0, 300.0));
    assert!(engine.context_click(100.0, 300.0).is_none());

    assert_eq!(
        engine.container_pointer_move(100.0, 150.0),
        PointerPolicy::Intercept
    );
    assert_eq!(engine.cursor_style(), CursorStyle::Crosshair);
}

#[test]
fn pointer_leave_releases_capture_unless_a_gesture_runs() {
    let mut engine = engine_with_line(host());
    engine.container_pointer_move(150.0, 150.0);
    assert_eq!(engine.pointer_policy(), PointerPolicy::Intercept);
    engine.pointer_leave();
    assert_eq!(engine.pointer_policy(), PointerPolicy::PassThrough);

    engine.pointer_down(150.0, 150.0);
    engine.pointer_leave();
    assert_eq!(engine.pointer_policy(), PointerPolicy::Intercept);
    assert_eq!(engine.cursor_style(), CursorStyle::Grabbing);
}

#[test]
fn releasing_a_drag_reevaluates_the_hover_state() {
    let mut engine = engine_with_line(host());
    engine.pointer_down(150.0, 150.0);
    engine.pointer_up(150.0, 150.0);
    assert_eq!(engine.cursor_style(), CursorStyle::Grab);

    engine.pointer_down(200.0, 100.0);
    engine.pointer_move(300.0, 50.0);
    engine.pointer_up(450.0, 380.0);
    assert_eq!(engine.pointer_policy(), PointerPolicy::PassThrough);
    assert_eq!(engine.cursor_style(), CursorStyle::Default);
}

#[test]
fn routed_events_report_the_resulting_pointer_state() {
    let mut engine = engine_with_line(host());

    let hover = engine.handle_pointer_event(PointerEvent::ContainerMove { x: 150.0, y: 150.0 });
    assert!(!hover.consumed);
    assert_eq!(hover.policy, PointerPolicy::Intercept);
    assert_eq!(hover.cursor, CursorStyle::Grab);

    let down = engine.handle_pointer_event(PointerEvent::Down {
        x: 150.0,
        y: 150.0,
        button: PointerButton::Primary,
    });
    assert!(down.consumed);
    assert_eq!(down.cursor, CursorStyle::Grabbing);
    assert!(down.context_menu.is_none());

    let moved = engine.handle_pointer_event(PointerEvent::Move { x: 160.0, y: 150.0 });
    assert!(moved.consumed);

    let up = engine.handle_pointer_event(PointerEvent::Up { x: 160.0, y: 150.0 });
    assert!(up.consumed);
    assert_ne!(up.cursor, CursorStyle::Grabbing);

    let leave = engine.handle_pointer_event(PointerEvent::Leave);
    assert!(!leave.consumed);
    assert_eq!(leave.policy, PointerPolicy::PassThrough);
}

#[test]
fn idle_overlay_moves_defer_to_hover_detection() {
    let mut engine = engine_with_line(host());

    let idle = engine.handle_pointer_event(PointerEvent::Move { x: 150.0, y: 150.0 });
    assert!(!idle.consumed);
    assert_eq!(idle.policy, PointerPolicy::PassThrough);
    let hover = engine.handle_pointer_event(PointerEvent::ContainerMove { x: 150.0, y: 150.0 });
    assert_eq!(hover.cursor, CursorStyle::Grab);

    engine.pointer_down(150.0, 150.0);
    let dragging = engine.handle_pointer_event(PointerEvent::Move { x: 170.0, y: 140.0 });
    assert!(dragging.consumed);
    assert_eq!(dragging.policy, PointerPolicy::Intercept);
    assert_eq!(dragging.cursor, CursorStyle::Grabbing);
}

#[test]
fn wider_tolerances_are_configurable() {
    let config = TrendlineEngineConfig::default()
        .with_hover_tolerance(HitTolerance {
            point_radius_px: 30.0,
            line_tolerance_px: 20.0,
        })
        .with_strict_tolerance(HitTolerance {
            point_radius_px: 25.0,
            line_tolerance_px: 15.0,
        });
    let mut engine =
        TrendlineEngine::new(host(), NullSurface::default(), config).expect("engine init");
    engine.start_drawing();
    engine.pointer_down(100.0, 200.0);
    engine.pointer_down(200.0, 100.0);

    assert!(engine.is_intentional_hit(160.0, 160.0));
    assert!(!engine.is_intentional_hit(170.0, 170.0));
}
