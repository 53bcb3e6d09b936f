use chart_trendlines::api::{TrendlineEngine, TrendlineEngineConfig};
use chart_trendlines::core::{
    CoordinateMapper, DomainPoint, PaneId, PriceScale, SimulatedHost, TimeScale, Viewport,
};
use chart_trendlines::interaction::KeyCode;
use chart_trendlines::render::NullSurface;
use proptest::prelude::*;

fn host() -> SimulatedHost {
    let mut time_scale = TimeScale::new(1000.0, 1500.0).expect("time scale");
    time_scale
        .set_visible_range(1000.0, 2000.0)
        .expect("visible range");
    SimulatedHost::new(Viewport::new(500, 400))
        .with_time_scale(time_scale)
        .with_price_scale(PaneId::MAIN, PriceScale::new(100.0, 200.0).expect("price scale"))
}

#[derive(Debug, Clone, Copy)]
enum Op {
    StartDrawing,
    Down(f64, f64),
    Move(f64, f64),
    Up(f64, f64),
    ContextClick(f64, f64),
    Delete,
    StopDrawing,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let point = (0.0f64..500.0, 0.0f64..400.0);
    prop_oneof![
        Just(Op::StartDrawing),
        point.clone().prop_map(|(x, y)| Op::Down(x, y)),
        point.clone().prop_map(|(x, y)| Op::Move(x, y)),
        point.clone().prop_map(|(x, y)| Op::Up(x, y)),
        point.prop_map(|(x, y)| Op::ContextClick(x, y)),
        Just(Op::Delete),
        Just(Op::StopDrawing),
    ]
}

proptest! {
    #[test]
    fn mapper_round_trips_inside_and_outside_visible_window(
        time in -5_000.0f64..8_000.0,
        price in -500.0f64..800.0
    ) {
        let host = host();
        let mapper = CoordinateMapper::new(&host, PaneId::MAIN);
        let pixel = mapper.to_pixel(DomainPoint::new(time, price)).expect("finite point");
        let back = mapper.to_domain(pixel);
        prop_assert!((back.time - time).abs() <= 1e-6);
        prop_assert!((back.price - price).abs() <= 1e-6);
    }

    #[test]
    fn line_drag_preserves_pixel_length_and_angle(
        dx in -80.0f64..80.0,
        dy in -80.0f64..80.0,
        sensitivity in 0.1f64..=1.0
    ) {
        let config = TrendlineEngineConfig::default().with_drag_sensitivity(sensitivity);
        let mut engine = TrendlineEngine::new(host(), NullSurface::default(), config)
            .expect("engine init");
        engine.start_drawing();
        engine.pointer_down(100.0, 300.0);
        engine.pointer_down(300.0, 100.0);

        prop_assert!(engine.pointer_down(200.0, 200.0));
        prop_assert!(engine.pointer_move(200.0 + dx, 200.0 + dy));

        let trendline = engine.trendlines().next().expect("trendline").clone();
        let mapper = CoordinateMapper::new(engine.host(), PaneId::MAIN);
        let start = mapper.to_pixel(trendline.start_point).expect("start");
        let end = mapper.to_pixel(trendline.end_point).expect("end");

        prop_assert!((start.x - (100.0 + dx * sensitivity)).abs() <= 1e-6);
        prop_assert!((start.y - (300.0 + dy * sensitivity)).abs() <= 1e-6);
        prop_assert!((end.x - start.x - 200.0).abs() <= 1e-6);
        prop_assert!((end.y - start.y + 200.0).abs() <= 1e-6);
    }

    #[test]
    fn at_most_one_trendline_is_selected(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut engine = TrendlineEngine::new(
            host(),
            NullSurface::default(),
            TrendlineEngineConfig::default(),
        )
        .expect("engine init");

        for op in ops {
            match op {
                Op::StartDrawing => engine.start_drawing(),
                Op::Down(x, y) => {
                    engine.pointer_down(x, y);
                }
                Op::Move(x, y) => {
                    engine.pointer_move(x, y);
                }
                Op::Up(x, y) => {
                    engine.pointer_up(x, y);
                }
                Op::ContextClick(x, y) => {
                    engine.context_click(x, y);
                }
                Op::Delete => {
                    engine.key_down(KeyCode::Delete);
                }
                Op::StopDrawing => engine.stop_drawing(),
            }

            let state = engine.state();
            let selected: Vec<_> = state
                .trendlines
                .iter()
                .filter(|trendline| trendline.is_selected)
                .map(|trendline| trendline.id.clone())
                .collect();
            prop_assert!(selected.len() <= 1);
            prop_assert_eq!(selected.first(), state.selected_trendline_id.as_ref());
            prop_assert!(state
                .trendlines
                .iter()
                .all(|trendline| !trendline.is_dragging || trendline.is_selected));
            prop_assert_eq!(
                engine.host().price_lines().len(),
                state.trendlines.len() * 2
            );
        }
    }
}
