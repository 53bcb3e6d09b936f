use approx::assert_abs_diff_eq;
use chart_trendlines::core::{
    CoordinateMapper, DomainPoint, PaneId, PixelPoint, PriceScale, SimulatedHost, TimeScale,
    Viewport,
};

fn host() -> SimulatedHost {
    let mut time_scale = TimeScale::new(1000.0, 1500.0).expect("time scale");
    time_scale
        .set_visible_range(1000.0, 2000.0)
        .expect("visible range");
    SimulatedHost::new(Viewport::new(500, 400))
        .with_time_scale(time_scale)
        .with_price_scale(PaneId::MAIN, PriceScale::new(100.0, 200.0).expect("price scale"))
}

#[test]
fn times_outside_the_visible_window_extrapolate_linearly() {
    let host = host();
    let mapper = CoordinateMapper::new(&host, PaneId::MAIN);

    let ahead = mapper
        .to_pixel(DomainPoint::new(2500.0, 150.0))
        .expect("pixel");
    assert_abs_diff_eq!(ahead.x, 750.0, epsilon = 1e-9);
    assert_abs_diff_eq!(ahead.y, 200.0, epsilon = 1e-9);

    let behind = mapper
        .to_pixel(DomainPoint::new(500.0, 150.0))
        .expect("pixel");
    assert_abs_diff_eq!(behind.x, -250.0, epsilon = 1e-9);
}

#[test]
fn prices_outside_the_visible_window_extrapolate_linearly() {
    let host = host();
    let mapper = CoordinateMapper::new(&host, PaneId::MAIN);

    let above = mapper.to_pixel(DomainPoint::new(1200.0, 250.0)).expect("pixel");
    assert_abs_diff_eq!(above.y, -200.0, epsilon = 1e-9);
    let below = mapper.to_pixel(DomainPoint::new(1200.0, 50.0)).expect("pixel");
    assert_abs_diff_eq!(below.y, 600.0, epsilon = 1e-9);

    let point = mapper.to_domain(PixelPoint::new(750.0, 600.0));
    assert_abs_diff_eq!(point.time, 2500.0, epsilon = 1e-9);
    assert_abs_diff_eq!(point.price, 50.0, epsilon = 1e-9);
}

#[test]
fn non_finite_points_do_not_project() {
    let host = host();
    let mapper = CoordinateMapper::new(&host, PaneId::MAIN);
    assert!(mapper.to_pixel(DomainPoint::new(f64::NAN, 150.0)).is_none());
    assert!(mapper.to_pixel(DomainPoint::new(1200.0, f64::INFINITY)).is_none());
}

#[test]
fn host_without_data_still_yields_points() {
    let host = SimulatedHost::new(Viewport::new(500, 400));
    let mapper = CoordinateMapper::new(&host, PaneId::MAIN);

    let pixel = mapper.to_pixel(DomainPoint::new(1200.0, 150.0)).expect("pixel");
    assert!(pixel.is_finite());
    let point = mapper.to_domain(PixelPoint::new(10.0, 10.0));
    assert!(point.is_finite());
    assert!(mapper.visible_price_floor_y().is_none());
}

#[test]
fn indicator_pane_has_its_own_price_mapping() {
    let mut host = host();
    let rsi = host
        .add_indicator_pane(1.0, PriceScale::new(0.0, 100.0).expect("rsi scale"))
        .expect("indicator pane");

    let main = CoordinateMapper::new(&host, PaneId::MAIN);
    assert_abs_diff_eq!(main.visible_price_floor_y().expect("floor"), 200.0, epsilon = 1e-9);

    let indicator = CoordinateMapper::new(&host, rsi);
    assert_eq!(indicator.pane(), rsi);
    let y = indicator
        .to_pixel(DomainPoint::new(1200.0, 50.0))
        .expect("pixel")
        .y;
    assert_abs_diff_eq!(y, 300.0, epsilon = 1e-9);
}
