use chart_trendlines::api::{TrendlineEngine, TrendlineEngineConfig};
use chart_trendlines::core::{
    CoordinateMapper, DomainPoint, PaneId, PixelPoint, PriceScale, SimulatedHost, TimeScale,
    Viewport,
};
use chart_trendlines::interaction::{HitTolerance, PendingTrendline, Trendline, TrendlineId, hit_test};
use chart_trendlines::render::{Color, NullSurface};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn host() -> SimulatedHost {
    let mut time_scale = TimeScale::new(0.0, 10_000.0).expect("valid time scale");
    time_scale
        .set_visible_range(2_000.0, 12_000.0)
        .expect("valid visible range");
    SimulatedHost::new(Viewport::new(1920, 1080))
        .with_time_scale(time_scale)
        .with_price_scale(
            PaneId::MAIN,
            PriceScale::new(0.0, 2_500.0).expect("valid price scale"),
        )
}

fn trendlines(count: usize) -> Vec<Trendline> {
    (0..count)
        .map(|i| {
            let t = i as f64 * 10.0;
            PendingTrendline {
                id: TrendlineId::new(format!("trendline_0_{i:06}")),
                start_point: DomainPoint::new(t, 100.0 + t * 0.1),
                color: Color::WHITE,
                line_width: 2.0,
            }
            .commit(DomainPoint::new(t + 500.0, 400.0 + t * 0.05))
        })
        .collect()
}

fn bench_mapper_round_trip(c: &mut Criterion) {
    let host = host();
    let mapper = CoordinateMapper::new(&host, PaneId::MAIN);

    c.bench_function("mapper_round_trip_extrapolated", |b| {
        b.iter(|| {
            let pixel = mapper
                .to_pixel(black_box(DomainPoint::new(11_234.5, 2_812.0)))
                .expect("finite point");
            let _ = mapper.to_domain(pixel);
        })
    });
}

fn bench_hit_test_1k(c: &mut Criterion) {
    let host = host();
    let mapper = CoordinateMapper::new(&host, PaneId::MAIN);
    let lines = trendlines(1_000);
    let pointer = PixelPoint::new(5.0, 5.0);

    c.bench_function("hit_test_1k_miss", |b| {
        b.iter(|| {
            let _ = hit_test(
                black_box(pointer),
                lines.iter(),
                HitTolerance::HOVER,
                |line| Some((mapper.to_pixel(line.start_point)?, mapper.to_pixel(line.end_point)?)),
            );
        })
    });
}

fn bench_overlay_frame_200(c: &mut Criterion) {
    let mut engine = TrendlineEngine::new(
        host(),
        NullSurface::default(),
        TrendlineEngineConfig::default(),
    )
    .expect("engine init");
    for i in 0..200 {
        let x = 20.0 + f64::from(i) * 9.0;
        engine.start_drawing();
        engine.pointer_down(x, 900.0);
        engine.pointer_down(x + 60.0, 200.0);
    }

    c.bench_function("overlay_frame_200_trendlines", |b| {
        b.iter(|| {
            let _ = black_box(engine.overlay_frame()).expect("frame");
        })
    });
}

criterion_group!(
    benches,
    bench_mapper_round_trip,
    bench_hit_test_1k,
    bench_overlay_frame_200
);
criterion_main!(benches);
