use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use cs_drawing::{
    BrushStyle, PaintTool, Point, RasterLayer, Rgba, StrokeRenderer, ToolState, flood_fill,
};

/// 整张画布的油漆桶填充
fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("Flood Fill");

    for size in [150u32, 300, 600] {
        group.bench_with_input(BenchmarkId::new("open canvas", size), &size, |b, &size| {
            let base = RasterLayer::filled(size, size, Rgba::WHITE).unwrap();
            b.iter(|| {
                let mut layer = base.clone();
                let report = flood_fill(
                    &mut layer,
                    black_box(size as f32 / 2.0),
                    black_box(size as f32 / 2.0),
                    Rgba::opaque(255, 0, 0),
                    32,
                );
                black_box(report)
            });
        });
    }

    group.finish();
}

/// 快照拷贝（每个手势结束时一次）
fn bench_snapshot(c: &mut Criterion) {
    let layer = RasterLayer::filled(600, 600, Rgba::WHITE).unwrap();
    c.bench_function("Snapshot 600x600", |b| b.iter(|| black_box(layer.snapshot())));
}

/// 画笔样式的线段绘制
fn bench_stroke(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stroke Segments");

    for style in [
        BrushStyle::Round,
        BrushStyle::Square,
        BrushStyle::Marker,
        BrushStyle::Calligraphy,
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", style)),
            &style,
            |b, &style| {
                let mut layer = RasterLayer::filled(600, 600, Rgba::WHITE).unwrap();
                let tools = ToolState::new(PaintTool::Brush, "#3366FF", 12.0, style);
                b.iter(|| {
                    let mut renderer = StrokeRenderer::new();
                    renderer.begin(Point::new(20.0, 20.0));
                    for i in 1..50 {
                        let t = i as f32 * 10.0;
                        renderer.extend(&mut layer, Point::new(20.0 + t, 20.0 + t / 2.0), &tools);
                    }
                    black_box(renderer.end())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_flood_fill, bench_snapshot, bench_stroke);
criterion_main!(benches);
