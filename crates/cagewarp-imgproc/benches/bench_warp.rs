use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cagewarp_image::Image;
use cagewarp_imgproc::deform::CageDeformer;
use cagewarp_imgproc::point::Point2f;
use cagewarp_imgproc::scanline::polygon_interior;

fn cage_for(width: usize, height: usize) -> (Vec<Point2f>, Vec<Point2f>) {
    let (w, h) = (width as f32 - 1.0, height as f32 - 1.0);
    let source = vec![
        Point2f::new(0.0, 0.0),
        Point2f::new(w, 0.0),
        Point2f::new(w, h),
        Point2f::new(0.0, h),
    ];
    // pull the bottom-right anchor towards the center
    let mut target = source.clone();
    target[2] = Point2f::new(w * 0.75, h * 0.75);
    (source, target)
}

fn bench_cage_warp(c: &mut Criterion) {
    let mut group = c.benchmark_group("CageWarp");

    for (width, height) in [(128, 128), (256, 256), (512, 512)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_size = [*width, *height].into();
        let image = Image::<u8, 3>::new(image_size, vec![0u8; width * height * 3]).unwrap();

        let (source, target) = cage_for(*width, *height);
        let mut deformer = CageDeformer::new();
        assert!(deformer.set_cage(&source, &target));

        group.bench_with_input(
            BenchmarkId::new("forward_warp", &parameter_string),
            &(&deformer, &image),
            |b, i| {
                let (deformer, src) = (i.0, i.1);
                b.iter(|| black_box(deformer.warp(black_box(src))).unwrap())
            },
        );
    }
    group.finish();
}

fn bench_polygon_interior(c: &mut Criterion) {
    let mut group = c.benchmark_group("PolygonInterior");

    for side in [64usize, 256, 1024].iter() {
        group.throughput(criterion::Throughput::Elements((side * side) as u64));

        let s = *side as f32;
        let polygon = vec![
            Point2f::new(0.0, 0.0),
            Point2f::new(s, 0.0),
            Point2f::new(s, s),
            Point2f::new(0.0, s),
        ];

        group.bench_with_input(
            BenchmarkId::new("scanline", format!("{side}x{side}")),
            &polygon,
            |b, polygon| b.iter(|| black_box(polygon_interior(black_box(polygon)))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_cage_warp, bench_polygon_interior);
criterion_main!(benches);
