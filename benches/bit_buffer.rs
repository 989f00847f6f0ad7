use criterion::{black_box, criterion_group, criterion_main, Criterion};
use grid_pack::BitBuffer;
use grid_pack::geometry::{rotate, trim};
use grid_pack::{Grid, Rotation};

fn patterned(len: usize) -> BitBuffer {
    let mut buf = BitBuffer::new(len);
    for i in (0..len).filter(|i| i % 3 == 0 || i % 7 == 0) {
        buf.set(i, true);
    }
    buf
}

fn bench_count_bits(c: &mut Criterion) {
    let buf = patterned(64 * 1024);
    c.bench_function("count_bits_64k_unaligned", |b| {
        b.iter(|| buf.count_bits(black_box(3), black_box(64 * 1024 - 11)))
    });
}

fn bench_copy_aligned(c: &mut Criterion) {
    let src = patterned(64 * 1024);
    let mut dest = BitBuffer::new(64 * 1024);
    c.bench_function("copy_to_aligned_32k", |b| {
        b.iter(|| src.copy_to(&mut dest, black_box(8), black_box(16), black_box(32 * 1024)))
    });
}

fn bench_copy_shifted(c: &mut Criterion) {
    let src = patterned(64 * 1024);
    let mut dest = BitBuffer::new(64 * 1024);
    c.bench_function("copy_to_shifted_32k", |b| {
        b.iter(|| src.copy_to(&mut dest, black_box(5), black_box(16), black_box(32 * 1024)))
    });
}

fn bench_trim_rotate(c: &mut Criterion) {
    let mut grid = Grid::new(64, 64);
    for y in 20..40 {
        for x in (10..50).filter(|x| (x + y) % 2 == 0) {
            grid.set_cell(x, y, true);
        }
    }
    c.bench_function("trim_64x64", |b| b.iter(|| trim(black_box(&grid))));
    let trimmed = trim(&grid);
    c.bench_function("rotate90_trimmed", |b| {
        b.iter(|| rotate(black_box(&trimmed), Rotation::Deg90))
    });
}

criterion_group!(
    benches,
    bench_count_bits,
    bench_copy_aligned,
    bench_copy_shifted,
    bench_trim_rotate
);
criterion_main!(benches);
