//! Benchmarks for sparse and dense matrix multiplication

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sparsemul::{
    random_sparse_dense, sparse_multiply, DenseMatrix, MultiplyConfig, SparseMatrixCCS,
    SparseMatrixCSR,
};

/// Create a pair of square operands with the given density
fn create_operands(n: usize, density: f64) -> (DenseMatrix<i64>, DenseMatrix<i64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(n as u64);
    let x = random_sparse_dense(n, n, density, 100, &mut rng).unwrap();
    let y = random_sparse_dense(n, n, density, 100, &mut rng).unwrap();
    (x, y)
}

fn bench_matrix_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");

    for &(n, density) in &[(64, 0.05), (128, 0.02), (256, 0.01)] {
        let (x, y) = create_operands(n, density);
        let x_csr = SparseMatrixCSR::from_dense(&x).unwrap();
        let y_ccs = SparseMatrixCCS::from_dense(&y).unwrap();
        let label = format!("{}x{}@{}", n, n, density);

        group.bench_with_input(BenchmarkId::new("dense", &label), &(&x, &y), |b, (x, y)| {
            b.iter(|| black_box(x.multiply(*y).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("sparse", &label), &(&x_csr, &y_ccs), |b, (x, y)| {
            b.iter(|| black_box(sparse_multiply(*x, *y, &MultiplyConfig::default()).unwrap()))
        });

        // Skipping validation isolates the merge-join itself
        group.bench_with_input(
            BenchmarkId::new("sparse_unchecked", &label),
            &(&x_csr, &y_ccs),
            |b, (x, y)| {
                b.iter(|| black_box(sparse_multiply(*x, *y, &MultiplyConfig::unchecked()).unwrap()))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_matrix_multiply);
criterion_main!(benches);
