use anyhow::{ensure, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sparsemul::{
    random_sparse_dense, sparse_multiply, DenseMatrix, MultiplyConfig, SparseMatrixCCS,
    SparseMatrixCSR,
};

/// Multiply two random integer matrices densely and sparsely and print them
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Rows of X
    #[arg(long, default_value_t = 7)]
    x_rows: usize,

    /// Columns of X, which is also the rows of Y
    #[arg(long, default_value_t = 5)]
    x_cols: usize,

    /// Columns of Y
    #[arg(long, default_value_t = 6)]
    y_cols: usize,

    /// Exclusive upper bound of generated values
    #[arg(long, default_value_t = 10)]
    upper: i64,

    /// Probability that an entry is nonzero
    #[arg(long, default_value_t = 0.3)]
    density: f64,

    /// Seed for reproducible operands; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Fail if the sparse product holds more nonzeros than this
    #[arg(long)]
    max_nonzeros: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(version = sparsemul::VERSION, ?args, "generating operands");

    let x = random_sparse_dense(args.x_rows, args.x_cols, args.density, args.upper, &mut rng)?;
    let y = random_sparse_dense(args.x_cols, args.y_cols, args.density, args.upper, &mut rng)?;

    let dense_z = x.multiply(&y)?;

    let config = MultiplyConfig {
        max_result_nonzeros: args.max_nonzeros,
        ..MultiplyConfig::default()
    };
    let sparse_z = sparse_multiply(
        &SparseMatrixCSR::from_dense(&x)?,
        &SparseMatrixCCS::from_dense(&y)?,
        &config,
    )?;

    println!("---X---");
    print!("{}", x);
    println!("---Y---");
    print!("{}", y);
    println!("---Z---");
    print!("{}", sparse_z);

    let agrees: bool = sparse_z.to_dense() == dense_z;
    info!(nnz = sparse_z.nnz(), agrees, "multiplied");
    ensure!(agrees, "sparse and dense products differ:\n{}", dense_report(&dense_z));

    Ok(())
}

fn dense_report(z: &DenseMatrix<i64>) -> String {
    format!("dense product ({} nonzeros):\n{}", z.count_nonzeros(), z)
}
