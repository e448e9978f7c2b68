use ::colmat::{Matrix, Region, UniformSource};

pub fn init_logger() {
    let _ = ::env_logger::try_init();
}

/// Reproducible matrix with entries in `[-1, 1)`.
pub fn random_matrix(dims: (usize, usize), seed: u64) -> Matrix {
    let mut m = Matrix::zeros(dims);
    m.populate(&mut UniformSource::with_seed(2.0, -0.5, seed), Region::All);
    m
}

/// Matrix whose element `(i, j)` is `100 * i + j`, so that every position is recognizable.
pub fn labeled_matrix(dims: (usize, usize)) -> Matrix {
    let mut m = Matrix::zeros(dims);
    m.map(Region::All, |i, j, _| (100 * i + j) as f64);
    m
}

/// Random dimensions for property-style tests.
pub fn random_dims(max: usize) -> (usize, usize) {
    use ::rand::Rng;
    let mut rng = ::rand::thread_rng();
    (rng.gen_range(0, max + 1), rng.gen_range(0, max + 1))
}
