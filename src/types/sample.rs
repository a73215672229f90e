use ndarray::Array3;

/// A single training example: one slice with a leading channel axis.
///
/// `image` and `seg` are both shaped `1 x height x width`. `id` is the global
/// index the sample was fetched with.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub id: usize,
    pub image: Array3<f32>,
    pub seg: Array3<i64>,
}
