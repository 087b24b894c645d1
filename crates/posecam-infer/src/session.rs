use {crate::InferError, posecam_base::Tensor, std::collections::HashMap};

/// A loaded model.
///
/// Inputs are always handed over as f32; a backend converts them when the
/// model declares another element type.
pub trait Session: Send {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError>;
    fn input_names(&self) -> &[String];
    fn output_names(&self) -> &[String];
}
