use {
    crate::{Backend, Device, InferError, ModelSource, Session},
    ndarray::{ArrayD, IxDyn},
    ort::{
        inputs,
        session::Session as OrtSession,
        tensor::TensorElementType,
        value::{TensorRef, ValueType},
    },
    posecam_base::Tensor,
    std::collections::HashMap,
};

/// ONNX Runtime backend.
pub struct OnnxBackend {
    device: Device,
}

impl OnnxBackend {
    pub fn new(device: Device) -> Self {
        Self { device }
    }
}

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        let builder = OrtSession::builder()
            .map_err(|e| InferError::Backend(format!("failed to create session builder: {e}")))?;

        let builder = match &self.device {
            Device::Cpu => {
                log::info!("onnx: using CPU execution provider");
                builder
            }
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => {
                use ort::execution_providers::{CUDAExecutionProvider, ExecutionProvider};
                let ep = CUDAExecutionProvider::default().with_device_id(*device_id);
                log::info!(
                    "onnx: CUDA requested (device_id={}), available: {}",
                    device_id,
                    ep.is_available().unwrap_or(false)
                );
                builder
                    .with_execution_providers([ep.build()])
                    .map_err(|_| InferError::UnsupportedDevice(self.device.clone()))?
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => {
                return Err(InferError::UnsupportedDevice(self.device.clone()));
            }
        };

        let session = match model {
            ModelSource::File(path) => builder
                .commit_from_file(&path)
                .map_err(|e| InferError::ModelLoad(format!("{}: {e}", path.display())))?,
            ModelSource::Memory(bytes) => builder
                .commit_from_memory(&bytes)
                .map_err(|e| InferError::ModelLoad(format!("in-memory model: {e}")))?,
        };

        let input_names: Vec<String> = session.inputs.iter().map(|i| i.name.clone()).collect();
        let input_types: Vec<ElementType> = session
            .inputs
            .iter()
            .map(|i| ElementType::of(&i.input_type))
            .collect::<Result<_, _>>()?;
        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        log::debug!(
            "onnx: inputs {:?} {:?}, outputs {:?}",
            input_names,
            input_types,
            output_names
        );

        Ok(Box::new(OnnxSession {
            session,
            input_names,
            input_types,
            output_names,
        }))
    }
}

/// Element types accepted for model inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ElementType {
    F32,
    I32,
}

impl ElementType {
    fn of(value_type: &ValueType) -> Result<Self, InferError> {
        match value_type {
            ValueType::Tensor {
                ty: TensorElementType::Float32,
                ..
            } => Ok(ElementType::F32),
            ValueType::Tensor {
                ty: TensorElementType::Int32,
                ..
            } => Ok(ElementType::I32),
            other => Err(InferError::UnsupportedDtype(format!("model input {other:?}"))),
        }
    }
}

pub struct OnnxSession {
    session: OrtSession,
    input_names: Vec<String>,
    input_types: Vec<ElementType>,
    output_names: Vec<String>,
}

impl Session for OnnxSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        // pose models take a single image input
        let [(name, tensor)] = inputs else {
            return Err(InferError::Backend(format!(
                "expected one input, got {}",
                inputs.len()
            )));
        };
        let index = self
            .input_names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| InferError::InvalidInput {
                name: name.to_string(),
                expected_names: self.input_names.clone(),
            })?;

        let outputs = match self.input_types[index] {
            ElementType::F32 => {
                let array = tensor_to_ndarray(tensor.clone())?;
                let value = TensorRef::from_array_view(array.view())
                    .map_err(|e| InferError::Backend(format!("failed to create tensor ref: {e}")))?;
                self.session
                    .run(inputs![*name => value])
                    .map_err(|e| InferError::Backend(format!("inference failed: {e}")))?
            }
            ElementType::I32 => {
                // integer image inputs take the raw 0..255 values
                let array = tensor_to_ndarray(tensor.map(|v| v.round() as i32))?;
                let value = TensorRef::from_array_view(array.view())
                    .map_err(|e| InferError::Backend(format!("failed to create tensor ref: {e}")))?;
                self.session
                    .run(inputs![*name => value])
                    .map_err(|e| InferError::Backend(format!("inference failed: {e}")))?
            }
        };

        let mut result = HashMap::new();
        for output_name in &self.output_names {
            let value = outputs.get(output_name.as_str()).ok_or_else(|| {
                InferError::Backend(format!("output {output_name:?} missing"))
            })?;
            let (shape, data) = value.try_extract_tensor::<f32>().map_err(|e| {
                InferError::UnsupportedDtype(format!("output {output_name:?} is not f32: {e}"))
            })?;
            let shape = shape.iter().map(|&d| d.max(0) as usize).collect();
            result.insert(output_name.clone(), Tensor::new(shape, data.to_vec())?);
        }
        Ok(result)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}

pub fn tensor_to_ndarray<T>(tensor: Tensor<T>) -> Result<ArrayD<T>, InferError> {
    ArrayD::from_shape_vec(IxDyn(&tensor.shape), tensor.data)
        .map_err(|e| InferError::Backend(format!("failed to create ndarray from tensor: {e}")))
}
