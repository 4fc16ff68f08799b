#[cfg(test)]
pub mod impl_fake;
pub mod impl_tract_onnx;
pub mod impl_tract_tensorflow;
pub mod interface;
pub mod model_config;
pub mod postprocess;
