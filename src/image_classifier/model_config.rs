use crate::image_classifier::postprocess::ClassConvention;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub model_path: PathBuf,
    /// (height, width)
    pub input_shape: (u32, u32),
    pub class_convention: ClassConvention,
}

impl ModelConfig {
    pub fn input_dims(&self) -> [usize; 4] {
        [
            1,
            self.input_shape.0 as usize,
            self.input_shape.1 as usize,
            3,
        ]
    }
}
