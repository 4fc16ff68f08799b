use crate::labels::interface::LabelMap;

#[derive(Debug, Clone, Default)]
pub struct StaticLabels {
    names: Vec<String>,
}

impl StaticLabels {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }
}

impl LabelMap for StaticLabels {
    fn label(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    fn len(&self) -> usize {
        self.names.len()
    }
}
