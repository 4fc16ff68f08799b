pub trait LabelMap {
    fn label(&self, index: usize) -> Option<&str>;
    fn len(&self) -> usize;
}
