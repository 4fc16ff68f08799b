pub mod impl_slim_imagenet;
#[cfg(test)]
pub mod impl_static;
pub mod interface;
