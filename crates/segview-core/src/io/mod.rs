pub mod image_io;
pub mod tensor;
