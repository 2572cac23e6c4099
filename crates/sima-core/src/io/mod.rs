pub mod discover;
pub mod image_io;
pub mod imagej;
pub mod tiff_stack;
