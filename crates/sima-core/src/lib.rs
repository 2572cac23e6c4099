pub mod channel;
pub mod consts;
pub mod error;
pub mod frame;
pub mod index;
pub mod io;
pub mod metadata;
pub mod pipeline;
pub mod presets;
pub mod split;
