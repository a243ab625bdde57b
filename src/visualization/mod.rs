pub mod frame;
pub mod draw;
pub mod renderer;
pub mod lissajous;
