pub mod codec;
pub mod sink;
pub mod encoder;
pub mod run;
