mod text;

pub use text::TextCodec;
