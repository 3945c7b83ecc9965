//! Configuration errors raised before the first frame.

/// Invalid scene configuration. Fatal: no partial rendering is attempted.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required texture slot was left unbound. The slot name is one of
    /// `"day"`, `"night"`, `"specular_clouds"`.
    #[error("required texture slot '{slot}' is not bound")]
    MissingTexture { slot: &'static str },

    /// A texture was supplied with a zero dimension.
    #[error("texture slot '{slot}' has zero dimensions ({width}x{height})")]
    ZeroTextureDimensions {
        slot: &'static str,
        width: u32,
        height: u32,
    },

    /// A texture's pixel data does not match its stated dimensions.
    #[error(
        "texture slot '{slot}' has {actual} bytes, expected {expected} for {width}x{height} rgba8"
    )]
    TextureSizeMismatch {
        slot: &'static str,
        actual: usize,
        expected: usize,
        width: u32,
        height: u32,
    },
}
