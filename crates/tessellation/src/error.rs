/// The tessellators' result type.
pub type TessellationResult = Result<(), TessellationError>;

/// The tessellators' error enumeration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TessellationError {
    #[error("Unsupported parameter: {0}")]
    UnsupportedParameter(#[from] UnsupportedParameter),
    #[error("Tessellator error: {0}")]
    Tessellator(#[from] lyon_tessellation::TessellationError),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum UnsupportedParameter {
    #[error("Position is not a number")]
    PositionIsNaN,
    #[error("Half-width is not a number")]
    HalfWidthIsNaN,
}

#[test]
fn error_messages() {
    let err: TessellationError = UnsupportedParameter::HalfWidthIsNaN.into();
    assert_eq!(err.to_string(), "Unsupported parameter: Half-width is not a number");
}
