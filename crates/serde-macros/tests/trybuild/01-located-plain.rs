use diameter_parse_utils::{LocatedParsingError, Span};
use diameter_serde_macros::LocatedError;

#[derive(LocatedError, Eq, PartialEq, Debug, Clone)]
pub enum AvpHeaderError {
    InvalidAvpLength(u32),
    ZeroVendorId,
}

fn main() {
    let buf = [0u8, 0, 1, 8];
    let span = Span::new(&buf);
    let error = AvpHeaderError::InvalidAvpLength(4);
    let located = LocatedAvpHeaderError::new(span, error.clone());
    assert_eq!(located.span(), &span);
    assert_eq!(located.error(), &error);
    let (span_out, error_out): (Span<'_>, AvpHeaderError) = located.into();
    assert_eq!(span_out, span);
    assert_eq!(error_out, error);
}
