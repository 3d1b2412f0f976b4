use diameter_parse_utils::Span;
use diameter_serde_macros::LocatedError;
use nom::{error::ErrorKind, number::complete::be_u32, IResult};

#[derive(LocatedError, Eq, PartialEq, Debug, Clone)]
pub enum AvpCodeError {
    NomError(#[from_nom] ErrorKind),
}

fn parse_code(buf: Span<'_>) -> IResult<Span<'_>, u32, LocatedAvpCodeError<'_>> {
    be_u32(buf)
}

fn main() {
    let buf = [0u8, 1];
    let span = Span::new(&buf);
    assert_eq!(
        parse_code(span),
        Err(nom::Err::Error(LocatedAvpCodeError::new(
            span,
            AvpCodeError::NomError(ErrorKind::Eof)
        )))
    );
}
