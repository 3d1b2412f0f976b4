use diameter_parse_utils::Span;
use diameter_serde_macros::LocatedError;
use nom::{error::ErrorKind, IResult};

mod value {
    use diameter_serde_macros::LocatedError;

    #[derive(LocatedError, Eq, PartialEq, Debug, Clone)]
    pub enum ValueError {
        InvalidUtf8,
    }
}

#[derive(LocatedError, Eq, PartialEq, Debug, Clone)]
pub enum AvpError {
    NomError(#[from_nom] ErrorKind),
    Value(#[from_located] value::ValueError),
}

fn parse_value(buf: Span<'_>) -> IResult<Span<'_>, u8, value::LocatedValueError<'_>> {
    Err(nom::Err::Error(value::LocatedValueError::new(
        buf,
        value::ValueError::InvalidUtf8,
    )))
}

fn parse(buf: Span<'_>) -> IResult<Span<'_>, u8, LocatedAvpError<'_>> {
    let (buf, value) = parse_value(buf).map_err(|err| err.map(LocatedAvpError::from))?;
    Ok((buf, value))
}

fn main() {
    let buf = [0xffu8];
    let span = Span::new(&buf);
    assert_eq!(
        parse(span),
        Err(nom::Err::Error(LocatedAvpError::new(
            span,
            AvpError::Value(value::ValueError::InvalidUtf8)
        )))
    );
}
