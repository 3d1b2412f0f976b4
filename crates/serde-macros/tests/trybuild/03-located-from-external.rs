use diameter_parse_utils::Span;
use diameter_serde_macros::LocatedError;
use nom::{combinator::map_res, error::ErrorKind, number::complete::be_u16, IResult};

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct UndefinedAddressFamily(pub u16);

#[derive(LocatedError, Eq, PartialEq, Debug, Clone)]
pub enum AddressError {
    NomError(#[from_nom] ErrorKind),
    UndefinedAddressFamily(#[from_external] UndefinedAddressFamily),
}

fn parse_family(buf: Span<'_>) -> IResult<Span<'_>, u16, LocatedAddressError<'_>> {
    map_res(be_u16, |family| match family {
        1 | 2 => Ok(family),
        other => Err(UndefinedAddressFamily(other)),
    })(buf)
}

fn main() {
    let buf = [0u8, 9];
    let span = Span::new(&buf);
    assert_eq!(
        parse_family(span),
        Err(nom::Err::Error(LocatedAddressError::new(
            span,
            AddressError::UndefinedAddressFamily(UndefinedAddressFamily(9))
        )))
    );
}
