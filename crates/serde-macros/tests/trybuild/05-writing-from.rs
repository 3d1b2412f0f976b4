use diameter_serde_macros::WritingError;
use std::io::Write;

#[derive(WritingError, Eq, PartialEq, Debug, Clone)]
pub enum AvpWritingError {
    StdIOError(#[from_std_io_error] String),
}

#[derive(WritingError, Eq, PartialEq, Debug, Clone)]
pub enum MessageWritingError {
    StdIOError(#[from_std_io_error] String),
    AvpError(#[from] AvpWritingError),
}

fn write_avp(buf: &mut [u8]) -> Result<(), AvpWritingError> {
    let mut cursor = std::io::Cursor::new(buf);
    cursor.write_all(&[0u8; 8])?;
    Ok(())
}

fn write_message(buf: &mut [u8]) -> Result<(), MessageWritingError> {
    write_avp(buf)?;
    Ok(())
}

fn main() {
    let mut small = [0u8; 4];
    let err = write_message(&mut small);
    assert!(matches!(
        err,
        Err(MessageWritingError::AvpError(AvpWritingError::StdIOError(_)))
    ));
    let mut large = [0u8; 8];
    assert_eq!(write_message(&mut large), Ok(()));
}
