use nom::{
    bytes::complete::take,
    number::complete::{le_i32, le_u32},
    Parser,
};

use crate::error::Dc6Error;

type NomError<'a> = nom::error::Error<&'a [u8]>;

/// Forward-only reader over a byte buffer.
///
/// Every read either consumes exactly what it asked for or fails with
/// [`Dc6Error::TruncatedInput`] and leaves the position untouched.
pub struct ByteCursor<'a> {
    input: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.input.len() - self.offset
    }

    fn read_with<T, P>(
        &mut self,
        field: &'static str,
        requested: usize,
        mut parser: P,
    ) -> Result<T, Dc6Error>
    where
        P: Parser<&'a [u8], Output = T, Error = NomError<'a>>,
    {
        let rest = &self.input[self.offset..];

        match parser.parse(rest) {
            Ok((after, value)) => {
                self.offset += rest.len() - after.len();
                Ok(value)
            }
            Err(_) => Err(Dc6Error::TruncatedInput {
                field,
                offset: self.offset,
                requested,
                remaining: rest.len(),
            }),
        }
    }

    pub fn read_i32(&mut self, field: &'static str) -> Result<i32, Dc6Error> {
        self.read_with(field, 4, le_i32::<&'a [u8], NomError<'a>>)
    }

    pub fn read_u32(&mut self, field: &'static str) -> Result<u32, Dc6Error> {
        self.read_with(field, 4, le_u32::<&'a [u8], NomError<'a>>)
    }

    pub fn read_bytes(&mut self, field: &'static str, n: usize) -> Result<&'a [u8], Dc6Error> {
        self.read_with(field, n, take::<usize, &'a [u8], NomError<'a>>(n))
    }

    /// Reads exactly `N` bytes into an owned array.
    pub fn read_array<const N: usize>(
        &mut self,
        field: &'static str,
    ) -> Result<[u8; N], Dc6Error> {
        let bytes = self.read_bytes(field, N)?;
        let mut res = [0u8; N];
        res.copy_from_slice(bytes);

        Ok(res)
    }
}
