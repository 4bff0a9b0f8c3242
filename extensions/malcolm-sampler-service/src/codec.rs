use std::io;

pub(crate) fn decode_wire<T: bitcode::DecodeOwned>(bytes: &[u8]) -> Result<T, io::Error> {
    bitcode::decode::<T>(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
