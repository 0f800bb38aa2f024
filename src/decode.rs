use super::*;

/// Raw bytes waiting to be decoded as UTF-8.
pub struct Decode {
    bytes: Vec<u8>,
}

impl Decode {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Decode { bytes: bytes.into() }
    }
}

impl TextSetup for Decode {
    fn setup(&mut self) -> Result<String, LazyError> {
        String::from_utf8(std::mem::take(&mut self.bytes)).map_err(|e| {
            let error = e.utf8_error();
            self.bytes = e.into_bytes();
            error.into()
        })
    }
}

pub type LazyDecode = LazyText<Decode>;

pub type LazyDecodeSync = LazyText<Decode, LazySync<TextProducer<Decode>>>;

impl LazyDecode {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        LazyText::new(Decode::new(bytes))
    }
}

impl LazyDecodeSync {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        LazyText::new(Decode::new(bytes))
    }
}
