//! Fuzz target: frame decoding and request dispatch
//!
//! Drives arbitrary bytes through both decoders and the request engine as
//! if written to the receive characteristic. Asserts that nothing panics,
//! that the strict decoder never accepts what the lenient one rejects, and
//! that any response is a well-formed frame.
//!
//! cargo fuzz run fuzz_frame_decoder

#![no_main]

use activehub::gatt::{CHAR_RECEIVE, ServiceDescriptor};
use activehub::rpc::codec::{HEADER_SIZE, decode_frame, decode_frame_strict};
use activehub::rpc::engine::RequestEngine;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let lenient = decode_frame(data);
    if let Ok(payload) = lenient {
        assert_eq!(payload.len(), data.len() - HEADER_SIZE);
    }
    if decode_frame_strict(data).is_ok() {
        assert!(lenient.is_ok(), "strict accepted what lenient rejected");
    }

    let engine = RequestEngine::new(ServiceDescriptor::ACTIVE_HUB);
    if let Ok(frame) = engine.process(CHAR_RECEIVE, data) {
        assert_eq!(decode_frame_strict(frame.as_bytes()), Ok(frame.payload()));
    }
});
