use prost::Message;
use thiserror::Error;

use super::proto::WriteRequest;

/// Upper bound on the decompressed payload, checked against the length the
/// snappy header declares before anything is allocated.
pub const MAX_DECODED_LEN: usize = 32 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("snappy: {0}")]
    Snappy(#[from] snap::Error),
    #[error("protobuf: {0}")]
    Protobuf(#[from] prost::DecodeError),
    #[error("decompressed payload of {len} bytes exceeds limit of {limit} bytes")]
    TooLarge { len: usize, limit: usize },
}

/// Decode a remote-write request body.
pub fn decode(body: &[u8]) -> Result<WriteRequest, DecodeError> {
    let len = snap::raw::decompress_len(body)?;
    if len > MAX_DECODED_LEN {
        return Err(DecodeError::TooLarge {
            len,
            limit: MAX_DECODED_LEN,
        });
    }

    let raw = snap::raw::Decoder::new().decompress_vec(body)?;
    Ok(WriteRequest::decode(raw.as_slice())?)
}

#[cfg(test)]
pub(crate) fn encode(request: &WriteRequest) -> Vec<u8> {
    snap::raw::Encoder::new()
        .compress_vec(&request.encode_to_vec())
        .expect("snappy compress")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote_write::proto::{Exemplar, Label, Sample, TimeSeries};

    fn label(name: &str, value: &str) -> Label {
        Label {
            name: name.into(),
            value: value.into(),
        }
    }

    fn single_series() -> WriteRequest {
        WriteRequest {
            timeseries: vec![TimeSeries {
                labels: vec![label("job", "test")],
                samples: vec![Sample {
                    value: 1.0,
                    timestamp: 1000,
                }],
                exemplars: vec![Exemplar {
                    labels: vec![label("trace_id", "abc123")],
                    value: 0.5,
                    timestamp: 1001,
                }],
            }],
            metadata: vec![],
        }
    }

    #[test]
    fn decodes_well_formed_payload() {
        let request = single_series();
        let decoded = decode(&encode(&request)).unwrap();
        assert_eq!(decoded, request);
        assert_eq!(decoded.sample_count(), 1);
        assert_eq!(decoded.exemplar_count(), 1);
    }

    #[test]
    fn empty_write_request_is_valid() {
        let decoded = decode(&encode(&WriteRequest::default())).unwrap();
        assert!(decoded.timeseries.is_empty());
    }

    #[test]
    fn rejects_uncompressed_protobuf() {
        let err = decode(&single_series().encode_to_vec()).unwrap_err();
        assert!(matches!(err, DecodeError::Snappy(_)), "{err}");
    }

    #[test]
    fn rejects_truncated_payload() {
        let body = encode(&single_series());
        let err = decode(&body[..body.len() / 2]).unwrap_err();
        assert!(matches!(err, DecodeError::Snappy(_)), "{err}");
    }

    #[test]
    fn rejects_empty_body() {
        assert!(decode(&[]).is_err());
    }

    #[test]
    fn rejects_snappy_wrapped_garbage() {
        let body = snap::raw::Encoder::new()
            .compress_vec(&[0x0a, 0xff, 0xff])
            .unwrap();
        let err = decode(&body).unwrap_err();
        assert!(matches!(err, DecodeError::Protobuf(_)), "{err}");
    }

    #[test]
    fn rejects_oversized_declared_length() {
        // varint 0x7fff_ffff followed by nothing
        let body = [0xff, 0xff, 0xff, 0xff, 0x07];
        let err = decode(&body).unwrap_err();
        assert!(matches!(err, DecodeError::TooLarge { .. }), "{err}");
    }
}
