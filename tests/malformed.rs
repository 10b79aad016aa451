use aiffix::prelude::*;
use pretty_assertions::assert_eq;

fn chunk(id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(id);
    bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    bytes.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        bytes.push(0);
    }
    bytes
}

fn expect_malformed(err: &ReaderError) -> (&ChunkId, usize, &SchemaError) {
    match err.error_kind() {
        ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::Malformed {
            id,
            offset,
            source,
        })) => (id, *offset, source),
        other => panic!("expected a malformed-chunk error, got {other:?}"),
    }
}

#[test]
fn empty_input_parses_to_an_empty_file() {
    let file = AiffFile::parse(&[]).unwrap();
    assert_eq!(file.chunks.len(), 0);
    assert_eq!(file.summary, Summary::default());
}

#[test]
fn truncated_top_level_chunk_reports_the_overrun() {
    // the header promises 100 payload bytes, only 10 follow
    let mut bytes = b"FORM".to_vec();
    bytes.extend_from_slice(&100u32.to_be_bytes());
    bytes.extend_from_slice(&[0; 10]);

    let err = AiffFile::parse(&bytes).unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 0);

    let (id, offset, source) = expect_malformed(&err);
    assert_eq!(*id, id::FORM);
    assert_eq!(offset, 0);
    assert!(source.is_out_of_range());
}

#[test]
fn truncated_local_chunk_names_the_chunk_and_its_position() {
    // the COMM header promises 18 payload bytes, only 10 follow; the
    // FORM size is consistent with the shortened buffer
    let mut comm = b"COMM".to_vec();
    comm.extend_from_slice(&18u32.to_be_bytes());
    comm.extend_from_slice(&[0; 10]);

    let mut payload = b"AIFF".to_vec();
    payload.extend_from_slice(&comm);
    let bytes = chunk(b"FORM", &payload);

    let err = AiffFile::parse(&bytes).unwrap_err();
    assert!(err.is_out_of_bounds());
    // absolute offset of the COMM header: 8 for the FORM frame, 4 for
    // the form-type tag
    assert_eq!(err.position(), 12);

    let (id, offset, source) = expect_malformed(&err);
    assert_eq!(*id, id::COMMON);
    assert_eq!(offset, 4);
    assert!(source.is_out_of_range());
}

#[test]
fn form_payload_shorter_than_its_tag_is_an_overrun() {
    let bytes = chunk(b"FORM", b"AI");

    let err = AiffFile::parse(&bytes).unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 8);
}

#[test]
fn unknown_form_type_is_rejected() {
    let bytes = chunk(b"FORM", b"WAVEextra bytes");

    let err = AiffFile::parse(&bytes).unwrap_err();
    match err.error_kind() {
        ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::InvalidFormType {
            form,
            offset,
        })) => {
            assert_eq!(form.as_str(), Some("WAVE"));
            assert_eq!(*offset, 0);
        }
        other => panic!("expected an invalid-form-type error, got {other:?}"),
    }
}

#[test]
fn negative_chunk_size_is_rejected() {
    let mut comm = b"COMM".to_vec();
    comm.extend_from_slice(&(-2i32).to_be_bytes());

    let mut payload = b"AIFF".to_vec();
    payload.extend_from_slice(&comm);
    let bytes = chunk(b"FORM", &payload);

    let err = AiffFile::parse(&bytes).unwrap_err();
    let (id, _, source) = expect_malformed(&err);
    assert_eq!(*id, id::COMMON);
    assert_eq!(
        *source,
        SchemaError::NegativeSize {
            field: "chunkData",
            size: -2,
        }
    );
}

#[test]
fn out_of_range_play_mode_is_rejected() {
    let mut inst = Vec::new();
    inst.extend_from_slice(&[60, 0, 0, 127, 0, 127]);
    inst.extend_from_slice(&0i16.to_be_bytes()); // gain
    inst.extend_from_slice(&5i16.to_be_bytes()); // playMode out of range
    inst.extend_from_slice(&[0; 4]);
    inst.extend_from_slice(&[0; 6]); // release loop

    let mut payload = b"AIFF".to_vec();
    payload.extend_from_slice(&chunk(b"INST", &inst));
    let bytes = chunk(b"FORM", &payload);

    let err = AiffFile::parse(&bytes).unwrap_err();
    let (id, offset, source) = expect_malformed(&err);
    assert_eq!(*id, id::INSTRUMENT);
    assert_eq!(offset, 4);
    assert_eq!(*source, SchemaError::InvalidPlayMode(5));
}

#[test]
fn comment_text_is_validated_as_utf8() {
    let mut comt = Vec::new();
    comt.extend_from_slice(&0u32.to_be_bytes()); // timeStamp
    comt.extend_from_slice(&0i16.to_be_bytes()); // marker
    comt.extend_from_slice(&2u16.to_be_bytes()); // count
    comt.extend_from_slice(&[0xFF, 0xFE]);

    let mut payload = b"AIFF".to_vec();
    payload.extend_from_slice(&chunk(b"COMT", &comt));
    let bytes = chunk(b"FORM", &payload);

    let err = AiffFile::parse(&bytes).unwrap_err();
    let (id, _, source) = expect_malformed(&err);
    assert_eq!(*id, id::COMMENT);
    assert_eq!(*source, SchemaError::InvalidText { field: "text" });
}

#[test]
fn sound_chunk_smaller_than_its_fixed_fields_is_rejected() {
    let mut ssnd = b"SSND".to_vec();
    ssnd.extend_from_slice(&4u32.to_be_bytes()); // below the 8 fixed bytes
    ssnd.extend_from_slice(&[0; 4]);

    let mut payload = b"AIFF".to_vec();
    payload.extend_from_slice(&ssnd);
    let bytes = chunk(b"FORM", &payload);

    let err = AiffFile::parse(&bytes).unwrap_err();
    let (id, _, source) = expect_malformed(&err);
    assert_eq!(*id, id::SOUND);
    assert_eq!(
        *source,
        SchemaError::NegativeSize {
            field: "soundData",
            size: -4,
        }
    );
}

#[test]
fn marker_name_running_past_the_chunk_is_an_overrun() {
    let mut mark = Vec::new();
    mark.extend_from_slice(&1u16.to_be_bytes()); // numMarkers
    mark.extend_from_slice(&1i16.to_be_bytes()); // id
    mark.extend_from_slice(&0u32.to_be_bytes()); // position
    mark.push(200); // length prefix beyond the remaining bytes
    mark.push(b'x');

    let mut payload = b"AIFF".to_vec();
    payload.extend_from_slice(&chunk(b"MARK", &mark));
    let bytes = chunk(b"FORM", &payload);

    let err = AiffFile::parse(&bytes).unwrap_err();
    let (id, _, source) = expect_malformed(&err);
    assert_eq!(*id, id::MARKER);
    assert!(source.is_out_of_range());
}
