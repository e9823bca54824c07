use com::{ComError, framing};
use tokio::io::AsyncWriteExt;

#[tokio::test]
async fn test_frame_layout() {
    let frame = framing::encode_message(&7u32).expect("encode failed");
    assert_eq!(frame, vec![4, 0, 0, 0, 7, 0, 0, 0]);
}

#[tokio::test]
async fn test_write_then_read() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    framing::write_message(&mut writer, &"ball".to_string())
        .await
        .expect("write failed");

    let decoded: String = framing::read_message(&mut reader)
        .await
        .expect("read failed");
    assert_eq!(decoded, "ball");
}

#[tokio::test]
async fn test_messages_arrive_in_sequence() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    for value in [10u32, 20, 30] {
        framing::write_message(&mut writer, &value).await.unwrap();
    }

    for expected in [10u32, 20, 30] {
        let value: u32 = framing::read_message(&mut reader).await.unwrap();
        assert_eq!(value, expected);
    }
}

#[tokio::test]
async fn test_partial_prefix_is_connection_closed() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    writer.write_all(&[0x01, 0x02]).await.unwrap();
    drop(writer);

    let result: Result<u32, ComError> = framing::read_message(&mut reader).await;
    match result {
        Err(ComError::ConnectionClosed) => {}
        other => panic!("expected ConnectionClosed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_partial_payload_is_connection_closed() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    writer.write_all(&8u32.to_le_bytes()).await.unwrap();
    writer.write_all(&[1, 2, 3]).await.unwrap();
    drop(writer);

    let result: Result<u64, ComError> = framing::read_message(&mut reader).await;
    match result {
        Err(ComError::ConnectionClosed) => {}
        other => panic!("expected ConnectionClosed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_oversized_length_rejected() {
    let (mut writer, mut reader) = tokio::io::duplex(16);

    let huge_length = framing::MAX_MESSAGE_SIZE + 1;
    writer.write_all(&huge_length.to_le_bytes()).await.unwrap();

    let result: Result<u32, ComError> = framing::read_message(&mut reader).await;
    match result {
        Err(ComError::MessageTooLarge(len)) => assert_eq!(len, huge_length),
        other => panic!("expected MessageTooLarge, got {:?}", other),
    }
}

#[tokio::test]
async fn test_undecodable_payload_keeps_stream_aligned() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    // a bool frame with an invalid byte, followed by a valid frame
    writer.write_all(&1u32.to_le_bytes()).await.unwrap();
    writer.write_all(&[7]).await.unwrap();
    framing::write_message(&mut writer, &true).await.unwrap();

    let first: Result<bool, ComError> = framing::read_message(&mut reader).await;
    assert!(matches!(first, Err(ComError::Decode(_))));

    let second: bool = framing::read_message(&mut reader).await.unwrap();
    assert!(second);
}

struct OversizedPayload(usize);

impl codec::Codec for OversizedPayload {
    fn encode(&self, buf: &mut Vec<u8>) {
        buf.resize(buf.len() + self.0, 0);
    }

    fn decode(_buf: &[u8], _pos: &mut usize) -> Result<Self, codec::DecodeError> {
        Err(codec::DecodeError::UnexpectedEof)
    }
}

#[tokio::test]
async fn test_oversized_payload_not_written() {
    let oversized = OversizedPayload((framing::MAX_MESSAGE_SIZE as usize) + 1);
    match framing::encode_message(&oversized) {
        Err(ComError::MessageTooLarge(len)) => assert_eq!(len, framing::MAX_MESSAGE_SIZE + 1),
        other => panic!("expected MessageTooLarge, got {:?}", other.map(|f| f.len())),
    }
}
