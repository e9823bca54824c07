use {
    crate::ComError,
    codec::Codec,
    tokio::io::{AsyncReadExt, AsyncWriteExt},
};

pub const MAX_MESSAGE_SIZE: u32 = 64 * 1024 * 1024; // 64 MB

/// Encode `value` into a complete frame: 4-byte little-endian length, then payload.
///
/// Publishers encode once and write the same frame to every subscriber.
pub fn encode_message<T: Codec>(value: &T) -> Result<Vec<u8>, ComError> {
    let mut frame = vec![0u8; 4];
    value.encode(&mut frame);
    let len = u32::try_from(frame.len() - 4).map_err(|_| ComError::MessageTooLarge(u32::MAX))?;
    if len > MAX_MESSAGE_SIZE {
        return Err(ComError::MessageTooLarge(len));
    }
    frame[..4].copy_from_slice(&len.to_le_bytes());
    Ok(frame)
}

pub async fn write_message<T: Codec, W: AsyncWriteExt + Unpin>(
    writer: &mut W,
    value: &T,
) -> Result<(), ComError> {
    let frame = encode_message(value)?;
    writer.write_all(&frame).await?;
    Ok(())
}

/// Read one frame and decode it as `T`.
///
/// Returns `ComError::ConnectionClosed` if the peer goes away, including in
/// the middle of a frame, and `ComError::MessageTooLarge` before reading a
/// payload longer than `MAX_MESSAGE_SIZE`. A payload that fails to decode is
/// consumed whole, so the next read starts on a frame boundary.
pub async fn read_message<T: Codec, R: AsyncReadExt + Unpin>(
    reader: &mut R,
) -> Result<T, ComError> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await?;

    let len = u32::from_le_bytes(len_buf);
    if len > MAX_MESSAGE_SIZE {
        return Err(ComError::MessageTooLarge(len));
    }

    let mut payload = vec![0u8; len as usize];
    reader.read_exact(&mut payload).await?;

    T::from_bytes(&payload).map_err(ComError::from)
}
