use crate::SamplerChannel;
use malcolm_sampler::SamplerError;
use malcolm_sampler::frame::{Frame, FrameKind};
use malcolm_sampler_service::SamplerMethod;
use std::io;

/// Sends a complete request stream: `Open`, one `Data` frame per payload, `End`.
///
/// Payloads are transmitted in iteration order.
pub async fn send_request_stream<C>(
    channel: &mut C,
    method_id: u64,
    payloads: Vec<Vec<u8>>,
) -> Result<(), SamplerError>
where
    C: SamplerChannel + ?Sized,
{
    channel.send_frame(Frame::open(method_id)).await?;

    let count = payloads.len();
    for payload in payloads {
        channel.send_frame(Frame::data(payload)).await?;
    }

    channel.send_frame(Frame::end()).await?;

    tracing::debug!("Sent {} request unit(s) for method {:#018x}", count, method_id);

    Ok(())
}

/// Reads the next response payload.
///
/// Returns `Ok(None)` on `End`. An `Error` frame becomes `SamplerError::Remote`;
/// a channel that closes before `End` is a transport error.
pub async fn read_next_response<C>(channel: &mut C) -> Result<Option<Vec<u8>>, SamplerError>
where
    C: SamplerChannel + ?Sized,
{
    let frame = channel.recv_frame().await?.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "channel closed before the response stream ended",
        )
    })?;

    match frame.kind {
        FrameKind::Data => Ok(Some(frame.payload)),
        FrameKind::End => Ok(None),
        FrameKind::Error => {
            let (status, message) = frame.error_parts().map_err(io::Error::from)?;
            tracing::warn!("Service rejected call ({:?}): {}", status, message);
            Err(SamplerError::Remote { status, message })
        }
        FrameKind::Open => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "unexpected Open frame in response stream",
        )
        .into()),
    }
}

/// Reads a response stream that must contain exactly one message.
pub async fn read_unary_response<M, C>(channel: &mut C) -> Result<M::Response, SamplerError>
where
    M: SamplerMethod,
    C: SamplerChannel + ?Sized,
{
    let payload = read_next_response(channel).await?.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} returned no response", M::NAME),
        )
    })?;

    if read_next_response(channel).await?.is_some() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} returned more than one response", M::NAME),
        )
        .into());
    }

    Ok(M::decode_response(&payload)?)
}

/// Closes a channel whose call has already produced its result.
///
/// A failed close cannot change that result, so it is logged, not returned.
pub async fn release_channel<C>(mut channel: C)
where
    C: SamplerChannel,
{
    if let Err(err) = channel.close().await {
        tracing::debug!("Ignoring error while closing channel: {}", err);
    }
}
