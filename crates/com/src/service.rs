use {
    crate::{ComError, framing},
    base::*,
    codec::Codec,
    std::{future::Future, marker::PhantomData, net::SocketAddr, sync::Arc},
    tokio::{
        net::{
            TcpListener, TcpStream, ToSocketAddrs,
            tcp::{OwnedReadHalf, OwnedWriteHalf},
        },
        task::JoinHandle,
    },
};

const ACCEPT_BACKOFF_MS: u64 = 100;

/// Answering end of a service.
///
/// Every connection gets its own task, which reads requests one at a time,
/// awaits the handler and writes the response before reading the next request.
pub struct ServiceServer<Req, Resp> {
    accept_task: JoinHandle<()>,
    local_addr: SocketAddr,
    _marker: PhantomData<fn(Req) -> Resp>,
}

impl<Req, Resp> ServiceServer<Req, Resp>
where
    Req: Codec + Send + 'static,
    Resp: Codec + Send + Sync + 'static,
{
    pub async fn bind<F, Fut>(addr: impl ToSocketAddrs, handler: F) -> Result<Self, ComError>
    where
        F: Fn(Req) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Resp> + Send,
    {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let handler = Arc::new(handler);

        let accept_task = tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((stream, addr)) => {
                        log_debug!("service client {} connected", addr);
                        let handler = Arc::clone(&handler);
                        tokio::spawn(async move {
                            let (mut reader, mut writer) = stream.into_split();
                            loop {
                                let request = match framing::read_message::<Req, _>(&mut reader).await {
                                    Ok(request) => request,
                                    Err(ComError::ConnectionClosed) => {
                                        log_debug!("service client {} disconnected", addr);
                                        break;
                                    }
                                    Err(e) => {
                                        // without a request there is no response to send, so hang up
                                        log_warn!("dropping service client {}: {}", addr, e);
                                        break;
                                    }
                                };
                                let response = handler(request).await;
                                if let Err(e) = framing::write_message(&mut writer, &response).await {
                                    log_warn!("failed to answer service client {}: {}", addr, e);
                                    break;
                                }
                            }
                        });
                    }
                    Err(e) => {
                        log_warn!("accept error: {}", e);
                        tokio::time::sleep(std::time::Duration::from_millis(ACCEPT_BACKOFF_MS))
                            .await;
                    }
                }
            }
        });

        Ok(Self {
            accept_task,
            local_addr,
            _marker: PhantomData,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

impl<Req, Resp> Drop for ServiceServer<Req, Resp> {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

/// Calling end of a service.
pub struct ServiceClient<Req, Resp> {
    reader: OwnedReadHalf,
    writer: OwnedWriteHalf,
    _marker: PhantomData<fn(Req) -> Resp>,
}

impl<Req: Codec, Resp: Codec> ServiceClient<Req, Resp> {
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, ComError> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        let (reader, writer) = stream.into_split();
        Ok(Self {
            reader,
            writer,
            _marker: PhantomData,
        })
    }

    /// Send one request and wait for its response.
    pub async fn call(&mut self, request: &Req) -> Result<Resp, ComError> {
        framing::write_message(&mut self.writer, request).await?;
        framing::read_message(&mut self.reader).await
    }
}
