use {
    crate::{ComError, framing},
    base::*,
    codec::Codec,
    std::{
        collections::{HashMap, VecDeque},
        marker::PhantomData,
        net::SocketAddr,
        sync::{
            Arc, Mutex,
            atomic::{AtomicBool, AtomicU64, Ordering},
        },
    },
    tokio::{
        io::AsyncWriteExt,
        net::{TcpListener, TcpStream, ToSocketAddrs, tcp::OwnedWriteHalf},
        sync::{
            Notify, RwLock,
            mpsc::{self, error::TrySendError},
        },
        task::JoinHandle,
    },
};

// delay after a failed accept, so a persistent error does not spin
const ACCEPT_BACKOFF_MS: u64 = 100;

/// Frames buffered per subscriber before new ones are dropped for it.
pub const SUBSCRIBER_BACKLOG: usize = 16;

// sending side of a subscriber's backlog; a detached task drains it into the socket
struct Outlet {
    frames: mpsc::Sender<Arc<Vec<u8>>>,
    skipped: u64,
}

impl Outlet {
    fn new(addr: SocketAddr, mut writer: OwnedWriteHalf) -> Self {
        let (frames, mut backlog) = mpsc::channel::<Arc<Vec<u8>>>(SUBSCRIBER_BACKLOG);
        tokio::spawn(async move {
            while let Some(frame) = backlog.recv().await {
                if let Err(e) = writer.write_all(&frame).await {
                    log_warn!("subscriber {} write failed: {}", addr, e);
                    break;
                }
            }
        });
        Self { frames, skipped: 0 }
    }
}

/// Broadcasting end of a topic.
///
/// Every subscriber has its own writer task and backlog, so a subscriber
/// that stops reading only loses its own messages and never holds up
/// `publish` or the other subscribers.
pub struct Publisher<T> {
    subscribers: Arc<RwLock<HashMap<SocketAddr, Outlet>>>,
    accept_task: JoinHandle<()>,
    local_addr: SocketAddr,
    _marker: PhantomData<T>,
}

impl<T: Codec> Publisher<T> {
    /// Bind the topic address and start accepting subscribers in the background.
    pub async fn bind(addr: impl ToSocketAddrs) -> Result<Self, ComError> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        let subscribers = Arc::new(RwLock::new(HashMap::new()));
        let accept_task = tokio::spawn({
            let subscribers = Arc::clone(&subscribers);
            async move {
                loop {
                    match listener.accept().await {
                        Ok((stream, addr)) => {
                            log_debug!("subscriber {} connected", addr);
                            let (_, write_half) = stream.into_split();
                            subscribers
                                .write()
                                .await
                                .insert(addr, Outlet::new(addr, write_half));
                        }
                        Err(e) => {
                            log_warn!("accept error: {}", e);
                            tokio::time::sleep(std::time::Duration::from_millis(
                                ACCEPT_BACKOFF_MS,
                            ))
                            .await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            subscribers,
            accept_task,
            local_addr,
            _marker: PhantomData,
        })
    }

    /// Queue a message for every connected subscriber.
    ///
    /// This never waits on the network. A subscriber whose backlog is full
    /// skips the message, and one whose connection failed is dropped from
    /// the topic. Only encoding the message can fail this call.
    pub async fn publish(&self, value: &T) -> Result<(), ComError> {
        let frame = Arc::new(framing::encode_message(value)?);

        let mut lock = self.subscribers.write().await;
        lock.retain(|addr, outlet| {
            match outlet.frames.try_send(Arc::clone(&frame)) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    outlet.skipped += 1;
                    log_debug!(
                        "subscriber {} is behind, skipped {} messages",
                        addr,
                        outlet.skipped
                    );
                    true
                }
                Err(TrySendError::Closed(_)) => {
                    log_warn!("dropping subscriber {}", addr);
                    false
                }
            }
        });

        Ok(())
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

impl<T> Drop for Publisher<T> {
    // writer tasks still flush their backlog, then close the connection
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

struct Inbox<T> {
    queue: Mutex<VecDeque<T>>,
    notify: Notify,
    closed: AtomicBool,
    dropped: AtomicU64,
}

impl<T> Inbox<T> {
    fn push(&self, value: T, queue_size: usize) {
        {
            let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
            if queue.len() == queue_size {
                queue.pop_front();
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
            queue.push_back(value);
        }
        self.notify.notify_one();
    }

    fn pop(&self) -> Option<T> {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).pop_front()
    }
}

/// Receiving end of a topic.
///
/// A background task reads messages as they arrive and keeps at most
/// `queue_size` of them. When the queue is full the oldest message is
/// discarded, so a slow consumer always sees the most recent data.
pub struct Subscriber<T> {
    inbox: Arc<Inbox<T>>,
    read_task: JoinHandle<()>,
}

impl<T: Codec + Send + 'static> Subscriber<T> {
    pub async fn connect(addr: impl ToSocketAddrs, queue_size: usize) -> Result<Self, ComError> {
        let stream = TcpStream::connect(addr).await?;
        let peer = stream.peer_addr()?;
        let (mut reader, _) = stream.into_split();
        let queue_size = queue_size.max(1);

        let inbox = Arc::new(Inbox {
            queue: Mutex::new(VecDeque::with_capacity(queue_size)),
            notify: Notify::new(),
            closed: AtomicBool::new(false),
            dropped: AtomicU64::new(0),
        });

        let read_task = tokio::spawn({
            let inbox = Arc::clone(&inbox);
            async move {
                loop {
                    match framing::read_message::<T, _>(&mut reader).await {
                        Ok(value) => inbox.push(value, queue_size),
                        Err(ComError::Decode(e)) => {
                            log_warn!("discarding undecodable message from {}: {}", peer, e);
                        }
                        Err(e) => {
                            log_info!("topic {} closed: {}", peer, e);
                            break;
                        }
                    }
                }
                inbox.closed.store(true, Ordering::Release);
                inbox.notify.notify_one();
            }
        });

        Ok(Self { inbox, read_task })
    }

    /// Wait for the next queued message.
    ///
    /// Messages already queued are still delivered after the publisher goes
    /// away; after that this returns `ComError::ConnectionClosed`.
    pub async fn recv(&mut self) -> Result<T, ComError> {
        loop {
            if let Some(value) = self.inbox.pop() {
                return Ok(value);
            }
            if self.inbox.closed.load(Ordering::Acquire) {
                // the reader may have queued one last message before closing
                return self.inbox.pop().ok_or(ComError::ConnectionClosed);
            }
            self.inbox.notify.notified().await;
        }
    }

    /// Number of messages discarded because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.inbox.dropped.load(Ordering::Relaxed)
    }
}

impl<T> Drop for Subscriber<T> {
    fn drop(&mut self) {
        self.read_task.abort();
    }
}
