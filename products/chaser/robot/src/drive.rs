use {
    crate::{ChaserError, MotionCommand},
    base::*,
    codec::{Codec, DecodeError},
    com::{ComError, Publisher, ServiceClient, ServiceServer},
    std::{future::Future, sync::Arc},
    tokio::net::ToSocketAddrs,
};

/// Request of the drive service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveRequest {
    pub linear_x: f64,
    pub angular_z: f64,
}

impl From<MotionCommand> for DriveRequest {
    fn from(command: MotionCommand) -> Self {
        Self {
            linear_x: command.linear_x,
            angular_z: command.angular_z,
        }
    }
}

impl Codec for DriveRequest {
    fn encode(&self, buf: &mut Vec<u8>) {
        self.linear_x.encode(buf);
        self.angular_z.encode(buf);
    }

    fn decode(buf: &[u8], pos: &mut usize) -> Result<Self, DecodeError> {
        Ok(Self {
            linear_x: f64::decode(buf, pos)?,
            angular_z: f64::decode(buf, pos)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriveResponse {
    pub msg_feedback: String,
}

impl Codec for DriveResponse {
    fn encode(&self, buf: &mut Vec<u8>) {
        self.msg_feedback.encode(buf);
    }

    fn decode(buf: &[u8], pos: &mut usize) -> Result<Self, DecodeError> {
        Ok(Self {
            msg_feedback: String::decode(buf, pos)?,
        })
    }
}

/// Wheel velocity, published on the wheel topic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Twist {
    pub linear_x: f64,
    pub angular_z: f64,
}

impl Codec for Twist {
    fn encode(&self, buf: &mut Vec<u8>) {
        self.linear_x.encode(buf);
        self.angular_z.encode(buf);
    }

    fn decode(buf: &[u8], pos: &mut usize) -> Result<Self, DecodeError> {
        Ok(Self {
            linear_x: f64::decode(buf, pos)?,
            angular_z: f64::decode(buf, pos)?,
        })
    }
}

/// Where the chaser sends its commands.
pub trait CommandSink {
    fn drive(
        &mut self,
        command: MotionCommand,
    ) -> impl Future<Output = Result<(), ChaserError>> + Send;
}

/// `CommandSink` that calls the drive service.
///
/// The connection is made on first use and dropped when a call fails. A call
/// that fails because the connection was lost is retried once over a fresh
/// connection, so the drive service may start late or restart.
pub struct DriveClient {
    addr: String,
    client: Option<ServiceClient<DriveRequest, DriveResponse>>,
}

impl DriveClient {
    /// Client that connects on the first command.
    pub fn new(addr: impl ToString) -> Self {
        Self {
            addr: addr.to_string(),
            client: None,
        }
    }

    /// Client that is connected right away.
    pub async fn connect(addr: impl ToString) -> Result<Self, ChaserError> {
        let addr = addr.to_string();
        let client = ServiceClient::connect(addr.as_str()).await?;
        Ok(Self {
            addr,
            client: Some(client),
        })
    }

    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    async fn call(&mut self, request: &DriveRequest) -> Result<DriveResponse, ComError> {
        let mut client = match self.client.take() {
            Some(client) => client,
            None => ServiceClient::connect(self.addr.as_str()).await?,
        };
        let response = client.call(request).await?;
        self.client = Some(client);
        Ok(response)
    }
}

impl CommandSink for DriveClient {
    // the feedback is only informational
    async fn drive(&mut self, command: MotionCommand) -> Result<(), ChaserError> {
        let request = DriveRequest::from(command);
        let had_connection = self.client.is_some();
        let response = match self.call(&request).await {
            Err(ComError::ConnectionClosed | ComError::Io(_)) if had_connection => {
                log_info!("drive service at {} went away, reconnecting", self.addr);
                self.call(&request).await?
            }
            result => result?,
        };
        log_debug!("drive service: {}", response.msg_feedback);
        Ok(())
    }
}

pub fn drive_feedback(request: &DriveRequest) -> String {
    format!(
        "Wheel velocities set - linear_x: {:.2}, angular_z: {:.2}",
        request.linear_x, request.angular_z
    )
}

/// Serve the drive service, forwarding every request to the wheel topic.
pub async fn serve_drive(
    addr: impl ToSocketAddrs,
    wheels: Arc<Publisher<Twist>>,
) -> Result<ServiceServer<DriveRequest, DriveResponse>, ComError> {
    ServiceServer::bind(addr, move |request: DriveRequest| {
        let wheels = Arc::clone(&wheels);
        async move {
            let twist = Twist {
                linear_x: request.linear_x,
                angular_z: request.angular_z,
            };
            if let Err(e) = wheels.publish(&twist).await {
                log_warn!("failed to publish wheel command: {}", e);
            }
            let msg_feedback = drive_feedback(&request);
            log_info!("{}", msg_feedback);
            DriveResponse { msg_feedback }
        }
    })
    .await
}
