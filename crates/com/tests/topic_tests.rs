use com::{ComError, Publisher, Subscriber};
use tokio::time::{Duration, sleep, timeout};

async fn wait_for_subscribers<T: codec::Codec>(publisher: &Publisher<T>, count: usize) {
    timeout(Duration::from_secs(5), async {
        while publisher.subscriber_count().await < count {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("subscribers did not connect");
}

#[tokio::test]
async fn test_single_subscriber_receives() {
    let publisher = Publisher::<u32>::bind("127.0.0.1:0").await.expect("bind failed");
    let mut subscriber = Subscriber::<u32>::connect(publisher.local_addr(), 10)
        .await
        .expect("connect failed");
    wait_for_subscribers(&publisher, 1).await;

    publisher.publish(&100).await.expect("publish failed");

    let value = timeout(Duration::from_secs(5), subscriber.recv())
        .await
        .expect("recv timed out")
        .expect("recv failed");
    assert_eq!(value, 100);
}

#[tokio::test]
async fn test_every_subscriber_receives() {
    let publisher = Publisher::<String>::bind("127.0.0.1:0").await.unwrap();
    let addr = publisher.local_addr();

    let mut subscribers = Vec::new();
    for _ in 0..3 {
        subscribers.push(Subscriber::<String>::connect(addr, 10).await.unwrap());
    }
    wait_for_subscribers(&publisher, 3).await;

    publisher.publish(&"frame".to_string()).await.unwrap();

    for subscriber in subscribers.iter_mut() {
        let value = timeout(Duration::from_secs(5), subscriber.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(value, "frame");
    }
}

#[tokio::test]
async fn test_messages_arrive_in_order() {
    let publisher = Publisher::<u32>::bind("127.0.0.1:0").await.unwrap();
    let mut subscriber = Subscriber::<u32>::connect(publisher.local_addr(), 10)
        .await
        .unwrap();
    wait_for_subscribers(&publisher, 1).await;

    for i in 0..5u32 {
        publisher.publish(&(i * 10)).await.unwrap();
    }

    for i in 0..5u32 {
        let value = timeout(Duration::from_secs(5), subscriber.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(value, i * 10);
    }
}

#[tokio::test]
async fn test_full_queue_drops_oldest() {
    let publisher = Publisher::<u32>::bind("127.0.0.1:0").await.unwrap();
    let mut subscriber = Subscriber::<u32>::connect(publisher.local_addr(), 2)
        .await
        .unwrap();
    wait_for_subscribers(&publisher, 1).await;

    for i in 1..=5u32 {
        publisher.publish(&i).await.unwrap();
    }

    // let the reader task take in all five before consuming
    timeout(Duration::from_secs(5), async {
        while subscriber.dropped() < 3 {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("messages were not dropped");

    assert_eq!(subscriber.recv().await.unwrap(), 4);
    assert_eq!(subscriber.recv().await.unwrap(), 5);
}

#[tokio::test]
async fn test_queued_messages_survive_publisher_drop() {
    let publisher = Publisher::<u32>::bind("127.0.0.1:0").await.unwrap();
    let mut subscriber = Subscriber::<u32>::connect(publisher.local_addr(), 10)
        .await
        .unwrap();
    wait_for_subscribers(&publisher, 1).await;

    publisher.publish(&1).await.unwrap();
    publisher.publish(&2).await.unwrap();
    drop(publisher);

    assert_eq!(subscriber.recv().await.unwrap(), 1);
    assert_eq!(subscriber.recv().await.unwrap(), 2);
    let end = timeout(Duration::from_secs(5), subscriber.recv())
        .await
        .expect("recv timed out");
    assert!(matches!(end, Err(ComError::ConnectionClosed)));
}

#[tokio::test]
async fn test_disconnected_subscriber_is_dropped() {
    let publisher = Publisher::<u32>::bind("127.0.0.1:0").await.unwrap();
    let addr = publisher.local_addr();

    let mut kept = Subscriber::<u32>::connect(addr, 10).await.unwrap();
    let gone = Subscriber::<u32>::connect(addr, 10).await.unwrap();
    wait_for_subscribers(&publisher, 2).await;

    drop(gone);

    // the first writes into a closed socket may still succeed, keep publishing
    // until the publisher notices
    timeout(Duration::from_secs(5), async {
        let mut i = 0u32;
        while publisher.subscriber_count().await > 1 {
            publisher.publish(&i).await.unwrap();
            i += 1;
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("dead subscriber was not dropped");

    publisher.publish(&999).await.unwrap();
    let value = timeout(Duration::from_secs(5), async {
        loop {
            let value = kept.recv().await.unwrap();
            if value == 999 {
                break value;
            }
        }
    })
    .await
    .unwrap();
    assert_eq!(value, 999);
}

#[tokio::test]
async fn test_stalled_subscriber_does_not_block_publish() {
    let publisher = Publisher::<String>::bind("127.0.0.1:0").await.unwrap();
    let addr = publisher.local_addr();

    // connected but never reads, so its socket buffers fill up
    let _stalled = tokio::net::TcpStream::connect(addr).await.unwrap();
    let mut healthy = Subscriber::<String>::connect(addr, 64).await.unwrap();
    wait_for_subscribers(&publisher, 2).await;

    let payload = "x".repeat(1 << 20);
    let count = com::SUBSCRIBER_BACKLOG + 4;
    timeout(Duration::from_secs(5), async {
        for i in 0..count {
            publisher.publish(&format!("{i}:{payload}")).await.unwrap();
        }
    })
    .await
    .expect("publish blocked on a stalled subscriber");

    // the healthy subscriber may skip messages while it catches up, but the
    // stream keeps flowing
    let first = timeout(Duration::from_secs(5), healthy.recv())
        .await
        .expect("healthy subscriber starved")
        .unwrap();
    assert!(first.starts_with("0:"));
    assert_eq!(publisher.subscriber_count().await, 2);
}
