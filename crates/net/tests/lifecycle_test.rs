//! End-to-end lifecycle tests for the noop link.
//!
//! These drive an endpoint/controller pair the way a network stack does:
//! register a state recorder, bring the link up, attach and detach a
//! dispatcher while other threads wait on the attachment, then close it.

use noopnet_net::{
    EndpointConfig, Error, LinkController, LinkEndpoint, LinkState, Netstack, NicDispatcher,
    NoopController, NoopEndpoint, StackConfig, add_noop_endpoint,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::thread;
use std::time::Duration;

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn state_recorder() -> (Arc<Mutex<Vec<LinkState>>>, NoopController) {
    let states = Arc::new(Mutex::new(Vec::new()));
    let recorded = states.clone();
    let controller = NoopController::new(move |state| recorded.lock().unwrap().push(state));
    (states, controller)
}

#[test]
fn full_link_lifecycle() {
    init_tracing();

    let endpoint = Arc::new(NoopEndpoint::new(EndpointConfig::with_link_address([
        0x52, 0x54, 0x00, 0x12, 0x34, 0x56,
    ])));
    let (states, controller) = state_recorder();

    controller.up().unwrap();
    assert_eq!(*states.lock().unwrap(), vec![LinkState::Started]);

    endpoint
        .attach(Some(Arc::new(NicDispatcher::default())))
        .unwrap();
    assert!(endpoint.is_attached());

    let waiter = {
        let endpoint = endpoint.clone();
        thread::spawn(move || endpoint.wait())
    };

    thread::sleep(Duration::from_millis(50));
    assert!(!waiter.is_finished());

    endpoint.attach(None).unwrap();
    assert!(!endpoint.is_attached());
    waiter.join().unwrap();

    controller.close().unwrap();
    assert_eq!(
        *states.lock().unwrap(),
        vec![LinkState::Started, LinkState::Closed]
    );
}

#[test]
fn single_detach_releases_every_waiter() {
    init_tracing();
    const WAITERS: usize = 8;

    let endpoint = Arc::new(NoopEndpoint::default());
    endpoint
        .attach(Some(Arc::new(NicDispatcher::default())))
        .unwrap();

    let released = Arc::new(AtomicUsize::new(0));
    let handles: Vec<_> = (0..WAITERS)
        .map(|_| {
            let endpoint = endpoint.clone();
            let released = released.clone();
            thread::spawn(move || {
                endpoint.wait();
                released.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();

    thread::sleep(Duration::from_millis(100));
    assert_eq!(released.load(Ordering::SeqCst), 0);
    assert!(endpoint.is_attached());

    endpoint.attach(None).unwrap();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(released.load(Ordering::SeqCst), WAITERS);

    let err = endpoint.attach(None).unwrap_err();
    assert!(matches!(err, Error::NotAttached));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_and_async_waiters_share_one_release() {
    init_tracing();

    let endpoint = Arc::new(NoopEndpoint::default());
    endpoint
        .attach(Some(Arc::new(NicDispatcher::default())))
        .unwrap();

    let blocking = {
        let endpoint = endpoint.clone();
        tokio::task::spawn_blocking(move || endpoint.wait())
    };
    let asynchronous = {
        let endpoint = endpoint.clone();
        tokio::spawn(async move { endpoint.wait_async().await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!blocking.is_finished());
    assert!(!asynchronous.is_finished());

    endpoint.attach(None).unwrap();
    blocking.await.unwrap();
    asynchronous.await.unwrap();
}

#[test]
fn stack_owned_interface_lifecycle() {
    init_tracing();

    let stack = Netstack::new(StackConfig::default()).unwrap();
    let ifs = add_noop_endpoint(&stack, "eth0").unwrap();
    assert_eq!(ifs.link_state(), None);
    assert!(ifs.is_attached());

    ifs.up().unwrap();
    ifs.set_promiscuous_mode(true).unwrap();
    ifs.down().unwrap();
    ifs.up().unwrap();
    assert!(ifs.promiscuous());

    let waiter = {
        let ifs = ifs.clone();
        thread::spawn(move || ifs.endpoint().wait())
    };

    stack.remove_interface(ifs.id()).unwrap();
    waiter.join().unwrap();

    assert!(!ifs.is_attached());
    assert_eq!(
        ifs.state_history(),
        vec![
            LinkState::Started,
            LinkState::Down,
            LinkState::Started,
            LinkState::Closed,
        ]
    );
    assert!(stack.interfaces().is_empty());

    // The name is free again once the interface is gone.
    let again = add_noop_endpoint(&stack, "eth0").unwrap();
    assert_eq!(again.name(), "testeth0");
    assert_ne!(again.id(), ifs.id());
}
