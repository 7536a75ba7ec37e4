//! Tokio runtime and mock GitHub server shared by behavioural scenarios.

use std::future::Future;
use std::io;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

/// Runtime handle cheap enough to clone out of a scenario `Slot`.
#[derive(Clone)]
pub struct SharedRuntime(Rc<Runtime>);

impl SharedRuntime {
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.0.block_on(future)
    }
}

/// Returns the scenario runtime, starting it and the mock server on first use.
///
/// # Errors
///
/// Returns an error when the Tokio runtime cannot be built.
pub fn ensure_runtime_and_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> Result<SharedRuntime, io::Error> {
    let shared = runtime.get().map_or_else(
        || {
            let started = SharedRuntime(Rc::new(Runtime::new()?));
            runtime.set(started.clone());
            Ok::<_, io::Error>(started)
        },
        Ok,
    )?;

    if server.with_ref(|_| ()).is_none() {
        server.set(shared.block_on(MockServer::start()));
    }
    Ok(shared)
}

/// Mounts `mock` on the scenario server, starting it if needed.
///
/// # Panics
///
/// Panics when the runtime cannot be started.
pub fn mount_mock(runtime: &Slot<SharedRuntime>, server: &Slot<MockServer>, mock: Mock) {
    let shared =
        ensure_runtime_and_server(runtime, server).expect("runtime and server should start");
    server
        .with_ref(|started| shared.block_on(mock.mount(started)))
        .expect("mock server should be initialised");
}
