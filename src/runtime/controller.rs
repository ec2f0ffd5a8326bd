//! Airdrop lifecycle controller.
//!
//! Sequences validation, network resolution, the faucet request and the
//! confirmation wait for one request at a time, publishing the current
//! [`LifecycleState`] and an ordered stream of [`StatusEvent`]s.

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use crate::adapters::solana::{ConfirmationPoller, FaucetClient, HttpConnector, Signature};
use crate::adapters::Connector;
use crate::config::AirdropConfig;
use crate::error::{AirdropError, Result};
use crate::network::{NetworkProfile, NetworkResolver};
use crate::runtime::lifecycle::{LifecycleState, StatusEvent, SubmitOutcome};
use crate::types::{AirdropReceipt, AirdropRequest, Network, RawAirdropInput};
use crate::validator;

/// Characters of the address shown in status messages.
const ADDRESS_PREFIX_LEN: usize = 8;

/// Sole entry point for the presentation layer.
pub struct AirdropController<C: Connector> {
    config: AirdropConfig,
    resolver: NetworkResolver,
    connector: C,
    state: watch::Sender<LifecycleState>,
    events: mpsc::UnboundedSender<StatusEvent>,
}

impl AirdropController<HttpConnector> {
    /// Controller talking to the real RPC endpoints over HTTP.
    pub fn with_http(
        config: AirdropConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<StatusEvent>)> {
        let connector = HttpConnector::from_config(&config)?;
        Self::new(config, connector)
    }
}

impl<C: Connector> AirdropController<C> {
    pub fn new(
        config: AirdropConfig,
        connector: C,
    ) -> Result<(Self, mpsc::UnboundedReceiver<StatusEvent>)> {
        config.validate()?;
        let (events, events_rx) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(LifecycleState::Idle);

        let controller = Self {
            resolver: NetworkResolver::from_config(&config),
            config,
            connector,
            state,
            events,
        };
        Ok((controller, events_rx))
    }

    pub fn state(&self) -> LifecycleState {
        self.state.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    /// Profile for a network, e.g. to show the advisory limit before submitting.
    pub fn profile(&self, network: Network) -> NetworkProfile {
        self.resolver.resolve(network)
    }

    /// Run one airdrop to a terminal state.
    ///
    /// If another request is still in flight this is a no-op: no state change,
    /// no events, and [`SubmitOutcome::Ignored`] is returned. Acceptance resets
    /// the previous terminal state and enters `Validating` in one step, so
    /// watchers never observe an intermediate `Idle`.
    ///
    /// Dropping the returned future part-way still leaves a terminal state:
    /// the request is marked `Failed` and an error event is emitted.
    pub async fn submit(&self, input: RawAirdropInput) -> SubmitOutcome {
        let accepted = self.state.send_if_modified(|state| {
            if state.accepts_submit() {
                *state = LifecycleState::Validating;
                true
            } else {
                false
            }
        });

        if !accepted {
            let current = self.state.borrow().name();
            debug!(state = current, "submit ignored, request in flight");
            return SubmitOutcome::Ignored;
        }

        let guard = InFlight {
            state: &self.state,
            events: &self.events,
            armed: true,
        };
        self.emit(StatusEvent::Status("Validating input...".to_string()));

        let result = self.run(&input).await;
        guard.disarm();

        match result {
            Ok(receipt) => {
                info!(
                    network = %receipt.network,
                    wallet = %receipt.address,
                    lamports = receipt.lamports,
                    signature = %receipt.signature,
                    "airdrop succeeded"
                );
                self.transition(LifecycleState::Succeeded);
                self.emit(StatusEvent::Success(format!(
                    "Success! {} SOL has been sent to {}...",
                    receipt.amount_sol,
                    receipt.address.short(ADDRESS_PREFIX_LEN)
                )));
                SubmitOutcome::Succeeded(receipt)
            }
            Err(err) => {
                match &err {
                    AirdropError::Configuration(detail) => error!(%detail, "configuration error"),
                    e if e.is_validation() => debug!(error = %e, "input rejected"),
                    e => warn!(error = %e, "airdrop failed"),
                }
                self.transition(LifecycleState::Failed(err.clone()));
                self.emit(StatusEvent::Error(err.to_string()));
                SubmitOutcome::Failed(err)
            }
        }
    }

    async fn run(&self, input: &RawAirdropInput) -> Result<AirdropReceipt> {
        let request = validator::validate(input)?;
        let profile = self.resolver.resolve(request.network());
        let transport = self.connector.connect(&profile)?;

        self.transition(LifecycleState::Requesting);
        self.emit(StatusEvent::Status(format!(
            "Requesting {} SOL to {}...",
            request.amount_sol(),
            request.address().short(ADDRESS_PREFIX_LEN)
        )));
        let signature = FaucetClient::new(transport.clone()).request(&request).await?;

        self.transition(LifecycleState::Confirming);
        self.emit(StatusEvent::Status("Confirming transaction...".to_string()));
        let confirmation = ConfirmationPoller::from_config(transport, &self.config)
            .confirm(&signature)
            .await?;

        Ok(receipt(&request, signature, confirmation.slot))
    }

    fn transition(&self, next: LifecycleState) {
        let to = next.name();
        let previous = self.state.send_replace(next);
        debug!(from = previous.name(), to, "lifecycle transition");
    }

    fn emit(&self, event: StatusEvent) {
        // A dropped receiver only means nobody is watching.
        let _ = self.events.send(event);
    }
}

/// Fails the in-flight request if `submit` is dropped before it finishes.
struct InFlight<'a> {
    state: &'a watch::Sender<LifecycleState>,
    events: &'a mpsc::UnboundedSender<StatusEvent>,
    armed: bool,
}

impl InFlight<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let err = AirdropError::ConfirmationTimeout(
            "request abandoned before reaching a terminal state".to_string(),
        );
        let previous = self.state.send_replace(LifecycleState::Failed(err.clone()));
        warn!(from = previous.name(), "in-flight airdrop abandoned");
        let _ = self.events.send(StatusEvent::Error(err.to_string()));
    }
}

fn receipt(
    request: &AirdropRequest,
    signature: Signature,
    slot: u64,
) -> AirdropReceipt {
    AirdropReceipt {
        network: request.network(),
        address: *request.address(),
        amount_sol: request.amount_sol(),
        lamports: request.lamports(),
        signature,
        slot,
    }
}
