use crate::app::event::{AppEvent, TabId};
use crate::config::RemoteConfig;
use crate::remote::client::{RemoteError, RestClient};
use crate::table::controller::{FetchTicket, MutationTicket, RemoteRequest};
use crate::table::error::TableError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

/// Owns one REST client per server-backed tab and runs each request on its
/// own task. Results come back to the event loop as [`AppEvent`]s.
pub struct RemoteManager {
    clients: HashMap<TabId, Arc<RestClient>>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl RemoteManager {
    pub fn new(event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            clients: HashMap::new(),
            event_tx,
        }
    }

    pub fn register(&mut self, tab: TabId, config: &RemoteConfig) -> Result<(), RemoteError> {
        let client = RestClient::new(config)?;
        self.clients.insert(tab, Arc::new(client));
        Ok(())
    }

    fn client(&self, tab: TabId) -> Result<Arc<RestClient>, TableError> {
        self.clients
            .get(&tab)
            .cloned()
            .ok_or_else(|| TableError::Transport(format!("tab {} has no remote client", tab)))
    }

    pub fn fetch(&self, tab: TabId, ticket: FetchTicket) {
        let tx = self.event_tx.clone();
        let client = match self.client(tab) {
            Ok(client) => client,
            Err(e) => {
                let _ = tx.send(AppEvent::FetchCompleted {
                    tab,
                    ticket,
                    result: Err(e),
                });
                return;
            }
        };
        tokio::spawn(async move {
            let result = client.list_raw().await.map_err(TableError::from);
            if let Err(e) = &result {
                warn!(tab, error = %e, "fetch failed");
            }
            let _ = tx.send(AppEvent::FetchCompleted { tab, ticket, result });
        });
    }

    pub fn submit(&self, tab: TabId, ticket: MutationTicket, request: RemoteRequest) {
        let tx = self.event_tx.clone();
        let client = match self.client(tab) {
            Ok(client) => client,
            Err(e) => {
                let _ = tx.send(AppEvent::MutationCompleted {
                    tab,
                    ticket,
                    result: Err(e),
                });
                return;
            }
        };
        tokio::spawn(async move {
            let result = match &request {
                RemoteRequest::Create(payload) => client.create(payload).await,
                RemoteRequest::Update(payload) => client.update(payload).await,
                RemoteRequest::Delete(id) => client.delete(*id).await,
            };
            let result = result.map_err(TableError::from);
            if let Err(e) = &result {
                warn!(tab, error = %e, "mutation failed");
            }
            let _ = tx.send(AppEvent::MutationCompleted { tab, ticket, result });
        });
    }
}
