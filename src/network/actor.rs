//! Network actor - runs user source calls in the Tokio async runtime

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::source::UserSource;

/// Network actor that processes fetch and persist commands
pub struct NetworkActor {
    source: Arc<dyn UserSource>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(
        source: Arc<dyn UserSource>,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        NetworkActor {
            source,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::FetchUsers { generation }) => {
                            let source = Arc::clone(&self.source);
                            let response_tx = self.response_tx.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(generation, "Fetching users");
                                let result = source.fetch_all().await;
                                tracing::info!(generation, ok = result.is_ok(), "Fetch completed");
                                let _ = response_tx.send(NetworkResponse::UsersFetched { generation, result });
                            });
                        }

                        Some(NetworkCommand::PersistStatus { user_id, status }) => {
                            let source = Arc::clone(&self.source);
                            let response_tx = self.response_tx.clone();

                            self.active_requests.spawn(async move {
                                let result = source.persist_status(&user_id, status).await;
                                tracing::info!(user_id = %user_id, %status, ok = result.is_ok(), "Persist completed");
                                let _ = response_tx.send(NetworkResponse::StatusPersisted { user_id, status, result });
                            });
                        }

                        Some(NetworkCommand::Shutdown) => {
                            self.active_requests.abort_all();
                            break;
                        }

                        None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserStatus;
    use crate::store::tests::{user, ScriptedSource};

    #[tokio::test]
    async fn test_fetch_and_persist_round_trip_through_actor() {
        let source = Arc::new(ScriptedSource::default());
        source.push_fetch(Ok(vec![user("1", "Ada", UserStatus::Active)]));

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(NetworkActor::new(source.clone(), resp_tx).run(cmd_rx));

        cmd_tx.send(NetworkCommand::FetchUsers { generation: 3 }).unwrap();
        match resp_rx.recv().await.unwrap() {
            NetworkResponse::UsersFetched { generation, result } => {
                assert_eq!(generation, 3);
                assert_eq!(result.unwrap().len(), 1);
            }
            other => panic!("unexpected response {:?}", other),
        }

        cmd_tx
            .send(NetworkCommand::PersistStatus {
                user_id: "1".to_string(),
                status: UserStatus::Inactive,
            })
            .unwrap();
        match resp_rx.recv().await.unwrap() {
            NetworkResponse::StatusPersisted { user_id, result, .. } => {
                assert_eq!(user_id, "1");
                assert!(result.is_ok());
            }
            other => panic!("unexpected response {:?}", other),
        }

        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        handle.await.unwrap();
    }
}
