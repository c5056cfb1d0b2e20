use crate::types::{EventSummary, PodPhase, PodSummary};
use anyhow::Context;
use futures::io::AsyncReadExt;
use k8s_openapi::api::core::v1::{Event, Pod};
use kube::api::{ListParams, LogParams};
use kube::{Api, Client, ResourceExt};
use std::pin::pin;
use thiserror::Error;
use tracing::{debug, info};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A per-pod log failure. Never fatal to the run.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Error getting logs for pod {pod}: {source}")]
    Open {
        pod: String,
        #[source]
        source: BoxError,
    },
    #[error("Error reading logs for pod {pod}: {source}")]
    Read {
        pod: String,
        #[source]
        source: BoxError,
    },
}

/// The three cluster calls a snapshot needs.
pub trait Cluster {
    /// Pods in all namespaces, in listing order.
    async fn list_pods(&self) -> anyhow::Result<Vec<PodSummary>>;

    /// Full logs of the pod's default container.
    async fn pod_logs(&self, pod: &PodSummary) -> Result<Vec<u8>, LogError>;

    /// Events in all namespaces, in listing order.
    async fn list_events(&self) -> anyhow::Result<Vec<EventSummary>>;
}

pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Wait for `credentials` to resolve, then build a client from them.
    pub async fn connect<F>(credentials: F) -> anyhow::Result<Self>
    where
        F: Future<Output = anyhow::Result<kube::Config>>,
    {
        let config = credentials
            .await
            .context("Error loading Kubernetes configuration")?;
        let client = Client::try_from(config).context("Error creating Kubernetes client")?;
        info!("Connected to cluster");
        Ok(Self::new(client))
    }
}

impl Cluster for KubeCluster {
    async fn list_pods(&self) -> anyhow::Result<Vec<PodSummary>> {
        let api: Api<Pod> = Api::all(self.client.clone());
        let pods = api
            .list(&ListParams::default())
            .await
            .context("Error listing pods")?;
        debug!("Listed {} pods", pods.items.len());
        Ok(pods.items.iter().map(pod_summary).collect())
    }

    async fn pod_logs(&self, pod: &PodSummary) -> Result<Vec<u8>, LogError> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), &pod.namespace);
        let stream = api
            .log_stream(&pod.name, &LogParams::default())
            .await
            .map_err(|e| LogError::Open {
                pod: pod.name.clone(),
                source: e.into(),
            })?;

        // Dropped at the end of this scope whether or not the read succeeds.
        let mut stream = pin!(stream);
        let mut buf = Vec::new();
        stream
            .read_to_end(&mut buf)
            .await
            .map_err(|e| LogError::Read {
                pod: pod.name.clone(),
                source: e.into(),
            })?;
        debug!("Read {} bytes of logs from {}/{}", buf.len(), pod.namespace, pod.name);
        Ok(buf)
    }

    async fn list_events(&self) -> anyhow::Result<Vec<EventSummary>> {
        let api: Api<Event> = Api::all(self.client.clone());
        let events = api
            .list(&ListParams::default())
            .await
            .context("Error listing events")?;
        debug!("Listed {} events", events.items.len());
        Ok(events.items.iter().map(event_summary).collect())
    }
}

pub fn pod_summary(pod: &Pod) -> PodSummary {
    let phase = pod.status.as_ref().and_then(|s| s.phase.as_deref());
    PodSummary {
        namespace: pod.namespace().unwrap_or_default(),
        name: pod.name_any(),
        phase: PodPhase::from_api(phase),
    }
}

pub fn event_summary(event: &Event) -> EventSummary {
    EventSummary {
        reason: event.reason.clone().unwrap_or_default(),
        type_: event.type_.clone().unwrap_or_default(),
        message: event.message.clone().unwrap_or_default(),
    }
}
