use crate::kubernetes::{Cluster, KubeCluster};
use crate::types::PodPhase;
use std::io::Write;
use tracing::{debug, warn};

/// Connect once `credentials` resolve and write a snapshot of the cluster to `out`.
///
/// Nothing is written if the credentials or the client cannot be set up.
pub async fn run<F, W>(credentials: F, out: &mut W) -> anyhow::Result<()>
where
    F: Future<Output = anyhow::Result<kube::Config>>,
    W: Write,
{
    let cluster = KubeCluster::connect(credentials).await?;
    write_snapshot(&cluster, out).await
}

/// Pod phases (with logs for running pods), then every event.
///
/// Failing to list pods or events aborts the snapshot. A pod whose logs
/// cannot be opened or read is reported on stderr and skipped.
pub async fn write_snapshot<C: Cluster, W: Write>(cluster: &C, out: &mut W) -> anyhow::Result<()> {
    let pods = cluster.list_pods().await?;

    for pod in &pods {
        writeln!(out, "{}: Pod {}: status: {},", pod.namespace, pod.name, pod.phase)?;

        if pod.phase != PodPhase::Running {
            continue;
        }

        writeln!(out, "Pod {}:", pod.name)?;
        match cluster.pod_logs(pod).await {
            Ok(logs) => {
                writeln!(out, "  Logs: {}", String::from_utf8_lossy(&logs))?;
            }
            Err(e) => {
                warn!("{}", e);
            }
        }
    }

    writeln!(out, "\n\n\nEvents:")?;
    out.flush()?;

    let events = cluster.list_events().await?;
    for event in &events {
        writeln!(out, "Event: {} {} {}", event.reason, event.type_, event.message)?;
    }
    out.flush()?;

    debug!("Snapshot done: {} pods, {} events", pods.len(), events.len());
    Ok(())
}
