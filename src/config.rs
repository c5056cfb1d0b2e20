use tracing::debug;

/// Resolve cluster credentials: `KUBECONFIG`, then `~/.kube/config`, then
/// the in-cluster service account.
pub async fn infer() -> anyhow::Result<kube::Config> {
    let config = kube::Config::infer().await?;
    debug!(
        "Resolved cluster {} (default namespace {})",
        config.cluster_url, config.default_namespace
    );
    Ok(config)
}
