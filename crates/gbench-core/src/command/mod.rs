use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use std::time::{SystemTime, UNIX_EPOCH};

use gbench_model::{DISK_LIMIT_SIZE_BYTES, JobConfig, JobKind, Target};
use tracing::trace;

use crate::{invoker::CommandSpec, queue::ArtifactQueue};

/// Where in the schedule an invocation happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvocationContext {
    pub worker: usize,
    pub iteration: usize,
}

impl InvocationContext {
    pub fn new(worker: usize, iteration: usize) -> Self {
        Self { worker, iteration }
    }
}

/// A command ready to run, with the artifact name it creates or deletes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltCommand {
    pub spec: CommandSpec,
    pub artifact: Option<String>,
}

static NAME_SEQ: AtomicU64 = AtomicU64::new(0);

/// Fresh artifact name, unique for the lifetime of the process.
///
/// Uniqueness comes from the process-wide sequence; worker id and timestamp keep names
/// readable and distinct across runs.
pub fn artifact_name(worker: usize) -> String {
    let seq = NAME_SEQ.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("image-{worker}-{seq}-{nanos}")
}

/// Builds the argument list of one invocation of the target binary.
///
/// `create` arguments depend only on the config and a round-robin pick of the base image.
/// `delete` arguments consume the next name from the shared artifact queue.
pub struct CommandBuilder {
    config: Arc<JobConfig>,
    artifacts: ArtifactQueue,
    picks: AtomicU64,
}

impl CommandBuilder {
    pub fn new(config: Arc<JobConfig>, artifacts: ArtifactQueue) -> Self {
        Self {
            config,
            artifacts,
            picks: AtomicU64::new(0),
        }
    }

    /// Build the next command, or `None` when there is nothing to run.
    ///
    /// For a consumer this waits for the next published name; a closed, drained queue yields `None`.
    pub async fn build(&self, ctx: InvocationContext) -> Option<BuiltCommand> {
        let target = &self.config.target;
        let mut args = global_args(target);
        args.push(self.config.subcommand().as_str().to_string());

        let artifact = match &self.config.kind {
            JobKind::Bulk {
                base_images,
                use_quota,
                ..
            } => {
                if *use_quota {
                    args.push("--disk-limit-size-bytes".to_string());
                    args.push(DISK_LIMIT_SIZE_BYTES.to_string());
                }
                if base_images.is_empty() {
                    return None;
                }
                let pick = self.picks.fetch_add(1, Ordering::Relaxed);
                let image = &base_images[(pick % base_images.len() as u64) as usize];
                let name = artifact_name(ctx.worker);
                args.push(image.clone());
                args.push(name.clone());
                Some(name)
            }
            JobKind::Periodic { .. } => None,
            JobKind::Consumer { .. } => {
                let name = self.artifacts.recv().await?;
                args.push(name.clone());
                Some(name)
            }
        };

        let spec = CommandSpec::new(target.bin_path.clone(), args);
        trace!(target: "gbench.core.command", worker = ctx.worker, iteration = ctx.iteration, cmd = %spec, "built");
        Some(BuiltCommand { spec, artifact })
    }
}

/// Flags every invocation starts with, in the order the binary expects.
pub fn global_args(target: &Target) -> Vec<String> {
    let mut args = vec![
        "--store".to_string(),
        target.store_path.clone(),
        "--log-level".to_string(),
        target.log_level.clone(),
    ];
    if let Some(driver) = &target.driver {
        args.push("--driver".to_string());
        args.push(driver.clone());
    }
    args
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn target() -> Target {
        Target {
            bin_path: "/path/to/grootfs".into(),
            store_path: "/store/path".into(),
            driver: Some("btrfs".into()),
            log_level: "debug".into(),
        }
    }

    fn builder(kind: JobKind, queue: ArtifactQueue) -> CommandBuilder {
        CommandBuilder::new(Arc::new(JobConfig::new(target(), kind)), queue)
    }

    #[tokio::test]
    async fn create_arguments() {
        let b = builder(
            JobKind::bulk(vec!["docker:///busybox".into()], 1, 1),
            ArtifactQueue::closed(),
        );
        let cmd = b.build(InvocationContext::new(3, 0)).await.unwrap();

        assert_eq!(cmd.spec.program, "/path/to/grootfs");
        assert_eq!(
            &cmd.spec.args[..8],
            &[
                "--store",
                "/store/path",
                "--log-level",
                "debug",
                "--driver",
                "btrfs",
                "create",
                "docker:///busybox"
            ]
        );
        assert_eq!(cmd.spec.args.len(), 9);
        let name = cmd.artifact.unwrap();
        assert!(name.starts_with("image-3-"));
        assert_eq!(cmd.spec.last_arg(), Some(name.as_str()));
    }

    #[tokio::test]
    async fn create_with_quota() {
        let kind = JobKind::Bulk {
            base_images: vec!["docker:///busybox".into()],
            use_quota: true,
            concurrency: 1,
            total: 1,
        };
        let cmd = builder(kind, ArtifactQueue::closed())
            .build(InvocationContext::default())
            .await
            .unwrap();

        assert_eq!(cmd.spec.args[6], "create");
        assert_eq!(cmd.spec.args[7], "--disk-limit-size-bytes");
        assert_eq!(cmd.spec.args[8], "1019430400");
        assert_eq!(cmd.spec.args[9], "docker:///busybox");
    }

    #[tokio::test]
    async fn driver_flag_is_optional() {
        let cfg = JobConfig::new(
            Target {
                driver: None,
                ..target()
            },
            JobKind::periodic(1),
        );
        let cmd = CommandBuilder::new(Arc::new(cfg), ArtifactQueue::closed())
            .build(InvocationContext::default())
            .await
            .unwrap();

        assert_eq!(
            cmd.spec.args,
            vec!["--store", "/store/path", "--log-level", "debug", "clean"]
        );
        assert_eq!(cmd.artifact, None);
    }

    #[tokio::test]
    async fn base_images_are_used_round_robin() {
        let b = builder(
            JobKind::bulk(vec!["img-a".into(), "img-b".into()], 4, 1),
            ArtifactQueue::closed(),
        );
        let mut images = Vec::new();
        for i in 0..4 {
            let cmd = b.build(InvocationContext::new(0, i)).await.unwrap();
            images.push(cmd.spec.args[7].clone());
        }
        assert_eq!(images, vec!["img-a", "img-b", "img-a", "img-b"]);
    }

    #[tokio::test]
    async fn generated_names_are_unique_across_workers() {
        let b = Arc::new(builder(
            JobKind::bulk(vec!["img".into()], 200, 8),
            ArtifactQueue::closed(),
        ));
        let mut handles = Vec::new();
        for worker in 0..8 {
            let b = Arc::clone(&b);
            handles.push(tokio::spawn(async move {
                let mut names = Vec::new();
                for i in 0..25 {
                    let cmd = b.build(InvocationContext::new(worker, i)).await.unwrap();
                    names.push(cmd.artifact.unwrap());
                }
                names
            }));
        }

        let mut seen = HashSet::new();
        for h in handles {
            for name in h.await.unwrap() {
                assert!(seen.insert(name));
            }
        }
        assert_eq!(seen.len(), 200);
    }

    #[tokio::test]
    async fn delete_consumes_queue_then_yields_none() {
        let queue = ArtifactQueue::bounded(2);
        queue.publish("image-0".into()).await.unwrap();
        queue.close();
        let b = builder(JobKind::consumer(1), queue);

        let cmd = b.build(InvocationContext::default()).await.unwrap();
        assert_eq!(cmd.spec.args[6], "delete");
        assert_eq!(cmd.spec.args[7], "image-0");
        assert_eq!(cmd.artifact.as_deref(), Some("image-0"));

        assert!(b.build(InvocationContext::default()).await.is_none());
    }

    #[tokio::test]
    async fn names_stay_unique_across_builders() {
        let kind = JobKind::bulk(vec!["img".into()], 1, 1);
        let first = builder(kind.clone(), ArtifactQueue::closed());
        let second = builder(kind, ArtifactQueue::closed());

        let mut seen = HashSet::new();
        for _ in 0..10 {
            for b in [&first, &second] {
                let cmd = b.build(InvocationContext::new(0, 0)).await.unwrap();
                assert!(seen.insert(cmd.artifact.unwrap()));
            }
        }
        assert_eq!(seen.len(), 20);
    }

    #[test]
    fn artifact_name_layout() {
        let name = artifact_name(7);
        let parts: Vec<&str> = name.split('-').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "image");
        assert_eq!(parts[1], "7");
        assert!(parts[2].parse::<u64>().is_ok());
        assert!(parts[3].parse::<u128>().is_ok());
    }
}
