use std::io::Write;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub const SPINNER_PREFIX: &str = "Doing crazy maths ";

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const TICK: Duration = Duration::from_millis(100);

/// Terminal activity indicator drawn from a background task until stopped.
pub struct Spinner {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Spinner {
    /// Draw on stderr.
    pub fn start(prefix: &'static str) -> Self {
        Self::start_with(prefix, std::io::stderr())
    }

    pub fn start_with<W>(prefix: &'static str, mut out: W) -> Self
    where
        W: Write + Send + 'static,
    {
        let token = CancellationToken::new();
        let stop = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(TICK);
            let mut n = 0usize;
            loop {
                tokio::select! {
                    biased;
                    _ = stop.cancelled() => break,
                    _ = ticker.tick() => {
                        let _ = write!(out, "\r{prefix}{}", frame(n));
                        let _ = out.flush();
                        n = n.wrapping_add(1);
                    }
                }
            }
            // erase the line so the report starts clean
            let _ = write!(out, "\r\x1b[K");
            let _ = out.flush();
        });

        Self { token, handle }
    }

    /// Stop drawing and wait until the line has been cleared.
    pub async fn stop(self) {
        self.token.cancel();
        let _ = self.handle.await;
    }
}

fn frame(n: usize) -> char {
    FRAMES[n % FRAMES.len()]
}
