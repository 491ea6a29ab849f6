use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use log::{debug, error, info};
use shared::models::fractal::{FractalError, FractalGenerator, Generation, RenderSettings};
use thiserror::Error;
use tokio::{
    sync::mpsc::{self, UnboundedReceiver},
    task::{JoinError, JoinHandle},
};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error(transparent)]
    Fractal(#[from] FractalError),

    #[error("render job {id} failed: {source}")]
    Join {
        id: Uuid,
        #[source]
        source: JoinError,
    },
}

pub type WorkerResult<T> = Result<T, WorkerError>;

/// A generation running on the blocking thread pool.
pub struct RenderHandle {
    pub id: Uuid,
    /// Percentages as they are reached; closed once the job ends.
    pub progress: UnboundedReceiver<u8>,
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<Generation>,
}

impl RenderHandle {
    /// Asks the job to stop before its next cell.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn cancel_token(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub async fn join(self) -> WorkerResult<Generation> {
        let id = self.id;
        match self.handle.await {
            Ok(generation) => Ok(generation),
            Err(source) => {
                error!("Render job {} failed: {}", id, source);
                Err(WorkerError::Join { id, source })
            }
        }
    }
}

/// Validates `settings` right away and starts rendering in the background.
///
/// Configuration errors are returned here, before any work is scheduled.
/// Must be called from within a tokio runtime.
pub fn spawn_render(settings: RenderSettings) -> WorkerResult<RenderHandle> {
    let kind = settings.solver_kind();
    let generator = FractalGenerator::new(settings)?;
    let id = Uuid::new_v4();
    let (tx, progress) = mpsc::unbounded_channel();
    let cancel = Arc::new(AtomicBool::new(false));

    info!(
        "Render job {} started ({} solver, {}x{})",
        id,
        kind,
        generator.size(),
        generator.size()
    );

    let job_cancel = Arc::clone(&cancel);
    let handle = tokio::task::spawn_blocking(move || {
        let generation = generator.generate(
            |percent| {
                // the receiver may be gone, the render goes on regardless
                let _ = tx.send(percent);
            },
            &job_cancel,
        );
        debug!("Render job {} finished, cancelled: {}", id, generation.is_cancelled());
        generation
    });

    Ok(RenderHandle {
        id,
        progress,
        cancel,
        handle,
    })
}
