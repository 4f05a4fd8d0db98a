//! [`Command`] for attaching a file to an [`Accession`].

use std::{pin::pin, rc::Rc};

use common::operations::Upload;
use tokio::{sync::watch, time};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Accession;
use crate::{
    cache::key::ACCESSIONS,
    domain::accession,
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for attaching a file to an [`Accession`].
///
/// While the upload is in flight, its [`Progress`] is advanced by
/// [`Progress::STEP`] every [`Config::upload_progress_interval`], up to
/// [`Progress::CEILING`]. It's completed once the upload succeeds, and left
/// as is otherwise.
///
/// [`Config::upload_progress_interval`]: crate::Config::upload_progress_interval
#[derive(Clone, Debug)]
pub struct UploadAttachment {
    /// ID of the [`Accession`] to attach the file to.
    pub accession_id: accession::Id,

    /// Name of the uploaded file.
    pub file_name: String,

    /// MIME type of the uploaded file.
    pub content_type: String,

    /// Contents of the uploaded file.
    pub bytes: Vec<u8>,

    /// [`Progress`] to report the upload through.
    pub progress: Progress,
}

/// Simulated progress of an upload, in percents.
#[derive(Clone, Debug)]
pub struct Progress(Rc<watch::Sender<u8>>);

impl Progress {
    /// Percents added on every tick.
    pub const STEP: u8 = 10;

    /// Percents the ticks never go beyond.
    pub const CEILING: u8 = 90;

    /// Percents of a completed upload.
    pub const DONE: u8 = 100;

    /// Creates a new [`Progress`] starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self(Rc::new(watch::Sender::new(0)))
    }

    /// Subscribes to changes of this [`Progress`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u8> {
        self.0.subscribe()
    }

    /// Returns the current percents of this [`Progress`].
    #[must_use]
    pub fn percent(&self) -> u8 {
        *self.0.borrow()
    }

    /// Advances this [`Progress`] by a single tick.
    fn tick(&self) {
        _ = self.0.send_if_modified(|p| {
            if *p >= Self::CEILING {
                return false;
            }
            *p = p.saturating_add(Self::STEP).min(Self::CEILING);
            true
        });
    }

    /// Marks this [`Progress`] as completed.
    fn complete(&self) {
        _ = self.0.send_replace(Self::DONE);
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Command<UploadAttachment> for Service<A>
where
    A: Api<
        Upload<accession::NewAttachment>,
        Ok = (),
        Err = Traced<api::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UploadAttachment,
    ) -> Result<Self::Ok, Self::Err> {
        let UploadAttachment {
            accession_id,
            file_name,
            content_type,
            bytes,
            progress,
        } = cmd;
        log::debug!(
            "uploading `{file_name}` ({} bytes) to \
             `Accession(id: {accession_id})`",
            bytes.len(),
        );

        let period = self.config().upload_progress_interval;
        let mut ticker =
            time::interval_at(time::Instant::now() + period, period);
        let mut upload = pin!(self.api().execute(Upload(
            accession::NewAttachment {
                accession_id,
                file_name,
                content_type,
                bytes,
            }
        )));
        let result = loop {
            tokio::select! {
                biased;
                res = &mut upload => break res,
                _ = ticker.tick() => progress.tick(),
            }
        };
        result.map_err(tracerr::wrap!())?;
        progress.complete();
        log::info!("uploaded attachment to `Accession(id: {accession_id})`");

        _ = self.cache().invalidate(&ACCESSIONS.detail(accession_id));

        Ok(())
    }
}

/// Error of [`UploadAttachment`] [`Command`] execution.
pub type ExecutionError = api::Error;
