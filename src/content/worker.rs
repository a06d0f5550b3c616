use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, unbounded};
use log::{debug, error};

use super::{ContentError, ContentProvider, GameConcept, LevelData, MarketingData, load_level};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentJob {
    LevelTheme(u32),
    Concept(String),
    Marketing(GameConcept),
}

#[derive(Debug)]
pub enum ContentPayload {
    // Level loading already fell back on failure, so it cannot fail here
    Level(LevelData),
    Concept(Result<GameConcept, ContentError>),
    Marketing(Result<MarketingData, ContentError>),
}

#[derive(Debug)]
pub struct ContentResponse {
    pub ticket: u64,
    pub payload: ContentPayload,
}

// Command to control the content thread
enum WorkerCommand {
    Request { ticket: u64, job: ContentJob },
    Quit,
}

/// Runs provider calls off the UI thread.
///
/// Every request gets a ticket that comes back with its response, so callers can drop
/// answers to requests they no longer care about.
pub struct ContentWorker {
    sender: Option<Sender<WorkerCommand>>,
    receiver: Receiver<ContentResponse>,
    next_ticket: u64,
}

impl ContentWorker {
    pub fn spawn(provider: Arc<dyn ContentProvider>) -> Self {
        let (command_sender, command_receiver) = unbounded();
        let (response_sender, response_receiver) = unbounded();

        let spawned = thread::Builder::new()
            .name("content-worker".to_string())
            .spawn(move || run_worker_thread(provider.as_ref(), &command_receiver, &response_sender));

        let sender = match spawned {
            Ok(_) => Some(command_sender),
            Err(e) => {
                error!("Failed to start content worker: {e}");
                None
            }
        };

        Self {
            sender,
            receiver: response_receiver,
            next_ticket: 1,
        }
    }

    /// Queues a job and returns its ticket. A dead worker yields a ticket that is never answered.
    pub fn request(&mut self, job: ContentJob) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;

        debug!("Content request #{ticket}: {job:?}");
        let sent = self
            .sender
            .as_ref()
            .is_some_and(|sender| sender.send(WorkerCommand::Request { ticket, job }).is_ok());
        if !sent {
            error!("Content request #{ticket} dropped: {}", ContentError::WorkerGone);
        }
        ticket
    }

    #[must_use]
    pub fn try_recv(&self) -> Option<ContentResponse> {
        match self.receiver.try_recv() {
            Ok(response) => Some(response),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ContentResponse> {
        match self.receiver.recv_timeout(timeout) {
            Ok(response) => Some(response),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Drop for ContentWorker {
    fn drop(&mut self) {
        if let Some(sender) = self.sender.take() {
            let _ = sender.send(WorkerCommand::Quit);
        }
    }
}

fn run_worker_thread(
    provider: &dyn ContentProvider,
    commands: &Receiver<WorkerCommand>,
    responses: &Sender<ContentResponse>,
) {
    while let Ok(command) = commands.recv() {
        let (ticket, job) = match command {
            WorkerCommand::Request { ticket, job } => (ticket, job),
            WorkerCommand::Quit => break,
        };

        let payload = match job {
            ContentJob::LevelTheme(level) => ContentPayload::Level(load_level(provider, level)),
            ContentJob::Concept(topic) => ContentPayload::Concept(provider.concept(&topic)),
            ContentJob::Marketing(concept) => {
                ContentPayload::Marketing(provider.marketing_strategy(&concept))
            }
        };

        if responses.send(ContentResponse { ticket, payload }).is_err() {
            break; // Nobody is listening any more
        }
    }
    debug!("Content worker stopped");
}
