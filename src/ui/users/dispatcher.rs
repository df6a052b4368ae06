//! Intent handling for the user screen.
//!
//! Synchronous intents (field edits, search, image selection) are applied
//! before `handle` returns. Intents that talk to the repository become
//! [`Job`]s, which either run on their own task or queue behind a single
//! worker, depending on [`DispatchMode`]. Captured photos are saved on the
//! blocking pool and never wait behind repository jobs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};

use crate::config::{DispatchConfig, DispatchMode};
use crate::images::ImageStore;
use crate::model::{ImageData, User};
use crate::repository::UserRepository;
use crate::ui::mvi::Reducer;
use crate::ui::users::action::UserAction;
use crate::ui::users::effect::UserEffect;
use crate::ui::users::intent::UserIntent;
use crate::ui::users::reducer::UserReducer;
use crate::ui::users::state::UserViewState;
use crate::ui::users::validation::FormCheck;

/// Read-only view of the current state. Always holds a value.
pub type StateStream = watch::Receiver<UserViewState>;

/// Single consumer of one-shot effects, in emission order.
///
/// Effects queue until they are received. Once the stream is dropped,
/// new effects are discarded.
pub struct EffectStream {
    receiver: mpsc::UnboundedReceiver<UserEffect>,
}

impl EffectStream {
    /// Next effect, or `None` once the dispatcher and all its jobs are gone.
    pub async fn recv(&mut self) -> Option<UserEffect> {
        self.receiver.recv().await
    }

    /// Next effect if one is already waiting.
    pub fn try_recv(&mut self) -> Option<UserEffect> {
        self.receiver.try_recv().ok()
    }

    /// Everything currently buffered, oldest first.
    pub fn drain(&mut self) -> Vec<UserEffect> {
        let mut effects = Vec::new();
        while let Some(effect) = self.try_recv() {
            effects.push(effect);
        }
        effects
    }
}

/// Where the photo of a user being added comes from.
enum ImageSource {
    /// Fresh bytes that still have to be saved.
    Bytes(ImageData),
    /// Reference saved earlier (undo of a delete).
    Saved(Option<String>),
}

/// Repository-backed unit of work.
enum Job {
    Load,
    Add {
        name: String,
        email: String,
        image: ImageSource,
    },
    Delete(User),
    Clear,
}

impl Job {
    fn name(&self) -> &'static str {
        match self {
            Job::Load => "load",
            Job::Add { .. } => "add",
            Job::Delete(_) => "delete",
            Job::Clear => "clear",
        }
    }

    /// Initial loads don't show the spinner.
    fn shows_loading(&self) -> bool {
        !matches!(self, Job::Load)
    }
}

/// Owns the view state, the undo slot and the only path to the repository.
#[derive(Clone)]
pub struct UserDispatcher {
    shared: Arc<Shared>,
    queue: Option<mpsc::UnboundedSender<Job>>,
}

struct Shared {
    repository: Arc<dyn UserRepository>,
    images: Arc<dyn ImageStore>,
    mode: DispatchMode,
    state: watch::Sender<UserViewState>,
    effects: mpsc::UnboundedSender<UserEffect>,
    recently_deleted: Mutex<Option<User>>,
    /// Jobs submitted but not finished.
    pending: watch::Sender<usize>,
    /// Subset of `pending` that set the loading flag.
    loading: AtomicUsize,
}

impl UserDispatcher {
    /// Build a dispatcher and the stream its effects are delivered on.
    ///
    /// Must be called inside a tokio runtime: serialized mode spawns its
    /// worker here, and `load_on_start` submits the first job.
    pub fn new(
        repository: Arc<dyn UserRepository>,
        images: Arc<dyn ImageStore>,
        config: &DispatchConfig,
    ) -> (Self, EffectStream) {
        let (effects, receiver) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(UserViewState::default());
        let (pending, _) = watch::channel(0);

        let shared = Arc::new(Shared {
            repository,
            images,
            mode: config.mode,
            state,
            effects,
            recently_deleted: Mutex::new(None),
            pending,
            loading: AtomicUsize::new(0),
        });

        let queue = match config.mode {
            DispatchMode::Concurrent => None,
            DispatchMode::Serialized => {
                let (sender, mut jobs) = mpsc::unbounded_channel::<Job>();
                let worker = Arc::clone(&shared);
                tokio::spawn(async move {
                    while let Some(job) = jobs.recv().await {
                        worker.run(job).await;
                    }
                    tracing::debug!("Dispatch worker stopped");
                });
                Some(sender)
            }
        };

        let dispatcher = Self { shared, queue };
        if config.load_on_start {
            dispatcher.handle(UserIntent::LoadUsers);
        }

        (dispatcher, EffectStream { receiver })
    }

    /// Subscribe to state snapshots. The current value is available at once.
    pub fn state(&self) -> StateStream {
        self.shared.state.subscribe()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> UserViewState {
        self.shared.state.borrow().clone()
    }

    /// User held for `UndoDelete`, if any.
    pub fn recently_deleted(&self) -> Option<User> {
        self.shared.recently_deleted.lock().clone()
    }

    /// Resolves once no repository job or photo save is pending.
    pub async fn wait_idle(&self) {
        let mut pending = self.shared.pending.subscribe();
        // The sender lives in `self.shared`, so this cannot fail.
        let _ = pending.wait_for(|count| *count == 0).await;
    }

    /// Apply `intent`. Never blocks: repository calls and photo saves run
    /// on spawned tasks and report through the state and effect streams.
    pub fn handle(&self, intent: UserIntent) {
        tracing::debug!(?intent, "Handling intent");
        match intent {
            UserIntent::LoadUsers => self.submit(Job::Load),
            UserIntent::AddUser { name, email, image } => {
                if !self.check_form(&name, &email) {
                    return;
                }
                let Some(image) = image else {
                    self.shared
                        .notify(UserEffect::notice("Please select or capture an image!"));
                    return;
                };
                self.submit(Job::Add {
                    name,
                    email,
                    image: ImageSource::Bytes(image),
                });
            }
            UserIntent::DeleteUser(user) => {
                // Last delete wins the undo slot.
                *self.shared.recently_deleted.lock() = Some(user.clone());
                self.submit(Job::Delete(user));
            }
            UserIntent::UndoDelete => {
                let Some(user) = self.shared.recently_deleted.lock().take() else {
                    tracing::debug!("Nothing to undo");
                    return;
                };
                if !self.check_form(&user.name, &user.email) {
                    return;
                }
                self.submit(Job::Add {
                    name: user.name,
                    email: user.email,
                    image: ImageSource::Saved(user.image_ref),
                });
            }
            UserIntent::ClearUsers => self.submit(Job::Clear),
            UserIntent::SearchUser(query) => {
                let state = self.shared.apply(UserAction::SearchApplied(query));
                if state.users.is_empty() {
                    self.shared.notify(UserEffect::notice("No users found"));
                }
            }
            UserIntent::UpdateName(name) => {
                self.shared.apply(UserAction::NameEdited(name));
            }
            UserIntent::UpdateEmail(email) => {
                self.shared.apply(UserAction::EmailEdited(email));
            }
            UserIntent::SelectImage(reference) => {
                self.shared.apply(UserAction::ImageSelected(Some(reference)));
                self.shared
                    .notify(UserEffect::notice("Image selected from gallery!"));
            }
            UserIntent::CaptureImage(image) => {
                self.shared.pending.send_modify(|count| *count += 1);
                let shared = Arc::clone(&self.shared);
                tokio::spawn(async move {
                    shared.capture(image).await;
                    shared.finish_job();
                });
            }
        }
    }

    /// Validate a submit. On failure, flags the fields and notifies.
    fn check_form(&self, name: &str, email: &str) -> bool {
        let check = FormCheck::run(name, email);
        if check.is_valid() {
            return true;
        }
        self.shared.apply(UserAction::ValidationFailed {
            name_error: check.name_error,
            email_error: check.email_error,
        });
        if let Some(message) = check.message() {
            self.shared.notify(UserEffect::notice(message));
        }
        false
    }

    fn submit(&self, job: Job) {
        if job.shows_loading() {
            self.shared.loading.fetch_add(1, Ordering::SeqCst);
            self.shared.apply(UserAction::LoadingStarted);
        }
        self.shared.pending.send_modify(|count| *count += 1);
        tracing::debug!(job = job.name(), mode = ?self.shared.mode, "Submitting job");

        match &self.queue {
            None => {
                let shared = Arc::clone(&self.shared);
                tokio::spawn(async move { shared.run(job).await });
            }
            Some(queue) => {
                if let Err(mpsc::error::SendError(job)) = queue.send(job) {
                    // Worker is gone (runtime shutting down); settle the counters.
                    tracing::warn!(job = job.name(), "Dispatch worker unavailable, job dropped");
                    if job.shows_loading() {
                        let is_loading = self.shared.settle_loading();
                        self.shared
                            .apply(UserAction::OperationFailed { is_loading });
                    }
                    self.shared.finish_job();
                }
            }
        }
    }
}

impl Shared {
    /// Reduce `action` into the current state and return the new snapshot.
    fn apply(&self, action: UserAction) -> UserViewState {
        let mut snapshot = UserViewState::default();
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = UserReducer::reduce(current, action);
            snapshot = state.clone();
        });
        snapshot
    }

    fn notify(&self, effect: UserEffect) {
        if let Err(mpsc::error::SendError(effect)) = self.effects.send(effect) {
            tracing::trace!(%effect, "Effect dropped, nobody is listening");
        }
    }

    /// Account for one finished loading job and return the flag to show.
    fn settle_loading(&self) -> bool {
        let remaining = self
            .loading
            .fetch_sub(1, Ordering::SeqCst)
            .saturating_sub(1);
        match self.mode {
            // Any completion clears the spinner, even with others in flight.
            DispatchMode::Concurrent => false,
            DispatchMode::Serialized => remaining > 0,
        }
    }

    fn finish_job(&self) {
        self.pending
            .send_modify(|count| *count = count.saturating_sub(1));
    }

    async fn run(&self, job: Job) {
        let kind = job.name();
        match job {
            Job::Load => self.load().await,
            Job::Add { name, email, image } => self.add(name, email, image).await,
            Job::Delete(user) => self.delete(user).await,
            Job::Clear => self.clear().await,
        }
        tracing::debug!(job = kind, "Job finished");
        self.finish_job();
    }

    async fn load(&self) {
        match self.repository.list().await {
            Ok(users) => {
                tracing::info!(count = users.len(), "Users loaded");
                self.apply(UserAction::UsersLoaded(users));
            }
            Err(err) => {
                tracing::warn!(error = %err, "Loading users failed");
                self.notify(UserEffect::notice(format!("Error loading users: {err}")));
            }
        }
    }

    async fn add(&self, name: String, email: String, image: ImageSource) {
        let image_ref = match image {
            ImageSource::Bytes(data) => self.save_image(data).await,
            ImageSource::Saved(reference) => reference,
        };
        let user = User::new(self.repository.next_id(), name, email, image_ref);
        let id = user.id;

        match self.repository.add(user).await {
            Ok(users) => {
                tracing::info!(%id, count = users.len(), "User added");
                let is_loading = self.settle_loading();
                self.apply(UserAction::UserAdded { users, is_loading });
                self.notify(UserEffect::notice("User added successfully!"));
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "Adding user failed");
                let is_loading = self.settle_loading();
                self.apply(UserAction::OperationFailed { is_loading });
                self.notify(UserEffect::notice(format!("Error adding user: {err}")));
            }
        }
    }

    async fn capture(&self, image: ImageData) {
        let reference = self.save_image(image).await;
        let message = if reference.is_some() {
            "Image captured successfully!"
        } else {
            "Could not save captured image"
        };
        self.apply(UserAction::ImageSelected(reference));
        self.notify(UserEffect::notice(message));
    }

    async fn save_image(&self, data: ImageData) -> Option<String> {
        let images = Arc::clone(&self.images);
        match tokio::task::spawn_blocking(move || images.save(&data)).await {
            Ok(reference) => reference,
            Err(err) => {
                tracing::warn!(error = %err, "Image save task failed");
                None
            }
        }
    }

    async fn delete(&self, user: User) {
        match self.repository.remove(&user).await {
            Ok(users) => {
                tracing::info!(id = %user.id, count = users.len(), "User deleted");
                let is_loading = self.settle_loading();
                self.apply(UserAction::UsersChanged { users, is_loading });
                self.notify(UserEffect::notice_with_action("User deleted", "Undo"));
            }
            Err(err) => {
                tracing::warn!(id = %user.id, error = %err, "Deleting user failed");
                let is_loading = self.settle_loading();
                self.apply(UserAction::OperationFailed { is_loading });
                self.notify(UserEffect::notice(format!("Error deleting user: {err}")));
            }
        }
    }

    async fn clear(&self) {
        match self.repository.clear().await {
            Ok(users) => {
                tracing::info!("Users cleared");
                let is_loading = self.settle_loading();
                self.apply(UserAction::UsersChanged { users, is_loading });
                self.notify(UserEffect::notice("All users cleared!"));
            }
            Err(err) => {
                tracing::warn!(error = %err, "Clearing users failed");
                let is_loading = self.settle_loading();
                self.apply(UserAction::OperationFailed { is_loading });
                self.notify(UserEffect::notice(format!("Error clearing users: {err}")));
            }
        }
    }
}
