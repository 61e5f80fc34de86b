use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, scrollable};
use iced::{event, window, Event, Length, Subscription};
use iced::{Element, Task, Theme};
use rfd::FileDialog;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

mod collection;
mod config;
mod lucky;
mod merge;
mod state;
mod ui;

use collection::intake::{self, DropBatch, IntakeCandidate};
use collection::{DecodedImage, ImageCollection, ImageId, IntakeError, Limits, Rotation};
use config::AppConfig;
use lucky::{Gender, LuckyGenerator};
use merge::{
    download_file_name, Alignment, Direction, MergeClient, MergeError, MergeForm, MergeRequest,
    MergeSession, OutputFormat,
};
use state::LocalStore;
use ui::{LuckyPage, Notices, Page};

/// Main application state
struct MergeLucky {
    page: Page,
    notices: Notices,
    /// Ordered images and their intake bookkeeping
    collection: ImageCollection,
    /// Dropped paths waiting to be scanned together
    drops: DropBatch,
    /// Decoded previews, keyed by entry
    previews: HashMap<ImageId, Handle>,
    form: MergeForm,
    session: MergeSession,
    /// None only if the HTTP client could not be built
    client: Option<MergeClient>,
    lucky: LuckyPage,
    /// None only if no store could be opened at all
    generator: Option<LuckyGenerator>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    ShowPage(Page),
    Tick(Instant),

    // Intake
    PickFiles,
    PickFolder,
    FileDropped(PathBuf),
    FlushDrops,
    Scanned(Vec<Result<IntakeCandidate, IntakeError>>),
    ImageRead(u64, Result<DecodedImage, IntakeError>),

    // Editing
    ToggleSelect(ImageId),
    ToggleSelectAll,
    Rotate(ImageId, Rotation),
    Remove(ImageId),
    RemoveSelected,
    MoveUp,
    MoveDown,

    // Options
    DirectionSelected(Direction),
    AlignmentSelected(Alignment),
    FormatSelected(OutputFormat),
    SpacingChanged(String),
    TargetWidthChanged(String),
    TargetHeightChanged(String),
    BorderColorChanged(String),
    BorderWidthChanged(String),
    QualityChanged(String),
    NoBorder,

    // Merge
    Merge,
    Merged(u64, Result<String, MergeError>),
    Download,
    Downloaded(Result<PathBuf, MergeError>),
    Reset,

    // Lucky numbers
    BirthdateChanged(String),
    BirthtimeChanged(String),
    NameChanged(String),
    GenderSelected(Gender),
    GenderCleared,
    DreamChanged(String),
    Generate,
}

impl MergeLucky {
    fn new() -> (Self, Task<Message>) {
        let mut notices = Notices::default();

        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("⚠️  {e}; using defaults");
            notices.warning(e.to_string());
            AppConfig::default()
        });

        let client = match MergeClient::new(
            config.merge_endpoint.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        ) {
            Ok(client) => {
                tracing::info!("🌐 Merge service at {}", client.endpoint());
                Some(client)
            }
            Err(e) => {
                tracing::error!("❌ Could not build HTTP client: {e}");
                notices.error(e.to_string());
                None
            }
        };

        let generator = open_store(&config, &mut notices).and_then(|store| {
            LuckyGenerator::new(store, config.history_limit, config.weighting)
                .map_err(|e| {
                    tracing::error!("❌ Could not load history: {e}");
                    notices.error(e.to_string());
                })
                .ok()
        });

        let collection = ImageCollection::new(Limits {
            max_files: config.max_files,
            max_file_size: config.max_file_size,
        });

        let mut lucky = LuckyPage::default();
        lucky.tick(chrono::Local::now().naive_local());

        tracing::info!("🎨 Merge Lucky initialized");

        (
            MergeLucky {
                page: Page::default(),
                notices,
                collection,
                drops: DropBatch::default(),
                previews: HashMap::new(),
                form: MergeForm::default(),
                session: MergeSession::new(),
                client,
                lucky,
                generator,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ShowPage(page) => {
                self.page = page;
                Task::none()
            }
            Message::Tick(now) => {
                self.notices.expire(now);
                self.lucky.tick(chrono::Local::now().naive_local());
                Task::none()
            }

            Message::PickFiles => {
                let files = FileDialog::new()
                    .set_title("Select Images")
                    .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp", "tiff", "tif"])
                    .pick_files();
                match files {
                    Some(paths) => self.scan(paths),
                    None => Task::none(),
                }
            }
            Message::PickFolder => {
                let folder = FileDialog::new()
                    .set_title("Select Folder with Images")
                    .pick_folder();
                match folder {
                    Some(path) => self.scan(vec![path]),
                    None => Task::none(),
                }
            }
            Message::FileDropped(path) => {
                if self.drops.push(path) {
                    Task::done(Message::FlushDrops)
                } else {
                    Task::none()
                }
            }
            Message::FlushDrops => {
                let paths = self.drops.take();
                self.scan(paths)
            }
            Message::Scanned(results) => {
                let mut candidates = Vec::new();
                for result in results {
                    match result {
                        Ok(candidate) => candidates.push(candidate),
                        Err(e) => self.notices.warning(e.to_string()),
                    }
                }
                self.ingest(candidates)
            }
            Message::ImageRead(epoch, result) => {
                let (result, bytes) = match result {
                    Ok(mut decoded) => {
                        let bytes = std::mem::take(&mut decoded.bytes);
                        (Ok(decoded), Some(bytes))
                    }
                    Err(e) => (Err(e), None),
                };
                match self.collection.complete(epoch, result) {
                    Ok(Some(id)) => {
                        if let Some(bytes) = bytes {
                            self.previews.insert(id, Handle::from_bytes(bytes));
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!("⚠️  {e}");
                        self.notices.warning(e.to_string());
                    }
                }
                self.sync_session();
                Task::none()
            }

            Message::ToggleSelect(id) => {
                self.collection.toggle_select(id);
                Task::none()
            }
            Message::ToggleSelectAll => {
                self.collection.toggle_select_all();
                Task::none()
            }
            Message::Rotate(id, rotation) => {
                self.collection.rotate(id, rotation);
                Task::none()
            }
            Message::Remove(id) => {
                if self.collection.remove(id) {
                    self.previews.remove(&id);
                }
                self.after_removal();
                Task::none()
            }
            Message::RemoveSelected => {
                let removed = self.collection.remove_selected();
                if removed > 0 {
                    self.notices.info(format!("Removed {removed} image(s)."));
                }
                self.after_removal();
                Task::none()
            }
            Message::MoveUp => {
                self.collection.move_selected_up();
                Task::none()
            }
            Message::MoveDown => {
                self.collection.move_selected_down();
                Task::none()
            }

            Message::DirectionSelected(direction) => {
                self.form.direction = direction;
                Task::none()
            }
            Message::AlignmentSelected(alignment) => {
                self.form.alignment = alignment;
                Task::none()
            }
            Message::FormatSelected(format) => {
                self.form.output_format = format;
                Task::none()
            }
            Message::SpacingChanged(value) => {
                self.form.spacing = value;
                Task::none()
            }
            Message::TargetWidthChanged(value) => {
                self.form.target_width = value;
                Task::none()
            }
            Message::TargetHeightChanged(value) => {
                self.form.target_height = value;
                Task::none()
            }
            Message::BorderColorChanged(value) => {
                self.form.border_color = value;
                Task::none()
            }
            Message::BorderWidthChanged(value) => {
                self.form.border_width = value;
                Task::none()
            }
            Message::QualityChanged(value) => {
                self.form.quality = value;
                Task::none()
            }
            Message::NoBorder => {
                self.form.no_border();
                Task::none()
            }

            Message::Merge => self.submit_merge(),
            Message::Merged(ticket, result) => {
                match self.session.finish(ticket, result) {
                    Some(Ok(_)) => self.notices.success("Images merged."),
                    Some(Err(e)) => {
                        tracing::error!("❌ {e}");
                        self.notices.error(e.to_string());
                    }
                    None => tracing::debug!("Dropping merge result that arrived after a reset"),
                }
                Task::none()
            }
            Message::Download => {
                let (Some(url), Some(client)) = (self.session.result_url(), self.client.clone()) else {
                    return Task::none();
                };
                let format = self.form.output_format;
                let target = FileDialog::new()
                    .set_title("Save Merged Image")
                    .set_file_name(download_file_name(format, chrono::Utc::now().timestamp_millis()))
                    .save_file();
                match target {
                    Some(path) => Task::perform(client.download(url.to_string(), path), Message::Downloaded),
                    None => Task::none(),
                }
            }
            Message::Downloaded(result) => {
                match result {
                    Ok(path) => self.notices.success(format!("Saved to {}", path.display())),
                    Err(e) => {
                        tracing::error!("❌ {e}");
                        self.notices.error(e.to_string());
                    }
                }
                Task::none()
            }
            Message::Reset => {
                self.collection.reset();
                self.previews.clear();
                self.session.reset();
                self.form = MergeForm::default();
                self.notices.clear();
                tracing::info!("🔄 Reset merge page");
                Task::none()
            }

            Message::BirthdateChanged(value) => {
                self.lucky.form.birthdate = value;
                Task::none()
            }
            Message::BirthtimeChanged(value) => {
                self.lucky.form.birthtime = value;
                Task::none()
            }
            Message::NameChanged(value) => {
                self.lucky.form.name = value;
                Task::none()
            }
            Message::GenderSelected(gender) => {
                self.lucky.form.gender = Some(gender);
                Task::none()
            }
            Message::GenderCleared => {
                self.lucky.form.gender = None;
                Task::none()
            }
            Message::DreamChanged(value) => {
                self.lucky.form.dream = value;
                Task::none()
            }
            Message::Generate => {
                let Some(generator) = self.generator.as_mut() else {
                    return Task::none();
                };
                let input = self.lucky.form.to_input();
                match generator.generate(&input, chrono::Local::now().naive_local()) {
                    Ok(generated) => {
                        if generated.fresh {
                            self.notices.success("Your numbers for this week are ready.");
                        } else {
                            self.notices.info("You already have numbers for this week.");
                        }
                        self.lucky.show(generated, input);
                    }
                    Err(e) => {
                        tracing::warn!("⚠️  {e}");
                        self.notices.error(e.to_string());
                    }
                }
                Task::none()
            }
        }
    }

    /// Walk dropped or picked paths on the blocking pool
    fn scan(&mut self, paths: Vec<PathBuf>) -> Task<Message> {
        if paths.is_empty() {
            return Task::none();
        }
        Task::perform(intake::scan(paths), Message::Scanned)
    }

    /// Validate candidates and start one read per accepted file
    fn ingest(&mut self, candidates: Vec<IntakeCandidate>) -> Task<Message> {
        let plan = self.collection.plan_intake(candidates);
        for rejected in &plan.rejected {
            tracing::warn!("⚠️  {rejected}");
            self.notices.warning(rejected.to_string());
        }
        if plan.accepted.is_empty() {
            return Task::none();
        }

        self.notices.success(format!("Adding {} image(s)...", plan.accepted.len()));
        self.sync_session();

        let epoch = plan.epoch;
        Task::batch(plan.accepted.into_iter().map(move |candidate| {
            Task::perform(intake::decode(candidate), move |result| {
                Message::ImageRead(epoch, result)
            })
        }))
    }

    fn after_removal(&mut self) {
        let ids: Vec<ImageId> = self.collection.entries().iter().map(|e| e.id).collect();
        self.previews.retain(|id, _| ids.contains(id));
        self.sync_session();
    }

    /// Reads still in flight count as content
    fn sync_session(&mut self) {
        self.session
            .sync(self.collection.len() + self.collection.pending());
    }

    fn submit_merge(&mut self) -> Task<Message> {
        let Some(client) = self.client.clone() else {
            self.notices.error("The merge service is not available.");
            return Task::none();
        };

        let ticket = match self.session.begin(self.collection.len()) {
            Ok(ticket) => ticket,
            Err(e) => {
                self.notices.error(e.to_string());
                return Task::none();
            }
        };

        let options = self.form.to_options();
        let body = MergeRequest::new(&self.collection, &options).and_then(|request| {
            tracing::info!("🧩 Merging {} image(s)", request.len());
            request.to_body()
        });
        let body = match body {
            Ok(body) => body,
            Err(e) => {
                self.session.abort();
                self.notices.error(e.to_string());
                return Task::none();
            }
        };

        Task::perform(client.submit(body), move |result| Message::Merged(ticket, result))
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let tabs = row![
            button("Image Merge").on_press_maybe((self.page != Page::Merge).then_some(Message::ShowPage(Page::Merge))),
            button("Lucky Numbers").on_press_maybe((self.page != Page::Lucky).then_some(Message::ShowPage(Page::Lucky))),
        ]
        .spacing(10);

        let page = match self.page {
            Page::Merge => ui::merge_page::view(&self.collection, &self.previews, &self.form, &self.session),
            Page::Lucky => ui::lucky_page::view(&self.lucky, self.generator.as_ref()),
        };

        let content = column![
            tabs,
            self.notices.view(),
            scrollable(container(page).padding([0, 8])).height(Length::Fill),
        ]
        .spacing(16)
        .padding(24);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            event::listen_with(dropped_file),
            iced::time::every(Duration::from_secs(1)).map(Message::Tick),
        ])
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn dropped_file(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        _ => None,
    }
}

/// Open the configured store, falling back to memory so the page still works
fn open_store(config: &AppConfig, notices: &mut Notices) -> Option<LocalStore> {
    let path = config.store_path();
    match LocalStore::open(&path) {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::error!("❌ Could not open {}: {e}", path.display());
            notices.warning("History will not be saved this session.");
            LocalStore::in_memory()
                .map_err(|e| tracing::error!("❌ In-memory store failed too: {e}"))
                .ok()
        }
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("merge_lucky=info")),
        )
        .init();

    iced::application("Merge Lucky", MergeLucky::update, MergeLucky::view)
        .subscription(MergeLucky::subscription)
        .theme(MergeLucky::theme)
        .centered()
        .run_with(MergeLucky::new)
}
