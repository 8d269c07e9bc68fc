use iced::widget::{button, column, container, horizontal_rule, row, scrollable, text, Space};
use iced::{Element, Length, Task, Theme};
use rfd::AsyncFileDialog;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod media;
mod state;
mod ui;

use api::{ApiClient, UploadEvent};
use config::Config;
use error::Result;
use state::data::{ImageRef, ThumbnailPixels, UploadDraft};
use state::Gallery;

/// Extensions the file picker offers
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Main application state
struct ImageGallery {
    /// The page's state machine
    gallery: Gallery,
    /// Client for the gallery service
    client: ApiClient,
    /// Edge length thumbnails are fitted into
    thumbnail_size: u32,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User asked for a fresh image list
    Refresh,
    /// A list fetch completed
    ImagesListed(u64, Result<Vec<ImageRef>>),
    /// User clicked "Choose image"
    PickFile,
    /// The file picker closed (None when cancelled)
    FilePicked(Option<PathBuf>),
    /// User submitted the upload form
    Submit,
    /// Progress or completion of the upload with this token
    Upload(u64, UploadEvent),
    /// User clicked an image's delete button
    Delete(ImageRef),
    /// A delete request completed
    Deleted(ImageRef, Result<()>),
    /// A thumbnail finished downloading and decoding
    ThumbnailLoaded(ImageRef, Result<ThumbnailPixels>),
}

impl ImageGallery {
    /// Create the application and fetch the image list right away
    fn new(client: ApiClient, config: &Config) -> (Self, Task<Message>) {
        let mut app = ImageGallery {
            gallery: Gallery::new(),
            client,
            thumbnail_size: config.thumbnail_size,
        };
        let task = app.list();
        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Refresh => self.list(),
            Message::ImagesListed(token, result) => {
                let missing = self.gallery.finish_list(token, result);
                Task::batch(missing.into_iter().map(|image| self.load_thumbnail(image)))
            }
            Message::PickFile => Task::perform(
                async {
                    AsyncFileDialog::new()
                        .set_title("Select an image")
                        .add_filter("Images", IMAGE_EXTENSIONS)
                        .pick_file()
                        .await
                        .map(|handle| handle.path().to_path_buf())
                },
                Message::FilePicked,
            ),
            Message::FilePicked(path) => {
                // Cancelling the picker keeps whatever was chosen before
                if let Some(path) = path {
                    self.gallery.select_file(UploadDraft::new(path));
                }
                Task::none()
            }
            Message::Submit => {
                let Some(request) = self.gallery.begin_upload() else {
                    return Task::none();
                };
                let token = request.token;
                Task::run(
                    api::upload_events(self.client.clone(), request.draft),
                    move |event| Message::Upload(token, event),
                )
            }
            Message::Upload(token, UploadEvent::Progress(percent)) => {
                self.gallery.upload_progress(token, percent);
                Task::none()
            }
            Message::Upload(token, UploadEvent::Finished(result)) => {
                match self.gallery.finish_upload(token, result) {
                    Some(list_token) => self.fetch_list(list_token),
                    None => Task::none(),
                }
            }
            Message::Delete(image) => {
                let Some(request) = self.gallery.begin_delete(&image) else {
                    return Task::none();
                };
                let client = self.client.clone();
                let reference = request.reference;
                let file_name = request.file_name;
                Task::perform(
                    async move { client.delete_image(&file_name).await },
                    move |result| Message::Deleted(reference.clone(), result),
                )
            }
            Message::Deleted(image, result) => {
                self.gallery.finish_delete(&image, result);
                Task::none()
            }
            Message::ThumbnailLoaded(image, result) => {
                self.gallery.finish_thumbnail(&image, result);
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let header = row![
            text("Image Gallery").size(32),
            Space::with_width(Length::Fill),
            button("Refresh").on_press(Message::Refresh).padding(8),
        ]
        .align_y(iced::Alignment::Center);

        let content = column![
            header,
            ui::upload_form::view(&self.gallery),
            horizontal_rule(1),
            ui::grid::view(&self.gallery),
        ]
        .spacing(20)
        .padding(30)
        .max_width(760);

        scrollable(container(content).center_x(Length::Fill))
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Issue a fresh list fetch
    fn list(&mut self) -> Task<Message> {
        let token = self.gallery.begin_list();
        self.fetch_list(token)
    }

    fn fetch_list(&self, token: u64) -> Task<Message> {
        let client = self.client.clone();
        Task::perform(async move { client.list_images().await }, move |result| {
            Message::ImagesListed(token, result)
        })
    }

    fn load_thumbnail(&self, image: ImageRef) -> Task<Message> {
        let client = self.client.clone();
        let size = self.thumbnail_size;
        let reference = image.clone();
        Task::perform(
            async move {
                let bytes = client.fetch_image(&reference).await?;
                media::thumbnail::generate_thumbnail(bytes, size).await
            },
            move |result| Message::ThumbnailLoaded(image.clone(), result),
        )
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("image_gallery=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::load()?;
    let client = ApiClient::new(&config)?;
    tracing::info!(api = %client.base(), "image gallery starting");

    iced::application("Image Gallery", ImageGallery::update, ImageGallery::view)
        .theme(ImageGallery::theme)
        .centered()
        .run_with(move || ImageGallery::new(client, &config))?;

    Ok(())
}
