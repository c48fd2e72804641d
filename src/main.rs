use iced::widget::{button, column, container, row, text, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::Arc;

use cat_fetcher::config::Settings;
use cat_fetcher::error::FetchError;
use cat_fetcher::logging;
use cat_fetcher::net::{self, CatApiClient, HttpDownloader};
use cat_fetcher::state::data::{FetchedImage, SaveReport};
use cat_fetcher::state::CatController;
use cat_fetcher::storage::GalleryStore;
use cat_fetcher::ui::{ImagePanel, ToastSlot};

type AppController = CatController<CatApiClient, HttpDownloader, GalleryStore>;

/// Main application state
struct CatFetcher {
    /// Fetches, downloads and saves cats
    controller: Arc<AppController>,
    settings: Settings,
    /// Where settings are written back to (None if the OS has no config dir)
    settings_path: Option<PathBuf>,
    panel: ImagePanel,
    toasts: ToastSlot,
    /// A fetch/save cycle is running; the fetch button is disabled meanwhile
    busy: bool,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Fetch cat"
    FetchCat,
    /// The cat API answered
    Fetched(Result<FetchedImage, FetchError>),
    /// Download and save finished (successfully or not)
    Saved(SaveReport),
    /// A toast's display time ran out
    ToastExpired(u64),
    /// User clicked "Choose folder"
    ChooseFolder,
}

impl CatFetcher {
    fn new(
        controller: AppController,
        settings: Settings,
        settings_path: Option<PathBuf>,
    ) -> (Self, Task<Message>) {
        let status = format!("Ready. Cats are saved to {}", controller.store().dir().display());

        (
            CatFetcher {
                controller: Arc::new(controller),
                settings,
                settings_path,
                panel: ImagePanel::default(),
                toasts: ToastSlot::default(),
                busy: false,
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FetchCat => {
                if self.busy {
                    return Task::none();
                }
                self.busy = true;
                self.status = "Looking for a cat...".to_string();

                let controller = Arc::clone(&self.controller);
                Task::perform(
                    async move { controller.fetch_new_image().await },
                    Message::Fetched,
                )
            }
            Message::Fetched(Ok(image)) => {
                if !image.is_new {
                    // Same cat as before: it was already saved, nothing to do
                    self.busy = false;
                    self.status = "The cat service sent the same cat again.".to_string();
                    return Task::none();
                }

                let url = image.reference.url;
                self.panel = ImagePanel::loading(url.clone());
                self.status = format!("Downloading {url}...");

                let controller = Arc::clone(&self.controller);
                Task::perform(
                    async move { controller.download_and_save(&url).await },
                    Message::Saved,
                )
            }
            Message::Fetched(Err(e)) => {
                self.busy = false;
                self.status = format!("Couldn't get a cat: {e}");
                Task::none()
            }
            Message::Saved(report) => {
                self.busy = false;
                self.panel.finish(&report);
                self.status = match &report.saved_to {
                    Some(path) => format!("Saved to {}", path.display()),
                    None => format!("Could not save {}", report.url),
                };

                let id = self.toasts.show(report.outcome);
                let duration = self.settings.toast_duration();
                Task::perform(
                    async move { tokio::time::sleep(duration).await },
                    move |_| Message::ToastExpired(id),
                )
            }
            Message::ToastExpired(id) => {
                self.toasts.expire(id);
                Task::none()
            }
            Message::ChooseFolder => {
                let folder = FileDialog::new()
                    .set_title("Select Folder for Saved Cats")
                    .set_directory(self.controller.store().dir())
                    .pick_folder();

                if let Some(folder) = folder {
                    self.use_folder(folder);
                }

                Task::none()
            }
        }
    }

    /// Switch the save folder and remember it for next time
    fn use_folder(&mut self, folder: PathBuf) {
        self.controller.store().set_dir(&folder);
        self.settings.save_dir = Some(folder.clone());
        self.status = format!("Cats will be saved to {}", folder.display());

        if let Some(path) = &self.settings_path {
            if let Err(e) = self.settings.save_to(path) {
                tracing::warn!("⚠️  Could not write {}: {e}", path.display());
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let fetch = button("Fetch cat")
            .on_press_maybe((!self.busy).then_some(Message::FetchCat))
            .padding(10);

        let folder = button("Choose folder")
            .on_press(Message::ChooseFolder)
            .padding(10);

        let content: Column<Message> = column![
            self.panel.view(),
            row![fetch, folder].spacing(12),
            text(&self.status).size(14),
        ]
        .push_maybe(self.toasts.current().map(|toast| toast.view()))
        .spacing(20)
        .padding(40)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Wire the real network clients and gallery folder into a controller
fn build_controller(settings: &Settings) -> reqwest::Result<AppController> {
    let client = net::build_client()?;

    Ok(CatController::new(
        CatApiClient::new(client.clone(), &settings.api_url, settings.api_key.clone()),
        HttpDownloader::new(client),
        GalleryStore::new(settings.save_dir()),
    ))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let settings_path = Settings::default_path();
    let settings = Settings::load();
    let controller = build_controller(&settings)?;

    tracing::info!(api = %settings.api_url, "🐱 Cat Fetcher starting");

    iced::application("Cat Fetcher", CatFetcher::update, CatFetcher::view)
        .theme(CatFetcher::theme)
        .centered()
        .run_with(move || CatFetcher::new(controller, settings, settings_path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    use cat_fetcher::state::data::{ImageReference, SaveOutcome};
    use cat_fetcher::ui::toast;

    const CAT: &str = "https://cdn.example/cat123.jpg";

    fn app(dir: &std::path::Path) -> CatFetcher {
        let settings = Settings {
            save_dir: Some(dir.to_path_buf()),
            ..Settings::default()
        };
        let controller = build_controller(&settings).unwrap();
        let (app, _) = CatFetcher::new(controller, settings, Some(dir.join("settings.json")));
        app
    }

    fn fetched(is_new: bool) -> Message {
        Message::Fetched(Ok(FetchedImage {
            reference: ImageReference::new(CAT),
            is_new,
        }))
    }

    fn saved(outcome: SaveOutcome) -> Message {
        Message::Saved(SaveReport {
            url: CAT.to_string(),
            outcome,
            bytes: Some(Bytes::from_static(b"\xFF\xD8\xFF")),
            saved_to: outcome.succeeded.then(|| PathBuf::from("/pics/cat_1.jpg")),
        })
    }

    #[test]
    fn test_new_cat_starts_loading() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());

        let _ = app.update(Message::FetchCat);
        assert!(app.busy);
        let _ = app.update(fetched(true));

        assert!(app.busy);
        assert!(matches!(app.panel, ImagePanel::Loading { .. }));
        assert_eq!(app.panel.url(), Some(CAT));
    }

    #[test]
    fn test_repeated_cat_is_not_saved_again() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());

        let _ = app.update(Message::FetchCat);
        let _ = app.update(fetched(false));

        assert!(!app.busy);
        assert!(matches!(app.panel, ImagePanel::Empty));
    }

    #[test]
    fn test_fetch_error_shows_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());

        let _ = app.update(Message::FetchCat);
        let _ = app.update(Message::Fetched(Err(FetchError::Status(503))));

        assert!(!app.busy);
        assert!(app.status.contains("503"));
        assert!(app.toasts.current().is_none());
    }

    #[test]
    fn test_successful_save_shows_success_toast() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());

        let _ = app.update(fetched(true));
        let _ = app.update(saved(SaveOutcome::SUCCEEDED));

        assert!(!app.busy);
        assert!(matches!(app.panel, ImagePanel::Ready { .. }));
        assert_eq!(app.toasts.current().unwrap().text(), toast::SAVE_SUCCEEDED);
        assert!(app.status.contains("cat_1.jpg"));
    }

    #[test]
    fn test_failed_save_shows_failure_toast() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());

        let _ = app.update(fetched(true));
        let _ = app.update(saved(SaveOutcome::FAILED));

        assert_eq!(app.toasts.current().unwrap().text(), toast::SAVE_FAILED);
    }

    #[test]
    fn test_old_toast_timer_leaves_new_toast() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());

        let _ = app.update(saved(SaveOutcome::SUCCEEDED));
        let first = app.toasts.current().unwrap().id;
        let _ = app.update(saved(SaveOutcome::FAILED));
        let _ = app.update(Message::ToastExpired(first));

        assert_eq!(app.toasts.current().unwrap().text(), toast::SAVE_FAILED);
    }

    #[test]
    fn test_use_folder_persists_choice() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        let folder = dir.path().join("kittens");

        app.use_folder(folder.clone());

        assert_eq!(app.controller.store().dir(), folder);
        let stored = Settings::load_from(&dir.path().join("settings.json")).unwrap();
        assert_eq!(stored.save_dir, Some(folder));
    }
}
