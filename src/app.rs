use iced::widget::{column, container, image, scrollable, text};
use iced::{Alignment, Element, Length, Task, Theme};
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

use crate::api::ApiClient;
use crate::error::GalleryError;
use crate::state::{Artwork, ArtworkId, FormDraft, Portfolio, SelectedImage, UploadRequest};
use crate::ui::cards::{CardModel, Preview};
use crate::ui::dialogs::Dialogs;
use crate::ui::{self, ViewPlan};

const DELETE_PROMPT: &str = "Are you sure you want to delete this artwork?";

/// Main application state
pub struct PixelGallery {
    api: ApiClient,
    /// Alerts, confirmations and the file picker
    dialogs: Box<dyn Dialogs>,
    /// Local mirror of the server's artwork list
    portfolio: Portfolio,
    /// Upload form values
    draft: FormDraft,
    /// Card images and failed downloads, dropped whenever the list is replaced
    previews: HashMap<ArtworkId, Preview>,
    /// Status line shown under the header
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// The artwork list request finished
    ArtworksFetched(Result<Vec<Artwork>, GalleryError>),
    /// Image bytes for one card arrived
    PreviewLoaded(ArtworkId, Result<Vec<u8>, GalleryError>),
    TitleChanged(String),
    DescriptionChanged(String),
    /// User clicked "Choose Image"
    PickImage,
    /// User submitted the upload form
    Submit,
    UploadFinished(Result<(), GalleryError>),
    /// User clicked delete on a card
    Delete(ArtworkId),
    DeleteFinished(ArtworkId, Result<(), GalleryError>),
}

impl PixelGallery {
    /// Create the application and start the first list fetch
    pub fn new(api: ApiClient, dialogs: Box<dyn Dialogs>) -> (Self, Task<Message>) {
        let gallery = PixelGallery {
            api,
            dialogs,
            portfolio: Portfolio::new(),
            draft: FormDraft::new(),
            previews: HashMap::new(),
            status: "Loading artworks...".to_string(),
        };

        let fetch = gallery.fetch_artworks();
        (gallery, fetch)
    }

    fn is_owner(&self) -> bool {
        self.api.config().is_owner
    }

    fn fetch_artworks(&self) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(async move { api.list_artworks().await }, Message::ArtworksFetched)
    }

    /// Handle application messages and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ArtworksFetched(result) => {
                let downloads = self.artworks_fetched(result);

                Task::batch(downloads.into_iter().map(|(id, url)| {
                    let api = self.api.clone();
                    Task::perform(
                        async move {
                            let bytes = api.fetch_image(&url).await;
                            (id, bytes)
                        },
                        |(id, bytes)| Message::PreviewLoaded(id, bytes),
                    )
                }))
            }
            Message::PreviewLoaded(id, result) => {
                match result {
                    // A refetch may have dropped the card in the meantime
                    _ if self.portfolio.get(&id).is_none() => {
                        debug!("Dropping preview for removed artwork {}", id)
                    }
                    Ok(bytes) => {
                        self.previews
                            .insert(id, Preview::Ready(image::Handle::from_bytes(bytes)));
                    }
                    Err(e) => {
                        warn!("Could not load image for artwork {}: {}", id, e);
                        self.previews.insert(id, Preview::Unavailable);
                    }
                }
                Task::none()
            }
            Message::TitleChanged(title) => {
                self.draft.title = title;
                Task::none()
            }
            Message::DescriptionChanged(description) => {
                self.draft.description = description;
                Task::none()
            }
            Message::PickImage => {
                if let Some(path) = self.dialogs.pick_image() {
                    debug!("Selected {}", path.display());
                    self.draft.image = Some(SelectedImage::new(path));
                }
                Task::none()
            }
            Message::Submit => match self.submit() {
                Some(request) => {
                    let api = self.api.clone();
                    Task::perform(async move { api.upload(request).await }, Message::UploadFinished)
                }
                None => Task::none(),
            },
            Message::UploadFinished(result) => {
                if self.upload_finished(result) {
                    self.fetch_artworks()
                } else {
                    Task::none()
                }
            }
            Message::Delete(id) => {
                if !self.confirm_delete(&id) {
                    return Task::none();
                }

                let api = self.api.clone();
                Task::perform(
                    async move {
                        let result = api.delete_artwork(&id).await;
                        (id, result)
                    },
                    |(id, result)| Message::DeleteFinished(id, result),
                )
            }
            Message::DeleteFinished(id, result) => {
                self.delete_finished(&id, result);
                Task::none()
            }
        }
    }

    /// Replace the list and return the `(id, url)` of every image to download
    fn artworks_fetched(&mut self, result: Result<Vec<Artwork>, GalleryError>) -> Vec<(ArtworkId, String)> {
        self.portfolio.apply_fetch(result);
        self.previews.clear();
        self.refresh_status();

        self.portfolio
            .artworks()
            .iter()
            .map(|art| (art.id.clone(), self.api.config().resolve_image_url(&art.url)))
            .collect()
    }

    /// Validate the draft. Returns the request to send, or warns and returns None.
    fn submit(&mut self) -> Option<UploadRequest> {
        if !self.is_owner() {
            return None;
        }

        match self.draft.begin_upload() {
            Ok(request) => {
                self.status = "Uploading...".to_string();
                Some(request)
            }
            Err(GalleryError::UploadInProgress) => {
                debug!("Ignoring submit while an upload is in flight");
                None
            }
            Err(e) => {
                self.dialogs.alert(&e.to_string());
                None
            }
        }
    }

    /// Apply an upload outcome. Returns true when the list must be refetched.
    fn upload_finished(&mut self, result: Result<(), GalleryError>) -> bool {
        let refetch = self.draft.finish_upload(&result);
        self.refresh_status();

        match result {
            Ok(()) => {
                info!("✅ Artwork uploaded");
                self.dialogs.alert("Artwork uploaded!");
            }
            Err(e) => {
                error!("Upload failed: {}", e);
                self.dialogs.alert("Upload failed.");
            }
        }
        refetch
    }

    /// Ask before deleting. Nothing is sent unless this returns true.
    fn confirm_delete(&self, id: &ArtworkId) -> bool {
        if !self.is_owner() {
            return false;
        }

        let confirmed = self.dialogs.confirm(DELETE_PROMPT);
        if !confirmed {
            debug!("Delete of artwork {} cancelled", id);
        }
        confirmed
    }

    fn delete_finished(&mut self, id: &ArtworkId, result: Result<(), GalleryError>) {
        if self.portfolio.apply_delete(id, &result) {
            info!("🗑️  Deleted artwork {}", id);
            self.previews.remove(id);
        }

        match result {
            Ok(()) => {}
            Err(GalleryError::Rejected) => {
                warn!("Server refused to delete artwork {}", id);
                self.dialogs.alert("Failed to delete artwork.");
            }
            Err(e) => {
                error!("Delete of artwork {} failed: {}", id, e);
                self.dialogs.alert("Delete failed.");
            }
        }
        self.refresh_status();
    }

    fn refresh_status(&mut self) {
        self.status = if self.draft.uploading {
            "Uploading...".to_string()
        } else if self.portfolio.is_empty() {
            "The gallery is empty.".to_string()
        } else {
            match self.portfolio.count() {
                1 => "1 artwork in gallery.".to_string(),
                n => format!("{} artworks in gallery.", n),
            }
        };
    }

    /// Decide what the window shows
    pub fn plan(&self) -> ViewPlan {
        let owner = self.is_owner();
        let config = self.api.config();

        ViewPlan {
            owner_notice: !owner,
            upload_form: owner,
            cards: self
                .portfolio
                .artworks()
                .iter()
                .map(|art| CardModel {
                    id: art.id.clone(),
                    title: art.title.clone(),
                    description: art.description().to_string(),
                    image_url: config.resolve_image_url(&art.url),
                    deletable: owner,
                })
                .collect(),
        }
    }

    /// Build the user interface
    pub fn view(&self) -> Element<Message> {
        let plan = self.plan();
        let config = self.api.config();

        let mut content = column![ui::header(&config.heading, &config.tagline)]
            .spacing(24)
            .padding(40)
            .align_x(Alignment::Center);

        if plan.owner_notice {
            content = content.push(ui::owner_notice());
        }
        if plan.upload_form {
            content = content.push(ui::upload_form::upload_form(&self.draft));
        }

        content = content
            .push(text(&self.status).size(14))
            .push(ui::cards::gallery_grid(plan.cards, &self.previews));

        container(scrollable(content).width(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    pub fn title(&self) -> String {
        self.api.config().heading.clone()
    }

    /// Set the application theme
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalleryConfig;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Records every dialog instead of showing it
    #[derive(Clone, Default)]
    struct FakeDialogs {
        answer: bool,
        picked: Option<PathBuf>,
        alerts: Arc<Mutex<Vec<String>>>,
        confirms: Arc<AtomicUsize>,
    }

    impl Dialogs for FakeDialogs {
        fn alert(&self, message: &str) {
            self.alerts.lock().unwrap().push(message.to_string());
        }

        fn confirm(&self, _message: &str) -> bool {
            self.confirms.fetch_add(1, Ordering::SeqCst);
            self.answer
        }

        fn pick_image(&self) -> Option<PathBuf> {
            self.picked.clone()
        }
    }

    fn gallery(owner: bool, dialogs: &FakeDialogs) -> PixelGallery {
        let token = owner.then(|| "secret".to_string());
        let config = GalleryConfig::new("http://localhost:9", owner, token).unwrap();
        let api = ApiClient::new(config).unwrap();
        let (gallery, _) = PixelGallery::new(api, Box::new(dialogs.clone()));
        gallery
    }

    fn art(id: i64, title: &str) -> Artwork {
        Artwork {
            id: ArtworkId::Number(id),
            title: title.to_string(),
            description: Some(String::new()),
            url: format!("/{}.png", id),
        }
    }

    fn fill_draft(gallery: &mut PixelGallery) {
        let _ = gallery.update(Message::TitleChanged("Cat".to_string()));
        let _ = gallery.update(Message::DescriptionChanged("a cat".to_string()));
        let _ = gallery.update(Message::PickImage);
    }

    fn owner_dialogs() -> FakeDialogs {
        FakeDialogs {
            answer: true,
            picked: Some(PathBuf::from("/tmp/cat.png")),
            ..Default::default()
        }
    }

    #[test]
    fn test_scenario_single_card() {
        let dialogs = FakeDialogs::default();
        let mut gallery = gallery(false, &dialogs);

        let cat = Artwork {
            id: ArtworkId::Number(1),
            title: "Cat".to_string(),
            description: Some(String::new()),
            url: "/a.png".to_string(),
        };
        let _ = gallery.update(Message::ArtworksFetched(Ok(vec![cat])));

        let plan = gallery.plan();
        assert_eq!(plan.cards.len(), 1);
        assert_eq!(plan.cards[0].title, "Cat");
        assert_eq!(plan.cards[0].image_url, "http://localhost:9/a.png");
    }

    #[test]
    fn test_visitor_sees_no_controls() {
        let dialogs = FakeDialogs::default();
        let mut gallery = gallery(false, &dialogs);
        let _ = gallery.update(Message::ArtworksFetched(Ok(vec![art(1, "Cat"), art(2, "Dog")])));

        let plan = gallery.plan();
        assert!(plan.owner_notice);
        assert!(!plan.upload_form);
        assert!(plan.cards.iter().all(|card| !card.deletable));
    }

    #[test]
    fn test_owner_sees_controls() {
        let dialogs = owner_dialogs();
        let mut gallery = gallery(true, &dialogs);
        let _ = gallery.update(Message::ArtworksFetched(Ok(vec![art(1, "Cat"), art(2, "Dog")])));

        let plan = gallery.plan();
        assert!(!plan.owner_notice);
        assert!(plan.upload_form);
        assert_eq!(plan.cards.len(), 2);
        assert!(plan.cards.iter().all(|card| card.deletable));
    }

    #[test]
    fn test_failed_fetch_empties_gallery_silently() {
        let dialogs = FakeDialogs::default();
        let mut gallery = gallery(false, &dialogs);
        let _ = gallery.update(Message::ArtworksFetched(Ok(vec![art(1, "Cat")])));
        let _ = gallery.update(Message::ArtworksFetched(Err(GalleryError::Transport("down".into()))));

        assert!(gallery.plan().cards.is_empty());
        assert!(dialogs.alerts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_submit_without_image_sends_nothing() {
        let dialogs = FakeDialogs { picked: None, ..owner_dialogs() };
        let mut gallery = gallery(true, &dialogs);
        fill_draft(&mut gallery);

        assert!(gallery.submit().is_none());
        assert!(!gallery.draft.uploading);
        assert_eq!(dialogs.alerts.lock().unwrap().as_slice(), ["Please select an image!"]);
    }

    #[test]
    fn test_successful_upload_resets_and_refetches_once() {
        let dialogs = owner_dialogs();
        let mut gallery = gallery(true, &dialogs);
        fill_draft(&mut gallery);

        let request = gallery.submit().unwrap();
        assert_eq!(request.title, "Cat");
        assert!(gallery.draft.uploading);

        let refetch = gallery.update(Message::UploadFinished(Ok(())));
        assert_eq!(refetch.units(), 1);
        assert_eq!(gallery.draft, FormDraft::new());
        assert_eq!(dialogs.alerts.lock().unwrap().as_slice(), ["Artwork uploaded!"]);
    }

    #[test]
    fn test_failed_upload_does_not_refetch() {
        let dialogs = owner_dialogs();
        let mut gallery = gallery(true, &dialogs);
        fill_draft(&mut gallery);
        gallery.submit().unwrap();

        let next = gallery.update(Message::UploadFinished(Err(GalleryError::Transport("reset".into()))));
        assert_eq!(next.units(), 0);
        assert!(!gallery.draft.uploading);
    }

    #[test]
    fn test_upload_with_unreadable_response_keeps_draft() {
        let dialogs = owner_dialogs();
        let mut gallery = gallery(true, &dialogs);
        fill_draft(&mut gallery);
        let before = gallery.draft.clone();
        gallery.submit().unwrap();

        let next = gallery.update(Message::UploadFinished(Err(GalleryError::Decode("expected value".into()))));

        assert_eq!(next.units(), 0);
        assert!(!gallery.draft.uploading);
        assert_eq!(gallery.draft, before);
        assert_eq!(dialogs.alerts.lock().unwrap().as_slice(), ["Upload failed."]);
    }

    #[test]
    fn test_upload_server_error_keeps_draft() {
        let dialogs = owner_dialogs();
        let mut gallery = gallery(true, &dialogs);
        fill_draft(&mut gallery);
        let before = gallery.draft.clone();

        gallery.submit().unwrap();
        let refetch = gallery.upload_finished(Err(GalleryError::Status {
            status: 500,
            body: "boom".to_string(),
        }));

        assert!(!refetch);
        assert!(!gallery.draft.uploading);
        assert_eq!(gallery.draft, before);
        assert_eq!(dialogs.alerts.lock().unwrap().as_slice(), ["Upload failed."]);
    }

    #[test]
    fn test_visitor_cannot_submit() {
        let dialogs = owner_dialogs();
        let mut gallery = gallery(false, &dialogs);
        fill_draft(&mut gallery);

        assert!(gallery.submit().is_none());
        assert!(!gallery.draft.uploading);
    }

    #[test]
    fn test_declined_delete_sends_nothing() {
        let dialogs = FakeDialogs { answer: false, ..owner_dialogs() };
        let mut gallery = gallery(true, &dialogs);
        let _ = gallery.update(Message::ArtworksFetched(Ok(vec![art(1, "Cat")])));

        assert!(!gallery.confirm_delete(&ArtworkId::Number(1)));
        let _ = gallery.update(Message::Delete(ArtworkId::Number(1)));

        assert_eq!(dialogs.confirms.load(Ordering::SeqCst), 2);
        assert_eq!(gallery.portfolio.count(), 1);
    }

    #[test]
    fn test_confirmed_delete_removes_only_match() {
        let dialogs = owner_dialogs();
        let mut gallery = gallery(true, &dialogs);
        let _ = gallery.update(Message::ArtworksFetched(Ok(vec![art(1, "Cat"), art(2, "Dog")])));

        assert!(gallery.confirm_delete(&ArtworkId::Number(1)));
        let _ = gallery.update(Message::DeleteFinished(ArtworkId::Number(1), Ok(())));

        let ids: Vec<_> = gallery.plan().cards.into_iter().map(|card| card.id).collect();
        assert_eq!(ids, vec![ArtworkId::Number(2)]);
        assert!(dialogs.alerts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_rejected_delete_keeps_item() {
        let dialogs = owner_dialogs();
        let mut gallery = gallery(true, &dialogs);
        let _ = gallery.update(Message::ArtworksFetched(Ok(vec![art(1, "Cat")])));

        let _ = gallery.update(Message::DeleteFinished(ArtworkId::Number(1), Err(GalleryError::Rejected)));

        assert!(gallery.portfolio.get(&ArtworkId::Number(1)).is_some());
        assert_eq!(dialogs.alerts.lock().unwrap().as_slice(), ["Failed to delete artwork."]);
    }

    #[test]
    fn test_delete_transport_error_notifies() {
        let dialogs = owner_dialogs();
        let mut gallery = gallery(true, &dialogs);
        let _ = gallery.update(Message::ArtworksFetched(Ok(vec![art(1, "Cat")])));

        let _ = gallery.update(Message::DeleteFinished(
            ArtworkId::Number(1),
            Err(GalleryError::Transport("reset".into())),
        ));

        assert_eq!(gallery.portfolio.count(), 1);
        assert_eq!(dialogs.alerts.lock().unwrap().as_slice(), ["Delete failed."]);
    }

    #[test]
    fn test_preview_for_removed_artwork_is_dropped() {
        let dialogs = FakeDialogs::default();
        let mut gallery = gallery(false, &dialogs);
        let _ = gallery.update(Message::ArtworksFetched(Ok(vec![art(1, "Cat")])));

        let _ = gallery.update(Message::PreviewLoaded(ArtworkId::Number(1), Ok(vec![1, 2, 3])));
        let _ = gallery.update(Message::PreviewLoaded(ArtworkId::Number(9), Ok(vec![1, 2, 3])));
        assert_eq!(gallery.previews.len(), 1);

        let _ = gallery.update(Message::ArtworksFetched(Ok(vec![art(2, "Dog")])));
        assert!(gallery.previews.is_empty());
    }

    #[test]
    fn test_failed_preview_marks_card_unavailable() {
        let dialogs = FakeDialogs::default();
        let mut gallery = gallery(false, &dialogs);
        let _ = gallery.update(Message::ArtworksFetched(Ok(vec![art(1, "Cat"), art(2, "Dog")])));

        let _ = gallery.update(Message::PreviewLoaded(
            ArtworkId::Number(1),
            Err(GalleryError::Status { status: 404, body: String::new() }),
        ));
        let _ = gallery.update(Message::PreviewLoaded(
            ArtworkId::Number(9),
            Err(GalleryError::Transport("down".into())),
        ));

        assert!(matches!(gallery.previews.get(&ArtworkId::Number(1)), Some(Preview::Unavailable)));
        assert!(gallery.previews.get(&ArtworkId::Number(2)).is_none());
        assert_eq!(gallery.previews.len(), 1);
    }

    #[test]
    fn test_status_singular_for_one_artwork() {
        let dialogs = FakeDialogs::default();
        let mut gallery = gallery(false, &dialogs);
        let _ = gallery.update(Message::ArtworksFetched(Ok(vec![art(1, "Cat")])));
        assert_eq!(gallery.status, "1 artwork in gallery.");
    }

    #[test]
    fn test_status_counts_artworks() {
        let dialogs = FakeDialogs::default();
        let mut gallery = gallery(false, &dialogs);
        let _ = gallery.update(Message::ArtworksFetched(Ok(vec![art(1, "Cat"), art(2, "Dog")])));
        assert_eq!(gallery.status, "2 artworks in gallery.");
    }
}
