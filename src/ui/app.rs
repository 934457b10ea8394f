/// Gallery viewer application
///
/// One page at a time, like a browser tab: every navigation throws the
/// current page away and builds a new one from its URL.
use iced::widget::image::Handle;
use iced::widget::{
    button, center, column, container, image, mouse_area, opaque, row, scrollable, stack, text,
    text_input, Column, Row, Space,
};
use iced::{window, Alignment, Color, ContentFit, Element, Length, Size, Subscription, Task, Theme};
use reqwest::Url;
use rfd::FileDialog;

use super::thumbnail::{load_thumbnail, Thumbnail};
use crate::gallery::fetch::{fetch_api_tags, fetch_bytes, fetch_images_or_empty, Source};
use crate::gallery::filter::filter_by_tag;
use crate::gallery::location::{gallery_url, home_url, site_url, View};
use crate::gallery::search::{SearchBox, Suggestions};
use crate::gallery::{GridViewport, LazyLoader, RenderState};
use crate::manifest::{tag_set, ImageRecord};

const CELL_IMAGE_HEIGHT: f32 = 200.0;
const CELL_HEIGHT: f32 = 240.0;
const GRID_SPACING: f32 = 12.0;
const GRID_PADDING: f32 = 16.0;
/// Window height assumed until the window reports its size
const INITIAL_HEIGHT: f32 = 768.0;
const PAGE_PADDING: f32 = 20.0;
const PAGE_SPACING: f32 = 16.0;
/// Header heights above the scrollable grid
const HOME_HEADER_HEIGHT: f32 = 100.0;
const TAG_HEADER_HEIGHT: f32 = 125.0;

/// What the page body shows
#[derive(Debug, Clone)]
enum Body {
    /// No site chosen yet
    Picker,
    Loading,
    /// An empty-state message instead of a grid
    Notice(String),
    Grid(RenderState),
}

/// Image state of one grid cell
#[derive(Debug, Clone)]
enum Cell {
    Placeholder,
    Loading,
    Ready(Handle),
    Failed,
}

/// The single full-size preview overlay, shown and hidden in place
#[derive(Debug, Clone, Default)]
struct Preview {
    visible: bool,
    image: Option<Handle>,
    /// Bumped on every open so late results for an older image are dropped
    request: u64,
}

/// Main application state
pub struct Gallery {
    location: Option<Url>,
    source: Source,
    view: View,
    /// Bumped on every navigation; results tagged with an older value are ignored
    generation: u64,
    body: Body,
    search: SearchBox,
    lazy: LazyLoader,
    cells: Vec<Cell>,
    preview: Preview,
    viewport: GridViewport,
    window_height: f32,
    /// 1x1 transparent image shown until a cell scrolls into view
    placeholder: Handle,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked "Open Site"
    PickSite,
    /// Full navigation to another page
    Navigate(Url),
    Loaded {
        generation: u64,
        images: Vec<ImageRecord>,
    },
    /// Tag list from the live server (API source only)
    TagsLoaded {
        generation: u64,
        result: Result<Vec<String>, String>,
    },
    LoadMore,
    Scrolled(scrollable::Viewport),
    WindowResized(Size),
    ThumbnailLoaded {
        generation: u64,
        cell: usize,
        result: Result<Thumbnail, String>,
    },
    OpenPreview(usize),
    PreviewLoaded {
        request: u64,
        result: Result<Vec<u8>, String>,
    },
    ClosePreview,
    SearchChanged(String),
    SearchSubmitted,
    SuggestionPicked(String),
    /// A click inside the search control
    SearchPressed,
    /// A click anywhere else on the page
    DismissSuggestions,
}

impl Gallery {
    fn blank(source: Source, columns: usize, generation: u64, window_height: f32) -> Self {
        let mut page = Self {
            location: None,
            source,
            view: View::Home,
            generation,
            body: Body::Picker,
            search: SearchBox::default(),
            lazy: LazyLoader::new(),
            cells: Vec::new(),
            preview: Preview::default(),
            viewport: GridViewport::new(columns, CELL_HEIGHT, GRID_SPACING, GRID_PADDING, 0.0),
            window_height,
            placeholder: Handle::from_rgba(1, 1, vec![0u8; 4]),
        };
        page.fit_viewport();
        page
    }

    /// Height left for the grid once the page padding and header are taken out
    fn grid_height(&self) -> f32 {
        let header = match self.view {
            View::Home => HOME_HEADER_HEIGHT,
            View::Tag(_) => TAG_HEADER_HEIGHT,
        };
        (self.window_height - 2.0 * PAGE_PADDING - PAGE_SPACING - header).max(0.0)
    }

    fn fit_viewport(&mut self) {
        self.viewport.height = self.grid_height();
    }

    /// Create a new instance of the application
    pub fn new(start: Option<Url>, source: Source, columns: usize) -> (Self, Task<Message>) {
        let gallery = Self::blank(source, columns, 0, INITIAL_HEIGHT);
        match start {
            Some(url) => gallery.navigate(url),
            None => (gallery, Task::none()),
        }
    }

    /// A fresh page for `url`; only the window geometry carries over
    fn navigate(&self, url: Url) -> (Self, Task<Message>) {
        let mut page = Self::blank(
            self.source,
            self.viewport.columns,
            self.generation + 1,
            self.window_height,
        );
        page.view = View::from_url(&url);
        page.fit_viewport();
        page.location = Some(url.clone());
        page.body = Body::Loading;

        tracing::info!("🧭 Navigating to {}", url);

        let generation = page.generation;
        let source = page.source;
        let task = Task::perform(
            async move { fetch_images_or_empty(&url, source).await },
            move |images| Message::Loaded { generation, images },
        );
        (page, task)
    }

    fn go(&mut self, url: Url) -> Task<Message> {
        let (page, task) = self.navigate(url);
        *self = page;
        task
    }

    fn go_to_tag(&mut self, tag: &str) -> Task<Message> {
        match &self.location {
            Some(location) => {
                let url = gallery_url(location, tag);
                self.go(url)
            }
            None => Task::none(),
        }
    }

    fn record(&self, cell: usize) -> Option<&ImageRecord> {
        match &self.body {
            Body::Grid(state) => state.get(cell),
            _ => None,
        }
    }

    /// Handle application messages and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickSite => {
                // Show the native folder picker dialog
                let Some(folder) = FileDialog::new()
                    .set_title("Select Gallery Site Folder")
                    .pick_folder()
                else {
                    return Task::none();
                };

                match site_url(&folder) {
                    Ok(url) => self.go(url),
                    Err(e) => {
                        tracing::error!("❌ Cannot open {}: {}", folder.display(), e);
                        self.body = Body::Notice("Error loading images.".to_string());
                        Task::none()
                    }
                }
            }
            Message::Navigate(url) => self.go(url),
            Message::Loaded { generation, images } => {
                if generation != self.generation {
                    return Task::none();
                }
                self.show(images)
            }
            Message::TagsLoaded { generation, result } => {
                if generation != self.generation {
                    return Task::none();
                }
                match result {
                    Ok(tags) => {
                        // Keep whatever has been typed so far
                        let input = self.search.input().to_string();
                        self.search = SearchBox::new(tags);
                        if !input.is_empty() {
                            self.search.set_input(input);
                        }
                    }
                    Err(e) => tracing::warn!("⚠️  Failed to load tags, using manifest tags: {}", e),
                }
                Task::none()
            }
            Message::LoadMore => {
                self.search.dismiss();
                let Body::Grid(state) = &mut self.body else {
                    return Task::none();
                };
                let added = state.load_more();
                self.cells.extend(added.clone().map(|_| Cell::Placeholder));
                self.lazy.observe_all(added);
                self.reveal()
            }
            Message::Scrolled(viewport) => {
                self.viewport = self
                    .viewport
                    .scrolled(viewport.absolute_offset().y, viewport.bounds().height);
                self.reveal()
            }
            Message::WindowResized(size) => {
                self.window_height = size.height;
                self.fit_viewport();
                self.reveal()
            }
            Message::ThumbnailLoaded {
                generation,
                cell,
                result,
            } => {
                if generation != self.generation {
                    return Task::none();
                }
                if let Some(slot) = self.cells.get_mut(cell) {
                    *slot = match result {
                        Ok(thumbnail) => Cell::Ready(Handle::from_rgba(
                            thumbnail.width,
                            thumbnail.height,
                            thumbnail.pixels,
                        )),
                        Err(e) => {
                            tracing::warn!("⚠️  Failed to load image #{}: {}", cell, e);
                            Cell::Failed
                        }
                    };
                }
                Task::none()
            }
            Message::OpenPreview(cell) => {
                // The image swallows the click before the page sees it
                self.search.dismiss();
                let Some(url) = self.record(cell).and_then(|r| Url::parse(&r.src).ok()) else {
                    return Task::none();
                };

                self.preview.request += 1;
                self.preview.visible = true;
                self.preview.image = None;

                let request = self.preview.request;
                Task::perform(
                    async move { fetch_bytes(&url).await.map_err(|e| e.to_string()) },
                    move |result| Message::PreviewLoaded { request, result },
                )
            }
            Message::PreviewLoaded { request, result } => {
                if request != self.preview.request || !self.preview.visible {
                    return Task::none();
                }
                match result {
                    Ok(bytes) => self.preview.image = Some(Handle::from_bytes(bytes)),
                    Err(e) => {
                        tracing::warn!("⚠️  Failed to load preview: {}", e);
                        self.preview.visible = false;
                    }
                }
                Task::none()
            }
            Message::ClosePreview => {
                self.preview.visible = false;
                Task::none()
            }
            Message::SearchChanged(value) => {
                self.search.set_input(value);
                Task::none()
            }
            Message::SearchSubmitted => match self.search.submit() {
                Some(tag) => self.go_to_tag(&tag),
                None => Task::none(),
            },
            Message::SuggestionPicked(tag) => {
                let tag = self.search.select(&tag);
                self.go_to_tag(&tag)
            }
            Message::SearchPressed => Task::none(),
            Message::DismissSuggestions => {
                self.search.dismiss();
                Task::none()
            }
        }
    }

    /// Turn the fetched manifest into this page's grid (or empty state)
    fn show(&mut self, images: Vec<ImageRecord>) -> Task<Message> {
        let mut tags_task = Task::none();
        let items = match &self.view {
            View::Home => {
                if images.is_empty() {
                    tracing::warn!("No images found for home page");
                    self.body = Body::Notice("No images available.".to_string());
                    return Task::none();
                }
                self.search = SearchBox::new(tag_set(&images));
                if self.source == Source::Api {
                    tags_task = self.fetch_tags();
                }
                images
            }
            View::Tag(tag) => {
                let filtered = filter_by_tag(&images, tag);
                tracing::debug!("Filtered {} images for tag \"{}\"", filtered.len(), tag);
                if filtered.is_empty() {
                    tracing::warn!("No images found for tag \"{}\"", tag);
                    self.body = Body::Notice(format!("No images found for tag \"{}\".", tag));
                    return Task::none();
                }
                filtered
            }
        };

        let state = RenderState::first_page(items);
        self.cells = vec![Cell::Placeholder; state.rendered_count()];
        self.lazy = LazyLoader::new();
        self.lazy.observe_all(0..state.rendered_count());
        self.body = Body::Grid(state);
        Task::batch([tags_task, self.reveal()])
    }

    fn fetch_tags(&self) -> Task<Message> {
        let Some(url) = self.location.clone() else {
            return Task::none();
        };
        let generation = self.generation;
        Task::perform(
            async move { fetch_api_tags(&url).await.map_err(|e| e.to_string()) },
            move |result| Message::TagsLoaded { generation, result },
        )
    }

    /// Start loading every observed cell that is now on screen
    fn reveal(&mut self) -> Task<Message> {
        let Body::Grid(state) = &self.body else {
            return Task::none();
        };

        let generation = self.generation;
        let mut tasks = Vec::new();
        for cell in self.lazy.take_visible(&self.viewport) {
            let url = state.get(cell).and_then(|record| Url::parse(&record.src).ok());
            let Some(slot) = self.cells.get_mut(cell) else {
                continue;
            };

            match url {
                Some(url) => {
                    *slot = Cell::Loading;
                    tasks.push(Task::perform(load_thumbnail(url), move |result| {
                        Message::ThumbnailLoaded {
                            generation,
                            cell,
                            result,
                        }
                    }));
                }
                None => *slot = Cell::Failed,
            }
        }

        Task::batch(tasks)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        window::resize_events().map(|(_id, size)| Message::WindowResized(size))
    }

    pub fn title(&self) -> String {
        match &self.view {
            View::Home => "Gallery".to_string(),
            View::Tag(tag) => format!("{} - Gallery", tag),
        }
    }

    /// Set the application theme
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Build the user interface
    pub fn view(&self) -> Element<'_, Message> {
        let page = column![self.header(), self.body()]
            .spacing(PAGE_SPACING)
            .padding(PAGE_PADDING)
            .width(Length::Fill)
            .height(Length::Fill);

        let base = mouse_area(page).on_press(Message::DismissSuggestions);

        if self.preview.visible {
            stack![base, self.overlay()].into()
        } else {
            base.into()
        }
    }

    fn header(&self) -> Element<'_, Message> {
        match &self.view {
            View::Home => column![text("Gallery").size(40), self.search_box()]
                .spacing(8)
                .into(),
            View::Tag(tag) => {
                let back = self
                    .location
                    .as_ref()
                    .map(|location| Message::Navigate(home_url(location)));

                column![
                    button(text("← Back")).on_press_maybe(back).padding(8),
                    text(tag.as_str()).size(40),
                    text(format!("A collection of {} inspired images.", tag)).size(16),
                ]
                .spacing(8)
                .into()
            }
        }
    }

    fn search_box(&self) -> Element<'_, Message> {
        let input = text_input("Search tags...", self.search.input())
            .on_input(Message::SearchChanged)
            .on_submit(Message::SearchSubmitted)
            .padding(10)
            .width(Length::Fixed(360.0));

        let suggestions: Element<'_, Message> = match self.search.suggestions() {
            Suggestions::Hidden => Space::with_height(Length::Fixed(0.0)).into(),
            Suggestions::Tags(tags) => Column::with_children(tags.iter().map(|tag| {
                Element::from(
                    button(text(tag.as_str()))
                        .on_press(Message::SuggestionPicked(tag.clone()))
                        .width(Length::Fill)
                        .style(button::text),
                )
            }))
            .width(Length::Fixed(360.0))
            .into(),
            Suggestions::Notice(notice) => container(text(*notice)).padding(8).into(),
        };

        mouse_area(column![input, suggestions].spacing(4))
            .on_press(Message::SearchPressed)
            .into()
    }

    fn body(&self) -> Element<'_, Message> {
        match &self.body {
            Body::Picker => center(
                column![
                    text("No site selected."),
                    button(text("Open Site"))
                        .on_press(Message::PickSite)
                        .padding(10),
                ]
                .spacing(20)
                .align_x(Alignment::Center),
            )
            .into(),
            Body::Loading => center(text("Loading...")).into(),
            Body::Notice(notice) => container(text(notice.as_str()).size(18))
                .padding(20)
                .into(),
            Body::Grid(state) => {
                let mut content = column![self.grid(state)]
                    .spacing(GRID_SPACING)
                    .padding(GRID_PADDING)
                    .width(Length::Fill)
                    .align_x(Alignment::Center);

                if state.show_load_more() {
                    content = content.push(
                        button(text("Load More"))
                            .on_press(Message::LoadMore)
                            .padding(10),
                    );
                }

                scrollable(content)
                    .on_scroll(Message::Scrolled)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .into()
            }
        }
    }

    fn grid<'a>(&'a self, state: &'a RenderState) -> Element<'a, Message> {
        let columns = self.viewport.columns;
        let cells: Vec<(usize, &ImageRecord)> = state.rendered().iter().enumerate().collect();

        let mut rows: Vec<Element<'a, Message>> = Vec::new();
        for chunk in cells.chunks(columns) {
            let mut line = Row::new().spacing(GRID_SPACING);
            for (index, record) in chunk {
                line = line.push(self.cell(*index, *record));
            }
            // Keep cell widths equal on a short last row
            for _ in chunk.len()..columns {
                line = line.push(Space::new(
                    Length::FillPortion(1),
                    Length::Fixed(CELL_HEIGHT),
                ));
            }
            rows.push(line.into());
        }

        Column::with_children(rows).spacing(GRID_SPACING).into()
    }

    fn cell<'a>(&'a self, index: usize, record: &'a ImageRecord) -> Element<'a, Message> {
        let handle = match self.cells.get(index) {
            Some(Cell::Ready(handle)) => handle.clone(),
            _ => self.placeholder.clone(),
        };

        let picture = mouse_area(
            image(handle)
                .width(Length::Fill)
                .height(Length::Fixed(CELL_IMAGE_HEIGHT))
                .content_fit(ContentFit::Cover),
        )
        .on_press(Message::OpenPreview(index));

        let tag_link = self
            .location
            .as_ref()
            .map(|location| Message::Navigate(gallery_url(location, &record.tag)));

        let info = row![
            text(record.description.as_str())
                .size(14)
                .width(Length::Fill),
            button(text(record.tag.as_str()).size(14))
                .on_press_maybe(tag_link)
                .style(button::secondary)
                .padding([2, 8]),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        container(column![picture, info].spacing(8))
            .width(Length::FillPortion(1))
            .height(Length::Fixed(CELL_HEIGHT))
            .into()
    }

    fn overlay(&self) -> Element<'_, Message> {
        let picture: Element<'_, Message> = match &self.preview.image {
            Some(handle) => image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Contain)
                .into(),
            None => text("Loading...").into(),
        };

        let content = column![
            row![
                Space::with_width(Length::Fill),
                button(text("×").size(24))
                    .on_press(Message::ClosePreview)
                    .style(button::text),
            ],
            center(picture),
        ]
        .padding(20);

        opaque(
            container(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme: &Theme| container::Style {
                    background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.85).into()),
                    ..container::Style::default()
                }),
        )
    }
}

/// Launch the viewer, optionally at a starting page
pub fn run(start: Option<Url>, source: Source, columns: usize) -> iced::Result {
    iced::application(Gallery::title, Gallery::update, Gallery::view)
        .subscription(Gallery::subscription)
        .theme(Gallery::theme)
        .centered()
        .run_with(move || Gallery::new(start, source, columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(url: &str) -> Gallery {
        let (gallery, _) = Gallery::new(Some(Url::parse(url).unwrap()), Source::Manifest, 4);
        gallery
    }

    fn images(tag: &str, n: usize) -> Vec<ImageRecord> {
        (0..n)
            .map(|i| ImageRecord::new(format!("http://h/gallery/{tag}/{i}.jpg"), tag))
            .collect()
    }

    fn load(gallery: &mut Gallery, images: Vec<ImageRecord>) {
        let generation = gallery.generation;
        let _ = gallery.update(Message::Loaded { generation, images });
    }

    fn rendered(gallery: &Gallery) -> usize {
        match &gallery.body {
            Body::Grid(state) => state.rendered_count(),
            _ => 0,
        }
    }

    fn notice(gallery: &Gallery) -> Option<&str> {
        match &gallery.body {
            Body::Notice(notice) => Some(notice.as_str()),
            _ => None,
        }
    }

    #[test]
    fn test_without_site_shows_picker() {
        let (gallery, _) = Gallery::new(None, Source::Manifest, 4);
        assert!(matches!(gallery.body, Body::Picker));
    }

    #[test]
    fn test_home_renders_first_page_and_loads_more() {
        let mut gallery = at("http://h/index.html");
        assert!(matches!(gallery.body, Body::Loading));

        load(&mut gallery, images("cats", 45));
        assert_eq!(rendered(&gallery), 20);
        assert_eq!(gallery.cells.len(), 20);
        assert!(gallery.search.is_enabled());

        let _ = gallery.update(Message::LoadMore);
        assert_eq!(rendered(&gallery), 40);
        assert_eq!(gallery.cells.len(), 40);

        let _ = gallery.update(Message::LoadMore);
        assert_eq!(rendered(&gallery), 45);
        let Body::Grid(state) = &gallery.body else {
            panic!("expected grid");
        };
        assert!(!state.show_load_more());
    }

    #[test]
    fn test_only_visible_cells_start_loading() {
        let mut gallery = at("http://h/index.html");
        load(&mut gallery, images("cats", 20));

        // 768px window less 156px of header: 612px grid, 252px rows after
        // 16px padding, so three rows of four
        let loading = gallery
            .cells
            .iter()
            .filter(|cell| matches!(cell, Cell::Loading))
            .count();
        assert_eq!(loading, 12);
        assert_eq!(gallery.lazy.pending(), 8);

        let _ = gallery.update(Message::WindowResized(Size::new(1024.0, 2000.0)));
        assert_eq!(gallery.lazy.pending(), 0);
    }

    #[test]
    fn test_header_is_not_part_of_the_grid_viewport() {
        let mut gallery = at("http://h/index.html");
        let _ = gallery.update(Message::WindowResized(Size::new(1024.0, 540.0)));
        assert_eq!(gallery.viewport.height, 384.0);

        // The third row starts at 520px, below the fold once the header is counted
        load(&mut gallery, images("cats", 20));
        assert_eq!(gallery.lazy.pending(), 12);

        let mut tagged = at("http://h/gallery.html?tag=cats");
        let _ = tagged.update(Message::WindowResized(Size::new(1024.0, 540.0)));
        assert_eq!(tagged.viewport.height, 359.0);
    }

    #[test]
    fn test_stale_results_are_ignored() {
        let mut gallery = at("http://h/index.html");
        let stale = gallery.generation;
        let _ = gallery.update(Message::Navigate(Url::parse("http://h/gallery.html?tag=cats").unwrap()));

        let _ = gallery.update(Message::Loaded {
            generation: stale,
            images: images("cats", 3),
        });
        assert!(matches!(gallery.body, Body::Loading));
    }

    #[test]
    fn test_tag_view_filters_case_insensitively() {
        let mut gallery = at("http://h/gallery.html?tag=Cats");
        let mut manifest = images("cats", 3);
        manifest.extend(images("dogs", 5));

        load(&mut gallery, manifest);
        assert_eq!(rendered(&gallery), 3);
        assert_eq!(gallery.title(), "Cats - Gallery");
    }

    #[test]
    fn test_empty_states() {
        let mut gallery = at("http://h/gallery.html?tag=birds");
        load(&mut gallery, images("cats", 3));
        assert_eq!(notice(&gallery), Some("No images found for tag \"birds\"."));

        let mut gallery = at("http://h/index.html");
        load(&mut gallery, Vec::new());
        assert_eq!(notice(&gallery), Some("No images available."));
    }

    #[test]
    fn test_picking_a_suggestion_navigates_to_the_tag() {
        let mut gallery = at("http://h/site/index.html");
        let mut manifest = images("cats", 2);
        manifest.extend(images("bobcats", 2));
        load(&mut gallery, manifest);

        let _ = gallery.update(Message::SearchChanged("cat".to_string()));
        assert_eq!(
            gallery.search.suggestions(),
            &Suggestions::Tags(vec!["cats".to_string(), "bobcats".to_string()])
        );

        let _ = gallery.update(Message::SuggestionPicked("bobcats".to_string()));
        assert_eq!(gallery.view, View::Tag("bobcats".to_string()));
        assert_eq!(
            gallery.location.as_ref().map(|u| u.path().to_string()),
            Some("/site/gallery.html".to_string())
        );
        assert!(matches!(gallery.body, Body::Loading));
    }

    #[test]
    fn test_enter_on_unknown_tag_stays_put() {
        let mut gallery = at("http://h/index.html");
        load(&mut gallery, images("cats", 2));

        let _ = gallery.update(Message::SearchChanged("dogs".to_string()));
        let _ = gallery.update(Message::SearchSubmitted);
        assert_eq!(gallery.view, View::Home);
        assert_eq!(
            gallery.search.suggestions(),
            &Suggestions::Notice(crate::gallery::search::TAG_NOT_FOUND)
        );

        let _ = gallery.update(Message::DismissSuggestions);
        assert_eq!(gallery.search.input(), "dogs");
        assert_eq!(gallery.search.suggestions(), &Suggestions::Hidden);
    }

    #[test]
    fn test_clicks_in_the_grid_hide_suggestions() {
        let mut gallery = at("http://h/index.html");
        load(&mut gallery, images("cats", 25));

        let _ = gallery.update(Message::SearchChanged("ca".to_string()));
        assert_eq!(
            gallery.search.suggestions(),
            &Suggestions::Tags(vec!["cats".to_string()])
        );
        let _ = gallery.update(Message::OpenPreview(0));
        assert_eq!(gallery.search.suggestions(), &Suggestions::Hidden);
        assert_eq!(gallery.search.input(), "ca");

        let _ = gallery.update(Message::ClosePreview);
        let _ = gallery.update(Message::SearchChanged("cat".to_string()));
        let _ = gallery.update(Message::LoadMore);
        assert_eq!(gallery.search.suggestions(), &Suggestions::Hidden);
        assert_eq!(gallery.search.input(), "cat");
    }

    #[test]
    fn test_live_tags_replace_manifest_tags() {
        let (mut gallery, _) = Gallery::new(
            Some(Url::parse("http://h/index.html").unwrap()),
            Source::Api,
            4,
        );
        load(&mut gallery, images("cats", 2));
        let _ = gallery.update(Message::SearchChanged("bird".to_string()));
        assert_eq!(
            gallery.search.suggestions(),
            &Suggestions::Notice(crate::gallery::search::NO_TAGS_FOUND)
        );

        let generation = gallery.generation;
        let _ = gallery.update(Message::TagsLoaded {
            generation,
            result: Ok(vec!["cats".to_string(), "birds".to_string()]),
        });
        assert_eq!(gallery.search.input(), "bird");
        assert_eq!(
            gallery.search.suggestions(),
            &Suggestions::Tags(vec!["birds".to_string()])
        );
    }

    #[test]
    fn test_preview_overlay_is_reused() {
        let mut gallery = at("http://h/index.html");
        load(&mut gallery, images("cats", 2));

        let _ = gallery.update(Message::OpenPreview(0));
        assert!(gallery.preview.visible);
        let first = gallery.preview.request;

        let _ = gallery.update(Message::OpenPreview(1));
        assert_eq!(gallery.preview.request, first + 1);

        // The response for the first image arrives late and is dropped
        let _ = gallery.update(Message::PreviewLoaded {
            request: first,
            result: Ok(vec![1, 2, 3]),
        });
        assert!(gallery.preview.image.is_none());

        let _ = gallery.update(Message::ClosePreview);
        assert!(!gallery.preview.visible);
    }
}
