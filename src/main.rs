use iced::widget::{button, canvas, column, container, row, scrollable, text, Column, Row};
use iced::{Alignment, Element, Length, Size, Task, Theme};
use iced_aw::Wrap;
use rfd::FileDialog;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod contact;
mod error;
mod state;
mod ui;

use config::{AppConfig, CATALOG_FILE};
use error::LoadError;
use state::catalog::{self, CatalogStore, LoadedCatalog};
use state::filter::{Availability, Criteria};
use state::viewer::PlanViewer;
use ui::filters::{LevelChoice, RoomChoice};
use ui::plan::{PlanCanvas, PlanImage, PlanImageState, PointerEvent};

const GRID_SPACING: f32 = 14.0;

/// Main application state
struct CatalogApp {
    config: AppConfig,
    /// The unit catalog, loaded once at start-up
    store: CatalogStore,
    criteria: Criteria,
    viewer: PlanViewer,
    plan: PlanImageState,
    /// Header logo found next to the loaded catalog
    logo: Option<PathBuf>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Background catalog load finished
    CatalogLoaded(Result<LoadedCatalog, LoadError>),
    /// User asked to load a different catalog file
    ReloadCatalog,

    SearchChanged(String),
    LevelSelected(LevelChoice),
    TabSelected(Option<i64>),
    RoomsSelected(RoomChoice),
    AreaMinChanged(String),
    AreaMaxChanged(String),
    AvailabilitySelected(Availability),
    ClearFilters,

    OpenPlan(String),
    ClosePlan,
    ZoomIn,
    ZoomOut,
    Pointer(PointerEvent),
    /// Background plan-image load finished for the given source
    PlanLoaded(PathBuf, Result<PlanImage, String>),

    /// "Quiero este" on an available unit
    Contact(String),
}

impl CatalogApp {
    /// Create the application and start loading the catalog
    fn new() -> (Self, Task<Message>) {
        let config = AppConfig::load();
        let candidates = config.catalog_candidates();

        info!("🏢 Unit catalog starting, {} candidate locations", candidates.len());

        (
            CatalogApp {
                config,
                store: CatalogStore::new(),
                criteria: Criteria::default(),
                viewer: PlanViewer::new(),
                plan: PlanImageState::Loading,
                logo: None,
            },
            Task::perform(catalog::load_catalog(candidates), Message::CatalogLoaded),
        )
    }

    fn title(&self) -> String {
        self.config.title.clone()
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CatalogLoaded(result) => {
                // A replaced catalog may no longer contain the open unit
                self.viewer.close();
                self.store.apply(result);
                self.logo = self.config.logo_path(&self.store.asset_root());
                Task::none()
            }
            Message::ReloadCatalog => {
                let file = FileDialog::new()
                    .set_title("Select apartments.json")
                    .add_filter("JSON", &["json"])
                    .pick_file();

                match file {
                    Some(path) => {
                        info!("🔄 Reloading catalog from {}", path.display());
                        Task::perform(catalog::load_catalog(vec![path]), Message::CatalogLoaded)
                    }
                    None => Task::none(),
                }
            }

            Message::SearchChanged(query) => {
                self.criteria.query = query;
                Task::none()
            }
            Message::LevelSelected(LevelChoice(level)) => {
                self.criteria.level_select = level;
                Task::none()
            }
            Message::TabSelected(level) => {
                self.criteria.select_tab(level);
                Task::none()
            }
            Message::RoomsSelected(RoomChoice(rooms)) => {
                self.criteria.rooms = rooms;
                Task::none()
            }
            Message::AreaMinChanged(value) => {
                self.criteria.area_min = value;
                Task::none()
            }
            Message::AreaMaxChanged(value) => {
                self.criteria.area_max = value;
                Task::none()
            }
            Message::AvailabilitySelected(availability) => {
                self.criteria.availability = availability;
                Task::none()
            }
            Message::ClearFilters => {
                self.criteria.clear();
                Task::none()
            }

            Message::OpenPlan(id) => {
                let Some(unit) = self.store.find(&id) else {
                    warn!("⚠️  No unit with id {}", id);
                    return Task::none();
                };

                self.viewer.open(unit, &self.store.asset_root());
                self.plan = PlanImageState::Loading;

                let src = self.viewer.src().to_path_buf();
                Task::perform(ui::plan::load_plan(src.clone()), move |result| {
                    Message::PlanLoaded(src.clone(), result)
                })
            }
            Message::ClosePlan => {
                self.viewer.close();
                Task::none()
            }
            Message::ZoomIn => {
                self.viewer.zoom_in();
                Task::none()
            }
            Message::ZoomOut => {
                self.viewer.zoom_out();
                Task::none()
            }
            Message::Pointer(event) => {
                match event {
                    PointerEvent::Pressed(position) => self.viewer.pointer_down(position),
                    PointerEvent::Moved(position) => self.viewer.pointer_move(position),
                    PointerEvent::Released { over_image } => {
                        self.viewer.pointer_up();
                        if over_image {
                            self.viewer.tap(Instant::now());
                        }
                    }
                    PointerEvent::WheelUp => self.viewer.zoom_in(),
                    PointerEvent::WheelDown => self.viewer.zoom_out(),
                }
                Task::none()
            }
            Message::PlanLoaded(src, result) => {
                // Ignore results for a plan that is no longer on screen
                if self.viewer.is_showing(&src) {
                    self.plan = match result {
                        Ok(image) => PlanImageState::Ready(image),
                        Err(err) => {
                            warn!("⚠️  {}", err);
                            PlanImageState::Failed(err)
                        }
                    };
                }
                Task::none()
            }

            Message::Contact(id) => {
                let url = contact::contact_url(
                    &self.config.contact_phone,
                    &self.config.contact_template,
                    &id,
                );
                contact::open_contact(&url);
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        // Text-only header when no logo file ships with the catalog
        let header = Row::new()
            .push_maybe(
                self.logo
                    .clone()
                    .map(|path| iced::widget::image(path).height(Length::Fixed(40.0))),
            )
            .push(text(&self.config.title).size(28).width(Length::Fill))
            .push(button("Abrir catálogo…").on_press(Message::ReloadCatalog))
            .spacing(12)
            .align_y(Alignment::Center);

        let items = self.store.view(&self.criteria);
        let grid: Element<Message> = if !items.is_empty() {
            Wrap::with_elements(items.into_iter().map(ui::card::unit_card).collect())
                .spacing(GRID_SPACING)
                .line_spacing(GRID_SPACING)
                .into()
        } else if self.store.error().is_none() {
            text("No hay resultados con esos filtros.").into()
        } else {
            Column::new().into()
        };

        let content = Column::new()
            .push(header)
            .push_maybe(self.store.error().map(error_card))
            .push(ui::filters::level_tabs(self.store.levels(), self.criteria.level_tab))
            .push(ui::filters::filter_bar(&self.criteria, self.store.levels()))
            .push(grid)
            .push(text("© Torre Élite · Datos reales. Reemplaza planos/ con tus imágenes.").size(12))
            .spacing(16)
            .padding(24);

        let page = scrollable(content).width(Length::Fill).height(Length::Fill);

        if self.viewer.is_open() {
            ui::modal(page, self.plan_modal())
        } else {
            page.into()
        }
    }

    /// The floor-plan dialog: title, zoom controls and the canvas
    fn plan_modal(&self) -> Element<Message> {
        let head = row![
            text(format!("Plano · {}", self.viewer.unit_id()))
                .size(20)
                .width(Length::Fill),
            button("＋").on_press(Message::ZoomIn),
            button("－").on_press(Message::ZoomOut),
            button("✕").style(button::danger).on_press(Message::ClosePlan),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        let body: Element<Message> = match &self.plan {
            PlanImageState::Loading => text("Cargando plano…").into(),
            PlanImageState::Failed(_) => {
                text(format!("Plano no disponible ({})", self.viewer.src().display())).into()
            }
            PlanImageState::Ready(image) => canvas(PlanCanvas {
                image: image.clone(),
                zoom: self.viewer.zoom(),
                pan: self.viewer.pan(),
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        };

        container(
            column![
                head,
                container(body)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .center_x(Length::Fill)
                    .center_y(Length::Fill)
                    .clip(true),
            ]
            .spacing(12),
        )
        .width(Length::Fixed(880.0))
        .height(Length::Fixed(640.0))
        .padding(16)
        .style(container::rounded_box)
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Shown in place of the catalog when loading failed
fn error_card(message: &str) -> Element<'_, Message> {
    container(
        column![
            text("No se pudieron cargar los datos").size(18),
            text(message).size(14).style(text::danger),
            text(format!(
                "Verifica que el archivo {} exista en la carpeta de datos, en public/ o junto al ejecutable.",
                CATALOG_FILE
            ))
            .size(13),
        ]
        .spacing(6),
    )
    .padding(14)
    .width(Length::Fill)
    .style(container::bordered_box)
    .into()
}

fn main() -> iced::Result {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    iced::application(CatalogApp::title, CatalogApp::update, CatalogApp::view)
        .theme(CatalogApp::theme)
        .window_size(Size::new(1100.0, 800.0))
        .centered()
        .run_with(CatalogApp::new)
}
