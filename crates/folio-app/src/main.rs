//! Main application entry point

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use eframe::egui;
use anyhow::Result;
use parking_lot::Mutex;
use tracing::{info, debug};

use folio_core::{
    events::events::ScrollEnd,
    CarouselConfig, Direction, EventBus, PortfolioConfig, Section, SectionPager, Subscription, ThemeState,
};
use folio_ui::{Carousel, FadeIn};

/// Hero carousel plus the subscription that chains its boundary signals to
/// the section pager. Dropping this unmounts the carousel and detaches the
/// listener.
struct HeroMount {
    carousel: Carousel<String>,
    _on_scroll_end: Subscription,
}

/// Main application state
struct PortfolioApp {
    config: PortfolioConfig,

    /// Bus shared by the carousel, pager and theme
    event_bus: Arc<EventBus>,

    /// Which page section is shown. Also pages on wheel input the carousel
    /// did not consume.
    pager: SectionPager,

    /// Boundary signals waiting to be applied to the pager
    pending_pages: Arc<Mutex<VecDeque<Direction>>>,

    /// Present only while the hero section is on screen
    hero: Option<HeroMount>,

    projects_fade: FadeIn,

    theme: ThemeState,
}

impl PortfolioApp {
    fn new(cc: &eframe::CreationContext<'_>, config: PortfolioConfig) -> Self {
        let event_bus = Arc::new(EventBus::new());

        let theme = ThemeState::new(config.theme).with_event_bus(event_bus.clone());
        folio_ui::apply_theme(&cc.egui_ctx, theme.mode());

        let pager = SectionPager::new()
            .with_wheel_cooldown(Duration::from_millis(config.carousel.wheel_cooldown_ms))
            .with_event_bus(event_bus.clone());

        let mut app = Self {
            config,
            event_bus,
            pager,
            pending_pages: Arc::new(Mutex::new(VecDeque::new())),
            hero: None,
            projects_fade: FadeIn::new(1.0),
            theme,
        };
        app.sync_mounts();
        app
    }

    fn mount_hero(&self) -> HeroMount {
        let mut carousel = Carousel::new(
            "hero_carousel",
            self.config.hero.items.clone(),
            hero_carousel_config(&self.config, self.pager.arrived_from()),
            self.event_bus.clone(),
        );
        if self.pager.arrived_from().is_some() {
            // The fling that paged back here must not also move the carousel
            carousel.hold_input(Instant::now());
        }

        let pending = self.pending_pages.clone();
        let on_scroll_end = self
            .event_bus
            .subscribe_scoped::<ScrollEnd, _>(move |event| pending.lock().push_back(event.direction));

        debug!(
            items = carousel.navigator().len(),
            active = ?carousel.navigator().active_index(),
            "Mounted hero carousel"
        );
        HeroMount {
            carousel,
            _on_scroll_end: on_scroll_end,
        }
    }

    /// Mount or unmount per-section state to match the current section
    fn sync_mounts(&mut self) {
        match self.pager.current() {
            Section::Hero => {
                if self.hero.is_none() {
                    self.hero = Some(self.mount_hero());
                }
            }
            _ => {
                if self.hero.take().is_some() {
                    debug!("Unmounted hero carousel");
                }
            }
        }

        if self.pager.current() != Section::Projects {
            self.projects_fade.reset();
        }
    }

    /// Apply boundary signals received since the last frame
    fn apply_pending_pages(&mut self) {
        let pending: Vec<Direction> = self.pending_pages.lock().drain(..).collect();
        for direction in pending {
            self.pager.chain(direction, Instant::now());
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for section in Section::ALL {
                    let selected = self.pager.current() == section;
                    if ui.selectable_label(selected, section.title()).clicked() {
                        self.pager.show(section, Instant::now());
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    folio_ui::theme_toggle(ui, &mut self.theme);
                });
            });
        });
    }
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_top_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.pager.current() {
            Section::Hero => {
                if let Some(hero) = &mut self.hero {
                    folio_ui::sections::hero(ui, &mut hero.carousel);
                }
            }
            Section::Projects => folio_ui::sections::projects(ui, &mut self.projects_fade),
            Section::Contact => folio_ui::sections::contact(ui, &self.config.contact),
        });

        // Scroll the carousel did not consume pages between sections
        let delta = ctx.input(|i| i.scroll_delta.y);
        if self.pager.current() != Section::Hero {
            self.pager.on_wheel(-delta, Instant::now());
        }

        self.apply_pending_pages();
        self.sync_mounts();
    }
}

/// Carousel settings for a hero mount. Scrolling back up into the hero
/// continues from its last item.
fn hero_carousel_config(config: &PortfolioConfig, arrived_from: Option<Direction>) -> CarouselConfig {
    let mut carousel = config.carousel.clone();
    if arrived_from == Some(Direction::Backward) {
        carousel.initial_index = config.hero.items.len().saturating_sub(1);
    }
    carousel
}

fn config_path() -> Option<PathBuf> {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("FOLIO_CONFIG").ok())
        .map(PathBuf::from)
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = PortfolioConfig::load_or_default(config_path().as_deref())?;
    info!(items = config.hero.items.len(), "Starting portfolio");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window.title.clone())
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    let title = config.window.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Box::new(PortfolioApp::new(cc, config))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
