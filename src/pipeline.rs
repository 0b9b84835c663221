use crate::config::AppConfig;
use crate::display::{Display, Region};
use crate::error::{RecipeError, Result};
use crate::favorites::{FavoritesStore, FavoritesView, FileStore};
use crate::fetcher::{MealDbClient, RecipeSource};
use crate::model::Recipe;
use crate::remix::{ChatRemixer, Remixer};
use crate::render;
use log::{error, info, warn};

pub const LOADING_RANDOM_MESSAGE: &str = "Cooking...";
pub const LOADING_SAVED_MESSAGE: &str = "Loading recipe...";
pub const LOADING_REMIX_MESSAGE: &str = "Cooking your remix... 🪄🍳";
pub const RANDOM_FAILED_MESSAGE: &str = "Sorry, couldn't load a recipe.";
pub const SAVED_FAILED_MESSAGE: &str = "Sorry, couldn't load the recipe.";
pub const SAVED_NOT_FOUND_MESSAGE: &str = "Sorry, couldn't find that recipe.";
pub const REMIX_FAILED_MESSAGE: &str = "Oops! Something went wrong with the remix. Please try again.";
pub const REMIX_WITHOUT_RECIPE_MESSAGE: &str = "Load a recipe first!";

/// User-initiated triggers. Payloads carry the identity of the item the
/// trigger was rendered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowRandom,
    ShowSaved(String),
    SaveRecipe(String),
    DeleteFavorite(String),
    Remix(String),
    RefreshFavorites,
}

/// State of the main recipe display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeState {
    Idle,
    Loading,
    Displayed,
    Failed,
}

/// State of the remix output, tracked separately from the recipe display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemixState {
    Idle,
    Loading,
    Displayed,
    Failed,
}

/// The last successfully fetched recipe
#[derive(Debug, Default)]
pub struct RecipeContext {
    current: Option<Recipe>,
}

impl RecipeContext {
    pub fn current(&self) -> Option<&Recipe> {
        self.current.as_ref()
    }

    fn replace(&mut self, recipe: Recipe) {
        self.current = Some(recipe);
    }

    fn clear(&mut self) {
        self.current = None;
    }
}

/// Drives fetch, display, favorites and remix for one viewer page
pub struct Pipeline<D: Display> {
    source: Box<dyn RecipeSource>,
    remixer: Box<dyn Remixer>,
    favorites: FavoritesStore,
    display: D,
    context: RecipeContext,
    state: RecipeState,
    remix_state: RemixState,
    render_markdown: bool,
}

impl<D: Display> Pipeline<D> {
    pub fn new(
        source: Box<dyn RecipeSource>,
        remixer: Box<dyn Remixer>,
        favorites: FavoritesStore,
        display: D,
    ) -> Self {
        Self {
            source,
            remixer,
            favorites,
            display,
            context: RecipeContext::default(),
            state: RecipeState::Idle,
            remix_state: RemixState::Idle,
            render_markdown: true,
        }
    }

    /// Wire the remote clients and the file-backed favorites store from configuration
    pub fn from_config(config: &AppConfig, display: D) -> Self {
        let favorites = FavoritesStore::new(
            Box::new(FileStore::new(&config.storage.path)),
            config.storage.key.clone(),
        );
        Self::new(
            Box::new(MealDbClient::new(&config.recipes)),
            Box::new(ChatRemixer::new(&config.remix)),
            favorites,
            display,
        )
        .with_markdown(config.remix.render_markdown)
    }

    /// Whether remix text is rendered as markdown or as plain text
    pub fn with_markdown(mut self, enabled: bool) -> Self {
        self.render_markdown = enabled;
        self
    }

    pub fn state(&self) -> RecipeState {
        self.state
    }

    pub fn remix_state(&self) -> RemixState {
        self.remix_state
    }

    pub fn current_recipe(&self) -> Option<&Recipe> {
        self.context.current()
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Startup event: show saved favorites and a first random recipe
    pub async fn start(&mut self) {
        self.render_favorites();
        self.show_random().await;
    }

    pub async fn dispatch(&mut self, action: Action) {
        match action {
            Action::ShowRandom => self.show_random().await,
            Action::ShowSaved(name) => self.show_saved(&name).await,
            Action::SaveRecipe(name) => self.save_recipe(&name),
            Action::DeleteFavorite(name) => self.delete_favorite(&name),
            Action::Remix(theme) => self.remix(&theme).await,
            Action::RefreshFavorites => {
                self.render_favorites();
            }
        }
    }

    pub async fn show_random(&mut self) {
        self.enter_loading(LOADING_RANDOM_MESSAGE);
        let result = self.source.fetch_random().await;
        self.finish_fetch(result, |_| RANDOM_FAILED_MESSAGE);
    }

    pub async fn show_saved(&mut self, name: &str) {
        self.enter_loading(LOADING_SAVED_MESSAGE);
        let result = self.source.fetch_by_name(name).await;
        self.finish_fetch(result, |e| {
            if e.is_not_found() {
                SAVED_NOT_FOUND_MESSAGE
            } else {
                SAVED_FAILED_MESSAGE
            }
        });
    }

    pub fn save_recipe(&mut self, name: &str) {
        self.favorites.add(name);
        self.render_favorites();
    }

    pub fn delete_favorite(&mut self, name: &str) {
        self.favorites.remove(name);
        self.render_favorites();
    }

    pub fn render_favorites(&mut self) -> FavoritesView {
        self.favorites.render(&mut self.display)
    }

    /// Remix the current recipe around `theme`
    pub async fn remix(&mut self, theme: &str) {
        let Some(recipe) = self.context.current().cloned() else {
            warn!("Remix requested without a current recipe");
            self.display.show(
                Region::Remix,
                &render::message_html(REMIX_WITHOUT_RECIPE_MESSAGE),
            );
            return;
        };

        info!("Remixing '{}' with theme '{}'", recipe.name, theme);
        self.enter_remix_loading();

        match self.remixer.remix(&recipe, theme).await {
            Ok(text) => {
                self.remix_state = RemixState::Displayed;
                self.display.show(
                    Region::Remix,
                    &render::remix_html(&text, self.render_markdown),
                );
            }
            Err(e) => {
                error!("Remix failed: {}", e);
                self.remix_state = RemixState::Failed;
                self.display
                    .show(Region::Remix, &render::message_html(REMIX_FAILED_MESSAGE));
            }
        }
    }

    fn enter_loading(&mut self, message: &str) {
        self.state = RecipeState::Loading;
        self.remix_state = RemixState::Idle;
        self.display.show(Region::Recipe, &render::message_html(message));
        self.display.show(Region::Remix, "");
    }

    fn enter_remix_loading(&mut self) {
        self.remix_state = RemixState::Loading;
        self.display
            .show(Region::Remix, &render::message_html(LOADING_REMIX_MESSAGE));
    }

    fn finish_fetch(&mut self, result: Result<Recipe>, failure: impl Fn(&RecipeError) -> &'static str) {
        match result {
            Ok(recipe) => {
                info!("Displaying '{}'", recipe.name);
                self.display.show(Region::Recipe, &render::recipe_html(&recipe));
                self.context.replace(recipe);
                self.state = RecipeState::Displayed;
            }
            Err(e) => {
                error!("Failed to fetch recipe: {}", e);
                self.context.clear();
                self.display
                    .show(Region::Recipe, &render::message_html(failure(&e)));
                self.state = RecipeState::Failed;
            }
        }
    }
}
