use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Display regions of the viewer page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// Saved recipes list
    Favorites,
    /// The current recipe
    Recipe,
    /// Remix output for the current recipe
    Remix,
}

impl Region {
    pub fn id(&self) -> &'static str {
        match self {
            Region::Favorites => "saved-recipes-container",
            Region::Recipe => "recipe-display",
            Region::Remix => "remix-output",
        }
    }
}

/// Render target for HTML fragments
pub trait Display: Send {
    /// Replace the content of `region` and make it visible
    fn show(&mut self, region: Region, html: &str);

    /// Hide `region` entirely
    fn hide(&mut self, region: Region);
}

/// Content of one region; `None` means hidden
type Regions = BTreeMap<Region, Option<String>>;

/// Display that keeps region contents in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryDisplay {
    regions: Regions,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible content of `region`; `None` when hidden or never rendered
    pub fn content(&self, region: Region) -> Option<&str> {
        self.regions.get(&region).and_then(|html| html.as_deref())
    }

    pub fn is_hidden(&self, region: Region) -> bool {
        matches!(self.regions.get(&region), Some(None))
    }
}

impl Display for MemoryDisplay {
    fn show(&mut self, region: Region, html: &str) {
        self.regions.insert(region, Some(html.to_string()));
    }

    fn hide(&mut self, region: Region) {
        self.regions.insert(region, None);
    }
}

/// Display that rewrites a complete HTML page on every change
pub struct HtmlPageDisplay {
    path: PathBuf,
    regions: MemoryDisplay,
}

impl HtmlPageDisplay {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            regions: MemoryDisplay::new(),
        }
    }

    /// Full page markup for the current region contents
    pub fn page(&self) -> String {
        let mut body = String::new();
        for region in [Region::Favorites, Region::Recipe, Region::Remix] {
            let content = self.regions.content(region).unwrap_or_default();
            let style = if self.regions.is_hidden(region) {
                r#" style="display:none""#
            } else {
                ""
            };
            let inner = if region == Region::Favorites {
                format!("<h2>Saved Recipes</h2>\n<ul id=\"saved-recipes-list\">\n{content}\n</ul>")
            } else {
                content.to_string()
            };
            body.push_str(&format!(
                "<div id=\"{}\"{style}>\n{inner}\n</div>\n",
                region.id()
            ));
        }

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n<title>Recipe Remix</title>\n</head>\n<body>\n{body}</body>\n</html>\n"
        )
    }

    fn flush(&self) {
        match fs::write(&self.path, self.page()) {
            Ok(()) => debug!("Wrote page to {}", self.path.display()),
            Err(e) => warn!("Failed to write page {}: {}", self.path.display(), e),
        }
    }
}

impl Display for HtmlPageDisplay {
    fn show(&mut self, region: Region, html: &str) {
        self.regions.show(region, html);
        self.flush();
    }

    fn hide(&mut self, region: Region) {
        self.regions.hide(region);
        self.flush();
    }
}
