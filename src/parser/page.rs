//! Parsed tracker page with the selectors the extractor and board rely on

use crate::models::CardRole;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// Card grid inside a section
pub const CARDS_CONTAINER_SELECTOR: &str = ".cards";
pub const CARD_SELECTOR: &str = ".card";
pub const RARITY_ATTRIBUTE: &str = "data-rarity";
pub const SETTINGS_SCRIPT_SELECTOR: &str = r#"script[data-drupal-selector="drupal-settings-json"]"#;

static WANTED_SECTION: OnceLock<Selector> = OnceLock::new();
static TRADABLE_SECTION: OnceLock<Selector> = OnceLock::new();
static CARDS_CONTAINER: OnceLock<Selector> = OnceLock::new();
static CARD: OnceLock<Selector> = OnceLock::new();
static IMG: OnceLock<Selector> = OnceLock::new();
static SETTINGS_SCRIPT: OnceLock<Selector> = OnceLock::new();
static PARAGRAPH: OnceLock<Selector> = OnceLock::new();

fn selector(cell: &'static OnceLock<Selector>, css: &str) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(css).unwrap())
}

fn section_selector(role: CardRole) -> &'static Selector {
    match role {
        CardRole::Wanted => selector(&WANTED_SECTION, ".cards-wrapper .wanted"),
        CardRole::Tradable => selector(&TRADABLE_SECTION, ".cards-wrapper .tradable"),
    }
}

fn card_selector() -> &'static Selector {
    selector(&CARD, CARD_SELECTOR)
}

pub struct ProfilePage {
    document: Html,
    url: Option<String>,
}

impl ProfilePage {
    pub fn parse(html: &str, url: Option<&str>) -> Self {
        Self {
            document: Html::parse_document(html),
            url: url.map(str::to_string),
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn document(&self) -> &Html {
        &self.document
    }

    pub fn section(&self, role: CardRole) -> Option<ElementRef<'_>> {
        self.document.select(section_selector(role)).next()
    }

    pub fn has_sections(&self) -> bool {
        CardRole::ALL.iter().any(|role| self.section(*role).is_some())
    }

    /// Cards of the first card grid inside a section, in page order
    pub fn section_cards(&self, role: CardRole) -> Vec<ElementRef<'_>> {
        self.section(role)
            .and_then(|section| section.select(selector(&CARDS_CONTAINER, CARDS_CONTAINER_SELECTOR)).next())
            .map(|grid| grid.select(card_selector()).collect())
            .unwrap_or_default()
    }

    /// Every card element on the page, in document order
    pub fn all_cards(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.document.select(card_selector())
    }

    /// Raw text of the Drupal settings script, if the page has one
    pub fn settings_script(&self) -> Option<String> {
        self.document
            .select(selector(&SETTINGS_SCRIPT, SETTINGS_SCRIPT_SELECTOR))
            .next()
            .map(|script| script.text().collect::<String>())
            .filter(|text| !text.trim().is_empty())
    }

    /// Value of a `<p><b>Label:</b> value</p>` line: the paragraph's own text
    /// nodes, without the bold label.
    pub fn labelled_value(&self, label: &str) -> Option<String> {
        self.document
            .select(selector(&PARAGRAPH, "p"))
            .filter(|p| p.text().collect::<String>().contains(label))
            .map(|p| {
                p.children()
                    .filter_map(|node| node.value().as_text().map(|text| String::from(&**text)))
                    .collect::<String>()
                    .trim()
                    .to_string()
            })
            .find(|value| !value.is_empty())
    }
}

pub fn card_rarity_attr<'a>(card: ElementRef<'a>) -> Option<&'a str> {
    card.value().attr(RARITY_ATTRIBUTE)
}

/// `src` of the first image inside a card element
pub fn card_image_src<'a>(card: ElementRef<'a>) -> Option<&'a str> {
    card.select(selector(&IMG, "img"))
        .next()
        .and_then(|img| img.value().attr("src"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <p><b>In game name:</b> Ash</p>
          <p><b>Friend ID:</b>  1234-5678 </p>
          <div class="cards-wrapper">
            <div class="wanted"><div class="cards">
              <div class="card" data-rarity="♢"><img src="/files/genetic_apex/cards/1.webp"></div>
            </div></div>
            <div class="tradable"><div class="cards">
              <div class="card" data-rarity="☆"><img src="/files/space_time_smackdown/cards/2.webp"></div>
              <div class="card" data-rarity="♢♢"></div>
            </div></div>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_sections_and_cards() {
        let page = ProfilePage::parse(PAGE, None);
        assert!(page.has_sections());
        assert_eq!(page.section_cards(CardRole::Wanted).len(), 1);
        assert_eq!(page.section_cards(CardRole::Tradable).len(), 2);
        assert_eq!(page.all_cards().count(), 3);

        let tradable = page.section_cards(CardRole::Tradable);
        assert_eq!(card_rarity_attr(tradable[0]), Some("☆"));
        assert_eq!(card_image_src(tradable[0]), Some("/files/space_time_smackdown/cards/2.webp"));
        assert_eq!(card_image_src(tradable[1]), None);
    }

    #[test]
    fn test_labelled_values() {
        let page = ProfilePage::parse(PAGE, None);
        assert_eq!(page.labelled_value("In game name:").as_deref(), Some("Ash"));
        assert_eq!(page.labelled_value("Friend ID:").as_deref(), Some("1234-5678"));
        assert_eq!(page.labelled_value("Nickname:"), None);
    }

    #[test]
    fn test_page_without_sections() {
        let page = ProfilePage::parse("<html><body><p>Nothing here</p></body></html>", None);
        assert!(!page.has_sections());
        assert!(page.section_cards(CardRole::Wanted).is_empty());
        assert_eq!(page.settings_script(), None);
    }
}
