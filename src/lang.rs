use leptos::prelude::window;
use wasm_bindgen::JsValue;
use web_sys::Document;

/// Storage key the localization layer saves the user's language under.
/// This module only ever reads it.
pub const STORAGE_KEY: &str = "cubik_lang";

/// Languages the placeholder can render. [`Lang::En`] doubles as the fallback
/// for anything outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    #[default]
    En,
    Ru,
}

impl Lang {
    /// Two-letter code, as written to the document's `lang` attribute.
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ru => "ru",
        }
    }

    /// Normalize a raw language tag (`EN`, ` ru `, `en-US`) down to a
    /// supported language. Region suffixes are cut at the first hyphen.
    /// Returns `None` for anything outside the supported set.
    pub fn from_tag(raw: &str) -> Option<Lang> {
        let tag = raw.trim().to_lowercase();
        let base = tag.split_once('-').map(|(prefix, _)| prefix).unwrap_or(&tag);
        match base {
            "en" => Some(Lang::En),
            "ru" => Some(Lang::Ru),
            _ => None,
        }
    }

    /// Display strings for this language.
    pub fn strings(self) -> &'static Strings {
        match self {
            Lang::En => &EN,
            Lang::Ru => &RU,
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Text shown on the placeholder, one set per language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strings {
    pub message: &'static str,
    pub home: &'static str,
}

const EN: Strings = Strings {
    message: "3D editor is available on desktop.",
    home: "Cubik.one",
};

const RU: Strings = Strings {
    message: "3D-редактор доступен в десктопной версии.",
    home: "Cubik.one",
};

/// Resolve the active language: URL query parameter, then the stored
/// preference, then the browser language, then the default. A source that
/// cannot be read counts as absent. Never fails.
pub fn resolve() -> Lang {
    resolve_from(
        query_lang().as_deref(),
        stored_lang().as_deref(),
        browser_lang().as_deref(),
    )
}

/// Pick the winning raw tag and normalize it. The first non-empty source wins
/// outright: an unsupported value from a higher-priority source normalizes to
/// the default language, it does not hand over to the next source.
fn resolve_from(query: Option<&str>, stored: Option<&str>, browser: Option<&str>) -> Lang {
    [query, stored, browser]
        .into_iter()
        .flatten()
        .find(|raw| !raw.is_empty())
        .and_then(Lang::from_tag)
        .unwrap_or_default()
}

/// Extract the value of a `lang` query parameter: a `lang=` key introduced by
/// `?` or `&`, value = the longest run of ASCII letters and hyphens. A `lang=`
/// with an empty value is skipped and scanning continues.
fn lang_query_param(search: &str) -> Option<String> {
    for (idx, _) in search.match_indices(['?', '&']) {
        let Some(value) = search[idx + 1..].strip_prefix("lang=") else {
            continue;
        };
        let len = value
            .chars()
            .take_while(|c| c.is_ascii_alphabetic() || *c == '-')
            .count();
        if len > 0 {
            return Some(value[..len].to_string());
        }
    }
    None
}

fn query_lang() -> Option<String> {
    let search = window().location().search().ok()?;
    lang_query_param(&search)
}

fn stored_lang() -> Option<String> {
    let storage = window().local_storage().ok()??;
    storage.get_item(STORAGE_KEY).ok()?
}

fn browser_lang() -> Option<String> {
    let navigator = window().navigator();
    navigator
        .language()
        .filter(|language| !language.is_empty())
        .or_else(|| {
            // Legacy fallback property, not part of the typed API.
            js_sys::Reflect::get(navigator.as_ref(), &JsValue::from_str("userLanguage"))
                .ok()
                .and_then(|value| value.as_string())
        })
}

/// Stamp the resolved language onto the document root: the `lang` attribute
/// plus a `data-lang` hook for the stylesheet. Best-effort, failures are
/// ignored.
pub fn apply_document_lang(document: &Document, lang: Lang) {
    if let Some(root) = document.document_element() {
        let _ = root.set_attribute("lang", lang.code());
        let _ = root.set_attribute("data-lang", lang.code());
    }
}
