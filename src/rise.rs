//! RISE slideshow options in notebook metadata.

use serde_json::{Map, Value, json};

use crate::error::{Error, Result};
use crate::notebook::to_notebook_json;

/// Metadata key RISE reads its options from.
pub const RISE_KEY: &str = "rise";

/// Older metadata key for the same options. Migrated to [`RISE_KEY`].
pub const LEGACY_KEY: &str = "livereveal";

/// Footer forced onto Daytum slides.
pub const DAYTUM_FOOTER: &str = "<img src='https://github.com/daytum/logos/blob/master/daytum_logo_2019.png?raw=true' width='220'>";

/// Slide options applied when a notebook carries none.
pub fn default_options() -> Value {
    json!({
        "footer": "",
        "progress": true,
        "scroll": true,
        "theme": "simple",
        "slideNumber": false,
        "auto_select": null,
        "enable_chalkboard": false,
        "controls": true,
    })
}

/// Where a notebook's slide options come from.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideOptions {
    /// Taken from the `livereveal` key, which has been removed.
    Legacy(Value),
    /// Taken from an existing `rise` key.
    Rise(Value),
    /// Neither key present.
    Default,
}

impl SlideOptions {
    /// Resolve the options source. `livereveal` always wins over `rise`
    /// and is removed from `metadata`.
    pub fn take(metadata: &mut Map<String, Value>) -> Self {
        if let Some(legacy) = metadata.remove(LEGACY_KEY) {
            SlideOptions::Legacy(legacy)
        } else if let Some(rise) = metadata.get(RISE_KEY) {
            SlideOptions::Rise(rise.clone())
        } else {
            SlideOptions::Default
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            SlideOptions::Legacy(v) | SlideOptions::Rise(v) => v,
            SlideOptions::Default => default_options(),
        }
    }
}

/// Resolve and store slide options in `metadata`, forcing the Daytum
/// footer when `daytum` is set.
pub fn apply(metadata: &mut Map<String, Value>, daytum: bool) -> Result<()> {
    let mut options = SlideOptions::take(metadata).into_value();

    if daytum {
        if !options.is_object() {
            return Err(Error::InvalidSlideOptions(format!(
                "expected an object, found {options}"
            )));
        }
        options["footer"] = Value::from(DAYTUM_FOOTER);
    }

    metadata.insert(RISE_KEY.to_string(), options);
    Ok(())
}

/// Inject slide options into a serialized notebook body.
///
/// Only the top-level `metadata` changes; a missing one is created.
pub fn add_rise_options(body: &str, daytum: bool) -> Result<String> {
    let mut document: Value = serde_json::from_str(body)?;
    let Some(root) = document.as_object_mut() else {
        return Err(Error::InvalidNotebook("top level is not an object".to_string()));
    };

    let metadata = root
        .entry("metadata")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(metadata) = metadata.as_object_mut() else {
        return Err(Error::InvalidNotebook("metadata is not an object".to_string()));
    };

    apply(metadata, daytum)?;
    to_notebook_json(&document)
}
