//! Channel extensions.
//!
//! Helix describes extensions in three shapes, depending on the endpoint. They are kept apart
//! as the variants of [`Extension`] rather than merged into one record with every field
//! optional.

use crate::error::{PayloadError, decode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::fmt;

/// An extension slot type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionType {
    Component,
    Mobile,
    Panel,
    Overlay,
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component => write!(f, "component"),
            Self::Mobile => write!(f, "mobile"),
            Self::Panel => write!(f, "panel"),
            Self::Overlay => write!(f, "overlay"),
        }
    }
}

/// An extension to place in a slot, as sent to `PUT /helix/users/extensions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionUpdate {
    pub active: bool,
    pub id: String,
    pub version: String,
    /// Horizontal placement; component extensions only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    /// Vertical placement; component extensions only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i64>,
}

impl ExtensionUpdate {
    pub fn new(active: bool, id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            active,
            id: id.into(),
            version: version.into(),
            x: None,
            y: None,
        }
    }

    /// Places a component extension.
    pub fn at(mut self, x: i64, y: i64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        decode("ExtensionUpdate", payload)
    }

    /// The body for one slot. Coordinates are only included when set.
    pub fn to_payload(&self) -> Value {
        let mut body = Map::new();
        body.insert("active".into(), Value::Bool(self.active));
        body.insert("id".into(), Value::String(self.id.clone()));
        body.insert("version".into(), Value::String(self.version.clone()));
        if let Some(x) = self.x {
            body.insert("x".into(), x.into());
        }
        if let Some(y) = self.y {
            body.insert("y".into(), y.into());
        }
        Value::Object(body)
    }
}

/// An extension a user has installed, from `GET /helix/users/extensions/list`.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-user-extensions>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableExtension {
    pub id: String,
    pub version: String,
    pub name: String,
    /// Whether the extension is configured so that it can be activated.
    pub can_activate: bool,
    /// The slot types the extension can be activated in.
    #[serde(rename = "type")]
    pub types: Vec<ExtensionType>,
}

impl AvailableExtension {
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        decode("AvailableExtension", payload)
    }
}

/// What occupies one slot, from `GET /helix/users/extensions`.
///
/// An empty slot only carries `active: false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveExtension {
    pub active: bool,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Component extensions only.
    #[serde(default)]
    pub x: Option<i64>,
    /// Component extensions only.
    #[serde(default)]
    pub y: Option<i64>,
}

impl ActiveExtension {
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        decode("ActiveExtension", payload)
    }
}

/// Any of the three extension shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Extension {
    Update(ExtensionUpdate),
    Available(AvailableExtension),
    Active(ActiveExtension),
}

impl Extension {
    /// `None` only for an empty active slot.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Update(e) => Some(&e.id),
            Self::Available(e) => Some(&e.id),
            Self::Active(e) => e.id.as_deref(),
        }
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Update(e) => Some(&e.version),
            Self::Available(e) => Some(&e.version),
            Self::Active(e) => e.version.as_deref(),
        }
    }

    pub fn is_active(&self) -> Option<bool> {
        match self {
            Self::Update(e) => Some(e.active),
            Self::Available(_) => None,
            Self::Active(e) => Some(e.active),
        }
    }
}

impl From<ExtensionUpdate> for Extension {
    fn from(e: ExtensionUpdate) -> Self {
        Self::Update(e)
    }
}

impl From<AvailableExtension> for Extension {
    fn from(e: AvailableExtension) -> Self {
        Self::Available(e)
    }
}

impl From<ActiveExtension> for Extension {
    fn from(e: ActiveExtension) -> Self {
        Self::Active(e)
    }
}

/// A user's active extensions, keyed by slot number within each slot type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActiveExtensions {
    pub panel: BTreeMap<u32, ActiveExtension>,
    pub overlay: BTreeMap<u32, ActiveExtension>,
    pub component: BTreeMap<u32, ActiveExtension>,
}

#[derive(Deserialize)]
struct RawActiveExtensions {
    #[serde(default)]
    panel: BTreeMap<String, ActiveExtension>,
    #[serde(default)]
    overlay: BTreeMap<String, ActiveExtension>,
    #[serde(default)]
    component: BTreeMap<String, ActiveExtension>,
}

fn slots(
    raw: BTreeMap<String, ActiveExtension>,
) -> Result<BTreeMap<u32, ActiveExtension>, PayloadError> {
    raw.into_iter()
        .map(|(slot, extension)| match slot.parse() {
            Ok(slot) => Ok((slot, extension)),
            Err(_) => Err(PayloadError::from_serde(
                "ActiveExtensions",
                <serde_json::Error as serde::de::Error>::custom(format_args!(
                    "extension slot {slot:?} is not a number"
                )),
            )),
        })
        .collect()
}

impl ActiveExtensions {
    /// Builds from the `data` object of `GET /helix/users/extensions`.
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        let raw: RawActiveExtensions = decode("ActiveExtensions", payload)?;
        Ok(Self {
            panel: slots(raw.panel)?,
            overlay: slots(raw.overlay)?,
            component: slots(raw.component)?,
        })
    }

    /// Active extensions in slot order, panels first.
    pub fn iter_active(&self) -> impl Iterator<Item = (ExtensionType, u32, &ActiveExtension)> {
        let panel = self.panel.iter().map(|(s, e)| (ExtensionType::Panel, *s, e));
        let overlay = self.overlay.iter().map(|(s, e)| (ExtensionType::Overlay, *s, e));
        let component = self
            .component
            .iter()
            .map(|(s, e)| (ExtensionType::Component, *s, e));
        panel
            .chain(overlay)
            .chain(component)
            .filter(|(_, _, e)| e.active)
    }
}

/// Collects slot assignments for `PUT /helix/users/extensions`.
///
/// Slots are numbered in the order extensions are added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionBuilder {
    pub panels: Vec<ExtensionUpdate>,
    pub overlays: Vec<ExtensionUpdate>,
    pub components: Vec<ExtensionUpdate>,
}

impl ExtensionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&mut self, extension: ExtensionUpdate) -> &mut Self {
        self.panels.push(extension);
        self
    }

    pub fn overlay(&mut self, extension: ExtensionUpdate) -> &mut Self {
        self.overlays.push(extension);
        self
    }

    pub fn component(&mut self, extension: ExtensionUpdate) -> &mut Self {
        self.components.push(extension);
        self
    }

    /// The request body's `data` object.
    pub fn to_payload(&self) -> Value {
        fn numbered(extensions: &[ExtensionUpdate]) -> Value {
            extensions
                .iter()
                .enumerate()
                .map(|(slot, e)| (slot.to_string(), e.to_payload()))
                .collect::<Map<_, _>>()
                .into()
        }

        json!({
            "panel": numbered(&self.panels),
            "overlay": numbered(&self.overlays),
            "component": numbered(&self.components),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn update_round_trip() {
        let with_coords = json!({ "active": true, "id": "rh6jq1q334hqc2rr1qlzqbvwlfl3x0", "version": "1.1.0", "x": 0, "y": 10 });
        let update = ExtensionUpdate::from_payload(&with_coords).unwrap();
        assert_eq!(update.x, Some(0));
        assert_eq!(update.to_payload(), with_coords);

        let without = json!({ "active": false, "id": "wi08ebtatdc7oj83wtl9uxwz807l8b", "version": "1.1.8" });
        let update = ExtensionUpdate::from_payload(&without).unwrap();
        assert_eq!(update.to_payload(), without);
        assert_eq!(serde_json::to_value(&update).unwrap(), without);
    }

    #[test]
    fn builder_numbers_slots_in_insertion_order() {
        let mut builder = ExtensionBuilder::new();
        builder
            .panel(ExtensionUpdate::new(true, "first", "1.0.0"))
            .overlay(ExtensionUpdate::new(true, "over", "2.0.0"))
            .panel(ExtensionUpdate::new(false, "second", "1.0.1"));

        let body = builder.to_payload();
        let panel_keys: Vec<_> = body["panel"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(panel_keys, vec!["0", "1"]);
        assert_eq!(body["panel"]["1"]["id"], "second");
        assert_eq!(body["overlay"]["0"]["id"], "over");
        assert_eq!(body["component"], json!({}));
        assert_snapshot!(
            body,
            @r#"{"panel":{"0":{"active":true,"id":"first","version":"1.0.0"},"1":{"active":false,"id":"second","version":"1.0.1"}},"overlay":{"0":{"active":true,"id":"over","version":"2.0.0"}},"component":{}}"#
        );
    }

    #[test]
    fn component_coordinates_in_body() {
        let mut builder = ExtensionBuilder::new();
        builder.component(ExtensionUpdate::new(true, "comp", "0.0.1").at(0, 0));
        let body = builder.to_payload();
        assert_eq!(
            body["component"]["0"],
            json!({ "active": true, "id": "comp", "version": "0.0.1", "x": 0, "y": 0 })
        );
    }

    #[test]
    fn available_extension_types() {
        let extension = AvailableExtension::from_payload(&json!({
            "can_activate": true,
            "id": "wi08ebtatdc7oj83wtl9uxwz807l8b",
            "name": "Streamlabs Leaderboard",
            "type": ["panel"],
            "version": "1.1.8"
        }))
        .unwrap();
        assert_eq!(extension.types, vec![ExtensionType::Panel]);

        let extension = Extension::from(extension);
        assert_eq!(extension.id(), Some("wi08ebtatdc7oj83wtl9uxwz807l8b"));
        assert_eq!(extension.version(), Some("1.1.8"));
        assert_eq!(extension.is_active(), None);
    }

    fn active() -> Value {
        json!({
            "panel": {
                "1": { "active": true, "id": "rh6jq1q334hqc2rr1qlzqbvwlfl3x0", "version": "1.1.0", "name": "TopClip" },
                "2": { "active": true, "id": "wi08ebtatdc7oj83wtl9uxwz807l8b", "version": "1.1.8", "name": "Streamlabs Leaderboard" },
                "3": { "active": false }
            },
            "overlay": {
                "1": { "active": true, "id": "zfh2irvx2jb4s60f02jq0ajm8vwgka", "version": "1.0.19", "name": "Streamlabs" }
            },
            "component": {
                "1": { "active": true, "id": "lqnf3zxk0rv0g7gq92mtmnirjz2cjj", "version": "0.0.1", "name": "Dev Experience Test", "x": 0, "y": 0 },
                "2": { "active": false }
            }
        })
    }

    #[test]
    fn active_slots_keep_numbering() {
        let extensions = ActiveExtensions::from_payload(&active()).unwrap();
        assert_eq!(extensions.panel.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(extensions.panel[&3], ActiveExtension {
            active: false,
            id: None,
            version: None,
            name: None,
            x: None,
            y: None,
        });
        assert_eq!(extensions.component[&1].x, Some(0));
        assert_eq!(extensions.overlay[&1].x, None);

        let active: Vec<_> = extensions
            .iter_active()
            .map(|(kind, slot, e)| format!("{kind}/{slot}/{}", e.name.as_deref().unwrap_or("")))
            .collect();
        assert_eq!(
            active,
            vec![
                "panel/1/TopClip",
                "panel/2/Streamlabs Leaderboard",
                "overlay/1/Streamlabs",
                "component/1/Dev Experience Test"
            ]
        );
    }

    #[test]
    fn non_numeric_slot() {
        let err = ActiveExtensions::from_payload(&json!({ "panel": { "left": { "active": false } } }))
            .unwrap_err();
        assert_snapshot!(err, @r#"ActiveExtensions payload has a malformed field: extension slot "left" is not a number"#);
    }

    #[test]
    fn empty_active_slot_has_no_identity() {
        let slot = Extension::from(ActiveExtension::from_payload(&json!({ "active": false })).unwrap());
        assert_eq!(slot.id(), None);
        assert_eq!(slot.is_active(), Some(false));
    }
}
