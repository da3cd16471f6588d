//! Shared setup for the end-to-end tests.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use lorelink_domain::ReferenceLookup;
use lorelink_engine::infrastructure::data_sources::FileDataSource;
use lorelink_engine::infrastructure::settings::EngineConfig;
use lorelink_engine::App;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::application::tooltip::{HoverEvent, TooltipConfig, TooltipEngine, TooltipService};
use crate::domain::{AnchorId, Point, PopupId};
use crate::infrastructure::testing::{ManualTimers, RecordingPopupHost};
use crate::infrastructure::EngineReferenceLookup;
use crate::ui::presentation::text::{extract_anchors, RenderMode, TagRenderer};

/// A composed tooltip stack over reference data in a temporary directory.
pub struct TestWorld {
    _data: TempDir,
    pub host: Arc<RecordingPopupHost>,
    pub timers: Arc<ManualTimers>,
    pub service: Arc<TooltipService>,
}

impl TestWorld {
    pub fn new() -> Self {
        let data = TempDir::new().expect("temp dir");
        write_reference_data(data.path());

        let app = App::new(
            EngineConfig::default(),
            Arc::new(FileDataSource::new(data.path())),
        );
        let host = Arc::new(RecordingPopupHost::new());
        let timers = Arc::new(ManualTimers::new());
        let engine = TooltipEngine::new(
            host.clone(),
            timers.clone(),
            TagRenderer::new(app.config.default_source.clone()),
            TooltipConfig::default(),
        );
        let service = Arc::new(TooltipService::new(
            engine,
            Arc::new(EngineReferenceLookup::from_app(&app)),
        ));

        Self {
            _data: data,
            host,
            timers,
            service,
        }
    }

    /// Hover the `index`-th anchor of a main-document text.
    pub async fn hover_document(&self, text: &str, index: usize) -> Option<PopupId> {
        let html = TagRenderer::default().process_string(text, RenderMode::Tooltip);
        let lookup = nth_anchor(&html, index);
        let anchor = format!("doc:{}:{}", index, lookup.name);
        self.service
            .hover_enter(event(anchor, lookup, None))
            .await
    }

    /// Hover the anchor named `name` inside an open popup.
    pub async fn hover_in_popup(&self, popup: PopupId, name: &str) -> Option<PopupId> {
        let html = self.host.mounted_html(popup).expect("popup is mounted");
        let lookup = extract_anchors(&html)
            .into_iter()
            .find(|lookup| lookup.name.eq_ignore_ascii_case(name))
            .unwrap_or_else(|| panic!("no anchor named {name} in popup html: {html}"));
        self.service
            .hover_enter(event(format!("{}:{}", popup, name), lookup, Some(popup)))
            .await
    }

    /// Ids of the open popups, bottom first.
    pub async fn stack_ids(&self) -> Vec<PopupId> {
        self.service
            .snapshot()
            .await
            .into_iter()
            .map(|popup| popup.id)
            .collect()
    }
}

fn nth_anchor(html: &str, index: usize) -> ReferenceLookup {
    extract_anchors(html)
        .into_iter()
        .nth(index)
        .unwrap_or_else(|| panic!("no anchor {index} in {html}"))
}

fn event(anchor: String, lookup: ReferenceLookup, container: Option<PopupId>) -> HoverEvent {
    HoverEvent {
        anchor: AnchorId::new(anchor),
        lookup: Some(lookup),
        container,
        pointer: Point::new(200.0, 150.0),
    }
}

fn write_json(root: &Path, relative: &str, value: Value) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create data dir");
    }
    fs::write(&path, value.to_string()).expect("write data file");
}

/// Spells, conditions and actions that reference each other. `skills.json`
/// is deliberately absent.
fn write_reference_data(root: &Path) {
    write_json(root, "spells/index.json", json!({"PHB": "spells-phb.json"}));
    write_json(
        root,
        "spells/spells-phb.json",
        json!({"spell": [
            {
                "name": "Fireball", "source": "PHB", "page": 241, "level": 3, "school": "V",
                "time": [{"number": 1, "unit": "action"}],
                "range": {"type": "point", "distance": {"type": "feet", "amount": 150}},
                "components": {"v": true, "s": true, "m": "a tiny ball of bat guano and sulfur"},
                "duration": [{"type": "instant"}],
                "entries": [
                    "A bright streak flashes to a point you choose. Survivors are knocked {@condition prone}.",
                    "Unlike other {@spell fireball|PHB|fireballs}, this one is on the page you are reading."
                ]
            },
            {
                "name": "Shield", "source": "PHB", "page": 275, "level": 1, "school": "A",
                "entries": ["An invisible barrier of magical force appears."]
            }
        ]}),
    );
    write_json(
        root,
        "conditionsdiseases.json",
        json!({"condition": [{
            "name": "Prone", "source": "PHB", "page": 292,
            "entries": ["A prone creature's only movement option is to crawl, unless it uses the {@action Dash} action."]
        }]}),
    );
    write_json(
        root,
        "actions.json",
        json!({"action": [{
            "name": "Dash", "source": "PHB", "page": 192,
            "time": [{"number": 1, "unit": "action"}],
            "entries": ["You gain extra movement for the current turn."]
        }]}),
    );
}
