// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles shared by the unit tests.

extern crate std;

use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::{Point, Rect};

use crate::attribute::{AttrParams, Attribute, AttributeKind};
use crate::config::InspectorConfig;
use crate::cursor::{Pass, RenderCursor};
use crate::decorator::{ChangeCx, Decorator, Effects, FieldCx, Hook, InitCx, MenuCx};
use crate::error::DecoratorError;
use crate::field::{FieldId, InstanceId, InstanceStore};
use crate::foldout::GroupTable;
use crate::input::InputFrame;
use crate::menu::MenuBuilder;
use crate::paint::{Color, Control, MessageLevel, Painter};
use crate::registry::DecoratorRegistry;
use crate::value::{ObjectRef, Value};

// ---------------------------------------------------------------------------
// RecordingPainter
// ---------------------------------------------------------------------------

/// Owned mirror of [`Control`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum RecordedControl {
    Slider { value: f64, min: f64, max: f64 },
    Toggle(bool),
    IntField(i64),
    FloatField(f64),
    TextField(String),
    ObjectField(Option<ObjectRef>),
    MixedValue,
    FoldoutHeader { label: String, open: bool },
    Header(String),
    HelpBox { text: String, level: MessageLevel },
}

impl From<Control<'_>> for RecordedControl {
    fn from(control: Control<'_>) -> Self {
        match control {
            Control::Slider { value, min, max } => Self::Slider { value, min, max },
            Control::Toggle(on) => Self::Toggle(on),
            Control::IntField(v) => Self::IntField(v),
            Control::FloatField(v) => Self::FloatField(v),
            Control::TextField(text) => Self::TextField(text.to_string()),
            Control::ObjectField(obj) => Self::ObjectField(obj),
            Control::MixedValue => Self::MixedValue,
            Control::FoldoutHeader { label, open } => Self::FoldoutHeader {
                label: label.to_string(),
                open,
            },
            Control::Header(text) => Self::Header(text.to_string()),
            Control::HelpBox { text, level } => Self::HelpBox {
                text: text.to_string(),
                level,
            },
        }
    }
}

/// Records every paint call.
#[derive(Debug, Default)]
pub(crate) struct RecordingPainter {
    pub(crate) fills: Vec<(Rect, Color)>,
    pub(crate) labels: Vec<(Rect, String)>,
    pub(crate) controls: Vec<(Rect, RecordedControl, bool)>,
    pub(crate) clips: Vec<Rect>,
    pub(crate) depth: usize,
}

impl RecordingPainter {
    pub(crate) fn count(&self, matches: impl Fn(&RecordedControl) -> bool) -> usize {
        self.controls.iter().filter(|(_, c, _)| matches(c)).count()
    }
}

impl Painter for RecordingPainter {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fills.push((rect, color));
    }

    fn label(&mut self, rect: Rect, text: &str) {
        self.labels.push((rect, text.to_string()));
    }

    fn control(&mut self, rect: Rect, control: Control<'_>, enabled: bool) {
        self.controls.push((rect, control.into(), enabled));
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clips.push(rect);
        self.depth += 1;
    }

    fn pop_clip(&mut self) {
        self.depth -= 1;
    }
}

// ---------------------------------------------------------------------------
// Scratch
// ---------------------------------------------------------------------------

/// Owns what a free-standing [`FieldCx`] borrows.
#[derive(Debug)]
pub(crate) struct Scratch {
    pub(crate) config: InspectorConfig,
    pub(crate) groups: GroupTable,
    pub(crate) instances: InstanceStore,
}

impl Scratch {
    pub(crate) fn new() -> Self {
        Self {
            config: InspectorConfig::standard(),
            groups: GroupTable::new(),
            instances: InstanceStore::new(),
        }
    }

    /// A paint-pass context at the origin, 320 wide.
    pub(crate) fn field_cx<'a>(
        &'a mut self,
        value: Value,
        painter: &'a mut dyn Painter,
        input: &'a mut InputFrame,
    ) -> FieldCx<'a> {
        FieldCx {
            field: FieldId {
                idx: 0,
                generation: 0,
            },
            instance: InstanceId::NONE,
            label: "field",
            kind: value.kind(),
            value,
            cursor: RenderCursor::new(
                Point::ZERO,
                320.0,
                self.config.row_spacing,
                Pass::Paint,
            ),
            enabled: true,
            painter,
            input,
            groups: &mut self.groups,
            instances: &self.instances,
            config: &self.config,
            delta_secs: 0.0,
            closing: &[],
            effects: Effects::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Hook log
// ---------------------------------------------------------------------------

std::thread_local! {
    static LOG: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

fn log(entry: String) {
    LOG.with(|log| log.borrow_mut().push(entry));
}

/// Takes the hook calls logged on this thread so far.
pub(crate) fn take_log() -> Vec<String> {
    LOG.with(|log| core::mem::take(&mut *log.borrow_mut()))
}

// ---------------------------------------------------------------------------
// Test decorators
// ---------------------------------------------------------------------------

pub(crate) const PROBE: AttributeKind = AttributeKind::new("probe");
pub(crate) const FAIL_INIT: AttributeKind = AttributeKind::new("fail_init");
pub(crate) const FAIL_GUI: AttributeKind = AttributeKind::new("fail_gui");

/// Logs its hooks as `"{name}:{hook}"`.
///
/// Custom parameters: `claim_before` (handled before-hook), `claim_gui`
/// (claims the primary control with one row) and `before` (height drawn by
/// the before-hook).
#[derive(Debug)]
struct Probe {
    name: String,
    claim_before: bool,
    claim_gui: bool,
    before: f64,
}

impl Probe {
    fn create(attribute: &Attribute) -> Result<Box<dyn Decorator>, DecoratorError> {
        let flag = |name| matches!(attribute.custom(name), Some(Value::Bool(true)));
        let name = match attribute.custom("name") {
            Some(Value::Text(name)) => name.clone(),
            _ => "probe".to_string(),
        };
        Ok(Box::new(Self {
            name,
            claim_before: flag("claim_before"),
            claim_gui: flag("claim_gui"),
            before: attribute
                .custom("before")
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
        }))
    }
}

impl Decorator for Probe {
    fn initialize(&mut self, _cx: &mut InitCx<'_>) -> Result<(), DecoratorError> {
        log(format!("{}:init", self.name));
        Ok(())
    }

    fn on_before_gui(&mut self, cx: &mut FieldCx<'_>) -> Result<Hook, DecoratorError> {
        if !cx.is_measure() {
            log(format!("{}:before", self.name));
        }
        Ok(Hook {
            handled: self.claim_before,
            height: self.before,
        })
    }

    fn on_gui(&mut self, cx: &mut FieldCx<'_>) -> Result<Hook, DecoratorError> {
        if !cx.is_measure() {
            log(format!("{}:gui", self.name));
        }
        if !self.claim_gui {
            return Ok(Hook::PASS);
        }
        let height = cx.config().row_height;
        let rect = cx.row_rect(height);
        let name = self.name.clone();
        cx.painter().label(rect, &name);
        Ok(Hook::handled(height))
    }

    fn on_after_gui(&mut self, cx: &mut FieldCx<'_>) -> Result<f64, DecoratorError> {
        if !cx.is_measure() {
            log(format!("{}:after", self.name));
        }
        Ok(0.0)
    }

    fn on_value_changed(&mut self, cx: &ChangeCx<'_>) -> Result<(), DecoratorError> {
        log(format!("{}:changed {:?}", self.name, cx.new_value()));
        Ok(())
    }

    fn on_context_menu(&mut self, _cx: &MenuCx<'_>, menu: &mut MenuBuilder) {
        menu.add_item(self.name.clone(), |value| *value = Value::Int(99));
    }
}

#[derive(Debug)]
struct FailInit;

impl Decorator for FailInit {
    fn initialize(&mut self, _cx: &mut InitCx<'_>) -> Result<(), DecoratorError> {
        Err(DecoratorError::Failed("cannot initialize".into()))
    }
}

#[derive(Debug)]
struct FailGui;

impl Decorator for FailGui {
    fn on_gui(&mut self, _cx: &mut FieldCx<'_>) -> Result<Hook, DecoratorError> {
        Err(DecoratorError::Failed("cannot draw".into()))
    }
}

fn fail_init(_: &Attribute) -> Result<Box<dyn Decorator>, DecoratorError> {
    Ok(Box::new(FailInit))
}

fn fail_gui(_: &Attribute) -> Result<Box<dyn Decorator>, DecoratorError> {
    Ok(Box::new(FailGui))
}

/// A probe attribute named `name`.
pub(crate) fn probe(name: &str) -> Attribute {
    probe_with(name, &[])
}

/// A probe attribute named `name` with extra custom parameters.
pub(crate) fn probe_with(name: &str, params: &[(&str, Value)]) -> Attribute {
    let mut pairs = vec![("name".to_string(), Value::Text(name.to_string()))];
    pairs.extend(params.iter().map(|(k, v)| ((*k).to_string(), v.clone())));
    Attribute::new(PROBE).with_params(AttrParams::Custom(pairs))
}

/// The built-in decorators plus the test decorators.
pub(crate) fn test_registry() -> DecoratorRegistry {
    let mut registry = DecoratorRegistry::builtin();
    registry.register(PROBE, Probe::create);
    registry.register(FAIL_INIT, fail_init);
    registry.register(FAIL_GUI, fail_gui);
    registry
}
