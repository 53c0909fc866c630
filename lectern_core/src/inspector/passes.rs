// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The measurement and paint passes.

use alloc::vec::Vec;
use core::mem;

use kurbo::{Point, Rect};

use super::chain::{Chain, ChainEntry};
use super::{Inspector, PaintReport, RedrawReport};
use crate::controls;
use crate::cursor::{Pass, RenderCursor};
use crate::decorator::{ChangeCx, Effects, FieldCx, MenuCx};
use crate::dirty;
use crate::error::InspectorError;
use crate::field::{FieldId, InstanceId};
use crate::foldout::{ClosedRegion, GroupLayout};
use crate::input::InputFrame;
use crate::menu::{ContextMenu, MenuBuilder};
use crate::model::ValueModel;
use crate::paint::{Color, NullPainter, Painter};
use crate::time::HostTime;
use crate::trace::{
    ChainBuiltEvent, ChangeSource, ContextMenuEvent, DecoratorDroppedEvent, FieldMeasuredEvent,
    FieldPaintedEvent, GroupFadedEvent, GroupLinkedEvent, RedrawSummary, Tracer,
    ValueChangedEvent,
};
use crate::value::Value;

/// Paint heights further than this from the measured height request relayout.
const HEIGHT_EPSILON: f64 = 1e-6;

/// What one execution of a field's routine produced.
struct Execution {
    natural: f64,
    value: Value,
    enabled: bool,
    effects: Effects,
}

impl Inspector {
    /// Measures a field: runs its routine off-screen and returns the height
    /// it needs, scaled by the fade of every enclosing foldout region.
    ///
    /// Measuring is idempotent: nothing but cached heights changes, so
    /// asking twice with the same state yields the same answer.
    ///
    /// # Errors
    ///
    /// Returns [`InspectorError::Hook`] if a decorator hook fails.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn query_height(
        &mut self,
        field: FieldId,
        model: &dyn ValueModel,
        tracer: &mut Tracer<'_>,
    ) -> Result<f64, InspectorError> {
        self.fields.validate(field);
        self.ensure_ready(tracer);
        let i = field.idx as usize;

        let width = self.fields.last_width[i].unwrap_or(self.config.measure_width);
        let cursor = RenderCursor::new(
            self.config.measure_origin,
            width,
            self.config.row_spacing,
            Pass::Measure,
        );
        let run = self.execute(
            field.idx,
            cursor,
            model.value(field),
            &mut NullPainter,
            &mut InputFrame::new(),
            &[],
        )?;

        let factor = self.factor_of(field.idx);
        let height = run.natural * factor;
        self.fields.natural[i] = Some(run.natural);
        self.fields.height[i] = Some(height);
        tracer.field_measured(&FieldMeasuredEvent {
            field,
            natural: run.natural,
            factor,
            height,
        });
        Ok(height)
    }

    /// Paints a field into `rect`, dispatching `input` to its controls.
    ///
    /// Fields inside a fully closed region are skipped. Otherwise the
    /// routine runs clipped to `rect`, and its controls only see input
    /// inside `rect`; while an enclosing region fades, the
    /// rectangle is first filled with that region's color. A changed value
    /// is committed to `model` and announced to every decorator of the
    /// field. A secondary click inside `rect` opens a context menu.
    ///
    /// # Errors
    ///
    /// Returns [`InspectorError::Hook`] if a decorator hook fails.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn paint(
        &mut self,
        field: FieldId,
        rect: Rect,
        model: &mut dyn ValueModel,
        painter: &mut dyn Painter,
        input: &mut InputFrame,
        tracer: &mut Tracer<'_>,
    ) -> Result<PaintReport, InspectorError> {
        self.fields.validate(field);
        self.ensure_ready(tracer);
        let idx = field.idx;
        let i = idx as usize;
        self.fields.last_width[i] = Some(rect.width());

        let factor = self.factor_of(idx);
        if factor <= 0.0 {
            tracer.field_painted(&FieldPaintedEvent {
                field,
                rect,
                consumed: 0.0,
                skipped: true,
            });
            return Ok(PaintReport {
                skipped: true,
                ..PaintReport::default()
            });
        }

        let closing = self.closing_regions(idx);
        let fill = self.fade_color(idx);
        let before = model.value(field);
        let cursor = RenderCursor::new(
            rect.origin(),
            rect.width(),
            self.config.row_spacing,
            Pass::Paint,
        );

        painter.push_clip(rect);
        if let Some(color) = fill {
            painter.fill_rect(rect, color);
        }
        input.push_scope(rect);
        let run = self.execute(idx, cursor, before.clone(), &mut *painter, input, &closing);
        input.pop_scope();
        painter.pop_clip();
        let run = run?;

        self.painted_natural.insert(idx, run.natural);
        let scaled = run.natural * factor;
        let measured = self.fields.height[i];
        let consumed = scaled.min(rect.height()).min(measured.unwrap_or(scaled));
        if measured.is_none_or(|h| (h - scaled).abs() > HEIGHT_EPSILON) {
            self.dirty.mark(idx, dirty::LAYOUT);
        }

        let mut report = PaintReport {
            consumed,
            natural: run.natural,
            ..PaintReport::default()
        };
        if run.value != before {
            self.commit(field, &before, run.value, ChangeSource::Control, model, tracer)?;
            report.value_changed = true;
        }
        self.apply_effects(idx, run.effects, tracer);

        if let Some(pos) = input.take_context_click(rect) {
            let value = model.value(field);
            self.open_context_menu(idx, pos, &value, run.enabled, tracer);
            report.menu_opened = true;
        }

        tracer.field_painted(&FieldPaintedEvent {
            field,
            rect,
            consumed,
            skipped: false,
        });
        Ok(report)
    }

    /// Runs a whole redraw: starts the cycle at `now`, measures every field
    /// and paints them stacked downwards from `origin`.
    ///
    /// # Errors
    ///
    /// Returns the first hook failure. Fields before the failing one have
    /// already been painted.
    pub fn redraw(
        &mut self,
        origin: Point,
        width: f64,
        now: HostTime,
        model: &mut dyn ValueModel,
        painter: &mut dyn Painter,
        input: &mut InputFrame,
        tracer: &mut Tracer<'_>,
    ) -> Result<RedrawReport, InspectorError> {
        let changes = self.begin_redraw(now);
        self.ensure_ready(tracer);

        let ids: Vec<FieldId> = self.fields().collect();
        for id in &ids {
            self.fields.last_width[id.idx as usize] = Some(width);
        }

        let mut rows = Vec::with_capacity(ids.len());
        let mut total_height = 0.0;
        for id in ids {
            let height = self.query_height(id, &*model, tracer)?;
            total_height += height;
            rows.push((id, height));
        }

        let mut y = origin.y;
        let mut painted = 0;
        let mut value_changes = 0;
        for &(id, height) in &rows {
            let rect = Rect::new(origin.x, y, origin.x + width, y + height);
            let report = self.paint(id, rect, model, painter, input, tracer)?;
            if !report.skipped {
                painted += 1;
            }
            if report.value_changed {
                value_changes += 1;
            }
            y += height;
        }

        tracer.redraw_summary(&RedrawSummary {
            redraw_index: self.redraw_index,
            now,
            delta_secs: self.delta_secs,
            measured: rows.len(),
            painted,
            total_height,
            value_changes,
        });
        Ok(RedrawReport {
            changes,
            rows,
            total_height,
            painted,
            value_changes,
        })
    }

    /// Runs the action of a context-menu entry against the field's current
    /// value and commits the result. Returns whether a change was committed.
    ///
    /// Disabled entries, entries that leave the value untouched and menus of
    /// removed fields commit nothing.
    ///
    /// # Errors
    ///
    /// Returns [`InspectorError::MenuIndex`] if `index` is out of range and
    /// [`InspectorError::Hook`] if a change notification fails.
    pub fn activate_menu_item(
        &mut self,
        menu: &mut ContextMenu,
        index: usize,
        model: &mut dyn ValueModel,
        tracer: &mut Tracer<'_>,
    ) -> Result<bool, InspectorError> {
        let len = menu.items.len();
        let item = menu
            .items
            .get_mut(index)
            .ok_or(InspectorError::MenuIndex { index, len })?;
        if !self.fields.is_alive(menu.field) {
            return Ok(false);
        }
        let old = model.value(menu.field);
        let mut value = old.clone();
        if !item.run(&mut value) || value == old {
            return Ok(false);
        }
        self.commit(menu.field, &old, value, ChangeSource::Menu, model, tracer)?;
        Ok(true)
    }

    // -- Chain and layout maintenance --

    /// Builds missing chains, rebuilds chains made stale by a registry
    /// change, and refreshes the region structure.
    pub(super) fn ensure_ready(&mut self, tracer: &mut Tracer<'_>) {
        let revision = self.registry.revision();
        let order = self.fields.order.clone();

        // Release every stale chain before building any, so that rebuilt
        // Begins and Ends reconnect to their groups.
        for &idx in &order {
            let stale = self.fields.chain[idx as usize]
                .as_ref()
                .is_some_and(|c| c.revision != revision);
            if stale {
                self.drop_chain(idx);
                self.dirty.mark(idx, dirty::CHAIN);
            }
        }
        for &idx in &order {
            if self.fields.chain[idx as usize].is_none() {
                self.build_chain(idx, tracer);
            }
        }
        if self.layout_dirty {
            self.rebuild_layout();
        }
    }

    fn build_chain(&mut self, idx: u32, tracer: &mut Tracer<'_>) {
        let i = idx as usize;
        let field = self.fields.id_at(idx);
        let (chain, report) = Chain::build(
            field,
            &self.fields.decl[i].attributes,
            &self.registry,
            &mut self.instances,
            &mut self.groups,
            &self.config,
        );

        for (kind, error) in &report.dropped {
            tracer.decorator_dropped(&DecoratorDroppedEvent {
                field,
                kind: *kind,
                error,
            });
        }
        for link in &report.links {
            tracer.group_linked(&GroupLinkedEvent {
                key: &link.key,
                role: link.role,
                link: link.link,
            });
        }
        tracer.chain_built(&ChainBuiltEvent {
            field,
            decorators: chain.entries.len(),
            dropped: report.dropped.len(),
            revision: chain.revision,
        });

        self.fields.chain[i] = Some(chain);
        self.fields.natural[i] = None;
        self.layout_dirty = true;
        self.dirty.mark(idx, dirty::LAYOUT);
    }

    fn rebuild_layout(&mut self) {
        let chains = &self.fields.chain;
        self.layout = GroupLayout::build(&self.fields.order, |idx| {
            chains[idx as usize]
                .as_ref()
                .map(|c| c.markers().cloned().collect())
                .unwrap_or_default()
        });

        for (member, begin) in self.edges.drain(..) {
            self.dirty.remove_dependency(member, begin, dirty::LAYOUT);
        }
        self.edges = self.layout.edges().collect();
        for &(member, begin) in &self.edges {
            let _ = self.dirty.add_dependency(member, begin, dirty::LAYOUT);
        }
        self.layout_dirty = false;
    }

    // -- Regions --

    /// Product of the fade factors of every region enclosing the field.
    fn factor_of(&self, idx: u32) -> f64 {
        self.layout
            .enclosing(idx)
            .iter()
            .map(|&r| self.groups.factor(&self.layout.region(r).key))
            .product()
    }

    /// Unscaled height of a field in the current cycle: the paint pass's if
    /// it already ran, else the last measurement's.
    fn natural_of(&self, idx: u32) -> f64 {
        self.painted_natural
            .get(&idx)
            .copied()
            .or(self.fields.natural[idx as usize])
            .unwrap_or(0.0)
    }

    /// Regions the field closes, with their natural heights.
    fn closing_regions(&self, idx: u32) -> Vec<ClosedRegion> {
        self.layout
            .closed_by(idx)
            .iter()
            .map(|&r| ClosedRegion {
                key: self.layout.region(r).key.clone(),
                natural: self.layout.region_natural(
                    r,
                    |member| self.natural_of(member),
                    |key| self.groups.factor(key),
                ),
            })
            .collect()
    }

    /// Background of a field inside a fading region: the innermost fading
    /// region's color, or the palette color of its depth.
    fn fade_color(&self, idx: u32) -> Option<Color> {
        self.layout.enclosing(idx).iter().rev().find_map(|&r| {
            let region = self.layout.region(r);
            if !self.groups.is_fading(&region.key) {
                return None;
            }
            let explicit = self.groups.get(&region.key).and_then(|s| s.color());
            Some(explicit.unwrap_or_else(|| self.config.palette_color(region.depth)))
        })
    }

    // -- Execution --

    /// Runs the full routine of one field.
    fn execute(
        &mut self,
        idx: u32,
        cursor: RenderCursor,
        value: Value,
        painter: &mut dyn Painter,
        input: &mut InputFrame,
        closing: &[ClosedRegion],
    ) -> Result<Execution, InspectorError> {
        let i = idx as usize;
        let mut entries = self.fields.chain[i]
            .as_mut()
            .map(|c| mem::take(&mut c.entries))
            .unwrap_or_default();

        let decl = &self.fields.decl[i];
        let mut cx = FieldCx {
            field: self.fields.id_at(idx),
            instance: InstanceId::NONE,
            label: &decl.label,
            kind: decl.kind,
            value,
            cursor,
            enabled: true,
            painter,
            input,
            groups: &mut self.groups,
            instances: &self.instances,
            config: &self.config,
            delta_secs: self.delta_secs,
            closing,
            effects: Effects::default(),
        };
        let result = run_hooks(&mut entries, &mut cx);
        let FieldCx {
            cursor,
            value,
            enabled,
            effects,
            ..
        } = cx;

        if let Some(chain) = self.fields.chain[i].as_mut() {
            chain.entries = entries;
        }
        result?;
        Ok(Execution {
            natural: cursor.consumed(),
            value,
            enabled,
            effects,
        })
    }

    /// Commits a changed value and notifies every decorator of the field.
    fn commit(
        &mut self,
        field: FieldId,
        old: &Value,
        new: Value,
        source: ChangeSource,
        model: &mut dyn ValueModel,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), InspectorError> {
        model.set_value(field, new.clone());
        self.dirty.mark(field.idx, dirty::VALUE);
        self.dirty.mark(field.idx, dirty::LAYOUT);
        tracer.value_changed(&ValueChangedEvent { field, source });

        let cx = ChangeCx {
            field,
            old,
            new: &new,
            source,
        };
        let Some(chain) = self.fields.chain[field.idx as usize].as_mut() else {
            return Ok(());
        };
        for entry in &mut chain.entries {
            entry
                .decorator
                .on_value_changed(&cx)
                .map_err(|source| InspectorError::Hook {
                    field,
                    kind: entry.kind,
                    source,
                })?;
        }
        Ok(())
    }

    fn apply_effects(&mut self, idx: u32, effects: Effects, tracer: &mut Tracer<'_>) {
        if effects.relayout {
            self.dirty.mark(idx, dirty::LAYOUT);
        }
        for link in &effects.links {
            tracer.group_linked(&GroupLinkedEvent {
                key: &link.key,
                role: link.role,
                link: link.link,
            });
            self.mark_group_layout(&link.key);
        }
        for fade in &effects.fades {
            tracer.group_faded(&GroupFadedEvent {
                key: &fade.key,
                progress: fade.progress,
                next_progress: fade.next_progress,
                target_height: fade.target_height,
                displayed_height: fade.displayed_height,
            });
        }
        for key in &effects.group_relayout {
            self.mark_group_layout(key);
        }
    }

    fn open_context_menu(
        &mut self,
        idx: u32,
        position: Point,
        value: &Value,
        enabled: bool,
        tracer: &mut Tracer<'_>,
    ) {
        let field = self.fields.id_at(idx);
        let cx = MenuCx {
            field,
            value,
            enabled,
        };
        let mut builder = MenuBuilder::new();
        if let Some(chain) = self.fields.chain[idx as usize].as_mut() {
            for entry in &mut chain.entries {
                entry.decorator.on_context_menu(&cx, &mut builder);
            }
        }
        let items = builder.into_items();
        tracer.context_menu(&ContextMenuEvent {
            field,
            items: items.len(),
        });
        self.pending_menu = Some(ContextMenu {
            field,
            position,
            items,
        });
    }
}

/// Drives the render hooks of one chain.
///
/// A `handled` before-hook ends the render. Otherwise the first `handled`
/// `on_gui` owns the primary control, the default control stands in when
/// nobody claims it, and every after-hook runs.
fn run_hooks(entries: &mut [ChainEntry], cx: &mut FieldCx<'_>) -> Result<(), InspectorError> {
    let field = cx.field;
    let fail = |kind, source| InspectorError::Hook {
        field,
        kind,
        source,
    };

    for entry in entries.iter_mut() {
        cx.instance = entry.instance;
        let hook = entry
            .decorator
            .on_before_gui(cx)
            .map_err(|e| fail(entry.kind, e))?;
        cx.cursor.advance(hook.height);
        if hook.handled {
            return Ok(());
        }
    }

    let mut claimed = false;
    for entry in entries.iter_mut() {
        cx.instance = entry.instance;
        let hook = entry.decorator.on_gui(cx).map_err(|e| fail(entry.kind, e))?;
        cx.cursor.advance(hook.height);
        if hook.handled {
            claimed = true;
            break;
        }
    }
    if !claimed {
        cx.instance = InstanceId::NONE;
        let height = controls::default_control(cx);
        cx.cursor.advance(height);
    }

    for entry in entries.iter_mut() {
        cx.instance = entry.instance;
        let height = entry
            .decorator
            .on_after_gui(cx)
            .map_err(|e| fail(entry.kind, e))?;
        cx.cursor.advance(height);
    }
    Ok(())
}
